use super::*;
use crate::input::builtin_chart_input;
use crate::pipeline::stage1_validate::run_stage1;
use crate::pipeline::stage2_layout::run_stage2;

fn fonts_available() -> bool {
    (FONT, 12).into_font().box_size("A").is_ok()
}

fn small_style() -> ChartStyle {
    ChartStyle {
        width_px: 600,
        height_px: 360,
        ..ChartStyle::default()
    }
}

#[test]
fn test_default_style_matches_figure() {
    let style = ChartStyle::default();
    assert_eq!((style.width_px, style.height_px), (3000, 1800));
    assert_eq!(style.y_label, "Score");
    assert_eq!(style.y_max, 1.2);
    assert_eq!(style.scaled(20.0), 60);
}

#[test]
fn test_scaled_never_zero() {
    let style = ChartStyle {
        height_px: 60,
        ..ChartStyle::default()
    };
    assert_eq!(style.scaled(1.0), 1);
}

#[test]
fn test_buffer_len_checks_size() {
    assert_eq!(buffer_len(&small_style()).unwrap(), 600 * 360 * 3);
    let huge = ChartStyle {
        width_px: u32::MAX,
        height_px: u32::MAX,
        ..ChartStyle::default()
    };
    assert!(matches!(buffer_len(&huge), Err(ChartError::InvalidInput(_))));
    let wide = ChartStyle {
        width_px: MAX_SIDE_PX + 1,
        height_px: 10,
        ..ChartStyle::default()
    };
    assert!(matches!(buffer_len(&wide), Err(ChartError::InvalidInput(_))));
}

#[test]
fn test_render_rejects_oversized_image_without_allocating() {
    let data = run_stage1(&builtin_chart_input()).unwrap();
    let layout = run_stage2(&data, 0.25).unwrap();
    let huge = ChartStyle {
        width_px: u32::MAX,
        height_px: u32::MAX,
        ..ChartStyle::default()
    };
    assert!(matches!(
        render_rgb(&data, &layout, &huge),
        Err(ChartError::InvalidInput(_))
    ));
}

#[test]
fn test_grid_ticks() {
    let ticks = grid_ticks(1.2);
    assert_eq!(ticks.len(), 6);
    assert!((ticks[5] - 1.2).abs() < 1e-5);
    assert_eq!(grid_ticks(1.0).len(), 5);
    assert!(grid_ticks(0.1).is_empty());
}

#[test]
fn test_dash_segments_stay_in_range() {
    let segs = dash_segments(-0.5, 3.5, 0.1, 0.05);
    assert!(!segs.is_empty());
    assert_eq!(segs[0].0, -0.5);
    for (a, b) in &segs {
        assert!(a < b);
        assert!(*b <= 3.5);
    }
    assert!(dash_segments(0.0, 1.0, 0.0, 0.1).is_empty());
}

#[test]
fn test_render_rejects_bad_style() {
    let data = run_stage1(&builtin_chart_input()).unwrap();
    let layout = run_stage2(&data, 0.25).unwrap();
    let zero = ChartStyle {
        width_px: 0,
        ..small_style()
    };
    assert!(matches!(
        render_rgb(&data, &layout, &zero),
        Err(ChartError::InvalidInput(_))
    ));
    let flat = ChartStyle {
        y_max: 0.0,
        ..small_style()
    };
    assert!(matches!(
        render_rgb(&data, &layout, &flat),
        Err(ChartError::InvalidInput(_))
    ));
}

#[test]
fn test_render_fills_buffer_with_bars() {
    if !fonts_available() {
        eprintln!("skipping: no system font for text rendering");
        return;
    }
    let data = run_stage1(&builtin_chart_input()).unwrap();
    let layout = run_stage2(&data, 0.25).unwrap();
    let style = small_style();
    let buf = render_rgb(&data, &layout, &style).unwrap();
    assert_eq!(buf.len(), 600 * 360 * 3);

    let seagreen = [46u8, 139, 87];
    assert!(buf.chunks_exact(3).any(|px| *px == seagreen));
}

#[test]
fn test_render_default_size_with_category_labels() {
    if !fonts_available() {
        eprintln!("skipping: no system font for text rendering");
        return;
    }
    let data = run_stage1(&builtin_chart_input()).unwrap();
    let layout = run_stage2(&data, 0.25).unwrap();
    let style = ChartStyle::default();
    let buf = render_rgb(&data, &layout, &style).unwrap();
    assert_eq!(buf.len(), 3000 * 1800 * 3);

    // Category names are drawn in black between the x axis and the legend.
    let width = style.width_px as usize;
    let legend_top = style.height_px as usize - (style.height_px as f32 * 0.16) as usize;
    let axis_row = legend_top - (style.scaled(36.0) + style.scaled(12.0)) as usize;
    let label_band = &buf[(axis_row + 2) * width * 3..legend_top * width * 3];
    assert!(label_band.chunks_exact(3).any(|px| px.iter().all(|&c| c < 64)));
}
