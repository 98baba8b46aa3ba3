pub mod metric;
pub mod table;
