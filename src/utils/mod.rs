pub mod formatting;
pub mod sort;
pub mod table;
pub mod time;
