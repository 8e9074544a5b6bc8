pub mod lifecycle;
pub mod records;
