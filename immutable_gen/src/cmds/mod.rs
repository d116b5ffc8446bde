pub mod analyze;
pub mod common;
pub mod generate;
