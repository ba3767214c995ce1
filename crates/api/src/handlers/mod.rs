pub mod dashboard;
pub mod plants;
pub mod quotes;
