pub mod catalog;
pub mod inquiry;
