pub mod shop;
pub mod views;
