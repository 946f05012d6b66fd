pub mod detail;
pub mod form;
pub mod list;
pub mod login;
pub mod navigation;
