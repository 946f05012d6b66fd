pub mod app;
pub mod catalog;
pub mod config;
pub mod screens;
pub mod shared;
pub mod tui;
