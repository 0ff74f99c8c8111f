pub mod browser;
pub mod frame;
pub mod help;
pub mod status_bar;
