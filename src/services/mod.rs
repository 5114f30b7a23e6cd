pub mod commentary;
pub mod config;
pub mod display;
pub mod passage;
pub mod session;
