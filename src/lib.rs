pub mod backend;
pub mod commands;
pub mod config;
pub mod shared;
pub mod submit;
pub mod tui;
pub mod wizard;
