pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod render;
pub mod select;
pub mod source;
