mod args;
mod commands;
pub mod context;
mod handlers;
mod views;

pub use args::{Cli, Commands};
pub use commands::run;
