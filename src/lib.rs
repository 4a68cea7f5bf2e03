pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod css_var;
pub mod model;
pub mod output;
pub mod palette;
pub mod prompt;

pub use app::{run, AppError, Outcome};
pub use cli::CliArgs;
