mod build;
mod config;

pub use build::{build_all, build_partials, BuildReport, PartialReport};
pub use config::{print_config, render_config};
