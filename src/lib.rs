#[cfg(test)]
mod tests;

pub mod command;
pub mod compile;
pub mod config;
pub mod error;
pub mod ext;
pub mod logger;
mod internal_prelude {
    pub use crate::ext::{eyre::reexports::*, Paint as _};
    pub use tracing::*;
}

use crate::{config::Commands, ext::PathExt, logger::GRAY};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Cli, Config};
use std::env;

use crate::internal_prelude::*;

pub fn run(args: Cli) -> Result<()> {
    logger::setup(args.opts().verbose);

    let cwd = Utf8PathBuf::from_path_buf(env::current_dir().dot()?)
        .map_err(|p| eyre!("Working directory is not valid UTF-8: {p:?}"))?;

    run_in(args, &cwd)
}

/// Runs a command as if started from `cwd`, without touching the logger or
/// the process working directory.
pub fn run_in(args: Cli, cwd: &Utf8Path) -> Result<()> {
    let manifest_path = args.manifest_path.as_ref().map(|path| path.resolve_from(cwd));

    let config = Config::load(args.opts(), cwd, manifest_path.as_deref())
        .wrap_err(format!("manifest_path: {:?}", &args.manifest_path))?;
    debug!(
        "Path working dir {}",
        GRAY.paint(config.working_dir.as_str())
    );

    match args.command {
        Commands::Build(_) => command::build_all(&config).map(|_| ()),
        Commands::Config(print) => command::print_config(&config, print.show_secrets),
    }
}
