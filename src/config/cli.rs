use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser, PartialEq, Default)]
pub struct Opts {
    /// Production build: the front-end stages hashed their output and every
    /// asset should carry a content hash. Also enabled by NODE_ENV=production.
    #[arg(short, long)]
    pub release: bool,

    /// Which variant to use, from the variants defined in package.json
    #[arg(short = 'p', long)]
    pub variant: Option<String>,

    /// Verbosity (none: info, errors & warnings, -v: verbose, -vv: very verbose).
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Parser, PartialEq, Default)]
pub struct ConfigOpts {
    #[command(flatten)]
    pub opts: Opts,

    /// Print the security key instead of redacting it.
    #[arg(long)]
    pub show_secrets: bool,
}

#[derive(Debug, Parser)]
#[clap(version)]
pub struct Cli {
    /// Path to the site's package.json.
    #[arg(long)]
    pub manifest_path: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn opts(&self) -> Opts {
        match &self.command {
            Commands::Build(opts) => opts.clone(),
            Commands::Config(config_opts) => config_opts.opts.clone(),
        }
    }
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Commands {
    /// Write the css and js partials from the asset manifests.
    Build(Opts),
    /// Print the resolved variants and CMS configuration as JSON.
    Config(ConfigOpts),
}
