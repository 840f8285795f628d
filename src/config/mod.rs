
mod cli;
mod cms;
mod dotenvs;
mod variant;

pub use cli::{Cli, Commands, ConfigOpts, Opts};
pub use cms::{truthy, AppConfig, CmsConfig, GeneralConfig};
pub use dotenvs::EnvOverrides;
pub use variant::{Slot, Variant, VariantConfig};

use crate::{compile::Mode, ext::fs, ext::PathExt, internal_prelude::*};
use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use std::{env, fmt::Debug, sync::Arc};

pub const PACKAGE_FILE: &str = "package.json";
/// CMS base path, relative to the working dir
pub const CMS_DIR: &str = "cms";

pub struct Config {
    /// directory the configured paths are relative to
    pub working_dir: Utf8PathBuf,
    /// the package.json the variants came from, if any
    pub package_file: Option<Utf8PathBuf>,
    pub variants: Vec<Arc<Variant>>,
    pub mode: Mode,
    pub cms: CmsConfig,
    pub cli: Opts,
}

impl Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("variants", &self.variants)
            .field("mode", &self.mode)
            .field("cms", &self.cms)
            .field("cli", &self.cli)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Loads the configuration once: package.json, the nearest `.env` and
    /// the process environment, in increasing precedence.
    pub fn load(cli: Opts, cwd: &Utf8Path, package_file: Option<&Utf8Path>) -> Result<Self> {
        let process_env = env::vars_os()
            .filter_map(|(key, val)| Some((key.into_string().ok()?, val.into_string().ok()?)));
        Self::load_with_env(cli, cwd, package_file, process_env)
    }

    pub fn load_with_env(
        cli: Opts,
        cwd: &Utf8Path,
        package_file: Option<&Utf8Path>,
        process_env: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        let package_file = match package_file {
            Some(file) => Some(file.to_path_buf()),
            None => Some(cwd.join(PACKAGE_FILE)).filter(|file| file.is_file()),
        };
        let working_dir = package_file
            .as_deref()
            .map(|file| file.without_last())
            .unwrap_or_else(|| cwd.to_path_buf());

        let process_env: Vec<(String, String)> = process_env.into_iter().collect();
        let dotenv = match dotenvs::find_env_file(&working_dir) {
            Some(file) => dotenvs::load_dotenvs(&file)?,
            None => Vec::new(),
        };

        // the CMS reads the .env at its own base path, below the working dir
        let cms_env_file = working_dir.join(CMS_DIR).join(".env");
        let cms_dotenv = if cms_env_file.is_file() {
            dotenvs::load_dotenvs(&cms_env_file)?
        } else {
            Vec::new()
        };

        let vars = [dotenv.as_slice(), process_env.as_slice()].concat();
        let cms_vars = [dotenv, cms_dotenv, process_env].concat();

        let mut configs = match &package_file {
            Some(file) => {
                let content = fs::read_to_string(file)?;
                let package: serde_json::Value = serde_json::from_str(&content)
                    .wrap_err(format!("Could not parse {file}"))?;
                ensure!(package.is_object(), "{file} does not hold a JSON object");
                VariantConfig::parse_package(&package).wrap_err(format!("In {file}"))?
            }
            None => {
                debug!("Config no {PACKAGE_FILE} in {cwd}, using the default variant");
                vec![VariantConfig::default()]
            }
        };

        if let Some(name) = &cli.variant {
            let Some(selected) = configs.iter().position(|c| c.name == *name) else {
                bail!(
                    r#"The specified variant "{name}" not found. Available variants: {}"#,
                    configs.iter().map(|c| &c.name).join(", ")
                )
            };
            configs = vec![configs.swap_remove(selected)];
        }

        let overrides = EnvOverrides::from_vars(&vars);
        let variants = configs
            .into_iter()
            .map(|mut conf| {
                conf.overlay(&overrides);
                Variant::resolve(conf, &working_dir).map(Arc::new)
            })
            .collect::<Result<Vec<_>>>()?;

        let node_env = vars
            .iter()
            .rev()
            .find(|(key, _)| key == "NODE_ENV")
            .map(|(_, val)| val.as_str());

        Ok(Self {
            mode: Mode::resolve(cli.release, node_env),
            cms: CmsConfig::from_vars(&cms_vars),
            working_dir,
            package_file,
            variants,
            cli,
        })
    }
}
