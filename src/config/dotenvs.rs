use crate::internal_prelude::*;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Searches `dir` and then its parents for a `.env` file.
pub fn find_env_file(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    dir.ancestors()
        .map(|dir| dir.join(".env"))
        .find(|candidate| fs::metadata(candidate).is_ok_and(|meta| meta.is_file()))
}

pub fn load_dotenvs(file: &Utf8Path) -> Result<Vec<(String, String)>> {
    let mut dotenvs = vec![];
    for entry in dotenvy::from_path_iter(file).wrap_err(format!("Could not open {file}"))? {
        let (key, val) = entry.wrap_err(format!("Could not parse {file}"))?;
        dotenvs.push((key, val));
    }
    debug!("Env loaded {} variables from {file}", dotenvs.len());
    Ok(dotenvs)
}

/// `PARTIALS_*` values that replace the matching variant keys.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnvOverrides {
    pub css_manifest: Option<Utf8PathBuf>,
    pub js_manifest: Option<Utf8PathBuf>,
    pub css_base: Option<String>,
    pub js_base: Option<String>,
    pub css_partial: Option<Utf8PathBuf>,
    pub js_partial: Option<Utf8PathBuf>,
}

impl EnvOverrides {
    /// Later entries win, so pass the `.env` pairs before the process
    /// environment.
    pub fn from_vars<'a>(vars: impl IntoIterator<Item = &'a (String, String)>) -> Self {
        let mut env = Self::default();
        for (key, val) in vars {
            match key.as_str() {
                "PARTIALS_CSS_MANIFEST" => env.css_manifest = Some(Utf8PathBuf::from(val)),
                "PARTIALS_JS_MANIFEST" => env.js_manifest = Some(Utf8PathBuf::from(val)),
                "PARTIALS_CSS_BASE" => env.css_base = Some(val.clone()),
                "PARTIALS_JS_BASE" => env.js_base = Some(val.clone()),
                "PARTIALS_CSS_PARTIAL" => env.css_partial = Some(Utf8PathBuf::from(val)),
                "PARTIALS_JS_PARTIAL" => env.js_partial = Some(Utf8PathBuf::from(val)),
                _ if key.starts_with("PARTIALS_") => {
                    warn!("Env {key} is not used by asset-partials")
                }
                _ => {}
            }
        }
        env
    }
}
