use crate::{
    compile::Mode,
    config::{CmsConfig, Config, Variant},
    internal_prelude::*,
};
use camino::Utf8Path;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct Resolved<'a> {
    mode: Mode,
    working_dir: &'a Utf8Path,
    package_file: Option<&'a Utf8Path>,
    variants: Vec<&'a Variant>,
    cms: CmsConfig,
}

pub fn render_config(config: &Config, show_secrets: bool) -> Result<String> {
    let resolved = Resolved {
        mode: config.mode,
        working_dir: &config.working_dir,
        package_file: config.package_file.as_deref(),
        variants: config.variants.iter().map(|v| v.as_ref()).collect(),
        cms: if show_secrets {
            config.cms.clone()
        } else {
            config.cms.redacted()
        },
    };
    serde_json::to_string_pretty(&resolved).wrap_err("Could not serialize the configuration")
}

pub fn print_config(config: &Config, show_secrets: bool) -> Result<()> {
    println!("{}", render_config(config, show_secrets)?);
    Ok(())
}
