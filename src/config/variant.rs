use super::dotenvs::EnvOverrides;
use crate::{
    compile::{is_safe_asset_path, AssetKind},
    ext::PathExt,
    internal_prelude::*,
};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// One site/theme build: where its manifests are, which public path the
/// tags point at and which partials receive them.
#[derive(Clone, PartialEq, Serialize)]
pub struct Variant {
    pub name: String,
    pub css: Slot,
    pub js: Slot,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct Slot {
    /// absolute path to the manifest written by the front-end stage
    pub manifest: Utf8PathBuf,
    /// public url prefix, starting and ending with `/`
    pub base: String,
    /// absolute path to the template partial
    pub partial: Utf8PathBuf,
}

impl Variant {
    pub fn slot(&self, kind: AssetKind) -> &Slot {
        match kind {
            AssetKind::Css => &self.css,
            AssetKind::Js => &self.js,
        }
    }

    /// Resolves paths against `dir`, the directory of the configuration file.
    pub fn resolve(conf: VariantConfig, dir: &Utf8Path) -> Result<Self> {
        ensure!(!conf.name.trim().is_empty(), "A variant name cannot be empty");
        check_base(&conf.name, "css-base", &conf.css_base)?;
        check_base(&conf.name, "js-base", &conf.js_base)?;

        Ok(Self {
            css: Slot {
                manifest: conf.css_manifest.resolve_from(dir),
                base: conf.css_base,
                partial: conf.css_partial.resolve_from(dir),
            },
            js: Slot {
                manifest: conf.js_manifest.resolve_from(dir),
                base: conf.js_base,
                partial: conf.js_partial.resolve_from(dir),
            },
            name: conf.name,
        })
    }
}

fn check_base(variant: &str, key: &str, base: &str) -> Result<()> {
    ensure!(
        base.starts_with('/') && base.ends_with('/'),
        "Variant {variant:?}: {key} must start and end with '/', got {base:?}"
    );
    ensure!(
        is_safe_asset_path(base),
        "Variant {variant:?}: {key} {base:?} cannot be used in an html attribute"
    );
    Ok(())
}

impl Debug for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.name)
            .field("css", &self.css)
            .field("js", &self.js)
            .finish()
    }
}

impl Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("manifest", &self.manifest.test_string())
            .field("base", &self.base)
            .field("partial", &self.partial.test_string())
            .finish()
    }
}

/// A variant as written under the `partials` key of package.json.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct VariantConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_css_manifest")]
    pub css_manifest: Utf8PathBuf,
    #[serde(default = "default_js_manifest")]
    pub js_manifest: Utf8PathBuf,
    #[serde(default = "default_css_base")]
    pub css_base: String,
    #[serde(default = "default_js_base")]
    pub js_base: String,
    #[serde(default = "default_css_partial")]
    pub css_partial: Utf8PathBuf,
    #[serde(default = "default_js_partial")]
    pub js_partial: Utf8PathBuf,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            css_manifest: default_css_manifest(),
            js_manifest: default_js_manifest(),
            css_base: default_css_base(),
            js_base: default_js_base(),
            css_partial: default_css_partial(),
            js_partial: default_js_partial(),
        }
    }
}

impl VariantConfig {
    /// Reads the `partials` section of a package.json document: a single
    /// object, an array of named objects, or nothing for the defaults.
    pub fn parse_package(package: &serde_json::Value) -> Result<Vec<Self>> {
        let Some(section) = package.get("partials") else {
            return Ok(vec![Self::default()]);
        };

        let variants: Vec<Self> = if section.is_array() {
            serde_json::from_value(section.clone()).wrap_err("package.json: partials")?
        } else {
            vec![serde_json::from_value(section.clone()).wrap_err("package.json: partials")?]
        };

        ensure!(
            !variants.is_empty(),
            "package.json: partials must define at least one variant"
        );
        for (i, variant) in variants.iter().enumerate() {
            if variants[..i].iter().any(|v| v.name == variant.name) {
                bail!(
                    "package.json: partials defines the variant {:?} more than once",
                    variant.name
                );
            }
        }
        Ok(variants)
    }

    pub fn overlay(&mut self, env: &EnvOverrides) {
        if let Some(path) = &env.css_manifest {
            self.css_manifest = path.clone();
        }
        if let Some(path) = &env.js_manifest {
            self.js_manifest = path.clone();
        }
        if let Some(base) = &env.css_base {
            self.css_base = base.clone();
        }
        if let Some(base) = &env.js_base {
            self.js_base = base.clone();
        }
        if let Some(path) = &env.css_partial {
            self.css_partial = path.clone();
        }
        if let Some(path) = &env.js_partial {
            self.js_partial = path.clone();
        }
    }
}

fn default_name() -> String {
    "default".to_string()
}

fn default_css_manifest() -> Utf8PathBuf {
    Utf8PathBuf::from("cms/web/assets/css/manifest.json")
}

fn default_js_manifest() -> Utf8PathBuf {
    Utf8PathBuf::from("cms/web/assets/js/manifest.json")
}

fn default_css_base() -> String {
    "/assets/css/".to_string()
}

fn default_js_base() -> String {
    "/assets/js/".to_string()
}

fn default_css_partial() -> Utf8PathBuf {
    Utf8PathBuf::from("cms/templates/_boilerplate/_partials/build-css.html")
}

fn default_js_partial() -> Utf8PathBuf {
    Utf8PathBuf::from("cms/templates/_boilerplate/_partials/build-js.html")
}
