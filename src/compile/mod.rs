
mod manifest;
mod partial;
mod tags;

pub use manifest::Manifest;
pub use partial::{render_partial, write_partial, Written};
pub use tags::{is_safe_asset_path, looks_hashed, tag, tags};

use derive_more::Display;
use serde::Serialize;

/// Which manifest, tag template and partial an operation works on.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    #[display("css")]
    Css,
    #[display("js")]
    Js,
}

/// Whether the front-end stages ran a production build (hashed, minified)
/// or a development one.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    #[display("development")]
    Development,
    #[display("production")]
    Production,
}

impl Mode {
    pub fn resolve(release: bool, node_env: Option<&str>) -> Self {
        if release || node_env == Some("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}
