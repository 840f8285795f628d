use crate::compile::AssetKind;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures of the manifest to partial pipeline. All of them end the build.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{kind} manifest not found at {path}")]
    ManifestNotFound { kind: AssetKind, path: Utf8PathBuf },

    #[error("Could not read {kind} manifest {path} because of {source}")]
    ManifestRead {
        kind: AssetKind,
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid {kind} manifest {path}: {reason}")]
    ManifestParse {
        kind: AssetKind,
        path: Utf8PathBuf,
        reason: String,
    },

    #[error("Unsafe {kind} asset name {file:?} for entry {name:?}")]
    UnsafeAssetName {
        kind: AssetKind,
        name: String,
        file: String,
    },

    #[error("Could not write {kind} partial {path} because of {source}")]
    Write {
        kind: AssetKind,
        path: Utf8PathBuf,
        source: std::io::Error,
    },
}
