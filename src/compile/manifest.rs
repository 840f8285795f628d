use super::AssetKind;
use crate::error::Error;
use crate::internal_prelude::*;
use camino::Utf8Path;
use serde_json::Value;
use std::{fs, io};

/// Logical asset name to hashed output filename, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    entries: Vec<(String, String)>,
}

impl Manifest {
    /// Reads the manifest the css or js stage wrote at `path`.
    ///
    /// Only a flat JSON object of strings is accepted: anything else, such
    /// as a nested object or a number, fails naming the offending key.
    pub fn read(kind: AssetKind, path: &Utf8Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => Error::ManifestNotFound {
                kind,
                path: path.to_path_buf(),
            },
            io::ErrorKind::InvalidData => Error::ManifestParse {
                kind,
                path: path.to_path_buf(),
                reason: "not valid UTF-8".to_string(),
            },
            _ => Error::ManifestRead {
                kind,
                path: path.to_path_buf(),
                source,
            },
        })?;

        let manifest = Self::parse(&content).map_err(|reason| Error::ManifestParse {
            kind,
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(
            "Manifest {kind} read {} entries from {path}",
            manifest.len()
        );
        Ok(manifest)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
        let Value::Object(map) = value else {
            return Err(format!("expected a JSON object, found {}", describe(&value)));
        };

        let entries = map
            .into_iter()
            .map(|(name, file)| match file {
                Value::String(file) => Ok((name, file)),
                other => Err(format!(
                    "entry {name:?} must be a string, found {}",
                    describe(&other)
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, file)| (name.as_str(), file.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, F: Into<String>> FromIterator<(N, F)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (N, F)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, file)| (name.into(), file.into()))
                .collect(),
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

