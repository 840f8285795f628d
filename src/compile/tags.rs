use super::{AssetKind, Manifest};
use crate::error::Error;

/// One tag per manifest entry, in manifest order.
pub fn tags(kind: AssetKind, manifest: &Manifest, base: &str) -> Result<Vec<String>, Error> {
    manifest
        .iter()
        .map(|(name, file)| {
            if !is_safe_asset_path(file) {
                return Err(Error::UnsafeAssetName {
                    kind,
                    name: name.to_string(),
                    file: file.to_string(),
                });
            }
            Ok(tag(kind, base, file))
        })
        .collect()
}

pub fn tag(kind: AssetKind, base: &str, file: &str) -> String {
    match kind {
        AssetKind::Css => format!(r#"<link rel="stylesheet" href="{base}{file}">"#),
        AssetKind::Js => format!(r#"<script defer src="{base}{file}"></script>"#),
    }
}

/// Whether `path` can go between the double quotes of an html attribute
/// as is. Build outputs never need quoting, so anything that would is
/// refused rather than escaped.
pub fn is_safe_asset_path(path: &str) -> bool {
    !path.is_empty()
        && !path.chars().any(|c| {
            matches!(c, '"' | '\'' | '<' | '>' | '&' | '`') || c.is_whitespace() || c.is_control()
        })
}

/// Whether the file name carries a content hash, as in `bundle.a1b2c3.js`
/// or `app-9f8e7d2c.css`: some dot or dash separated segment of the stem
/// holding at least 6 hex digits or a mix of letters and digits.
pub fn looks_hashed(file: &str) -> bool {
    let name = file.rsplit('/').next().unwrap_or(file);
    let stem = match name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => name,
    };
    stem.split(['.', '-', '_'])
        .skip(1)
        .any(|segment| segment.len() >= 6 && is_hash_segment(segment))
}

fn is_hash_segment(segment: &str) -> bool {
    let alphanumeric = segment.chars().all(|c| c.is_ascii_alphanumeric());
    let hex = segment.chars().all(|c| c.is_ascii_hexdigit());
    let has_digit = segment.chars().any(|c| c.is_ascii_digit());
    alphanumeric && (hex || has_digit)
}
