use super::AssetKind;
use crate::{error::Error, ext::fs};
use camino::Utf8Path;
use derive_more::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Written {
    #[display("updated")]
    Updated,
    #[display("unchanged")]
    Unchanged,
}

/// Tags joined by newlines, with a trailing newline.
pub fn render_partial(tags: &[String]) -> String {
    let mut content = tags.join("\n");
    content.push('\n');
    content
}

/// Atomically replaces `dest` with the rendered tags. The directory of
/// `dest` has to exist already.
pub fn write_partial(kind: AssetKind, tags: &[String], dest: &Utf8Path) -> Result<Written, Error> {
    let content = render_partial(tags);

    match fs::write_if_changed(dest, content.as_bytes()) {
        Ok(true) => Ok(Written::Updated),
        Ok(false) => Ok(Written::Unchanged),
        Err(source) => Err(Error::Write {
            kind,
            path: dest.to_path_buf(),
            source,
        }),
    }
}
