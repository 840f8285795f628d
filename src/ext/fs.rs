use crate::internal_prelude::*;
use camino::Utf8Path;
use std::{
    fs::{self, Permissions},
    io::{self, Write},
};
use tempfile::NamedTempFile;

pub fn read_to_string<P: AsRef<Utf8Path>>(path: P) -> Result<String> {
    fs::read_to_string(path.as_ref())
        .wrap_err(format!("Could not read to string {:?}", path.as_ref()))
}

/// Replaces `path` with `contents` through a temp file in the same directory
/// and a rename, so readers see either the old or the new file.
///
/// The destination directory must exist. An existing file keeps its
/// permissions; a new one gets the usual `0o644`, since the temp file is
/// created owner-only.
pub fn write_atomic(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.as_file().set_permissions(permissions_for(path)?)?;

    tmp.persist(path).map_err(|e| e.error)?;
    trace!("Fs replaced {path}");
    Ok(())
}

/// Like [`write_atomic`] but leaves the file alone when it already holds
/// `contents`. Returns whether the file was written.
pub fn write_if_changed(path: &Utf8Path, contents: &[u8]) -> io::Result<bool> {
    match fs::read(path) {
        Ok(current) if seahash::hash(&current) == seahash::hash(contents) => {
            trace!("Fs unchanged {path}");
            return Ok(false);
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    write_atomic(path, contents)?;
    Ok(true)
}

#[cfg(unix)]
fn permissions_for(path: &Utf8Path) -> io::Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    match fs::metadata(path) {
        Ok(meta) => Ok(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Permissions::from_mode(0o644)),
        Err(e) => Err(e),
    }
}

#[cfg(not(unix))]
fn permissions_for(path: &Utf8Path) -> io::Result<Permissions> {
    let dir = path.parent().filter(|d| !d.as_str().is_empty()).unwrap_or(Utf8Path::new("."));
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let mut perms = fs::metadata(dir)?.permissions();
            perms.set_readonly(false);
            Ok(perms)
        }
        Err(e) => Err(e),
    }
}
