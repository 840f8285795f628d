use camino::{Utf8Path, Utf8PathBuf};

pub trait PathExt {
    /// joins onto `base` unless the path is already absolute
    fn resolve_from(&self, base: &Utf8Path) -> Utf8PathBuf;

    /// drops the last path component
    fn without_last(&self) -> Utf8PathBuf;

    /// path with forward slashes, for stable test output across platforms
    fn test_string(&self) -> String;
}

impl PathExt for Utf8Path {
    fn resolve_from(&self, base: &Utf8Path) -> Utf8PathBuf {
        if self.is_absolute() {
            self.to_path_buf()
        } else {
            base.join(self)
        }
    }

    fn without_last(&self) -> Utf8PathBuf {
        let mut path = self.to_path_buf();
        path.pop();
        path
    }

    fn test_string(&self) -> String {
        self.as_str().replace('\\', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::PathExt;
    use camino::Utf8Path;

    #[test]
    fn resolve_relative_and_absolute() {
        let base = Utf8Path::new("/site");
        assert_eq!(
            Utf8Path::new("cms/web").resolve_from(base),
            Utf8Path::new("/site/cms/web")
        );
        assert_eq!(
            Utf8Path::new("/elsewhere/package.json").resolve_from(base),
            Utf8Path::new("/elsewhere/package.json")
        );
    }

    #[test]
    fn without_last_component() {
        assert_eq!(
            Utf8Path::new("/site/package.json").without_last(),
            Utf8Path::new("/site")
        );
    }
}
