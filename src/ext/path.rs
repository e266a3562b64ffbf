use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path with the suffix rules used by file selection.
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path
    /// contains invalid Unicode characters.
    fn to_str_checked(&self) -> Result<&str>;

    /// The last suffix of the file name including its dot (`.gz` for
    /// `archive.tar.gz`), or an empty string when there is none.
    ///
    /// Leading dots do not start a suffix, so `.bashrc` has no suffix, while
    /// a trailing dot is a suffix of its own (`name.` gives `.`).
    ///
    /// # Examples
    /// ```
    /// use dialogwiz::ext::PathExt;
    /// use std::path::Path;
    ///
    /// assert_eq!(Path::new("conf/app.yaml").final_suffix(), ".yaml");
    /// assert_eq!(Path::new(".bashrc").final_suffix(), "");
    /// ```
    fn final_suffix(&self) -> String;

    /// Every suffix of the file name from the first dot (`.tar.gz` for
    /// `archive.tar.gz`), or an empty string when there is none.
    fn compound_suffix(&self) -> String;
}

/// File name with its leading dots removed, as a lossy string.
fn stem_source(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().trim_start_matches('.').to_string())
        .unwrap_or_default()
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::ConfigParse(format!(
                "path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn final_suffix(&self) -> String {
        let name = stem_source(self);
        name.rfind('.').map(|idx| name[idx..].to_string()).unwrap_or_default()
    }

    fn compound_suffix(&self) -> String {
        let name = stem_source(self);
        name.find('.').map(|idx| name[idx..].to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_to_str_checked_valid() {
        let path = Path::new("valid_path");
        assert_eq!(path.to_str_checked().unwrap(), "valid_path");
    }

    #[test]
    fn test_final_suffix() {
        assert_eq!(Path::new("/etc/app/config.yaml").final_suffix(), ".yaml");
        assert_eq!(Path::new("archive.tar.gz").final_suffix(), ".gz");
        assert_eq!(Path::new("Makefile").final_suffix(), "");
        assert_eq!(Path::new(".bashrc").final_suffix(), "");
        assert_eq!(Path::new("..hidden.txt").final_suffix(), ".txt");
        assert_eq!(Path::new("name.").final_suffix(), ".");
        assert_eq!(Path::new("/").final_suffix(), "");
    }

    #[test]
    fn test_compound_suffix() {
        assert_eq!(Path::new("archive.tar.gz").compound_suffix(), ".tar.gz");
        assert_eq!(Path::new("notes.md").compound_suffix(), ".md");
        assert_eq!(Path::new("README").compound_suffix(), "");
    }

    #[test]
    fn test_final_suffix_keeps_case() {
        assert_eq!(Path::new("PHOTO.JPG").final_suffix(), ".JPG");
    }
}
