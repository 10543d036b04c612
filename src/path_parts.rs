//! Directory / basename / extension splitting for asset paths.
//!
//! Follows the conventional `dirname` / `basename` semantics rather than
//! [`Path::extension`], which treats dotfiles as extensionless:
//! - `"/photos/dawn.jpg"` → dir `/photos`, name `dawn.jpg`, ext `jpg`
//! - `"dawn.jpg"` → dir `.`, name `dawn.jpg`, ext `jpg`
//! - `"archive.tar.gz"` → ext `gz` (after the last dot)
//! - `".hidden"` → ext `hidden`
//! - `"README"` → ext `None`
//! - `"trailing."` → ext `""`

use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    /// Containing directory, `"."` when the path has none.
    pub directory: String,
    /// Final component, including the extension.
    pub file_name: String,
    /// Substring after the last `.` of the file name.
    pub extension: Option<String>,
}

impl PathParts {
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                parent.to_string_lossy().into_owned()
            }
            Some(_) => ".".to_string(),
            // Root or empty path
            None => path.to_string_lossy().into_owned(),
        };

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_string());

        Self {
            directory,
            file_name,
            extension,
        }
    }
}
