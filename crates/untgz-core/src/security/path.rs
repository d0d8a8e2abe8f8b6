//! Entry name sanitization.

use std::path::Path;

use crate::Result;
use crate::types::DestDir;
use crate::types::SafePath;

/// Maps an untrusted archive entry name to a location inside `dest`.
///
/// This function delegates to [`SafePath::resolve`], which:
/// - rejects empty names and names containing NUL
/// - rejects absolute names
/// - collapses `.` and `..` lexically, rejecting any climb above `dest`
/// - canonicalizes the deepest existing ancestor and requires it to stay
///   inside `dest`
///
/// Resolution has no side effects. The returned path's parents may not
/// exist yet.
///
/// # Performance
///
/// For paths with no existing components below `dest`: a handful of
/// `lstat` calls. For existing paths one `canonicalize()` call is added.
///
/// # Errors
///
/// Returns `PathTraversalRejected` for every unsafe name, and `Io` if an
/// existing ancestor cannot be inspected.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use untgz_core::security::resolve;
/// use untgz_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::prepare("/tmp/out")?;
///
/// let safe = resolve(&dest, Path::new("package/index.js"))?;
/// assert!(safe.as_path().starts_with(dest.as_path()));
///
/// assert!(resolve(&dest, Path::new("../etc/passwd")).is_err());
/// assert!(resolve(&dest, Path::new("/etc/passwd")).is_err());
/// # Ok(())
/// # }
/// ```
pub fn resolve(dest: &DestDir, entry_name: &Path) -> Result<SafePath> {
    SafePath::resolve(entry_name, dest)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ExtractionError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_dest() -> (TempDir, DestDir) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::prepare(temp.path()).expect("failed to create dest");
        (temp, dest)
    }

    #[test]
    fn test_resolve_valid() {
        let (_temp, dest) = create_test_dest();
        let safe = resolve(&dest, &PathBuf::from("package/package.json")).unwrap();
        assert_eq!(safe.as_path(), dest.as_path().join("package/package.json"));
    }

    #[test]
    fn test_resolve_traversal() {
        let (_temp, dest) = create_test_dest();
        let err = resolve(&dest, &PathBuf::from("../../etc/passwd")).unwrap_err();
        assert!(err.is_security_violation());
        match err {
            ExtractionError::PathTraversalRejected { path, .. } => {
                assert_eq!(path, PathBuf::from("../../etc/passwd"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_absolute() {
        let (_temp, dest) = create_test_dest();
        assert!(resolve(&dest, &PathBuf::from("/etc/passwd")).is_err());
    }

    #[test]
    fn test_resolve_current_dir_prefix() {
        let (_temp, dest) = create_test_dest();
        let safe = resolve(&dest, &PathBuf::from("./package/bar.txt")).unwrap();
        assert_eq!(safe.relative(), Path::new("package/bar.txt"));
    }

    #[test]
    fn test_resolve_is_pure() {
        let (_temp, dest) = create_test_dest();
        let first = resolve(&dest, &PathBuf::from("package/a/../b.txt")).unwrap();
        let second = resolve(&dest, &PathBuf::from("package/a/../b.txt")).unwrap();
        assert_eq!(first, second);
        assert!(std::fs::read_dir(dest.as_path()).unwrap().next().is_none());
    }
}
