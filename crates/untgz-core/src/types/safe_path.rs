//! Sanitized entry path type.

use crate::ExtractionError;
use crate::Result;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;

/// An entry path that has been proven to stay inside a destination.
///
/// # Security Properties
///
/// - Can ONLY be constructed through [`SafePath::resolve`]
/// - NO `From<PathBuf>` implementation
/// - The absolute form always starts with the canonical destination
/// - Contains no `.` or `..` components
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use untgz_core::types::DestDir;
/// use untgz_core::types::SafePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::prepare("/tmp/out")?;
///
/// let safe = SafePath::resolve(Path::new("package/./lib/../index.js"), &dest)?;
/// assert_eq!(safe.relative(), Path::new("package/index.js"));
///
/// assert!(SafePath::resolve(Path::new("../../etc/passwd"), &dest).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath {
    relative: PathBuf,
    absolute: PathBuf,
}

impl SafePath {
    /// Resolves an untrusted entry name against a destination.
    ///
    /// Resolution is lexical: `.` components are dropped and each `..`
    /// removes the previous component, so names that wander but net out
    /// inside the destination are accepted. The result is then checked
    /// against what already exists on disk: the deepest existing ancestor
    /// is canonicalized and must still lie inside the destination, which
    /// catches pre-existing symlinks pointing elsewhere. Nothing is created
    /// or modified.
    ///
    /// # Errors
    ///
    /// Returns `PathTraversalRejected` if the name:
    /// - is empty or contains a NUL byte
    /// - is absolute (root or drive prefix)
    /// - climbs above the destination with `..`
    /// - resolves through an existing symlink to a location outside
    ///
    /// Returns `Io` if an existing ancestor cannot be inspected.
    pub fn resolve(name: &Path, dest: &DestDir) -> Result<Self> {
        let reject = |reason| ExtractionError::PathTraversalRejected {
            path: name.to_path_buf(),
            reason,
        };

        if name.as_os_str().is_empty() {
            return Err(reject("empty entry name"));
        }
        if has_null_bytes(name) {
            return Err(reject("entry name contains NUL byte"));
        }

        let mut relative = PathBuf::new();
        for component in name.components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !relative.pop() {
                        return Err(reject("entry escapes destination"));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(reject("absolute entry name"));
                }
            }
        }

        let absolute = dest.join_path(&relative);
        check_existing_ancestors(&absolute, dest).map_err(|e| match e {
            AncestorError::Outside => reject("entry resolves through a symlink outside destination"),
            AncestorError::Dangling => reject("entry resolves through a dangling symlink"),
            AncestorError::Io(err) => ExtractionError::Io(err),
        })?;

        Ok(Self { relative, absolute })
    }

    /// Path relative to the destination, normalized.
    #[inline]
    #[must_use]
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Absolute path inside the destination.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.absolute
    }

    /// Returns `true` if the name resolved to the destination itself
    /// (for example `./`).
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.relative.as_os_str().is_empty()
    }

    /// Converts into the absolute `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.absolute
    }

}

enum AncestorError {
    Outside,
    Dangling,
    Io(io::Error),
}

/// Canonicalizes the deepest existing ancestor of `absolute` (the path
/// itself included) and checks it stays inside `dest`.
///
/// A dangling symlink is tolerated only as the final component, where the
/// extractor replaces it instead of writing through it.
fn check_existing_ancestors(absolute: &Path, dest: &DestDir) -> std::result::Result<(), AncestorError> {
    for ancestor in absolute.ancestors() {
        if ancestor == dest.as_path() {
            return Ok(());
        }

        let metadata = match ancestor.symlink_metadata() {
            Ok(metadata) => metadata,
            // A file where a directory is expected: the extractor applies the
            // directory conflict policy to it later.
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                continue;
            }
            Err(e) => return Err(AncestorError::Io(e)),
        };

        return match ancestor.canonicalize() {
            Ok(canonical) if canonical.starts_with(dest.as_path()) => Ok(()),
            Ok(_) => Err(AncestorError::Outside),
            Err(e) if e.kind() == io::ErrorKind::NotFound && metadata.is_symlink() => {
                if ancestor == absolute {
                    Ok(())
                } else {
                    Err(AncestorError::Dangling)
                }
            }
            Err(e) => Err(AncestorError::Io(e)),
        };
    }

    Ok(())
}

/// Checks if a path contains null bytes.
#[cfg(unix)]
fn has_null_bytes(path: &Path) -> bool {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().contains(&b'\0')
}

/// Checks if a path contains null bytes.
#[cfg(not(unix))]
fn has_null_bytes(path: &Path) -> bool {
    path.to_str().is_none_or(|s| s.contains('\0'))
}
