//! Validated destination directory type.

use crate::ExtractionError;
use crate::Result;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// A prepared destination directory for extraction.
///
/// This type represents a directory that has been:
/// - Created, together with any missing ancestors
/// - Verified to be a directory (not a file)
/// - Verified to be readable and writable by the current process
/// - Canonicalized to an absolute path
///
/// # Security Properties
///
/// Every entry path is checked against the canonical form held here, so a
/// destination reached through a symlink is resolved once, up front.
///
/// # Examples
///
/// ```no_run
/// use untgz_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::prepare("/tmp/extraction")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates the directory if needed and validates it.
    ///
    /// # Security Considerations
    ///
    /// **TOCTOU Warning**: the directory could be replaced between this
    /// check and later writes by someone with access to the filesystem.
    /// Concurrent extractions into overlapping destinations are not
    /// coordinated either.
    ///
    /// # Errors
    ///
    /// Returns `DestinationNotWritable` if:
    /// - The directory or one of its ancestors cannot be created
    /// - The path exists but is not a directory
    /// - The path cannot be canonicalized
    /// - The directory is not readable and writable
    pub fn prepare(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let not_writable = |source: io::Error| ExtractionError::DestinationNotWritable {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&path).map_err(not_writable)?;

        let metadata = fs::metadata(&path).map_err(not_writable)?;
        if !metadata.is_dir() {
            return Err(not_writable(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("path is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize().map_err(not_writable)?;
        check_access(&canonical, &metadata).map_err(not_writable)?;

        Ok(Self(canonical))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a relative path that has already been validated.
    #[inline]
    #[must_use]
    pub fn join_path(&self, path: &Path) -> PathBuf {
        if path.as_os_str().is_empty() {
            return self.0.clone();
        }
        self.0.join(path)
    }
}

#[cfg(unix)]
fn check_access(path: &Path, _metadata: &fs::Metadata) -> io::Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_cstring = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"))?;

    // Search permission is needed as well to create entries inside.
    //
    // SAFETY: access() is safe to call with a valid C string. The pointer is
    // valid for the duration of the call and the string is not modified.
    #[allow(unsafe_code)]
    let result = unsafe {
        libc::access(
            path_cstring.as_ptr(),
            libc::R_OK | libc::W_OK | libc::X_OK,
        )
    };

    if result != 0 {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("directory is not readable and writable: {}", path.display()),
        ));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_access(path: &Path, metadata: &fs::Metadata) -> io::Result<()> {
    if metadata.permissions().readonly() {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("directory is read-only: {}", path.display()),
        ));
    }
    Ok(())
}
