//! Extraction configuration.

/// Name of the well-known package subdirectory returned on success.
pub const DEFAULT_PACKAGE_DIR: &str = "package";

/// What to do when a directory must be created where a non-directory
/// already exists (for example a file left behind by a previous run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryConflict {
    /// Abort the whole extraction with an I/O error.
    #[default]
    Fail,
    /// Remove the conflicting file or symlink and create the directory.
    ReplaceFile,
}

/// Configuration for a single extraction call.
///
/// Passed explicitly into every entry point; there is no process-wide state.
///
/// # Examples
///
/// ```
/// use untgz_core::ExtractionConfig;
/// use untgz_core::config::DirectoryConflict;
///
/// let config = ExtractionConfig::default()
///     .with_directory_conflict(DirectoryConflict::ReplaceFile)
///     .with_cleanup_on_failure(true);
/// assert_eq!(config.package_dir, "package");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Subdirectory of the destination returned as the package root.
    ///
    /// Resolved like an entry name: an absolute value or one that climbs
    /// out of the destination fails with `PathTraversalRejected`.
    pub package_dir: String,

    /// Validate the whole archive (framing, checksums, gzip trailer and
    /// every entry path) before the first filesystem write.
    pub verify_before_write: bool,

    /// Policy for directories colliding with existing non-directories.
    pub directory_conflict: DirectoryConflict,

    /// Remove files and directories created by this call if it fails.
    ///
    /// Files that existed before the call and were overwritten are not
    /// restored.
    pub cleanup_on_failure: bool,
}

impl Default for ExtractionConfig {
    /// Default values:
    /// - `package_dir`: `"package"`
    /// - `verify_before_write`: true
    /// - `directory_conflict`: `Fail`
    /// - `cleanup_on_failure`: false
    fn default() -> Self {
        Self {
            package_dir: DEFAULT_PACKAGE_DIR.to_string(),
            verify_before_write: true,
            directory_conflict: DirectoryConflict::Fail,
            cleanup_on_failure: false,
        }
    }
}

impl ExtractionConfig {
    /// Default configuration that additionally rolls back on failure.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            cleanup_on_failure: true,
            ..Default::default()
        }
    }

    /// Sets the package subdirectory name.
    #[must_use]
    pub fn with_package_dir(mut self, name: impl Into<String>) -> Self {
        self.package_dir = name.into();
        self
    }

    /// Enables or disables the validation pass.
    #[must_use]
    pub fn with_verify_before_write(mut self, verify: bool) -> Self {
        self.verify_before_write = verify;
        self
    }

    /// Sets the directory conflict policy.
    #[must_use]
    pub fn with_directory_conflict(mut self, policy: DirectoryConflict) -> Self {
        self.directory_conflict = policy;
        self
    }

    /// Enables or disables rollback on failure.
    #[must_use]
    pub fn with_cleanup_on_failure(mut self, cleanup: bool) -> Self {
        self.cleanup_on_failure = cleanup;
        self
    }
}
