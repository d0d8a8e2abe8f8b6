//! Rollback journal for partially completed extractions.

use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
enum Created {
    File(PathBuf),
    Dir(PathBuf),
}

/// Records filesystem paths newly created by one extraction call.
///
/// A disabled journal records nothing and rolls back nothing.
#[derive(Debug)]
pub(crate) struct Journal {
    enabled: bool,
    created: Vec<Created>,
}

/// Result of a rollback.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RollbackOutcome {
    pub removed: usize,
    pub left_behind: usize,
}

impl Journal {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            created: Vec::new(),
        }
    }

    pub(crate) fn record_file(&mut self, path: PathBuf) {
        if self.enabled {
            self.created.push(Created::File(path));
        }
    }

    pub(crate) fn record_dir(&mut self, path: PathBuf) {
        if self.enabled {
            self.created.push(Created::Dir(path));
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.created.len()
    }

    /// Removes recorded paths in reverse creation order.
    ///
    /// Directories are only removed when empty, so anything placed in them
    /// by someone else survives.
    pub(crate) fn rollback(self) -> RollbackOutcome {
        let mut outcome = RollbackOutcome::default();

        for created in self.created.into_iter().rev() {
            let (path, result) = match created {
                Created::File(path) => {
                    let result = fs::remove_file(&path);
                    (path, result)
                }
                Created::Dir(path) => {
                    let result = fs::remove_dir(&path);
                    (path, result)
                }
            };

            match result {
                Ok(()) => outcome.removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "left behind after rollback");
                    outcome.left_behind += 1;
                }
            }
        }

        outcome
    }
}
