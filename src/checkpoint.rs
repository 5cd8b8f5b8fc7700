//! File-backed checkpoint: a single decimal Unix timestamp recording the
//! last successful poll cycle, so the bot resumes from the window it has
//! not yet reported after a restart.

use std::io;
use std::path::PathBuf;

use tracing::debug;

use crate::error::PollError;

pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the persisted checkpoint.
    ///
    /// A missing file means no cycle has ever succeeded: start from the
    /// beginning of time. A file that exists but does not hold a decimal
    /// timestamp is an error.
    pub fn load(&self) -> Result<i64, PollError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "Checkpoint file {} does not exist yet, starting from 0",
                    self.path.display()
                );
                return Ok(0);
            }
            Err(source) => return Err(self.error(source)),
        };

        contents
            .trim()
            .parse()
            .map_err(|err| self.error(io::Error::new(io::ErrorKind::InvalidData, err)))
    }

    /// Persist the checkpoint after a successful cycle.
    pub fn store(&self, timestamp: i64) -> Result<(), PollError> {
        std::fs::write(&self.path, timestamp.to_string()).map_err(|source| self.error(source))
    }

    fn error(&self, source: io::Error) -> PollError {
        PollError::Checkpoint {
            path: self.path.display().to_string(),
            source,
        }
    }
}
