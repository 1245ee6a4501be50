use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use crate::types::{ConfessionId, ConfessionRecord, ConfessionStats, StatusChange};

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Result of [`ConfessionStore::mark_posted`] and [`ConfessionStore::mark_rejected`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Marked {
    /// Status changed and saved. Contains the record after the change.
    Done(ConfessionRecord),
    /// No confession with that ID.
    NotFound,
    /// It's already posted, nothing changed.
    AlreadyPosted,
    /// It's already rejected, nothing changed.
    AlreadyRejected,
}

/// All confessions ever received, in order of arrival, mirrored
/// to a single JSON file after every change.
///
/// There's no locking in here. Whoever owns it is expected to hold
/// a lock across "change something, then save".
#[derive(Debug)]
pub struct ConfessionStore {
    path: PathBuf,
    records: Vec<ConfessionRecord>,
}

impl ConfessionStore {
    /// Load the collection from `path`.
    ///
    /// If the file is not there or is garbage, starts with nothing.
    /// This never fails, it only complains in the log.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let records = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(records) => records,
                Err(e) => {
                    log::warn!(
                        "Could not parse {}, starting with no confessions: {e}",
                        path.display()
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No {} yet, starting with no confessions.", path.display());
                Vec::new()
            }
            Err(e) => {
                log::warn!(
                    "Could not read {}, starting with no confessions: {e}",
                    path.display()
                );
                Vec::new()
            }
        };

        log::debug!("Loaded {} confessions.", records.len());

        Self { path, records }
    }

    #[allow(unused)]
    pub fn records(&self) -> &[ConfessionRecord] {
        &self.records
    }

    /// Add a new record at the end and save.
    ///
    /// If saving fails, the record is not kept.
    pub fn append(&mut self, record: ConfessionRecord) -> Result<&ConfessionRecord, StoreError> {
        self.records.push(record);

        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }

        // Was just pushed.
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn find_by_id(&self, id: &ConfessionId) -> Option<&ConfessionRecord> {
        self.records.iter().find(|x| x.id() == id)
    }

    /// Mark the confession as approved and posted at `now`, and save.
    pub fn mark_posted(
        &mut self,
        id: &ConfessionId,
        now: DateTime<Utc>,
    ) -> Result<Marked, StoreError> {
        self.change_status(id, |record| record.mark_posted(now))
    }

    /// Mark the confession as rejected, and save.
    pub fn mark_rejected(&mut self, id: &ConfessionId) -> Result<Marked, StoreError> {
        self.change_status(id, ConfessionRecord::mark_rejected)
    }

    fn change_status(
        &mut self,
        id: &ConfessionId,
        change: impl FnOnce(&mut ConfessionRecord) -> StatusChange,
    ) -> Result<Marked, StoreError> {
        let Some(index) = self.records.iter().position(|x| x.id() == id) else {
            return Ok(Marked::NotFound);
        };

        let before = self.records[index].clone();

        match change(&mut self.records[index]) {
            StatusChange::Changed => (),
            StatusChange::AlreadyPosted => return Ok(Marked::AlreadyPosted),
            StatusChange::AlreadyRejected => return Ok(Marked::AlreadyRejected),
        }

        if let Err(e) = self.persist() {
            // Memory should not disagree with the disk.
            self.records[index] = before;
            return Err(e);
        }

        Ok(Marked::Done(self.records[index].clone()))
    }

    /// Write the whole collection to the file, replacing it.
    ///
    /// Goes through a temporary file in the same directory that then
    /// gets renamed over, so the old file survives a crash mid-write.
    ///
    /// This is plain blocking I/O with an fsync. Called from async code it
    /// stalls that worker thread (and whoever waits on the store lock) for
    /// the duration of the write. The file is small and updates are rare,
    /// so that's fine here. Move it to `spawn_blocking` if that changes.
    pub fn persist(&self) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, &self.records)?;
        file.flush()?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }

    pub fn stats(&self) -> ConfessionStats {
        let mut stats = ConfessionStats {
            total: self.records.len(),
            ..Default::default()
        };

        for record in &self.records {
            if record.posted() {
                stats.posted += 1;
            }
            if record.pending() {
                stats.pending += 1;
            }
        }

        stats
    }
}
