//! CSV file writer for question/answer exchanges.
//!
//! Each [`LogRecord`] becomes one row `timestamp,user,question,answer`. The
//! file is opened in append mode per record and closed right after, so
//! rows written before a crash are never lost. A header row is written when
//! the file is absent or empty.

use nova_application::{ConversationLog, LogRecord};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

const HEADER: [&str; 4] = ["timestamp", "user", "question", "answer"];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
enum LogWriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Append-only CSV conversation log.
///
/// Appends from one process are serialized through an internal lock.
pub struct CsvConversationLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvConversationLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record(&self, record: &LogRecord) -> Result<(), LogWriteError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::Writer::from_writer(file);
        if needs_header {
            writer.write_record(HEADER)?;
        }
        let timestamp = record.timestamp.format(TIMESTAMP_FORMAT).to_string();
        writer.write_record([
            timestamp.as_str(),
            record.user.as_str(),
            record.question.as_str(),
            record.answer.as_str(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}

impl ConversationLog for CsvConversationLog {
    fn append(&self, record: &LogRecord) {
        let _guard = match self.lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = self.write_record(record) {
            warn!(
                "Could not append to conversation log {}: {}",
                self.path.display(),
                e
            );
        }
    }
}
