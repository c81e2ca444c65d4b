use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tokio::fs::{DirBuilder, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::config::CollisionPolicy;
use crate::error::AppError;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const MAX_SUFFIX: u32 = 1000;

/// A record written to the save directory.
#[derive(Debug, Clone)]
pub struct SavedRecord {
    pub filename: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Flat directory of pretty-printed JSON records, one file per submission.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
    on_collision: CollisionPolicy,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>, on_collision: CollisionPolicy) -> Self {
        Self {
            dir: dir.into(),
            on_collision,
        }
    }

    /// Create the save directory and any missing parents.
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        if tokio::fs::metadata(&self.dir)
            .await
            .is_ok_and(|m| m.is_dir())
        {
            return Ok(());
        }

        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o777);

        builder
            .create(&self.dir)
            .await
            .map_err(|source| AppError::StorageUnavailable {
                dir: self.dir.clone(),
                source,
            })?;

        tracing::info!("Created save directory {}", self.dir.display());
        Ok(())
    }

    /// Write `contents` under `<timestamp>_<token>.json`, following the collision policy.
    pub async fn write(
        &self,
        at: &NaiveDateTime,
        token: &str,
        contents: &[u8],
    ) -> Result<SavedRecord, AppError> {
        let stem = format!("{}_{token}", at.format(TIMESTAMP_FORMAT));

        let result = match self.on_collision {
            CollisionPolicy::Overwrite => {
                let filename = format!("{stem}.json");
                self.write_file(&filename, contents, false)
                    .await
                    .map(|path| (filename, path))
            }
            CollisionPolicy::Suffix => self.write_unique(&stem, contents).await,
        };

        let (filename, path) = result.map_err(|source| AppError::WriteFailure {
            dir: self.dir.clone(),
            source,
        })?;

        Ok(SavedRecord {
            filename,
            path,
            bytes: contents.len(),
        })
    }

    async fn write_unique(&self, stem: &str, contents: &[u8]) -> std::io::Result<(String, PathBuf)> {
        for attempt in 1..=MAX_SUFFIX {
            let filename = if attempt == 1 {
                format!("{stem}.json")
            } else {
                format!("{stem}_{attempt}.json")
            };

            match self.write_file(&filename, contents, true).await {
                Ok(path) => return Ok((filename, path)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free filename for {stem} after {MAX_SUFFIX} attempts"),
        ))
    }

    async fn write_file(&self, filename: &str, contents: &[u8], exclusive: bool) -> std::io::Result<PathBuf> {
        let path = self.dir.join(filename);

        let mut options = OpenOptions::new();
        options.write(true);
        if exclusive {
            options.create_new(true);
        } else {
            options.create(true).truncate(true);
        }

        let mut file = options.open(&path).await?;
        file.write_all(contents).await?;
        file.flush().await?;
        Ok(path)
    }
}

/// Encode a submission as four-space indented JSON. Non-ASCII text is kept literal.
pub fn encode(submission: &Map<String, Value>) -> Result<Vec<u8>, AppError> {
    let mut out = Vec::with_capacity(256);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    submission
        .serialize(&mut ser)
        .map_err(AppError::EncodingFailure)?;
    Ok(out)
}
