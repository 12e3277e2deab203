//! JSON persistence for the training history.
//!
//! The whole history lives in one document that is replaced on every save:
//! `{"sessions": [{"tipo", "data", "exercicios": [{"nome", "historico": [[s, r, w], ...]}]}]}`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};
use crate::models::{Session, TrainingHistory};

#[derive(Serialize)]
struct DocumentRef<'a> {
    sessions: &'a [Session],
}

#[derive(Deserialize)]
struct Document {
    #[serde(alias = "sessoes")]
    sessions: Vec<Session>,
}

pub fn encode(history: &TrainingHistory) -> serde_json::Result<String> {
    serde_json::to_string(&DocumentRef {
        sessions: history.sessions(),
    })
}

pub fn decode(json: &str) -> serde_json::Result<TrainingHistory> {
    let document: Document = serde_json::from_str(json)?;
    Ok(TrainingHistory::from_sessions(document.sessions))
}

#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the stored history. A missing document is an empty history.
    pub fn load(&self) -> Result<TrainingHistory> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no training log at {:?}, starting empty", self.path);
                return Ok(TrainingHistory::new());
            }
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                return Err(self.corrupt(err.to_string()));
            }
            Err(source) => return Err(self.io(source)),
        };
        let history = decode(&json).map_err(|err| self.corrupt(err.to_string()))?;
        debug!("loaded {} sessions from {:?}", history.len(), self.path);
        Ok(history)
    }

    /// Replaces the stored document with `history`.
    ///
    /// Writes a sibling temp file first and renames it into place, so a crash
    /// mid-write leaves the previous document intact.
    pub fn save(&self, history: &TrainingHistory) -> Result<()> {
        let json = encode(history).map_err(|err| self.corrupt(err.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LogError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp_path = self.tmp_path();
        let written = fs::File::create(&tmp_path).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.flush()
        });
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(LogError::Io {
                path: tmp_path,
                source,
            });
        }
        fs::rename(&tmp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            self.io(source)
        })?;
        debug!("saved {} sessions to {:?}", history.len(), self.path);
        Ok(())
    }

    /// Removes the stored document if there is one.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("deleted training log {:?}", self.path);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io(source)),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io(&self, source: io::Error) -> LogError {
        LogError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn corrupt(&self, reason: String) -> LogError {
        LogError::CorruptStore {
            path: self.path.clone(),
            reason,
        }
    }
}
