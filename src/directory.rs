//! User directory sources.
//!
//! The server never owns a mutable user list. It is handed a [`DirectorySource`]
//! at startup and asks it for the current, immutable set of users on every
//! request.

use crate::model::User;
use serde::Deserialize;
use std::{fs, path::Path, sync::Arc};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse dataset {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Anything able to hand out the full user collection.
pub trait DirectorySource: Send + Sync {
    /// # Errors
    /// Returns an error if the users cannot be produced.
    fn users(&self) -> Result<Arc<[User]>, DirectoryError>;
}

/// Users loaded once and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct Directory {
    users: Arc<[User]>,
}

// One row of the dataset file.
#[derive(Debug, Deserialize)]
struct Row {
    id: i64,
    first_name: String,
    last_name: String,
    age: i64,
    #[serde(default)]
    about: String,
    #[serde(default)]
    gender: String,
}

impl From<Row> for User {
    fn from(row: Row) -> Self {
        Self {
            id: row.id,
            name: format!("{} {}", row.first_name, row.last_name),
            age: row.age,
            about: row.about,
            gender: row.gender,
        }
    }
}

impl Directory {
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: users.into(),
        }
    }

    /// Load a JSON dataset: an array of rows with `id`, `first_name`,
    /// `last_name`, `age`, `about` and `gender`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid dataset.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let raw = fs::read(path).map_err(|source| DirectoryError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let directory = Self::from_json(&raw).map_err(|source| DirectoryError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        debug!("Loaded {} users", directory.len());

        Ok(directory)
    }

    /// # Errors
    /// Returns an error if `raw` is not a JSON array of dataset rows.
    pub fn from_json(raw: &[u8]) -> Result<Self, serde_json::Error> {
        let rows: Vec<Row> = serde_json::from_slice(raw)?;
        Ok(Self::new(rows.into_iter().map(User::from).collect()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl DirectorySource for Directory {
    fn users(&self) -> Result<Arc<[User]>, DirectoryError> {
        Ok(Arc::clone(&self.users))
    }
}
