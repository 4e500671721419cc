//! JSON document store backing the coordination services.
//!
//! Each named collection is a JSON array in its own file under the
//! store root; single documents (the current session) get a file of
//! their own. Appending wraps the record in a [`StoredRecord`] envelope
//! with a generated id and creation timestamp. Reads of a collection
//! that was never written yield an empty list, not an error.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{Coordinate, Locatable};

/// Store-owned envelope around a persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord<T> {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: T,
}

impl<T: Locatable> Locatable for StoredRecord<T> {
    fn coordinate(&self) -> Coordinate {
        self.record.coordinate()
    }
}

/// File-per-collection JSON store rooted at a single directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Init {
            path: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All records of a collection, in insertion order.
    pub fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<StoredRecord<T>>, StoreError> {
        let path = self.path_for(collection)?;
        if !path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&path).map_err(|source| StoreError::Read {
            collection: collection.to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            collection: collection.to_string(),
            source,
        })
    }

    /// Number of records currently held by a collection.
    pub fn count(&self, collection: &str) -> Result<usize, StoreError> {
        Ok(self.read_values(collection)?.len())
    }

    /// Appends one record, generating its id and creation timestamp.
    /// Returns the stored envelope.
    pub fn append<T: Serialize>(
        &self,
        collection: &str,
        record: T,
    ) -> Result<StoredRecord<T>, StoreError> {
        let stored = StoredRecord {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            record,
        };
        let mut values = self.read_values(collection)?;
        values.push(to_value(collection, &stored)?);
        self.write_values(collection, &values)?;
        debug!(
            "Store: appended record {} to '{}' ({} total)",
            stored.id,
            collection,
            values.len()
        );
        Ok(stored)
    }

    /// Replaces the full contents of a collection. Used for in-place
    /// updates such as role changes; envelopes keep their ids.
    pub fn replace<T: Serialize>(
        &self,
        collection: &str,
        records: &[StoredRecord<T>],
    ) -> Result<(), StoreError> {
        let values = records
            .iter()
            .map(|record| to_value(collection, record))
            .collect::<Result<Vec<_>, _>>()?;
        self.write_values(collection, &values)
    }

    /// Reads a single named document, if present.
    pub fn get_document<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(|source| StoreError::Read {
            collection: name.to_string(),
            source,
        })?;
        let value = serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            collection: name.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Writes a single named document, overwriting any previous value.
    pub fn put_document<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let json = to_value(name, value)?;
        self.write_json(name, &json)
    }

    /// Removes a named document or collection. Missing files are fine.
    pub fn delete_document(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                collection: name.to_string(),
                source,
            }),
        }
    }

    fn read_values(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let path = self.path_for(collection)?;
        if !path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&path).map_err(|source| StoreError::Read {
            collection: collection.to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            collection: collection.to_string(),
            source,
        })
    }

    fn write_values(&self, collection: &str, values: &[Value]) -> Result<(), StoreError> {
        self.write_json(collection, &Value::Array(values.to_vec()))
    }

    fn write_json(&self, name: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Malformed {
            collection: name.to_string(),
            source,
        })?;
        // Write through a sibling temp file, then rename into place.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|source| StoreError::Write {
            collection: name.to_string(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Write {
            collection: name.to_string(),
            source,
        })
    }

    /// Maps a collection name to its file, rejecting anything that is
    /// not a plain `[A-Za-z0-9_-]` identifier.
    fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(format!("{}.json", name)))
    }
}

fn to_value<T: Serialize>(collection: &str, value: &T) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|source| StoreError::Malformed {
        collection: collection.to_string(),
        source,
    })
}
