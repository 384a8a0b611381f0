//! Document source backed by a directory of JSON exports
//!
//! Each collection lives in `<dir>/<collection>.json`.

use super::{records_from_value, DocumentSource};
use crate::error::CoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }
}

#[async_trait]
impl DocumentSource for JsonDirSource {
    async fn list(&self, collection: &str) -> Result<Vec<Value>, CoreError> {
        let path = self.collection_path(collection);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::CollectionNotFound {
                    collection: collection.to_string(),
                    path,
                });
            }
            Err(source) => return Err(CoreError::FileRead { path, source }),
        };

        let origin = path.display().to_string();
        let value: Value = serde_json::from_str(&content).map_err(|source| CoreError::JsonParse {
            origin: origin.clone(),
            message: source.to_string(),
            source,
        })?;

        records_from_value(&origin, value)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
