//! Durable storage for the bearer token.

use crate::Token;
use serde_json::{Map, Value};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

/// The key the token is stored under.
pub const STORAGE_KEY: &str = "token";

/// Somewhere the bearer token can survive between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<Token>, StorageError>;
    fn save(&self, token: &Token) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// A [`TokenStore`] which only lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: Mutex<Option<Token>>,
}

impl MemoryStore {
    pub fn new() -> Self { MemoryStore::default() }

    pub fn with_token(token: Token) -> Self {
        MemoryStore {
            token: Mutex::new(Some(token)),
        }
    }

    /// Peek at the currently stored token.
    pub fn get(&self) -> Option<Token> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: Option<Token>) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Result<Option<Token>, StorageError> { Ok(self.get()) }

    fn save(&self, token: &Token) -> Result<(), StorageError> {
        self.set(Some(token.clone()));
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.set(None);
        Ok(())
    }
}

/// A [`TokenStore`] backed by a JSON document on disk.
///
/// The token lives under [`STORAGE_KEY`]. Any other keys in the document are
/// left alone.
#[derive(Debug, Clone, PartialEq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn read_document(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Map::new())
            },
            Err(e) => return Err(self.io_error(e)),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&raw).map_err(|inner| StorageError::Corrupted {
            path: self.path.clone(),
            inner,
        })
    }

    fn write_document(
        &self,
        document: &Map<String, Value>,
    ) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let raw = serde_json::to_string_pretty(document).map_err(|inner| {
            StorageError::Corrupted {
                path: self.path.clone(),
                inner,
            }
        })?;

        fs::write(&self.path, raw).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, inner: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            inner,
        }
    }
}

impl TokenStore for FileStore {
    fn load(&self) -> Result<Option<Token>, StorageError> {
        let document = self.read_document()?;

        let token = match document.get(STORAGE_KEY) {
            Some(Value::String(raw)) => Some(Token::new(raw.as_str())),
            _ => None,
        };

        Ok(token.filter(|token| !token.is_empty()))
    }

    fn save(&self, token: &Token) -> Result<(), StorageError> {
        log::debug!("Saving the session token to \"{}\"", self.path.display());

        let mut document = self.read_document()?;
        document.insert(
            STORAGE_KEY.to_string(),
            Value::String(token.as_str().to_string()),
        );

        self.write_document(&document)
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut document = self.read_document()?;

        if document.remove(STORAGE_KEY).is_none() {
            return Ok(());
        }

        log::debug!(
            "Removed the session token from \"{}\"",
            self.path.display()
        );
        self.write_document(&document)
    }
}

/// Errors that can happen while reading or writing a [`TokenStore`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unable to access \"{}\"", path.display())]
    Io {
        path: PathBuf,
        #[source]
        inner: io::Error,
    },
    #[error("\"{}\" doesn't contain a valid JSON object", path.display())]
    Corrupted {
        path: PathBuf,
        #[source]
        inner: serde_json::Error,
    },
}
