//! Core error types for dayplanner-core.
//!
//! Scheduling operations never fail loudly: a rejected drop or drag proposal
//! simply leaves the store as it was. The errors here cover the surfaces
//! around the engine -- configuration files and planner documents.

use std::path::PathBuf;
use thiserror::Error;

use crate::block::BlockId;

/// Core error type for dayplanner-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Planner document import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be prepared
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Errors raised while importing a planner document.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The document is not valid JSON or has the wrong shape
    #[error("Invalid JSON file: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A block in the document breaks a timeline invariant
    #[error("Block {id} is invalid: {reason}")]
    InvalidBlock { id: BlockId, reason: String },

    /// Two blocks in the document share an id
    #[error("Duplicate block id {0}")]
    DuplicateId(BlockId),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
