//=========================================================================
// Core Errors
//=========================================================================
//
// Error taxonomy for the state machine and the world it drives.
//
// Architecture:
//   GridError   ─┐
//   AssetError  ─┼→ InitError   ─┐
//   io::Error   ─┘               ├→ StateError → core loop (log + halt)
//   AssetError  ──→ UpdateError ─┘
//
// Transition misuse (Pop on an empty stack) is not an error.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use thiserror::Error;

//=== GridError ===========================================================

/// Tile map construction failures.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("map contains no tiles")]
    Empty,

    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown map cell {found:?} at line {line}, column {column}")]
    InvalidCell {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(f64),
}

//=== AssetError ==========================================================

/// Asset registry failures.
///
/// Failed decodes are not errors: they are logged and counted as done.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset registry lock poisoned")]
    RegistryPoisoned,

    #[error("failed to spawn asset worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

//=== InitError ===========================================================

/// A state could not be created.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid world map: {0}")]
    InvalidWorld(#[from] GridError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Assets(#[from] AssetError),
}

//=== UpdateError =========================================================

/// A state failed while advancing a tick.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Assets(#[from] AssetError),

    #[error("{0}")]
    Failed(String),
}

//=== StateError ==========================================================

/// Failure surfaced by [`crate::core::state::StateManager::tick`].
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state `{state}` failed to initialize")]
    Init {
        state: &'static str,
        #[source]
        source: InitError,
    },

    #[error("state `{state}` failed to update")]
    Update {
        state: &'static str,
        #[source]
        source: UpdateError,
    },
}

impl StateError {
    /// Identifier of the state that failed.
    pub fn state(&self) -> &'static str {
        match self {
            Self::Init { state, .. } | Self::Update { state, .. } => state,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
