use std::{
    cell::{Cell, RefCell},
    fmt,
    io::{Error, ErrorKind},
    path::PathBuf,
};

use crate::{
    config,
    types::{AppState, BrickSet},
    warning,
};

/// Storage key of the one slot holding the serialized application state.
pub const STATE_KEY: &str = "lego_part_master_state";

#[derive(Debug)]
pub enum StorageError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::IoError(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerdeError(err)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::IoError(e) => write!(f, "storage i/o error: {}", e),
            StorageError::SerdeError(e) => write!(f, "state (de)serialization error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

/// A single durable string slot. The state is stored as an opaque blob.
#[allow(async_fn_in_trait)]
pub trait StorageSlot {
    /// Returns `Ok(None)` when nothing has been stored yet.
    async fn read(&self) -> Result<Option<String>, StorageError>;
    async fn write(&self, value: &str) -> Result<(), StorageError>;

    /// Human readable description of where the slot lives.
    fn location(&self) -> String;
}

/// Slot backed by one JSON file in the local data directory.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(key: &str) -> Self {
        let mut path = config::data_dir();
        path.push(format!("state/{key}.json", key = key));
        Self { path }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl StorageSlot for FileSlot {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    async fn write(&self, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        async_fs::write(&self.path, value).await?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process slot, used by tests and throwaway sessions.
#[derive(Default)]
pub struct MemorySlot {
    value: RefCell<Option<String>>,
    writes: Cell<usize>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: RefCell::new(Some(value.to_string())),
            writes: Cell::new(0),
        }
    }

    pub fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl StorageSlot for MemorySlot {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.borrow().clone())
    }

    async fn write(&self, value: &str) -> Result<(), StorageError> {
        *self.value.borrow_mut() = Some(value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Loads and saves the whole [`AppState`] against one storage slot.
///
/// This is the only place that touches the durable store.
pub struct StateManager<S: StorageSlot> {
    slot: S,
}

impl<S: StorageSlot> StateManager<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Reads the persisted state, falling back to the empty state when the
    /// slot is empty, unreadable or holds something that is not a state.
    ///
    /// The transient `is_searching` and `error` fields always come back neutral,
    /// and every part's `collected` is clamped to its `quantity`.
    pub async fn load(&self) -> AppState {
        let content = match self.slot.read().await {
            Ok(Some(content)) => content,
            Ok(None) => return AppState::default(),
            Err(e) => {
                warning!("Failed to read saved state, starting empty. Err: {}", e);
                return AppState::default();
            }
        };

        match serde_json::from_str::<AppState>(&content) {
            Ok(state) => AppState {
                sets: clamp_collected(state.sets),
                active_set_id: state.active_set_id,
                is_searching: false,
                error: None,
            },
            Err(e) => {
                warning!("Failed to parse saved state, starting empty. Err: {}", e);
                AppState::default()
            }
        }
    }

    /// Overwrites the slot with the full serialized state.
    pub async fn persist(&self, state: &AppState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(state)?;
        self.slot.write(&json).await
    }
}

// A hand-edited or older blob may carry counts outside `0..=quantity`.
fn clamp_collected(mut sets: Vec<BrickSet>) -> Vec<BrickSet> {
    for part in sets.iter_mut().flat_map(|s| s.parts.iter_mut()) {
        part.collected = part.collected.min(part.quantity);
    }
    sets
}
