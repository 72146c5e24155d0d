//! Handy application core.
//!
//! Host-agnostic logic for the Handy single-page shell: page navigation,
//! hobby/mood selection, the drag-and-drop life-area list and profile
//! persistence. Every browser facility is consumed through a trait
//! ([`Dom`], [`KeyValueStore`], [`Scheduler`], [`Notifier`]) so the same code
//! runs against the real DOM in `handy-wasm` and against [`MemoryDom`] in tests.

pub mod app;
pub mod config;
pub mod dom;
pub mod headless;
pub mod navigation;
pub mod profile;
pub mod reorder;
pub mod schedule;
pub mod selection;
pub mod storage;

pub use app::{HandyApp, Notifier, RecordingNotifier, UiEvent};
pub use config::{AppConfig, ConfigError};
pub use dom::{DefaultAction, Dom};
pub use headless::{ElementSpec, MemoryDom, NodeId};
pub use navigation::NavigationController;
pub use profile::Profile;
pub use reorder::{DropOutcome, ReorderWidget};
pub use schedule::{Scheduler, TickQueue};
pub use selection::{MultiSelect, SingleSelect};
pub use storage::{KeyValueStore, LoadOutcome, MemoryStore, ProfileStore, StorageError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandyError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_json::Error),
}
