//! Motor Component Selector
//!
//! Sizes the electrical components for a compressor/motor circuit from its
//! load current and ambient temperature.
//!
//! - `tables`: fixed reference tables (cable, contactor, breaker, VFD, MMS)
//! - `selection/`: one selector per component class plus the combined report
//! - `labels`: display strings for selections
//! - `input`: parsing and validation of user-supplied numbers
//! - `compressor`: a user's list of compressors and the current selection
//! - `inventory`: stock of cut wire lengths
//! - `store`: JSON file persistence for inventory and workspaces
//! - `export`: CSV downloads via Polars
//! - `api_server`: Axum JSON API (feature `api`)

pub mod tables;
pub mod selection;
pub mod labels;
pub mod input;
pub mod compressor;
pub mod inventory;
pub mod store;
pub mod export;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use tables::{reference_tables, CableEntry, MmsRange, ReferenceTables};
pub use selection::{select_batch, SelectionInput, SelectionReport};
pub use labels::{ComponentClass, NOT_FOUND};
pub use input::InputError;
pub use compressor::{CompressorRecord, Workspace, WorkspaceError};
pub use inventory::{Inventory, InventoryError, WireStock};
pub use store::{InventoryStore, JsonFileStore, WorkspaceStore};
pub use config::Config;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppError, AppState};
