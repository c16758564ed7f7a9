//! Combo Blocks (workspace facade crate).
//!
//! Re-exports the workspace crates as `combo_blocks::{types, core, store, engine}`
//! and hosts the JSON-lines [`driver`] used by the `combo-blocks` binary.

pub mod driver;

pub use combo_blocks_core as core;
pub use combo_blocks_engine as engine;
pub use combo_blocks_store as store;
pub use combo_blocks_types as types;
