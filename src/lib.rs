//! Pageflow: a pagination/reflow core for paged rich-text editors
//!
//! This crate takes the ordered block sequence behind an editable surface
//! and partitions it into fixed-size pages (A4 by default):
//! - Deterministic greedy pagination at block granularity
//! - Synchronous reflow on every content change
//! - Injected height measurement, so the engine runs headless
//! - Page-edit write-back into a single canonical document
//! - Flattened export for full-document selection and printing

pub mod document;
pub mod export;
pub mod layout;
pub mod measure;
pub mod reflow;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPager;

// Re-export primary types
pub use document::{Block, BlockId, BlockKind, Document, ListMarker};
pub use export::{flatten, FlatContent};
pub use layout::{paginate, Page, PageMetrics, PageSet, ReflowConfig, A4_HEIGHT, A4_WIDTH};
pub use measure::{FixedEstimate, HeightMeasure, RenderedHeights, DEFAULT_BLOCK_HEIGHT};
pub use reflow::{ReflowController, ReflowOutcome, ReflowState};
