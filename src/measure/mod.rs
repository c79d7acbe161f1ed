//! Block height measurement: live measurements with an estimate fallback

use crate::document::{Block, BlockId};
use rustc_hash::FxHashMap;

/// Default height estimate for an unmeasured block, in CSS pixels
pub const DEFAULT_BLOCK_HEIGHT: f32 = 50.0;

/// Capability to measure a block's occupied height in layout units.
///
/// Implementations must be total: they always return a usable number,
/// even for freshly created blocks the rendering layer has not laid out
/// yet. The paginator treats the result as advisory and clamps malformed
/// values itself.
pub trait HeightMeasure {
    /// Return the height of `block` in layout units
    fn measure(&self, block: &Block) -> f32;
}

/// Fixed per-block height estimate, scaled by block kind.
#[derive(Debug, Clone, Copy)]
pub struct FixedEstimate {
    /// Base height for a paragraph block
    pub block_height: f32,
}

impl Default for FixedEstimate {
    fn default() -> Self {
        Self {
            block_height: DEFAULT_BLOCK_HEIGHT,
        }
    }
}

impl FixedEstimate {
    /// Create an estimator with the given base height
    pub fn new(block_height: f32) -> Self {
        Self { block_height }
    }
}

impl HeightMeasure for FixedEstimate {
    fn measure(&self, block: &Block) -> f32 {
        self.block_height * block.kind.estimate_scale()
    }
}

/// Live height measurements recorded by the rendering layer, falling back
/// to a fixed estimate for blocks that have not been measured yet.
///
/// The rendering layer records the actual occupied extent of each block
/// after laying it out (in the web surface, the element's `scrollHeight`).
/// This type never invalidates entries on its own; the caller decides when
/// a measurement is stale.
#[derive(Debug, Clone, Default)]
pub struct RenderedHeights {
    measured: FxHashMap<BlockId, f32>,
    fallback: FixedEstimate,
}

impl RenderedHeights {
    /// Create with the default estimate fallback
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a custom fallback estimate
    pub fn with_fallback(fallback: FixedEstimate) -> Self {
        Self {
            measured: FxHashMap::default(),
            fallback,
        }
    }

    /// Record a live measurement for a block
    pub fn record(&mut self, id: BlockId, height: f32) {
        self.measured.insert(id, height);
    }

    /// Drop the measurement for a block
    pub fn forget(&mut self, id: BlockId) {
        self.measured.remove(&id);
    }

    /// Drop all recorded measurements
    pub fn clear(&mut self) {
        self.measured.clear();
    }

    /// Number of blocks with a live measurement
    pub fn measured_count(&self) -> usize {
        self.measured.len()
    }
}

impl HeightMeasure for RenderedHeights {
    fn measure(&self, block: &Block) -> f32 {
        match self.measured.get(&block.id) {
            Some(height) => *height,
            None => self.fallback.measure(block),
        }
    }
}
