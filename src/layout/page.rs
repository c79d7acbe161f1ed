//! Page containers and the partition they form over the document

use crate::document::{Block, Document};
use std::ops::Range;

/// A4 container width in CSS pixels
pub const A4_WIDTH: f32 = 793.7;

/// A4 container height in CSS pixels
pub const A4_HEIGHT: f32 = 1122.0;

/// Fixed dimensions of the page container shown by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageMetrics {
    /// A4 form factor
    pub fn a4() -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
        }
    }
}

/// Reflow configuration, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflowConfig {
    /// Maximum accumulated block height per page
    pub capacity: f32,
    /// Height estimate for blocks without a live measurement
    pub default_block_height: f32,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            capacity: A4_HEIGHT,
            default_block_height: crate::measure::DEFAULT_BLOCK_HEIGHT,
        }
    }
}

/// One page: a contiguous view into the document's block sequence.
///
/// Pages own no content. They are derived from the document on every
/// reflow and are never mutated independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page index (0-based)
    pub index: usize,
    /// Block positions in the document covered by this page
    pub block_range: Range<usize>,
    /// Accumulated measured height of the page's blocks
    pub height: f32,
}

impl Page {
    /// Create an empty page starting at `start`
    pub fn new(index: usize, start: usize) -> Self {
        Self {
            index,
            block_range: start..start,
            height: 0.0,
        }
    }

    /// Number of blocks on this page
    pub fn block_count(&self) -> usize {
        self.block_range.len()
    }

    /// Check if this page holds no blocks
    pub fn is_empty(&self) -> bool {
        self.block_range.is_empty()
    }

    /// Check if this page covers the given block position
    pub fn contains_block(&self, position: usize) -> bool {
        self.block_range.contains(&position)
    }

    /// Get this page's blocks from the document it was derived from
    pub fn blocks<'a>(&self, document: &'a Document) -> &'a [Block] {
        let blocks = document.blocks();
        let start = self.block_range.start.min(blocks.len());
        let end = self.block_range.end.min(blocks.len());
        &blocks[start..end]
    }
}

/// The ordered collection of pages covering the whole document.
///
/// Invariant: page ranges are contiguous, in order, and together cover
/// exactly `0..block_count` of the document the set was derived from.
/// A page set is never empty; an empty document still yields one empty
/// page so the rendering layer always has a container to show.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSet {
    pages: Vec<Page>,
}

impl PageSet {
    /// Create a page set from pages produced by pagination
    pub(crate) fn from_pages(pages: Vec<Page>) -> Self {
        debug_assert!(!pages.is_empty());
        Self { pages }
    }

    /// A set containing a single empty page
    pub fn single_empty() -> Self {
        Self {
            pages: vec![Page::new(0, 0)],
        }
    }

    /// Get the pages in order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Get a page by index
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Number of pages (always at least 1)
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of blocks across all pages
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.block_count()).sum()
    }

    /// Find the page covering a block position
    pub fn page_for_block(&self, position: usize) -> Option<&Page> {
        self.pages.iter().find(|p| p.contains_block(position))
    }

    /// Check that the pages form a lossless, order-preserving partition
    /// of a document with `block_count` blocks.
    pub fn is_partition_of(&self, block_count: usize) -> bool {
        let mut expected = 0;
        for (idx, page) in self.pages.iter().enumerate() {
            if page.index != idx || page.block_range.start != expected {
                return false;
            }
            if page.block_range.end < page.block_range.start {
                return false;
            }
            expected = page.block_range.end;
        }
        expected == block_count
    }
}
