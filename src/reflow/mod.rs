//! Reflow controller: the single writer tying document and pages together

use crate::document::{Block, Document};
use crate::export::{flatten, FlatContent};
use crate::layout::{paginate, PageSet, ReflowConfig};
use crate::measure::HeightMeasure;
use smallvec::SmallVec;

/// Controller state. Recomputing is transient and synchronous; no
/// observer can see the document and pages disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflowState {
    /// Pages are consistent with the document
    Idle,
    /// A recompute is in progress
    Recomputing,
}

/// Result of one reflow operation
#[derive(Debug, Clone, Default)]
pub struct ReflowOutcome {
    /// Document version the pages now correspond to
    pub version: u64,
    /// Page count after the reflow
    pub page_count: usize,
    /// Indices of pages whose boundaries or height changed, including
    /// pages that appeared or disappeared. Advisory: renderers may ignore
    /// it and redraw everything.
    pub changed_pages: SmallVec<[usize; 4]>,
}

impl ReflowOutcome {
    /// Check if any page changed
    pub fn has_changes(&self) -> bool {
        !self.changed_pages.is_empty()
    }
}

/// Owns the document and its page partition, and funnels every content
/// change through a synchronous recompute.
///
/// All mutation goes through [`on_document_replaced`] and
/// [`on_page_edited`]; readers only ever observe a page set consistent
/// with the current document. The height measurer is injected so the
/// controller stays decoupled from any live rendering surface.
///
/// [`on_document_replaced`]: ReflowController::on_document_replaced
/// [`on_page_edited`]: ReflowController::on_page_edited
pub struct ReflowController<M: HeightMeasure> {
    document: Document,
    pages: PageSet,
    config: ReflowConfig,
    measurer: M,
    state: ReflowState,
}

impl<M: HeightMeasure> ReflowController<M> {
    /// Create a controller over a fresh single-block document and
    /// paginate it once, so pages exist from mount.
    pub fn new(config: ReflowConfig, measurer: M) -> Self {
        let mut controller = Self {
            document: Document::new(),
            pages: PageSet::single_empty(),
            config,
            measurer,
            state: ReflowState::Idle,
        };
        controller.recompute();
        controller
    }

    /// Get the current document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the current pages
    pub fn current_pages(&self) -> &PageSet {
        &self.pages
    }

    /// Get the configuration
    pub fn config(&self) -> ReflowConfig {
        self.config
    }

    /// Get the height measurer
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Get the height measurer mutably, e.g. to record live measurements
    pub fn measurer_mut(&mut self) -> &mut M {
        &mut self.measurer
    }

    /// Replace the whole document with a new content snapshot and reflow
    pub fn on_document_replaced(&mut self, new_blocks: Vec<Block>) -> ReflowOutcome {
        self.document.replace(new_blocks);
        self.recompute()
    }

    /// Flow an edited page's content back into the document and reflow.
    ///
    /// The block range previously owned by `page_index` is replaced by
    /// `new_page_blocks`; content that no longer fits the page migrates to
    /// its neighbors on the recompute. An out-of-range index appends at
    /// the end of the document.
    pub fn on_page_edited(&mut self, page_index: usize, new_page_blocks: Vec<Block>) -> ReflowOutcome {
        let range = match self.pages.page(page_index) {
            Some(page) => page.block_range.clone(),
            None => {
                let end = self.document.block_count();
                end..end
            }
        };

        self.document.splice(range, new_page_blocks);
        self.recompute()
    }

    /// Re-paginate without a content change, picking up any height
    /// measurements recorded since the last reflow. Idempotent when
    /// measurements are unchanged.
    pub fn refresh(&mut self) -> ReflowOutcome {
        self.recompute()
    }

    /// Flatten the current pages into one contiguous content sequence
    pub fn flatten(&self) -> FlatContent {
        flatten(&self.pages, &self.document)
    }

    fn recompute(&mut self) -> ReflowOutcome {
        debug_assert_eq!(self.state, ReflowState::Idle, "re-entrant reflow");
        self.state = ReflowState::Recomputing;

        let new_pages = paginate(self.document.blocks(), self.config.capacity, &self.measurer);
        debug_assert!(new_pages.is_partition_of(self.document.block_count()));

        let changed_pages = Self::diff_pages(&self.pages, &new_pages);
        self.pages = new_pages;
        self.state = ReflowState::Idle;

        ReflowOutcome {
            version: self.document.version(),
            page_count: self.pages.page_count(),
            changed_pages,
        }
    }

    /// Indices where the old and new page sets disagree
    fn diff_pages(old: &PageSet, new: &PageSet) -> SmallVec<[usize; 4]> {
        let mut changed = SmallVec::new();
        let count = old.page_count().max(new.page_count());

        for index in 0..count {
            match (old.page(index), new.page(index)) {
                (Some(a), Some(b)) if a == b => {}
                _ => changed.push(index),
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BlockId;
    use crate::measure::{FixedEstimate, RenderedHeights};

    fn controller(capacity: f32, block_height: f32) -> ReflowController<RenderedHeights> {
        let config = ReflowConfig {
            capacity,
            default_block_height: block_height,
        };
        let measurer = RenderedHeights::with_fallback(FixedEstimate::new(block_height));
        ReflowController::new(config, measurer)
    }

    fn blocks(n: usize) -> Vec<Block> {
        (0..n)
            .map(|i| Block::paragraph(BlockId(i as u64), format!("block {}", i)))
            .collect()
    }

    #[test]
    fn test_mount_produces_one_page() {
        let c = controller(1122.0, 50.0);
        assert_eq!(c.current_pages().page_count(), 1);
        assert_eq!(c.document().block_count(), 1);
        assert!(c
            .current_pages()
            .is_partition_of(c.document().block_count()));
    }

    #[test]
    fn test_replace_reflows() {
        let mut c = controller(120.0, 50.0);
        let outcome = c.on_document_replaced(blocks(3));

        assert_eq!(outcome.page_count, 2);
        assert!(outcome.has_changes());
        assert_eq!(c.current_pages().page(0).unwrap().block_range, 0..2);
        assert_eq!(c.current_pages().page(1).unwrap().block_range, 2..3);
    }

    #[test]
    fn test_page_edit_migrates_content() {
        // Two blocks of height 50 at capacity 60: one block per page
        let mut c = controller(60.0, 50.0);
        c.on_document_replaced(vec![
            Block::paragraph(BlockId(0), "B1"),
            Block::paragraph(BlockId(1), "B2"),
        ]);
        assert_eq!(c.current_pages().page_count(), 2);

        // Edit page 0 to hold two blocks; the new one migrates to its own page
        let outcome = c.on_page_edited(
            0,
            vec![
                Block::paragraph(BlockId(0), "B1"),
                Block::paragraph(BlockId(2), "B1b"),
            ],
        );

        assert_eq!(outcome.page_count, 3);
        assert_eq!(c.document().text(), "B1\nB1b\nB2");
        assert_eq!(c.current_pages().page(0).unwrap().block_range, 0..1);
        assert_eq!(c.current_pages().page(1).unwrap().block_range, 1..2);
        assert_eq!(c.current_pages().page(2).unwrap().block_range, 2..3);
    }

    #[test]
    fn test_page_edit_round_trip_flatten() {
        let mut c = controller(100.0, 50.0);
        c.on_document_replaced(blocks(6));
        assert_eq!(c.current_pages().page_count(), 3);

        let replacement = vec![
            Block::paragraph(BlockId(10), "x"),
            Block::paragraph(BlockId(11), "y"),
            Block::paragraph(BlockId(12), "z"),
        ];
        c.on_page_edited(1, replacement);

        // Pages before, then the new blocks, then pages after, in order
        assert_eq!(
            c.flatten().text(),
            "block 0\nblock 1\nx\ny\nz\nblock 4\nblock 5"
        );
    }

    #[test]
    fn test_out_of_range_page_edit_appends() {
        let mut c = controller(1122.0, 50.0);
        c.on_document_replaced(blocks(2));
        c.on_page_edited(9, vec![Block::paragraph(BlockId(5), "tail")]);
        assert_eq!(c.document().text(), "block 0\nblock 1\ntail");
    }

    #[test]
    fn test_refresh_is_idempotent_without_new_measurements() {
        let mut c = controller(120.0, 50.0);
        c.on_document_replaced(blocks(5));
        let before = c.current_pages().clone();

        let outcome = c.refresh();
        assert!(!outcome.has_changes());
        assert_eq!(c.current_pages(), &before);
    }

    #[test]
    fn test_refresh_picks_up_recorded_heights() {
        let mut c = controller(120.0, 50.0);
        c.on_document_replaced(blocks(3));
        assert_eq!(c.current_pages().page_count(), 2);

        // The rendering layer reports the first block as much taller, so
        // it no longer shares a page with the second block
        c.measurer_mut().record(BlockId(0), 110.0);
        let outcome = c.refresh();

        assert!(outcome.has_changes());
        assert_eq!(c.current_pages().page(0).unwrap().block_range, 0..1);
        assert_eq!(c.current_pages().page(1).unwrap().block_range, 1..3);
    }

    #[test]
    fn test_empty_replace_normalizes_to_one_page() {
        let mut c = controller(1122.0, 50.0);
        c.on_document_replaced(blocks(4));
        let outcome = c.on_document_replaced(Vec::new());

        assert_eq!(outcome.page_count, 1);
        assert!(c.current_pages().page(0).unwrap().is_empty());
    }

    #[test]
    fn test_unchanged_boundaries_report_no_changed_pages() {
        let mut c = controller(100.0, 50.0);
        c.on_document_replaced(blocks(6));
        assert_eq!(c.current_pages().page_count(), 3);

        // Same shape replaces page 2's content only; earlier pages keep
        // their ranges and heights
        let mut snapshot = c.document().blocks().to_vec();
        snapshot[5].text = "edited".to_string();
        let outcome = c.on_document_replaced(snapshot);

        assert_eq!(outcome.changed_pages.as_slice(), &[] as &[usize]);
        assert_eq!(c.document().block(5).unwrap().text, "edited");
    }
}
