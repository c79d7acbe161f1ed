//! Document model: the single source of truth for content

mod block;

pub use block::{Block, BlockId, BlockKind, ListMarker};

use std::ops::Range;

/// The full ordered content of the editor.
///
/// The document owns the ordered block sequence and is the only source of
/// truth for content. Collaborators never mutate it in place: the editing
/// surface hands over complete snapshots via [`replace`], and page-local
/// edits are written back through [`splice`]. Every mutation bumps the
/// monotonic version counter.
///
/// [`replace`]: Document::replace
/// [`splice`]: Document::splice
#[derive(Debug)]
pub struct Document {
    /// Ordered block sequence
    blocks: Vec<Block>,
    /// Monotonic version counter
    version: u64,
    /// Next block ID to assign
    next_block_id: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new document with a single empty block
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::empty(BlockId(0))],
            version: 0,
            next_block_id: 1,
        }
    }

    /// Create a document from initial text, one block per line
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self {
            blocks: Vec::new(),
            version: 0,
            next_block_id: 0,
        };

        for line in text.split('\n') {
            let id = doc.alloc_id();
            doc.blocks.push(Block::paragraph(id, line));
        }

        // Ensure at least one block exists
        if doc.blocks.is_empty() {
            let id = doc.alloc_id();
            doc.blocks.push(Block::empty(id));
        }

        doc
    }

    /// Get the document version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get the block sequence
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Get a block by position
    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Get block count
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no content at all
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.is_empty())
    }

    /// Get the full document text, blocks joined by newlines
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (idx, block) in self.blocks.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            out.push_str(&block.text);
        }
        out
    }

    /// Allocate a fresh block ID
    pub fn alloc_id(&mut self) -> BlockId {
        let id = BlockId(self.next_block_id);
        self.next_block_id += 1;
        id
    }

    /// Replace the entire block sequence with a new snapshot.
    ///
    /// This is the only mutation the editing surface performs directly.
    pub fn replace(&mut self, new_blocks: Vec<Block>) {
        self.version += 1;
        self.blocks = new_blocks;
        self.track_ids();
    }

    /// Replace the block range `range` with `new_blocks`, keeping blocks
    /// outside the range untouched. Used to flow a page-local edit back
    /// into the full sequence.
    pub fn splice(&mut self, range: Range<usize>, new_blocks: Vec<Block>) {
        let start = range.start.min(self.blocks.len());
        let end = range.end.clamp(start, self.blocks.len());

        self.version += 1;
        self.blocks.splice(start..end, new_blocks);
        self.track_ids();
    }

    /// Keep the ID allocator ahead of every ID present in the sequence
    fn track_ids(&mut self) {
        for block in &self.blocks {
            if block.id.0 >= self.next_block_id {
                self.next_block_id = block.id.0 + 1;
            }
        }
    }
}
