//! Export assembly: flatten pages into one contiguous content sequence

use crate::document::{Block, Document};
use crate::layout::PageSet;
use serde::{Deserialize, Serialize};

/// The document's content with page boundaries stripped, ready for
/// full-document selection or printing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatContent {
    /// All blocks in document order
    pub blocks: Vec<Block>,
}

impl FlatContent {
    /// Number of blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if there is no content
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Full text, blocks joined by newlines
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
}

/// Concatenate all pages' blocks, in page order, into one contiguous
/// sequence. Page-boundary presentation is dropped; block order and
/// content are preserved verbatim. Pure and total: an empty page set
/// yields empty content.
pub fn flatten(pages: &PageSet, document: &Document) -> FlatContent {
    let mut blocks = Vec::with_capacity(pages.block_count());
    for page in pages.pages() {
        blocks.extend_from_slice(page.blocks(document));
    }
    FlatContent { blocks }
}
