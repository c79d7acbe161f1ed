//! Block-level content units

use serde::{Deserialize, Serialize};

/// Stable identifier for a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BlockId(pub u64);

/// Type of list marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListMarker {
    Bullet,
    Numbered { ordinal: u32 },
}

impl ListMarker {
    /// Get the display string for this marker
    pub fn display(&self) -> String {
        match self {
            ListMarker::Bullet => "•".to_string(),
            ListMarker::Numbered { ordinal } => format!("{}.", ordinal),
        }
    }
}

/// The kind of block element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockKind {
    /// Regular paragraph
    Paragraph,
    /// Heading with level (1-6)
    Heading { level: u8 },
    /// List item
    ListItem { marker: ListMarker },
}

impl Default for BlockKind {
    fn default() -> Self {
        BlockKind::Paragraph
    }
}

impl BlockKind {
    /// Scale factor applied to the default height estimate for this kind
    pub fn estimate_scale(&self) -> f32 {
        match self {
            BlockKind::Paragraph => 1.0,
            BlockKind::Heading { level } => match level {
                1 => 1.5,
                2 => 1.4,
                3 => 1.3,
                _ => 1.2,
            },
            BlockKind::ListItem { .. } => 1.0,
        }
    }

    /// Check if this is a heading
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockKind::Heading { .. })
    }

    /// Check if this is a list item
    pub fn is_list_item(&self) -> bool {
        matches!(self, BlockKind::ListItem { .. })
    }
}

/// An atomic content unit: one paragraph-level element of the document.
///
/// The text payload is opaque to the pagination engine; it is carried
/// verbatim and only ever measured through a [`HeightMeasure`]
/// implementation.
///
/// [`HeightMeasure`]: crate::measure::HeightMeasure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Stable identity, used to key live height measurements
    pub id: BlockId,
    /// The kind of block
    #[serde(default)]
    pub kind: BlockKind,
    /// Content payload
    #[serde(default)]
    pub text: String,
}

impl Block {
    /// Create a new paragraph block
    pub fn paragraph(id: BlockId, text: impl Into<String>) -> Self {
        Self {
            id,
            kind: BlockKind::Paragraph,
            text: text.into(),
        }
    }

    /// Create a new heading block
    pub fn heading(id: BlockId, level: u8, text: impl Into<String>) -> Self {
        Self {
            id,
            kind: BlockKind::Heading {
                level: level.clamp(1, 6),
            },
            text: text.into(),
        }
    }

    /// Create a new list item block
    pub fn list_item(id: BlockId, marker: ListMarker, text: impl Into<String>) -> Self {
        Self {
            id,
            kind: BlockKind::ListItem { marker },
            text: text.into(),
        }
    }

    /// Create an empty paragraph block
    pub fn empty(id: BlockId) -> Self {
        Self::paragraph(id, "")
    }

    /// Check if this block has no content
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
