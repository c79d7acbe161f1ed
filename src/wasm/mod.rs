//! WASM bindings for the pagination engine

use crate::document::{Block, BlockId, BlockKind, ListMarker};
use crate::layout::{Page, PageMetrics, ReflowConfig};
use crate::measure::{FixedEstimate, RenderedHeights};
use crate::reflow::ReflowController;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM-exposed pagination controller wrapper
#[wasm_bindgen]
pub struct WasmPager {
    controller: ReflowController<RenderedHeights>,
    metrics: PageMetrics,
}

#[wasm_bindgen]
impl WasmPager {
    /// Create a new pager with the A4 page container
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::with_config(
            crate::layout::A4_HEIGHT,
            crate::measure::DEFAULT_BLOCK_HEIGHT,
        )
    }

    /// Create a pager with a custom capacity and block height estimate
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(capacity: f32, default_block_height: f32) -> Self {
        let config = ReflowConfig {
            capacity,
            default_block_height,
        };
        let measurer = RenderedHeights::with_fallback(FixedEstimate::new(default_block_height));

        Self {
            controller: ReflowController::new(config, measurer),
            metrics: PageMetrics::default(),
        }
    }

    /// Replace the whole document with a content snapshot (JSON array of
    /// paragraph nodes). Returns false if the JSON is malformed; the
    /// current document is untouched in that case.
    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&mut self, json: &str) -> bool {
        match parse_nodes(json) {
            Some(blocks) => {
                self.controller.on_document_replaced(blocks);
                true
            }
            None => false,
        }
    }

    /// Replace one page's content with the edited snapshot (JSON array of
    /// paragraph nodes) and reflow. Returns false on malformed JSON.
    #[wasm_bindgen(js_name = editPage)]
    pub fn edit_page(&mut self, page_index: usize, json: &str) -> bool {
        match parse_nodes(json) {
            Some(blocks) => {
                self.controller.on_page_edited(page_index, blocks);
                true
            }
            None => false,
        }
    }

    /// Record the rendered height of a block (e.g. its scrollHeight).
    /// Takes effect on the next reflow or remeasure.
    #[wasm_bindgen(js_name = recordBlockHeight)]
    pub fn record_block_height(&mut self, block_id: u64, height: f32) {
        self.controller.measurer_mut().record(BlockId(block_id), height);
    }

    /// Re-paginate with the heights recorded so far. Returns true if any
    /// page boundary moved.
    pub fn remeasure(&mut self) -> bool {
        self.controller.refresh().has_changes()
    }

    /// Get page count
    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&self) -> usize {
        self.controller.current_pages().page_count()
    }

    /// Get total block count
    #[wasm_bindgen(js_name = getBlockCount)]
    pub fn get_block_count(&self) -> usize {
        self.controller.document().block_count()
    }

    /// Get full document text
    #[wasm_bindgen(js_name = getText)]
    pub fn get_text(&self) -> String {
        self.controller.document().text()
    }

    /// Get all pages as an array of JSON strings, one per page
    #[wasm_bindgen(js_name = pagesJson)]
    pub fn pages_json(&self) -> js_sys::Array {
        let out = js_sys::Array::new();
        for page in self.controller.current_pages().pages() {
            let data = PageData::from_page(page, self.controller.document());
            let json = serde_json::to_string(&data).unwrap_or_else(|_| "null".to_string());
            out.push(&JsValue::from_str(&json));
        }
        out
    }

    /// Get the flattened content (page boundaries stripped) as JSON, for
    /// full-document selection and printing
    #[wasm_bindgen(js_name = flattenJson)]
    pub fn flatten_json(&self) -> String {
        serde_json::to_string(&self.controller.flatten()).unwrap_or_else(|_| "null".to_string())
    }

    /// Get the page container dimensions as JSON
    #[wasm_bindgen(js_name = getPageMetrics)]
    pub fn get_page_metrics(&self) -> String {
        let data = PageMetricsData {
            width: self.metrics.width,
            height: self.metrics.height,
            capacity: self.controller.config().capacity,
        };
        serde_json::to_string(&data).unwrap_or_else(|_| "null".to_string())
    }
}

impl Default for WasmPager {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a JSON snapshot of paragraph nodes into blocks, assigning
/// position-derived IDs where the surface supplied none
fn parse_nodes(json: &str) -> Option<Vec<Block>> {
    let nodes: Vec<NodeData> = serde_json::from_str(json).ok()?;
    Some(
        nodes
            .into_iter()
            .enumerate()
            .map(|(position, node)| node.into_block(position))
            .collect(),
    )
}

/// A paragraph node as the editing surface serializes it
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Stable id; position-derived when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// "paragraph", "heading", or "listItem"
    #[serde(rename = "type", default = "default_node_type")]
    pub node_type: String,
    /// Heading level, headings only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// List ordinal; a numbered marker when present, a bullet otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<u32>,
    /// Text spans, concatenated into the block payload
    #[serde(default)]
    pub children: Vec<SpanData>,
}

fn default_node_type() -> String {
    "paragraph".to_string()
}

#[derive(Serialize, Deserialize, Default)]
pub struct SpanData {
    #[serde(default)]
    pub text: String,
}

impl NodeData {
    fn into_block(self, position: usize) -> Block {
        let id = self.id.map(BlockId).unwrap_or(BlockId(position as u64));
        let kind = match self.node_type.as_str() {
            "heading" => BlockKind::Heading {
                level: self.level.unwrap_or(1).clamp(1, 6),
            },
            "listItem" => BlockKind::ListItem {
                marker: match self.ordinal {
                    Some(ordinal) => ListMarker::Numbered { ordinal },
                    None => ListMarker::Bullet,
                },
            },
            _ => BlockKind::Paragraph,
        };
        let text: String = self.children.into_iter().map(|s| s.text).collect();
        Block { id, kind, text }
    }

    fn from_block(block: &Block) -> Self {
        let (node_type, level, ordinal) = match &block.kind {
            BlockKind::Paragraph => ("paragraph", None, None),
            BlockKind::Heading { level } => ("heading", Some(*level), None),
            BlockKind::ListItem { marker } => match marker {
                ListMarker::Bullet => ("listItem", None, None),
                ListMarker::Numbered { ordinal } => ("listItem", None, Some(*ordinal)),
            },
        };

        Self {
            id: Some(block.id.0),
            node_type: node_type.to_string(),
            level,
            ordinal,
            children: vec![SpanData {
                text: block.text.clone(),
            }],
        }
    }
}

/// Serializable page data for JS
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub page_index: usize,
    pub start_block: usize,
    pub end_block: usize,
    pub height: f32,
    pub blocks: Vec<NodeData>,
}

impl PageData {
    fn from_page(page: &Page, document: &crate::document::Document) -> Self {
        Self {
            page_index: page.index,
            start_block: page.block_range.start,
            end_block: page.block_range.end,
            height: page.height,
            blocks: page.blocks(document).iter().map(NodeData::from_block).collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetricsData {
    pub width: f32,
    pub height: f32,
    pub capacity: f32,
}
