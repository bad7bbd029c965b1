//! Output of pagination: pages of placement blocks.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::report::BandRef;

/// One contiguous run of rows of one band placed on one page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub band: BandRef,
    /// Distance from the top of the print area to the top of this block.
    pub top_offset: i32,
    /// Vertical space consumed, band margins included.
    pub height: i32,
    /// Absolute row indices, ascending and contiguous.
    pub rows: Vec<u32>,
    /// The block carries the band's first row, so the top margin applies.
    pub starts_band: bool,
    /// The block carries the band's last row, so the bottom margin applies.
    pub ends_band: bool,
}

impl Block {
    /// Offset just below this block.
    pub fn bottom(&self) -> i32 {
        self.top_offset.saturating_add(self.height)
    }

    /// True when the whole band sits in this one block.
    pub fn is_whole_band(&self) -> bool {
        self.starts_band && self.ends_band
    }
}

/// One physical page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Section whose page setup applies.
    pub section: usize,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(section: usize) -> Self {
        Self {
            section,
            blocks: Vec::new(),
        }
    }

    /// Vertical space used on this page.
    pub fn used_height(&self) -> i32 {
        self.blocks.last().map_or(0, Block::bottom)
    }

    /// Blank pages only appear as duplex padding.
    pub fn is_blank(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Full pagination result.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PagePlan {
    pub pages: Vec<Page>,
}

impl PagePlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.blocks.len()).sum()
    }

    /// Every block of one band, in page order.
    pub fn blocks_of(&self, band: BandRef) -> impl Iterator<Item = (usize, &Block)> {
        self.pages.iter().enumerate().flat_map(move |(page, p)| {
            p.blocks
                .iter()
                .filter(move |b| b.band == band)
                .map(move |b| (page, b))
        })
    }

    /// Serialize the plan for an external renderer.
    ///
    /// # Errors
    /// Returns [`crate::ReportError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<Vec<Page>> for PagePlan {
    fn from(pages: Vec<Page>) -> Self {
        Self { pages }
    }
}
