//! Test fixtures for building reports in memory.
//!
//! # Example
//!
//! ```rust
//! use fixtures::{BandBuilder, ReportBuilder, page_2700};
//!
//! let report = ReportBuilder::new()
//!     .section(page_2700())
//!     .band(BandBuilder::new(40, 2).bottom_margin(100).build())
//!     .band(BandBuilder::new(40, 2).splittable().build())
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use bandreport::{Band, Block, CellValue, Measurer, Page, PageSetup, Report, ResolvedStyle, Selector};

// ============================================================================
// Page Setups
// ============================================================================

/// 2900 x 2100 paper with the default 100 margins: print area 2700 x 1900.
pub fn page_2700() -> PageSetup {
    PageSetup::with_size(2900, 2100).expect("valid paper size")
}

/// Paper whose print area is exactly `height` high (and 1900 wide).
pub fn page_with_area(height: i32) -> PageSetup {
    PageSetup::with_size(height + 200, 2100).expect("valid paper size")
}

// ============================================================================
// Band Builder
// ============================================================================

/// Builder for bands. Bands default to keep-whole, like `Band::new`.
#[derive(Debug, Clone)]
pub struct BandBuilder {
    band: Band,
}

impl BandBuilder {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            band: Band::new(rows, cols),
        }
    }

    /// Allow the band to break between rows.
    pub fn splittable(mut self) -> Self {
        self.band.set_keep_whole(false);
        self
    }

    pub fn keep_with_next(mut self) -> Self {
        self.band.set_keep_with_next(true);
        self
    }

    pub fn keep_with_prev(mut self) -> Self {
        self.band.set_keep_with_prev(true);
        self
    }

    pub fn top_margin(mut self, value: i32) -> Self {
        self.band.set_top_margin(value).unwrap();
        self
    }

    pub fn bottom_margin(mut self, value: i32) -> Self {
        self.band.set_bottom_margin(value).unwrap();
        self
    }

    pub fn row_height(mut self, row: u32, height: i32) -> Self {
        self.band.set_row_height(row, height).unwrap();
        self
    }

    pub fn column_width(mut self, col: u32, width: i32) -> Self {
        self.band.set_column_width(col, width).unwrap();
        self
    }

    pub fn value(mut self, row: u32, col: u32, value: impl Into<CellValue>) -> Self {
        self.band.set_value(row, col, value).unwrap();
        self
    }

    pub fn build(self) -> Band {
        self.band
    }
}

// ============================================================================
// Report Builder
// ============================================================================

/// Builder for reports. Bands go into the most recently added section; one
/// default section is created on demand.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    report: Report,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, setup: PageSetup) -> Self {
        self.report.add_section(setup);
        self
    }

    pub fn band(mut self, band: Band) -> Self {
        if self.report.section_count() == 0 {
            self.report.add_section(page_2700());
        }
        let last = self.report.section_count() - 1;
        self.report.section_mut(last).unwrap().add_band(band);
        self
    }

    pub fn default_row_height(mut self, height: i32) -> Self {
        self.report.set_default_row_height(height).unwrap();
        self
    }

    pub fn build(self) -> Report {
        self.report
    }
}

// ============================================================================
// Measurers
// ============================================================================

/// Wants `per_line` for every line of text in a cell (lines split on '\n');
/// empty cells have no opinion.
#[derive(Debug, Clone, Copy)]
pub struct LineCountMeasurer {
    pub per_line: i32,
}

impl Measurer for LineCountMeasurer {
    fn row_height(&self, cell: &Selector<'_>, _column_width: i32) -> Option<i32> {
        let text = cell.text();
        if text.is_empty() {
            return None;
        }
        Some(i32::try_from(text.lines().count()).unwrap() * self.per_line)
    }

    fn text_extent(&self, text: &str, _style: &ResolvedStyle) -> (i32, i32) {
        (i32::try_from(text.len()).unwrap() * 20, self.per_line)
    }
}

// ============================================================================
// Plan Inspection
// ============================================================================

/// `(band, first row, last row, top offset)` per block, per page.
pub fn summarize(pages: &[Page]) -> Vec<Vec<(usize, u32, u32, i32)>> {
    pages
        .iter()
        .map(|page| page.blocks.iter().map(summarize_block).collect())
        .collect()
}

pub fn summarize_block(block: &Block) -> (usize, u32, u32, i32) {
    let first = block.rows.first().copied().unwrap_or(0);
    let last = block.rows.last().copied().unwrap_or(0);
    (block.band.band, first, last, block.top_offset)
}

/// Every row of every band placed exactly once, in order.
pub fn assert_rows_placed_once(report: &Report, pages: &[Page]) {
    for (s, section) in report.sections().iter().enumerate() {
        for band in section.bands() {
            let placed: Vec<u32> = pages
                .iter()
                .flat_map(|p| p.blocks.iter())
                .filter(|b| b.band.section == s && b.band.band == band.index())
                .flat_map(|b| b.rows.iter().copied())
                .collect();
            let expected: Vec<u32> = (0..band.row_count()).collect();
            assert_eq!(placed, expected, "section {s} band {}", band.index());
        }
    }
}
