//! bandreport - banded report model and paginator
//!
//! Builds printable reports out of sections of "bands" (rectangular grids of
//! styled cells) and computes how they break into pages:
//! - Inherited cell styles (fonts, fills, alignment, margins, borders)
//! - Page geometry with paper presets and orientation changes
//! - Keep-whole, keep-with-next and keep-with-previous band placement
//! - Rows are never split; the page plan serializes to JSON for renderers
//!
//! # Usage
//!
//! ```
//! use bandreport::{create_pages, Band, NoMeasure, PageSetup, Report};
//!
//! let mut report = Report::new();
//! let section = report.add_section(PageSetup::default());
//! let band = section.add_band(Band::new(3, 2));
//! band.set_value(0, 0, "Total").unwrap();
//!
//! let pages = create_pages(&report, &NoMeasure).unwrap();
//! assert_eq!(pages.len(), 1);
//! ```

// Model
pub mod band;
pub mod color;
pub mod error;
pub mod report;
pub mod styles;
pub mod types;
pub mod units;

// Pagination
pub mod layout;

pub use band::{Band, Selector, SelectorMut, StyleContext};
pub use color::Color;
pub use error::{ReportError, Result};
pub use layout::{create_pages, paginate, Block, Measurer, NoMeasure, Page, PagePlan};
pub use report::{BandRef, DocumentInfo, Report, Section};
pub use styles::{StyleId, StyleSheet};
pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
