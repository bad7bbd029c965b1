//! Structured error types for bandreport.
//!
//! Construction errors fail at the offending call; configuration errors are
//! raised by the paginator before any page is produced.

/// All errors that can occur while building a report or paginating it.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A color channel outside `0..=255`.
    #[error("Color channel {channel} out of range: {value} (expected 0..=255)")]
    ChannelOutOfRange { channel: char, value: i32 },

    /// Hex color text that is not `#RRGGBB`.
    #[error("Invalid hex color: {0}")]
    InvalidHexColor(String),

    /// A bounded numeric attribute outside its range.
    #[error("{what} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A page or band margin below zero.
    #[error("Negative {side} margin: {value}")]
    NegativeMargin { side: &'static str, value: i32 },

    /// Paper dimensions that are not strictly positive.
    #[error("Invalid paper size: {height} x {width}")]
    InvalidPaperSize { height: i32, width: i32 },

    /// A non-positive row height, column width or default size.
    #[error("Invalid {what}: {value} (must be positive)")]
    InvalidSize { what: &'static str, value: i32 },

    /// A cell address outside the band.
    #[error("Cell ({row}, {col}) outside band of {rows} x {cols}")]
    CellOutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },

    /// A row index outside the band.
    #[error("Row {row} outside band of {rows} rows")]
    RowOutOfBounds { row: u32, rows: u32 },

    /// A column index outside the band.
    #[error("Column {col} outside band of {cols} columns")]
    ColumnOutOfBounds { col: u32, cols: u32 },

    /// No style registered under this name.
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// A named style with this name is already registered.
    #[error("Duplicate style name: {0}")]
    DuplicateStyleName(String),

    /// A style may only inherit from a style registered before it.
    #[error("Style {style} cannot inherit from {parent}: parent is not registered before it")]
    ForwardStyleReference { style: String, parent: String },

    /// Another section already uses this name.
    #[error("Duplicate section name: {0}")]
    DuplicateSectionName(String),

    /// Section index outside the report.
    #[error("Unknown section: {0}")]
    UnknownSection(usize),

    /// Band index outside its section.
    #[error("Unknown band {band} in section {section}")]
    UnknownBand { section: usize, band: usize },

    /// Page margins leave no printable area.
    #[error("Section {section} has no printable area: {height} x {width}")]
    InvalidPrintArea {
        section: usize,
        height: i32,
        width: i32,
    },

    /// Page plan serialization failure.
    #[error("JSON serialization: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Check `value` against an inclusive range, reporting `what` on failure.
pub(crate) fn check_range(what: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
    if value < min || value > max {
        return Err(ReportError::OutOfRange {
            what,
            value,
            min,
            max,
        });
    }
    Ok(())
}
