//! Bands: rectangular grids of styled cells.
//!
//! Cell data is sparse: a cell only takes space once a value or a local style
//! is set on it. Everything else falls back to the band's default style and
//! the report defaults. [`Selector`] and [`SelectorMut`] are cursors over one
//! band; they hold no cell data of their own.

use std::collections::HashMap;

use crate::error::{check_range, ReportError, Result};
use crate::styles::{StyleId, StyleSheet};
use crate::types::{CellStyle, CellValue, Line, ResolvedStyle};
use crate::units::MAX_LENGTH;

/// Report-wide context a selector needs to resolve styles and sizes.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    pub styles: &'a StyleSheet,
    /// Document units.
    pub default_row_height: i32,
    /// Document units.
    pub default_column_width: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct CellData {
    value: CellValue,
    style: Option<CellStyle>,
}

/// A rows x columns grid placed as a unit by the paginator.
#[derive(Debug, Clone)]
pub struct Band {
    rows: u32,
    cols: u32,
    /// Position within the owning section, stamped on append.
    index: usize,
    default_style: CellStyle,
    keep_whole: bool,
    keep_with_next: bool,
    keep_with_prev: bool,
    top_margin: i32,
    bottom_margin: i32,
    row_heights: Vec<Option<i32>>,
    column_widths: Vec<Option<i32>>,
    cells: HashMap<(u32, u32), CellData>,
}

impl Band {
    /// A plain table band. Row and column counts are fixed for its lifetime.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            index: 0,
            default_style: CellStyle::default(),
            keep_whole: true,
            keep_with_next: false,
            keep_with_prev: false,
            top_margin: 0,
            bottom_margin: 0,
            row_heights: vec![None; rows as usize],
            column_widths: vec![None; cols as usize],
            cells: HashMap::new(),
        }
    }

    pub fn row_count(&self) -> u32 {
        self.rows
    }

    pub fn column_count(&self) -> u32 {
        self.cols
    }

    /// Position within the owning section.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Style shared by every cell without a local override.
    pub fn default_style(&self) -> &CellStyle {
        &self.default_style
    }

    pub fn default_style_mut(&mut self) -> &mut CellStyle {
        &mut self.default_style
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    /// Never split across pages unless the band is taller than a page.
    pub fn keep_whole(&self) -> bool {
        self.keep_whole
    }

    pub fn set_keep_whole(&mut self, value: bool) {
        self.keep_whole = value;
    }

    /// Keep on the same page as the following band.
    pub fn keep_with_next(&self) -> bool {
        self.keep_with_next
    }

    pub fn set_keep_with_next(&mut self, value: bool) {
        self.keep_with_next = value;
    }

    /// Keep on the same page as the preceding band.
    pub fn keep_with_prev(&self) -> bool {
        self.keep_with_prev
    }

    pub fn set_keep_with_prev(&mut self, value: bool) {
        self.keep_with_prev = value;
    }

    /// Space reserved above the first row.
    pub fn top_margin(&self) -> i32 {
        self.top_margin
    }

    /// # Errors
    /// Fails for negative values or values above [`MAX_LENGTH`].
    pub fn set_top_margin(&mut self, value: i32) -> Result<()> {
        if value < 0 {
            return Err(ReportError::NegativeMargin { side: "top", value });
        }
        check_range("top margin", i64::from(value), 0, i64::from(MAX_LENGTH))?;
        self.top_margin = value;
        Ok(())
    }

    /// Space reserved below the last row.
    pub fn bottom_margin(&self) -> i32 {
        self.bottom_margin
    }

    /// # Errors
    /// Fails for negative values or values above [`MAX_LENGTH`].
    pub fn set_bottom_margin(&mut self, value: i32) -> Result<()> {
        if value < 0 {
            return Err(ReportError::NegativeMargin {
                side: "bottom",
                value,
            });
        }
        check_range("bottom margin", i64::from(value), 0, i64::from(MAX_LENGTH))?;
        self.bottom_margin = value;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Sizes
    // ------------------------------------------------------------------

    fn check_row(&self, row: u32) -> Result<usize> {
        if row >= self.rows {
            return Err(ReportError::RowOutOfBounds {
                row,
                rows: self.rows,
            });
        }
        Ok(row as usize)
    }

    fn check_col(&self, col: u32) -> Result<usize> {
        if col >= self.cols {
            return Err(ReportError::ColumnOutOfBounds {
                col,
                cols: self.cols,
            });
        }
        Ok(col as usize)
    }

    fn check_cell(&self, row: u32, col: u32) -> Result<(u32, u32)> {
        if row >= self.rows || col >= self.cols {
            return Err(ReportError::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((row, col))
    }

    /// Explicit height of a row, if one was set.
    pub fn row_height(&self, row: u32) -> Option<i32> {
        self.row_heights.get(row as usize).copied().flatten()
    }

    /// # Errors
    /// Fails for an unknown row, a non-positive height or one above
    /// [`MAX_LENGTH`].
    pub fn set_row_height(&mut self, row: u32, height: i32) -> Result<()> {
        let index = self.check_row(row)?;
        if height <= 0 {
            return Err(ReportError::InvalidSize {
                what: "row height",
                value: height,
            });
        }
        check_range("row height", i64::from(height), 1, i64::from(MAX_LENGTH))?;
        if let Some(slot) = self.row_heights.get_mut(index) {
            *slot = Some(height);
        }
        Ok(())
    }

    /// Drop an explicit row height so the row is measured again.
    ///
    /// # Errors
    /// Fails for an unknown row.
    pub fn clear_row_height(&mut self, row: u32) -> Result<()> {
        let index = self.check_row(row)?;
        if let Some(slot) = self.row_heights.get_mut(index) {
            *slot = None;
        }
        Ok(())
    }

    /// Explicit width of a column, if one was set.
    pub fn column_width(&self, col: u32) -> Option<i32> {
        self.column_widths.get(col as usize).copied().flatten()
    }

    /// # Errors
    /// Fails for an unknown column, a non-positive width or one above
    /// [`MAX_LENGTH`].
    pub fn set_column_width(&mut self, col: u32, width: i32) -> Result<()> {
        let index = self.check_col(col)?;
        if width <= 0 {
            return Err(ReportError::InvalidSize {
                what: "column width",
                value: width,
            });
        }
        check_range("column width", i64::from(width), 1, i64::from(MAX_LENGTH))?;
        if let Some(slot) = self.column_widths.get_mut(index) {
            *slot = Some(width);
        }
        Ok(())
    }

    /// Sum of all column widths, using `default_width` where none is set.
    pub fn total_width(&self, default_width: i32) -> i32 {
        self.column_widths
            .iter()
            .map(|w| w.unwrap_or(default_width))
            .fold(0, i32::saturating_add)
    }

    // ------------------------------------------------------------------
    // Cells
    // ------------------------------------------------------------------

    pub fn value(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col)).map(|c| &c.value)
    }

    /// Locally set style of a cell, if any.
    pub fn cell_style(&self, row: u32, col: u32) -> Option<&CellStyle> {
        self.cells.get(&(row, col)).and_then(|c| c.style.as_ref())
    }

    /// Set a cell value through a selector positioned on it.
    ///
    /// # Errors
    /// Fails when the cell is outside the band.
    pub fn set_value(&mut self, row: u32, col: u32, value: impl Into<CellValue>) -> Result<()> {
        let mut selector = self.selector_mut();
        selector.set_position(row, col)?;
        selector.set_value(value)
    }

    /// Set a cell's format string through a selector positioned on it.
    ///
    /// # Errors
    /// Fails when the cell is outside the band.
    pub fn set_format(&mut self, row: u32, col: u32, format: &str) -> Result<()> {
        let mut selector = self.selector_mut();
        selector.set_position(row, col)?;
        selector.set_format(format)
    }

    /// Read cursor, starting at cell (0, 0).
    pub fn create_selector<'a>(&'a self, ctx: StyleContext<'a>) -> Selector<'a> {
        Selector {
            band: self,
            ctx,
            row: 0,
            col: 0,
        }
    }

    /// Write cursor, starting at cell (0, 0).
    pub fn selector_mut(&mut self) -> SelectorMut<'_> {
        SelectorMut {
            band: self,
            row: 0,
            col: 0,
        }
    }

    /// Resolved style of one cell without bounds checks.
    pub(crate) fn resolve_cell(&self, styles: &StyleSheet, row: u32, col: u32) -> ResolvedStyle {
        match self.cell_style(row, col) {
            Some(local) => styles.resolve_local(local, &[&self.default_style]),
            None => styles.resolve_local(&self.default_style, &[]),
        }
    }

    /// True when every edge of every cell resolves to the same line.
    /// Diagonals are not considered.
    pub fn are_all_borders_same(&self, styles: &StyleSheet) -> bool {
        let total = u64::from(self.rows) * u64::from(self.cols);
        if total == 0 {
            return true;
        }

        let mut common: Option<Line> = None;
        let mut agrees = |style: &ResolvedStyle| -> bool {
            let Some(line) = style.all_borders() else {
                return false;
            };
            match common {
                None => {
                    common = Some(line);
                    true
                }
                Some(existing) => existing == line,
            }
        };

        let styled: Vec<(u32, u32)> = self
            .cells
            .iter()
            .filter(|(_, c)| c.style.is_some())
            .map(|(k, _)| *k)
            .collect();

        // Some cell is still on the band default.
        if (styled.len() as u64) < total
            && !agrees(&styles.resolve_local(&self.default_style, &[]))
        {
            return false;
        }
        styled
            .into_iter()
            .all(|(row, col)| agrees(&self.resolve_cell(styles, row, col)))
    }

    /// Every style object owned by this band: the default style and the
    /// per-cell overrides.
    pub(crate) fn local_styles(&self) -> impl Iterator<Item = &CellStyle> {
        std::iter::once(&self.default_style)
            .chain(self.cells.values().filter_map(|c| c.style.as_ref()))
    }
}

/// Read cursor over one band's cells.
#[derive(Debug, Clone, Copy)]
pub struct Selector<'a> {
    band: &'a Band,
    ctx: StyleContext<'a>,
    row: u32,
    col: u32,
}

impl<'a> Selector<'a> {
    pub fn band(&self) -> &'a Band {
        self.band
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    /// Move to another cell.
    ///
    /// # Errors
    /// Fails when the cell is outside the band; the position is then unchanged.
    pub fn set_position(&mut self, row: u32, col: u32) -> Result<()> {
        (self.row, self.col) = self.band.check_cell(row, col)?;
        Ok(())
    }

    /// Value of the current cell. Unset cells are [`CellValue::Empty`].
    pub fn value(&self) -> &'a CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.band.value(self.row, self.col).unwrap_or(EMPTY)
    }

    /// Unformatted text of the current cell.
    pub fn text(&self) -> String {
        self.value().display_text()
    }

    /// Style set directly on the current cell, if any.
    pub fn local_style(&self) -> Option<&'a CellStyle> {
        self.band.cell_style(self.row, self.col)
    }

    /// Style of the current cell with every attribute resolved: the cell's own
    /// style, then the band default, then the report default, each followed
    /// through its parent chain.
    ///
    /// # Errors
    /// Fails when the position is outside the band (empty bands).
    pub fn style(&self) -> Result<ResolvedStyle> {
        self.band.check_cell(self.row, self.col)?;
        Ok(self.band.resolve_cell(self.ctx.styles, self.row, self.col))
    }

    /// Width of the current column: explicit, else the report default.
    ///
    /// # Errors
    /// Fails when the column is outside the band.
    pub fn column_width(&self) -> Result<i32> {
        self.band.check_col(self.col)?;
        Ok(self
            .band
            .column_width(self.col)
            .unwrap_or(self.ctx.default_column_width))
    }

    /// Explicit height of the current row, if one was set.
    pub fn explicit_row_height(&self) -> Option<i32> {
        self.band.row_height(self.row)
    }

    /// Height of the current row: explicit, else the report default.
    /// The paginator also consults the measurer; this accessor does not.
    ///
    /// # Errors
    /// Fails when the row is outside the band.
    pub fn row_height(&self) -> Result<i32> {
        self.band.check_row(self.row)?;
        Ok(self
            .band
            .row_height(self.row)
            .unwrap_or(self.ctx.default_row_height))
    }
}

/// Write cursor over one band's cells.
#[derive(Debug)]
pub struct SelectorMut<'a> {
    band: &'a mut Band,
    row: u32,
    col: u32,
}

impl SelectorMut<'_> {
    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    /// Move to another cell.
    ///
    /// # Errors
    /// Fails when the cell is outside the band; the position is then unchanged.
    pub fn set_position(&mut self, row: u32, col: u32) -> Result<()> {
        (self.row, self.col) = self.band.check_cell(row, col)?;
        Ok(())
    }

    fn cell_mut(&mut self) -> Result<&mut CellData> {
        let key = self.band.check_cell(self.row, self.col)?;
        Ok(self.band.cells.entry(key).or_default())
    }

    /// # Errors
    /// Fails when the position is outside the band.
    pub fn set_value(&mut self, value: impl Into<CellValue>) -> Result<()> {
        self.cell_mut()?.value = value.into();
        Ok(())
    }

    pub fn value(&self) -> Option<&CellValue> {
        self.band.value(self.row, self.col)
    }

    /// The current cell's own style, created empty on first use so that every
    /// attribute still inherits.
    ///
    /// # Errors
    /// Fails when the position is outside the band.
    pub fn style_mut(&mut self) -> Result<&mut CellStyle> {
        Ok(self.cell_mut()?.style.get_or_insert_with(CellStyle::default))
    }

    /// Let the current cell inherit from a registered style.
    ///
    /// # Errors
    /// Fails when the position is outside the band.
    pub fn set_parent_style(&mut self, parent: Option<StyleId>) -> Result<()> {
        self.style_mut()?.set_parent(parent);
        Ok(())
    }

    /// Let the current cell inherit from a named style.
    ///
    /// # Errors
    /// Fails for unknown names or an out-of-band position.
    pub fn set_parent_style_name(&mut self, styles: &StyleSheet, name: &str) -> Result<()> {
        let id = styles.require(name)?;
        self.set_parent_style(Some(id))
    }

    /// Drop the current cell's own style.
    ///
    /// # Errors
    /// Fails when the position is outside the band.
    pub fn clear_style(&mut self) -> Result<()> {
        self.cell_mut()?.style = None;
        Ok(())
    }

    /// # Errors
    /// Fails when the position is outside the band.
    pub fn set_format(&mut self, format: &str) -> Result<()> {
        self.style_mut()?.set_format(format);
        Ok(())
    }

    /// # Errors
    /// Fails for a non-positive height.
    pub fn set_row_height(&mut self, height: i32) -> Result<()> {
        self.band.set_row_height(self.row, height)
    }

    /// # Errors
    /// Fails for a non-positive width.
    pub fn set_column_width(&mut self, width: i32) -> Result<()> {
        self.band.set_column_width(self.col, width)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::types::LineStyle;

    fn ctx(styles: &StyleSheet) -> StyleContext<'_> {
        StyleContext {
            styles,
            default_row_height: 50,
            default_column_width: 250,
        }
    }

    #[test]
    fn test_band_defaults() {
        let band = Band::new(3, 2);
        assert!(band.keep_whole());
        assert!(!band.keep_with_next());
        assert!(!band.keep_with_prev());
        assert_eq!(band.top_margin(), 0);
        assert_eq!(band.bottom_margin(), 0);
        assert_eq!(band.total_width(250), 500);
    }

    #[test]
    fn test_selector_bounds() {
        let styles = StyleSheet::new();
        let band = Band::new(2, 2);
        let mut sel = band.create_selector(ctx(&styles));
        assert!(sel.set_position(1, 1).is_ok());
        assert!(matches!(
            sel.set_position(2, 0),
            Err(ReportError::CellOutOfBounds { .. })
        ));
        assert_eq!((sel.row(), sel.col()), (1, 1));
    }

    #[test]
    fn test_sizes_fall_back_to_defaults() {
        let styles = StyleSheet::new();
        let mut band = Band::new(2, 2);
        band.set_row_height(1, 80).unwrap();
        band.set_column_width(0, 300).unwrap();
        assert!(band.set_row_height(0, 0).is_err());
        assert!(band.set_column_width(5, 10).is_err());

        let mut sel = band.create_selector(ctx(&styles));
        assert_eq!(sel.row_height().unwrap(), 50);
        assert_eq!(sel.column_width().unwrap(), 300);
        sel.set_position(1, 1).unwrap();
        assert_eq!(sel.row_height().unwrap(), 80);
        assert_eq!(sel.explicit_row_height(), Some(80));
        assert_eq!(sel.column_width().unwrap(), 250);
    }

    #[test]
    fn test_value_and_format() {
        let styles = StyleSheet::new();
        let mut band = Band::new(1, 2);
        band.set_value(0, 1, "Total").unwrap();
        band.set_format(0, 1, "#,##0").unwrap();
        assert!(band.set_value(1, 0, 3).is_err());

        let mut sel = band.create_selector(ctx(&styles));
        assert_eq!(sel.value(), &CellValue::Empty);
        sel.set_position(0, 1).unwrap();
        assert_eq!(sel.text(), "Total");
        assert_eq!(sel.style().unwrap().format, "#,##0");
    }

    #[test]
    fn test_cell_style_resolution_order() {
        let mut styles = StyleSheet::new();
        let mut accent = CellStyle::new();
        accent.set_foreground(Color::RED);
        styles.add("Accent", accent).unwrap();

        let mut band = Band::new(1, 3);
        band.default_style_mut().set_bold(true);
        band.default_style_mut().set_foreground(Color::BLUE);
        {
            let mut sel = band.selector_mut();
            sel.set_position(0, 1).unwrap();
            sel.set_parent_style_name(&styles, "Accent").unwrap();
            sel.set_position(0, 2).unwrap();
            sel.style_mut().unwrap().set_bold(false);
        }

        let mut sel = band.create_selector(ctx(&styles));
        let plain = sel.style().unwrap();
        assert!(plain.bold);
        assert_eq!(plain.foreground, Color::BLUE);
        assert_eq!(plain.font_name, "Arial");

        sel.set_position(0, 1).unwrap();
        let accented = sel.style().unwrap();
        assert_eq!(accented.foreground, Color::RED);
        assert!(accented.bold);

        sel.set_position(0, 2).unwrap();
        assert!(!sel.style().unwrap().bold);
    }

    #[test]
    fn test_all_borders_same() {
        let styles = StyleSheet::new();
        let mut band = Band::new(2, 2);
        assert!(band.are_all_borders_same(&styles));

        let thick = Line::new(LineStyle::Thick, Color::BLACK);
        {
            let mut sel = band.selector_mut();
            sel.set_position(1, 0).unwrap();
            sel.style_mut().unwrap().set_border_left(thick);
        }
        assert!(!band.are_all_borders_same(&styles));

        {
            let mut sel = band.selector_mut();
            sel.set_position(1, 0).unwrap();
            sel.style_mut().unwrap().set_border_left(Line::NONE);
        }
        assert!(band.are_all_borders_same(&styles));

        // diagonals do not count
        {
            let mut sel = band.selector_mut();
            sel.style_mut().unwrap().set_diagonal_down(thick);
        }
        assert!(band.are_all_borders_same(&styles));
    }

    #[test]
    fn test_negative_band_margin() {
        let mut band = Band::new(1, 1);
        assert!(band.set_top_margin(-1).is_err());
        assert!(band.set_bottom_margin(100).is_ok());
        assert_eq!(band.bottom_margin(), 100);
    }
}
