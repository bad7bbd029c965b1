//! Text measurement boundary.
//!
//! The paginator never measures text itself. Callers plug in whatever backs
//! their rendering (a font rasterizer, a device context, a fixed table).

use crate::band::Selector;
use crate::types::ResolvedStyle;

/// Measurement capability consumed by the paginator.
///
/// Implementations must be pure: the paginator may ask for the same cell more
/// than once while testing whether a row fits.
pub trait Measurer {
    /// Height the selector's current cell wants when laid out in a column of
    /// `column_width`, or `None` when the cell has no opinion.
    fn row_height(&self, cell: &Selector<'_>, column_width: i32) -> Option<i32>;

    /// Rendered `(width, height)` of `text` in `style`, in document units.
    fn text_extent(&self, text: &str, style: &ResolvedStyle) -> (i32, i32);
}

impl<M: Measurer + ?Sized> Measurer for &M {
    fn row_height(&self, cell: &Selector<'_>, column_width: i32) -> Option<i32> {
        (**self).row_height(cell, column_width)
    }

    fn text_extent(&self, text: &str, style: &ResolvedStyle) -> (i32, i32) {
        (**self).text_extent(text, style)
    }
}

impl<M: Measurer + ?Sized> Measurer for Box<M> {
    fn row_height(&self, cell: &Selector<'_>, column_width: i32) -> Option<i32> {
        (**self).row_height(cell, column_width)
    }

    fn text_extent(&self, text: &str, style: &ResolvedStyle) -> (i32, i32) {
        (**self).text_extent(text, style)
    }
}

/// Measures nothing: rows take their explicit or default height.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMeasure;

impl Measurer for NoMeasure {
    fn row_height(&self, _cell: &Selector<'_>, _column_width: i32) -> Option<i32> {
        None
    }

    fn text_extent(&self, _text: &str, _style: &ResolvedStyle) -> (i32, i32) {
        (0, 0)
    }
}
