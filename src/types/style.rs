use serde::{Deserialize, Serialize};

use super::Line;
use crate::color::Color;
use crate::error::{check_range, ReportError, Result};
use crate::styles::StyleId;
use crate::units::{points_to_twips, twips_to_points};

/// Largest font height in twips (409 pt).
pub const MAX_FONT_HEIGHT: i32 = 409 * 20;

/// Largest font width percentage.
pub const MAX_FONT_WIDTH_PERCENT: u16 = 1000;

/// Largest auto-enlarge percentage.
pub const MAX_ENLARGE_PERCENT: u16 = 1000;

/// Largest indent level.
pub const MAX_INDENT: u8 = 15;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    #[default]
    General,
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WrapMode {
    #[default]
    NoWrap,
    WordWrap,
    CharWrap,
}

/// Glyph width: either fixed, or a percentage of the font's natural width.
/// The two are one quantity, so setting either replaces the other.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FontWidth {
    /// Fixed width in twips.
    Absolute(i32),
    /// Percent of the natural width.
    Percent(u16),
}

/// One value per rectangle side.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sides<T> {
    pub left: T,
    pub top: T,
    pub right: T,
    pub bottom: T,
}

impl<T: Copy + PartialEq> Sides<T> {
    pub const fn uniform(value: T) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// The shared value when all four sides agree.
    pub fn common(&self) -> Option<T> {
        (self.left == self.top && self.left == self.right && self.left == self.bottom)
            .then_some(self.left)
    }
}

/// Summary of the local overrides on a group of sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate<T> {
    /// No side is set.
    Unset,
    /// Some sides are set, or the set values differ.
    Mixed,
    /// Every side is set to this value.
    Uniform(T),
}

impl<T: Copy + PartialEq> Sides<Option<T>> {
    /// The shared value when all four sides are set and agree.
    pub fn common_set(&self) -> Option<T> {
        self.common().flatten()
    }

    pub fn aggregate(&self) -> Aggregate<T> {
        match self.common() {
            Some(None) => Aggregate::Unset,
            Some(Some(value)) => Aggregate::Uniform(value),
            None => Aggregate::Mixed,
        }
    }
}

/// A cell's four edges plus its two diagonals.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Borders<T> {
    pub left: T,
    pub top: T,
    pub right: T,
    pub bottom: T,
    /// Bottom-left to top-right.
    pub diagonal_up: T,
    /// Top-left to bottom-right.
    pub diagonal_down: T,
}

impl<T: Copy> Borders<T> {
    pub fn edges(&self) -> Sides<T> {
        Sides {
            left: self.left,
            top: self.top,
            right: self.right,
            bottom: self.bottom,
        }
    }
}

/// Locally set style attributes. Anything left `None` resolves through the
/// parent chain (see [`crate::styles::StyleSheet::resolve`]).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) parent: Option<StyleId>,

    // Font
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) font_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) font_height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) line_height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) font_width: Option<FontWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_enlarge_percent: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) always_enlarge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) strikeout: Option<bool>,

    // Fill
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) background: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) foreground: Option<Color>,

    // Alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) h_align: Option<HAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) v_align: Option<VAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) wrap: Option<WrapMode>,
    pub(crate) margins: Sides<Option<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) indent: Option<u8>,

    // Text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) filler: Option<String>,

    pub(crate) borders: Borders<Option<Line>>,
}

fn fill<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
    if dst.is_none() {
        dst.clone_from(src);
    }
}

fn check_margin(side: &'static str, value: i32) -> Result<()> {
    if value < 0 {
        return Err(ReportError::NegativeMargin { side, value });
    }
    Ok(())
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A style whose only local setting is its parent.
    pub fn with_parent(parent: StyleId) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    pub fn parent(&self) -> Option<StyleId> {
        self.parent
    }

    /// Re-link the inheritance chain. Registered styles go through
    /// [`crate::styles::StyleSheet::set_parent`], which rejects forward references.
    pub fn set_parent(&mut self, parent: Option<StyleId>) {
        self.parent = parent;
    }

    /// True when nothing is set locally, parent aside.
    pub fn is_empty(&self) -> bool {
        *self
            == Self {
                parent: self.parent,
                ..Self::default()
            }
    }

    /// Fill every unset attribute from `other`. Used while walking a parent chain
    /// nearest-first, so attributes already found win.
    pub(crate) fn fill_from(&mut self, other: &CellStyle) {
        fill(&mut self.font_name, &other.font_name);
        fill(&mut self.font_height, &other.font_height);
        fill(&mut self.line_height, &other.line_height);
        fill(&mut self.font_width, &other.font_width);
        fill(&mut self.max_enlarge_percent, &other.max_enlarge_percent);
        fill(&mut self.always_enlarge, &other.always_enlarge);
        fill(&mut self.bold, &other.bold);
        fill(&mut self.italic, &other.italic);
        fill(&mut self.underline, &other.underline);
        fill(&mut self.strikeout, &other.strikeout);
        fill(&mut self.background, &other.background);
        fill(&mut self.foreground, &other.foreground);
        fill(&mut self.h_align, &other.h_align);
        fill(&mut self.v_align, &other.v_align);
        fill(&mut self.wrap, &other.wrap);
        fill(&mut self.margins.left, &other.margins.left);
        fill(&mut self.margins.top, &other.margins.top);
        fill(&mut self.margins.right, &other.margins.right);
        fill(&mut self.margins.bottom, &other.margins.bottom);
        fill(&mut self.indent, &other.indent);
        fill(&mut self.format, &other.format);
        fill(&mut self.locale, &other.locale);
        fill(&mut self.filler, &other.filler);
        fill(&mut self.borders.left, &other.borders.left);
        fill(&mut self.borders.top, &other.borders.top);
        fill(&mut self.borders.right, &other.borders.right);
        fill(&mut self.borders.bottom, &other.borders.bottom);
        fill(&mut self.borders.diagonal_up, &other.borders.diagonal_up);
        fill(&mut self.borders.diagonal_down, &other.borders.diagonal_down);
    }

    // ------------------------------------------------------------------
    // Font
    // ------------------------------------------------------------------

    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    pub fn set_font_name(&mut self, name: impl Into<String>) {
        self.font_name = Some(name.into());
    }

    /// Font height in twips.
    pub fn font_height(&self) -> Option<i32> {
        self.font_height
    }

    /// Set the font height in twips.
    ///
    /// # Errors
    /// Fails unless `1 <= twips <= MAX_FONT_HEIGHT`.
    pub fn set_font_height(&mut self, twips: i32) -> Result<()> {
        check_range("font height", i64::from(twips), 1, i64::from(MAX_FONT_HEIGHT))?;
        self.font_height = Some(twips);
        Ok(())
    }

    /// Font height in points.
    pub fn font_height_pt(&self) -> Option<f64> {
        self.font_height.map(twips_to_points)
    }

    /// Set the font height in points; stored as twips.
    ///
    /// # Errors
    /// Same bounds as [`CellStyle::set_font_height`].
    pub fn set_font_height_pt(&mut self, points: f64) -> Result<()> {
        self.set_font_height(points_to_twips(points))
    }

    /// Line height in twips; 0 means "derive from the font".
    pub fn line_height(&self) -> Option<i32> {
        self.line_height
    }

    /// # Errors
    /// Fails for negative or oversized values.
    pub fn set_line_height(&mut self, twips: i32) -> Result<()> {
        check_range("line height", i64::from(twips), 0, i64::from(MAX_FONT_HEIGHT))?;
        self.line_height = Some(twips);
        Ok(())
    }

    pub fn font_width_mode(&self) -> Option<FontWidth> {
        self.font_width
    }

    /// Fixed glyph width in twips, if that is the active representation.
    pub fn font_width(&self) -> Option<i32> {
        match self.font_width {
            Some(FontWidth::Absolute(w)) => Some(w),
            _ => None,
        }
    }

    /// Set a fixed glyph width in twips. Clears any width percentage.
    ///
    /// # Errors
    /// Fails for non-positive widths.
    pub fn set_font_width(&mut self, twips: i32) -> Result<()> {
        check_range("font width", i64::from(twips), 1, i64::from(MAX_FONT_HEIGHT))?;
        self.font_width = Some(FontWidth::Absolute(twips));
        Ok(())
    }

    /// Glyph width percentage, if that is the active representation.
    pub fn font_width_percent(&self) -> Option<u16> {
        match self.font_width {
            Some(FontWidth::Percent(p)) => Some(p),
            _ => None,
        }
    }

    /// Set the glyph width as a percentage. Clears any fixed width.
    ///
    /// # Errors
    /// Fails unless `1 <= percent <= MAX_FONT_WIDTH_PERCENT`.
    pub fn set_font_width_percent(&mut self, percent: u16) -> Result<()> {
        check_range(
            "font width percent",
            i64::from(percent),
            1,
            i64::from(MAX_FONT_WIDTH_PERCENT),
        )?;
        self.font_width = Some(FontWidth::Percent(percent));
        Ok(())
    }

    /// Drop the local width so it inherits again.
    pub fn clear_font_width(&mut self) {
        self.font_width = None;
    }

    pub fn max_enlarge_percent(&self) -> Option<u16> {
        self.max_enlarge_percent
    }

    /// # Errors
    /// Fails above `MAX_ENLARGE_PERCENT`.
    pub fn set_max_enlarge_percent(&mut self, percent: u16) -> Result<()> {
        check_range(
            "enlarge percent",
            i64::from(percent),
            0,
            i64::from(MAX_ENLARGE_PERCENT),
        )?;
        self.max_enlarge_percent = Some(percent);
        Ok(())
    }

    pub fn always_enlarge(&self) -> Option<bool> {
        self.always_enlarge
    }

    pub fn set_always_enlarge(&mut self, value: bool) {
        self.always_enlarge = Some(value);
    }

    pub fn bold(&self) -> Option<bool> {
        self.bold
    }

    pub fn set_bold(&mut self, value: bool) {
        self.bold = Some(value);
    }

    pub fn italic(&self) -> Option<bool> {
        self.italic
    }

    pub fn set_italic(&mut self, value: bool) {
        self.italic = Some(value);
    }

    pub fn underline(&self) -> Option<bool> {
        self.underline
    }

    pub fn set_underline(&mut self, value: bool) {
        self.underline = Some(value);
    }

    pub fn strikeout(&self) -> Option<bool> {
        self.strikeout
    }

    pub fn set_strikeout(&mut self, value: bool) {
        self.strikeout = Some(value);
    }

    // ------------------------------------------------------------------
    // Fill and alignment
    // ------------------------------------------------------------------

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = Some(color);
    }

    pub fn h_align(&self) -> Option<HAlign> {
        self.h_align
    }

    pub fn set_h_align(&mut self, align: HAlign) {
        self.h_align = Some(align);
    }

    pub fn v_align(&self) -> Option<VAlign> {
        self.v_align
    }

    pub fn set_v_align(&mut self, align: VAlign) {
        self.v_align = Some(align);
    }

    pub fn wrap(&self) -> Option<WrapMode> {
        self.wrap
    }

    pub fn set_wrap(&mut self, mode: WrapMode) {
        self.wrap = Some(mode);
    }

    // ------------------------------------------------------------------
    // Margins and indent
    // ------------------------------------------------------------------

    pub fn margins(&self) -> Sides<Option<i32>> {
        self.margins
    }

    /// # Errors
    /// Fails for negative values.
    pub fn set_margin_left(&mut self, value: i32) -> Result<()> {
        check_margin("left", value)?;
        self.margins.left = Some(value);
        Ok(())
    }

    /// # Errors
    /// Fails for negative values.
    pub fn set_margin_top(&mut self, value: i32) -> Result<()> {
        check_margin("top", value)?;
        self.margins.top = Some(value);
        Ok(())
    }

    /// # Errors
    /// Fails for negative values.
    pub fn set_margin_right(&mut self, value: i32) -> Result<()> {
        check_margin("right", value)?;
        self.margins.right = Some(value);
        Ok(())
    }

    /// # Errors
    /// Fails for negative values.
    pub fn set_margin_bottom(&mut self, value: i32) -> Result<()> {
        check_margin("bottom", value)?;
        self.margins.bottom = Some(value);
        Ok(())
    }

    /// The local margin shared by all four sides, or `None` when the sides
    /// differ or are not all set. Use [`Self::margins_aggregate`] to tell
    /// those two apart.
    pub fn all_margins(&self) -> Option<i32> {
        self.margins.common_set()
    }

    pub fn margins_aggregate(&self) -> Aggregate<i32> {
        self.margins.aggregate()
    }

    /// Set all four margins.
    ///
    /// # Errors
    /// Fails for negative values.
    pub fn set_all_margins(&mut self, value: i32) -> Result<()> {
        check_margin("cell", value)?;
        self.margins = Sides::uniform(Some(value));
        Ok(())
    }

    pub fn indent(&self) -> Option<u8> {
        self.indent
    }

    /// # Errors
    /// Fails above `MAX_INDENT`.
    pub fn set_indent(&mut self, level: u8) -> Result<()> {
        check_range("indent", i64::from(level), 0, i64::from(MAX_INDENT))?;
        self.indent = Some(level);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Text formatting
    // ------------------------------------------------------------------

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Format strings are not validated here; the formatting consumer does that.
    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = Some(format.into());
    }

    /// Locale name of the format provider (e.g. `en-US`).
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = Some(locale.into());
    }

    /// Pattern repeated to fill the space left after the text.
    pub fn filler(&self) -> Option<&str> {
        self.filler.as_deref()
    }

    pub fn set_filler(&mut self, filler: impl Into<String>) {
        self.filler = Some(filler.into());
    }

    // ------------------------------------------------------------------
    // Borders
    // ------------------------------------------------------------------

    pub fn borders(&self) -> Borders<Option<Line>> {
        self.borders
    }

    pub fn set_border_left(&mut self, line: Line) {
        self.borders.left = Some(line);
    }

    pub fn set_border_top(&mut self, line: Line) {
        self.borders.top = Some(line);
    }

    pub fn set_border_right(&mut self, line: Line) {
        self.borders.right = Some(line);
    }

    pub fn set_border_bottom(&mut self, line: Line) {
        self.borders.bottom = Some(line);
    }

    pub fn set_diagonal_up(&mut self, line: Line) {
        self.borders.diagonal_up = Some(line);
    }

    pub fn set_diagonal_down(&mut self, line: Line) {
        self.borders.diagonal_down = Some(line);
    }

    /// The local edge line shared by all four edges, or `None` when they differ
    /// or are not all set. Diagonals are not edges.
    pub fn all_borders(&self) -> Option<Line> {
        self.borders.edges().common_set()
    }

    /// Like [`Self::all_borders`], but keeps "nothing set" apart from "mixed".
    pub fn borders_aggregate(&self) -> Aggregate<Line> {
        self.borders.edges().aggregate()
    }

    /// Set all four edges. Diagonals are left alone.
    pub fn set_all_borders(&mut self, line: Line) {
        self.borders.left = Some(line);
        self.borders.top = Some(line);
        self.borders.right = Some(line);
        self.borders.bottom = Some(line);
    }
}

/// Fully resolved style: every attribute has a value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub font_name: String,
    /// Twips.
    pub font_height: i32,
    /// Twips; 0 derives the line height from the font.
    pub line_height: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_width: Option<FontWidth>,
    pub max_enlarge_percent: u16,
    pub always_enlarge: bool,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
    pub background: Color,
    pub foreground: Color,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub wrap: WrapMode,
    pub margins: Sides<i32>,
    pub indent: u8,
    pub format: String,
    pub locale: String,
    pub filler: String,
    pub borders: Borders<Line>,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            font_name: "Arial".to_string(),
            font_height: 200,
            line_height: 0,
            font_width: None,
            max_enlarge_percent: 0,
            always_enlarge: false,
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
            background: Color::Auto,
            foreground: Color::Auto,
            h_align: HAlign::General,
            v_align: VAlign::Top,
            wrap: WrapMode::NoWrap,
            margins: Sides::uniform(0),
            indent: 0,
            format: String::new(),
            locale: String::new(),
            filler: String::new(),
            borders: Borders::default(),
        }
    }
}

impl ResolvedStyle {
    /// Font height in points.
    pub fn font_height_pt(&self) -> f64 {
        twips_to_points(self.font_height)
    }

    /// Margin shared by all four sides, or `None` when mixed.
    pub fn all_margins(&self) -> Option<i32> {
        self.margins.common()
    }

    /// Edge line shared by all four edges, or `None` when mixed.
    pub fn all_borders(&self) -> Option<Line> {
        self.borders.edges().common()
    }

    /// Complete a partially resolved chain with the built-in defaults.
    pub(crate) fn from_chain(acc: CellStyle) -> Self {
        let base = Self::default();
        let b = acc.borders;
        Self {
            font_name: acc.font_name.unwrap_or(base.font_name),
            font_height: acc.font_height.unwrap_or(base.font_height),
            line_height: acc.line_height.unwrap_or(base.line_height),
            font_width: acc.font_width,
            max_enlarge_percent: acc.max_enlarge_percent.unwrap_or(base.max_enlarge_percent),
            always_enlarge: acc.always_enlarge.unwrap_or(base.always_enlarge),
            bold: acc.bold.unwrap_or(base.bold),
            italic: acc.italic.unwrap_or(base.italic),
            underline: acc.underline.unwrap_or(base.underline),
            strikeout: acc.strikeout.unwrap_or(base.strikeout),
            background: acc.background.unwrap_or(base.background),
            foreground: acc.foreground.unwrap_or(base.foreground),
            h_align: acc.h_align.unwrap_or(base.h_align),
            v_align: acc.v_align.unwrap_or(base.v_align),
            wrap: acc.wrap.unwrap_or(base.wrap),
            margins: Sides {
                left: acc.margins.left.unwrap_or(0),
                top: acc.margins.top.unwrap_or(0),
                right: acc.margins.right.unwrap_or(0),
                bottom: acc.margins.bottom.unwrap_or(0),
            },
            indent: acc.indent.unwrap_or(base.indent),
            format: acc.format.unwrap_or(base.format),
            locale: acc.locale.unwrap_or(base.locale),
            filler: acc.filler.unwrap_or(base.filler),
            borders: Borders {
                left: b.left.unwrap_or(Line::NONE),
                top: b.top.unwrap_or(Line::NONE),
                right: b.right.unwrap_or(Line::NONE),
                bottom: b.bottom.unwrap_or(Line::NONE),
                diagonal_up: b.diagonal_up.unwrap_or(Line::NONE),
                diagonal_down: b.diagonal_down.unwrap_or(Line::NONE),
            },
        }
    }

    /// Expand back into a style with every attribute set locally. Used to seed
    /// the root style of a stylesheet.
    pub(crate) fn to_cell_style(&self) -> CellStyle {
        let b = self.borders;
        CellStyle {
            parent: None,
            font_name: Some(self.font_name.clone()),
            font_height: Some(self.font_height),
            line_height: Some(self.line_height),
            font_width: self.font_width,
            max_enlarge_percent: Some(self.max_enlarge_percent),
            always_enlarge: Some(self.always_enlarge),
            bold: Some(self.bold),
            italic: Some(self.italic),
            underline: Some(self.underline),
            strikeout: Some(self.strikeout),
            background: Some(self.background),
            foreground: Some(self.foreground),
            h_align: Some(self.h_align),
            v_align: Some(self.v_align),
            wrap: Some(self.wrap),
            margins: Sides {
                left: Some(self.margins.left),
                top: Some(self.margins.top),
                right: Some(self.margins.right),
                bottom: Some(self.margins.bottom),
            },
            indent: Some(self.indent),
            format: Some(self.format.clone()),
            locale: Some(self.locale.clone()),
            filler: Some(self.filler.clone()),
            borders: Borders {
                left: Some(b.left),
                top: Some(b.top),
                right: Some(b.right),
                bottom: Some(b.bottom),
                diagonal_up: Some(b.diagonal_up),
                diagonal_down: Some(b.diagonal_down),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::LineStyle;

    #[test]
    fn test_font_height_units() {
        let mut style = CellStyle::new();
        style.set_font_height_pt(12.0).unwrap();
        assert_eq!(style.font_height(), Some(240));
        style.set_font_height(210).unwrap();
        assert_eq!(style.font_height_pt(), Some(10.5));
        assert!(style.set_font_height(0).is_err());
        assert!(style.set_font_height_pt(-3.0).is_err());
    }

    #[test]
    fn test_font_width_resets_percent() {
        let mut style = CellStyle::new();
        style.set_font_width_percent(80).unwrap();
        assert_eq!(style.font_width_percent(), Some(80));
        assert_eq!(style.font_width(), None);

        style.set_font_width(120).unwrap();
        assert_eq!(style.font_width(), Some(120));
        assert_eq!(style.font_width_percent(), None);

        style.set_font_width_percent(150).unwrap();
        assert_eq!(style.font_width(), None);
        assert!(style.set_font_width_percent(0).is_err());
        assert!(style.set_font_width_percent(MAX_FONT_WIDTH_PERCENT + 1).is_err());
    }

    #[test]
    fn test_all_margins_mixed() {
        let mut style = CellStyle::new();
        assert_eq!(style.all_margins(), None);
        style.set_all_margins(20).unwrap();
        assert_eq!(style.all_margins(), Some(20));
        style.set_margin_left(5).unwrap();
        assert_eq!(style.all_margins(), None);
        style.set_margin_left(20).unwrap();
        assert_eq!(style.all_margins(), Some(20));
        assert!(style.set_all_margins(-1).is_err());
    }

    #[test]
    fn test_all_borders_excludes_diagonals() {
        let thick = Line::new(LineStyle::Thick, Color::BLACK);
        let mut style = CellStyle::new();
        style.set_all_borders(thick);
        style.set_diagonal_up(Line::THIN);
        assert_eq!(style.all_borders(), Some(thick));
        style.set_border_top(Line::THIN);
        assert_eq!(style.all_borders(), None);
    }

    #[test]
    fn test_margins_aggregate_separates_unset_from_mixed() {
        let mut style = CellStyle::new();
        assert_eq!(style.margins_aggregate(), Aggregate::Unset);
        style.set_margin_top(20).unwrap();
        assert_eq!(style.margins_aggregate(), Aggregate::Mixed);
        assert_eq!(style.all_margins(), None);
        style.set_all_margins(20).unwrap();
        assert_eq!(style.margins_aggregate(), Aggregate::Uniform(20));
        style.set_margin_right(0).unwrap();
        assert_eq!(style.margins_aggregate(), Aggregate::Mixed);
    }

    #[test]
    fn test_borders_aggregate() {
        let mut style = CellStyle::new();
        style.set_diagonal_down(Line::THIN);
        assert_eq!(style.borders_aggregate(), Aggregate::Unset);
        style.set_border_left(Line::THIN);
        assert_eq!(style.borders_aggregate(), Aggregate::Mixed);
        style.set_all_borders(Line::THIN);
        assert_eq!(style.borders_aggregate(), Aggregate::Uniform(Line::THIN));
    }

    #[test]
    fn test_bounded_attributes() {
        let mut style = CellStyle::new();
        assert!(style.set_indent(MAX_INDENT).is_ok());
        assert!(style.set_indent(MAX_INDENT + 1).is_err());
        assert!(style.set_max_enlarge_percent(MAX_ENLARGE_PERCENT + 1).is_err());
        assert!(style.set_line_height(-1).is_err());
        assert!(style.set_line_height(0).is_ok());
    }

    #[test]
    fn test_fill_from_keeps_nearest() {
        let mut child = CellStyle::new();
        child.set_bold(true);
        let mut parent = CellStyle::new();
        parent.set_bold(false);
        parent.set_italic(true);

        child.fill_from(&parent);
        assert_eq!(child.bold(), Some(true));
        assert_eq!(child.italic(), Some(true));
    }

    #[test]
    fn test_resolved_roundtrip_through_cell_style() {
        let resolved = ResolvedStyle::default();
        let local = resolved.to_cell_style();
        assert_eq!(ResolvedStyle::from_chain(local), resolved);
    }
}
