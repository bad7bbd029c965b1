//! Report root: sections, defaults, named styles and document metadata.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::band::{Band, Selector, StyleContext};
use crate::error::{check_range, ReportError, Result};
use crate::styles::StyleSheet;
use crate::types::PageSetup;
use crate::units::MAX_LENGTH;

/// Default row height: 5 mm.
pub const DEFAULT_ROW_HEIGHT: i32 = 50;

/// Default column width: 25 mm.
pub const DEFAULT_COLUMN_WIDTH: i32 = 250;

/// Prefix of generated section names.
const SECTION_NAME_PREFIX: &str = "Section";

/// Document metadata carried to exporters.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Address of a band inside a report.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BandRef {
    pub section: usize,
    pub band: usize,
}

/// An ordered list of bands printed on one page setup.
#[derive(Debug, Clone)]
pub struct Section {
    name: Option<String>,
    auto_name: String,
    page_setup: PageSetup,
    bands: Vec<Band>,
}

impl Section {
    /// Explicit name if set, else the generated one.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.auto_name)
    }

    pub fn has_explicit_name(&self) -> bool {
        self.name.is_some()
    }

    pub fn page_setup(&self) -> &PageSetup {
        &self.page_setup
    }

    pub fn page_setup_mut(&mut self) -> &mut PageSetup {
        &mut self.page_setup
    }

    /// Append a band; it is stamped with its position in this section.
    #[allow(clippy::indexing_slicing)] // Safe: index is the slot just pushed
    pub fn add_band(&mut self, mut band: Band) -> &mut Band {
        let index = self.bands.len();
        band.set_index(index);
        self.bands.push(band);
        &mut self.bands[index]
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn band(&self, index: usize) -> Option<&Band> {
        self.bands.get(index)
    }

    pub fn band_mut(&mut self, index: usize) -> Option<&mut Band> {
        self.bands.get_mut(index)
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }
}

/// The document: sections plus everything they share.
#[derive(Debug, Clone)]
pub struct Report {
    sections: Vec<Section>,
    styles: StyleSheet,
    default_row_height: i32,
    default_column_width: i32,
    info: DocumentInfo,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            styles: StyleSheet::new(),
            default_row_height: DEFAULT_ROW_HEIGHT,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            info: DocumentInfo::default(),
        }
    }

    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut DocumentInfo {
        &mut self.info
    }

    /// Root style and named styles.
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleSheet {
        &mut self.styles
    }

    pub fn default_row_height(&self) -> i32 {
        self.default_row_height
    }

    /// # Errors
    /// Fails for non-positive heights or heights above [`MAX_LENGTH`].
    pub fn set_default_row_height(&mut self, height: i32) -> Result<()> {
        if height <= 0 {
            return Err(ReportError::InvalidSize {
                what: "default row height",
                value: height,
            });
        }
        check_range("default row height", i64::from(height), 1, i64::from(MAX_LENGTH))?;
        self.default_row_height = height;
        Ok(())
    }

    pub fn default_column_width(&self) -> i32 {
        self.default_column_width
    }

    /// # Errors
    /// Fails for non-positive widths or widths above [`MAX_LENGTH`].
    pub fn set_default_column_width(&mut self, width: i32) -> Result<()> {
        if width <= 0 {
            return Err(ReportError::InvalidSize {
                what: "default column width",
                value: width,
            });
        }
        check_range("default column width", i64::from(width), 1, i64::from(MAX_LENGTH))?;
        self.default_column_width = width;
        Ok(())
    }

    /// What a selector needs to resolve styles and sizes.
    pub fn context(&self) -> StyleContext<'_> {
        StyleContext {
            styles: &self.styles,
            default_row_height: self.default_row_height,
            default_column_width: self.default_column_width,
        }
    }

    fn name_taken(&self, name: &str, except: Option<usize>) -> bool {
        self.sections
            .iter()
            .enumerate()
            .any(|(i, s)| Some(i) != except && s.name() == name)
    }

    /// First `SectionN` no other section uses.
    fn next_auto_name(&self, except: Option<usize>) -> String {
        (1..)
            .map(|n| format!("{SECTION_NAME_PREFIX}{n}"))
            .find(|candidate| !self.name_taken(candidate, except))
            .unwrap_or_default()
    }

    /// Append a section with a generated name and a copy of `page_setup`.
    #[allow(clippy::indexing_slicing)] // Safe: index is the slot just pushed
    pub fn add_section(&mut self, page_setup: PageSetup) -> &mut Section {
        let index = self.sections.len();
        let auto_name = self.next_auto_name(None);
        log::debug!("adding section {auto_name}");
        self.sections.push(Section {
            name: None,
            auto_name,
            page_setup,
            bands: Vec::new(),
        });
        &mut self.sections[index]
    }

    /// Rename a section. An empty name reverts to a generated one.
    ///
    /// # Errors
    /// Fails for an unknown index or a name another section already uses.
    pub fn rename_section(&mut self, index: usize, name: &str) -> Result<()> {
        if index >= self.sections.len() {
            return Err(ReportError::UnknownSection(index));
        }
        if name.is_empty() {
            let auto_name = self.next_auto_name(Some(index));
            if let Some(section) = self.sections.get_mut(index) {
                section.name = None;
                section.auto_name = auto_name;
            }
            return Ok(());
        }
        if self.name_taken(name, Some(index)) {
            return Err(ReportError::DuplicateSectionName(name.to_string()));
        }
        if let Some(section) = self.sections.get_mut(index) {
            section.name = Some(name.to_string());
        }
        Ok(())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    pub fn section_by_name(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Bands across all sections.
    pub fn band_count(&self) -> usize {
        self.sections.iter().map(Section::band_count).sum()
    }

    /// # Errors
    /// Fails when the section or band does not exist.
    pub fn band(&self, at: BandRef) -> Result<&Band> {
        self.sections
            .get(at.section)
            .ok_or(ReportError::UnknownSection(at.section))?
            .band(at.band)
            .ok_or(ReportError::UnknownBand {
                section: at.section,
                band: at.band,
            })
    }

    /// # Errors
    /// Fails when the section or band does not exist.
    pub fn band_mut(&mut self, at: BandRef) -> Result<&mut Band> {
        self.sections
            .get_mut(at.section)
            .ok_or(ReportError::UnknownSection(at.section))?
            .band_mut(at.band)
            .ok_or(ReportError::UnknownBand {
                section: at.section,
                band: at.band,
            })
    }

    /// Read cursor over a band, bound to this report's styles and defaults.
    ///
    /// # Errors
    /// Fails when the section or band does not exist.
    pub fn selector(&self, at: BandRef) -> Result<Selector<'_>> {
        Ok(self.band(at)?.create_selector(self.context()))
    }

    /// Distinct font names referenced anywhere: root style, named styles,
    /// band defaults and per-cell overrides.
    pub fn font_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.styles.collect_font_names(&mut names);
        let local = self
            .sections
            .iter()
            .flat_map(|s| s.bands.iter())
            .flat_map(Band::local_styles);
        for style in local {
            if let Some(name) = style.font_name() {
                names.insert(name.to_string());
            }
        }
        names
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::CellStyle;

    #[test]
    fn test_auto_section_names() {
        let mut report = Report::new();
        report.add_section(PageSetup::default());
        report.add_section(PageSetup::default());
        let names: Vec<_> = report.sections().iter().map(Section::name).collect();
        assert_eq!(names, ["Section1", "Section2"]);
    }

    #[test]
    fn test_rename_section() {
        let mut report = Report::new();
        report.add_section(PageSetup::default());
        report.add_section(PageSetup::default());

        report.rename_section(0, "Summary").unwrap();
        assert_eq!(report.section(0).unwrap().name(), "Summary");
        assert!(report.section_by_name("Summary").is_some());

        assert!(matches!(
            report.rename_section(1, "Summary"),
            Err(ReportError::DuplicateSectionName(_))
        ));

        report.rename_section(0, "").unwrap();
        assert!(!report.section(0).unwrap().has_explicit_name());
        assert_eq!(report.section(0).unwrap().name(), "Section1");
        assert!(report.rename_section(7, "x").is_err());
    }

    #[test]
    fn test_band_indices_and_count() {
        let mut report = Report::new();
        let section = report.add_section(PageSetup::default());
        section.add_band(Band::new(1, 1));
        let second = section.add_band(Band::new(2, 2));
        assert_eq!(second.index(), 1);
        report.add_section(PageSetup::default()).add_band(Band::new(1, 1));
        assert_eq!(report.band_count(), 3);
        assert!(report.band(BandRef { section: 1, band: 1 }).is_err());
    }

    #[test]
    fn test_font_names() {
        let mut report = Report::new();
        let mut heading = CellStyle::new();
        heading.set_font_name("Georgia");
        report.styles_mut().add("Heading", heading).unwrap();

        let section = report.add_section(PageSetup::default());
        let band = section.add_band(Band::new(2, 2));
        band.default_style_mut().set_font_name("Courier New");
        let mut sel = band.selector_mut();
        sel.set_position(1, 1).unwrap();
        sel.style_mut().unwrap().set_font_name("Georgia");

        let names: Vec<_> = report.font_names().into_iter().collect();
        assert_eq!(names, ["Arial", "Courier New", "Georgia"]);
    }

    #[test]
    fn test_invalid_defaults() {
        let mut report = Report::new();
        assert!(report.set_default_row_height(0).is_err());
        assert!(report.set_default_column_width(-10).is_err());
        report.set_default_row_height(60).unwrap();
        assert_eq!(report.context().default_row_height, 60);
    }
}
