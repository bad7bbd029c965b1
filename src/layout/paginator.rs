//! Splits a report into pages.
//!
//! Sections are laid out in order, each starting on a new page. Inside a
//! section, bands are stacked top to bottom. A band that does not fit the
//! remaining space is either moved to the next page (keep-whole) or split at
//! row boundaries; a row is never split. Bands linked by keep-with-next /
//! keep-with-previous are tried as one unit first.

use std::ops::Range;

use crate::band::{Band, StyleContext};
use crate::error::{ReportError, Result};
use crate::report::{BandRef, Report, Section};

use super::measure::Measurer;
use super::plan::{Block, Page, PagePlan};

/// Vertical requirements of one band, computed once per call.
#[derive(Debug)]
struct BandMetrics {
    at: BandRef,
    row_heights: Vec<i32>,
    top_margin: i32,
    bottom_margin: i32,
    keep_whole: bool,
}

impl BandMetrics {
    fn measure<M: Measurer + ?Sized>(
        at: BandRef,
        band: &Band,
        ctx: StyleContext<'_>,
        measurer: &M,
    ) -> Result<Self> {
        let mut selector = band.create_selector(ctx);
        let mut row_heights = Vec::with_capacity(band.row_count() as usize);
        for row in 0..band.row_count() {
            let height = match band.row_height(row) {
                Some(explicit) => explicit,
                None => {
                    let mut wanted: Option<i32> = None;
                    for col in 0..band.column_count() {
                        selector.set_position(row, col)?;
                        let width = selector.column_width()?;
                        if let Some(h) = measurer.row_height(&selector, width).filter(|h| *h > 0) {
                            wanted = Some(wanted.map_or(h, |w| w.max(h)));
                        }
                    }
                    wanted.unwrap_or(ctx.default_row_height)
                }
            };
            row_heights.push(height);
        }
        Ok(Self {
            at,
            row_heights,
            top_margin: band.top_margin(),
            bottom_margin: band.bottom_margin(),
            keep_whole: band.keep_whole(),
        })
    }

    fn rows_height(&self) -> i32 {
        self.row_heights.iter().fold(0, |acc, h| acc.saturating_add(*h))
    }

    fn total(&self) -> i32 {
        self.top_margin
            .saturating_add(self.rows_height())
            .saturating_add(self.bottom_margin)
    }

    /// No rows and no margins: nothing to place.
    fn is_empty(&self) -> bool {
        self.row_heights.is_empty() && self.total() == 0
    }

    fn row_count(&self) -> u32 {
        u32::try_from(self.row_heights.len()).unwrap_or(u32::MAX)
    }

    fn row(&self, row: u32) -> i32 {
        self.row_heights.get(row as usize).copied().unwrap_or(0)
    }
}

/// Page being filled plus the pages already closed.
struct Cursor<'p> {
    pages: &'p mut Vec<Page>,
    section: usize,
    area: i32,
    page: Option<Page>,
    used: i32,
}

impl<'p> Cursor<'p> {
    fn new(pages: &'p mut Vec<Page>, section: usize, area: i32) -> Self {
        Self {
            pages,
            section,
            area,
            page: None,
            used: 0,
        }
    }

    fn remaining(&self) -> i32 {
        self.area.saturating_sub(self.used)
    }

    /// Nothing has been placed on the current page yet.
    fn is_fresh(&self) -> bool {
        self.page.is_none()
    }

    fn break_page(&mut self) {
        if let Some(page) = self.page.take() {
            self.pages.push(page);
        }
        self.used = 0;
    }

    fn place(&mut self, m: &BandMetrics, rows: Range<u32>, height: i32) {
        let block = Block {
            band: m.at,
            top_offset: self.used,
            height,
            starts_band: rows.start == 0,
            ends_band: rows.end == m.row_count(),
            rows: rows.collect(),
        };
        log::trace!(
            "page {}: band {} rows {:?} at {} (+{})",
            self.pages.len() + 1,
            m.at.band,
            block.rows.first().zip(block.rows.last()),
            block.top_offset,
            block.height
        );
        self.used = self.used.saturating_add(height);
        let section = self.section;
        self.page
            .get_or_insert_with(|| Page::new(section))
            .blocks
            .push(block);
    }

    fn place_whole(&mut self, m: &BandMetrics) {
        if m.is_empty() {
            log::trace!("band {} is empty, nothing placed", m.at.band);
            return;
        }
        self.place(m, 0..m.row_count(), m.total());
    }

    fn finish(mut self) {
        self.break_page();
    }
}

/// Lay out every section of `report`.
///
/// # Errors
/// Returns [`ReportError::InvalidPrintArea`] if any section's page leaves no
/// printable height or width; this is checked before anything is placed.
pub fn create_pages<M: Measurer + ?Sized>(report: &Report, measurer: &M) -> Result<Vec<Page>> {
    for (index, section) in report.sections().iter().enumerate() {
        let setup = section.page_setup();
        let (height, width) = (setup.print_area_height(), setup.print_area_width());
        if height <= 0 || width <= 0 {
            return Err(ReportError::InvalidPrintArea {
                section: index,
                height,
                width,
            });
        }
    }

    let mut pages = Vec::new();
    for (index, section) in report.sections().iter().enumerate() {
        paginate_section(report, index, section, measurer, &mut pages)?;
    }
    Ok(pages)
}

/// [`create_pages`] wrapped in a [`PagePlan`].
///
/// # Errors
/// See [`create_pages`].
pub fn paginate<M: Measurer + ?Sized>(report: &Report, measurer: &M) -> Result<PagePlan> {
    create_pages(report, measurer).map(PagePlan::from)
}

fn paginate_section<M: Measurer + ?Sized>(
    report: &Report,
    index: usize,
    section: &Section,
    measurer: &M,
    pages: &mut Vec<Page>,
) -> Result<()> {
    let setup = section.page_setup();
    let area = setup.print_area_height();
    let area_width = setup.print_area_width();
    log::debug!(
        "section {index} ({}): {} bands, print area {area} x {area_width}",
        section.name(),
        section.band_count()
    );
    if section.band_count() == 0 {
        return Ok(());
    }
    if setup.duplex_new_page() && pages.len() % 2 == 1 {
        log::debug!("section {index}: blank page so the section starts on a front side");
        pages.push(Page::new(index));
    }

    let ctx = report.context();
    let mut metrics = Vec::with_capacity(section.band_count());
    for band in section.bands() {
        let width = band.total_width(ctx.default_column_width);
        if width > area_width {
            log::warn!(
                "section {index} band {}: width {width} exceeds print area width {area_width}",
                band.index()
            );
        }
        let at = BandRef {
            section: index,
            band: band.index(),
        };
        metrics.push(BandMetrics::measure(at, band, ctx, measurer)?);
    }

    let mut cursor = Cursor::new(pages, index, area);
    for group in keep_groups(section.bands()) {
        if let Some(members) = metrics.get(group) {
            place_group(&mut cursor, members);
        }
    }
    cursor.finish();
    Ok(())
}

/// Runs of consecutive bands that should share a page. Band `i` is linked to
/// band `i + 1` when either asks for it.
fn keep_groups(bands: &[Band]) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut start = 0;
    for (i, pair) in bands.windows(2).enumerate() {
        let linked = match pair {
            [a, b] => a.keep_with_next() || b.keep_with_prev(),
            _ => false,
        };
        if !linked {
            groups.push(start..i + 1);
            start = i + 1;
        }
    }
    if start < bands.len() {
        groups.push(start..bands.len());
    }
    groups
}

fn place_group(cursor: &mut Cursor<'_>, members: &[BandMetrics]) {
    if let [single] = members {
        place_band(cursor, single);
        return;
    }
    let total = members
        .iter()
        .map(BandMetrics::total)
        .fold(0, i32::saturating_add);
    if total > cursor.remaining() {
        if total > cursor.area {
            log::warn!(
                "{} linked bands need {total}, more than the print area {}; placing them independently",
                members.len(),
                cursor.area
            );
            for m in members {
                place_band(cursor, m);
            }
            return;
        }
        log::debug!("{} linked bands moved to a new page", members.len());
        cursor.break_page();
    }
    for m in members {
        cursor.place_whole(m);
    }
}

fn place_band(cursor: &mut Cursor<'_>, m: &BandMetrics) {
    let total = m.total();
    if total <= cursor.remaining() {
        cursor.place_whole(m);
        return;
    }
    if m.keep_whole {
        if total <= cursor.area {
            log::debug!("band {} kept whole, moved to a new page", m.at.band);
            cursor.break_page();
            cursor.place_whole(m);
            return;
        }
        log::debug!(
            "band {} needs {total}, more than the print area {}; splitting",
            m.at.band,
            cursor.area
        );
    }
    split_band(cursor, m);
}

/// Place whole rows greedily, breaking pages between rows. A row that does
/// not fit even a fresh page is placed alone and overflows it.
fn split_band(cursor: &mut Cursor<'_>, m: &BandMetrics) {
    let rows = m.row_count();
    if rows == 0 {
        if !cursor.is_fresh() {
            cursor.break_page();
        }
        let height = m.total().min(cursor.remaining());
        cursor.place(m, 0..0, height);
        return;
    }

    let mut next = 0;
    while next < rows {
        let mut height = if next == 0 { m.top_margin } else { 0 };
        let mut end = next;
        while end < rows && height.saturating_add(m.row(end)) <= cursor.remaining() {
            height = height.saturating_add(m.row(end));
            end += 1;
        }
        if end == next {
            if !cursor.is_fresh() {
                cursor.break_page();
                continue;
            }
            log::warn!(
                "band {} row {next}: height {} exceeds print area {}",
                m.at.band,
                m.row(next),
                cursor.area
            );
            height = height.saturating_add(m.row(next));
            end = next + 1;
        }
        if end == rows {
            let room = cursor.remaining().saturating_sub(height).max(0);
            height = height.saturating_add(m.bottom_margin.min(room));
        }
        cursor.place(m, next..end, height);
        next = end;
        if next < rows {
            cursor.break_page();
        }
    }
}
