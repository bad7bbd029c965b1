use serde::{Deserialize, Serialize};

use super::Sides;
use crate::error::{check_range, ReportError, Result};
use crate::units::MAX_LENGTH;

/// Page orientation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn inverted(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }
}

/// Common paper sizes, portrait height x width in document units (0.1 mm).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    pub const ALL: [PaperSize; 5] = [
        PaperSize::A3,
        PaperSize::A4,
        PaperSize::A5,
        PaperSize::Letter,
        PaperSize::Legal,
    ];

    /// Portrait `(height, width)`.
    pub fn dimensions(self) -> (i32, i32) {
        match self {
            PaperSize::A3 => (4200, 2970),
            PaperSize::A4 => (2970, 2100),
            PaperSize::A5 => (2100, 1480),
            PaperSize::Letter => (2794, 2159),
            PaperSize::Legal => (3556, 2159),
        }
    }
}

/// Default page margin: 10 mm.
pub const DEFAULT_PAGE_MARGIN: i32 = 100;

/// Paper geometry for one section, in document units.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageSetup {
    paper_height: i32,
    paper_width: i32,
    orientation: Orientation,
    margins: Sides<i32>,
    center_horizontally: bool,
    center_vertically: bool,
    /// Start each section on a front side when printing duplex.
    duplex_new_page: bool,
}

impl Default for PageSetup {
    /// A4 portrait with 10 mm margins.
    fn default() -> Self {
        Self::from_paper(PaperSize::A4, Orientation::Portrait)
    }
}

impl PageSetup {
    /// Build a page from a paper preset, already rotated for `orientation`.
    pub fn from_paper(paper: PaperSize, orientation: Orientation) -> Self {
        let (height, width) = paper.dimensions();
        let mut setup = Self {
            paper_height: height,
            paper_width: width,
            orientation: Orientation::Portrait,
            margins: Sides::uniform(DEFAULT_PAGE_MARGIN),
            center_horizontally: false,
            center_vertically: false,
            duplex_new_page: false,
        };
        setup.set_orientation(orientation, true);
        setup
    }

    /// Build a page of arbitrary size.
    ///
    /// # Errors
    /// Fails when either dimension is not positive.
    pub fn with_size(height: i32, width: i32) -> Result<Self> {
        let mut setup = Self::default();
        setup.set_paper_size(height, width)?;
        Ok(setup)
    }

    pub fn paper_height(&self) -> i32 {
        self.paper_height
    }

    pub fn paper_width(&self) -> i32 {
        self.paper_width
    }

    /// Set raw paper dimensions. Orientation is not changed.
    ///
    /// # Errors
    /// Fails when either dimension is not positive or exceeds [`MAX_LENGTH`].
    pub fn set_paper_size(&mut self, height: i32, width: i32) -> Result<()> {
        if height <= 0 || width <= 0 || height > MAX_LENGTH || width > MAX_LENGTH {
            return Err(ReportError::InvalidPaperSize { height, width });
        }
        self.paper_height = height;
        self.paper_width = width;
        Ok(())
    }

    /// The preset matching the current dimensions in either orientation.
    pub fn paper_size(&self) -> Option<PaperSize> {
        PaperSize::ALL.into_iter().find(|p| {
            let (h, w) = p.dimensions();
            (h, w) == (self.paper_height, self.paper_width)
                || (w, h) == (self.paper_height, self.paper_width)
        })
    }

    pub fn margins(&self) -> Sides<i32> {
        self.margins
    }

    pub fn margin_left(&self) -> i32 {
        self.margins.left
    }

    pub fn margin_top(&self) -> i32 {
        self.margins.top
    }

    pub fn margin_right(&self) -> i32 {
        self.margins.right
    }

    pub fn margin_bottom(&self) -> i32 {
        self.margins.bottom
    }

    /// Replace all four margins at once.
    ///
    /// # Errors
    /// Fails if any side is negative or above [`MAX_LENGTH`]; nothing is
    /// changed in that case.
    pub fn set_margins(&mut self, margins: Sides<i32>) -> Result<()> {
        for (side, value) in [
            ("left", margins.left),
            ("top", margins.top),
            ("right", margins.right),
            ("bottom", margins.bottom),
        ] {
            if value < 0 {
                return Err(ReportError::NegativeMargin { side, value });
            }
            check_range("page margin", i64::from(value), 0, i64::from(MAX_LENGTH))?;
        }
        self.margins = margins;
        Ok(())
    }

    /// # Errors
    /// Fails for negative values.
    pub fn set_margin_left(&mut self, value: i32) -> Result<()> {
        self.set_margins(Sides {
            left: value,
            ..self.margins
        })
    }

    /// # Errors
    /// Fails for negative values.
    pub fn set_margin_top(&mut self, value: i32) -> Result<()> {
        self.set_margins(Sides {
            top: value,
            ..self.margins
        })
    }

    /// # Errors
    /// Fails for negative values.
    pub fn set_margin_right(&mut self, value: i32) -> Result<()> {
        self.set_margins(Sides {
            right: value,
            ..self.margins
        })
    }

    /// # Errors
    /// Fails for negative values.
    pub fn set_margin_bottom(&mut self, value: i32) -> Result<()> {
        self.set_margins(Sides {
            bottom: value,
            ..self.margins
        })
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set the orientation. With `rotate_sizes`, an actual change also swaps
    /// height and width and turns the margins with the paper, so the printed
    /// layout is the same sheet seen rotated.
    pub fn set_orientation(&mut self, target: Orientation, rotate_sizes: bool) {
        if target == self.orientation {
            return;
        }
        if rotate_sizes {
            std::mem::swap(&mut self.paper_height, &mut self.paper_width);
            let m = self.margins;
            self.margins = match target {
                // (left, top, right, bottom) -> (bottom, left, top, right)
                Orientation::Landscape => Sides {
                    left: m.bottom,
                    top: m.left,
                    right: m.top,
                    bottom: m.right,
                },
                // inverse turn
                Orientation::Portrait => Sides {
                    left: m.top,
                    top: m.right,
                    right: m.bottom,
                    bottom: m.left,
                },
            };
        }
        self.orientation = target;
    }

    /// Toggle between portrait and landscape, always rotating.
    pub fn invert_orientation(&mut self) {
        self.set_orientation(self.orientation.inverted(), true);
    }

    pub fn center_horizontally(&self) -> bool {
        self.center_horizontally
    }

    pub fn set_center_horizontally(&mut self, value: bool) {
        self.center_horizontally = value;
    }

    pub fn center_vertically(&self) -> bool {
        self.center_vertically
    }

    pub fn set_center_vertically(&mut self, value: bool) {
        self.center_vertically = value;
    }

    pub fn duplex_new_page(&self) -> bool {
        self.duplex_new_page
    }

    pub fn set_duplex_new_page(&mut self, value: bool) {
        self.duplex_new_page = value;
    }

    /// Usable height: paper height minus top and bottom margins.
    pub fn print_area_height(&self) -> i32 {
        self.paper_height
            .saturating_sub(self.margins.top)
            .saturating_sub(self.margins.bottom)
    }

    /// Usable width: paper width minus left and right margins.
    pub fn print_area_width(&self) -> i32 {
        self.paper_width
            .saturating_sub(self.margins.left)
            .saturating_sub(self.margins.right)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_a4() {
        let setup = PageSetup::default();
        assert_eq!(setup.paper_height(), 2970);
        assert_eq!(setup.paper_width(), 2100);
        assert_eq!(setup.print_area_height(), 2770);
        assert_eq!(setup.print_area_width(), 1900);
        assert_eq!(setup.paper_size(), Some(PaperSize::A4));
    }

    #[test]
    fn test_landscape_preset() {
        let setup = PageSetup::from_paper(PaperSize::Letter, Orientation::Landscape);
        assert_eq!(setup.orientation(), Orientation::Landscape);
        assert_eq!(setup.paper_height(), 2159);
        assert_eq!(setup.paper_width(), 2794);
        assert_eq!(setup.paper_size(), Some(PaperSize::Letter));
    }

    #[test]
    fn test_set_orientation_without_rotation() {
        let mut setup = PageSetup::default();
        setup.set_orientation(Orientation::Landscape, false);
        assert_eq!(setup.orientation(), Orientation::Landscape);
        assert_eq!(setup.paper_height(), 2970);
    }

    #[test]
    fn test_rotation_turns_margins() {
        let mut setup = PageSetup::default();
        setup
            .set_margins(Sides {
                left: 1,
                top: 2,
                right: 3,
                bottom: 4,
            })
            .unwrap();
        setup.set_orientation(Orientation::Landscape, true);
        assert_eq!(
            setup.margins(),
            Sides {
                left: 4,
                top: 1,
                right: 2,
                bottom: 3
            }
        );
    }

    #[test]
    fn test_negative_margin_rejected() {
        let mut setup = PageSetup::default();
        assert!(setup.set_margin_top(-1).is_err());
        assert_eq!(setup.margin_top(), DEFAULT_PAGE_MARGIN);
    }

    #[test]
    fn test_invalid_paper() {
        assert!(PageSetup::with_size(0, 100).is_err());
        assert!(PageSetup::with_size(100, -1).is_err());
    }
}
