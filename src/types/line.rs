use std::hash::{Hash, Hasher};
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Border line pattern.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    #[default]
    None,
    Thin,
    Medium,
    Thick,
    Dot,
    Dash,
    DashDot,
    DashDotDot,
}

impl LineStyle {
    /// Thickness rank used when two borders meet: None < Thin < Medium < Thick.
    /// Dotted and dashed patterns rank as Thin.
    pub fn thickness(self) -> u8 {
        match self {
            LineStyle::None => 0,
            LineStyle::Thin
            | LineStyle::Dot
            | LineStyle::Dash
            | LineStyle::DashDot
            | LineStyle::DashDotDot => 1,
            LineStyle::Medium => 2,
            LineStyle::Thick => 3,
        }
    }

    fn ordinal(self) -> u8 {
        match self {
            LineStyle::None => 0,
            LineStyle::Thin => 1,
            LineStyle::Medium => 2,
            LineStyle::Thick => 3,
            LineStyle::Dot => 4,
            LineStyle::Dash => 5,
            LineStyle::DashDot => 6,
            LineStyle::DashDotDot => 7,
        }
    }
}

/// An immutable border line: pattern plus color.
///
/// Two `None` lines compare equal whatever their colors.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default)]
pub struct Line {
    pub style: LineStyle,
    pub color: Color,
}

impl Line {
    pub const NONE: Line = Line {
        style: LineStyle::None,
        color: Color::Auto,
    };

    pub const THIN: Line = Line {
        style: LineStyle::Thin,
        color: Color::Auto,
    };

    pub const fn new(style: LineStyle, color: Color) -> Self {
        Self { style, color }
    }

    pub fn is_none(&self) -> bool {
        self.style == LineStyle::None
    }

    pub fn thickness(&self) -> u8 {
        self.style.thickness()
    }

    /// Total order used by `|`. Thickness first, then an explicit color over
    /// `Auto`; the remaining fields only make ties deterministic.
    fn rank(&self) -> (u8, bool, u8, Option<(u8, u8, u8)>) {
        if self.is_none() {
            return (0, false, 0, None);
        }
        (
            self.thickness(),
            !self.color.is_auto(),
            self.style.ordinal(),
            self.color.rgb(),
        )
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        if self.is_none() && other.is_none() {
            return true;
        }
        self.style == other.style && self.color == other.color
    }
}

impl Eq for Line {}

impl Hash for Line {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.style.hash(state);
        if !self.is_none() {
            self.color.hash(state);
        }
    }
}

/// Combine the borders two adjacent cells draw on their shared edge.
impl BitOr for Line {
    type Output = Line;

    fn bitor(self, rhs: Line) -> Line {
        if rhs.rank() > self.rank() {
            rhs
        } else {
            self
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_none_lines_ignore_color() {
        let a = Line::new(LineStyle::None, Color::RED);
        let b = Line::new(LineStyle::None, Color::BLUE);
        assert_eq!(a, b);
        assert_eq!(a, Line::NONE);
        assert_ne!(Line::THIN, Line::new(LineStyle::Thin, Color::RED));
    }

    #[test]
    fn test_thickness_order() {
        assert!(LineStyle::None.thickness() < LineStyle::Thin.thickness());
        assert!(LineStyle::Thin.thickness() < LineStyle::Medium.thickness());
        assert!(LineStyle::Medium.thickness() < LineStyle::Thick.thickness());
        assert_eq!(LineStyle::Dot.thickness(), LineStyle::Thin.thickness());
        assert_eq!(LineStyle::DashDotDot.thickness(), LineStyle::Thin.thickness());
    }

    #[test]
    fn test_thicker_wins() {
        let thin = Line::new(LineStyle::Thin, Color::RED);
        let thick = Line::new(LineStyle::Thick, Color::Auto);
        assert_eq!(thin | thick, thick);
        assert_eq!(thick | thin, thick);
    }

    #[test]
    fn test_explicit_color_wins_tie() {
        let auto = Line::new(LineStyle::Medium, Color::Auto);
        let blue = Line::new(LineStyle::Medium, Color::BLUE);
        assert_eq!(auto | blue, blue);
        assert_eq!(blue | auto, blue);
    }

    #[test]
    fn test_none_is_identity() {
        let dash = Line::new(LineStyle::Dash, Color::GREEN);
        assert_eq!(dash | Line::NONE, dash);
        assert_eq!(Line::NONE | dash, dash);
        assert_eq!(Line::NONE | Line::NONE, Line::NONE);
    }
}
