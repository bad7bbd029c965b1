//! Fixed-point units.
//!
//! Paper, margins, row heights and column widths are measured in tenths of a
//! millimeter ("document units"). Font sizes are measured in twips (1/20 of a
//! point). The two systems only meet at the conversion helpers below.

/// Document units per millimeter.
pub const DOC_UNITS_PER_MM: i32 = 10;

/// Document units per inch (25.4 mm).
pub const DOC_UNITS_PER_INCH: f64 = 254.0;

/// Twips per point.
pub const TWIPS_PER_POINT: i32 = 20;

/// Twips per inch.
pub const TWIPS_PER_INCH: i32 = 1440;

/// Largest accepted paper size, margin, row height or column width: 10 m.
pub const MAX_LENGTH: i32 = 100_000;

/// Round a float to the nearest `i32`, saturating at the type bounds.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn round_i32(value: f64) -> i32 {
    // `as` saturates for out-of-range floats and maps NaN to 0.
    value.round() as i32
}

/// Convert millimeters to document units.
pub fn mm_to_doc(mm: f64) -> i32 {
    round_i32(mm * f64::from(DOC_UNITS_PER_MM))
}

/// Convert document units to millimeters.
pub fn doc_to_mm(doc: i32) -> f64 {
    f64::from(doc) / f64::from(DOC_UNITS_PER_MM)
}

/// Convert inches to document units.
pub fn inch_to_doc(inches: f64) -> i32 {
    round_i32(inches * DOC_UNITS_PER_INCH)
}

/// Convert document units to inches.
pub fn doc_to_inch(doc: i32) -> f64 {
    f64::from(doc) / DOC_UNITS_PER_INCH
}

/// Convert points to twips.
pub fn points_to_twips(points: f64) -> i32 {
    round_i32(points * f64::from(TWIPS_PER_POINT))
}

/// Convert twips to points.
pub fn twips_to_points(twips: i32) -> f64 {
    f64::from(twips) / f64::from(TWIPS_PER_POINT)
}

/// Convert twips to document units, for measurers that size rows from fonts.
pub fn twips_to_doc(twips: i32) -> i32 {
    round_i32(f64::from(twips) * DOC_UNITS_PER_INCH / f64::from(TWIPS_PER_INCH))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_conversions() {
        assert_eq!(mm_to_doc(210.0), 2100);
        assert_eq!(mm_to_doc(12.34), 123);
        assert_eq!(doc_to_mm(2970), 297.0);
    }

    #[test]
    fn test_inch_conversions() {
        assert_eq!(inch_to_doc(1.0), 254);
        assert_eq!(inch_to_doc(8.5), 2159);
        assert!((doc_to_inch(2794) - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_conversions() {
        assert_eq!(points_to_twips(10.0), 200);
        assert_eq!(points_to_twips(10.5), 210);
        assert_eq!(twips_to_points(240), 12.0);
    }

    #[test]
    fn test_twips_to_doc() {
        // 72 pt = 1 inch
        assert_eq!(twips_to_doc(1440), 254);
        // 10 pt is about 3.5 mm
        assert_eq!(twips_to_doc(200), 35);
    }
}
