//! Page geometry tests: presets, orientation changes and print area.
#![allow(clippy::unwrap_used, clippy::panic)]

use bandreport::{Orientation, PageSetup, PaperSize, ReportError, Sides};
use test_case::test_case;

fn uneven_margins() -> Sides<i32> {
    Sides {
        left: 110,
        top: 220,
        right: 330,
        bottom: 440,
    }
}

#[test_case(PaperSize::A3)]
#[test_case(PaperSize::A4)]
#[test_case(PaperSize::A5)]
#[test_case(PaperSize::Letter)]
#[test_case(PaperSize::Legal)]
fn test_rotation_round_trip(paper: PaperSize) {
    let mut setup = PageSetup::from_paper(paper, Orientation::Portrait);
    setup.set_margins(uneven_margins()).unwrap();
    let original = setup.clone();

    setup.set_orientation(Orientation::Landscape, true);
    assert_ne!(setup, original);
    setup.set_orientation(Orientation::Portrait, true);
    assert_eq!(setup, original);
}

#[test]
fn test_invert_twice_is_identity() {
    let mut setup = PageSetup::from_paper(PaperSize::Letter, Orientation::Landscape);
    setup.set_margins(uneven_margins()).unwrap();
    let original = setup.clone();
    setup.invert_orientation();
    assert_eq!(setup.orientation(), Orientation::Portrait);
    setup.invert_orientation();
    assert_eq!(setup, original);
}

#[test]
fn test_landscape_swaps_print_area() {
    let mut setup = PageSetup::default();
    setup.set_margins(uneven_margins()).unwrap();
    let (height, width) = (setup.print_area_height(), setup.print_area_width());
    setup.set_orientation(Orientation::Landscape, true);
    assert_eq!(setup.paper_height(), 2100);
    assert_eq!(setup.paper_width(), 2970);
    assert_eq!(setup.print_area_height(), width);
    assert_eq!(setup.print_area_width(), height);
}

#[test]
fn test_orientation_flag_only() {
    let mut setup = PageSetup::default();
    setup.set_orientation(Orientation::Landscape, false);
    assert_eq!(setup.orientation(), Orientation::Landscape);
    assert_eq!(setup.paper_height(), 2970);
    assert_eq!(setup.margins(), Sides::uniform(100));
}

#[test]
fn test_same_orientation_is_noop() {
    let mut setup = PageSetup::default();
    setup.set_margins(uneven_margins()).unwrap();
    let original = setup.clone();
    setup.set_orientation(Orientation::Portrait, true);
    assert_eq!(setup, original);
}

#[test_case(PaperSize::A4, Orientation::Portrait)]
#[test_case(PaperSize::A3, Orientation::Landscape)]
#[test_case(PaperSize::Legal, Orientation::Landscape)]
fn test_paper_size_recognised(paper: PaperSize, orientation: Orientation) {
    let setup = PageSetup::from_paper(paper, orientation);
    assert_eq!(setup.paper_size(), Some(paper));
    assert_eq!(setup.orientation(), orientation);
}

#[test]
fn test_custom_paper_has_no_preset() {
    let setup = PageSetup::with_size(1000, 1000).unwrap();
    assert_eq!(setup.paper_size(), None);
    assert_eq!(setup.print_area_height(), 800);
}

#[test]
fn test_invalid_values_rejected() {
    let mut setup = PageSetup::default();
    assert!(matches!(
        setup.set_margin_left(-5),
        Err(ReportError::NegativeMargin { side: "left", value: -5 })
    ));
    assert!(matches!(
        PageSetup::with_size(0, 2100),
        Err(ReportError::InvalidPaperSize { .. })
    ));
    assert_eq!(setup.margin_left(), 100);
}

#[test]
fn test_serde_round_trip_keeps_setup() {
    let mut setup = PageSetup::from_paper(PaperSize::A5, Orientation::Landscape);
    setup.set_center_horizontally(true);
    setup.set_duplex_new_page(true);
    let json = serde_json::to_string(&setup).unwrap();
    let back: PageSetup = serde_json::from_str(&json).unwrap();
    assert_eq!(back, setup);
}
