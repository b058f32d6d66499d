use gridkit_core::units::{format_gap, gap_to_mm, gap_to_px, parse_gap};
use gridkit_core::{GapUnit, PageSize, Rgb};
use proptest::prelude::*;

proptest! {
    #[test]
    fn hex_colours_parse_back(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let colour = Rgb::new(r, g, b);
        prop_assert_eq!(Rgb::from_hex(&colour.to_hex()), Some(colour));
        prop_assert_eq!(colour.to_hex().to_uppercase().parse::<Rgb>().ok(), Some(colour));
    }

    #[test]
    fn formatted_gaps_parse(gap in 0.0f64..500.0, physical in any::<bool>()) {
        let unit = GapUnit::for_mode(physical);
        let parsed = parse_gap(&format_gap(gap), unit).unwrap();
        prop_assert!((parsed - gap).abs() <= 0.0005 + 1e-9);
    }

    #[test]
    fn gap_conversions_agree(gap in 0.0f64..500.0) {
        let mm = gap_to_mm(gap, GapUnit::Pixels);
        prop_assert!((gap_to_px(mm, GapUnit::Millimeters) - gap).abs() < 1e-9);
    }

    #[test]
    fn custom_pages_parse(w in 1u32..2000, h in 1u32..2000) {
        let page: PageSize = format!("custom:{}x{}", w, h).parse().unwrap();
        prop_assert_eq!(page.dimensions_mm(), (f64::from(w), f64::from(h)));
    }
}

#[test]
fn test_gap_with_wrong_suffix_is_rejected() {
    assert!(parse_gap("4px", GapUnit::Millimeters).is_err());
    assert_eq!(parse_gap(" 4 mm ", GapUnit::Millimeters), Ok(4.0));
    assert_eq!(parse_gap("", GapUnit::Pixels), Ok(0.0));
}

#[test]
fn test_malformed_colours_fall_back_to_white() {
    for input in ["", "#fff", "zzzzzz", "#12345g", "#ééé"] {
        assert_eq!(Rgb::from_hex_or_white(input), Rgb::WHITE, "{}", input);
    }
}
