use vizbind::scale::{
    extent_max, extent_min, scheme_set2, BandScale, LinearScale, OrdinalScale, SqrtScale,
};
use vizbind::Color;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================================
// Linear
// =============================================================================

#[test]
fn test_linear_maps_domain_to_range() {
    let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0));
    assert!(approx(scale.map(0.0), 0.0));
    assert!(approx(scale.map(50.0), 250.0));
    assert!(approx(scale.map(100.0), 500.0));
}

#[test]
fn test_linear_inverted_range() {
    // Screen y grows downward, so bigger values map higher up
    let scale = LinearScale::new((0.0, 60.0), (320.0, 0.0));
    assert!(approx(scale.map(0.0), 320.0));
    assert!(approx(scale.map(60.0), 0.0));
    assert!(approx(scale.invert(160.0), 30.0));
}

#[test]
fn test_linear_collapsed_domain_maps_to_middle() {
    let scale = LinearScale::new((5.0, 5.0), (0.0, 100.0));
    assert!(approx(scale.map(5.0), 50.0));
}

#[test]
fn test_linear_ticks() {
    let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0));
    assert_eq!(scale.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

    let scale = LinearScale::new((0.0, 60.0), (0.0, 1.0));
    assert_eq!(scale.ticks(6), vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
}

// =============================================================================
// Sqrt
// =============================================================================

#[test]
fn test_sqrt_scale() {
    let scale = SqrtScale::new((0.0, 100.0), (5.0, 20.0));
    assert!(approx(scale.map(0.0), 5.0));
    assert!(approx(scale.map(25.0), 12.5));
    assert!(approx(scale.map(100.0), 20.0));
}

// =============================================================================
// Band
// =============================================================================

#[test]
fn test_band_scale_without_padding() {
    let scale = BandScale::new(["a", "b", "c", "d"], (0.0, 400.0));
    assert!(approx(scale.bandwidth(), 100.0));
    assert_eq!(scale.map("a"), Some(0.0));
    assert_eq!(scale.map("c"), Some(200.0));
    assert_eq!(scale.map("z"), None);
}

#[test]
fn test_band_scale_with_padding() {
    let fruits = ["Apple", "Banana", "Pear", "Orange", "Grape"];
    let scale = BandScale::new(fruits, (0.0, 520.0)).padding(0.2);

    // step = 520 / (5 + 0.2) = 100
    assert!(approx(scale.bandwidth(), 80.0));
    assert!(approx(scale.map("Apple").unwrap(), 20.0));
    assert!(approx(scale.map("Grape").unwrap(), 420.0));
    // Last band ends one outer gap before the end of the range
    assert!(approx(scale.map("Grape").unwrap() + scale.bandwidth(), 500.0));
}

// =============================================================================
// Ordinal
// =============================================================================

#[test]
fn test_ordinal_scale_assigns_scheme_in_order() {
    let continents = ["Africa", "Asia", "Oceania", "Americas", "Europe"];
    let scheme = scheme_set2();
    let scale = OrdinalScale::new(continents, scheme.clone());

    assert_eq!(scale.map("Africa"), scheme[0]);
    assert_eq!(scale.map("Europe"), scheme[4]);
    assert_eq!(scale.map("Antarctica"), scheme[5]);
}

#[test]
fn test_ordinal_scale_wraps_around() {
    let scale = OrdinalScale::new(["a", "b", "c"], vec![Color::BLACK, Color::WHITE]);
    assert_eq!(scale.map("c"), Color::BLACK);
}

#[test]
fn test_ordinal_scale_empty_scheme() {
    let scale = OrdinalScale::new(["a"], Vec::new());
    assert_eq!(scale.map("a"), Color::BLACK);
}

// =============================================================================
// Extents
// =============================================================================

#[test]
fn test_extent_skips_non_finite() {
    let values = [3.0, f64::NAN, 9.0, f64::INFINITY, -1.0];
    assert_eq!(extent_max(values), Some(9.0));
    assert_eq!(extent_min(values), Some(-1.0));
    assert_eq!(extent_max(Vec::<f64>::new()), None);
}
