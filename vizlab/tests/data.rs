use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use vizbind::Color;
use vizlab::data::{CrimeTable, DataSource, Variable, ALL_CRIMES};
use vizlab::labs::map::heat_color;
use vizlab::LabError;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vizlab-test-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn row(cells: &[(&str, f64)]) -> HashMap<String, f64> {
    cells.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

// =============================================================================
// Bundled datasets
// =============================================================================

#[test]
fn test_bundled_points() {
    let points = DataSource::Bundled.points().unwrap();
    assert_eq!(points.len(), 7);
    assert_eq!(points[0].x, 12.0);
    assert_eq!(points[0].color, Color::named("steelblue").unwrap());
}

#[test]
fn test_bundled_gapminder() {
    let records = DataSource::Bundled.gapminder().unwrap();
    let japan = records
        .iter()
        .find(|r| r.country == "Japan" && r.year == 2000)
        .unwrap();
    assert_eq!(japan.continent, "Asia");
    assert_eq!(japan.value(Variable::LifeExp), 81.0);
    assert_eq!(japan.value(Variable::Income), 34000.0);
    assert_eq!(japan.value(Variable::Population), 127_000_000.0);
    assert_eq!(records.iter().filter(|r| r.year == 2000).count(), 12);
}

#[test]
fn test_bundled_crime() {
    let map = DataSource::Bundled.crime().unwrap();
    assert_eq!(map.districts.len(), 12);
    assert!(map.districts.iter().all(|d| d.outline.len() == 4));
    assert_eq!(map.table.settings()[0], ALL_CRIMES);
    assert_eq!(map.table.max(ALL_CRIMES), 1841.0);
}

// =============================================================================
// Directory datasets
// =============================================================================

#[test]
fn test_dir_source_reads_files() {
    let dir = scratch_dir("points");
    fs::write(dir.join("points.json"), r#"{"points": [{"x": 1, "y": 2, "color": "red"}]}"#).unwrap();

    let points = DataSource::Dir(dir).points().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].color, Color::rgb(255, 0, 0));
}

#[test]
fn test_dir_source_missing_file() {
    let dir = scratch_dir("empty");
    let err = DataSource::Dir(dir).gapminder().unwrap_err();
    assert!(matches!(err, LabError::Io { .. }));
}

#[test]
fn test_malformed_json() {
    let dir = scratch_dir("malformed");
    fs::write(dir.join("gapminder.json"), r#"[{"country": "Chad"}]"#).unwrap();

    let err = DataSource::Dir(dir).gapminder().unwrap_err();
    match err {
        LabError::Json { name, .. } => assert_eq!(name, "gapminder.json"),
        other => panic!("expected a JSON error, got {other:?}"),
    }
}

#[test]
fn test_unknown_color() {
    let dir = scratch_dir("color");
    fs::write(dir.join("points.json"), r#"{"points": [{"x": 1, "y": 2, "color": "blurple"}]}"#).unwrap();

    let err = DataSource::Dir(dir).points().unwrap_err();
    assert_eq!(err.to_string(), "Unknown color 'blurple'");
}

// =============================================================================
// Crime table
// =============================================================================

fn table() -> CrimeTable {
    CrimeTable::from_rows(vec![
        row(&[("District", 1.0), ("BANK", 4.0), ("ALLEY", 10.0), ("Total Crimes", 14.0)]),
        row(&[("District", 2.0), ("ALLEY", 20.0), ("Total Crimes", 20.0)]),
    ])
    .unwrap()
}

#[test]
fn test_settings_exclude_total_column() {
    assert_eq!(table().settings(), ["ALL CRIMES", "ALLEY", "BANK"]);
}

#[test]
fn test_all_crimes_uses_total_column() {
    let table = table();
    assert_eq!(table.count(1, ALL_CRIMES), 14.0);
    assert_eq!(table.total(2), 20.0);
    assert_eq!(table.max(ALL_CRIMES), 20.0);
}

#[test]
fn test_missing_counts_are_zero() {
    let table = table();
    assert_eq!(table.count(2, "BANK"), 0.0);
    assert_eq!(table.count(99, "ALLEY"), 0.0);
    assert_eq!(table.count(1, "AIRCRAFT"), 0.0);
}

#[test]
fn test_max_falls_back_to_one() {
    let table = table();
    assert_eq!(table.max("AIRCRAFT"), 1.0);
    assert_eq!(table.max("BANK"), 4.0);
}

#[test]
fn test_row_without_district() {
    let err = CrimeTable::from_rows(vec![row(&[("ALLEY", 1.0)])]).unwrap_err();
    assert_eq!(err.to_string(), "Field 'District' not found in crime.json");
}

// =============================================================================
// Heat colors
// =============================================================================

#[test]
fn test_heat_color_scale() {
    assert_eq!(heat_color(0.0, 10.0), Color::rgb(255, 255, 255));
    assert_eq!(heat_color(10.0, 10.0), Color::rgb(255, 0, 0));
    // round(255 * 1151 / 1841) = 159
    assert_eq!(heat_color(1151.0, 1841.0), Color::rgb(255, 96, 96));
}

#[test]
fn test_heat_color_with_empty_setting() {
    let table = table();
    let max = table.max("AIRCRAFT");
    assert_eq!(heat_color(table.count(1, "AIRCRAFT"), max), Color::rgb(255, 255, 255));
}
