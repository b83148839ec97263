//! Datasets behind the labs.
//!
//! Every file is JSON. [`DataSource::Bundled`] reads the copies compiled into
//! the binary, [`DataSource::Dir`] reads the same file names from disk.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use vizbind::Color;

use crate::error::LabError;

pub const POINTS_FILE: &str = "points.json";
pub const GAPMINDER_FILE: &str = "gapminder.json";
pub const CRIME_FILE: &str = "crime.json";

/// Where dataset files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    Dir(PathBuf),
}

impl DataSource {
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => Self::Dir(dir),
            None => Self::Bundled,
        }
    }

    fn read(&self, name: &str) -> Result<String, LabError> {
        match self {
            Self::Bundled => bundled(name).map(str::to_string).ok_or_else(|| LabError::Io {
                path: PathBuf::from(name),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
            Self::Dir(dir) => {
                let path = dir.join(name);
                log::debug!("[data] reading {}", path.display());
                fs::read_to_string(&path).map_err(|source| LabError::Io { path, source })
            }
        }
    }

    fn parse<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<T, LabError> {
        let text = self.read(name)?;
        serde_json::from_str(&text).map_err(|source| LabError::Json {
            name: name.to_string(),
            source,
        })
    }

    pub fn points(&self) -> Result<Vec<ScatterPoint>, LabError> {
        let file: PointsFile = self.parse(POINTS_FILE)?;
        let points = file
            .points
            .into_iter()
            .map(RawPoint::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("[data] {} scatter points", points.len());
        Ok(points)
    }

    pub fn gapminder(&self) -> Result<Vec<CountryYear>, LabError> {
        let records: Vec<CountryYear> = self.parse(GAPMINDER_FILE)?;
        log::debug!("[data] {} gapminder records", records.len());
        Ok(records)
    }

    pub fn crime(&self) -> Result<CrimeMap, LabError> {
        let file: CrimeFile = self.parse(CRIME_FILE)?;
        let table = CrimeTable::from_rows(file.counts)?;
        log::debug!(
            "[data] {} districts, {} crime settings",
            file.districts.len(),
            table.settings().len()
        );
        Ok(CrimeMap {
            districts: file.districts,
            table,
        })
    }
}

fn bundled(name: &str) -> Option<&'static str> {
    match name {
        POINTS_FILE => Some(include_str!("../data/points.json")),
        GAPMINDER_FILE => Some(include_str!("../data/gapminder.json")),
        CRIME_FILE => Some(include_str!("../data/crime.json")),
        _ => None,
    }
}

// =============================================================================
// Scatter
// =============================================================================

#[derive(Debug, Deserialize)]
struct PointsFile {
    points: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
    color: String,
}

/// A scatter point in data coordinates (0..100 on both axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

impl ScatterPoint {
    pub fn new(x: f64, y: f64, color: Color) -> Self {
        Self { x, y, color }
    }
}

impl RawPoint {
    fn resolve(self) -> Result<ScatterPoint, LabError> {
        let color = Color::named(&self.color).ok_or(LabError::UnknownColor(self.color))?;
        Ok(ScatterPoint::new(self.x, self.y, color))
    }
}

// =============================================================================
// Gapminder
// =============================================================================

/// One country in one year.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryYear {
    pub country: String,
    pub continent: String,
    pub year: i32,
    #[serde(rename = "life_expectancy")]
    pub life_exp: f64,
    #[serde(rename = "income_per_person")]
    pub income: f64,
    #[serde(rename = "gdp_per_capita")]
    pub gdp: f64,
    #[serde(rename = "number_of_child_deaths")]
    pub child_deaths: f64,
    pub population: f64,
}

impl CountryYear {
    pub fn value(&self, variable: Variable) -> f64 {
        match variable {
            Variable::Income => self.income,
            Variable::LifeExp => self.life_exp,
            Variable::Gdp => self.gdp,
            Variable::Population => self.population,
            Variable::ChildDeaths => self.child_deaths,
        }
    }
}

/// A numeric gapminder column that can drive an axis or the bubble size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    Income,
    LifeExp,
    Gdp,
    Population,
    ChildDeaths,
}

impl Variable {
    pub const ALL: [Variable; 5] = [
        Variable::Income,
        Variable::LifeExp,
        Variable::Gdp,
        Variable::Population,
        Variable::ChildDeaths,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Variable::Income => "Income",
            Variable::LifeExp => "Life Expectancy",
            Variable::Gdp => "GDP",
            Variable::Population => "Population",
            Variable::ChildDeaths => "Child Deaths",
        }
    }

    /// The next variable in [`Variable::ALL`], wrapping around.
    pub fn next(self) -> Variable {
        let index = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

// =============================================================================
// Crime
// =============================================================================

/// The setting that sums every crime location.
pub const ALL_CRIMES: &str = "ALL CRIMES";
const TOTAL_COLUMN: &str = "Total Crimes";
const DISTRICT_COLUMN: &str = "District";

#[derive(Debug, Deserialize)]
struct CrimeFile {
    districts: Vec<District>,
    counts: Vec<HashMap<String, f64>>,
}

/// A police district with its outline, already projected to chart
/// coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct District {
    pub dist_num: u32,
    pub outline: Vec<(f64, f64)>,
}

/// Crime counts per district and setting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrimeTable {
    counts: BTreeMap<u32, HashMap<String, f64>>,
    settings: Vec<String>,
}

impl CrimeTable {
    /// Build the table from rows keyed by column name. Each row needs a
    /// `District` column. The `Total Crimes` column backs [`ALL_CRIMES`] and
    /// is not offered as a setting of its own.
    pub fn from_rows(rows: Vec<HashMap<String, f64>>) -> Result<Self, LabError> {
        let mut counts = BTreeMap::new();
        let mut columns = BTreeSet::new();

        for mut row in rows {
            let district = row
                .remove(DISTRICT_COLUMN)
                .ok_or_else(|| LabError::missing(CRIME_FILE, DISTRICT_COLUMN))?;
            let total = row.get(TOTAL_COLUMN).copied().unwrap_or(0.0);
            columns.extend(row.keys().filter(|c| *c != TOTAL_COLUMN).cloned());
            row.insert(ALL_CRIMES.to_string(), total);
            counts.insert(district as u32, row);
        }

        let settings = std::iter::once(ALL_CRIMES.to_string())
            .chain(columns)
            .collect();
        Ok(Self { counts, settings })
    }

    /// Selectable settings, [`ALL_CRIMES`] first, then the columns in
    /// alphabetical order.
    pub fn settings(&self) -> &[String] {
        &self.settings
    }

    /// Count for a district and setting. Missing districts or cells count as 0.
    pub fn count(&self, district: u32, setting: &str) -> f64 {
        self.counts
            .get(&district)
            .and_then(|row| row.get(setting))
            .copied()
            .filter(|count| count.is_finite())
            .unwrap_or(0.0)
    }

    /// Every crime in a district, regardless of setting.
    pub fn total(&self, district: u32) -> f64 {
        self.count(district, TOTAL_COLUMN)
    }

    /// The largest count for `setting` across all districts, or 1 when there
    /// is none above zero.
    pub fn max(&self, setting: &str) -> f64 {
        vizbind::scale::extent_max(self.counts.keys().map(|d| self.count(*d, setting)))
            .filter(|max| *max > 0.0)
            .unwrap_or(1.0)
    }
}

/// Districts plus their counts.
#[derive(Debug, Clone, PartialEq)]
pub struct CrimeMap {
    pub districts: Vec<District>,
    pub table: CrimeTable,
}
