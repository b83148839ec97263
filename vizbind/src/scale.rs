//! Domain-to-pixel mappings.
//!
//! Scales are plain values owned by the host and captured by attribute
//! callbacks. Nothing here knows about the scene.

use crate::types::Color;

/// Continuous linear mapping from `domain` to `range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to the range. A collapsed domain maps to the
    /// middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a range value back to the domain.
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Roughly `count` evenly spaced, human-friendly values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if count == 0 || hi == lo || !lo.is_finite() || !hi.is_finite() {
            return vec![lo];
        }

        let step = nice_step((hi - lo) / count as f64);
        let start = (lo / step).ceil() as i64;
        let stop = (hi / step).floor() as i64;
        (start..=stop).map(|i| i as f64 * step).collect()
    }
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let error = raw / magnitude;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

/// Square-root mapping, so that areas (not radii) scale with the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    inner: LinearScale,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((signed_sqrt(domain.0), signed_sqrt(domain.1)), range),
        }
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn map(&self, value: f64) -> f64 {
        self.inner.map(signed_sqrt(value))
    }
}

fn signed_sqrt(v: f64) -> f64 {
    v.signum() * v.abs().sqrt()
}

/// Evenly spaced bands for categorical data.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding: f64,
}

impl BandScale {
    pub fn new<I, S>(domain: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
            padding: 0.0,
        }
    }

    /// Fraction of the step left empty between and around bands (0.0 to 1.0).
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding.clamp(0.0, 1.0);
        self
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        // n bands, n - 1 inner gaps and two outer gaps of `padding` steps
        (r1 - r0) / (n - self.padding + 2.0 * self.padding).max(1.0)
    }

    /// Width of a single band.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Start position of the band for `category`.
    pub fn map(&self, category: &str) -> Option<f64> {
        let index = self.domain.iter().position(|c| c == category)?;
        let step = self.step();
        Some(self.range.0 + step * self.padding + step * index as f64)
    }
}

/// Category to color, cycling through a fixed scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<String>,
    scheme: Vec<Color>,
}

impl OrdinalScale {
    pub fn new<I, S>(domain: I, scheme: Vec<Color>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
            scheme,
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Color for `category`. Unknown categories get the scheme color after
    /// the last known one, like an implicit domain extension.
    pub fn map(&self, category: &str) -> Color {
        if self.scheme.is_empty() {
            return Color::BLACK;
        }
        let index = self
            .domain
            .iter()
            .position(|c| c == category)
            .unwrap_or(self.domain.len());
        self.scheme[index % self.scheme.len()]
    }
}

/// The eight-color qualitative "Set2" scheme.
pub fn scheme_set2() -> Vec<Color> {
    vec![
        Color::rgb(0x66, 0xc2, 0xa5),
        Color::rgb(0xfc, 0x8d, 0x62),
        Color::rgb(0x8d, 0xa0, 0xcb),
        Color::rgb(0xe7, 0x8a, 0xc3),
        Color::rgb(0xa6, 0xd8, 0x54),
        Color::rgb(0xff, 0xd9, 0x2f),
        Color::rgb(0xe5, 0xc4, 0x94),
        Color::rgb(0xb3, 0xb3, 0xb3),
    ]
}

/// Largest finite value of `values`, or None when there is none.
pub fn extent_max<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}

/// Smallest finite value of `values`, or None when there is none.
pub fn extent_min<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            Some(m) if m <= v => Some(m),
            _ => Some(v),
        })
}
