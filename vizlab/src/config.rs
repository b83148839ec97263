//! Chart configuration.

use std::path::PathBuf;
use std::time::Duration;

use vizbind::TransitionConfig;

/// Space between the chart frame and its plotting area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(40.0, 40.0, 40.0, 60.0)
    }
}

/// Configuration shared by every lab.
///
/// Built with chained setters:
///
/// ```
/// use std::time::Duration;
/// use vizlab::{LabConfig, Margin};
///
/// let config = LabConfig::new(800.0, 600.0)
///     .margin(Margin::new(80.0, 60.0, 60.0, 100.0))
///     .transition(Duration::from_millis(1000));
/// assert_eq!(config.inner_size(), (640.0, 460.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Duration of data-driven transitions. Zero disables them.
    pub transition: Duration,
    pub reduced_motion: bool,
    /// Directory holding the dataset files. `None` uses the bundled data.
    pub data_dir: Option<PathBuf>,
    /// Seed for generated data. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self::new(600.0, 400.0)
    }
}

impl LabConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: Margin::default(),
            transition: Duration::ZERO,
            reduced_motion: false,
            data_dir: None,
            seed: None,
        }
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn transition(mut self, duration: Duration) -> Self {
        self.transition = duration;
        self
    }

    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Width and height of the plotting area.
    pub fn inner_size(&self) -> (f64, f64) {
        (
            (self.width - self.margin.left - self.margin.right).max(0.0),
            (self.height - self.margin.top - self.margin.bottom).max(0.0),
        )
    }

    /// The transition handed to each refresh, or `None` when transitions are
    /// off.
    pub fn transition_config(&self) -> Option<TransitionConfig> {
        if self.transition.is_zero() {
            None
        } else {
            Some(TransitionConfig::new(self.transition, Default::default()))
        }
    }
}
