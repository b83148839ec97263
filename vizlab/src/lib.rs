//! Chart labs built on `vizbind`.
//!
//! Four small interactive charts (bars, scatter, bubbles and a choropleth)
//! that keep their scene in sync with their data through keyed joins.

pub mod config;
pub mod context;
pub mod data;
pub mod draw;
pub mod error;
pub mod labs;

pub use config::{LabConfig, Margin};
pub use context::{ChartContext, ChartLayers};
pub use data::DataSource;
pub use error::LabError;
pub use labs::{Lab, LabKind};
