//! The chart labs.
//!
//! Each lab owns a state value and a pure reducer `(state, event) -> state`.
//! After every event the host calls [`Lab::render`], which runs one
//! [`vizbind::BindingSet::refresh`] per bound layer.

pub mod bars;
pub mod bubbles;
pub mod map;
pub mod scatter;

use vizbind::{Key, NodeId, Scene};

use crate::config::LabConfig;
use crate::error::LabError;

pub use bars::BarsLab;
pub use bubbles::BubblesLab;
pub use map::MapLab;
pub use scatter::ScatterLab;

/// The available labs, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LabKind {
    Bars,
    Scatter,
    Bubbles,
    Map,
}

impl LabKind {
    /// Size, margins and transition each lab is designed for.
    pub fn default_config(self) -> LabConfig {
        match self {
            LabKind::Bars => bars::default_config(),
            LabKind::Scatter => scatter::default_config(),
            LabKind::Bubbles => bubbles::default_config(),
            LabKind::Map => map::default_config(),
        }
    }
}

/// An interactive chart bound to a scene.
pub trait Lab {
    type Event;

    fn config(&self) -> &LabConfig;

    /// Translate a key press into an event, if the lab has one for it.
    fn event_for_key(&mut self, key: Key) -> Option<Self::Event>;

    /// Translate the node under the pointer into an event. Labs without
    /// hover details ignore the pointer.
    fn event_for_hover(&mut self, _node: Option<NodeId>) -> Option<Self::Event> {
        None
    }

    /// Apply an event to the lab's state.
    fn handle(&mut self, event: Self::Event);

    /// Bring the scene in line with the current state.
    fn render(&mut self, scene: &mut Scene) -> Result<(), LabError>;

    /// Translate and apply a key press. Returns whether anything happened.
    fn handle_key(&mut self, key: Key) -> bool {
        match self.event_for_key(key) {
            Some(event) => {
                self.handle(event);
                true
            }
            None => false,
        }
    }

    /// Translate and apply a pointer move. Returns whether anything happened.
    fn handle_hover(&mut self, node: Option<NodeId>) -> bool {
        match self.event_for_hover(node) {
            Some(event) => {
                self.handle(event);
                true
            }
            None => false,
        }
    }
}
