//! Keyed data binding for retained scenes.
//!
//! [`join::BindingSet`] keeps one scene node per data key and routes every
//! refresh through enter, update and exit callbacks, optionally animating
//! attribute changes. [`scene::Scene`] is the retained surface it draws into;
//! [`render`] and [`terminal`] put a scene on screen.

pub mod animation;
pub mod buffer;
pub mod error;
pub mod event;
pub mod hit;
pub mod join;
pub mod render;
pub mod scale;
pub mod scene;
pub mod terminal;
pub mod text;
pub mod transitions;
pub mod types;

pub use buffer::Buffer;
pub use error::SceneError;
pub use event::{Event, Key, Modifiers};
pub use hit::hit_test;
pub use join::{by_index, Bound, BindingSet, JoinReport};
pub use render::{render_to_buffer, Viewport};
pub use scene::{Attr, AttrValue, NodeId, Scene, ShapeKind, Surface};
pub use terminal::Terminal;
pub use transitions::{Easing, TransitionConfig};
pub use types::*;
