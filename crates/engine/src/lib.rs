//! Scene-stack engine: lifecycle, fixed-tick loop and the capability traits
//! scenes are written against.
//!
//! Nothing in this crate touches a terminal, a window or a sound device.
//! Backends plug in through [`render::Renderer`], [`input::InputSource`],
//! [`audio::AudioLoader`] and [`clock::Clock`]; the `Recording*`, `Scripted*`
//! and `Manual*` implementations are for tests.

pub use scene_tetris_types as types;

pub mod audio;
pub mod clock;
pub mod config;
pub mod director;
pub mod engine;
pub mod input;
pub mod key_state;
pub mod model;
pub mod registry;
pub mod render;
pub mod scene;

pub use director::{Director, DirectorError, SceneRequest};
pub use engine::Engine;
pub use key_state::KeyState;
pub use model::SceneModel;
pub use registry::SceneRegistry;
pub use scene::{Scene, SceneContext, SceneId, SceneTransition};
