//! # handscene-core
//!
//! Gesture interpretation for a webcam-driven 3D scene editor. A landmark
//! detector reports hands each frame; the [`Arbiter`] turns that noisy stream
//! into debounced intents and applies them through a [`SceneMutator`] to the
//! [`ShapeRegistry`] and whatever rendering engine implements
//! [`SceneBackend`].
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Hand | Action |
//! |---|---|---|
//! | Pinch both hands with index tips together | Both | Create a random shape; spread hands to scale it |
//! | Pinch near a shape | Left (or Right when not scaling) | Select and drag it |
//! | Release inside the disposal zone | Selecting hand | Delete the dragged shape |
//! | Flat pinch near a sphere | Right | Scale the sphere with the pinch opening |
//! | Touch a shape with the index tip | Left | Advance it to the next palette color |
//!
//! Nothing here depends on a window system or the browser; both frontends
//! share this crate.

pub mod arbiter;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod hand;
pub mod mutator;
pub mod registry;
pub mod shape;

pub use arbiter::*;
pub use camera::*;
pub use clock::FrameClock;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use geometry::*;
pub use gesture::*;
pub use hand::*;
pub use mutator::*;
pub use registry::*;
pub use shape::*;
