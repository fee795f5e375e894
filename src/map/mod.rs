//! Interactive map
//!
//! - `projection`: geographic to canvas transform
//! - `scene`: scene graph and hit testing
//! - `animation`: cancellable spoke marker loops
//! - `renderer`: owner of the current scene and its animations
//! - `svg`: SVG serialization of a scene

pub mod animation;
pub mod projection;
pub mod renderer;
pub mod scene;
pub mod svg;

pub use animation::{AnimationHandle, SpokeAnimation, SpokeMarker};
pub use projection::{CanvasPoint, GeoProjector, Viewport};
pub use renderer::SceneRenderer;
pub use scene::{Connector, NodeKind, Scene, SceneNode, Shape};
