//! Scene construction for a multi-material position-based dynamics solver.
//!
//! Shape descriptors (rigid boxes, granular and fluid blocks, ropes, cloth
//! sheets) are turned into one flat particle buffer plus the distance,
//! bending, shape-matching and immovable constraint arrays the solver
//! iterates on. Build a [`Scene`], then [`Scene::freeze`] it and upload
//! [`FrozenScene::to_gpu_buffers`].
pub mod camera;
pub mod config;
pub mod constraints;
pub mod error;
pub mod gpu;
pub mod light;
pub mod materials;
pub mod math;
pub mod particle;
pub mod plane;
pub mod scene;
pub mod shapes;

pub use config::{BendingMode, RopeStiffness, SceneConfig};
pub use error::{SceneError, SceneResult, ShapeError};
pub use scene::{FrozenScene, IndexRange, Scene};
