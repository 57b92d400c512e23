#[macro_use]
pub(crate) mod macros;

pub mod error;
pub mod space;
pub mod shape;
pub mod output;

mod accelerators;
mod parallel;

pub mod scene;

pub use crate::accelerators::{BuildConfig, Bvh, BvhNode};
pub use crate::error::{Error, QueryStatus, Result};
pub use crate::scene::Scene;
pub use crate::shape::{Arc, Primitive, Segment};

use std::path::Path;

/// Read a PCB description file and build a queryable scene from it
pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene> {
    Scene::load(path)
}
