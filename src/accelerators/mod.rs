pub mod builder;
pub mod bvh;

pub use self::builder::{build, BuildConfig};
pub use self::bvh::{Bvh, BvhNode};
