//! Core library for building texture atlases from loose sprite images.
//!
//! - Pipeline: [`pipeline::make`] takes decoded RGBA inputs and a
//!   [`config::AtlasConfig`] and returns a packed, composited atlas.
//! - Optional per-sprite mesh generation: alpha threshold -> dilation ->
//!   boundary trace -> adaptive simplification -> outward correction ->
//!   Delaunay triangulation.
//! - Data model is serde-serializable; [`manifest::to_manifest_json`] emits
//!   the on-disk JSON shape. The CLI crate owns file I/O.
//!
//! Quick example:
//! ```ignore
//! use atlasc_core::prelude::*;
//! # fn main() -> atlasc_core::Result<()> {
//! let a = pipeline::load_input("a.png".as_ref(), "a.png")?;
//! let b = pipeline::load_input("b.png".as_ref(), "b.png")?;
//! let cfg = AtlasConfig::default();
//! let out = pipeline::make(vec![a, b], &cfg)?;
//! println!("{}x{}", out.record.width, out.record.height);
//! # Ok(()) }
//! ```

pub mod bounds;
pub mod canvas;
pub mod compositing;
pub mod config;
pub mod correct;
pub mod error;
pub mod manifest;
pub mod mask;
pub mod model;
pub mod outline;
pub mod packer;
pub mod pipeline;
pub mod simplify;
pub mod triangulate;
pub mod uv;

pub use config::AtlasConfig;
pub use error::{AtlasError, Result};
pub use model::{AtlasRecord, Mesh, Point, Rect, SpriteRecord};

/// Convenience prelude for common types and functions.
pub mod prelude {
    pub use crate::config::{AtlasConfig, AtlasConfigBuilder};
    pub use crate::error::{AtlasError, Result};
    pub use crate::manifest::to_manifest_json;
    pub use crate::model::{AtlasRecord, Mesh, Point, Rect, SpriteRecord};
    pub use crate::pipeline::{self, AtlasBuildOutput, Input};
}
