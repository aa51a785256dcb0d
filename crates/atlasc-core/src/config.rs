use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result};

/// Build-time configuration for [`crate::pipeline::make`].
///
/// Field names and defaults mirror the `atlasc` CLI flags one-to-one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Sheet width cap.
    pub max_width: u32,
    /// Sheet height cap.
    pub max_height: u32,
    /// Transparent border between sprites.
    pub border: u32,
    /// Padding band inside each sprite's sheet slot.
    pub padding: u32,
    /// Round the final sheet to a power of two.
    pub pot: bool,
    /// Generate a triangulated mesh per sprite.
    pub mesh: bool,
    /// Cap on the simplified outline vertex count (must be >= 3).
    pub max_verts: u32,
    /// Alpha threshold (0..=255) above which a pixel is considered opaque.
    pub alpha_threshold: u8,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            max_width: 2048,
            max_height: 2048,
            border: 2,
            padding: 1,
            pot: false,
            mesh: false,
            max_verts: 25,
            alpha_threshold: 20,
        }
    }
}

impl AtlasConfig {
    /// Validates the configuration's cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(AtlasError::InvalidConfig(format!(
                "max dimensions must be greater than 0 (got {}x{})",
                self.max_width, self.max_height
            )));
        }
        if self.max_verts < 3 {
            return Err(AtlasError::InvalidConfig(format!(
                "max_verts must be >= 3 (got {})",
                self.max_verts
            )));
        }
        if self.max_verts >= (1 << 16) {
            return Err(AtlasError::InvalidConfig(format!(
                "max_verts must be < 65536 to stay addressable by u16 mesh indices (got {})",
                self.max_verts
            )));
        }
        let total_inset = self.border.saturating_add(self.padding).saturating_mul(2);
        if total_inset >= self.max_width || total_inset >= self.max_height {
            return Err(AtlasError::InvalidConfig(format!(
                "border ({}) + padding ({}), doubled, leaves no usable space in a {}x{} sheet",
                self.border, self.padding, self.max_width, self.max_height
            )));
        }
        Ok(())
    }

    /// Create a fluent builder for `AtlasConfig`.
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }
}

/// Builder for [`AtlasConfig`] for ergonomic programmatic construction.
#[derive(Debug, Default, Clone)]
pub struct AtlasConfigBuilder {
    cfg: AtlasConfig,
}

impl AtlasConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: AtlasConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn border(mut self, v: u32) -> Self {
        self.cfg.border = v;
        self
    }
    pub fn padding(mut self, v: u32) -> Self {
        self.cfg.padding = v;
        self
    }
    pub fn pot(mut self, v: bool) -> Self {
        self.cfg.pot = v;
        self
    }
    pub fn mesh(mut self, v: bool) -> Self {
        self.cfg.mesh = v;
        self
    }
    pub fn max_verts(mut self, v: u32) -> Self {
        self.cfg.max_verts = v;
        self
    }
    pub fn alpha_threshold(mut self, v: u8) -> Self {
        self.cfg.alpha_threshold = v;
        self
    }
    pub fn build(self) -> AtlasConfig {
        self.cfg
    }
}
