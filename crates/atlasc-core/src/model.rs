use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle. `x,y` is top-left; `w,h` are sizes. Min inclusive,
/// max exclusive: `x + w` is the first column *outside* the rect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge (`x + w`).
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge (`y + h`).
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Returns true if `r` is fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }

    /// True if the point `(x, y)` lies within `self`, treating both the min
    /// and max edges as inclusive. Mesh vertex coordinates denote geometric
    /// corners rather than pixel samples, so unlike [`Rect::contains`] (which
    /// tests pixel-rect containment with an exclusive max edge), a vertex
    /// may legitimately sit exactly on `right()`/`bottom()`.
    pub fn contains_point_inclusive(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// True if `self` and `other` overlap (share any pixel area).
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.x >= other.right()
            || other.x >= self.right()
            || self.y >= other.bottom()
            || other.y >= self.bottom())
    }

    pub fn as_xyxy(&self) -> [i32; 4] {
        [self.x, self.y, self.right(), self.bottom()]
    }
}

/// Integer 2D point, in either source-image or sheet-pixel coordinates
/// depending on which `Mesh` array it lives in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A triangulated approximation of a sprite's opaque silhouette.
///
/// `num_tris == 0` is represented as `None` on `SpriteRecord::mesh`, not as a
/// `Mesh` with empty arrays: presence of a mesh is a tagged variant, not a
/// flag plus parallel arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions in source-image coordinates, within `sprite_rect`.
    pub positions: Vec<Point>,
    /// Per-vertex UV in sheet-pixel coordinates, within the padded interior
    /// of `sheet_rect`.
    pub uvs: Vec<Point>,
    /// Triangle vertex indices, `len == 3 * num_tris`, each `< positions.len()`.
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn num_tris(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }
}

/// One input image's contribution to the atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteRecord {
    /// Unix-style path of the input, exactly as given on the command line.
    pub name: String,
    /// Original (untrimmed) source image size.
    pub size: (u32, u32),
    /// Trimmed opaque sub-rectangle in source coordinates.
    pub sprite_rect: Rect,
    /// Placed rectangle in sheet coordinates, excluding the surrounding border.
    pub sheet_rect: Rect,
    /// Triangulated silhouette mesh; present only in `--mesh` mode when the
    /// sprite produced at least one triangle.
    pub mesh: Option<Mesh>,
}

/// Final packed atlas: sheet dimensions plus sprite records in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasRecord {
    pub width: u32,
    pub height: u32,
    pub sprites: Vec<SpriteRecord>,
}

/// Informational packing occupancy, logged but not part of the manifest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    pub used_area: u64,
    pub total_area: u64,
}

impl PackStats {
    pub fn occupancy(&self) -> f64 {
        if self.total_area == 0 {
            0.0
        } else {
            self.used_area as f64 / self.total_area as f64
        }
    }
}

impl AtlasRecord {
    pub fn stats(&self) -> PackStats {
        let used_area: u64 = self
            .sprites
            .iter()
            .map(|s| (s.sheet_rect.w as u64) * (s.sheet_rect.h as u64))
            .sum();
        PackStats {
            used_area,
            total_area: (self.width as u64) * (self.height as u64),
        }
    }
}
