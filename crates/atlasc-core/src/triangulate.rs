//! Triangulator — Delaunay triangulation of a corrected polygon's vertices,
//! via the `delaunator` crate: an external, well-tested Delaunay primitive
//! rather than a hand-rolled one.

use crate::error::Result;
use crate::model::{Mesh, Point};

/// Triangulates `polygon` (a corrected, simplified outline) and returns the
/// resulting mesh in source-image pixel coordinates. `uvs` on the returned
/// mesh are left empty; [`crate::uv::resolve_uvs`] fills them in once the
/// sprite's sheet placement is known.
///
/// Callers are expected to have already bounded `polygon.len()` below 2^16
/// via [`crate::config::AtlasConfig::validate`] (`max_verts` is capped
/// there), so indices are assumed to fit in `u16` without a runtime check.
pub fn triangulate(polygon: &[Point]) -> Result<Mesh> {
    if polygon.len() < 3 {
        return Ok(Mesh {
            positions: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        });
    }

    let pts: Vec<delaunator::Point> = polygon
        .iter()
        .map(|p| delaunator::Point {
            x: p.x as f64,
            y: p.y as f64,
        })
        .collect();

    let result = delaunator::triangulate(&pts);
    let triangulation = match result {
        Some(t) if !t.triangles.is_empty() => t,
        _ => {
            // All points collinear (or too few survive triangulation):
            // no valid 2D mesh can be formed.
            return Ok(Mesh {
                positions: polygon.to_vec(),
                uvs: Vec::new(),
                indices: Vec::new(),
            });
        }
    };

    let indices: Vec<u16> = triangulation
        .triangles
        .iter()
        .map(|&i| i as u16)
        .collect();

    Ok(Mesh {
        positions: polygon.to_vec(),
        uvs: Vec::new(),
        indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangulates_a_square_into_two_triangles() {
        let square = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        let mesh = triangulate(&square).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_tris(), 2);
        for &idx in &mesh.indices {
            assert!((idx as usize) < mesh.positions.len());
        }
    }

    #[test]
    fn degenerate_polygon_below_three_points_yields_empty_mesh() {
        let line = vec![Point::new(0, 0), Point::new(5, 5)];
        let mesh = triangulate(&line).unwrap();
        assert!(mesh.positions.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn collinear_points_yield_no_triangles() {
        let collinear = vec![Point::new(0, 0), Point::new(5, 0), Point::new(10, 0)];
        let mesh = triangulate(&collinear).unwrap();
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn pentagon_produces_consistent_triangle_fan() {
        let pentagon = vec![
            Point::new(5, 0),
            Point::new(10, 4),
            Point::new(8, 10),
            Point::new(2, 10),
            Point::new(0, 4),
        ];
        let mesh = triangulate(&pentagon).unwrap();
        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.num_tris() >= 3);
    }
}
