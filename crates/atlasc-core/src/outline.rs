//! Outline extractor — binary mask -> ordered clockwise boundary polyline.
//!
//! Moore-neighbor boundary tracing: the boundary polyline's contract
//! (clockwise winding, one point per boundary pixel, edges never crossing
//! the mask interior for the first-returned polyline) is fixed independently
//! of how it's traced, so this is swappable for another tracer later without
//! disturbing callers.

use crate::mask::Mask;
use crate::model::Point;

/// 8-connected neighbor offsets, clockwise on screen (y grows downward)
/// starting from "north".
const NEI: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

fn dir_index(dx: i32, dy: i32) -> usize {
    NEI.iter()
        .position(|&(x, y)| x == dx && y == dy)
        .expect("offset must be one of the 8 Moore-neighborhood directions")
}

fn find_start(mask: &Mask) -> Option<Point> {
    for y in 0..mask.h as i32 {
        for x in 0..mask.w as i32 {
            if mask.get(x, y) {
                return Some(Point::new(x, y));
            }
        }
    }
    None
}

/// Shoelace signed area. In image coordinates (y down), a positive result
/// means the polygon winds clockwise as drawn on screen.
fn signed_area(pts: &[Point]) -> i64 {
    let n = pts.len();
    if n < 3 {
        return 0;
    }
    let mut s = 0i64;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        s += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }
    s
}

/// Traces the outermost connected opaque region of `mask` via Moore-neighbor
/// tracing, returning an ordered, clockwise boundary polyline. Empty mask ->
/// empty outline. A single isolated pixel yields a one-point outline.
pub fn trace_outline(mask: &Mask) -> Vec<Point> {
    let start = match find_start(mask) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut boundary = vec![start];
    let mut p = start;
    // The pixel immediately west of `start` is guaranteed unset (scanning
    // finds the topmost-then-leftmost set pixel), so tracing begins there.
    let mut b_dir = dir_index(-1, 0);
    let mut c_dir = (b_dir + 1) % 8;
    let mut stalled = 0usize;
    let max_steps = (mask.w as usize * mask.h as usize).saturating_mul(8) + 16;
    let mut total_steps = 0usize;

    loop {
        let (dx, dy) = NEI[c_dir];
        let (cx, cy) = (p.x + dx, p.y + dy);
        if mask.get(cx, cy) {
            let c = Point::new(cx, cy);
            if c == start && boundary.len() > 1 {
                break;
            }
            boundary.push(c);
            let entered_from = p;
            p = c;
            let back = (entered_from.x - p.x, entered_from.y - p.y);
            b_dir = dir_index(back.0, back.1);
            c_dir = (b_dir + 1) % 8;
            stalled = 0;
        } else {
            c_dir = (c_dir + 1) % 8;
            stalled += 1;
            if stalled >= 8 {
                // No set neighbor anywhere around p: an isolated pixel.
                break;
            }
        }
        total_steps += 1;
        if total_steps > max_steps {
            break;
        }
    }

    if signed_area(&boundary) < 0 {
        boundary.reverse();
    }
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::build_threshold_mask;
    use image::{Rgba, RgbaImage};

    #[test]
    fn empty_mask_yields_empty_outline() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        let mask = build_threshold_mask(&img, 1);
        assert!(trace_outline(&mask).is_empty());
    }

    #[test]
    fn single_pixel_yields_single_point() {
        let mut img = RgbaImage::from_pixel(5, 5, Rgba([0, 0, 0, 0]));
        img.put_pixel(2, 2, Rgba([255, 255, 255, 255]));
        let mask = build_threshold_mask(&img, 128);
        let outline = trace_outline(&mask);
        assert_eq!(outline, vec![Point::new(2, 2)]);
    }

    #[test]
    fn square_outline_is_clockwise_and_covers_boundary() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 0]));
        for y in 2..8 {
            for x in 2..8 {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        let mask = build_threshold_mask(&img, 128);
        let outline = trace_outline(&mask);
        assert!(outline.len() >= 4);
        assert!(signed_area(&outline) > 0, "outline must wind clockwise");
        let xs: Vec<i32> = outline.iter().map(|p| p.x).collect();
        let ys: Vec<i32> = outline.iter().map(|p| p.y).collect();
        assert_eq!(*xs.iter().min().unwrap(), 2);
        assert_eq!(*xs.iter().max().unwrap(), 7);
        assert_eq!(*ys.iter().min().unwrap(), 2);
        assert_eq!(*ys.iter().max().unwrap(), 7);
    }
}
