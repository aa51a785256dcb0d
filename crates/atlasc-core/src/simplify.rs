//! Polyline simplifier — adaptive distance-threshold reduction of a closed
//! outline to at most `max_verts` points.

use crate::model::Point;

const EPSILON_STEP: f64 = 0.5;
const EPSILON_START: f64 = 0.5;

/// Repeatedly simplifies `outline` at growing `ε` until the result has at
/// most `max_verts` points. Always applies at least one pass, even if
/// `outline` is already short enough, as an anti-noise measure. Consecutive
/// duplicate points are removed from the result.
///
/// `ε` grows without bound; each pass weakly shrinks the vertex count and
/// ultimately collapses the polygon to 2 points, so termination is
/// guaranteed.
pub fn adaptive_simplify(outline: &[Point], max_verts: u32) -> Vec<Point> {
    if outline.len() < 3 {
        return outline.to_vec();
    }
    let mut epsilon = EPSILON_START;
    loop {
        let mut simplified = simplify_closed(outline, epsilon);
        dedup_consecutive(&mut simplified);
        if simplified.len() as u32 <= max_verts {
            return simplified;
        }
        epsilon += EPSILON_STEP;
    }
}

fn dedup_consecutive(points: &mut Vec<Point>) {
    points.dedup();
    // A closed polygon's "consecutive" pair also wraps around.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
}

/// Simplifies a closed polygon by splitting it into two open chains at the
/// pair of points (the first point and the point farthest from it), running
/// Douglas-Peucker independently on each chain, then rejoining them.
fn simplify_closed(points: &[Point], epsilon: f64) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut far_idx = 0usize;
    let mut far_d = -1.0f64;
    for (i, &p) in points.iter().enumerate().skip(1) {
        let d = dist2(points[0], p);
        if d > far_d {
            far_d = d;
            far_idx = i;
        }
    }
    if far_idx == 0 {
        return points.to_vec();
    }

    let chain_a: Vec<Point> = points[0..=far_idx].to_vec();
    let mut chain_b: Vec<Point> = points[far_idx..].to_vec();
    chain_b.push(points[0]);

    let simp_a = douglas_peucker(&chain_a, epsilon);
    let simp_b = douglas_peucker(&chain_b, epsilon);

    let mut result = simp_a;
    result.pop(); // drop the join point, it reappears as simp_b's first point
    result.extend_from_slice(&simp_b[..simp_b.len().saturating_sub(1)]);
    result
}

/// Classic recursive Douglas-Peucker over an open polyline; first and last
/// points are always kept.
fn douglas_peucker(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let (a, b) = (points[0], points[points.len() - 1]);
    let mut max_d = 0.0f64;
    let mut idx = 0usize;
    for (i, &p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = perpendicular_distance(p, a, b);
        if d > max_d {
            max_d = d;
            idx = i;
        }
    }
    if max_d > epsilon {
        let mut left = douglas_peucker(&points[0..=idx], epsilon);
        let right = douglas_peucker(&points[idx..], epsilon);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![a, b]
    }
}

fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (px, py) = (p.x as f64, p.y as f64);
    let (dx, dy) = (bx - ax, by - ay);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    let num = (dy * px - dx * py + bx * ay - by * ax).abs();
    num / len2.sqrt()
}

fn dist2(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_outline() -> Vec<Point> {
        // A coarse, already-simplified 4-corner square.
        vec![
            Point::new(0, 0),
            Point::new(9, 0),
            Point::new(9, 9),
            Point::new(0, 9),
        ]
    }

    #[test]
    fn respects_max_verts_cap() {
        // Noisy near-square boundary (extra near-collinear points).
        let mut outline = Vec::new();
        for x in 0..=9 {
            outline.push(Point::new(x, 0));
        }
        for y in 1..=9 {
            outline.push(Point::new(9, y));
        }
        for x in (0..=8).rev() {
            outline.push(Point::new(x, 9));
        }
        for y in (1..=8).rev() {
            outline.push(Point::new(0, y));
        }
        let simplified = adaptive_simplify(&outline, 8);
        assert!(simplified.len() as u32 <= 8);
        assert!(simplified.len() >= 3);
    }

    #[test]
    fn always_applies_at_least_one_pass() {
        let outline = square_outline();
        let simplified = adaptive_simplify(&outline, 25);
        assert!(simplified.len() <= outline.len());
    }

    #[test]
    fn removes_consecutive_duplicates() {
        let outline = vec![
            Point::new(0, 0),
            Point::new(0, 0),
            Point::new(5, 0),
            Point::new(5, 5),
            Point::new(0, 5),
        ];
        let simplified = adaptive_simplify(&outline, 25);
        for w in simplified.windows(2) {
            assert_ne!(w[0], w[1]);
        }
    }

    #[test]
    fn terminates_on_degenerate_collinear_points() {
        let outline: Vec<Point> = (0..20).map(|x| Point::new(x, 0)).collect();
        let simplified = adaptive_simplify(&outline, 3);
        assert!(simplified.len() <= 20);
    }
}
