//! Bounds finder — tight bounding rectangle of a sprite's true opaque
//! silhouette.
//!
//! Bounds are read from the *undilated* threshold mask directly
//! rather than from the dilated outline the boundary tracer produces — the
//! dilation pass exists only to avoid notches during outline extraction, and
//! must not grow the reported trim rect by the extra pixel it adds on every
//! side.

use crate::mask::Mask;
use crate::model::Rect;

/// Tight bounding rectangle over every opaque pixel of `mask`, or `None` if
/// `mask` is entirely unset (a fully transparent input should not fail the
/// build). Uses exclusive-max semantics: `x + w`/`y + h` sit one pixel past
/// the furthest opaque column/row.
pub fn bounding_rect(mask: &Mask) -> Option<Rect> {
    let (w, h) = (mask.w as i32, mask.h as i32);

    let mut x1 = 0;
    while x1 < w && !(0..h).any(|y| mask.get(x1, y)) {
        x1 += 1;
    }
    if x1 >= w {
        return None;
    }
    let mut x2 = w - 1;
    while x2 > x1 && !(0..h).any(|y| mask.get(x2, y)) {
        x2 -= 1;
    }
    let mut y1 = 0;
    while y1 < h && !(x1..=x2).any(|x| mask.get(x, y1)) {
        y1 += 1;
    }
    let mut y2 = h - 1;
    while y2 > y1 && !(x1..=x2).any(|x| mask.get(x, y2)) {
        y2 -= 1;
    }

    Some(Rect::new(x1, y1, x2 - x1 + 1, y2 - y1 + 1))
}
