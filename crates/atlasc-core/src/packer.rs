//! Rect packer — Skyline Bottom-Left placement of inflated sprite rects
//! onto a single growing sheet. No rotation.

use crate::error::{AtlasError, Result};
use crate::model::Rect;

#[derive(Clone, Copy, Debug)]
struct SkylineNode {
    x: i32,
    y: i32,
    w: i32,
}

impl SkylineNode {
    #[inline]
    fn left(&self) -> i32 {
        self.x
    }
    #[inline]
    fn right(&self) -> i32 {
        self.x + self.w
    }
}

struct SkylinePacker {
    border: Rect,
    skylines: Vec<SkylineNode>,
}

impl SkylinePacker {
    fn new(max_width: i32, max_height: i32) -> Self {
        Self {
            border: Rect::new(0, 0, max_width, max_height),
            skylines: vec![SkylineNode {
                x: 0,
                y: 0,
                w: max_width,
            }],
        }
    }

    fn can_put(&self, mut i: usize, w: i32, h: i32) -> Option<Rect> {
        let mut rect = Rect::new(self.skylines[i].x, 0, w, h);
        let mut width_left = rect.w;
        loop {
            rect.y = rect.y.max(self.skylines[i].y);
            if !self.border.contains(&rect) {
                return None;
            }
            if self.skylines[i].w >= width_left {
                return Some(rect);
            }
            width_left -= self.skylines[i].w;
            i += 1;
            if i >= self.skylines.len() {
                return None;
            }
        }
    }

    /// Bottom-left heuristic: among all feasible placements, prefer the
    /// lowest resulting bottom edge, breaking ties on the narrowest skyline
    /// segment.
    fn find_bottom_left(&self, w: i32, h: i32) -> Option<(usize, Rect)> {
        let mut best_bottom = i32::MAX;
        let mut best_width = i32::MAX;
        let mut best: Option<(usize, Rect)> = None;
        for i in 0..self.skylines.len() {
            if let Some(r) = self.can_put(i, w, h) {
                if r.bottom() < best_bottom
                    || (r.bottom() == best_bottom && self.skylines[i].w < best_width)
                {
                    best_bottom = r.bottom();
                    best_width = self.skylines[i].w;
                    best = Some((i, r));
                }
            }
        }
        best
    }

    fn split(&mut self, index: usize, rect: &Rect) {
        let new_y = rect.bottom().min(self.border.bottom());
        let skyline = SkylineNode {
            x: rect.x,
            y: new_y,
            w: rect.w,
        };
        debug_assert!(skyline.right() <= self.border.right());
        debug_assert!(skyline.y <= self.border.bottom());

        self.skylines.insert(index, skyline);

        let mut i = index + 1;
        while i < self.skylines.len() {
            if self.skylines[i - 1].left() <= self.skylines[i].left()
                && self.skylines[i].left() < self.skylines[i - 1].right()
            {
                let shrink = self.skylines[i - 1].right() - self.skylines[i].left();
                if self.skylines[i].w <= shrink {
                    self.skylines.remove(i);
                } else {
                    self.skylines[i].x += shrink;
                    self.skylines[i].w -= shrink;
                    break;
                }
            } else {
                break;
            }
        }
    }

    fn merge(&mut self) {
        let mut i = 1;
        while i < self.skylines.len() {
            if self.skylines[i - 1].y == self.skylines[i].y {
                let w = self.skylines[i].w;
                self.skylines[i - 1].w += w;
                self.skylines.remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn pack(&mut self, w: i32, h: i32) -> Option<Rect> {
        let (i, place) = self.find_bottom_left(w, h)?;
        self.split(i, &place);
        self.merge();
        Some(place)
    }
}

/// One placed sprite: its index into the original `sizes` slice, and the
/// inflated slot rectangle it was given on the sheet.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub index: usize,
    pub slot: Rect,
}

/// Packs `sizes` (already inflated by `2*(border+padding)`) into a single
/// `max_width`x`max_height` sheet using a deterministic Skyline Bottom-Left
/// placement order: largest area first, ties broken by original input index.
pub fn pack(sizes: &[(i32, i32)], max_width: i32, max_height: i32) -> Result<Vec<Placement>> {
    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by(|&a, &b| {
        let area_a = sizes[a].0 as i64 * sizes[a].1 as i64;
        let area_b = sizes[b].0 as i64 * sizes[b].1 as i64;
        area_b.cmp(&area_a).then(a.cmp(&b))
    });

    let mut packer = SkylinePacker::new(max_width, max_height);
    let mut placements = Vec::with_capacity(sizes.len());
    for &idx in &order {
        let (w, h) = sizes[idx];
        match packer.pack(w, h) {
            Some(slot) => placements.push(Placement { index: idx, slot }),
            None => {
                return Err(AtlasError::PackFailed {
                    placed: placements.len(),
                    total: sizes.len(),
                    max_width: max_width as u32,
                    max_height: max_height as u32,
                })
            }
        }
    }
    placements.sort_by_key(|p| p.index);
    Ok(placements)
}
