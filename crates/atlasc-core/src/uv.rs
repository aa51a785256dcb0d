//! UV resolver — maps per-sprite mesh vertex positions (source coordinates)
//! into sheet coordinates.

use crate::model::{Point, Rect};

/// `uv = (p - sprite_rect.min) + sheet_rect.min`, with `sheet_rect` already
/// the content-sized placement rect — the packer reserves the padding band
/// as headroom when it inflates each slot, so a vertex nudged slightly
/// outside `sprite_rect` by outline correction still lands inside the
/// sheet's padding band without an extra additive term here (see DESIGN.md
/// for the reasoning behind folding padding into the slot inset instead of
/// adding it again at UV-resolution time). Empty `positions` yields empty
/// `uvs`.
pub fn resolve_uvs(positions: &[Point], sprite_rect: &Rect, sheet_rect: &Rect) -> Vec<Point> {
    positions
        .iter()
        .map(|p| {
            Point::new(
                p.x - sprite_rect.x + sheet_rect.x,
                p.y - sprite_rect.y + sheet_rect.y,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_positions_yield_empty_uvs() {
        let sprite = Rect::new(5, 5, 10, 10);
        let sheet = Rect::new(2, 2, 10, 10);
        assert!(resolve_uvs(&[], &sprite, &sheet).is_empty());
    }

    #[test]
    fn offsets_positions_by_sheet_placement() {
        let sprite = Rect::new(10, 20, 8, 8);
        let sheet = Rect::new(3, 3, 8, 8);
        let positions = vec![Point::new(10, 20), Point::new(17, 27)];
        let uvs = resolve_uvs(&positions, &sprite, &sheet);
        assert_eq!(uvs, vec![Point::new(3, 3), Point::new(10, 10)]);
    }
}
