//! Compositor — blits each sprite's trimmed source pixels into the final
//! sheet. No rotation, extrusion, or debug outlines.

use image::RgbaImage;

use crate::model::Rect;

/// Copies the `sprite_rect` sub-rectangle of `src` into `canvas` at
/// `dest_origin`, row by row. `dest_rect`'s width/height must equal
/// `sprite_rect`'s — the caller is responsible for contracting the sheet
/// slot inward by `padding` before calling this.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, sprite_rect: &Rect, dest_origin: (u32, u32)) {
    let (dx, dy) = dest_origin;
    let (cw, ch) = canvas.dimensions();
    for row in 0..sprite_rect.h as u32 {
        let sy = sprite_rect.y as u32 + row;
        let ty = dy + row;
        if ty >= ch {
            continue;
        }
        for col in 0..sprite_rect.w as u32 {
            let sx = sprite_rect.x as u32 + col;
            let tx = dx + col;
            if tx >= cw {
                continue;
            }
            let px = *src.get_pixel(sx, sy);
            canvas.put_pixel(tx, ty, px);
        }
    }
}
