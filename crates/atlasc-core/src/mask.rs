//! Mask builder — RGBA -> alpha -> thresholded binary -> dilated mask.

use image::RgbaImage;

/// Single-channel binary mask: `true` for opaque, stored row-major, `w*h` long.
#[derive(Debug, Clone)]
pub struct Mask {
    pub w: u32,
    pub h: u32,
    bits: Vec<bool>,
}

impl Mask {
    fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            bits: vec![false; (w as usize) * (h as usize)],
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            false
        } else {
            self.bits[y as usize * self.w as usize + x as usize]
        }
    }

    #[inline]
    fn set(&mut self, x: u32, y: u32, v: bool) {
        self.bits[y as usize * self.w as usize + x as usize] = v;
    }

    pub fn is_empty_mask(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }
}

/// Builds the thresholded (undilated) opacity mask: pixel set iff
/// `alpha(x,y) >= alpha_threshold`.
pub fn build_threshold_mask(rgba: &RgbaImage, alpha_threshold: u8) -> Mask {
    let (w, h) = rgba.dimensions();
    let mut mask = Mask::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let a = rgba.get_pixel(x, y)[3];
            if a >= alpha_threshold {
                mask.set(x, y, true);
            }
        }
    }
    mask
}

/// Dilates `mask` by one 3x3-neighborhood pass: pixel is set iff it or any of
/// its 8 neighbors is set in the source mask. Out-of-bounds neighbors count
/// as unset.
pub fn dilate(mask: &Mask) -> Mask {
    let (w, h) = (mask.w, mask.h);
    let mut out = Mask::new(w, h);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let mut set = false;
            'nbrs: for dy in -1..=1 {
                for dx in -1..=1 {
                    if mask.get(x + dx, y + dy) {
                        set = true;
                        break 'nbrs;
                    }
                }
            }
            if set {
                out.set(x as u32, y as u32, true);
            }
        }
    }
    out
}

/// Builds the dilated mask used for outline extraction directly from an RGBA
/// buffer: threshold, then one dilation pass.
pub fn build_dilated_mask(rgba: &RgbaImage, alpha_threshold: u8) -> Mask {
    let thresholded = build_threshold_mask(rgba, alpha_threshold);
    dilate(&thresholded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, alpha: u8) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, alpha]))
    }

    #[test]
    fn threshold_respects_boundary() {
        let img = solid(4, 4, 10);
        let mask = build_threshold_mask(&img, 20);
        assert!(mask.is_empty_mask());
        let mask2 = build_threshold_mask(&img, 10);
        assert!(!mask2.is_empty_mask());
    }

    #[test]
    fn alpha_threshold_zero_is_always_opaque() {
        let img = solid(3, 3, 0);
        let mask = build_threshold_mask(&img, 0);
        assert!(!mask.is_empty_mask());
        for y in 0..3 {
            for x in 0..3 {
                assert!(mask.get(x, y));
            }
        }
    }

    #[test]
    fn dilate_grows_single_pixel_into_3x3() {
        let mut img = RgbaImage::from_pixel(5, 5, Rgba([0, 0, 0, 0]));
        img.put_pixel(2, 2, Rgba([255, 255, 255, 255]));
        let thresh = build_threshold_mask(&img, 128);
        assert_eq!(thresh.bits.iter().filter(|&&b| b).count(), 1);
        let dilated = dilate(&thresh);
        for y in 1..=3 {
            for x in 1..=3 {
                assert!(dilated.get(x, y), "expected ({x},{y}) set after dilation");
            }
        }
        assert!(!dilated.get(0, 0));
        assert!(!dilated.get(4, 4));
    }

    #[test]
    fn dilate_is_zero_padded_at_borders() {
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 0]));
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        let thresh = build_threshold_mask(&img, 128);
        let dilated = dilate(&thresh);
        assert!(dilated.get(0, 0));
        assert!(dilated.get(1, 0));
        assert!(dilated.get(0, 1));
        assert!(dilated.get(1, 1));
        assert!(!dilated.get(2, 2));
    }
}
