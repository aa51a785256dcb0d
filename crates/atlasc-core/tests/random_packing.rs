//! Property-style random-rect packing test: a large batch of randomly sized
//! rects must pack into a bounded sheet with no overlaps and every placement
//! inside the sheet bounds.

use atlasc_core::packer;
use rand::{Rng, SeedableRng};

#[test]
fn random_rects_pack_without_overlap_or_out_of_bounds() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
    let sizes: Vec<(i32, i32)> = (0..200)
        .map(|_| (rng.gen_range(1..=48), rng.gen_range(1..=48)))
        .collect();

    let placements = packer::pack(&sizes, 1024, 1024).expect("200 small rects must fit in 1024x1024");
    assert_eq!(placements.len(), sizes.len());

    for i in 0..placements.len() {
        let a = placements[i].slot;
        assert!(a.x >= 0 && a.y >= 0);
        assert!(a.right() <= 1024 && a.bottom() <= 1024);
        for j in (i + 1)..placements.len() {
            let b = placements[j].slot;
            assert!(!a.intersects(&b), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn random_rects_preserve_original_index_order_in_output() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let sizes: Vec<(i32, i32)> = (0..50)
        .map(|_| (rng.gen_range(4..=32), rng.gen_range(4..=32)))
        .collect();
    let placements = packer::pack(&sizes, 512, 512).expect("50 small rects must fit in 512x512");
    let indices: Vec<usize> = placements.iter().map(|p| p.index).collect();
    assert_eq!(indices, (0..50).collect::<Vec<_>>());
}
