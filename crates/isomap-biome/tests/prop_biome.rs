use std::collections::HashSet;

use isomap_biome::{BiomeGrid, ColorTable, GRID_SIDE, biome_index};
use isomap_chunk::ChunkPos;
use proptest::prelude::*;

fn in_region() -> impl Strategy<Value = (i32, i32, usize, usize)> {
    (0i32..32, 0i32..32, 0usize..16, 0usize..16)
}

#[test]
fn index_covers_grid_exactly_once() {
    let mut seen = HashSet::with_capacity(GRID_SIDE * GRID_SIDE);
    for cx in 0..32 {
        for cy in 0..32 {
            let pos = ChunkPos::normalize(cx, cy);
            for x in 0..16 {
                for y in 0..16 {
                    let i = biome_index(pos, x, y);
                    assert!(i < GRID_SIDE * GRID_SIDE);
                    assert!(seen.insert(i), "collision at {cx},{cy},{x},{y}");
                }
            }
        }
    }
    assert_eq!(seen.len(), GRID_SIDE * GRID_SIDE);
}

proptest! {
    // distinct (chunk, x, y) never collide
    #[test]
    fn index_is_injective(a in in_region(), b in in_region()) {
        prop_assume!(a != b);
        let ia = biome_index(ChunkPos::normalize(a.0, a.1), a.2, a.3);
        let ib = biome_index(ChunkPos::normalize(b.0, b.1), b.2, b.3);
        prop_assert_ne!(ia, ib);
    }

    // raw world chunk coordinates land in the same slot as their in-region position
    #[test]
    fn index_depends_only_on_region_position(cx in any::<i32>(), cy in any::<i32>(), x in 0usize..16, y in 0usize..16) {
        let pos = ChunkPos::normalize(cx, cy);
        let wrapped = ChunkPos::normalize(cx.wrapping_add(32), cy.wrapping_sub(32));
        prop_assert!(biome_index(pos, x, y) < GRID_SIDE * GRID_SIDE);
        prop_assert_eq!(biome_index(pos, x, y), biome_index(wrapped, x, y));
    }

    // color lookups hit exactly the table's range
    #[test]
    fn color_table_bounds(len in 0usize..600, index in 0usize..1200) {
        let table = ColorTable::new((0..len).map(|i| [i as u8, (i >> 8) as u8, 0]).collect());
        prop_assert_eq!(table.get(index).is_some(), index < len);
    }
}

proptest! {
    // each case builds a full 512x512 grid
    #![proptest_config(ProptestConfig::with_cases(16))]

    // grid reads return what from_fn wrote at (row, col)
    #[test]
    fn grid_reads_back_writer(seed in any::<u16>(), (cx, cy, x, y) in in_region()) {
        let grid = BiomeGrid::from_fn(|row, col| seed.wrapping_add((row * 7 + col) as u16));
        let pos = ChunkPos::normalize(cx, cy);
        let row = pos.y * 16 + y;
        let col = pos.x * 16 + x;
        prop_assert_eq!(grid.at(pos, x, y), Some(seed.wrapping_add((row * 7 + col) as u16)));
    }
}
