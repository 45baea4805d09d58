//! Occlusion culling for the fixed isometric view.
//!
//! The camera sees a voxel through three neighbors: the one at `x - 1`, the one
//! at `y + 1`, and the one above at `z + 1`. When all three are opaque nothing
//! of the voxel can reach the image. Neighbors outside the chunk are unknown,
//! so voxels on those three chunk faces are always drawn.

use isomap_blocks::BlockTable;

use super::{CHUNK_SIZE_Y, CHUNK_SIZE_Z, ChunkBuf};

#[inline]
pub fn is_occluded(buf: &ChunkBuf, table: &BlockTable, x: usize, y: usize, z: usize) -> bool {
    x != 0
        && y != CHUNK_SIZE_Y - 1
        && z != CHUNK_SIZE_Z - 1
        && table.is_opaque(buf.get_local(x - 1, y, z))
        && table.is_opaque(buf.get_local(x, y, z + 1))
        && table.is_opaque(buf.get_local(x, y + 1, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChunkCoord;
    use isomap_blocks::types::ids;

    fn solid() -> ChunkBuf {
        ChunkBuf::from_fn(ChunkCoord::default(), |_, _, _| ids::STONE)
    }

    #[test]
    fn interior_of_solid_chunk_is_occluded() {
        let buf = solid();
        let table = BlockTable::classic();
        assert!(is_occluded(&buf, &table, 5, 5, 5));
    }

    #[test]
    fn each_transparent_neighbor_reveals_voxel() {
        let table = BlockTable::classic();
        for (nx, ny, nz) in [(4, 5, 5), (5, 5, 6), (5, 6, 5)] {
            let mut buf = solid();
            buf.set_local(nx, ny, nz, ids::LEAVES);
            assert!(!is_occluded(&buf, &table, 5, 5, 5), "neighbor {nx},{ny},{nz}");
        }
    }

    #[test]
    fn hidden_neighbors_do_not_matter() {
        // x + 1, y - 1, z - 1 face away from the camera
        let mut buf = solid();
        buf.set_local(6, 5, 5, ids::AIR);
        buf.set_local(5, 4, 5, ids::AIR);
        buf.set_local(5, 5, 4, ids::AIR);
        assert!(is_occluded(&buf, &BlockTable::classic(), 5, 5, 5));
    }

    #[test]
    fn boundary_voxels_are_never_occluded() {
        let buf = solid();
        let table = BlockTable::classic();
        assert!(!is_occluded(&buf, &table, 0, 5, 5));
        assert!(!is_occluded(&buf, &table, 5, 15, 5));
        assert!(!is_occluded(&buf, &table, 5, 5, 127));
        // the opposite faces are interior for culling purposes
        assert!(is_occluded(&buf, &table, 15, 0, 0));
    }
}
