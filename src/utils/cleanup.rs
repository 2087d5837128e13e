use crate::math::{Point, Real};

/// Removes the vertices not referenced by any triangle and remaps the indices.
///
/// Unlike a swap-remove compaction, the relative order of the kept vertices is
/// preserved.
pub fn remove_unused_points(points: &mut Vec<Point<Real>>, idx: &mut [[u32; 3]]) {
    let mut used = vec![false; points.len()];

    for tri in idx.iter() {
        for &i in tri {
            used[i as usize] = true;
        }
    }

    let mut remap = vec![u32::MAX; points.len()];
    let mut kept = 0;

    for i in 0..points.len() {
        if used[i] {
            points[kept] = points[i];
            remap[i] = kept as u32;
            kept += 1;
        }
    }

    points.truncate(kept);

    for tri in idx.iter_mut() {
        for i in tri.iter_mut() {
            *i = remap[*i as usize];
        }
    }
}
