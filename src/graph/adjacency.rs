use crate::superpixels::LabelMap;
use std::collections::BTreeSet;

/// Region adjacency over superpixels.
///
/// Node `i` is superpixel `i`; an edge connects two superpixels that
/// share at least one 4-connected pixel boundary (diagonal contact does
/// not count). Symmetric, no self-loops. Neighbor sets are ordered so
/// traversal order is stable between runs.
#[derive(Debug)]
pub struct RegionAdjacency {
    neighbors: Vec<BTreeSet<u32>>,
}

impl RegionAdjacency {
    /// Scan horizontal and vertical pixel pairs once; differing labels
    /// record an undirected edge. O(pixels).
    pub fn from_label_map(map: &LabelMap) -> Self {
        let (width, height) = (map.width(), map.height());
        let mut neighbors = vec![BTreeSet::new(); map.num_superpixels() as usize];

        let mut connect = |a: u32, b: u32| {
            if a != b {
                neighbors[a as usize].insert(b);
                neighbors[b as usize].insert(a);
            }
        };

        for y in 0..height {
            for x in 0..width {
                let here = map.label_at(x, y);
                if x + 1 < width {
                    connect(here, map.label_at(x + 1, y));
                }
                if y + 1 < height {
                    connect(here, map.label_at(x, y + 1));
                }
            }
        }

        Self { neighbors }
    }

    pub fn num_nodes(&self) -> usize {
        self.neighbors.len()
    }

    /// Neighbors of one superpixel, ascending. Empty for isolated
    /// superpixels; callers must tolerate degree-0 nodes.
    pub fn neighbors_of(&self, id: u32) -> &BTreeSet<u32> {
        &self.neighbors[id as usize]
    }
}
