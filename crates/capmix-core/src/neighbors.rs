use crate::error::{CapResult, CapmixError};
use crate::geometry::Site;
use fnv::FnvHashMap;

/// Radius-ball adjacency over a fixed site set. Symmetric by construction
/// and immutable for the lifetime of one optimization run.
#[derive(Debug, Clone)]
pub struct NeighborGraph {
    lists: Vec<Vec<u32>>,
    radius: f32,
}

impl NeighborGraph {
    /// Exact radius query via grid bucketing: with cell size equal to the
    /// radius, every neighbor of a site lives in the surrounding 3x3 block
    /// of cells. Neighbor lists are sorted so traversal order is stable.
    pub fn build(sites: &[Site], radius: f32) -> CapResult<Self> {
        if radius <= 0.0 {
            return Err(CapmixError::InvalidRadius(radius));
        }
        if sites.is_empty() {
            return Err(CapmixError::EmptySiteSet);
        }

        let cell = |v: f32| (v / radius).floor() as i64;
        let mut buckets: FnvHashMap<(i64, i64), Vec<u32>> = FnvHashMap::default();
        for (i, s) in sites.iter().enumerate() {
            buckets
                .entry((cell(s.x), cell(s.y)))
                .or_default()
                .push(i as u32);
        }

        let r2 = radius * radius;
        let mut lists = vec![Vec::new(); sites.len()];
        for (i, s) in sites.iter().enumerate() {
            let (cx, cy) = (cell(s.x), cell(s.y));
            let list = &mut lists[i];
            for gx in cx - 1..=cx + 1 {
                for gy in cy - 1..=cy + 1 {
                    let Some(bucket) = buckets.get(&(gx, gy)) else {
                        continue;
                    };
                    for &j in bucket {
                        if j as usize != i && s.dist2(&sites[j as usize]) <= r2 {
                            list.push(j);
                        }
                    }
                }
            }
            list.sort_unstable();
        }

        Ok(Self { lists, radius })
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    #[inline(always)]
    pub fn neighbors(&self, site: usize) -> &[u32] {
        &self.lists[site]
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Mean neighborhood size; a quick sanity figure logged at startup.
    pub fn mean_degree(&self) -> f32 {
        let total: usize = self.lists.iter().map(Vec::len).sum();
        total as f32 / self.lists.len() as f32
    }
}
