//! Linking disconnected regions into a single component.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use grid::{Area, Distance, GridError, Result, SettableGridView};

use crate::selector::PointSelector;
use crate::tunnel::TunnelCarver;

/// Disjoint-set forest over area indices.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut index: usize) -> usize {
        while self.parent[index] != index {
            // Path halving keeps the forest shallow.
            self.parent[index] = self.parent[self.parent[index]];
            index = self.parent[index];
        }
        index
    }

    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        self.parent[rb] = ra;
        true
    }
}

/// Repeatedly tunnels each area to its nearest area in a different set
/// (by bounding-rectangle centers) until everything shares one set.
///
/// Convergence usually takes one or two passes; every pass is O(n^2)
/// distance computations.
pub fn connect_areas_closest<G, R>(
    grid: &mut G,
    areas: &[Area],
    selector: &PointSelector,
    carver: &TunnelCarver,
    distance: Distance,
    rng: &mut R,
) -> Result<()>
where
    G: SettableGridView<Item = bool>,
    R: Rng + ?Sized,
{
    if areas.len() < 2 {
        return Ok(());
    }

    let centers: Vec<_> = areas.iter().map(|area| area.bounds().center()).collect();
    let mut sets = DisjointSet::new(areas.len());
    let mut remaining = areas.len();
    let mut pass = 0usize;

    while remaining > 1 {
        pass += 1;
        for i in 0..areas.len() {
            let root = sets.find(i);
            let mut nearest: Option<(usize, f64)> = None;
            for j in 0..areas.len() {
                if sets.find(j) == root {
                    continue;
                }
                let d = distance.calculate(centers[i], centers[j]);
                if nearest.map_or(true, |(_, nd)| d < nd) {
                    nearest = Some((j, d));
                }
            }
            let Some((j, _)) = nearest else {
                continue;
            };

            let (from, to) = selector.select(&areas[i], &areas[j], rng)?;
            carver.carve(grid, from, to, rng)?;
            if sets.union(i, j) {
                remaining -= 1;
            }
        }
        debug!(pass, remaining, "closest-area connection pass");
    }
    Ok(())
}

/// Tunnels consecutive areas into a linear spine, in the caller's order or
/// a shuffled one. Not minimum-cost.
pub fn connect_areas_ordered<G, R>(
    grid: &mut G,
    areas: &[Area],
    selector: &PointSelector,
    carver: &TunnelCarver,
    rng: &mut R,
    shuffle: bool,
) -> Result<()>
where
    G: SettableGridView<Item = bool>,
    R: Rng + ?Sized,
{
    let mut order: Vec<usize> = (0..areas.len()).collect();
    if shuffle {
        order.shuffle(rng);
    }

    for pair in order.windows(2) {
        let (a, b) = (&areas[pair[0]], &areas[pair[1]]);
        if a.is_empty() || b.is_empty() {
            return Err(GridError::EmptyArea);
        }
        let (from, to) = selector.select(a, b, rng)?;
        carver.carve(grid, from, to, rng)?;
    }
    debug!(areas = areas.len(), shuffle, "ordered connection complete");
    Ok(())
}
