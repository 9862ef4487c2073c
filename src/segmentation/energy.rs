use crate::features::{kl_divergence, HsHistogram};
use crate::graph::RegionAdjacency;
use crate::hints::HintSet;

/// Unary cost for hinted superpixels: high enough that cutting the
/// opposing terminal edge is never worth it for vision-sized graphs.
pub const HINT_CLAMP: f32 = 1000.0;

/// Pairwise weights are `CEILING - divergence`, so similar neighbors
/// (low divergence) get expensive-to-cut edges.
pub const SMOOTHNESS_CEILING: f32 = 20.0;

/// Histogram similarity: lower means more similar. Not required to be
/// symmetric.
pub type HistogramDistance = fn(&HsHistogram, &HsHistogram) -> f32;

/// Per-superpixel data term: the cost of assigning the superpixel to
/// the foreground or the background.
#[derive(Debug, Clone, Copy)]
pub struct UnaryTerm {
    pub cost_fg: f32,
    pub cost_bg: f32,
}

/// Smoothness term for one adjacency edge; `forward` applies to
/// `a -> b`, `backward` to `b -> a`.
#[derive(Debug, Clone, Copy)]
pub struct PairwiseTerm {
    pub a: u32,
    pub b: u32,
    pub forward: f32,
    pub backward: f32,
}

/// Turns a session's graph, histograms and hints into the energy terms
/// the min-cut solver consumes.
pub struct EnergyModel {
    distance: HistogramDistance,
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self {
            distance: kl_divergence,
        }
    }
}

impl EnergyModel {
    pub fn new(distance: HistogramDistance) -> Self {
        Self { distance }
    }

    /// Data terms for every superpixel.
    ///
    /// Hinted superpixels are clamped to their side with [`HINT_CLAMP`]
    /// on the opposing cost; a foreground hint wins over a conflicting
    /// background hint on the same id. Unhinted superpixels pay the
    /// divergence between their appearance and each cumulative pool, so
    /// a superpixel resembling the background pool is cheap to assign
    /// there.
    pub fn unary_terms(
        &self,
        normalized: &[HsHistogram],
        hints: &HintSet,
        cumulative_fg: &HsHistogram,
        cumulative_bg: &HsHistogram,
    ) -> Vec<UnaryTerm> {
        normalized
            .iter()
            .enumerate()
            .map(|(id, histogram)| {
                let id = id as u32;
                if hints.foreground().contains(&id) {
                    UnaryTerm {
                        cost_fg: 0.0,
                        cost_bg: HINT_CLAMP,
                    }
                } else if hints.background().contains(&id) {
                    UnaryTerm {
                        cost_fg: HINT_CLAMP,
                        cost_bg: 0.0,
                    }
                } else {
                    UnaryTerm {
                        cost_fg: (self.distance)(cumulative_fg, histogram),
                        cost_bg: (self.distance)(cumulative_bg, histogram),
                    }
                }
            })
            .collect()
    }

    /// Smoothness terms, one per undirected adjacency edge.
    ///
    /// Weights are floored at zero: the divergence is unbounded above,
    /// and a negative capacity would break the cut formulation. Ids
    /// outside `0..K` in the adjacency data are skipped.
    pub fn pairwise_terms(
        &self,
        adjacency: &RegionAdjacency,
        normalized: &[HsHistogram],
    ) -> Vec<PairwiseTerm> {
        let num_nodes = normalized.len() as u32;
        let mut terms = Vec::new();
        for a in 0..num_nodes {
            for &b in adjacency.neighbors_of(a) {
                if b >= num_nodes {
                    continue;
                }
                // Each undirected edge is emitted once, from its lower id.
                if b < a {
                    continue;
                }
                let ha = &normalized[a as usize];
                let hb = &normalized[b as usize];
                terms.push(PairwiseTerm {
                    a,
                    b,
                    forward: (SMOOTHNESS_CEILING - (self.distance)(ha, hb)).max(0.0),
                    backward: (SMOOTHNESS_CEILING - (self.distance)(hb, ha)).max(0.0),
                });
            }
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{HistogramBins, HsHistogram, HsPlane};
    use crate::superpixels::LabelMap;

    fn histograms(samples: &[(f32, f32)]) -> Vec<HsHistogram> {
        samples
            .iter()
            .map(|&(h, s)| {
                let mut hist = HsHistogram::zeros(HistogramBins::default());
                hist.accumulate(h, s);
                hist.normalized()
            })
            .collect()
    }

    #[test]
    fn hints_clamp_the_unary_costs() {
        let normalized = histograms(&[(10.0, 0.5), (200.0, 0.5), (100.0, 0.5)]);
        let mut hints = HintSet::new();
        hints.set_foreground([0]);
        hints.set_background([1]);
        let pool = normalized[2].clone();

        let model = EnergyModel::default();
        let terms = model.unary_terms(&normalized, &hints, &pool, &pool);

        assert_eq!(terms[0].cost_fg, 0.0);
        assert_eq!(terms[0].cost_bg, HINT_CLAMP);
        assert_eq!(terms[1].cost_fg, HINT_CLAMP);
        assert_eq!(terms[1].cost_bg, 0.0);
        // Unhinted: both costs come from the distance function.
        assert!(terms[2].cost_fg < HINT_CLAMP);
        assert!(terms[2].cost_bg < HINT_CLAMP);
    }

    #[test]
    fn unhinted_cost_tracks_pool_similarity() {
        let normalized = histograms(&[(10.0, 0.5)]);
        let like_fg = normalized[0].clone();
        let unlike = histograms(&[(250.0, 0.9)]).remove(0);

        let model = EnergyModel::default();
        let terms = model.unary_terms(&normalized, &HintSet::new(), &like_fg, &unlike);
        assert!(
            terms[0].cost_fg < terms[0].cost_bg,
            "matching the fg pool must make the fg assignment cheaper"
        );
    }

    #[test]
    fn similar_neighbors_get_heavier_edges() {
        // Three vertical strips: 0 and 1 share a color, 2 differs.
        let labels = LabelMap::new(3, 1, vec![0, 1, 2]).unwrap();
        let adjacency = crate::graph::RegionAdjacency::from_label_map(&labels);
        let normalized = histograms(&[(10.0, 0.5), (10.0, 0.5), (250.0, 0.9)]);

        let model = EnergyModel::default();
        let terms = model.pairwise_terms(&adjacency, &normalized);

        assert_eq!(terms.len(), 2);
        let same = terms.iter().find(|t| (t.a, t.b) == (0, 1)).unwrap();
        let diff = terms.iter().find(|t| (t.a, t.b) == (1, 2)).unwrap();
        assert!(same.forward > diff.forward);
        assert!(same.forward <= SMOOTHNESS_CEILING);
        assert!(diff.forward >= 0.0);
    }

    #[test]
    fn each_edge_appears_once() {
        let plane = HsPlane {
            width: 2,
            height: 2,
            hue: vec![0.0; 4],
            sat: vec![0.5; 4],
        };
        let labels = LabelMap::new(2, 2, vec![0, 1, 0, 1]).unwrap();
        let adjacency = crate::graph::RegionAdjacency::from_label_map(&labels);
        let normalized: Vec<_> = HsHistogram::per_superpixel(
            &plane,
            labels.as_slice(),
            2,
            HistogramBins::default(),
        )
        .iter()
        .map(HsHistogram::normalized)
        .collect();

        let terms = EnergyModel::default().pairwise_terms(&adjacency, &normalized);
        assert_eq!(terms.len(), 1);
        assert_eq!((terms[0].a, terms[0].b), (0, 1));
    }
}
