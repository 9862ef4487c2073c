use super::energy::EnergyModel;
use crate::features::HsHistogram;
use crate::graph::FlowNetwork;
use crate::session::{ImageSession, SuperpixelLabels};

/// Binary foreground/background labeling of one image by a minimum cut.
///
/// The energy terms become a flow network: unary costs are terminal
/// capacities, pairwise costs are arc pairs between neighbors. Under
/// the non-negative symmetric weights produced by the energy model the
/// labeling that minimizes total energy is exactly the minimum s-t cut,
/// and after max-flow the sink segment is the foreground.
pub struct GraphCutSegmenter {
    energy: EnergyModel,
}

impl Default for GraphCutSegmenter {
    fn default() -> Self {
        Self {
            energy: EnergyModel::default(),
        }
    }
}

impl GraphCutSegmenter {
    pub fn new(energy: EnergyModel) -> Self {
        Self { energy }
    }

    /// Cut one image against the shared cumulative histograms.
    pub fn segment(
        &self,
        session: &ImageSession,
        cumulative_fg: &HsHistogram,
        cumulative_bg: &HsHistogram,
    ) -> SuperpixelLabels {
        let _span = tracing::debug_span!("graph_cut", path = %session.path.display()).entered();

        let unary = self.energy.unary_terms(
            &session.normalized,
            &session.hints,
            cumulative_fg,
            cumulative_bg,
        );
        let pairwise = self.energy.pairwise_terms(&session.adjacency, &session.normalized);

        let mut network = FlowNetwork::with_nodes(unary.len());
        for (id, term) in unary.iter().enumerate() {
            network.add_terminal_capacities(id as u32, term.cost_fg, term.cost_bg);
        }
        for term in &pairwise {
            network.add_edge(term.a, term.b, term.forward, term.backward);
        }

        let flow = network.max_flow();
        tracing::debug!(
            superpixels = unary.len(),
            edges = pairwise.len(),
            flow,
            "Cut {}",
            session.path.display()
        );

        SuperpixelLabels(network.sink_segment())
    }
}
