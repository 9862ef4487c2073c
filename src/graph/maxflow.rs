use std::collections::VecDeque;

// Arcs are stored in pairs: arc `i ^ 1` is the reverse of arc `i`, and
// augmenting along one side returns capacity to the other. Keeping the
// pairing implicit in the index avoids a parallel lookup table.
#[derive(Debug)]
struct Arc {
    to: u32,
    cap: f32,
}

/// An s-t flow network over superpixel nodes.
///
/// Nodes `0..num_nodes` are superpixels; two extra terminal nodes (the
/// source and the sink) are appended internally. Unary energies become
/// terminal arc capacities, pairwise energies become arc pairs between
/// superpixel nodes. The network is consumed by one [`FlowNetwork::max_flow`]
/// run and the residual state afterwards encodes the minimum cut.
#[derive(Debug)]
pub struct FlowNetwork {
    adjacency: Vec<Vec<u32>>,
    arcs: Vec<Arc>,
    source: u32,
    sink: u32,
}

impl FlowNetwork {
    /// A network with `num_nodes` superpixel nodes and fresh terminals.
    pub fn with_nodes(num_nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_nodes + 2],
            arcs: Vec::with_capacity(num_nodes * 6),
            source: num_nodes as u32,
            sink: num_nodes as u32 + 1,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len() - 2
    }

    fn push_arc_pair(&mut self, from: u32, to: u32, cap: f32, reverse_cap: f32) {
        let index = self.arcs.len() as u32;
        self.arcs.push(Arc { to, cap });
        self.arcs.push(Arc { to: from, cap: reverse_cap });
        self.adjacency[from as usize].push(index);
        self.adjacency[to as usize].push(index + 1);
    }

    /// Connect two superpixel nodes with directed capacities, one per
    /// direction. Capacities must be non-negative.
    pub fn add_edge(&mut self, a: u32, b: u32, cap_forward: f32, cap_backward: f32) {
        debug_assert!(cap_forward >= 0.0 && cap_backward >= 0.0);
        self.push_arc_pair(a, b, cap_forward, cap_backward);
    }

    /// Connect one superpixel node to both terminals: `cap_source` on
    /// the source-side arc, `cap_sink` on the sink-side arc.
    pub fn add_terminal_capacities(&mut self, node: u32, cap_source: f32, cap_sink: f32) {
        debug_assert!(cap_source >= 0.0 && cap_sink >= 0.0);
        self.push_arc_pair(self.source, node, cap_source, 0.0);
        self.push_arc_pair(node, self.sink, cap_sink, 0.0);
    }

    /// Compute the maximum source-to-sink flow by repeated breadth-first
    /// augmentation.
    ///
    /// Each round finds the shortest residual path from source to sink,
    /// then pushes the path's bottleneck capacity along it, saturating
    /// at least one arc. Terminates when the sink is unreachable in the
    /// residual graph; guaranteed for a finite network with non-negative
    /// capacities. Returns the total flow value.
    pub fn max_flow(&mut self) -> f32 {
        let mut total = 0.0;
        let mut parent_arc: Vec<Option<u32>> = vec![None; self.adjacency.len()];

        loop {
            // Shortest augmenting path, by arc count.
            parent_arc.iter_mut().for_each(|p| *p = None);
            let mut queue = VecDeque::new();
            queue.push_back(self.source);
            'bfs: while let Some(node) = queue.pop_front() {
                for &arc_index in &self.adjacency[node as usize] {
                    let arc = &self.arcs[arc_index as usize];
                    if arc.cap > 0.0 && parent_arc[arc.to as usize].is_none() && arc.to != self.source
                    {
                        parent_arc[arc.to as usize] = Some(arc_index);
                        if arc.to == self.sink {
                            break 'bfs;
                        }
                        queue.push_back(arc.to);
                    }
                }
            }

            if parent_arc[self.sink as usize].is_none() {
                break;
            }

            // Bottleneck along the path.
            let mut bottleneck = f32::INFINITY;
            let mut node = self.sink;
            while node != self.source {
                let arc_index = parent_arc[node as usize].unwrap() as usize;
                bottleneck = bottleneck.min(self.arcs[arc_index].cap);
                node = self.arcs[arc_index ^ 1].to;
            }

            // Augment: drain the forward arcs, refill the reverses.
            let mut node = self.sink;
            while node != self.source {
                let arc_index = parent_arc[node as usize].unwrap() as usize;
                self.arcs[arc_index].cap -= bottleneck;
                self.arcs[arc_index ^ 1].cap += bottleneck;
                node = self.arcs[arc_index ^ 1].to;
            }

            total += bottleneck;
        }

        total
    }

    /// Minimum-cut partition after [`FlowNetwork::max_flow`]: `true` for
    /// superpixel nodes in the sink segment, i.e. nodes no longer
    /// reachable from the source in the residual graph.
    pub fn sink_segment(&self) -> Vec<bool> {
        let mut reachable = vec![false; self.adjacency.len()];
        reachable[self.source as usize] = true;
        let mut queue = VecDeque::from([self.source]);
        while let Some(node) = queue.pop_front() {
            for &arc_index in &self.adjacency[node as usize] {
                let arc = &self.arcs[arc_index as usize];
                if arc.cap > 0.0 && !reachable[arc.to as usize] {
                    reachable[arc.to as usize] = true;
                    queue.push_back(arc.to);
                }
            }
        }
        reachable[..self.num_nodes()]
            .iter()
            .map(|&r| !r)
            .collect()
    }
}
