mod adjacency;
mod maxflow;

pub use adjacency::RegionAdjacency;
pub use maxflow::FlowNetwork;
