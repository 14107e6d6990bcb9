//! Path, flow and scheduling queries over a transport [`Network`].
//!
//! All queries take explicit source and sink labels and leave the network
//! untouched: traversal bookkeeping lives in per-call side tables and the
//! max-flow engine works on its own residual copy, so concurrent read-only
//! queries against the same network are safe.
//!
//! [`Network`]: crate::types::Network

mod augmenting_path;
mod bfs;
mod flow;
mod residual;
mod schedule;
mod test;
mod widest_path;

pub use crate::graph::flow::feasible_flow;
pub use crate::graph::flow::flow_to_dot;
pub use crate::graph::flow::max_flow;
pub use crate::graph::flow::AugmentingPath;
pub use crate::graph::flow::FlowResult;
pub use crate::graph::flow::FlowTarget;
pub use crate::graph::schedule::critical_path;
pub use crate::graph::schedule::Schedule;
pub use crate::graph::widest_path::min_hop_path;
pub use crate::graph::widest_path::widest_path;
