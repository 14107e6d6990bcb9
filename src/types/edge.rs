/// Label of a stop in the transport network. Datasets use a dense,
/// 1-based label space: `1..=N`, with `1` the conventional source and
/// `N` the conventional sink.
pub type NodeLabel = u32;

/// A connection between two stops: at most `capacity` people can use it
/// at once and crossing it takes `duration` time units.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct Edge {
    pub from: NodeLabel,
    pub to: NodeLabel,
    pub capacity: u32,
    pub duration: u32,
}
