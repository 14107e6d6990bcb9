pub mod edge;
pub mod error;
pub mod network;

pub use edge::Edge;
pub use edge::NodeLabel;
pub use error::QueryError;
pub use network::Network;
