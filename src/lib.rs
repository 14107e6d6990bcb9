//! Planning engine for moving a group through a capacitated,
//! duration-weighted transport network.

pub mod graph;
pub mod io;
pub mod scenarios;
pub mod types;
