//! Process graphs: owned node collections with predecessor checks and
//! JSON persistence.

mod process_graph;
mod store;

pub use process_graph::ProcessGraph;
