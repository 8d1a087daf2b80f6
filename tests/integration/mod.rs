//! Integration test suite for flowdesk.
//!
//! These tests drive the public API the way the process editor does:
//! creating nodes, editing their data, describing them and storing graphs.
//!
//! # Test Categories
//!
//! - `node_factory`: Per-type defaults and id generation
//! - `descriptions`: Trigger and deadline summaries
//! - `deadlines`: Deadline equality laws
//! - `persistence`: JSON wire format and graph files

mod fixtures;

mod deadlines;
mod descriptions;
mod node_factory;
mod persistence;
