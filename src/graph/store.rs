//! JSON persistence for process graphs.
//!
//! The file format is the editor's wire format: `{"version": 1, "nodes": [...]}`.
//! Files written before the version field existed load as version 1.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::ProcessGraph;
use crate::model::{IdSource, Node};
use crate::{flog, flog_debug, Result};

const GRAPH_VERSION: u32 = 1;

fn default_version() -> u32 {
    GRAPH_VERSION
}

#[derive(Serialize)]
struct GraphFileRef<'a> {
    version: u32,
    nodes: &'a [Node],
}

#[derive(Deserialize)]
struct GraphFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    nodes: Vec<Node>,
}

impl ProcessGraph {
    pub fn to_json(&self) -> Result<String> {
        let file = GraphFileRef {
            version: GRAPH_VERSION,
            nodes: self.nodes(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn from_json(contents: &str, ids: Box<dyn IdSource>) -> Result<Self> {
        let file: GraphFile = serde_json::from_str(contents)?;
        flog_debug!(
            "ProcessGraph::from_json version={} nodes={}",
            file.version,
            file.nodes.len()
        );
        Self::from_nodes(file.nodes, ids)
    }

    pub fn load(path: &Path, ids: Box<dyn IdSource>) -> Result<Self> {
        flog_debug!("ProcessGraph::load path={}", path.display());
        let graph = Self::from_json(&fs::read_to_string(path)?, ids)?;
        flog!("Loaded {} nodes from {}", graph.len(), path.display());
        Ok(graph)
    }

    /// Write the graph, keeping the previous file as `<name>.json.bak`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_json()?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                flog_debug!("Creating graph directory: {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }

        if path.exists() {
            let backup_path = path.with_extension("json.bak");
            flog_debug!("Creating graph backup: {}", backup_path.display());
            fs::copy(path, &backup_path)?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &contents)?;
        fs::rename(&temp_path, path)?;
        flog_debug!("Graph saved: {}", path.display());
        Ok(())
    }
}
