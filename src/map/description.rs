//! # Map Descriptions
//!
//! The external, JSON-encoded layout of a map, and conversion between a
//! description and a validated [`Map`].
//!
//! ```json
//! {
//!   "map_id": "act1",
//!   "current_level": 0,
//!   "rows": 2,
//!   "columns": 3,
//!   "nodes": [
//!     { "id": "a", "type": "normal", "position": { "row": 0, "column": 1 },
//!       "connections": ["b"], "state": "selectable" },
//!     { "id": "b", "type": "Boss", "position": { "row": 1, "column": 1 },
//!       "connections": [], "state": "locked" }
//!   ]
//! }
//! ```

use super::{GridPosition, Map, MapNode, NodeId, NodeKind, NodeState};
use crate::{SpireError, SpireResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Top-level map description document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDescription {
    pub map_id: String,
    pub current_level: u32,
    pub rows: u32,
    pub columns: u32,
    pub nodes: Vec<NodeDescription>,
}

/// One node of a map description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescription {
    pub id: String,
    /// Kind name, case-insensitive
    #[serde(rename = "type")]
    pub kind: String,
    pub position: GridPosition,
    pub connections: Vec<String>,
    /// State name, case-insensitive
    pub state: String,
}

impl MapDescription {
    /// Parses a description from JSON text.
    ///
    /// Missing or mistyped fields are reported as
    /// [`SpireError::MalformedMap`].
    pub fn from_json(json: &str) -> SpireResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SpireError::MalformedMap(format!("invalid map description: {}", e)))
    }

    /// Reads and parses a description file.
    pub fn from_path(path: impl AsRef<Path>) -> SpireResult<Self> {
        let path = path.as_ref();
        debug!("Reading map description from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the description as pretty-printed JSON.
    pub fn to_json(&self) -> SpireResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set of `(from, to)` connection pairs.
    pub fn connection_set(&self) -> HashSet<(String, String)> {
        self.nodes
            .iter()
            .flat_map(|n| n.connections.iter().map(move |to| (n.id.clone(), to.clone())))
            .collect()
    }
}

impl Map {
    /// Builds a map from a description, validating it along the way.
    ///
    /// Fails with [`SpireError::MalformedMap`] when an id is duplicated, a
    /// position is off the grid, a kind or state is unknown, a connection
    /// targets an unknown id or does not lead to the next row, or a node past
    /// row 0 has no incoming connection. The selectable nodes must be the
    /// start row when nothing is completed, and otherwise connections of the
    /// deepest completed node.
    ///
    /// # Examples
    ///
    /// ```
    /// use spire::{Map, MapDescription};
    ///
    /// let json = r#"{
    ///     "map_id": "tiny", "current_level": 0, "rows": 2, "columns": 1,
    ///     "nodes": [
    ///         {"id": "a", "type": "Normal", "position": {"row": 0, "column": 0},
    ///          "connections": ["b"], "state": "selectable"},
    ///         {"id": "b", "type": "boss", "position": {"row": 1, "column": 0},
    ///          "connections": [], "state": "locked"}
    ///     ]
    /// }"#;
    /// let map = Map::load(&MapDescription::from_json(json).unwrap()).unwrap();
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.selectable_nodes().len(), 1);
    /// ```
    pub fn load(description: &MapDescription) -> SpireResult<Map> {
        if description.rows == 0 || description.columns == 0 {
            return Err(SpireError::MalformedMap(format!(
                "map '{}' has an empty {}x{} grid",
                description.map_id, description.rows, description.columns
            )));
        }
        if description.current_level > description.rows {
            return Err(SpireError::MalformedMap(format!(
                "current level {} exceeds the map's {} rows",
                description.current_level, description.rows
            )));
        }

        let mut map = Map::empty(
            description.map_id.clone(),
            description.rows,
            description.columns,
        );
        map.current_level = description.current_level;

        for node in &description.nodes {
            let mut map_node = MapNode::new(
                NodeId::new(node.id.clone()),
                node.kind.parse::<NodeKind>()?,
                node.position,
            );
            map_node.state = node.state.parse::<NodeState>()?;
            map.insert_node(map_node)?;
        }

        for node in &description.nodes {
            let from = NodeId::new(node.id.clone());
            for target in &node.connections {
                if !map.connect(&from, &NodeId::new(target.clone()))? {
                    return Err(SpireError::MalformedMap(format!(
                        "node '{}' lists connection '{}' more than once",
                        node.id, target
                    )));
                }
            }
        }

        map.validate()?;
        map.restore_progress()?;

        info!(
            "Loaded map '{}' with {} nodes over {} rows",
            map.id,
            map.len(),
            map.rows()
        );
        Ok(map)
    }

    /// Parses JSON text straight into a validated map.
    pub fn from_json(json: &str) -> SpireResult<Map> {
        Map::load(&MapDescription::from_json(json)?)
    }

    /// Describes this map in the external format.
    pub fn to_description(&self) -> MapDescription {
        MapDescription {
            map_id: self.id.clone(),
            current_level: self.current_level,
            rows: self.rows(),
            columns: self.columns(),
            nodes: self
                .nodes()
                .map(|n| NodeDescription {
                    id: n.id.to_string(),
                    kind: n.kind.name().to_string(),
                    position: n.position,
                    connections: n.connections.iter().map(NodeId::to_string).collect(),
                    state: n.state.name().to_string(),
                })
                .collect(),
        }
    }
}
