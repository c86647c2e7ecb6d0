//! # Map Module
//!
//! The layered stage map: encounter nodes, their connections, and the
//! selectable frontier the player advances through.
//!
//! A map is a directed acyclic graph whose nodes are grouped into rows.
//! Connections only ever lead from a row to the row immediately after it.
//! The player starts on row 0 and works towards the boss on the final row,
//! completing one node per step.

pub mod description;

pub use description::*;

use crate::{SpireError, SpireResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Unique identifier of a node within a map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the id the generator assigns to the `index`-th created node.
    ///
    /// # Examples
    ///
    /// ```
    /// use spire::NodeId;
    ///
    /// assert_eq!(NodeId::from_index(3).as_str(), "n3");
    /// ```
    pub fn from_index(index: usize) -> Self {
        Self(format!("n{}", index))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The kind of encounter a node leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Standard battle
    Normal,
    /// Harder battle with better rewards
    Elite,
    /// Merchant
    Shop,
    /// Campfire
    Rest,
    /// Final battle of the map
    Boss,
    /// Unknown event
    Mystery,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Normal,
        NodeKind::Elite,
        NodeKind::Shop,
        NodeKind::Rest,
        NodeKind::Boss,
        NodeKind::Mystery,
    ];

    /// Lower-case name used by the map description format.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Normal => "normal",
            NodeKind::Elite => "elite",
            NodeKind::Shop => "shop",
            NodeKind::Rest => "rest",
            NodeKind::Boss => "boss",
            NodeKind::Mystery => "mystery",
        }
    }

    /// Short label shown on the node.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Normal => "Battle",
            NodeKind::Elite => "Elite",
            NodeKind::Shop => "Shop",
            NodeKind::Rest => "Rest",
            NodeKind::Boss => "Boss",
            NodeKind::Mystery => "?",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = SpireError;

    /// Parses a kind name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SpireError::MalformedMap(format!("unknown node type '{}'", s)))
    }
}

/// Lifecycle state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Not reachable from the current position
    Locked,
    /// Part of the frontier; the player may pick it
    Selectable,
    /// Already visited
    Completed,
}

impl NodeState {
    /// Lower-case name used by the map description format.
    pub fn name(self) -> &'static str {
        match self {
            NodeState::Locked => "locked",
            NodeState::Selectable => "selectable",
            NodeState::Completed => "completed",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeState {
    type Err = SpireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [NodeState::Locked, NodeState::Selectable, NodeState::Completed]
            .into_iter()
            .find(|state| state.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SpireError::MalformedMap(format!("unknown node state '{}'", s)))
    }
}

/// Row/column slot of a node on the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u32,
    pub column: u32,
}

impl GridPosition {
    /// Creates a new grid position.
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// A single encounter node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapNode {
    /// Unique identifier within the map
    pub id: NodeId,
    /// Encounter kind
    pub kind: NodeKind,
    /// Slot on the grid
    pub position: GridPosition,
    /// Lifecycle state
    pub state: NodeState,
    /// Outgoing connections, all into the next row
    pub connections: Vec<NodeId>,
}

impl MapNode {
    /// Creates a locked node with no connections.
    pub fn new(id: NodeId, kind: NodeKind, position: GridPosition) -> Self {
        Self {
            id,
            kind,
            position,
            state: NodeState::Locked,
            connections: Vec::new(),
        }
    }

    /// Row index of this node.
    pub fn row(&self) -> u32 {
        self.position.row
    }

    pub fn is_selectable(&self) -> bool {
        self.state == NodeState::Selectable
    }

    pub fn is_completed(&self) -> bool {
        self.state == NodeState::Completed
    }

    /// Checks whether this node has an outgoing connection to `id`.
    pub fn connects_to(&self, id: &NodeId) -> bool {
        self.connections.contains(id)
    }

    /// Adds an outgoing connection; returns false if it already existed.
    pub fn add_connection(&mut self, id: NodeId) -> bool {
        if self.connections.contains(&id) {
            return false;
        }
        self.connections.push(id);
        true
    }
}

/// Notification emitted whenever the map's state changes.
///
/// The presentation layer consumes these instead of rescanning the map
/// every frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapEvent {
    /// A node was visited
    NodeCompleted { id: NodeId },
    /// A node joined the frontier
    NodeSelectable { id: NodeId },
    /// A node left the frontier without being visited
    NodeLocked { id: NodeId },
    /// The frontier was replaced
    FrontierChanged { frontier: Vec<NodeId> },
}

/// The stage map: nodes, connections and the selectable frontier.
#[derive(Debug, Clone)]
pub struct Map {
    /// Map identifier
    pub id: String,
    /// Current progression row
    pub current_level: u32,
    rows: u32,
    columns: u32,
    nodes: Vec<MapNode>,
    index: HashMap<NodeId, usize>,
    frontier: Vec<NodeId>,
    last_completed: Option<NodeId>,
}

impl Map {
    /// Creates a map with the given dimensions and no nodes.
    pub fn empty(id: impl Into<String>, rows: u32, columns: u32) -> Self {
        Self {
            id: id.into(),
            current_level: 0,
            rows,
            columns,
            nodes: Vec::new(),
            index: HashMap::new(),
            frontier: Vec::new(),
            last_completed: None,
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of nodes on the map.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a node. Fails on duplicate ids or positions outside the grid.
    pub fn insert_node(&mut self, node: MapNode) -> SpireResult<()> {
        if self.index.contains_key(&node.id) {
            return Err(SpireError::MalformedMap(format!(
                "duplicate node id '{}'",
                node.id
            )));
        }
        if node.position.row >= self.rows || node.position.column >= self.columns {
            return Err(SpireError::MalformedMap(format!(
                "node '{}' at ({}, {}) lies outside the {}x{} grid",
                node.id, node.position.row, node.position.column, self.rows, self.columns
            )));
        }

        if node.is_selectable() {
            self.frontier.push(node.id.clone());
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Connects `from` to `to`.
    ///
    /// Both nodes must exist and `to` must sit on the row right after
    /// `from`. Returns false if the connection was already present.
    pub fn connect(&mut self, from: &NodeId, to: &NodeId) -> SpireResult<bool> {
        let from_row = self
            .get_node(from)
            .map(MapNode::row)
            .ok_or_else(|| SpireError::MalformedMap(format!("unknown node id '{}'", from)))?;
        let to_row = self.get_node(to).map(MapNode::row).ok_or_else(|| {
            SpireError::MalformedMap(format!(
                "node '{}' connects to unknown node id '{}'",
                from, to
            ))
        })?;

        if to_row != from_row + 1 {
            return Err(SpireError::MalformedMap(format!(
                "connection '{}' (row {}) -> '{}' (row {}) does not advance exactly one row",
                from, from_row, to, to_row
            )));
        }

        let slot = self.index[from];
        Ok(self.nodes[slot].add_connection(to.clone()))
    }

    /// Looks up a node by id.
    pub fn get_node(&self, id: &NodeId) -> Option<&MapNode> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    fn get_node_mut(&mut self, id: &NodeId) -> Option<&mut MapNode> {
        match self.index.get(id) {
            Some(&slot) => self.nodes.get_mut(slot),
            None => None,
        }
    }

    /// Iterates over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &MapNode> {
        self.nodes.iter()
    }

    /// Ids of the nodes on `row`, ordered by column.
    pub fn row_ids(&self, row: u32) -> Vec<NodeId> {
        let mut row_nodes: Vec<&MapNode> = self.nodes.iter().filter(|n| n.row() == row).collect();
        row_nodes.sort_by_key(|n| n.position.column);
        row_nodes.into_iter().map(|n| n.id.clone()).collect()
    }

    /// Ids of the nodes that connect into `id`.
    pub fn incoming(&self, id: &NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.connects_to(id))
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn has_incoming(&self, id: &NodeId) -> bool {
        self.nodes.iter().any(|n| n.connects_to(id))
    }

    /// Every connection as a `(from, to)` pair.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.nodes
            .iter()
            .flat_map(|n| n.connections.iter().map(move |to| (n.id.clone(), to.clone())))
            .collect()
    }

    /// The current frontier, in the order the nodes became selectable.
    pub fn selectable_nodes(&self) -> &[NodeId] {
        &self.frontier
    }

    pub fn is_selectable(&self, id: &NodeId) -> bool {
        self.frontier.contains(id)
    }

    /// Ids of all completed nodes.
    pub fn completed_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.is_completed())
            .map(|n| n.id.clone())
            .collect()
    }

    /// The most recently completed node, if any.
    pub fn last_completed(&self) -> Option<&NodeId> {
        self.last_completed.as_ref()
    }

    /// Replaces the frontier with `ids`, locking whatever was selectable.
    pub fn set_frontier(&mut self, ids: &[NodeId]) -> SpireResult<Vec<MapEvent>> {
        if let Some(unknown) = ids.iter().find(|id| self.get_node(id).is_none()) {
            return Err(SpireError::InvalidState(format!(
                "cannot make unknown node '{}' selectable",
                unknown
            )));
        }

        let mut events = Vec::new();
        self.lock_frontier(&mut events);
        self.open_frontier(ids.iter().cloned(), &mut events);
        Ok(events)
    }

    /// Selects a frontier node, completing it and advancing the frontier.
    ///
    /// Selecting a node outside the frontier is a no-op: nothing changes
    /// and no events are produced.
    pub fn select(&mut self, id: &NodeId) -> Vec<MapEvent> {
        match self.try_select(id) {
            Ok(events) => events,
            Err(err) => {
                debug!("Ignoring selection: {}", err);
                Vec::new()
            }
        }
    }

    /// Like [`Map::select`], but reports a selection outside the frontier
    /// as [`SpireError::InvalidSelection`].
    pub fn try_select(&mut self, id: &NodeId) -> SpireResult<Vec<MapEvent>> {
        if !self.frontier.contains(id) {
            return Err(SpireError::InvalidSelection(id.clone()));
        }

        let mut events = Vec::new();
        self.frontier.retain(|f| f != id);
        self.lock_frontier(&mut events);

        let (row, connections) = match self.get_node_mut(id) {
            Some(node) => {
                node.state = NodeState::Completed;
                (node.row(), node.connections.clone())
            }
            None => return Err(SpireError::InvalidSelection(id.clone())),
        };
        events.push(MapEvent::NodeCompleted { id: id.clone() });

        self.open_frontier(connections.into_iter(), &mut events);
        self.current_level = row + 1;
        self.last_completed = Some(id.clone());

        debug!(
            "Completed node {} on row {}; frontier is now {:?}",
            id, row, self.frontier
        );
        Ok(events)
    }

    fn lock_frontier(&mut self, events: &mut Vec<MapEvent>) {
        for id in std::mem::take(&mut self.frontier) {
            if let Some(node) = self.get_node_mut(&id) {
                if node.is_selectable() {
                    node.state = NodeState::Locked;
                    events.push(MapEvent::NodeLocked { id });
                }
            }
        }
    }

    fn open_frontier(&mut self, ids: impl Iterator<Item = NodeId>, events: &mut Vec<MapEvent>) {
        for id in ids {
            if self.frontier.contains(&id) {
                continue;
            }
            if let Some(node) = self.get_node_mut(&id) {
                if node.is_completed() {
                    continue;
                }
                node.state = NodeState::Selectable;
                events.push(MapEvent::NodeSelectable { id: id.clone() });
                self.frontier.push(id);
            }
        }
        events.push(MapEvent::FrontierChanged {
            frontier: self.frontier.clone(),
        });
    }

    /// Checks a loaded frontier against the completed nodes and restores
    /// the most recently completed node.
    ///
    /// With nothing completed, only row 0 nodes may be selectable. Otherwise
    /// every selectable node must be a connection of one completed node on
    /// the deepest completed row, and that node becomes the last completed.
    pub(crate) fn restore_progress(&mut self) -> SpireResult<()> {
        let deepest = self
            .nodes
            .iter()
            .filter(|n| n.is_completed())
            .map(MapNode::row)
            .max();

        let deepest = match deepest {
            Some(row) => row,
            None => {
                if let Some(node) = self.frontier_nodes().find(|n| n.row() != 0) {
                    return Err(SpireError::MalformedMap(format!(
                        "node '{}' on row {} is selectable before any node is completed",
                        node.id,
                        node.row()
                    )));
                }
                self.last_completed = None;
                return Ok(());
            }
        };

        let parent = self
            .nodes
            .iter()
            .filter(|n| n.is_completed() && n.row() == deepest)
            .find(|n| self.frontier.iter().all(|id| n.connects_to(id)))
            .map(|n| n.id.clone());

        match parent {
            Some(id) => {
                self.last_completed = Some(id);
                Ok(())
            }
            None => Err(SpireError::MalformedMap(format!(
                "selectable nodes {:?} do not all follow a completed node on row {}",
                self.frontier.iter().map(NodeId::as_str).collect::<Vec<_>>(),
                deepest
            ))),
        }
    }

    fn frontier_nodes(&self) -> impl Iterator<Item = &MapNode> {
        self.frontier.iter().filter_map(|id| self.get_node(id))
    }

    /// Checks the structural invariants of the graph.
    ///
    /// Every connection must target an existing node on the next row, and
    /// every node past row 0 must have at least one incoming connection.
    pub fn validate(&self) -> SpireResult<()> {
        for node in &self.nodes {
            for target in &node.connections {
                let target_node = self.get_node(target).ok_or_else(|| {
                    SpireError::MalformedMap(format!(
                        "node '{}' connects to unknown node id '{}'",
                        node.id, target
                    ))
                })?;
                if target_node.row() != node.row() + 1 {
                    return Err(SpireError::MalformedMap(format!(
                        "connection '{}' (row {}) -> '{}' (row {}) does not advance exactly one row",
                        node.id,
                        node.row(),
                        target,
                        target_node.row()
                    )));
                }
            }
        }

        if let Some(orphan) = self
            .nodes
            .iter()
            .find(|n| n.row() > 0 && !self.has_incoming(&n.id))
        {
            return Err(SpireError::MalformedMap(format!(
                "node '{}' on row {} has no incoming connection",
                orphan.id,
                orphan.row()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Start -> {left, right} -> boss, with the start selectable.
    fn small_map() -> Map {
        let mut map = Map::empty("test", 3, 3);
        let mut start = MapNode::new(NodeId::from("start"), NodeKind::Normal, GridPosition::new(0, 1));
        start.state = NodeState::Selectable;
        map.insert_node(start).unwrap();
        map.insert_node(MapNode::new(NodeId::from("left"), NodeKind::Elite, GridPosition::new(1, 0)))
            .unwrap();
        map.insert_node(MapNode::new(NodeId::from("right"), NodeKind::Rest, GridPosition::new(1, 2)))
            .unwrap();
        map.insert_node(MapNode::new(NodeId::from("boss"), NodeKind::Boss, GridPosition::new(2, 1)))
            .unwrap();

        for (from, to) in [("start", "left"), ("start", "right"), ("left", "boss"), ("right", "boss")] {
            map.connect(&NodeId::from(from), &NodeId::from(to)).unwrap();
        }
        map
    }

    #[test]
    fn test_node_kind_parsing_ignores_case() {
        assert_eq!("Elite".parse::<NodeKind>().unwrap(), NodeKind::Elite);
        assert_eq!("MYSTERY".parse::<NodeKind>().unwrap(), NodeKind::Mystery);
        assert_eq!(" boss ".parse::<NodeKind>().unwrap(), NodeKind::Boss);
        assert!("treasure".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_node_state_parsing() {
        assert_eq!("Selectable".parse::<NodeState>().unwrap(), NodeState::Selectable);
        assert_eq!("completed".parse::<NodeState>().unwrap(), NodeState::Completed);
        assert!("visited".parse::<NodeState>().is_err());
    }

    #[test]
    fn test_node_labels() {
        assert_eq!(NodeKind::Normal.label(), "Battle");
        assert_eq!(NodeKind::Mystery.label(), "?");
    }

    #[test]
    fn test_node_connections_do_not_duplicate() {
        let mut node = MapNode::new(NodeId::from("a"), NodeKind::Normal, GridPosition::new(0, 0));
        assert!(node.add_connection(NodeId::from("b")));
        assert!(!node.add_connection(NodeId::from("b")));
        assert_eq!(node.connections.len(), 1);
    }

    #[test]
    fn test_insert_rejects_duplicates_and_out_of_bounds() {
        let mut map = small_map();
        let dup = MapNode::new(NodeId::from("left"), NodeKind::Normal, GridPosition::new(1, 1));
        assert!(matches!(map.insert_node(dup), Err(SpireError::MalformedMap(_))));

        let outside = MapNode::new(NodeId::from("far"), NodeKind::Normal, GridPosition::new(3, 0));
        assert!(matches!(map.insert_node(outside), Err(SpireError::MalformedMap(_))));
    }

    #[test]
    fn test_connect_requires_next_row() {
        let mut map = small_map();
        let skip = map.connect(&NodeId::from("start"), &NodeId::from("boss"));
        assert!(matches!(skip, Err(SpireError::MalformedMap(_))));

        let backwards = map.connect(&NodeId::from("boss"), &NodeId::from("left"));
        assert!(backwards.is_err());

        let unknown = map.connect(&NodeId::from("start"), &NodeId::from("ghost"));
        assert!(unknown.is_err());

        assert_eq!(map.connect(&NodeId::from("start"), &NodeId::from("left")).unwrap(), false);
    }

    #[test]
    fn test_row_ids_are_column_ordered() {
        let map = small_map();
        assert_eq!(map.row_ids(1), vec![NodeId::from("left"), NodeId::from("right")]);
        assert_eq!(map.row_ids(0), vec![NodeId::from("start")]);
        assert!(map.row_ids(7).is_empty());
    }

    #[test]
    fn test_select_advances_frontier() {
        let mut map = small_map();
        assert_eq!(map.selectable_nodes(), &[NodeId::from("start")]);

        let events = map.select(&NodeId::from("start"));
        assert!(events.contains(&MapEvent::NodeCompleted { id: NodeId::from("start") }));
        assert!(events.contains(&MapEvent::NodeSelectable { id: NodeId::from("left") }));

        let start = map.get_node(&NodeId::from("start")).unwrap();
        assert!(start.is_completed());
        assert_eq!(map.selectable_nodes(), &[NodeId::from("left"), NodeId::from("right")]);
        assert_eq!(map.current_level, 1);
        assert_eq!(map.last_completed(), Some(&NodeId::from("start")));
    }

    #[test]
    fn test_select_locks_siblings() {
        let mut map = small_map();
        map.select(&NodeId::from("start"));
        let events = map.select(&NodeId::from("left"));

        assert_eq!(
            &events[..2],
            &[
                MapEvent::NodeLocked { id: NodeId::from("right") },
                MapEvent::NodeCompleted { id: NodeId::from("left") },
            ]
        );
        assert!(!events.contains(&MapEvent::NodeLocked { id: NodeId::from("left") }));
        let right = map.get_node(&NodeId::from("right")).unwrap();
        assert_eq!(right.state, NodeState::Locked);
        assert_eq!(map.selectable_nodes(), &[NodeId::from("boss")]);
        assert_eq!(map.current_level, 2);
    }

    #[test]
    fn test_select_outside_frontier_is_noop() {
        let mut map = small_map();
        let before_frontier = map.selectable_nodes().to_vec();
        let before_completed = map.completed_nodes();

        assert!(map.select(&NodeId::from("boss")).is_empty());
        assert!(map.select(&NodeId::from("ghost")).is_empty());
        assert!(matches!(
            map.try_select(&NodeId::from("left")),
            Err(SpireError::InvalidSelection(_))
        ));

        assert_eq!(map.selectable_nodes(), before_frontier.as_slice());
        assert_eq!(map.completed_nodes(), before_completed);
    }

    #[test]
    fn test_selecting_completed_node_again_is_noop() {
        let mut map = small_map();
        map.select(&NodeId::from("start"));
        assert!(map.select(&NodeId::from("start")).is_empty());
    }

    #[test]
    fn test_set_frontier() {
        let mut map = small_map();
        let events = map.set_frontier(&[NodeId::from("left")]).unwrap();
        assert!(events.contains(&MapEvent::NodeLocked { id: NodeId::from("start") }));
        assert_eq!(map.selectable_nodes(), &[NodeId::from("left")]);

        assert!(map.set_frontier(&[NodeId::from("ghost")]).is_err());
    }

    #[test]
    fn test_validate_detects_orphans() {
        let mut map = small_map();
        assert!(map.validate().is_ok());

        map.insert_node(MapNode::new(NodeId::from("lonely"), NodeKind::Shop, GridPosition::new(1, 1)))
            .unwrap();
        let err = map.validate().unwrap_err();
        assert!(err.to_string().contains("lonely"));
    }

    #[test]
    fn test_edges_and_incoming() {
        let map = small_map();
        assert_eq!(map.edges().len(), 4);
        assert_eq!(
            map.incoming(&NodeId::from("boss")),
            vec![NodeId::from("left"), NodeId::from("right")]
        );
        assert!(!map.has_incoming(&NodeId::from("start")));
    }
}
