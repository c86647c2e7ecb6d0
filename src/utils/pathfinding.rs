//! # Graph Reachability
//!
//! Reachability queries over the stage map, backed by the `pathfinding` crate.

use crate::map::{Map, NodeId};
use ::pathfinding::directed::bfs::bfs_reach;
use std::collections::HashSet;

/// Returns every node reachable from `start` by following connections,
/// including `start` itself.
///
/// Connections that point at unknown ids are ignored.
pub fn reachable_from(map: &Map, start: &NodeId) -> HashSet<NodeId> {
    if map.get_node(start).is_none() {
        return HashSet::new();
    }

    bfs_reach(start.clone(), |id| {
        map.get_node(id)
            .map(|node| node.connections.clone())
            .unwrap_or_default()
    })
    .collect()
}

/// Returns the ids of nodes that cannot be reached from any row-0 node.
pub fn unreachable_nodes(map: &Map) -> Vec<NodeId> {
    let mut reached = HashSet::new();
    for start in map.row_ids(0) {
        reached.extend(reachable_from(map, &start));
    }

    map.nodes()
        .filter(|node| !reached.contains(&node.id))
        .map(|node| node.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{GridPosition, MapNode, NodeKind};

    fn diamond() -> Map {
        let mut map = Map::empty("diamond", 3, 3);
        map.insert_node(MapNode::new(NodeId::from("a"), NodeKind::Normal, GridPosition::new(0, 1)))
            .unwrap();
        map.insert_node(MapNode::new(NodeId::from("b"), NodeKind::Elite, GridPosition::new(1, 0)))
            .unwrap();
        map.insert_node(MapNode::new(NodeId::from("c"), NodeKind::Shop, GridPosition::new(1, 2)))
            .unwrap();
        map.insert_node(MapNode::new(NodeId::from("d"), NodeKind::Boss, GridPosition::new(2, 1)))
            .unwrap();
        map
    }

    #[test]
    fn test_reachable_follows_connections() {
        let mut map = diamond();
        map.connect(&NodeId::from("a"), &NodeId::from("b")).unwrap();
        map.connect(&NodeId::from("b"), &NodeId::from("d")).unwrap();

        let reached = reachable_from(&map, &NodeId::from("a"));
        assert_eq!(reached.len(), 3);
        assert!(reached.contains(&NodeId::from("d")));
        assert!(!reached.contains(&NodeId::from("c")));

        assert_eq!(unreachable_nodes(&map), vec![NodeId::from("c")]);
    }

    #[test]
    fn test_unknown_start_reaches_nothing() {
        let map = diamond();
        assert!(reachable_from(&map, &NodeId::from("zzz")).is_empty());
    }
}
