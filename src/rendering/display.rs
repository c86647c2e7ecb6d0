//! # Map Display
//!
//! Placement of map nodes on screen and the render descriptors the engine
//! draws the map from.

use crate::config;
use crate::map::{GridPosition, Map, MapEvent, NodeId, NodeKind};
use crate::utils::ScreenPoint;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Spacing rules for placing map nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Distance between neighbouring columns
    pub horizontal_spacing: f32,
    /// Lower bound of the distance between rows
    pub min_vertical_spacing: f32,
    /// Upper bound of the distance between rows
    pub max_vertical_spacing: f32,
    /// Part of the container height kept free of rows
    pub vertical_margin: f32,
    /// Maximum horizontal offset of interior nodes, as a fraction of the
    /// horizontal spacing
    pub horizontal_jitter: f32,
    /// Maximum vertical offset of interior nodes, as a fraction of the
    /// vertical spacing
    pub vertical_jitter: f32,
}

impl MapLayout {
    pub fn new() -> Self {
        Self {
            horizontal_spacing: config::MAP_HORIZONTAL_SPACING,
            min_vertical_spacing: config::MAP_MIN_VERTICAL_SPACING,
            max_vertical_spacing: config::MAP_MAX_VERTICAL_SPACING,
            vertical_margin: config::MAP_VERTICAL_MARGIN,
            horizontal_jitter: 0.15,
            vertical_jitter: 0.1,
        }
    }

    /// Same spacing without random offsets.
    pub fn for_testing() -> Self {
        Self {
            horizontal_jitter: 0.0,
            vertical_jitter: 0.0,
            ..Self::new()
        }
    }

    /// Distance between rows for a container of the given height.
    ///
    /// The free height is shared evenly between the gaps and clamped to the
    /// spacing bounds.
    pub fn vertical_spacing(&self, rows: u32, container_height: f32) -> f32 {
        if rows < 2 {
            return self.max_vertical_spacing;
        }
        let available = container_height - self.vertical_margin;
        (available / (rows - 1) as f32).clamp(self.min_vertical_spacing, self.max_vertical_spacing)
    }

    /// Anchor of a grid slot before any random offset.
    ///
    /// Columns are centred on x = 0 and rows grow upward from y = 0.
    pub fn grid_anchor(&self, position: GridPosition, columns: u32, vertical_spacing: f32) -> ScreenPoint {
        let h = self.horizontal_spacing;
        let centre_offset = columns.saturating_sub(1) as f32 * h * 0.5;
        ScreenPoint::new(
            position.column as f32 * h - centre_offset,
            position.row as f32 * vertical_spacing,
        )
    }

    /// Anchors for every node of `map`.
    ///
    /// Nodes on interior rows are nudged by a random offset so the map looks
    /// hand drawn; the start and boss rows stay on the grid.
    pub fn anchors(&self, map: &Map, container_height: f32, rng: &mut StdRng) -> HashMap<NodeId, ScreenPoint> {
        let v = self.vertical_spacing(map.rows(), container_height);
        let dx = self.horizontal_spacing * self.horizontal_jitter;
        let dy = v * self.vertical_jitter;

        map.nodes()
            .map(|node| {
                let mut anchor = self.grid_anchor(node.position, map.columns(), v);
                let interior = node.row() != 0 && node.row() + 1 != map.rows();
                if interior && dx > 0.0 {
                    anchor.x += rng.gen_range(-dx..=dx);
                }
                if interior && dy > 0.0 {
                    anchor.y += rng.gen_range(-dy..=dy);
                }
                (node.id.clone(), anchor)
            })
            .collect()
    }
}

impl Default for MapLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Colour state of a node, in order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeTint {
    Completed,
    Disabled,
    Highlighted,
    Normal,
}

/// Everything needed to draw one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: &'static str,
    pub anchor: ScreenPoint,
    pub selectable: bool,
    pub completed: bool,
    pub highlighted: bool,
    pub tint: NodeTint,
}

/// Everything needed to draw one connection line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionDescriptor {
    pub from: NodeId,
    pub to: NodeId,
    pub start: ScreenPoint,
    pub end: ScreenPoint,
}

/// Presentation state of a map: node anchors, the highlighted node and a
/// dirty flag for the renderer.
#[derive(Debug, Clone)]
pub struct MapView {
    layout: MapLayout,
    anchors: HashMap<NodeId, ScreenPoint>,
    highlighted: Option<NodeId>,
    dirty: bool,
}

impl MapView {
    /// Lays out `map` in a container of the given height.
    ///
    /// `seed` drives the random offsets of interior nodes. The new view
    /// starts dirty.
    pub fn new(map: &Map, layout: MapLayout, container_height: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let anchors = layout.anchors(map, container_height, &mut rng);
        Self {
            layout,
            anchors,
            highlighted: None,
            dirty: true,
        }
    }

    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    pub fn anchor(&self, id: &NodeId) -> Option<ScreenPoint> {
        self.anchors.get(id).copied()
    }

    pub fn highlighted(&self) -> Option<&NodeId> {
        self.highlighted.as_ref()
    }

    /// Consumes map events. Any event marks the view dirty; a highlighted
    /// node that stops being selectable loses its highlight.
    pub fn apply_events(&mut self, events: &[MapEvent]) {
        if events.is_empty() {
            return;
        }
        for event in events {
            match event {
                MapEvent::NodeCompleted { id } | MapEvent::NodeLocked { id } => {
                    if self.highlighted.as_ref() == Some(id) {
                        self.highlighted = None;
                    }
                }
                MapEvent::NodeSelectable { .. } | MapEvent::FrontierChanged { .. } => {}
            }
        }
        debug!("Map view received {} events", events.len());
        self.dirty = true;
    }

    /// Highlights or unhighlights a node under the pointer.
    ///
    /// Only selectable nodes can be highlighted. Returns whether anything
    /// changed.
    pub fn set_highlight(&mut self, map: &Map, id: &NodeId, hovering: bool) -> bool {
        if !map.is_selectable(id) {
            return false;
        }
        let next = if hovering {
            Some(id.clone())
        } else if self.highlighted.as_ref() == Some(id) {
            None
        } else {
            return false;
        };
        if self.highlighted == next {
            return false;
        }
        self.highlighted = next;
        self.dirty = true;
        true
    }

    /// Returns whether the view changed since the last call, and clears the
    /// flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Node descriptors in map order.
    pub fn node_descriptors(&self, map: &Map) -> Vec<NodeDescriptor> {
        map.nodes()
            .map(|node| {
                let selectable = node.is_selectable();
                let completed = node.is_completed();
                let highlighted = selectable && self.highlighted.as_ref() == Some(&node.id);
                let tint = if completed {
                    NodeTint::Completed
                } else if !selectable {
                    NodeTint::Disabled
                } else if highlighted {
                    NodeTint::Highlighted
                } else {
                    NodeTint::Normal
                };
                NodeDescriptor {
                    id: node.id.clone(),
                    kind: node.kind,
                    label: node.kind.label(),
                    anchor: self.anchor(&node.id).unwrap_or_default(),
                    selectable,
                    completed,
                    highlighted,
                    tint,
                }
            })
            .collect()
    }

    /// One descriptor per connection.
    pub fn connection_descriptors(&self, map: &Map) -> Vec<ConnectionDescriptor> {
        map.edges()
            .into_iter()
            .map(|(from, to)| ConnectionDescriptor {
                start: self.anchor(&from).unwrap_or_default(),
                end: self.anchor(&to).unwrap_or_default(),
                from,
                to,
            })
            .collect()
    }

    /// The first selectable node whose anchor lies strictly within `radius`
    /// of `point`.
    pub fn selectable_node_at(&self, map: &Map, point: ScreenPoint, radius: f32) -> Option<NodeId> {
        map.selectable_nodes()
            .iter()
            .find(|id| {
                self.anchor(id)
                    .map_or(false, |anchor| anchor.distance(point) < radius)
            })
            .cloned()
    }
}
