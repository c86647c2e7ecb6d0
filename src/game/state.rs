//! # Run State
//!
//! The run orchestrator. It owns the map and its view, tracks the selected
//! node, and hands encounters to the engine when the player proceeds.

use super::{EncounterRequest, MapSource, RunCompletion, RunStatistics};
use crate::map::{Map, MapEvent, NodeId, NodeKind};
use crate::rendering::{MapLayout, MapView};
use crate::utils::ScreenPoint;
use crate::SpireResult;
use log::{debug, info};

/// A single run through one map.
#[derive(Debug, Clone)]
pub struct Run {
    map: Map,
    view: MapView,
    selected: Option<NodeId>,
    statistics: RunStatistics,
    completion: RunCompletion,
}

impl Run {
    /// Builds the map from `source` and lays it out in a container of the
    /// given height.
    pub fn new(source: &MapSource, layout: MapLayout, container_height: f32) -> SpireResult<Self> {
        let map = source.build()?;
        Ok(Self::from_map(map, layout, container_height, source.seed()))
    }

    /// Starts a run on an existing map.
    ///
    /// Nodes already completed in the map count towards the statistics.
    pub fn from_map(map: Map, layout: MapLayout, container_height: f32, seed: u64) -> Self {
        let view = MapView::new(&map, layout, container_height, seed);
        let mut statistics = RunStatistics::new();
        for node in map.nodes().filter(|n| n.is_completed()) {
            statistics.record(node);
        }

        let mut run = Self {
            map,
            view,
            selected: None,
            statistics,
            completion: RunCompletion::InProgress,
        };
        run.completion = run.evaluate_completion();
        info!(
            "Run started on map '{}' with {} selectable nodes",
            run.map.id,
            run.map.selectable_nodes().len()
        );
        run
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut MapView {
        &mut self.view
    }

    /// The node picked most recently.
    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    pub fn completion(&self) -> RunCompletion {
        self.completion
    }

    pub fn is_finished(&self) -> bool {
        self.completion != RunCompletion::InProgress
    }

    /// Selects a frontier node.
    ///
    /// Selecting a node that is not selectable changes nothing and returns
    /// no events. Otherwise the node becomes the selected node, the events
    /// are forwarded to the view and returned.
    pub fn select_node(&mut self, id: &NodeId) -> Vec<MapEvent> {
        let events = self.map.select(id);
        if events.is_empty() {
            return events;
        }

        if let Some(node) = self.map.get_node(id) {
            self.statistics.record(node);
        }
        self.selected = Some(id.clone());
        self.view.apply_events(&events);
        self.completion = self.evaluate_completion();
        debug!("Run completion after selecting {}: {:?}", id, self.completion);
        events
    }

    /// Highlights a node while the pointer is over it.
    ///
    /// Only selectable nodes react.
    pub fn hover_node(&mut self, id: &NodeId, hovering: bool) -> bool {
        self.view.set_highlight(&self.map, id, hovering)
    }

    /// Selects the selectable node under `point`, if any.
    pub fn click_at(&mut self, point: ScreenPoint, radius: f32) -> Vec<MapEvent> {
        match self.view.selectable_node_at(&self.map, point, radius) {
            Some(id) => self.select_node(&id),
            None => Vec::new(),
        }
    }

    /// Request for the encounter of the selected node.
    ///
    /// `None` until a node has been selected.
    pub fn proceed(&self) -> Option<EncounterRequest> {
        let id = self.selected.as_ref()?;
        let node = self.map.get_node(id)?;
        info!("Proceeding to {} encounter at {}", node.kind, id);
        Some(EncounterRequest {
            node: id.clone(),
            kind: node.kind,
        })
    }

    /// Selects the first node of the frontier.
    ///
    /// Returns the selected node, or `None` when nothing is selectable.
    pub fn auto_step(&mut self) -> Option<NodeId> {
        let next = self.map.selectable_nodes().first()?.clone();
        self.select_node(&next);
        Some(next)
    }

    fn evaluate_completion(&self) -> RunCompletion {
        let boss_done = self
            .map
            .nodes()
            .any(|n| n.kind == NodeKind::Boss && n.is_completed());
        if boss_done {
            RunCompletion::BossDefeated
        } else if self.map.selectable_nodes().is_empty() {
            RunCompletion::Stranded
        } else {
            RunCompletion::InProgress
        }
    }
}
