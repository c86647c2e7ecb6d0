//! # Game Module
//!
//! The run: one map, its view, and the player's progress through it.
//!
//! This module contains:
//! - Map sources, choosing between a described and a generated map
//! - The [`Run`] orchestrator that owns the map and forwards its events
//! - Run statistics and completion tracking

pub mod state;

pub use state::*;

use crate::generation::utils::create_rng;
use crate::generation::{GenerationConfig, Generator, LayeredMapGenerator};
use crate::map::{Map, MapDescription, MapNode, NodeId, NodeKind};
use crate::SpireResult;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where a run's map comes from.
#[derive(Debug, Clone)]
pub enum MapSource {
    /// An in-memory description
    Described(MapDescription),
    /// A JSON description file
    DescribedFile(PathBuf),
    /// Procedural generation
    Generated(GenerationConfig),
}

impl MapSource {
    /// Picks the source for a run.
    ///
    /// A description file, when given, takes precedence over the generation
    /// parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use spire::{GenerationConfig, MapSource};
    ///
    /// let source = MapSource::choose(None, GenerationConfig::new(5));
    /// assert!(matches!(source, MapSource::Generated(_)));
    ///
    /// let source = MapSource::choose(Some("act1.json".as_ref()), GenerationConfig::new(5));
    /// assert!(matches!(source, MapSource::DescribedFile(_)));
    /// ```
    pub fn choose(description: Option<&Path>, config: GenerationConfig) -> Self {
        match description {
            Some(path) => MapSource::DescribedFile(path.to_path_buf()),
            None => MapSource::Generated(config),
        }
    }

    /// Builds and validates the map.
    pub fn build(&self) -> SpireResult<Map> {
        match self {
            MapSource::Described(description) => Map::load(description),
            MapSource::DescribedFile(path) => {
                info!("Loading map from {}", path.display());
                Map::load(&MapDescription::from_path(path)?)
            }
            MapSource::Generated(config) => {
                let mut rng = create_rng(config);
                LayeredMapGenerator::new().generate(config, &mut rng)
            }
        }
    }

    /// Seed for presentation randomness.
    pub fn seed(&self) -> u64 {
        match self {
            MapSource::Generated(config) => config.seed,
            _ => 0,
        }
    }
}

/// Request to the engine to start the encounter of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterRequest {
    pub node: NodeId,
    pub kind: NodeKind,
}

/// Progress of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunCompletion {
    /// Nodes remain to be visited
    InProgress,
    /// The boss node was completed
    BossDefeated,
    /// Nothing is selectable but the boss was never reached
    Stranded,
}

/// Counters describing a run so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Nodes completed
    pub nodes_completed: u32,
    /// Completed nodes by kind
    pub kinds_completed: HashMap<NodeKind, u32>,
    /// Highest row completed
    pub deepest_row: Option<u32>,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a completed node.
    pub fn record(&mut self, node: &MapNode) {
        self.nodes_completed += 1;
        *self.kinds_completed.entry(node.kind).or_insert(0) += 1;
        self.deepest_row = Some(self.deepest_row.map_or(node.row(), |row| row.max(node.row())));
    }

    /// Completed nodes of one kind.
    pub fn completed(&self, kind: NodeKind) -> u32 {
        self.kinds_completed.get(&kind).copied().unwrap_or(0)
    }
}
