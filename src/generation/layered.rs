//! # Layered Map Generation
//!
//! Builds the branching stage map row by row.
//!
//! The generator works in four passes:
//! 1. Place nodes: one start node, one boss node, and a random number of
//!    interior nodes per row at distinct columns
//! 2. Assign kinds by weighted random draw
//! 3. Connect every node to a random subset of the next row
//! 4. Repair: give every node without a parent a random parent

use crate::generation::{GenerationConfig, Generator};
use crate::map::{GridPosition, Map, MapNode, NodeId, NodeKind};
use crate::utils::unreachable_nodes;
use crate::{SpireError, SpireResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::Rng;

/// Generator for layered, fully reachable stage maps.
#[derive(Debug, Clone)]
pub struct LayeredMapGenerator {
    /// Prefix of the generated map id; the seed is appended
    pub map_id_prefix: String,
}

impl LayeredMapGenerator {
    /// Creates a generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use spire::{GenerationConfig, Generator, LayeredMapGenerator};
    /// use spire::generation::utils::create_rng;
    ///
    /// let config = GenerationConfig::new(3);
    /// let map = LayeredMapGenerator::new()
    ///     .generate(&config, &mut create_rng(&config))
    ///     .unwrap();
    /// assert_eq!(map.row_ids(0).len(), 1);
    /// ```
    pub fn new() -> Self {
        Self {
            map_id_prefix: "map".to_string(),
        }
    }

    /// Column slots used by `row`, in ascending order.
    fn row_columns(&self, row: u32, config: &GenerationConfig, rng: &mut StdRng) -> Vec<u32> {
        if row == 0 || row == config.rows - 1 {
            return vec![config.columns / 2];
        }

        let lower = config.min_nodes_per_row.clamp(1, config.columns);
        let count = rng.gen_range(lower..=config.columns);

        let mut columns: Vec<u32> = index::sample(rng, config.columns as usize, count as usize)
            .into_iter()
            .map(|c| c as u32)
            .collect();
        columns.sort_unstable();
        columns
    }

    /// Determines the kind of a node on `row`.
    fn determine_node_kind(
        &self,
        row: u32,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> NodeKind {
        if row == 0 {
            return NodeKind::Normal;
        }
        if row == config.rows - 1 {
            return NodeKind::Boss;
        }
        config.kind_weights.sample(config.weight_jitter, rng)
    }

    /// Creates every node; returns the ids grouped by row.
    fn place_nodes(
        &self,
        map: &mut Map,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> SpireResult<Vec<Vec<NodeId>>> {
        let mut rows = Vec::with_capacity(config.rows as usize);

        for row in 0..config.rows {
            let mut row_ids = Vec::new();
            for column in self.row_columns(row, config, rng) {
                let id = NodeId::from_index(map.len());
                let kind = self.determine_node_kind(row, config, rng);
                map.insert_node(MapNode::new(id.clone(), kind, GridPosition::new(row, column)))?;
                row_ids.push(id);
            }
            debug!("Row {} holds {} nodes", row, row_ids.len());
            rows.push(row_ids);
        }

        Ok(rows)
    }

    /// Connects each row to the next.
    fn connect_rows(
        &self,
        map: &mut Map,
        rows: &[Vec<NodeId>],
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> SpireResult<()> {
        for (row, pair) in rows.windows(2).enumerate() {
            let (current, next) = (&pair[0], &pair[1]);
            let limit = (config.max_paths_per_node as usize).min(next.len());

            for from in current {
                let path_count = if row == 0 {
                    limit
                } else {
                    rng.gen_range(1..=limit)
                };

                for pick in index::sample(rng, next.len(), path_count) {
                    map.connect(from, &next[pick])?;
                }
            }
        }
        Ok(())
    }

    /// Gives every parentless node past row 0 a random parent on the
    /// previous row.
    fn repair_orphan_nodes(
        &self,
        map: &mut Map,
        rows: &[Vec<NodeId>],
        rng: &mut StdRng,
    ) -> SpireResult<()> {
        for row in 1..rows.len() {
            let previous = &rows[row - 1];
            for id in &rows[row] {
                if map.has_incoming(id) {
                    continue;
                }
                let parent = &previous[rng.gen_range(0..previous.len())];
                debug!("Repairing orphan {} with parent {}", id, parent);
                map.connect(parent, id)?;
            }
        }
        Ok(())
    }
}

impl Generator<Map> for LayeredMapGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> SpireResult<Map> {
        config.validate()?;

        let mut map = Map::empty(
            format!("{}-{}", self.map_id_prefix, config.seed),
            config.rows,
            config.columns,
        );

        let rows = self.place_nodes(&mut map, config, rng)?;
        self.connect_rows(&mut map, &rows, config, rng)?;

        self.repair_orphan_nodes(&mut map, &rows, rng)?;

        map.set_frontier(&rows[0])?;
        self.validate(&map, config)?;

        info!(
            "{} built map '{}' with {} nodes and {} connections",
            self.generator_type(),
            map.id,
            map.len(),
            map.edges().len()
        );
        Ok(map)
    }

    fn validate(&self, map: &Map, config: &GenerationConfig) -> SpireResult<()> {
        map.validate().map_err(|e| match e {
            SpireError::MalformedMap(reason) => SpireError::GenerationFailed(reason),
            other => other,
        })?;

        for row in [0, config.rows - 1] {
            let count = map.row_ids(row).len();
            if count != 1 {
                return Err(SpireError::GenerationFailed(format!(
                    "row {} must hold exactly one node, found {}",
                    row, count
                )));
            }
        }

        let unreachable = unreachable_nodes(map);
        if !unreachable.is_empty() {
            return Err(SpireError::GenerationFailed(format!(
                "nodes unreachable from the start: {:?}",
                unreachable
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "LayeredMapGenerator"
    }
}

impl Default for LayeredMapGenerator {
    fn default() -> Self {
        Self::new()
    }
}
