//! # Generation Module
//!
//! Procedural generation of stage maps.
//!
//! Generators are driven by a [`GenerationConfig`] and a seeded [`StdRng`],
//! so the same seed always produces the same map.

pub mod layered;

pub use layered::*;

use crate::config;
use crate::map::NodeKind;
use crate::{SpireError, SpireResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Base probabilities for the kinds an interior node can take.
///
/// The weights need not sum to 1; they are normalised before each draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeKindWeights {
    pub normal: f64,
    pub elite: f64,
    pub rest: f64,
    pub shop: f64,
    pub mystery: f64,
}

impl NodeKindWeights {
    /// Creates a weight table.
    pub fn new(normal: f64, elite: f64, rest: f64, shop: f64, mystery: f64) -> Self {
        Self {
            normal,
            elite,
            rest,
            shop,
            mystery,
        }
    }

    /// Weights paired with their kinds, in draw order.
    pub fn entries(&self) -> [(NodeKind, f64); 5] {
        [
            (NodeKind::Normal, self.normal),
            (NodeKind::Elite, self.elite),
            (NodeKind::Rest, self.rest),
            (NodeKind::Shop, self.shop),
            (NodeKind::Mystery, self.mystery),
        ]
    }

    /// Checks that every weight is finite and non-negative and that at least
    /// one is positive.
    pub fn validate(&self) -> SpireResult<()> {
        let entries = self.entries();
        if let Some((kind, weight)) = entries
            .iter()
            .find(|(_, w)| !w.is_finite() || *w < 0.0)
        {
            return Err(SpireError::GenerationFailed(format!(
                "weight for {} must be a non-negative number, got {}",
                kind, weight
            )));
        }
        if entries.iter().map(|(_, w)| w).sum::<f64>() <= 0.0 {
            return Err(SpireError::GenerationFailed(
                "node kind weights sum to zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Draws a kind.
    ///
    /// Each weight is scaled by an independent factor drawn uniformly from
    /// `[1 - jitter, 1 + jitter]`, the scaled weights are renormalised, and a
    /// uniform `[0, 1)` roll is matched against the cumulative thresholds.
    pub fn sample(&self, jitter: f64, rng: &mut StdRng) -> NodeKind {
        let mut scaled = self.entries();
        for (_, weight) in scaled.iter_mut() {
            let factor = if jitter > 0.0 {
                rng.gen_range((1.0 - jitter)..=(1.0 + jitter))
            } else {
                1.0
            };
            *weight *= factor;
        }

        let total: f64 = scaled.iter().map(|(_, w)| w).sum();
        let roll = rng.gen::<f64>();

        let mut threshold = 0.0;
        for (kind, weight) in scaled {
            threshold += weight / total;
            if roll < threshold {
                return kind;
            }
        }

        NodeKind::Mystery
    }
}

impl Default for NodeKindWeights {
    fn default() -> Self {
        Self::new(0.7, 0.1, 0.05, 0.05, 0.1)
    }
}

/// Configuration for procedural map generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Number of rows, including the start and boss rows
    pub rows: u32,
    /// Number of column slots per row
    pub columns: u32,
    /// Lower bound on the node count of interior rows
    pub min_nodes_per_row: u32,
    /// Upper bound on outgoing paths per node
    pub max_paths_per_node: u32,
    /// Base probabilities for interior node kinds
    pub kind_weights: NodeKindWeights,
    /// Relative jitter applied to each weight per draw (0.0 to 1.0)
    pub weight_jitter: f64,
}

impl GenerationConfig {
    /// Creates the default configuration for the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use spire::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.rows, 6);
    /// assert_eq!(config.columns, 4);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rows: config::DEFAULT_MAP_ROWS,
            columns: config::DEFAULT_MAP_COLUMNS,
            min_nodes_per_row: 2,
            max_paths_per_node: 2,
            kind_weights: NodeKindWeights::default(),
            weight_jitter: 0.2,
        }
    }

    /// Creates a small, jitter-free configuration for tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            rows: 4,
            columns: 3,
            min_nodes_per_row: 2,
            max_paths_per_node: 2,
            kind_weights: NodeKindWeights::default(),
            weight_jitter: 0.0,
        }
    }

    /// Creates a configuration for long, wide maps.
    pub fn for_detailed_generation(seed: u64) -> Self {
        Self {
            seed,
            rows: 15,
            columns: 7,
            min_nodes_per_row: 3,
            max_paths_per_node: 3,
            kind_weights: NodeKindWeights::new(0.55, 0.15, 0.1, 0.05, 0.15),
            weight_jitter: 0.2,
        }
    }

    /// Checks that the configuration can produce a map.
    pub fn validate(&self) -> SpireResult<()> {
        if self.rows < 2 {
            return Err(SpireError::GenerationFailed(format!(
                "a map needs at least a start and a boss row, got {} rows",
                self.rows
            )));
        }
        if self.columns == 0 {
            return Err(SpireError::GenerationFailed(
                "a map needs at least one column".to_string(),
            ));
        }
        if self.max_paths_per_node == 0 {
            return Err(SpireError::GenerationFailed(
                "max_paths_per_node must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.weight_jitter) {
            return Err(SpireError::GenerationFailed(format!(
                "weight_jitter must lie in [0, 1), got {}",
                self.weight_jitter
            )));
        }
        self.kind_weights.validate()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> SpireResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> SpireResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
