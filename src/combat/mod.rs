//! # Combat Module
//!
//! Target candidates, effect resolution and drag-to-target play.
//!
//! The rules engine that actually resolves card effects lives outside this
//! crate and is reached through the [`EffectResolver`] trait. An
//! [`EnergyPool`] implementation is provided for tools and tests.

pub mod targeting;

pub use targeting::*;

use crate::cards::{CardData, CardKind};
use crate::utils::ScreenPoint;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an entity that can be targeted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An entity eligible for a targeted effect, with its on-screen anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCandidate {
    pub id: TargetId,
    pub anchor: ScreenPoint,
}

impl TargetCandidate {
    pub fn new(id: impl Into<TargetId>, anchor: ScreenPoint) -> Self {
        Self {
            id: id.into(),
            anchor,
        }
    }
}

/// Anything that can be aimed at by a card.
pub trait Targetable {
    fn target_id(&self) -> TargetId;

    /// Screen-space anchor used for hit testing.
    fn screen_anchor(&self) -> ScreenPoint;

    fn is_alive(&self) -> bool;

    /// Whether the entity is currently shown. Hidden entities cannot be
    /// targeted.
    fn is_active(&self) -> bool {
        true
    }

    /// Builds the candidate for this entity.
    fn as_candidate(&self) -> TargetCandidate {
        TargetCandidate {
            id: self.target_id(),
            anchor: self.screen_anchor(),
        }
    }
}

/// Candidates for every live, active entity, in input order.
pub fn live_candidates<T: Targetable>(entities: &[T]) -> Vec<TargetCandidate> {
    entities
        .iter()
        .filter(|e| e.is_alive() && e.is_active())
        .map(Targetable::as_candidate)
        .collect()
}

/// A targetable enemy: health and a screen anchor.
///
/// Damage is applied by the external rules engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: TargetId,
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub anchor: ScreenPoint,
    pub active: bool,
}

impl Enemy {
    /// Creates an active enemy at full health.
    pub fn new(id: impl Into<TargetId>, name: impl Into<String>, health: u32, anchor: ScreenPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            health,
            max_health: health,
            anchor,
            active: true,
        }
    }
}

impl Targetable for Enemy {
    fn target_id(&self) -> TargetId {
        self.id.clone()
    }

    fn screen_anchor(&self) -> ScreenPoint {
        self.anchor
    }

    fn is_alive(&self) -> bool {
        self.health > 0
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// The rules-engine collaborator that pays for and resolves card effects.
pub trait EffectResolver {
    /// Whether `cost` could be paid right now.
    fn can_afford(&self, cost: u32) -> bool;

    /// Pays `cost`; returns false and changes nothing if it cannot.
    fn try_consume(&mut self, cost: u32) -> bool;

    /// Resolves a card's effect, optionally against a target.
    fn apply_effect(&mut self, card: &CardData, target: Option<&TargetId>);
}

/// Record of one resolved effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedEffect {
    pub card: String,
    pub kind: CardKind,
    pub target: Option<TargetId>,
}

/// Energy-based resolver that records every effect it applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyPool {
    pub energy: u32,
    pub max_energy: u32,
    applied: Vec<AppliedEffect>,
}

impl EnergyPool {
    pub fn new(max_energy: u32) -> Self {
        Self {
            energy: max_energy,
            max_energy,
            applied: Vec::new(),
        }
    }

    /// Restores energy to the maximum.
    pub fn refill(&mut self) {
        self.energy = self.max_energy;
    }

    /// Effects applied so far, oldest first.
    pub fn applied(&self) -> &[AppliedEffect] {
        &self.applied
    }
}

impl Default for EnergyPool {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ENERGY)
    }
}

impl EffectResolver for EnergyPool {
    fn can_afford(&self, cost: u32) -> bool {
        cost <= self.energy
    }

    fn try_consume(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            debug!("Cannot pay {} energy with {} left", cost, self.energy);
            return false;
        }
        self.energy -= cost;
        true
    }

    fn apply_effect(&mut self, card: &CardData, target: Option<&TargetId>) {
        match target {
            Some(target) => info!("{} resolved against {}", card.name, target),
            None => info!("{} resolved", card.name),
        }
        self.applied.push(AppliedEffect {
            card: card.name.clone(),
            kind: card.kind,
            target: target.cloned(),
        });
    }
}
