//! # Cards Module
//!
//! Card templates, card instances and the hand that holds them.
//!
//! A [`CardData`] is the immutable template of a card. Every copy of a card
//! that enters play is wrapped in a [`CardInstance`] carrying a unique
//! [`CardInstanceId`], so two copies of the same template can be told apart.

pub mod hand;

pub use hand::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Broad category of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Deals damage to a chosen enemy
    Attack,
    /// Utility effect such as block
    Skill,
    /// Lasting effect for the rest of the battle
    Power,
}

impl CardKind {
    /// Whether cards of this kind must be aimed at a target.
    pub fn requires_target(self) -> bool {
        matches!(self, CardKind::Attack)
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardKind::Attack => "Attack",
            CardKind::Skill => "Skill",
            CardKind::Power => "Power",
        };
        f.write_str(name)
    }
}

/// Immutable template data of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub name: String,
    pub description: String,
    /// Energy needed to play the card
    pub cost: u32,
    pub kind: CardKind,
    pub damage: u32,
    pub block: u32,
}

impl CardData {
    /// Creates a card template with no description.
    pub fn new(name: impl Into<String>, kind: CardKind, cost: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            cost,
            kind,
            damage: 0,
            block: 0,
        }
    }

    /// Creates an attack card dealing `damage`.
    ///
    /// # Examples
    ///
    /// ```
    /// use spire::CardData;
    ///
    /// let strike = CardData::attack("Strike", 1, 6);
    /// assert!(strike.requires_target());
    /// assert_eq!(strike.damage, 6);
    /// ```
    pub fn attack(name: impl Into<String>, cost: u32, damage: u32) -> Self {
        Self {
            damage,
            ..Self::new(name, CardKind::Attack, cost)
        }
    }

    /// Creates a skill card granting `block`.
    pub fn skill(name: impl Into<String>, cost: u32, block: u32) -> Self {
        Self {
            block,
            ..Self::new(name, CardKind::Skill, cost)
        }
    }

    pub fn power(name: impl Into<String>, cost: u32) -> Self {
        Self::new(name, CardKind::Power, cost)
    }

    /// Sets the rules text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether playing this card needs a chosen target.
    pub fn requires_target(&self) -> bool {
        self.kind.requires_target()
    }
}

/// Unique identifier of a card instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstanceId(Uuid);

impl CardInstanceId {
    /// Creates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card in play: a template plus a unique instance id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: CardInstanceId,
    pub data: CardData,
}

impl CardInstance {
    /// Wraps a template in a new instance.
    pub fn new(data: CardData) -> Self {
        Self {
            id: CardInstanceId::new(),
            data,
        }
    }

    pub fn cost(&self) -> u32 {
        self.data.cost
    }

    pub fn requires_target(&self) -> bool {
        self.data.requires_target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_attacks_require_target() {
        assert!(CardKind::Attack.requires_target());
        assert!(!CardKind::Skill.requires_target());
        assert!(!CardKind::Power.requires_target());
    }

    #[test]
    fn test_card_constructors() {
        let defend = CardData::skill("Defend", 1, 5).with_description("Gain 5 block.");
        assert_eq!(defend.kind, CardKind::Skill);
        assert_eq!(defend.block, 5);
        assert_eq!(defend.damage, 0);
        assert_eq!(defend.description, "Gain 5 block.");
        assert!(!defend.requires_target());
    }

    #[test]
    fn test_instances_are_distinct() {
        let strike = CardData::attack("Strike", 1, 6);
        let a = CardInstance::new(strike.clone());
        let b = CardInstance::new(strike);
        assert_ne!(a.id, b.id);
        assert_eq!(a.data, b.data);
        assert_eq!(a.cost(), 1);
        assert!(a.requires_target());
    }
}
