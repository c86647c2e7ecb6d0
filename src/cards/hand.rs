//! # Hand
//!
//! The ordered, bounded set of cards the player can currently play.

use super::{CardData, CardInstance, CardInstanceId};
use crate::config;
use log::{debug, warn};

/// Cards held by the player, in display order.
#[derive(Debug, Clone)]
pub struct Hand {
    cards: Vec<CardInstance>,
    max_size: usize,
    hovered: Option<CardInstanceId>,
}

impl Hand {
    /// Creates an empty hand with the default maximum size.
    pub fn new() -> Self {
        Self::with_max_size(config::MAX_HAND_SIZE)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            cards: Vec::new(),
            max_size,
            hovered: None,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.max_size
    }

    /// Adds a card to the right end of the hand.
    ///
    /// A full hand refuses the card and returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use spire::{CardData, Hand};
    ///
    /// let mut hand = Hand::with_max_size(1);
    /// assert!(hand.add(CardData::skill("Defend", 1, 5)).is_some());
    /// assert!(hand.add(CardData::skill("Defend", 1, 5)).is_none());
    /// assert_eq!(hand.len(), 1);
    /// ```
    pub fn add(&mut self, data: CardData) -> Option<CardInstanceId> {
        self.add_instance(CardInstance::new(data))
    }

    /// Adds an existing instance; refused when the hand is full.
    pub fn add_instance(&mut self, card: CardInstance) -> Option<CardInstanceId> {
        if self.is_full() {
            warn!("Hand is full, discarding {}", card.data.name);
            return None;
        }
        let id = card.id;
        debug!("Added {} ({}) to hand", card.data.name, id);
        self.cards.push(card);
        Some(id)
    }

    /// Removes a card, returning it if it was held.
    pub fn remove(&mut self, id: CardInstanceId) -> Option<CardInstance> {
        let index = self.index_of(id)?;
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        Some(self.cards.remove(index))
    }

    /// Empties the hand, returning the discarded cards in order.
    pub fn discard_all(&mut self) -> Vec<CardInstance> {
        self.hovered = None;
        std::mem::take(&mut self.cards)
    }

    pub fn contains(&self, id: CardInstanceId) -> bool {
        self.index_of(id).is_some()
    }

    /// Position of a card within the hand.
    pub fn index_of(&self, id: CardInstanceId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    pub fn get(&self, id: CardInstanceId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn cards(&self) -> &[CardInstance] {
        &self.cards
    }

    /// Marks a held card as hovered. Unknown ids are ignored.
    pub fn set_hovered(&mut self, id: CardInstanceId) -> bool {
        if self.contains(id) {
            self.hovered = Some(id);
            true
        } else {
            false
        }
    }

    /// Clears the hover if `id` is the hovered card.
    pub fn clear_hovered(&mut self, id: CardInstanceId) -> bool {
        if self.hovered == Some(id) {
            self.hovered = None;
            true
        } else {
            false
        }
    }

    pub fn hovered(&self) -> Option<CardInstanceId> {
        self.hovered
    }

    /// Index of the hovered card.
    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered.and_then(|id| self.index_of(id))
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
