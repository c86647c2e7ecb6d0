//! # Hand Display
//!
//! Slot layout for the cards of a hand, the spread around the hovered card,
//! and the animations that move cards between slots.

use super::{AnimationHandle, AnimationTarget, Animator};
use crate::cards::{CardInstanceId, Hand};
use crate::config;
use crate::utils::{clamp01, ScreenPoint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Geometry and timing of the hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandLayout {
    /// Centre of the row of cards
    pub centre: ScreenPoint,
    pub card_width: f32,
    /// Gap between neighbouring cards
    pub spacing: f32,
    /// How far the card right of the hovered one moves aside
    pub hover_spread: f32,
    /// How far the hovered card rises
    pub hover_lift: f32,
    pub hover_scale: f32,
    pub drag_scale: f32,
    /// Duration of slot animations, in seconds
    pub animation_duration: f32,
}

impl HandLayout {
    pub fn new(centre: ScreenPoint) -> Self {
        Self {
            centre,
            card_width: config::CARD_WIDTH,
            spacing: config::CARD_SPACING,
            hover_spread: config::HOVER_SPREAD,
            hover_lift: 30.0,
            hover_scale: 1.2,
            drag_scale: 1.05,
            animation_duration: 0.2,
        }
    }

    /// Resting slot of each of `count` cards, centred on `centre`.
    ///
    /// # Examples
    ///
    /// ```
    /// use spire::{HandLayout, ScreenPoint};
    ///
    /// let layout = HandLayout::default();
    /// let slots = layout.rest_positions(2);
    /// assert_eq!(slots[0].x, -90.0);
    /// assert_eq!(slots[1].x, 90.0);
    /// ```
    pub fn rest_positions(&self, count: usize) -> Vec<ScreenPoint> {
        let stride = self.card_width + self.spacing;
        let total = stride * count as f32 - self.spacing;
        let first = -total / 2.0 + self.card_width / 2.0;
        (0..count)
            .map(|i| self.centre.offset(first + i as f32 * stride, 0.0))
            .collect()
    }

    /// Horizontal shift of the card at `index` while `hovered` is hovered.
    ///
    /// Cards right of the hovered one move right, the nearest the most.
    /// Cards left of it stay put.
    pub fn spread_offset(&self, index: usize, hovered: usize) -> f32 {
        if index <= hovered {
            return 0.0;
        }
        let distance = (index - hovered) as f32;
        self.hover_spread * (1.0 - clamp01(distance * 0.3))
    }

    /// Target position of every card given the hovered index.
    pub fn target_positions(&self, count: usize, hovered: Option<usize>) -> Vec<ScreenPoint> {
        let mut positions = self.rest_positions(count);
        if let Some(h) = hovered.filter(|&h| h < count) {
            for (i, position) in positions.iter_mut().enumerate() {
                if i == h {
                    *position = position.offset(0.0, self.hover_lift);
                } else {
                    *position = position.offset(self.spread_offset(i, h), 0.0);
                }
            }
        }
        positions
    }
}

impl Default for HandLayout {
    fn default() -> Self {
        Self::new(ScreenPoint::origin())
    }
}

/// Everything needed to draw one card of the hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandSlot {
    pub card: CardInstanceId,
    pub index: usize,
    /// Slot the card rests in when nothing is hovered
    pub rest: ScreenPoint,
    /// Where the card is drawn, or is animating towards
    pub position: ScreenPoint,
    pub scale: f32,
    pub hovered: bool,
    pub dragging: bool,
}

/// Presentation state of the hand.
///
/// Tracks where each card was last sent and the animation moving it there,
/// so a new move on a card cancels the one still in flight.
#[derive(Debug, Clone, Default)]
pub struct HandView {
    layout: HandLayout,
    positions: HashMap<CardInstanceId, ScreenPoint>,
    animations: HashMap<CardInstanceId, AnimationHandle>,
}

impl HandView {
    pub fn new(layout: HandLayout) -> Self {
        Self {
            layout,
            positions: HashMap::new(),
            animations: HashMap::new(),
        }
    }

    pub fn layout(&self) -> &HandLayout {
        &self.layout
    }

    /// Last position a card was sent to.
    pub fn position(&self, card: CardInstanceId) -> Option<ScreenPoint> {
        self.positions.get(&card).copied()
    }

    /// Brings the view in line with the hand.
    ///
    /// New cards appear in their slot at once. Cards whose target moved are
    /// animated there. The dragged card, if any, is pinned to the pointer.
    /// Cards that left the hand are forgotten.
    pub fn sync(
        &mut self,
        hand: &Hand,
        drag: Option<(CardInstanceId, ScreenPoint)>,
        animator: &mut dyn Animator,
    ) -> Vec<HandSlot> {
        let cards = hand.cards();
        let hovered = hand.hovered_index();
        let rest = self.layout.rest_positions(cards.len());
        let targets = self.layout.target_positions(cards.len(), hovered);

        let held: Vec<CardInstanceId> = cards.iter().map(|c| c.id).collect();
        self.positions.retain(|id, _| held.contains(id));
        let gone: Vec<CardInstanceId> = self
            .animations
            .keys()
            .filter(|id| !held.contains(id))
            .copied()
            .collect();
        for id in gone {
            if let Some(handle) = self.animations.remove(&id) {
                animator.cancel(handle);
            }
        }

        let mut slots = Vec::with_capacity(cards.len());
        for (index, card) in cards.iter().enumerate() {
            let dragged = drag.filter(|(id, _)| *id == card.id);
            let target = match dragged {
                Some((_, pointer)) => {
                    if let Some(handle) = self.animations.remove(&card.id) {
                        animator.cancel(handle);
                    }
                    self.positions.insert(card.id, pointer);
                    pointer
                }
                None => self.move_card(card.id, targets[index], animator),
            };

            let is_hovered = hovered == Some(index);
            let scale = if dragged.is_some() {
                self.layout.drag_scale
            } else if is_hovered {
                self.layout.hover_scale
            } else {
                1.0
            };

            slots.push(HandSlot {
                card: card.id,
                index,
                rest: rest[index],
                position: target,
                scale,
                hovered: is_hovered,
                dragging: dragged.is_some(),
            });
        }
        slots
    }

    fn move_card(&mut self, card: CardInstanceId, to: ScreenPoint, animator: &mut dyn Animator) -> ScreenPoint {
        let previous = self.positions.insert(card, to);
        if let Some(from) = previous.filter(|from| *from != to) {
            if let Some(running) = self.animations.remove(&card) {
                animator.cancel(running);
            }
            let handle = animator.start(
                AnimationTarget::Card(card),
                from,
                to,
                self.layout.animation_duration,
            );
            self.animations.insert(card, handle);
        }
        to
    }
}
