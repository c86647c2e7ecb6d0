//! # Input Module
//!
//! Routing of pointer events for the cards of a hand.
//!
//! [`CardInteraction`] owns the hand and the targeting state machine. The
//! engine feeds it one [`PointerEvent`] at a time together with the effect
//! resolver and the live target candidates, and gets back an
//! [`InteractionOutcome`] describing what happened.

pub mod events;

pub use events::*;

use crate::cards::{CardInstanceId, Hand};
use crate::combat::{
    CancelReason, EffectResolver, TargetCandidate, TargetId, TargetingConfig, TargetingOutcome,
    TargetingStateMachine,
};
use crate::utils::ScreenPoint;
use crate::SpireError;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Why a drag was not allowed to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragRefusal {
    /// The resolver cannot pay the card's cost
    Unaffordable,
    /// The card is not in the hand
    NotInHand,
    /// Another drag is in progress
    DragInProgress,
}

/// Why a card went back to its slot in the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnReason {
    /// Dropped outside the play zone
    OutsidePlayZone,
    /// Dropped on the play zone, but the card must be aimed
    RequiresTarget,
    /// Released while targeting with no candidate hovered
    NoTarget,
    /// The gesture was cancelled
    Cancelled,
    /// The cost could not be paid
    InsufficientResource,
}

impl From<CancelReason> for ReturnReason {
    fn from(reason: CancelReason) -> Self {
        match reason {
            CancelReason::NoTarget => ReturnReason::NoTarget,
            CancelReason::Explicit => ReturnReason::Cancelled,
            CancelReason::InsufficientResource { .. } => ReturnReason::InsufficientResource,
        }
    }
}

/// Result of handling one pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// The event did not apply in the current state
    Ignored,
    /// The hovered card changed
    HoverChanged { hovered: Option<CardInstanceId> },
    DragStarted { card: CardInstanceId },
    DragRefused {
        card: CardInstanceId,
        reason: DragRefusal,
    },
    /// The card follows the pointer
    Dragging { card: CardInstanceId, at: ScreenPoint },
    /// The drag armed targeting
    TargetingArmed {
        card: CardInstanceId,
        candidates: usize,
    },
    /// The hovered candidate was recomputed
    TargetHovered {
        card: CardInstanceId,
        target: Option<usize>,
    },
    /// The card resolved and left the hand
    Played {
        card: CardInstanceId,
        target: Option<TargetId>,
    },
    /// The card went back to its slot
    Returned {
        card: CardInstanceId,
        reason: ReturnReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    card: CardInstanceId,
    start: ScreenPoint,
    pointer: ScreenPoint,
    /// Arming found no candidates; the rest of the gesture is a plain drag
    targeting_declined: bool,
}

/// Controller for hovering, dragging and playing the cards of a hand.
#[derive(Debug, Clone)]
pub struct CardInteraction {
    hand: Hand,
    targeting: TargetingStateMachine,
    play_zone: PlayZone,
    drag: Option<DragState>,
}

impl CardInteraction {
    /// Creates a controller for `hand` with default targeting and play zone.
    ///
    /// # Examples
    ///
    /// ```
    /// use spire::{CardData, CardInteraction, EnergyPool, Hand, InteractionOutcome,
    ///             PointerEvent, ScreenPoint};
    ///
    /// let mut hand = Hand::new();
    /// let defend = hand.add(CardData::skill("Defend", 1, 5)).unwrap();
    /// let mut interaction = CardInteraction::new(hand);
    /// let mut energy = EnergyPool::new(3);
    ///
    /// interaction.handle(
    ///     PointerEvent::BeginDrag { card: defend, at: ScreenPoint::new(900.0, 100.0) },
    ///     &mut energy,
    ///     &[],
    /// );
    /// let outcome = interaction.handle(
    ///     PointerEvent::EndDrag { at: ScreenPoint::new(900.0, 600.0) },
    ///     &mut energy,
    ///     &[],
    /// );
    /// assert!(matches!(outcome, InteractionOutcome::Played { target: None, .. }));
    /// assert!(interaction.hand().is_empty());
    /// ```
    pub fn new(hand: Hand) -> Self {
        Self::with_config(hand, TargetingConfig::default(), PlayZone::default())
    }

    pub fn with_config(hand: Hand, targeting: TargetingConfig, play_zone: PlayZone) -> Self {
        Self {
            hand,
            targeting: TargetingStateMachine::new(targeting),
            play_zone,
            drag: None,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn targeting(&self) -> &TargetingStateMachine {
        &self.targeting
    }

    pub fn play_zone(&self) -> &PlayZone {
        &self.play_zone
    }

    /// The card being dragged, if any.
    pub fn dragging(&self) -> Option<CardInstanceId> {
        self.drag.map(|d| d.card)
    }

    /// Where the dragged card currently is.
    pub fn drag_position(&self) -> Option<ScreenPoint> {
        self.drag.map(|d| d.pointer)
    }

    /// Handles one pointer event.
    ///
    /// `live` is the current set of live target candidates. It is only read
    /// when a drag arms targeting, and is frozen from then on.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        resolver: &mut dyn EffectResolver,
        live: &[TargetCandidate],
    ) -> InteractionOutcome {
        match event {
            PointerEvent::Enter(card) => self.hover(card, true),
            PointerEvent::Exit(card) => self.hover(card, false),
            PointerEvent::BeginDrag { card, at } => self.begin_drag(card, at, &*resolver),
            PointerEvent::Drag { at } => self.drag_to(at, live),
            PointerEvent::EndDrag { at } => self.end_drag(at, resolver),
            PointerEvent::Click { card } => self.click(card, resolver),
            PointerEvent::Cancel => self.cancel(),
            PointerEvent::CycleTarget { forward } => match self.drag {
                Some(drag) if self.targeting.is_armed() => InteractionOutcome::TargetHovered {
                    card: drag.card,
                    target: self.targeting.cycle_target(forward),
                },
                _ => InteractionOutcome::Ignored,
            },
        }
    }

    fn hover(&mut self, card: CardInstanceId, entering: bool) -> InteractionOutcome {
        if self.drag.is_some() {
            return InteractionOutcome::Ignored;
        }
        let changed = if entering {
            self.hand.set_hovered(card)
        } else {
            self.hand.clear_hovered(card)
        };
        if changed {
            InteractionOutcome::HoverChanged {
                hovered: self.hand.hovered(),
            }
        } else {
            InteractionOutcome::Ignored
        }
    }

    fn begin_drag(
        &mut self,
        card: CardInstanceId,
        at: ScreenPoint,
        resolver: &dyn EffectResolver,
    ) -> InteractionOutcome {
        let refusal = if self.drag.is_some() || self.targeting.is_armed() {
            Some(DragRefusal::DragInProgress)
        } else {
            match self.hand.get(card) {
                None => Some(DragRefusal::NotInHand),
                Some(instance) if !resolver.can_afford(instance.cost()) => {
                    Some(DragRefusal::Unaffordable)
                }
                Some(_) => None,
            }
        };

        if let Some(reason) = refusal {
            debug!("Refused drag of {}: {:?}", card, reason);
            return InteractionOutcome::DragRefused { card, reason };
        }

        self.hand.clear_hovered(card);
        self.drag = Some(DragState {
            card,
            start: at,
            pointer: at,
            targeting_declined: false,
        });
        InteractionOutcome::DragStarted { card }
    }

    fn drag_to(&mut self, at: ScreenPoint, live: &[TargetCandidate]) -> InteractionOutcome {
        let drag = match self.drag.as_mut() {
            Some(drag) => {
                drag.pointer = at;
                *drag
            }
            None => return InteractionOutcome::Ignored,
        };

        if self.targeting.is_armed() {
            return InteractionOutcome::TargetHovered {
                card: drag.card,
                target: self.targeting.pointer_moved(at),
            };
        }

        if drag.targeting_declined {
            return InteractionOutcome::Dragging { card: drag.card, at };
        }

        let instance = match self.hand.get(drag.card) {
            Some(instance) => instance,
            None => {
                warn!("Dragged card {} left the hand", drag.card);
                self.drag = None;
                return InteractionOutcome::Ignored;
            }
        };

        match self
            .targeting
            .try_arm(instance, drag.start, at, live.to_vec())
        {
            Ok(true) => InteractionOutcome::TargetingArmed {
                card: drag.card,
                candidates: live.len(),
            },
            Ok(false) => InteractionOutcome::Dragging { card: drag.card, at },
            Err(SpireError::NoCandidates) => {
                debug!("No targets for {}, dragging normally", instance.data.name);
                if let Some(drag) = self.drag.as_mut() {
                    drag.targeting_declined = true;
                }
                InteractionOutcome::Dragging { card: drag.card, at }
            }
            Err(err) => {
                warn!("Could not arm targeting: {}", err);
                InteractionOutcome::Dragging { card: drag.card, at }
            }
        }
    }

    fn end_drag(&mut self, at: ScreenPoint, resolver: &mut dyn EffectResolver) -> InteractionOutcome {
        let drag = match self.drag.take() {
            Some(drag) => drag,
            None => return InteractionOutcome::Ignored,
        };

        if let Some(outcome) = self.targeting.release(at, resolver) {
            return self.finish_targeting(outcome);
        }

        if !self.play_zone.contains(at) {
            return InteractionOutcome::Returned {
                card: drag.card,
                reason: ReturnReason::OutsidePlayZone,
            };
        }
        self.play_untargeted(drag.card, resolver)
    }

    /// Plays a card dropped on the play zone without a target.
    fn play_untargeted(
        &mut self,
        card: CardInstanceId,
        resolver: &mut dyn EffectResolver,
    ) -> InteractionOutcome {
        let instance = match self.hand.get(card) {
            Some(instance) => instance,
            None => return InteractionOutcome::Ignored,
        };

        if instance.requires_target() {
            debug!("{} needs a target; drag upward to aim", instance.data.name);
            return InteractionOutcome::Returned {
                card,
                reason: ReturnReason::RequiresTarget,
            };
        }
        if !resolver.try_consume(instance.cost()) {
            return InteractionOutcome::Returned {
                card,
                reason: ReturnReason::InsufficientResource,
            };
        }

        resolver.apply_effect(&instance.data, None);
        if let Some(played) = self.hand.remove(card) {
            info!("Played {}", played.data.name);
        }
        InteractionOutcome::Played { card, target: None }
    }

    fn click(&mut self, card: CardInstanceId, resolver: &mut dyn EffectResolver) -> InteractionOutcome {
        let acting = self.targeting.session().map(|s| s.card.id);
        if acting != Some(card) {
            return InteractionOutcome::Ignored;
        }

        self.drag = None;
        match self.targeting.confirm(resolver) {
            Some(outcome) => self.finish_targeting(outcome),
            None => InteractionOutcome::Ignored,
        }
    }

    fn cancel(&mut self) -> InteractionOutcome {
        let drag = self.drag.take();
        if let Some(outcome) = self.targeting.cancel() {
            return self.finish_targeting(outcome);
        }
        match drag {
            Some(drag) => InteractionOutcome::Returned {
                card: drag.card,
                reason: ReturnReason::Cancelled,
            },
            None => InteractionOutcome::Ignored,
        }
    }

    fn finish_targeting(&mut self, outcome: TargetingOutcome) -> InteractionOutcome {
        match outcome {
            TargetingOutcome::Confirmed { card, target, .. } => {
                if let Some(played) = self.hand.remove(card) {
                    info!("Played {} on {}", played.data.name, target);
                }
                InteractionOutcome::Played {
                    card,
                    target: Some(target),
                }
            }
            TargetingOutcome::Cancelled { card, reason } => InteractionOutcome::Returned {
                card,
                reason: reason.into(),
            },
        }
    }
}
