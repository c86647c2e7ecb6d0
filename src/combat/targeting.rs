//! # Targeting
//!
//! State machine for playing cards that need a target.
//!
//! The player drags a card upward out of the hand. Once the drag rises more
//! than [`TargetingConfig::threshold`] pixels the machine arms: it takes a
//! snapshot of the live target candidates and from then on tracks which
//! candidate the pointer hovers. Releasing over a candidate confirms the
//! play. Releasing anywhere else, or an explicit cancel, abandons it.
//!
//! ```text
//!           drag rises > threshold
//!   Idle ───────────────────────────▶ Armed ──┐ pointer moves,
//!    ▲                                  │ ◀───┘ cycle target
//!    └──── release / click / cancel ────┘
//!          (Confirmed or Cancelled)
//! ```
//!
//! Screen space is y-up. The machine never animates anything itself.

use super::{EffectResolver, TargetCandidate, TargetId};
use crate::cards::{CardInstance, CardInstanceId};
use crate::config;
use crate::utils::ScreenPoint;
use crate::{SpireError, SpireResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Tunables of the targeting gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetingConfig {
    /// Upward drag distance that arms targeting; the comparison is strict
    pub threshold: f32,
    /// Pointer distance under which a candidate counts as hovered
    pub hit_distance: f32,
}

impl TargetingConfig {
    pub fn new() -> Self {
        Self {
            threshold: config::TARGETING_THRESHOLD,
            hit_distance: config::TARGET_HIT_DISTANCE,
        }
    }

    /// Small distances that keep test coordinates readable.
    pub fn for_testing() -> Self {
        Self {
            threshold: 10.0,
            hit_distance: 20.0,
        }
    }
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Current phase of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetingPhase {
    Idle,
    Armed,
}

/// State held while the machine is armed.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetingSession {
    /// The card being played
    pub card: CardInstance,
    /// Candidates captured when the session armed
    pub candidates: Vec<TargetCandidate>,
    /// Index into `candidates` of the hovered candidate
    pub hovered: Option<usize>,
    /// Last known pointer position
    pub pointer: ScreenPoint,
}

impl TargetingSession {
    /// The hovered candidate, if any.
    pub fn hovered_candidate(&self) -> Option<&TargetCandidate> {
        self.hovered.and_then(|i| self.candidates.get(i))
    }
}

/// Why an armed session ended without an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelReason {
    /// Released or clicked with no candidate hovered
    NoTarget,
    /// Cancelled explicitly
    Explicit,
    /// The resolver could not pay the cost
    InsufficientResource { cost: u32 },
}

/// How an armed session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetingOutcome {
    /// The effect was applied to the target at `index` of the snapshot
    Confirmed {
        card: CardInstanceId,
        target: TargetId,
        index: usize,
    },
    /// No effect; the card goes back to the hand
    Cancelled {
        card: CardInstanceId,
        reason: CancelReason,
    },
}

impl TargetingOutcome {
    pub fn card(&self) -> CardInstanceId {
        match self {
            TargetingOutcome::Confirmed { card, .. } | TargetingOutcome::Cancelled { card, .. } => {
                *card
            }
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, TargetingOutcome::Confirmed { .. })
    }

    /// The error equivalent of a cancellation, if it was caused by one.
    pub fn error(&self) -> Option<SpireError> {
        match self {
            TargetingOutcome::Cancelled {
                reason: CancelReason::InsufficientResource { cost },
                ..
            } => Some(SpireError::InsufficientResource { cost: *cost }),
            _ => None,
        }
    }
}

/// First candidate, in snapshot order, strictly closer than `radius` to
/// `pointer`.
pub fn resolve_hover(candidates: &[TargetCandidate], pointer: ScreenPoint, radius: f32) -> Option<usize> {
    candidates
        .iter()
        .position(|c| c.anchor.distance(pointer) < radius)
}

/// Drag-to-target state machine. At most one session exists at a time.
#[derive(Debug, Clone, Default)]
pub struct TargetingStateMachine {
    config: TargetingConfig,
    session: Option<TargetingSession>,
}

impl TargetingStateMachine {
    pub fn new(config: TargetingConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &TargetingConfig {
        &self.config
    }

    pub fn phase(&self) -> TargetingPhase {
        if self.session.is_some() {
            TargetingPhase::Armed
        } else {
            TargetingPhase::Idle
        }
    }

    pub fn is_armed(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&TargetingSession> {
        self.session.as_ref()
    }

    /// Hovered index of the armed session.
    pub fn hovered(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.hovered)
    }

    /// Whether a drag from `drag_start` to `pointer` rises past the
    /// threshold.
    pub fn crosses_threshold(&self, drag_start: ScreenPoint, pointer: ScreenPoint) -> bool {
        pointer.rise_from(drag_start) > self.config.threshold
    }

    /// Arms a session for `card` once the drag crosses the threshold.
    ///
    /// Returns `Ok(false)` when the card needs no target or the drag has not
    /// risen far enough. `candidates` is the live candidate set; it is
    /// frozen for the rest of the session.
    ///
    /// # Errors
    ///
    /// - [`SpireError::SessionActive`] if a session is already armed
    /// - [`SpireError::NoCandidates`] if `candidates` is empty; the caller
    ///   should carry on with a normal drag
    pub fn try_arm(
        &mut self,
        card: &CardInstance,
        drag_start: ScreenPoint,
        pointer: ScreenPoint,
        candidates: Vec<TargetCandidate>,
    ) -> SpireResult<bool> {
        if self.session.is_some() {
            return Err(SpireError::SessionActive);
        }
        if !card.requires_target() || !self.crosses_threshold(drag_start, pointer) {
            return Ok(false);
        }
        self.arm(card, pointer, candidates)?;
        Ok(true)
    }

    /// Arms a session unconditionally.
    ///
    /// # Examples
    ///
    /// ```
    /// use spire::{CardData, CardInstance, ScreenPoint, TargetCandidate, TargetingConfig,
    ///             TargetingStateMachine};
    ///
    /// let mut targeting = TargetingStateMachine::new(TargetingConfig::default());
    /// let card = CardInstance::new(CardData::attack("Strike", 1, 6));
    /// let enemies = vec![TargetCandidate::new("slime", ScreenPoint::new(0.0, 400.0))];
    ///
    /// targeting.arm(&card, ScreenPoint::new(0.0, 300.0), enemies).unwrap();
    /// assert!(targeting.is_armed());
    /// assert_eq!(targeting.hovered(), Some(0));
    /// ```
    pub fn arm(
        &mut self,
        card: &CardInstance,
        pointer: ScreenPoint,
        candidates: Vec<TargetCandidate>,
    ) -> SpireResult<()> {
        if self.session.is_some() {
            return Err(SpireError::SessionActive);
        }
        if candidates.is_empty() {
            debug!("No live candidates for {}", card.data.name);
            return Err(SpireError::NoCandidates);
        }

        let hovered = resolve_hover(&candidates, pointer, self.config.hit_distance);
        info!(
            "Targeting armed for {} with {} candidates",
            card.data.name,
            candidates.len()
        );
        self.session = Some(TargetingSession {
            card: card.clone(),
            candidates,
            hovered,
            pointer,
        });
        Ok(())
    }

    /// Tracks the pointer and recomputes the hovered candidate.
    pub fn pointer_moved(&mut self, at: ScreenPoint) -> Option<usize> {
        let radius = self.config.hit_distance;
        let session = self.session.as_mut()?;
        session.pointer = at;
        session.hovered = resolve_hover(&session.candidates, at, radius);
        session.hovered
    }

    /// Moves the hover to the next or previous candidate, wrapping around.
    ///
    /// With nothing hovered, forward starts at the first candidate and
    /// backward at the last.
    pub fn cycle_target(&mut self, forward: bool) -> Option<usize> {
        let session = self.session.as_mut()?;
        let count = session.candidates.len();
        let next = match (session.hovered, forward) {
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
            (None, true) => 0,
            (None, false) => count - 1,
        };
        session.hovered = Some(next);
        Some(next)
    }

    /// Ends the gesture at `at`: the hover is recomputed there, then the
    /// session confirms or cancels.
    ///
    /// Returns `None` when idle.
    pub fn release(
        &mut self,
        at: ScreenPoint,
        resolver: &mut dyn EffectResolver,
    ) -> Option<TargetingOutcome> {
        if self.session.is_none() {
            return None;
        }
        self.pointer_moved(at);
        self.confirm(resolver)
    }

    /// Confirms with the current hover, as a click on the acting card does.
    ///
    /// The cost is paid through `resolver` before the effect is applied. A
    /// refused payment, or no hovered candidate, cancels instead.
    pub fn confirm(&mut self, resolver: &mut dyn EffectResolver) -> Option<TargetingOutcome> {
        let session = self.session.take()?;
        let card = session.card.id;

        let hovered = session
            .hovered
            .and_then(|i| session.candidates.get(i).map(|c| (i, c.id.clone())));
        let (index, target) = match hovered {
            Some(pair) => pair,
            None => {
                debug!("Released {} over no target", session.card.data.name);
                return Some(TargetingOutcome::Cancelled {
                    card,
                    reason: CancelReason::NoTarget,
                });
            }
        };

        let cost = session.card.cost();
        if !resolver.try_consume(cost) {
            info!(
                "Not enough resource for {} (cost {})",
                session.card.data.name, cost
            );
            return Some(TargetingOutcome::Cancelled {
                card,
                reason: CancelReason::InsufficientResource { cost },
            });
        }

        resolver.apply_effect(&session.card.data, Some(&target));
        Some(TargetingOutcome::Confirmed {
            card,
            target,
            index,
        })
    }

    /// Abandons the armed session, whatever is hovered.
    pub fn cancel(&mut self) -> Option<TargetingOutcome> {
        let session = self.session.take()?;
        debug!("Targeting cancelled for {}", session.card.data.name);
        Some(TargetingOutcome::Cancelled {
            card: session.card.id,
            reason: CancelReason::Explicit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardData;
    use crate::combat::EnergyPool;

    fn strike() -> CardInstance {
        CardInstance::new(CardData::attack("Strike", 1, 6))
    }

    fn enemies() -> Vec<TargetCandidate> {
        vec![
            TargetCandidate::new("a", ScreenPoint::new(-400.0, 600.0)),
            TargetCandidate::new("b", ScreenPoint::new(0.0, 600.0)),
            TargetCandidate::new("c", ScreenPoint::new(400.0, 600.0)),
        ]
    }

    fn armed() -> TargetingStateMachine {
        let mut targeting = TargetingStateMachine::default();
        targeting
            .arm(&strike(), ScreenPoint::new(0.0, 100.0), enemies())
            .unwrap();
        targeting
    }

    #[test]
    fn test_threshold_is_strict_and_upward() {
        let targeting = TargetingStateMachine::default();
        let start = ScreenPoint::new(0.0, 0.0);
        assert!(!targeting.crosses_threshold(start, ScreenPoint::new(0.0, 50.0)));
        assert!(targeting.crosses_threshold(start, ScreenPoint::new(0.0, 50.5)));
        assert!(!targeting.crosses_threshold(start, ScreenPoint::new(0.0, -80.0)));
    }

    #[test]
    fn test_try_arm_with_sixty_pixel_drag() {
        let mut targeting = TargetingStateMachine::default();
        let start = ScreenPoint::new(0.0, 100.0);

        let armed = targeting
            .try_arm(&strike(), start, ScreenPoint::new(0.0, 160.0), enemies())
            .unwrap();
        assert!(armed);
        assert_eq!(targeting.phase(), TargetingPhase::Armed);
        assert_eq!(targeting.session().unwrap().candidates, enemies());
    }

    #[test]
    fn test_try_arm_ignores_untargeted_cards_and_short_drags() {
        let mut targeting = TargetingStateMachine::default();
        let start = ScreenPoint::new(0.0, 100.0);
        let defend = CardInstance::new(CardData::skill("Defend", 1, 5));

        assert!(!targeting
            .try_arm(&defend, start, ScreenPoint::new(0.0, 400.0), enemies())
            .unwrap());
        assert!(!targeting
            .try_arm(&strike(), start, ScreenPoint::new(0.0, 130.0), enemies())
            .unwrap());
        assert_eq!(targeting.phase(), TargetingPhase::Idle);
    }

    #[test]
    fn test_arm_without_candidates() {
        let mut targeting = TargetingStateMachine::default();
        let result = targeting.arm(&strike(), ScreenPoint::origin(), Vec::new());
        assert!(matches!(result, Err(SpireError::NoCandidates)));
        assert!(!targeting.is_armed());
    }

    #[test]
    fn test_second_session_is_rejected() {
        let mut targeting = armed();
        let result = targeting.arm(&strike(), ScreenPoint::origin(), enemies());
        assert!(matches!(result, Err(SpireError::SessionActive)));

        let result = targeting.try_arm(
            &strike(),
            ScreenPoint::origin(),
            ScreenPoint::new(0.0, 500.0),
            enemies(),
        );
        assert!(matches!(result, Err(SpireError::SessionActive)));
    }

    #[test]
    fn test_hover_uses_first_match_within_radius() {
        let candidates = vec![
            TargetCandidate::new("near", ScreenPoint::new(0.0, 0.0)),
            TargetCandidate::new("nearer", ScreenPoint::new(10.0, 0.0)),
        ];
        assert_eq!(resolve_hover(&candidates, ScreenPoint::new(10.0, 0.0), 150.0), Some(0));
        assert_eq!(resolve_hover(&candidates, ScreenPoint::new(160.0, 0.0), 150.0), None);
        // exactly on the radius does not count
        assert_eq!(resolve_hover(&candidates, ScreenPoint::new(-150.0, 0.0), 150.0), None);
    }

    #[test]
    fn test_pointer_moves_update_hover() {
        let mut targeting = armed();
        assert_eq!(targeting.pointer_moved(ScreenPoint::new(390.0, 580.0)), Some(2));
        assert_eq!(targeting.pointer_moved(ScreenPoint::new(200.0, 300.0)), None);
        assert_eq!(
            targeting.session().unwrap().pointer,
            ScreenPoint::new(200.0, 300.0)
        );
    }

    #[test]
    fn test_release_over_candidate_confirms() {
        let mut targeting = armed();
        let mut pool = EnergyPool::new(3);

        let outcome = targeting
            .release(ScreenPoint::new(410.0, 610.0), &mut pool)
            .unwrap();
        match outcome {
            TargetingOutcome::Confirmed { target, index, .. } => {
                assert_eq!(target, TargetId::from("c"));
                assert_eq!(index, 2);
            }
            other => panic!("expected confirmation, got {:?}", other),
        }
        assert_eq!(pool.applied().len(), 1);
        assert_eq!(pool.energy, 2);
        assert!(!targeting.is_armed());
    }

    #[test]
    fn test_release_recomputes_hover() {
        let mut targeting = armed();
        let mut pool = EnergyPool::new(3);
        targeting.pointer_moved(ScreenPoint::new(0.0, 600.0));

        let outcome = targeting
            .release(ScreenPoint::new(0.0, 200.0), &mut pool)
            .unwrap();
        assert!(matches!(
            outcome,
            TargetingOutcome::Cancelled {
                reason: CancelReason::NoTarget,
                ..
            }
        ));
        assert!(pool.applied().is_empty());
        assert_eq!(pool.energy, 3);
    }

    #[test]
    fn test_insufficient_resource_cancels() {
        let mut targeting = armed();
        let mut pool = EnergyPool::new(0);

        let outcome = targeting
            .release(ScreenPoint::new(0.0, 600.0), &mut pool)
            .unwrap();
        assert!(!outcome.is_confirmed());
        assert!(matches!(
            outcome.error(),
            Some(SpireError::InsufficientResource { cost: 1 })
        ));
        assert!(pool.applied().is_empty());
        assert!(!targeting.is_armed());
    }

    #[test]
    fn test_cancel_overrides_hover() {
        let mut targeting = armed();
        targeting.pointer_moved(ScreenPoint::new(0.0, 600.0));
        let outcome = targeting.cancel().unwrap();
        assert!(matches!(
            outcome,
            TargetingOutcome::Cancelled {
                reason: CancelReason::Explicit,
                ..
            }
        ));
        assert!(targeting.cancel().is_none());
    }

    #[test]
    fn test_cycle_wraps_around() {
        let mut targeting = armed();
        targeting.pointer_moved(ScreenPoint::new(0.0, 0.0));
        assert_eq!(targeting.cycle_target(false), Some(2));
        assert_eq!(targeting.cycle_target(true), Some(0));
        assert_eq!(targeting.cycle_target(false), Some(2));
        assert_eq!(targeting.cycle_target(true), Some(0));
        assert_eq!(targeting.cycle_target(true), Some(1));

        let mut pool = EnergyPool::new(3);
        let outcome = targeting.confirm(&mut pool).unwrap();
        assert!(matches!(outcome, TargetingOutcome::Confirmed { index: 1, .. }));
    }

    #[test]
    fn test_idle_machine_ignores_input() {
        let mut targeting = TargetingStateMachine::default();
        let mut pool = EnergyPool::new(3);
        assert!(targeting.pointer_moved(ScreenPoint::origin()).is_none());
        assert!(targeting.cycle_target(true).is_none());
        assert!(targeting.release(ScreenPoint::origin(), &mut pool).is_none());
        assert!(targeting.confirm(&mut pool).is_none());
    }
}
