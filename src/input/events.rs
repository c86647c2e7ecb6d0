//! # Pointer Events
//!
//! Discrete pointer events the engine forwards for the cards of a hand, and
//! the play zone a card is dropped on.

use crate::cards::CardInstanceId;
use crate::utils::ScreenPoint;
use serde::{Deserialize, Serialize};

/// Pointer input concerning the cards of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Pointer entered a card
    Enter(CardInstanceId),
    /// Pointer left a card
    Exit(CardInstanceId),
    /// A drag started on a card
    BeginDrag { card: CardInstanceId, at: ScreenPoint },
    /// The dragged pointer moved
    Drag { at: ScreenPoint },
    /// The drag ended
    EndDrag { at: ScreenPoint },
    /// A card was clicked
    Click { card: CardInstanceId },
    /// Explicit cancel, such as a right click or escape
    Cancel,
    /// Keyboard cycling through targets
    CycleTarget { forward: bool },
}

/// Screen rectangle where dropping a card plays it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayZone {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl PlayZone {
    /// Creates a zone from two opposite corners, in any order.
    pub fn new(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            min: ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: ScreenPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Whether `point` lies inside the zone, edges included.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

impl Default for PlayZone {
    /// The upper part of a 1920x1080 screen, above the hand.
    fn default() -> Self {
        Self::new(ScreenPoint::new(0.0, 300.0), ScreenPoint::new(1920.0, 1080.0))
    }
}
