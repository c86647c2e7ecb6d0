//! # Rendering Module
//!
//! Layout math and render descriptors for the engine that draws the game.
//!
//! Nothing here draws anything. The map and hand views compute where things
//! go and which visual state they are in. Motion is requested through the
//! [`Animator`] collaborator, which the engine implements.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::cards::CardInstanceId;
use crate::map::NodeId;
use crate::utils::ScreenPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Something the engine can move on screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationTarget {
    Card(CardInstanceId),
    Node(NodeId),
}

/// Handle of a started animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationHandle(pub u64);

/// A requested move from one point to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub target: AnimationTarget,
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    /// Duration in seconds
    pub duration: f32,
}

/// Animation collaborator.
///
/// Starting an animation on a target replaces any animation still running
/// on that target: the last writer wins.
pub trait Animator {
    fn start(
        &mut self,
        target: AnimationTarget,
        from: ScreenPoint,
        to: ScreenPoint,
        duration: f32,
    ) -> AnimationHandle;

    /// Stops an animation. Unknown or finished handles are ignored.
    fn cancel(&mut self, handle: AnimationHandle);
}

/// Animator that records requests instead of playing them.
///
/// Used by headless tools and tests.
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    next_handle: u64,
    running: HashMap<AnimationTarget, (AnimationHandle, Tween)>,
    started: Vec<Tween>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The animation currently running on `target`.
    pub fn running(&self, target: &AnimationTarget) -> Option<&Tween> {
        self.running.get(target).map(|(_, tween)| tween)
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    /// Every animation ever started, oldest first.
    pub fn started(&self) -> &[Tween] {
        &self.started
    }
}

impl Animator for RecordingAnimator {
    fn start(
        &mut self,
        target: AnimationTarget,
        from: ScreenPoint,
        to: ScreenPoint,
        duration: f32,
    ) -> AnimationHandle {
        self.next_handle += 1;
        let handle = AnimationHandle(self.next_handle);
        let tween = Tween {
            target: target.clone(),
            from,
            to,
            duration,
        };
        self.started.push(tween.clone());
        self.running.insert(target, (handle, tween));
        handle
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        self.running.retain(|_, (running, _)| *running != handle);
    }
}
