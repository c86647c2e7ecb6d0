//! # Spire
//!
//! Interaction and progression core of a deck-building card battler.
//!
//! ## Architecture Overview
//!
//! The crate holds the game logic that sits between the rendering engine and
//! the rules engine. The engine renders and dispatches pointer input. The
//! rules engine resolves card effects. Both are external collaborators
//! reached through traits.
//!
//! - **Map**: layered graph of encounter nodes with a selectable frontier
//! - **Generation**: seeded procedural construction of maps
//! - **Cards**: card templates, instances and the bounded hand
//! - **Combat**: target candidates, effect resolution and the targeting
//!   state machine for drag-to-target cards
//! - **Input**: routing of discrete pointer events for the cards of a hand
//! - **Rendering**: layout math, render descriptors and the animation
//!   collaborator trait
//! - **Game**: the run orchestrator tying a map to its view
//!
//! Everything is single-threaded and event driven: each call handles one
//! discrete input and returns what changed.

pub mod cards;
pub mod combat;
pub mod game;
pub mod generation;
pub mod input;
pub mod map;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use cards::*;
pub use combat::*;
pub use game::*;
pub use generation::*;
pub use input::*;
pub use map::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Spire engine.
#[derive(thiserror::Error, Debug)]
pub enum SpireError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A map description is invalid
    #[error("Malformed map: {0}")]
    MalformedMap(String),

    /// The node is not part of the selectable frontier
    #[error("Node '{0}' is not selectable")]
    InvalidSelection(map::NodeId),

    /// Not enough resource to pay for a card
    #[error("Insufficient resource to pay cost {cost}")]
    InsufficientResource { cost: u32 },

    /// No live target candidates when arming
    #[error("No target candidates available")]
    NoCandidates,

    /// A targeting session is already armed
    #[error("A targeting session is already active")]
    SessionActive,

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Spire codebase.
pub type SpireResult<T> = Result<T, SpireError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default number of map rows, including start and boss
    pub const DEFAULT_MAP_ROWS: u32 = 6;

    /// Default number of column slots per map row
    pub const DEFAULT_MAP_COLUMNS: u32 = 4;

    /// Upward drag distance, in pixels, that arms targeting
    pub const TARGETING_THRESHOLD: f32 = 50.0;

    /// Screen distance, in pixels, within which a candidate is hovered
    pub const TARGET_HIT_DISTANCE: f32 = 150.0;

    /// Maximum number of cards in a hand
    pub const MAX_HAND_SIZE: usize = 10;

    /// Energy available at the start of a turn
    pub const DEFAULT_ENERGY: u32 = 3;

    /// Horizontal distance between map columns
    pub const MAP_HORIZONTAL_SPACING: f32 = 150.0;

    /// Bounds of the vertical distance between map rows
    pub const MAP_MIN_VERTICAL_SPACING: f32 = 100.0;
    pub const MAP_MAX_VERTICAL_SPACING: f32 = 120.0;

    /// Margin subtracted from the container height before spacing rows
    pub const MAP_VERTICAL_MARGIN: f32 = 40.0;

    /// Width of a card in the hand
    pub const CARD_WIDTH: f32 = 160.0;

    /// Gap between neighbouring cards in the hand
    pub const CARD_SPACING: f32 = 20.0;

    /// Distance cards right of the hovered card move aside
    pub const HOVER_SPREAD: f32 = 60.0;
}
