//! Sprite frame timing shared by the actor and NPCs.
pub mod clock;

pub use clock::{AnimationClock, AnimationTiming};
