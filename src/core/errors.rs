//! Construction-time invariant violations for arena entities.
use std::fmt;

/// Errors raised while building the arena. The per-tick path never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum ArenaError {
    DegenerateRect { width: f32, height: f32 },
    EmptyDialogue { npc: String },
    DoorCollidability,
    ZeroFrameCount,
    NonPositiveRadius { radius: f32 },
    /// The player would start inside a collidable obstacle and never move.
    BlockedStart { obstacle: usize },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateRect { width, height } => write!(
                f,
                "rectangle must have positive size (got {:.2}x{:.2})",
                width, height
            ),
            Self::EmptyDialogue { npc } => write!(f, "NPC '{}' has no dialogue lines", npc),
            Self::DoorCollidability => {
                write!(f, "door collidability is driven by toggle() only")
            }
            Self::ZeroFrameCount => write!(f, "animation frame count must be at least 1"),
            Self::NonPositiveRadius { radius } => {
                write!(f, "proximity radius must be positive (got {:.2})", radius)
            }
            Self::BlockedStart { obstacle } => write!(
                f,
                "player start overlaps collidable obstacle {}",
                obstacle
            ),
        }
    }
}

impl std::error::Error for ArenaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_value() {
        let error = ArenaError::EmptyDialogue {
            npc: "Ms. Noodle".into(),
        };
        assert!(error.to_string().contains("Ms. Noodle"));

        let error = ArenaError::DegenerateRect {
            width: 0.0,
            height: 4.0,
        };
        assert!(error.to_string().contains("0.00x4.00"));
    }
}
