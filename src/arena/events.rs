//! Events produced by an arena tick and re-broadcast to Bevy systems.
use bevy::prelude::Message;

use crate::npc::components::NpcId;

#[derive(Message, Debug, Clone, PartialEq)]
pub enum ArenaEvent {
    DialogueOpened {
        npc: NpcId,
        speaker: String,
        line: String,
    },
    DialogueAdvanced {
        npc: NpcId,
        speaker: String,
        line: String,
    },
    DialogueClosed {
        npc: NpcId,
    },
    DoorToggled {
        obstacle: usize,
        open: bool,
    },
    /// An open door was not closed because the actor stands in its frame.
    DoorBlocked {
        obstacle: usize,
    },
    PauseToggled {
        paused: bool,
    },
    DebugToggled {
        enabled: bool,
    },
}
