//! Proximity-driven conversation state machine.
//!
//! Evaluated once per tick after movement:
//! - a `Talking` session closes the first tick its NPC is out of range,
//!   otherwise an interact edge presents the next line;
//! - without a session, the first NPC in iteration order that is in range
//!   becomes the nearby NPC (ties are not distance-sorted);
//! - an interact edge while `Proximate` opens a session.
use crate::{
    arena::{events::ArenaEvent, geometry::Rect},
    core::errors::ArenaError,
    npc::components::{Npc, NpcId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionPhase {
    #[default]
    Idle,
    Proximate(NpcId),
    Talking(NpcId),
}

/// Text currently revealed on the dialogue surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueSurface {
    pub speaker: String,
    pub line: String,
}

#[derive(Debug, Clone)]
pub struct InteractionState {
    radius: f32,
    phase: InteractionPhase,
    surface: Option<DialogueSurface>,
}

impl InteractionState {
    pub fn new(radius: f32) -> Result<Self, ArenaError> {
        if !(radius > 0.0) {
            return Err(ArenaError::NonPositiveRadius { radius });
        }
        Ok(Self {
            radius,
            phase: InteractionPhase::Idle,
            surface: None,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    pub fn active_npc(&self) -> Option<NpcId> {
        match self.phase {
            InteractionPhase::Talking(id) => Some(id),
            _ => None,
        }
    }

    pub fn nearby_npc(&self) -> Option<NpcId> {
        match self.phase {
            InteractionPhase::Idle => None,
            InteractionPhase::Proximate(id) | InteractionPhase::Talking(id) => Some(id),
        }
    }

    pub fn surface(&self) -> Option<&DialogueSurface> {
        self.surface.as_ref()
    }

    pub fn in_range(&self, actor: &Rect, npc: &Npc) -> bool {
        actor.center_distance(npc.rect()) < self.radius
    }

    /// First NPC in iteration order within the proximity radius.
    pub fn first_in_range(&self, actor: &Rect, npcs: &[Npc]) -> Option<NpcId> {
        npcs.iter()
            .find(|npc| self.in_range(actor, npc))
            .map(Npc::id)
    }

    pub fn update(
        &mut self,
        actor: &Rect,
        npcs: &mut [Npc],
        interact: bool,
        events: &mut Vec<ArenaEvent>,
    ) {
        if let InteractionPhase::Talking(id) = self.phase {
            match npcs.get_mut(id.index()) {
                Some(npc) if actor.center_distance(npc.rect()) < self.radius => {
                    if interact {
                        let line = npc.take_line();
                        events.push(ArenaEvent::DialogueAdvanced {
                            npc: id,
                            speaker: npc.name().to_string(),
                            line: line.clone(),
                        });
                        self.surface = Some(DialogueSurface {
                            speaker: npc.name().to_string(),
                            line,
                        });
                    }
                    return;
                }
                Some(npc) => {
                    npc.stop_talking();
                    self.close(id, events);
                }
                None => self.close(id, events),
            }
        }

        self.phase = match self.first_in_range(actor, npcs) {
            Some(id) => InteractionPhase::Proximate(id),
            None => InteractionPhase::Idle,
        };

        if let InteractionPhase::Proximate(id) = self.phase {
            if interact {
                if let Some(npc) = npcs.get_mut(id.index()) {
                    self.open(npc, events);
                }
            }
        }
    }

    fn open(&mut self, npc: &mut Npc, events: &mut Vec<ArenaEvent>) {
        npc.start_talking();
        let line = npc.take_line();
        self.phase = InteractionPhase::Talking(npc.id());
        self.surface = Some(DialogueSurface {
            speaker: npc.name().to_string(),
            line: line.clone(),
        });
        events.push(ArenaEvent::DialogueOpened {
            npc: npc.id(),
            speaker: npc.name().to_string(),
            line,
        });
    }

    fn close(&mut self, id: NpcId, events: &mut Vec<ArenaEvent>) {
        self.phase = InteractionPhase::Idle;
        self.surface = None;
        events.push(ArenaEvent::DialogueClosed { npc: id });
    }
}
