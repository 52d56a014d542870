//! Conversational NPCs placed in the arena.
use std::fmt;

use bevy::color::Color;
use serde::Serialize;

use crate::{
    animation::{AnimationClock, AnimationTiming},
    arena::geometry::Rect,
    core::errors::ArenaError,
    player::components::Direction,
};

/// Index-based identifier for an NPC in arena iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NpcId(usize);

impl NpcId {
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NPC-{:04}", self.0)
    }
}

/// A static character with an ordered, wrapping list of dialogue lines.
#[derive(Debug, Clone)]
pub struct Npc {
    id: NpcId,
    name: String,
    rect: Rect,
    lines: Vec<String>,
    cursor: usize,
    talking: bool,
    facing: Direction,
    color: Color,
    animation: AnimationClock,
}

impl Npc {
    /// Fails when `lines` is empty, since the cursor could not wrap.
    pub fn new(
        id: NpcId,
        name: impl Into<String>,
        rect: Rect,
        lines: Vec<String>,
        color: Color,
    ) -> Result<Self, ArenaError> {
        let name = name.into();
        if lines.is_empty() {
            return Err(ArenaError::EmptyDialogue { npc: name });
        }
        Ok(Self {
            id,
            name,
            rect,
            lines,
            cursor: 0,
            talking: false,
            facing: Direction::Down,
            color,
            animation: AnimationClock::default(),
        })
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    pub fn id(&self) -> NpcId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_talking(&self) -> bool {
        self.talking
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn frame_index(&self) -> usize {
        self.animation.frame_index()
    }

    /// Returns the line under the cursor and moves the cursor on, wrapping.
    pub fn take_line(&mut self) -> String {
        let line = self.lines[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.lines.len();
        line
    }

    pub fn start_talking(&mut self) {
        self.talking = true;
    }

    /// Ends the conversation and returns the sprite to its idle frame.
    pub fn stop_talking(&mut self) {
        self.talking = false;
        self.animation.reset();
    }

    /// NPCs only animate while talking.
    pub fn animate(&mut self, elapsed_ms: f32, timing: &AnimationTiming) {
        self.animation.advance(elapsed_ms, self.talking, timing);
    }
}
