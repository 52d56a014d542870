//! Frame loop driver: elapsed time, input edges, pause/debug toggles, then
//! one arena tick and a fresh draw list.
use std::time::Duration;

use bevy::prelude::*;

use crate::{
    arena::{events::ArenaEvent, scene::Arena, snapshot::ArenaSnapshot},
    core::plugin::SimulationClock,
    input::{
        bindings::KeyBindings,
        buffer::{InputBuffer, InputSnapshot, LogicalKey},
    },
    render::draw_list::DrawList,
};

/// Everything a tick may read. Built by the driver, never stored globally.
#[derive(Debug, Clone, Default)]
pub struct TickContext {
    pub elapsed_ms: f32,
    pub input: InputSnapshot,
    pub paused: bool,
    pub debug: bool,
}

/// Result of one driven frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub draw_list: DrawList,
    pub events: Vec<ArenaEvent>,
}

/// Owns the arena and the state that persists between ticks.
#[derive(Resource, Debug)]
pub struct FrameLoop {
    arena: Arena,
    input: InputBuffer,
    last_time: Duration,
    paused: bool,
    debug: bool,
    ticks: u64,
}

impl FrameLoop {
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            input: InputBuffer::default(),
            last_time: Duration::ZERO,
            paused: false,
            debug: false,
            ticks: 0,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs one tick at time `now` with the logical keys currently held.
    pub fn frame<I>(&mut self, now: Duration, pressed: I) -> FrameOutput
    where
        I: IntoIterator<Item = LogicalKey>,
    {
        let elapsed = now.saturating_sub(self.last_time);
        self.last_time = now;

        let input = self.input.advance(pressed);
        let mut events = Vec::new();

        if input.just_pressed(LogicalKey::Pause) {
            self.paused = !self.paused;
            events.push(ArenaEvent::PauseToggled {
                paused: self.paused,
            });
        }
        if input.just_pressed(LogicalKey::Debug) {
            self.debug = !self.debug;
            events.push(ArenaEvent::DebugToggled {
                enabled: self.debug,
            });
        }

        let ctx = TickContext {
            elapsed_ms: elapsed.as_secs_f32() * 1000.0,
            input,
            paused: self.paused,
            debug: self.debug,
        };

        events.extend(self.arena.tick(&ctx));
        self.ticks += 1;

        FrameOutput {
            draw_list: DrawList::build(&self.arena, ctx.debug),
            events,
        }
    }

    /// Bounded headless run: `ticks` frames spaced `step` apart with the same keys held.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn run_ticks(&mut self, ticks: usize, step: Duration, pressed: &[LogicalKey]) -> FrameOutput {
        let mut events = Vec::new();
        let mut draw_list = DrawList::build(&self.arena, self.debug);
        for _ in 0..ticks {
            let now = self.last_time + step;
            let output = self.frame(now, pressed.iter().copied());
            events.extend(output.events);
            draw_list = output.draw_list;
        }
        FrameOutput { draw_list, events }
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot::capture(&self.arena, self.ticks, self.paused)
    }
}

/// The most recent draw list, read by the presentation systems.
#[derive(Resource, Debug, Default)]
pub struct LatestFrame {
    pub draw_list: DrawList,
}

/// Drives one arena tick per Bevy frame from the simulation clock and keyboard.
pub fn drive_frame_loop(
    clock: Res<SimulationClock>,
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut frame_loop: ResMut<FrameLoop>,
    mut latest: ResMut<LatestFrame>,
    mut writer: MessageWriter<ArenaEvent>,
) {
    let output = frame_loop.frame(clock.elapsed(), bindings.pressed(&keyboard));

    for event in output.events {
        if let ArenaEvent::DebugToggled { enabled: true } = event {
            match frame_loop.snapshot().to_json() {
                Ok(json) => info!("Arena snapshot: {}", json),
                Err(err) => warn!("Failed to serialise arena snapshot: {}", err),
            }
        }
        writer.write(event);
    }

    latest.draw_list = output.draw_list;
}

#[cfg(test)]
mod tests {
    use bevy::color::Color;

    use super::*;
    use crate::{
        animation::AnimationTiming,
        arena::{config::ArenaSettings, geometry::Rect, obstacle::Obstacle},
        dialogue::interaction::{InteractionPhase, InteractionState},
        npc::components::{Npc, NpcId},
        player::components::Player,
        render::draw_list::DrawCommand,
    };

    const STEP: Duration = Duration::from_millis(16);

    fn arena(player: Rect, obstacles: Vec<Obstacle>, npcs: Vec<Npc>) -> Arena {
        Arena::new(
            Player::new(player, 3.0, Color::WHITE),
            obstacles,
            npcs,
            InteractionState::new(70.0).expect("valid radius"),
            AnimationTiming::new(100.0, 4).expect("valid timing"),
            None,
        )
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h).expect("valid rect")
    }

    fn two_line_npc() -> Npc {
        Npc::new(
            NpcId::new(0),
            "Professor Quirk",
            rect(300.0, 100.0, 64.0, 64.0),
            vec!["A".to_string(), "B".to_string()],
            Color::WHITE,
        )
        .expect("valid npc")
    }

    fn line_on_surface(frame_loop: &FrameLoop) -> Option<String> {
        frame_loop
            .arena()
            .interaction()
            .surface()
            .map(|surface| surface.line.clone())
    }

    #[test]
    fn elapsed_is_the_gap_between_frames() {
        let mut frame_loop = FrameLoop::new(arena(rect(100.0, 100.0, 8.0, 8.0), vec![], vec![]));
        // The first frame measures from zero, so it sees the full 150 ms.
        frame_loop.frame(Duration::from_millis(150), [LogicalKey::Right]);
        assert_eq!(frame_loop.arena().player().frame_index(), 1);
        frame_loop.frame(Duration::from_millis(200), [LogicalKey::Right]);
        assert_eq!(frame_loop.arena().player().frame_index(), 1);
        frame_loop.frame(Duration::from_millis(320), [LogicalKey::Right]);
        assert_eq!(frame_loop.arena().player().frame_index(), 2);
    }

    #[test]
    fn wall_stops_the_actor_before_it() {
        let obstacles = vec![Obstacle::wall(rect(60.0, 0.0, 20.0, 200.0), Color::BLACK)];
        let mut frame_loop = FrameLoop::new(arena(rect(50.0, 50.0, 8.0, 8.0), obstacles, vec![]));

        let mut previous_x = frame_loop.arena().player().rect.x;
        for _ in 0..20 {
            frame_loop.run_ticks(1, STEP, &[LogicalKey::Right]);
            let player = &frame_loop.arena().player().rect;
            assert!(player.x + player.width <= 60.0);
            assert!(player.x >= previous_x);
            previous_x = player.x;
        }
        assert_eq!(frame_loop.arena().player().rect.x, 50.0);
    }

    #[test]
    fn wall_stops_a_moving_actor_once_it_reaches_the_edge() {
        let obstacles = vec![Obstacle::wall(rect(60.0, 0.0, 20.0, 200.0), Color::BLACK)];
        let mut frame_loop = FrameLoop::new(arena(rect(20.0, 50.0, 8.0, 8.0), obstacles, vec![]));

        frame_loop.run_ticks(30, STEP, &[LogicalKey::Right]);
        let player = frame_loop.arena().player().rect;
        // 20 + 3k + 8 <= 60 holds up to k = 10.
        assert_eq!(player.x, 50.0);
        assert!(frame_loop.arena().player().moving);
    }

    #[test]
    fn held_interact_advances_only_once() {
        let mut frame_loop = FrameLoop::new(arena(
            rect(260.0, 100.0, 64.0, 64.0),
            vec![],
            vec![two_line_npc()],
        ));

        let output = frame_loop.run_ticks(10, STEP, &[LogicalKey::Interact]);
        let opened = output
            .events
            .iter()
            .filter(|event| matches!(event, ArenaEvent::DialogueOpened { .. }))
            .count();
        assert_eq!(opened, 1);
        assert!(!output
            .events
            .iter()
            .any(|event| matches!(event, ArenaEvent::DialogueAdvanced { .. })));
        assert_eq!(frame_loop.arena().npcs()[0].cursor(), 1);
        assert_eq!(line_on_surface(&frame_loop).as_deref(), Some("A"));
    }

    #[test]
    fn two_line_conversation_survives_leaving_and_returning() {
        let mut frame_loop = FrameLoop::new(arena(
            rect(260.0, 100.0, 64.0, 64.0),
            vec![],
            vec![two_line_npc()],
        ));

        frame_loop.run_ticks(1, STEP, &[LogicalKey::Interact]);
        assert_eq!(line_on_surface(&frame_loop).as_deref(), Some("A"));
        assert_eq!(frame_loop.arena().npcs()[0].cursor(), 1);

        frame_loop.run_ticks(1, STEP, &[]);
        frame_loop.run_ticks(1, STEP, &[LogicalKey::Interact]);
        assert_eq!(line_on_surface(&frame_loop).as_deref(), Some("B"));
        assert_eq!(frame_loop.arena().npcs()[0].cursor(), 0);

        frame_loop.run_ticks(1, STEP, &[LogicalKey::Interact]);
        assert_eq!(line_on_surface(&frame_loop).as_deref(), Some("B"));

        // Walk left out of range: 3 px per tick from a 40 px gap.
        let output = frame_loop.run_ticks(12, STEP, &[LogicalKey::Left]);
        assert!(output
            .events
            .contains(&ArenaEvent::DialogueClosed { npc: NpcId::new(0) }));
        assert_eq!(frame_loop.arena().interaction().phase(), InteractionPhase::Idle);
        assert!(!frame_loop.arena().npcs()[0].is_talking());

        frame_loop.run_ticks(12, STEP, &[LogicalKey::Right]);
        assert_eq!(
            frame_loop.arena().interaction().phase(),
            InteractionPhase::Proximate(NpcId::new(0))
        );
        frame_loop.run_ticks(1, STEP, &[LogicalKey::Interact]);
        assert_eq!(line_on_surface(&frame_loop).as_deref(), Some("A"));
        assert_eq!(frame_loop.arena().npcs()[0].cursor(), 1);
    }

    #[test]
    fn pause_freezes_movement_but_keeps_rendering() {
        let mut frame_loop = FrameLoop::new(arena(rect(100.0, 100.0, 8.0, 8.0), vec![], vec![]));

        let output = frame_loop.frame(STEP, [LogicalKey::Pause]);
        assert!(frame_loop.is_paused());
        assert!(output.events.contains(&ArenaEvent::PauseToggled { paused: true }));
        assert!(!output.draw_list.commands().is_empty());

        frame_loop.run_ticks(5, STEP, &[LogicalKey::Right]);
        assert_eq!(frame_loop.arena().player().rect.x, 100.0);

        frame_loop.run_ticks(1, STEP, &[]);
        frame_loop.run_ticks(1, STEP, &[LogicalKey::Pause]);
        assert!(!frame_loop.is_paused());
        frame_loop.run_ticks(1, STEP, &[LogicalKey::Right]);
        assert_eq!(frame_loop.arena().player().rect.x, 103.0);
    }

    #[test]
    fn debug_toggle_adds_outlines() {
        let obstacles = vec![Obstacle::wall(rect(0.0, 0.0, 10.0, 10.0), Color::BLACK)];
        let mut frame_loop = FrameLoop::new(arena(rect(100.0, 100.0, 8.0, 8.0), obstacles, vec![]));

        let output = frame_loop.frame(STEP, [LogicalKey::Debug]);
        assert!(frame_loop.is_debug());
        assert!(output
            .draw_list
            .commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::DebugOutline { .. })));
    }

    #[test]
    fn default_scene_runs_headless() {
        let arena = Arena::from_settings(&ArenaSettings::default()).expect("default arena");
        let mut frame_loop = FrameLoop::new(arena);
        frame_loop.run_ticks(120, STEP, &[LogicalKey::Down, LogicalKey::Right]);
        assert_eq!(frame_loop.ticks(), 120);
    }

    #[test]
    fn drive_system_publishes_frames_and_events() {
        let mut app = App::new();
        app.add_message::<ArenaEvent>()
            .init_resource::<KeyBindings>()
            .init_resource::<LatestFrame>()
            .insert_resource(SimulationClock::default())
            .insert_resource(ButtonInput::<KeyCode>::default())
            .insert_resource(FrameLoop::new(arena(
                rect(100.0, 100.0, 8.0, 8.0),
                vec![],
                vec![],
            )))
            .add_systems(Update, drive_frame_loop);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyP);
        app.update();

        assert!(app.world().resource::<FrameLoop>().is_paused());
        assert!(!app
            .world()
            .resource::<LatestFrame>()
            .draw_list
            .commands()
            .is_empty());

        let messages = app.world().resource::<Messages<ArenaEvent>>();
        let mut cursor = messages.get_cursor();
        let published: Vec<_> = cursor.read(messages).cloned().collect();
        assert_eq!(published, vec![ArenaEvent::PauseToggled { paused: true }]);
    }
}
