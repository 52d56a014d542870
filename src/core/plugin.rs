//! CorePlugin wires the simulation clock, the frame loop and arena event logging.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

use crate::{
    arena::events::ArenaEvent,
    core::frame_loop::{drive_frame_loop, FrameLoop, LatestFrame},
};

const DEFAULT_TIME_SCALE: f32 = 1.0;
const MIN_TIME_SCALE: f32 = 0.001;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Tracks scaled simulation time derived from real frame deltas.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    last_real_delta: Duration,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SimulationClock {
    /// Creates a new clock with the provided time-scale multiplier.
    pub fn new(time_scale: f32) -> Self {
        let clamped = time_scale.max(MIN_TIME_SCALE);
        Self {
            time_scale: clamped,
            last_real_delta: Duration::ZERO,
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the current time-scale multiplier.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Last real (unscaled) delta reported by Bevy's Time resource.
    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn last_real_delta(&self) -> Duration {
        self.last_real_delta
    }

    /// Last scaled delta after applying the multiplier.
    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn last_scaled_delta(&self) -> Duration {
        self.last_scaled_delta
    }

    /// Returns the total scaled duration elapsed since the clock was initialised.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Applies a real delta to the clock, storing both the real and scaled durations.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_real_delta = real_delta;
        self.last_scaled_delta = real_delta.mul_f32(self.time_scale);
        self.elapsed += self.last_scaled_delta;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

/// Registers the clock, the arena event channel and the per-frame tick.
///
/// Expects a `FrameLoop` resource to be inserted before the app runs.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    time_scale: f32,
}

impl CorePlugin {
    /// Creates a CorePlugin with the provided time-scale multiplier.
    pub const fn with_time_scale(time_scale: f32) -> Self {
        Self { time_scale }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::with_time_scale(DEFAULT_TIME_SCALE)
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationClock::new(self.time_scale))
            .init_resource::<LatestFrame>()
            .add_message::<ArenaEvent>()
            .add_systems(Startup, log_startup_time_scale)
            .add_systems(
                Update,
                (update_simulation_clock, drive_frame_loop, log_arena_events).chain(),
            );

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_scaled_ticks);
        }
    }
}

fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_time_scale(clock: Res<SimulationClock>, frame_loop: Res<FrameLoop>) {
    let arena = frame_loop.arena();
    info!(
        "CorePlugin initialised with time scale: {:.3} | arena {:.0}x{:.0} | {} NPCs",
        clock.time_scale(),
        arena.width(),
        arena.height(),
        arena.npcs().len()
    );
}

fn log_arena_events(mut events: MessageReader<ArenaEvent>) {
    for event in events.read() {
        match event {
            ArenaEvent::DialogueOpened { npc, speaker, line } => {
                info!("{} ({}) says: \"{}\"", speaker, npc, line);
            }
            ArenaEvent::DialogueAdvanced { npc, speaker, line } => {
                debug!("{} ({}) continues: \"{}\"", speaker, npc, line);
            }
            ArenaEvent::DialogueClosed { npc } => {
                debug!("Conversation with {} closed", npc);
            }
            ArenaEvent::DoorToggled { obstacle, open } => {
                info!(
                    "Door {} is now {}",
                    obstacle,
                    if *open { "open" } else { "closed" }
                );
            }
            ArenaEvent::DoorBlocked { obstacle } => {
                warn!("Door {} cannot close while the player stands in it", obstacle);
            }
            ArenaEvent::PauseToggled { paused } => {
                info!("Simulation {}", if *paused { "paused" } else { "resumed" });
            }
            ArenaEvent::DebugToggled { enabled } => {
                info!("Debug view {}", if *enabled { "enabled" } else { "disabled" });
            }
        }
    }
}

#[cfg(feature = "core_debug")]
fn log_scaled_ticks(mut timer: ResMut<DebugTickTimer>, clock: Res<SimulationClock>) {
    if timer.timer.tick(clock.last_scaled_delta()).just_finished() {
        info!(
            target: "core_debug",
            "Sim elapsed: {:.2}s | scale: {:.3} | real dt: {:.4}s | scaled dt: {:.4}s",
            clock.elapsed().as_secs_f32(),
            clock.time_scale(),
            clock.last_real_delta().as_secs_f32(),
            clock.last_scaled_delta().as_secs_f32(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_scales_delta_with_multiplier() {
        let mut clock = SimulationClock::new(2.5);
        clock.tick(Duration::from_secs_f32(1.2));

        assert_eq!(clock.time_scale(), 2.5);
        assert_eq!(clock.last_real_delta(), Duration::from_secs_f32(1.2));
        assert_eq!(
            clock.last_scaled_delta(),
            Duration::from_secs_f32(1.2 * 2.5)
        );
        assert_eq!(clock.elapsed(), Duration::from_secs_f32(1.2 * 2.5));
    }

    #[test]
    fn plugin_ticks_the_frame_loop_each_update() {
        use crate::{
            arena::{config::ArenaSettings, scene::Arena},
            input::bindings::KeyBindings,
        };

        let arena = Arena::from_settings(&ArenaSettings::default()).expect("default arena");
        let mut app = App::new();
        app.add_plugins(bevy::time::TimePlugin)
            .init_resource::<KeyBindings>()
            .insert_resource(ButtonInput::<KeyCode>::default())
            .insert_resource(FrameLoop::new(arena))
            .add_plugins(CorePlugin::default());

        app.update();
        app.update();

        assert_eq!(app.world().resource::<FrameLoop>().ticks(), 2);
        assert!(!app
            .world()
            .resource::<LatestFrame>()
            .draw_list
            .commands()
            .is_empty());
    }

    #[test]
    fn clock_clamps_min_time_scale() {
        let clock = SimulationClock::new(0.0);
        assert!((clock.time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);

        let clock = SimulationClock::new(-5.0);
        assert!((clock.time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);
    }
}
