//! Arena module: geometry, obstacles, configuration and the scene that ties them together.
pub mod config;
pub mod events;
pub mod geometry;
pub mod obstacle;
pub mod scene;
pub mod snapshot;
