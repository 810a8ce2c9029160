//! World domain for Kindle.
//!
//! Responsible for:
//! - Classifying room coordinates into biomes
//! - The `Room` model and its hazard queries
//! - Generating room content on first visit
//! - Caching every generated room for the session (`RoomRegistry`)

mod biome;
mod generation;
mod registry;
mod room;

pub use biome::Biome;
pub use generation::{generate_room, DECORATION_COUNT, ECHO_CHANCE, PYRE_CHANCE};
pub use registry::RoomRegistry;
pub use room::{FragileIce, Obstacle, ObstacleKind, Room};
