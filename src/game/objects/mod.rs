// World entities
//
// - `object`: game objects, rect modes and compositing
// - `group`: ordered collections with scroll and the rect-mode guard
// - `player`: the player controller
// - `collision`: directional rect resolution
// - `orientation`: facing and animation choice
// - `stats`: player tuning values

pub mod collision;
pub mod group;
pub mod object;
pub mod orientation;
pub mod player;
pub mod stats;

pub use group::{GameGroup, Others, RectModeGuard};
pub use object::{EntityId, GameObject, GameObjectBuilder, Interaction, RectMode};
pub use orientation::Orientation;
pub use player::{Player, PlayerEvent};
pub use stats::{PlayerStats, BASE_STATS};
