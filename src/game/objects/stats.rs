// Player movement and interaction tuning

use serde::{Deserialize, Serialize};

/// Tuning values for the player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    /// Movement speed in pixels per second, applied per axis
    pub speed: f32,
    /// Length of the interaction reach in pixels
    pub interaction_reach: i32,
    /// Thickness of the interaction reach in pixels
    pub reach_thickness: i32,
    /// Minimum time between two chats, in milliseconds
    pub chat_cooldown_ms: u32,
}

/// Stock tuning: six 32px tiles per second
pub const BASE_STATS: PlayerStats = PlayerStats {
    speed: 32.0 * 6.0,
    interaction_reach: 30,
    reach_thickness: 3,
    chat_cooldown_ms: 180,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl PlayerStats {
    /// Reach towards the top of the screen. Shorter than the horizontal reach
    /// to fake perspective.
    pub fn north_reach(&self) -> i32 {
        (self.interaction_reach * 2) / 3
    }

    /// Reach towards the bottom of the screen
    pub fn south_reach(&self) -> i32 {
        (self.interaction_reach * 3) / 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = PlayerStats::default();
        assert_eq!(stats.speed, 192.0);
        assert_eq!(stats.interaction_reach, 30);
        assert_eq!(stats.chat_cooldown_ms, 180);
    }

    #[test]
    fn test_vertical_reach_is_asymmetric() {
        let stats = PlayerStats::default();
        assert_eq!(stats.north_reach(), 20);
        assert_eq!(stats.south_reach(), 22);
        assert!(stats.north_reach() < stats.south_reach());
    }
}
