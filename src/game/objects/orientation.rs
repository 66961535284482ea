// Facing direction of walking characters

use crate::math::Vector;

/// Which way a character faces. Screen coordinates: north is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    North,
    #[default]
    South,
    East,
    West,
}

impl Orientation {
    /// Facing implied by a velocity. Horizontal movement wins over vertical;
    /// standing still keeps `self`.
    pub fn from_velocity(self, velocity: Vector) -> Self {
        if velocity.x > 0.0 {
            Self::East
        } else if velocity.x < 0.0 {
            Self::West
        } else if velocity.y > 0.0 {
            Self::South
        } else if velocity.y < 0.0 {
            Self::North
        } else {
            self
        }
    }

    /// Animation shown while standing still
    pub fn idle_animation(&self) -> &'static str {
        match self {
            Self::North => "idling_up",
            Self::South => "idling_down",
            Self::East => "idling_right",
            Self::West => "idling_left",
        }
    }

    /// Animation shown while moving this way
    pub fn walk_animation(&self) -> &'static str {
        match self {
            Self::North => "walking_up",
            Self::South => "walking_down",
            Self::East => "walking_right",
            Self::West => "walking_left",
        }
    }
}

/// Animation for a character facing `orientation` and moving at `velocity`.
/// X is checked before y.
pub fn select_animation(orientation: Orientation, velocity: Vector) -> &'static str {
    if velocity.x == 0.0 && velocity.y == 0.0 {
        return orientation.idle_animation();
    }
    let moving = if velocity.x > 0.0 {
        Orientation::East
    } else if velocity.x < 0.0 {
        Orientation::West
    } else if velocity.y > 0.0 {
        Orientation::South
    } else {
        Orientation::North
    };
    moving.walk_animation()
}
