// Axis-aligned push-out for characters walking into obstacles

use super::orientation::Orientation;
use crate::math::{Rect, Vector};

/// Which side of `mover` ran into `obstacle`.
///
/// Compares penetration depth between centres: a deeper vertical overlap
/// means the contact is on a vertical edge (east/west), otherwise on a
/// horizontal one (north/south). Aligned centres always count as vertical.
pub fn bumped_side(mover: &Rect, obstacle: &Rect) -> Orientation {
    let vertical_contact = || {
        if mover.center_y() < obstacle.center_y() {
            Orientation::South
        } else {
            Orientation::North
        }
    };
    let vertical_depth = if mover.center_y() < obstacle.center_y() {
        mover.bottom() - obstacle.top()
    } else {
        obstacle.bottom() - mover.top()
    };

    if mover.center_x() < obstacle.center_x() {
        let horizontal_depth = mover.right() - obstacle.left();
        if vertical_depth > horizontal_depth {
            Orientation::East
        } else {
            vertical_contact()
        }
    } else if mover.center_x() > obstacle.center_x() {
        let horizontal_depth = obstacle.right() - mover.left();
        if vertical_depth > horizontal_depth {
            Orientation::West
        } else {
            vertical_contact()
        }
    } else {
        vertical_contact()
    }
}

/// Push `mover` flush against `obstacle` and stop its velocity on the
/// bumped axis. Returns the bumped side.
pub fn resolve(mover: &mut Rect, velocity: &mut Vector, obstacle: &Rect) -> Orientation {
    let side = bumped_side(mover, obstacle);
    match side {
        Orientation::North => {
            velocity.y = 0.0;
            mover.set_top(obstacle.bottom());
        }
        Orientation::South => {
            velocity.y = 0.0;
            mover.set_bottom(obstacle.top());
        }
        Orientation::East => {
            velocity.x = 0.0;
            mover.set_right(obstacle.left());
        }
        Orientation::West => {
            velocity.x = 0.0;
            mover.set_left(obstacle.right());
        }
    }
    side
}
