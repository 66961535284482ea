// Player controller: movement, collision, interaction and animation

use super::collision;
use super::group::GameGroup;
use super::object::{EntityId, Interaction, RectMode};
use super::orientation::{select_animation, Orientation};
use super::stats::PlayerStats;
use crate::engine::error::{EngineError, Result};
use crate::engine::input::{Action, InputState};
use crate::math::{per_frame, to_pixels, Rect, Vector};
use glam::IVec2;
use std::collections::HashSet;

/// Something the player triggered this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The player wants to talk to this entity
    Chat(EntityId),
}

/// Drives the game object the player controls. The object itself lives in
/// the world group; the controller only keeps its id.
#[derive(Debug, Clone)]
pub struct Player {
    id: EntityId,
    orientation: Orientation,
    velocity: Vector,
    /// Time since the last conversation ended
    since_last_chat_ms: u32,
    stats: PlayerStats,
}

impl Player {
    pub fn new(id: EntityId, stats: PlayerStats) -> Self {
        Self {
            id,
            orientation: Orientation::default(),
            velocity: Vector::ZERO,
            since_last_chat_ms: stats.chat_cooldown_ms,
            stats,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Start the chat cooldown over, e.g. when a conversation ends
    pub fn reset_chat_cooldown(&mut self) {
        self.since_last_chat_ms = 0;
    }

    /// Advance the player one frame.
    ///
    /// `obstacles` are the ids the player cannot walk through and
    /// `interactables` the ids it may talk to; both refer to `world` members.
    pub fn update(
        &mut self,
        delta_ms: u32,
        input: &InputState,
        world: &mut GameGroup,
        obstacles: &HashSet<EntityId>,
        interactables: &HashSet<EntityId>,
    ) -> Result<Option<PlayerEvent>> {
        self.since_last_chat_ms = self.since_last_chat_ms.saturating_add(delta_ms);

        let (horizontal, vertical) = input.direction();
        let step = per_frame(self.stats.speed, delta_ms);
        self.velocity = Vector::new(horizontal * step, vertical * step);

        let body = world
            .get_mut(self.id)
            .ok_or(EngineError::UnknownEntity(self.id))?;
        body.move_by(to_pixels(self.velocity));
        self.orientation = self.orientation.from_velocity(self.velocity);

        self.collide(world, obstacles)?;

        let event = if input.is_pressed(Action::Interact)
            && self.since_last_chat_ms >= self.stats.chat_cooldown_ms
        {
            self.find_chat_partner(world, interactables)?
        } else {
            None
        };

        let body = world
            .get_mut(self.id)
            .ok_or(EngineError::UnknownEntity(self.id))?;
        if body.animator().is_some() {
            body.play(select_animation(self.orientation, self.velocity), false)?;
        }
        body.update(delta_ms)?;

        Ok(event)
    }

    fn collide(&mut self, world: &mut GameGroup, obstacles: &HashSet<EntityId>) -> Result<()> {
        let mut colliders = world.select_rect(&RectMode::Collider);
        let (body, others) = colliders
            .split_member_mut(self.id)
            .ok_or(EngineError::UnknownEntity(self.id))?;

        if body.has_mode(&RectMode::FootCollider) {
            body.select_rect(&RectMode::FootCollider)?;
        }

        for obstacle in others.iter().filter(|other| obstacles.contains(&other.id())) {
            if body.rect().intersects(obstacle.rect()) {
                let side = collision::resolve(body.rect_mut(), &mut self.velocity, obstacle.rect());
                log::trace!("Player bumped {} on its {:?} side", obstacle.name(), side);
            }
        }
        Ok(())
    }

    /// Reach rect pointing from `center` the way the player faces
    pub fn interaction_rect(&self, center: IVec2) -> Rect {
        let thickness = self.stats.reach_thickness;
        let mut reach = Rect::new(0, 0, thickness, thickness);
        match self.orientation {
            Orientation::North => {
                reach.h = self.stats.north_reach();
                reach.set_mid_bottom(center);
            }
            Orientation::South => {
                reach.h = self.stats.south_reach();
                reach.set_mid_top(center);
            }
            Orientation::East => {
                reach.w = self.stats.interaction_reach;
                reach.set_mid_left(center);
            }
            Orientation::West => {
                reach.w = self.stats.interaction_reach;
                reach.set_mid_right(center);
            }
        }
        reach
    }

    fn find_chat_partner(
        &self,
        world: &GameGroup,
        interactables: &HashSet<EntityId>,
    ) -> Result<Option<PlayerEvent>> {
        let body = world.get(self.id).ok_or(EngineError::UnknownEntity(self.id))?;
        let center = body
            .rect_in_mode(&RectMode::Base)
            .unwrap_or(*body.rect())
            .center();
        let reach = self.interaction_rect(center);

        let target = world
            .iter()
            .filter(|other| other.id() != self.id && interactables.contains(&other.id()))
            .find(|other| reach.intersects(&other.render_rect()) && other.offers(Interaction::Chat));

        Ok(target.map(|other| {
            log::debug!("Player reached {} ({})", other.name(), other.id());
            PlayerEvent::Chat(other.id())
        }))
    }
}
