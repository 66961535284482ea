// Ordered collections of game objects with a scroll offset

use super::object::{EntityId, GameObject, RectMode};
use crate::engine::error::Result;
use crate::engine::renderer::{Surface, Viewport};
use glam::IVec2;
use std::ops::{Deref, DerefMut};

/// Owns its members; each `EntityId` appears at most once
#[derive(Debug, Default)]
pub struct GameGroup {
    members: Vec<GameObject>,
    /// Camera scroll, applied only when drawing
    offset: IVec2,
}

impl GameGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object. Returns false if it was already a member.
    pub fn add(&mut self, object: GameObject) -> bool {
        if self.contains(object.id()) {
            return false;
        }
        self.members.push(object);
        true
    }

    pub fn remove(&mut self, id: EntityId) -> Option<GameObject> {
        let index = self.members.iter().position(|member| member.id() == id)?;
        Some(self.members.remove(index))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.members.iter().any(|member| member.id() == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&GameObject> {
        self.members.iter().find(|member| member.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut GameObject> {
        self.members.iter_mut().find(|member| member.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.members.iter_mut()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.members.iter().map(GameObject::id).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Move the camera. Members stay where they are.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        self.offset += IVec2::new(dx, dy);
    }

    /// One member mutably, plus read access to everyone else
    pub fn split_member_mut(&mut self, id: EntityId) -> Option<(&mut GameObject, Others<'_>)> {
        let index = self.members.iter().position(|member| member.id() == id)?;
        let (before, rest) = self.members.split_at_mut(index);
        let (member, after) = rest.split_first_mut()?;
        Some((member, Others { before, after }))
    }

    /// Update every member in group order
    pub fn update(&mut self, delta_ms: u32) -> Result<()> {
        for member in &mut self.members {
            member.update(delta_ms)?;
        }
        Ok(())
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        self.draw_with_offset(surface, self.offset);
    }

    /// Draw back to front: members with a lower bottom edge first, ties in
    /// group order
    pub fn draw_with_offset<S: Surface>(&self, surface: &mut S, offset: IVec2) {
        for member in self.depth_sorted() {
            surface.blit(member.image(), member.render_rect().position() - offset);
        }
    }

    /// Like `draw`, skipping members entirely outside `viewport`
    pub fn draw_visible<S: Surface>(&self, surface: &mut S, viewport: &Viewport) {
        for member in self.depth_sorted() {
            let rect = member.render_rect();
            if viewport.intersects_rect(&rect) {
                surface.blit(member.image(), rect.position() - self.offset);
            }
        }
    }

    fn depth_sorted(&self) -> Vec<&GameObject> {
        let mut sorted: Vec<&GameObject> = self.members.iter().collect();
        sorted.sort_by_key(|member| member.render_rect().bottom());
        sorted
    }

    /// Switch every member that has `mode` to it until the guard drops, then
    /// put every member back in the mode it had before
    pub fn select_rect(&mut self, mode: &RectMode) -> RectModeGuard<'_> {
        let saved = self
            .members
            .iter()
            .map(|member| (member.id(), member.current_mode().clone()))
            .collect();

        for member in &mut self.members {
            if member.has_mode(mode) {
                if let Err(err) = member.select_rect(mode) {
                    log::warn!("{} ({}) kept its rect mode: {}", member.name(), member.id(), err);
                }
            }
        }

        RectModeGuard { group: self, saved }
    }
}

/// The rest of a group while one member is borrowed mutably
pub struct Others<'a> {
    before: &'a [GameObject],
    after: &'a [GameObject],
}

impl<'a> Others<'a> {
    /// Members in group order, the borrowed one left out
    pub fn iter(&self) -> impl Iterator<Item = &'a GameObject> {
        let (before, after) = (self.before, self.after);
        before.iter().chain(after.iter())
    }
}

/// Scoped rect-mode override returned by [`GameGroup::select_rect`]
pub struct RectModeGuard<'a> {
    group: &'a mut GameGroup,
    saved: Vec<(EntityId, RectMode)>,
}

impl Deref for RectModeGuard<'_> {
    type Target = GameGroup;

    fn deref(&self) -> &GameGroup {
        self.group
    }
}

impl DerefMut for RectModeGuard<'_> {
    fn deref_mut(&mut self) -> &mut GameGroup {
        self.group
    }
}

impl Drop for RectModeGuard<'_> {
    fn drop(&mut self) {
        for (id, mode) in self.saved.drain(..) {
            // Members removed while the guard was held have nothing to restore
            let Some(member) = self.group.get_mut(id) else {
                continue;
            };
            if let Err(err) = member.select_rect(&mode) {
                log::warn!("Could not restore rect mode of {}: {}", id, err);
            }
        }
    }
}
