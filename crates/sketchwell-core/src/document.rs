//! The shape document: arena storage, group registry, and z-order.

use crate::shapes::{GroupId, Shape, ShapeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::SystemTime;
use uuid::Uuid;

/// A group of shapes selected and moved as one unit.
///
/// Membership is immutable except through group/ungroup; the bounds are
/// cached at creation and shifted in lockstep when the group moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Opaque group identifier.
    pub id: GroupId,
    /// Member shape ids, in arena order.
    pub shape_ids: Vec<ShapeId>,
    /// Cached aggregate bounding box.
    pub bounds: Rect,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

/// The document: a dense shape arena with stable ids, plus groups.
///
/// Shape ids come from a monotonic counter and are independent of storage
/// position; the id→slot lookup is rebuilt on every structural change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    shapes: Vec<Shape>,
    groups: HashMap<GroupId, Group>,
    next_id: u64,
    #[serde(skip)]
    index: HashMap<ShapeId, usize>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            groups: HashMap::new(),
            next_id: 0,
            index: HashMap::new(),
        }
    }

    /// Allocate the next shape id.
    pub fn allocate_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .shapes
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id(), i))
            .collect();
    }

    /// Insert a shape as given.
    pub fn insert(&mut self, shape: Shape) {
        let id = shape.id();
        self.shapes.push(shape);
        self.index.insert(id, self.shapes.len() - 1);
    }

    /// Insert a shape above everything else.
    pub fn insert_on_top(&mut self, mut shape: Shape) {
        shape.z_index = self.top_z() + 1;
        self.insert(shape);
    }

    /// Remove a shape. Its group membership is pruned; a group left with
    /// fewer than two members is dissolved.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let slot = self.index.remove(&id)?;
        let shape = self.shapes.remove(slot);
        self.rebuild_index();

        if let Some(group_id) = shape.group_id {
            let remaining = if let Some(group) = self.groups.get_mut(&group_id) {
                group.shape_ids.retain(|&sid| sid != id);
                group.shape_ids.len()
            } else {
                0
            };
            if remaining < 2 {
                self.ungroup(group_id);
            }
        }
        Some(shape)
    }

    /// Get a shape by id.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.index.get(&id).map(|&slot| &self.shapes[slot])
    }

    /// Get a mutable shape by id. The caller is responsible for rebuilding
    /// the renderable after a geometry or style change.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.index.get(&id).map(|&slot| &mut self.shapes[slot])
    }

    /// Whether a shape with this id exists.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the document has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in arena (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Shapes in paint order: ascending z, arena order breaking ties.
    pub fn shapes_bottom_up(&self) -> Vec<&Shape> {
        let mut ordered: Vec<&Shape> = self.shapes.iter().collect();
        ordered.sort_by_key(|s| s.z_index);
        ordered
    }

    /// Shapes in hit-test order: descending z, later-inserted first among
    /// ties.
    pub fn shapes_top_down(&self) -> Vec<&Shape> {
        let mut ordered = self.shapes_bottom_up();
        ordered.reverse();
        ordered
    }

    /// Aggregate bounds of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .map(Shape::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// The topmost shape whose body or outline is under the point.
    pub fn topmost_at(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.shapes_top_down()
            .into_iter()
            .find(|s| s.hit_test(point, tolerance))
            .map(Shape::id)
    }

    /// Ids of shapes whose bounds intersect the rectangle, in paint order.
    pub fn shapes_in_rect(&self, rect: Rect) -> Vec<ShapeId> {
        self.shapes_bottom_up()
            .into_iter()
            .filter(|s| rect.intersect(s.bounds()).area() > 0.0)
            .map(Shape::id)
            .collect()
    }

    // --- Z-order ---

    /// Highest z-index in use (0 when empty).
    pub fn top_z(&self) -> i64 {
        self.shapes.iter().map(|s| s.z_index).max().unwrap_or(0)
    }

    /// Lowest z-index in use (0 when empty).
    pub fn bottom_z(&self) -> i64 {
        self.shapes.iter().map(|s| s.z_index).min().unwrap_or(0)
    }

    /// Put a shape above every other shape.
    pub fn bring_to_front(&mut self, id: ShapeId) {
        let Some(max) = self.z_extreme_excluding(id, true) else {
            return;
        };
        if let Some(shape) = self.get_mut(id) {
            shape.z_index = max + 1;
        }
    }

    /// Put a shape below every other shape.
    pub fn send_to_back(&mut self, id: ShapeId) {
        let Some(min) = self.z_extreme_excluding(id, false) else {
            return;
        };
        if let Some(shape) = self.get_mut(id) {
            shape.z_index = min - 1;
        }
    }

    /// Move a shape just beyond the next higher distinct z-index, jumping
    /// over any shapes tied at that level.
    pub fn bring_forward(&mut self, id: ShapeId) {
        let Some(z) = self.get(id).map(|s| s.z_index) else {
            return;
        };
        let next = self
            .shapes
            .iter()
            .filter(|s| s.id() != id && s.z_index > z)
            .map(|s| s.z_index)
            .min();
        if let Some(next) = next {
            if let Some(shape) = self.get_mut(id) {
                shape.z_index = next + 1;
            }
        }
    }

    /// Move a shape just beyond the next lower distinct z-index.
    pub fn send_backward(&mut self, id: ShapeId) {
        let Some(z) = self.get(id).map(|s| s.z_index) else {
            return;
        };
        let prev = self
            .shapes
            .iter()
            .filter(|s| s.id() != id && s.z_index < z)
            .map(|s| s.z_index)
            .max();
        if let Some(prev) = prev {
            if let Some(shape) = self.get_mut(id) {
                shape.z_index = prev - 1;
            }
        }
    }

    fn z_extreme_excluding(&self, id: ShapeId, max: bool) -> Option<i64> {
        let others = self.shapes.iter().filter(|s| s.id() != id).map(|s| s.z_index);
        if max { others.max() } else { others.min() }
    }

    // --- Groups ---

    /// Group the given shapes. Requires at least two live ids; members of
    /// existing groups are re-homed into the new group (their old groups
    /// dissolve). Returns the new group's id.
    pub fn group(&mut self, ids: &[ShapeId]) -> Option<GroupId> {
        let live: Vec<ShapeId> = ids.iter().copied().filter(|&id| self.contains(id)).collect();
        if live.len() < 2 {
            return None;
        }

        let old_groups: Vec<GroupId> = live
            .iter()
            .filter_map(|&id| self.get(id).and_then(|s| s.group_id))
            .collect();
        for group_id in old_groups {
            self.ungroup(group_id);
        }

        let bounds = live
            .iter()
            .filter_map(|&id| self.get(id).map(Shape::bounds))
            .reduce(|acc, b| acc.union(b))?;

        // Keep member order consistent with the arena
        let members: Vec<ShapeId> = self
            .shapes
            .iter()
            .map(Shape::id)
            .filter(|id| live.contains(id))
            .collect();

        let group = Group {
            id: Uuid::new_v4(),
            shape_ids: members.clone(),
            bounds,
            created_at: SystemTime::now(),
        };
        let group_id = group.id;
        self.groups.insert(group_id, group);
        for id in members {
            if let Some(shape) = self.get_mut(id) {
                shape.group_id = Some(group_id);
            }
        }
        Some(group_id)
    }

    /// Dissolve a group, clearing membership on its shapes. Returns the
    /// former member ids.
    pub fn ungroup(&mut self, group_id: GroupId) -> Option<Vec<ShapeId>> {
        let group = self.groups.remove(&group_id)?;
        for &id in &group.shape_ids {
            if let Some(shape) = self.get_mut(id) {
                shape.group_id = None;
            }
        }
        Some(group.shape_ids)
    }

    /// Look up a group.
    pub fn group_by_id(&self, group_id: GroupId) -> Option<&Group> {
        self.groups.get(&group_id)
    }

    /// Member ids of a group (empty if unknown).
    pub fn group_members(&self, group_id: GroupId) -> Vec<ShapeId> {
        self.groups
            .get(&group_id)
            .map(|g| g.shape_ids.clone())
            .unwrap_or_default()
    }

    /// All group ids.
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.groups.keys().copied().collect()
    }

    /// Recompute a group's cached bounds from its members.
    ///
    /// Called during group moves/resizes; when every member translated by
    /// the same delta this shifts the cached box by exactly that delta.
    pub fn refresh_group_bounds(&mut self, group_id: GroupId) {
        let bounds = self
            .group_members(group_id)
            .iter()
            .filter_map(|&id| self.get(id).map(Shape::bounds))
            .reduce(|acc, b| acc.union(b));
        if let (Some(group), Some(bounds)) = (self.groups.get_mut(&group_id), bounds) {
            group.bounds = bounds;
        }
    }

    // --- Serialization ---

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON, rebuilding derived state (the slot
    /// lookup and renderable paths).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut doc: Self = serde_json::from_str(json)?;
        doc.rebuild_index();
        for shape in &mut doc.shapes {
            shape.rebuild_renderable();
        }
        Ok(doc)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
