//! The interaction engine: tools, actions, and pointer-driven mutation.
//!
//! All mutation happens synchronously on the caller's thread, one pointer
//! event at a time. The renderer is an external collaborator that reads the
//! engine's views after each event; it is never awaited and never consulted.

use crate::document::Document;
use crate::history::History;
use crate::input::{Modifiers, MouseButton};
use crate::resolver::{self, CursorHint, ShapePart};
use crate::shapes::{GroupId, Shape, ShapeId, ShapeKind, ShapeStyle, TextMeasurer};
use crate::tools::Tool;
use crate::viewport::Viewport;
use kurbo::{Point, Rect, Vec2};

/// Default eraser brush radius in canvas units.
pub const DEFAULT_ERASER_RADIUS: f64 = 10.0;
/// Offset applied by the duplicate operation (not the alt-click path).
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(10.0, 10.0);

/// Bookkeeping for an in-flight move gesture.
///
/// Original geometry is captured at pointer-down; every move event reapplies
/// the full delta from those originals, so event coalescing in the host can
/// never make the shapes drift.
#[derive(Debug, Clone)]
struct DragState {
    /// Canvas point where the drag started.
    origin: Point,
    /// Geometry of every dragged shape at gesture start.
    originals: Vec<(ShapeId, ShapeKind)>,
    /// Groups participating in the drag (their cached bounds follow).
    groups: Vec<GroupId>,
    /// Whether any displacement was applied.
    moved: bool,
}

/// The in-flight action, advanced by pointer events.
#[derive(Debug, Clone, Default)]
enum Action {
    #[default]
    None,
    Drawing {
        id: ShapeId,
    },
    Moving(DragState),
    Resizing {
        id: ShapeId,
        part: ShapePart,
        resized: bool,
    },
    Panning {
        last_screen: Point,
    },
    Writing {
        id: ShapeId,
    },
    Erasing {
        erased_any: bool,
    },
}

/// Read-only view of the current action, for hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    None,
    Drawing,
    Moving,
    Resizing,
    Panning,
    Writing,
    Erasing,
}

/// The drawing-interaction engine.
///
/// Owns the document, viewport, selection, history, and the tool/action
/// state machine. Hosts feed it raw screen-space pointer events and read
/// back [`Engine::shapes`], [`Engine::selection`], and [`Engine::viewport`]
/// for rendering.
#[derive(Debug, Clone)]
pub struct Engine {
    document: Document,
    history: History,
    viewport: Viewport,
    tool: Tool,
    style: ShapeStyle,
    selection: Vec<ShapeId>,
    action: Action,
    /// Eraser brush radius in canvas units.
    pub eraser_radius: f64,
}

impl Engine {
    /// Create an engine with an empty document.
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let document = Document::new();
        Self {
            history: History::new(document.clone()),
            document,
            viewport: Viewport::new(viewport_width, viewport_height),
            tool: Tool::default(),
            style: ShapeStyle::default(),
            selection: Vec::new(),
            action: Action::None,
            eraser_radius: DEFAULT_ERASER_RADIUS,
        }
    }

    /// Create an engine around an existing document.
    pub fn with_document(document: Document, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            history: History::new(document.clone()),
            document,
            viewport: Viewport::new(viewport_width, viewport_height),
            tool: Tool::default(),
            style: ShapeStyle::default(),
            selection: Vec::new(),
            action: Action::None,
            eraser_radius: DEFAULT_ERASER_RADIUS,
        }
    }

    // --- Read views ---

    /// The document being edited.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Shapes in paint order (back to front).
    pub fn shapes(&self) -> Vec<&Shape> {
        self.document.shapes_bottom_up()
    }

    /// Currently selected shape ids.
    pub fn selection(&self) -> &[ShapeId] {
        &self.selection
    }

    /// The viewport (pan/zoom state).
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// The current action state.
    pub fn action(&self) -> ActionKind {
        match self.action {
            Action::None => ActionKind::None,
            Action::Drawing { .. } => ActionKind::Drawing,
            Action::Moving(_) => ActionKind::Moving,
            Action::Resizing { .. } => ActionKind::Resizing,
            Action::Panning { .. } => ActionKind::Panning,
            Action::Writing { .. } => ActionKind::Writing,
            Action::Erasing { .. } => ActionKind::Erasing,
        }
    }

    /// The style applied to newly drawn shapes.
    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    /// Cursor to show at a screen position (pure read; selection tool only).
    pub fn hover(&self, screen: Point) -> CursorHint {
        if self.tool != Tool::Selection {
            return CursorHint::Default;
        }
        let point = self.viewport.screen_to_canvas(screen);
        resolver::resolve_position(point, self.document.shapes_top_down())
            .map(|hit| hit.part.cursor())
            .unwrap_or_default()
    }

    // --- Configuration ---

    /// Switch tools. Any in-flight action is abandoned in place.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.action = Action::None;
    }

    /// Set the style for newly drawn shapes.
    pub fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
    }

    // --- Viewport operations ---

    /// Resize the viewport (window resize).
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.set_size(width, height);
    }

    /// Zoom by a multiplicative factor, centered on the viewport.
    pub fn zoom_by(&mut self, factor: f64) {
        self.viewport.zoom_by(factor);
    }

    /// Set the zoom scale directly.
    pub fn set_scale(&mut self, scale: f64) {
        self.viewport.set_scale(scale);
    }

    /// Reset pan and zoom.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Fit the view to all content.
    pub fn fit_to_content(&mut self, padding: f64) {
        if let Some(bounds) = self.document.bounds() {
            self.viewport.fit_to_content(bounds, padding);
        }
    }

    // --- Pointer events ---

    /// Handle pointer-down at screen coordinates.
    pub fn pointer_down(&mut self, screen: Point, button: MouseButton, mods: Modifiers) {
        if self.tool == Tool::Lock {
            return;
        }
        if matches!(self.action, Action::Writing { .. }) {
            // The host must complete the text edit before the canvas
            // accepts new gestures.
            log::debug!("pointer-down ignored while editing text");
            return;
        }

        if self.tool.pans() || button == MouseButton::Middle || mods.space {
            self.action = Action::Panning {
                last_screen: screen,
            };
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        let point = self.viewport.screen_to_canvas(screen);
        match self.tool {
            Tool::Selection => self.selection_down(point, mods),
            Tool::Eraser => {
                let erased_any = self.erase_at(point);
                self.action = Action::Erasing { erased_any };
            }
            tool => match Shape::for_tool(self.document.allocate_id(), tool, point, self.style.clone())
            {
                Ok(shape) => {
                    let id = shape.id();
                    self.document.insert_on_top(shape);
                    self.selection = vec![id];
                    self.action = if tool == Tool::Text {
                        Action::Writing { id }
                    } else {
                        Action::Drawing { id }
                    };
                }
                Err(err) => log::warn!("pointer-down produced no shape: {err}"),
            },
        }
    }

    /// Handle pointer-move at screen coordinates.
    pub fn pointer_move(&mut self, screen: Point, _mods: Modifiers) {
        let point = self.viewport.screen_to_canvas(screen);
        match self.action.clone() {
            Action::None | Action::Writing { .. } => {}
            Action::Panning { last_screen } => {
                let scale = self.viewport.scale();
                self.viewport
                    .pan_by((screen - last_screen) / scale);
                self.action = Action::Panning {
                    last_screen: screen,
                };
            }
            Action::Drawing { id } => self.extend_shape(id, point),
            Action::Moving(mut drag) => {
                self.apply_move(&drag, point);
                drag.moved = drag.moved || point != drag.origin;
                self.action = Action::Moving(drag);
            }
            Action::Resizing { id, part, .. } => {
                self.apply_resize(id, part, point);
                self.action = Action::Resizing {
                    id,
                    part,
                    resized: true,
                };
            }
            Action::Erasing { erased_any } => {
                let erased = self.erase_at(point);
                self.action = Action::Erasing {
                    erased_any: erased_any || erased,
                };
            }
        }
    }

    /// Handle pointer-up at screen coordinates.
    pub fn pointer_up(&mut self, _screen: Point, _mods: Modifiers) {
        match self.action.clone() {
            Action::None | Action::Panning { .. } => {
                self.action = Action::None;
            }
            // Click-to-place text stays in the writing state until the
            // external editor commits.
            Action::Writing { .. } => {}
            Action::Drawing { id } => {
                if let Some(shape) = self.document.get_mut(id) {
                    shape.adjust_orientation();
                }
                self.commit();
                self.action = Action::None;
            }
            Action::Moving(drag) => {
                if drag.moved {
                    self.commit();
                }
                self.action = Action::None;
            }
            Action::Resizing { id, resized, .. } => {
                let mut group = None;
                if let Some(shape) = self.document.get_mut(id) {
                    shape.adjust_orientation();
                    group = shape.group_id;
                }
                if let Some(group_id) = group {
                    self.document.refresh_group_bounds(group_id);
                }
                if resized {
                    self.commit();
                }
                self.action = Action::None;
            }
            Action::Erasing { erased_any } => {
                if erased_any {
                    self.commit();
                }
                self.action = Action::None;
            }
        }
    }

    /// Escape: clear the selection. An in-flight drag is not rolled back;
    /// its last applied position stands.
    pub fn cancel_interaction(&mut self) {
        self.selection.clear();
    }

    // --- Text editing ---

    /// Begin editing an existing text shape. Returns false for non-text
    /// targets.
    pub fn begin_text_edit(&mut self, id: ShapeId) -> bool {
        let is_text = self
            .document
            .get(id)
            .is_some_and(|s| matches!(s.kind, ShapeKind::Text(_)));
        if is_text {
            self.selection = vec![id];
            self.action = Action::Writing { id };
        }
        is_text
    }

    /// Complete a text edit: store the content, re-measure the extent, and
    /// commit. An empty string deletes the placeholder instead, leaving no
    /// history entry.
    pub fn commit_text(&mut self, content: impl Into<String>, measurer: &dyn TextMeasurer) {
        let Action::Writing { id } = &self.action else {
            return;
        };
        let id = *id;
        let content = content.into();
        self.action = Action::None;

        if content.is_empty() {
            self.document.remove(id);
            self.selection.retain(|&s| s != id);
            return;
        }
        if let Some(shape) = self.document.get_mut(id) {
            if let ShapeKind::Text(text) = &mut shape.kind {
                text.set_content(content, measurer);
            }
            shape.rebuild_renderable();
        }
        self.commit();
    }

    // --- History ---

    /// Undo the last committed gesture.
    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.document = snapshot.clone();
            self.after_restore();
        }
    }

    /// Redo a previously undone gesture.
    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.document = snapshot.clone();
            self.after_restore();
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Selection operations ---

    /// Select every shape.
    pub fn select_all(&mut self) {
        self.selection = self.document.shapes_bottom_up().iter().map(|s| s.id()).collect();
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select the shapes intersecting a canvas-space rectangle, expanded to
    /// whole groups.
    pub fn select_in_rect(&mut self, rect: Rect) {
        let mut selection = Vec::new();
        for id in self.document.shapes_in_rect(rect) {
            for member in self.expand_to_group(id) {
                if !selection.contains(&member) {
                    selection.push(member);
                }
            }
        }
        self.selection = selection;
    }

    /// Delete the selected shapes (whole groups included).
    pub fn delete_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        for id in std::mem::take(&mut self.selection) {
            self.document.remove(id);
        }
        self.commit();
    }

    /// Duplicate the selection, offset by [`DUPLICATE_OFFSET`], and select
    /// the clones.
    pub fn duplicate_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let targets = self.selection.clone();
        self.selection = self.clone_shapes(&targets, DUPLICATE_OFFSET);
        self.commit();
    }

    /// Group the selected shapes. Requires at least two; otherwise a no-op.
    pub fn group_selection(&mut self) {
        if self.selection.len() < 2 {
            return;
        }
        let ids = self.selection.clone();
        if let Some(group_id) = self.document.group(&ids) {
            self.selection = self.document.group_members(group_id);
            self.commit();
        }
    }

    /// Dissolve every group in the selection and clear it. No-op when the
    /// selection holds no grouped shape.
    pub fn ungroup_selection(&mut self) {
        let mut group_ids: Vec<GroupId> = Vec::new();
        for &id in &self.selection {
            if let Some(group_id) = self.document.get(id).and_then(|s| s.group_id) {
                if !group_ids.contains(&group_id) {
                    group_ids.push(group_id);
                }
            }
        }
        if group_ids.is_empty() {
            return;
        }
        for group_id in group_ids {
            self.document.ungroup(group_id);
        }
        self.selection.clear();
        self.commit();
    }

    /// Restyle the selected shapes in place and commit once.
    pub fn restyle_selection(&mut self, restyle: impl Fn(&mut ShapeStyle)) {
        if self.selection.is_empty() {
            return;
        }
        for &id in &self.selection {
            if let Some(shape) = self.document.get_mut(id) {
                restyle(&mut shape.style);
                shape.rebuild_renderable();
            }
        }
        self.commit();
    }

    // --- Layer operations (no-ops on an empty selection) ---

    /// Raise the selected shapes above everything else.
    pub fn bring_to_front(&mut self) {
        self.reorder(Document::bring_to_front);
    }

    /// Lower the selected shapes below everything else.
    pub fn send_to_back(&mut self) {
        self.reorder(Document::send_to_back);
    }

    /// Raise the selected shapes past the next distinct layer.
    pub fn bring_forward(&mut self) {
        self.reorder(Document::bring_forward);
    }

    /// Lower the selected shapes past the next distinct layer.
    pub fn send_backward(&mut self) {
        self.reorder(Document::send_backward);
    }

    fn reorder(&mut self, op: fn(&mut Document, ShapeId)) {
        if self.selection.is_empty() {
            return;
        }
        // Visit in paint order so relative order inside the selection holds
        let ordered: Vec<ShapeId> = self
            .document
            .shapes_bottom_up()
            .iter()
            .map(|s| s.id())
            .filter(|id| self.selection.contains(id))
            .collect();
        for id in ordered {
            op(&mut self.document, id);
        }
        self.commit();
    }

    // --- Internals ---

    fn commit(&mut self) {
        self.history.commit(self.document.clone());
    }

    fn after_restore(&mut self) {
        self.selection.retain(|&id| self.document.contains(id));
        self.action = Action::None;
    }

    /// A shape's whole group, or just the shape when ungrouped.
    fn expand_to_group(&self, id: ShapeId) -> Vec<ShapeId> {
        match self.document.get(id).and_then(|s| s.group_id) {
            Some(group_id) => self.document.group_members(group_id),
            None => vec![id],
        }
    }

    fn selection_down(&mut self, point: Point, mods: Modifiers) {
        let hit = resolver::resolve_position(point, self.document.shapes_top_down());

        if mods.duplicate() {
            self.duplicate_at_click(hit.map(|h| h.id), point);
            return;
        }

        let Some(hit) = hit else {
            if !mods.multi_select() {
                self.selection.clear();
            }
            return;
        };

        let members = self.expand_to_group(hit.id);
        if mods.multi_select() {
            let already = members.iter().all(|id| self.selection.contains(id));
            if already {
                // Toggle off; no drag starts
                self.selection.retain(|id| !members.contains(id));
                return;
            }
            for id in members {
                if !self.selection.contains(&id) {
                    self.selection.push(id);
                }
            }
        } else if !self.selection.contains(&hit.id) {
            self.selection = members;
        }

        if hit.part == ShapePart::Inside {
            let drag_ids = self.selection.clone();
            let originals: Vec<(ShapeId, ShapeKind)> = drag_ids
                .iter()
                .filter_map(|&id| self.document.get(id).map(|s| (id, s.kind.clone())))
                .collect();
            let mut groups: Vec<GroupId> = Vec::new();
            for &id in &drag_ids {
                if let Some(group_id) = self.document.get(id).and_then(|s| s.group_id) {
                    if !groups.contains(&group_id) {
                        groups.push(group_id);
                    }
                }
            }
            self.action = Action::Moving(DragState {
                origin: point,
                originals,
                groups,
                moved: false,
            });
        } else {
            self.action = Action::Resizing {
                id: hit.id,
                part: hit.part,
                resized: false,
            };
        }
    }

    /// Alt-click duplication: clone the hit shape (whole group, or the whole
    /// multi-selection when the click lands on one of its members; the
    /// current selection when the click lands on empty space), offset by
    /// half the distance from the originals' bounding origin to the click.
    fn duplicate_at_click(&mut self, hit_id: Option<ShapeId>, click: Point) {
        let targets = match hit_id {
            Some(id) if !self.selection.contains(&id) => self.expand_to_group(id),
            Some(_) | None if !self.selection.is_empty() => self.selection.clone(),
            _ => return,
        };

        let Some(bounds) = targets
            .iter()
            .filter_map(|&id| self.document.get(id).map(Shape::bounds))
            .reduce(|acc, b| acc.union(b))
        else {
            return;
        };
        let origin = bounds.origin();
        let offset = Vec2::new(
            ((click.x - origin.x) / 2.0).round(),
            ((click.y - origin.y) / 2.0).round(),
        );

        self.selection = self.clone_shapes(&targets, offset);
        self.commit();
    }

    /// Clone shapes with fresh ids, translated by `offset`, on top of the
    /// z-order. Group structure fully contained in the set is recreated on
    /// the clones. Returns the clone ids.
    fn clone_shapes(&mut self, ids: &[ShapeId], offset: Vec2) -> Vec<ShapeId> {
        let mut clone_ids = Vec::with_capacity(ids.len());
        let mut group_clones: Vec<(GroupId, Vec<ShapeId>)> = Vec::new();

        // Clone in paint order so relative stacking is preserved
        let ordered: Vec<ShapeId> = self
            .document
            .shapes_bottom_up()
            .iter()
            .map(|s| s.id())
            .filter(|id| ids.contains(id))
            .collect();

        for id in ordered {
            let Some(original) = self.document.get(id).cloned() else {
                continue;
            };
            let source_group = original.group_id;
            let mut clone = original.duplicate(self.document.allocate_id());
            clone.translate(offset);
            let clone_id = clone.id();
            self.document.insert_on_top(clone);
            clone_ids.push(clone_id);

            if let Some(group_id) = source_group {
                match group_clones.iter_mut().find(|(g, _)| *g == group_id) {
                    Some((_, members)) => members.push(clone_id),
                    None => group_clones.push((group_id, vec![clone_id])),
                }
            }
        }

        for (_, members) in group_clones {
            if members.len() >= 2 {
                self.document.group(&members);
            }
        }
        clone_ids
    }

    /// Extend the in-progress shape to the current point.
    fn extend_shape(&mut self, id: ShapeId, point: Point) {
        let Some(shape) = self.document.get_mut(id) else {
            return;
        };
        match &mut shape.kind {
            ShapeKind::Rectangle(s) => s.p2 = point,
            ShapeKind::Ellipse(s) => s.p2 = point,
            ShapeKind::Triangle(s) => s.p2 = point,
            ShapeKind::Diamond(s) => s.p2 = point,
            ShapeKind::Line(s) => s.end = point,
            ShapeKind::Arrow(s) => s.end = point,
            ShapeKind::Pencil(s) => s.add_point(point),
            ShapeKind::Text(_) => return,
        }
        shape.rebuild_renderable();
    }

    /// Reapply the drag from the original geometry at the current delta.
    fn apply_move(&mut self, drag: &DragState, point: Point) {
        let delta = point - drag.origin;
        for (id, original) in &drag.originals {
            if let Some(shape) = self.document.get_mut(*id) {
                let mut kind = original.clone();
                kind.translate(delta);
                shape.kind = kind;
                shape.rebuild_renderable();
            }
        }
        for &group_id in &drag.groups {
            self.document.refresh_group_bounds(group_id);
        }
    }

    /// Recompute the dragged corner/endpoint from the handle name. A handle
    /// that does not apply to the shape is a logged no-op.
    fn apply_resize(&mut self, id: ShapeId, part: ShapePart, point: Point) {
        let Some(shape) = self.document.get_mut(id) else {
            return;
        };
        let kind_name = shape.kind.name();
        let applied = match &mut shape.kind {
            ShapeKind::Rectangle(s) => resize_box(&mut s.p1, &mut s.p2, part, point),
            ShapeKind::Ellipse(s) => resize_box(&mut s.p1, &mut s.p2, part, point),
            ShapeKind::Triangle(s) => resize_box(&mut s.p1, &mut s.p2, part, point),
            ShapeKind::Diamond(s) => resize_box(&mut s.p1, &mut s.p2, part, point),
            ShapeKind::Line(s) => match part {
                ShapePart::Start => {
                    s.start = point;
                    true
                }
                ShapePart::End => {
                    s.end = point;
                    true
                }
                _ => false,
            },
            ShapeKind::Arrow(s) => match part {
                ShapePart::Start => {
                    s.start = point;
                    true
                }
                ShapePart::End => {
                    s.end = point;
                    true
                }
                _ => false,
            },
            ShapeKind::Pencil(_) | ShapeKind::Text(_) => false,
        };
        if applied {
            shape.rebuild_renderable();
        } else {
            log::warn!("resize handle {part:?} does not apply to {kind_name}; ignoring");
        }
    }

    /// Erase the topmost shape under the brush (whole group when grouped).
    /// Returns whether anything was erased.
    fn erase_at(&mut self, point: Point) -> bool {
        let Some(id) = self.document.topmost_at(point, self.eraser_radius) else {
            return false;
        };
        for target in self.expand_to_group(id) {
            self.document.remove(target);
            self.selection.retain(|&s| s != target);
        }
        true
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Rewrite the corner coordinates a handle owns. Corners may invert
/// mid-drag; orientation is normalized at gesture end.
fn resize_box(p1: &mut Point, p2: &mut Point, part: ShapePart, point: Point) -> bool {
    match part {
        ShapePart::TopLeft => *p1 = point,
        ShapePart::TopRight => {
            p1.y = point.y;
            p2.x = point.x;
        }
        ShapePart::BottomLeft => {
            p1.x = point.x;
            p2.y = point.y;
        }
        ShapePart::BottomRight => *p2 = point,
        ShapePart::Top => p1.y = point.y,
        ShapePart::Bottom => p2.y = point.y,
        ShapePart::Left => p1.x = point.x,
        ShapePart::Right => p2.x = point.x,
        ShapePart::Inside | ShapePart::Start | ShapePart::End => return false,
    }
    true
}
