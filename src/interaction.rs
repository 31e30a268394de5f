//! Pointer-driven direct manipulation of layers.
//!
//! Screen deltas are divided by the render scale so a drag covers the same
//! logical distance no matter how large the canvas is displayed.

use crate::scene::{LayerId, LayerKind, LayerStore, LayerUpdate, Vec2, CANVAS_SIZE};
use crate::types::{EditorMode, Grip, Point};

pub const MIN_TEXT_WIDTH: f32 = 100.0;
pub const MIN_BLUR_SIZE: f32 = 50.0;
pub const MIN_IMAGE_SCALE: f32 = 0.1;
/// Logical pixels of horizontal drag per unit of image scale
pub const SCALE_SENSITIVITY: f32 = 500.0;
/// Scale used until the container has been measured
const INITIAL_RENDER_SCALE: f32 = 0.5;

/// Ratio between on-screen canvas width and the logical canvas width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderScale(f32);

impl RenderScale {
    /// Derive the scale from the rendered container width.
    /// Returns `None` for collapsed or unmeasured containers.
    pub fn from_container_width(width: f64) -> Option<Self> {
        let scale = (width / CANVAS_SIZE as f64) as f32;
        (scale.is_finite() && scale > 0.0).then_some(Self(scale))
    }

    pub fn get(&self) -> f32 {
        self.0
    }

    /// Convert a screen-pixel delta into logical units
    pub fn to_logical(&self, dx: f64, dy: f64) -> Vec2 {
        Vec2::new(dx as f32, dy as f32) / self.0
    }
}

impl Default for RenderScale {
    fn default() -> Self {
        Self(INITIAL_RENDER_SCALE)
    }
}

/// An in-progress drag on one layer
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub layer_id: LayerId,
    pub grip: Grip,
    /// Pointer position of the previous event; deltas are relative to it
    pub last: Point,
    /// Whether this move session already recorded its undo snapshot
    checkpointed: bool,
}

/// Result of a pointer-down on a layer
#[derive(Debug, Clone, PartialEq)]
pub enum PointerDown {
    /// The target cannot be interacted with (background or unknown layer)
    Ignored,
    /// The layer was selected and a drag session started
    Dragging(LayerId),
    /// Magic mode: the layer was targeted for the assistive action
    MagicTarget(LayerId),
}

/// Compute the mutation a drag delta (in logical units) produces on a layer.
///
/// Moves translate the layer; resizes depend on the kind: text reflows its
/// width, blur boxes grow in both axes, images and products scale uniformly.
pub fn drag_update(kind: &LayerKind, position: Vec2, scale: f32, grip: Grip, delta: Vec2) -> LayerUpdate {
    match grip {
        Grip::Body => LayerUpdate::position(position + delta),
        Grip::Resize => match kind {
            LayerKind::Text { width, .. } => LayerUpdate::width((width + delta.x).max(MIN_TEXT_WIDTH)),
            LayerKind::Blur { width, height, .. } => LayerUpdate::size(
                (width + delta.x).max(MIN_BLUR_SIZE),
                (height + delta.y).max(MIN_BLUR_SIZE),
            ),
            LayerKind::Image { .. } | LayerKind::Product { .. } => {
                LayerUpdate::scale((scale + delta.x / SCALE_SENSITIVITY).max(MIN_IMAGE_SCALE))
            }
        },
    }
}

/// Turns pointer events into layer mutations on a [`LayerStore`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionController {
    mode: EditorMode,
    render_scale: RenderScale,
    session: Option<DragSession>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switch modes; any drag in progress is abandoned
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        self.session = None;
    }

    pub fn render_scale(&self) -> RenderScale {
        self.render_scale
    }

    /// Track the rendered width of the canvas container.
    /// Zero or negative widths keep the previous scale.
    pub fn set_container_width(&mut self, width: f64) -> bool {
        match RenderScale::from_container_width(width) {
            Some(scale) => {
                self.render_scale = scale;
                true
            }
            None => false,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Pointer pressed on a layer body or its resize handle
    pub fn pointer_down(&mut self, store: &mut LayerStore, id: &LayerId, grip: Grip, at: Point) -> PointerDown {
        match store.get(id) {
            Some(layer) if !layer.is_background() => {}
            _ => return PointerDown::Ignored,
        }

        match self.mode {
            EditorMode::Magic => PointerDown::MagicTarget(id.clone()),
            EditorMode::Edit => {
                store.select(id);
                log::debug!("begin {:?} drag on {}", grip, id);
                self.session = Some(DragSession {
                    layer_id: id.clone(),
                    grip,
                    last: at,
                    checkpointed: false,
                });
                PointerDown::Dragging(id.clone())
            }
        }
    }

    /// Pointer moved while possibly dragging. Returns true if a layer changed.
    pub fn pointer_move(&mut self, store: &mut LayerStore, at: Point) -> bool {
        if self.mode == EditorMode::Magic {
            return false;
        }
        let scale = self.render_scale;
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(layer) = store.get(&session.layer_id) else {
            self.session = None;
            return false;
        };

        let delta = scale.to_logical(at.x - session.last.x, at.y - session.last.y);
        let update = drag_update(&layer.kind, layer.position(), layer.scale(), session.grip, delta);

        // Moves are not historied per event; record one snapshot per drag
        if session.grip == Grip::Body && !session.checkpointed {
            store.checkpoint();
            session.checkpointed = true;
        }
        let changed = store.update_layer(&session.layer_id, update);
        session.last = at;
        changed
    }

    /// Pointer released: end the drag session
    pub fn pointer_up(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("end {:?} drag on {}", session.grip, session.layer_id);
        }
    }

    /// Click on the empty canvas area
    pub fn click_empty(&mut self, store: &mut LayerStore) {
        self.session = None;
        store.clear_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Layer;

    fn controller_at_scale(container_width: f64) -> InteractionController {
        let mut controller = InteractionController::new();
        assert!(controller.set_container_width(container_width));
        controller
    }

    fn drag(controller: &mut InteractionController, store: &mut LayerStore, id: &LayerId, grip: Grip, screen: (f64, f64)) {
        let start = Point::new(100.0, 100.0);
        controller.pointer_down(store, id, grip, start);
        controller.pointer_move(store, Point::new(start.x + screen.0, start.y + screen.1));
        controller.pointer_up();
    }

    #[test]
    fn test_render_scale_from_width() {
        let scale = RenderScale::from_container_width(540.0).unwrap();
        assert_eq!(scale.get(), 0.5);
        assert!(RenderScale::from_container_width(0.0).is_none());
        assert!(RenderScale::from_container_width(-10.0).is_none());

        let mut controller = controller_at_scale(1080.0);
        assert!(!controller.set_container_width(0.0));
        assert_eq!(controller.render_scale().get(), 1.0);
    }

    #[test]
    fn test_move_is_scale_independent() {
        let mut results = Vec::new();
        for width in [270.0, 540.0, 1080.0, 2160.0] {
            let mut store = LayerStore::new();
            let id = store.add_layer(Layer::text_placeholder());
            let mut controller = controller_at_scale(width);
            let scale = controller.render_scale().get() as f64;

            // Same logical delta (40, -30) expressed in screen pixels
            drag(&mut controller, &mut store, &id, Grip::Body, (40.0 * scale, -30.0 * scale));
            results.push(store.get(&id).unwrap().position());
        }
        for position in &results {
            assert!((position.x - 40.0).abs() < 1e-3);
            assert!((position.y + 30.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_move_is_incremental() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::blur());
        let mut controller = controller_at_scale(1080.0);

        controller.pointer_down(&mut store, &id, Grip::Body, Point::new(0.0, 0.0));
        controller.pointer_move(&mut store, Point::new(10.0, 0.0));
        controller.pointer_move(&mut store, Point::new(25.0, 5.0));
        controller.pointer_up();

        assert_eq!(store.get(&id).unwrap().position(), Vec2::new(25.0, 5.0));
    }

    #[test]
    fn test_move_records_single_snapshot() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::text_placeholder());
        let before_drag = store.layers().to_vec();
        let history_before = store.history_len();
        let mut controller = controller_at_scale(1080.0);

        controller.pointer_down(&mut store, &id, Grip::Body, Point::zero());
        for i in 1..=30 {
            controller.pointer_move(&mut store, Point::new(i as f64, i as f64));
        }
        controller.pointer_up();

        assert_eq!(store.history_len(), history_before + 1);
        store.undo();
        assert_eq!(store.layers(), before_drag.as_slice());
    }

    #[test]
    fn test_click_without_move_records_nothing() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::text_placeholder());
        let history_before = store.history_len();
        let mut controller = controller_at_scale(1080.0);

        controller.pointer_down(&mut store, &id, Grip::Body, Point::zero());
        controller.pointer_up();

        assert_eq!(store.history_len(), history_before);
        assert_eq!(store.selected_id(), Some(&id));
    }

    #[test]
    fn test_text_resize_changes_width_with_floor() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::text_placeholder());
        let mut controller = controller_at_scale(540.0);

        // 50 screen px at scale 0.5 is 100 logical units
        drag(&mut controller, &mut store, &id, Grip::Resize, (50.0, 0.0));
        let layer = store.get(&id).unwrap();
        assert_eq!(layer.width(), Some(900.0));
        assert_eq!(layer.scale(), 1.0);

        drag(&mut controller, &mut store, &id, Grip::Resize, (-1.0e6, 0.0));
        assert_eq!(store.get(&id).unwrap().width(), Some(MIN_TEXT_WIDTH));
    }

    #[test]
    fn test_blur_resize_floors_each_axis() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::blur());
        let mut controller = controller_at_scale(1080.0);

        drag(&mut controller, &mut store, &id, Grip::Resize, (20.0, -1.0e6));
        let layer = store.get(&id).unwrap();
        assert_eq!(layer.width(), Some(320.0));
        assert_eq!(layer.height(), Some(MIN_BLUR_SIZE));

        drag(&mut controller, &mut store, &id, Grip::Resize, (-1.0e6, 10.0));
        let layer = store.get(&id).unwrap();
        assert_eq!(layer.width(), Some(MIN_BLUR_SIZE));
        assert_eq!(layer.height(), Some(60.0));
    }

    #[test]
    fn test_image_resize_scales_with_floor() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::product("data:image/png;base64,AAAA"));
        let mut controller = controller_at_scale(1080.0);

        drag(&mut controller, &mut store, &id, Grip::Resize, (250.0, 999.0));
        assert!((store.get(&id).unwrap().scale() - 1.5).abs() < 1e-6);

        drag(&mut controller, &mut store, &id, Grip::Resize, (-1.0e6, 0.0));
        assert_eq!(store.get(&id).unwrap().scale(), MIN_IMAGE_SCALE);
    }

    #[test]
    fn test_resize_is_historied() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::blur());
        let history_before = store.history_len();
        let mut controller = controller_at_scale(1080.0);

        drag(&mut controller, &mut store, &id, Grip::Resize, (10.0, 10.0));
        assert_eq!(store.history_len(), history_before + 1);
    }

    #[test]
    fn test_background_is_never_selected_or_dragged() {
        let mut store = LayerStore::new();
        let bg = store.start_from_background("bg");
        let mut controller = controller_at_scale(1080.0);

        for grip in [Grip::Body, Grip::Resize] {
            let outcome = controller.pointer_down(&mut store, &bg, grip, Point::zero());
            assert_eq!(outcome, PointerDown::Ignored);
            assert!(!controller.is_dragging());
            assert!(!controller.pointer_move(&mut store, Point::new(100.0, 100.0)));
        }
        assert!(store.selected().is_none());
        assert_eq!(store.get(&bg).unwrap().position(), Vec2::ZERO);
        assert_eq!(store.get(&bg).unwrap().scale(), 1.0);
    }

    #[test]
    fn test_magic_mode_disables_drag() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::text_placeholder());
        let mut controller = controller_at_scale(1080.0);
        controller.set_mode(EditorMode::Magic);

        let outcome = controller.pointer_down(&mut store, &id, Grip::Body, Point::zero());
        assert_eq!(outcome, PointerDown::MagicTarget(id.clone()));
        assert!(!controller.is_dragging());
        assert!(!controller.pointer_move(&mut store, Point::new(50.0, 50.0)));
        assert_eq!(store.get(&id).unwrap().position(), Vec2::ZERO);
    }

    #[test]
    fn test_switching_mode_ends_session() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::blur());
        let mut controller = controller_at_scale(1080.0);

        controller.pointer_down(&mut store, &id, Grip::Body, Point::zero());
        assert!(controller.is_dragging());
        controller.set_mode(EditorMode::Magic);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_click_empty_clears_selection() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::blur());
        let mut controller = controller_at_scale(1080.0);
        controller.pointer_down(&mut store, &id, Grip::Body, Point::zero());
        controller.pointer_up();
        assert!(store.selected().is_some());

        controller.click_empty(&mut store);
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_move_without_session_is_noop() {
        let mut store = LayerStore::new();
        store.add_layer(Layer::blur());
        let mut controller = InteractionController::new();
        assert!(!controller.pointer_move(&mut store, Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_session_ends_when_layer_disappears() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::blur());
        let mut controller = controller_at_scale(1080.0);
        controller.pointer_down(&mut store, &id, Grip::Body, Point::zero());
        store.remove_layer(&id);

        assert!(!controller.pointer_move(&mut store, Point::new(5.0, 5.0)));
        assert!(!controller.is_dragging());
    }
}
