use super::history::History;
use super::layer::{Layer, LayerId, LayerUpdate};

/// Ordered layer list of the composition.
/// Owns the selection and the undo history alongside the layers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerStore {
    /// Layers in z-order, bottom first
    layers: Vec<Layer>,
    /// Currently selected layer, never the background
    selection: Option<LayerId>,
    history: History,
}

impl LayerStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a snapshot of the current layer list onto the history
    pub fn checkpoint(&mut self) {
        self.history.push(self.layers.clone());
    }

    /// Append a layer and return its ID
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = layer.id.clone();
        self.checkpoint();
        log::debug!("add layer {} ({})", id, layer.layer_type().label());
        self.layers.push(layer);
        id
    }

    /// Append a layer without recording a snapshot. Used to finish installing
    /// a fresh composition, which starts with nothing to undo.
    pub fn append_unrecorded(&mut self, layer: Layer) -> LayerId {
        let id = layer.id.clone();
        log::debug!("install layer {} ({})", id, layer.layer_type().label());
        self.layers.push(layer);
        id
    }

    /// Merge `update` into the layer with `id`.
    ///
    /// Position-only updates skip the history; every other update records a
    /// snapshot first. Unknown IDs and empty updates are no-ops.
    pub fn update_layer(&mut self, id: &LayerId, update: LayerUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        let Some(pos) = self.position_of(id) else {
            return false;
        };

        if !update.is_position_only() {
            self.checkpoint();
        }
        self.layers[pos].apply(&update);
        true
    }

    /// Remove a layer by ID
    pub fn remove_layer(&mut self, id: &LayerId) -> Option<Layer> {
        let pos = self.position_of(id)?;
        self.checkpoint();
        if self.selection.as_ref() == Some(id) {
            self.selection = None;
        }
        log::debug!("remove layer {}", id);
        Some(self.layers.remove(pos))
    }

    /// Restore the most recent snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        self.layers = previous;
        if let Some(id) = self.selection.clone() {
            if self.get(&id).is_none() {
                self.selection = None;
            }
        }
        true
    }

    /// Replace the whole composition with a single background layer.
    /// History starts over from this point.
    pub fn start_from_background(&mut self, src: impl Into<String>) -> LayerId {
        let background = Layer::background(src);
        let id = background.id.clone();
        self.history.clear();
        self.selection = None;
        self.layers = vec![background];
        id
    }

    /// Get a layer by ID
    pub fn get(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    fn position_of(&self, id: &LayerId) -> Option<usize> {
        self.layers.iter().position(|l| &l.id == id)
    }

    /// Get all layers in list order
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Get number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of snapshots available to undo
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // === Selection Management ===

    /// Select a layer. The background and unknown IDs are rejected.
    pub fn select(&mut self, id: &LayerId) -> bool {
        match self.get(id) {
            Some(layer) if !layer.is_background() => {
                self.selection = Some(id.clone());
                true
            }
            _ => false,
        }
    }

    /// Clear selection
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected_id(&self) -> Option<&LayerId> {
        self.selection.as_ref()
    }

    pub fn selected(&self) -> Option<&Layer> {
        self.selection.as_ref().and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: &LayerId) -> bool {
        self.selection.as_ref() == Some(id)
    }

    // === Z-Order ===

    /// Layers in drawing order: backgrounds first, the selected layer last,
    /// everything else in list order.
    pub fn render_order(&self) -> Vec<&Layer> {
        let mut ordered: Vec<&Layer> = self.layers.iter().filter(|l| l.is_background()).collect();
        ordered.extend(
            self.layers
                .iter()
                .filter(|l| !l.is_background() && !self.is_selected(&l.id)),
        );
        if let Some(selected) = self.selected() {
            ordered.push(selected);
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{LayerKind, LayerStyle, TextStyle, Vec2};
    use std::collections::HashSet;

    fn assert_unique_ids(store: &LayerStore) {
        let ids: HashSet<_> = store.layers().iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn test_add_and_get_layer() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::text_placeholder());

        assert_eq!(store.len(), 1);
        assert!(store.get(&id).is_some());
        assert_eq!(store.history_len(), 1);
    }

    #[test]
    fn test_ids_stay_unique_across_mutations() {
        let mut store = LayerStore::new();
        store.start_from_background("bg");
        let a = store.add_layer(Layer::text_placeholder());
        let b = store.add_layer(Layer::blur());
        store.update_layer(&a, LayerUpdate::content("Sale"));
        store.remove_layer(&b);
        store.add_layer(Layer::product("p"));
        store.add_layer(Layer::text_placeholder());
        store.undo();
        store.add_layer(Layer::blur());

        assert_unique_ids(&store);
    }

    #[test]
    fn test_update_unknown_layer_is_noop() {
        let mut store = LayerStore::new();
        let mut stranger = LayerStore::new();
        let foreign = stranger.add_layer(Layer::blur());

        assert!(!store.update_layer(&foreign, LayerUpdate::width(10.0)));
        assert_eq!(store.history_len(), 0);
        assert!(store.remove_layer(&foreign).is_none());
        assert_eq!(store.history_len(), 0);
    }

    #[test]
    fn test_position_only_updates_skip_history() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::text_placeholder());
        let before = store.history_len();

        for i in 0..10 {
            store.update_layer(&id, LayerUpdate::position(Vec2::new(i as f32, 0.0)));
        }
        assert_eq!(store.history_len(), before);

        store.update_layer(&id, LayerUpdate::width(400.0));
        assert_eq!(store.history_len(), before + 1);

        let style = LayerStyle::Text(TextStyle {
            font_size: 40.0,
            ..TextStyle::default()
        });
        store.update_layer(&id, LayerUpdate::style(style));
        assert_eq!(store.history_len(), before + 2);
    }

    #[test]
    fn test_undo_restores_previous_list() {
        let mut store = LayerStore::new();
        store.add_layer(Layer::text_placeholder());
        let blur = store.add_layer(Layer::blur());
        let before_update = store.layers().to_vec();

        store.update_layer(&blur, LayerUpdate::size(120.0, 80.0));
        assert!(store.undo());
        assert_eq!(store.layers(), before_update.as_slice());
    }

    #[test]
    fn test_undo_more_than_history_is_noop() {
        let mut store = LayerStore::new();
        store.add_layer(Layer::text_placeholder());
        store.add_layer(Layer::blur());

        assert!(store.undo());
        assert!(store.undo());
        assert!(store.is_empty());
        assert!(!store.undo());
        assert!(!store.undo());
        assert!(store.is_empty());
    }

    #[test]
    fn test_undo_reverts_content_edit_not_add() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::text_placeholder());
        store.update_layer(&id, LayerUpdate::content("Sale"));
        assert_eq!(store.get(&id).unwrap().content(), "Sale");

        store.undo();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().content(), "Text");
    }

    #[test]
    fn test_history_capped_at_twenty() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::text_placeholder());
        for i in 0..25 {
            store.update_layer(&id, LayerUpdate::content(i.to_string()));
        }
        assert_eq!(store.history_len(), 20);

        while store.undo() {}
        // The oldest surviving snapshot is the one taken before edit #5
        assert_eq!(store.get(&id).unwrap().content(), "4");
    }

    #[test]
    fn test_background_cannot_be_selected() {
        let mut store = LayerStore::new();
        let bg = store.start_from_background("bg");
        let text = store.add_layer(Layer::text_placeholder());

        assert!(!store.select(&bg));
        assert!(store.selected().is_none());
        assert!(store.select(&text));
        assert_eq!(store.selected_id(), Some(&text));
    }

    #[test]
    fn test_selection_is_not_historied() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::text_placeholder());
        let before = store.history_len();
        store.select(&id);
        store.clear_selection();
        assert_eq!(store.history_len(), before);
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::blur());
        store.select(&id);
        assert!(store.remove_layer(&id).is_some());
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_undo_drops_stale_selection() {
        let mut store = LayerStore::new();
        let id = store.add_layer(Layer::blur());
        store.select(&id);
        store.undo();
        assert!(store.selected_id().is_none());
    }

    #[test]
    fn test_start_from_background_resets_history() {
        let mut store = LayerStore::new();
        store.add_layer(Layer::text_placeholder());
        store.add_layer(Layer::blur());

        let bg = store.start_from_background("data:image/png;base64,AAAA");
        assert_eq!(store.len(), 1);
        assert_eq!(store.history_len(), 0);
        assert!(store.get(&bg).unwrap().is_background());
        assert!(!store.undo());
    }

    #[test]
    fn test_variant_with_auto_text_yields_two_layers() {
        let mut store = LayerStore::new();
        store.start_from_background("data:image/png;base64,AAAA");
        store.append_unrecorded(Layer::auto_text("Stop joint pain today"));

        assert_eq!(store.history_len(), 0);
        assert!(!store.undo());
        let layers = store.layers();
        assert_eq!(layers.len(), 2);
        assert!(layers[0].is_background());
        assert!(matches!(layers[0].kind, LayerKind::Image { .. }));
        assert!(matches!(layers[1].kind, LayerKind::Text { .. }));
        assert_eq!(layers[1].position().y, 350.0);
    }

    #[test]
    fn test_render_order_promotes_selection() {
        let mut store = LayerStore::new();
        let a = store.add_layer(Layer::text_placeholder());
        let b = store.add_layer(Layer::blur());
        // Background added after other layers still renders beneath them
        let mut bg_store = store.clone();
        let bg = Layer::background("bg");
        let bg_id = bg.id.clone();
        bg_store.add_layer(bg);

        let order: Vec<_> = bg_store.render_order().iter().map(|l| l.id.clone()).collect();
        assert_eq!(order, vec![bg_id.clone(), a.clone(), b.clone()]);

        bg_store.select(&a);
        let order: Vec<_> = bg_store.render_order().iter().map(|l| l.id.clone()).collect();
        assert_eq!(order, vec![bg_id, b, a]);
    }
}
