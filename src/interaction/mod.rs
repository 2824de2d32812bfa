//! Selection and highlight state shared by every rendered category element.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

pub const FULL_OPACITY: f64 = 1.0;
pub const DIMMED_OPACITY: f64 = 0.4;

/// Opaque identity of one category element.
///
/// Derived from the category column identity and the positional index, so it
/// stays equal across rebuilds while category order is unchanged. Only
/// equality is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionKey {
    column: String,
    index: usize,
}

impl SelectionKey {
    #[must_use]
    pub fn for_category(column: impl Into<String>, index: usize) -> Self {
        Self {
            column: column.into(),
            index,
        }
    }
}

/// Keyboard state accompanying a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClickModifiers {
    pub ctrl: bool,
    pub meta: bool,
}

impl ClickModifiers {
    #[must_use]
    pub fn multi_select() -> Self {
        Self {
            ctrl: true,
            meta: false,
        }
    }

    #[must_use]
    pub fn is_multi_select(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPhase {
    NoSelection,
    SomeSelected,
}

/// Set of selected keys. `toggle` and `clear` are the only mutators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    selected: IndexSet<SelectionKey>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `key`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, key: &SelectionKey) -> bool {
        if self.selected.shift_remove(key) {
            false
        } else {
            self.selected.insert(key.clone());
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn is_selected(&self, key: &SelectionKey) -> bool {
        self.selected.contains(key)
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        if self.has_selection() {
            SelectionPhase::SomeSelected
        } else {
            SelectionPhase::NoSelection
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &SelectionKey> {
        self.selected.iter()
    }
}

/// Collaborator deciding how a click changes the selection.
pub trait SelectionHandler {
    fn handle_selection(
        &mut self,
        state: &mut SelectionState,
        key: &SelectionKey,
        multi_select: bool,
    );
}

/// Default handler: every element click toggles membership of its key.
///
/// Modifiers are ignored, so clicking A then C leaves both selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleSelectionHandler;

impl SelectionHandler for ToggleSelectionHandler {
    fn handle_selection(
        &mut self,
        state: &mut SelectionState,
        key: &SelectionKey,
        _multi_select: bool,
    ) {
        state.toggle(key);
    }
}

/// Modifier-aware alternative.
///
/// With multi-select the clicked key toggles membership. Without it the
/// selection becomes exactly the clicked key, or empties when that key was
/// already the only selected one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceSelectionHandler;

impl SelectionHandler for ReplaceSelectionHandler {
    fn handle_selection(
        &mut self,
        state: &mut SelectionState,
        key: &SelectionKey,
        multi_select: bool,
    ) {
        if multi_select {
            state.toggle(key);
            return;
        }

        let only_this_selected = state.len() == 1 && state.is_selected(key);
        state.clear();
        if !only_this_selected {
            state.toggle(key);
        }
    }
}

/// Click routing and opacity derivation over the elements of one render pass.
pub struct SelectionBehavior<H: SelectionHandler = ToggleSelectionHandler> {
    handler: H,
    state: SelectionState,
    elements: Vec<SelectionKey>,
}

impl Default for SelectionBehavior<ToggleSelectionHandler> {
    fn default() -> Self {
        Self::new(ToggleSelectionHandler)
    }
}

impl<H: SelectionHandler> SelectionBehavior<H> {
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            state: SelectionState::new(),
            elements: Vec::new(),
        }
    }

    /// Binds the elements of a fresh render pass.
    ///
    /// Selected keys that no longer exist are dropped; others survive.
    pub fn bind(&mut self, elements: Vec<SelectionKey>) {
        let stale: Vec<SelectionKey> = self
            .state
            .keys()
            .filter(|key| !elements.contains(key))
            .cloned()
            .collect();
        for key in &stale {
            self.state.toggle(key);
        }
        if !stale.is_empty() {
            trace!(dropped = stale.len(), "dropped selection keys missing from new model");
        }
        self.elements = elements;
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn elements(&self) -> &[SelectionKey] {
        &self.elements
    }

    /// Returns `false` when `index` is not a bound element.
    pub fn element_click(&mut self, index: usize, modifiers: ClickModifiers) -> bool {
        let Some(key) = self.elements.get(index) else {
            return false;
        };
        self.handler
            .handle_selection(&mut self.state, key, modifiers.is_multi_select());
        trace!(index, selected = self.state.len(), "element click");
        true
    }

    pub fn background_click(&mut self) {
        self.state.clear();
        trace!("background click cleared selection");
    }

    /// Opacity for every bound element, in element order.
    #[must_use]
    pub fn render_selection(&self, has_selection_happened: bool) -> Vec<f64> {
        let active = has_selection_happened && self.state.has_selection();
        self.elements
            .iter()
            .map(|key| {
                if !active || self.state.is_selected(key) {
                    FULL_OPACITY
                } else {
                    DIMMED_OPACITY
                }
            })
            .collect()
    }
}
