//! Context menu state for saved query cards
//!
//! The menu is a two-state machine. Clicking the actor toggles it and keeps
//! the click from reaching the card underneath; choosing an entry closes it
//! and hands back the bound mutation.

use discover_core::UiEvent;

use crate::mutation::MutationRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// One entry of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuAction {
    pub label: String,
    pub href: &'static str,
    pub request: MutationRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    state: MenuState,
    actions: Vec<ContextMenuAction>,
}

impl ContextMenu {
    pub fn new(actions: Vec<ContextMenuAction>) -> Self {
        Self {
            state: MenuState::Closed,
            actions,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn actions(&self) -> &[ContextMenuAction] {
        &self.actions
    }

    pub fn open(&mut self) {
        self.state = MenuState::Open;
    }

    pub fn close(&mut self) {
        self.state = MenuState::Closed;
    }

    /// Handle a click on the menu actor
    pub fn toggle(&mut self, event: &mut dyn UiEvent) {
        event.stop_propagation();
        event.prevent_default();
        self.state = match self.state {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        };
    }

    /// Choose an entry. Only an open menu yields a request.
    pub fn select(&mut self, index: usize) -> Option<MutationRequest> {
        if !self.is_open() {
            return None;
        }
        let request = self.actions.get(index).map(|action| action.request.clone());
        if request.is_some() {
            self.close();
        }
        request
    }
}
