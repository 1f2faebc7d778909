//! List composition
//!
//! Builds the ordered card list: pre-built queries first (only on the first
//! logical page of saved queries), then saved queries in the order the
//! service returned them.

use discover_core::{Location, PaginationState, QueryView, SavedQueryRecord};
use discover_settings::QueryListSettings;

use crate::context_menu::{ContextMenu, ContextMenuAction};
use crate::mutation::MutationRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Preset,
    Saved,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preset => "preset",
            Self::Saved => "saved",
        }
    }
}

/// Delete and duplicate, both bound to one saved query's view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextActions {
    pub delete: MutationRequest,
    pub duplicate: MutationRequest,
}

impl ContextActions {
    pub fn for_view(view: &QueryView) -> Self {
        Self {
            delete: MutationRequest::delete(view.clone()),
            duplicate: MutationRequest::duplicate(view.clone()),
        }
    }

    /// A closed dropdown listing both actions
    pub fn menu(&self, settings: &QueryListSettings) -> ContextMenu {
        ContextMenu::new(vec![
            ContextMenuAction {
                label: settings.delete_label.clone(),
                href: "#delete-query",
                request: self.delete.clone(),
            },
            ContextMenuAction {
                label: settings.duplicate_label.clone(),
                href: "#duplicate-query",
                request: self.duplicate.clone(),
            },
        ])
    }
}

/// A render-ready query card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub key: String,
    pub view: QueryView,
    pub kind: ItemKind,
    pub subtitle: String,
    pub navigate_to: Location,
    /// Only saved queries carry actions
    pub context_actions: Option<ContextActions>,
    /// A mutation for this item has not settled; renderers disable its actions
    pub pending: bool,
}

impl ListItem {
    pub fn title(&self) -> &str {
        self.view.name()
    }

    pub fn query_detail(&self) -> &str {
        self.view.query()
    }

    pub fn is_preset(&self) -> bool {
        self.kind == ItemKind::Preset
    }
}

pub struct ListComposer<'a> {
    location: &'a Location,
    settings: &'a QueryListSettings,
}

impl<'a> ListComposer<'a> {
    pub fn new(location: &'a Location, settings: &'a QueryListSettings) -> Self {
        Self { location, settings }
    }

    /// Compose the card list for one render pass
    pub fn compose(
        &self,
        pagination: PaginationState,
        presets: &[SavedQueryRecord],
        saved: Option<&[SavedQueryRecord]>,
    ) -> Vec<ListItem> {
        let mut items = Vec::new();

        if pagination.is_first_page() {
            items.extend(self.preset_items(presets));
        }
        let preset_count = items.len();
        items.extend(self.saved_items(saved.unwrap_or_default()));

        tracing::debug!(
            presets = preset_count,
            saved = items.len() - preset_count,
            has_previous = pagination.has_previous,
            "composed query list"
        );
        items
    }

    fn preset_items<'r>(
        &'r self,
        presets: &'r [SavedQueryRecord],
    ) -> impl Iterator<Item = ListItem> + 'r {
        presets.iter().enumerate().map(|(index, record)| {
            let view = QueryView::from_record(record);
            ListItem {
                key: format!("{}-{}", index, view.name()),
                subtitle: self.settings.preset_subtitle.clone(),
                navigate_to: self.navigation_target(&view),
                kind: ItemKind::Preset,
                context_actions: None,
                pending: false,
                view,
            }
        })
    }

    fn saved_items<'r>(
        &'r self,
        saved: &'r [SavedQueryRecord],
    ) -> impl Iterator<Item = ListItem> + 'r {
        saved.iter().enumerate().map(|(index, record)| {
            let view = QueryView::from_record(record);
            ListItem {
                key: format!("{}-{}", index, view.id().unwrap_or_default()),
                subtitle: self.settings.saved_subtitle.clone(),
                navigate_to: self.navigation_target(&view),
                kind: ItemKind::Saved,
                context_actions: Some(ContextActions::for_view(&view)),
                pending: false,
                view,
            }
        })
    }

    fn navigation_target(&self, view: &QueryView) -> Location {
        Location::new(
            self.location.pathname.clone(),
            view.navigation_payload(&self.location.query),
        )
    }
}
