//! Panels Reducer
//!
//! Panel registry lifecycle: register → mount → unmount → unregister.

use std::sync::Arc;

use crate::actions::{Action, PanelsAction};
use crate::state::{PanelEntry, PanelsState};

pub fn reduce(state: &Arc<PanelsState>, action: &Action) -> Arc<PanelsState> {
    match action {
        Action::Panels(action) => super::apply(state, |s| reduce_panels(s, action)),
        _ => Arc::clone(state),
    }
}

/// Reducer for the panel registry.
pub fn reduce_panels(mut state: PanelsState, action: &PanelsAction) -> PanelsState {
    match action {
        PanelsAction::Register { id, title } => {
            if let Some(panel) = state.panels.get_mut(id) {
                panel.title = title.clone();
            } else {
                let order = state.next_order();
                log::debug!("Registering panel {} at position {}", id, order);
                state
                    .panels
                    .insert(id.clone(), PanelEntry::new(id, title, order));
            }
        }
        PanelsAction::Unregister { id } => {
            if state.panels.remove(id).is_some() && state.active.as_ref() == Some(id) {
                state.active = None;
            }
        }
        PanelsAction::Mount { id } => match state.panels.get_mut(id) {
            Some(panel) => panel.mounted = true,
            None => log::warn!("Cannot mount unregistered panel {}", id),
        },
        PanelsAction::Unmount { id } => {
            if let Some(panel) = state.panels.get_mut(id) {
                panel.mounted = false;
            }
        }
        PanelsAction::SetVisible { id, visible } => {
            if let Some(panel) = state.panels.get_mut(id) {
                panel.visible = *visible;
            }
        }
        PanelsAction::ToggleVisible { id } => {
            if let Some(panel) = state.panels.get_mut(id) {
                panel.visible = !panel.visible;
            }
        }
        PanelsAction::SetCollapsed { id, collapsed } => {
            if let Some(panel) = state.panels.get_mut(id) {
                panel.collapsed = *collapsed;
            }
        }
        PanelsAction::Reorder { ids } => {
            let mut ordered: Vec<String> = Vec::with_capacity(ids.len());
            for id in ids {
                if state.panels.contains_key(id) && !ordered.contains(id) {
                    ordered.push(id.clone());
                }
            }
            let rest: Vec<String> = state
                .ordered()
                .into_iter()
                .map(|p| p.id.clone())
                .filter(|id| !ordered.contains(id))
                .collect();
            for (order, id) in ordered.iter().chain(rest.iter()).enumerate() {
                if let Some(panel) = state.panels.get_mut(id) {
                    panel.order = order;
                }
            }
        }
        PanelsAction::SetActive { id } => match id {
            Some(id) if !state.panels.contains_key(id) => {
                log::warn!("Cannot activate unregistered panel {}", id);
            }
            _ => state.active = id.clone(),
        },
    }
    state
}
