//! Plugins Reducer

use std::sync::Arc;

use serde_json::Value;

use crate::actions::{Action, PluginsAction};
use crate::state::PluginsState;

pub fn reduce(state: &Arc<PluginsState>, action: &Action) -> Arc<PluginsState> {
    match action {
        Action::Plugins(action) => super::apply(state, |s| reduce_plugins(s, action)),
        _ => Arc::clone(state),
    }
}

pub fn reduce_plugins(mut state: PluginsState, action: &PluginsAction) -> PluginsState {
    match action {
        PluginsAction::SetEnabled { id, enabled } => match state.plugins.get_mut(id) {
            Some(plugin) => plugin.enabled = *enabled,
            None => log::warn!("Unknown plugin {}", id),
        },
        PluginsAction::Toggle { id } => match state.plugins.get_mut(id) {
            Some(plugin) => plugin.enabled = !plugin.enabled,
            None => log::warn!("Unknown plugin {}", id),
        },
        PluginsAction::UpdateSettings { id, settings } => match state.plugins.get_mut(id) {
            Some(plugin) => merge_settings(&mut plugin.settings, settings),
            None => log::warn!("Unknown plugin {}", id),
        },
        PluginsAction::Reset => state = PluginsState::default(),
    }
    state
}

/// One level merge: object keys are overwritten, anything else replaces
fn merge_settings(current: &mut Value, update: &Value) {
    match (current, update) {
        (Value::Object(current), Value::Object(update)) => {
            for (key, value) in update {
                current.insert(key.clone(), value.clone());
            }
        }
        (current, update) => *current = update.clone(),
    }
}
