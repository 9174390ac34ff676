//! Actions module
//!
//! Every action is tagged by the slice it belongs to. The wire form is
//! `{"type": "<slice>/<verb>", "payload": ...}`, e.g.
//! `{"type": "editor/setContent", "payload": {"content": "# Title"}}`.
//! Middleware routes on the slice prefix.

pub mod communications;
pub mod console_log;
pub mod editor;
pub mod panels;
pub mod path;
pub mod plugins;
pub mod publish;
pub mod ui;

pub use communications::CommunicationsAction;
pub use console_log::LogAction;
pub use editor::EditorAction;
pub use panels::PanelsAction;
pub use path::PathAction;
pub use plugins::PluginsAction;
pub use publish::PublishAction;
pub use ui::UiAction;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::state::SliceName;

/// Root action enum - tagged by slice
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Editor(EditorAction),
    Panels(PanelsAction),
    Log(LogAction),
    Publish(PublishAction),
    Path(PathAction),
    Plugins(PluginsAction),
    Communications(CommunicationsAction),
    Ui(UiAction),
}

/// Serialized action as exchanged with the CLI and the communications trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAction {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

#[derive(Debug, Error)]
pub enum ActionParseError {
    #[error("action type {0:?} is not of the form \"<slice>/<verb>\"")]
    MissingNamespace(String),

    #[error("unknown slice {0:?}")]
    UnknownSlice(String),

    #[error("invalid action {action_type:?}: {source}")]
    InvalidPayload {
        action_type: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Action {
    /// Slice this action is addressed to
    pub fn slice(&self) -> SliceName {
        match self {
            Action::Editor(_) => SliceName::Editor,
            Action::Panels(_) => SliceName::Panels,
            Action::Log(_) => SliceName::Log,
            Action::Publish(_) => SliceName::Publish,
            Action::Path(_) => SliceName::Path,
            Action::Plugins(_) => SliceName::Plugins,
            Action::Communications(_) => SliceName::Communications,
            Action::Ui(_) => SliceName::Ui,
        }
    }

    /// Verb part of the action type, e.g. `setContent`
    pub fn verb(&self) -> &str {
        match self {
            Action::Editor(a) => a.as_ref(),
            Action::Panels(a) => a.as_ref(),
            Action::Log(a) => a.as_ref(),
            Action::Publish(a) => a.as_ref(),
            Action::Path(a) => a.as_ref(),
            Action::Plugins(a) => a.as_ref(),
            Action::Communications(a) => a.as_ref(),
            Action::Ui(a) => a.as_ref(),
        }
    }

    /// Namespaced action type, e.g. `editor/setContent`
    pub fn action_type(&self) -> String {
        format!("{}/{}", self.slice(), self.verb())
    }

    /// Serialized payload, `None` for actions without one
    pub fn payload(&self) -> Option<Value> {
        let tagged = match self {
            Action::Editor(a) => serde_json::to_value(a),
            Action::Panels(a) => serde_json::to_value(a),
            Action::Log(a) => serde_json::to_value(a),
            Action::Publish(a) => serde_json::to_value(a),
            Action::Path(a) => serde_json::to_value(a),
            Action::Plugins(a) => serde_json::to_value(a),
            Action::Communications(a) => serde_json::to_value(a),
            Action::Ui(a) => serde_json::to_value(a),
        };
        match tagged {
            Ok(Value::Object(mut fields)) => fields.remove("payload"),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Failed to serialize payload of {}: {}", self.action_type(), e);
                None
            }
        }
    }

    pub fn to_wire(&self) -> WireAction {
        WireAction {
            action_type: self.action_type(),
            payload: self.payload(),
        }
    }

    /// Build an action from its type string and payload
    pub fn from_wire(action_type: &str, payload: Option<Value>) -> Result<Action, ActionParseError> {
        let (slice, verb) = action_type
            .split_once('/')
            .filter(|(slice, verb)| !slice.is_empty() && !verb.is_empty())
            .ok_or_else(|| ActionParseError::MissingNamespace(action_type.to_string()))?;

        let slice: SliceName = slice
            .parse()
            .map_err(|_| ActionParseError::UnknownSlice(slice.to_string()))?;

        let mut tagged = Map::new();
        tagged.insert("verb".to_string(), Value::String(verb.to_string()));
        if let Some(payload) = payload.filter(|p| !p.is_null()) {
            tagged.insert("payload".to_string(), payload);
        }
        let tagged = Value::Object(tagged);

        let invalid = |source| ActionParseError::InvalidPayload {
            action_type: action_type.to_string(),
            source,
        };

        let action = match slice {
            SliceName::Editor => Action::Editor(serde_json::from_value(tagged).map_err(invalid)?),
            SliceName::Panels => Action::Panels(serde_json::from_value(tagged).map_err(invalid)?),
            SliceName::Log => Action::Log(serde_json::from_value(tagged).map_err(invalid)?),
            SliceName::Publish => {
                Action::Publish(serde_json::from_value(tagged).map_err(invalid)?)
            }
            SliceName::Path => Action::Path(serde_json::from_value(tagged).map_err(invalid)?),
            SliceName::Plugins => {
                Action::Plugins(serde_json::from_value(tagged).map_err(invalid)?)
            }
            SliceName::Communications => {
                Action::Communications(serde_json::from_value(tagged).map_err(invalid)?)
            }
            SliceName::Ui => Action::Ui(serde_json::from_value(tagged).map_err(invalid)?),
        };
        Ok(action)
    }

    /// Parse a JSON line of the form `{"type": ..., "payload": ...}`
    pub fn from_json(line: &str) -> Result<Action, ActionParseError> {
        let wire: WireAction =
            serde_json::from_str(line).map_err(|source| ActionParseError::InvalidPayload {
                action_type: "<unparsed>".to_string(),
                source,
            })?;
        Action::from_wire(&wire.action_type, wire.payload)
    }
}

impl TryFrom<WireAction> for Action {
    type Error = ActionParseError;

    fn try_from(wire: WireAction) -> Result<Self, Self::Error> {
        Action::from_wire(&wire.action_type, wire.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Theme;
    use serde_json::json;

    #[test]
    fn test_action_type_is_namespaced() {
        let action = Action::Editor(EditorAction::SetContent {
            content: "# Hi".to_string(),
        });
        assert_eq!(action.action_type(), "editor/setContent");
        assert_eq!(action.slice(), SliceName::Editor);

        let action = Action::Communications(CommunicationsAction::Clear);
        assert_eq!(action.action_type(), "communications/clear");

        let action = Action::Ui(UiAction::SetSidebarWidth { width: 300 });
        assert_eq!(action.action_type(), "ui/setSidebarWidth");
    }

    #[test]
    fn test_payload_uses_camel_case_fields() {
        let action = Action::Path(PathAction::FetchListingStart {
            pathname: "/docs".to_string(),
            is_directory: true,
        });
        assert_eq!(
            action.payload(),
            Some(json!({"pathname": "/docs", "isDirectory": true}))
        );
        assert_eq!(Action::Ui(UiAction::ToggleSidebar).payload(), None);
    }

    #[test]
    fn test_from_wire() {
        let action =
            Action::from_wire("ui/setTheme", Some(json!({"theme": "dark"}))).unwrap();
        assert_eq!(action, Action::Ui(UiAction::SetTheme { theme: Theme::Dark }));

        let action = Action::from_wire("log/clear", None).unwrap();
        assert_eq!(action, Action::Log(LogAction::Clear));
    }

    #[test]
    fn test_from_json_line() {
        let action =
            Action::from_json(r#"{"type":"panels/toggleVisible","payload":{"id":"cli"}}"#)
                .unwrap();
        assert_eq!(
            action,
            Action::Panels(PanelsAction::ToggleVisible {
                id: "cli".to_string()
            })
        );
    }

    #[test]
    fn test_wire_round_trip_keeps_type() {
        let action = Action::Publish(PublishAction::StartPublishing {
            file: Some("index.md".to_string()),
        });
        let wire = action.to_wire();
        assert_eq!(wire.action_type, "publish/startPublishing");
        let parsed = Action::try_from(wire).unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn test_from_wire_errors() {
        assert!(matches!(
            Action::from_wire("setContent", None),
            Err(ActionParseError::MissingNamespace(_))
        ));
        assert!(matches!(
            Action::from_wire("editor/", None),
            Err(ActionParseError::MissingNamespace(_))
        ));
        assert!(matches!(
            Action::from_wire("sidebar/toggle", None),
            Err(ActionParseError::UnknownSlice(_))
        ));
        assert!(matches!(
            Action::from_wire("editor/explode", None),
            Err(ActionParseError::InvalidPayload { .. })
        ));
        assert!(matches!(
            Action::from_wire("ui/setTheme", Some(json!({"theme": "neon"}))),
            Err(ActionParseError::InvalidPayload { .. })
        ));
    }
}
