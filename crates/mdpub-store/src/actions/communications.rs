//! Communications trace actions

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::state::CommunicationEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr)]
#[serde(
    tag = "verb",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[strum(serialize_all = "camelCase")]
pub enum CommunicationsAction {
    /// Emitted by the communication logger; never logged itself
    LogAction(CommunicationEntry),
    Clear,
}
