use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Map;
use serde_json::Value;

use super::actions::HostMessage;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub texts: BTreeMap<String, String>,
    pub theme: BTreeMap<String, String>,
    pub ui: UiConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub default_title: Option<String>,
}

impl Config {
    /// Config applies exactly like a host `config` message.
    pub fn configure_message(&self) -> HostMessage {
        HostMessage::Configure {
            texts: to_object(&self.texts),
            theme: to_object(&self.theme),
        }
    }
}

fn to_object(entries: &BTreeMap<String, String>) -> Option<Map<String, Value>> {
    if entries.is_empty() {
        return None;
    }
    Some(
        entries
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect(),
    )
}
