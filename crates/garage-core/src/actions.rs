use serde_json::Map;
use serde_json::Value;

use super::state::VehicleRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum GarageAction {
    Host(HostMessage),
    User(UserAction),
    Key(KeyInput),
}

/// Messages pushed into the panel by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostMessage {
    Configure {
        texts: Option<Map<String, Value>>,
        theme: Option<Map<String, Value>>,
    },
    Open {
        vehicles: Vec<VehicleRecord>,
        title: Option<String>,
    },
    Hide,
    Unrecognized(String),
}

impl HostMessage {
    pub fn action_name(&self) -> &str {
        match self {
            Self::Configure { .. } => "config",
            Self::Open { .. } => "open",
            Self::Hide => "hide",
            Self::Unrecognized(action) => action.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Select(usize),
    SelectNext,
    SelectPrev,
    Take,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Escape,
    ArrowDown,
    ArrowUp,
    Enter,
    Other(String),
}

impl KeyInput {
    /// Maps a DOM-style `KeyboardEvent.key` name.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Escape" => Self::Escape,
            "ArrowDown" => Self::ArrowDown,
            "ArrowUp" => Self::ArrowUp,
            "Enter" => Self::Enter,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn user_action(&self) -> Option<UserAction> {
        match self {
            Self::Escape => Some(UserAction::Close),
            Self::ArrowDown => Some(UserAction::SelectNext),
            Self::ArrowUp => Some(UserAction::SelectPrev),
            Self::Enter => Some(UserAction::Take),
            Self::Other(_) => None,
        }
    }
}

/// Where a pointer click landed in the rendered panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Row(usize),
    Take { row: usize },
    Close { row: usize },
}
