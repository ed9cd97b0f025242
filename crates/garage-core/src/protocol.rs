//! Wire shapes exchanged with the host.

use serde::Serialize;
use serde_json::json;
use serde_json::Value;

use super::actions::HostMessage;
use super::format::coerce_number;
use super::state::VehicleRecord;

/// Outbound, fire-and-forget request to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "name", content = "body", rename_all = "camelCase")]
pub enum HostRequest {
    SelectVehicle { index: usize },
    TakeVehicle { index: usize },
    Close {},
}

impl HostRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectVehicle { .. } => "selectVehicle",
            Self::TakeVehicle { .. } => "takeVehicle",
            Self::Close {} => "close",
        }
    }

    pub fn body(&self) -> Value {
        match self {
            Self::SelectVehicle { index } | Self::TakeVehicle { index } => {
                json!({ "index": index })
            }
            Self::Close {} => json!({}),
        }
    }
}

/// Decodes one host message. `None` means there was no usable `action`.
pub fn decode_message(value: &Value) -> Option<HostMessage> {
    let object = value.as_object()?;
    let action = match object.get("action")? {
        Value::String(action) if !action.is_empty() => action.as_str(),
        _ => return None,
    };

    let message = match action {
        "config" => HostMessage::Configure {
            texts: object.get("texts").and_then(Value::as_object).cloned(),
            theme: object.get("theme").and_then(Value::as_object).cloned(),
        },
        "open" => HostMessage::Open {
            vehicles: object
                .get("vehicles")
                .and_then(Value::as_array)
                .map(|entries| entries.iter().map(decode_vehicle).collect())
                .unwrap_or_default(),
            title: object.get("title").and_then(display_string),
        },
        "hide" => HostMessage::Hide,
        other => HostMessage::Unrecognized(other.to_string()),
    };
    Some(message)
}

pub fn decode_message_str(raw: &str) -> Option<HostMessage> {
    let value: Value = serde_json::from_str(raw).ok()?;
    decode_message(&value)
}

pub fn decode_vehicle(value: &Value) -> VehicleRecord {
    let Some(object) = value.as_object() else {
        return VehicleRecord::default();
    };
    let number = |key: &str| object.get(key).map_or(0.0, coerce_number);
    VehicleRecord {
        name: object.get("name").and_then(display_string),
        plate: object.get("plate").and_then(display_string),
        stored: object.get("stored").is_some_and(truthy),
        fuel: number("fuel"),
        engine: number("engine"),
        body: number("body"),
    }
}

fn display_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_without_action_are_dropped() {
        assert_eq!(decode_message(&json!(null)), None);
        assert_eq!(decode_message(&json!({"vehicles": []})), None);
        assert_eq!(decode_message(&json!({"action": 3})), None);
        assert_eq!(decode_message(&json!({"action": ""})), None);
        assert_eq!(decode_message_str("not json"), None);
    }

    #[test]
    fn unknown_action_is_kept_as_unrecognized() {
        assert_eq!(
            decode_message(&json!({"action": "refresh"})),
            Some(HostMessage::Unrecognized("refresh".to_string()))
        );
    }

    #[test]
    fn open_with_non_array_vehicles_is_empty() {
        let message = decode_message(&json!({"action": "open", "vehicles": {"0": {}}}));
        assert_eq!(
            message,
            Some(HostMessage::Open {
                vehicles: Vec::new(),
                title: None,
            })
        );
    }

    #[test]
    fn config_ignores_non_object_sections() {
        let message = decode_message(&json!({
            "action": "config",
            "texts": "take",
            "theme": {"primary": "#fff"},
        }));
        let Some(HostMessage::Configure { texts, theme }) = message else {
            panic!("expected configure");
        };
        assert_eq!(texts, None);
        assert_eq!(
            theme.and_then(|t| t.get("primary").cloned()),
            Some(json!("#fff"))
        );
    }

    #[test]
    fn vehicle_fields_are_coerced() {
        let vehicle = decode_vehicle(&json!({
            "name": "",
            "plate": "ABC123",
            "stored": 1,
            "fuel": "80.5",
            "engine": null,
            "body": 140,
        }));
        assert_eq!(
            vehicle,
            VehicleRecord {
                name: None,
                plate: Some("ABC123".to_string()),
                stored: true,
                fuel: 80.5,
                engine: 0.0,
                body: 140.0,
            }
        );
        assert_eq!(decode_vehicle(&json!("junk")), VehicleRecord::default());
    }

    #[test]
    fn requests_serialize_with_name_and_body() {
        let take = HostRequest::TakeVehicle { index: 2 };
        assert_eq!(take.name(), "takeVehicle");
        assert_eq!(take.body(), json!({"index": 2}));
        assert_eq!(
            serde_json::to_value(take).unwrap_or_default(),
            json!({"name": "takeVehicle", "body": {"index": 2}})
        );
        assert_eq!(HostRequest::Close {}.body(), json!({}));
    }
}
