pub(super) use serde_json::Map;
pub(super) use serde_json::Value;

pub(super) use super::key_disposition;
pub(super) use super::reduce;
pub(super) use super::resolve_click;
pub(super) use crate::actions::ClickTarget;
pub(super) use crate::actions::GarageAction;
pub(super) use crate::actions::HostMessage;
pub(super) use crate::actions::KeyInput;
pub(super) use crate::actions::UserAction;
pub(super) use crate::protocol::HostRequest;
pub(super) use crate::reducer::GarageEffect;
pub(super) use crate::reducer::KeyDisposition;
pub(super) use crate::render::render_panel;
pub(super) use crate::state::GarageState;
pub(super) use crate::state::PanelPhase;
pub(super) use crate::state::VehicleRecord;


fn state() -> GarageState {
    GarageState::new()
}

fn vehicle(name: &str) -> VehicleRecord {
    VehicleRecord {
        name: Some(name.to_string()),
        plate: Some(format!("{}-01", name.to_uppercase())),
        stored: true,
        fuel: 50.0,
        engine: 50.0,
        body: 50.0,
    }
}

fn fleet(count: usize) -> Vec<VehicleRecord> {
    (0..count).map(|i| vehicle(&format!("car{i}"))).collect()
}

fn host(state: &mut GarageState, message: HostMessage) -> Vec<GarageEffect> {
    reduce(state, GarageAction::Host(message))
}

fn open(state: &mut GarageState, vehicles: Vec<VehicleRecord>) -> Vec<GarageEffect> {
    host(
        state,
        HostMessage::Open {
            vehicles,
            title: Some("T".to_string()),
        },
    )
}

fn user(state: &mut GarageState, action: UserAction) -> Vec<GarageEffect> {
    reduce(state, GarageAction::User(action))
}

fn press(state: &mut GarageState, key: &str) -> (KeyDisposition, Vec<GarageEffect>) {
    let key = KeyInput::from_key_name(key);
    let disposition = key_disposition(state, &key);
    (disposition, reduce(state, GarageAction::Key(key)))
}

fn requests(effects: &[GarageEffect]) -> Vec<HostRequest> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            GarageEffect::Notify(request) => Some(*request),
            GarageEffect::RequestFrame => None,
        })
        .collect()
}

fn selections(effects: &[GarageEffect]) -> Vec<usize> {
    requests(effects)
        .into_iter()
        .filter_map(|request| match request {
            HostRequest::SelectVehicle { index } => Some(index),
            _ => None,
        })
        .collect()
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
