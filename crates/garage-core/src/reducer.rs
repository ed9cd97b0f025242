#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GarageEffect {
    Notify(HostRequest),
    RequestFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Suppressed,
    PassThrough,
}

use super::actions::ClickTarget;
use super::actions::GarageAction;
use super::actions::HostMessage;
use super::actions::KeyInput;
use super::actions::UserAction;
use super::protocol::HostRequest;
use super::render::PanelView;
use super::state::GarageState;

pub fn reduce(state: &mut GarageState, action: GarageAction) -> Vec<GarageEffect> {
    match action {
        GarageAction::Host(message) => reduce_host(state, message),
        GarageAction::User(user) => reduce_user(state, user),
        GarageAction::Key(key) => reduce_key(state, &key),
    }
}

fn reduce_host(state: &mut GarageState, message: HostMessage) -> Vec<GarageEffect> {
    match message {
        HostMessage::Configure { texts, theme } => {
            if let Some(texts) = texts {
                state.texts.merge(&texts);
            }
            if let Some(theme) = theme {
                state.theme.apply(&theme);
            }
            vec![GarageEffect::RequestFrame]
        }
        HostMessage::Open { vehicles, title } => {
            state.open(vehicles, title);
            tracing::debug!(count = state.vehicles.len(), title = %state.title, "panel opened");
            let mut effects = vec![GarageEffect::RequestFrame];
            if !state.vehicles.is_empty() {
                effects.extend(select(state, 0));
            }
            effects
        }
        HostMessage::Hide => {
            state.hide();
            tracing::debug!("panel hidden");
            vec![GarageEffect::RequestFrame]
        }
        other @ HostMessage::Unrecognized(_) => {
            tracing::debug!(action = other.action_name(), "ignoring unrecognized host message");
            Vec::new()
        }
    }
}

fn reduce_user(state: &mut GarageState, action: UserAction) -> Vec<GarageEffect> {
    match action {
        UserAction::Select(index) => select(state, index),
        UserAction::SelectNext => match state.selected.checked_add(1) {
            Some(next) => select(state, next),
            None => Vec::new(),
        },
        UserAction::SelectPrev => match state.selected.checked_sub(1) {
            Some(prev) => select(state, prev),
            None => Vec::new(),
        },
        UserAction::Take => {
            tracing::debug!(index = state.selected, "take requested");
            vec![GarageEffect::Notify(HostRequest::TakeVehicle {
                index: state.selected,
            })]
        }
        UserAction::Close => {
            // A request only; the host answers with `hide` when it agrees.
            tracing::debug!("close requested");
            vec![GarageEffect::Notify(HostRequest::Close {})]
        }
    }
}

fn reduce_key(state: &mut GarageState, key: &KeyInput) -> Vec<GarageEffect> {
    if !state.visible {
        return Vec::new();
    }
    match key.user_action() {
        Some(action) => reduce_user(state, action),
        None => Vec::new(),
    }
}

fn select(state: &mut GarageState, index: usize) -> Vec<GarageEffect> {
    if !state.in_range(index) {
        return Vec::new();
    }
    state.selected = index;
    tracing::debug!(index, "vehicle selected");
    vec![
        GarageEffect::RequestFrame,
        GarageEffect::Notify(HostRequest::SelectVehicle { index }),
    ]
}

pub fn key_disposition(state: &GarageState, key: &KeyInput) -> KeyDisposition {
    if state.visible && key.user_action().is_some() {
        KeyDisposition::Suppressed
    } else {
        KeyDisposition::PassThrough
    }
}

// Affordance clicks never fall through to the row underneath.
pub fn resolve_click(view: &PanelView, target: ClickTarget) -> Option<UserAction> {
    let row_index = match target {
        ClickTarget::Row(row) | ClickTarget::Take { row } | ClickTarget::Close { row } => row,
    };
    let row = view.rows.get(row_index)?;
    match target {
        ClickTarget::Row(_) => Some(UserAction::Select(row.index)),
        ClickTarget::Take { .. } => row.detail.as_ref().map(|_| UserAction::Take),
        ClickTarget::Close { .. } => row.detail.as_ref().map(|_| UserAction::Close),
    }
}

#[cfg(test)]
mod tests;
