//! Single-threaded driver: one event in, state mutated, frame rebuilt,
//! notifications handed to the port. Nothing here suspends.

use garage_core::actions::ClickTarget;
use garage_core::actions::GarageAction;
use garage_core::actions::HostMessage;
use garage_core::actions::KeyInput;
use garage_core::actions::UserAction;
use garage_core::config::Config;
use garage_core::html::render_html;
use garage_core::protocol::decode_message;
use garage_core::protocol::decode_message_str;
use garage_core::reducer::key_disposition;
use garage_core::reducer::reduce;
use garage_core::reducer::resolve_click;
use garage_core::reducer::KeyDisposition;
use garage_core::render::render_panel;
use garage_core::render::PanelView;
use garage_core::state::GarageState;
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::port::HostPort;

#[derive(Debug)]
pub struct GarageSession<P> {
    state: GarageState,
    dispatcher: Dispatcher<P>,
    view: PanelView,
    frames: u64,
}

impl<P: HostPort> GarageSession<P> {
    pub fn new(port: P) -> Self {
        let state = GarageState::new();
        let view = render_panel(&state);
        Self {
            state,
            dispatcher: Dispatcher::new(port),
            view,
            frames: 0,
        }
    }

    /// Applies file config as if the host had sent it first.
    pub fn with_config(mut self, config: &Config) -> Self {
        if let Some(title) = config.ui.default_title.as_ref().filter(|t| !t.is_empty()) {
            self.state.fallback_title = title.clone();
            if !self.state.visible {
                self.state.title = title.clone();
            }
        }
        self.handle_message(config.configure_message());
        self
    }

    pub fn state(&self) -> &GarageState {
        &self.state
    }

    /// Last rendered frame.
    pub fn view(&self) -> &PanelView {
        &self.view
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn port(&self) -> &P {
        self.dispatcher.port()
    }

    pub fn html(&self) -> String {
        render_html(&self.view, &self.state.theme)
    }

    /// Raw host payload. Returns whether it carried a usable action.
    pub fn handle_value(&mut self, value: &Value) -> bool {
        match decode_message(value) {
            Some(message) => {
                self.handle_message(message);
                true
            }
            None => {
                tracing::debug!("ignoring host message without action");
                false
            }
        }
    }

    pub fn handle_json(&mut self, raw: &str) -> bool {
        match decode_message_str(raw) {
            Some(message) => {
                self.handle_message(message);
                true
            }
            None => {
                tracing::debug!("ignoring undecodable host message");
                false
            }
        }
    }

    pub fn handle_message(&mut self, message: HostMessage) {
        self.run(GarageAction::Host(message));
    }

    pub fn handle_key(&mut self, key: KeyInput) -> KeyDisposition {
        let disposition = key_disposition(&self.state, &key);
        self.run(GarageAction::Key(key));
        disposition
    }

    /// Resolves against the frame the user actually saw.
    pub fn click(&mut self, target: ClickTarget) {
        if let Some(action) = resolve_click(&self.view, target) {
            self.user(action);
        }
    }

    pub fn user(&mut self, action: UserAction) {
        self.run(GarageAction::User(action));
    }

    fn run(&mut self, action: GarageAction) {
        let effects = reduce(&mut self.state, action);
        if self.dispatcher.apply(effects) {
            self.view = render_panel(&self.state);
            self.frames += 1;
        }
    }
}
