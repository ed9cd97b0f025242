use garage_core::protocol::HostRequest;
use garage_core::reducer::GarageEffect;

use crate::port::HostPort;

/// Turns panel intents into host requests.
///
/// Delivery is best effort: a failed post is logged and dropped, and local
/// state never waits on the outcome.
#[derive(Debug)]
pub struct Dispatcher<P> {
    port: P,
}

impl<P: HostPort> Dispatcher<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn notify_close(&self) -> bool {
        self.send(HostRequest::Close {})
    }

    pub fn notify_take(&self, index: usize) -> bool {
        self.send(HostRequest::TakeVehicle { index })
    }

    pub fn notify_selection(&self, index: usize) -> bool {
        self.send(HostRequest::SelectVehicle { index })
    }

    /// Returns whether the port accepted the request.
    pub fn send(&self, request: HostRequest) -> bool {
        match self.port.post(&request) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(request = request.name(), error = %err, "dropping host notification");
                false
            }
        }
    }

    /// Sends every notification in order; returns whether a frame was requested.
    pub fn apply(&self, effects: Vec<GarageEffect>) -> bool {
        let mut frame = false;
        for effect in effects {
            match effect {
                GarageEffect::Notify(HostRequest::Close {}) => {
                    self.notify_close();
                }
                GarageEffect::Notify(HostRequest::TakeVehicle { index }) => {
                    self.notify_take(index);
                }
                GarageEffect::Notify(HostRequest::SelectVehicle { index }) => {
                    self.notify_selection(index);
                }
                GarageEffect::RequestFrame => frame = true,
            }
        }
        frame
    }
}
