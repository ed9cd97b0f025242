use std::fs;
use std::io;
use std::path::Path;
use std::sync::mpsc::Receiver;

use garage_core::actions::HostMessage;
use garage_core::protocol::HostRequest;
use garage_exec::port::HostPort;
use garage_exec::session::GarageSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOutcome {
    Closed,
    Took { index: usize, name: String },
    Interrupted,
}

impl HostOutcome {
    pub fn summary(&self) -> String {
        match self {
            Self::Closed => "garage closed".to_string(),
            Self::Took { index, name } => format!("took vehicle #{index}: {name}"),
            Self::Interrupted => "interrupted".to_string(),
        }
    }
}

/// Stand-in for the game host: answers `close` and `takeVehicle` with `hide`.
#[derive(Debug, Default)]
pub struct DemoHost {
    received: Vec<HostRequest>,
}

impl DemoHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> &[HostRequest] {
        &self.received
    }

    /// Handles every pending request; stops at the first one that ends the session.
    pub fn drain<P: HostPort>(
        &mut self,
        session: &mut GarageSession<P>,
        requests: &Receiver<HostRequest>,
    ) -> Option<HostOutcome> {
        while let Ok(request) = requests.try_recv() {
            self.received.push(request);
            let outcome = match request {
                HostRequest::SelectVehicle { .. } => None,
                HostRequest::Close {} => Some(HostOutcome::Closed),
                HostRequest::TakeVehicle { index } => {
                    let name = session
                        .state()
                        .vehicles
                        .get(index)
                        .map(|vehicle| vehicle.display_name().to_string());
                    match name {
                        Some(name) => Some(HostOutcome::Took { index, name }),
                        None => {
                            tracing::warn!(index, "take requested for unknown vehicle");
                            None
                        }
                    }
                }
            };
            if let Some(outcome) = outcome {
                session.handle_message(HostMessage::Hide);
                return Some(outcome);
            }
        }
        None
    }
}

/// One host message per line; blank lines and `#` comments are skipped.
pub fn read_script(path: &Path) -> io::Result<Vec<String>> {
    let raw = fs::read_to_string(path)?;
    Ok(parse_script(&raw))
}

pub fn parse_script(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn demo_script() -> Vec<String> {
    [
        r#"{"action":"config","texts":{"vehiclesStored":"Your stored vehicles"}}"#,
        r#"{"action":"open","title":"PILLBOX GARAGE","vehicles":[
            {"name":"Sultan RS","plate":"SVX 001","stored":true,"fuel":82,"engine":96,"body":71},
            {"name":"Bison","plate":"SVX 214","stored":true,"fuel":40,"engine":30,"body":12},
            {"name":"Faggio","plate":"SVX 377","stored":false,"fuel":5,"engine":55,"body":100}
        ]}"#,
    ]
    .iter()
    .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use garage_core::actions::KeyInput;
    use garage_exec::port::ChannelPort;
    use pretty_assertions::assert_eq;

    fn session_with_script() -> (GarageSession<ChannelPort>, Receiver<HostRequest>) {
        let (port, rx) = ChannelPort::pair();
        let mut session = GarageSession::new(port);
        for line in demo_script() {
            assert!(session.handle_json(&line), "script line should decode: {line}");
        }
        (session, rx)
    }

    #[test]
    fn demo_script_opens_three_vehicles() {
        let (mut session, rx) = session_with_script();
        let mut host = DemoHost::new();

        assert_eq!(host.drain(&mut session, &rx), None);
        assert_eq!(host.received(), &[HostRequest::SelectVehicle { index: 0 }]);
        assert_eq!(session.view().title, "PILLBOX GARAGE");
        assert_eq!(session.view().rows.len(), 3);
    }

    #[test]
    fn take_hides_panel_and_reports_vehicle() {
        let (mut session, rx) = session_with_script();
        let mut host = DemoHost::new();
        session.handle_key(KeyInput::ArrowDown);
        session.handle_key(KeyInput::Enter);

        let outcome = host.drain(&mut session, &rx);
        assert_eq!(
            outcome,
            Some(HostOutcome::Took {
                index: 1,
                name: "Bison".to_string(),
            })
        );
        assert!(!session.state().visible);
        assert!(session.view().rows.is_empty());
    }

    #[test]
    fn escape_round_trips_through_host() {
        let (mut session, rx) = session_with_script();
        let mut host = DemoHost::new();
        session.handle_key(KeyInput::Escape);

        assert!(session.state().visible);
        assert_eq!(host.drain(&mut session, &rx), Some(HostOutcome::Closed));
        assert!(!session.state().visible);
    }

    #[test]
    fn script_skips_comments_and_blanks() {
        let lines = parse_script("# header\n\n {\"action\":\"hide\"} \n");
        assert_eq!(lines, vec![r#"{"action":"hide"}"#.to_string()]);
    }
}
