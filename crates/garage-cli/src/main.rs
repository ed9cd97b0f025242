use std::env;
use std::fs::File;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use garage_core::protocol::HostRequest;
use garage_exec::port::ChannelPort;
use garage_exec::port::HostPort;
use garage_exec::port::JsonLinesPort;
use garage_exec::port::TeePort;
use garage_exec::session::GarageSession;
use tracing_subscriber::EnvFilter;

mod config;
mod host;
mod ui;

use host::DemoHost;

const LOG_ENV: &str = "GARAGE_LOG";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    messages: Option<PathBuf>,
    out: Option<PathBuf>,
    config: Option<PathBuf>,
    log: Option<PathBuf>,
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("garage {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "run" => {
            let args = parse_args(args.collect::<Vec<_>>())?;
            run_panel(args)
        }
        "render" => {
            let args = parse_args(args.collect::<Vec<_>>())?;
            render_once(args)
        }
        _ => {
            print_help();
            Err(format!("unknown command: {command}").into())
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliArgs, Box<dyn std::error::Error>> {
    let mut parsed = CliArgs::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let slot = match flag {
            "--messages" => &mut parsed.messages,
            "--out" => &mut parsed.out,
            "--config" => &mut parsed.config,
            "--log" => &mut parsed.log,
            other => {
                return Err(format!("unsupported argument: {other}").into());
            }
        };
        let Some(value) = args.get(i + 1) else {
            return Err(format!("{flag} requires a path").into());
        };
        *slot = Some(PathBuf::from(value));
        i += 2;
    }
    Ok(parsed)
}

fn init_logging(log: Option<&PathBuf>, allow_stderr: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    match log {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if allow_stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // Anything on stderr would tear the alternate screen.
        None => {}
    }
    Ok(())
}

fn script_lines(args: &CliArgs) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    match &args.messages {
        Some(path) => Ok(host::read_script(path)?),
        None => Ok(host::demo_script()),
    }
}

fn outbound_port(
    args: &CliArgs,
) -> Result<(Box<dyn HostPort>, std::sync::mpsc::Receiver<HostRequest>), Box<dyn std::error::Error>>
{
    let (channel, rx) = ChannelPort::pair();
    let port: Box<dyn HostPort> = match &args.out {
        Some(path) => {
            let file = File::create(path)?;
            Box::new(TeePort::new(channel, JsonLinesPort::new(file)))
        }
        None => Box::new(channel),
    };
    Ok((port, rx))
}

fn run_panel(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log.as_ref(), false)?;
    let config = config::load_config(args.config.as_deref());
    let (port, rx) = outbound_port(&args)?;
    let mut session = GarageSession::new(port).with_config(&config);
    let mut host = DemoHost::new();

    for line in script_lines(&args)? {
        session.handle_json(&line);
        if let Some(outcome) = host.drain(&mut session, &rx) {
            println!("{}", outcome.summary());
            return Ok(());
        }
    }

    let outcome = ui::run(&mut session, &rx, &mut host)?;
    println!("{}", outcome.summary());
    Ok(())
}

fn render_once(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log.as_ref(), true)?;
    let config = config::load_config(args.config.as_deref());
    let (port, _rx) = outbound_port(&args)?;
    let mut session = GarageSession::new(port).with_config(&config);

    for line in script_lines(&args)? {
        if !session.handle_json(&line) {
            tracing::warn!(line = %line, "skipping script line");
        }
    }
    println!("{}", session.html());
    Ok(())
}

fn print_help() {
    println!("garage {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  garage run [--messages FILE] [--out FILE] [--config FILE] [--log FILE]");
    println!("  garage render [--messages FILE] [--out FILE] [--config FILE] [--log FILE]");
    println!("  garage --help");
    println!("  garage --version");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_known_flags() {
        let parsed = parse_args(strings(&["--messages", "in.jsonl", "--out", "out.jsonl"]))
            .unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(
            parsed,
            CliArgs {
                messages: Some(PathBuf::from("in.jsonl")),
                out: Some(PathBuf::from("out.jsonl")),
                config: None,
                log: None,
            }
        );
    }

    #[test]
    fn rejects_unknown_or_dangling_flags() {
        assert!(parse_args(strings(&["--repo", "x"])).is_err());
        assert!(parse_args(strings(&["--config"])).is_err());
    }

    #[test]
    fn render_pipeline_writes_outbound_log() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let args = CliArgs {
            out: Some(dir.path().join("out.jsonl")),
            ..CliArgs::default()
        };
        let (port, _rx) = outbound_port(&args).unwrap_or_else(|err| panic!("{err}"));
        let mut session = GarageSession::new(port);
        for line in host::demo_script() {
            session.handle_json(&line);
        }
        drop(session);

        let raw = std::fs::read_to_string(dir.path().join("out.jsonl")).unwrap_or_default();
        assert_eq!(raw.lines().count(), 1);
        assert!(raw.contains(r#""name":"selectVehicle""#));
    }
}
