#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code to prevent panics from bad input.
// Test code is allowed to use unwrap() for convenience.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

use std::str::FromStr as _;

use simulator::Session;
use simulator::clock::SystemClock;
use simulator::config::SimulatorConfig;
use simulator::engine::SimulationEngine;
use simulator::render::TerminalRenderer;
use simulator::types::FailureMode;
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simulator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = match SimulatorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "network failure simulator initialized: inject_failure={}, failure_mode={}",
        config.inject_failure,
        config.failure_mode
    );
    tracing::info!("type 'fetch' to simulate a request, 'toggle' to inject failures, 'help' for commands");

    let engine = SimulationEngine::new();
    let mut session = Session::new(
        engine,
        TerminalRenderer,
        config.inject_failure,
        config.failure_mode,
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {e}");
                std::process::exit(1);
            }
        };

        // Awaiting each command to completion serializes runs: a second
        // fetch cannot start while one is pending.
        if !dispatch(&mut session, line.trim()).await {
            break;
        }
    }
}

/// Handle one command line. Returns `false` when the session should end.
async fn dispatch(session: &mut Session<SystemClock, TerminalRenderer>, line: &str) -> bool {
    match line.split_whitespace().collect::<Vec<_>>().as_slice() {
        [] => {}
        ["fetch"] => session.fire().await,
        ["toggle"] => {
            let enabled = session.toggle_inject_failure();
            println!("failure injection {}", on_off(enabled));
        }
        ["toggle", "on"] => {
            session.set_inject_failure(true);
            println!("failure injection on");
        }
        ["toggle", "off"] => {
            session.set_inject_failure(false);
            println!("failure injection off");
        }
        ["mode", raw] => match FailureMode::from_str(raw) {
            Ok(mode) => {
                session.set_failure_mode(mode);
                println!("failure mode set to {mode}");
            }
            Err(message) => println!("{message}"),
        },
        ["status"] => {
            println!(
                "failure injection {}, mode {}",
                on_off(session.inject_failure()),
                session.failure_mode()
            );
        }
        ["help"] => print_help(),
        ["quit" | "exit"] => return false,
        _ => println!("unknown command '{line}' (try 'help')"),
    }
    true
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn print_help() {
    println!("commands:");
    println!("  fetch              simulate one product fetch");
    println!("  toggle [on|off]    enable/disable failure injection");
    println!("  mode timeout|503   select which failure to inject");
    println!("  status             show the current toggle state");
    println!("  quit               leave");
}
