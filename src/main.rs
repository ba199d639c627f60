//! Terminal grid game client (default binary).
//!
//! Connects to `SERVER_URI`, mirrors the server's grid in the terminal and
//! sends moves for wasd / arrow keys. `q` quits.

use std::process::ExitCode;

use anyhow::Result;

use tui_grid::adapter::{ClientConfig, WsConnection};
use tui_grid::client::{run_loop, Client};
use tui_grid::input::TerminalKeys;
use tui_grid::logging::init_logging;
use tui_grid::term::TerminalRenderer;

fn main() -> ExitCode {
    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = init_logging(config.log_path.as_deref()) {
        eprintln!("warning: {e:#}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ClientConfig) -> Result<()> {
    let mut client = Client::new(config.pretty_walls);

    // Declared before the renderer so the terminal is restored first on drop.
    let mut conn = WsConnection::connect(&config.server_uri)?;
    println!("Connected to server.");
    client.mark_connected();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run_loop(
        &mut client,
        &mut conn,
        &mut TerminalKeys,
        &mut term,
        config.poll_timeout,
    );

    // Always try to restore terminal state before reporting.
    let _ = term.exit();
    conn.close();
    result.map_err(Into::into)
}
