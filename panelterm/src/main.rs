// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)] // Allow multiple versions from transitive dependencies
#![allow(clippy::cargo_common_metadata)] // Metadata is inherited from workspace

#[macro_use]
extern crate tracing;

use std::{fs, path::Path, process};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use panelterm_common::{args::Args, config::load_config};
use panelterm_emulator::state::internal::TerminalState;
use panelterm_panel::SimPanel;

mod script;

fn main() {
    // use env for filtering
    // example
    // RUST_LOG=none,panelterm=debug cargo run

    let args = Args::parse(std::env::args()).unwrap_or_else(|_| {
        process::exit(1);
    });

    let _guard = init_logging(&args);

    if let Err(e) = run(&args) {
        error!("panelterm failed: {e:#}");
        process::exit(1);
    }
}

fn init_logging(args: &Args) -> Option<WorkerGuard> {
    let default_level = if args.show_all_debug {
        Level::TRACE
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact());

    if args.write_logs_to_file {
        let file_appender = match RollingFileAppender::builder()
            .rotation(Rotation::HOURLY)
            .max_log_files(2)
            .filename_prefix("panelterm")
            .filename_suffix("log")
            .build("./")
        {
            Ok(appender) => appender,
            Err(e) => {
                eprintln!("Failed to create file appender: {e}");
                registry.init();
                return None;
            }
        };

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        registry
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false).compact())
            .init();
        return Some(guard);
    }

    registry.init();
    None
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args.config.as_deref().map(Path::new))?;
    debug!(
        "Panel {}x{} px",
        config.panel.width, config.panel.height
    );

    let panel = SimPanel::new(config.panel.width, config.panel.height);
    let (response_tx, response_rx) = crossbeam_channel::unbounded();
    let mut terminal = TerminalState::new(panel, response_tx)?;

    let bytes = match &args.replay {
        Some(path) => fs::read(path).with_context(|| format!("reading replay capture {path}"))?,
        None => script::demo_script(terminal.width(), terminal.height()),
    };

    info!("Feeding {} bytes", bytes.len());
    terminal.handle_incoming_data(&bytes);

    for response in response_rx.try_iter() {
        info!("Terminal response: {:?}", response.as_str());
    }

    println!("+{}+", "-".repeat(terminal.width()));
    for line in terminal.display().visible_text() {
        println!("|{line}|");
    }
    println!("+{}+", "-".repeat(terminal.width()));
    info!("Final cursor {}", terminal.cursor);

    Ok(())
}
