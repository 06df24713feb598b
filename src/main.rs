mod app;
mod compose;
mod config;
mod curves;
mod error;
mod helpers;
mod selection;
mod terminal;
mod types;

use crate::{
    app::{App, wait_frame},
    config::{Args, Settings},
    helpers::{END_NOTICE, Pools, load_corpus},
    terminal::{TerminalGuard, install_interrupt_flag, install_panic_hook},
};

use anyhow::Context;
use clap::Parser;
use log::info;
use ratatui::{
    crossterm::{
        execute,
        style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    },
    prelude::*,
};
use std::io;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Settings::from_args(Args::parse()).context("rejected command line")?;
    let pools = Pools::new(settings.flowers.as_deref()).context("unusable glyph pool")?;
    let corpus = load_corpus(&settings.corpus_path, settings.layout.stride())
        .context("could not load the poems")?;

    info!(
        "{} poems, {}x{} canvas, {} frames over {:?}",
        corpus.len(),
        settings.width,
        settings.height,
        settings.frames,
        settings.duration
    );

    let mut app = App::new(settings, corpus, pools);
    let interrupted = install_interrupt_flag().context("failed to install interrupt handler")?;
    install_panic_hook();

    let guard = TerminalGuard::enter().context("failed to prepare the terminal")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal, |delay| wait_frame(delay, &interrupted));

    drop(terminal);
    drop(guard);
    result.context("terminal output failed")?;

    execute!(
        io::stdout(),
        SetForegroundColor(TermColor::Magenta),
        Print(END_NOTICE),
        ResetColor
    )?;

    Ok(())
}
