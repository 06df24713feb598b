use crate::{
    compose::{self, FrameContext},
    config::Settings,
    helpers::{Pools, build_lines_from_grid, generate_noise},
    selection::{self, Step},
    types::{Corpus, Grid, NoiseField, SelectionState},
};

use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    prelude::*,
    widgets::*,
};
use std::{
    io,
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

const POLL_SLICE: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Cycling,
    Terminated,
}

pub struct App {
    settings: Settings,
    corpus: Corpus,
    pools: Pools,
    rng: StdRng,
    current: SelectionState,
    next: SelectionState,
    noise: NoiseField,
    cycles: u64,
}

impl App {
    pub fn new(settings: Settings, corpus: Corpus, pools: Pools) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::with_rng(settings, corpus, pools, rng)
    }

    /// `corpus` must hold at least one poem.
    pub fn with_rng(settings: Settings, corpus: Corpus, pools: Pools, mut rng: StdRng) -> Self {
        let current = selection::initial(&corpus, &mut rng);
        let noise = generate_noise(settings.width, settings.height, &pools.noise, &mut rng);

        Self {
            settings,
            corpus,
            pools,
            rng,
            current,
            next: current,
            noise,
            cycles: 0,
        }
    }

    /// Fresh noise field and the pointer the fragments will preview.
    pub fn begin_cycle(&mut self) {
        self.noise = generate_noise(
            self.settings.width,
            self.settings.height,
            &self.pools.noise,
            &mut self.rng,
        );

        let (next, step) = selection::advance(
            self.current,
            &self.corpus,
            self.settings.layout.stride(),
            self.settings.stay_prob,
            &mut self.rng,
        );

        match step {
            Step::Advance => debug!("cycle {}: advancing to line {}", self.cycles, next.line),
            Step::Jump => debug!(
                "cycle {}: jumping to poem {} line {}",
                self.cycles, next.poem, next.line
            ),
        }

        self.next = next;
    }

    pub fn end_cycle(&mut self) {
        self.current = self.next;
        self.cycles += 1;
    }

    pub fn render_frame(&mut self, frame: usize) -> Grid {
        let count = self.settings.layout.stride();
        let current = selection::lines_at(&self.corpus, self.current, count);
        let next = selection::lines_at(&self.corpus, self.next, count);
        let poem = &self.corpus[self.current.poem];

        let ctx = FrameContext {
            settings: &self.settings,
            pools: &self.pools,
            current: &current,
            next: &next,
            author: &poem.author,
            title: &poem.title,
            frame,
        };

        compose::render(&self.noise, &ctx, &mut self.rng)
    }

    /// Runs cycles until `wait` reports an interrupt. Every frame, the last
    /// of a cycle included, is followed by one pause.
    pub fn run<B, W>(&mut self, terminal: &mut Terminal<B>, mut wait: W) -> io::Result<()>
    where
        B: Backend,
        W: FnMut(Duration) -> io::Result<Status>,
    {
        let delay = self.settings.delay();

        loop {
            self.begin_cycle();

            for frame in 0..self.settings.frames {
                let grid = self.render_frame(frame);
                terminal.draw(|f| draw_ui(f, &grid))?;

                if wait(delay)? == Status::Terminated {
                    debug!("interrupted during cycle {} frame {}", self.cycles, frame);
                    return Ok(());
                }
            }

            self.end_cycle();
        }
    }
}

pub fn draw_ui(f: &mut Frame, grid: &Grid) {
    let area = f.area();
    let canvas = Rect {
        width: (grid.width() as u16).min(area.width),
        height: (grid.height() as u16).min(area.height),
        ..area
    };

    let paragraph = Paragraph::new(build_lines_from_grid(grid));
    f.render_widget(paragraph, canvas);
}

pub fn is_interrupt(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Sleeps for `delay` while watching for an interrupt key or a raised
/// `interrupted` flag.
pub fn wait_frame(delay: Duration, interrupted: &AtomicBool) -> io::Result<Status> {
    let deadline = Instant::now() + delay;

    loop {
        if interrupted.load(Ordering::SeqCst) {
            return Ok(Status::Terminated);
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(Status::Cycling);
        }

        if event::poll(remaining.min(POLL_SLICE))? {
            if let Event::Key(key) = event::read()? {
                if is_interrupt(key) {
                    return Ok(Status::Terminated);
                }
            }
        }
    }
}
