//! Frame compositor.
//!
//! A frame is the noise field passed through an ordered chain of layers,
//! each taking the previous grid by value and returning the next one. A
//! later layer wins wherever two layers touch the same cell:
//!
//! 1. base: the cycle's noise field, plain
//! 2. fragments of the next quotation, off the text rows
//! 3. glitch over still-plain cells, off the text rows
//! 4. the current quotation, centered on the text rows
//! 5. author top-left and title bottom-right
//! 6. flowers, anywhere

use crate::{
    config::Settings,
    curves,
    helpers::{Pools, center_start, pick, truncate},
    types::{Cell, CellStyle, Grid, NoiseField},
};

use rand::Rng;

pub struct FrameContext<'a> {
    pub settings: &'a Settings,
    pub pools: &'a Pools,
    /// Line or line pair shown in the middle.
    pub current: &'a [&'a str],
    /// Line or line pair previewed by fragments.
    pub next: &'a [&'a str],
    pub author: &'a str,
    pub title: &'a str,
    pub frame: usize,
}

impl FrameContext<'_> {
    fn text_rows(&self, height: usize) -> Vec<usize> {
        self.settings.layout.text_rows(height)
    }
}

pub fn render<R: Rng + ?Sized>(noise: &NoiseField, ctx: &FrameContext, rng: &mut R) -> Grid {
    let grid = Grid::from_noise(noise);
    let grid = fragment_layer(grid, ctx, rng);
    let grid = glitch_layer(grid, ctx, rng);
    let grid = quote_layer(grid, ctx);
    let grid = label_layer(grid, ctx);

    flower_layer(grid, ctx, rng)
}

pub fn fragment_layer<R: Rng + ?Sized>(mut grid: Grid, ctx: &FrameContext, rng: &mut R) -> Grid {
    let (width, height) = (grid.width(), grid.height());
    let text_rows = ctx.text_rows(height);
    let reveal = curves::reveal(width, ctx.frame, ctx.settings.frames);

    let next: Vec<Vec<char>> = ctx.next.iter().map(|l| truncate(l, width)).collect();
    if next.iter().all(|l| l.is_empty()) {
        return grid;
    }

    for y in (0..height).filter(|y| !text_rows.contains(y)) {
        for x in 0..reveal {
            if rng.random::<f64>() >= ctx.settings.fragment_prob {
                continue;
            }

            let line = choose_line(&next, rng);
            if !line.is_empty() {
                grid.set(x, y, Cell::accent(line[x % line.len()]));
            }
        }
    }

    grid
}

fn choose_line<'a, R: Rng + ?Sized>(lines: &'a [Vec<char>], rng: &mut R) -> &'a [char] {
    match lines {
        [first, second] if !first.is_empty() && !second.is_empty() => {
            if rng.random::<f64>() < 0.5 {
                first.as_slice()
            } else {
                second.as_slice()
            }
        }
        [first, second] if first.is_empty() => second.as_slice(),
        [first, ..] => first.as_slice(),
        [] => &[],
    }
}

pub fn glitch_layer<R: Rng + ?Sized>(mut grid: Grid, ctx: &FrameContext, rng: &mut R) -> Grid {
    let text_rows = ctx.text_rows(grid.height());
    let prob = curves::glitch_prob(ctx.settings.glitch_max, ctx.frame, ctx.settings.frames);

    for y in (0..grid.height()).filter(|y| !text_rows.contains(y)) {
        for x in 0..grid.width() {
            if grid.get(x, y).style != CellStyle::Plain {
                continue;
            }

            if rng.random::<f64>() < prob {
                grid.set(x, y, Cell::plain(pick(&ctx.pools.noise, rng)));
            }
        }
    }

    grid
}

pub fn quote_layer(mut grid: Grid, ctx: &FrameContext) -> Grid {
    let width = grid.width();

    for (y, line) in ctx.text_rows(grid.height()).into_iter().zip(ctx.current) {
        let chars = truncate(line, width);
        let start = center_start(width, chars.len());

        for (i, &ch) in chars.iter().enumerate() {
            grid.set(start + i, y, Cell::accent(ch));
        }
    }

    grid
}

pub fn label_layer(mut grid: Grid, ctx: &FrameContext) -> Grid {
    let (width, height) = (grid.width(), grid.height());

    for (x, &ch) in truncate(ctx.author, width).iter().enumerate() {
        grid.set(x, 0, Cell::label(ch));
    }

    let title = truncate(ctx.title, width);
    let start = width - title.len();
    for (i, &ch) in title.iter().enumerate() {
        grid.set(start + i, height - 1, Cell::label(ch));
    }

    grid
}

pub fn flower_layer<R: Rng + ?Sized>(mut grid: Grid, ctx: &FrameContext, rng: &mut R) -> Grid {
    let settings = ctx.settings;
    let density = curves::density(settings.curve, settings.max_density, ctx.frame, settings.frames);
    let classes = settings.color_classes.max(1);

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if rng.random::<f64>() < density {
                let ch = pick(&ctx.pools.flowers, rng);
                let class = rng.random_range(0..classes);
                grid.set(
                    x,
                    y,
                    Cell {
                        ch,
                        style: CellStyle::Ornament(class),
                    },
                );
            }
        }
    }

    grid
}
