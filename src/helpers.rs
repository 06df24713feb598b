use crate::{
    error::{Error, Result},
    types::{Cell, CellStyle, Corpus, Grid, NoiseField, Quotation},
};

use log::{info, warn};
use rand::Rng;
use ratatui::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};
use unicode_width::UnicodeWidthChar;

pub const NOISE_GLYPHS: &str = "◻◼◇◆○●□■▢▣▤▥▦▧▨▩▪▫⬛⬜◉◌◍◊";

pub const FLOWER_GLYPHS: &str = "⁕⚘𓁗𓁘𓆷𓆸𓆻𓇖𓇗𓇘𓇙𓇬𓋇𓋈🌻🎕🎴💮🥀✿❀❁✾❃";

pub const QUOTE_COLOR: Color = Color::LightYellow;
pub const LABEL_COLOR: Color = Color::LightMagenta;
pub const FLOWER_COLORS: [Color; 3] = [Color::LightMagenta, Color::LightRed, Color::LightCyan];

pub const END_NOTICE: &str = r"
Bonne Fête des Fleurs!
      _,-._
     / \_/ \
    >-(_)-<
     \_/ \_/
       `-'
";

#[derive(Deserialize)]
struct CorpusFile {
    #[serde(default)]
    poems: Vec<PoemEntry>,
}

#[derive(Deserialize)]
struct PoemEntry {
    #[serde(default)]
    author: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    text: String,
}

pub fn load_corpus(path: &Path, stride: usize) -> Result<Corpus> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file: CorpusFile = serde_json::from_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let corpus = build_corpus(file.poems, stride);
    if corpus.is_empty() {
        return Err(Error::EmptyCorpus {
            path: path.to_path_buf(),
        });
    }

    info!("loaded {} poems from {}", corpus.len(), path.display());

    Ok(corpus)
}

fn build_corpus(entries: Vec<PoemEntry>, stride: usize) -> Corpus {
    entries
        .into_iter()
        .filter_map(|entry| {
            let lines: Vec<String> = entry
                .text
                .lines()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .map(str::to_owned)
                .collect();

            if lines.len() < stride.max(1) {
                warn!(
                    "skipping \"{}\" by {}: {} line(s), need {}",
                    entry.title,
                    entry.author,
                    lines.len(),
                    stride
                );
                return None;
            }

            Some(Quotation {
                author: entry.author,
                title: entry.title,
                lines,
            })
        })
        .collect()
}

/// Keeps only glyphs occupying exactly one terminal column.
pub fn narrow_pool(glyphs: &str, name: &'static str) -> Result<Vec<char>> {
    let (narrow, wide): (Vec<char>, Vec<char>) =
        glyphs.chars().partition(|c| c.width() == Some(1));

    if !wide.is_empty() {
        warn!(
            "dropping {} glyph(s) from the {} pool that are not one column wide: {}",
            wide.len(),
            name,
            wide.iter().collect::<String>()
        );
    }

    if narrow.is_empty() {
        return Err(Error::NoGlyphs(name));
    }

    Ok(narrow)
}

/// Glyph pools shared by every frame of the run.
#[derive(Clone, Debug)]
pub struct Pools {
    pub noise: Vec<char>,
    pub flowers: Vec<char>,
}

impl Pools {
    pub fn new(flowers: Option<&str>) -> Result<Self> {
        Ok(Self {
            noise: narrow_pool(NOISE_GLYPHS, "noise")?,
            flowers: narrow_pool(flowers.unwrap_or(FLOWER_GLYPHS), "flower")?,
        })
    }
}

pub fn pick<R: Rng + ?Sized>(pool: &[char], rng: &mut R) -> char {
    pool[rng.random_range(0..pool.len())]
}

pub fn generate_noise<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    pool: &[char],
    rng: &mut R,
) -> NoiseField {
    let rows = (0..height)
        .map(|_| (0..width).map(|_| pick(pool, rng)).collect())
        .collect();

    NoiseField { width, rows }
}

/// Column at which `len` characters are centered in `width`.
pub fn center_start(width: usize, len: usize) -> usize {
    width.saturating_sub(len) / 2
}

pub fn truncate(text: &str, width: usize) -> Vec<char> {
    text.chars().take(width).collect()
}

fn cell_style(style: CellStyle) -> Style {
    match style {
        CellStyle::Plain => Style::default(),
        CellStyle::Accent => Style::default().fg(QUOTE_COLOR),
        CellStyle::Label => Style::default().fg(LABEL_COLOR),
        CellStyle::Ornament(class) => {
            Style::default().fg(FLOWER_COLORS[class as usize % FLOWER_COLORS.len()])
        }
    }
}

/// Converts a grid into styled lines, merging runs of equally styled cells.
pub fn build_lines_from_grid(grid: &Grid) -> Vec<Line<'static>> {
    grid.rows()
        .take(grid.height())
        .map(|row| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut run = String::new();
            let mut run_style: Option<CellStyle> = None;

            for &Cell { ch, style } in row {
                if let Some(current) = run_style.filter(|&s| s != style) {
                    spans.push(Span::styled(std::mem::take(&mut run), cell_style(current)));
                }

                run.push(ch);
                run_style = Some(style);
            }

            if let Some(style) = run_style {
                spans.push(Span::styled(run, cell_style(style)));
            }

            Line::from(spans)
        })
        .collect()
}
