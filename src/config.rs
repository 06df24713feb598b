use crate::{
    error::{Error, Result},
    types::LineLayout,
};

use clap::{Parser, ValueEnum};
use std::{path::PathBuf, time::Duration};

const DEFAULT_WIDTH: usize = 50;
const DEFAULT_HEIGHT: usize = 15;
const DEFAULT_DURATION_SECS: f64 = 6.0;
const DEFAULT_FRAMES: usize = 30;
const DEFAULT_MAX_DENSITY: f64 = 0.15;
const DEFAULT_GLITCH: f64 = 0.18;
const DEFAULT_FRAGMENT: f64 = 0.05;
const DEFAULT_STAY: f64 = 0.95;
const DEFAULT_POWER: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CurveKind {
    /// Power curve all the way to the last frame.
    Smooth,
    /// Power curve, then a steep bloom over the last three frames.
    Explosion,
}

#[derive(Debug, Parser)]
#[command(name = "floret")]
#[command(about = "Quotations dissolving into glitch noise and flowers")]
pub struct Args {
    /// Corpus file: {"poems": [{"author", "title", "text"}]}
    #[arg(short = 'f', long = "file", default_value = "poems.json")]
    pub file: PathBuf,

    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Seconds spent on each quotation
    #[arg(
        short = 'd',
        long,
        default_value_t = DEFAULT_DURATION_SECS,
        allow_negative_numbers = true
    )]
    pub duration: f64,

    /// Frames rendered per quotation
    #[arg(short = 'n', long, default_value_t = DEFAULT_FRAMES)]
    pub frames: usize,

    /// Flower density reached at the end of the smooth curve
    #[arg(long, default_value_t = DEFAULT_MAX_DENSITY, allow_negative_numbers = true)]
    pub max_density: f64,

    /// Glitch probability on the first frame of a cycle
    #[arg(long, default_value_t = DEFAULT_GLITCH, allow_negative_numbers = true)]
    pub glitch: f64,

    /// Per-cell chance of previewing the next quotation
    #[arg(long, default_value_t = DEFAULT_FRAGMENT, allow_negative_numbers = true)]
    pub fragment: f64,

    /// Chance of staying within the current poem
    #[arg(long, default_value_t = DEFAULT_STAY, allow_negative_numbers = true)]
    pub stay: f64,

    /// Exponent of the flower density curve
    #[arg(long, default_value_t = DEFAULT_POWER, allow_negative_numbers = true)]
    pub power: f64,

    #[arg(long, value_enum, default_value_t = CurveKind::Explosion)]
    pub curve: CurveKind,

    /// Show consecutive pairs of lines
    #[arg(long)]
    pub pair: bool,

    /// Single flower color instead of a rotating palette
    #[arg(long)]
    pub mono: bool,

    /// Replacement flower glyphs, one per character
    #[arg(long)]
    pub flowers: Option<String>,

    /// Seed for a reproducible animation
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DensityCurve {
    Smooth { power: f64 },
    Explosion { power: f64 },
}

impl DensityCurve {
    pub fn power(self) -> f64 {
        match self {
            DensityCurve::Smooth { power } | DensityCurve::Explosion { power } => power,
        }
    }
}

/// Immutable run settings, built once from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    pub duration: Duration,
    pub frames: usize,
    pub max_density: f64,
    pub glitch_max: f64,
    pub fragment_prob: f64,
    pub stay_prob: f64,
    pub curve: DensityCurve,
    pub layout: LineLayout,
    pub color_classes: u8,
    pub corpus_path: PathBuf,
    pub flowers: Option<String>,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            duration: Duration::from_secs_f64(DEFAULT_DURATION_SECS),
            frames: DEFAULT_FRAMES,
            max_density: DEFAULT_MAX_DENSITY,
            glitch_max: DEFAULT_GLITCH,
            fragment_prob: DEFAULT_FRAGMENT,
            stay_prob: DEFAULT_STAY,
            curve: DensityCurve::Explosion {
                power: DEFAULT_POWER,
            },
            layout: LineLayout::Single,
            color_classes: 3,
            corpus_path: PathBuf::from("poems.json"),
            flowers: None,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self> {
        let layout = if args.pair {
            LineLayout::Paired
        } else {
            LineLayout::Single
        };

        if args.width == 0 {
            return Err(Error::Config("width must be at least 1".into()));
        }

        if args.height < layout.min_height() {
            return Err(Error::Config(format!(
                "height {} is below the minimum of {} for this layout",
                args.height,
                layout.min_height()
            )));
        }

        if args.frames == 0 {
            return Err(Error::Config("frames must be at least 1".into()));
        }

        if !(args.duration.is_finite() && args.duration > 0.0) {
            return Err(Error::Config(format!(
                "duration must be a positive number of seconds, got {}",
                args.duration
            )));
        }

        if !(args.power.is_finite() && args.power > 0.0) {
            return Err(Error::Config(format!(
                "power must be positive, got {}",
                args.power
            )));
        }

        for (name, value) in [
            ("max-density", args.max_density),
            ("glitch", args.glitch),
            ("fragment", args.fragment),
            ("stay", args.stay),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must lie in [0, 1], got {}",
                    name, value
                )));
            }
        }

        let duration = Duration::try_from_secs_f64(args.duration).map_err(|e| {
            Error::Config(format!("duration {} is out of range: {}", args.duration, e))
        })?;

        let curve = match args.curve {
            CurveKind::Smooth => DensityCurve::Smooth { power: args.power },
            CurveKind::Explosion => DensityCurve::Explosion { power: args.power },
        };

        Ok(Self {
            width: args.width,
            height: args.height,
            duration,
            frames: args.frames,
            max_density: args.max_density,
            glitch_max: args.glitch,
            fragment_prob: args.fragment,
            stay_prob: args.stay,
            curve,
            layout,
            color_classes: if args.mono { 1 } else { 3 },
            corpus_path: args.file,
            flowers: args.flowers,
            seed: args.seed,
        })
    }

    /// Pause between two frames of a cycle.
    pub fn delay(&self) -> Duration {
        match u32::try_from(self.frames) {
            Ok(frames) => self.duration / frames,
            Err(_) => self.duration.div_f64(self.frames as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Settings> {
        let args = Args::try_parse_from(std::iter::once("floret").chain(argv.iter().copied()))
            .expect("arguments should parse");
        Settings::from_args(args)
    }

    #[test]
    fn defaults_match_settings_default() {
        let settings = parse(&[]).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.delay(), Duration::from_millis(200));
    }

    #[test]
    fn paired_layout_needs_four_rows() {
        assert!(matches!(
            parse(&["--pair", "-H", "3"]),
            Err(Error::Config(_))
        ));

        let settings = parse(&["--pair", "-H", "4"]).unwrap();
        assert_eq!(settings.layout, LineLayout::Paired);
    }

    #[test]
    fn single_layout_needs_three_rows() {
        assert!(parse(&["-H", "2"]).is_err());
        assert!(parse(&["-H", "3"]).is_ok());
    }

    #[test]
    fn rejects_out_of_range_probabilities() {
        assert!(matches!(parse(&["--stay", "1.5"]), Err(Error::Config(_))));
        assert!(matches!(parse(&["--glitch", "2"]), Err(Error::Config(_))));
        assert!(matches!(
            parse(&["--max-density", "-0.1"]),
            Err(Error::Config(_))
        ));
        assert!(parse(&["--glitch", "0"]).is_ok());
    }

    #[test]
    fn rejects_degenerate_timing() {
        assert!(parse(&["-n", "0"]).is_err());
        assert!(parse(&["-d", "0"]).is_err());
        assert!(parse(&["-d", "-3"]).is_err());
        assert!(parse(&["--power", "0"]).is_err());
    }

    #[test]
    fn huge_duration_is_a_config_error() {
        assert!(matches!(parse(&["-d", "1e30"]), Err(Error::Config(_))));
    }

    #[test]
    fn delay_survives_frame_counts_beyond_u32() {
        let settings = parse(&["-n", "4294967296"]).unwrap();
        let delay = settings.delay();
        assert!(delay < Duration::from_micros(1));
    }

    #[test]
    fn curve_and_palette_flags() {
        let settings = parse(&["--curve", "smooth", "--power", "4", "--mono"]).unwrap();
        assert_eq!(settings.curve, DensityCurve::Smooth { power: 4.0 });
        assert_eq!(settings.color_classes, 1);
    }
}
