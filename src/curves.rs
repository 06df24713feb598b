//! Per-frame probability and reveal curves for one quotation cycle.
//!
//! All functions are pure in `frame` and `frames`, with `frame` in
//! `0..frames`.

use crate::config::DensityCurve;

/// Number of trailing frames covered by the explosion ramp.
pub const EXPLOSION_FRAMES: usize = 3;
const EXPLOSION_FLOOR: f64 = 0.4;
const EXPLOSION_SPAN: f64 = 0.4;

/// Glitch chance, falling linearly from `max` on the first frame to zero on
/// the last.
pub fn glitch_prob(max: f64, frame: usize, frames: usize) -> f64 {
    if frames <= 1 {
        return max;
    }

    let last = (frames - 1) as f64;
    let progress = frame.min(frames - 1) as f64 / last;

    max * (1.0 - progress)
}

/// Leading columns eligible for fragments of the next quotation.
pub fn reveal(width: usize, frame: usize, frames: usize) -> usize {
    let frames = frames.max(1);
    width * (frame + 1).min(frames) / frames
}

/// Flower density for a frame, always in `[0, 1]`.
pub fn density(curve: DensityCurve, max: f64, frame: usize, frames: usize) -> f64 {
    let frames = frames.max(1);
    let progress = (frame + 1).min(frames) as f64 / frames as f64;
    let smooth = max * progress.powf(curve.power());

    let value = match curve {
        DensityCurve::Smooth { .. } => smooth,
        DensityCurve::Explosion { .. } => {
            let start = frames.saturating_sub(EXPLOSION_FRAMES);
            if frame >= start {
                let ramp = EXPLOSION_FLOOR
                    + (frame - start) as f64 / EXPLOSION_FRAMES as f64 * EXPLOSION_SPAN;
                // A high max density must not make the bloom a drop.
                ramp.max(smooth)
            } else {
                smooth
            }
        }
    };

    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAMES: usize = 30;

    #[test]
    fn glitch_decays_to_zero() {
        assert_eq!(glitch_prob(0.18, 0, FRAMES), 0.18);
        assert!(glitch_prob(0.18, FRAMES - 1, FRAMES).abs() < 1e-12);

        let mut previous = f64::INFINITY;
        for frame in 0..FRAMES {
            let p = glitch_prob(0.18, frame, FRAMES);
            assert!((0.0..=0.18).contains(&p));
            assert!(p <= previous);
            previous = p;
        }
    }

    #[test]
    fn glitch_with_single_frame_stays_at_max() {
        assert_eq!(glitch_prob(0.2, 0, 1), 0.2);
    }

    #[test]
    fn reveal_unlocks_full_width_on_last_frame() {
        assert_eq!(reveal(50, FRAMES - 1, FRAMES), 50);
        assert_eq!(reveal(50, 0, FRAMES), 1);
        assert_eq!(reveal(10, 0, 5), 2);

        let widths: Vec<_> = (0..FRAMES).map(|f| reveal(37, f, FRAMES)).collect();
        assert!(widths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn smooth_density_is_monotonic_and_bounded() {
        for power in [2.0, 4.0] {
            let curve = DensityCurve::Smooth { power };
            let values: Vec<_> = (0..FRAMES).map(|f| density(curve, 0.15, f, FRAMES)).collect();

            assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
            assert!((values[FRAMES - 1] - 0.15).abs() < 1e-12);
        }
    }

    #[test]
    fn quartic_curve_starts_slower_than_quadratic() {
        let square = density(DensityCurve::Smooth { power: 2.0 }, 0.15, 5, FRAMES);
        let quartic = density(DensityCurve::Smooth { power: 4.0 }, 0.15, 5, FRAMES);
        assert!(quartic < square);
    }

    #[test]
    fn explosion_jumps_up_over_last_frames() {
        let curve = DensityCurve::Explosion { power: 2.0 };
        let values: Vec<_> = (0..FRAMES).map(|f| density(curve, 0.15, f, FRAMES)).collect();

        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));

        let start = FRAMES - EXPLOSION_FRAMES;
        assert!(values[start - 1] < 0.15 + 1e-12);
        assert!((values[start] - 0.4).abs() < 1e-12);
        assert!(values[start] - values[start - 1] > 0.2);
        assert!((values[FRAMES - 1] - (0.4 + 2.0 / 3.0 * 0.4)).abs() < 1e-12);
    }

    #[test]
    fn explosion_never_drops_below_a_dense_smooth_curve() {
        let curve = DensityCurve::Explosion { power: 2.0 };
        let values: Vec<_> = (0..FRAMES).map(|f| density(curve, 1.0, f, FRAMES)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn explosion_covers_short_cycles() {
        let curve = DensityCurve::Explosion { power: 2.0 };
        assert!((density(curve, 0.15, 0, 2) - 0.4).abs() < 1e-12);
    }
}
