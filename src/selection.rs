//! Biased random walk over (poem, line) pointers.

use crate::types::{Quotation, SelectionState};

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Moved on within the same poem.
    Advance,
    /// Jumped to a random poem and line.
    Jump,
}

/// Uniformly random starting pointer. `corpus` must not be empty.
pub fn initial<R: Rng + ?Sized>(corpus: &[Quotation], rng: &mut R) -> SelectionState {
    jump(corpus, rng)
}

/// Next pointer: with probability `stay_prob` the line advances by `stride`
/// (wrapping within the poem), otherwise a uniformly random poem and line.
pub fn advance<R: Rng + ?Sized>(
    state: SelectionState,
    corpus: &[Quotation],
    stride: usize,
    stay_prob: f64,
    rng: &mut R,
) -> (SelectionState, Step) {
    if rng.random::<f64>() < stay_prob {
        let len = corpus[state.poem].lines.len();
        let next = SelectionState {
            poem: state.poem,
            line: (state.line + stride) % len,
        };

        return (next, Step::Advance);
    }

    (jump(corpus, rng), Step::Jump)
}

fn jump<R: Rng + ?Sized>(corpus: &[Quotation], rng: &mut R) -> SelectionState {
    let poem = rng.random_range(0..corpus.len());
    let line = rng.random_range(0..corpus[poem].lines.len());

    SelectionState { poem, line }
}

/// The `count` consecutive lines starting at `state`, wrapping within the poem.
pub fn lines_at(corpus: &[Quotation], state: SelectionState, count: usize) -> Vec<&str> {
    let lines = &corpus[state.poem].lines;

    (0..count)
        .map(|offset| lines[(state.line + offset) % lines.len()].as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn poem(n: usize) -> Quotation {
        Quotation {
            author: format!("author {}", n),
            title: format!("title {}", n),
            lines: (0..5).map(|i| format!("line {} of {}", i, n)).collect(),
        }
    }

    #[test]
    fn advance_wraps_within_poem() {
        let corpus = vec![poem(0)];
        let mut rng = StdRng::seed_from_u64(1);
        let state = SelectionState { poem: 0, line: 4 };

        let (next, step) = advance(state, &corpus, 1, 1.0, &mut rng);
        assert_eq!(step, Step::Advance);
        assert_eq!(next, SelectionState { poem: 0, line: 0 });

        let (next, _) = advance(SelectionState { poem: 0, line: 3 }, &corpus, 2, 1.0, &mut rng);
        assert_eq!(next.line, 0);
    }

    #[test]
    fn jumps_stay_in_bounds() {
        let corpus: Vec<_> = (0..7).map(poem).collect();
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = initial(&corpus, &mut rng);

        for _ in 0..1_000 {
            let (next, step) = advance(state, &corpus, 2, 0.0, &mut rng);
            assert_eq!(step, Step::Jump);
            assert!(next.poem < corpus.len());
            assert!(next.line < corpus[next.poem].lines.len());
            state = next;
        }
    }

    #[test]
    fn stay_fraction_converges() {
        let corpus: Vec<_> = (0..10).map(poem).collect();
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = initial(&corpus, &mut rng);
        let trials = 20_000;
        let mut stayed = 0;

        for _ in 0..trials {
            let (next, step) = advance(state, &corpus, 1, 0.95, &mut rng);
            if step == Step::Advance {
                assert_eq!(next.poem, state.poem);
                stayed += 1;
            }
            state = next;
        }

        let fraction = stayed as f64 / trials as f64;
        assert!((fraction - 0.95).abs() < 0.01, "fraction {}", fraction);
    }

    #[test]
    fn lines_at_wraps_pairs() {
        let corpus = vec![poem(0)];
        let lines = lines_at(&corpus, SelectionState { poem: 0, line: 4 }, 2);
        assert_eq!(lines, vec!["line 4 of 0", "line 0 of 0"]);
    }
}
