//! Static cell-control evaluation.

use crate::board::{Color, Tally};

/// Magnitude of the static evaluation when one side owns every owned cell.
pub const MAX_SCORE: f64 = 100.0;

/// Scores `tally` for `player` as the normalized ownership difference,
/// in `[-MAX_SCORE, MAX_SCORE]`. Returns 0 when neither side owns a cell.
#[inline]
pub fn evaluate(tally: &Tally, player: Color) -> f64 {
    let own = tally.of(player) as f64;
    let opponent = tally.of(player.opponent()) as f64;
    let total = own + opponent;
    if total == 0.0 {
        return 0.0;
    }
    (own - opponent) / total * MAX_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(blue: usize, red: usize) -> Tally {
        Tally {
            blue,
            red,
            neutral: 36 - blue - red,
        }
    }

    #[test]
    fn empty_board_scores_zero() {
        assert_eq!(evaluate(&tally(0, 0), Color::Blue), 0.0);
    }

    #[test]
    fn symmetric_between_players() {
        let t = tally(6, 2);
        assert_eq!(evaluate(&t, Color::Blue), 50.0);
        assert_eq!(evaluate(&t, Color::Red), -50.0);
    }

    #[test]
    fn bounded_by_max_score() {
        assert_eq!(evaluate(&tally(9, 0), Color::Blue), MAX_SCORE);
        assert_eq!(evaluate(&tally(9, 0), Color::Red), -MAX_SCORE);
        assert_eq!(evaluate(&tally(4, 4), Color::Red), 0.0);
    }
}
