use std::time::Duration;

pub const AVERAGE_WORD_LENGTH: f64 = 5.0;
const MILLIS_PER_MINUTE: f64 = 60_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub speed_wpm: f64,
    pub accuracy_pct: f64,
}

impl ScoreResult {
    pub const ZERO: ScoreResult = ScoreResult {
        speed_wpm: 0.0,
        accuracy_pct: 0.0,
    };
}

/// Speed in words per minute and accuracy percentage, both rounded to two places.
///
/// Nothing typed scores zero on both counts. Accuracy only counts one mistake
/// per target character and is clamped to `[0, 100]`.
pub fn score(elapsed: Duration, typed_count: usize, mistakes: usize) -> ScoreResult {
    if typed_count == 0 {
        return ScoreResult::ZERO;
    }

    let minutes = elapsed.as_millis() as f64 / MILLIS_PER_MINUTE;
    let speed_wpm = if minutes > 0.0 {
        round2(typed_count as f64 / minutes / AVERAGE_WORD_LENGTH)
    } else {
        0.0
    };

    let accuracy = (1.0 - mistakes as f64 / typed_count as f64) * 100.0;
    let accuracy_pct = round2(accuracy).clamp(0.0, 100.0);

    ScoreResult {
        speed_wpm,
        accuracy_pct,
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_nothing_typed() {
        assert_eq!(score(Duration::from_secs(30), 0, 0), ScoreResult::ZERO);
        assert_eq!(score(Duration::ZERO, 0, 0), ScoreResult::ZERO);
        assert_eq!(score(Duration::from_secs(30), 0, 4), ScoreResult::ZERO);
    }

    #[test]
    fn test_score_five_words_in_a_minute() {
        let result = score(Duration::from_millis(60_000), 25, 0);
        assert_eq!(result.speed_wpm, 5.0);
        assert_eq!(result.accuracy_pct, 100.0);
    }

    #[test]
    fn test_score_accuracy_with_mistakes() {
        let result = score(Duration::from_millis(60_000), 10, 2);
        assert_eq!(result.accuracy_pct, 80.0);
        assert_eq!(result.speed_wpm, 2.0);
    }

    #[test]
    fn test_score_rounds_to_two_places() {
        // 7 chars in 15s: 7 / 0.25 / 5 = 5.6
        assert_eq!(score(Duration::from_secs(15), 7, 0).speed_wpm, 5.6);
        // 1 mistake in 3: 66.666..
        assert_eq!(score(Duration::from_secs(60), 3, 1).accuracy_pct, 66.67);
    }

    #[test]
    fn test_score_accuracy_never_negative() {
        let result = score(Duration::from_secs(10), 1, 3);
        assert_eq!(result.accuracy_pct, 0.0);
    }

    #[test]
    fn test_score_zero_elapsed() {
        let result = score(Duration::ZERO, 5, 0);
        assert_eq!(result.speed_wpm, 0.0);
        assert_eq!(result.accuracy_pct, 100.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(42.0), 42.0);
        assert_eq!(round2(0.004), 0.0);
    }
}
