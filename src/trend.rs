use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Display classification for a card trend: whether the movement is in the
/// metric's good direction, its bad direction, or has no baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendColor {
    Good,
    Bad,
    Neutral,
}

/// Absolute-difference trend between a current and previous metric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// `|current - previous|` rounded to 2 decimals; the current value
    /// itself when there is no baseline.
    pub magnitude: f64,
    pub direction: TrendDirection,
    pub color: TrendColor,
}

/// Compare a metric against its previous-period counterpart as an absolute
/// difference.
///
/// `previous == 0` (or non-finite) means "no baseline to compare": the
/// magnitude carries the current value and the color is neutral rather than
/// claiming an increase happened.
pub fn absolute_trend(current: f64, previous: f64, increase_is_good: bool) -> Trend {
    if previous == 0.0 || !previous.is_finite() {
        return Trend {
            magnitude: round2(current),
            direction: TrendDirection::Up,
            color: TrendColor::Neutral,
        };
    }

    let diff = current - previous;
    let direction = if diff >= 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };
    let moved_up = direction == TrendDirection::Up;

    Trend {
        magnitude: round2(diff.abs()),
        direction,
        color: if moved_up == increase_is_good {
            TrendColor::Good
        } else {
            TrendColor::Bad
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentDirection {
    Increase,
    Decrease,
    Steady,
}

/// Percentage-change trend used by the per-metric detail views. Kept as a
/// separate operation from `absolute_trend`; the two encode different
/// product decisions and must not be unified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentTrend {
    pub direction: PercentDirection,
    /// `((current - previous) / previous) * 100` rounded to 1 decimal;
    /// `None` when `previous <= 0` leaves nothing to divide by.
    pub percentage: Option<f64>,
}

pub fn percent_trend(current: f64, previous: f64) -> PercentTrend {
    let direction = if previous == 0.0 && current > 0.0 {
        PercentDirection::Increase
    } else if current > previous {
        PercentDirection::Increase
    } else if current < previous {
        PercentDirection::Decrease
    } else {
        PercentDirection::Steady
    };

    let percentage = if previous > 0.0 {
        Some(round1((current - previous) / previous * 100.0))
    } else {
        None
    };

    PercentTrend {
        direction,
        percentage,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
