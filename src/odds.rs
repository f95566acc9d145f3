use crate::model::Golfer;

/// Used when a player has no usable odds; keeps them near maximum variance.
pub const DEFAULT_IMPLIED_PROBABILITY: f64 = 0.01;

pub const MIN_VARIANCE_SCALE: f64 = 0.4;
pub const MAX_VARIANCE_SCALE: f64 = 1.0;

/// Converts American odds to an implied probability in `0..=1`.
///
/// Positive odds are underdogs (`+200` → 1/3), negative odds favorites
/// (`-150` → 0.6). Zero is not a valid price and yields `None`.
#[must_use]
pub fn implied_probability(american: f64) -> Option<f64> {
    if !american.is_finite() || american == 0.0 {
        return None;
    }
    if american > 0.0 {
        Some(100.0 / (american + 100.0))
    } else {
        let abs = american.abs();
        Some(abs / (abs + 100.0))
    }
}

/// Profit on a winning `stake` at `american` odds.
#[must_use]
pub fn payout(american: f64, stake: f64) -> f64 {
    if american == 0.0 || stake == 0.0 {
        return 0.0;
    }
    if american > 0.0 {
        stake * (american / 100.0)
    } else {
        stake * (100.0 / american.abs())
    }
}

#[must_use]
pub fn resolve_implied_probability(golfer: &Golfer) -> f64 {
    let Some(odds) = golfer.odds.as_ref() else {
        return DEFAULT_IMPLIED_PROBABILITY;
    };
    if let Some(p) = odds.implied_probability.filter(|p| *p > 0.0) {
        return p;
    }
    odds.american
        .and_then(implied_probability)
        .filter(|p| *p > 0.0)
        .unwrap_or(DEFAULT_IMPLIED_PROBABILITY)
}

/// Favorites swing less than long shots: 0.4 at certainty, 1.0 at zero.
#[must_use]
pub fn odds_variance_scale(implied_probability: f64) -> f64 {
    let p = implied_probability.clamp(0.0, 1.0);
    MIN_VARIANCE_SCALE + (1.0 - p) * (MAX_VARIANCE_SCALE - MIN_VARIANCE_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Odds;

    #[test]
    fn american_conversion() {
        let p = implied_probability(200.0).unwrap();
        assert!((p - 1.0 / 3.0).abs() < 1e-12);
        let p = implied_probability(-150.0).unwrap();
        assert!((p - 0.6).abs() < 1e-12);
        assert_eq!(implied_probability(0.0), None);
    }

    #[test]
    fn payout_both_sides() {
        assert!((payout(250.0, 10.0) - 25.0).abs() < 1e-12);
        assert!((payout(-200.0, 10.0) - 5.0).abs() < 1e-12);
        assert_eq!(payout(0.0, 10.0), 0.0);
    }

    #[test]
    fn missing_odds_get_small_probability() {
        let g = Golfer::new("1", "No Odds");
        assert_eq!(resolve_implied_probability(&g), DEFAULT_IMPLIED_PROBABILITY);

        let mut g = Golfer::new("2", "Zero Odds");
        g.odds = Some(Odds {
            american: Some(0.0),
            implied_probability: Some(0.0),
            last_updated: None,
        });
        assert_eq!(resolve_implied_probability(&g), DEFAULT_IMPLIED_PROBABILITY);
    }

    #[test]
    fn explicit_probability_wins_over_price() {
        let mut g = Golfer::new("1", "Fav").with_american_odds(400.0);
        if let Some(odds) = g.odds.as_mut() {
            odds.implied_probability = Some(0.5);
        }
        assert_eq!(resolve_implied_probability(&g), 0.5);
    }

    #[test]
    fn variance_bounds() {
        assert!((odds_variance_scale(1.0) - 0.4).abs() < 1e-12);
        assert!((odds_variance_scale(0.0) - 1.0).abs() < 1e-12);
        assert!(odds_variance_scale(0.2) > odds_variance_scale(0.6));
        assert!((odds_variance_scale(7.0) - 0.4).abs() < 1e-12);
    }
}
