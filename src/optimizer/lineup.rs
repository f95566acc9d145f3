use crate::error::CoreError;
use crate::model::{FantasyLineup, FantasyPlayer, FantasySettings, FeasibilityMode, LineupBatch};
use crate::optimizer::constraints::{LineupConstraints, MAX_LINEUPS, available_players};
use uuid::Uuid;

/// Builds up to `min(settings.lineups, MAX_LINEUPS)` salary-capped lineups.
///
/// Candidates are ranked once by projected points per salary dollar and
/// filled greedily. Exposure is tracked across the batch. A lineup that
/// cannot be completed ends the batch; the lineups built so far are kept
/// and the reason lands in `stop_reason`.
///
/// # Errors
///
/// Will return `Err` for an unsupported site, a pool smaller than the roster,
/// or locked players that alone break the roster size or budget
pub fn generate_optimal_lineups(
    players: &[FantasyPlayer],
    settings: &FantasySettings,
    locked: &[String],
    excluded: &[String],
) -> Result<LineupBatch, CoreError> {
    let constraints = LineupConstraints::for_site(&settings.site, settings.budget)?;
    generate_lineups_with(players, constraints, settings, locked, excluded)
}

/// Same as [`generate_optimal_lineups`] with the roster shape given directly.
///
/// `settings.site` and `settings.budget` are ignored in favour of `constraints`.
///
/// # Errors
///
/// Will return `Err` for a pool smaller than the roster, or locked players
/// that alone break the roster size or budget
pub fn generate_lineups_with(
    players: &[FantasyPlayer],
    constraints: LineupConstraints,
    settings: &FantasySettings,
    locked: &[String],
    excluded: &[String],
) -> Result<LineupBatch, CoreError> {
    let available = available_players(players, excluded);
    if available.len() < constraints.roster_size {
        return Err(CoreError::InsufficientPlayers {
            needed: constraints.roster_size,
            available: available.len(),
        });
    }

    let (locked_players, mut candidates): (Vec<&FantasyPlayer>, Vec<&FantasyPlayer>) =
        available.into_iter().partition(|p| locked.contains(&p.id));
    if locked_players.len() > constraints.roster_size {
        return Err(CoreError::TooManyLocked {
            locked: locked_players.len(),
            roster_size: constraints.roster_size,
        });
    }
    let locked_salary = salary_total(&locked_players).ok_or(CoreError::SalaryOverflow)?;
    if locked_salary > constraints.budget {
        return Err(CoreError::LockedOverBudget {
            locked_salary,
            budget: constraints.budget,
        });
    }

    candidates.sort_by(|a, b| b.value_density().total_cmp(&a.value_density()));

    let generated_cap = settings.lineups.min(MAX_LINEUPS);
    let mut lineups: Vec<FantasyLineup> = Vec::with_capacity(generated_cap);
    let mut stop_reason = None;
    for attempt in 0..generated_cap {
        let built = generate_single_lineup(
            &candidates,
            &locked_players,
            locked_salary,
            constraints,
            settings,
            &lineups,
        );
        match built {
            Ok(lineup) => lineups.push(lineup),
            Err(e) => {
                tracing::warn!(attempt, error = %e, "stopping lineup generation early");
                stop_reason = Some(e.to_string());
                break;
            }
        }
    }

    Ok(LineupBatch {
        lineups,
        requested: settings.lineups,
        generated_cap,
        stop_reason,
    })
}

/// Sum of salaries, or `None` if it does not fit in an `i64`.
fn salary_total(players: &[&FantasyPlayer]) -> Option<i64> {
    players
        .iter()
        .try_fold(0_i64, |acc, p| acc.checked_add(p.salary))
}

/// Share of `existing` lineups that already contain `player_id`, 0..=1.
#[must_use]
pub fn exposure(player_id: &str, existing: &[FantasyLineup]) -> f64 {
    let count = existing.iter().filter(|l| l.contains(player_id)).count();
    count as f64 / existing.len().max(1) as f64
}

/// Salary to hold back so `open_spots` can still be filled from `later` candidates.
fn strict_reserve(
    later: &[&FantasyPlayer],
    later_eligible: &[bool],
    lineup: &[&FantasyPlayer],
    open_spots: usize,
) -> Option<i64> {
    if open_spots == 0 {
        return Some(0);
    }
    let mut salaries: Vec<i64> = later
        .iter()
        .zip(later_eligible)
        .filter(|(p, eligible)| **eligible && !lineup.iter().any(|l| l.id == p.id))
        .map(|(p, _)| p.salary)
        .collect();
    if salaries.len() < open_spots {
        return None;
    }
    salaries.sort_unstable();
    salaries[..open_spots]
        .iter()
        .try_fold(0_i64, |acc, salary| acc.checked_add(*salary))
}

fn generate_single_lineup(
    candidates: &[&FantasyPlayer],
    locked: &[&FantasyPlayer],
    locked_salary: i64,
    constraints: LineupConstraints,
    settings: &FantasySettings,
    existing: &[FantasyLineup],
) -> Result<FantasyLineup, CoreError> {
    let mut lineup: Vec<&FantasyPlayer> = locked.to_vec();
    let mut remaining_salary = constraints.budget - locked_salary;
    let mut remaining_spots = constraints.roster_size.saturating_sub(lineup.len());

    let cheapest = candidates.iter().map(|p| p.salary).min().unwrap_or(0);
    let eligible: Vec<bool> = candidates
        .iter()
        .map(|p| exposure(&p.id, existing) * 100.0 < settings.max_exposure)
        .collect();

    for (idx, player) in candidates.iter().enumerate() {
        if remaining_spots == 0 {
            break;
        }
        if lineup.iter().any(|p| p.id == player.id) {
            continue;
        }
        if player.salary > remaining_salary {
            continue;
        }
        let reserve = match settings.feasibility {
            FeasibilityMode::GlobalMinimum => i64::try_from(remaining_spots - 1)
                .ok()
                .and_then(|spots| spots.checked_mul(cheapest)),
            FeasibilityMode::Strict => strict_reserve(
                &candidates[idx + 1..],
                &eligible[idx + 1..],
                &lineup,
                remaining_spots - 1,
            ),
        };
        match reserve.and_then(|reserve| reserve.checked_add(player.salary)) {
            Some(needed) if needed <= remaining_salary => {}
            _ => continue,
        }
        if !eligible[idx] {
            continue;
        }

        lineup.push(*player);
        remaining_salary -= player.salary;
        remaining_spots -= 1;
    }

    if remaining_spots > 0 {
        return Err(CoreError::LineupIncomplete {
            open_spots: remaining_spots,
        });
    }

    Ok(FantasyLineup {
        id: Uuid::new_v4().simple().to_string(),
        players: lineup.iter().map(|p| p.id.clone()).collect(),
        total_salary: constraints.budget - remaining_salary,
        projected_points: lineup.iter().map(|p| p.projected_points).sum(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, salary: i64) -> FantasyPlayer {
        FantasyPlayer {
            id: id.to_string(),
            name: id.to_string(),
            salary,
            projected_points: 10.0,
            ownership: None,
        }
    }

    #[test]
    fn salary_totals_detect_overflow() {
        let a = player("a", i64::MAX / 2 + 1);
        let b = player("b", i64::MAX / 2 + 1);
        assert_eq!(salary_total(&[&a]), Some(i64::MAX / 2 + 1));
        assert_eq!(salary_total(&[&a, &b]), None);
        assert_eq!(strict_reserve(&[&a, &b], &[true, true], &[], 2), None);
    }

    #[test]
    fn exposure_of_empty_batch_is_zero() {
        assert_eq!(exposure("a", &[]), 0.0);
    }

    #[test]
    fn strict_reserve_sums_cheapest_eligible() {
        let a = player("a", 9000);
        let b = player("b", 6000);
        let c = player("c", 7000);
        let later = vec![&a, &b, &c];
        assert_eq!(strict_reserve(&later, &[true, true, true], &[], 2), Some(13000));
        assert_eq!(strict_reserve(&later, &[true, false, true], &[], 2), Some(16000));
        assert_eq!(strict_reserve(&later, &[true, false, false], &[], 2), None);
        assert_eq!(strict_reserve(&later, &[true, true, true], &[&b], 2), Some(16000));
    }
}
