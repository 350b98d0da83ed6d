use crate::config::LeagueConfig;
use crate::models::{CleanupReport, ScoreBreakdown, ScoreOverride};
use rand::Rng;

/// Computes the point breakdown for a report.
///
/// `verified_this_month` is the count of the owning zone's verified reports
/// submitted in the current calendar month, supplied by the store so this
/// stays a pure function of its inputs (the random fallback only fires for
/// reports that carry no classification at all).
pub fn calculate_score(
    report: &CleanupReport,
    verified_this_month: u32,
    config: &LeagueConfig,
) -> ScoreBreakdown {
    let volume_score = ((f64::from(report.trash_bags) * 2.0 + report.weight_kg / 5.0).floor()
        as u32)
        .min(config.volume_cap);

    let cleanliness_improvement = match &report.classification {
        Some(c) => {
            let delta = i64::from(c.cleanliness_after) - i64::from(c.cleanliness_before);
            (delta / 2).max(0) as u32
        }
        None => rand::thread_rng().gen_range(10..30),
    };

    let frequency_bonus = (verified_this_month * config.frequency_step).min(config.frequency_cap);

    let waste_type_impact = report
        .waste_tags
        .iter()
        .map(|tag| config.waste_impact_for(*tag))
        .sum::<u32>()
        .min(config.waste_impact_cap);

    let total = volume_score + cleanliness_improvement + frequency_bonus + waste_type_impact;

    ScoreBreakdown {
        volume_score,
        cleanliness_improvement,
        frequency_bonus,
        waste_type_impact,
        total,
    }
}

/// Applies a component-wise admin override. The total is recomputed from the
/// final components; it is never taken from the override.
pub fn apply_override(base: ScoreBreakdown, over: &ScoreOverride) -> ScoreBreakdown {
    let volume_score = over.volume_score.unwrap_or(base.volume_score);
    let cleanliness_improvement = over
        .cleanliness_improvement
        .unwrap_or(base.cleanliness_improvement);
    let frequency_bonus = over.frequency_bonus.unwrap_or(base.frequency_bonus);
    let waste_type_impact = over.waste_type_impact.unwrap_or(base.waste_type_impact);

    ScoreBreakdown {
        volume_score,
        cleanliness_improvement,
        frequency_bonus,
        waste_type_impact,
        total: volume_score + cleanliness_improvement + frequency_bonus + waste_type_impact,
    }
}
