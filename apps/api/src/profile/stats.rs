//! Profile statistics aggregation. Pure functions over `UserStats`; the
//! store persists the whole updated object afterwards.

use chrono::{DateTime, Datelike, Utc};

use crate::profile::models::{AnalysisRecord, ImprovementTrend, UserStats};

/// History is a bounded FIFO window: the oldest record is evicted past this.
pub const HISTORY_LIMIT: usize = 50;

/// At most this many labels are surfaced from each frequency table.
pub const TOP_LABEL_LIMIT: usize = 10;

/// How many trailing entries the trend classification looks at.
const TREND_WINDOW: usize = 3;

/// Appends a completed analysis and recomputes every derived aggregate.
///
/// The average is recomputed from the live (possibly just-evicted) history
/// window each time; the highest score and the strength/weakness frequency
/// tables are lifetime and survive eviction.
pub fn apply_analysis(stats: &mut UserStats, record: AnalysisRecord, now: DateTime<Utc>) {
    let score = record.score;
    let strengths = record.strengths.clone();
    let weaknesses = record.weaknesses.clone();

    stats.analyses_history.push(record);
    if stats.analyses_history.len() > HISTORY_LIMIT {
        stats.analyses_history.remove(0);
    }

    stats.analyses_this_month = stats
        .analyses_history
        .iter()
        .filter(|a| a.date.month() == now.month() && a.date.year() == now.year())
        .count() as u32;

    let total: u64 = stats.analyses_history.iter().map(|a| a.score as u64).sum();
    let average = total as f64 / stats.analyses_history.len() as f64;
    stats.average_match_score = (average * 10.0).round() / 10.0;

    stats.highest_match_score = stats.highest_match_score.max(score);

    stats.improvement_trend = compute_trend(&stats.analyses_history);

    merge_counts(&mut stats.strength_counts, &strengths);
    stats.top_strengths = top_labels(&stats.strength_counts);
    merge_counts(&mut stats.weakness_counts, &weaknesses);
    stats.common_weaknesses = top_labels(&stats.weakness_counts);

    stats.total_analyses += 1;
    stats.last_active = now;
}

/// Classifies the last 3 history entries: non-decreasing with at least one
/// strict increase is improving, non-increasing with at least one strict
/// decrease is declining, anything else is stable.
fn compute_trend(history: &[AnalysisRecord]) -> ImprovementTrend {
    if history.len() < TREND_WINDOW {
        return ImprovementTrend::NotEnoughData;
    }
    let recent: Vec<u32> = history[history.len() - TREND_WINDOW..]
        .iter()
        .map(|a| a.score)
        .collect();
    let (a, b, c) = (recent[0], recent[1], recent[2]);

    if b >= a && c >= b && c > a {
        ImprovementTrend::Improving
    } else if b <= a && c <= b && c < a {
        ImprovementTrend::Declining
    } else {
        ImprovementTrend::Stable
    }
}

/// Increments lifetime counts in place, appending first-seen labels at the
/// end so the list keeps insertion order.
fn merge_counts(counts: &mut Vec<(String, u32)>, labels: &[String]) {
    for label in labels {
        match counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label.clone(), 1)),
        }
    }
}

/// Top labels by count. The sort is stable, so ties keep insertion order.
fn top_labels(counts: &[(String, u32)]) -> Vec<String> {
    let mut ranked: Vec<&(String, u32)> = counts.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(TOP_LABEL_LIMIT)
        .map(|(label, _)| label.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn record(id: &str, score: u32, date: DateTime<Utc>) -> AnalysisRecord {
        AnalysisRecord {
            id: id.to_string(),
            date,
            job_title: "Engineer".to_string(),
            company_name: "Not specified".to_string(),
            job_category: "Not specified".to_string(),
            score,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
        }
    }

    fn track_scores(scores: &[u32]) -> UserStats {
        let now = Utc::now();
        let mut stats = UserStats::new(now);
        for (i, score) in scores.iter().enumerate() {
            stats_apply(&mut stats, &format!("r{i}"), *score, now);
        }
        stats
    }

    fn stats_apply(stats: &mut UserStats, id: &str, score: u32, now: DateTime<Utc>) {
        apply_analysis(stats, record(id, score, now), now);
    }

    #[test]
    fn test_append_then_trim_after_51_calls() {
        let now = Utc::now();
        let mut stats = UserStats::new(now);
        for i in 0..51 {
            stats_apply(&mut stats, &format!("r{i}"), 50, now);
        }
        assert_eq!(stats.analyses_history.len(), 50);
        // The very first record is gone, the most recent 50 remain in order.
        assert!(!stats.analyses_history.iter().any(|a| a.id == "r0"));
        assert_eq!(stats.analyses_history[0].id, "r1");
        assert_eq!(stats.analyses_history[49].id, "r50");
        assert_eq!(stats.total_analyses, 51);
    }

    #[test]
    fn test_highest_score_survives_eviction() {
        let now = Utc::now();
        let mut stats = UserStats::new(now);
        stats_apply(&mut stats, "peak", 97, now);
        for i in 0..60 {
            stats_apply(&mut stats, &format!("r{i}"), 40, now);
        }
        assert!(!stats.analyses_history.iter().any(|a| a.id == "peak"));
        assert_eq!(stats.highest_match_score, 97);
    }

    #[test]
    fn test_highest_score_non_decreasing() {
        let now = Utc::now();
        let mut stats = UserStats::new(now);
        let mut previous = 0;
        for score in [10, 80, 30, 80, 5] {
            stats_apply(&mut stats, "r", score, now);
            assert!(stats.highest_match_score >= previous);
            previous = stats.highest_match_score;
        }
        assert_eq!(stats.highest_match_score, 80);
    }

    #[test]
    fn test_average_is_windowed_not_lifetime() {
        let now = Utc::now();
        let mut stats = UserStats::new(now);
        stats_apply(&mut stats, "old", 100, now);
        for i in 0..50 {
            stats_apply(&mut stats, &format!("r{i}"), 50, now);
        }
        // The 100 was evicted, so the trailing-window average is exactly 50.
        assert_eq!(stats.average_match_score, 50.0);
    }

    #[test]
    fn test_average_rounded_to_one_decimal() {
        let stats = track_scores(&[50, 51, 51]);
        // 152 / 3 = 50.666..., rounds to 50.7
        assert_eq!(stats.average_match_score, 50.7);
    }

    #[test]
    fn test_trend_improving() {
        assert_eq!(
            track_scores(&[50, 60, 70]).improvement_trend,
            ImprovementTrend::Improving
        );
    }

    #[test]
    fn test_trend_improving_with_plateau() {
        // Non-decreasing with one strict increase still counts as improving.
        assert_eq!(
            track_scores(&[50, 60, 60]).improvement_trend,
            ImprovementTrend::Improving
        );
    }

    #[test]
    fn test_trend_declining() {
        assert_eq!(
            track_scores(&[70, 60, 50]).improvement_trend,
            ImprovementTrend::Declining
        );
    }

    #[test]
    fn test_trend_stable() {
        assert_eq!(
            track_scores(&[60, 60, 60]).improvement_trend,
            ImprovementTrend::Stable
        );
        assert_eq!(
            track_scores(&[60, 40, 55]).improvement_trend,
            ImprovementTrend::Stable
        );
    }

    #[test]
    fn test_trend_not_enough_data() {
        assert_eq!(
            track_scores(&[60, 70]).improvement_trend,
            ImprovementTrend::NotEnoughData
        );
    }

    #[test]
    fn test_trend_uses_last_three_only() {
        assert_eq!(
            track_scores(&[90, 10, 50, 60, 70]).improvement_trend,
            ImprovementTrend::Improving
        );
    }

    #[test]
    fn test_month_count_filters_by_calendar_month() {
        let now = Utc.with_ymd_and_hms(2026, 8, 15, 12, 0, 0).unwrap();
        let last_month = now - Duration::days(45);
        let mut stats = UserStats::new(now);
        apply_analysis(&mut stats, record("old", 50, last_month), now);
        apply_analysis(&mut stats, record("new", 50, now), now);
        assert_eq!(stats.analyses_this_month, 1);
    }

    #[test]
    fn test_frequency_tables_are_lifetime_and_ranked() {
        let now = Utc::now();
        let mut stats = UserStats::new(now);
        let mut rec = record("a", 70, now);
        rec.strengths = vec!["Clear writing".to_string(), "Strong API design".to_string()];
        apply_analysis(&mut stats, rec, now);

        let mut rec = record("b", 70, now);
        rec.strengths = vec!["Strong API design".to_string()];
        apply_analysis(&mut stats, rec, now);

        assert_eq!(
            stats.top_strengths,
            vec!["Strong API design", "Clear writing"]
        );
    }

    #[test]
    fn test_frequency_ties_break_by_insertion_order() {
        let now = Utc::now();
        let mut stats = UserStats::new(now);
        let mut rec = record("a", 70, now);
        rec.weaknesses = vec!["First seen".to_string(), "Second seen".to_string()];
        apply_analysis(&mut stats, rec, now);

        assert_eq!(stats.common_weaknesses, vec!["First seen", "Second seen"]);
    }

    #[test]
    fn test_top_labels_capped_at_10() {
        let now = Utc::now();
        let mut stats = UserStats::new(now);
        let mut rec = record("a", 70, now);
        rec.strengths = (0..15).map(|i| format!("s{i}")).collect();
        apply_analysis(&mut stats, rec, now);

        assert_eq!(stats.top_strengths.len(), 10);
        // The full table still remembers everything.
        assert_eq!(stats.strength_counts.len(), 15);
    }

    #[test]
    fn test_counts_survive_history_eviction() {
        let now = Utc::now();
        let mut stats = UserStats::new(now);
        let mut rec = record("first", 70, now);
        rec.strengths = vec!["Evicted but remembered".to_string()];
        apply_analysis(&mut stats, rec, now);
        for i in 0..55 {
            stats_apply(&mut stats, &format!("r{i}"), 50, now);
        }
        assert!(stats
            .top_strengths
            .contains(&"Evicted but remembered".to_string()));
    }
}
