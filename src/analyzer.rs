use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::classifier;
use crate::models::{
    AnalysisResult, CycleRegularity, CycleSnapshot, ExerciseCapacity, JournalEntry,
    MentalHealthStatus, MoodSnapshot, StressLevel, Symptom, UserProfile,
};
use crate::sentiment::{self, Sentiment};

/// Trailing window for mood and journal signals.
pub const SIGNAL_WINDOW_DAYS: i64 = 14;

/// Population variance of cycle gaps above which cycles count as irregular
/// (a standard deviation of more than a week).
pub const CYCLE_VARIANCE_THRESHOLD: f64 = 49.0;

/// Gap range accepted as regular when only one gap is known.
pub const REGULAR_CYCLE_DAYS: std::ops::RangeInclusive<i64> = 21..=35;

const HIGH_STRESS_RATIO: f64 = 0.5;
const LOW_STRESS_RATIO: f64 = 0.2;
const HIGH_STRESS_MIN_ENTRIES: usize = 2;

const FATIGUE_SYMPTOMS: [Symptom; 3] = [Symptom::Fatigue, Symptom::SleepIssues, Symptom::BrainFog];

pub fn window_start(as_of: NaiveDate) -> NaiveDate {
    as_of - Duration::days(SIGNAL_WINDOW_DAYS)
}

pub fn analyze<S: AsRef<str>>(
    profile: &UserProfile,
    symptoms: &[S],
    cycle: &CycleSnapshot,
    mood: &MoodSnapshot,
    journal: &[JournalEntry],
    as_of: NaiveDate,
) -> AnalysisResult {
    AnalysisResult {
        pcos_type: classifier::classify(symptoms),
        stress_level: stress_level(mood, as_of),
        cycle_regularity: cycle_regularity(cycle),
        exercise_capacity: exercise_capacity(profile, symptoms),
        mental_health_status: mental_health_status(journal, as_of),
    }
}

pub fn stress_level(mood: &MoodSnapshot, as_of: NaiveDate) -> StressLevel {
    let start = window_start(as_of);
    let recent: Vec<_> = mood
        .entries
        .iter()
        .filter(|entry| entry.date >= start && entry.date <= as_of)
        .collect();

    if recent.is_empty() {
        return reported_stress(mood);
    }

    let stressed = recent
        .iter()
        .filter(|entry| sentiment::is_stress_mood(&entry.mood))
        .count();
    let ratio = stressed as f64 / recent.len() as f64;

    if stressed >= HIGH_STRESS_MIN_ENTRIES && ratio >= HIGH_STRESS_RATIO {
        StressLevel::High
    } else if ratio < LOW_STRESS_RATIO {
        StressLevel::Low
    } else {
        StressLevel::Medium
    }
}

/// Self-reported stress first, then the average mood, then the default.
fn reported_stress(mood: &MoodSnapshot) -> StressLevel {
    if let Some(level) = mood.stress_level.as_deref() {
        return match level.trim().to_lowercase().as_str() {
            "low" => StressLevel::Low,
            "high" | "very-high" => StressLevel::High,
            _ => StressLevel::Medium,
        };
    }

    match mood.average_mood.as_deref() {
        Some(average) if sentiment::is_stress_mood(average) => StressLevel::High,
        Some(average) if sentiment::from_mood(average) == Some(Sentiment::Positive) => {
            StressLevel::Low
        }
        _ => StressLevel::default(),
    }
}

/// Day gaps between consecutive distinct cycle starts.
pub fn cycle_gaps(cycle: &CycleSnapshot) -> Vec<i64> {
    let starts: BTreeSet<NaiveDate> = cycle.cycles.iter().map(|c| c.start_date).collect();
    let starts: Vec<NaiveDate> = starts.into_iter().collect();

    starts
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .collect()
}

pub fn cycle_regularity(cycle: &CycleSnapshot) -> CycleRegularity {
    let gaps = cycle_gaps(cycle);

    let irregular = match gaps.as_slice() {
        [] => cycle.irregular.unwrap_or(false),
        [gap] => !REGULAR_CYCLE_DAYS.contains(gap),
        _ => variance(&gaps) > CYCLE_VARIANCE_THRESHOLD,
    };

    if irregular {
        CycleRegularity::Irregular
    } else {
        CycleRegularity::Regular
    }
}

fn variance(values: &[i64]) -> f64 {
    let count = values.len() as f64;
    let mean = values.iter().sum::<i64>() as f64 / count;
    values
        .iter()
        .map(|value| {
            let delta = *value as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / count
}

pub fn exercise_capacity<S: AsRef<str>>(profile: &UserProfile, symptoms: &[S]) -> ExerciseCapacity {
    let recognized = classifier::recognized_symptoms(symptoms);
    let energy = profile
        .energy_level
        .as_deref()
        .map(|level| level.trim().to_lowercase());

    let mut indicators = FATIGUE_SYMPTOMS
        .iter()
        .filter(|symptom| recognized.contains(*symptom))
        .count();
    if matches!(energy.as_deref(), Some("low" | "very-low")) {
        indicators += 1;
    }

    match (indicators, energy.as_deref()) {
        (n, _) if n >= 2 => ExerciseCapacity::Low,
        (0, Some("high")) => ExerciseCapacity::High,
        _ => ExerciseCapacity::Medium,
    }
}

pub fn mental_health_status(journal: &[JournalEntry], as_of: NaiveDate) -> MentalHealthStatus {
    let start = window_start(as_of);
    let recent: Vec<Sentiment> = journal
        .iter()
        .filter(|entry| match entry.created_at {
            Some(created_at) => {
                let day = created_at.date_naive();
                day >= start && day <= as_of
            }
            None => true,
        })
        .map(sentiment::of_entry)
        .collect();

    let negative = recent
        .iter()
        .filter(|sentiment| **sentiment == Sentiment::Negative)
        .count();

    if !recent.is_empty() && negative * 2 > recent.len() {
        MentalHealthStatus::Concerning
    } else {
        MentalHealthStatus::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CycleRecord, MoodEntry, PcosCategory};
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn as_of() -> NaiveDate {
        day(2026, 3, 1)
    }

    fn moods(entries: &[(&str, i64)]) -> MoodSnapshot {
        MoodSnapshot {
            entries: entries
                .iter()
                .map(|(mood, days_ago)| MoodEntry {
                    mood: mood.to_string(),
                    date: as_of() - Duration::days(*days_ago),
                })
                .collect(),
            ..MoodSnapshot::default()
        }
    }

    fn cycles(starts: &[NaiveDate]) -> CycleSnapshot {
        CycleSnapshot {
            cycles: starts
                .iter()
                .map(|start| CycleRecord { start_date: *start })
                .collect(),
            irregular: None,
        }
    }

    fn journal(content: &str, mood: Option<&str>) -> JournalEntry {
        JournalEntry {
            content: content.to_string(),
            mood: mood.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn empty_inputs_degrade_to_defaults() {
        let none: [&str; 0] = [];
        let result = analyze(
            &UserProfile::default(),
            &none,
            &CycleSnapshot::default(),
            &MoodSnapshot::default(),
            &[],
            as_of(),
        );
        assert_eq!(result, AnalysisResult::baseline(PcosCategory::InsulinResistant));
    }

    #[test]
    fn stress_tiers_follow_ratio() {
        let high = moods(&[("anxious", 1), ("frustrated", 3), ("calm", 5)]);
        assert_eq!(stress_level(&high, as_of()), StressLevel::High);

        let medium = moods(&[("anxious", 1), ("calm", 2), ("happy", 3)]);
        assert_eq!(stress_level(&medium, as_of()), StressLevel::Medium);

        let low = moods(&[("calm", 1), ("happy", 2), ("hopeful", 3)]);
        assert_eq!(stress_level(&low, as_of()), StressLevel::Low);
    }

    #[test]
    fn single_stressed_entry_is_not_high() {
        let snapshot = moods(&[("anxious", 0)]);
        assert_eq!(stress_level(&snapshot, as_of()), StressLevel::Medium);
    }

    #[test]
    fn stress_ignores_entries_outside_window() {
        let snapshot = moods(&[("anxious", 20), ("frustrated", 30), ("calm", 2)]);
        assert_eq!(stress_level(&snapshot, as_of()), StressLevel::Low);
    }

    #[test]
    fn stress_window_keeps_oldest_day_and_drops_future() {
        let edge = moods(&[("anxious", SIGNAL_WINDOW_DAYS), ("frustrated", SIGNAL_WINDOW_DAYS)]);
        assert_eq!(stress_level(&edge, as_of()), StressLevel::High);

        let stale = moods(&[("anxious", 15), ("frustrated", 15), ("calm", 1)]);
        assert_eq!(stress_level(&stale, as_of()), StressLevel::Low);

        let future = moods(&[("anxious", -1), ("frustrated", -1), ("calm", 1)]);
        assert_eq!(stress_level(&future, as_of()), StressLevel::Low);
    }

    #[test]
    fn stress_falls_back_to_self_report() {
        let snapshot = MoodSnapshot {
            stress_level: Some("very-high".to_string()),
            ..MoodSnapshot::default()
        };
        assert_eq!(stress_level(&snapshot, as_of()), StressLevel::High);

        let calm = MoodSnapshot {
            average_mood: Some("calm".to_string()),
            ..MoodSnapshot::default()
        };
        assert_eq!(stress_level(&calm, as_of()), StressLevel::Low);

        let reported_wins = MoodSnapshot {
            stress_level: Some("moderate".to_string()),
            average_mood: Some("anxious".to_string()),
            ..MoodSnapshot::default()
        };
        assert_eq!(stress_level(&reported_wins, as_of()), StressLevel::Medium);
    }

    #[test]
    fn steady_cycles_are_regular() {
        let snapshot = cycles(&[day(2026, 1, 1), day(2026, 1, 29), day(2026, 2, 27)]);
        assert_eq!(cycle_gaps(&snapshot), vec![28, 29]);
        assert_eq!(cycle_regularity(&snapshot), CycleRegularity::Regular);
    }

    #[test]
    fn swinging_cycles_are_irregular() {
        let snapshot = cycles(&[day(2025, 10, 1), day(2025, 10, 25), day(2025, 12, 20)]);
        assert_eq!(cycle_regularity(&snapshot), CycleRegularity::Irregular);
    }

    #[test]
    fn single_gap_uses_regular_range() {
        let long = cycles(&[day(2026, 1, 1), day(2026, 2, 20)]);
        assert_eq!(cycle_regularity(&long), CycleRegularity::Irregular);

        let normal = cycles(&[day(2026, 1, 1), day(2026, 1, 30)]);
        assert_eq!(cycle_regularity(&normal), CycleRegularity::Regular);
    }

    #[test]
    fn no_gaps_use_reported_flag() {
        let mut snapshot = cycles(&[day(2026, 1, 15)]);
        assert_eq!(cycle_regularity(&snapshot), CycleRegularity::Regular);
        snapshot.irregular = Some(true);
        assert_eq!(cycle_regularity(&snapshot), CycleRegularity::Irregular);
    }

    #[test]
    fn fatigue_indicators_lower_capacity() {
        let profile = UserProfile::default();
        assert_eq!(
            exercise_capacity(&profile, &["fatigue", "brain-fog"]),
            ExerciseCapacity::Low
        );
        assert_eq!(exercise_capacity(&profile, &["fatigue", "fatigue"]), ExerciseCapacity::Medium);

        let tired = UserProfile {
            energy_level: Some("very-low".to_string()),
            ..UserProfile::default()
        };
        assert_eq!(exercise_capacity(&tired, &["sleep-issues"]), ExerciseCapacity::Low);

        let energetic = UserProfile {
            energy_level: Some("High".to_string()),
            ..UserProfile::default()
        };
        assert_eq!(exercise_capacity(&energetic, &["acne"]), ExerciseCapacity::High);
        assert_eq!(exercise_capacity(&energetic, &["fatigue"]), ExerciseCapacity::Medium);
    }

    #[test]
    fn negative_majority_is_concerning() {
        let entries = vec![
            journal("Feeling overwhelmed today...", Some("sad")),
            journal("Everything is stress", None),
            journal("Had a good day with friends", Some("happy")),
        ];
        assert_eq!(mental_health_status(&entries, as_of()), MentalHealthStatus::Concerning);
    }

    #[test]
    fn even_split_is_stable() {
        let entries = vec![
            journal("Feeling overwhelmed today...", Some("sad")),
            journal("Had a good day with friends", Some("happy")),
        ];
        assert_eq!(mental_health_status(&entries, as_of()), MentalHealthStatus::Stable);
        assert_eq!(mental_health_status(&[], as_of()), MentalHealthStatus::Stable);
    }

    fn dated_journal(content: &str, mood: &str, days_ago: i64) -> JournalEntry {
        let day = as_of() - Duration::days(days_ago);
        JournalEntry {
            created_at: Some(Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).expect("valid time"))),
            ..journal(content, Some(mood))
        }
    }

    #[test]
    fn journal_window_keeps_oldest_day_and_drops_future() {
        let edge = vec![dated_journal("so sad", "sad", SIGNAL_WINDOW_DAYS)];
        assert_eq!(mental_health_status(&edge, as_of()), MentalHealthStatus::Concerning);

        let stale = vec![dated_journal("so sad", "sad", 15)];
        assert_eq!(mental_health_status(&stale, as_of()), MentalHealthStatus::Stable);

        let future = vec![
            dated_journal("so sad", "sad", -1),
            journal("calm evening", Some("calm")),
        ];
        assert_eq!(mental_health_status(&future, as_of()), MentalHealthStatus::Stable);
    }

    #[test]
    fn old_journal_entries_are_ignored() {
        let mut old = journal("so sad", Some("sad"));
        old.created_at = Some(Utc.with_ymd_and_hms(2025, 12, 1, 9, 0, 0).unwrap());
        let entries = vec![old, journal("calm evening", Some("calm"))];
        assert_eq!(mental_health_status(&entries, as_of()), MentalHealthStatus::Stable);
    }
}
