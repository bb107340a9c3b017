use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Calendar day from either `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn calendar_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
        .map_err(|err| serde::de::Error::custom(format!("invalid date `{raw}`: {err}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symptom {
    IrregularPeriods,
    Acne,
    HairGrowth,
    HairLoss,
    WeightGain,
    Fatigue,
    MoodChanges,
    SleepIssues,
    SugarCravings,
    BrainFog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymptomGroup {
    Physical,
    Mental,
    Cycle,
}

impl Symptom {
    pub const ALL: [Symptom; 10] = [
        Symptom::IrregularPeriods,
        Symptom::Acne,
        Symptom::HairGrowth,
        Symptom::HairLoss,
        Symptom::WeightGain,
        Symptom::Fatigue,
        Symptom::MoodChanges,
        Symptom::SleepIssues,
        Symptom::SugarCravings,
        Symptom::BrainFog,
    ];

    /// Resolves a caller-supplied tag. Unknown tags are not an error, they
    /// simply carry no evidence.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|symptom| symptom.as_str() == tag.trim())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symptom::IrregularPeriods => "irregular-periods",
            Symptom::Acne => "acne",
            Symptom::HairGrowth => "hair-growth",
            Symptom::HairLoss => "hair-loss",
            Symptom::WeightGain => "weight-gain",
            Symptom::Fatigue => "fatigue",
            Symptom::MoodChanges => "mood-changes",
            Symptom::SleepIssues => "sleep-issues",
            Symptom::SugarCravings => "sugar-cravings",
            Symptom::BrainFog => "brain-fog",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Symptom::IrregularPeriods => "Irregular Periods",
            Symptom::Acne => "Acne",
            Symptom::HairGrowth => "Excess Hair Growth",
            Symptom::HairLoss => "Hair Thinning/Loss",
            Symptom::WeightGain => "Weight Gain",
            Symptom::Fatigue => "Fatigue",
            Symptom::MoodChanges => "Mood Changes",
            Symptom::SleepIssues => "Sleep Issues",
            Symptom::SugarCravings => "Sugar Cravings",
            Symptom::BrainFog => "Brain Fog",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Symptom::IrregularPeriods => {
                "Cycles longer than 35 days or fewer than 8 cycles per year"
            }
            Symptom::Acne => "Persistent acne, especially on the jawline, chin, or upper neck",
            Symptom::HairGrowth => "Unwanted hair growth on face, chest, back, or other areas",
            Symptom::HairLoss => "Hair thinning or loss, particularly on the scalp",
            Symptom::WeightGain => "Unexplained weight gain or difficulty losing weight",
            Symptom::Fatigue => "Persistent tiredness or lack of energy",
            Symptom::MoodChanges => "Mood swings, anxiety, or depression",
            Symptom::SleepIssues => "Difficulty falling asleep or staying asleep",
            Symptom::SugarCravings => "Strong cravings for sugary foods",
            Symptom::BrainFog => "Difficulty concentrating or remembering things",
        }
    }

    pub fn group(self) -> SymptomGroup {
        match self {
            Symptom::IrregularPeriods => SymptomGroup::Cycle,
            Symptom::MoodChanges | Symptom::SleepIssues | Symptom::BrainFog => {
                SymptomGroup::Mental
            }
            _ => SymptomGroup::Physical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PcosCategory {
    InsulinResistant,
    Inflammatory,
    Adrenal,
    PostPill,
}

/// Static explanation shown alongside a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub common_symptoms: &'static [&'static str],
    pub recommended_actions: &'static [&'static str],
}

impl PcosCategory {
    /// Tie-break order: on equal tallies the earlier category wins.
    pub const PRIORITY: [PcosCategory; 4] = [
        PcosCategory::InsulinResistant,
        PcosCategory::Inflammatory,
        PcosCategory::Adrenal,
        PcosCategory::PostPill,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PcosCategory::InsulinResistant => "insulin-resistant",
            PcosCategory::Inflammatory => "inflammatory",
            PcosCategory::Adrenal => "adrenal",
            PcosCategory::PostPill => "post-pill",
        }
    }

    pub fn profile(self) -> CategoryProfile {
        match self {
            PcosCategory::InsulinResistant => CategoryProfile {
                name: "Insulin Resistant PCOS",
                description: "The most common type, characterized by high insulin levels that lead to increased androgen production.",
                common_symptoms: &["Weight gain", "Sugar cravings", "Fatigue", "Acne", "Irregular periods"],
                recommended_actions: &[
                    "Low-glycemic diet",
                    "Regular exercise",
                    "Intermittent fasting",
                    "Stress management",
                    "Inositol supplements",
                ],
            },
            PcosCategory::Inflammatory => CategoryProfile {
                name: "Inflammatory PCOS",
                description: "Triggered by chronic inflammation in the body that disrupts hormone function.",
                common_symptoms: &["Joint pain", "Skin issues", "Digestive problems", "Headaches", "Fatigue"],
                recommended_actions: &[
                    "Anti-inflammatory diet",
                    "Omega-3 supplements",
                    "Turmeric",
                    "Stress reduction",
                    "Adequate sleep",
                ],
            },
            PcosCategory::Adrenal => CategoryProfile {
                name: "Adrenal PCOS",
                description: "Related to stress response and adrenal gland function rather than insulin resistance.",
                common_symptoms: &["Stress sensitivity", "Fatigue", "Sleep issues", "Anxiety", "Normal insulin levels"],
                recommended_actions: &[
                    "Stress management",
                    "Adaptogenic herbs",
                    "Regular sleep schedule",
                    "Mindfulness",
                    "Vitamin B5",
                ],
            },
            PcosCategory::PostPill => CategoryProfile {
                name: "Post-Pill PCOS",
                description: "Occurs after stopping hormonal birth control, often temporary as hormones readjust.",
                common_symptoms: &[
                    "Recent birth control discontinuation",
                    "Sudden onset of symptoms",
                    "Irregular periods",
                    "Acne",
                    "Hair issues",
                ],
                recommended_actions: &[
                    "Patience",
                    "Liver support",
                    "Zinc",
                    "Vitamin B complex",
                    "Regular cycle tracking",
                ],
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl StressLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            StressLevel::Low => "low",
            StressLevel::Medium => "medium",
            StressLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleRegularity {
    #[default]
    Regular,
    Irregular,
}

impl CycleRegularity {
    pub fn as_str(self) -> &'static str {
        match self {
            CycleRegularity::Regular => "regular",
            CycleRegularity::Irregular => "irregular",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCapacity {
    Low,
    #[default]
    Medium,
    High,
}

impl ExerciseCapacity {
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseCapacity::Low => "low",
            ExerciseCapacity::Medium => "medium",
            ExerciseCapacity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MentalHealthStatus {
    #[default]
    Stable,
    Concerning,
}

impl MentalHealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MentalHealthStatus::Stable => "stable",
            MentalHealthStatus::Concerning => "concerning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub pcos_type: PcosCategory,
    pub stress_level: StressLevel,
    pub cycle_regularity: CycleRegularity,
    pub exercise_capacity: ExerciseCapacity,
    pub mental_health_status: MentalHealthStatus,
}

impl AnalysisResult {
    /// All descriptors at their safe defaults.
    pub fn baseline(pcos_type: PcosCategory) -> Self {
        Self {
            pcos_type,
            stress_level: StressLevel::default(),
            cycle_regularity: CycleRegularity::default(),
            exercise_capacity: ExerciseCapacity::default(),
            mental_health_status: MentalHealthStatus::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationCategory {
    Nutrition,
    Exercise,
    Lifestyle,
    MentalHealth,
}

impl RecommendationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationCategory::Nutrition => "nutrition",
            RecommendationCategory::Exercise => "exercise",
            RecommendationCategory::Lifestyle => "lifestyle",
            RecommendationCategory::MentalHealth => "mental-health",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: RecommendationCategory,
    pub confidence: u8,
    pub priority: Priority,
    pub actionable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Self-reported energy: `high`, `normal`, `low` or `very-low`.
    pub energy_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleRecord {
    #[serde(deserialize_with = "calendar_day")]
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CycleSnapshot {
    pub cycles: Vec<CycleRecord>,
    /// Self-reported flag, used only when there are too few cycle starts.
    pub irregular: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoodEntry {
    pub mood: String,
    #[serde(deserialize_with = "calendar_day")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoodSnapshot {
    pub entries: Vec<MoodEntry>,
    /// Self-reported stress, consulted when no entry falls in the window.
    pub stress_level: Option<String>,
    pub average_mood: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub content: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub user_profile: UserProfile,
    pub recent_symptoms: Vec<String>,
    pub cycle_data: CycleSnapshot,
    pub mood_data: MoodSnapshot,
    pub journal_entries: Vec<JournalEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub generated_at: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    pub pcos_type: PcosCategory,
    pub confidence: f64,
}
