use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::analyzer;
use crate::classifier;
use crate::error::EngineError;
use crate::models::{
    AnalysisResult, CycleSnapshot, JournalEntry, MoodSnapshot, PcosCategory,
    RecommendationRequest, RecommendationResponse, SymptomAnalysis, UserProfile,
};
use crate::recommend;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationBody {
    #[serde(default)]
    user_profile: Option<UserProfile>,
    #[serde(default)]
    recent_symptoms: Option<Vec<String>>,
    #[serde(default)]
    cycle_data: Option<CycleSnapshot>,
    #[serde(default)]
    mood_data: Option<MoodSnapshot>,
    #[serde(default)]
    journal_entries: Option<Vec<JournalEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SymptomBody {
    #[serde(default)]
    symptoms: Option<Vec<String>>,
}

fn parse_json<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, EngineError> {
    serde_json::from_str(body)
        .map_err(|err| EngineError::InputValidation(format!("malformed request body: {err}")))
}

/// `recentSymptoms` must be present (an empty list is fine); the other
/// snapshots fall back to empty values.
pub fn parse_recommendation_request(body: &str) -> Result<RecommendationRequest, EngineError> {
    let body: RecommendationBody = parse_json(body)?;
    let recent_symptoms = body
        .recent_symptoms
        .ok_or_else(|| EngineError::InputValidation("recentSymptoms is required".to_string()))?;

    Ok(RecommendationRequest {
        user_profile: body.user_profile.unwrap_or_default(),
        recent_symptoms,
        cycle_data: body.cycle_data.unwrap_or_default(),
        mood_data: body.mood_data.unwrap_or_default(),
        journal_entries: body.journal_entries.unwrap_or_default(),
    })
}

/// Symptom-analyzer body. `userProfile` may be sent but does not affect
/// classification.
pub fn parse_symptom_request(body: &str) -> Result<Vec<String>, EngineError> {
    let body: SymptomBody = parse_json(body)?;
    body.symptoms
        .ok_or_else(|| EngineError::InputValidation("symptoms is required".to_string()))
}

/// Identity is established by the caller; a blank one never reaches the engine.
pub fn require_user_id(user_id: &str) -> Result<&str, EngineError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Authentication(
            "missing caller identity".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Symptom-analyzer entry point; the caller must be identified like any other.
pub fn symptom_analysis<S: AsRef<str>>(
    user_id: &str,
    symptoms: &[S],
) -> Result<SymptomAnalysis, EngineError> {
    require_user_id(user_id)?;
    Ok(classifier::analyze_symptoms(symptoms))
}

pub fn analyze_request(request: &RecommendationRequest, now: DateTime<Utc>) -> AnalysisResult {
    analyzer::analyze(
        &request.user_profile,
        &request.recent_symptoms,
        &request.cycle_data,
        &request.mood_data,
        &request.journal_entries,
        now.date_naive(),
    )
}

pub fn build_response(
    request: &RecommendationRequest,
    user_id: &str,
    now: DateTime<Utc>,
) -> (AnalysisResult, RecommendationResponse) {
    let analysis = analyze_request(request, now);
    let response = RecommendationResponse {
        recommendations: recommend::generate(&analysis),
        generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        user_id: user_id.to_string(),
    };
    (analysis, response)
}

#[derive(Debug, Deserialize)]
struct BatchRow {
    user_id: String,
    symptoms: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchClassification {
    pub user_id: String,
    pub pcos_type: PcosCategory,
    pub confidence: f64,
}

/// Classifies `user_id,symptoms` rows where symptoms are `;`-separated.
pub fn classify_batch<R: std::io::Read>(reader: R) -> anyhow::Result<Vec<BatchClassification>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut results = Vec::new();

    for row in reader.deserialize::<BatchRow>() {
        let row = row?;
        let symptoms: Vec<&str> = row
            .symptoms
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect();
        let analysis = classifier::analyze_symptoms(&symptoms);

        results.push(BatchClassification {
            user_id: row.user_id,
            pcos_type: analysis.pcos_type,
            confidence: analysis.confidence,
        });
    }

    Ok(results)
}
