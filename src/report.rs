use std::fmt::Write;

use crate::classifier;
use crate::models::{AnalysisResult, RecommendationResponse, SymptomGroup};

fn group_label(group: SymptomGroup) -> &'static str {
    match group {
        SymptomGroup::Physical => "physical",
        SymptomGroup::Mental => "mental",
        SymptomGroup::Cycle => "cycle",
    }
}

pub fn build_report(
    symptoms: &[String],
    analysis: &AnalysisResult,
    response: &RecommendationResponse,
) -> String {
    let profile = analysis.pcos_type.profile();
    let mut output = String::new();

    let _ = writeln!(output, "# PCOS Insight Report");
    let _ = writeln!(
        output,
        "Generated for {} at {}",
        response.user_id, response.generated_at
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Likely Type: {}", profile.name);
    let _ = writeln!(output, "{}", profile.description);
    let _ = writeln!(output);
    let _ = writeln!(output, "Common symptoms: {}", profile.common_symptoms.join(", "));
    let _ = writeln!(
        output,
        "Helpful approaches: {}",
        profile.recommended_actions.join(", ")
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Reported Symptoms");

    let recognized = classifier::recognized_symptoms(symptoms);
    if recognized.is_empty() {
        let _ = writeln!(output, "No recognized symptoms reported.");
    } else {
        for symptom in recognized {
            let _ = writeln!(
                output,
                "- {} ({}): {}",
                symptom.display_name(),
                group_label(symptom.group()),
                symptom.description()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Current State");
    let _ = writeln!(output, "- Stress level: {}", analysis.stress_level.as_str());
    let _ = writeln!(output, "- Cycle regularity: {}", analysis.cycle_regularity.as_str());
    let _ = writeln!(output, "- Exercise capacity: {}", analysis.exercise_capacity.as_str());
    let _ = writeln!(
        output,
        "- Mental health: {}",
        analysis.mental_health_status.as_str()
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommendations");

    if response.recommendations.is_empty() {
        let _ = writeln!(output, "No recommendations for this snapshot.");
    } else {
        for (index, rec) in response.recommendations.iter().enumerate() {
            let _ = writeln!(
                output,
                "{}. **{}** ({}, {} priority, {}% confidence)",
                index + 1,
                rec.title,
                rec.category.as_str(),
                rec.priority.as_str(),
                rec.confidence
            );
            let _ = writeln!(output, "   {}", rec.description);
            if let Some(resources) = &rec.resources {
                let _ = writeln!(output, "   Resources: {}", resources.join("; "));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExerciseCapacity, PcosCategory};
    use crate::recommend;

    fn symptoms() -> Vec<String> {
        vec!["acne".to_string(), "brain-fog".to_string(), "glitter".to_string()]
    }

    fn sample() -> (AnalysisResult, RecommendationResponse) {
        let analysis = AnalysisResult {
            exercise_capacity: ExerciseCapacity::Low,
            ..AnalysisResult::baseline(PcosCategory::Inflammatory)
        };
        let response = RecommendationResponse {
            recommendations: recommend::generate(&analysis),
            generated_at: "2026-03-01T08:30:00.000Z".to_string(),
            user_id: "user-7".to_string(),
        };
        (analysis, response)
    }

    #[test]
    fn report_names_the_type_and_state() {
        let (analysis, response) = sample();
        let report = build_report(&symptoms(), &analysis, &response);

        assert!(report.starts_with("# PCOS Insight Report\nGenerated for user-7"));
        assert!(report.contains("## Likely Type: Inflammatory PCOS"));
        assert!(report.contains("- Exercise capacity: low"));
        assert!(report.contains("- Mental health: stable"));
        assert!(report.contains("- Acne (physical): Persistent acne"));
        assert!(report.contains("- Brain Fog (mental): "));
        assert!(!report.contains("glitter"));
    }

    #[test]
    fn report_without_symptoms_says_so() {
        let (analysis, response) = sample();
        assert!(build_report(&[], &analysis, &response).contains("No recognized symptoms reported."));
    }

    #[test]
    fn report_lists_ranked_recommendations() {
        let (analysis, response) = sample();
        let report = build_report(&symptoms(), &analysis, &response);

        assert!(report.contains(
            "1. **Start with Gentle Movement** (exercise, high priority, 90% confidence)"
        ));
        assert!(report.contains("2. **Anti-Inflammatory Diet**"));
        assert!(report.contains("Resources: Beginner yoga videos; Walking schedule template"));
    }

    #[test]
    fn empty_recommendations_are_called_out() {
        let (analysis, mut response) = sample();
        response.recommendations.clear();
        assert!(build_report(&symptoms(), &analysis, &response).contains("No recommendations for this snapshot."));
    }
}
