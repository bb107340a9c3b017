use std::cmp::Reverse;

use crate::models::{
    AnalysisResult, CycleRegularity, ExerciseCapacity, MentalHealthStatus, PcosCategory, Priority,
    Recommendation, RecommendationCategory, StressLevel,
};

pub const MAX_RECOMMENDATIONS: usize = 8;

/// A fixed recommendation emitted whenever its rule fires. Confidence is a
/// per-rule constant, not derived from signal strength.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: RecommendationCategory,
    pub confidence: u8,
    pub priority: Priority,
    pub resources: &'static [&'static str],
}

impl Template {
    pub fn emit(&self) -> Recommendation {
        Recommendation {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            category: self.category,
            confidence: self.confidence,
            priority: self.priority,
            actionable: true,
            resources: if self.resources.is_empty() {
                None
            } else {
                Some(self.resources.iter().map(|r| r.to_string()).collect())
            },
        }
    }
}

pub const LOW_GI_FOODS: Template = Template {
    id: "nutrition-low-gi",
    title: "Focus on Low Glycemic Index Foods",
    description: "Choose foods that help stabilize blood sugar levels, such as quinoa, sweet potatoes, and leafy greens.",
    category: RecommendationCategory::Nutrition,
    confidence: 85,
    priority: Priority::High,
    resources: &["Low GI food list", "Meal planning guide", "Blood sugar tracking tips"],
};

pub const OMEGA_3: Template = Template {
    id: "nutrition-omega3",
    title: "Increase Omega-3 Fatty Acids",
    description: "Add fatty fish, walnuts, and flax seeds to help reduce inflammation and improve insulin sensitivity.",
    category: RecommendationCategory::Nutrition,
    confidence: 78,
    priority: Priority::Medium,
    resources: &[],
};

pub const ANTI_INFLAMMATORY_DIET: Template = Template {
    id: "nutrition-anti-inflammatory",
    title: "Anti-Inflammatory Diet",
    description: "Focus on foods rich in antioxidants like berries, turmeric, and green tea to reduce inflammation.",
    category: RecommendationCategory::Nutrition,
    confidence: 82,
    priority: Priority::High,
    resources: &[],
};

pub const GENTLE_MOVEMENT: Template = Template {
    id: "exercise-gentle-start",
    title: "Start with Gentle Movement",
    description: "Begin with 10-15 minutes of walking or gentle yoga to build your fitness foundation.",
    category: RecommendationCategory::Exercise,
    confidence: 90,
    priority: Priority::High,
    resources: &["Beginner yoga videos", "Walking schedule template", "Low-impact exercise guide"],
};

pub const STRENGTH_TRAINING: Template = Template {
    id: "exercise-strength-training",
    title: "Add Strength Training",
    description: "Include 2-3 strength training sessions per week to improve insulin sensitivity and metabolism.",
    category: RecommendationCategory::Exercise,
    confidence: 85,
    priority: Priority::Medium,
    resources: &[],
};

pub const STRESS_MANAGEMENT: Template = Template {
    id: "lifestyle-stress-management",
    title: "Implement Stress Management Techniques",
    description: "Try meditation, deep breathing, or progressive muscle relaxation for 10 minutes daily.",
    category: RecommendationCategory::Lifestyle,
    confidence: 88,
    priority: Priority::High,
    resources: &["Guided meditation apps", "Breathing exercise videos", "Stress management workbook"],
};

pub const SLEEP_HYGIENE: Template = Template {
    id: "lifestyle-sleep-hygiene",
    title: "Improve Sleep Hygiene",
    description: "Maintain a consistent sleep schedule and create a relaxing bedtime routine to support hormone balance.",
    category: RecommendationCategory::Lifestyle,
    confidence: 80,
    priority: Priority::Medium,
    resources: &[],
};

pub const JOURNALING: Template = Template {
    id: "mental-health-journaling",
    title: "Continue Regular Journaling",
    description: "Keep expressing your thoughts and feelings through journaling to process emotions and track patterns.",
    category: RecommendationCategory::MentalHealth,
    confidence: 75,
    priority: Priority::Medium,
    resources: &["Journaling prompts", "Mood tracking templates", "Self-reflection exercises"],
};

pub const PROFESSIONAL_SUPPORT: Template = Template {
    id: "mental-health-support",
    title: "Consider Professional Support",
    description: "Connect with a therapist who specializes in chronic health conditions for additional support.",
    category: RecommendationCategory::MentalHealth,
    confidence: 70,
    priority: Priority::High,
    resources: &[],
};

/// May be empty: adrenal and post-pill types have no nutrition rule.
pub fn nutrition_rules(analysis: &AnalysisResult) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if analysis.pcos_type == PcosCategory::InsulinResistant {
        recommendations.push(LOW_GI_FOODS.emit());
        recommendations.push(OMEGA_3.emit());
    }

    if analysis.pcos_type == PcosCategory::Inflammatory {
        recommendations.push(ANTI_INFLAMMATORY_DIET.emit());
    }

    recommendations
}

/// Always exactly one recommendation.
pub fn exercise_rules(analysis: &AnalysisResult) -> Vec<Recommendation> {
    if analysis.exercise_capacity == ExerciseCapacity::Low {
        vec![GENTLE_MOVEMENT.emit()]
    } else {
        vec![STRENGTH_TRAINING.emit()]
    }
}

pub fn lifestyle_rules(analysis: &AnalysisResult) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if analysis.stress_level == StressLevel::High {
        recommendations.push(STRESS_MANAGEMENT.emit());
    }

    if analysis.cycle_regularity == CycleRegularity::Irregular {
        recommendations.push(SLEEP_HYGIENE.emit());
    }

    recommendations
}

pub fn mental_health_rules(analysis: &AnalysisResult) -> Vec<Recommendation> {
    if analysis.mental_health_status == MentalHealthStatus::Concerning {
        vec![JOURNALING.emit(), PROFESSIONAL_SUPPORT.emit()]
    } else {
        Vec::new()
    }
}

/// Stable sort by priority weight then confidence, both descending, then
/// truncate. Equal keys keep emission order.
pub fn rank(mut recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    recommendations.sort_by_key(|rec| (Reverse(rec.priority.weight()), Reverse(rec.confidence)));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

pub fn generate(analysis: &AnalysisResult) -> Vec<Recommendation> {
    let mut recommendations = nutrition_rules(analysis);
    recommendations.extend(exercise_rules(analysis));
    recommendations.extend(lifestyle_rules(analysis));
    recommendations.extend(mental_health_rules(analysis));
    rank(recommendations)
}
