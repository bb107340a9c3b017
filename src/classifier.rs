use std::collections::BTreeSet;

use crate::models::{PcosCategory, Symptom, SymptomAnalysis};

/// Categories each symptom counts as evidence for.
pub fn evidence_for(symptom: Symptom) -> &'static [PcosCategory] {
    use PcosCategory::*;

    match symptom {
        Symptom::WeightGain => &[InsulinResistant],
        Symptom::SugarCravings => &[InsulinResistant],
        Symptom::Fatigue => &[InsulinResistant, Adrenal],
        Symptom::Acne => &[Inflammatory, InsulinResistant],
        Symptom::HairGrowth => &[InsulinResistant],
        Symptom::HairLoss => &[InsulinResistant],
        Symptom::MoodChanges => &[Adrenal, Inflammatory],
        Symptom::SleepIssues => &[Adrenal],
        Symptom::BrainFog => &[InsulinResistant, Inflammatory],
        Symptom::IrregularPeriods => &[InsulinResistant, Adrenal],
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    counts: [u32; 4],
    recognized: u32,
}

impl CategoryTally {
    pub fn get(&self, category: PcosCategory) -> u32 {
        self.counts[slot(category)]
    }

    /// Number of distinct recognized symptoms that went into the tally.
    pub fn recognized(&self) -> u32 {
        self.recognized
    }

    /// Highest tally, earliest category in `PcosCategory::PRIORITY` on ties.
    pub fn leader(&self) -> PcosCategory {
        let mut best = PcosCategory::PRIORITY[0];
        for category in PcosCategory::PRIORITY.into_iter().skip(1) {
            if self.get(category) > self.get(best) {
                best = category;
            }
        }
        best
    }
}

fn slot(category: PcosCategory) -> usize {
    match category {
        PcosCategory::InsulinResistant => 0,
        PcosCategory::Inflammatory => 1,
        PcosCategory::Adrenal => 2,
        PcosCategory::PostPill => 3,
    }
}

pub fn recognized_symptoms<S: AsRef<str>>(symptoms: &[S]) -> BTreeSet<Symptom> {
    symptoms
        .iter()
        .filter_map(|tag| Symptom::from_tag(tag.as_ref()))
        .collect()
}

pub fn tally<S: AsRef<str>>(symptoms: &[S]) -> CategoryTally {
    let mut tally = CategoryTally::default();

    for symptom in recognized_symptoms(symptoms) {
        tally.recognized += 1;
        for category in evidence_for(symptom) {
            tally.counts[slot(*category)] += 1;
        }
    }

    tally
}

pub fn classify<S: AsRef<str>>(symptoms: &[S]) -> PcosCategory {
    tally(symptoms).leader()
}

/// Classification plus the share of recognized symptoms backing the winner.
pub fn analyze_symptoms<S: AsRef<str>>(symptoms: &[S]) -> SymptomAnalysis {
    let tally = tally(symptoms);
    let pcos_type = tally.leader();
    let confidence = if tally.recognized() == 0 {
        0.0
    } else {
        f64::from(tally.get(pcos_type)) / f64::from(tally.recognized())
    };

    SymptomAnalysis {
        pcos_type,
        confidence,
    }
}
