//! Static per-disease metadata attached to predictions.

use crate::{PredictorError, PredictorResult};
use std::collections::BTreeMap;
use symptomatic_types::Severity;

/// Curated description of one disease.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiseaseInfo {
    pub severity: Severity,
    pub description: String,
    pub advice: String,
}

/// Disease name to metadata lookup.
#[derive(Clone, Debug)]
pub struct DiseaseCatalogue {
    entries: BTreeMap<String, DiseaseInfo>,
}

impl DiseaseCatalogue {
    pub fn new(entries: BTreeMap<String, DiseaseInfo>) -> Self {
        Self { entries }
    }

    /// The curated catalogue covering every disease in the bundled dataset.
    pub fn builtin() -> Self {
        let entries = [
            (
                "Common Cold",
                Severity::Low,
                "A viral infection of the upper respiratory tract affecting the nose and throat. Generally mild and resolves within a week.",
                "Rest, stay hydrated, and take over-the-counter medications for symptom relief. See a doctor if symptoms worsen or persist beyond 10 days.",
            ),
            (
                "Influenza",
                Severity::Medium,
                "A contagious respiratory illness caused by influenza viruses. Can cause mild to severe illness and complications in high-risk individuals.",
                "Rest, stay hydrated, and consider antiviral medications if diagnosed early. Consult a doctor if you experience severe symptoms or belong to a high-risk group.",
            ),
            (
                "COVID-19",
                Severity::High,
                "A respiratory illness caused by the SARS-CoV-2 virus. Severity varies widely from asymptomatic to severe respiratory distress.",
                "Isolate immediately and get tested. Contact a healthcare provider if you experience severe symptoms such as difficulty breathing or persistent chest pain.",
            ),
            (
                "Gastroenteritis",
                Severity::Medium,
                "Inflammation of the stomach and intestines, typically resulting from bacterial or viral infections. Usually resolves within a few days.",
                "Stay hydrated and rest. Seek medical attention if symptoms are severe, you can't keep fluids down, or you see blood in your stool.",
            ),
            (
                "Migraine",
                Severity::Medium,
                "A neurological condition characterized by intense, debilitating headaches. Often accompanied by nausea, sensitivity to light, and other symptoms.",
                "Rest in a quiet, dark room and consider over-the-counter pain relievers. Consult a doctor if headaches are severe, frequent, or accompanied by unusual symptoms.",
            ),
        ]
        .into_iter()
        .map(|(name, severity, description, advice)| {
            (
                name.to_string(),
                DiseaseInfo {
                    severity,
                    description: description.to_string(),
                    advice: advice.to_string(),
                },
            )
        })
        .collect();

        Self::new(entries)
    }

    pub fn get(&self, disease: &str) -> PredictorResult<&DiseaseInfo> {
        self.entries
            .get(disease)
            .ok_or_else(|| PredictorError::MissingMetadata(disease.to_string()))
    }

    pub fn contains(&self, disease: &str) -> bool {
        self.entries.contains_key(disease)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DiseaseInfo)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fails on the first class the catalogue cannot describe.
    pub fn ensure_covers<S: AsRef<str>>(&self, classes: &[S]) -> PredictorResult<()> {
        match classes.iter().find(|c| !self.contains(c.as_ref())) {
            Some(missing) => Err(PredictorError::MissingMetadata(missing.as_ref().to_string())),
            None => Ok(()),
        }
    }
}

impl Default for DiseaseCatalogue {
    fn default() -> Self {
        Self::builtin()
    }
}
