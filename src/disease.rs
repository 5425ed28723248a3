use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five supported prediction targets.
///
/// The string `key` is stable: it routes requests, names model artifacts
/// on disk, and is what gets written into history rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Diabetes,
    HeartDisease,
    Parkinsons,
    LungCancer,
    HypoThyroid,
}

/// All diseases, in sidebar order.
pub const ALL_DISEASES: [Disease; 5] = [
    Disease::Diabetes,
    Disease::HeartDisease,
    Disease::Parkinsons,
    Disease::LungCancer,
    Disease::HypoThyroid,
];

impl Disease {
    /// Stable routing/storage key.
    pub fn key(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::HeartDisease => "heart_disease",
            Disease::Parkinsons => "parkinsons",
            Disease::LungCancer => "lung_cancer",
            Disease::HypoThyroid => "thyroid",
        }
    }

    /// Human-facing form title.
    pub fn title(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes Prediction",
            Disease::HeartDisease => "Heart Disease Prediction",
            Disease::Parkinsons => "Parkinsons Prediction",
            Disease::LungCancer => "Lung Cancer Prediction",
            Disease::HypoThyroid => "Hypo-Thyroid Prediction",
        }
    }

    /// Number of features the trained model expects, in schema order.
    pub fn feature_len(&self) -> usize {
        match self {
            Disease::Diabetes => 8,
            Disease::HeartDisease => 13,
            Disease::Parkinsons => 22,
            Disease::LungCancer => 15,
            Disease::HypoThyroid => 7,
        }
    }

    /// Diagnosis message for a binary model class.
    pub fn diagnosis_message(&self, class: u8) -> &'static str {
        match (self, class) {
            (Disease::Diabetes, 1) => "The person is diabetic",
            (Disease::Diabetes, _) => "The person is not diabetic",
            (Disease::HeartDisease, 1) => "The person has heart disease",
            (Disease::HeartDisease, _) => "The person does not have heart disease",
            (Disease::Parkinsons, 1) => "The person has Parkinson's disease",
            (Disease::Parkinsons, _) => "The person does not have Parkinson's disease",
            (Disease::LungCancer, 1) => "The person has lung cancer disease",
            (Disease::LungCancer, _) => "The person does not have lung cancer disease",
            (Disease::HypoThyroid, 1) => "The person has Hypo-Thyroid disease",
            (Disease::HypoThyroid, _) => "The person does not have Hypo-Thyroid disease",
        }
    }
}

impl FromStr for Disease {
    type Err = ();

    fn from_str(input: &str) -> Result<Disease, Self::Err> {
        match input.to_lowercase().as_str() {
            "diabetes" => Ok(Disease::Diabetes),
            "heart_disease" => Ok(Disease::HeartDisease),
            "parkinsons" => Ok(Disease::Parkinsons),
            "lung_cancer" => Ok(Disease::LungCancer),
            "thyroid" | "hypo_thyroid" => Ok(Disease::HypoThyroid),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips_through_from_str() {
        for disease in ALL_DISEASES {
            assert_eq!(Disease::from_str(disease.key()), Ok(disease));
        }
        assert!(Disease::from_str("common_cold").is_err());
    }

    #[test]
    fn diagnosis_messages_match_class() {
        assert_eq!(
            Disease::Diabetes.diagnosis_message(1),
            "The person is diabetic"
        );
        assert_eq!(
            Disease::HypoThyroid.diagnosis_message(0),
            "The person does not have Hypo-Thyroid disease"
        );
    }
}
