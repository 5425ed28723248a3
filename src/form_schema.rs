//! Form descriptors for the five disease input forms.
//!
//! Each disease gets one [`FormSchema`]: an ordered list of named fields.
//! Field order is load-bearing. It must match the order the corresponding
//! model artifact was trained on, so reordering entries here silently
//! breaks predictions.

use crate::disease::Disease;
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

/// Input widget class for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-form numeric text
    Text,
    /// Number with optional inclusive bounds
    Number { min: Option<f64>, max: Option<f64> },
}

/// One named input field.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    /// Stable submission key
    pub name: &'static str,
    /// Display label
    pub label: &'static str,
    /// Tooltip text
    pub help: &'static str,
    pub kind: FieldKind,
}

/// Ordered field list for one disease form.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormSchema {
    pub disease: Disease,
    pub fields: &'static [FieldSpec],
}

const fn number() -> FieldKind {
    FieldKind::Number {
        min: None,
        max: None,
    }
}

const fn coded(min: f64, max: f64) -> FieldKind {
    FieldKind::Number {
        min: Some(min),
        max: Some(max),
    }
}

const fn field(name: &'static str, label: &'static str, help: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        help,
        kind: number(),
    }
}

const fn coded_field(
    name: &'static str,
    label: &'static str,
    help: &'static str,
    min: f64,
    max: f64,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        help,
        kind: coded(min, max),
    }
}

static DIABETES_FIELDS: [FieldSpec; 8] = [
    field("Pregnancies", "Number of Pregnancies", "Enter number of times pregnant"),
    field("Glucose", "Glucose Level", "Enter glucose level"),
    field("BloodPressure", "Blood Pressure value", "Enter blood pressure value"),
    field("SkinThickness", "Skin Thickness value", "Enter skin thickness value"),
    field("Insulin", "Insulin Level", "Enter insulin level"),
    field("BMI", "BMI value", "Enter Body Mass Index value"),
    field(
        "DiabetesPedigreeFunction",
        "Diabetes Pedigree Function value",
        "Enter diabetes pedigree function value",
    ),
    field("Age", "Age of the Person", "Enter age of the person"),
];

static HEART_FIELDS: [FieldSpec; 13] = [
    field("age", "Age", "Enter age of the person"),
    coded_field("sex", "Sex (1 = male; 0 = female)", "Enter sex of the person", 0.0, 1.0),
    coded_field(
        "cp",
        "Chest Pain types (0 = Typical Angina, 1 = Atypical Angina, 2 = Non-anginal Pain, 3 = Asymptomatic)",
        "Enter chest pain type",
        0.0,
        3.0,
    ),
    field("trestbps", "Resting Blood Pressure", "Enter resting blood pressure"),
    field("chol", "Serum Cholesterol in mg/dl", "Enter serum cholesterol"),
    coded_field(
        "fbs",
        "Fasting Blood Sugar > 120 mg/dl (1 = true; 0 = false)",
        "Enter fasting blood sugar",
        0.0,
        1.0,
    ),
    coded_field(
        "restecg",
        "Resting Electrocardiographic results (0, 1, 2)",
        "Enter resting ECG results",
        0.0,
        2.0,
    ),
    field("thalach", "Maximum Heart Rate achieved", "Enter maximum heart rate"),
    coded_field(
        "exang",
        "Exercise Induced Angina (1 = yes; 0 = no)",
        "Enter exercise induced angina",
        0.0,
        1.0,
    ),
    field("oldpeak", "ST depression induced by exercise", "Enter ST depression value"),
    coded_field(
        "slope",
        "Slope of the peak exercise ST segment (0, 1, 2)",
        "Enter slope value",
        0.0,
        2.0,
    ),
    coded_field(
        "ca",
        "Major vessels colored by fluoroscopy (0-3)",
        "Enter number of major vessels",
        0.0,
        3.0,
    ),
    coded_field(
        "thal",
        "Thal (0 = normal; 1 = fixed defect; 2 = reversible defect)",
        "Enter thal value",
        0.0,
        2.0,
    ),
];

static PARKINSONS_FIELDS: [FieldSpec; 22] = [
    field("fo", "MDVP:Fo(Hz)", "Enter MDVP:Fo(Hz) value"),
    field("fhi", "MDVP:Fhi(Hz)", "Enter MDVP:Fhi(Hz) value"),
    field("flo", "MDVP:Flo(Hz)", "Enter MDVP:Flo(Hz) value"),
    field("Jitter_percent", "MDVP:Jitter(%)", "Enter MDVP:Jitter(%) value"),
    field("Jitter_Abs", "MDVP:Jitter(Abs)", "Enter MDVP:Jitter(Abs) value"),
    field("RAP", "MDVP:RAP", "Enter MDVP:RAP value"),
    field("PPQ", "MDVP:PPQ", "Enter MDVP:PPQ value"),
    field("DDP", "Jitter:DDP", "Enter Jitter:DDP value"),
    field("Shimmer", "MDVP:Shimmer", "Enter MDVP:Shimmer value"),
    field("Shimmer_dB", "MDVP:Shimmer(dB)", "Enter MDVP:Shimmer(dB) value"),
    field("APQ3", "Shimmer:APQ3", "Enter Shimmer:APQ3 value"),
    field("APQ5", "Shimmer:APQ5", "Enter Shimmer:APQ5 value"),
    field("APQ", "MDVP:APQ", "Enter MDVP:APQ value"),
    field("DDA", "Shimmer:DDA", "Enter Shimmer:DDA value"),
    field("NHR", "NHR", "Enter NHR value"),
    field("HNR", "HNR", "Enter HNR value"),
    field("RPDE", "RPDE", "Enter RPDE value"),
    field("DFA", "DFA", "Enter DFA value"),
    field("spread1", "Spread1", "Enter spread1 value"),
    field("spread2", "Spread2", "Enter spread2 value"),
    field("D2", "D2", "Enter D2 value"),
    field("PPE", "PPE", "Enter PPE value"),
];

static LUNG_CANCER_FIELDS: [FieldSpec; 15] = [
    coded_field("GENDER", "Gender (1 = Male; 0 = Female)", "Enter gender of the person", 0.0, 1.0),
    field("AGE", "Age", "Enter age of the person"),
    coded_field("SMOKING", "Smoking (1 = Yes; 0 = No)", "Enter if the person smokes", 0.0, 1.0),
    coded_field(
        "YELLOW_FINGERS",
        "Yellow Fingers (1 = Yes; 0 = No)",
        "Enter if the person has yellow fingers",
        0.0,
        1.0,
    ),
    coded_field("ANXIETY", "Anxiety (1 = Yes; 0 = No)", "Enter if the person has anxiety", 0.0, 1.0),
    coded_field(
        "PEER_PRESSURE",
        "Peer Pressure (1 = Yes; 0 = No)",
        "Enter if the person is under peer pressure",
        0.0,
        1.0,
    ),
    coded_field(
        "CHRONIC_DISEASE",
        "Chronic Disease (1 = Yes; 0 = No)",
        "Enter if the person has a chronic disease",
        0.0,
        1.0,
    ),
    coded_field(
        "FATIGUE",
        "Fatigue (1 = Yes; 0 = No)",
        "Enter if the person experiences fatigue",
        0.0,
        1.0,
    ),
    coded_field(
        "ALLERGY",
        "Allergy (1 = Yes; 0 = No)",
        "Enter if the person has allergies",
        0.0,
        1.0,
    ),
    coded_field(
        "WHEEZING",
        "Wheezing (1 = Yes; 0 = No)",
        "Enter if the person experiences wheezing",
        0.0,
        1.0,
    ),
    coded_field(
        "ALCOHOL_CONSUMING",
        "Alcohol Consuming (1 = Yes; 0 = No)",
        "Enter if the person consumes alcohol",
        0.0,
        1.0,
    ),
    coded_field(
        "COUGHING",
        "Coughing (1 = Yes; 0 = No)",
        "Enter if the person experiences coughing",
        0.0,
        1.0,
    ),
    coded_field(
        "SHORTNESS_OF_BREATH",
        "Shortness Of Breath (1 = Yes; 0 = No)",
        "Enter if the person experiences shortness of breath",
        0.0,
        1.0,
    ),
    coded_field(
        "SWALLOWING_DIFFICULTY",
        "Swallowing Difficulty (1 = Yes; 0 = No)",
        "Enter if the person has difficulty swallowing",
        0.0,
        1.0,
    ),
    coded_field(
        "CHEST_PAIN",
        "Chest Pain (1 = Yes; 0 = No)",
        "Enter if the person experiences chest pain",
        0.0,
        1.0,
    ),
];

static THYROID_FIELDS: [FieldSpec; 7] = [
    field("age", "Age", "Enter age of the person"),
    coded_field("sex", "Sex (1 = Male; 0 = Female)", "Enter sex of the person", 0.0, 1.0),
    coded_field(
        "on_thyroxine",
        "On Thyroxine (1 = Yes; 0 = No)",
        "Enter if the person is on thyroxine",
        0.0,
        1.0,
    ),
    field("tsh", "TSH Level", "Enter TSH level"),
    coded_field("t3_measured", "T3 Measured (1 = Yes; 0 = No)", "Enter if T3 was measured", 0.0, 1.0),
    field("t3", "T3 Level", "Enter T3 level"),
    field("tt4", "TT4 Level", "Enter TT4 level"),
];

lazy_static! {
    static ref SCHEMAS: HashMap<Disease, FormSchema> = {
        let mut map = HashMap::new();
        map.insert(
            Disease::Diabetes,
            FormSchema {
                disease: Disease::Diabetes,
                fields: &DIABETES_FIELDS,
            },
        );
        map.insert(
            Disease::HeartDisease,
            FormSchema {
                disease: Disease::HeartDisease,
                fields: &HEART_FIELDS,
            },
        );
        map.insert(
            Disease::Parkinsons,
            FormSchema {
                disease: Disease::Parkinsons,
                fields: &PARKINSONS_FIELDS,
            },
        );
        map.insert(
            Disease::LungCancer,
            FormSchema {
                disease: Disease::LungCancer,
                fields: &LUNG_CANCER_FIELDS,
            },
        );
        map.insert(
            Disease::HypoThyroid,
            FormSchema {
                disease: Disease::HypoThyroid,
                fields: &THYROID_FIELDS,
            },
        );
        map
    };
}

/// Look up the form descriptor for a disease.
pub fn schema_for(disease: Disease) -> &'static FormSchema {
    // Every variant is registered above; a miss is a programming error.
    SCHEMAS
        .get(&disease)
        .unwrap_or_else(|| panic!("missing form schema for {disease}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disease::ALL_DISEASES;

    #[test]
    fn schema_lengths_match_model_feature_counts() {
        for disease in ALL_DISEASES {
            let schema = schema_for(disease);
            assert_eq!(
                schema.fields.len(),
                disease.feature_len(),
                "field count mismatch for {disease}"
            );
        }
    }

    #[test]
    fn field_names_are_unique_within_a_form() {
        for disease in ALL_DISEASES {
            let schema = schema_for(disease);
            let mut seen = std::collections::HashSet::new();
            for spec in schema.fields {
                assert!(seen.insert(spec.name), "duplicate field {} in {disease}", spec.name);
            }
        }
    }

    #[test]
    fn diabetes_field_order_is_stable() {
        let names: Vec<&str> = schema_for(Disease::Diabetes)
            .fields
            .iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Pregnancies",
                "Glucose",
                "BloodPressure",
                "SkinThickness",
                "Insulin",
                "BMI",
                "DiabetesPedigreeFunction",
                "Age",
            ]
        );
    }
}
