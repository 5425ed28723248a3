//! Submission handling for the disease forms.
//!
//! One dispatch path serves all five forms: look up the schema, check every
//! field is present and parses, and assemble the feature vector in schema
//! order. Validation stops the request before any model or store call.

use crate::errors::{ClinsightError, ClinsightResult};
use crate::form_schema::{FieldKind, FormSchema};
use std::collections::HashMap;

/// Raw form values keyed by field name, as submitted by the client.
pub type FormValues = HashMap<String, String>;

/// Validate a submission against its schema and build the ordered feature
/// vector.
///
/// The returned vector has exactly `schema.fields.len()` entries, one per
/// field, in schema order.
pub fn build_feature_vector(schema: &FormSchema, values: &FormValues) -> ClinsightResult<Vec<f64>> {
    let mut features = Vec::with_capacity(schema.fields.len());

    for spec in schema.fields {
        let raw = values
            .get(spec.name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ClinsightError::validation(
                    spec.name,
                    "Please fill in all fields before predicting",
                )
            })?;

        let value: f64 = raw.parse().map_err(|_| {
            ClinsightError::validation(spec.name, format!("'{raw}' is not a number"))
        })?;

        if !value.is_finite() {
            return Err(ClinsightError::validation(spec.name, "value must be finite"));
        }

        if let FieldKind::Number { min, max } = spec.kind {
            if let Some(min) = min {
                if value < min {
                    return Err(ClinsightError::validation(
                        spec.name,
                        format!("value must be at least {min}"),
                    ));
                }
            }
            if let Some(max) = max {
                if value > max {
                    return Err(ClinsightError::validation(
                        spec.name,
                        format!("value must be at most {max}"),
                    ));
                }
            }
        }

        features.push(value);
    }

    Ok(features)
}
