use crate::error::Result;
use crate::features::{
    input::{RawSessionInput, SessionForm, TimeOfDay},
    schema::{AlignedFeatureRow, EncodedFeature, FeatureMap, FeatureSchema},
};
use crate::log_debug;

const ENABLE_LOGS: bool = true;

/// Encoded value for a single encoder-owned column.
fn encoded_value(input: &RawSessionInput, feature: EncodedFeature) -> f64 {
    let indicator = |hit: bool| if hit { 1.0 } else { 0.0 };

    match feature {
        EncodedFeature::SessionDuration => input.session_duration() as f64,
        EncodedFeature::DecisionCount => input.decision_count() as f64,
        EncodedFeature::UndoCount => input.undo_count() as f64,
        EncodedFeature::ErrorRate => input.error_rate(),
        EncodedFeature::BreakTaken => indicator(input.break_taken()),
        EncodedFeature::TimeOfDayMorning => indicator(input.time_of_day() == TimeOfDay::Morning),
        EncodedFeature::TimeOfDayAfternoon => {
            indicator(input.time_of_day() == TimeOfDay::Afternoon)
        }
        EncodedFeature::TimeOfDayEvening => indicator(input.time_of_day() == TimeOfDay::Evening),
    }
}

/// Expand a validated input into named feature values.
///
/// `break_taken` becomes 0/1 and `time_of_day` becomes three one-hot
/// indicator columns, exactly one of which is 1.
pub fn encode_features(input: &RawSessionInput) -> FeatureMap {
    EncodedFeature::ALL
        .into_iter()
        .map(|feature| (feature.column_name().to_string(), encoded_value(input, feature)))
        .collect()
}

/// Turns form submissions into rows aligned to one frozen schema.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: FeatureSchema,
}

impl FeatureEncoder {
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn encode_input(&self, input: &RawSessionInput) -> AlignedFeatureRow {
        self.schema.reindex(&encode_features(input))
    }

    /// Validate a raw form and encode it. Fails with `InvalidInput` naming
    /// the first offending field.
    pub fn encode(&self, form: &SessionForm) -> Result<AlignedFeatureRow> {
        let input = RawSessionInput::try_from(form)?;
        let row = self.encode_input(&input);
        log_debug!("Encoded session input into {} columns", row.len());
        Ok(row)
    }
}
