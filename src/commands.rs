//! Tauri commands backing the desktop form.

use serde::Serialize;
use tauri::State;

use crate::{
    features::SessionForm,
    report::{verdict_headline, AXIS_LABEL, EXPLAINABILITY_NOTE},
    scoring::{FeatureWeight, PredictionResult},
    AppState,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentView {
    pub headline: &'static str,
    pub prediction: PredictionResult,
    pub axis_label: &'static str,
    pub note: &'static str,
}

#[tauri::command]
pub fn get_form_defaults() -> SessionForm {
    SessionForm::default()
}

#[tauri::command]
pub fn assess_fatigue(
    state: State<'_, AppState>,
    form: SessionForm,
) -> Result<AssessmentView, String> {
    let prediction = state.assessor.assess(&form).map_err(|e| e.to_string())?;

    Ok(AssessmentView {
        headline: verdict_headline(prediction.level),
        prediction,
        axis_label: AXIS_LABEL,
        note: EXPLAINABILITY_NOTE,
    })
}

#[tauri::command]
pub fn get_feature_importance(state: State<'_, AppState>) -> Vec<FeatureWeight> {
    state.assessor.importance().to_vec()
}
