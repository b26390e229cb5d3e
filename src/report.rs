//! Text rendering of a prediction for the terminal form.

use std::fmt::Write;

use crate::scoring::{FatigueLevel, FeatureWeight, PredictionResult};

pub const AXIS_LABEL: &str = "Impact on Fatigue Prediction";

pub const EXPLAINABILITY_NOTE: &str = "SHAP explainability is not shipped with this build. \
Model coefficients are used for transparent interpretation.";

/// Columns available on each side of the zero axis.
const HALF_WIDTH: usize = 20;
const BAR: char = '█';

pub fn verdict_headline(level: FatigueLevel) -> &'static str {
    match level {
        FatigueLevel::High => "High Cognitive Fatigue Detected",
        FatigueLevel::Low => "Low Cognitive Fatigue Detected",
    }
}

fn bar_len(weight: f64, max_abs: f64) -> usize {
    if max_abs == 0.0 {
        return 0;
    }
    ((weight.abs() / max_abs) * HALF_WIDTH as f64).round() as usize
}

/// Horizontal bar chart, one row per feature in the given order.
/// Negative weights extend left of the axis, positive ones right.
pub fn render_importance_chart(weights: &[FeatureWeight]) -> String {
    let label_width = weights.iter().map(|w| w.feature.len()).max().unwrap_or(0);
    let max_abs = weights.iter().map(|w| w.weight.abs()).fold(0.0, f64::max);

    let half = HALF_WIDTH;

    let mut out = String::new();
    for entry in weights {
        let len = bar_len(entry.weight, max_abs);
        let (left, right) = if entry.weight < 0.0 {
            (BAR.to_string().repeat(len), String::new())
        } else {
            (String::new(), BAR.to_string().repeat(len))
        };
        let _ = writeln!(
            out,
            "{:>label_width$} {:>half$}│{:<half$} {:+.3}",
            entry.feature, left, right, entry.weight
        );
    }

    let axis_indent = " ".repeat(label_width + 1);
    let _ = writeln!(
        out,
        "{axis_indent}{}┼{}",
        "─".repeat(half),
        "─".repeat(half)
    );
    let _ = writeln!(
        out,
        "{axis_indent}{:^width$}",
        AXIS_LABEL,
        width = half * 2 + 1
    );
    out
}

pub fn render_report(result: &PredictionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Prediction Result");
    let _ = writeln!(out, "  {}", verdict_headline(result.level));
    let _ = writeln!(
        out,
        "  P(high fatigue) = {:.2}  (scored {})",
        result.probability,
        result.scored_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Feature Importance");
    out.push_str(&render_importance_chart(&result.importance));
    let _ = writeln!(out);
    let _ = writeln!(out, "{EXPLAINABILITY_NOTE}");
    out
}
