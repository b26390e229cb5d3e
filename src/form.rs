//! Interactive terminal form: prompts for the six session fields, then
//! prints the verdict and the importance chart.

use std::{
    fmt::Display,
    io::{self, BufRead, Write},
    str::FromStr,
};

use anyhow::Result;

use crate::assessment::FatigueAssessor;
use crate::features::SessionForm;
use crate::report::render_report;
use crate::{log_error, log_info};

const ENABLE_LOGS: bool = true;

pub struct TerminalForm<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> TerminalForm<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Ask for one value. An empty line keeps `default`; unparsable input
    /// asks again. Returns `None` once input is exhausted.
    fn prompt<T>(&mut self, label: &str, default: T, hint: &str) -> io::Result<Option<T>>
    where
        T: FromStr + Display,
    {
        loop {
            write!(self.writer, "{label} [{default}]: ")?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let answer = line.trim();
            if answer.is_empty() {
                return Ok(Some(default));
            }
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.writer, "  {hint}")?,
            }
        }
    }

    /// Collect a full submission, pre-filled with `defaults`.
    pub fn collect(&mut self, defaults: &SessionForm) -> io::Result<Option<SessionForm>> {
        writeln!(self.writer, "Session Inputs")?;

        let Some(session_duration) = self.prompt(
            "Session Duration (minutes)",
            defaults.session_duration,
            "Enter a whole number of minutes.",
        )?
        else {
            return Ok(None);
        };
        let Some(decision_count) =
            self.prompt("Decision Count", defaults.decision_count, "Enter a whole number.")?
        else {
            return Ok(None);
        };
        let Some(undo_count) =
            self.prompt("Undo Count", defaults.undo_count, "Enter a whole number.")?
        else {
            return Ok(None);
        };
        let Some(error_rate) = self.prompt(
            "Error Rate (0-1)",
            defaults.error_rate,
            "Enter a decimal number such as 0.10.",
        )?
        else {
            return Ok(None);
        };
        let Some(break_taken) = self.prompt::<String>(
            "Break Taken? (No/Yes)",
            defaults.break_taken.clone(),
            "Enter No or Yes.",
        )?
        else {
            return Ok(None);
        };
        let Some(time_of_day) = self.prompt::<String>(
            "Time of Day (Morning/Afternoon/Evening)",
            defaults.time_of_day.clone(),
            "Enter Morning, Afternoon or Evening.",
        )?
        else {
            return Ok(None);
        };

        Ok(Some(SessionForm {
            session_duration,
            decision_count,
            undo_count,
            error_rate,
            break_taken,
            time_of_day,
        }))
    }

    /// Prompt until a submission passes validation, then print its report.
    ///
    /// Input errors re-open the form with the previous answers; artifact and
    /// dimension errors abort without printing a partial result.
    pub fn run(&mut self, assessor: &FatigueAssessor) -> Result<()> {
        let mut defaults = SessionForm::default();

        loop {
            let Some(form) = self.collect(&defaults)? else {
                log_info!("Form input closed before submission");
                return Ok(());
            };

            match assessor.assess(&form) {
                Ok(result) => {
                    writeln!(self.writer)?;
                    write!(self.writer, "{}", render_report(&result))?;
                    return Ok(());
                }
                Err(err) if err.is_user_facing() => {
                    writeln!(self.writer, "Invalid input: {err}. Please correct it and resubmit.")?;
                    writeln!(self.writer)?;
                    defaults = form;
                }
                Err(err) => {
                    log_error!("Assessment failed: {}", err);
                    return Err(err.into());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureSchema;
    use crate::scoring::{LinearModel, ScoringArtifacts, StandardScaler};
    use std::io::Cursor;
    use std::sync::Arc;

    fn assessor() -> FatigueAssessor {
        let schema = FeatureSchema::new(["session_duration", "error_rate"]).unwrap();
        let scaler = StandardScaler::new(vec![60.0, 0.2], vec![30.0, 0.1]).unwrap();
        let model = LinearModel::new(vec![1.0, 1.0], 0.0).unwrap();
        FatigueAssessor::new(Arc::new(
            ScoringArtifacts::new(schema, scaler, model).unwrap(),
        ))
    }

    fn form_for(input: &str) -> TerminalForm<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalForm::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_empty_lines_keep_defaults() {
        let mut form = form_for("\n\n\n\n\n\n");
        let submitted = form.collect(&SessionForm::default()).unwrap();
        assert_eq!(submitted, Some(SessionForm::default()));
    }

    #[test]
    fn test_answers_override_defaults() {
        let mut form = form_for("90\n40\n7\n0.35\nYes\nEvening\n");
        let submitted = form.collect(&SessionForm::default()).unwrap().unwrap();
        assert_eq!(submitted.session_duration, 90);
        assert_eq!(submitted.decision_count, 40);
        assert_eq!(submitted.undo_count, 7);
        assert_eq!(submitted.error_rate, 0.35);
        assert_eq!(submitted.break_taken, "Yes");
        assert_eq!(submitted.time_of_day, "Evening");
    }

    #[test]
    fn test_unparsable_number_asks_again() {
        let mut form = form_for("soon\n45\n\n\n\n\n\n");
        let submitted = form.collect(&SessionForm::default()).unwrap().unwrap();
        assert_eq!(submitted.session_duration, 45);

        let output = String::from_utf8(form.into_writer()).unwrap();
        assert!(output.contains("Enter a whole number of minutes."));
    }

    #[test]
    fn test_eof_yields_none() {
        let mut form = form_for("30\n");
        assert_eq!(form.collect(&SessionForm::default()).unwrap(), None);
    }

    #[test]
    fn test_run_resubmits_after_invalid_input() {
        // first submission has error_rate 1.5, second fixes it
        let mut form = form_for("\n\n\n1.5\n\n\n\n\n\n0.5\n\n\n");
        form.run(&assessor()).unwrap();

        let output = String::from_utf8(form.into_writer()).unwrap();
        assert!(output.contains("Invalid input: invalid error_rate"));
        assert!(output.contains("Error Rate (0-1) [1.5]"));
        assert!(output.contains("High Cognitive Fatigue Detected"));
        assert!(output.contains("Impact on Fatigue Prediction"));
    }
}
