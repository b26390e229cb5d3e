pub mod assessment;
#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod error;
pub mod features;
pub mod form;
pub mod report;
pub mod scoring;
pub mod utils;

use std::io;

use anyhow::Context;

pub use assessment::FatigueAssessor;
pub use config::AppConfig;
pub use error::{ArtifactKind, ErrorKind, FatigueError};
pub use features::{RawSessionInput, SessionForm, TimeOfDay};
pub use scoring::{FatigueLevel, FeatureWeight, PredictionResult};

#[cfg(feature = "desktop")]
pub(crate) struct AppState {
    pub(crate) assessor: FatigueAssessor,
}

/// Resolve config, install logging and load the frozen artifacts.
/// Every error here is a startup failure.
fn startup() -> anyhow::Result<FatigueAssessor> {
    let config = AppConfig::load()?;
    utils::init_logging(&config.log_level);

    log::info!("FatigueInsight starting up...");

    FatigueAssessor::from_config(&config).with_context(|| {
        format!(
            "Failed to load scoring artifacts from {}",
            config.artifacts_dir.display()
        )
    })
}

/// Terminal form on stdin/stdout.
pub fn run_terminal() -> anyhow::Result<()> {
    let assessor = startup()?;

    println!("FatigueInsight: Cognitive Fatigue Predictor");
    println!(
        "Predicts cognitive fatigue levels based on user interaction and session behavior."
    );
    println!();

    let stdin = io::stdin();
    let stdout = io::stdout();
    form::TerminalForm::new(stdin.lock(), stdout.lock()).run(&assessor)
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::{assess_fatigue, get_feature_importance, get_form_defaults};
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let assessor = startup().map_err(|err| {
                log::error!("Startup failed: {err:#}");
                err
            })?;
            app.manage(AppState { assessor });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            get_form_defaults,
            assess_fatigue,
            get_feature_importance,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
