// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(
    all(feature = "desktop", not(debug_assertions)),
    windows_subsystem = "windows"
)]

fn main() {
    #[cfg(feature = "desktop")]
    {
        fatigue_insight_lib::run();
    }

    #[cfg(not(feature = "desktop"))]
    {
        if let Err(err) = fatigue_insight_lib::run_terminal() {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}
