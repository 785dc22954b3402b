//! Replay tool entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: anotequest-replay <script.json>");
        return ExitCode::from(2);
    };
    log::info!("Replaying {}", path);

    let report = match anotequest_replay::run_file(&path) {
        Ok(report) => report,
        Err(err) => {
            log::error!("Replay failed: {}", err);
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
