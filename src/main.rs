//! ao - sidecar metadata tools for audio collections

use std::process::ExitCode;

fn main() -> ExitCode {
    match audio_organizer::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            audio_organizer::ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
