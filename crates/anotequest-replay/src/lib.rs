//! AnoteQuest Replay
//!
//! Loads a JSON gesture script, drives one interaction controller per item
//! against an in-memory board and reports where everything ended up.

mod error;
mod replay;
mod script;

pub use error::ReplayError;
pub use replay::{ItemReport, Replayer, Report};
pub use script::{KindOverride, Script, ScriptItem, Step};

/// Load a script from disk and replay it.
pub fn run_file(path: impl AsRef<std::path::Path>) -> Result<Report, ReplayError> {
    let script = Script::load(path)?;
    let mut replayer = Replayer::new(&script)?;
    replayer.run(&script.steps)?;
    Ok(replayer.report())
}
