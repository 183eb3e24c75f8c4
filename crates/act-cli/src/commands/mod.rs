pub mod library;
pub mod practice;
pub mod prefs;
pub mod scene;

mod display;

use act_core::Mode;

/// Unrecognized modes fall back to solo instead of failing the parse.
fn parse_mode(value: &str) -> Result<Mode, std::convert::Infallible> {
    Ok(Mode::parse_lossy(value))
}
