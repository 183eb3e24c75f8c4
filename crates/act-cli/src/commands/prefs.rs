use super::display::print_preferences;
use crate::app::App;
use act_core::{Difficulty, Mode, PreferencesPatch};
use anyhow::{Result, bail};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Print the current preferences
    Show,
    /// Change one or more preferences
    Set {
        #[arg(long, value_parser = super::parse_mode)]
        mode: Option<Mode>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Repeat to set several themes; replaces the current list
        #[arg(long = "theme")]
        themes: Vec<String>,
        /// Default duration in seconds
        #[arg(long)]
        duration: Option<u32>,
    },
}

pub async fn run(app: &App, action: PrefsAction) -> Result<()> {
    match action {
        PrefsAction::Show => print_preferences(&app.store.preferences()),
        PrefsAction::Set {
            mode,
            difficulty,
            themes,
            duration,
        } => {
            if duration == Some(0) {
                bail!("Duration must be positive");
            }
            let patch = PreferencesPatch {
                mode,
                difficulty,
                themes: (!themes.is_empty()).then(|| themes.into_iter().collect()),
                duration,
            };
            if patch.is_empty() {
                bail!("Nothing to change; pass --mode, --difficulty, --theme or --duration");
            }

            app.store.set_preferences(patch);
            app.save().await?;
            print_preferences(&app.store.preferences());
        }
    }
    Ok(())
}
