use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;

use app::App;
use commands::{library, practice, prefs, scene};

#[derive(Parser)]
#[command(name = "act")]
#[command(about = "ACT - scene prompts and practice for improv and theatre", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get a new scene (uses the preferred mode unless --mode is given)
    Scene(scene::SceneArgs),
    /// Show today's challenge
    Daily,
    /// Pick a random voice exercise
    Exercise,
    /// Show or change preferences
    Prefs {
        #[command(subcommand)]
        action: prefs::PrefsAction,
    },
    /// List recent scenes, newest first
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// List favorite scenes
    Favorites,
    /// Toggle a scene as favorite (defaults to the most recent scene)
    Favorite { id: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "act=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let app = App::load().await?;

    match cli.command {
        Commands::Scene(args) => scene::run(&app, args).await?,
        Commands::Daily => practice::daily(&app).await?,
        Commands::Exercise => practice::exercise(&app),
        Commands::Prefs { action } => prefs::run(&app, action).await?,
        Commands::History { limit } => library::history(&app, limit),
        Commands::Favorites => library::favorites(&app),
        Commands::Favorite { id } => library::toggle_favorite(&app, id.as_deref()).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use act_core::{Difficulty, Mode};
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scene_flags_parse_case_insensitively() {
        let cli = Cli::try_parse_from(["act", "scene", "--mode", "Duo", "--theme", "work"]).unwrap();
        match cli.command {
            Commands::Scene(args) => {
                assert_eq!(args.mode, Some(Mode::Duo));
                assert_eq!(args.theme.as_deref(), Some("work"));
                assert!(!args.json);
            }
            _ => panic!("expected scene command"),
        }
    }

    #[test]
    fn test_prefs_set_collects_repeated_themes() {
        let cli = Cli::try_parse_from([
            "act",
            "prefs",
            "set",
            "--difficulty",
            "advanced",
            "--theme",
            "family",
            "--theme",
            "mystery",
        ])
        .unwrap();
        match cli.command {
            Commands::Prefs {
                action:
                    prefs::PrefsAction::Set {
                        difficulty, themes, ..
                    },
            } => {
                assert_eq!(difficulty, Some(Difficulty::Advanced));
                assert_eq!(themes, vec!["family", "mystery"]);
            }
            _ => panic!("expected prefs set"),
        }
    }

    #[test]
    fn test_unknown_mode_falls_back_to_solo() {
        let cli = Cli::try_parse_from(["act", "scene", "--mode", "quartet"]).unwrap();
        match cli.command {
            Commands::Scene(args) => assert_eq!(args.mode, Some(Mode::Solo)),
            _ => panic!("expected scene command"),
        }

        let cli = Cli::try_parse_from(["act", "prefs", "set", "--mode", "quartet"]).unwrap();
        match cli.command {
            Commands::Prefs {
                action: prefs::PrefsAction::Set { mode, .. },
            } => assert_eq!(mode, Some(Mode::Solo)),
            _ => panic!("expected prefs set"),
        }
    }
}
