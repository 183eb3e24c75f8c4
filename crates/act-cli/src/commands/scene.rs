use super::display::print_scene;
use crate::app::App;
use act_core::{Mode, SceneRequest};
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct SceneArgs {
    /// solo, duo or group; anything else means solo
    #[arg(long, value_parser = super::parse_mode)]
    pub mode: Option<Mode>,
    #[arg(long)]
    pub theme: Option<String>,
    #[arg(long)]
    pub emotion: Option<String>,
    /// Free-form idea to build the scene around
    #[arg(long)]
    pub prompt: Option<String>,
    /// Print the scene as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: &App, args: SceneArgs) -> Result<()> {
    let mode = args.mode.unwrap_or_else(|| app.store.preferences().mode);
    let request = SceneRequest {
        mode,
        theme: args.theme,
        emotion: args.emotion,
        custom_prompt: args.prompt,
    };

    let scene = app.store.request_scene(request).await?;
    app.save().await?;

    if args.json {
        let json = serde_json::to_string_pretty(&scene).context("Failed to serialize scene")?;
        println!("{json}");
    } else {
        print_scene(&scene);
    }
    Ok(())
}
