use super::display::print_scene_line;
use crate::app::App;
use act_core::Scene;
use anyhow::{Result, anyhow};

pub fn history(app: &App, limit: usize) {
    let history = app.store.history();
    if history.is_empty() {
        println!("No scenes yet. Try `act scene`.");
        return;
    }
    for (index, scene) in history.iter().take(limit).enumerate() {
        print_scene_line(index, scene);
    }
}

pub fn favorites(app: &App) {
    let favorites = app.store.favorites();
    if favorites.is_empty() {
        println!("No favorites yet.");
        return;
    }
    for (index, scene) in favorites.iter().enumerate() {
        print_scene_line(index, scene);
    }
}

pub async fn toggle_favorite(app: &App, id: Option<&str>) -> Result<()> {
    let scene = find_scene(app, id)?;
    let favorited = app.store.toggle_favorite(&scene);
    app.save().await?;

    if favorited {
        println!("★ Added \"{}\" to favorites", scene.title);
    } else {
        println!("☆ Removed \"{}\" from favorites", scene.title);
    }
    Ok(())
}

fn find_scene(app: &App, id: Option<&str>) -> Result<Scene> {
    let history = app.store.history();
    let Some(id) = id else {
        return history
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No scenes yet. Try `act scene` first."));
    };

    history
        .into_iter()
        .chain(app.store.favorites())
        .find(|scene| scene.id == id)
        .ok_or_else(|| anyhow!("No scene with id '{id}' in history or favorites"))
}
