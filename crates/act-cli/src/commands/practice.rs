use super::display::{print_challenge, print_exercise};
use crate::app::App;
use anyhow::Result;
use chrono::Local;

pub async fn daily(app: &App) -> Result<()> {
    let today = Local::now().date_naive();
    let challenge = app.store.load_daily_challenge(today).await?;
    print_challenge(&challenge);
    Ok(())
}

pub fn exercise(app: &App) {
    print_exercise(&app.provider.voice_exercise());
}
