//! Add to (or subtract from) a member's score.

use anyhow::Result;
use leaderboard::Leaderboard;

use crate::ui;

pub async fn run(board: &Leaderboard, member: &str, delta: f64) -> Result<()> {
    let score = ui::spin("Updating score...", board.change_score_for(member, delta)).await?;

    ui::success(&format!("{} now has {}", ui::bold(member), score));

    Ok(())
}
