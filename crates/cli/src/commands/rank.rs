//! Set a member's score.
//!
//! Adds the member if it is new, otherwise overwrites its score. A member
//! only ever has one score on a leaderboard.

use anyhow::Result;
use leaderboard::Leaderboard;

use crate::ui;

pub async fn run(board: &Leaderboard, member: &str, score: f64) -> Result<()> {
    ui::spin("Ranking...", board.rank_member(member, score)).await?;

    ui::success(&format!(
        "{} scored {} on {}",
        ui::bold(member),
        score,
        ui::bold(board.name())
    ));

    Ok(())
}
