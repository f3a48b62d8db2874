//! Take a member off the leaderboard.
//!
//! Succeeds even if the member was never ranked (idempotent).

use anyhow::Result;
use leaderboard::Leaderboard;

use crate::ui;

pub async fn run(board: &Leaderboard, member: &str) -> Result<()> {
    let removed = ui::spin("Removing...", board.remove_member(member)).await?;

    if removed == 0 {
        ui::info(&format!("{} was not on the leaderboard", ui::bold(member)));
    } else {
        ui::success(&format!("Removed {}", ui::bold(member)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::context::TestContext;

    #[tokio::test]
    async fn run_removes_member() {
        let ctx = TestContext::new().seed(&[("alice", 1.0), ("bob", 2.0)]).await;

        run(&ctx.board, "alice").await.unwrap();

        assert_eq!(ctx.board.get_rank_for("alice").await.unwrap(), None);
        assert_eq!(ctx.board.member_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn run_succeeds_for_unknown_member() {
        let ctx = TestContext::new();

        run(&ctx.board, "ghost").await.unwrap();
    }
}
