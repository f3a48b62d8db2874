//! Delete a whole leaderboard.
//!
//! Removes every member in one step. The command succeeds even if the
//! leaderboard does not exist (idempotent).

use anyhow::Result;
use leaderboard::Leaderboard;

use crate::ui;

pub async fn run(board: &Leaderboard) -> Result<()> {
    let removed = ui::spin("Deleting...", board.delete_leaderboard()).await?;

    if removed == 0 {
        ui::info(&format!("{} did not exist", ui::bold(board.name())));
    } else {
        ui::success(&format!("Deleted {}", ui::bold(board.name())));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::context::TestContext;

    #[tokio::test]
    async fn run_removes_all_members() {
        let ctx = TestContext::new()
            .seed(&[("alice", 1.0), ("bob", 2.0), ("carol", 3.0)])
            .await;

        run(&ctx.board).await.unwrap();

        assert_eq!(ctx.board.member_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn run_is_idempotent() {
        let ctx = TestContext::new();

        run(&ctx.board).await.unwrap();
        run(&ctx.board).await.unwrap();
    }
}
