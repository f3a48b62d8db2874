//! Show how many pages the leaderboard spans.

use anyhow::Result;
use leaderboard::Leaderboard;

use crate::ui;

pub async fn run(board: &Leaderboard, json: bool) -> Result<()> {
    let pages = ui::spin("Counting pages...", board.page_count(None)).await?;

    if json {
        return ui::print_json(&serde_json::json!({
            "pages": pages,
            "page_size": board.page_size(),
        }));
    }
    println!("{} pages of {}", pages, board.page_size());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::context::TestContext;
    use leaderboard::LeaderboardOptions;

    #[tokio::test]
    async fn run_reports_pages() {
        let options = LeaderboardOptions::new("test-board").page_size(2);
        let ctx = TestContext::with_options(options)
            .seed(&[("a", 1.0), ("b", 2.0), ("c", 3.0)])
            .await;

        run(&ctx.board, true).await.unwrap();

        assert_eq!(ctx.board.page_count(None).await.unwrap(), 2);
    }
}
