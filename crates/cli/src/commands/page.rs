//! Show one page of the leaderboard.
//!
//! Pages are 1-based and hold `--page-size` members (default 50).

use anyhow::Result;
use leaderboard::Leaderboard;

use super::top::print_entries;
use crate::ui;

pub async fn run(board: &Leaderboard, page: u64, json: bool) -> Result<()> {
    let entries = ui::spin("Fetching page...", board.get_page(page, None)).await?;

    if entries.is_empty() && !json {
        let pages = board.page_count(None).await?;
        ui::info(&format!("Page {} is empty ({} pages in total)", page, pages));
        return Ok(());
    }

    print_entries(entries, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::context::TestContext;
    use leaderboard::LeaderboardOptions;

    #[tokio::test]
    async fn run_prints_requested_page() {
        let options = LeaderboardOptions::new("test-board").page_size(1);
        let ctx = TestContext::with_options(options)
            .seed(&[("a", 1.0), ("b", 2.0)])
            .await;

        run(&ctx.board, 2, false).await.unwrap();
        run(&ctx.board, 2, true).await.unwrap();
    }

    #[tokio::test]
    async fn run_reports_page_past_the_end() {
        let ctx = TestContext::new().seed(&[("a", 1.0)]).await;

        run(&ctx.board, 9, false).await.unwrap();
    }
}
