//! Count members, optionally only those within a score range.

use anyhow::Result;
use leaderboard::Leaderboard;

use crate::ui;

/// Count everyone, or members with `min <= score <= max` when either bound is
/// given. A missing bound is open-ended.
pub async fn count(board: &Leaderboard, min: Option<f64>, max: Option<f64>) -> Result<u64> {
    if min.is_none() && max.is_none() {
        return board.member_count().await;
    }
    let min = min.unwrap_or(f64::NEG_INFINITY);
    let max = max.unwrap_or(f64::INFINITY);
    if min > max {
        anyhow::bail!("--min ({}) must not be greater than --max ({})", min, max);
    }
    board.member_count_in_range(min, max).await
}

pub async fn run(
    board: &Leaderboard,
    min: Option<f64>,
    max: Option<f64>,
    json: bool,
) -> Result<()> {
    let total = ui::spin("Counting...", count(board, min, max)).await?;

    if json {
        return ui::print_json(&serde_json::json!({ "count": total }));
    }
    println!("{total}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::context::TestContext;

    async fn ctx() -> TestContext {
        TestContext::new()
            .seed(&[("a", 10.0), ("b", 20.0), ("c", 30.0)])
            .await
    }

    #[tokio::test]
    async fn no_bounds_counts_everyone() {
        let ctx = ctx().await;

        assert_eq!(count(&ctx.board, None, None).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn bounds_are_inclusive() {
        let ctx = ctx().await;

        assert_eq!(count(&ctx.board, Some(10.0), Some(20.0)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn single_bound_is_open_ended() {
        let ctx = ctx().await;

        assert_eq!(count(&ctx.board, Some(20.0), None).await.unwrap(), 2);
        assert_eq!(count(&ctx.board, None, Some(10.0)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn inverted_bounds_are_rejected() {
        let ctx = ctx().await;

        let err = count(&ctx.board, Some(30.0), Some(10.0)).await.unwrap_err();
        assert!(err.to_string().contains("--min"));
    }
}
