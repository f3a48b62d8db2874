//! Look up one member: rank, score, or the page they are on.
//!
//! A member that is not on the leaderboard is reported as an error so the
//! exit status tells scripts apart "not found" from a real answer.

use anyhow::Result;
use leaderboard::{Leaderboard, RankWithScore};
use serde::Serialize;

use crate::ui;

#[derive(Serialize)]
struct MemberInfo<'a> {
    member: &'a str,
    #[serde(flatten)]
    position: RankWithScore,
}

fn not_found(member: &str) -> anyhow::Error {
    anyhow::anyhow!("Member not found: {}", member)
}

/// Rank and score, read together.
pub async fn rank(board: &Leaderboard, member: &str, json: bool) -> Result<()> {
    let position = ui::spin("Looking up rank...", board.get_rank_with_score_for(member))
        .await?
        .ok_or_else(|| not_found(member))?;

    if json {
        return ui::print_json(&MemberInfo { member, position });
    }
    println!(
        "{} is {} with {}",
        ui::bold(member),
        ui::bold(&format!("#{}", position.rank)),
        position.score
    );

    Ok(())
}

pub async fn score(board: &Leaderboard, member: &str, json: bool) -> Result<()> {
    let score = ui::spin("Looking up score...", board.get_score_for(member))
        .await?
        .ok_or_else(|| not_found(member))?;

    if json {
        return ui::print_json(&serde_json::json!({ "member": member, "score": score }));
    }
    println!("{score}");

    Ok(())
}

pub async fn page(board: &Leaderboard, member: &str, json: bool) -> Result<()> {
    let page = ui::spin("Looking up page...", board.get_page_for(member, None)).await?;
    if page == 0 {
        return Err(not_found(member));
    }

    if json {
        return ui::print_json(&serde_json::json!({ "member": member, "page": page }));
    }
    println!("{page}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::context::TestContext;

    async fn ctx() -> TestContext {
        TestContext::descending()
            .seed(&[("a", 10.0), ("b", 20.0), ("c", 30.0)])
            .await
    }

    #[tokio::test]
    async fn rank_succeeds_for_member() {
        let ctx = ctx().await;

        rank(&ctx.board, "c", false).await.unwrap();
        rank(&ctx.board, "c", true).await.unwrap();
    }

    #[tokio::test]
    async fn rank_reports_missing_member() {
        let ctx = ctx().await;

        let err = rank(&ctx.board, "z", false).await.unwrap_err();
        assert_eq!(err.to_string(), "Member not found: z");
    }

    #[tokio::test]
    async fn score_reports_missing_member() {
        let ctx = ctx().await;

        assert!(score(&ctx.board, "a", false).await.is_ok());
        assert!(score(&ctx.board, "z", false).await.is_err());
    }

    #[tokio::test]
    async fn page_reports_missing_member() {
        let ctx = ctx().await;

        assert!(page(&ctx.board, "a", true).await.is_ok());
        let err = page(&ctx.board, "z", true).await.unwrap_err();
        assert!(err.to_string().contains("Member not found"));
    }

    #[test]
    fn member_info_flattens_position() {
        let info = MemberInfo {
            member: "a",
            position: RankWithScore {
                rank: 3,
                score: 10.0,
            },
        };

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "member": "a", "rank": 3, "score": 10.0 })
        );
    }
}
