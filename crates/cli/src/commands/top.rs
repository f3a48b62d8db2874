//! Show the best members in leaderboard order.

use anyhow::Result;
use leaderboard::{Leaderboard, MemberScore, RankedMember};
use tabled::{Table, Tabled, settings::Style};

use crate::ui;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Rank")]
    rank: u64,
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Score")]
    score: f64,
}

/// Attach 1-based ranks to a window that starts at 0-based `offset`.
pub fn ranked_from(offset: u64, entries: Vec<MemberScore>) -> Vec<RankedMember> {
    entries
        .into_iter()
        .zip(offset + 1..)
        .map(|(entry, rank)| RankedMember {
            rank,
            member: entry.member,
            score: entry.score,
        })
        .collect()
}

/// Print ranked entries as a table, or as JSON.
pub fn print_entries(entries: Vec<RankedMember>, json: bool) -> Result<()> {
    if json {
        return ui::print_json(&entries);
    }

    if entries.is_empty() {
        println!("No members on this leaderboard");
        return Ok(());
    }

    let rows: Vec<EntryRow> = entries
        .into_iter()
        .map(|entry| EntryRow {
            rank: entry.rank,
            member: entry.member,
            score: entry.score,
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

pub async fn run(board: &Leaderboard, offset: u64, count: u64, json: bool) -> Result<()> {
    let entries = ui::spin(
        "Fetching top members...",
        board.get_top_from(offset, count),
    )
    .await?;

    print_entries(ranked_from(offset, entries), json)
}
