use std::collections::HashMap;

use serde::Serialize;

/// Marker written in the first column of a results-log row that opens a round.
pub const ROUND_MARKER: &str = "#round";

/// Per-round score: every opened panel is worth one point.
pub fn score(opened: u32, _total: u32) -> u32 {
    opened
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    pub player: String,
    pub score: u32,
    pub opened: u32,
    pub closed: u32,
}

impl PlayerScore {
    pub fn new(player: impl Into<String>, opened: u32, total: u32) -> Self {
        Self {
            player: player.into(),
            score: score(opened, total),
            opened,
            closed: total.saturating_sub(opened),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerTotal {
    pub player: String,
    pub score: u32,
    pub opened: u32,
}

/// One row of the append-only results log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultRow {
    RoundMarker(u8),
    Player { player: String, score: u32, opened: u32 },
}

impl ResultRow {
    /// Parse a stored row; blank and malformed rows yield `None`.
    pub fn parse(row: &[String]) -> Option<Self> {
        let first = row.first()?.trim();
        if first.is_empty() {
            return None;
        }
        if first == ROUND_MARKER {
            let round = row.get(1)?.trim().parse().ok()?;
            return Some(Self::RoundMarker(round));
        }
        let score = row.get(1)?.trim().parse().ok()?;
        let opened = row
            .get(2)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        Some(Self::Player {
            player: first.to_string(),
            score,
            opened,
        })
    }

    pub fn marker_row(round: u8) -> Vec<String> {
        vec![ROUND_MARKER.to_string(), round.to_string()]
    }

    pub fn player_row(score: &PlayerScore) -> Vec<String> {
        vec![
            score.player.clone(),
            score.score.to_string(),
            score.opened.to_string(),
            score.closed.to_string(),
        ]
    }
}

/// Sort key: higher score first, then roster position, then name.
fn rank_key<'a>(roster: &[String], player: &'a str, score: u32) -> (std::cmp::Reverse<u32>, usize, &'a str) {
    let seat = roster
        .iter()
        .position(|p| p == player)
        .unwrap_or(usize::MAX);
    (std::cmp::Reverse(score), seat, player)
}

pub fn rank_scores(scores: &mut [PlayerScore], roster: &[String]) {
    scores.sort_by(|a, b| {
        rank_key(roster, &a.player, a.score).cmp(&rank_key(roster, &b.player, b.score))
    });
}

/// Sum every player row in the log and rank the totals.
pub fn final_totals(rows: &[ResultRow], roster: &[String]) -> Vec<PlayerTotal> {
    let mut totals: HashMap<&str, PlayerTotal> = HashMap::new();
    for row in rows {
        if let ResultRow::Player {
            player,
            score,
            opened,
        } = row
        {
            let entry = totals.entry(player.as_str()).or_insert_with(|| PlayerTotal {
                player: player.clone(),
                score: 0,
                opened: 0,
            });
            // Log rows are hand-editable; a huge value must not overflow.
            entry.score = entry.score.saturating_add(*score);
            entry.opened = entry.opened.saturating_add(*opened);
        }
    }
    let mut ranked: Vec<PlayerTotal> = totals.into_values().collect();
    ranked.sort_by(|a, b| {
        rank_key(roster, &a.player, a.score).cmp(&rank_key(roster, &b.player, b.score))
    });
    ranked
}
