use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::UserId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    /// Sum of scores over completed games.
    pub total_score: i32,
    pub games_played: i32,
    /// total_score / games_played, 0 when no game has completed.
    pub average_score: f64,
}

/// One row of the user rankings, ordered by average score.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankEntry {
    pub user_name: String,
    pub total_score: i32,
    pub games_played: i32,
    pub average_score: f64,
}

/// One individual completed-game score, distinct from per-user ranking.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HighScore {
    pub user_name: String,
    pub score: i32,
    pub date: String, // ISO 8601 string
}
