// ═══════════════════════════════════════════════════════════════════════
// Database — SQLite storage for match results and ELO ratings
//
// Each difficulty preset of the scripted opponent is rated like an
// agent of its own ("ai-easy", "ai-normal", "ai-hard"), so the
// leaderboard shows how agents and presets compare.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::TournamentError;
use crate::runner::MatchResult;
use conquest_engine::{Difficulty, Outcome};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub const STARTING_ELO: f64 = 1500.0;
pub const ELO_K: f64 = 32.0;

pub type DbResult<T> = Result<T, TournamentError>;

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub name: String,
    pub elo: f64,
    pub games: u32,
    pub wins: u32,
    pub ties: u32,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path.
    pub fn new(path: impl AsRef<Path>) -> DbResult<Self> {
        let db = Database { conn: Connection::open(path)? };
        db.create_schema()?;
        Ok(db)
    }

    pub fn in_memory() -> DbResult<Self> {
        let db = Database { conn: Connection::open_in_memory()? };
        db.create_schema()?;
        Ok(db)
    }

    fn create_schema(&self) -> DbResult<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS agents (
                id          INTEGER PRIMARY KEY,
                name        TEXT NOT NULL UNIQUE,
                elo         REAL NOT NULL DEFAULT 1500.0,
                games       INTEGER NOT NULL DEFAULT 0,
                wins        INTEGER NOT NULL DEFAULT 0,
                ties        INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS matches (
                id           INTEGER PRIMARY KEY,
                seed         INTEGER NOT NULL,
                agent_id     INTEGER NOT NULL REFERENCES agents(id),
                opponent_id  INTEGER NOT NULL REFERENCES agents(id),
                difficulty   TEXT NOT NULL,
                outcome      TEXT NOT NULL,
                player_owned INTEGER NOT NULL,
                regions      INTEGER NOT NULL,
                detail       TEXT NOT NULL,
                played_at    TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )?;
        Ok(())
    }

    /// Register an agent (or return the existing ID).
    pub fn register_agent(&self, name: &str) -> DbResult<i64> {
        self.conn
            .execute("INSERT OR IGNORE INTO agents (name) VALUES (?1)", params![name])?;
        let id = self
            .conn
            .query_row("SELECT id FROM agents WHERE name = ?1", params![name], |row| row.get(0))?;
        Ok(id)
    }

    /// Store a finished match, update both sides' stats and ratings.
    /// Returns the new match ID.
    pub fn record_match(&mut self, result: &MatchResult) -> DbResult<i64> {
        let detail = serde_json::to_string(result)?;
        let agent_id = self.register_agent(&result.agent_name)?;
        let opponent_id = self.register_agent(&opponent_name(result.difficulty))?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO matches (seed, agent_id, opponent_id, difficulty, outcome, player_owned, regions, detail)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                result.seed as i64,
                agent_id,
                opponent_id,
                result.difficulty.to_string(),
                result.outcome.to_string(),
                result.player_owned as i64,
                result.region_count as i64,
                detail,
            ],
        )?;
        let match_id = tx.last_insert_rowid();

        let (agent_win, opponent_win, tie) = match result.outcome {
            Outcome::Win => (1, 0, 0),
            Outcome::Loss => (0, 1, 0),
            Outcome::Tie => (0, 0, 1),
        };
        for (id, wins) in [(agent_id, agent_win), (opponent_id, opponent_win)] {
            tx.execute(
                "UPDATE agents SET games = games + 1, wins = wins + ?1, ties = ties + ?2 WHERE id = ?3",
                params![wins, tie, id],
            )?;
        }
        update_elo_in(&tx, agent_id, opponent_id, score(result.outcome), ELO_K)?;
        tx.commit()?;
        Ok(match_id)
    }

    /// Standard two-player ELO update. `score_a` is 1.0 for a win by
    /// `a`, 0.5 for a tie, 0.0 for a loss.
    pub fn update_elo(&self, a: i64, b: i64, score_a: f64, k: f64) -> DbResult<()> {
        update_elo_in(&self.conn, a, b, score_a, k)
    }

    pub fn elo(&self, id: i64) -> DbResult<Option<f64>> {
        elo_in(&self.conn, id)
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    /// All rated names, best first.
    pub fn leaderboard(&self) -> DbResult<Vec<LeaderboardRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, elo, games, wins, ties FROM agents ORDER BY elo DESC, name")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(LeaderboardRow {
                    name: row.get(0)?,
                    elo: row.get(1)?,
                    games: row.get(2)?,
                    wins: row.get(3)?,
                    ties: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn match_count(&self) -> DbResult<u32> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM matches", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// ELO update on any connection, so `record_match` can run it inside
/// its transaction.
fn update_elo_in(conn: &Connection, a: i64, b: i64, score_a: f64, k: f64) -> DbResult<()> {
    let elo_a = elo_in(conn, a)?.unwrap_or(STARTING_ELO);
    let elo_b = elo_in(conn, b)?.unwrap_or(STARTING_ELO);

    let expected_a = 1.0 / (1.0 + 10f64.powf((elo_b - elo_a) / 400.0));
    let delta = k * (score_a - expected_a);

    conn.execute("UPDATE agents SET elo = elo + ?1 WHERE id = ?2", params![delta, a])?;
    conn.execute("UPDATE agents SET elo = elo - ?1 WHERE id = ?2", params![delta, b])?;
    Ok(())
}

fn elo_in(conn: &Connection, id: i64) -> DbResult<Option<f64>> {
    let elo = conn
        .query_row("SELECT elo FROM agents WHERE id = ?1", params![id], |row| row.get(0))
        .optional()?;
    Ok(elo)
}

/// Leaderboard name of the scripted opponent at `difficulty`.
pub fn opponent_name(difficulty: Difficulty) -> String {
    format!("ai-{difficulty}")
}

fn score(outcome: Outcome) -> f64 {
    match outcome {
        Outcome::Win => 1.0,
        Outcome::Tie => 0.5,
        Outcome::Loss => 0.0,
    }
}
