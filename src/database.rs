use chrono::Utc;
use rusqlite::{Connection, params};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{Draw, GeneratedSet, Number, Ticket};

/// Append-only log of generated sets.
pub trait SetLog {
    /// Stores a new set and returns it with its assigned id.
    fn append(&mut self, ticket: &Ticket, matched_contest: Option<u32>) -> Result<GeneratedSet>;

    /// Every stored set, oldest first.
    fn get_all(&self) -> Result<Vec<GeneratedSet>>;

    fn clear(&mut self) -> Result<()>;
}

/// The last `n` sets of `log`, most recent first.
pub fn recent<L: SetLog + ?Sized>(log: &L, n: usize) -> Result<Vec<GeneratedSet>> {
    let all = log.get_all()?;
    Ok(all.into_iter().rev().take(n).collect())
}

/// In-memory log, ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryLog {
    sets: Vec<GeneratedSet>,
    next_id: i64,
}

impl SetLog for MemoryLog {
    fn append(&mut self, ticket: &Ticket, matched_contest: Option<u32>) -> Result<GeneratedSet> {
        self.next_id += 1;
        let set = GeneratedSet {
            id: self.next_id,
            ticket: *ticket,
            matched_contest,
            created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        self.sets.push(set.clone());
        Ok(set)
    }

    fn get_all(&self) -> Result<Vec<GeneratedSet>> {
        Ok(self.sets.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.sets.clear();
        Ok(())
    }
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS generated_sets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            numbers TEXT NOT NULL,
            matched_contest INTEGER,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS draws (
            contest_id INTEGER PRIMARY KEY,
            draw_date TEXT NOT NULL,
            numbers TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// SQLite-backed set log plus the cache of fetched draws.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        ensure_parent_dir(path)?;
        let conn = Connection::open(path)?;
        info!("opened store at {}", path.display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        create_tables(&conn)?;
        Ok(Self { conn })
    }

    /// Replaces the cached copy of each draw.
    pub fn save_draws(&mut self, draws: &[Draw]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO draws (contest_id, draw_date, numbers) VALUES (?1, ?2, ?3)",
            )?;
            for draw in draws {
                let numbers = draw
                    .numbers
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                stmt.execute(params![
                    draw.contest_id,
                    draw.date.format("%Y-%m-%d").to_string(),
                    numbers,
                ])?;
            }
        }
        tx.commit()?;
        debug!("cached {} draws", draws.len());
        Ok(())
    }

    /// Cached draws in ascending contest order.
    pub fn load_draws(&self) -> Result<Vec<Draw>> {
        let mut stmt = self
            .conn
            .prepare("SELECT contest_id, draw_date, numbers FROM draws ORDER BY contest_id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(contest_id, date, numbers)| decode_draw(contest_id, &date, &numbers))
            .collect()
    }

    pub fn count_draws(&self) -> Result<u32> {
        let count: u32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn decode_draw(contest_id: u32, date: &str, numbers: &str) -> Result<Draw> {
    let bad = || Error::DataFormat(format!("cached contest {} is corrupt", contest_id));
    let date = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| bad())?;
    let numbers = numbers
        .split(',')
        .map(|t| Number::parse(t).ok_or_else(bad))
        .collect::<Result<Vec<_>>>()?;
    let numbers: [Number; 6] = numbers.try_into().map_err(|_| bad())?;
    Draw::new(contest_id, date, numbers)
}

impl SetLog for SqliteStore {
    fn append(&mut self, ticket: &Ticket, matched_contest: Option<u32>) -> Result<GeneratedSet> {
        self.conn.execute(
            "INSERT INTO generated_sets (numbers, matched_contest) VALUES (?1, ?2)",
            params![ticket.to_string(), matched_contest],
        )?;
        let id = self.conn.last_insert_rowid();
        let created_at: String = self.conn.query_row(
            "SELECT created_at FROM generated_sets WHERE id = ?1",
            [id],
            |row| row.get(0),
        )?;

        Ok(GeneratedSet {
            id,
            ticket: *ticket,
            matched_contest,
            created_at,
        })
    }

    fn get_all(&self) -> Result<Vec<GeneratedSet>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, numbers, matched_contest, created_at FROM generated_sets ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<u32>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(id, numbers, matched_contest, created_at)| {
                Ok(GeneratedSet {
                    id,
                    ticket: numbers.parse()?,
                    matched_contest,
                    created_at,
                })
            })
            .collect()
    }

    fn clear(&mut self) -> Result<()> {
        let removed = self.conn.execute("DELETE FROM generated_sets", [])?;
        info!("cleared {} generated sets", removed);
        Ok(())
    }
}
