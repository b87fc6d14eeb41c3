//! SQLite record source
//!
//! Durable backend for deployments that want the dataset queryable outside
//! the service. Populated from a [`LeagueDataset`] via [`SqliteSource::import_dataset`];
//! queries are built at runtime so the crate compiles without a database on
//! hand. Must return the same results as the in-memory source for every
//! trait method.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::info;

use crate::error::Result;
use crate::query::{PlayerTotals, RecordSource, StatFilter, StatOrder, Window};
use crate::types::{AwardRecord, LeagueDataset, PlayerId, PlayerRef, StatRecord, TeamRecord, Year};

const STAT_COLUMNS: &str = "player_id, player, year, age, position, fpts, fpg, team_code, champion";
const AWARD_COLUMNS: &str = "award, year, winner, team_code";
const TEAM_COLUMNS: &str =
    "id, team, abbreviation, owner, wins, losses, fpf, championships, finals";

/// Record source backed by a SQLite database
pub struct SqliteSource {
    pool: SqlitePool,
}

impl SqliteSource {
    /// Open (creating if missing) the database at `url` and ensure the
    /// schema exists
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().max_connections(5).connect_with(options).await?;

        let source = Self { pool };
        source.init_schema().await?;
        Ok(source)
    }

    /// Wrap an existing pool. The schema is still created if missing.
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        let source = Self { pool };
        source.init_schema().await?;
        Ok(source)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS player_stats (
                player_id TEXT NOT NULL,
                player TEXT NOT NULL,
                year INTEGER NOT NULL,
                age INTEGER,
                position TEXT NOT NULL,
                fpts REAL NOT NULL,
                fpg REAL NOT NULL,
                team_code TEXT NOT NULL,
                champion INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_player_stats_player_id
             ON player_stats (player_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_player_stats_year ON player_stats (year)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS awards (
                award TEXT NOT NULL,
                year INTEGER NOT NULL,
                winner TEXT NOT NULL,
                team_code TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_awards_winner_year ON awards (winner, year)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS team_stats (
                id INTEGER PRIMARY KEY,
                team TEXT NOT NULL,
                abbreviation TEXT NOT NULL,
                owner TEXT NOT NULL,
                wins INTEGER NOT NULL,
                losses INTEGER NOT NULL,
                fpf REAL NOT NULL,
                championships INTEGER NOT NULL,
                finals INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replace the database contents with `dataset`, atomically. Rejects
    /// datasets that fail [`LeagueDataset::validate`] before touching the
    /// database.
    pub async fn import_dataset(&self, dataset: &LeagueDataset) -> Result<()> {
        dataset.validate()?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM player_stats").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM awards").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM team_stats").execute(&mut *tx).await?;

        for record in &dataset.stats {
            sqlx::query(
                "INSERT INTO player_stats
                 (player_id, player, year, age, position, fpts, fpg, team_code, champion)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&record.player_id)
            .bind(&record.player)
            .bind(record.year)
            .bind(record.age.map(|age| age as i64))
            .bind(&record.position)
            .bind(record.fpts)
            .bind(record.fpg)
            .bind(&record.team_code)
            .bind(record.champion)
            .execute(&mut *tx)
            .await?;
        }

        for award in &dataset.awards {
            sqlx::query(
                "INSERT INTO awards (award, year, winner, team_code) VALUES (?, ?, ?, ?)",
            )
            .bind(&award.award)
            .bind(award.year)
            .bind(&award.winner)
            .bind(&award.team_code)
            .execute(&mut *tx)
            .await?;
        }

        for team in &dataset.teams {
            sqlx::query(
                "INSERT INTO team_stats
                 (id, team, abbreviation, owner, wins, losses, fpf, championships, finals)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(team.id as i64)
            .bind(&team.team)
            .bind(&team.abbreviation)
            .bind(&team.owner)
            .bind(team.wins)
            .bind(team.losses)
            .bind(team.fpf)
            .bind(team.championships)
            .bind(team.finals)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            stats = dataset.stats.len(),
            awards = dataset.awards.len(),
            teams = dataset.teams.len(),
            "Imported league dataset into SQLite"
        );

        Ok(())
    }
}

/// Append WHERE clauses for every populated filter field
fn push_stat_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &StatFilter) {
    builder.push(" WHERE 1 = 1");

    if let Some(floor) = filter.min_fpts_exclusive {
        builder.push(" AND fpts > ");
        builder.push_bind(floor);
    }
    if let Some(term) = &filter.position_term {
        builder.push(" AND instr(upper(position), upper(");
        builder.push_bind(term.clone());
        builder.push(")) > 0");
    }
    if let Some(term) = &filter.name_term {
        builder.push(" AND instr(upper(player), upper(");
        builder.push_bind(term.clone());
        builder.push(")) > 0");
    }
    if let Some(codes) = &filter.team_codes {
        if codes.is_empty() {
            // IN () is invalid SQL; an empty list matches nothing
            builder.push(" AND 0 = 1");
        } else {
            builder.push(" AND team_code IN (");
            let mut separated = builder.separated(", ");
            for code in codes {
                separated.push_bind(code.clone());
            }
            separated.push_unseparated(")");
        }
    }
    if let Some(year) = filter.year {
        builder.push(" AND year = ");
        builder.push_bind(year);
    }
    if filter.champions_only {
        builder.push(" AND champion = 1");
    }
}

fn push_window(builder: &mut QueryBuilder<'_, Sqlite>, window: Option<Window>) {
    if let Some(window) = window {
        // SQLite binds are i64; a skip beyond i64::MAX must stay past the
        // end of the table, not wrap to a negative offset
        builder.push(" LIMIT ");
        builder.push_bind(window.take.min(i64::MAX as u64) as i64);
        builder.push(" OFFSET ");
        builder.push_bind(window.skip.min(i64::MAX as u64) as i64);
    }
}

fn order_clause(order: StatOrder) -> &'static str {
    match order {
        StatOrder::FptsDesc => " ORDER BY fpts DESC, player_id ASC, year ASC",
        StatOrder::YearAsc => " ORDER BY year ASC, fpts DESC, player_id ASC",
        StatOrder::YearDesc => " ORDER BY year DESC, fpts DESC, player_id ASC",
    }
}

fn stat_from_row(row: &SqliteRow) -> Result<StatRecord> {
    Ok(StatRecord {
        player_id: row.try_get("player_id")?,
        player: row.try_get("player")?,
        year: row.try_get("year")?,
        age: row.try_get::<Option<i64>, _>("age")?.map(|age| age as u32),
        position: row.try_get("position")?,
        fpts: row.try_get("fpts")?,
        fpg: row.try_get("fpg")?,
        team_code: row.try_get("team_code")?,
        champion: row.try_get("champion")?,
    })
}

fn award_from_row(row: &SqliteRow) -> Result<AwardRecord> {
    Ok(AwardRecord {
        award: row.try_get("award")?,
        year: row.try_get("year")?,
        winner: row.try_get("winner")?,
        team_code: row.try_get("team_code")?,
    })
}

fn team_from_row(row: &SqliteRow) -> Result<TeamRecord> {
    Ok(TeamRecord {
        id: row.try_get::<i64, _>("id")? as u32,
        team: row.try_get("team")?,
        abbreviation: row.try_get("abbreviation")?,
        owner: row.try_get("owner")?,
        wins: row.try_get("wins")?,
        losses: row.try_get("losses")?,
        fpf: row.try_get("fpf")?,
        championships: row.try_get("championships")?,
        finals: row.try_get("finals")?,
    })
}

#[async_trait]
impl RecordSource for SqliteSource {
    async fn count_stats(&self, filter: &StatFilter) -> Result<u64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) AS count FROM player_stats");
        push_stat_filter(&mut builder, filter);

        let row = builder.build().fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>("count")? as u64)
    }

    async fn count_players(&self, filter: &StatFilter) -> Result<u64> {
        let mut builder =
            QueryBuilder::new("SELECT COUNT(DISTINCT player_id) AS count FROM player_stats");
        push_stat_filter(&mut builder, filter);

        let row = builder.build().fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>("count")? as u64)
    }

    async fn player_totals(
        &self,
        filter: &StatFilter,
        window: Option<Window>,
    ) -> Result<Vec<PlayerTotals>> {
        let mut builder = QueryBuilder::new(
            "SELECT player_id, SUM(fpts) AS total_fpts, AVG(fpg) AS average_fpg
             FROM player_stats",
        );
        push_stat_filter(&mut builder, filter);
        builder.push(" GROUP BY player_id ORDER BY total_fpts DESC, player_id ASC");
        push_window(&mut builder, window);

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| {
                Ok(PlayerTotals {
                    player_id: row.try_get("player_id")?,
                    total_fpts: row.try_get("total_fpts")?,
                    average_fpg: row.try_get("average_fpg")?,
                })
            })
            .collect()
    }

    async fn find_stats(
        &self,
        filter: &StatFilter,
        order: StatOrder,
        window: Option<Window>,
    ) -> Result<Vec<StatRecord>> {
        let mut builder =
            QueryBuilder::new(format!("SELECT {} FROM player_stats", STAT_COLUMNS));
        push_stat_filter(&mut builder, filter);
        builder.push(order_clause(order));
        push_window(&mut builder, window);

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(stat_from_row).collect()
    }

    async fn stats_for_players(
        &self,
        player_ids: &[PlayerId],
        order: StatOrder,
    ) -> Result<Vec<StatRecord>> {
        if player_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::new(format!(
            "SELECT {} FROM player_stats WHERE player_id IN (",
            STAT_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in player_ids {
            separated.push_bind(id.clone());
        }
        separated.push_unseparated(")");
        builder.push(order_clause(order));

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(stat_from_row).collect()
    }

    async fn awards_for_pairs(&self, pairs: &[(PlayerId, Year)]) -> Result<Vec<AwardRecord>> {
        if pairs.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder =
            QueryBuilder::new(format!("SELECT {} FROM awards WHERE ", AWARD_COLUMNS));
        for (i, (winner, year)) in pairs.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder.push("(winner = ");
            builder.push_bind(winner.clone());
            builder.push(" AND year = ");
            builder.push_bind(*year);
            builder.push(")");
        }

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(award_from_row).collect()
    }

    async fn awards_for_winner(&self, winner: &str) -> Result<Vec<AwardRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM awards WHERE winner = ? ORDER BY year ASC, award ASC",
            AWARD_COLUMNS
        ))
        .bind(winner)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(award_from_row).collect()
    }

    async fn awards_by_name(&self, award: &str) -> Result<Vec<AwardRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM awards WHERE lower(award) = lower(?)
             ORDER BY year DESC, winner ASC",
            AWARD_COLUMNS
        ))
        .bind(award)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(award_from_row).collect()
    }

    async fn team_summaries(&self) -> Result<Vec<TeamRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM team_stats ORDER BY wins DESC, id ASC",
            TEAM_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(team_from_row).collect()
    }

    async fn team_summary(&self, id: u32) -> Result<Option<TeamRecord>> {
        let row = sqlx::query(&format!("SELECT {} FROM team_stats WHERE id = ?", TEAM_COLUMNS))
            .bind(id as i64)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(team_from_row).transpose()
    }

    async fn search_players(&self, term: &str, limit: u64) -> Result<Vec<PlayerRef>> {
        // MIN(player) keeps the alphabetically-first spelling per id, the
        // same result the in-memory source produces
        let rows = sqlx::query(
            "SELECT player_id, MIN(player) AS player FROM player_stats
             WHERE instr(upper(player), upper(?)) > 0
             GROUP BY player_id
             ORDER BY player ASC, player_id ASC
             LIMIT ?",
        )
        .bind(term)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(PlayerRef {
                    player_id: row.try_get("player_id")?,
                    player: row.try_get("player")?,
                })
            })
            .collect()
    }
}
