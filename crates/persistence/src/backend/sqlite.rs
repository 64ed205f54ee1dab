// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup.
//!
//! Everything here is raw-SQL territory that Diesel's DSL does not
//! cover: PRAGMA statements, `last_insert_rowid()`, and migration
//! execution. The ballot tables lean on `ON DELETE RESTRICT` foreign
//! keys, and `SQLite` ships with enforcement switched off, so every
//! connection turns it on and then proves it stuck.
//!
//! Domain queries and mutations stay out of this module; they live in
//! `queries/` and `mutations/` and run unchanged on either backend.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

/// Embedded `SQLite` migration set, kept in lockstep with
/// `migrations_mysql/`.
pub const SQLITE_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Row shape for the `PRAGMA foreign_keys` probe.
#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Returns the rowid of the most recent insert on this connection.
///
/// Vote, candidate, and session inserts need their generated ids for
/// response payloads, and `SQLite` does not support `RETURNING` on all
/// the insert forms Diesel emits, so this falls back to
/// `last_insert_rowid()`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    let row_id: i64 = diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?;
    Ok(row_id)
}

/// Checks that this connection enforces foreign keys.
///
/// Without enforcement, deleting a category or candidate would orphan
/// the votes that reference it instead of failing with a referential
/// error.
///
/// # Errors
///
/// Returns [`PersistenceError::ForeignKeyEnforcementNotEnabled`] if the
/// pragma reads back as off, or a query error if the probe itself fails.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;

    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    info!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Opens a `SQLite` database, enables foreign keys, and applies any
/// pending migrations.
///
/// # Arguments
///
/// * `database_url` - A file path or an in-memory URL
///
/// # Errors
///
/// Returns an error if the connection cannot be established, the pragma
/// fails, or a migration fails to apply.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Opening SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // Enforcement is per-connection in SQLite and defaults to off.
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

    let applied = conn
        .run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    info!("Applied {} pending SQLite migrations", applied.len());

    Ok(conn)
}

/// Applies the pragmas a file-backed database wants that an in-memory
/// one does not.
///
/// WAL mode keeps readers unblocked during result tallies, and the busy
/// timeout covers the maintenance subcommands, which open the same file
/// while the server holds its own connection.
///
/// # Errors
///
/// Returns an error if either pragma fails.
pub fn configure_file_database(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    diesel::sql_query("PRAGMA busy_timeout = 5000")
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}
