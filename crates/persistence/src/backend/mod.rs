// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific connection plumbing.
//!
//! The voting store runs on `SQLite` (the default, used for development
//! and every test) or MySQL/MariaDB. Each backend module owns the raw
//! SQL that Diesel's DSL cannot express: opening and migrating a
//! database, reading back generated row ids, and proving that foreign
//! key enforcement is on so votes can never outlive the candidate or
//! category they point at.
//!
//! Everything else in this crate is backend-agnostic. The `queries/`
//! and `mutations/` modules are written once against Diesel's DSL and
//! compiled for both connection types.

pub mod mysql;
pub mod sqlite;

use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::error::PersistenceError;

/// The per-backend escape hatch the generic query and mutation code
/// relies on.
///
/// Implemented for [`SqliteConnection`] and [`MysqlConnection`] so a
/// function generic over the connection can still reach the two
/// operations with no portable Diesel spelling.
pub trait PersistenceBackend: Connection {
    /// Returns the generated id of the most recent insert.
    ///
    /// Inserts need their ids for response payloads, and `RETURNING`
    /// support differs between the backends.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Checks that the connection enforces foreign keys.
    ///
    /// Run once at startup. The referential rules on the vote tables
    /// mean nothing on a connection that skips enforcement.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }
}
