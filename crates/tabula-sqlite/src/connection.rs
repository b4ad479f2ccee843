//! The single connection to an embedded SQLite database.

use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use tabula_core::{
    Column, ColumnInfo, ConstraintComposite, DataType, ForeignKeyRef, TableInfo, render_count,
    render_create_table, render_delete, render_insert, render_select_all, render_update,
};
use tracing::{debug, info};

use crate::error::{DbError, Result};
use crate::sink::{StatementSink, TracingSink};

/// Owns one native SQLite handle for its whole lifetime.
///
/// Every operation compiles its statement with `tabula-core`, offers the
/// text to the connection's [`StatementSink`], then executes it
/// synchronously. Foreign key enforcement is switched on when the connection
/// is opened and stays on.
///
/// The handle is released exactly once, either by [`Connection::close`] or
/// when the connection is dropped. A failure while dropping cannot be
/// returned and is reported through [`StatementSink::release_failed`].
/// After [`Connection::close`], every operation fails with
/// [`DbError::Closed`].
pub struct Connection {
    handle: Option<rusqlite::Connection>,
    path: PathBuf,
    sink: Box<dyn StatementSink + Send>,
}

impl Connection {
    /// Opens (creating if absent) the database at `path`, logging statements
    /// through [`TracingSink`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Open`] when the file cannot be opened or foreign
    /// key enforcement cannot be enabled.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_sink(path, TracingSink)
    }

    /// Opens (creating if absent) the database at `path`, offering every
    /// statement to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Open`] when the file cannot be opened or foreign
    /// key enforcement cannot be enabled.
    pub fn open_with_sink(
        path: impl AsRef<Path>,
        sink: impl StatementSink + Send + 'static,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let open_error = |err: &rusqlite::Error| DbError::Open {
            path: path.clone(),
            message: err.to_string(),
        };

        let handle = rusqlite::Connection::open(&path).map_err(|e| open_error(&e))?;

        let pragma = "PRAGMA foreign_keys = ON;";
        sink.record(pragma);
        handle.execute_batch(pragma).map_err(|e| open_error(&e))?;

        info!(path = %path.display(), "Opened database");
        Ok(Self {
            handle: Some(handle),
            path,
            sink: Box::new(sink),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates a table from its column list and composite constraints.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Compile`] when the description cannot be compiled
    /// and [`DbError::Schema`] when the engine rejects the statement, for
    /// example because the table already exists.
    pub fn create(
        &self,
        table: &str,
        columns: &[Column],
        composites: &[ConstraintComposite],
    ) -> Result<()> {
        let sql = render_create_table(table, columns, composites)?;
        self.execute(&sql, DbError::schema)
    }

    /// Inserts one row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Compile`] for an empty value list and
    /// [`DbError::Statement`] when the engine rejects the row (UNIQUE, NOT
    /// NULL or FOREIGN KEY violations, unknown columns).
    pub fn insert<C, V>(&self, table: &str, values: &[(C, V)]) -> Result<()>
    where
        C: AsRef<str>,
        V: AsRef<str>,
    {
        let sql = render_insert(table, values)?;
        self.exec(&sql)
    }

    /// Updates the rows matching every `(column, value)` condition.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Compile`] when `conditions` or `assignments` is
    /// empty, in which case nothing is executed, and [`DbError::Statement`]
    /// when the engine rejects the statement.
    pub fn update<C, V, WC, WV>(
        &self,
        table: &str,
        assignments: &[(C, V)],
        conditions: &[(WC, WV)],
    ) -> Result<()>
    where
        C: AsRef<str>,
        V: AsRef<str>,
        WC: AsRef<str>,
        WV: AsRef<str>,
    {
        let sql = render_update(table, assignments, conditions)?;
        self.exec(&sql)
    }

    /// Deletes the rows where `column` equals `value`. Rows in other tables
    /// referencing a deleted row are deleted with it.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Statement`] when the engine rejects the statement.
    pub fn remove(&self, table: &str, column: &str, value: &str) -> Result<()> {
        let sql = render_delete(table, column, value);
        self.exec(&sql)
    }

    /// Executes raw SQL, which may contain several statements.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Statement`] carrying the engine diagnostic.
    pub fn exec(&self, sql: &str) -> Result<()> {
        self.execute(sql, DbError::statement)
    }

    /// Reads every row of a table, columns in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Statement`] when the query fails, for example
    /// because the table does not exist.
    pub fn select_all(&self, table: &str) -> Result<Vec<Vec<Value>>> {
        let sql = render_select_all(table);
        self.query(&sql, |row, width| {
            (0..width).map(|i| row.get::<_, Value>(i)).collect()
        })
    }

    /// Counts the rows of a table.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Statement`] when the query fails.
    pub fn count(&self, table: &str) -> Result<i64> {
        let sql = render_count(table);
        let handle = self.handle()?;
        self.sink.record(&sql);
        handle
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| DbError::statement(&sql, &e))
    }

    /// Reads the schema of a table back from the engine, including the
    /// target of every foreign key column.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NoSuchTable`] when the table does not exist and
    /// [`DbError::Statement`] when the query fails.
    pub fn table_info(&self, table: &str) -> Result<TableInfo> {
        let sql = format!("PRAGMA table_info({table});");
        let mut columns = self.query(&sql, |row, _| {
            let declared: String = row.get("type")?;
            Ok(ColumnInfo {
                name: row.get("name")?,
                data_type: DataType::from_declared(&declared),
                nullable: row.get::<_, i64>("notnull")? == 0,
                primary_key: row.get::<_, i64>("pk")? > 0,
                foreign_key: None,
            })
        })?;
        if columns.is_empty() {
            return Err(DbError::NoSuchTable(table.to_string()));
        }

        let sql = format!("PRAGMA foreign_key_list({table});");
        let references = self.query(&sql, |row, _| {
            let from: String = row.get("from")?;
            // NULL when the clause names no parent column.
            let to: Option<String> = row.get("to")?;
            Ok((
                from,
                ForeignKeyRef {
                    table: row.get("table")?,
                    column: to.unwrap_or_default(),
                },
            ))
        })?;
        for (from, target) in references {
            if let Some(column) = columns.iter_mut().find(|c| c.name == from) {
                column.foreign_key = Some(target);
            }
        }

        Ok(TableInfo {
            name: table.to_string(),
            columns,
        })
    }

    /// Whether foreign key enforcement is active.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Statement`] when the pragma cannot be read.
    pub fn foreign_keys_enabled(&self) -> Result<bool> {
        let sql = "PRAGMA foreign_keys;";
        let handle = self.handle()?;
        self.sink.record(sql);
        handle
            .query_row(sql, [], |row| row.get::<_, i64>(0))
            .map(|on| on == 1)
            .map_err(|e| DbError::statement(sql, &e))
    }

    /// Whether a transaction is currently open on this connection.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_autocommit())
    }

    /// Releases the native handle, returning the engine error if closing
    /// fails. Closing an already closed connection does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Close`] when the engine refuses to close. The
    /// handle is released regardless.
    pub fn close(&mut self) -> Result<()> {
        self.release().map_err(|message| DbError::Close { message })
    }

    pub(crate) fn sink(&self) -> &dyn StatementSink {
        self.sink.as_ref()
    }

    fn handle(&self) -> Result<&rusqlite::Connection> {
        self.handle.as_ref().ok_or(DbError::Closed)
    }

    fn execute(&self, sql: &str, wrap: fn(&str, &rusqlite::Error) -> DbError) -> Result<()> {
        let handle = self.handle()?;
        self.sink.record(sql);
        handle.execute_batch(sql).map_err(|e| wrap(sql, &e))
    }

    fn query<T, F>(&self, sql: &str, map: F) -> Result<Vec<T>>
    where
        F: FnMut(&rusqlite::Row<'_>, usize) -> rusqlite::Result<T>,
    {
        let handle = self.handle()?;
        self.sink.record(sql);
        collect_rows(handle, sql, map).map_err(|e| DbError::statement(sql, &e))
    }

    fn release(&mut self) -> std::result::Result<(), String> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        match handle.close() {
            Ok(()) => {
                debug!(path = %self.path.display(), "Closed database");
                Ok(())
            }
            Err((handle, err)) => {
                // Dropping the returned handle would retry the close and panic.
                std::mem::forget(handle);
                Err(err.to_string())
            }
        }
    }
}

fn collect_rows<T, F>(
    handle: &rusqlite::Connection,
    sql: &str,
    mut map: F,
) -> rusqlite::Result<Vec<T>>
where
    F: FnMut(&rusqlite::Row<'_>, usize) -> rusqlite::Result<T>,
{
    let mut stmt = handle.prepare(sql)?;
    let width = stmt.column_count();
    let rows = stmt.query_map([], |row| map(row, width))?;
    rows.collect()
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Err(message) = self.release() {
            self.sink.release_failed(&message);
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("path", &self.path)
            .field("open", &self.handle.is_some())
            .finish_non_exhaustive()
    }
}
