//! Scoped transactions.
//!
//! A [`Transaction`] issues `BEGIN` when created and ends the transaction
//! exactly once: eagerly through [`Transaction::finish`], or when it goes out
//! of scope, including while unwinding from a failed operation.
//!
//! How it ends is decided by its [`ReleasePolicy`]. The default,
//! [`ReleasePolicy::AlwaysCommit`], commits on every exit path, so work done
//! before a failing statement inside the scope is kept. Callers that want a
//! failure to discard the whole unit use [`ReleasePolicy::CommitOnSuccess`]
//! and call [`Transaction::succeeded`] once their work is done.

use std::ops::Deref;

use tracing::{debug, warn};

use crate::connection::Connection;
use crate::error::Result;

/// What a transaction does when it is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleasePolicy {
    /// Issue `COMMIT` unconditionally. There is no `ROLLBACK` path: if the
    /// engine refuses the `COMMIT`, the transaction is left open on the
    /// connection so the caller can repair and retry with
    /// [`Connection::exec`].
    #[default]
    AlwaysCommit,
    /// Issue `COMMIT` if [`Transaction::succeeded`] was called, `ROLLBACK`
    /// otherwise. A refused `COMMIT` is followed by a `ROLLBACK`.
    CommitOnSuccess,
}

/// A `BEGIN` ... `COMMIT` bracket around operations on a borrowed
/// [`Connection`].
///
/// The transaction dereferences to its connection, so operations are issued
/// through it directly:
///
/// ```rust
/// use tabula_core::Column;
/// use tabula_sqlite::{Connection, Transaction};
///
/// # let dir = tempfile::tempdir().unwrap();
/// let conn = Connection::open(dir.path().join("app.db")).unwrap();
/// conn.create("tags", &[Column::default_key("id")], &[]).unwrap();
/// {
///     let tx = Transaction::begin(&conn).unwrap();
///     tx.insert("tags", &[("id", "1")]).unwrap();
///     tx.insert("tags", &[("id", "2")]).unwrap();
/// } // COMMIT
/// assert_eq!(conn.count("tags").unwrap(), 2);
/// ```
#[derive(Debug)]
pub struct Transaction<'c> {
    conn: &'c Connection,
    policy: ReleasePolicy,
    succeeded: bool,
    released: bool,
}

impl<'c> Transaction<'c> {
    /// Begins a transaction that commits unconditionally on release.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Statement`](crate::DbError::Statement) when the
    /// engine refuses `BEGIN`, for example because a transaction is already
    /// open on this connection.
    pub fn begin(conn: &'c Connection) -> Result<Self> {
        Self::begin_with(conn, ReleasePolicy::AlwaysCommit)
    }

    /// Begins a transaction with an explicit release policy.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Statement`](crate::DbError::Statement) when the
    /// engine refuses `BEGIN`.
    pub fn begin_with(conn: &'c Connection, policy: ReleasePolicy) -> Result<Self> {
        conn.exec("BEGIN;")?;
        debug!(?policy, "Transaction started");
        Ok(Self {
            conn,
            policy,
            succeeded: false,
            released: false,
        })
    }

    /// Marks the unit of work as successful. Only meaningful under
    /// [`ReleasePolicy::CommitOnSuccess`].
    pub fn succeeded(&mut self) {
        self.succeeded = true;
    }

    /// The release policy.
    #[must_use]
    pub const fn policy(&self) -> ReleasePolicy {
        self.policy
    }

    /// The statement release will issue, given the current state.
    #[must_use]
    pub const fn release_statement(&self) -> &'static str {
        match (self.policy, self.succeeded) {
            (ReleasePolicy::AlwaysCommit, _) | (ReleasePolicy::CommitOnSuccess, true) => {
                "COMMIT;"
            }
            (ReleasePolicy::CommitOnSuccess, false) => "ROLLBACK;",
        }
    }

    /// Ends the transaction now, returning any error from doing so.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Statement`](crate::DbError::Statement) when the
    /// engine refuses to commit or roll back.
    pub fn finish(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let statement = self.release_statement();
        let result = self.conn.exec(statement);
        match (&result, self.conn.in_transaction()) {
            (Ok(()), _) => debug!(statement, "Transaction released"),
            (Err(_), true) if self.policy == ReleasePolicy::CommitOnSuccess => {
                warn!(statement, "Release refused, rolling back");
                if let Err(e) = self.conn.exec("ROLLBACK;") {
                    self.conn.sink().release_failed(&e.to_string());
                }
            }
            (Err(_), true) => warn!(statement, "Release refused, transaction left open"),
            (Err(_), false) => {}
        }
        result
    }
}

impl Deref for Transaction<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.conn
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            self.conn.sink().release_failed(&e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_statement_by_policy() {
        let dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(dir.path().join("t.db")).unwrap();

        let tx = Transaction::begin(&conn).unwrap();
        assert_eq!(tx.release_statement(), "COMMIT;");
        tx.finish().unwrap();

        let mut tx = Transaction::begin_with(&conn, ReleasePolicy::CommitOnSuccess).unwrap();
        assert_eq!(tx.release_statement(), "ROLLBACK;");
        tx.succeeded();
        assert_eq!(tx.release_statement(), "COMMIT;");
        tx.finish().unwrap();

        assert!(!conn.in_transaction());
    }

    #[test]
    fn test_nested_begin_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(dir.path().join("t.db")).unwrap();
        let _outer = Transaction::begin(&conn).unwrap();
        assert!(Transaction::begin(&conn).is_err());
        assert!(conn.in_transaction());
    }
}
