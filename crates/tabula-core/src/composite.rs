//! Multi-column UNIQUE and PRIMARY KEY constraints.

use crate::error::{CompileError, Result};
use crate::types::KeyType;

/// A UNIQUE or PRIMARY KEY constraint spanning two or more columns.
///
/// Single-column constraints belong on the [`Column`](crate::Column) itself,
/// so construction rejects fewer than two column names.
///
/// ```rust
/// use tabula_core::{CompileError, ConstraintComposite};
///
/// assert!(ConstraintComposite::unique(["first", "last"]).is_ok());
/// assert_eq!(
///     ConstraintComposite::unique(["first"]).unwrap_err(),
///     CompileError::InvalidConstraint { columns: 1 },
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintComposite {
    columns: Vec<String>,
    key_type: KeyType,
}

impl ConstraintComposite {
    /// Creates a composite constraint with the given key role.
    ///
    /// `KeyType::None` means UNIQUE. A `KeyType::Foreign` composite can be
    /// built but fails to render.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidConstraint`] when fewer than two column
    /// names are given.
    pub fn new<I, S>(key_type: KeyType, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.len() < 2 {
            return Err(CompileError::InvalidConstraint {
                columns: columns.len(),
            });
        }
        Ok(Self { columns, key_type })
    }

    /// Creates a composite UNIQUE constraint.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidConstraint`] when fewer than two column
    /// names are given.
    pub fn unique<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(KeyType::None, columns)
    }

    /// Creates a composite PRIMARY KEY constraint.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidConstraint`] when fewer than two column
    /// names are given.
    pub fn primary_key<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(KeyType::Primary, columns)
    }

    /// Constrained column names, in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Key role.
    #[must_use]
    pub const fn key_type(&self) -> KeyType {
        self.key_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_column_lists() {
        let empty: [&str; 0] = [];
        assert_eq!(
            ConstraintComposite::unique(empty),
            Err(CompileError::InvalidConstraint { columns: 0 })
        );
        assert_eq!(
            ConstraintComposite::primary_key(["a"]),
            Err(CompileError::InvalidConstraint { columns: 1 })
        );
    }

    #[test]
    fn test_keeps_column_order() {
        let c = ConstraintComposite::primary_key(["b", "a", "c"]).unwrap();
        assert_eq!(c.columns(), ["b", "a", "c"]);
        assert_eq!(c.key_type(), KeyType::Primary);
    }

    #[test]
    fn test_foreign_composite_constructs() {
        let c = ConstraintComposite::new(KeyType::Foreign, ["a", "b"]).unwrap();
        assert_eq!(c.key_type(), KeyType::Foreign);
    }
}
