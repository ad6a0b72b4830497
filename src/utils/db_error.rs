//! Classification helpers for SQLx errors.

/// Constraint name SQLite reports for a duplicate alias.
const ALIAS_CONSTRAINT: &str = "url.alias";

/// Returns true if `e` is a unique violation on the `url.alias` column.
///
/// SQLite does not expose constraint names through the driver, so the
/// column is matched in the error message (`UNIQUE constraint failed: url.alias`).
pub fn is_unique_violation_on_alias(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(ALIAS_CONSTRAINT) || db_err.message().contains(ALIAS_CONSTRAINT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation_on_alias(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation_on_alias(&sqlx::Error::PoolTimedOut));
    }
}
