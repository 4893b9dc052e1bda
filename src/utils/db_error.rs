//! Classification of PostgreSQL constraint violations.

/// Partial unique index over `links.code` for rows with `deleted_at IS NULL`.
pub const ACTIVE_CODE_CONSTRAINT: &str = "links_active_code_key";

/// Unique constraint over `users.email`.
pub const USER_EMAIL_CONSTRAINT: &str = "users_email_key";

/// Returns true if `e` is a unique violation on the named constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}

/// Returns true if `e` is a unique violation on the active short code index.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    is_unique_violation_on(e, ACTIVE_CODE_CONSTRAINT)
}

/// Returns true if `e` is a unique violation on the user email.
pub fn is_unique_violation_on_email(e: &sqlx::Error) -> bool {
    is_unique_violation_on(e, USER_EMAIL_CONSTRAINT)
}
