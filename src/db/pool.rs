//! Database connection pool and migrations

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Create a new database connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect(database_url)
        .await
}

/// Split SQL into statements, keeping `$$` delimited bodies intact
fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_dollar_block = false;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);

        if c == '$' && chars.peek() == Some(&'$') {
            if let Some(next) = chars.next() {
                current.push(next);
            }
            in_dollar_block = !in_dollar_block;
        } else if c == ';' && !in_dollar_block {
            if has_sql_content(&current) {
                statements.push(current.trim().to_string());
            }
            current.clear();
        }
    }

    if has_sql_content(&current) {
        statements.push(current.trim().to_string());
    }

    statements
}

/// Whether the text holds anything besides whitespace and `--` comments
fn has_sql_content(s: &str) -> bool {
    s.lines().any(|line| {
        let trimmed = line.trim();
        !trimmed.is_empty() && !trimmed.starts_with("--")
    })
}

/// Run the embedded migration.
///
/// Every statement is idempotent, so failures are logged and skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    let migration_sql = include_str!("migrations/001_initial.sql");

    for statement in split_sql_statements(migration_sql) {
        if let Err(e) = sqlx::query(&statement).execute(pool).await {
            tracing::warn!("Migration statement failed (possibly already applied): {}", e);
        }
    }

    tracing::info!("Database migrations completed");
    Ok(())
}

/// Drop rate limit attempts older than a day
pub async fn prune_rate_limits(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT prune_rate_limit_attempts()")
        .execute(pool)
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_statements() {
        let sql = "CREATE TABLE a (id INT);\nCREATE TABLE b (id INT);";
        let statements = split_sql_statements(sql);
        assert_eq!(
            statements,
            vec!["CREATE TABLE a (id INT);", "CREATE TABLE b (id INT);"]
        );
    }

    #[test]
    fn test_split_keeps_dollar_blocks_whole() {
        let sql = "DO $$\nBEGIN\n  SELECT 1;\n  SELECT 2;\nEND\n$$;\nSELECT 3;";
        let statements = split_sql_statements(sql);
        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("DO $$"));
        assert!(statements[0].contains("SELECT 2;"));
        assert_eq!(statements[1], "SELECT 3;");
    }

    #[test]
    fn test_split_skips_comment_only_chunks() {
        let sql = "-- header\nSELECT 1;\n-- trailing comment\n";
        let statements = split_sql_statements(sql);
        assert_eq!(statements.len(), 1);
        assert!(statements[0].ends_with("SELECT 1;"));
    }

    #[test]
    fn test_embedded_migration_splits() {
        let statements = split_sql_statements(include_str!("migrations/001_initial.sql"));
        assert!(statements.iter().any(|s| s.contains("CREATE TABLE IF NOT EXISTS contacts")));
        assert!(statements
            .iter()
            .any(|s| s.contains("CREATE OR REPLACE FUNCTION prune_rate_limit_attempts")
                && s.contains("LANGUAGE plpgsql")));
        assert!(statements
            .iter()
            .any(|s| s.starts_with("DO $$") && s.contains("CREATE TYPE contact_status")));
    }
}
