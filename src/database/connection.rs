use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};

use crate::errors::{AppError, Result};

/// Broad classification of a driver failure, derived from the error text the
/// driver surfaces. The driver does not expose a stable error taxonomy for
/// these cases, so substring matching is the practical option.
#[derive(Debug, PartialEq, Eq)]
pub enum DbErrorKind {
    AuthFailed,
    Timeout,
    Unreachable,
    Other,
}

pub fn classify_message(message: &str) -> DbErrorKind {
    let lower = message.to_lowercase();
    if lower.contains("authentication") || lower.contains("scram") {
        DbErrorKind::AuthFailed
    } else if lower.contains("timed out") || lower.contains("timeout") {
        DbErrorKind::Timeout
    } else if lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("no servers")
        || lower.contains("server selection")
    {
        DbErrorKind::Unreachable
    } else {
        DbErrorKind::Other
    }
}

fn clarify(err: mongodb::error::Error) -> AppError {
    let message = err.to_string();
    match classify_message(&message) {
        DbErrorKind::AuthFailed => AppError::configuration(format!(
            "MongoDB authentication failed, check DATABASE_URL credentials: {}",
            message
        )),
        DbErrorKind::Timeout => AppError::ServiceUnavailable(format!(
            "MongoDB connection timed out: {}",
            message
        )),
        DbErrorKind::Unreachable => AppError::ServiceUnavailable(format!(
            "MongoDB is unreachable: {}",
            message
        )),
        DbErrorKind::Other => AppError::MongoDB(err),
    }
}

pub async fn get_db_client(database_url: &str, database_name: &str) -> Result<Database> {
    let client = Client::with_uri_str(database_url).await.map_err(clarify)?;
    let db = client.database(database_name);

    // Fail fast on bad credentials or an unreachable cluster instead of at the
    // first request.
    db.run_command(doc! { "ping": 1 }).await.map_err(clarify)?;

    match db.list_collection_names().await {
        Ok(collections) => {
            tracing::info!("Connected to database: {}", database_name);
            tracing::debug!("Collections found: {:?}", collections);
        }
        Err(e) => {
            tracing::warn!("Could not list collections in {}: {}", database_name, e);
        }
    }

    Ok(db)
}

/// Declares the unique indexes the data model relies on: team names and
/// settings keys. Everything else is an opaque generated id.
pub async fn ensure_indexes(db: &Database) -> Result<()> {
    let unique = IndexOptions::builder().unique(true).build();

    let team_name = IndexModel::builder()
        .keys(doc! { "name": 1 })
        .options(unique.clone())
        .build();
    db.collection::<mongodb::bson::Document>("teams")
        .create_index(team_name)
        .await?;

    let settings_key = IndexModel::builder()
        .keys(doc! { "key": 1 })
        .options(unique)
        .build();
    db.collection::<mongodb::bson::Document>("settings")
        .create_index(settings_key)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_classified() {
        assert_eq!(
            classify_message("SCRAM failure: Authentication failed"),
            DbErrorKind::AuthFailed
        );
    }

    #[test]
    fn timeouts_classified() {
        assert_eq!(
            classify_message("operation timed out after 30s"),
            DbErrorKind::Timeout
        );
    }

    #[test]
    fn unreachable_classified() {
        assert_eq!(
            classify_message("Server selection timeout: no servers available"),
            DbErrorKind::Timeout,
        );
        assert_eq!(
            classify_message("connection refused (os error 111)"),
            DbErrorKind::Unreachable
        );
    }

    #[test]
    fn unknown_errors_pass_through() {
        assert_eq!(classify_message("E11000 duplicate key"), DbErrorKind::Other);
    }
}
