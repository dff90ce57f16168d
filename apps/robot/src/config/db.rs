use crate::config::{must_var, var_or};
use crate::error::AppError;

/// Which database the connection URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    Prod,
    /// Enforces the `_test` suffix on the database name.
    Test,
}

/// Builds a Postgres URL from environment variables for the given profile.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    let host = var_or("POSTGRES_HOST", "localhost");
    let port = var_or("POSTGRES_PORT", "5432");
    let db_name = db_name(profile)?;
    let username = must_var("APP_DB_USER")?;
    let password = must_var("APP_DB_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn db_name(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("PROD_DB"),
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

/// Masks the password of a connection URL for logging.
pub fn redact_db_url(url: &str) -> String {
    let Some((auth, host)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    let user_start = auth.find("://").map_or(0, |i| i + 3);
    match auth[user_start..].rfind(':') {
        Some(pos) => format!("{}:***@{host}", &auth[..user_start + pos]),
        None => url.to_string(),
    }
}
