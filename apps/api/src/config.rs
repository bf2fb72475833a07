use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    /// Lowercased emails allowed into the admin routes.
    pub admin_emails: Vec<String>,
    /// Minimum spacing between outbound AI completion calls.
    pub ai_min_interval_ms: u64,
    pub rate_limit_window_secs: u64,
    pub rate_limit_max_requests: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            session_secret: require_env("SESSION_SECRET")?,
            session_ttl_hours: parse_env("SESSION_TTL_HOURS", 24 * 7)?,
            admin_emails: parse_email_list(&std::env::var("ADMIN_EMAILS").unwrap_or_default()),
            ai_min_interval_ms: parse_env("AI_MIN_INTERVAL_MS", 1000)?,
            rate_limit_window_secs: parse_env("RATE_LIMIT_WINDOW_SECS", 60)?,
            rate_limit_max_requests: parse_env("RATE_LIMIT_MAX_REQUESTS", 60)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn is_admin(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|a| *a == email)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated allowlist, dropping blanks and normalising case.
pub fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/test".to_string(),
        anthropic_api_key: "test-key".to_string(),
        session_secret: "test-secret-test-secret".to_string(),
        session_ttl_hours: 1,
        admin_emails: vec!["admin@example.com".to_string()],
        ai_min_interval_ms: 0,
        rate_limit_window_secs: 60,
        rate_limit_max_requests: 60,
        port: 8080,
        rust_log: "info".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_list_trims_and_lowercases() {
        let list = parse_email_list(" Admin@Example.com, ,ops@example.com ");
        assert_eq!(list, vec!["admin@example.com", "ops@example.com"]);
    }

    #[test]
    fn test_parse_email_list_empty() {
        assert!(parse_email_list("").is_empty());
    }

    #[test]
    fn test_is_admin_case_insensitive() {
        let config = test_config();
        assert!(config.is_admin("ADMIN@example.com"));
        assert!(!config.is_admin("user@example.com"));
    }
}
