use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        api_url: get_env_or_default("PRECEDENT_API_URL", DEFAULT_API_URL),
        request_timeout: get_env("PRECEDENT_TIMEOUT_SECS").and_then(|raw| parse_timeout(&raw)),
        faithful: get_env("PRECEDENT_FAITHFUL").is_some_and(|raw| parse_flag(&raw)),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the search backend, without the `/search` path.
    pub api_url: String,
    /// No timeout when unset.
    pub request_timeout: Option<Duration>,
    pub faithful: bool,
}

fn get_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    get_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_timeout(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(e) => {
            log::warn!("ignoring invalid PRECEDENT_TIMEOUT_SECS={raw:?}: {e}");
            None
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[test]
fn test_parse_timeout() {
    assert_eq!(parse_timeout("30"), Some(Duration::from_secs(30)));
    assert_eq!(parse_timeout(" 5 "), Some(Duration::from_secs(5)));
    assert_eq!(parse_timeout("0"), None);
    assert_eq!(parse_timeout("soon"), None);
    assert_eq!(parse_timeout("-1"), None);
}

#[test]
fn test_parse_flag() {
    assert!(parse_flag("1"));
    assert!(parse_flag("TRUE"));
    assert!(parse_flag(" on"));
    assert!(!parse_flag("0"));
    assert!(!parse_flag("false"));
    assert!(!parse_flag("nope"));
}
