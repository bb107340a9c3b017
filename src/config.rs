use anyhow::Context;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_RECOMMENDATION_TTL_DAYS: i64 = 7;
pub const MAX_RECOMMENDATION_TTL_DAYS: i64 = 365;

/// Settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Absent means results are not persisted.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub recommendation_ttl_days: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let recommendation_ttl_days = match lookup("RECOMMENDATION_TTL_DAYS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .context("RECOMMENDATION_TTL_DAYS must be an integer number of days")?,
            None => DEFAULT_RECOMMENDATION_TTL_DAYS,
        };

        anyhow::ensure!(max_connections > 0, "DATABASE_MAX_CONNECTIONS must be at least 1");
        anyhow::ensure!(
            (1..=MAX_RECOMMENDATION_TTL_DAYS).contains(&recommendation_ttl_days),
            "RECOMMENDATION_TTL_DAYS must be between 1 and {MAX_RECOMMENDATION_TTL_DAYS}"
        );

        Ok(Self {
            database_url,
            max_connections,
            recommendation_ttl_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.recommendation_ttl_days, 7);
    }

    #[test]
    fn values_are_read_from_environment() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/pcos"),
            ("DATABASE_MAX_CONNECTIONS", "10"),
            ("RECOMMENDATION_TTL_DAYS", "14"),
        ]))
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/pcos"));
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.recommendation_ttl_days, 14);
    }

    #[test]
    fn bad_numbers_are_startup_errors() {
        assert!(AppConfig::from_lookup(lookup(&[("RECOMMENDATION_TTL_DAYS", "week")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("DATABASE_MAX_CONNECTIONS", "0")])).is_err());
    }

    #[test]
    fn ttl_is_bounded() {
        assert!(AppConfig::from_lookup(lookup(&[("RECOMMENDATION_TTL_DAYS", "1000000000")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("RECOMMENDATION_TTL_DAYS", "366")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("RECOMMENDATION_TTL_DAYS", "-3")])).is_err());
        let config = AppConfig::from_lookup(lookup(&[("RECOMMENDATION_TTL_DAYS", "365")])).unwrap();
        assert_eq!(config.recommendation_ttl_days, MAX_RECOMMENDATION_TTL_DAYS);
    }

    #[test]
    fn blank_database_url_disables_persistence() {
        let config = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.database_url, None);
    }
}
