use leaderboard::{DEFAULT_PAGE_SIZE, SortOrder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// Set to "json" for JSON logs, anything else for human-readable.
    #[serde(default)]
    pub log_format: String,
}

impl Config {
    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".into()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> Config {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>();
        envy::prefixed("LEADERBOARD_").from_iter(vars).unwrap()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = load(&[]);

        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.sort_order, SortOrder::Ascending);
        assert!(!config.json_logs());
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = load(&[
            ("LEADERBOARD_REDIS_URL", "redis://cache:6380/2"),
            ("LEADERBOARD_PAGE_SIZE", "20"),
            ("LEADERBOARD_SORT_ORDER", "descending"),
            ("LEADERBOARD_LOG_FORMAT", "json"),
            ("LEADERBOARD_NAME", "ignored-here"),
        ]);

        assert_eq!(config.redis_url, "redis://cache:6380/2");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.sort_order, SortOrder::Descending);
        assert!(config.json_logs());
    }

    #[test]
    fn sort_order_accepts_the_short_names_the_flag_takes() {
        assert_eq!(
            load(&[("LEADERBOARD_SORT_ORDER", "desc")]).sort_order,
            SortOrder::Descending
        );
        assert_eq!(
            load(&[("LEADERBOARD_SORT_ORDER", "asc")]).sort_order,
            SortOrder::Ascending
        );
    }
}
