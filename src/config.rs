use log::Level;

use crate::state::ViewportConfig;

const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Build-time configuration. Values come from `EMBROIDERY_API_URL` and `EMBROIDERY_LOG`
/// at compile time since the wasm bundle has no process environment.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub log_level: Level,
    pub viewport: ViewportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            log_level: Level::Info,
            viewport: ViewportConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("EMBROIDERY_API_URL"), option_env!("EMBROIDERY_LOG"))
    }

    pub fn from_values(api_base: Option<&str>, log_level: Option<&str>) -> Self {
        let mut cfg = Self::default();
        if let Some(base) = api_base.map(str::trim).filter(|b| !b.is_empty()) {
            cfg.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(level) = log_level.and_then(|l| l.trim().parse::<Level>().ok()) {
            cfg.log_level = level;
        }
        cfg
    }
}

/// Progress socket address: the API base with `http`→`ws` / `https`→`wss`.
pub fn ws_url(api_base: &str, client_id: &str) -> String {
    let base = api_base.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        base.to_string()
    };
    format!("{}/ws/{}", ws_base, client_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let cfg = AppConfig::from_values(None, None);
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_values(Some(" https://api.example.com/ "), Some("debug"));
        assert_eq!(cfg.api_base, "https://api.example.com");
        assert_eq!(cfg.log_level, Level::Debug);
        let cfg = AppConfig::from_values(Some(""), Some("loud"));
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.log_level, Level::Info);
    }

    #[test]
    fn ws_scheme_follows_http_scheme() {
        assert_eq!(ws_url("http://localhost:8000", "abc"), "ws://localhost:8000/ws/abc");
        assert_eq!(ws_url("https://api.example.com/", "abc"), "wss://api.example.com/ws/abc");
        assert_eq!(ws_url("ws://already", "x"), "ws://already/ws/x");
    }
}
