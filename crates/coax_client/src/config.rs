use coax_common::endpoints;
use serde::Deserialize;

/// Where the panel finds its backend.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    /// Origin the REST endpoints are resolved against.
    pub base_url: String,
    /// Live status feed.
    pub ws_url: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::for_location("http://localhost:8080", "localhost")
    }
}

impl PanelConfig {
    /// REST on the page's own origin, the live feed on the page host at the
    /// backend's socket port.
    pub fn for_location(origin: &str, hostname: &str) -> Self {
        Self {
            base_url: origin.trim_end_matches('/').to_string(),
            ws_url: format!(
                "ws://{}:{}{}",
                hostname,
                endpoints::SOCKET_PORT,
                endpoints::SOCKET
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_localhost() {
        let config = PanelConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.ws_url, "ws://localhost:8080/ws");
    }

    #[test]
    fn test_for_location_uses_page_host() {
        let config = PanelConfig::for_location("http://192.168.1.20:3000/", "192.168.1.20");
        assert_eq!(config.base_url, "http://192.168.1.20:3000");
        assert_eq!(config.ws_url, "ws://192.168.1.20:8080/ws");
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: PanelConfig =
            serde_json::from_str(r#"{"ws_url": "ws://rig:9000/ws"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.ws_url, "ws://rig:9000/ws");
    }
}
