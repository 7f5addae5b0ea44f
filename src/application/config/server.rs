use std::env;

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API. Empty leaves CORS open, which is what
    /// the CLI and a dashboard on another host need out of the box; operators who
    /// expose the API publicly pin it with `LAUNCHPAD_ALLOWED_ORIGINS`.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("LAUNCHPAD_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("LAUNCHPAD_API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            allowed_origins: parse_origins(
                &env::var("LAUNCHPAD_ALLOWED_ORIGINS").unwrap_or_default(),
            ),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Comma-separated origins, blanks dropped
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert!(parse_origins("").is_empty());
        assert_eq!(
            parse_origins(" https://a.example.com ,, https://b.example.com"),
            vec!["https://a.example.com", "https://b.example.com"]
        );
    }

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origins: Vec::new(),
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
