//! Server configuration: command-line flags with environment fallbacks.

use clap::{ArgAction, Parser};

/// Sketchroom coordination server
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "SKETCHROOM_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000, env = "SKETCHROOM_PORT")]
    pub port: u16,

    /// Default log level; RUST_LOG takes precedence when set
    #[arg(long, default_value = "info", env = "SKETCHROOM_LOG_LEVEL")]
    pub log_level: String,

    /// Allowed CORS origin (any origin when omitted)
    #[arg(long, env = "SKETCHROOM_CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Physically drop board events superseded by a clear
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        env = "SKETCHROOM_COMPACT_ON_CLEAR"
    )]
    pub compact_on_clear: bool,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            cors_origin: None,
            compact_on_clear: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        // テスト項目: フラグで各設定を上書きできる
        // given (前提条件):
        let args = [
            "sketchroom-server",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--log-level",
            "debug",
            "--cors-origin",
            "http://localhost:3000",
            "--compact-on-clear",
            "false",
        ];

        // when (操作):
        let config = ServerConfig::parse_from(args);

        // then (期待する結果):
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:3000"));
        assert!(!config.compact_on_clear);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        // テスト項目: 範囲外のポート番号はパースエラーになる
        // given (前提条件):
        let args = ["sketchroom-server", "--port", "70000"];

        // when (操作):
        let result = ServerConfig::try_parse_from(args);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_default_matches_documented_values() {
        // テスト項目: Default の値がドキュメントどおり
        // given (前提条件):
        // when (操作):
        let config = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert!(config.compact_on_clear);
        assert!(config.cors_origin.is_none());
    }
}
