//! Offline unit tests for globenews-db pool configuration.
//! These tests do not require a live database connection.

use globenews_core::{AppConfig, Environment};
use globenews_db::PoolConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5000),
        log_level: "info".to_string(),
        log_file: PathBuf::from("article-extraction.log"),
        news_api_key: None,
        opencage_api_key: None,
        dandelion_api_key: None,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        http_timeout_secs: 30,
        extract_interval_mins: 15,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}
