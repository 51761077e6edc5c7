#![allow(dead_code)]

use rotafacil_cli::{ApiClient, Console, SmokeConfig, SmokeRunner};
use std::net::TcpListener;

pub const JSON: &str = "application/json";

pub fn config_for(base_url: &str) -> SmokeConfig {
    let mut config = SmokeConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..SmokeConfig::default()
    };
    config.normalize();
    config
}

pub fn client_for(base_url: &str) -> ApiClient {
    ApiClient::new(&config_for(base_url)).expect("Failed to build API client")
}

pub fn runner_for(base_url: &str) -> SmokeRunner<Vec<u8>> {
    let config = config_for(base_url);
    let client = ApiClient::new(&config).expect("Failed to build API client");
    SmokeRunner::new(client, Console::buffered(), &config)
}

/// URL of a local port nothing listens on, so connections are refused
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    let port = listener
        .local_addr()
        .expect("Failed to read probe port")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
