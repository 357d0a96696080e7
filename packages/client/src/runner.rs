//! Client execution logic with reconnection support.

use std::time::Duration;

use daiptalk_server::infrastructure::dto::http::ConfigDto;

use crate::{
    domain::{should_attempt_reconnect, should_exit_immediately},
    session::run_client_session,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the WebSocket client with reconnection logic
pub async fn run_client(url: String, name: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            name,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &name).await {
            Ok(_) => {
                tracing::info!("Client session ended normally");
                // If connection ended normally (user exit), don't reconnect
                break;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}", e);
                    tracing::error!("Cannot join the room as '{}'. Exiting.", name);
                    std::process::exit(1);
                }

                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    std::process::exit(1);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}

/// Fetch the server's endpoint list over HTTP and print it.
pub async fn list_servers(api_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config_url = format!("{}/api/config", api_url.trim_end_matches('/'));
    let config: ConfigDto = reqwest::get(&config_url).await?.json().await?;

    println!("Available servers:");
    for endpoint in &config.server_addresses {
        println!("  {} - {}", endpoint.name, endpoint.url);
    }

    Ok(())
}
