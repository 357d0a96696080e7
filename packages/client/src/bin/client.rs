//! Simple WebSocket chat client with display name and reconnection support.
//!
//! Connects to a WebSocket chat server, joins the room with a display name
//! and sends messages from stdin. Displays ">" prompt and waits for input.
//! If the requested name is rejected, prompts for another one over the same
//! connection. Automatically reconnects on disconnection (max 5 attempts
//! with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin daiptalk-client -- --name alice
//! cargo run --bin daiptalk-client -- -n bob -u ws://192.168.1.100:8080/ws
//! cargo run --bin daiptalk-client -- --list-servers
//! ```

use clap::Parser;

use daiptalk_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "WebSocket chat client for a single shared room", long_about = None)]
struct Args {
    /// Display name for the room (must be unique among online users)
    #[arg(short = 'n', long, required_unless_present = "list_servers")]
    name: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// HTTP API base URL (used by --list-servers)
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    api_url: String,

    /// List the configured server endpoints and exit
    #[arg(long)]
    list_servers: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if args.list_servers {
        if let Err(e) = daiptalk_client::list_servers(&args.api_url).await {
            tracing::error!("Failed to list servers: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // clap enforces --name unless --list-servers is given
    let Some(name) = args.name else {
        return;
    };

    // Run the client
    if let Err(e) = daiptalk_client::run_client(args.url, name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
