//! Single-room WebSocket chat server.
//!
//! Receives messages from clients and broadcasts them to everyone in the
//! room; `@电影` and `@川小农` messages are handled as in-chat commands.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin daiptalk-server
//! cargo run --bin daiptalk-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use daiptalk_server::{
    config::Config,
    infrastructure::{
        broadcaster::WebSocketBroadcaster,
        registry::InMemoryPresenceRegistry,
        responder::{KeywordResponder, RandomReplySelector},
    },
    ui::Server,
    usecase::{DispatchMessageUseCase, GetOnlineUsersUseCase, JoinRoomUseCase, LeaveRoomUseCase},
};
use daiptalk_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Single-room WebSocket chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Path to the configuration file
    #[arg(short = 'c', long, default_value = "config.json")]
    config: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Config
    // 2. Registry / Broadcaster / Responder
    // 3. UseCases
    // 4. Server

    // 1. Load configuration (created with defaults if missing)
    let config = match Config::load_or_init(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config '{}': {}", args.config, e);
            std::process::exit(1);
        }
    };

    // 2. Create the shared room state and the responder engine
    let registry = Arc::new(InMemoryPresenceRegistry::new());
    let broadcaster = Arc::new(WebSocketBroadcaster::new());
    let responder = Arc::new(KeywordResponder::new(
        Arc::new(SystemClock),
        Box::new(RandomReplySelector),
    ));

    // 3. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone(), broadcaster.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(registry.clone(), broadcaster.clone()));
    let dispatch_message_usecase = Arc::new(DispatchMessageUseCase::new(
        registry.clone(),
        broadcaster.clone(),
        responder,
        config.media_embed_url.clone(),
    ));
    let get_online_users_usecase = Arc::new(GetOnlineUsersUseCase::new(registry.clone()));

    // 4. Create and run the server
    let server = Server::new(
        join_room_usecase,
        leave_room_usecase,
        dispatch_message_usecase,
        get_online_users_usecase,
        broadcaster,
        config,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
