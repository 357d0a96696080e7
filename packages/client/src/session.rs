//! WebSocket client session management.

use chrono::Local;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use daiptalk_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};

use crate::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Run the WebSocket client session
pub async fn run_client_session(url: &str, initial_name: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");

    let (mut write, mut read) = ws_stream.split();

    // Join phase: send the requested name in-band and wait for the server's
    // verdict. A rejected name can be retried over the same connection.
    let name = join_room(&mut write, &mut read, initial_name).await?;

    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        name
    );

    // Clone name for read task
    let name_for_read = name.clone();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => format_server_event(&event, &name_for_read),
                        // If parsing fails, display as raw text
                        Err(_) => MessageFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Binary(data)) => {
                    let formatted = MessageFormatter::format_binary_message(data.len());
                    print!("{}", formatted);
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Clone name for the input loop
    let name_for_prompt = name.clone();

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", name_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to handle stdin input and send to WebSocket
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let event = ClientEvent::SendMessage { text: line };

            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }

            // The room broadcast echoes the message back, which prints it.
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                ));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                return Err(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Negotiate a display name with the server.
///
/// Sends a join request and waits for the room's welcome. On rejection the
/// user is prompted for a replacement name and the request is resent; giving
/// up (Ctrl+C / Ctrl+D at the prompt) fails the session with the server's
/// rejection reason.
async fn join_room(
    write: &mut WsSink,
    read: &mut WsSource,
    initial_name: &str,
) -> Result<String, ClientError> {
    let mut candidate = initial_name.to_string();

    loop {
        let join = ClientEvent::Join {
            name: candidate.clone(),
        };
        let json = serde_json::to_string(&join)
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
        write
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

        loop {
            let message = match read.next().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => return Err(ClientError::ConnectionError(e.to_string())),
                None => {
                    return Err(ClientError::ConnectionError(
                        "Connection closed during join".to_string(),
                    ));
                }
            };

            match message {
                Message::Text(text) => match serde_json::from_str::<ServerEvent>(&text) {
                    Ok(ServerEvent::Welcome {
                        message,
                        online_users,
                    }) => {
                        let formatted =
                            MessageFormatter::format_welcome(&message, &online_users, &candidate);
                        print!("{}", formatted);
                        // Our own welcome lists us as online; a welcome for a
                        // concurrent joiner could arrive first, keep waiting.
                        if online_users.iter().any(|name| name == &candidate) {
                            return Ok(candidate);
                        }
                    }
                    Ok(ServerEvent::JoinError { message }) => {
                        print!("{}", MessageFormatter::format_join_error(&message));
                        match prompt_for_name().await {
                            Some(new_name) => {
                                candidate = new_name;
                                // Resend the join request with the new name
                                break;
                            }
                            None => return Err(ClientError::JoinRejected(message)),
                        }
                    }
                    Ok(_) => {
                        // Room traffic is not delivered before the join is
                        // accepted; ignore anything else.
                    }
                    Err(_) => {
                        print!("{}", MessageFormatter::format_raw_message(&text));
                    }
                },
                Message::Close(_) => {
                    return Err(ClientError::ConnectionError(
                        "Server closed the connection during join".to_string(),
                    ));
                }
                _ => {}
            }
        }
    }
}

/// Prompt for a replacement display name on the blocking thread pool.
///
/// Returns `None` when the user aborts with Ctrl+C or Ctrl+D.
async fn prompt_for_name() -> Option<String> {
    let result = tokio::task::spawn_blocking(|| {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return None;
            }
        };

        loop {
            match rl.readline("new name> ") {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        return Some(line.to_string());
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return None,
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    return None;
                }
            }
        }
    })
    .await;

    result.unwrap_or(None)
}

/// Render one server event for terminal display.
fn format_server_event(event: &ServerEvent, current_name: &str) -> String {
    match event {
        ServerEvent::Welcome {
            message,
            online_users,
        } => MessageFormatter::format_welcome(message, online_users, current_name),
        ServerEvent::UserLeft {
            username,
            online_users,
        } => MessageFormatter::format_user_left(username, online_users),
        ServerEvent::NewMessage {
            username,
            message,
            is_media,
        } => {
            let time_str = local_time_str();
            if *is_media {
                MessageFormatter::format_media_message(username, message, &time_str)
            } else {
                MessageFormatter::format_chat_message(username, message, &time_str)
            }
        }
        ServerEvent::JoinError { message } => MessageFormatter::format_join_error(message),
    }
}

/// Local date-time string for "received at" lines.
fn local_time_str() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
