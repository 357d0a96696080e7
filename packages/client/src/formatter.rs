//! Message formatting utilities for client display.

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a welcome notification showing the announcement and who is online
    ///
    /// # Arguments
    ///
    /// * `message` - The welcome text rendered by the server
    /// * `online_users` - Display names currently in the room, in join order
    /// * `current_name` - The current client's display name (to mark as "me")
    ///
    /// # Returns
    ///
    /// A formatted string with the announcement and the online user list
    pub fn format_welcome(message: &str, online_users: &[String], current_name: &str) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str(message);
        output.push('\n');
        output.push_str("Online users:\n");

        if online_users.is_empty() {
            output.push_str("(No users online)\n");
        } else {
            for name in online_users {
                let me_suffix = if name == current_name { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", name, me_suffix));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a user-left notification
    ///
    /// # Arguments
    ///
    /// * `username` - The display name of the user who left
    /// * `online_users` - Display names remaining in the room, in join order
    ///
    /// # Returns
    ///
    /// A formatted string with the leave notification
    pub fn format_user_left(username: &str, online_users: &[String]) -> String {
        let remaining = if online_users.is_empty() {
            "no users online".to_string()
        } else {
            online_users.join(", ")
        };
        format!("\n- {} left the room (online: {})\n", username, remaining)
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `username` - The display name of the sender
    /// * `message` - The message text
    /// * `time_str` - Local date-time string of when the message was received
    ///
    /// # Returns
    ///
    /// A formatted string with the chat message
    pub fn format_chat_message(username: &str, message: &str, time_str: &str) -> String {
        format!(
            "\n\n------------------------------------------------------------\n\
             @{}: {}\n\
             received at {}\n\
             ------------------------------------------------------------\n",
            username, message, time_str
        )
    }

    /// Format a media message
    ///
    /// The body is embed markup meant for a browser, so it is shown verbatim
    /// under a media marker instead of being rendered.
    ///
    /// # Arguments
    ///
    /// * `username` - The display name of the sender
    /// * `markup` - The embed markup
    /// * `time_str` - Local date-time string of when the message was received
    ///
    /// # Returns
    ///
    /// A formatted string with the media message
    pub fn format_media_message(username: &str, markup: &str, time_str: &str) -> String {
        format!(
            "\n\n------------------------------------------------------------\n\
             @{} [media]:\n\
             {}\n\
             received at {}\n\
             ------------------------------------------------------------\n",
            username, markup, time_str
        )
    }

    /// Format a join-error notification
    ///
    /// # Arguments
    ///
    /// * `message` - The rejection reason sent by the server
    ///
    /// # Returns
    ///
    /// A formatted string with the rejection reason
    pub fn format_join_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    /// Format a binary message notification
    ///
    /// # Arguments
    ///
    /// * `byte_count` - The number of bytes received
    ///
    /// # Returns
    ///
    /// A formatted string with the binary data notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    ///
    /// # Arguments
    ///
    /// * `text` - The raw text received
    ///
    /// # Returns
    ///
    /// A formatted string with the raw message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
