//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    domain::{DisplayName, Message, MessageContent, Timestamp},
    infrastructure::codec::MessageCodec,
};
use hiroba_shared::time::now_millis;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message as Frame},
};
use url::Url;

use crate::{QUIT_COMMAND, error::ClientError};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// How a session ended without a connection error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed the quit command or closed the input
    UserExit,
}

/// Build the upgrade URL carrying the display name as the `name` query parameter.
pub fn connect_url(base: &Url, name: &DisplayName) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("name", name.as_str());
    url
}

/// Run one WebSocket client session until the user quits or the connection drops.
pub async fn run_client_session(
    base: &Url,
    name: &DisplayName,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<SessionEnd, ClientError> {
    let url = connect_url(base, name);

    let (ws_stream, _response) = match connect_async(url.as_str()).await {
        Ok(result) => result,
        Err(tungstenite::Error::Http(response)) if response.status().as_u16() == 400 => {
            return Err(ClientError::NameRejected(name.to_string()));
        }
        Err(e) => return Err(ClientError::Connection(e.to_string())),
    };

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Type {} to exit.\n",
        name, QUIT_COMMAND
    );
    redisplay_prompt(name);

    let (mut write, mut read) = ws_stream.split();
    let codec = MessageCodec::default();

    let name_for_read = name.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(frame) = read.next().await {
            match frame {
                Ok(Frame::Text(text)) => {
                    let formatted = match codec.decode(text.as_str()) {
                        Ok(message) => MessageFormatter::format_message(&message),
                        Err(e) => {
                            tracing::warn!("Failed to decode frame: {}", e);
                            MessageFormatter::format_raw_message(text.as_str())
                        }
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&name_for_read);
                }
                Ok(Frame::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    let codec = MessageCodec::default();
    let write_loop = async {
        while let Some(line) = input_rx.recv().await {
            if line == QUIT_COMMAND {
                break;
            }

            let content = match MessageContent::new(line) {
                Ok(content) => content,
                Err(e) => {
                    println!("{}", e);
                    redisplay_prompt(name);
                    continue;
                }
            };
            let sent_at = now_millis();
            let message = Message::new(content, name.clone(), Timestamp::new(sent_at));

            let json = match codec.encode(&message) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Frame::Text(json.into())).await {
                return Err(ClientError::Connection(e.to_string()));
            }

            print!("{}", MessageFormatter::format_sent_confirmation(sent_at));
            redisplay_prompt(name);
        }

        write.send(Frame::Close(None)).await.ok();
        Ok(SessionEnd::UserExit)
    };

    tokio::select! {
        _ = &mut read_task => {
            Err(ClientError::Connection("Connection lost".to_string()))
        }
        result = write_loop => {
            read_task.abort();
            result
        }
    }
}
