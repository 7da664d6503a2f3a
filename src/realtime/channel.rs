//! The realtime frame transport.
//!
//! [`EventChannel`] is the seam the session controller talks through, so
//! the interview flow can be driven by a mock in tests. [`WsChannel`] is
//! the production implementation: a WebSocket split into mpsc-pumped
//! halves, delivering inbound UTF-8 JSON text frames in order.

use crate::error::{Result, VivaError};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;

/// Bidirectional text-frame channel to the remote peer.
#[async_trait]
pub trait EventChannel: Send {
    /// Send one text frame. Fails once the channel is closed.
    async fn send(&mut self, frame: String) -> Result<()>;

    /// Receive the next inbound text frame, in delivery order.
    /// Returns `None` once the channel is closed.
    async fn recv(&mut self) -> Option<String>;

    /// Release the underlying transport. Best-effort and idempotent.
    async fn close(&mut self);
}

/// WebSocket-backed [`EventChannel`].
pub struct WsChannel {
    tx: Option<mpsc::Sender<String>>,
    rx: mpsc::Receiver<String>,
}

impl WsChannel {
    /// Connect to the realtime endpoint using a short-lived session token.
    pub async fn connect(url: &str, model: &str, token: &str) -> Result<Self> {
        let endpoint = format!("{}?model={}", url, model);
        let mut request = endpoint
            .as_str()
            .into_client_request()
            .map_err(|e| VivaError::ChannelConnect {
                message: format!("bad endpoint {}: {}", endpoint, e),
            })?;

        let auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            VivaError::ChannelConnect {
                message: format!("invalid token header: {}", e),
            }
        })?;
        request.headers_mut().insert("Authorization", auth);
        request
            .headers_mut()
            .insert("OpenAI-Beta", HeaderValue::from_static("realtime=v1"));

        let (ws, _response) =
            connect_async(request)
                .await
                .map_err(|e| VivaError::ChannelConnect {
                    message: e.to_string(),
                })?;

        let (mut ws_sink, mut ws_stream) = ws.split();
        let (out_tx, mut out_rx) = mpsc::channel::<String>(32);
        let (in_tx, in_rx) = mpsc::channel::<String>(64);

        // Outgoing pump: forwards frames until the sender side is dropped,
        // then closes the socket.
        tokio::spawn(async move {
            while let Some(frame) = out_rx.recv().await {
                if ws_sink.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            let _ = ws_sink.close().await;
        });

        // Incoming pump: only text frames carry protocol events; anything
        // else is transport noise.
        tokio::spawn(async move {
            while let Some(msg) = ws_stream.next().await {
                match msg {
                    Ok(Message::Text(text)) => {
                        if in_tx.send(text.to_string()).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) | Err(_) => break,
                    Ok(_) => {}
                }
            }
        });

        Ok(Self {
            tx: Some(out_tx),
            rx: in_rx,
        })
    }
}

#[async_trait]
impl EventChannel for WsChannel {
    async fn send(&mut self, frame: String) -> Result<()> {
        let Some(tx) = self.tx.as_ref() else {
            return Err(VivaError::ChannelClosed {
                message: "send on closed channel".to_string(),
            });
        };
        tx.send(frame).await.map_err(|_| VivaError::ChannelClosed {
            message: "remote peer went away".to_string(),
        })
    }

    async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    async fn close(&mut self) {
        // Dropping the sender ends the outgoing pump, which closes the
        // socket; the incoming pump ends with the connection.
        self.tx.take();
        self.rx.close();
    }
}
