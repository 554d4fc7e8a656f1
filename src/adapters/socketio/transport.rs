//! Socket.IO client transport over tokio-tungstenite.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{timeout, timeout_at, Instant};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use super::codec::{OpenPayload, Packet};
use crate::ports::{ConnectionFailure, InboundMessage, RealtimeConnection, RealtimeTransport};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(20);

/// Connects to a Socket.IO server's default namespace over WebSocket.
#[derive(Debug, Clone)]
pub struct SocketIoTransport {
    endpoint: Url,
    handshake_timeout: Duration,
}

impl SocketIoTransport {
    /// Builds a transport for `server_url` (`http(s)://` or `ws(s)://`).
    pub fn new(server_url: &Url) -> Result<Self, ConnectionFailure> {
        Ok(Self {
            endpoint: websocket_endpoint(server_url)?,
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        })
    }

    pub fn with_handshake_timeout(mut self, handshake_timeout: Duration) -> Self {
        self.handshake_timeout = handshake_timeout;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `ws(s)://host/socket.io/?EIO=4&transport=websocket`
fn websocket_endpoint(server_url: &Url) -> Result<Url, ConnectionFailure> {
    let mut endpoint = server_url.clone();
    let scheme = match server_url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(ConnectionFailure::Refused(format!(
                "unsupported scheme '{}'",
                other
            )))
        }
    };
    endpoint
        .set_scheme(scheme)
        .map_err(|_| ConnectionFailure::Refused(format!("cannot use {}", server_url)))?;
    endpoint.set_path("/socket.io/");
    endpoint
        .query_pairs_mut()
        .clear()
        .append_pair("EIO", "4")
        .append_pair("transport", "websocket");
    Ok(endpoint)
}

#[async_trait]
impl RealtimeTransport for SocketIoTransport {
    async fn connect(&self) -> Result<Box<dyn RealtimeConnection>, ConnectionFailure> {
        let (socket, _) = timeout(self.handshake_timeout, connect_async(self.endpoint.as_str()))
            .await
            .map_err(|_| ConnectionFailure::Refused("timed out".to_string()))?
            .map_err(|e| ConnectionFailure::Refused(e.to_string()))?;

        let connection = timeout(self.handshake_timeout, SocketIoConnection::handshake(socket))
            .await
            .map_err(|_| ConnectionFailure::Handshake("timed out".to_string()))??;

        tracing::debug!(endpoint = %self.endpoint, "Socket.IO namespace connected");
        Ok(Box::new(connection))
    }
}

/// An acknowledged Socket.IO session.
///
/// `next_event` is cancel-safe: pings are only counted while reading and the
/// pongs are written at the start of the next read, so dropping the future
/// never loses one.
pub struct SocketIoConnection {
    socket: Socket,
    liveness: Duration,
    last_seen: Instant,
    pending_pongs: u32,
}

impl SocketIoConnection {
    /// open → `40` → ack.
    async fn handshake(mut socket: Socket) -> Result<Self, ConnectionFailure> {
        let open = loop {
            match read_packet(&mut socket).await? {
                Packet::Open(open) => break open,
                Packet::Noop => continue,
                other => {
                    return Err(ConnectionFailure::Handshake(format!(
                        "expected open packet, got {:?}",
                        other
                    )))
                }
            }
        };

        let mut connection = Self::from_open(socket, &open);
        connection.send(Packet::Connect(None)).await?;

        loop {
            match read_packet(&mut connection.socket).await? {
                Packet::Connect(_) => break,
                Packet::Ping => connection.send(Packet::Pong).await?,
                Packet::ConnectError(data) => {
                    return Err(ConnectionFailure::Handshake(data.to_string()))
                }
                Packet::Close => {
                    return Err(ConnectionFailure::Handshake("closed by server".to_string()))
                }
                _ => continue,
            }
        }

        connection.last_seen = Instant::now();
        Ok(connection)
    }

    fn from_open(socket: Socket, open: &OpenPayload) -> Self {
        Self {
            socket,
            liveness: open.liveness_window(),
            last_seen: Instant::now(),
            pending_pongs: 0,
        }
    }

    async fn send(&mut self, packet: Packet) -> Result<(), ConnectionFailure> {
        self.socket
            .send(Message::Text(packet.encode()))
            .await
            .map_err(|e| ConnectionFailure::Lost(e.to_string()))
    }

    /// Writes owed pongs. A pong leaves the count only once it sits in the
    /// socket's write buffer; an interrupted flush is completed by the next
    /// flush or send.
    async fn answer_pings(&mut self) -> Result<(), ConnectionFailure> {
        while self.pending_pongs > 0 {
            self.socket
                .feed(Message::Text(Packet::Pong.encode()))
                .await
                .map_err(|e| ConnectionFailure::Lost(e.to_string()))?;
            self.pending_pongs -= 1;
        }
        self.socket
            .flush()
            .await
            .map_err(|e| ConnectionFailure::Lost(e.to_string()))
    }
}

/// Reads frames until one decodes as a packet.
async fn read_packet(socket: &mut Socket) -> Result<Packet, ConnectionFailure> {
    loop {
        match socket.next().await {
            None | Some(Ok(Message::Close(_))) => {
                return Err(ConnectionFailure::Lost("socket closed".to_string()))
            }
            Some(Err(e)) => return Err(ConnectionFailure::Lost(e.to_string())),
            Some(Ok(Message::Text(text))) => {
                return Packet::decode(&text)
                    .map_err(|e| ConnectionFailure::Protocol(e.to_string()))
            }
            Some(Ok(_)) => continue,
        }
    }
}

#[async_trait]
impl RealtimeConnection for SocketIoConnection {
    async fn emit(&mut self, name: &str, payload: Value) -> Result<(), ConnectionFailure> {
        self.send(Packet::Event {
            name: name.to_string(),
            payload,
        })
        .await
    }

    async fn next_event(&mut self) -> Option<Result<InboundMessage, ConnectionFailure>> {
        loop {
            if let Err(e) = self.answer_pings().await {
                return Some(Err(e));
            }

            let deadline = self.last_seen + self.liveness;
            let frame = match timeout_at(deadline, self.socket.next()).await {
                Err(_) => {
                    return Some(Err(ConnectionFailure::Lost("ping timeout".to_string())))
                }
                Ok(None) => return None,
                Ok(Some(Err(e))) => return Some(Err(ConnectionFailure::Lost(e.to_string()))),
                Ok(Some(Ok(frame))) => frame,
            };
            self.last_seen = Instant::now();

            let text = match frame {
                Message::Text(text) => text,
                Message::Close(_) => return None,
                _ => continue,
            };

            match Packet::decode(&text) {
                Ok(Packet::Event { name, payload }) => {
                    return Some(Ok(InboundMessage::new(name, payload)))
                }
                Ok(Packet::Ping) => self.pending_pongs += 1,
                Ok(Packet::Close) | Ok(Packet::Disconnect) => return None,
                Ok(other) => tracing::trace!(packet = ?other, "Ignoring packet"),
                Err(e) => tracing::warn!(error = %e, "Dropping undecodable packet"),
            }
        }
    }

    async fn close(&mut self) {
        let _ = self.send(Packet::Disconnect).await;
        let _ = self.socket.close(None).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_url_becomes_socket_io_endpoint() {
        let transport = SocketIoTransport::new(&Url::parse("http://localhost:5000").unwrap()).unwrap();
        assert_eq!(
            transport.endpoint().as_str(),
            "ws://localhost:5000/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn https_url_becomes_secure_endpoint() {
        let transport =
            SocketIoTransport::new(&Url::parse("https://api.example.ph/").unwrap()).unwrap();
        assert_eq!(transport.endpoint().scheme(), "wss");
        assert_eq!(transport.endpoint().path(), "/socket.io/");
    }

    #[test]
    fn rejects_non_web_scheme() {
        let result = SocketIoTransport::new(&Url::parse("ftp://example.ph").unwrap());
        assert!(matches!(result, Err(ConnectionFailure::Refused(_))));
    }

    /// Accepts one WebSocket client, completes the Socket.IO handshake,
    /// sends a ping and hands back the client's reply.
    async fn ping_once() -> (Url, tokio::task::JoinHandle<Message>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            ws.send(Message::Text(
                r#"0{"sid":"s1","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#
                    .to_string(),
            ))
            .await
            .unwrap();
            assert_eq!(ws.next().await.unwrap().unwrap(), Message::Text("40".to_string()));
            ws.send(Message::Text(r#"40{"sid":"n1"}"#.to_string()))
                .await
                .unwrap();
            ws.send(Message::Text("2".to_string())).await.unwrap();
            ws.next().await.unwrap().unwrap()
        });

        (Url::parse(&format!("http://{}", addr)).unwrap(), server)
    }

    #[tokio::test]
    async fn ping_is_answered_even_when_the_read_is_abandoned() {
        let (url, server) = ping_once().await;
        let transport = SocketIoTransport::new(&url)
            .unwrap()
            .with_handshake_timeout(Duration::from_secs(5));
        let mut connection = transport.connect().await.unwrap();

        // The ping arrives, then nothing else: every read is cut short.
        for _ in 0..3 {
            let read = timeout(Duration::from_millis(50), connection.next_event()).await;
            assert!(read.is_err());
        }

        let reply = timeout(Duration::from_secs(5), server).await.unwrap().unwrap();
        assert_eq!(reply, Message::Text("3".to_string()));
    }

    #[tokio::test]
    async fn unreachable_server_is_refused() {
        let transport = SocketIoTransport::new(&Url::parse("http://127.0.0.1:1").unwrap())
            .unwrap()
            .with_handshake_timeout(Duration::from_secs(2));
        let result = transport.connect().await;
        assert!(matches!(result, Err(ConnectionFailure::Refused(_))));
    }
}
