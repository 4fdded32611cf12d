//! Unix domain socket server for IPC
//!
//! Accepts connections from the UI and drives the session controller with
//! the decoded requests. One daemon, one controller, many short-lived
//! clients.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::session::SessionController;

use super::protocol::{DaemonStatus, Request, Response};

/// Upper bound on a single request body
const MAX_MESSAGE_LEN: usize = 1024 * 1024;

/// IPC server handling client connections
pub struct Server {
    socket_path: PathBuf,
    listener: Option<UnixListener>,
    controller: Arc<Mutex<SessionController>>,
    start_time: std::time::Instant,
    shutdown_tx: broadcast::Sender<()>,
}

impl Server {
    /// Create a new IPC server bound to the given socket path
    pub fn new(socket_path: &Path, controller: Arc<Mutex<SessionController>>) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent).context("failed to create socket directory")?;
        }

        // Remove stale socket if it exists
        if socket_path.exists() {
            std::fs::remove_file(socket_path).context("failed to remove stale socket")?;
        }

        let listener = UnixListener::bind(socket_path).context("failed to bind Unix socket")?;

        // Socket permissions owner-only (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(socket_path, std::fs::Permissions::from_mode(0o600))?;
        }

        let (shutdown_tx, _) = broadcast::channel(1);

        info!(?socket_path, "IPC server listening");

        Ok(Self {
            socket_path: socket_path.to_owned(),
            listener: Some(listener),
            controller,
            start_time: std::time::Instant::now(),
            shutdown_tx,
        })
    }

    /// Run the server, accepting connections
    pub async fn run(&self) -> Result<()> {
        let listener = self.listener.as_ref().context("server not initialized")?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    debug!("client connected");
                    let controller = Arc::clone(&self.controller);
                    let start_time = self.start_time;
                    let mut shutdown_rx = self.shutdown_tx.subscribe();

                    tokio::spawn(async move {
                        tokio::select! {
                            result = Self::handle_client(stream, controller, start_time) => {
                                if let Err(e) = result {
                                    warn!(?e, "client handler error");
                                }
                            }
                            _ = shutdown_rx.recv() => {
                                debug!("client handler shutting down");
                            }
                        }
                    });
                }
                Err(e) => {
                    error!(?e, "accept error");
                }
            }
        }
    }

    /// Handle a single client connection
    async fn handle_client(
        mut stream: UnixStream,
        controller: Arc<Mutex<SessionController>>,
        start_time: std::time::Instant,
    ) -> Result<()> {
        let mut len_buf = [0u8; 4];

        loop {
            // Read message length (4-byte little-endian)
            match stream.read_exact(&mut len_buf).await {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    debug!("client disconnected");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }

            let len = u32::from_le_bytes(len_buf) as usize;
            if len > MAX_MESSAGE_LEN {
                warn!(len, "message too large, disconnecting");
                return Ok(());
            }

            // Read message body
            let mut msg_buf = vec![0u8; len];
            stream.read_exact(&mut msg_buf).await?;

            // Parse request
            let request: Request =
                serde_json::from_slice(&msg_buf).context("failed to parse request")?;

            debug!(?request, "received request");

            let response = Self::process_request(request, &controller, start_time).await;

            Self::send_message(&mut stream, &response).await?;
        }
    }

    /// Send a length-prefixed JSON message
    async fn send_message<T: serde::Serialize>(stream: &mut UnixStream, msg: &T) -> Result<()> {
        let msg_bytes = serde_json::to_vec(msg)?;
        let msg_len = (msg_bytes.len() as u32).to_le_bytes();

        stream.write_all(&msg_len).await?;
        stream.write_all(&msg_bytes).await?;

        Ok(())
    }

    /// Process a request against the session controller
    async fn process_request(
        request: Request,
        controller: &Arc<Mutex<SessionController>>,
        start_time: std::time::Instant,
    ) -> Response {
        match request {
            Request::Ping => Response::Pong,

            Request::GetStatus => {
                let controller = controller.lock().await;
                Response::Status(DaemonStatus {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    recording: controller.is_recording(),
                    transcript_lines: controller.transcript().len(),
                    uptime_secs: start_time.elapsed().as_secs(),
                })
            }

            Request::Start => {
                controller.lock().await.start();
                Response::Ack
            }

            Request::Stop => {
                controller.lock().await.stop();
                Response::Ack
            }

            Request::AddText { text } => {
                controller.lock().await.add_text(&text);
                Response::Ack
            }

            Request::ClearTranscript => {
                controller.lock().await.clear_transcript();
                Response::Ack
            }

            Request::GetTranscript => {
                let controller = controller.lock().await;
                Response::Transcript {
                    lines: controller.transcript().to_vec(),
                }
            }
        }
    }

    /// Gracefully shutdown the server
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());

        // Remove socket file
        if self.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.socket_path) {
                warn!(?e, "failed to remove socket file");
            }
        }

        info!("IPC server shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::broadcast as event_channel;

    use super::*;
    use crate::keyboard::KeyInjector;
    use crate::session::testing::MockInjector;
    use crate::session::STOP_SENTINEL;

    fn create_controller() -> Arc<Mutex<SessionController>> {
        let injector = Arc::new(MockInjector::default());
        let (event_tx, _) = event_channel::channel(16);
        Arc::new(Mutex::new(SessionController::new(
            injector as Arc<dyn KeyInjector>,
            event_tx,
            Duration::from_secs(5),
        )))
    }

    #[tokio::test]
    async fn test_ping() {
        let controller = create_controller();
        let resp =
            Server::process_request(Request::Ping, &controller, std::time::Instant::now()).await;
        assert!(matches!(resp, Response::Pong));
    }

    #[tokio::test]
    async fn test_status_reflects_controller() {
        let controller = create_controller();
        let start_time = std::time::Instant::now();

        Server::process_request(Request::Start, &controller, start_time).await;
        let resp = Server::process_request(Request::GetStatus, &controller, start_time).await;

        match resp {
            Response::Status(status) => {
                assert!(status.recording);
                assert_eq!(status.transcript_lines, 0);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transcript_commands() {
        let controller = create_controller();
        let start_time = std::time::Instant::now();

        Server::process_request(Request::Start, &controller, start_time).await;
        Server::process_request(
            Request::AddText {
                text: "note1".to_string(),
            },
            &controller,
            start_time,
        )
        .await;
        Server::process_request(Request::Stop, &controller, start_time).await;

        let resp = Server::process_request(Request::GetTranscript, &controller, start_time).await;
        match resp {
            Response::Transcript { lines } => {
                assert_eq!(lines, ["note1", STOP_SENTINEL]);
            }
            other => panic!("unexpected response: {:?}", other),
        }

        Server::process_request(Request::ClearTranscript, &controller, start_time).await;
        let resp = Server::process_request(Request::GetTranscript, &controller, start_time).await;
        match resp {
            Response::Transcript { lines } => assert!(lines.is_empty()),
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
