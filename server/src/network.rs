//! Server network layer: TCP accept loop and per-connection task spawning

use crate::client::ClientHandler;
use crate::config::{HandlerSettings, ServerConfig};
use crate::error::{ServerError, ServerResult};
use crate::records::RecordsStore;
use log::{error, info, warn};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinSet;

/// Accepts Blackjack clients and runs one handler task per connection
///
/// All handlers share the one [`RecordsStore`]; everything else is owned
/// by the connection's task.
pub struct Server {
    listener: TcpListener,
    records: Arc<RecordsStore>,
    settings: HandlerSettings,
    next_client_id: u32,
}

impl Server {
    pub async fn bind(config: &ServerConfig, records: Arc<RecordsStore>) -> ServerResult<Self> {
        let address = config.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::BindFailed {
                addr: address.clone(),
                source,
            })?;
        info!("Server listening on {}", listener.local_addr()?);

        Ok(Server {
            listener,
            records,
            settings: config.handler_settings(),
            next_client_id: 1,
        })
    }

    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Runs the accept loop forever
    pub async fn run(self) -> ServerResult<()> {
        self.run_until(std::future::pending()).await
    }

    /// Runs the accept loop until `shutdown` completes
    ///
    /// On shutdown the listening socket is closed and every in-flight
    /// handler is cancelled, which closes its socket.
    pub async fn run_until<F>(mut self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()>,
    {
        let mut handlers = JoinSet::new();
        tokio::pin!(shutdown);

        info!("Server started, waiting for players");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Server shutting down ({} open connections)", handlers.len());
                    break;
                }

                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, addr)) => {
                            let client_id = self.next_client_id;
                            self.next_client_id = self.next_client_id.wrapping_add(1);
                            info!("Client {} connected from {}", client_id, addr);

                            if let Err(e) = stream.set_nodelay(true) {
                                warn!("Could not set TCP_NODELAY for {}: {}", addr, e);
                            }

                            let handler =
                                ClientHandler::new(client_id, Arc::clone(&self.records), self.settings);
                            handlers.spawn(handler.run(stream));
                        }
                        Err(e) => {
                            error!("Error accepting connection: {}", e);
                            tokio::time::sleep(Duration::from_millis(10)).await;
                        }
                    }
                }

                Some(finished) = handlers.join_next(), if !handlers.is_empty() => {
                    if let Err(e) = finished {
                        if e.is_panic() {
                            error!("Client handler panicked: {}", e);
                        }
                    }
                }
            }
        }

        drop(self.listener);
        handlers.shutdown().await;
        info!("Server stopped");
        Ok(())
    }
}
