//! Listener setup and the serve loop.

use crate::routes::create_router;
use crate::state::AppState;
use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::time::Duration;

/// How long in-flight TLS connections get to finish after a shutdown signal.
const TLS_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Errors raised while building or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] tfreg_core::Error),

    #[error("invalid bind address {addr:?}: {source}")]
    InvalidBind {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to load TLS material: {0}")]
    Tls(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

enum Listener {
    Plain(tokio::net::TcpListener),
    Tls {
        listener: std::net::TcpListener,
        config: RustlsConfig,
    },
}

/// A bound server, ready to run.
pub struct Server {
    listener: Listener,
    router: Router,
    local_addr: SocketAddr,
}

impl Server {
    /// Validate configuration, load TLS material and bind the listener.
    pub async fn build(state: AppState) -> Result<Self, ServeError> {
        state.config.validate()?;

        let bind = &state.config.server.bind;
        let addr: SocketAddr = bind.parse().map_err(|source| ServeError::InvalidBind {
            addr: bind.clone(),
            source,
        })?;

        let listener = match &state.config.server.tls {
            Some(tls) => {
                let config = RustlsConfig::from_pem_file(&tls.certificate, &tls.private_key)
                    .await
                    .map_err(ServeError::Tls)?;
                let listener = std::net::TcpListener::bind(addr)?;
                listener.set_nonblocking(true)?;
                Listener::Tls { listener, config }
            }
            None => Listener::Plain(tokio::net::TcpListener::bind(addr).await?),
        };

        let local_addr = match &listener {
            Listener::Plain(l) => l.local_addr()?,
            Listener::Tls { listener, .. } => listener.local_addr()?,
        };

        Ok(Self {
            listener,
            router: create_router(state),
            local_addr,
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Whether connections are served over TLS.
    pub fn is_tls(&self) -> bool {
        matches!(self.listener, Listener::Tls { .. })
    }

    /// Serve until ctrl-c or SIGTERM.
    pub async fn run(self) -> Result<(), ServeError> {
        let addr = self.local_addr;
        match self.listener {
            Listener::Plain(listener) => {
                tracing::info!(%addr, "Listening (http)");
                axum::serve(listener, self.router)
                    .with_graceful_shutdown(shutdown_signal())
                    .await?;
            }
            Listener::Tls { listener, config } => {
                tracing::info!(%addr, "Listening (https)");
                let handle = Handle::new();
                let shutdown = handle.clone();
                tokio::spawn(async move {
                    shutdown_signal().await;
                    shutdown.graceful_shutdown(Some(TLS_SHUTDOWN_GRACE));
                });
                axum_server::from_tcp_rustls(listener, config)
                    .handle(handle)
                    .serve(self.router.into_make_service())
                    .await?;
            }
        }
        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
