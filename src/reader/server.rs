//! Loopback HTTP server for the reader page
//!
//! The server walks `Idle → Listening → Serving → ShuttingDown → Stopped`.
//! Requests and the interrupt are the external events; binding and draining
//! are driven by the server itself.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::State;
use axum::http::Uri;
use axum::response::Html;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::error::{MarkoError, Result};

/// Lifecycle of the reader server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Idle,
    Listening(SocketAddr),
    Serving(SocketAddr),
    ShuttingDown,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderEvent {
    Bound(SocketAddr),
    Request,
    Interrupt,
    Drained,
}

impl ReaderState {
    /// Next state after `event`; events that do not apply leave it unchanged
    pub fn on(self, event: ReaderEvent) -> Self {
        use ReaderEvent::*;
        use ReaderState::*;

        match (self, event) {
            (Idle, Bound(addr)) => Listening(addr),
            (Listening(addr), Request) | (Serving(addr), Request) => Serving(addr),
            (Listening(_), Interrupt) | (Serving(_), Interrupt) => ShuttingDown,
            (ShuttingDown, Drained) => Stopped,
            (state, _) => state,
        }
    }
}

#[derive(Clone)]
struct PageState {
    page: Arc<str>,
    requests: mpsc::UnboundedSender<()>,
}

/// Reader server bound to a loopback port
pub struct ReaderServer {
    listener: TcpListener,
    addr: SocketAddr,
    state: ReaderState,
}

impl ReaderServer {
    /// Bind to an OS-assigned port on 127.0.0.1
    pub async fn bind() -> Result<Self> {
        Self::bind_to(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).await
    }

    /// Bind to `addr`; the reader itself only ever binds loopback port 0
    async fn bind_to(addr: SocketAddr) -> Result<Self> {
        let listener = TcpListener::bind(addr).await.map_err(MarkoError::Bind)?;
        let addr = listener.local_addr().map_err(MarkoError::Bind)?;

        let state = transition(ReaderState::Idle, ReaderEvent::Bound(addr));
        Ok(Self {
            listener,
            addr,
            state,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Serve `page` for every path until `interrupt` resolves
    ///
    /// Returns the number of requests served once the server has drained
    /// its connections and released the port.
    pub async fn serve_until<F>(self, page: Arc<str>, interrupt: F) -> Result<usize>
    where
        F: Future<Output = ()>,
    {
        let ReaderServer {
            listener,
            addr,
            mut state,
        } = self;

        let (requests_tx, mut requests_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let app = Router::new().fallback(serve_page).with_state(PageState {
            page,
            requests: requests_tx,
        });

        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = stop_rx.await;
                })
                .await
        });
        info!(%addr, "reader listening");

        tokio::pin!(interrupt);
        let mut served = 0;
        loop {
            tokio::select! {
                biased;
                Some(()) = requests_rx.recv() => {
                    served += 1;
                    state = transition(state, ReaderEvent::Request);
                }
                () = &mut interrupt => {
                    state = transition(state, ReaderEvent::Interrupt);
                    break;
                }
            }
        }

        let _ = stop_tx.send(());
        server
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))??;

        let state = transition(state, ReaderEvent::Drained);
        info!(?state, served, "reader stopped");
        Ok(served)
    }
}

fn transition(state: ReaderState, event: ReaderEvent) -> ReaderState {
    let next = state.on(event);
    if next != state {
        debug!(from = ?state, to = ?next, "reader state changed");
    }
    next
}

async fn serve_page(State(state): State<PageState>, uri: Uri) -> Html<String> {
    debug!(path = uri.path(), "serving reader page");
    let _ = state.requests.send(());
    Html(state.page.to_string())
}
