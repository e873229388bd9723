//! Browser reader module
//!
//! Renders markdown to an HTML page, serves it on a loopback port, opens the
//! default browser and waits for Ctrl+C.

mod html;
mod page;
mod server;

pub use html::{extract_title, render_html};
pub use page::reader_page;
pub use server::ReaderServer;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Result;

/// Serve the rendered markdown until interrupted
pub fn open(markdown: &str) -> Result<()> {
    let title = extract_title(markdown);
    let page: Arc<str> = Arc::from(reader_page(&title, &render_html(markdown))?);
    debug!(%title, "rendered reader page");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(serve(page))
}

async fn serve(page: Arc<str>) -> Result<()> {
    let server = ReaderServer::bind().await?;
    let url = server.url();
    debug!(state = ?server.state(), %url, "reader bound");

    println!("Reader opened at {} - Press Ctrl+C to close", url);
    launch_browser(&url);

    server
        .serve_until(page, async {
            interrupted().await;
            println!("\nClosing reader...");
        })
        .await?;
    Ok(())
}

fn launch_browser(url: &str) {
    if let Err(e) = ::open::that_detached(url) {
        debug!(error = %e, "could not launch browser");
    }
}

async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a handler the default SIGINT action still ends the process
        warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
