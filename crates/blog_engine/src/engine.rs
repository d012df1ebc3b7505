use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use blog_logging::blog_warn;

use crate::loader::summarize_page;
use crate::{ContentSource, EngineEvent};

enum EngineCommand {
    FetchPage { locator: String },
}

/// Runs page fetches on a background runtime and reports back over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn ContentSource>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("blog-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let source = source.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(source.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_page(&self, locator: impl Into<String>) {
        let command = EngineCommand::FetchPage {
            locator: locator.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            blog_warn!("Engine thread is gone; dropping fetch request");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    source: &dyn ContentSource,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchPage { locator } => {
            let result = match source.fetch_page(&locator).await {
                Ok(raw) => summarize_page(&raw).map_err(Into::into),
                Err(err) => Err(err),
            };
            let _ = event_tx.send(EngineEvent::PageLoaded { locator, result });
        }
    }
}
