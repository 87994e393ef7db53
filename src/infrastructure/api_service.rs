use std::sync::Arc;

use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{core::cmd::ApiCommand, infrastructure::api::NumberApi, RawMsg};

/// ApiService performs requests against the number API in the background.
/// - Receives `ApiCommand`s from the command executor
/// - Runs every request on its own task so a slow list fetch never blocks a generate
/// - Reports each response back as a `RawMsg` tagged with the request's sequence number
pub struct ApiService {
    api: Arc<dyn NumberApi>,
    // Incoming channels
    cmd_rx: mpsc::UnboundedReceiver<ApiCommand>,
    cancel_token: CancellationToken,
    // Outgoing channels
    raw_tx: mpsc::UnboundedSender<RawMsg>,
}

pub type NewApiService = (
    mpsc::UnboundedSender<ApiCommand>, // cmd_tx - requests to perform
    CancellationToken,                 // shutdown signal
    ApiService,
);

impl ApiService {
    pub fn new(api: Arc<dyn NumberApi>, raw_tx: mpsc::UnboundedSender<RawMsg>) -> NewApiService {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();

        (
            cmd_tx,
            cancel_token.clone(),
            Self {
                api,
                cmd_rx,
                cancel_token,
                raw_tx,
            },
        )
    }

    /// Run the ApiService in background task
    pub fn run(mut self) {
        tokio::spawn(async move {
            if let Err(e) = self.run_service().await {
                log::error!("ApiService error: {e}");
                let _ = self
                    .raw_tx
                    .send(RawMsg::Error(format!("ApiService error: {e}")));
            }
        });
    }

    async fn run_service(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                result = self.cmd_rx.recv() => {
                    match result {
                        Some(cmd) => self.dispatch(cmd),
                        None => {
                            log::info!("ApiService: command channel closed");
                            break;
                        }
                    }
                }

                _ = self.cancel_token.cancelled() => {
                    log::info!("ApiService received cancellation signal");
                    break;
                }
            }
        }
        Ok(())
    }

    fn dispatch(&self, cmd: ApiCommand) {
        log::debug!("Handling ApiCommand: {cmd:?}");
        let api = Arc::clone(&self.api);
        let raw_tx = self.raw_tx.clone();
        let cancel_token = self.cancel_token.clone();

        tokio::spawn(async move {
            let request = perform(api, cmd);
            tokio::select! {
                msg = request => {
                    if raw_tx.send(msg).is_err() {
                        log::debug!("ApiService: receiver dropped, discarding response");
                    }
                }
                _ = cancel_token.cancelled() => {}
            }
        });
    }
}

/// Execute one request and wrap its outcome into the matching raw message
pub async fn perform(api: Arc<dyn NumberApi>, cmd: ApiCommand) -> RawMsg {
    match cmd {
        ApiCommand::FetchList { seq, limit, offset } => RawMsg::ListFetched {
            seq,
            result: api.list(limit, offset).await,
        },
        ApiCommand::FetchChart { seq, limit } => RawMsg::ChartFetched {
            seq,
            result: api.list(limit, 0).await,
        },
        ApiCommand::Generate { seq } => RawMsg::NumberGenerated {
            seq,
            result: api.generate().await,
        },
    }
}
