//! Worker thread bridging the UI command queue to the archive client.
//!
//! The worker owns a tokio runtime; each grid activation becomes one
//! spawned fetch task holding a cancellation token. Starting a new fetch
//! or tearing the grid down cancels and aborts the previous task, so at
//! most one paginator run is live at a time.

use std::{sync::Arc, thread};

use client_core::{ArchiveClient, CancelToken, FetchError};
use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

pub fn launch(api_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || run_worker(api_url, cmd_rx, ui_tx));
}

struct ActiveFetch {
    cancel: CancelToken,
    task: JoinHandle<()>,
}

impl ActiveFetch {
    fn stop(self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

fn run_worker(api_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("failed to build fetch worker runtime: {err}");
            let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                "fetch worker startup failure: {err}"
            )));
            return;
        }
    };

    runtime.block_on(async move {
        let client = Arc::new(ArchiveClient::new(api_url));
        let mut active: Option<ActiveFetch> = None;

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::FetchRecords { kind, generation } => {
                    info!(kind = kind.route_segment(), generation, "worker: fetch_records");
                    if let Some(previous) = active.take() {
                        previous.stop();
                    }

                    let cancel = CancelToken::new();
                    let task_cancel = cancel.clone();
                    let task_client = Arc::clone(&client);
                    let task_ui_tx = ui_tx.clone();
                    let task = tokio::spawn(async move {
                        match task_client.fetch_all(kind, &task_cancel).await {
                            Ok(records) => {
                                let _ = task_ui_tx.try_send(UiEvent::RecordsLoaded {
                                    kind,
                                    generation,
                                    records,
                                });
                            }
                            Err(FetchError::Cancelled) => {
                                // Superseded or torn down; nothing to report.
                            }
                            Err(err) => {
                                error!(
                                    kind = kind.route_segment(),
                                    generation,
                                    "worker: fetch_records failed: {err}"
                                );
                                let _ = task_ui_tx.try_send(UiEvent::FetchFailed {
                                    kind,
                                    generation,
                                    error: UiError::from_fetch(&err),
                                });
                            }
                        }
                    });
                    active = Some(ActiveFetch { cancel, task });
                }
                BackendCommand::CancelActiveFetch => {
                    if let Some(previous) = active.take() {
                        info!("worker: cancel_active_fetch");
                        previous.stop();
                    }
                }
            }
        }
    });
}
