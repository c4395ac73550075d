//! Command orchestration helpers from UI actions to the worker queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::FetchRecords { .. } => "fetch_records",
        BackendCommand::CancelActiveFetch => "cancel_active_fetch",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->worker command"),
        Err(TrySendError::Full(_)) => {
            *status = "Worker command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Fetch worker disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}
