use std::sync::mpsc::{sync_channel, SyncSender, TrySendError};
use std::thread;
use std::time::Duration;

use rum_core::{rum_debug, Beacon};

// Beacons waiting for the worker. A page view produces one, so a full queue
// means the worker is stuck and new beacons are dropped.
const QUEUE_SIZE: usize = 30;

enum Task {
    SendBeacon(Beacon),
    Flush(SyncSender<()>),
}

/// Runs beacon deliveries on a dedicated worker thread.
///
/// Enqueueing never blocks. The worker drains whatever is queued and exits
/// once the owning transport is dropped; nothing waits for it, so a beacon
/// handed over right before teardown is still delivered.
pub struct TransportThread {
    sender: SyncSender<Task>,
}

impl TransportThread {
    pub fn new<SendFn>(mut send: SendFn) -> Self
    where
        SendFn: FnMut(Beacon) + Send + 'static,
    {
        let (sender, receiver) = sync_channel(QUEUE_SIZE);
        let spawned = thread::Builder::new()
            .name("rum-transport".into())
            .spawn(move || {
                for task in receiver.into_iter() {
                    match task {
                        Task::SendBeacon(beacon) => send(beacon),
                        Task::Flush(sender) => {
                            sender.send(()).ok();
                        }
                    }
                }
            });
        if let Err(err) = spawned {
            rum_debug!("failed to spawn transport thread: {}", err);
        }

        Self { sender }
    }

    pub fn send(&self, beacon: Beacon) {
        match self.sender.try_send(Task::SendBeacon(beacon)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                rum_debug!("transport queue is full, beacon dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                rum_debug!("transport thread is gone, beacon dropped");
            }
        }
    }

    /// Waits until everything queued before this call was delivered.
    ///
    /// Returns `false` if the queue did not drain within `timeout`.
    pub fn flush(&self, timeout: Duration) -> bool {
        let (sender, receiver) = sync_channel(1);
        if self.sender.try_send(Task::Flush(sender)).is_err() {
            return false;
        }
        receiver.recv_timeout(timeout).is_ok()
    }
}
