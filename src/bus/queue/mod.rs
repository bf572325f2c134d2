use crate::bus::DeliveryTask;
use crate::errors::{RelayError, RelayResult};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};
use uuid::Uuid;

const DEFAULT_DELIVERY_CAPACITY: usize = 1000;

/// Owns both ends of the push-delivery channel until startup wiring hands
/// the receiver to the delivery worker.
pub struct DeliveryBus {
    queue: DeliveryQueue,
    delivery_rx: Option<mpsc::Receiver<DeliveryTask>>,
}

impl DeliveryBus {
    pub fn new(capacity: usize) -> Self {
        let (delivery_tx, delivery_rx) = mpsc::channel(capacity);
        Self {
            queue: DeliveryQueue { delivery_tx },
            delivery_rx: Some(delivery_rx),
        }
    }

    /// Sending half, cloned into every producer.
    pub fn queue(&self) -> DeliveryQueue {
        self.queue.clone()
    }

    /// Extract the receiver so the worker can own it without a lock.
    pub fn take_delivery_rx(&mut self) -> Option<mpsc::Receiver<DeliveryTask>> {
        self.delivery_rx.take()
    }
}

impl Default for DeliveryBus {
    fn default() -> Self {
        Self::new(DEFAULT_DELIVERY_CAPACITY)
    }
}

/// Producer handle for push deliveries. Enqueueing never waits.
#[derive(Clone)]
pub struct DeliveryQueue {
    delivery_tx: mpsc::Sender<DeliveryTask>,
}

impl DeliveryQueue {
    /// Queue one delivery and return its id. Fails immediately when the queue
    /// is full or the worker is gone; in both cases nothing was queued.
    pub fn enqueue(&self, task: DeliveryTask) -> RelayResult<Uuid> {
        let id = task.id;
        match self.delivery_tx.try_send(task) {
            Ok(()) => {
                debug!("delivery {} queued", id);
                Ok(id)
            }
            Err(TrySendError::Full(task)) => {
                warn!("delivery queue full, rejecting delivery to {}", task.user_id);
                Err(RelayError::QueueUnavailable("delivery queue full".into()))
            }
            Err(TrySendError::Closed(_)) => {
                warn!("delivery worker stopped, rejecting delivery {}", id);
                Err(RelayError::QueueUnavailable("delivery worker not running".into()))
            }
        }
    }
}
