use appendlib::{Appender, WorkItem};
use futures::StreamExt;
use lapin::options::{BasicAckOptions, BasicNackOptions};
use lapin::Consumer;
use tracing::{error, warn};

/// What to tell the broker about a delivery after trying to handle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Appended; remove the work item from the queue.
    Ack,
    /// Transient failure; give the work item back for redelivery.
    Requeue,
    /// Can never succeed; drop it rather than redeliver forever.
    Drop,
}

/// Consume work items until the queue stream ends (broker connection closed).
///
/// Each delivery is handled synchronously and settled only afterwards, so a
/// work item is removed from the queue only once its data is on disk.
pub async fn run(mut consumer: Consumer, appender: Appender) {
    while let Some(delivery) = consumer.next().await {
        let delivery = match delivery {
            Ok(delivery) => delivery,
            Err(err) => {
                error!(%err, "work queue consumer error");
                continue;
            }
        };
        let settle = match handle(&appender, &delivery.data).await {
            Disposition::Ack => delivery.ack(BasicAckOptions::default()).await,
            Disposition::Requeue => {
                delivery
                    .nack(BasicNackOptions {
                        requeue: true,
                        ..Default::default()
                    })
                    .await
            }
            Disposition::Drop => delivery.nack(BasicNackOptions::default()).await,
        };
        if let Err(err) = settle {
            // the broker will redeliver the unsettled work item
            error!(%err, "failed to settle delivery");
        }
    }
}

/// Decode one payload and append it, reporting how to settle the delivery.
async fn handle(appender: &Appender, payload: &[u8]) -> Disposition {
    let item = match WorkItem::decode(payload) {
        Ok(item) => item,
        Err(err) => {
            warn!(%err, "dropping undecodable work item");
            return Disposition::Drop;
        }
    };
    match appender.append(&item.job_id, &item.data).await {
        Ok(()) => Disposition::Ack,
        Err(err) if err.is_transient() => {
            error!(job_id = %item.job_id, %err, "append failed, returning work item to the queue");
            Disposition::Requeue
        }
        Err(err) => {
            warn!(job_id = %item.job_id, %err, "dropping work item that can never succeed");
            Disposition::Drop
        }
    }
}
