use appendlib::WorkItem;
use lapin::options::{BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};

pub struct Publisher {
    connection: Connection,
    channel: Channel,
}

impl Publisher {
    pub async fn connect(url: &str) -> lapin::Result<Self> {
        let connection = Connection::connect(url, ConnectionProperties::default()).await?;
        let channel = connection.create_channel().await?;
        Ok(Self {
            connection,
            channel,
        })
    }

    /// Enqueue a work item and return without waiting for the append.
    pub async fn send(&self, queue: &str, item: &WorkItem) -> lapin::Result<()> {
        // declare so publishing to a not-yet-consumed queue is not lost
        self.channel
            .queue_declare(
                queue,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;
        let _ = self
            .channel
            .basic_publish(
                "",
                queue,
                BasicPublishOptions::default(),
                &item.encode(),
                BasicProperties::default(),
            )
            .await?;
        Ok(())
    }

    pub async fn close(self) -> lapin::Result<()> {
        self.connection.close(200, "done").await
    }
}
