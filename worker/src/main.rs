mod broker;
mod consumer;

use appendlib::Appender;
use broker::Broker;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Queue worker that appends received job data to per-job files.
#[derive(Debug, Parser)]
struct Args {
    /// AMQP url for the broker, including credentials and vhost
    #[clap(long, env = "AMQP_URL")]
    amqp_url: String,
    /// name of the work queue to consume
    #[clap(long, env = "WORK_QUEUE", default_value = "send_data")]
    queue: String,
    /// base directory for job output files, created if absent
    #[clap(long, env = "DATA_DIR", default_value = "data")]
    data_dir: String,
    /// number of consumer tasks to run in this process
    #[clap(long, default_value = "1")]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args = Args::parse();

    let appender = Appender::new(&args.data_dir)?;
    let broker = Broker::connect(&args.amqp_url).await?;
    info!(queue = %args.queue, data_dir = %args.data_dir, "connected to broker");

    let mut consumers = Vec::with_capacity(args.concurrency);
    for i in 0..args.concurrency {
        let tag = format!("append-worker-{}", i);
        let work_queue = broker.work_queue(&args.queue, &tag).await?;
        consumers.push(tokio::spawn(consumer::run(work_queue, appender.clone())));
    }

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    // unacked deliveries return to the queue once the connection closes
    broker.close().await?;
    for task in consumers {
        task.abort();
    }
    Ok(())
}

fn init_logging() {
    let log_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(log_filter).init();
}
