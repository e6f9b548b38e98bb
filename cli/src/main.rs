mod arg_parser;
mod publisher;

use appendlib::WorkItem;
use arg_parser::{ArgParser, SubCommand};
use publisher::Publisher;

use clap::Parser;
use std::error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn error::Error>> {
    let args = ArgParser::parse();
    let publisher = Publisher::connect(&args.amqp_url).await?;

    match args.sub_command {
        SubCommand::Send { job_id, data } => {
            publisher
                .send(&args.queue, &WorkItem { job_id, data })
                .await?;
        }
    }

    publisher.close().await?;
    Ok(())
}
