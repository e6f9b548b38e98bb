use clap::{Parser, Subcommand};

/// Publish work items to the append worker's queue
#[derive(Debug, Parser)]
pub struct ArgParser {
    /// AMQP url for the broker, including credentials and vhost
    #[clap(long, env = "AMQP_URL")]
    pub amqp_url: String,
    /// name of the work queue
    #[clap(long, env = "WORK_QUEUE", default_value = "send_data")]
    pub queue: String,
    /// The sub-command to use
    #[clap(subcommand)]
    pub sub_command: SubCommand,
}

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum SubCommand {
    /// append a chunk of data to a job's output file
    Send {
        /// job identifier, also the name of the output file
        job_id: String,
        /// the data to append; a newline is added by the worker
        data: String,
    },
}
