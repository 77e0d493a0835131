//! Log every UDP datagram arriving on a port

use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use udpspoof_cli::{init_tracing, Receiver, ReceiverArgs};

#[tokio::main]
async fn main() -> ExitCode {
    let args = ReceiverArgs::parse();
    init_tracing(args.verbose);

    let result = match Receiver::bind(args.listen).await {
        Ok(receiver) => receiver.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
