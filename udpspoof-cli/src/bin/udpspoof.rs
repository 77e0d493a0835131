//! Inject one UDP frame with arbitrary source addresses

use clap::Parser;
use std::net::SocketAddr;
use std::process::ExitCode;
use tracing::{error, info};
use udpspoof_cli::{init_tracing, resolve_frame_spec, resolve_interface, SpoofArgs};
use udpspoof_core::Result;
use udpspoof_link::{send_frame, DatalinkInjector};

fn run(args: &SpoofArgs) -> Result<()> {
    let iface = resolve_interface(&args.interface)?;
    let spec = resolve_frame_spec(args, &iface)?;

    info!(
        source = %SocketAddr::new(spec.source_ip(), spec.source_port()),
        mac = %spec.source_mac(),
        "Source"
    );
    info!(
        destination = %SocketAddr::new(spec.dest_ip(), spec.dest_port()),
        mac = %spec.dest_mac(),
        "Destination"
    );

    let mut injector = DatalinkInjector::for_interface(&iface)?;
    send_frame(&mut injector, &spec)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = SpoofArgs::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
