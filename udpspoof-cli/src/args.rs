//! CLI argument parsing
//!
//! Flags for the `udpspoof` injector and the `udpreceiver` listener.

use clap::Parser;
use std::net::SocketAddr;

/// Interface used when `--interface` is not given
pub const DEFAULT_INTERFACE: &str = "en0";
/// Payload sent when `--payload` is not given
pub const DEFAULT_PAYLOAD_HEX: &str = "DEADBEEF";
pub const DEFAULT_SOURCE_PORT: u16 = 9999;
/// Matches the receiver's default listen port
pub const DEFAULT_DEST_PORT: u16 = 8888;
/// All addresses, both families, on the default destination port
pub const DEFAULT_LISTEN: &str = "[::]:8888";

#[derive(Parser, Debug, Clone)]
#[command(name = "udpspoof")]
#[command(
    version,
    about = "Inject a single UDP frame with arbitrary source MAC, IP and port",
    long_about = None
)]
pub struct SpoofArgs {
    /// Network interface for frame injection
    #[arg(short = 'i', long, default_value = DEFAULT_INTERFACE)]
    pub interface: String,

    /// MAC address in the Ethernet source (default is the interface MAC)
    #[arg(long, value_name = "MAC")]
    pub source_mac: Option<String>,

    /// Sending address in the IP header (default is the interface address)
    #[arg(long, value_name = "IP")]
    pub source_ip: Option<String>,

    /// UDP source port
    #[arg(long, value_name = "PORT", default_value_t = DEFAULT_SOURCE_PORT)]
    pub source_port: u16,

    /// MAC address of the destination host or gateway
    #[arg(long, value_name = "MAC")]
    pub dest_mac: String,

    /// Destination IP address
    #[arg(long, value_name = "IP")]
    pub dest_ip: String,

    /// UDP destination port
    #[arg(long, value_name = "PORT", default_value_t = DEFAULT_DEST_PORT)]
    pub dest_port: u16,

    /// UDP payload in hex, optionally prefixed with 0x
    #[arg(short = 'p', long, value_name = "HEX", default_value = DEFAULT_PAYLOAD_HEX)]
    pub payload: String,

    /// Verbose output (-v, -vv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "udpreceiver")]
#[command(version, about = "Log every UDP datagram received on a port", long_about = None)]
pub struct ReceiverArgs {
    /// Address and port to listen on
    #[arg(short = 'l', long, value_name = "ADDR", default_value = DEFAULT_LISTEN)]
    pub listen: SocketAddr,

    /// Verbose output (-v, -vv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_spoof_args_valid() {
        SpoofArgs::command().debug_assert();
    }

    #[test]
    fn test_receiver_args_valid() {
        ReceiverArgs::command().debug_assert();
    }

    #[test]
    fn test_spoof_defaults() {
        let args = SpoofArgs::try_parse_from([
            "udpspoof",
            "--dest-mac",
            "02:00:00:00:00:02",
            "--dest-ip",
            "10.0.0.2",
        ])
        .unwrap();

        assert_eq!(args.interface, "en0");
        assert_eq!(args.source_mac, None);
        assert_eq!(args.source_ip, None);
        assert_eq!(args.source_port, 9999);
        assert_eq!(args.dest_port, 8888);
        assert_eq!(args.payload, "DEADBEEF");
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_spoof_all_flags() {
        let args = SpoofArgs::try_parse_from([
            "udpspoof",
            "-i",
            "eth1",
            "--source-mac",
            "AB-CD-EF-01-02-03",
            "--source-ip",
            "192.0.2.1",
            "--source-port",
            "53",
            "--dest-mac",
            "02:00:00:00:00:02",
            "--dest-ip",
            "192.0.2.2",
            "--dest-port",
            "5353",
            "-p",
            "0xCAFE",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.interface, "eth1");
        assert_eq!(args.source_mac.as_deref(), Some("AB-CD-EF-01-02-03"));
        assert_eq!(args.source_port, 53);
        assert_eq!(args.dest_port, 5353);
        assert_eq!(args.payload, "0xCAFE");
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_spoof_requires_destination() {
        assert!(SpoofArgs::try_parse_from(["udpspoof", "--dest-ip", "10.0.0.2"]).is_err());
        assert!(SpoofArgs::try_parse_from(["udpspoof", "--dest-mac", "02:00:00:00:00:02"]).is_err());
    }

    #[test]
    fn test_receiver_defaults() {
        let args = ReceiverArgs::try_parse_from(["udpreceiver"]).unwrap();
        assert_eq!(args.listen, "[::]:8888".parse().unwrap());

        let args = ReceiverArgs::try_parse_from(["udpreceiver", "-l", "127.0.0.1:9000"]).unwrap();
        assert_eq!(args.listen.port(), 9000);
    }
}
