//! Example: Building a spoofed UDP frame
//!
//! This example builds the same datagram over IPv4 and IPv6 and dumps the
//! resulting frames.

use udpspoof_core::MacAddr;
use udpspoof_packet::{build_frame, FrameSpec, ParsedFrame};

fn main() {
    let src_mac = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
    let dst_mac = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x02]);

    for (src_ip, dst_ip) in [("10.0.0.1", "10.0.0.2"), ("2001:db8::1", "2001:db8::2")] {
        let spec = FrameSpec::builder()
            .source_mac(src_mac)
            .dest_mac(dst_mac)
            .source_ip(src_ip.parse().expect("valid source address"))
            .dest_ip(dst_ip.parse().expect("valid destination address"))
            .source_port(9999)
            .dest_port(8888)
            .payload(vec![0xDE, 0xAD, 0xBE, 0xEF])
            .build()
            .expect("Failed to describe frame");

        let frame = build_frame(&spec).expect("Failed to build frame");
        let parsed = ParsedFrame::parse(&frame).expect("Failed to parse frame");

        println!("{} frame built successfully!", spec.ip_version());
        println!("Total size: {} bytes", frame.len());
        println!("Ethernet header: {:02X?}", &frame[..14]);
        println!(
            "{}:{} -> {}:{}",
            parsed.ip.source(),
            parsed.udp.source_port,
            parsed.ip.destination(),
            parsed.udp.destination_port
        );
        println!("UDP checksum: 0x{:04X}", parsed.udp.checksum.unwrap_or(0));
        println!("Checksums valid: {}", parsed.verify_checksums());
        println!();
    }
}
