pub mod json;
pub mod text;

pub use json::JsonReporter;
pub use text::TextReporter;

use crate::core::error::RecordError;
use crate::dissect::DissectSummary;
use crate::network::packet::Packet;
use std::io;

/// 解析結果の出力先
pub trait PacketReporter {
    fn begin(&mut self, path: &str, packet_count: u32) -> io::Result<()>;

    fn packet(&mut self, packet: &Packet) -> io::Result<()>;

    fn record_error(&mut self, error: &RecordError) -> io::Result<()>;

    fn finish(&mut self, summary: &DissectSummary) -> io::Result<()>;
}
