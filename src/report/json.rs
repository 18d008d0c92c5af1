use crate::core::error::RecordError;
use crate::dissect::DissectSummary;
use crate::network::packet::Packet;
use crate::report::PacketReporter;
use serde::Serialize;
use std::io::{self, Write};

/// 1行1オブジェクトの JSON Lines 出力
pub struct JsonReporter<W> {
    out: W,
}

#[derive(Serialize)]
struct FileLine<'a> {
    file: &'a str,
    packet_count: u32,
}

#[derive(Serialize)]
struct ErrorLine {
    index: Option<u32>,
    error: String,
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    summary: &'a DissectSummary,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> PacketReporter for JsonReporter<W> {
    fn begin(&mut self, path: &str, packet_count: u32) -> io::Result<()> {
        self.write_line(&FileLine { file: path, packet_count })
    }

    fn packet(&mut self, packet: &Packet) -> io::Result<()> {
        self.write_line(packet)
    }

    fn record_error(&mut self, error: &RecordError) -> io::Result<()> {
        self.write_line(&ErrorLine {
            index: error.index(),
            error: error.to_string(),
        })
    }

    fn finish(&mut self, summary: &DissectSummary) -> io::Result<()> {
        self.write_line(&SummaryLine { summary })?;
        self.out.flush()
    }
}
