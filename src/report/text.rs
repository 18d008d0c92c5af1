use crate::core::error::RecordError;
use crate::dissect::DissectSummary;
use crate::network::packet::Packet;
use crate::report::PacketReporter;
use std::io::{self, Write};

/// フィールドごとに1行のテキスト出力。エラーは別ストリームへ。
pub struct TextReporter<W, E> {
    out: W,
    err: E,
}

impl<W: Write, E: Write> TextReporter<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<W: Write, E: Write> PacketReporter for TextReporter<W, E> {
    fn begin(&mut self, path: &str, packet_count: u32) -> io::Result<()> {
        writeln!(self.out, "==== File {} contains {} Packets.", path, packet_count)
    }

    fn packet(&mut self, packet: &Packet) -> io::Result<()> {
        let header = &packet.header;
        let out = &mut self.out;

        writeln!(out, "==>Packet {}", packet.index)?;
        writeln!(out, "Version:\t\t{}", hex_u8(header.version))?;
        writeln!(out, "IHL (Header Length):\t\t{}", hex_u8(header.ihl))?;
        writeln!(out, "Type of Service (TOS):\t\t{}", hex_u8(header.type_of_service))?;
        writeln!(out, "Total Length:\t\t{}", hex_u16(header.total_length))?;
        writeln!(out, "Identification:\t\t{}", hex_u16_or_zero(header.identification))?;
        writeln!(out, "IP Flags:\t\t{}", hex_u8(header.flags))?;
        writeln!(out, "Fragment Offset:\t\t{}", hex_u16_or_zero(header.fragment_offset))?;
        writeln!(out, "Time To Live (TTL):\t\t{}", hex_u8(header.ttl))?;
        match header.protocol_name() {
            Some(name) => writeln!(out, "Protocol:\t\t{} {}", name, hex_u8(header.protocol))?,
            None => writeln!(out, "Protocol:\t\t{}", hex_u8(header.protocol))?,
        }
        writeln!(out, "Header Checksum:\t\t{}", hex_u16(header.header_checksum))?;
        writeln!(out, "Source Address:\t\t{}", header.source)?;
        writeln!(out, "Destination Address:\t\t{}", header.destination)?;
        Ok(())
    }

    fn record_error(&mut self, error: &RecordError) -> io::Result<()> {
        // ブロック番号を欠番にしない
        if let Some(index) = error.index() {
            writeln!(self.out, "==>Packet {}", index)?;
        }
        writeln!(self.err, "{}", error)
    }

    fn finish(&mut self, _summary: &DissectSummary) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }
}

fn hex_u8(value: u8) -> String {
    format!("{:#04x} ({})", value, value)
}

fn hex_u16(value: u16) -> String {
    format!("{:#06x} ({})", value, value)
}

/// Identification と Fragment Offset はゼロのとき `0x0` と表示する
fn hex_u16_or_zero(value: u16) -> String {
    if value == 0 {
        "0x0 (0)".to_string()
    } else {
        hex_u16(value)
    }
}
