pub mod ipv4;
pub mod protocol;

use crate::container::PacketRecord;
use crate::core::error::RecordError;
use crate::network::packet::ipv4::IPv4Header;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Packet {
    pub index: u32,
    pub header: IPv4Header,
    pub metadata: PacketMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct PacketMetadata {
    pub declared_length: u32,
    /// IHL をバイトに換算した値
    pub header_length: usize,
    pub protocol_name: Option<&'static str>,
    pub dont_fragment: bool,
    pub more_fragments: bool,
}

impl Packet {
    /// レコードを1回だけ消費してヘッダを解析する
    pub fn decode(record: PacketRecord) -> Result<Self, RecordError> {
        let header = IPv4Header::parse(&record.payload).map_err(|source| RecordError::Decode {
            index: record.index,
            source,
        })?;

        let metadata = PacketMetadata {
            declared_length: record.declared_length,
            header_length: header.header_length_bytes(),
            protocol_name: header.protocol_name(),
            dont_fragment: header.dont_fragment(),
            more_fragments: header.more_fragments(),
        };

        Ok(Packet {
            index: record.index,
            header,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DecodeError;
    use crate::test_utils::Ipv4HeaderBuilder;
    use bytes::Bytes;

    fn record(index: u32, payload: Vec<u8>) -> PacketRecord {
        PacketRecord {
            index,
            declared_length: payload.len() as u32,
            payload: Bytes::from(payload),
        }
    }

    #[test]
    fn test_decode_carries_index_and_metadata() {
        let payload = Ipv4HeaderBuilder::new().protocol(17).flags(0b010).build();
        let packet = Packet::decode(record(3, payload)).unwrap();

        assert_eq!(packet.index, 3);
        assert_eq!(packet.metadata.declared_length, 20);
        assert_eq!(packet.metadata.header_length, 20);
        assert_eq!(packet.metadata.protocol_name, Some("UDP"));
        assert!(packet.metadata.dont_fragment);
        assert!(!packet.metadata.more_fragments);
    }

    #[test]
    fn test_header_length_follows_ihl() {
        let mut payload = Ipv4HeaderBuilder::new().build();
        payload[0] = 0x4f;
        payload.resize(60, 0);
        let packet = Packet::decode(record(1, payload)).unwrap();

        assert_eq!(packet.header.ihl, 15);
        assert_eq!(packet.metadata.header_length, 60);
        assert_eq!(packet.metadata.declared_length, 60);
    }

    #[test]
    fn test_decode_error_reports_packet_index() {
        let err = Packet::decode(record(7, vec![0x45; 12])).unwrap_err();
        assert_eq!(err.index(), Some(7));
        assert!(matches!(
            err,
            RecordError::Decode {
                index: 7,
                source: DecodeError::HeaderTooShort { length: 12 }
            }
        ));
    }

    #[test]
    fn test_empty_record_is_a_decode_error_not_a_panic() {
        let err = Packet::decode(record(1, Vec::new())).unwrap_err();
        assert_eq!(err.to_string(), "Packet 1: header too short: need 20 bytes, have 0");
    }
}
