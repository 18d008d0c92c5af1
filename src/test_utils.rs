//! テスト用のヘッダ/コンテナビルダー

use crate::core::config::ByteOrder;

#[derive(Debug, Clone)]
pub struct Ipv4HeaderBuilder {
    bytes: [u8; 20],
}

impl Default for Ipv4HeaderBuilder {
    fn default() -> Self {
        let mut bytes = [0u8; 20];
        bytes[0] = 0x45;
        bytes[8] = 64;
        bytes[9] = 6;
        Self { bytes }
    }
}

impl Ipv4HeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(mut self, flags: u8) -> Self {
        self.bytes[6] = (self.bytes[6] & 0x1f) | (flags << 5);
        self
    }

    pub fn protocol(mut self, protocol: u8) -> Self {
        self.bytes[9] = protocol;
        self
    }

    pub fn source(mut self, addr: [u8; 4]) -> Self {
        self.bytes[12..16].copy_from_slice(&addr);
        self
    }

    pub fn destination(mut self, addr: [u8; 4]) -> Self {
        self.bytes[16..20].copy_from_slice(&addr);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

/// `[count][len][payload]...` 形式のコンテナを組み立てる
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    byte_order: ByteOrder,
    count: Option<u32>,
    records: Vec<Vec<u8>>,
    trailer: Vec<u8>,
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Native,
            count: None,
            records: Vec::new(),
            trailer: Vec::new(),
        }
    }
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// レコード数と異なるカウントを書き込む
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn record(mut self, payload: Vec<u8>) -> Self {
        self.records.push(payload);
        self
    }

    /// 最後に生バイトを追記する (切り詰めたレコードの再現用)
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.trailer.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let count = self.count.unwrap_or(self.records.len() as u32);
        let mut out = self.byte_order.u32_to_bytes(count).to_vec();
        for payload in &self.records {
            out.extend_from_slice(&self.byte_order.u32_to_bytes(payload.len() as u32));
            out.extend_from_slice(payload);
        }
        out.extend_from_slice(&self.trailer);
        out
    }
}
