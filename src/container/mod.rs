pub mod reader;

pub use reader::ContainerReader;

use bytes::Bytes;

/// コンテナ内の長さ付きレコード1件
#[derive(Debug, Clone)]
pub struct PacketRecord {
    /// 1始まりの位置
    pub index: u32,
    pub declared_length: u32,
    pub payload: Bytes,
}
