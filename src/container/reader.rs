use crate::container::PacketRecord;
use crate::core::config::{ByteOrder, InputConfig};
use crate::core::error::{ContainerError, RecordPart};
use bytes::Bytes;
use log::debug;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

const FIELD_LEN: usize = 4;

/// `[u32 count]` に続いて `[u32 len][payload]` が count 個並ぶコンテナのリーダー
pub struct ContainerReader<R> {
    inner: R,
    byte_order: ByteOrder,
    max_payload_size: usize,
    next_index: u32,
    exhausted: bool,
}

impl ContainerReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, config: &InputConfig) -> Result<Self, ContainerError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ContainerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), config))
    }
}

impl<R: Read> ContainerReader<R> {
    pub fn new(inner: R, config: &InputConfig) -> Self {
        Self {
            inner,
            byte_order: config.byte_order,
            max_payload_size: config.max_payload_size,
            next_index: 0,
            exhausted: false,
        }
    }

    /// ストリームが途中で終わった、または読み取りに失敗した
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn read_packet_count(&mut self) -> Result<u32, ContainerError> {
        let mut field = [0u8; FIELD_LEN];
        let got = self.read_field(&mut field)?;
        if got < FIELD_LEN {
            self.exhausted = true;
            return Err(ContainerError::TruncatedStream { available: got });
        }
        Ok(self.byte_order.u32_from_bytes(field))
    }

    pub fn read_next_record(&mut self) -> Result<PacketRecord, ContainerError> {
        self.next_index += 1;
        let index = self.next_index;

        let mut field = [0u8; FIELD_LEN];
        let got = self.read_field(&mut field)?;
        if got < FIELD_LEN {
            self.exhausted = true;
            return Err(ContainerError::TruncatedRecord {
                index,
                part: RecordPart::LengthPrefix,
                expected: FIELD_LEN,
                available: got,
            });
        }
        let declared_length = self.byte_order.u32_from_bytes(field);

        if declared_length as usize > self.max_payload_size {
            // 容量を超えるペイロードはバッファせず読み捨てて位置を合わせる
            let copied = io::copy(
                &mut self.inner.by_ref().take(declared_length as u64),
                &mut io::sink(),
            );
            let skipped = copied.map_err(|e| self.fail(e))?;
            if skipped < declared_length as u64 {
                self.exhausted = true;
            }
            return Err(ContainerError::RecordTooLarge {
                index,
                declared: declared_length,
                capacity: self.max_payload_size,
            });
        }

        // レコードごとに新しいバッファを用意し、実際に読めた分だけ伸ばす
        let mut payload = Vec::new();
        let read = self
            .inner
            .by_ref()
            .take(declared_length as u64)
            .read_to_end(&mut payload);
        let got = read.map_err(|e| self.fail(e))?;
        if got < declared_length as usize {
            self.exhausted = true;
            return Err(ContainerError::TruncatedRecord {
                index,
                part: RecordPart::Payload,
                expected: declared_length as usize,
                available: got,
            });
        }

        debug!("パケット {} を読み込みました ({} バイト)", index, declared_length);
        Ok(PacketRecord {
            index,
            declared_length,
            payload: Bytes::from(payload),
        })
    }

    /// 最大 `count` 個のレコードを遅延で読み出すイテレータ
    pub fn records(&mut self, count: u32) -> Records<'_, R> {
        Records {
            reader: self,
            remaining: count,
        }
    }

    fn read_field(&mut self, field: &mut [u8; FIELD_LEN]) -> Result<usize, ContainerError> {
        let mut filled = 0;
        while filled < field.len() {
            match self.inner.read(&mut field[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.fail(e)),
            }
        }
        Ok(filled)
    }

    fn fail(&mut self, err: io::Error) -> ContainerError {
        self.exhausted = true;
        ContainerError::Read(err)
    }
}

pub struct Records<'a, R> {
    reader: &'a mut ContainerReader<R>,
    remaining: u32,
}

impl<R> Records<'_, R> {
    /// まだ読まれていないレコード数
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = Result<PacketRecord, ContainerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.reader.is_exhausted() {
            return None;
        }
        self.remaining -= 1;
        Some(self.reader.read_next_record())
    }
}
