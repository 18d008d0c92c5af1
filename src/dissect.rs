use crate::container::ContainerReader;
use crate::core::config::{Configuration, RecordErrorPolicy};
use crate::core::error::{DissectError, DissectResult, RecordError};
use crate::network::packet::Packet;
use crate::report::PacketReporter;
use log::{info, warn};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DissectSummary {
    pub packet_count: u32,
    pub decoded: u32,
    pub failed: u32,
    /// ストリームが途中で終わったため読めなかったレコード数
    pub unread: u32,
}

pub fn dissect_file(
    path: &Path,
    config: &Configuration,
    reporter: &mut dyn PacketReporter,
) -> DissectResult<DissectSummary> {
    let reader = ContainerReader::open(path, &config.input)?;
    // UTF-8 でないファイル名も表示用に変換する
    dissect(reader, &path.display().to_string(), config, reporter)
}

/// コンテナを先頭から順に読み、レコードごとにヘッダを解析して出力する
pub fn dissect<R: Read>(
    mut reader: ContainerReader<R>,
    path: &str,
    config: &Configuration,
    reporter: &mut dyn PacketReporter,
) -> DissectResult<DissectSummary> {
    let packet_count = reader.read_packet_count()?;
    info!("{} に {} 個のパケットがあります", path, packet_count);
    reporter.begin(path, packet_count).map_err(DissectError::Output)?;

    let mut summary = DissectSummary {
        packet_count,
        ..Default::default()
    };

    let mut records = reader.records(packet_count);
    while let Some(result) = records.next() {
        let outcome = result.map_err(RecordError::from).and_then(Packet::decode);
        match outcome {
            Ok(packet) => {
                reporter.packet(&packet).map_err(DissectError::Output)?;
                summary.decoded += 1;
            }
            Err(error) => {
                warn!("パケットの解析に失敗しました: {}", error);
                reporter.record_error(&error).map_err(DissectError::Output)?;
                summary.failed += 1;

                if config.input.on_record_error == RecordErrorPolicy::Abort {
                    summary.unread = records.remaining();
                    reporter.finish(&summary).map_err(DissectError::Output)?;
                    return Err(DissectError::Aborted {
                        index: packet_count - records.remaining(),
                        packet_count,
                    });
                }
            }
        }
    }

    summary.unread = records.remaining();
    reporter.finish(&summary).map_err(DissectError::Output)?;
    info!(
        "解析完了: {} 件成功, {} 件失敗, {} 件未読",
        summary.decoded, summary.failed, summary.unread
    );

    // 最後のレコードが切り詰められていても未読は0になる
    if reader.is_exhausted() {
        return Err(DissectError::Incomplete {
            index: packet_count - summary.unread,
            packet_count,
            unread: summary.unread,
        });
    }
    Ok(summary)
}
