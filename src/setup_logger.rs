use crate::core::config::LoggingConfig;
use env_logger::{Builder, Target};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};

/// 標準出力はレポート用なので、ログは標準エラーへ出す。
/// ファイルが指定されていればそちらにも追記する。
pub fn setup_logger(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::new();

    builder
        // ログレベルの設定
        .filter_level(config.level)
        // タイムスタンプ付きのフォーマット
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        });

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(Target::Pipe(Box::new(StderrAndFile { file })));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder.try_init()?;
    Ok(())
}

struct StderrAndFile {
    file: File,
}

impl Write for StderrAndFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}
