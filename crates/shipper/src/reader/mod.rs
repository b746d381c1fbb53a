//! 덤프 리더 -- 덤프 파일을 원시 레코드 스트림으로 변환
//!
//! 각 리더는 [`DumpReader`] trait을 구현하며, 파일 경로를 받아 지연 평가되는
//! 레코드 스트림([`RecordStream`])을 반환합니다. 스트림은 한 번만 순회할 수 있습니다.
//!
//! # 구현체
//! - [`JsonLinesReader`]: 한 줄에 JSON 레코드 하나 (사전 디코딩된 덤프, 테스트)
//! - [`DecoderCommandReader`]: 외부 MRT 디코더 프로세스의 stdout을 JSON lines로 읽음
//!
//! 손상된 덤프, 잘린 파일, 없는 파일은 모두 [`ShipperError::Read`]로 보고되며
//! 절대 조용히 건너뛰지 않습니다.

pub mod decoder;
pub mod json_lines;

pub use decoder::DecoderCommandReader;
pub use json_lines::JsonLinesReader;

use std::io::BufRead;
use std::path::{Path, PathBuf};

use bgpship_core::ConfigError;
use bgpship_core::config::{ReaderConfig, ReaderKind};
use serde_json::Value;

use crate::error::ShipperError;

/// 원시 레코드 스트림
pub type RecordStream = Box<dyn Iterator<Item = Result<Value, ShipperError>> + Send>;

/// 덤프 파일을 원시 레코드 스트림으로 읽는 trait
pub trait DumpReader: Send + Sync {
    /// 리더 이름 (로그용)
    fn name(&self) -> &str;

    /// 덤프 파일을 열어 레코드 스트림을 반환합니다.
    fn read(&self, path: &Path) -> Result<RecordStream, ShipperError>;
}

/// 설정에 맞는 리더를 생성합니다.
pub fn reader_from_config(config: &ReaderConfig) -> Result<Box<dyn DumpReader>, ShipperError> {
    match config.kind {
        ReaderKind::JsonLines => Ok(Box::new(JsonLinesReader::new())),
        ReaderKind::Decoder => {
            let reader = DecoderCommandReader::new(config.decoder_command.clone()).ok_or_else(
                || ConfigError::MissingValue {
                    field: "reader.decoder_command".to_owned(),
                },
            )?;
            Ok(Box::new(reader))
        }
    }
}

/// 줄 단위 JSON 파서 -- 두 리더가 공유
///
/// 빈 줄은 건너뛰고, 첫 에러 이후에는 더 이상 값을 내지 않습니다.
pub(crate) struct JsonLines<R> {
    path: PathBuf,
    lines: std::io::Lines<R>,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> JsonLines<R> {
    pub(crate) fn new(path: PathBuf, source: R) -> Self {
        Self {
            path,
            lines: source.lines(),
            line_no: 0,
            failed: false,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn fail(&mut self, reason: String) -> Option<Result<Value, ShipperError>> {
        self.failed = true;
        Some(Err(ShipperError::read(&self.path, reason)))
    }
}

impl<R: BufRead> Iterator for JsonLines<R> {
    type Item = Result<Value, ShipperError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    let reason = format!("line {}: {}", self.line_no + 1, e);
                    return self.fail(reason);
                }
            };
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return match serde_json::from_str(trimmed) {
                Ok(value) => Some(Ok(value)),
                Err(e) => {
                    let reason = format!("line {}: malformed record: {}", self.line_no, e);
                    self.fail(reason)
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(input: &str) -> Vec<Result<Value, ShipperError>> {
        JsonLines::new(PathBuf::from("/tmp/test"), input.as_bytes()).collect()
    }

    #[test]
    fn parses_each_line_in_order() {
        let records = parse("{\"a\":1}\n{\"a\":2}\n");
        let values: Vec<Value> = records.into_iter().map(|r| r.expect("valid")).collect();
        assert_eq!(values, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn skips_blank_lines() {
        let records = parse("\n{\"a\":1}\n   \n\n{\"a\":2}");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn malformed_line_reports_line_number_and_stops() {
        let records = parse("{\"a\":1}\n{\"a\":\n{\"a\":3}\n");
        assert_eq!(records.len(), 2);
        assert!(records[0].is_ok());
        match &records[1] {
            Err(ShipperError::Read { reason, .. }) => assert!(reason.starts_with("line 2:")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn reader_from_config_picks_kind() {
        let config = ReaderConfig {
            kind: ReaderKind::JsonLines,
            decoder_command: Vec::new(),
        };
        let reader = reader_from_config(&config).expect("json lines reader");
        assert_eq!(reader.name(), "json_lines");

        let reader = reader_from_config(&ReaderConfig::default()).expect("decoder reader");
        assert_eq!(reader.name(), "decoder");
    }

    #[test]
    fn reader_from_config_rejects_empty_decoder_command() {
        let config = ReaderConfig {
            kind: ReaderKind::Decoder,
            decoder_command: Vec::new(),
        };
        assert!(matches!(
            reader_from_config(&config),
            Err(ShipperError::Core(_))
        ));
    }
}
