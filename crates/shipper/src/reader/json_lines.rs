//! JSON lines 덤프 리더

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{DumpReader, JsonLines, RecordStream};
use crate::error::ShipperError;

/// 한 줄에 JSON 레코드 하나씩 담긴 파일을 읽습니다.
///
/// 외부 도구로 미리 디코딩된 덤프나 테스트 픽스처에 사용합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesReader;

impl JsonLinesReader {
    /// 새 리더를 생성합니다.
    pub fn new() -> Self {
        Self
    }
}

impl DumpReader for JsonLinesReader {
    fn name(&self) -> &str {
        "json_lines"
    }

    fn read(&self, path: &Path) -> Result<RecordStream, ShipperError> {
        let file = File::open(path)
            .map_err(|e| ShipperError::read(path, format!("cannot open dump: {}", e)))?;
        tracing::debug!(path = %path.display(), reader = self.name(), "reading dump");
        Ok(Box::new(JsonLines::new(
            path.to_path_buf(),
            BufReader::new(file),
        )))
    }
}
