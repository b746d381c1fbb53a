//! 외부 MRT 디코더 프로세스 리더
//!
//! 설정된 디코더 명령(`reader.decoder_command`)에 덤프 경로를 마지막 인자로 붙여 실행하고,
//! stdout을 JSON lines로 지연 파싱합니다. 디코더의 stderr는 그대로 상속됩니다.
//!
//! 스트림 끝에서 종료 코드를 확인하며, 0이 아니면 잘린 출력으로 간주해 에러를 냅니다.

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use serde_json::Value;

use super::{DumpReader, JsonLines, RecordStream};
use crate::error::ShipperError;

/// 외부 디코더 명령으로 덤프를 읽는 리더
#[derive(Debug, Clone)]
pub struct DecoderCommandReader {
    program: String,
    args: Vec<String>,
}

impl DecoderCommandReader {
    /// 명령과 인자 목록으로 리더를 생성합니다. 비어 있으면 `None`을 반환합니다.
    pub fn new(command: Vec<String>) -> Option<Self> {
        let mut words = command.into_iter();
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    /// 디코더 프로그램
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl DumpReader for DecoderCommandReader {
    fn name(&self) -> &str {
        "decoder"
    }

    fn read(&self, path: &Path) -> Result<RecordStream, ShipperError> {
        // 디코더마다 다른 "파일 없음" 출력을 피하려고 먼저 확인
        fs::metadata(path)
            .map_err(|e| ShipperError::read(path, format!("cannot open dump: {}", e)))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                ShipperError::read(
                    path,
                    format!("failed to spawn decoder '{}': {}", self.program, e),
                )
            })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ShipperError::read(path, "decoder stdout unavailable"));
        };

        tracing::debug!(
            path = %path.display(),
            program = %self.program,
            pid = child.id(),
            "decoder spawned"
        );

        Ok(Box::new(DecoderStream {
            lines: JsonLines::new(path.to_path_buf(), BufReader::new(stdout)),
            child,
            finished: false,
        }))
    }
}

struct DecoderStream {
    lines: JsonLines<BufReader<ChildStdout>>,
    child: Child,
    finished: bool,
}

impl DecoderStream {
    fn path(&self) -> PathBuf {
        self.lines.path().to_path_buf()
    }

    fn finish(&mut self) -> Option<Result<Value, ShipperError>> {
        self.finished = true;
        match self.child.wait() {
            Ok(status) if status.success() => None,
            Ok(status) => Some(Err(ShipperError::read(
                self.path(),
                format!("decoder exited with {}", status),
            ))),
            Err(e) => Some(Err(ShipperError::read(
                self.path(),
                format!("failed to wait for decoder: {}", e),
            ))),
        }
    }

    fn abort(&mut self) {
        self.finished = true;
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Iterator for DecoderStream {
    type Item = Result<Value, ShipperError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lines.next() {
            Some(Ok(value)) => Some(Ok(value)),
            Some(Err(e)) => {
                self.abort();
                Some(Err(e))
            }
            None => self.finish(),
        }
    }
}

impl Drop for DecoderStream {
    fn drop(&mut self) {
        if !self.finished {
            self.abort();
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serde_json::json;

    fn sh(script: &str) -> DecoderCommandReader {
        // sh -c 에서 마지막 인자(덤프 경로)는 $0
        DecoderCommandReader::new(vec!["sh".into(), "-c".into(), script.into()])
            .expect("non-empty command")
    }

    fn dump(contents: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        fs::write(file.path(), contents).expect("write dump");
        file
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(DecoderCommandReader::new(Vec::new()).is_none());
    }

    #[test]
    fn streams_decoder_stdout() {
        let file = dump("{\"a\":1}\n{\"a\":2}\n");
        let records: Vec<Value> = sh("cat \"$0\"")
            .read(file.path())
            .expect("spawn")
            .collect::<Result<_, _>>()
            .expect("valid output");
        assert_eq!(records, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn dump_path_is_last_argument() {
        let file = dump("");
        let reader = DecoderCommandReader::new(vec![
            "sh".into(),
            "-c".into(),
            "printf '{\"flag\":\"%s\",\"path\":\"%s\"}\\n' \"$1\" \"$2\"".into(),
            "decoder".into(),
            "-m".into(),
        ])
        .expect("non-empty command");
        let records: Vec<Value> = reader
            .read(file.path())
            .expect("spawn")
            .collect::<Result<_, _>>()
            .expect("valid output");
        assert_eq!(records[0]["flag"], "-m");
        assert_eq!(records[0]["path"], file.path().to_string_lossy().as_ref());
    }

    #[test]
    fn non_zero_exit_is_read_error() {
        let file = dump("{\"a\":1}\n");
        let results: Vec<_> = sh("cat \"$0\"; exit 3")
            .read(file.path())
            .expect("spawn")
            .collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(ShipperError::Read { reason, .. }) => assert!(reason.contains("exit")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn malformed_output_is_read_error() {
        let file = dump("not json\n");
        let results: Vec<_> = sh("cat \"$0\"").read(file.path()).expect("spawn").collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(ShipperError::Read { .. })));
    }

    #[test]
    fn spawn_failure_is_read_error() {
        let file = dump("");
        let reader = DecoderCommandReader::new(vec!["/nonexistent/bgpship-decoder".into()])
            .expect("non-empty command");
        match reader.read(file.path()) {
            Err(ShipperError::Read { reason, .. }) => assert!(reason.contains("spawn")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("spawn should fail"),
        }
    }

    #[test]
    fn missing_dump_is_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = sh("cat \"$0\"").read(&dir.path().join("absent"));
        assert!(matches!(result, Err(ShipperError::Read { .. })));
    }

    #[test]
    fn dropping_stream_early_reaps_child() {
        let file = dump("{\"a\":1}\n");
        let mut stream = sh("cat \"$0\"; sleep 5").read(file.path()).expect("spawn");
        assert!(stream.next().is_some());
        drop(stream);
    }
}
