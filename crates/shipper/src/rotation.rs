//! 덤프 파일 로테이션
//!
//! 외부 라우팅 데몬이 계속 추가 기록하는 활성 덤프 파일을 스테이징 경로로 넘기고,
//! 활성 경로에 빈 파일을 즉시 다시 만든 뒤, 스테이징 파일 전체를 누적 로그에 덧붙입니다.
//! 이 로테이션이 외부 기록자와의 유일한 동기화 지점입니다.
//!
//! # 전략
//! - [`RotationStrategy::Exchange`] (Linux): 빈 `<active>.next` 파일을 만들고
//!   `renameat2(RENAME_EXCHANGE)`로 활성 경로와 원자적으로 교환합니다.
//!   활성 경로가 사라지는 순간이 없습니다. 내용이 남은 `<active>.next`가 있으면
//!   로테이션하지 않고 에러를 반환합니다.
//! - [`RotationStrategy::RenameThenCreate`]: 활성 -> 스테이징 이름 변경 후 활성 경로를 생성합니다.
//!   두 시스템 호출 사이에 활성 경로가 잠시 존재하지 않으며, 그 사이 기록자가 만든
//!   파일은 자르지 않고 그대로 활성 파일로 사용합니다.
//!
//! 스테이징과 활성 경로는 같은 파일 시스템에 있어야 합니다.

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use bgpship_core::config::RotationConfig;
use bgpship_core::metrics as m;
use serde::Serialize;

use crate::error::ShipperError;

/// 활성 파일 교체 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationStrategy {
    /// `renameat2(RENAME_EXCHANGE)` 원자적 교환
    Exchange,
    /// 이름 변경 후 재생성
    RenameThenCreate,
}

impl RotationStrategy {
    /// 메트릭/로그 레이블
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exchange => "exchange",
            Self::RenameThenCreate => "rename_then_create",
        }
    }
}

impl fmt::Display for RotationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 로테이션 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    /// 활성 파일이 비어 있음 (파일 시스템 변경 없음)
    Empty,
    /// 로테이션 완료
    Rotated {
        /// 누적 로그에 덧붙인 바이트 수
        bytes: u64,
        /// 사용된 교체 방식
        strategy: RotationStrategy,
    },
}

/// 세 경로(활성, 스테이징, 누적)를 소유하는 로테이터
#[derive(Debug, Clone)]
pub struct Rotator {
    active: PathBuf,
    staging: PathBuf,
    consolidated: PathBuf,
    active_mode: u32,
    prefer_exchange: bool,
}

impl Rotator {
    /// 기본 권한(`0o666`)으로 로테이터를 생성합니다.
    pub fn new(
        active: impl Into<PathBuf>,
        staging: impl Into<PathBuf>,
        consolidated: impl Into<PathBuf>,
    ) -> Self {
        Self {
            active: active.into(),
            staging: staging.into(),
            consolidated: consolidated.into(),
            active_mode: 0o666,
            prefer_exchange: true,
        }
    }

    /// 설정에서 로테이터를 생성합니다.
    pub fn from_config(config: &RotationConfig) -> Self {
        Self::new(
            &config.active_path,
            &config.staging_path,
            &config.consolidated_path,
        )
        .with_active_mode(config.active_mode)
    }

    /// 재생성되는 활성 파일의 권한을 설정합니다.
    pub fn with_active_mode(mut self, mode: u32) -> Self {
        self.active_mode = mode;
        self
    }

    /// 원자적 교환을 건너뛰고 이름 변경 방식만 사용합니다.
    pub fn without_exchange(mut self) -> Self {
        self.prefer_exchange = false;
        self
    }

    /// 활성 덤프 경로
    pub fn active_path(&self) -> &Path {
        &self.active
    }

    /// 스테이징 경로
    pub fn staging_path(&self) -> &Path {
        &self.staging
    }

    /// 누적 로그 경로
    pub fn consolidated_path(&self) -> &Path {
        &self.consolidated
    }

    /// 로테이션을 한 번 수행합니다.
    ///
    /// 활성 파일이 비어 있으면 아무것도 변경하지 않고 [`RotationOutcome::Empty`]를 반환합니다.
    ///
    /// # Errors
    ///
    /// 활성 파일이 없거나, 이름 변경/생성/권한 설정/추가 중 하나라도 실패하면
    /// 실패한 단계와 경로를 담은 [`ShipperError::Rotation`]을 반환합니다.
    pub fn rotate(&self) -> Result<RotationOutcome, ShipperError> {
        let meta = fs::metadata(&self.active)
            .map_err(|e| ShipperError::rotation("stat", &self.active, e))?;

        if meta.len() == 0 {
            tracing::debug!(path = %self.active.display(), "active dump is empty, nothing to rotate");
            metrics::counter!(m::CYCLES_SKIPPED_TOTAL).increment(1);
            return Ok(RotationOutcome::Empty);
        }

        if fs::symlink_metadata(&self.staging).is_ok() {
            tracing::warn!(
                path = %self.staging.display(),
                "overwriting staging file left by an earlier cycle (already appended to the consolidated log)"
            );
        }

        let strategy = self.hand_off()?;
        let bytes = self.append_staging()?;

        tracing::info!(
            active = %self.active.display(),
            staging = %self.staging.display(),
            bytes,
            strategy = %strategy,
            "dump rotated"
        );
        metrics::counter!(m::ROTATIONS_TOTAL, m::LABEL_STRATEGY => strategy.as_str()).increment(1);
        metrics::counter!(m::ROTATED_BYTES).increment(bytes);

        Ok(RotationOutcome::Rotated { bytes, strategy })
    }

    fn hand_off(&self) -> Result<RotationStrategy, ShipperError> {
        if self.prefer_exchange && self.try_exchange()? {
            return Ok(RotationStrategy::Exchange);
        }
        self.rename_then_create()?;
        Ok(RotationStrategy::RenameThenCreate)
    }

    /// 교환에 성공하면 `true`, 지원되지 않으면 `false`를 반환합니다.
    #[cfg(target_os = "linux")]
    fn try_exchange(&self) -> Result<bool, ShipperError> {
        let next = sibling_path(&self.active, ".next");
        clear_leftover_next(&next)?;
        create_exclusive(&next, self.active_mode)?;

        if let Err(err) = sys::rename_exchange(&self.active, &next) {
            // 교환 전이므로 빈 파일만 정리
            if let Err(cleanup) = fs::remove_file(&next) {
                tracing::warn!(
                    path = %next.display(),
                    error = %cleanup,
                    "failed to remove unused exchange file"
                );
            }
            if sys::is_unsupported(&err) {
                tracing::warn!(
                    error = %err,
                    "atomic exchange unsupported, falling back to rename-then-create"
                );
                return Ok(false);
            }
            return Err(ShipperError::rotation("exchange", &self.active, err));
        }

        // next에는 이제 교체 전 활성 파일 내용이 있음
        fs::rename(&next, &self.staging)
            .map_err(|e| ShipperError::rotation("rename", &next, e))?;
        Ok(true)
    }

    #[cfg(not(target_os = "linux"))]
    fn try_exchange(&self) -> Result<bool, ShipperError> {
        Ok(false)
    }

    fn rename_then_create(&self) -> Result<(), ShipperError> {
        tracing::warn!(
            path = %self.active.display(),
            "active path briefly absent between rename and recreate"
        );
        fs::rename(&self.active, &self.staging)
            .map_err(|e| ShipperError::rotation("rename", &self.active, e))?;
        self.recreate_active()
    }

    /// 활성 경로를 다시 만듭니다.
    ///
    /// 이름 변경 직후 기록자가 먼저 파일을 만들었을 수 있으므로 자르지 않고 엽니다.
    fn recreate_active(&self) -> Result<(), ShipperError> {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.active)
            .map_err(|e| ShipperError::rotation("create", &self.active, e))?;
        set_mode(&self.active, self.active_mode)
    }

    fn append_staging(&self) -> Result<u64, ShipperError> {
        let mut source = File::open(&self.staging)
            .map_err(|e| ShipperError::rotation("open", &self.staging, e))?;
        let mut sink = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.consolidated)
            .map_err(|e| ShipperError::rotation("open", &self.consolidated, e))?;

        let bytes = io::copy(&mut source, &mut sink)
            .map_err(|e| ShipperError::rotation("append", &self.consolidated, e))?;
        sink.sync_data()
            .map_err(|e| ShipperError::rotation("append", &self.consolidated, e))?;
        Ok(bytes)
    }
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// 새 빈 파일을 만들고 umask와 무관하게 권한을 지정합니다. 이미 있으면 실패합니다.
#[cfg(target_os = "linux")]
fn create_exclusive(path: &Path, mode: u32) -> Result<(), ShipperError> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| ShipperError::rotation("create", path, e))?;
    set_mode(path, mode)
}

/// 이전 사이클이 남긴 교환 파일을 정리합니다.
///
/// 비어 있으면 제거합니다. 내용이 있으면 교환 뒤 스테이징으로 옮기지 못한
/// 덤프이므로 건드리지 않고 에러로 보고합니다.
#[cfg(target_os = "linux")]
fn clear_leftover_next(next: &Path) -> Result<(), ShipperError> {
    let meta = match fs::symlink_metadata(next) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ShipperError::rotation("stat", next, e)),
    };

    if meta.is_file() && meta.len() == 0 {
        tracing::warn!(path = %next.display(), "removing empty exchange file left by an earlier cycle");
        return fs::remove_file(next).map_err(|e| ShipperError::rotation("create", next, e));
    }

    tracing::error!(
        path = %next.display(),
        bytes = meta.len(),
        "unconsolidated dump left by an earlier cycle, append it to the consolidated log and remove it"
    );
    Err(ShipperError::rotation(
        "create",
        next,
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "unconsolidated dump from an earlier cycle",
        ),
    ))
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), ShipperError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| ShipperError::rotation("chmod", path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), ShipperError> {
    Ok(())
}

#[cfg(target_os = "linux")]
mod sys {
    use std::ffi::CString;
    use std::io;
    use std::os::unix::ffi::OsStrExt;
    use std::path::Path;

    fn c_path(path: &Path) -> io::Result<CString> {
        CString::new(path.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    /// 두 경로를 원자적으로 교환합니다.
    pub(super) fn rename_exchange(a: &Path, b: &Path) -> io::Result<()> {
        let a = c_path(a)?;
        let b = c_path(b)?;

        // SAFETY: 두 포인터 모두 호출 동안 유효한 NUL 종료 문자열
        let ret = unsafe {
            libc::syscall(
                libc::SYS_renameat2,
                libc::AT_FDCWD,
                a.as_ptr(),
                libc::AT_FDCWD,
                b.as_ptr(),
                libc::RENAME_EXCHANGE,
            )
        };

        if ret == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    /// 커널 또는 파일 시스템이 교환을 지원하지 않는 경우
    pub(super) fn is_unsupported(err: &io::Error) -> bool {
        matches!(
            err.raw_os_error(),
            Some(libc::ENOSYS) | Some(libc::EINVAL) | Some(libc::EOPNOTSUPP)
        )
    }
}
