//! 파일 변환 모듈
//!
//! 입력 파일 하나를 읽어 각 줄을 변환하고 `<입력>.out` 파일에 기록합니다.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::culture::Culture;
use crate::detect::convert_line;
use crate::error::{ConvertError, Result};
use crate::lines::prepare_lines;
use crate::settings::Settings;

/// 출력 파일 확장자 (입력 파일 이름 뒤에 덧붙임)
pub const OUTPUT_SUFFIX: &str = ".out";

/// 파일 변환 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// 모든 줄 변환 완료
    Converted,
    /// 입력 파일 없음 (출력 파일도 만들지 않음)
    Missing,
    /// 잘못된 줄에서 중단 (그 앞까지의 출력은 남아 있음)
    InvalidLine { line: usize },
    /// 그 밖의 실패
    Failed { reason: String },
}

/// 파일 변환 결과
#[derive(Debug, Clone)]
pub struct FileReport {
    /// 입력 파일 경로
    pub path: PathBuf,
    /// 출력 파일 경로
    pub output: PathBuf,
    /// 기록한 줄 수
    pub lines_written: usize,
    /// 변환 상태
    pub status: FileStatus,
}

impl FileReport {
    fn new(path: &Path, status: FileStatus, lines_written: usize) -> Self {
        Self {
            path: path.to_path_buf(),
            output: output_path(path),
            lines_written,
            status,
        }
    }

    /// 변환 성공 여부
    pub fn is_converted(&self) -> bool {
        self.status == FileStatus::Converted
    }
}

/// `<입력>.out` 경로 계산
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
/// use textconv::converter::output_path;
///
/// assert_eq!(output_path(Path::new("data/a.txt")), PathBuf::from("data/a.txt.out"));
/// ```
pub fn output_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

/// 변환된 값을 `"<길이> <값>"` 형식으로 포맷
///
/// 길이는 원본 줄이 아니라 변환된 값의 문자 수입니다.
pub fn format_output_line(value: &str) -> String {
    format!("{} {}", value.chars().count(), value)
}

/// 단일 파일 변환
///
/// 실패는 모두 로그로 남기고 `FileReport`의 상태로만 돌려줍니다.
///
/// # Arguments
/// * `path` - 입력 파일 경로
/// * `settings` - 실행 설정
pub fn convert_file(path: &Path, settings: &Settings) -> FileReport {
    let culture = match Culture::from_name(&settings.source_culture_name) {
        Ok(culture) => culture,
        Err(e) => {
            error!("{} 변환 실패: {}", path.display(), e);
            return FileReport::new(path, FileStatus::Failed { reason: e.to_string() }, 0);
        }
    };

    if settings.verbose {
        info!("파일 처리 중: {}", path.display());
        info!("원본 로케일: {}", culture.display_name());
    }

    let mut lines_written = 0;
    let status = match convert_file_internal(path, culture, &mut lines_written) {
        Ok(()) => FileStatus::Converted,
        Err(ConvertError::InputNotFound { .. }) => {
            error!("파일 {} 을(를) 찾을 수 없습니다", path.display());
            FileStatus::Missing
        }
        Err(ConvertError::InvalidLine { line, reason, .. }) => {
            error!("잘못된 줄 ({}:{}): {}", path.display(), line, reason);
            FileStatus::InvalidLine { line }
        }
        Err(e) => {
            error!("{} 변환 실패: {}", path.display(), e);
            FileStatus::Failed {
                reason: e.to_string(),
            }
        }
    };

    FileReport::new(path, status, lines_written)
}

/// 내부 변환 로직
fn convert_file_internal(path: &Path, culture: &Culture, lines_written: &mut usize) -> Result<()> {
    // 입력을 먼저 열어서, 없는 파일에 대해 출력 파일이 생기지 않게 함
    let mut lines = prepare_lines(path)?;

    let output = output_path(path);
    let write_error = |e: std::io::Error| ConvertError::Write {
        file: output.clone(),
        reason: e.to_string(),
    };

    let file = File::create(&output).map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    let mut unmatched = 0;
    for line in lines.by_ref() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                writer.flush().map_err(write_error)?;
                return Err(e);
            }
        };

        let conversion = convert_line(&line, culture);
        if !conversion.is_match() {
            debug!("일치하는 형식 없음: {:?}", line);
            unmatched += 1;
        }
        writeln!(writer, "{}", format_output_line(&conversion.into_value()))
            .map_err(write_error)?;
        *lines_written += 1;
    }

    writer.flush().map_err(write_error)?;
    debug!(
        "{}: 입력 {}줄, 변환 실패 {}줄",
        path.display(),
        lines.yielded(),
        unmatched
    );
    Ok(())
}
