//! 에러 타입 정의 모듈
//!
//! textconv에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// textconv에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 설정 파일을 읽을 수 없음
    #[error("설정 파일을 읽을 수 없습니다 ({path}): {reason}")]
    SettingsRead { path: PathBuf, reason: String },

    /// 설정 파일 형식 오류
    #[error("설정 파일 형식이 올바르지 않습니다 ({path}): {reason}")]
    SettingsParse { path: PathBuf, reason: String },

    /// 알 수 없는 로케일 이름
    #[error("알 수 없는 로케일입니다: {name}")]
    UnknownCulture { name: String },

    /// 입력 파일이 존재하지 않음
    #[error("입력 파일을 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 입력 파일 열기 실패
    #[error("파일을 열 수 없습니다 ({file}): {reason}")]
    FileOpen { file: PathBuf, reason: String },

    /// 줄 읽기 실패 (잘못된 인코딩 등)
    #[error("잘못된 줄 ({file}:{line}): {reason}")]
    InvalidLine {
        file: PathBuf,
        line: usize,
        reason: String,
    },

    /// 출력 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({file}): {reason}")]
    Write { file: PathBuf, reason: String },

    /// 스레드 풀 초기화 실패
    #[error("스레드 풀 초기화 실패: {reason}")]
    ThreadPool { reason: String },
}

/// textconv 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ConvertError>;
