//! textconv - TEXT LINE CONVERTER
//!
//! 텍스트 파일의 각 줄을 간단한 감지 규칙으로 변환하여 `<파일>.out`에 기록하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 📅 **날짜/시간 감지**: 로케일에 맞게 해석하고 `MM/dd/yyyy HH:mm:ss`로 출력
//! - 🔢 **실수 감지**: 로케일의 소수점/자릿수 구분자를 해석하고 로케일 무관 형식으로 출력
//! - 🔤 **문자 인덱스 지시**: `"2 hello"` → `"l"`
//! - 🚀 **병렬 처리**: Rayon으로 파일마다 작업 하나씩 실행
//! - ⚙️ **설정 파일**: `settings.xml` (없으면 기본값)
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법 (text.txt → text.txt.out)
//! textconv
//!
//! # 여러 파일 병렬 변환
//! textconv a.txt b.txt "logs/*.txt"
//! ```

pub mod batch;
pub mod cli;
pub mod converter;
pub mod culture;
pub mod detect;
pub mod error;
pub mod lines;
pub mod pattern;
pub mod settings;
pub mod stats;

// Re-exports for convenient access
pub use batch::{run, run_batch, run_batch_with, BatchSummary};
pub use cli::Args;
pub use converter::{convert_file, FileReport, FileStatus};
pub use culture::Culture;
pub use detect::{convert_line, Conversion};
pub use error::{ConvertError, Result};
pub use lines::{prepare_lines, PreparedLines};
pub use settings::{load_settings, Settings};
pub use stats::Statistics;
