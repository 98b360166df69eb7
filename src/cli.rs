//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::pattern::expand_inputs;
use crate::settings::DEFAULT_SETTINGS_FILE;

/// 입력 파일을 지정하지 않았을 때 사용할 파일 이름
pub const DEFAULT_INPUT_FILE: &str = "text.txt";

/// textconv CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "textconv",
    author = "YourName <your@email.com>",
    version,
    about = "TEXT LINE CONVERTER - 텍스트 파일의 각 줄을 날짜/숫자/문자 인덱스 규칙으로 변환",
    long_about = r#"
TEXT LINE CONVERTER
===================

입력 파일의 비어 있지 않은 각 줄을 다음 순서로 변환하여
<입력 파일>.out 에 "<길이> <값>" 형식으로 기록합니다.

  1. 날짜/시간    → MM/dd/yyyy HH:mm:ss
  2. 실수         → 로케일 무관 표기
  3. "<i> <텍스트>" → 텍스트의 i번째 문자

입력 해석 로케일은 settings.xml 의 SourceCultureName 으로 지정합니다.

예제:
  textconv
  textconv a.txt b.txt
  textconv "data/*.txt" -j 4 --verbose
  textconv input.txt --settings ./conf/settings.xml
"#
)]
pub struct Args {
    /// 변환할 입력 파일 (glob 패턴 가능, 기본값: text.txt)
    pub files: Vec<String>,

    /// 설정 파일 경로
    #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// 상세 출력 모드 (설정 파일의 Verbose 값과 OR)
    #[arg(short, long)]
    pub verbose: bool,

    /// 병렬 처리 스레드 수 (기본값: CPU 코어 수)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// 진행률 바 숨기기
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// 처리할 입력 파일 목록 반환
    ///
    /// 인자가 없으면 `text.txt` 하나, 있으면 glob 패턴을 펼친 목록입니다.
    pub fn input_files(&self) -> Vec<PathBuf> {
        if self.files.is_empty() {
            vec![PathBuf::from(DEFAULT_INPUT_FILE)]
        } else {
            expand_inputs(&self.files)
        }
    }
}
