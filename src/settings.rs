//! 설정 로딩 모듈
//!
//! 작업 디렉토리의 `settings.xml`을 읽어 `Settings`로 역직렬화합니다.
//! 파일이 없으면 기본값을 사용하고, 형식이 잘못되면 에러를 반환합니다.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{ConvertError, Result};

/// 기본 설정 파일 이름
pub const DEFAULT_SETTINGS_FILE: &str = "settings.xml";

const ROOT_ELEMENT: &str = "Settings";

/// 실행 설정 (실행 중에는 읽기 전용)
///
/// ```xml
/// <Settings>
///   <SourceCultureName>ru-RU</SourceCultureName>
///   <Verbose>true</Verbose>
/// </Settings>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename = "Settings", default)]
pub struct Settings {
    /// 입력 해석에 사용할 로케일 이름
    #[serde(rename = "SourceCultureName")]
    pub source_culture_name: String,
    /// 파일별 진행 로그 출력 여부
    #[serde(rename = "Verbose")]
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_culture_name: "en-US".to_string(),
            verbose: false,
        }
    }
}

impl Settings {
    /// XML 문자열에서 설정 파싱
    ///
    /// 루트 요소가 `<Settings>`가 아니면 형식 오류입니다.
    pub fn from_xml(content: &str, path: &Path) -> Result<Self> {
        let parse_error = |reason: String| ConvertError::SettingsParse {
            path: path.to_path_buf(),
            reason,
        };

        if let Some(root) = root_element(content).map_err(parse_error)? {
            if root != ROOT_ELEMENT {
                return Err(parse_error(format!(
                    "<{}> 요소는 예상되지 않았습니다 (<{}> 필요)",
                    root, ROOT_ELEMENT
                )));
            }
        }

        quick_xml::de::from_str(content).map_err(|e| parse_error(e.to_string()))
    }

    /// verbose 플래그 덮어쓰기
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = self.verbose || verbose;
        self
    }
}

/// 첫 번째 요소의 로컬 이름 (요소가 없으면 `None`)
fn root_element(content: &str) -> std::result::Result<Option<String>, String> {
    let mut reader = Reader::from_str(content);
    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned()));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// 설정 파일 로드
///
/// # Arguments
/// * `path` - 설정 파일 경로
///
/// # Returns
/// 파일이 없으면 `Settings::default()`, 읽기/파싱 실패 시 에러
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        info!("설정 파일 {} 이(가) 없습니다. 기본 설정을 사용합니다.", path.display());
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path).map_err(|e| ConvertError::SettingsRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Settings::from_xml(&content, path)
}
