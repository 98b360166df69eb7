//! 입력 인자 확장 모듈
//!
//! glob 메타문자(`*`, `?`, `[`)가 들어간 인자를 일치하는 파일 목록으로 펼칩니다.

use std::path::PathBuf;

/// glob 메타문자가 포함되어 있는지 확인
pub fn is_pattern(arg: &str) -> bool {
    arg.contains(&['*', '?', '['][..])
}

/// 입력 인자 목록을 파일 경로 목록으로 확장
///
/// 패턴이 아무 파일과도 일치하지 않거나 유효하지 않으면 인자를 그대로 남겨서
/// 이후 단계에서 "파일 없음"으로 보고되게 합니다.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use textconv::pattern::expand_inputs;
///
/// let files = expand_inputs(&["plain.txt".to_string()]);
/// assert_eq!(files, vec![PathBuf::from("plain.txt")]);
/// ```
pub fn expand_inputs(args: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::with_capacity(args.len());

    for arg in args {
        if !is_pattern(arg) {
            files.push(PathBuf::from(arg));
            continue;
        }

        let mut matched: Vec<PathBuf> = match glob::glob(arg) {
            Ok(paths) => paths
                .filter_map(|p| p.ok())
                .filter(|p| p.is_file())
                .collect(),
            Err(_) => Vec::new(),
        };

        if matched.is_empty() {
            files.push(PathBuf::from(arg));
        } else {
            matched.sort();
            files.append(&mut matched);
        }
    }

    files
}
