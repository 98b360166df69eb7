//! 줄 준비 모듈
//!
//! 입력 파일을 한 줄씩 읽어 빈 줄을 건너뛰고 trim된 줄을 내보낸 뒤,
//! 마지막에 실제로 내보낸 줄 수를 담은 줄 하나를 덧붙입니다.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// 준비된 줄의 지연 시퀀스
///
/// 파일 열기는 `prepare_lines` 호출 시점에 일어나고, 읽기는 반복 중에 일어납니다.
/// 읽기 실패가 발생하면 에러 하나를 내보낸 뒤 시퀀스가 끝납니다.
pub struct PreparedLines {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    /// 지금까지 읽은 물리적 줄 번호 (1부터)
    line_number: usize,
    /// 내보낸 줄 수 (건너뛴 빈 줄 제외)
    yielded: usize,
    finished: bool,
}

impl PreparedLines {
    /// 지금까지 내보낸 줄 수
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl Iterator for PreparedLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    self.line_number += 1;
                    if line.is_empty() {
                        continue;
                    }
                    self.yielded += 1;
                    return Some(Ok(line.trim().to_string()));
                }
                Some(Err(e)) => {
                    self.line_number += 1;
                    self.finished = true;
                    return Some(Err(ConvertError::InvalidLine {
                        file: self.path.clone(),
                        line: self.line_number,
                        reason: e.to_string(),
                    }));
                }
                None => {
                    self.finished = true;
                    return Some(Ok(self.yielded.to_string()));
                }
            }
        }
    }
}

/// 파일을 열고 준비된 줄 시퀀스 생성
///
/// # Arguments
/// * `path` - 입력 파일 경로
///
/// # Returns
/// `PreparedLines` 또는 파일이 없을 때 `ConvertError::InputNotFound`
pub fn prepare_lines(path: &Path) -> Result<PreparedLines> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConvertError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => ConvertError::FileOpen {
            file: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    Ok(PreparedLines {
        path: path.to_path_buf(),
        lines: BufReader::new(file).lines(),
        line_number: 0,
        yielded: 0,
        finished: false,
    })
}
