//! 배치 실행 모듈
//!
//! 입력 파일마다 rayon 작업 하나를 띄워 병렬로 변환하고, 모두 끝날 때까지 기다립니다.
//! 작업 중 패닉이 나도 나머지 파일은 계속 처리됩니다.

use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::error;

use crate::converter::{convert_file, FileReport};
use crate::error::Result;
use crate::settings::{load_settings, Settings};
use crate::stats::Statistics;

/// 배치 실행 결과
#[derive(Debug)]
pub struct BatchSummary {
    /// 파일별 변환 결과 (입력 순서 유지, 패닉난 파일 제외)
    pub reports: Vec<FileReport>,
    /// 작업 밖으로 새어 나온 실패 (파일 경로, 메시지)
    pub task_failures: Vec<(PathBuf, String)>,
    /// 집계 통계
    pub stats: Statistics,
}

/// 설정을 읽고 파일 목록 전체를 변환
///
/// 설정 파일 형식이 잘못되면 어떤 파일도 건드리지 않고 바로 에러를 돌려줍니다.
///
/// # Arguments
/// * `settings_path` - 설정 파일 경로 (없으면 기본값)
/// * `files` - 입력 파일 경로 목록
/// * `verbose` - 명령줄 상세 출력 플래그 (설정 파일 값과 OR)
/// * `on_done` - 파일 하나가 끝날 때마다 호출
pub fn run<F>(
    settings_path: &Path,
    files: &[PathBuf],
    verbose: bool,
    on_done: F,
) -> Result<(Settings, BatchSummary)>
where
    F: Fn(&Path) + Sync,
{
    let settings = load_settings(settings_path)?.with_verbose(verbose);
    let summary = run_batch(files, &settings, on_done);
    Ok((settings, summary))
}

/// 파일 목록을 병렬로 변환
///
/// # Arguments
/// * `files` - 입력 파일 경로 목록
/// * `settings` - 실행 설정 (모든 작업이 읽기 전용으로 공유)
/// * `on_done` - 파일 하나가 끝날 때마다 호출 (진행률 표시용)
pub fn run_batch<F>(files: &[PathBuf], settings: &Settings, on_done: F) -> BatchSummary
where
    F: Fn(&Path) + Sync,
{
    run_batch_with(files, |path| convert_file(path, settings), on_done)
}

/// 파일마다 `worker`를 병렬로 실행
///
/// `worker`가 패닉하면 그 파일만 `task_failures`로 옮기고 나머지는 계속 진행합니다.
pub fn run_batch_with<W, F>(files: &[PathBuf], worker: W, on_done: F) -> BatchSummary
where
    W: Fn(&Path) -> FileReport + Sync,
    F: Fn(&Path) + Sync,
{
    let stats = Statistics::new(files.len());

    let outcomes: Vec<(PathBuf, std::result::Result<FileReport, String>)> = files
        .par_iter()
        .map(|path| {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| worker(path)))
                .map_err(panic_message);
            on_done(path);
            (path.clone(), outcome)
        })
        .collect();

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut task_failures = Vec::new();

    for (path, outcome) in outcomes {
        match outcome {
            Ok(report) => {
                stats.record(&report);
                reports.push(report);
            }
            Err(message) => {
                error!("{} 작업 실패: {}", path.display(), message);
                stats.increment_panic();
                task_failures.push((path, message));
            }
        }
    }

    BatchSummary {
        reports,
        task_failures,
        stats,
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "알 수 없는 패닉".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{output_path, FileStatus};
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_does_not_stop_batch() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.txt");
        let missing = temp_dir.path().join("missing.txt");
        fs::write(&good, "1.5\n").unwrap();

        let done = AtomicUsize::new(0);
        let summary = run_batch(&[missing.clone(), good.clone()], &Settings::default(), |_| {
            done.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(done.load(Ordering::Relaxed), 2);
        assert_eq!(summary.reports.len(), 2);
        assert_eq!(summary.reports[0].status, FileStatus::Missing);
        assert!(summary.reports[1].is_converted());
        assert!(summary.task_failures.is_empty());
        assert_eq!(summary.stats.get_converted_count(), 1);
        assert_eq!(summary.stats.get_error_count(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let summary = run_batch(&[], &Settings::default(), |_| {});
        assert!(summary.reports.is_empty());
        assert_eq!(summary.stats.total_files, 0);
    }

    #[test]
    fn test_panicking_task_is_contained() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.txt");
        let cursed = temp_dir.path().join("cursed.txt");
        fs::write(&good, "1.5\n").unwrap();
        fs::write(&cursed, "2.5\n").unwrap();

        let settings = Settings::default();
        let done = AtomicUsize::new(0);
        let summary = run_batch_with(
            &[cursed.clone(), good.clone()],
            |path| {
                if path.ends_with("cursed.txt") {
                    panic!("작업 중단");
                }
                convert_file(path, &settings)
            },
            |_| {
                done.fetch_add(1, Ordering::Relaxed);
            },
        );

        assert_eq!(done.load(Ordering::Relaxed), 2);
        assert_eq!(summary.task_failures.len(), 1);
        assert_eq!(summary.task_failures[0].0, cursed);
        assert_eq!(summary.task_failures[0].1, "작업 중단");
        assert_eq!(summary.reports.len(), 1);
        assert_eq!(summary.reports[0].path, good);
        assert!(summary.reports[0].is_converted());
        assert_eq!(summary.stats.get_converted_count(), 1);
        assert!(output_path(&good).exists());
        assert!(!output_path(&cursed).exists());
    }

    #[test]
    fn test_run_uses_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.xml");
        let input = temp_dir.path().join("text.txt");
        fs::write(
            &settings_path,
            "<Settings><SourceCultureName>ru-RU</SourceCultureName></Settings>",
        )
        .unwrap();
        fs::write(&input, "3,14\n").unwrap();

        let (settings, summary) = run(&settings_path, &[input.clone()], true, |_| {}).unwrap();

        assert_eq!(settings.source_culture_name, "ru-RU");
        assert!(settings.verbose);
        assert!(summary.reports[0].is_converted());
        let out = fs::read_to_string(output_path(&input)).unwrap();
        assert_eq!(out, "4 3.14\n1 1\n");
    }

    #[test]
    fn test_panic_message() {
        assert_eq!(panic_message(Box::new("boom")), "boom");
        assert_eq!(panic_message(Box::new("bang".to_string())), "bang");
        assert_eq!(panic_message(Box::new(7_u8)), "알 수 없는 패닉");
    }
}
