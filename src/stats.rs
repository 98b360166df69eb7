//! 통계 모듈
//!
//! 배치 처리 통계 수집 및 요약 출력을 담당합니다.

use colored::Colorize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::converter::{FileReport, FileStatus};

/// 처리 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 총 파일 수
    pub total_files: usize,
    /// 변환 완료 수
    pub converted_count: AtomicUsize,
    /// 입력 파일 없음 수
    pub missing_count: AtomicUsize,
    /// 잘못된 줄로 중단된 수
    pub invalid_count: AtomicUsize,
    /// 그 밖의 실패 수
    pub failed_count: AtomicUsize,
    /// 작업 중 패닉 수
    pub panic_count: AtomicUsize,
    /// 기록한 총 줄 수
    pub lines_written: AtomicUsize,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 파일 변환 결과 반영
    pub fn record(&self, report: &FileReport) {
        let counter = match report.status {
            FileStatus::Converted => &self.converted_count,
            FileStatus::Missing => &self.missing_count,
            FileStatus::InvalidLine { .. } => &self.invalid_count,
            FileStatus::Failed { .. } => &self.failed_count,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.lines_written
            .fetch_add(report.lines_written, Ordering::Relaxed);
    }

    /// 패닉 카운트 증가
    pub fn increment_panic(&self) {
        self.panic_count.fetch_add(1, Ordering::Relaxed);
    }

    /// 변환 완료 수 반환
    pub fn get_converted_count(&self) -> usize {
        self.converted_count.load(Ordering::Relaxed)
    }

    /// 실패 수 반환 (없음/잘못된 줄/실패/패닉 합계)
    pub fn get_error_count(&self) -> usize {
        self.missing_count.load(Ordering::Relaxed)
            + self.invalid_count.load(Ordering::Relaxed)
            + self.failed_count.load(Ordering::Relaxed)
            + self.panic_count.load(Ordering::Relaxed)
    }

    /// 기록한 줄 수 반환
    pub fn get_lines_written(&self) -> usize {
        self.lines_written.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 처리 통계 요약 출력
    pub fn print_summary(&self) {
        let converted = self.get_converted_count();
        let errors = self.get_error_count();

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 처리 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 전체 파일:    {}",
            "📁".bright_cyan(),
            self.total_files
        );
        println!(
            "  {} 성공:         {}",
            "✅".bright_green(),
            converted.to_string().green()
        );

        if errors > 0 {
            println!(
                "  {} 실패:         {}",
                "❌".bright_red(),
                errors.to_string().red()
            );
            println!(
                "      파일 없음 {} / 잘못된 줄 {} / 기타 {} / 패닉 {}",
                self.missing_count.load(Ordering::Relaxed),
                self.invalid_count.load(Ordering::Relaxed),
                self.failed_count.load(Ordering::Relaxed),
                self.panic_count.load(Ordering::Relaxed)
            );
        } else {
            println!("  {} 실패:         {}", "✅".bright_green(), "0".green());
        }

        println!(
            "  {} 출력 줄 수:   {}",
            "📤".bright_magenta(),
            self.get_lines_written()
        );

        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_elapsed(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 경과 시간 표시 (1초 미만은 ms, 1분 미만은 초, 그 이상은 분+초)
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    if elapsed < Duration::from_secs(1) {
        format!("{}ms", elapsed.as_millis())
    } else if total < 60.0 {
        format!("{:.2}초", total)
    } else {
        let minutes = elapsed.as_secs() / 60;
        format!("{}분 {:.1}초", minutes, total - (minutes * 60) as f64)
    }
}
