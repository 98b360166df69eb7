//! textconv - TEXT LINE CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

use textconv::{batch::BatchSummary, cli::Args, culture::Culture, error::ConvertError, Settings};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // 실패는 로그로만 남기고 종료 코드는 바꾸지 않음
    if let Err(e) = run(&args) {
        error!("{:#}", e);
    }

    Ok(())
}

/// 로깅 초기화 (RUST_LOG가 있으면 우선)
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "textconv=debug"
        } else {
            "textconv=info"
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    // 스레드 풀 설정
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| ConvertError::ThreadPool {
                reason: e.to_string(),
            })?;
    }

    let files = args.input_files();

    print_header(args, &files);

    let pb = if args.no_progress || args.verbose {
        ProgressBar::hidden()
    } else {
        create_progress_bar(files.len())
    };

    println!("\n{}", "⚡ 병렬 처리 중...".bright_cyan());

    // 설정 형식 오류는 전체 실행 중단
    let result = textconv::run(&args.settings, &files, args.verbose, |_| pb.inc(1));
    let (settings, summary) = match result {
        Ok(done) => done,
        Err(e) => {
            pb.abandon();
            return Err(e).context("설정 파일을 읽지 못했습니다");
        }
    };

    pb.finish_with_message("완료!");

    print_settings(&settings);
    print_results(&summary, settings.verbose);
    summary.stats.print_summary();

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args, files: &[PathBuf]) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🚀 TEXT LINE CONVERTER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 설정 파일: {:?}", "⚙️".bright_yellow(), args.settings);
    println!(
        "  {} 입력 파일 수: {}",
        "📋".bright_white(),
        files.len().to_string().bright_green()
    );

    if let Some(threads) = args.threads {
        println!("  {} 스레드 수: {}", "🧵".bright_magenta(), threads);
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 적용된 설정 출력
fn print_settings(settings: &Settings) {
    let culture = Culture::from_name(&settings.source_culture_name)
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|_| format!("{} (알 수 없음)", settings.source_culture_name));

    println!("  {} 원본 로케일: {}", "🌐".bright_cyan(), culture);
    if settings.verbose {
        println!("  {} {}", "🔍".bright_cyan(), "상세 출력 모드".cyan());
    }
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// 파일별 결과 출력
fn print_results(summary: &BatchSummary, verbose: bool) {
    for report in &summary.reports {
        if report.is_converted() {
            if verbose {
                println!(
                    "  {} {:?} → {:?}",
                    "✓".green(),
                    report.path,
                    report.output
                );
            }
        } else {
            println!("  {} {:?} ({:?})", "•".red(), report.path, report.status);
        }
    }

    for (path, message) in &summary.task_failures {
        println!("  {} {:?}: {}", "✗".bright_red(), path, message.dimmed());
    }
}
