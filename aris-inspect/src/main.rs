use std::path::PathBuf;

use aris_core::FrameCountMode;
use aris_inspect::{
    render, run_frame, run_header, run_stats, InspectConfig, InspectResult, OutputFormat,
};
use clap::{Parser, Subcommand};
use log::{error, LevelFilter};

#[derive(Parser, Debug)]
#[command(
    name = "aris-inspect",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect ARIS sonar recordings (DDF_05)",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Формат вывода: text, json, json-pretty
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
    /// Считать кадры старым делителем (только отсчёты, без заголовка кадра)
    #[arg(long, global = true)]
    legacy_frame_count: bool,
    /// Сверять ping mode и samples per beam каждого кадра с кадром 0
    #[arg(long, global = true)]
    verify_geometry: bool,
    /// Тихий режим (только ошибки)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Подробный лог (debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Геометрия записи и число кадров
    Stats {
        /// Путь к файлу .aris
        path: PathBuf,
    },
    /// Параметры кадра и, при --output, его отсчёты
    Frame {
        path: PathBuf,
        /// Индекс кадра (с 0)
        index: u32,
        /// Записать сырые отсчёты (beams x samples байт) в файл
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Все поля заголовка файла или кадра
    Header {
        path: PathBuf,
        /// Показать заголовок кадра вместо заголовка файла
        #[arg(long)]
        frame: Option<u32>,
    },
}

fn run(cli: &Cli) -> InspectResult<String> {
    let config = InspectConfig {
        format: cli.format,
        frame_count_mode: if cli.legacy_frame_count {
            FrameCountMode::Legacy
        } else {
            FrameCountMode::Corrected
        },
        verify_geometry: cli.verify_geometry,
    };

    match &cli.command {
        Command::Stats { path } => render(&run_stats(path, &config)?, config.format),
        Command::Frame {
            path,
            index,
            output,
        } => render(
            &run_frame(path, *index, output.as_deref(), &config)?,
            config.format,
        ),
        Command::Header { path, frame } => {
            render(&run_header(path, *frame, &config)?, config.format)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    match run(&cli) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            error!("{e}");
            std::process::exit(e.exit_status());
        }
    }
}
