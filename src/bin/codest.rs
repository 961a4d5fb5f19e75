//! Codest CLI binary.

#![deny(missing_docs)]

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use codest::cli::{self, ScanArgs};
use codest::collector::FileCollector;
use codest::config::Config;
use codest::normalize::{PathNormalizer, absolutize};
use codest::render::{self, DEFAULT_MAX_FILE_SIZE_KB, Renderer, STDOUT_MARKER};

/// Environment variable holding an `EnvFilter` directive.
const LOG_ENV: &str = "CODEST_LOG";

fn init_tracing(verbose: u8, quiet: bool) {
    let fallback = match (quiet, verbose) {
        (true, _) => "codest=error",
        (false, 0) => "codest=info",
        (false, 1) => "codest=debug",
        (false, _) => "codest=trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Merge `.codest.toml` (found in the first directory) with the CLI flags.
fn build_collector(scan: &ScanArgs) -> anyhow::Result<(Config, FileCollector)> {
    let normalizer = PathNormalizer::from_current_dir().context("reading working directory")?;
    let first = scan.dirs.first().map(PathBuf::as_path).unwrap_or(Path::new("."));
    let base = absolutize(first, normalizer.cwd());
    let cfg = Config::load_or_default(&base)?;

    let mut ignore = cfg.ignore_config();
    if !scan.extensions.is_empty() {
        ignore = ignore.with_extensions(scan.extensions.iter().cloned());
    }

    let excluded: Vec<PathBuf> = cfg
        .exclude
        .iter()
        .map(|ex| absolutize(ex, &base))
        .chain(scan.exclude.iter().map(|ex| absolutize(ex, normalizer.cwd())))
        .collect();

    let collector = FileCollector::with_normalizer(&normalizer, &scan.dirs, &excluded, ignore)?;
    Ok((cfg, collector))
}

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_tracing(args.verbose, args.quiet);

    match args.command {
        // init: writes a .codest.toml spelling out the built-in lists.
        cli::Commands::Init { path, force } => {
            let mut root: PathBuf = path.unwrap_or_else(|| PathBuf::from("."));
            if root.is_file()
                && let Some(parent) = root.parent()
            {
                root = parent.to_path_buf();
            }
            let path_written = Config::write_default_config_at(root.as_path(), force)?;
            println!(
                "{} .codest.toml at {}",
                if force { "Overwrote" } else { "Initialized" },
                path_written.display()
            );
        }
        // collect: walk, render, write.
        cli::Commands::Collect {
            scan,
            output,
            max_size,
            format,
        } => {
            let (cfg, collector) = build_collector(&scan)?;
            let files = collector.collect_files()?;

            let format = format.or(cfg.format).unwrap_or_default();
            let max_size = max_size
                .or(cfg.max_file_size_kb)
                .unwrap_or(DEFAULT_MAX_FILE_SIZE_KB);
            let renderer = Renderer::new(collector.roots().to_vec(), max_size, format);
            let document = renderer.render(&files);

            let output =
                output.unwrap_or_else(|| render::default_output_name(format, Local::now()));
            render::write_document(&document, &output)?;
            if output != Path::new(STDOUT_MARKER) {
                eprintln!(
                    "{} {}",
                    "Source code collection completed successfully:".green(),
                    output.display()
                );
            }
        }
        // list: collected paths only, sorted.
        cli::Commands::List { scan } => {
            let (_, collector) = build_collector(&scan)?;
            for file in collector.collect_files()? {
                println!("{}", file.path.display());
            }
        }
    }
    Ok(())
}
