//! Unit tests for CLI argument parsing

use clap::Parser;
use std::path::PathBuf;
use transparency_data_downloader::cli::{Cli, Commands, DownloadArgs, OutputFormat};
use transparency_data_downloader::fetcher::url::DEFAULT_BASE_URL;
use transparency_data_downloader::DatasetType;

fn download_args(cli: Cli) -> DownloadArgs {
    match cli.command {
        Commands::Download(args) => args,
        other => panic!("expected download command, got {other:?}"),
    }
}

#[test]
fn test_download_defaults() {
    let cli = Cli::parse_from(["transparency-data-downloader", "download"]);
    assert_eq!(cli.output_format, OutputFormat::Human);
    assert!(cli.metrics_addr.is_none());

    let args = download_args(cli);
    assert!(args.datasets.is_empty());
    assert_eq!(args.years_back, 5);
    assert_eq!(args.output_dir, PathBuf::from("."));
    assert!(args.start_date.is_none());
    assert!(args.end_date.is_none());
    if std::env::var("PORTAL_BASE_URL").is_err() {
        assert_eq!(args.base_url, DEFAULT_BASE_URL);
    }
    if std::env::var("PORTAL_UNIT_CODE").is_err() {
        assert_eq!(args.unit_code, "2");
    }
}

#[test]
fn test_repeatable_dataset_flags() {
    let cli = Cli::parse_from([
        "transparency-data-downloader",
        "--output-format",
        "json",
        "download",
        "--dataset",
        "despesa",
        "--dataset",
        "receita",
        "--reference-dataset",
        "servidores",
        "--day-range-dataset",
        "contrato",
    ]);
    assert_eq!(cli.output_format, OutputFormat::Json);

    let args = download_args(cli);
    assert_eq!(
        args.datasets,
        vec![DatasetType::new("despesa"), DatasetType::new("receita")]
    );
    assert_eq!(args.reference_datasets, vec![DatasetType::new("servidores")]);
    assert_eq!(args.day_range_datasets, vec![DatasetType::new("contrato")]);
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "transparency-data-downloader",
        "download",
        "--metrics-addr",
        "127.0.0.1:9464",
        "--output-dir",
        "dados",
    ]);
    assert_eq!(cli.metrics_addr, Some("127.0.0.1:9464".parse().unwrap()));
    assert_eq!(download_args(cli).output_dir, PathBuf::from("dados"));
}

#[test]
fn test_invalid_values_rejected_by_parser() {
    assert!(Cli::try_parse_from([
        "transparency-data-downloader",
        "--output-format",
        "yaml",
        "download"
    ])
    .is_err());
    assert!(Cli::try_parse_from(["transparency-data-downloader", "download", "--dataset", " "]).is_err());
    assert!(Cli::try_parse_from([
        "transparency-data-downloader",
        "download",
        "--metrics-addr",
        "localhost"
    ])
    .is_err());
}

#[test]
fn test_datasets_group_filter() {
    let cli = Cli::parse_from([
        "transparency-data-downloader",
        "datasets",
        "--group",
        "day_range",
    ]);
    match cli.command {
        Commands::Datasets(cmd) => {
            assert_eq!(cmd.group, Some(transparency_data_downloader::FormattingGroup::DayRange))
        }
        other => panic!("expected datasets command, got {other:?}"),
    }
}
