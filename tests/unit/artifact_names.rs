//! Unit tests for artifact naming

use chrono::NaiveDate;
use transparency_data_downloader::output::{artifact_name, SnapshotWriter};
use transparency_data_downloader::period::chunk;
use transparency_data_downloader::{ChunkPolicy, DatasetType};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_names_for_default_window() {
    let dataset = DatasetType::new("despesa");
    let names: Vec<String> = chunk(date(2021, 1, 1), date(2023, 6, 15), ChunkPolicy::Annual)
        .map(|c| artifact_name(&dataset, &c))
        .collect();

    assert_eq!(
        names,
        vec![
            "despesa - 1 a 12 - 2021.json",
            "despesa - 1 a 12 - 2022.json",
            "despesa - 1 a 6 - 2023.json",
        ]
    );
}

#[test]
fn test_reference_names_have_no_slash() {
    let dataset = DatasetType::new("servidores");
    let names: Vec<String> = chunk(date(2023, 10, 1), date(2024, 2, 1), ChunkPolicy::Monthly)
        .map(|c| artifact_name(&dataset, &c))
        .collect();

    assert_eq!(names.len(), 5);
    assert_eq!(names[0], "servidores - 102023.json");
    assert_eq!(names[4], "servidores - 022024.json");
    assert!(names.iter().all(|n| !n.contains('/')));
}

#[test]
fn test_names_never_collide_across_datasets() {
    let chunks: Vec<_> = chunk(date(2019, 1, 1), date(2024, 5, 20), ChunkPolicy::Annual).collect();
    let mut names: Vec<String> = ["despesa", "despesaOrcamentaria", "receita"]
        .iter()
        .flat_map(|id| {
            let dataset = DatasetType::new(*id);
            chunks
                .iter()
                .map(move |c| artifact_name(&dataset, c))
                .collect::<Vec<_>>()
        })
        .collect();

    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test]
fn test_writer_paths_join_output_dir() {
    let writer = SnapshotWriter::new("dados");
    let first = chunk(date(2022, 1, 1), date(2022, 12, 31), ChunkPolicy::Annual)
        .next()
        .unwrap();
    assert_eq!(
        writer.artifact_path(&DatasetType::new("receita"), &first),
        std::path::Path::new("dados").join("receita - 1 a 12 - 2022.json")
    );
}
