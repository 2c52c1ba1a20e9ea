//! Unit tests for period partitioning

use chrono::{Datelike, NaiveDate};
use transparency_data_downloader::period::chunk;
use transparency_data_downloader::{Chunk, ChunkPolicy, DateRange, MonthReference, PeriodChunker};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ranges(start: NaiveDate, end: NaiveDate) -> Vec<DateRange> {
    chunk(start, end, ChunkPolicy::Annual)
        .map(|c| match c {
            Chunk::Range(range) => range,
            other => panic!("annual policy produced {other}"),
        })
        .collect()
}

/// Union of the chunks is exactly the window, with no gaps or overlaps
fn assert_partition(start: NaiveDate, end: NaiveDate) {
    let chunks = ranges(start, end);
    assert!(!chunks.is_empty(), "{start}..{end} produced no chunks");
    assert_eq!(chunks.first().unwrap().start(), start);
    assert_eq!(chunks.last().unwrap().end(), end);

    for pair in chunks.windows(2) {
        assert_eq!(
            pair[0].end().succ_opt().unwrap(),
            pair[1].start(),
            "gap or overlap between {} and {}",
            pair[0],
            pair[1]
        );
    }
    for range in &chunks {
        assert!(range.num_days() <= 366, "{range} spans more than 366 days");
    }
}

#[test]
fn test_three_year_window() {
    assert_eq!(
        ranges(date(2021, 1, 1), date(2023, 6, 15)),
        vec![
            DateRange::new(date(2021, 1, 1), date(2021, 12, 31)).unwrap(),
            DateRange::new(date(2022, 1, 1), date(2022, 12, 31)).unwrap(),
            DateRange::new(date(2023, 1, 1), date(2023, 6, 15)).unwrap(),
        ]
    );
}

#[test]
fn test_partition_over_assorted_windows() {
    let windows = [
        (date(2019, 1, 1), date(2024, 5, 20)),
        (date(2020, 2, 29), date(2024, 2, 28)),
        (date(2021, 7, 15), date(2021, 7, 16)),
        (date(2022, 12, 31), date(2023, 1, 1)),
        (date(2010, 3, 3), date(2010, 3, 3)),
        (date(2016, 1, 1), date(2016, 12, 31)),
    ];
    for (start, end) in windows {
        assert_partition(start, end);
    }
}

#[test]
fn test_start_equals_end() {
    let day = date(2022, 8, 9);
    let annual: Vec<Chunk> = chunk(day, day, ChunkPolicy::Annual).collect();
    assert_eq!(annual, vec![Chunk::Range(DateRange::new(day, day).unwrap())]);

    let monthly: Vec<Chunk> = chunk(day, day, ChunkPolicy::Monthly).collect();
    assert_eq!(
        monthly,
        vec![Chunk::Reference(MonthReference {
            year: 2022,
            month: 8
        })]
    );
}

#[test]
fn test_inverted_window_is_empty() {
    assert_eq!(chunk(date(2023, 1, 2), date(2023, 1, 1), ChunkPolicy::Annual).count(), 0);
    assert_eq!(chunk(date(2023, 1, 2), date(2023, 1, 1), ChunkPolicy::Monthly).count(), 0);
}

#[test]
fn test_monthly_stops_after_end_month() {
    let months: Vec<Chunk> = chunk(date(2022, 1, 1), date(2023, 3, 10), ChunkPolicy::Monthly).collect();
    assert_eq!(months.len(), 15);
    assert_eq!(
        months.last(),
        Some(&Chunk::Reference(MonthReference {
            year: 2023,
            month: 3
        }))
    );
}

#[test]
fn test_monthly_is_strictly_increasing() {
    let months: Vec<MonthReference> = chunk(date(2020, 6, 20), date(2023, 2, 1), ChunkPolicy::Monthly)
        .map(|c| match c {
            Chunk::Reference(month) => month,
            other => panic!("monthly policy produced {other}"),
        })
        .collect();
    assert!(months.windows(2).all(|pair| pair[0].next() == pair[1]));
    assert_eq!(months.first().map(|m| m.month), Some(6));
    assert_eq!(months.last().map(|m| (m.year, m.month)), Some((2023, 2)));
}

#[test]
fn test_chunker_is_restartable() {
    let chunker = PeriodChunker::new(date(2019, 1, 1), date(2024, 5, 20), ChunkPolicy::Annual);
    let first: Vec<Chunk> = chunker.chunks().collect();
    let second: Vec<Chunk> = (&chunker).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 6);
    assert!(first.iter().all(|c| match c {
        Chunk::Range(range) => range.start().year() >= 2019,
        Chunk::Reference(_) => false,
    }));
}
