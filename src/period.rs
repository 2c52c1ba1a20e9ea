//! Period partitioning
//!
//! Splits a requested `[start, end]` window into the chunks a dataset type is
//! fetched by. Annual ranges advance a cursor by 12 months at a time and clamp
//! the final range to `end`; month references walk the calendar months each
//! annual range covers.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use transparency_data_downloader::{ChunkPolicy, PeriodChunker};
//!
//! let chunker = PeriodChunker::new(
//!     NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
//!     ChunkPolicy::Annual,
//! );
//! assert_eq!(chunker.chunks().count(), 3);
//! ```

use crate::{Chunk, ChunkPolicy, DateRange, MonthReference};
use chrono::{Months, NaiveDate};

/// Span of one annual chunk before clamping
const ANNUAL_SPAN: Months = Months::new(12);

/// Produces the chunk sequence for one `(start, end, policy)` request.
///
/// The chunker holds no cursor itself; every call to [`PeriodChunker::chunks`]
/// starts a fresh sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodChunker {
    start: NaiveDate,
    end: NaiveDate,
    policy: ChunkPolicy,
}

impl PeriodChunker {
    /// Create a chunker. An inverted window (`start > end`) yields no chunks.
    pub fn new(start: NaiveDate, end: NaiveDate, policy: ChunkPolicy) -> Self {
        Self { start, end, policy }
    }

    /// Policy this chunker applies
    pub fn policy(&self) -> ChunkPolicy {
        self.policy
    }

    /// Lazily produce the chunks in chronological order
    pub fn chunks(&self) -> Chunks {
        Chunks {
            ranges: self.annual_ranges(),
            policy: self.policy,
            months: None,
        }
    }

    /// Annual ranges regardless of policy
    pub fn annual_ranges(&self) -> AnnualRanges {
        AnnualRanges {
            cursor: (self.start <= self.end).then_some(self.start),
            end: self.end,
        }
    }
}

impl IntoIterator for &PeriodChunker {
    type Item = Chunk;
    type IntoIter = Chunks;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks()
    }
}

/// Shorthand for `PeriodChunker::new(start, end, policy).chunks()`
pub fn chunk(start: NaiveDate, end: NaiveDate, policy: ChunkPolicy) -> Chunks {
    PeriodChunker::new(start, end, policy).chunks()
}

/// Iterator over ranges of at most 12 months covering `[start, end]`
#[derive(Debug, Clone)]
pub struct AnnualRanges {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for AnnualRanges {
    type Item = DateRange;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor?;
        if cursor > self.end {
            self.cursor = None;
            return None;
        }

        let chunk_end = cursor
            .checked_add_months(ANNUAL_SPAN)
            .and_then(|d| d.pred_opt())
            .map_or(self.end, |d| d.min(self.end));

        self.cursor = chunk_end.succ_opt();
        DateRange::new(cursor, chunk_end).ok()
    }
}

/// Iterator over [`Chunk`]s for a given policy
#[derive(Debug, Clone)]
pub struct Chunks {
    ranges: AnnualRanges,
    policy: ChunkPolicy,
    // (next month to emit, last month of the current annual range)
    months: Option<(MonthReference, MonthReference)>,
}

impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Self::Item> {
        match self.policy {
            ChunkPolicy::Annual => self.ranges.next().map(Chunk::Range),
            ChunkPolicy::Monthly => loop {
                if let Some((current, last)) = self.months {
                    if current <= last {
                        self.months = Some((current.next(), last));
                        return Some(Chunk::Reference(current));
                    }
                }
                let range = self.ranges.next()?;
                let mut first = MonthReference::from_date(range.start());
                // Unaligned ranges share their boundary month with the previous one
                if let Some((pending, _)) = self.months {
                    first = first.max(pending);
                }
                self.months = Some((first, MonthReference::from_date(range.end())));
            },
        }
    }
}
