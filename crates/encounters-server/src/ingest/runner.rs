//! Batch ingestion of delimited files

use encounters_common::{Record, RecordId};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::parser::{ParsedLine, RecordParser};
use crate::store::{SharedStore, StoreError};

/// Aggregate counts for one ingestion run
///
/// `lines_read` excludes the header line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestionSummary {
    pub lines_read: usize,
    pub inserted: usize,
    pub skipped: usize,
}

/// Faults that abort an ingestion run
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to store record from line {line}: {source}")]
    Store {
        line: usize,
        #[source]
        source: StoreError,
    },
}

/// Streams lines from a reader through [`RecordParser`] into a store
///
/// The first line is a header and is discarded unchecked. Lines are inserted
/// sequentially in input order; a store failure stops the run and rows already
/// inserted stay in place.
pub struct IngestionRunner {
    store: SharedStore,
    parser: RecordParser,
}

impl IngestionRunner {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            parser: RecordParser::new(),
        }
    }

    /// Ingest a file from disk
    pub async fn run_file(&self, path: &Path) -> Result<IngestionSummary, IngestError> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| IngestError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        self.run(BufReader::new(file)).await
    }

    /// Ingest every line produced by `reader`
    #[tracing::instrument(skip_all)]
    pub async fn run<R>(&self, reader: R) -> Result<IngestionSummary, IngestError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut summary = IngestionSummary::default();

        match lines.next_line().await? {
            Some(header) => tracing::debug!(header = %header, "Discarding header line"),
            None => {
                tracing::warn!("Input is empty, nothing to ingest");
                return Ok(summary);
            },
        }

        let mut line_number = 1;
        while let Some(line) = lines.next_line().await? {
            line_number += 1;
            summary.lines_read += 1;

            match self.parser.parse(Some(&line)) {
                ParsedLine::Record(record) => {
                    let id = self.insert(line_number, &record).await?;
                    tracing::debug!(line = line_number, id, "Record inserted");
                    summary.inserted += 1;
                },
                ParsedLine::Skip(reason) => {
                    tracing::warn!(line = line_number, %reason, "Skipping line");
                    summary.skipped += 1;
                },
            }
        }

        tracing::info!(
            lines_read = summary.lines_read,
            inserted = summary.inserted,
            skipped = summary.skipped,
            "Ingestion finished"
        );

        Ok(summary)
    }

    async fn insert(&self, line: usize, record: &Record) -> Result<RecordId, IngestError> {
        self.store.insert(record).await.map_err(|source| {
            tracing::error!(line, error = %source, "Store rejected record, aborting run");
            IngestError::Store { line, source }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryRecordStore, RecordStore};
    use std::sync::Arc;

    const HEADER: &str = "subject_name;date_of_birth;encounter_date;provider;encounter_note;chief_complaint;provider_identifier";

    async fn ingest(input: &str) -> (Arc<InMemoryRecordStore>, IngestionSummary) {
        let store = Arc::new(InMemoryRecordStore::new());
        let runner = IngestionRunner::new(store.clone());
        let summary = runner.run(input.as_bytes()).await.unwrap();
        (store, summary)
    }

    #[tokio::test]
    async fn test_empty_input() {
        let (store, summary) = ingest("").await;

        assert_eq!(summary, IngestionSummary::default());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_header_only() {
        let (store, summary) = ingest(&format!("{HEADER}\n")).await;

        assert_eq!(summary.lines_read, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_header_is_never_parsed() {
        let input = "jane;;;;;;1\nbob;;;;;;2\n";
        let (store, summary) = ingest(input).await;

        assert_eq!(summary.inserted, 1);
        assert_eq!(store.fetch_by_id(1).await.unwrap().unwrap().subject_name, "bob");
    }

    #[tokio::test]
    async fn test_skips_bad_lines_and_keeps_order() {
        let input = format!(
            "{HEADER}\nfirst;January 9, 1940;;;;;1\nbroken;line\nsecond;;;;;;x\nthird;;;;;;3"
        );
        let (store, summary) = ingest(&input).await;

        assert_eq!(
            summary,
            IngestionSummary {
                lines_read: 4,
                inserted: 2,
                skipped: 2,
            }
        );

        let rows = store.list(0, 10).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.subject_name.as_str()).collect();
        assert_eq!(names, vec!["first", "third"]);
        assert_eq!(rows[0].date_of_birth, chrono::NaiveDate::from_ymd_opt(1940, 1, 9));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let runner = IngestionRunner::new(Arc::new(InMemoryRecordStore::new()));

        let result = runner
            .run_file(Path::new("/nonexistent/encounters.csv"))
            .await;

        assert!(matches!(result, Err(IngestError::Open { .. })));
    }
}
