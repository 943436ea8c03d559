//! Batch conversion orchestrator.
//!
//! Coordinates the entire conversion process: locate the entry list in the
//! source document, resolve each entry against the catalog, and emit the
//! import document plus a skip log for unmatched titles.

use crate::record::build_record;
use crate::resolver::{Resolver, SearchProvider};
use crate::xml::render_document;
use anyhow::{Context, Result};
use serde_json::Value;
use shared::models::{AnimeRecord, SourceEntry};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Structural errors in the source document
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("could not find a list of entries in the source document")]
    MissingEntries,
}

/// Statistics for a conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConverterStats {
    pub converted: usize,
    pub skipped: usize,
    pub total: usize,
}

/// Everything a conversion run produces
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// Records for the import document, in source order
    pub records: Vec<AnimeRecord>,
    /// Original titles that could not be matched, in source order
    pub skipped: Vec<String>,
    pub stats: ConverterStats,
}

/// Locate the entry list within the source document
///
/// Export formats differ in what they call the list field, so the first
/// top-level field holding a non-empty sequence of objects is taken, in
/// the document's declared key order.
pub fn locate_entries(doc: &Value) -> Result<&[Value], ConvertError> {
    let fields = match doc.as_object() {
        Some(fields) => fields,
        None => return Err(ConvertError::MissingEntries),
    };

    for (key, value) in fields {
        if let Some(items) = value.as_array() {
            if !items.is_empty() && items.iter().all(Value::is_object) {
                debug!(field = %key, count = items.len(), "Located entry list");
                return Ok(items);
            }
        }
    }

    Err(ConvertError::MissingEntries)
}

/// Main conversion coordinator
pub struct ListConverter<S: SearchProvider> {
    resolver: Resolver<S>,
    user_name: String,
    dry_run: bool,
}

impl<S: SearchProvider> ListConverter<S> {
    /// Create a new list converter
    pub fn new(resolver: Resolver<S>, user_name: String, dry_run: bool) -> Self {
        Self {
            resolver,
            user_name,
            dry_run,
        }
    }

    /// Convert all entries of an already-parsed source document
    ///
    /// Per-entry failures are contained: unmatched titles go to the skip
    /// list and the run continues. Only a document without a locatable
    /// entry list is fatal.
    pub async fn run(&self, doc: &Value) -> Result<ConversionOutcome> {
        let entries = locate_entries(doc)?;
        let total = entries.len();

        info!(total = total, "Starting list conversion");

        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for (idx, raw) in entries.iter().enumerate() {
            let entry: SourceEntry = match serde_json::from_value(raw.clone()) {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(index = idx, error = %e, "Entry is not decodable, dropping");
                    continue;
                }
            };

            let title = match entry.name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => {
                    debug!(index = idx, "Entry has no name, dropping");
                    continue;
                }
            };

            info!(
                progress = format!("{}/{}", idx + 1, total),
                title = %title,
                "Processing entry"
            );

            let matched = self.resolver.resolve(&title).await;

            match build_record(&entry, &matched) {
                Some(record) => {
                    debug!(
                        mal_id = record.series_animedb_id,
                        score = record.my_score,
                        status = %record.my_status,
                        "Built record"
                    );
                    records.push(record);
                }
                None => skipped.push(title),
            }
        }

        let stats = ConverterStats {
            converted: records.len(),
            skipped: skipped.len(),
            total,
        };

        info!(
            converted = stats.converted,
            skipped = stats.skipped,
            total = stats.total,
            "List conversion complete"
        );

        Ok(ConversionOutcome {
            records,
            skipped,
            stats,
        })
    }

    /// Convert a source file into the import document and skip log
    ///
    /// Nothing is written when the run fails, and the skip log is only
    /// written when there is something to put in it.
    pub async fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        skip_log: &Path,
    ) -> Result<ConverterStats> {
        let raw = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read input file: {}", input.display()))?;
        let doc: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse input file: {}", input.display()))?;

        let outcome = self.run(&doc).await?;

        if self.dry_run {
            info!("Dry run, no files written");
            return Ok(outcome.stats);
        }

        let xml = render_document(&self.user_name, &outcome.records)?;
        std::fs::write(output, xml)
            .with_context(|| format!("Failed to write output file: {}", output.display()))?;
        info!(
            path = %output.display(),
            records = outcome.records.len(),
            "Wrote import document"
        );

        if !outcome.skipped.is_empty() {
            let mut contents = outcome.skipped.join("\n");
            contents.push('\n');
            std::fs::write(skip_log, contents)
                .with_context(|| format!("Failed to write skip log: {}", skip_log.display()))?;
            warn!(
                count = outcome.skipped.len(),
                path = %skip_log.display(),
                "Some titles could not be matched, see skip log"
            );
        }

        Ok(outcome.stats)
    }
}
