use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::{debug, warn};

use crate::dates::expand_months;
use crate::domain::{Identifiers, SensorKind};
use crate::error::RainfallError;
use crate::keys::{ObjectKeyRecord, generate_keys};
use crate::metadata::MetadataClient;
use crate::s3::StoreClient;

/// One archive download request: the month range bounds, the identifier
/// source for each sensor kind, and the destination directory.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub start: String,
    pub end: String,
    pub pixels: Identifiers,
    pub gauges: Identifiers,
    pub dest: Utf8PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchReport {
    /// Local paths of successfully written files, in batch order.
    pub downloaded: Vec<Utf8PathBuf>,
    /// Remote keys that did not exist, in batch order.
    pub missing: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Downloaded { path: Utf8PathBuf },
    Missing { key: String },
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

/// Sink for callers that only want the returned report.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn event(&self, _event: ProgressEvent) {}
}

#[derive(Clone)]
pub struct App<M: MetadataClient, S: StoreClient> {
    metadata: M,
    store: S,
}

impl<M: MetadataClient, S: StoreClient> App<M, S> {
    pub fn new(metadata: M, store: S) -> Self {
        Self { metadata, store }
    }

    /// Downloads every pixel and gauge file in the request's month range,
    /// pixels first. Missing objects are skipped and reported; any other
    /// remote or filesystem failure aborts the rest of the batch.
    pub fn fetch(
        &self,
        request: &FetchRequest,
        sink: &dyn ProgressSink,
    ) -> Result<FetchReport, RainfallError> {
        let months = expand_months(&request.start, &request.end)?;

        let pixel_ids = self.resolve(SensorKind::Pixels, &request.pixels)?;
        let gauge_ids = self.resolve(SensorKind::Gauges, &request.gauges)?;

        let mut records = generate_keys(&months, &pixel_ids, SensorKind::Pixels);
        records.extend(generate_keys(&months, &gauge_ids, SensorKind::Gauges));

        self.fetch_and_store(&records, &request.dest, sink)
    }

    fn resolve(
        &self,
        kind: SensorKind,
        identifiers: &Identifiers,
    ) -> Result<Vec<String>, RainfallError> {
        match identifiers {
            Identifiers::Explicit(ids) => Ok(ids.clone()),
            Identifiers::ResolveFromSource => {
                debug!(kind = %kind, url = kind.metadata_url(), "resolving identifiers");
                let ids = self.metadata.resolve_ids(kind.metadata_url(), kind.id_field())?;
                debug!(kind = %kind, count = ids.len(), "resolved identifiers");
                Ok(ids)
            }
        }
    }

    fn fetch_and_store(
        &self,
        records: &[ObjectKeyRecord],
        dest: &Utf8Path,
        sink: &dyn ProgressSink,
    ) -> Result<FetchReport, RainfallError> {
        let mut downloaded = Vec::new();
        let mut missing = Vec::new();

        for record in records {
            match self.store.get_object(&record.key)? {
                Some(bytes) => {
                    let path = record.local_path(dest);
                    write_bytes_atomic(&path, &bytes)?;
                    debug!(key = %record.key, path = %path, "downloaded object");
                    sink.event(ProgressEvent::Downloaded { path: path.clone() });
                    downloaded.push(path);
                }
                None => {
                    warn!(key = %record.key, "object not found, skipping");
                    sink.event(ProgressEvent::Missing {
                        key: record.key.clone(),
                    });
                    missing.push(record.key.clone());
                }
            }
        }

        Ok(FetchReport { downloaded, missing })
    }
}

fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), RainfallError> {
    let parent = path
        .parent()
        .ok_or_else(|| RainfallError::Filesystem(format!("invalid destination path {path}")))?;
    fs::create_dir_all(parent.as_std_path())
        .map_err(|err| RainfallError::Filesystem(err.to_string()))?;
    let temp = tempfile::Builder::new()
        .prefix(".rainfall-archive")
        .tempfile_in(parent.as_std_path())
        .map_err(|err| RainfallError::Filesystem(err.to_string()))?;
    fs::write(temp.path(), content).map_err(|err| RainfallError::Filesystem(err.to_string()))?;
    temp.persist(path.as_std_path())
        .map_err(|err| RainfallError::Filesystem(err.to_string()))?;
    Ok(())
}
