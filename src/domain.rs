use std::fmt;

use crate::metadata::{GAUGE_METADATA_URL, PIXEL_METADATA_URL};

/// The two sensor families in the 3RWW archive: radar pixels and physical
/// rain gauges. Each maps to its own key prefix and metadata endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Pixels,
    Gauges,
}

impl SensorKind {
    pub fn key_prefix(&self) -> &'static str {
        match self {
            SensorKind::Pixels => "pixels",
            SensorKind::Gauges => "gauges",
        }
    }

    /// GeoJSON property holding the sensor identifier for this kind.
    pub fn id_field(&self) -> &'static str {
        match self {
            SensorKind::Pixels => "pixel_id",
            SensorKind::Gauges => "web_id",
        }
    }

    pub fn metadata_url(&self) -> &'static str {
        match self {
            SensorKind::Pixels => PIXEL_METADATA_URL,
            SensorKind::Gauges => GAUGE_METADATA_URL,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_prefix())
    }
}

/// Where the identifier list for a sensor kind comes from.
///
/// `Explicit` is used verbatim, including when empty (download nothing of
/// that kind). `ResolveFromSource` asks the metadata endpoint for the full
/// list. Duplicates in either source pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifiers {
    Explicit(Vec<String>),
    ResolveFromSource,
}

impl Identifiers {
    /// Maps the CLI surface onto the enum: zero values given means "resolve
    /// everything", matching the historical behavior of the archive tooling.
    pub fn from_cli(values: Vec<String>) -> Self {
        if values.is_empty() {
            Identifiers::ResolveFromSource
        } else {
            Identifiers::Explicit(values)
        }
    }
}
