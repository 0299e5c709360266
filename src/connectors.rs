//! Connector registry
//!
//! Lists every connector the compiler knows, the tags callers may use to
//! select it, and whether it can act as a copy source, a copy sink, or both.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Connector identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorKind {
    SharePoint,
    S3,
    Lakehouse,
    Http,
    Rest,
    FileSystem,
    MySql,
    GoogleCloudStorage,
}

/// Connector metadata for display
#[derive(Debug, Clone)]
pub struct ConnectorInfo {
    pub kind: ConnectorKind,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub source: bool,
    pub sink: bool,
}

/// Every known connector
pub static CONNECTORS: &[ConnectorInfo] = &[
    ConnectorInfo {
        kind: ConnectorKind::SharePoint,
        name: "SharePoint",
        aliases: &["sharepoint_online_list", "sharepointonlinelist"],
        description: "SharePoint Online lists",
        source: true,
        sink: false,
    },
    ConnectorInfo {
        kind: ConnectorKind::S3,
        name: "S3",
        aliases: &["amazons3", "amazon_s3"],
        description: "Amazon S3 buckets (sink through the S3-compatible connector)",
        source: true,
        sink: true,
    },
    ConnectorInfo {
        kind: ConnectorKind::Lakehouse,
        name: "Lakehouse",
        aliases: &["fabric_lakehouse"],
        description: "Lakehouse tables and files",
        source: true,
        sink: true,
    },
    ConnectorInfo {
        kind: ConnectorKind::Http,
        name: "HTTP",
        aliases: &["httpserver"],
        description: "Generic HTTP endpoints returning files",
        source: true,
        sink: false,
    },
    ConnectorInfo {
        kind: ConnectorKind::Rest,
        name: "REST",
        aliases: &["restservice"],
        description: "RESTful APIs with JSON payloads",
        source: true,
        sink: true,
    },
    ConnectorInfo {
        kind: ConnectorKind::FileSystem,
        name: "FileSystem",
        aliases: &["file_system", "fileserver"],
        description: "On-premises file shares through a gateway",
        source: true,
        sink: true,
    },
    ConnectorInfo {
        kind: ConnectorKind::MySql,
        name: "MySQL",
        aliases: &["my_sql"],
        description: "MySQL tables and queries (read only)",
        source: true,
        sink: false,
    },
    ConnectorInfo {
        kind: ConnectorKind::GoogleCloudStorage,
        name: "GoogleCloudStorage",
        aliases: &["gcs", "google_cloud_storage"],
        description: "Google Cloud Storage buckets",
        source: true,
        sink: true,
    },
];

impl ConnectorKind {
    /// Registry entry for this connector
    pub fn info(self) -> &'static ConnectorInfo {
        CONNECTORS
            .iter()
            .find(|info| info.kind == self)
            .unwrap_or_else(|| unreachable!("every connector kind is registered"))
    }

    /// Display name
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Whether the connector can be read from
    pub fn supports_source(self) -> bool {
        self.info().source
    }

    /// Whether the connector can be written to
    pub fn supports_sink(self) -> bool {
        self.info().sink
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConnectorKind {
    type Err = Error;

    /// Case-insensitive lookup by name or alias
    fn from_str(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        CONNECTORS
            .iter()
            .find(|info| {
                info.name.eq_ignore_ascii_case(tag)
                    || info.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(tag))
            })
            .map(|info| info.kind)
            .ok_or_else(|| Error::UnknownConnector {
                name: tag.to_string(),
            })
    }
}

/// All registered connectors with display metadata
pub fn list_connectors() -> &'static [ConnectorInfo] {
    CONNECTORS
}

/// List connector names usable as sources
pub fn list_sources() -> Vec<&'static str> {
    CONNECTORS
        .iter()
        .filter(|info| info.source)
        .map(|info| info.name)
        .collect()
}

/// List connector names usable as sinks
pub fn list_sinks() -> Vec<&'static str> {
    CONNECTORS
        .iter()
        .filter(|info| info.sink)
        .map(|info| info.name)
        .collect()
}
