//! Sink model types and traits

use super::{FileSystemSink, GoogleCloudStorageSink, LakehouseSink, RestSink, S3Sink};
use crate::connectors::ConnectorKind;
use crate::error::{Error, Result};
use crate::fragment::CompiledActivityFragment;
use crate::source::parse_config;
use crate::types::JsonValue;
use tracing::{debug, warn};

/// A connector model that can be compiled into a copy activity `sink`
pub trait CopySink {
    /// Connector this model belongs to
    fn kind(&self) -> ConnectorKind;

    /// Compile into the `sink` object of a copy activity
    fn to_copy_activity_sink(&self) -> CompiledActivityFragment;
}

/// Any connector that can be written to
///
/// SharePoint, HTTP and MySQL have no variant here: they can only be read.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkModel {
    Lakehouse(LakehouseSink),
    S3(S3Sink),
    Rest(RestSink),
    FileSystem(FileSystemSink),
    GoogleCloudStorage(GoogleCloudStorageSink),
}

impl SinkModel {
    /// Build a sink model from a connector tag and its configuration
    pub fn from_config(tag: &str, config: JsonValue) -> Result<Self> {
        let kind: ConnectorKind = tag.parse()?;
        Self::from_kind(kind, config)
    }

    /// Build a sink model for a known connector
    ///
    /// Read-only connectors fail with [`Error::UnsupportedCapability`].
    pub fn from_kind(kind: ConnectorKind, config: JsonValue) -> Result<Self> {
        debug!(connector = %kind, "Building sink model");
        let model = match kind {
            ConnectorKind::Lakehouse => Self::Lakehouse(parse_config(kind, config)?),
            ConnectorKind::S3 => Self::S3(parse_config(kind, config)?),
            ConnectorKind::Rest => Self::Rest(parse_config(kind, config)?),
            ConnectorKind::FileSystem => Self::FileSystem(parse_config(kind, config)?),
            ConnectorKind::GoogleCloudStorage => {
                Self::GoogleCloudStorage(parse_config(kind, config)?)
            }
            ConnectorKind::SharePoint | ConnectorKind::Http | ConnectorKind::MySql => {
                warn!(connector = %kind, "Connector cannot be used as a sink");
                return Err(Error::unsupported(kind.name(), "sink"));
            }
        };
        Ok(model)
    }

    fn inner(&self) -> &dyn CopySink {
        match self {
            SinkModel::Lakehouse(model) => model,
            SinkModel::S3(model) => model,
            SinkModel::Rest(model) => model,
            SinkModel::FileSystem(model) => model,
            SinkModel::GoogleCloudStorage(model) => model,
        }
    }
}

impl CopySink for SinkModel {
    fn kind(&self) -> ConnectorKind {
        self.inner().kind()
    }

    fn to_copy_activity_sink(&self) -> CompiledActivityFragment {
        self.inner().to_copy_activity_sink()
    }
}
