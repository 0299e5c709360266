//! Compilation shared by the file-based sources
//!
//! Object stores and file shares differ only in their settings and location
//! type names, the container key, and which knobs they expose.

use super::types::StoreReadOptions;
use crate::config::AdditionalColumn;
use crate::dataset::{file_type_properties, DatasetReference, DatasetSettings};
use crate::format::{DelimitedTextOptions, FileFormat};
use crate::fragment::{CompiledActivityFragment, FragmentBuilder, ObjectBuilder};
use crate::path::{resolve, PathAddressing};

/// Borrowed view of a file-based source, ready to compile
pub(crate) struct FileStoreSource<'a> {
    /// `storeSettings.type`
    pub read_settings_type: &'static str,
    /// Location type and container key
    pub location: ObjectBuilder,
    pub addressing: &'a PathAddressing,
    pub format: FileFormat,
    pub max_concurrent_connections: Option<u32>,
    pub read_options: &'a StoreReadOptions,
    pub delimited: &'a DelimitedTextOptions,
    pub connection_id: &'a str,
    pub additional_columns: &'a [AdditionalColumn],
}

impl FileStoreSource<'_> {
    pub fn compile(self) -> CompiledActivityFragment {
        let resolved = resolve(self.addressing, self.location);

        let store_settings = ObjectBuilder::typed(self.read_settings_type)
            .insert_opt("maxConcurrentConnections", self.max_concurrent_connections)
            .merge(resolved.store_settings);
        let store_settings = self
            .read_options
            .apply(store_settings, resolved.permits_recursive);

        let dataset = DatasetSettings::new(
            self.format.dataset_type(),
            DatasetReference::connection(self.connection_id),
        )
        .type_properties(file_type_properties(resolved.location, self.format, self.delimited).build())
        .schema(self.format.schema_placeholder())
        .build();

        FragmentBuilder::new(self.format.source_type())
            .store_settings(store_settings.build())
            .format_settings(self.format.read_settings())
            .dataset_settings(dataset)
            .additional_columns(self.additional_columns)
            .build()
    }
}
