//! Compilation shared by the file-based sinks

use crate::config::FileConfiguration;
use crate::dataset::{file_type_properties, DatasetReference, DatasetSettings};
use crate::format::{DelimitedTextOptions, WriteFormatOptions};
use crate::fragment::{CompiledActivityFragment, FragmentBuilder, ObjectBuilder};
use crate::path::file_location;

/// Borrowed view of a file-based sink, ready to compile
pub(crate) struct FileStoreSink<'a> {
    /// Typed `storeSettings` with the connector's write knobs
    pub write_settings: ObjectBuilder,
    /// Location type and container key
    pub location: ObjectBuilder,
    pub file: &'a FileConfiguration,
    pub write_options: WriteFormatOptions,
    pub delimited: &'a DelimitedTextOptions,
    /// Dataset compression codec
    pub compression_codec: Option<&'a str>,
    pub reference: DatasetReference,
}

impl FileStoreSink<'_> {
    pub fn compile(self) -> CompiledActivityFragment {
        let format = self.file.file_format;
        let location = file_location(self.file, self.location);

        let compression = self.compression_codec.map(ObjectBuilder::typed);
        let type_properties = file_type_properties(location, format, self.delimited)
            .insert_opt("compression", compression)
            .build();

        let dataset = DatasetSettings::new(format.dataset_type(), self.reference)
            .type_properties(type_properties)
            .schema(format.schema_placeholder())
            .build();

        FragmentBuilder::new(format.sink_type())
            .store_settings(self.write_settings.build())
            .format_settings(format.write_settings(&self.write_options))
            .dataset_settings(dataset)
            .build()
    }
}
