//! Path addressing resolver
//!
//! Splits an addressing strategy into dataset `location` keys and
//! `storeSettings` keys:
//!
//! | Strategy      | storeSettings                          | location                         |
//! |---------------|----------------------------------------|----------------------------------|
//! | file path     | -                                      | container, folderPath, fileName  |
//! | wildcard      | wildcardFolderPath, wildcardFileName   | container                        |
//! | prefix        | prefix                                 | container                        |
//! | list of files | fileListPath                           | container, folderPath (derived)  |

use super::types::{parent_folder, PathAddressing};
use crate::config::FileConfiguration;
use crate::fragment::ObjectBuilder;
use crate::types::JsonObject;

/// The two disjoint halves of a resolved addressing strategy
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    /// `datasetSettings.typeProperties.location`
    pub location: JsonObject,
    /// Addressing keys for `storeSettings`
    pub store_settings: JsonObject,
    /// Whether the connector may add `recursive` to `storeSettings`
    pub permits_recursive: bool,
}

/// Resolve an addressing strategy against a connector location
///
/// `location` already holds the connector's location type and container
/// (bucket) key; this only adds the addressing keys.
pub fn resolve(addressing: &PathAddressing, location: ObjectBuilder) -> ResolvedPath {
    let store = ObjectBuilder::new();
    let (location, store) = match addressing {
        PathAddressing::FilePath {
            folder_path,
            file_name,
        } => (
            location
                .insert_opt("folderPath", folder_path.as_deref())
                .insert("fileName", file_name.as_str()),
            store,
        ),
        PathAddressing::Wildcard {
            wildcard_folder_path,
            wildcard_file_name,
        } => (
            location,
            store
                .insert("wildcardFolderPath", wildcard_folder_path.as_str())
                .insert("wildcardFileName", wildcard_file_name.as_str()),
        ),
        PathAddressing::Prefix { prefix } => (location, store.insert("prefix", prefix.as_str())),
        PathAddressing::ListOfFiles {
            file_list_path,
            list_folder_path,
        } => {
            let folder = list_folder_path
                .clone()
                .or_else(|| parent_folder(file_list_path));
            (
                location.insert_opt("folderPath", folder),
                store.insert("fileListPath", file_list_path.as_str()),
            )
        }
    };

    ResolvedPath {
        location: location.build(),
        store_settings: store.build(),
        permits_recursive: addressing.permits_recursive(),
    }
}

/// Location of a single file target (sinks and Lakehouse files)
///
/// Missing folder or file names are omitted rather than written as null.
pub fn file_location(file: &FileConfiguration, location: ObjectBuilder) -> JsonObject {
    location
        .insert_opt("folderPath", file.folder_path.as_deref())
        .insert_opt("fileName", file.file_name.as_deref())
        .build()
}
