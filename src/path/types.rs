//! Path addressing types
//!
//! Defines the addressing strategies and their construction-time validation.

use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};

/// Addressing strategy tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePathType {
    /// A single named file
    FilePath,
    /// Folder and file name patterns
    Wildcard,
    /// Every object under a key prefix
    Prefix,
    /// Files named in a list file
    ListOfFiles,
}

impl FilePathType {
    /// Name used in error messages
    pub fn as_str(self) -> &'static str {
        match self {
            FilePathType::FilePath => "file_path",
            FilePathType::Wildcard => "wildcard",
            FilePathType::Prefix => "prefix",
            FilePathType::ListOfFiles => "list_of_files",
        }
    }
}

/// Addressing strategy tag for Google Cloud Storage
///
/// Google Cloud Storage exposes the same four strategies as the other object
/// stores.
pub type GoogleCloudStoragePathType = FilePathType;

// ============================================================================
// Validated Addressing
// ============================================================================

/// A validated addressing strategy
///
/// Each variant carries exactly its own fields. Instances can only be
/// obtained from the constructors below or by validating a
/// [`FilePathConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FilePathConfig", into = "FilePathConfig")]
pub enum PathAddressing {
    /// A single named file, optionally inside a folder
    FilePath {
        /// Folder containing the file (bucket root when absent)
        folder_path: Option<String>,
        /// File name
        file_name: String,
    },
    /// Wildcard patterns over folders and file names
    Wildcard {
        /// Folder pattern
        wildcard_folder_path: String,
        /// File name pattern
        wildcard_file_name: String,
    },
    /// Every object whose key starts with a prefix
    Prefix {
        /// Key prefix
        prefix: String,
    },
    /// Files listed in a text file
    ListOfFiles {
        /// Path of the list file
        file_list_path: String,
        /// Folder the listed paths are relative to
        list_folder_path: Option<String>,
    },
}

impl PathAddressing {
    /// Address a single file
    pub fn file_path(folder_path: impl Into<String>, file_name: impl Into<String>) -> Result<Self> {
        FilePathConfig {
            path_type: Some(FilePathType::FilePath),
            folder_path: Some(folder_path.into()),
            file_name: Some(file_name.into()),
            ..FilePathConfig::default()
        }
        .validate()
    }

    /// Address files by wildcard patterns
    pub fn wildcard(
        folder_pattern: impl Into<String>,
        file_pattern: impl Into<String>,
    ) -> Result<Self> {
        FilePathConfig {
            path_type: Some(FilePathType::Wildcard),
            wildcard_folder_path: Some(folder_pattern.into()),
            wildcard_file_name: Some(file_pattern.into()),
            ..FilePathConfig::default()
        }
        .validate()
    }

    /// Address files by key prefix
    pub fn prefix(prefix: impl Into<String>) -> Result<Self> {
        FilePathConfig {
            path_type: Some(FilePathType::Prefix),
            prefix: Some(prefix.into()),
            ..FilePathConfig::default()
        }
        .validate()
    }

    /// Address files named in a list file
    pub fn list_of_files(file_list_path: impl Into<String>) -> Result<Self> {
        FilePathConfig {
            path_type: Some(FilePathType::ListOfFiles),
            file_list_path: Some(file_list_path.into()),
            ..FilePathConfig::default()
        }
        .validate()
    }

    /// Address a single object by its full key, splitting off the folder
    pub fn object_key(key: &str) -> Result<Self> {
        let (folder_path, file_name) = match key.rsplit_once('/') {
            Some((folder, file)) => (folder.to_string().none_if_empty(), file),
            None => (None, key),
        };
        if file_name.is_empty() {
            return Err(Error::invalid_value(
                "object_key",
                format!("'{key}' does not name an object"),
            ));
        }
        Ok(Self::FilePath {
            folder_path,
            file_name: file_name.to_string(),
        })
    }

    /// Strategy tag of this addressing
    pub fn path_type(&self) -> FilePathType {
        match self {
            PathAddressing::FilePath { .. } => FilePathType::FilePath,
            PathAddressing::Wildcard { .. } => FilePathType::Wildcard,
            PathAddressing::Prefix { .. } => FilePathType::Prefix,
            PathAddressing::ListOfFiles { .. } => FilePathType::ListOfFiles,
        }
    }

    /// Whether a `recursive` flag may accompany this addressing
    ///
    /// The orchestration engine rejects `recursive` next to a file list.
    pub fn permits_recursive(&self) -> bool {
        !matches!(self, PathAddressing::ListOfFiles { .. })
    }
}

/// Containing folder of a slash-separated path
pub(crate) fn parent_folder(path: &str) -> Option<String> {
    path.rsplit_once('/')
        .map(|(folder, _)| folder.to_string())
        .none_if_empty()
}

// ============================================================================
// Raw Configuration
// ============================================================================

/// Flat addressing descriptor as supplied by callers
///
/// `path_type` may be omitted, in which case it is inferred from the fields
/// that are set. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePathConfig {
    /// Strategy tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_type: Option<FilePathType>,

    /// Folder of a single file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,

    /// Name of a single file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Full object key of a single file (folder and name in one)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_key: Option<String>,

    /// Folder wildcard pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard_folder_path: Option<String>,

    /// File name wildcard pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard_file_name: Option<String>,

    /// Key prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Path of a file listing the files to copy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_list_path: Option<String>,

    /// Folder the listed files are relative to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_folder_path: Option<String>,
}

impl FilePathConfig {
    /// Validate into a [`PathAddressing`]
    pub fn validate(self) -> Result<PathAddressing> {
        let config = self.normalized();
        let path_type = config.path_type.unwrap_or_else(|| config.inferred_type());
        config.reject_foreign_fields(path_type)?;

        match path_type {
            FilePathType::FilePath => match config.object_key {
                Some(key) => PathAddressing::object_key(&key),
                None => Ok(PathAddressing::FilePath {
                    folder_path: config.folder_path,
                    file_name: config
                        .file_name
                        .ok_or_else(|| Error::missing_field("file_name"))?,
                }),
            },
            FilePathType::Wildcard => Ok(PathAddressing::Wildcard {
                wildcard_folder_path: config
                    .wildcard_folder_path
                    .ok_or_else(|| Error::missing_field("wildcard_folder_path"))?,
                wildcard_file_name: config
                    .wildcard_file_name
                    .ok_or_else(|| Error::missing_field("wildcard_file_name"))?,
            }),
            FilePathType::Prefix => Ok(PathAddressing::Prefix {
                prefix: config.prefix.ok_or_else(|| Error::missing_field("prefix"))?,
            }),
            FilePathType::ListOfFiles => Ok(PathAddressing::ListOfFiles {
                file_list_path: config
                    .file_list_path
                    .ok_or_else(|| Error::missing_field("file_list_path"))?,
                list_folder_path: config.list_folder_path,
            }),
        }
    }

    fn normalized(self) -> Self {
        Self {
            path_type: self.path_type,
            folder_path: self.folder_path.none_if_empty(),
            file_name: self.file_name.none_if_empty(),
            object_key: self.object_key.none_if_empty(),
            wildcard_folder_path: self.wildcard_folder_path.none_if_empty(),
            wildcard_file_name: self.wildcard_file_name.none_if_empty(),
            prefix: self.prefix.none_if_empty(),
            file_list_path: self.file_list_path.none_if_empty(),
            list_folder_path: self.list_folder_path.none_if_empty(),
        }
    }

    fn inferred_type(&self) -> FilePathType {
        if self.file_list_path.is_some() || self.list_folder_path.is_some() {
            FilePathType::ListOfFiles
        } else if self.wildcard_folder_path.is_some() || self.wildcard_file_name.is_some() {
            FilePathType::Wildcard
        } else if self.prefix.is_some() {
            FilePathType::Prefix
        } else {
            FilePathType::FilePath
        }
    }

    /// Fields that are set, with the strategy each one belongs to
    fn populated_fields(&self) -> Vec<(&'static str, FilePathType)> {
        [
            ("folder_path", self.folder_path.is_some(), FilePathType::FilePath),
            ("file_name", self.file_name.is_some(), FilePathType::FilePath),
            ("object_key", self.object_key.is_some(), FilePathType::FilePath),
            (
                "wildcard_folder_path",
                self.wildcard_folder_path.is_some(),
                FilePathType::Wildcard,
            ),
            (
                "wildcard_file_name",
                self.wildcard_file_name.is_some(),
                FilePathType::Wildcard,
            ),
            ("prefix", self.prefix.is_some(), FilePathType::Prefix),
            (
                "file_list_path",
                self.file_list_path.is_some(),
                FilePathType::ListOfFiles,
            ),
            (
                "list_folder_path",
                self.list_folder_path.is_some(),
                FilePathType::ListOfFiles,
            ),
        ]
        .into_iter()
        .filter(|(_, set, _)| *set)
        .map(|(name, _, owner)| (name, owner))
        .collect()
    }

    fn reject_foreign_fields(&self, path_type: FilePathType) -> Result<()> {
        if let Some((field, _)) = self
            .populated_fields()
            .into_iter()
            .find(|(_, owner)| *owner != path_type)
        {
            return Err(Error::conflicting_field(path_type.as_str(), field));
        }
        if self.object_key.is_some() && (self.folder_path.is_some() || self.file_name.is_some()) {
            return Err(Error::conflicting_field("object_key", "folder_path/file_name"));
        }
        Ok(())
    }
}

impl TryFrom<FilePathConfig> for PathAddressing {
    type Error = Error;

    fn try_from(config: FilePathConfig) -> Result<Self> {
        config.validate()
    }
}

impl From<PathAddressing> for FilePathConfig {
    fn from(addressing: PathAddressing) -> Self {
        let path_type = Some(addressing.path_type());
        match addressing {
            PathAddressing::FilePath {
                folder_path,
                file_name,
            } => Self {
                path_type,
                folder_path,
                file_name: Some(file_name),
                ..Self::default()
            },
            PathAddressing::Wildcard {
                wildcard_folder_path,
                wildcard_file_name,
            } => Self {
                path_type,
                wildcard_folder_path: Some(wildcard_folder_path),
                wildcard_file_name: Some(wildcard_file_name),
                ..Self::default()
            },
            PathAddressing::Prefix { prefix } => Self {
                path_type,
                prefix: Some(prefix),
                ..Self::default()
            },
            PathAddressing::ListOfFiles {
                file_list_path,
                list_folder_path,
            } => Self {
                path_type,
                file_list_path: Some(file_list_path),
                list_folder_path,
                ..Self::default()
            },
        }
    }
}
