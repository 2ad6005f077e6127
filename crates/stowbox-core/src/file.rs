use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest upload accepted before anything is sent to the backend.
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Document,
    Image,
    Video,
    Audio,
    Other,
}

impl FileCategory {
    pub const ALL: &[FileCategory] = &[
        FileCategory::Document,
        FileCategory::Image,
        FileCategory::Video,
        FileCategory::Audio,
        FileCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Document => "document",
            FileCategory::Image => "image",
            FileCategory::Video => "video",
            FileCategory::Audio => "audio",
            FileCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "document" => Some(FileCategory::Document),
            "image" => Some(FileCategory::Image),
            "video" => Some(FileCategory::Video),
            "audio" => Some(FileCategory::Audio),
            "other" => Some(FileCategory::Other),
            _ => None,
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file document as the backend stores it in the files collection.
///
/// The category is derived from the extension once, at upload time, and
/// persisted; it is never recomputed from the stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub category: FileCategory,
    pub extension: String,
    pub size: u64,
    pub owner: String,
    pub account_id: String,
    /// Emails of users this file has been shared with.
    #[serde(default)]
    pub users: Vec<String>,
    pub bucket_file_id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Attribute payload for creating a file document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileData {
    #[serde(rename = "type")]
    pub category: FileCategory,
    pub name: String,
    pub url: String,
    pub extension: String,
    pub size: u64,
    pub owner: String,
    pub account_id: String,
    pub users: Vec<String>,
    pub bucket_file_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A listing sort order, parsed from `field-direction` strings such as
/// `$createdAt-desc` or `name-asc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Anything other than an explicit `asc` suffix sorts descending,
    /// including a bare field name with no suffix at all.
    pub fn parse(s: &str) -> Self {
        match s.split_once('-') {
            Some((field, "asc")) => SortSpec {
                field: field.to_string(),
                direction: SortDirection::Asc,
            },
            Some((field, _)) => SortSpec {
                field: field.to_string(),
                direction: SortDirection::Desc,
            },
            None => SortSpec {
                field: s.to_string(),
                direction: SortDirection::Desc,
            },
        }
    }

    /// Newest first, the listing default.
    pub fn created_desc() -> Self {
        SortSpec {
            field: "$createdAt".to_string(),
            direction: SortDirection::Desc,
        }
    }
}
