use crate::file::FileCategory;

/// Document extensions, including design and eBook formats.
pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "xls", "xlsx", "csv", "rtf", "ods", "ppt", "pptx", "odp", "md",
    "html", "htm", "epub", "pages", "fig", "psd", "ai", "indd", "xd", "sketch", "afdesign",
    "afphoto",
];

pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "svg", "webp", "tiff", "ico", "apng", "heif", "heic",
    "raw", "jfif", "dds",
];

pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "mkv", "webm", "flv", "wmv", "3gp", "mpeg", "ogv", "vob",
];

pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "ogg", "flac", "aac", "wma", "m4a", "aiff", "alac", "opus",
];

/// Classification result: the category tag and the lower-cased extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileType {
    pub category: FileCategory,
    pub extension: String,
}

/// Classify a filename by the substring after its last `.`, lower-cased.
///
/// A name without an extension classifies as `other` with an empty extension.
/// The sets are checked in a fixed order (document, image, video, audio) so a
/// hypothetical overlap always resolves to the first match.
pub fn file_type(filename: &str) -> FileType {
    let extension = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    };

    if extension.is_empty() {
        return FileType {
            category: FileCategory::Other,
            extension,
        };
    }

    let category = if DOCUMENT_EXTENSIONS.contains(&extension.as_str()) {
        FileCategory::Document
    } else if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        FileCategory::Image
    } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        FileCategory::Video
    } else if AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        FileCategory::Audio
    } else {
        FileCategory::Other
    };

    FileType {
        category,
        extension,
    }
}
