use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::file::{FileCategory, FileRecord};

/// Storage capacity available to an account: 2 GiB.
pub const TOTAL_SPACE_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Per-category running total over a user's files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpace {
    pub size: u64,
    /// Most recent update across the category's files.
    pub latest_date: Option<DateTime<Utc>>,
}

/// Aggregated space usage across all categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalSpace {
    pub document: CategorySpace,
    pub image: CategorySpace,
    pub video: CategorySpace,
    pub audio: CategorySpace,
    pub other: CategorySpace,
    pub used: u64,
    pub all: u64,
}

impl Default for TotalSpace {
    fn default() -> Self {
        TotalSpace {
            document: CategorySpace::default(),
            image: CategorySpace::default(),
            video: CategorySpace::default(),
            audio: CategorySpace::default(),
            other: CategorySpace::default(),
            used: 0,
            all: TOTAL_SPACE_BYTES,
        }
    }
}

impl TotalSpace {
    /// Fold a file listing into per-category totals.
    pub fn from_files(files: &[FileRecord]) -> Self {
        let mut space = TotalSpace::default();
        for file in files {
            space.add(file.category, file.size, file.updated_at);
        }
        space
    }

    pub fn add(&mut self, category: FileCategory, size: u64, updated_at: DateTime<Utc>) {
        let slot = self.slot_mut(category);
        slot.size += size;
        if slot.latest_date.map_or(true, |latest| updated_at > latest) {
            slot.latest_date = Some(updated_at);
        }
        self.used += size;
    }

    pub fn get(&self, category: FileCategory) -> &CategorySpace {
        match category {
            FileCategory::Document => &self.document,
            FileCategory::Image => &self.image,
            FileCategory::Video => &self.video,
            FileCategory::Audio => &self.audio,
            FileCategory::Other => &self.other,
        }
    }

    fn slot_mut(&mut self, category: FileCategory) -> &mut CategorySpace {
        match category {
            FileCategory::Document => &mut self.document,
            FileCategory::Image => &mut self.image,
            FileCategory::Video => &mut self.video,
            FileCategory::Audio => &mut self.audio,
            FileCategory::Other => &mut self.other,
        }
    }
}

/// A dashboard section over the aggregated totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSection {
    pub title: &'static str,
    pub size: u64,
    pub latest_date: Option<DateTime<Utc>>,
    /// Browse path for the section's files.
    pub url: &'static str,
}

/// Reshape the totals into the four display sections. Video and audio fold
/// into a single Media section: sizes summed, the later of the two dates.
pub fn usage_summary(total: &TotalSpace) -> Vec<UsageSection> {
    let media_latest = match (total.video.latest_date, total.audio.latest_date) {
        (Some(video), Some(audio)) => Some(video.max(audio)),
        (video, audio) => video.or(audio),
    };

    vec![
        UsageSection {
            title: "Documents",
            size: total.document.size,
            latest_date: total.document.latest_date,
            url: "/documents",
        },
        UsageSection {
            title: "Images",
            size: total.image.size,
            latest_date: total.image.latest_date,
            url: "/images",
        },
        UsageSection {
            title: "Media",
            size: total.video.size + total.audio.size,
            latest_date: media_latest,
            url: "/media",
        },
        UsageSection {
            title: "Others",
            size: total.other.size,
            latest_date: total.other.latest_date,
            url: "/others",
        },
    ]
}

/// Share of the capacity a byte count represents, rounded to two decimals.
pub fn percentage_used(size_bytes: u64) -> f64 {
    let percentage = size_bytes as f64 / TOTAL_SPACE_BYTES as f64 * 100.0;
    (percentage * 100.0).round() / 100.0
}

/// Map a browse-route segment to the category set it lists.
pub fn categories_for_segment(segment: &str) -> &'static [FileCategory] {
    match segment {
        "documents" => &[FileCategory::Document],
        "images" => &[FileCategory::Image],
        "media" => &[FileCategory::Video, FileCategory::Audio],
        "others" => &[FileCategory::Other],
        _ => &[FileCategory::Document],
    }
}
