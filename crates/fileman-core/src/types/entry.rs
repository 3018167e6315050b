//! One row of a folder listing as returned by a JSON PROPFIND.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::path::{ResourcePath, extension};

/// A listing row. Built fresh for every listing request and never stored
/// beyond the folder currently on display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Server href, usually absolute including the account root.
    #[serde(default)]
    pub href: String,
    /// Whether the resource is a collection.
    #[serde(default, rename = "iscollection", alias = "isCollection")]
    pub is_collection: bool,
    /// MIME type, when the server knows it.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub content_length: Option<u64>,
    /// Last modification time.
    #[serde(default, deserialize_with = "lenient_date")]
    pub modified_date: Option<DateTime<Utc>>,
    /// Template the resource was created from (`folder` for plain folders).
    #[serde(default)]
    pub template_name: Option<String>,
    /// Templates that may be instantiated inside this collection.
    #[serde(default, deserialize_with = "string_or_list")]
    pub allowed_template_names: Vec<String>,
    /// Thumbnail href, for images.
    #[serde(default)]
    pub thumb_href: Option<String>,
    /// Streaming-video href, for videos.
    #[serde(default)]
    pub streaming_video_href: Option<String>,
}

impl FileEntry {
    /// Classify the entry, content type first and extension second.
    pub fn file_type(&self) -> FileType {
        if self.is_collection {
            return FileType::Folder;
        }
        if let Some(ct) = self.content_type.as_deref() {
            if ct.contains("image") {
                return FileType::Image;
            } else if ct.contains("html") {
                return FileType::Html;
            } else if ct.contains("flv") || ct.contains("flash") {
                return FileType::Flash;
            } else if ct.contains("video") {
                return FileType::Video;
            } else if ct.contains("audio") {
                return FileType::Audio;
            } else if ct.contains("directory") {
                return FileType::Folder;
            }
        }
        FileType::from_extension(&extension(&self.name))
    }

    /// Icon file name for the entry.
    pub fn icon(&self) -> String {
        if self.is_collection {
            "folder.png".to_string()
        } else {
            format!("{}_48x48-32.png", extension(&self.href))
        }
    }

    /// Path of this entry relative to the account root.
    pub fn path(&self, account_root: &str) -> ResourcePath {
        let path = ResourcePath::from_href(&self.href, account_root);
        if self.is_collection {
            ResourcePath::folder(path.as_str())
        } else {
            path
        }
    }

    /// Preview image URL rendered by the server for this entry.
    pub fn preview_url(&self, account_root: &str, folder: &ResourcePath) -> String {
        format!(
            "{}_sys_regs/{}",
            folder.to_server_path(account_root),
            self.name
        )
    }

    /// Whether a plain folder, i.e. one without a management template.
    pub fn is_plain_folder(&self) -> bool {
        is_plain_template(self.template_name.as_deref())
    }
}

/// `None`, empty and `folder` all denote a plain folder.
pub fn is_plain_template(template: Option<&str>) -> bool {
    matches!(template, None | Some("") | Some("folder"))
}

/// Coarse classification used to pick a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// A collection.
    Folder,
    /// An image.
    Image,
    /// An HTML page.
    Html,
    /// Flash content identified by content type.
    Flash,
    /// An `.flv` file identified by extension.
    Flv,
    /// Video.
    Video,
    /// Audio.
    Audio,
    /// Anything else, carrying its lower-cased extension.
    Other(String),
}

impl FileType {
    /// Classification by extension alone.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "jpg" | "jpeg" | "png" => Self::Image,
            "flv" => Self::Flv,
            "mp3" => Self::Audio,
            "html" => Self::Html,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder => write!(f, "folder"),
            Self::Image => write!(f, "image"),
            Self::Html => write!(f, "html"),
            Self::Flash => write!(f, "flash"),
            Self::Flv => write!(f, "flv"),
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Other(ext) => write!(f, "{ext}"),
        }
    }
}

/// Accepts epoch milliseconds, RFC 3339 or RFC 2822; anything else is `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .or_else(|_| DateTime::parse_from_rfc2822(&s))
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    })
}

/// Accepts a JSON array of strings or a single comma-separated string.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<String>),
        One(String),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(list)) => list,
        Some(OneOrMany::One(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    })
}
