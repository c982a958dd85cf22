//! File records.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

/// A scanned file as returned by `files/{hash}`.
///
/// Every field is optional because callers routinely narrow the response with
/// a `fields=` query. Only the identifying strings are typed; timestamps,
/// counters and analysis output are kept as raw JSON, and keys not listed here
/// land in `extra` so the record serializes back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha512: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssdeep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlsh: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trid: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packer: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scanned: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submissions: Option<Vec<Submission>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiav: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe: Option<Value>,
    /// Processing status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    /// Whether the signed-in user liked this file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiFile {
    /// Returns `true` if the file format is PE, ignoring case.
    pub fn is_pe(&self) -> bool {
        self.file_format
            .as_deref()
            .is_some_and(|format| format.eq_ignore_ascii_case("pe"))
    }
}

/// One upload of a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Summary-only fields returned by `files/{hash}/summary`.
///
/// Decoded on its own, unknown keys go to `extra`. Inside a [`FileSummary`]
/// the summary fields are claimed first and every other key belongs to the
/// file record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_behavior_report: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A file record merged with its summary fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileSummary {
    #[serde(flatten)]
    pub file: ApiFile,
    #[serde(flatten)]
    pub summary: ApiSummary,
}

impl<'de> Deserialize<'de> for FileSummary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut record: Map<String, Value> = Map::deserialize(deserializer)?;
        let mut summary = Map::new();
        for key in SUMMARY_FIELDS {
            if let Some(value) = record.remove(*key) {
                summary.insert((*key).to_string(), value);
            }
        }

        Ok(Self {
            file: ApiFile::deserialize(Value::Object(record)).map_err(de::Error::custom)?,
            summary: ApiSummary::deserialize(Value::Object(summary))
                .map_err(de::Error::custom)?,
        })
    }
}

const SUMMARY_FIELDS: &[&str] = &[
    "properties",
    "default_behavior_report",
    "tags",
    "comments_count",
];

/// A single extracted string from `files/{hash}/strings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiStrings {
    pub encoding: String,
    pub value: String,
}
