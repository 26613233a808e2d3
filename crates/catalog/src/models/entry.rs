use crate::models::{Checksum, CompileTime, Stage};
use serde::{Deserialize, Deserializer};

/// A single firmware build offered for a model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FirmwareEntry {
    pub version: String,
    pub stage: Stage,
    /// HTML release notes, when the vendor provides any.
    #[serde(default)]
    pub release_note: Option<String>,
    /// Downloadable images for this build; only the first is ever published.
    #[serde(default)]
    pub download: Vec<DownloadVariant>,
}
impl FirmwareEntry {
    /// The variant that gets downloaded and attached to the release.
    pub fn primary(&self) -> Option<&DownloadVariant> {
        self.download.first()
    }

    /// Ordering key for chronological processing.
    pub fn compile_time(&self) -> Option<i64> {
        self.primary().and_then(|variant| variant.compile_time.unix())
    }
}

/// A downloadable firmware image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadVariant {
    /// Filename of the image, also used for the local download.
    pub name: String,
    pub link: String,
    pub sha256: Checksum,
    #[serde(deserialize_with = "u64_or_numeric_string")]
    pub size: u64,
    pub compile_time: CompileTime,
}

fn u64_or_numeric_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = r#"{
        "version": "4.8.2",
        "stage": "release",
        "release_note": "<p>Fixes</p>",
        "download": [
            {
                "name": "mt6000-4.8.2.bin",
                "link": "https://fw.example.com/mt6000-4.8.2.bin",
                "sha256": "ABC123",
                "size": "1048576",
                "compile_time": 1766075084
            },
            {
                "name": "mt6000-4.8.2.img",
                "link": "https://fw.example.com/mt6000-4.8.2.img",
                "sha256": "def456",
                "size": 2097152,
                "compile_time": "1766075084"
            }
        ]
    }"#;

    #[test]
    fn test_deserialize_entry() {
        let entry: FirmwareEntry = serde_json::from_str(ENTRY).unwrap();
        assert_eq!(entry.version, "4.8.2");
        assert_eq!(entry.stage, Stage::Release);
        assert_eq!(entry.release_note.as_deref(), Some("<p>Fixes</p>"));
        let primary = entry.primary().unwrap();
        assert_eq!(primary.name, "mt6000-4.8.2.bin");
        assert_eq!(primary.sha256.as_str(), "abc123");
        assert_eq!(primary.size, 1048576);
        assert_eq!(entry.compile_time(), Some(1766075084));
        assert_eq!(entry.download[1].size, 2097152);
    }

    #[test]
    fn test_optional_fields() {
        let entry: FirmwareEntry =
            serde_json::from_str(r#"{"version": "4.7.0", "stage": "SNAPSHOT", "release_note": null}"#).unwrap();
        assert_eq!(entry.release_note, None);
        assert!(entry.primary().is_none());
        assert_eq!(entry.compile_time(), None);
    }

    #[test]
    fn test_non_numeric_size() {
        let json = r#"{"name": "a", "link": "b", "sha256": "c", "size": "big", "compile_time": 1}"#;
        assert!(serde_json::from_str::<DownloadVariant>(json).is_err());
    }
}
