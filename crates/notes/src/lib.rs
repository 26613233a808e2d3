//! Release content for a firmware build: tag, title and Markdown body.
//!
//! ```text
//! render_tag("4.8.2", RELEASE, 1766075084)   → "v4.8.2"
//! render_tag("4.8.4", SNAPSHOT, 1766075084)  → "v4.8.4-snapshot-1766075084"
//! render_title(SNAPSHOT, "4.8.4", …)         → "GL-MT6000 Snapshot 4.8.4 (2025-12-18 16:24:44 UTC)"
//! ```
//!
//! Production builds get clean tags; pre-release builds are disambiguated by
//! their compile time since the vendor reuses version numbers between them.

pub mod error;
mod markdown;
mod timestamp;

use crate::error::{ErrorKind, Result};
pub use crate::markdown::{Html2Markdown, MarkdownConverter, NO_RELEASE_NOTES, html_to_markdown, tidy};
pub use crate::timestamp::{UNKNOWN_TIMESTAMP, format_timestamp};
use exn::ResultExt;
use firmrel_catalog::models::{CompileTime, DownloadVariant, FirmwareEntry, Stage};
use tracing::instrument;
use upon::{Engine, Template};

const BODY_TEMPLATE: &str = r#"# {{ title }}

{{ notes }}

---

### Firmware Details

| Property | Value |
| :--- | :--- |
| **Model** | {{ model }} |
| **Version** | {{ version }} |
| **Channel** | {{ stage }} |
| **Compile Time** | {{ compile_time }} |
| **File Size** | {{ size }} MiB |
| **SHA256** | `{{ sha256 }}` |

### Verification

Verify the downloaded file integrity:

```bash
echo "{{ sha256 }}  {{ filename }}" | sha256sum -c -
```
"#;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Release tag for a build: `v{version}` for RELEASE builds, otherwise
/// `v{version}-{stage}-{compile_time}` with the stage lowercased.
pub fn render_tag(version: &str, stage: &Stage, compile_time: &CompileTime) -> String {
    if stage.is_release() {
        format!("v{version}")
    } else {
        format!("v{version}-{}-{}", stage.as_str().to_lowercase(), compile_time.as_str().trim())
    }
}

/// Renders release titles and bodies for one model.
pub struct ReleaseFormatter {
    model: String,
    product: String,
    converter: Box<dyn MarkdownConverter>,
    engine: Engine<'static>,
    template: Template<'static>,
}
impl ReleaseFormatter {
    /// `product` is the human-facing name used in titles (e.g. `GL-MT6000`).
    pub fn new(model: impl Into<String>, product: impl Into<String>) -> Result<Self> {
        let engine = Engine::new();
        // Compile early so a broken template fails at construction.
        let template = engine.compile(BODY_TEMPLATE).or_raise(|| ErrorKind::Template)?;
        Ok(Self {
            model: model.into(),
            product: product.into(),
            converter: Box::new(Html2Markdown),
            engine,
            template,
        })
    }

    /// Swap the HTML to Markdown converter.
    pub fn with_converter(mut self, converter: impl MarkdownConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn render_tag(&self, version: &str, stage: &Stage, compile_time: &CompileTime) -> String {
        render_tag(version, stage, compile_time)
    }

    /// `"<product> <Stage> <version>"`, with the formatted compile time appended
    /// in parentheses for anything that isn't a RELEASE build.
    pub fn render_title(&self, stage: &Stage, version: &str, compile_time: &CompileTime) -> String {
        let title = format!("{} {} {version}", self.product, stage.title_case());
        if stage.is_release() {
            title
        } else {
            format!("{title} ({})", format_timestamp(compile_time.clone()))
        }
    }

    /// Markdown release notes converted from the build's HTML notes.
    pub fn release_notes(&self, html: Option<&str>) -> String {
        markdown::convert_with(self.converter.as_ref(), html)
    }

    /// The full release body: title, notes, a metadata table and a checksum
    /// verification snippet for the attached file.
    #[instrument(skip_all, fields(version = %entry.version, stage = %entry.stage))]
    pub fn render_body(&self, entry: &FirmwareEntry, variant: &DownloadVariant) -> Result<String> {
        let size = format!("{:.2}", variant.size as f64 / BYTES_PER_MIB);
        let parameters = upon::value! {
            title: self.render_title(&entry.stage, &entry.version, &variant.compile_time),
            notes: self.release_notes(entry.release_note.as_deref()),
            model: self.model.as_str(),
            version: entry.version.as_str(),
            stage: entry.stage.as_str(),
            compile_time: format_timestamp(variant.compile_time.clone()),
            size: size,
            sha256: variant.sha256.as_str(),
            filename: variant.name.as_str(),
        };
        self.template.render(&self.engine, parameters).to_string().or_raise(|| ErrorKind::Template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firmrel_catalog::models::Checksum;
    use rstest::rstest;

    fn formatter() -> ReleaseFormatter {
        ReleaseFormatter::new("mt6000", "GL-MT6000")
            .unwrap()
            .with_converter(|html: &str| html.replace("<p>", "").replace("</p>", "\n\n\n\n\n"))
    }

    fn build(stage: &str, release_note: Option<&str>) -> (FirmwareEntry, DownloadVariant) {
        let variant = DownloadVariant {
            name: "openwrt-mt6000-4.8.4.bin".to_string(),
            link: "https://fw.example.com/openwrt-mt6000-4.8.4.bin".to_string(),
            sha256: Checksum::new("ABCDEF"),
            size: 3 * 1024 * 1024 / 2,
            compile_time: CompileTime::from(1766075084),
        };
        let entry = FirmwareEntry {
            version: "4.8.4".to_string(),
            stage: Stage::from(stage),
            release_note: release_note.map(str::to_string),
            download: vec![variant.clone()],
        };
        (entry, variant)
    }

    #[rstest]
    #[case("4.8.2", "RELEASE", CompileTime::from(1766075084), "v4.8.2")]
    #[case("4.8.2", "release", CompileTime::from("whenever"), "v4.8.2")]
    #[case("4.8.4", "snapshot", CompileTime::from(1766075084), "v4.8.4-snapshot-1766075084")]
    #[case("4.8.4", "SNAPSHOT", CompileTime::from("1766075084"), "v4.8.4-snapshot-1766075084")]
    #[case("4.8.3", "Testing", CompileTime::from(1766000000), "v4.8.3-testing-1766000000")]
    fn test_render_tag(
        #[case] version: &str,
        #[case] stage: &str,
        #[case] compile_time: CompileTime,
        #[case] expected: &str,
    ) {
        assert_eq!(render_tag(version, &Stage::from(stage), &compile_time), expected);
    }

    #[rstest]
    #[case("RELEASE", CompileTime::from(1766075084), "GL-MT6000 Release 4.8.2")]
    #[case("testing", CompileTime::from(1766075084), "GL-MT6000 Testing 4.8.2 (2025-12-18 16:24:44 UTC)")]
    #[case("SNAPSHOT", CompileTime::from("garbage"), "GL-MT6000 Snapshot 4.8.2 (Unknown)")]
    fn test_render_title(#[case] stage: &str, #[case] compile_time: CompileTime, #[case] expected: &str) {
        assert_eq!(formatter().render_title(&Stage::from(stage), "4.8.2", &compile_time), expected);
    }

    #[test]
    fn test_render_body() {
        let (entry, variant) = build("snapshot", Some("<p>Fixed Wi-Fi</p><p>Faster boot</p>"));
        let body = formatter().render_body(&entry, &variant).unwrap();
        let expected = r#"# GL-MT6000 Snapshot 4.8.4 (2025-12-18 16:24:44 UTC)

Fixed Wi-Fi

Faster boot

---

### Firmware Details

| Property | Value |
| :--- | :--- |
| **Model** | mt6000 |
| **Version** | 4.8.4 |
| **Channel** | SNAPSHOT |
| **Compile Time** | 2025-12-18 16:24:44 UTC |
| **File Size** | 1.50 MiB |
| **SHA256** | `abcdef` |

### Verification

Verify the downloaded file integrity:

```bash
echo "abcdef  openwrt-mt6000-4.8.4.bin" | sha256sum -c -
```
"#;
        assert_eq!(body, expected);
    }

    #[test]
    fn test_render_body_without_notes() {
        let (entry, variant) = build("RELEASE", None);
        let body = formatter().render_body(&entry, &variant).unwrap();
        assert!(body.starts_with("# GL-MT6000 Release 4.8.4\n\nNo release notes provided.\n\n---\n"));
        assert!(body.contains("| **Channel** | RELEASE |"));
    }

    #[test]
    fn test_render_body_with_html2md() {
        let (entry, variant) = build("RELEASE", Some("<h3>Changes</h3><p>Stable.</p>"));
        let formatter = ReleaseFormatter::new("mt6000", "GL-MT6000").unwrap();
        let body = formatter.render_body(&entry, &variant).unwrap();
        assert!(body.contains("### Changes"), "{body}");
        assert!(!body.contains("<h3>"), "{body}");
    }
}
