//! HTML release notes to Markdown.

use html2md::rewrite_html;

/// Placeholder used when a build ships without release notes.
pub const NO_RELEASE_NOTES: &str = "No release notes provided.";

/// A pure HTML to Markdown conversion.
///
/// Implemented by [`Html2Markdown`] and by any `Fn(&str) -> String`, so tests
/// (or a different converter) can stand in for the real one.
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, html: &str) -> String;
}

/// Converter backed by `fast_html2md`; headings come out ATX-style (`## Fixes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2Markdown;
impl MarkdownConverter for Html2Markdown {
    fn convert(&self, html: &str) -> String {
        rewrite_html(html, true)
    }
}

impl<F> MarkdownConverter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn convert(&self, html: &str) -> String {
        self(html)
    }
}

/// Convert vendor HTML release notes into tidy Markdown.
pub fn html_to_markdown(html: Option<&str>) -> String {
    convert_with(&Html2Markdown, html)
}

pub(crate) fn convert_with(converter: &dyn MarkdownConverter, html: Option<&str>) -> String {
    match html.map(str::trim) {
        Some(html) if !html.is_empty() => {
            let tidy = tidy(&converter.convert(html));
            if tidy.is_empty() { NO_RELEASE_NOTES.to_string() } else { tidy }
        },
        _ => NO_RELEASE_NOTES.to_string(),
    }
}

/// Strip trailing whitespace from every line, squash runs of blank lines down
/// to a single blank line, and trim the whole document.
pub fn tidy(markdown: &str) -> String {
    let mut result = markdown.trim().lines().map(str::trim_end).collect::<Vec<_>>().join("\n");
    while result.contains("\n\n\n") {
        result = result.replace("\n\n\n", "\n\n");
    }
    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   \n\t"))]
    fn test_no_release_notes(#[case] html: Option<&str>) {
        assert_eq!(html_to_markdown(html), NO_RELEASE_NOTES);
    }

    #[rstest]
    #[case("a\n\n\n\n\nb", "a\n\nb")]
    #[case("a\n\n\nb\n\n\n\nc", "a\n\nb\n\nc")]
    #[case("a\n\nb", "a\n\nb")]
    #[case("  \n\n# Title   \n\ntext\t\n\n  ", "# Title\n\ntext")]
    #[case("a  \n   \n  \n \nb", "a\n\nb")]
    #[case("line\r\nnext\r\n", "line\nnext")]
    fn test_tidy(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(tidy(input), expected);
    }

    #[test]
    fn test_custom_converter() {
        let shouty = |html: &str| format!("\n\n{}\n\n\n\n", html.to_uppercase());
        assert_eq!(convert_with(&shouty, Some("<p>fixed</p>")), "<P>FIXED</P>");
        let empty = |_: &str| String::from("   ");
        assert_eq!(convert_with(&empty, Some("<br>")), NO_RELEASE_NOTES);
    }

    #[test]
    fn test_html_conversion() {
        let markdown = html_to_markdown(Some("<h2>Fixes</h2><ul><li>Wi-Fi stability</li></ul>"));
        assert!(markdown.starts_with("## Fixes"), "{markdown}");
        assert!(markdown.contains("Wi-Fi stability"), "{markdown}");
        assert!(!markdown.contains('<'), "{markdown}");
        assert!(!markdown.contains("\n\n\n"), "{markdown}");
    }
}
