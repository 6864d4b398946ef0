use wlgen_schema::Description;

/// Marker that starts every generated documentation line.
pub const DOC_MARKER: &str = "///";

/// Turns free text into documentation lines, each starting with `marker`.
///
/// One blank line at either end of `text` is dropped (exactly one, which is
/// what a description body indented inside its XML element produces). Every
/// other line is left-trimmed; blank ones become a bare marker.
pub fn commentify(text: &str, marker: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let skip_first = lines.first().map_or(false, |l| l.trim_start().is_empty());
    let skip_last = lines.last().map_or(false, |l| l.trim_start().is_empty());

    let start = usize::from(skip_first);
    let end = lines.len() - usize::from(skip_last);

    let mut comment = String::new();
    for line in lines.get(start..end).unwrap_or_default() {
        comment.push_str(marker);
        let stripped = line.trim_start();
        if !stripped.is_empty() {
            comment.push(' ');
            comment.push_str(stripped);
        }
        comment.push('\n');
    }
    comment
}

/// Renders a description as a documentation block indented by `indent`
/// spaces: the summary line (after `summary_prefix`), then, if there is a
/// body, an empty doc line followed by the reflowed body.
pub fn doc_comment(description: &Description, summary_prefix: &str, indent: usize) -> String {
    let indent = " ".repeat(indent);
    let mut comment = format!("{}{} {}{}\n", indent, DOC_MARKER, summary_prefix, description.summary);
    if let Some(body) = description.body.as_deref().filter(|b| !b.is_empty()) {
        let marker = format!("{}{}", indent, DOC_MARKER);
        comment.push_str(&marker);
        comment.push('\n');
        comment.push_str(&commentify(body, &marker));
    }
    comment
}

/// Documentation for entities that carry both a `summary` attribute and an
/// optional `<description>` child: the description wins when present.
pub fn summary_or_description(
    summary: Option<&str>,
    description: Option<&Description>,
    indent: usize,
) -> String {
    match (description, summary) {
        (Some(description), _) => doc_comment(description, "", indent),
        (None, Some(summary)) => format!("{}{} {}\n", " ".repeat(indent), DOC_MARKER, summary),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commentify_strips_one_blank_line_each_end() {
        let text = "\n      The only content line.\n    ";
        assert_eq!(commentify(text, "///"), "/// The only content line.\n");
    }

    #[test]
    fn test_commentify_keeps_inner_blank_lines() {
        let text = "\n  first\n\n  second\n  ";
        assert_eq!(commentify(text, "///"), "/// first\n///\n/// second\n");
    }

    #[test]
    fn test_commentify_strips_only_one_line() {
        let text = "\n\n  body\n\n";
        assert_eq!(commentify(text, "///"), "///\n/// body\n///\n");
    }

    #[test]
    fn test_commentify_single_line() {
        assert_eq!(commentify("just text", "//"), "// just text\n");
        assert_eq!(commentify("   ", "///"), "");
        assert_eq!(commentify("", "///"), "");
    }

    #[test]
    fn test_doc_comment_summary_only() {
        let d = Description::new("the surface", None);
        assert_eq!(doc_comment(&d, "", 4), "    /// the surface\n");
    }

    #[test]
    fn test_doc_comment_with_body() {
        let d = Description::new("create surface", Some("\n    Ask the compositor\n    for a surface.\n  ".to_owned()));
        assert_eq!(
            doc_comment(&d, "", 0),
            "/// create surface\n///\n/// Ask the compositor\n/// for a surface.\n"
        );
        assert_eq!(
            doc_comment(&d, "", 2),
            "  /// create surface\n  ///\n  /// Ask the compositor\n  /// for a surface.\n"
        );
    }

    #[test]
    fn test_doc_comment_prefix() {
        let d = Description::new("core protocol", None);
        assert_eq!(doc_comment(&d, "@file\n/// ", 0), "/// @file\n/// core protocol\n");
    }

    #[test]
    fn test_summary_or_description() {
        assert_eq!(summary_or_description(None, None, 4), "");
        assert_eq!(summary_or_description(Some("x"), None, 4), "    /// x\n");
        let d = Description::new("from element", None);
        assert_eq!(summary_or_description(Some("x"), Some(&d), 0), "/// from element\n");
    }
}
