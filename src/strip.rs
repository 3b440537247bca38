use regex::{NoExpand, Regex};

/// Options for stripping a layout wrapper component
#[derive(Debug, Clone)]
pub struct StripOptions {
    /// Name of the wrapper component to remove
    pub component: String,
    /// Element that replaces the wrapper tag pair
    pub tag: String,
    /// Optional className for the replacement opening tag
    pub class_name: Option<String>,
}

impl StripOptions {
    /// Create options with the default replacement element (`div`)
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            tag: "div".to_string(),
            class_name: None,
        }
    }

    /// Replacement text for the wrapper's opening tag
    pub fn opening_replacement(&self) -> String {
        match &self.class_name {
            Some(class) => format!("<{} className=\"{}\">\n", self.tag, class),
            None => format!("<{}>\n", self.tag),
        }
    }

    /// Replacement text for the wrapper's closing tag
    pub fn closing_replacement(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// Strip a wrapper component from whole-file text
///
/// Removes every import line that names the component and has a `from '…'`
/// clause, then, if an opening `<Component …>` tag is present, rewrites every
/// opening tag to the replacement element and every `</Component>` to the
/// matching closing tag. The tag pair is only rewritten when an opening tag
/// exists, so a stray closing tag is left alone.
///
/// # Arguments
/// * `content` - Full text of one file
/// * `options` - Component name and replacement element
///
/// # Returns
/// * `(String, bool)` - The new content and whether it differs from the input
pub fn strip_wrapper(content: &str, options: &StripOptions) -> (String, bool) {
    let name = regex::escape(&options.component);
    let mut result = content.to_string();

    if let Ok(import_line) = Regex::new(&format!(
        r#"(?m)^[^\S\n]*import[^\n]*\b{name}\b[^\n]*from[^\n]*['"][^'"\n]*['"];?[^\S\n]*\n?"#
    )) {
        result = import_line.replace_all(&result, "").into_owned();
    }

    if let Ok(opening) = Regex::new(&format!(r"<{name}\b[^>]*>\s*")) {
        if opening.is_match(&result) {
            let open_replacement = options.opening_replacement();
            result = opening
                .replace_all(&result, NoExpand(open_replacement.as_str()))
                .into_owned();

            if let Ok(closing) = Regex::new(&format!(r"</{name}>")) {
                let close_replacement = options.closing_replacement();
                result = closing
                    .replace_all(&result, NoExpand(close_replacement.as_str()))
                    .into_owned();
            }
        }
    }

    let changed = result != content;
    (result, changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "\
import React from 'react';
import DashboardLayout from '../components/DashboardLayout';

export default function Analytics() {
  return (
    <DashboardLayout title=\"Analytics\">
      <h1>Analytics</h1>
    </DashboardLayout>
  );
}
";

    #[test]
    fn test_strip_removes_import_and_rewrites_tags() {
        let mut options = StripOptions::new("DashboardLayout");
        options.class_name = Some("p-6".to_string());

        let (result, changed) = strip_wrapper(PAGE, &options);

        assert!(changed);
        assert!(!result.contains("DashboardLayout"));
        assert!(result.contains("<div className=\"p-6\">"));
        assert!(result.contains("</div>"));
        assert!(result.contains("import React from 'react';"));
    }

    #[test]
    fn test_strip_without_class_name() {
        let (result, changed) = strip_wrapper(
            "<DashboardLayout>\n  <p>x</p>\n</DashboardLayout>\n",
            &StripOptions::new("DashboardLayout"),
        );

        assert!(changed);
        assert!(result.contains("<div>"));
        assert!(result.contains("</div>"));
    }

    #[test]
    fn test_strip_is_idempotent() {
        let mut options = StripOptions::new("DashboardLayout");
        options.class_name = Some("p-6".to_string());

        let (once, _) = strip_wrapper(PAGE, &options);
        let (twice, changed) = strip_wrapper(&once, &options);

        assert_eq!(twice, once);
        assert!(!changed);
    }

    #[test]
    fn test_strip_no_wrapper_is_noop() {
        let content = "import React from 'react';\nexport default () => <p>hi</p>;\n";
        let (result, changed) = strip_wrapper(content, &StripOptions::new("DashboardLayout"));

        assert_eq!(result, content);
        assert!(!changed);
    }

    #[test]
    fn test_strip_does_not_match_name_prefix() {
        let content = "import DashboardLayoutExtra from 'x';\n<DashboardLayoutExtra>\n</DashboardLayoutExtra>\n";
        let (result, changed) = strip_wrapper(content, &StripOptions::new("DashboardLayout"));

        assert_eq!(result, content);
        assert!(!changed);
    }

    #[test]
    fn test_stray_closing_tag_left_alone() {
        let content = "</DashboardLayout>\n";
        let (result, changed) = strip_wrapper(content, &StripOptions::new("DashboardLayout"));

        assert_eq!(result, content);
        assert!(!changed);
    }

    #[test]
    fn test_opening_tag_props_are_dropped() {
        let content = "<DashboardLayout title=\"Home\" wide>\n  <p>x</p>\n</DashboardLayout>\n";
        let (result, changed) = strip_wrapper(content, &StripOptions::new("DashboardLayout"));

        assert!(changed);
        assert!(!result.contains("title="));
        assert!(result.starts_with("<div>\n"));
    }
}
