//! Markdown Import and Export
//!
//! Turns an ATX-heading markdown document into an [`Outline`] and back.
//! Heading level drives nesting: each heading becomes a node appended as the
//! last child of the nearest shallower heading, non-heading lines accumulate
//! as the content of the nearest heading above them, and the very first H1
//! names the outline itself instead of becoming a node. A node's type is
//! inferred from keywords in its heading text.

use crate::models::{Node, NodeType, Outline};
use crate::utils::strip_markdown;
use chrono::Utc;
use std::collections::HashMap;

/// Name given to an outline whose source document has no leading H1
const DEFAULT_OUTLINE_NAME: &str = "Imported Outline";

/// Depth cap for export, matching the practical limit of `#` nesting plus
/// slack for pathological trees
const MAX_EXPORT_DEPTH: usize = 64;

/// Keyword table for type inference, first match wins. Checked against the
/// lowercased heading text.
const TYPE_RULES: &[(&[&str], NodeType)] = &[
    (&["code", "snippet", "script"], NodeType::Code),
    (&["quote"], NodeType::Quote),
    (&["image", "photo", "picture", "diagram"], NodeType::Image),
    (&["link", "url", "bookmark", "resource"], NodeType::Link),
    (&["spreadsheet", "budget", "table"], NodeType::Spreadsheet),
    (&["canvas", "sketch", "whiteboard"], NodeType::Canvas),
    (&["date", "schedule", "deadline", "agenda"], NodeType::Date),
];

/// Infer a node type from heading text
pub fn infer_node_type(name: &str) -> NodeType {
    let lowered = name.to_lowercase();
    for (keywords, node_type) in TYPE_RULES {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return *node_type;
        }
    }
    NodeType::Document
}

/// Parse one line as an ATX heading: 1-6 `#` followed by whitespace and
/// non-empty text.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    Some((level, text))
}

/// Build an outline from a markdown document.
///
/// Total for any input: unparseable lines are just content, a document with
/// no headings yields a root-only outline carrying all text as root content.
pub fn outline_from_markdown(markdown: &str) -> Outline {
    let mut outline = Outline::new(DEFAULT_OUTLINE_NAME.to_string());
    let root_id = outline.root_node_id.clone();

    // Heading stack: (level, node id), seeded with the root at level 0 so
    // it is never popped and always catches top-level headings.
    let mut stack: Vec<(usize, String)> = vec![(0, root_id.clone())];
    let mut content: HashMap<String, Vec<String>> = HashMap::new();
    let mut seen_heading = false;

    for line in markdown.lines() {
        let Some((level, text)) = parse_heading(line) else {
            // Content attaches to the nearest heading above, or the root
            if let Some((_, id)) = stack.last() {
                content.entry(id.clone()).or_default().push(line.to_string());
            }
            continue;
        };

        // The document's leading H1 names the outline instead of nesting
        if level == 1 && !seen_heading {
            seen_heading = true;
            let name = strip_markdown(text);
            outline.name = name.clone();
            if let Some(root) = outline.nodes.get_mut(&root_id) {
                root.name = name;
            }
            continue;
        }
        seen_heading = true;

        while stack.len() > 1 && stack.last().is_some_and(|(l, _)| *l >= level) {
            stack.pop();
        }
        let parent_id = match stack.last() {
            Some((_, id)) => id.clone(),
            None => root_id.clone(),
        };

        let name = strip_markdown(text);
        let node_type = infer_node_type(&name);
        let node = Node::new(node_type, name, String::new(), Some(parent_id.clone()));
        let node_id = node.id.clone();

        outline.nodes.insert(node_id.clone(), node);
        if let Some(parent) = outline.nodes.get_mut(&parent_id) {
            parent.children_ids.push(node_id.clone());
        }
        stack.push((level, node_id));
    }

    for (id, lines) in content {
        let text = lines.join("\n").trim().to_string();
        if text.is_empty() {
            continue;
        }
        if let Some(node) = outline.nodes.get_mut(&id) {
            node.content = text;
        }
    }

    outline.last_modified = Utc::now();
    tracing::debug!(
        outline = %outline.name,
        nodes = outline.nodes.len(),
        "imported markdown document"
    );
    outline
}

/// Render an outline back to an ATX-heading markdown document.
///
/// The root renders as the H1; each descendant renders as a heading one
/// level deeper than its parent, capped at `######`, followed by its content.
pub fn outline_to_markdown(outline: &Outline) -> String {
    let mut out = String::new();
    render_node(outline, &outline.root_node_id, 1, &mut out);
    out
}

fn render_node(outline: &Outline, node_id: &str, depth: usize, out: &mut String) {
    if depth > MAX_EXPORT_DEPTH {
        tracing::warn!(node_id, "export depth cap reached, subtree truncated");
        return;
    }
    let Some(node) = outline.node(node_id) else {
        return;
    };

    out.push_str(&"#".repeat(depth.min(6)));
    out.push(' ');
    out.push_str(&node.name);
    out.push('\n');
    if !node.content.is_empty() {
        out.push_str(&node.content);
        out.push('\n');
    }

    for child_id in &node.children_ids {
        render_node(outline, child_id, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::tree::verify_integrity;

    fn child_names(outline: &Outline, node_id: &str) -> Vec<String> {
        outline.node(node_id).map_or_else(Vec::new, |n| {
            n.children_ids
                .iter()
                .filter_map(|id| outline.node(id).map(|c| c.name.clone()))
                .collect()
        })
    }

    #[test]
    fn test_import_nests_by_heading_level() {
        let outline = outline_from_markdown("# Root\n## A\ntext1\n### A1\n## B\n");

        assert_eq!(outline.name, "Root");
        assert_eq!(
            child_names(&outline, &outline.root_node_id),
            vec!["A", "B"]
        );

        let root = outline.root().unwrap();
        let a_id = &root.children_ids[0];
        let a = outline.node(a_id).unwrap();
        assert_eq!(a.content, "text1");
        assert_eq!(child_names(&outline, a_id), vec!["A1"]);
        verify_integrity(&outline.nodes).unwrap();
    }

    #[test]
    fn test_first_h1_names_outline_later_h1_is_a_node() {
        let outline = outline_from_markdown("# Doc\n# Chapter One\n## Section\n");

        assert_eq!(outline.name, "Doc");
        assert_eq!(
            child_names(&outline, &outline.root_node_id),
            vec!["Chapter One"]
        );
        verify_integrity(&outline.nodes).unwrap();
    }

    #[test]
    fn test_no_heading_document_lands_on_root() {
        let outline = outline_from_markdown("just some text\nanother line\n");

        assert_eq!(outline.name, DEFAULT_OUTLINE_NAME);
        assert_eq!(outline.len(), 1);
        assert_eq!(
            outline.root().unwrap().content,
            "just some text\nanother line"
        );
    }

    #[test]
    fn test_content_before_first_heading_goes_to_root() {
        let outline = outline_from_markdown("preamble\n\n# Doc\n## A\n");
        assert_eq!(outline.root().unwrap().content, "preamble");
        assert_eq!(child_names(&outline, &outline.root_node_id), vec!["A"]);
    }

    #[test]
    fn test_level_skips_attach_to_nearest_shallower() {
        // H4 directly under H2: still a child of the H2 node
        let outline = outline_from_markdown("# Doc\n## A\n#### Deep\n## B\n");

        let root = outline.root().unwrap();
        let a_id = &root.children_ids[0];
        assert_eq!(child_names(&outline, a_id), vec!["Deep"]);
        assert_eq!(child_names(&outline, &outline.root_node_id), vec!["A", "B"]);
        verify_integrity(&outline.nodes).unwrap();
    }

    #[test]
    fn test_heading_requires_space_and_max_six_levels() {
        assert_eq!(parse_heading("#NoSpace"), None);
        assert_eq!(parse_heading("####### Seven"), None);
        assert_eq!(parse_heading("##  spaced  "), Some((2, "spaced")));
        assert_eq!(parse_heading("#"), None);
    }

    #[test]
    fn test_heading_markdown_stripped_from_name() {
        let outline = outline_from_markdown("# Doc\n## **Bold** [plan](p.md)\n");
        assert_eq!(
            child_names(&outline, &outline.root_node_id),
            vec!["Bold plan"]
        );
    }

    #[test]
    fn test_type_inference_from_heading_keywords() {
        assert_eq!(infer_node_type("Code Samples"), NodeType::Code);
        assert_eq!(infer_node_type("Favorite Quotes"), NodeType::Quote);
        assert_eq!(infer_node_type("Team Photos"), NodeType::Image);
        assert_eq!(infer_node_type("Useful Links"), NodeType::Link);
        assert_eq!(infer_node_type("Q3 Budget"), NodeType::Spreadsheet);
        assert_eq!(infer_node_type("Whiteboard Session"), NodeType::Canvas);
        assert_eq!(infer_node_type("Release Schedule"), NodeType::Date);
        assert_eq!(infer_node_type("Plain Notes"), NodeType::Document);
        // First match wins on overlapping keywords
        assert_eq!(infer_node_type("Script Schedule"), NodeType::Code);
    }

    #[test]
    fn test_export_renders_headings_and_content() {
        let outline = outline_from_markdown("# Doc\nintro\n## A\ntext1\n### A1\n## B\n");
        let markdown = outline_to_markdown(&outline);

        assert_eq!(
            markdown,
            "# Doc\nintro\n## A\ntext1\n### A1\n## B\n"
        );
    }

    #[test]
    fn test_export_caps_heading_depth_at_six() {
        use crate::models::NodeType;
        use crate::operations::tree::Placement;

        let mut outline =
            outline_from_markdown("# D\n## a\n### b\n#### c\n##### d\n###### e\n");
        // Deepen past six levels by hand
        let deepest = outline
            .nodes
            .values()
            .find(|n| n.name == "e")
            .map(|n| n.id.clone())
            .unwrap();
        let seven = outline
            .create_node(&deepest, Placement::FirstChild, NodeType::Document, "")
            .unwrap();
        let update = crate::models::NodeUpdate::new().with_name("f".to_string());
        outline.update_node(&seven, &update).unwrap();

        let markdown = outline_to_markdown(&outline);
        assert!(markdown.contains("###### e\n"));
        assert!(markdown.contains("###### f\n"));
        assert!(!markdown.contains("#######"));
    }
}
