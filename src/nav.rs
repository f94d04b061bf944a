//! Navigation fragment synthesis.
//!
//! Stage 3 of the sync pipeline. Turns the flat list of processed documents
//! into the indented navigation fragment the parent site's manifest expects:
//!
//! ```text
//!         - Kerbside:
//!             - "Introduction": components/kerbside/index.md
//!             - "Getting Started": components/kerbside/getting-started.md
//!             - Qcow2:
//!                 - "The Qcow2 Format": components/kerbside/qcow2/qcow2-format.md
//! ```
//!
//! ## Shape
//!
//! Root-level documents become leaves directly under the component header;
//! documents in a subdirectory are grouped under their first path segment.
//! Grouping is one level deep — `a/b/c.md` lands in group `a` with
//! `b/c.md` as its path.
//!
//! ## Ordering
//!
//! Manifest-driven runs preserve resolver order throughout, with groups in
//! first-appearance order. Discovery runs sort leaves and group members
//! case-insensitively by title and groups by key.
//!
//! The fragment is plain structured text; callers either print it or
//! substitute it into a template via [`substitute`].

use crate::naming;

/// A processed document ready for navigation: forward-slash path relative
/// to the source root plus its resolved title.
#[derive(Debug, Clone)]
pub struct NavDoc {
    pub rel_path: String,
    pub title: String,
}

/// Documents sharing a first path segment.
struct Group {
    key: String,
    members: Vec<NavDoc>,
}

/// Build the navigation fragment for a component.
///
/// `indent` is the base indentation in spaces; leaf lines sit 4 spaces
/// deeper and group members 8. `display_name_override` replaces the
/// title-cased component identifier in the header when supplied. `docs`
/// must not include index documents — the introduction line covers those.
pub fn synthesize(
    component_name: &str,
    docs: &[NavDoc],
    indent: usize,
    preserve_order: bool,
    display_name_override: Option<&str>,
) -> String {
    let display_name = display_name_override
        .map(str::to_string)
        .unwrap_or_else(|| naming::title_case(component_name));
    let base_path = format!("components/{component_name}");
    let pad = " ".repeat(indent);

    let mut lines = vec![
        format!("{pad}- {display_name}:"),
        format!("{pad}    - \"Introduction\": {base_path}/index.md"),
    ];

    let (mut root_docs, mut groups) = partition(docs);

    if !preserve_order {
        root_docs.sort_by_key(|doc| doc.title.to_lowercase());
        groups.sort_by(|a, b| a.key.cmp(&b.key));
        for group in &mut groups {
            group.members.sort_by_key(|doc| doc.title.to_lowercase());
        }
    }

    for doc in &root_docs {
        lines.push(format!(
            "{pad}    - \"{}\": {base_path}/{}",
            doc.title, doc.rel_path
        ));
    }

    for group in &groups {
        lines.push(format!("{pad}    - {}:", naming::display_title(&group.key)));
        for doc in &group.members {
            lines.push(format!(
                "{pad}        - \"{}\": {base_path}/{}",
                doc.title, doc.rel_path
            ));
        }
    }

    lines.join("\n")
}

/// Split documents into root-level leaves and one group per first path
/// segment, groups in first-appearance order.
fn partition(docs: &[NavDoc]) -> (Vec<NavDoc>, Vec<Group>) {
    let mut root = Vec::new();
    let mut groups: Vec<Group> = Vec::new();

    for doc in docs {
        match doc.rel_path.split_once('/') {
            None => root.push(doc.clone()),
            Some((first, _)) => match groups.iter_mut().find(|g| g.key == first) {
                Some(group) => group.members.push(doc.clone()),
                None => groups.push(Group {
                    key: first.to_string(),
                    members: vec![doc.clone()],
                }),
            },
        }
    }
    (root, groups)
}

/// Replace the `%%<component_name>%%` placeholder in a template with the
/// synthesized fragment. No-op when the placeholder is absent.
pub fn substitute(template: &str, component_name: &str, fragment: &str) -> String {
    template.replace(&format!("%%{component_name}%%"), fragment)
}
