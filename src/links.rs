//! Markdown link rewriting.
//!
//! Stage 2 of the sync pipeline. Rewrites every internal markdown link in a
//! document so it still resolves after the document moves under the parent
//! site's `components/` tree.
//!
//! ## What Gets Rewritten
//!
//! Only links of the form `](path.md)` or `](path.md#anchor)` where the
//! path is relative — not an external URL, not already absolute. Everything
//! else passes through byte-for-byte:
//!
//! ```text
//! ](guide.md)               → ](/components/kerbside/guide/)
//! ](./guide.md)             → ](/components/kerbside/guide/)
//! ](../index.md#setup)      → ](/components/kerbside/index/#setup)   (from a subdirectory)
//! ](https://a.com/x.md)     → unchanged
//! ](/already/absolute.md)   → unchanged
//! ](diagram.png)            → unchanged
//! ```
//!
//! ## Relative Resolution
//!
//! A link resolves against the directory containing its document, not the
//! source root — a document two levels deep may reach a root sibling via
//! `../../`. Resolution is a textual segment-stack normalization: `.` is
//! dropped, `..` pops the last resolved segment when one exists and is kept
//! verbatim otherwise. The filesystem is never consulted; a target that
//! does not exist still produces a best-effort rewrite, since link
//! correctness is advisory and must not fail the copy.
//!
//! ## Directory-Style URLs
//!
//! The destination site addresses every page as a directory, so the
//! trailing `.md` becomes a trailing `/`.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `](path.md)` or `](path.md#anchor)` — path and anchor captured
/// separately. Exclusions (external URLs, absolute paths) cannot be
/// expressed here because the regex engine has no lookahead; they are
/// filtered in the replacement closure instead.
static MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(([^)#]+\.md)(#[^)]*)?\)").unwrap());

/// Rewrite every internal markdown link in `content` to its absolute
/// location under `/components/<component_name>/`.
///
/// `doc_rel_path` is the document's forward-slash path relative to the
/// source root (e.g. `qcow2/qcow2-format.md`); its directory part anchors
/// the resolution of relative targets. Pure text transformation — never
/// fails, never touches the filesystem.
pub fn rewrite_links(content: &str, component_name: &str, doc_rel_path: &str) -> String {
    let doc_dir = doc_rel_path.rsplit_once('/').map(|(dir, _)| dir);
    MD_LINK
        .replace_all(content, |caps: &Captures| {
            let target = &caps[1];
            if target.starts_with("http://")
                || target.starts_with("https://")
                || target.starts_with('/')
            {
                return caps[0].to_string();
            }
            let anchor = caps.get(2).map_or("", |m| m.as_str());
            let resolved = resolve_target(target, doc_dir);
            let page = directory_url(&resolved);
            format!("](/components/{component_name}/{page}{anchor})")
        })
        .into_owned()
}

/// Resolve a relative link target against the document's directory.
///
/// Root-level documents (no containing subdirectory) only need a leading
/// `./` stripped. For nested documents the directory and target segments
/// are normalized against a stack: `.` is dropped, `..` pops the last
/// resolved segment if one exists — an unresolvable `..` stays in the
/// output verbatim rather than being guessed at.
fn resolve_target(target: &str, doc_dir: Option<&str>) -> String {
    let Some(dir) = doc_dir else {
        return target.strip_prefix("./").unwrap_or(target).to_string();
    };

    let mut stack: Vec<&str> = Vec::new();
    for segment in dir.split('/').chain(target.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.last().is_some_and(|s| *s != "..") {
                    stack.pop();
                } else {
                    stack.push("..");
                }
            }
            _ => stack.push(segment),
        }
    }
    stack.join("/")
}

/// Pages are addressed as directories in the destination site:
/// `guide.md` → `guide/`.
fn directory_url(path: &str) -> String {
    match path.strip_suffix(".md") {
        Some(stem) => format!("{stem}/"),
        None => path.to_string(),
    }
}
