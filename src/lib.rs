//! # Docsync
//!
//! Sync a component project's markdown documentation into a parent
//! documentation site. The component's docs tree is copied under the parent
//! site's `components/` directory, every relative link is rewritten so it
//! still resolves after the move, and a navigation fragment for the parent
//! manifest is emitted.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! Each run flows through three independent stages:
//!
//! ```text
//! 1. Resolve     docs/ (+ order.yml)   →  ordered document set
//! 2. Rewrite     each document         →  relocation-stable links
//! 3. Synthesize  processed set         →  navigation fragment
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Testability**: resolution is a pure read, rewriting is a pure text
//!   transformation, and synthesis is pure formatting — each is unit
//!   testable without the others.
//! - **Degradation boundaries**: data problems (a malformed manifest, an
//!   entry naming a missing file) are contained in the stage that found
//!   them and degrade to warnings instead of failing the copy.
//! - **One orchestrator**: the [`sync`] module owns all filesystem writes,
//!   so the destination contract (full replacement, no stale files) lives
//!   in exactly one place.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`manifest`] | Stage 1 — ordering manifest parsing, recursive discovery, display-name override |
//! | [`links`] | Stage 2 — rewrites relative markdown links to absolute site paths |
//! | [`nav`] | Stage 3 — navigation fragment synthesis and template substitution |
//! | [`sync`] | Pipeline orchestration: destination replacement, per-file rewrite, title resolution, license handling |
//! | [`naming`] | Display-name derivation: title-casing, separator expansion, heading extraction |
//! | [`output`] | CLI output formatting — information-first display of run reports |
//!
//! # Design Decisions
//!
//! ## Text-Pattern Link Matching
//!
//! Links are matched with a single constrained regular expression over the
//! raw text (`](path.md[#anchor])`), not by parsing markdown. A full parser
//! would also rewrite link syntax inside code fences and would need to
//! re-serialize the document, risking formatting churn in text that was
//! never touched. The constrained grammar keeps rewriting a pure,
//! reversible-by-inspection text transformation; the cost — a link-shaped
//! string inside a code fence would be rewritten too — has not mattered in
//! practice.
//!
//! ## Destructive Destination Replace
//!
//! The destination tree is deleted and rebuilt every run rather than
//! patched incrementally. A rename or deletion upstream therefore can never
//! leave a stale page behind, and running the tool twice over unchanged
//! input produces byte-identical output.
//!
//! ## Directory-Style URLs
//!
//! Rewritten links address pages as directories (`guide/`, not
//! `guide.md`), matching how the parent site serves rendered pages. The
//! navigation fragment, by contrast, refers to the markdown files
//! themselves — the site generator resolves those at render time.
//!
//! ## Ordered vs. Sorted Navigation
//!
//! A component that ships an `order.yml` has opted into curated ordering,
//! so navigation preserves it exactly. Without one, every markdown file is
//! discovered and navigation falls back to title order — predictable, if
//! not curated.

pub mod links;
pub mod manifest;
pub mod naming;
pub mod nav;
pub mod output;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_helpers;
