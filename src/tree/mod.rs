//! Static folder hierarchy and the breadcrumb-producing path resolver.
//!
//! The tree is fixed at construction; folders are addressed by slash-joined
//! id paths (`projects/design`). Nodes carry references into the file store
//! rather than file data, so listings always reflect current metadata.

use serde::Serialize;
use uuid::Uuid;

use crate::store::seed;

/// Reference to a stored file, with an optional static preview hint used
/// when the file itself cannot provide one.
#[derive(Debug, Clone)]
pub struct FileRef {
    pub file_id: Uuid,
    pub preview: Option<&'static str>,
}

#[derive(Debug)]
pub struct FolderNode {
    pub id: &'static str,
    pub label: &'static str,
    pub folders: Vec<FolderNode>,
    pub files: Vec<FileRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub id: String,
    pub label: String,
}

/// A resolved folder: the terminal node plus the trail from the root to it,
/// both ends inclusive.
#[derive(Debug)]
pub struct ResolvedNode<'a> {
    pub node: &'a FolderNode,
    pub breadcrumbs: Vec<Breadcrumb>,
}

pub struct FolderTree {
    root: FolderNode,
}

impl FolderTree {
    /// The fixed hierarchy presented by the storage browser.
    pub fn standard() -> Self {
        let root = folder(
            "root",
            "Главная",
            vec![
                folder(
                    "projects",
                    "Проекты",
                    vec![
                        folder(
                            "design",
                            "Дизайн",
                            vec![],
                            vec![file_with_preview("moodboard", "/window.svg"), file("ui-kit")],
                        ),
                        folder(
                            "marketing",
                            "Маркетинг",
                            vec![],
                            vec![file_with_preview("marketing-deck", "/globe.svg")],
                        ),
                    ],
                    vec![file("roadmap")],
                ),
                folder(
                    "documents",
                    "Документы",
                    vec![folder(
                        "contracts",
                        "Договоры",
                        vec![],
                        vec![file("contracts-a"), file("contracts-b")],
                    )],
                    vec![file("report-q1"), file("estimate")],
                ),
                folder(
                    "archive",
                    "Архив",
                    vec![],
                    vec![file("archive-notes"), file("archive-photo")],
                ),
                folder(
                    "media",
                    "Медиа",
                    vec![
                        folder("videos", "Видео", vec![], vec![file("promo-mov"), file("demo-mp4")]),
                        folder("photos", "Фото", vec![], vec![file("team-photo"), file("event-photo")]),
                    ],
                    vec![file("cover-psd")],
                ),
                folder(
                    "personal",
                    "Личное",
                    vec![folder(
                        "travels",
                        "Путешествия",
                        vec![],
                        vec![file("ticket"), file("hotel-doc")],
                    )],
                    vec![file("passport")],
                ),
            ],
            vec![file("welcome-note"), file("instructions")],
        );

        FolderTree { root }
    }

    /// Walk the tree by exact child-id match, segment by segment.
    ///
    /// Fails on the first unmatched segment with no partial result. The empty
    /// path resolves to the root.
    pub fn resolve(&self, segments: &[&str]) -> Option<ResolvedNode<'_>> {
        let mut current = &self.root;
        let mut breadcrumbs = vec![Breadcrumb {
            id: current.id.to_string(),
            label: current.label.to_string(),
        }];

        for segment in segments {
            let next = current.folders.iter().find(|child| child.id == *segment)?;
            current = next;
            breadcrumbs.push(Breadcrumb {
                id: current.id.to_string(),
                label: current.label.to_string(),
            });
        }

        Some(ResolvedNode { node: current, breadcrumbs })
    }
}

fn folder(
    id: &'static str,
    label: &'static str,
    folders: Vec<FolderNode>,
    files: Vec<FileRef>,
) -> FolderNode {
    FolderNode { id, label, folders, files }
}

fn file(alias: &str) -> FileRef {
    FileRef { file_id: seed_id(alias), preview: None }
}

fn file_with_preview(alias: &str, preview: &'static str) -> FileRef {
    FileRef { file_id: seed_id(alias), preview: Some(preview) }
}

fn seed_id(alias: &str) -> Uuid {
    // The tree and the seed table are fixed together; a dangling alias is a
    // programming error caught by the tests below.
    seed::id_for_alias(alias).unwrap_or_else(|| panic!("unknown seed alias: {alias}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_resolves_to_root() {
        let tree = FolderTree::standard();
        let resolved = tree.resolve(&[]).unwrap();
        assert_eq!(resolved.node.id, "root");
        assert_eq!(resolved.breadcrumbs.len(), 1);
        assert_eq!(resolved.breadcrumbs[0].id, "root");
        assert!(!resolved.node.folders.is_empty());
        assert!(!resolved.node.files.is_empty());
    }

    #[test]
    fn breadcrumbs_cover_the_full_trail() {
        let tree = FolderTree::standard();
        let resolved = tree.resolve(&["projects", "design"]).unwrap();
        assert_eq!(resolved.node.id, "design");
        let ids: Vec<_> = resolved.breadcrumbs.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["root", "projects", "design"]);
        let labels: Vec<_> = resolved.breadcrumbs.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Главная", "Проекты", "Дизайн"]);
    }

    #[test]
    fn breadcrumb_length_matches_depth() {
        let tree = FolderTree::standard();
        for path in [
            vec![],
            vec!["projects"],
            vec!["projects", "marketing"],
            vec!["media", "videos"],
            vec!["personal", "travels"],
        ] {
            let resolved = tree.resolve(&path).unwrap();
            assert_eq!(resolved.breadcrumbs.len(), path.len() + 1);
            assert_eq!(resolved.breadcrumbs.last().unwrap().id, resolved.node.id);
        }
    }

    #[test]
    fn unmatched_segment_fails_without_partial_result() {
        let tree = FolderTree::standard();
        assert!(tree.resolve(&["does", "not", "exist"]).is_none());
        assert!(tree.resolve(&["projects", "nope"]).is_none());
        // A valid child id does not resolve from the wrong depth.
        assert!(tree.resolve(&["design"]).is_none());
    }

    #[test]
    fn resolution_is_deterministic() {
        let tree = FolderTree::standard();
        let first = tree.resolve(&["documents", "contracts"]).unwrap();
        let second = tree.resolve(&["documents", "contracts"]).unwrap();
        assert_eq!(first.node.id, second.node.id);
        assert_eq!(first.breadcrumbs, second.breadcrumbs);
    }

    #[test]
    fn every_file_reference_points_at_a_seed() {
        // Walks the whole tree; seed_id panics on a dangling alias, and the
        // standard store must be able to resolve every referenced id.
        let tree = FolderTree::standard();
        let store = crate::store::FileStore::standard();
        let mut stack = vec![&tree.root];
        while let Some(node) = stack.pop() {
            for file in &node.files {
                assert!(store.get(file.file_id).is_some(), "dangling ref in {}", node.id);
            }
            stack.extend(node.folders.iter());
        }
    }
}
