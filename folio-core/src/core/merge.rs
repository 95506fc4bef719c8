use log::debug;
use std::collections::HashSet;

use crate::core::database::Tombstones;
use crate::core::models::{Post, PostId};

/// Combines the demo set, the local overlay and the tombstones into the list
/// every view shows.
///
/// Overlay entries come first in stored order (newest first, since create and
/// fork-on-edit prepend), followed by the demo posts the overlay does not
/// shadow, in declaration order. Tombstoned ids never appear, whatever their
/// origin. There is no date sort.
pub fn compute_visible_posts(demo: &[Post], overlay: &[Post], tombstones: &Tombstones) -> Vec<Post> {
    let mut seen: HashSet<PostId> = HashSet::new();
    let mut visible = Vec::with_capacity(overlay.len() + demo.len());

    for post in overlay {
        if tombstones.contains(post.id) || !seen.insert(post.id) {
            continue;
        }
        visible.push(post.clone());
    }

    let shadowed: HashSet<PostId> = overlay.iter().map(|post| post.id).collect();
    for post in demo {
        if shadowed.contains(&post.id) || tombstones.contains(post.id) || !seen.insert(post.id) {
            continue;
        }
        visible.push(post.clone());
    }

    debug!(
        "compute_visible_posts: {} overlay + {} demo - {} tombstones -> {} visible",
        overlay.len(),
        demo.len(),
        tombstones.len(),
        visible.len()
    );
    visible
}

/// The merged record for one id, as the detail and edit views look it up.
pub fn find_visible_post(demo: &[Post], overlay: &[Post], tombstones: &Tombstones, id: PostId) -> Option<Post> {
    compute_visible_posts(demo, overlay, tombstones)
        .into_iter()
        .find(|post| post.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Author;
    use chrono::NaiveDate;

    fn post(id: i64, title: &str) -> Post {
        Post {
            id: PostId::new(id),
            title: title.to_string(),
            category: "DevOps".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
            excerpt: String::new(),
            content: String::new(),
            tags: Vec::new(),
            author: Author::default(),
            hero_image: None,
            code_url: None,
            live_url: None,
            is_local: false,
        }
    }

    fn local(id: i64, title: &str) -> Post {
        Post {
            is_local: true,
            ..post(id, title)
        }
    }

    fn ids(posts: &[Post]) -> Vec<i64> {
        posts.iter().map(|post| post.id.get()).collect()
    }

    #[test]
    fn overlay_first_then_demo_in_declaration_order() {
        let demo = vec![post(1, "a"), post(2, "b"), post(3, "c")];
        let overlay = vec![local(900, "newest"), local(800, "older")];
        let visible = compute_visible_posts(&demo, &overlay, &Tombstones::new());
        assert_eq!(ids(&visible), vec![900, 800, 1, 2, 3]);
    }

    #[test]
    fn overlay_entry_shadows_demo_post_with_same_id() {
        let demo = vec![post(1, "A"), post(2, "b")];
        let overlay = vec![local(1, "B")];
        let visible = compute_visible_posts(&demo, &overlay, &Tombstones::new());

        let with_id_1: Vec<&Post> = visible.iter().filter(|p| p.id == PostId::new(1)).collect();
        assert_eq!(with_id_1.len(), 1);
        assert_eq!(with_id_1[0].title, "B");
        assert_eq!(ids(&visible), vec![1, 2]);
    }

    #[test]
    fn tombstones_hide_posts_of_either_origin() {
        let demo = vec![post(1, "a"), post(2, "b")];
        let overlay = vec![local(900, "x"), local(2, "edited b")];
        let tombstones: Tombstones = [900i64, 2].into_iter().collect();
        let visible = compute_visible_posts(&demo, &overlay, &tombstones);
        assert_eq!(ids(&visible), vec![1]);
    }

    #[test]
    fn no_duplicates_and_no_tombstoned_ids_across_mixed_inputs() {
        let demo: Vec<Post> = (1..=6).map(|id| post(id, "demo")).collect();
        for mask in 0u32..64 {
            let overlay: Vec<Post> = (1..=8)
                .filter(|id| mask & (1 << (id % 6)) != 0)
                .map(|id| local(id, "local"))
                .collect();
            let tombstones: Tombstones = (1..=8i64).filter(|id| (mask >> 1) & (1 << (id % 5)) != 0).collect();

            let visible = compute_visible_posts(&demo, &overlay, &tombstones);
            let unique: HashSet<PostId> = visible.iter().map(|p| p.id).collect();
            assert_eq!(unique.len(), visible.len(), "duplicate id for mask {mask}");
            assert!(visible.iter().all(|p| !tombstones.contains(p.id)));
        }
    }

    #[test]
    fn duplicated_overlay_id_keeps_first_entry() {
        let overlay = vec![local(5, "first"), local(5, "second")];
        let visible = compute_visible_posts(&[], &overlay, &Tombstones::new());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "first");
    }

    #[test]
    fn merge_is_deterministic() {
        let demo = vec![post(1, "a"), post(2, "b")];
        let overlay = vec![local(7, "x")];
        let tombstones: Tombstones = [2i64].into_iter().collect();
        assert_eq!(
            compute_visible_posts(&demo, &overlay, &tombstones),
            compute_visible_posts(&demo, &overlay, &tombstones)
        );
    }

    #[test]
    fn find_respects_tombstones() {
        let demo = vec![post(1, "a")];
        let tombstones: Tombstones = [1i64].into_iter().collect();
        assert!(find_visible_post(&demo, &[], &Tombstones::new(), PostId::new(1)).is_some());
        assert!(find_visible_post(&demo, &[], &tombstones, PostId::new(1)).is_none());
    }
}
