use crate::post::Post;

/// Pick up to `limit` related posts. Relevance is binary: a candidate is
/// related when its tag set intersects the target's. Candidates must already
/// exclude the target and arrive most-recently-published first; that order is
/// preserved, so ties resolve to recency. When nothing overlaps, the most
/// recent candidates are returned as-is.
pub fn select_related(target_tags: &[String], candidates: Vec<Post>, limit: usize) -> Vec<Post> {
    let (overlapping, rest): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|candidate| candidate.tags.iter().any(|tag| target_tags.contains(tag)));

    let pool = if overlapping.is_empty() { rest } else { overlapping };

    pool.into_iter().take(limit).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn post(id: i32, tags: &[&str]) -> Post {
        Post {
            id,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn tags(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_overlap_beats_recency() {
        // Arrange: candidates ordered newest first, the shared-tag one last
        let candidates = vec![
            post(2, &["cooking"]),
            post(3, &[]),
            post(4, &["rust", "tooling"]),
        ];

        // Act
        let related = select_related(&tags(&["rust", "web"]), candidates, 3);

        // Assert
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, 4);
    }

    #[test]
    fn test_no_overlap_falls_back_to_most_recent() {
        let candidates = vec![
            post(2, &["cooking"]),
            post(3, &["travel"]),
            post(4, &["music"]),
            post(5, &["gardening"]),
        ];

        let related = select_related(&tags(&["rust"]), candidates, 3);

        assert_eq!(
            related.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
    }

    #[test]
    fn test_capped_at_limit() {
        let candidates = vec![
            post(2, &["rust"]),
            post(3, &["rust"]),
            post(4, &["rust"]),
            post(5, &["rust"]),
        ];

        let related = select_related(&tags(&["rust"]), candidates, 3);

        assert_eq!(
            related.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
    }

    #[test]
    fn test_untagged_target_falls_back() {
        let candidates = vec![post(2, &["rust"]), post(3, &[])];

        let related = select_related(&tags(&[]), candidates, 3);

        assert_eq!(related.len(), 2);
        assert_eq!(related[0].id, 2);
    }

    #[test]
    fn test_candidate_with_several_shared_tags_appears_once() {
        let candidates = vec![post(2, &["rust", "web", "tooling"])];

        let related = select_related(&tags(&["rust", "web"]), candidates, 3);

        assert_eq!(related.len(), 1);
    }
}
