//! # ui
//!
//! Server-side markup for a review page: the review, then its comment
//! section. Each top-level card
//! holds a `.reply-container` with its replies' cards; every control
//! carries a `data-action` tag for the section-level dispatcher.

use askama::Template;
use services::render::{CommentSectionView, ReviewView};

#[derive(Template)]
#[template(path = "comment_section.html")]
pub struct CommentSectionTemplate<'a> {
    pub section: &'a CommentSectionView,
}

pub fn render_comment_section(section: &CommentSectionView) -> askama::Result<String> {
    CommentSectionTemplate { section }.render()
}

/// The review box; edit/delete controls appear only when the viewer wrote it.
#[derive(Template)]
#[template(path = "review_page.html")]
pub struct ReviewPageTemplate<'a> {
    pub review: &'a ReviewView,
    pub section: &'a CommentSectionView,
}

pub fn render_review_page(review: &ReviewView, section: &CommentSectionView) -> askama::Result<String> {
    ReviewPageTemplate { review, section }.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{Comment, CommentId, Review, ReviewId};
    use services::{build_tree, RenderContext};

    fn comment(id: i64, parent: Option<i64>, author: &str, content: &str) -> Comment {
        Comment {
            id: CommentId(id),
            parent_id: parent.map(CommentId),
            author_nickname: Some(author.into()),
            content: content.into(),
            created_at: Some("2024-05-01T09:30:00".into()),
        }
    }

    fn render(comments: Vec<Comment>) -> String {
        let ctx = RenderContext::new(Some("writer".into()), Some("me".into()));
        let view = CommentSectionView::build(&build_tree(comments), &ctx);
        render_comment_section(&view).unwrap()
    }

    #[test]
    fn empty_section_shows_placeholder() {
        let html = render(Vec::new());
        assert!(html.contains("comment-empty"));
        assert!(!html.contains("comment-card"));
    }

    #[test]
    fn replies_render_inside_their_parent_card() {
        let html = render(vec![
            comment(1, None, "writer", "top"),
            comment(2, Some(1), "me", "nested"),
        ]);

        let parent = html.find(r#"data-comment-id="1""#).unwrap();
        let container = html.find("reply-container").unwrap();
        let reply = html.find(r#"data-comment-id="2""#).unwrap();
        assert!(parent < container && container < reply);
        assert!(html.contains("comment-reply"));
        assert!(html.contains("author-tag"));
    }

    #[test]
    fn controls_follow_card_actions() {
        let html = render(vec![
            comment(1, None, "other", "top"),
            comment(2, Some(1), "me", "mine"),
        ]);
        assert_eq!(html.matches(r#"data-action="reply""#).count(), 1);
        assert_eq!(html.matches(r#"data-action="edit""#).count(), 1);
        assert_eq!(html.matches(r#"data-action="delete""#).count(), 1);
    }

    #[test]
    fn content_is_escaped_and_newlines_become_breaks() {
        let html = render(vec![comment(1, None, "other", "<script>x</script>\nbye")]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("<br>bye"));
    }

    fn review() -> Review {
        Review {
            id: ReviewId(7),
            title: "Passed <finally>".into(),
            author_nickname: Some("writer".into()),
            comment: "week one\nweek two".into(),
            created_at: Some("2024-05-01T09:00:00".into()),
        }
    }

    fn render_page(viewer: &str) -> String {
        let ctx = RenderContext::new(Some("writer".into()), Some(viewer.into()));
        let review = ReviewView::from_review(&review(), &ctx);
        let section = CommentSectionView::build(&build_tree(vec![comment(1, None, "other", "hi")]), &ctx);
        render_review_page(&review, &section).unwrap()
    }

    #[test]
    fn review_page_shows_review_above_comments() {
        let html = render_page("someone");
        let review_box = html.find("review-box").unwrap();
        let comments = html.find("comment-section").unwrap();
        assert!(review_box < comments);
        assert!(html.contains(r#"data-review-id="7""#));
        assert!(html.contains("week one<br>week two"));
        assert!(!html.contains("<finally>"));
        assert!(!html.contains("review-actions"));
    }

    #[test]
    fn review_controls_render_for_the_author() {
        let html = render_page("writer");
        assert!(html.contains("review-actions"));
        assert!(html.contains(r#"data-action="delete-review""#));
    }
}
