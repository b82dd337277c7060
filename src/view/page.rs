//! Full-document renderer.
//!
//! The whole page is rebuilt from the content tree and UI state on every render;
//! nothing from a previous render is reused.

use maud::{html, Markup, Render, DOCTYPE};

use super::{PanelKind, UiState};
use crate::components::{class_list, Control, InlineMessage, Input, Panel, TextArea};
use crate::content::{Comment, ContentTree, Post};
use crate::error::Operation;

/// Everything a render depends on.
#[derive(Debug, Clone, Copy)]
pub struct PageModel<'a> {
    /// Username of the authenticated viewer. `None` while anonymous, even if a
    /// stale username is still stored.
    pub viewer: Option<&'a str>,
    pub ui: &'a UiState,
    pub tree: &'a ContentTree,
}

impl PageModel<'_> {
    fn signed_in(&self) -> bool {
        self.viewer.is_some()
    }

    fn panel_hidden(&self, panel: PanelKind) -> bool {
        self.ui.open_panel != Some(panel)
    }
}

/// Whether `viewer` may see owner-only controls for content by `author`.
#[must_use]
pub fn is_owner(viewer: Option<&str>, author: &str) -> bool {
    viewer.is_some_and(|v| v == author)
}

/// Render the complete document.
#[must_use]
pub fn render_page(model: &PageModel<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Postboard" }
                link rel="stylesheet" href="style.css";
            }
            body {
                (render_nav(model))
                (render_panels(model))
                section id="posts" {
                    @for post in &model.tree.posts {
                        (PostArticle::new(post, model.viewer))
                    }
                }
            }
        }
    }
}

fn render_nav(model: &PageModel<'_>) -> Markup {
    let signed_in = model.signed_in();
    let greeting = model
        .viewer
        .map_or_else(|| "Profile".to_string(), |name| format!("Hello, {name}."));

    html! {
        nav {
            (Control::action("Sign In").id("sign-in-button").hidden(signed_in))
            (Control::action("Sign Up").id("sign-up-button").hidden(signed_in))
            (Control::action("New Post").id("post-button").hidden(!signed_in))
            (Control::action(&greeting).id("profile-button").hidden(!signed_in))
            (Control::action("Sign Out").id("sign-out-button").hidden(!signed_in))
        }
    }
}

fn render_panels(model: &PageModel<'_>) -> Markup {
    let ui = model.ui;
    let profile = ui.profile.clone().unwrap_or_default();

    let sign_in = html! {
        (Input::email("signinEmail").placeholder("Email"))
        (Input::password("signinPassword").placeholder("Password"))
        (InlineMessage::error(Operation::Login.failure_message()).hidden(!ui.sign_in_error))
        (Control::button("Sign In"))
    };

    let sign_up = html! {
        (Input::text("inputUsername").placeholder("Username"))
        (Input::email("inputEmail").placeholder("Email"))
        (Input::password("inputPassword").placeholder("Password"))
        (Control::button("Sign Up"))
    };

    let compose = html! {
        (Input::text("title").id("post-title").value(&ui.compose.title).placeholder("Title"))
        (TextArea::new("content").id("post-content").value(&ui.compose.description))
        (Control::button("Post"))
    };

    let profile_form = html! {
        p { "Username: " span id="profile-username" { (profile.username) } }
        (Input::email("additionalEmail")
            .id("profile-additional-email")
            .value(&profile.additional_email))
        (Input::text("address").id("profile-address").value(&profile.address))
        (Input::text("mobile").id("profile-mobile").value(&profile.mobile))
        (Control::button("Save"))
    };

    html! {
        div class=(class_list("background", ui.open_panel.is_none())) {
            (Panel::new(PanelKind::SignIn.element_id(), "Sign In", sign_in)
                .hidden(model.panel_hidden(PanelKind::SignIn)))
            (Panel::new(PanelKind::SignUp.element_id(), "Sign Up", sign_up)
                .hidden(model.panel_hidden(PanelKind::SignUp)))
            (Panel::new(PanelKind::Compose.element_id(), "New Post", compose)
                .hidden(model.panel_hidden(PanelKind::Compose)))
            (Panel::new(PanelKind::Profile.element_id(), "Profile", profile_form)
                .hidden(model.panel_hidden(PanelKind::Profile)))
        }
    }
}

/// One post with its comment form and comments.
struct PostArticle<'a> {
    post: &'a Post,
    viewer: Option<&'a str>,
}

impl<'a> PostArticle<'a> {
    const fn new(post: &'a Post, viewer: Option<&'a str>) -> Self {
        Self { post, viewer }
    }
}

impl Render for PostArticle<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let owner = is_owner(self.viewer, &post.author.username);

        html! {
            article id=(format!("post-{}", post.id)) data-author=(post.author.username) {
                h2 class="title" { (post.title) }
                p class="body" { (post.description) }
                div class="author-container" {
                    span class="author" { (post.author.username) }
                    (Control::delete("Delete").class("delete-post").hidden(!owner))
                }
                div class=(class_list("comment-form", self.viewer.is_none())) {
                    (TextArea::new("comment").placeholder("Add a comment"))
                    (Control::button("Comment").class("add-comment"))
                }
                div class=(class_list("comments-container", post.comments.is_empty())) {
                    @for comment in &post.comments {
                        (CommentEntry::new(comment, self.viewer))
                    }
                }
            }
        }
    }
}

struct CommentEntry<'a> {
    comment: &'a Comment,
    viewer: Option<&'a str>,
}

impl<'a> CommentEntry<'a> {
    const fn new(comment: &'a Comment, viewer: Option<&'a str>) -> Self {
        Self { comment, viewer }
    }
}

impl Render for CommentEntry<'_> {
    fn render(&self) -> Markup {
        let comment = self.comment;
        let owner = is_owner(self.viewer, &comment.author.username);

        html! {
            div id=(format!("comment-{}", comment.id))
                class="comments"
                data-author=(comment.author.username)
            {
                p class="body" { (comment.text) }
                div class="comment-meta" {
                    span class="comment-author" { (comment.author.username) }
                    (Control::delete("Delete")
                        .class("comment-delete delete-comment")
                        .hidden(!owner))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Author;
    use crate::session::Profile;

    fn author(name: &str) -> Author {
        Author {
            username: name.to_string(),
        }
    }

    fn sample_tree() -> ContentTree {
        ContentTree {
            posts: vec![
                Post {
                    id: 2,
                    title: "Second".to_string(),
                    description: "newer".to_string(),
                    author: author("alice"),
                    comments: vec![Comment {
                        id: 10,
                        text: "nice".to_string(),
                        author: author("bob"),
                    }],
                },
                Post {
                    id: 1,
                    title: "First".to_string(),
                    description: "older".to_string(),
                    author: author("bob"),
                    comments: Vec::new(),
                },
            ],
        }
    }

    fn render(viewer: Option<&str>, ui: &UiState, tree: &ContentTree) -> String {
        render_page(&PageModel { viewer, ui, tree }).into_string()
    }

    #[test]
    fn test_is_owner() {
        assert!(is_owner(Some("alice"), "alice"));
        assert!(!is_owner(Some("alice"), "bob"));
        assert!(!is_owner(None, "alice"));
        assert!(!is_owner(Some("Alice"), "alice"));
    }

    #[test]
    fn test_anonymous_nav() {
        let html = render(None, &UiState::default(), &ContentTree::default());
        assert!(html.contains(r##"<a href="#" class="action" id="sign-in-button">"##));
        assert!(html.contains(r#"class="action hidden" id="sign-out-button""#));
        assert!(html.contains(r#"class="action hidden" id="post-button""#));
        assert!(html.contains(r#"class="background hidden""#));
    }

    #[test]
    fn test_signed_in_greeting() {
        let html = render(Some("alice"), &UiState::default(), &ContentTree::default());
        assert!(html.contains(r#"id="profile-button">Hello, alice.</a>"#));
        assert!(html.contains(r#"class="action hidden" id="sign-in-button""#));
    }

    #[test]
    fn test_posts_keep_tree_order_and_ids() {
        let html = render(None, &UiState::default(), &sample_tree());
        let second = html.find(r#"id="post-2""#).unwrap();
        let first = html.find(r#"id="post-1""#).unwrap();
        assert!(second < first);
        assert!(html.contains(r#"id="comment-10""#));
        assert!(html.contains(r#"data-author="alice""#));
    }

    #[test]
    fn test_empty_comment_section_hidden() {
        let html = render(None, &UiState::default(), &sample_tree());
        assert_eq!(html.matches(r#"class="comments-container hidden""#).count(), 1);
        assert_eq!(html.matches(r#"class="comments-container""#).count(), 1);
    }

    #[test]
    fn test_content_is_escaped() {
        let mut tree = sample_tree();
        tree.posts[0].title = "<script>alert(1)</script>".to_string();
        let html = render(None, &UiState::default(), &tree);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_compose_and_profile_values() {
        let mut ui = UiState::default();
        ui.open(PanelKind::Compose);
        ui.compose.title = "Draft title".to_string();
        ui.profile = Some(Profile {
            username: "alice".to_string(),
            additional_email: "alt@example.com".to_string(),
            address: "1 Main St".to_string(),
            mobile: "555".to_string(),
        });
        let html = render(Some("alice"), &ui, &ContentTree::default());
        assert!(html.contains(r#"<form id="post" class="modal">"#));
        assert!(html.contains(r#"value="Draft title""#));
        assert!(html.contains(r#"<span id="profile-username">alice</span>"#));
        assert!(html.contains(r#"value="alt@example.com""#));
        assert!(html.contains(r#"<div class="background">"#));
    }
}
