//! Queries over a rendered document.
//!
//! The REPL uses these to print what a reader of the page would see, and the
//! tests use them to assert on visibility without string matching.

use scraper::{ElementRef, Html, Selector};

use super::PanelKind;
use crate::constants::HIDDEN_CLASS;

/// A parsed page.
pub struct PageInspector {
    document: Html,
}

impl std::fmt::Debug for PageInspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageInspector").finish_non_exhaustive()
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// An element is visible when neither it nor any ancestor carries `hidden`.
fn visible(element: ElementRef<'_>) -> bool {
    let hidden_here = element.value().classes().any(|c| c == HIDDEN_CLASS);
    !hidden_here
        && element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .all(|ancestor| !ancestor.value().classes().any(|c| c == HIDDEN_CLASS))
}

fn collapse_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn numeric_suffix(id: &str, prefix: &str) -> Option<i64> {
    id.strip_prefix(prefix)?.parse().ok()
}

impl PageInspector {
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    fn first(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = selector(css)?;
        self.document.select(&selector).next()
    }

    fn by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.first(&format!("[id=\"{id}\"]"))
    }

    /// Whether an element with this id exists at all, visible or not.
    #[must_use]
    pub fn exists(&self, id: &str) -> bool {
        self.by_id(id).is_some()
    }

    /// Whether the element with this id is present and shown.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.by_id(id).is_some_and(visible)
    }

    /// Whitespace-collapsed text content of the element with this id.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<String> {
        self.by_id(id).map(collapse_text)
    }

    /// Value attribute of an input, or text of a textarea.
    #[must_use]
    pub fn value(&self, id: &str) -> Option<String> {
        let element = self.by_id(id)?;
        if element.value().name() == "textarea" {
            return Some(element.text().collect());
        }
        Some(element.value().attr("value").unwrap_or_default().to_string())
    }

    /// Post ids in document order.
    #[must_use]
    pub fn post_ids(&self) -> Vec<i64> {
        let Some(articles) = selector("section#posts > article") else {
            return Vec::new();
        };
        self.document
            .select(&articles)
            .filter_map(|a| a.value().id())
            .filter_map(|id| numeric_suffix(id, "post-"))
            .collect()
    }

    /// Comment ids under one post, in document order.
    #[must_use]
    pub fn comment_ids(&self, post_id: i64) -> Vec<i64> {
        let (Some(post), Some(comments)) = (
            self.by_id(&format!("post-{post_id}")),
            selector("div.comments"),
        ) else {
            return Vec::new();
        };
        post.select(&comments)
            .filter_map(|c| c.value().id())
            .filter_map(|id| numeric_suffix(id, "comment-"))
            .collect()
    }

    fn visible_within(&self, id: &str, css: &str) -> bool {
        let (Some(root), Some(inner)) = (self.by_id(id), selector(css)) else {
            return false;
        };
        root.select(&inner).next().is_some_and(visible)
    }

    #[must_use]
    pub fn post_has_delete_control(&self, post_id: i64) -> bool {
        self.visible_within(&format!("post-{post_id}"), ".delete-post")
    }

    #[must_use]
    pub fn comment_has_delete_control(&self, comment_id: i64) -> bool {
        self.visible_within(&format!("comment-{comment_id}"), ".delete-comment")
    }

    #[must_use]
    pub fn comments_section_visible(&self, post_id: i64) -> bool {
        self.visible_within(&format!("post-{post_id}"), ".comments-container")
    }

    #[must_use]
    pub fn comment_form_visible(&self, post_id: i64) -> bool {
        self.visible_within(&format!("post-{post_id}"), ".comment-form")
    }

    #[must_use]
    pub fn panel_visible(&self, panel: PanelKind) -> bool {
        self.is_visible(panel.element_id())
    }

    #[must_use]
    pub fn background_visible(&self) -> bool {
        self.first("div.background").is_some_and(visible)
    }

    #[must_use]
    pub fn sign_in_error_visible(&self) -> bool {
        self.visible_within(PanelKind::SignIn.element_id(), "p.error")
    }

    /// Plain-text outline of the visible page: nav actions, the open panel,
    /// then every post with its comments.
    #[must_use]
    pub fn outline(&self) -> String {
        let mut lines = Vec::new();

        let actions: Vec<String> = selector("nav a")
            .map(|s| {
                self.document
                    .select(&s)
                    .filter(|a| visible(*a))
                    .map(collapse_text)
                    .collect()
            })
            .unwrap_or_default();
        lines.push(format!("[{}]", actions.join(" | ")));

        for panel in [
            PanelKind::SignIn,
            PanelKind::SignUp,
            PanelKind::Compose,
            PanelKind::Profile,
        ] {
            if self.panel_visible(panel) {
                lines.push(format!("open panel: {}", panel.element_id()));
            }
        }
        if self.sign_in_error_visible() {
            lines.push("! Invalid Login".to_string());
        }

        for post_id in self.post_ids() {
            let post = format!("post-{post_id}");
            let title = self
                .first(&format!("#{post} h2.title"))
                .map(collapse_text)
                .unwrap_or_default();
            let author = self
                .first(&format!("#{post} span.author"))
                .map(collapse_text)
                .unwrap_or_default();
            let deletable = if self.post_has_delete_control(post_id) {
                " [delete]"
            } else {
                ""
            };
            lines.push(format!("#{post_id} {title} (by {author}){deletable}"));

            if let Some(body) = self.first(&format!("#{post} p.body")) {
                lines.push(format!("    {}", collapse_text(body)));
            }

            for comment_id in self.comment_ids(post_id) {
                let comment = format!("comment-{comment_id}");
                let text = self
                    .first(&format!("#{comment} p.body"))
                    .map(collapse_text)
                    .unwrap_or_default();
                let by = self
                    .first(&format!("#{comment} span.comment-author"))
                    .map(collapse_text)
                    .unwrap_or_default();
                let deletable = if self.comment_has_delete_control(comment_id) {
                    " [delete]"
                } else {
                    ""
                };
                lines.push(format!("    - #{comment_id} {by}: {text}{deletable}"));
            }
        }

        lines.join("\n")
    }
}
