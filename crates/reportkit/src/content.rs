//! Narrative blocks placed between charts.
use maud::{html, Markup, PreEscaped};
use serde::{Deserialize, Serialize};

/// A piece of prose in a report section. Content is trusted HTML and is
/// inserted without escaping.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentBlock {
    Text {
        content: String,
    },
    Finding {
        content: String,
    },
    Recommendation {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        priority: Option<String>,
    },
}

impl ContentBlock {
    pub fn text(content: &str) -> Self {
        ContentBlock::Text {
            content: content.to_string(),
        }
    }

    pub fn finding(content: &str) -> Self {
        ContentBlock::Finding {
            content: content.to_string(),
        }
    }

    pub fn recommendation(content: &str, priority: Option<&str>) -> Self {
        ContentBlock::Recommendation {
            content: content.to_string(),
            priority: priority.map(str::to_string),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Text { .. } => "text",
            ContentBlock::Finding { .. } => "finding",
            ContentBlock::Recommendation { .. } => "recommendation",
        }
    }

    pub fn render(&self) -> Markup {
        match self {
            ContentBlock::Text { content } => html! {
                div class="content-block content-text" { (PreEscaped(content)) }
            },
            ContentBlock::Finding { content } => html! {
                div class="content-block content-finding" {
                    span class="block-label" { "Finding" }
                    div class="block-body" { (PreEscaped(content)) }
                }
            },
            ContentBlock::Recommendation { content, priority } => {
                let level = priority.as_deref().map(priority_class);
                html! {
                    div class="content-block content-recommendation" {
                        span class="block-label" { "Recommendation" }
                        @if let (Some(p), Some(level)) = (priority, level) {
                            span class={ "priority-badge priority-" (level) } { (p) }
                        }
                        div class="block-body" { (PreEscaped(content)) }
                    }
                }
            }
        }
    }
}

fn priority_class(priority: &str) -> &'static str {
    match priority.trim().to_ascii_lowercase().as_str() {
        "high" | "critical" => "high",
        "medium" | "normal" => "medium",
        "low" => "low",
        _ => "other",
    }
}
