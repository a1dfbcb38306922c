//! Wire types for the Messages API.

use serde::{Deserialize, Serialize};

pub const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";
pub const WEB_SEARCH_TOOL_NAME: &str = "web_search";

/// Request body for `POST /v1/messages`.
#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<Message<'a>>,
    /// Only sent when search augmentation is requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSpec>,
}

impl<'a> MessagesRequest<'a> {
    /// Single-turn request carrying `prompt` as the only user message.
    #[must_use]
    pub fn single_turn(model: &'a str, max_tokens: u32, prompt: &'a str, web_search: bool) -> Self {
        let tools = if web_search {
            vec![ToolSpec::web_search()]
        } else {
            Vec::new()
        };
        Self {
            model,
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            tools,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Server-side tool declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
}

impl ToolSpec {
    #[must_use]
    pub const fn web_search() -> Self {
        Self {
            kind: WEB_SEARCH_TOOL_TYPE,
            name: WEB_SEARCH_TOOL_NAME,
        }
    }
}

/// Response body for `POST /v1/messages`.
///
/// Only the content list is read; search results, tool-use blocks and usage
/// numbers are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Joins every `text` block, in order, with a newline.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
