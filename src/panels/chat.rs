//! Chat Panel
//!
//! Sends the chat box content to the assistant and keeps the bubble log.

use std::cell::RefCell;

use crate::api::{BackendApi, ChatReply, ChatRequest};
use crate::view::{format_quantity, Author, ChatLog, ChatMessage, Document, Input, Node, Region};

/// Assistant bubble shown when the chat request fails
pub const CHAT_ERROR_TEXT: &str =
    "Não consegui falar com o assistente agora. Tente novamente em instantes.";

/// Bubble for one message
pub fn bubble_node(message: &ChatMessage) -> Node {
    Node::new("div")
        .class(format!("chat-bubble {}", message.author.as_str()))
        .text(message.text.as_str())
}

/// Reply text followed by its token usage
pub fn assistant_text(reply: &ChatReply) -> String {
    format!(
        "{}\n\nTokens usados: {}",
        reply.reply,
        format_quantity(reply.tokens_used)
    )
}

/// Owns the chat log for the lifetime of the page
#[derive(Debug, Default)]
pub struct ChatController {
    log: RefCell<ChatLog>,
}

impl ChatController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every message so far, oldest first
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.log.borrow().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Append a bubble and scroll it into view
    pub fn add_chat_message(&self, document: &dyn Document, author: Author, text: &str) {
        let message = ChatMessage::new(author, text);
        document.append_child(Region::ChatLog, bubble_node(&message));
        self.log.borrow_mut().push(message);
        document.scroll_to_bottom(Region::ChatLog);
    }

    /// Send the chat box content to the assistant
    ///
    /// Blank input is ignored. The user bubble is appended before the
    /// request starts; the reply or an error bubble follows when it settles.
    pub async fn send_message(&self, api: &dyn BackendApi, document: &dyn Document, user_id: u64) {
        let raw = document.read_input(Input::ChatMessage);
        let message = raw.trim();
        if message.is_empty() {
            return;
        }

        self.add_chat_message(document, Author::User, message);
        document.clear_input(Input::ChatMessage);

        let request = ChatRequest {
            user_id,
            message: message.to_string(),
        };

        match api.chat(&request).await {
            Ok(reply) => {
                tracing::debug!(tokens_used = reply.tokens_used, "Assistant replied");
                self.add_chat_message(document, Author::Assistant, &assistant_text(&reply));
            }
            Err(error) => {
                tracing::error!(%error, user_id, "Assistant chat failed");
                self.add_chat_message(document, Author::Assistant, CHAT_ERROR_TEXT);
            }
        }
    }
}
