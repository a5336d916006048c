//! Conversation and message records.
//!
//! ```rust
//! use cchat::{Conversation, Role};
//!
//! let mut conversation = Conversation::new("Release notes");
//! conversation.add_message(Role::User, "draft the changelog");
//! conversation.add_message(Role::Assistant, "here is a draft");
//!
//! assert_eq!(conversation.title(), "Release notes");
//! assert_eq!(conversation.messages().len(), 2);
//! ```

use ccommon::{ConversationId, MessageId};
use chrono::{DateTime, Utc};
use cprovider::Role;
use serde::Serialize;

pub const DEFAULT_CONVERSATION_TITLE: &str = "New Chat";

/// A single role-tagged turn. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    id: ConversationId,
    title: String,
    messages: Vec<Message>,
    created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ConversationId::new(),
            title: title.into(),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends one message to the end and returns a copy of it.
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) -> Message {
        let message = Message::new(role, content);
        self.messages.push(message.clone());
        message
    }

    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id,
            title: self.title.clone(),
            created_at: self.created_at,
            message_count: self.messages.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub message_count: usize,
}

/// Content waiting to become a [`Message`] inside a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub role: Role,
    pub content: String,
}

impl MessageDraft {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Messages appended by one store call, and where they landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub conversation_id: ConversationId,
    /// Set when the store had to create the conversation first.
    pub created: bool,
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn new_conversation_is_empty_with_given_title() {
        let conversation = Conversation::new("Planning");

        assert_eq!(conversation.title(), "Planning");
        assert!(conversation.is_empty());
        assert!(conversation.last_message().is_none());
    }

    #[test]
    fn add_message_appends_exactly_one_and_keeps_prior_entries() {
        let mut conversation = Conversation::new("Append");
        let first = conversation.add_message(Role::User, "one");
        let before = conversation.messages().to_vec();

        let second = conversation.add_message(Role::Assistant, "two");

        assert_eq!(conversation.messages().len(), before.len() + 1);
        assert_eq!(&conversation.messages()[..before.len()], before.as_slice());
        assert_eq!(conversation.messages()[0], first);
        assert_eq!(conversation.last_message(), Some(&second));
        assert_eq!(second.role(), Role::Assistant);
        assert_eq!(second.content(), "two");
    }

    #[test]
    fn rename_changes_only_the_title() {
        let mut conversation = Conversation::new("Old");
        conversation.add_message(Role::User, "hello");
        let id = conversation.id();

        conversation.rename("New");

        assert_eq!(conversation.title(), "New");
        assert_eq!(conversation.id(), id);
        assert_eq!(conversation.messages().len(), 1);
    }

    #[test]
    fn identifiers_are_unique_across_ten_thousand_creations() {
        let mut conversation = Conversation::new("Many");
        let mut conversation_ids = HashSet::new();
        let mut message_ids = HashSet::new();

        for index in 0..10_000 {
            conversation_ids.insert(Conversation::new(format!("c{index}")).id());
            message_ids.insert(conversation.add_message(Role::User, "x").id());
        }

        assert_eq!(conversation_ids.len(), 10_000);
        assert_eq!(message_ids.len(), 10_000);
    }

    #[test]
    fn summary_reports_message_count() {
        let mut conversation = Conversation::new("Summary");
        conversation.add_message(Role::User, "a");
        conversation.add_message(Role::Assistant, "b");

        let summary = conversation.summary();
        assert_eq!(summary.id, conversation.id());
        assert_eq!(summary.title, "Summary");
        assert_eq!(summary.message_count, 2);
    }

    #[test]
    fn conversation_serializes_with_ui_field_names() {
        let mut conversation = Conversation::new("Wire");
        conversation.add_message(Role::User, "hi");

        let json = serde_json::to_value(&conversation).expect("conversation should serialize");
        assert_eq!(json["title"], "Wire");
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert!(json["messages"][0].get("timestamp").is_some());
    }
}
