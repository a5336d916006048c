//! Runtime hooks for conversation lifecycle events.
//!
//! ```rust
//! use cchat::{ChatRuntimeHooks, NoopChatHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn ChatRuntimeHooks) {}
//!
//! let hooks = NoopChatHooks;
//! assert_hooks_trait(&hooks);
//! ```

use ccommon::ConversationId;
use cprovider::Role;

pub trait ChatRuntimeHooks: Send + Sync {
    fn on_conversation_created(&self, _conversation_id: &ConversationId, _title: &str) {}

    fn on_conversation_switched(&self, _conversation_id: &ConversationId) {}

    fn on_message_appended(&self, _conversation_id: &ConversationId, _role: Role) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopChatHooks;

impl ChatRuntimeHooks for NoopChatHooks {}
