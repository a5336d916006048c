//! Conversation storage contracts and a basic in-memory implementation.
//!
//! Every method takes the lock exactly once, so a single call is atomic with
//! respect to every other call. Nothing here blocks on I/O.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ccommon::ConversationId;
use cprovider::Role;

use crate::{ChatError, Conversation, ConversationSummary, Message, MessageDraft, Transcript};

pub trait ConversationStore: Send + Sync {
    /// Inserts a new conversation and makes it current.
    fn create_conversation(&self, title: &str) -> Conversation;

    fn current_conversation(&self) -> Option<Conversation>;

    fn conversation(&self, id: &ConversationId) -> Option<Conversation>;

    /// Makes an existing conversation current; unknown ids leave current untouched.
    fn switch_conversation(&self, id: &ConversationId) -> Option<Conversation>;

    /// Summaries in creation order.
    fn conversations(&self) -> Vec<ConversationSummary>;

    fn rename_conversation(&self, id: &ConversationId, title: &str) -> Result<(), ChatError>;

    fn append_message(
        &self,
        id: &ConversationId,
        role: Role,
        content: &str,
    ) -> Result<Message, ChatError>;

    /// Appends `drafts` in order to the current conversation, creating one titled
    /// `fallback_title` first when there is none.
    fn append_to_current(&self, drafts: Vec<MessageDraft>, fallback_title: &str) -> Transcript;
}

#[derive(Debug, Default)]
struct StoreState {
    conversations: HashMap<ConversationId, Conversation>,
    order: Vec<ConversationId>,
    current: Option<ConversationId>,
}

impl StoreState {
    fn insert(&mut self, conversation: Conversation) -> ConversationId {
        let id = conversation.id();
        self.conversations.insert(id, conversation);
        self.order.push(id);
        self.current = Some(id);
        id
    }
}

#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    state: RwLock<StoreState>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Writers never leave the map half-updated, so a poisoned guard is still usable.
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn create_conversation(&self, title: &str) -> Conversation {
        let conversation = Conversation::new(title);
        let snapshot = conversation.clone();
        self.write().insert(conversation);
        snapshot
    }

    fn current_conversation(&self) -> Option<Conversation> {
        let state = self.read();
        state
            .current
            .as_ref()
            .and_then(|id| state.conversations.get(id))
            .cloned()
    }

    fn conversation(&self, id: &ConversationId) -> Option<Conversation> {
        self.read().conversations.get(id).cloned()
    }

    fn switch_conversation(&self, id: &ConversationId) -> Option<Conversation> {
        let mut state = self.write();
        let conversation = state.conversations.get(id).cloned()?;
        state.current = Some(*id);
        Some(conversation)
    }

    fn conversations(&self) -> Vec<ConversationSummary> {
        let state = self.read();
        state
            .order
            .iter()
            .filter_map(|id| state.conversations.get(id))
            .map(Conversation::summary)
            .collect()
    }

    fn rename_conversation(&self, id: &ConversationId, title: &str) -> Result<(), ChatError> {
        let mut state = self.write();
        let conversation = state
            .conversations
            .get_mut(id)
            .ok_or_else(|| ChatError::conversation_not_found(id))?;

        conversation.rename(title);
        Ok(())
    }

    fn append_message(
        &self,
        id: &ConversationId,
        role: Role,
        content: &str,
    ) -> Result<Message, ChatError> {
        let mut state = self.write();
        let conversation = state
            .conversations
            .get_mut(id)
            .ok_or_else(|| ChatError::conversation_not_found(id))?;

        Ok(conversation.add_message(role, content))
    }

    fn append_to_current(&self, drafts: Vec<MessageDraft>, fallback_title: &str) -> Transcript {
        let mut state = self.write();
        let current = state
            .current
            .filter(|id| state.conversations.contains_key(id));
        let (conversation_id, created) = match current {
            Some(id) => (id, false),
            None => (state.insert(Conversation::new(fallback_title)), true),
        };

        let mut messages = Vec::with_capacity(drafts.len());
        if let Some(conversation) = state.conversations.get_mut(&conversation_id) {
            for draft in drafts {
                messages.push(conversation.add_message(draft.role, draft.content));
            }
        }

        Transcript {
            conversation_id,
            created,
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::{ChatErrorKind, DEFAULT_CONVERSATION_TITLE};

    #[test]
    fn current_is_absent_before_any_creation() {
        let store = InMemoryConversationStore::new();
        assert!(store.current_conversation().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn create_conversation_becomes_current_and_keeps_previous() {
        let store = InMemoryConversationStore::new();
        let first = store.create_conversation("First");
        let second = store.create_conversation("Second");

        let current = store.current_conversation().expect("current conversation");
        assert_eq!(current.id(), second.id());
        assert_eq!(current.title(), "Second");
        assert!(current.is_empty());

        let previous = store.conversation(&first.id()).expect("previous is retained");
        assert_eq!(previous.title(), "First");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn switch_conversation_ignores_unknown_ids() {
        let store = InMemoryConversationStore::new();
        let first = store.create_conversation("First");
        let second = store.create_conversation("Second");

        assert!(store.switch_conversation(&ConversationId::new()).is_none());
        assert_eq!(
            store.current_conversation().map(|c| c.id()),
            Some(second.id())
        );

        let switched = store
            .switch_conversation(&first.id())
            .expect("known id should switch");
        assert_eq!(switched.id(), first.id());
        assert_eq!(store.current_conversation().map(|c| c.id()), Some(first.id()));
    }

    #[test]
    fn conversations_are_listed_in_creation_order() {
        let store = InMemoryConversationStore::new();
        let titles = ["a", "b", "c"];
        for title in titles {
            store.create_conversation(title);
        }

        let listed = store
            .conversations()
            .into_iter()
            .map(|summary| summary.title)
            .collect::<Vec<_>>();
        assert_eq!(listed, titles);
    }

    #[test]
    fn append_and_rename_fail_for_unknown_conversation() {
        let store = InMemoryConversationStore::new();
        let missing = ConversationId::new();

        let append = store
            .append_message(&missing, Role::User, "hi")
            .expect_err("unknown id should fail");
        let rename = store
            .rename_conversation(&missing, "x")
            .expect_err("unknown id should fail");

        assert_eq!(append.kind, ChatErrorKind::NotFound);
        assert_eq!(rename.kind, ChatErrorKind::NotFound);
    }

    #[test]
    fn append_message_is_visible_in_later_snapshots() {
        let store = InMemoryConversationStore::new();
        let conversation = store.create_conversation("Notes");

        let message = store
            .append_message(&conversation.id(), Role::User, "remember this")
            .expect("append should work");

        let snapshot = store.conversation(&conversation.id()).expect("snapshot");
        assert_eq!(snapshot.messages(), &[message]);
        assert!(conversation.is_empty(), "earlier snapshots are not mutated");
    }

    #[test]
    fn append_to_current_creates_fallback_conversation() {
        let store = InMemoryConversationStore::new();

        let transcript = store.append_to_current(
            vec![
                MessageDraft::new(Role::User, "question"),
                MessageDraft::new(Role::Assistant, "answer"),
            ],
            DEFAULT_CONVERSATION_TITLE,
        );

        let current = store.current_conversation().expect("fallback created");
        assert_eq!(current.id(), transcript.conversation_id);
        assert!(transcript.created);
        assert_eq!(current.title(), DEFAULT_CONVERSATION_TITLE);
        assert_eq!(current.messages(), transcript.messages.as_slice());
        assert_eq!(current.messages()[0].role(), Role::User);
        assert_eq!(current.messages()[1].role(), Role::Assistant);
    }

    #[test]
    fn concurrent_creations_are_all_retained() {
        let store = Arc::new(InMemoryConversationStore::new());

        let handles = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..250)
                        .map(|index| store.create_conversation(&format!("{worker}-{index}")).id())
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        let mut created = HashSet::new();
        for handle in handles {
            created.extend(handle.join().expect("worker should not panic"));
        }

        assert_eq!(created.len(), 2_000);
        assert_eq!(store.len(), 2_000);
        let current = store.current_conversation().expect("some conversation is current");
        assert!(created.contains(&current.id()));
    }

    #[test]
    fn concurrent_exchanges_never_split_a_pair() {
        let store = Arc::new(InMemoryConversationStore::new());
        store.create_conversation(DEFAULT_CONVERSATION_TITLE);

        let writers = (0..4)
            .map(|worker| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for index in 0..100 {
                        store.append_to_current(
                            vec![
                                MessageDraft::new(Role::User, format!("q{worker}-{index}")),
                                MessageDraft::new(Role::Assistant, format!("a{worker}-{index}")),
                            ],
                            DEFAULT_CONVERSATION_TITLE,
                        );
                    }
                })
            })
            .collect::<Vec<_>>();

        let clearer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    store.create_conversation(DEFAULT_CONVERSATION_TITLE);
                }
            })
        };

        for writer in writers {
            writer.join().expect("writer should not panic");
        }
        clearer.join().expect("clearer should not panic");

        let mut total = 0;
        for summary in store.conversations() {
            let conversation = store.conversation(&summary.id).expect("listed conversation");
            for pair in conversation.messages().chunks(2) {
                assert_eq!(pair.len(), 2);
                assert_eq!(pair[0].role(), Role::User);
                assert_eq!(pair[1].role(), Role::Assistant);
                assert_eq!(pair[0].content()[1..], pair[1].content()[1..]);
            }
            total += conversation.messages().len();
        }
        assert_eq!(total, 800);
    }
}
