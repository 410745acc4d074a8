//! In-memory reference implementation of the ChatService.
//!
//! This mirrors the observable semantics of the production service
//! (ids, timestamps, ordering, authorization) with no network and no
//! persistence. One [`MemoryHub`] models one deployment; each connected
//! caller gets its own [`MemoryService`] handle.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use confab_core::{
    normalize_pair, validate_message_content, validate_page_size, validate_profile,
    ConversationId, ConversationView, Message, MessageId, Principal, Timestamp, UserProfile,
    UserRole,
};

use crate::error::{Result, ServiceError};
use crate::traits::ChatService;

/// Shared state for one simulated deployment.
pub struct MemoryHub {
    inner: RwLock<HubInner>,
}

struct HubInner {
    profiles: HashMap<Principal, UserProfile>,
    roles: HashMap<Principal, UserRole>,
    conversations: Vec<ConversationView>,

    /// Index: canonical participant pair -> conversation id.
    by_pair: HashMap<[Principal; 2], ConversationId>,

    /// Counter behind `conv-1`, `conv-2`, ... ids.
    next_conversation: u64,

    /// While set, every call fails with `Unavailable`.
    offline: bool,
}

impl MemoryHub {
    /// Create an empty hub.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new(HubInner {
                profiles: HashMap::new(),
                roles: HashMap::new(),
                conversations: Vec::new(),
                by_pair: HashMap::new(),
                next_conversation: 1,
                offline: false,
            }),
        })
    }

    /// Create a hub with `admin` pre-registered as an admin.
    pub fn with_admin(admin: &Principal) -> Arc<Self> {
        let hub = Self::new();
        hub.inner
            .write()
            .unwrap()
            .roles
            .insert(admin.clone(), UserRole::Admin);
        hub
    }

    /// Connect a caller, producing a service handle bound to it.
    ///
    /// The first connection registers the caller with the `User` role
    /// (unless a role was already assigned).
    pub fn connect(self: &Arc<Self>, principal: Principal) -> MemoryService {
        self.inner
            .write()
            .unwrap()
            .roles
            .entry(principal.clone())
            .or_insert(UserRole::User);
        MemoryService {
            principal,
            hub: Arc::clone(self),
        }
    }

    /// Simulate an outage. While offline, every call on every handle
    /// fails with [`ServiceError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.inner.write().unwrap().offline = offline;
    }
}

/// A service handle bound to one authenticated caller.
pub struct MemoryService {
    principal: Principal,
    hub: Arc<MemoryHub>,
}

impl HubInner {
    fn check_online(&self) -> Result<()> {
        if self.offline {
            Err(ServiceError::Unavailable("simulated outage".into()))
        } else {
            Ok(())
        }
    }

    fn role_of(&self, principal: &Principal) -> UserRole {
        self.roles.get(principal).copied().unwrap_or(UserRole::Guest)
    }
}

#[async_trait]
impl ChatService for MemoryService {
    fn principal(&self) -> Principal {
        self.principal.clone()
    }

    async fn own_profile(&self) -> Result<Option<UserProfile>> {
        let inner = self.hub.inner.read().unwrap();
        inner.check_online()?;
        Ok(inner.profiles.get(&self.principal).cloned())
    }

    async fn profile_of(&self, user: &Principal) -> Result<Option<UserProfile>> {
        let inner = self.hub.inner.read().unwrap();
        inner.check_online()?;
        Ok(inner.profiles.get(user).cloned())
    }

    async fn save_own_profile(&self, profile: UserProfile) -> Result<()> {
        let mut inner = self.hub.inner.write().unwrap();
        inner.check_online()?;
        validate_profile(&profile).map_err(|e| ServiceError::Rejected(e.to_string()))?;
        inner.profiles.insert(self.principal.clone(), profile);
        Ok(())
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationView>> {
        let inner = self.hub.inner.read().unwrap();
        inner.check_online()?;

        let mut list: Vec<ConversationView> = inner
            .conversations
            .iter()
            .filter(|c| c.has_participant(&self.principal))
            .cloned()
            .collect();

        // Most recent message first. Conversations with no messages sort
        // last (None < Some); equal keys tie-break by id ascending.
        list.sort_by(|a, b| {
            b.last_message_at()
                .cmp(&a.last_message_at())
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(list)
    }

    async fn start_conversation(&self, to: &Principal) -> Result<ConversationId> {
        let mut inner = self.hub.inner.write().unwrap();
        inner.check_online()?;

        if *to == self.principal {
            return Err(ServiceError::SelfConversation(to.clone()));
        }

        let pair = normalize_pair(self.principal.clone(), to.clone());
        if let Some(existing) = inner.by_pair.get(&pair) {
            return Ok(existing.clone());
        }

        let id = ConversationId::new(format!("conv-{}", inner.next_conversation));
        inner.next_conversation += 1;
        inner.by_pair.insert(pair.clone(), id.clone());
        inner.conversations.push(ConversationView {
            id: id.clone(),
            participants: pair,
            messages: Vec::new(),
        });

        Ok(id)
    }

    async fn list_messages(
        &self,
        conversation: &ConversationId,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<Message>> {
        let inner = self.hub.inner.read().unwrap();
        inner.check_online()?;
        validate_page_size(page_size).map_err(|e| ServiceError::Rejected(e.to_string()))?;

        // An absent conversation is not an error.
        let Some(conv) = inner.conversations.iter().find(|c| &c.id == conversation) else {
            return Ok(Vec::new());
        };
        if !conv.has_participant(&self.principal) {
            return Err(ServiceError::NotAuthorized(format!(
                "{} is not a participant of {}",
                self.principal, conversation
            )));
        }

        let start = match page.checked_mul(page_size) {
            Some(start) if (start as usize) < conv.messages.len() => start as usize,
            _ => return Ok(Vec::new()),
        };
        let end = usize::min(start + page_size as usize, conv.messages.len());
        Ok(conv.messages[start..end].to_vec())
    }

    async fn send_message(&self, conversation: &ConversationId, content: &str) -> Result<()> {
        let mut inner = self.hub.inner.write().unwrap();
        inner.check_online()?;
        validate_message_content(content).map_err(|e| ServiceError::Rejected(e.to_string()))?;

        let principal = self.principal.clone();
        let conv = inner
            .conversations
            .iter_mut()
            .find(|c| &c.id == conversation)
            .ok_or_else(|| ServiceError::UnknownConversation(conversation.clone()))?;
        if !conv.has_participant(&principal) {
            return Err(ServiceError::NotAuthorized(format!(
                "{} is not a participant of {}",
                principal, conversation
            )));
        }

        conv.messages.push(Message {
            id: MessageId::new(conv.messages.len() as u64),
            content: content.to_string(),
            sender: principal,
            timestamp: Timestamp::now(),
        });
        Ok(())
    }

    async fn own_role(&self) -> Result<UserRole> {
        let inner = self.hub.inner.read().unwrap();
        inner.check_online()?;
        Ok(inner.role_of(&self.principal))
    }

    async fn assign_role(&self, user: &Principal, role: UserRole) -> Result<()> {
        let mut inner = self.hub.inner.write().unwrap();
        inner.check_online()?;
        if inner.role_of(&self.principal) != UserRole::Admin {
            return Err(ServiceError::NotAuthorized(
                "role assignment requires admin".into(),
            ));
        }
        inner.roles.insert(user.clone(), role);
        Ok(())
    }
}
