use std::{fmt::Debug, sync::Arc};

use dashmap::DashMap;

use crate::{session_types::ShopSession, traits::SessionManagement};

/// An in-memory [`SessionManagement`] backend.
///
/// Sessions live in a sharded concurrent map, so lookups and writes for different shops do not contend with each
/// other. Each entry is an `Arc<ShopSession>` that `record` swaps out wholesale, which is what gives readers the
/// all-or-nothing view of a session. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<DashMap<String, Arc<ShopSession>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Debug for MemorySessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MemorySessionStore ({} sessions)", self.sessions.len())
    }
}

impl SessionManagement for MemorySessionStore {
    fn record(&self, session: ShopSession) -> Option<ShopSession> {
        let shop = session.shop.clone();
        self.sessions.insert(shop, Arc::new(session)).map(|old| old.as_ref().clone())
    }

    fn lookup(&self, shop: &str) -> Option<ShopSession> {
        self.sessions.get(shop).map(|entry| entry.value().as_ref().clone())
    }

    fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
