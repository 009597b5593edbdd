use std::fmt::Debug;

use log::*;

use crate::{session_types::ShopSession, traits::SessionManagement};

pub struct SessionApi<B> {
    db: B,
}

impl<B: Debug> Debug for SessionApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionApi ({:?})", self.db)
    }
}

impl<B> SessionApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> SessionApi<B>
where B: SessionManagement
{
    /// Records the session for a storefront that has just completed the OAuth handshake. A storefront that
    /// re-authenticates replaces its previous session.
    pub fn record_session(&self, session: ShopSession) {
        let shop = session.shop.clone();
        match self.db.record(session) {
            Some(old) => info!("🛍️️ Session for {shop} replaced. The previous session was created {}", old.created_at),
            None => info!("🛍️️ New session recorded for {shop}"),
        }
        debug!("🛍️️ {} storefront sessions are active", self.db.session_count());
    }

    pub fn session_for_shop(&self, shop: &str) -> Option<ShopSession> {
        let session = self.db.lookup(shop);
        trace!("🛍️️ Session lookup for {shop}: {}", if session.is_some() { "found" } else { "not found" });
        session
    }

    pub fn is_known_shop(&self, shop: &str) -> bool {
        self.session_for_shop(shop).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.db.session_count()
    }
}
