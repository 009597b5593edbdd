use crate::session_types::ShopSession;

/// Storage for storefront sessions, keyed by the storefront identifier.
///
/// Implementations must be safe to share between request handlers. A `lookup` must never observe a partially written
/// session: `record` replaces the whole entry in one step. Sessions cannot be deleted.
pub trait SessionManagement {
    /// Stores `session` under `session.shop`, replacing any existing session for that shop. The previous session, if
    /// any, is returned.
    fn record(&self, session: ShopSession) -> Option<ShopSession>;

    /// Fetches the current session for `shop`, if there is one.
    fn lookup(&self, shop: &str) -> Option<ShopSession>;

    /// The number of storefronts with a recorded session.
    fn session_count(&self) -> usize;
}
