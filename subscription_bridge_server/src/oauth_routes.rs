//! The storefront OAuth handshake.
//!
//! `/auth` sends the merchant to the storefront to approve the app, and leaves the `state` nonce in a cookie that only
//! the callback route gets to see. `/auth/callback` checks the storefront's answer against that nonce, exchanges the
//! authorization code for an access token and records the storefront's session.
use actix_web::{
    cookie::{Cookie, SameSite},
    http::header,
    web,
    HttpRequest,
    HttpResponse,
};
use log::*;
use subscription_engine::{OAuthError, SessionApi, SessionManagement, StorefrontAuthorization};

use crate::{data_objects::ShopQuery, errors::ServerError, helpers::query_parameters, route};

pub const STATE_COOKIE: &str = "shopify_app_state";
pub const CALLBACK_PATH: &str = "/auth/callback";

route!(begin_auth => Get "/auth" impl StorefrontAuthorization);
pub async fn begin_auth<A: StorefrontAuthorization>(
    query: web::Query<ShopQuery>,
    oauth: web::Data<A>,
) -> Result<HttpResponse, ServerError> {
    let shop = query.into_inner().shop.unwrap_or_default();
    trace!("💻️ Received auth request for {shop}");
    let request = oauth.begin_auth(&shop, CALLBACK_PATH).map_err(|e| {
        warn!("💻️ Could not start OAuth for '{shop}'. {e}");
        e
    })?;
    let cookie = Cookie::build(STATE_COOKIE, request.state)
        .path(CALLBACK_PATH)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .finish();
    Ok(HttpResponse::Found().insert_header((header::LOCATION, request.url)).cookie(cookie).finish())
}

route!(auth_callback => Get "/auth/callback" impl SessionManagement, StorefrontAuthorization);
pub async fn auth_callback<B: SessionManagement, A: StorefrontAuthorization>(
    req: HttpRequest,
    oauth: web::Data<A>,
    sessions: web::Data<SessionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received OAuth callback");
    let params = query_parameters(req.query_string())
        .ok_or_else(|| ServerError::InvalidRequestPath("The callback query string is malformed".into()))?;
    let state = req.cookie(STATE_COOKIE).map(|c| c.value().to_string()).filter(|s| !s.is_empty()).ok_or_else(|| {
        warn!("💻️ OAuth callback arrived without a state cookie");
        ServerError::OAuthFailure(OAuthError::StateMismatch)
    })?;
    let (session, callback) = oauth.validate_callback(&params, &state).await.map_err(|e| {
        warn!("💻️ OAuth callback rejected. {e}");
        e
    })?;
    info!("💻️ {} completed the OAuth handshake", session.shop);
    sessions.record_session(session);
    let location = format!(
        "/?shop={}&host={}",
        urlencoding::encode(&callback.shop),
        urlencoding::encode(callback.host.as_deref().unwrap_or_default())
    );
    let mut removal = Cookie::build(STATE_COOKIE, "").path(CALLBACK_PATH).finish();
    removal.make_removal();
    Ok(HttpResponse::Found().insert_header((header::LOCATION, location)).cookie(removal).finish())
}
