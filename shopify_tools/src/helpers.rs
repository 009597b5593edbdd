use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use subtle::ConstantTimeEq;

static SHOP_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9\-]*\.myshopify\.com$").expect("Invalid shop domain pattern"));

/// Shop domains look like `my-shop.myshopify.com`. Anything else is refused before it gets near a URL.
pub fn is_valid_shop_domain(shop: &str) -> bool {
    SHOP_DOMAIN.is_match(shop)
}

/// The message that Shopify signs on OAuth callbacks: every parameter except `hmac` and `signature`, sorted by name and
/// joined as `name=value` pairs separated by `&`.
pub fn oauth_message(params: &HashMap<String, String>) -> String {
    let mut pairs =
        params.iter().filter(|(k, _)| k.as_str() != "hmac" && k.as_str() != "signature").collect::<Vec<_>>();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs.into_iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<String>>().join("&")
}

pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
