use std::env;

use log::*;

use crate::Secret;

/// Parse a boolean flag from a string value, or return the given default value otherwise.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let value = match value {
        Some(v) => v,
        None => return default,
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

/// Read a boolean flag from the environment.
pub fn env_flag(name: &str, default: bool) -> bool {
    parse_boolean_flag(env::var(name).ok(), default)
}

/// Read a string from the environment, logging a warning and falling back to `default` if it is not set.
pub fn env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("🪛️ {name} is not set. Using the default value, {default}, instead.");
        default.to_string()
    })
}

/// Read a secret from the environment. The value itself is never logged. If the variable is missing, an error is
/// logged and an empty secret is returned.
pub fn env_secret(name: &str) -> Secret<String> {
    match env::var(name) {
        Ok(s) if !s.is_empty() => Secret::new(s),
        _ => {
            error!("🪛️ {name} is not set. Requests that depend on it will fail.");
            Secret::default()
        },
    }
}
