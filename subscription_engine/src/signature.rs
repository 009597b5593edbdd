//! # Storefront request signatures
//!
//! Requests that the storefront forwards to this server (via its app proxy) carry the original query parameters plus a
//! `signature` parameter. The signature is the lowercase hex HMAC-SHA256 of the *canonical string* of the remaining
//! parameters, keyed with the app's shared secret.
//!
//! The canonical string is built by sorting the parameters by name and concatenating `name=value` for each of them,
//! with **no** delimiter between entries:
//!
//! ```text
//! {shop: "x.myshopify.com", code: "abc"}  =>  "code=abcshop=x.myshopify.com"
//! ```
//!
//! This format is fixed by the storefront, which computes the signature on its side. Do not replace it with a
//! `&`-delimited query string; signatures would stop matching.
//!
//! The check is fail-closed. A request without a signature, or without any other parameters, is rejected before any
//! hashing takes place.
//!
//! Parameter values are taken as-is. Whatever decoding the transport performed when parsing the query string is all
//! the decoding there is. If a parameter name appears more than once, the last value wins (the same behaviour as
//! collecting the query into a map).
use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use log::*;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// The name of the query parameter that holds the claimed signature.
pub const SIGNATURE_FIELD: &str = "signature";

type HmacSha256 = Hmac<Sha256>;

/// The reason a signature check failed. These are for operator diagnostics only and must not be sent to clients, who
/// all receive the same rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("No signature was provided")]
    MissingSignature,
    #[error("The request has no parameters besides the signature")]
    NoSignableParameters,
    #[error("The signature does not match the request parameters")]
    Mismatch,
}

/// A request's parameters, split into the claimed signature and the signable set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedRequest {
    signature: Option<String>,
    signable: BTreeMap<String, String>,
}

impl SignedRequest {
    pub fn from_parameters<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut signature = None;
        let mut signable = BTreeMap::new();
        for (name, value) in params {
            let name = name.into();
            if name == SIGNATURE_FIELD {
                signature = Some(value.into());
            } else {
                signable.insert(name, value.into());
            }
        }
        Self { signature, signable }
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn signable(&self) -> &BTreeMap<String, String> {
        &self.signable
    }

    pub fn canonical_string(&self) -> String {
        canonicalize(&self.signable)
    }

    /// Checks the claimed signature against the one calculated from the signable set.
    pub fn check(&self, secret: &[u8]) -> Result<(), SignatureError> {
        let claimed = match self.signature.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => return Err(SignatureError::MissingSignature),
        };
        if self.signable.is_empty() {
            return Err(SignatureError::NoSignableParameters);
        }
        let canonical = self.canonical_string();
        trace!("🔐️ Calculating signature over {} parameters ({} bytes)", self.signable.len(), canonical.len());
        let expected = calculate_signature(secret, &canonical);
        if constant_time_eq(expected.as_bytes(), claimed.as_bytes()) {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}

/// Returns true iff `parameters` carries a `signature` that matches the HMAC-SHA256 of the other parameters' canonical
/// string under `secret`.
pub fn verify<I, K, V>(parameters: I, secret: &[u8]) -> bool
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    check_signature(parameters, secret).is_ok()
}

/// Like [`verify`], but reports why the check failed.
pub fn check_signature<I, K, V>(parameters: I, secret: &[u8]) -> Result<(), SignatureError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    SignedRequest::from_parameters(parameters).check(secret)
}

/// Builds the canonical string for a set of parameters. The input order does not matter; entries are sorted by name
/// (byte order) before being concatenated.
pub fn canonicalize<I, K, V>(entries: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut entries = entries.into_iter().collect::<Vec<(K, V)>>();
    entries.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));
    entries.iter().fold(String::new(), |mut acc, (name, value)| {
        acc.push_str(name.as_ref());
        acc.push('=');
        acc.push_str(value.as_ref());
        acc
    })
}

/// Lowercase hex HMAC-SHA256 of `canonical`, keyed with `secret`.
pub fn calculate_signature(secret: &[u8], canonical: &str) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret).expect("HMAC can take a key of any size");
    mac.update(canonical.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
