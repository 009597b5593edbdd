use std::{collections::HashMap, net::IpAddr, str::FromStr};

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ServerOptions;

static FORWARDED_FOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"for="?(?P<ip>[^;,"]+)"#).expect("Invalid Forwarded header pattern"));

/// Get the remote IP address from the request. It uses 3 sources to determine the IP address, in decreasing order
/// of preference:
/// 1. The first address in the `X-Forwarded-For` header, iif `use_x_forwarded_for` is set in the options.
/// 2. The `Forwarded` header, iif `use_forwarded` is set in the options.
/// 3. The peer address from the connection info.
pub fn get_remote_ip(req: &HttpRequest, options: ServerOptions) -> Option<IpAddr> {
    let mut result = None;
    if options.use_x_forwarded_for {
        trace!("💻️ Checking X-Forwarded-For header");
        result = req
            .headers()
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| IpAddr::from_str(s.trim()).ok());
        if let Some(ip) = result {
            debug!("💻️ Using X-Forwarded-For header for remote address: {ip}");
        }
    }
    if options.use_forwarded && result.is_none() {
        trace!("💻️ Checking Forwarded header");
        result = req
            .headers()
            .get("Forwarded")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| FORWARDED_FOR.captures(v))
            .and_then(|caps| caps.name("ip"))
            .map(|m| m.as_str())
            .and_then(|s| IpAddr::from_str(s).ok());
        if let Some(ip) = result {
            debug!("💻️ Using Forwarded header for remote address: {ip}");
        }
    }
    result.or_else(|| {
        let peer_addr = req.connection_info().peer_addr().map(|a| a.to_string());
        trace!("💻️ Using Peer address for remote address: {:?}", peer_addr);
        peer_addr.and_then(|s| IpAddr::from_str(&s).ok())
    })
}

/// A printable name for the caller, for log messages.
pub fn remote_label(req: &HttpRequest, options: ServerOptions) -> String {
    get_remote_ip(req, options).map(|ip| ip.to_string()).unwrap_or_else(|| "an unknown address".into())
}

/// The query string as a map of parameter names to values. Repeated names keep the last value.
pub fn query_parameters(query_string: &str) -> Option<HashMap<String, String>> {
    web::Query::<HashMap<String, String>>::from_query(query_string).ok().map(web::Query::into_inner)
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found().insert_header((header::LOCATION, location)).finish()
}
