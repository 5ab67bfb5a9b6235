//! Host-to-Tenant Resolution
//!
//! Tenants are served from their own subdomain, so the tenant key is the
//! leftmost label of the request host:
//! - acme.erp.example.com -> acme
//! - acme.example.com:8080 -> acme
//! - localhost -> no tenant

use subwatch_shared::TenantId;

/// Derive the tenant identifier from a Host header value.
///
/// Returns `None` when the host has fewer than two dot-separated labels or
/// the leftmost label is empty.
pub fn derive_tenant_identifier(host: &str) -> Option<TenantId> {
    let host = normalize_host(host);

    let mut labels = host.split('.');
    let first = labels.next()?;
    // Need at least two labels
    labels.next()?;

    TenantId::new(first)
}

/// Normalize a host header value
fn normalize_host(host: &str) -> String {
    strip_port(host.trim()).to_lowercase()
}

/// Remove a trailing `:<digits>` port suffix, leaving anything else untouched
fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
