//! Host-based tenant routing
//!
//! Every tenant is served from a subdomain such as `acme.erp.example.com`;
//! this module turns the incoming Host header into the tenant key used for
//! billing lookups.

mod host_resolver;

pub use host_resolver::derive_tenant_identifier;
