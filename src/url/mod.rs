//! URL handling module
//!
//! Canonicalization of discovered URLs and host extraction. Every URL that
//! enters the frontier goes through [`normalize_url`] first so that
//! equivalent URLs compare equal as strings.

mod host;
mod normalize;

pub use host::extract_host;
pub use normalize::normalize_url;
