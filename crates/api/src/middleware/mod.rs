//! Access-control extractors.
//!
//! - [`api_key::RequireRead`] -- any known API key.
//! - [`api_key::RequireWrite`] -- an API key bound to the `admin` role.

pub mod api_key;
