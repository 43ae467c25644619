//! Identity verification for tokens issued by the external identity provider

mod identity;

pub use identity::{Claims, Identity, IdentityVerifier};
