//! Identity token verification.
//!
//! Tokens are issued by the external identity provider; this module only
//! checks them and turns their claims into a [`RequestContext`].
//!
//! [`RequestContext`]: medivault_service::RequestContext

pub mod claims;
pub mod verifier;

pub use claims::Claims;
pub use verifier::TokenVerifier;
