//! Share links: creation, listing, and public resolution.

pub mod access;
pub mod link;
pub mod service;

pub use access::{AccessService, ClientInfo, ShareOutcome, ShareStatus};
pub use link::ShareLinkView;
pub use service::ShareService;
