//! HTTP-level integration tests over in-memory stores and fake AI backends.

mod helpers;

mod assistant_test;
mod document_test;
mod health_test;
mod profile_test;
mod share_test;
