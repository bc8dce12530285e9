//! Adapters from the `auth` primitives to the domain ports.

pub mod password;
pub mod token;
