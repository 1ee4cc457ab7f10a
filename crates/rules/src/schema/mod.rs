//! Record and variant types for rules, ingress rules and their targets.
//!
//! - `kind`: discriminator registries per family
//! - `targets` / `ingress`: the closed target families
//! - `auth`: AWS (flat form), Pulsar and Kafka authentication objects
//! - `rule` / `ingress_rule`: whole records, read and create/update shapes
//! - `envelope`: first-pass shapes used while the payload is still opaque

mod auth;
mod common;
mod envelope;
mod ingress;
mod ingress_rule;
mod kind;
mod rule;
mod targets;

pub use auth::*;
pub use common::*;
pub use ingress::*;
pub use ingress_rule::*;
pub use kind::*;
pub use rule::*;
pub use targets::*;

#[cfg(test)]
mod tests;
