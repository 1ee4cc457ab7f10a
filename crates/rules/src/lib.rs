//! Codec for the polymorphic rule records of the Ably Control API.
//!
//! This crate provides:
//! - Closed sum types for rule targets, ingress targets and AWS authentication
//! - A static registry mapping wire discriminators to variants, per family
//! - The sibling-form codec (`ruleType` next to `target`) and the flat-form
//!   codec (`authenticationMode` inside the authentication object)
//! - Whole-record encode/decode for rules and ingress rules, including lists
//!
//! Transport, authentication headers and plain-record CRUD live in the
//! resource client that consumes these functions.

pub mod codec;
pub mod error;
pub mod schema;
mod serde_utils;

pub use codec::{
    decode_ingress_rule, decode_ingress_rules, decode_rule, decode_rule_batch, decode_rules,
    encode_ingress_rule, encode_new_ingress_rule, encode_new_rule, encode_rule, BatchDecode,
};
pub use error::{CodecError, Result};
pub use schema::*;
