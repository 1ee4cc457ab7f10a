//! Value types shared by every rule record: source filter, request mode,
//! payload format and custom headers.

use serde::{Deserialize, Serialize};

/// How events are delivered to a target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestMode {
    Single,
    Batch,
}

/// Kind of channel activity a rule listens to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceType {
    #[serde(rename = "channel.message")]
    ChannelMessage,
    #[serde(rename = "channel.presence")]
    ChannelPresence,
    #[serde(rename = "channel.lifecycle")]
    ChannelLifecycle,
    #[serde(rename = "channel.occupancy")]
    ChannelOccupancy,
}

/// Encoding of delivered payloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    MsgPack,
}

/// Which channels feed a rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Regular expression matched against the full channel name. Empty matches every channel.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub channel_filter: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
}

/// A custom header sent with each delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
