//! Article body content blocks.
//!
//! An article body is an ordered sequence of blocks; wire form is
//! `{"id": "...", "type": "...", "data": {...}}`. The block set is closed on
//! our side but the content service may start emitting new types before this
//! client is updated, so decoding maps any unrecognized `type` to
//! [`BlockData::Unknown`] instead of failing. Renderers skip unknown blocks.

use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// One unit of an article body. `id` is stable and unique within the body;
/// it is used as a render key and never reused after a block is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    pub id: String,
    pub data: BlockData,
}

/// Block payload, discriminated by the wire `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockData {
    /// Raw text, rendered as plain text.
    Text(TextBlock),
    /// Text permitting inline emphasis markup, rendered verbatim. The model
    /// does not validate markup safety; the consuming renderer must sanitize.
    Paragraph(ParagraphBlock),
    Heading(HeadingBlock),
    Image(ImageBlock),
    Quote(QuoteBlock),
    List(ListBlock),
    /// A block type this client version does not know. Carried through so
    /// the body keeps its length and order; renderers treat it as a no-op.
    Unknown { kind: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphBlock {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingBlock {
    pub text: String,
    pub level: HeadingLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Media path relative to the media base (e.g. `/blog/cover.jpg`).
    /// Resolving it to a fetchable URL is the consumer's job.
    pub url: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBlock {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListBlock {
    pub style: ListStyle,
    pub items: Vec<String>,
}

/// Heading depth. Only h2 and h3 exist in article bodies; h1 is the article
/// title itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H2,
    H3,
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            other => Err(format!("unsupported heading level: {}", other)),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> u8 {
        match level {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    Unordered,
}

impl BlockData {
    /// The wire `type` tag for this payload.
    pub fn kind(&self) -> &str {
        match self {
            BlockData::Text(_) => "text",
            BlockData::Paragraph(_) => "paragraph",
            BlockData::Heading(_) => "heading",
            BlockData::Image(_) => "image",
            BlockData::Quote(_) => "quote",
            BlockData::List(_) => "list",
            BlockData::Unknown { kind } => kind,
        }
    }
}

/// Check the per-body invariant that block ids are unique.
pub fn block_ids_unique(blocks: &[ContentBlock]) -> bool {
    let mut seen = HashSet::with_capacity(blocks.len());
    blocks.iter().all(|block| seen.insert(block.id.as_str()))
}

// Wire envelope. Decoding goes through this struct so an unknown `type` can
// fall back to `Unknown` instead of being a hard error, which is what a
// derived tagged enum would produce.
#[derive(Serialize, Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawBlock::deserialize(deserializer)?;
        let data = match raw.kind.as_str() {
            "text" => BlockData::Text(serde_json::from_value(raw.data).map_err(D::Error::custom)?),
            "paragraph" => {
                BlockData::Paragraph(serde_json::from_value(raw.data).map_err(D::Error::custom)?)
            }
            "heading" => {
                BlockData::Heading(serde_json::from_value(raw.data).map_err(D::Error::custom)?)
            }
            "image" => {
                BlockData::Image(serde_json::from_value(raw.data).map_err(D::Error::custom)?)
            }
            "quote" => {
                BlockData::Quote(serde_json::from_value(raw.data).map_err(D::Error::custom)?)
            }
            "list" => BlockData::List(serde_json::from_value(raw.data).map_err(D::Error::custom)?),
            _ => BlockData::Unknown { kind: raw.kind },
        };
        Ok(ContentBlock { id: raw.id, data })
    }
}

impl Serialize for ContentBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = match &self.data {
            BlockData::Text(payload) => serde_json::to_value(payload),
            BlockData::Paragraph(payload) => serde_json::to_value(payload),
            BlockData::Heading(payload) => serde_json::to_value(payload),
            BlockData::Image(payload) => serde_json::to_value(payload),
            BlockData::Quote(payload) => serde_json::to_value(payload),
            BlockData::List(payload) => serde_json::to_value(payload),
            // Unknown payloads are not round-tripped; this client never
            // authors them, it only tolerates them on read.
            BlockData::Unknown { .. } => Ok(serde_json::Value::Object(Default::default())),
        }
        .map_err(S::Error::custom)?;

        let raw = RawBlock {
            id: self.id.clone(),
            kind: self.data.kind().to_string(),
            data,
        };
        raw.serialize(serializer)
    }
}
