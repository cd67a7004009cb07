//! Rendering contract for article bodies.
//!
//! A renderer maps each known block variant to a presentation form without
//! mutating the model. Unknown variants are skipped, never an error: content
//! is server-authored and this client's block vocabulary may lag behind the
//! producer's.
//!
//! Trust boundary: only `paragraph` text may carry inline markup, and it is
//! handed to the renderer verbatim. Renderers targeting HTML must sanitize
//! it; every other text field is plain text.

use crate::content::{
    BlockData, ContentBlock, HeadingBlock, ImageBlock, ListBlock, ListStyle, ParagraphBlock,
    QuoteBlock, TextBlock,
};

/// One method per known block variant.
pub trait BlockRenderer {
    type Output;

    fn text(&self, block: &TextBlock) -> Self::Output;
    fn paragraph(&self, block: &ParagraphBlock) -> Self::Output;
    fn heading(&self, block: &HeadingBlock) -> Self::Output;
    fn image(&self, block: &ImageBlock) -> Self::Output;
    fn quote(&self, block: &QuoteBlock) -> Self::Output;
    fn list(&self, block: &ListBlock) -> Self::Output;
}

/// Render one block. Returns `None` for unknown variants so callers keep
/// going instead of failing the whole body.
pub fn render_block<R: BlockRenderer>(renderer: &R, block: &ContentBlock) -> Option<R::Output> {
    match &block.data {
        BlockData::Text(payload) => Some(renderer.text(payload)),
        BlockData::Paragraph(payload) => Some(renderer.paragraph(payload)),
        BlockData::Heading(payload) => Some(renderer.heading(payload)),
        BlockData::Image(payload) => Some(renderer.image(payload)),
        BlockData::Quote(payload) => Some(renderer.quote(payload)),
        BlockData::List(payload) => Some(renderer.list(payload)),
        BlockData::Unknown { kind } => {
            tracing::debug!("skipping unknown content block type {:?}", kind);
            None
        }
    }
}

/// Render a whole body in array order, silently dropping unknown blocks.
pub fn render_blocks<R: BlockRenderer>(renderer: &R, blocks: &[ContentBlock]) -> Vec<R::Output> {
    blocks
        .iter()
        .filter_map(|block| render_block(renderer, block))
        .collect()
}

/// Plain-text renderer used by the preview binary and tests. Paragraph
/// markup passes through verbatim per the contract; everything else is
/// already plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl BlockRenderer for TextRenderer {
    type Output = String;

    fn text(&self, block: &TextBlock) -> String {
        block.text.clone()
    }

    fn paragraph(&self, block: &ParagraphBlock) -> String {
        block.text.clone()
    }

    fn heading(&self, block: &HeadingBlock) -> String {
        let marker = match u8::from(block.level) {
            2 => "##",
            _ => "###",
        };
        format!("{} {}", marker, block.text)
    }

    fn image(&self, block: &ImageBlock) -> String {
        match &block.caption {
            Some(caption) => format!("[image: {}] {}", block.alt, caption),
            None => format!("[image: {}]", block.alt),
        }
    }

    fn quote(&self, block: &QuoteBlock) -> String {
        match &block.author {
            Some(author) => format!("> {} ({})", block.text, author),
            None => format!("> {}", block.text),
        }
    }

    fn list(&self, block: &ListBlock) -> String {
        block
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| match block.style {
                ListStyle::Ordered => format!("{}. {}", index + 1, item),
                ListStyle::Unordered => format!("- {}", item),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
