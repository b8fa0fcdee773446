// src/formatting/block_renderer.rs
//! Block rendering engine: converts Notion blocks to markdown.
//!
//! A single block becomes one line (or one fenced code block) through
//! [`render_line`]. Documents are the surviving lines joined according to
//! the [`RenderMode`]. Rendering is pure and allocation is the only side
//! effect.

use crate::constants::{CHARS_PER_BLOCK_ESTIMATE, DEFAULT_CALLOUT_EMOJI};
use crate::model::{
    Block, BlockTree, BlockVisitor, CalloutBlock, CodeBlock, TextBlockContent, ToDoBlock,
};
use crate::types::concat_plain_text;

// --- Core Types ---

/// How rendered lines are joined into a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RenderMode {
    /// Lines joined by a single newline.
    #[default]
    Compact,
    /// Every line followed by a blank line.
    Spaced,
}

/// The marker used for to-do items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TodoStyle {
    /// `- [x] ` / `- [ ] `
    #[default]
    Checkbox,
    /// `☑ ` / `☐ `
    Glyph,
}

/// Options chosen once per process and passed through rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub todo_style: TodoStyle,
}

impl RenderOptions {
    /// Compact document with checkbox to-dos; used for single-page reads.
    pub fn compact() -> Self {
        Self {
            mode: RenderMode::Compact,
            todo_style: TodoStyle::Checkbox,
        }
    }

    /// Spaced document with glyph to-dos; used for book ingestion.
    pub fn spaced() -> Self {
        Self {
            mode: RenderMode::Spaced,
            todo_style: TodoStyle::Glyph,
        }
    }
}

/// Renders one block at a time as a markdown line.
struct LineRenderer<'a> {
    options: &'a RenderOptions,
}

impl LineRenderer<'_> {
    fn prefixed(prefix: &str, content: &TextBlockContent) -> String {
        let text = concat_plain_text(&content.rich_text);
        if text.is_empty() {
            return String::new();
        }
        format!("{}{}", prefix, text)
    }
}

impl BlockVisitor for LineRenderer<'_> {
    type Output = String;

    fn visit_paragraph(&mut self, content: &TextBlockContent) -> String {
        Self::prefixed("", content)
    }

    fn visit_heading(&mut self, level: u8, content: &TextBlockContent) -> String {
        let hashes = "#".repeat(usize::from(level.clamp(1, 3)));
        Self::prefixed(&format!("{} ", hashes), content)
    }

    fn visit_bulleted_list_item(&mut self, content: &TextBlockContent) -> String {
        Self::prefixed("- ", content)
    }

    fn visit_numbered_list_item(&mut self, content: &TextBlockContent) -> String {
        Self::prefixed("1. ", content)
    }

    fn visit_quote(&mut self, content: &TextBlockContent) -> String {
        Self::prefixed("> ", content)
    }

    fn visit_todo(&mut self, todo: &ToDoBlock) -> String {
        let marker = match (self.options.todo_style, todo.checked) {
            (TodoStyle::Checkbox, true) => "- [x] ",
            (TodoStyle::Checkbox, false) => "- [ ] ",
            (TodoStyle::Glyph, true) => "☑ ",
            (TodoStyle::Glyph, false) => "☐ ",
        };
        Self::prefixed(marker, &todo.content)
    }

    fn visit_code(&mut self, code: &CodeBlock) -> String {
        let text = concat_plain_text(&code.content.rich_text);
        if text.is_empty() {
            return String::new();
        }
        format!("```{}\n{}\n```", code.language, text)
    }

    fn visit_callout(&mut self, callout: &CalloutBlock) -> String {
        let emoji = callout
            .icon
            .as_ref()
            .and_then(|icon| icon.emoji())
            .unwrap_or(DEFAULT_CALLOUT_EMOJI);
        Self::prefixed(&format!("{} ", emoji), &callout.content)
    }

    fn visit_divider(&mut self) -> String {
        "---".to_string()
    }
}

// --- Public API ---

/// Renders a single block. Returns an empty string when the block
/// contributes nothing.
pub fn render_line(block: &Block, options: &RenderOptions) -> String {
    block.accept(&mut LineRenderer { options })
}

/// Renders a sequence of blocks into a markdown document.
pub fn render_blocks<'a, I>(blocks: I, options: &RenderOptions) -> String
where
    I: IntoIterator<Item = &'a Block>,
{
    let blocks = blocks.into_iter();
    let mut output = String::with_capacity(blocks.size_hint().0 * CHARS_PER_BLOCK_ESTIMATE);
    let mut rendered = 0usize;

    for block in blocks {
        let line = render_line(block, options);
        if line.is_empty() {
            continue;
        }

        match options.mode {
            RenderMode::Compact => {
                if rendered > 0 {
                    output.push('\n');
                }
                output.push_str(&line);
            }
            RenderMode::Spaced => {
                if rendered > 0 {
                    output.push('\n');
                }
                output.push_str(&line);
                output.push('\n');
            }
        }
        rendered += 1;
    }

    log::debug!("Rendered {} blocks into {} bytes", rendered, output.len());
    output
}

/// Renders the top-level blocks of a tree in order.
pub fn render_tree(tree: &BlockTree, options: &RenderOptions) -> String {
    render_blocks(tree.roots(), options)
}
