// src/formatting/mod.rs
//! Renders Notion blocks into markdown.

pub mod block_renderer;

pub use self::block_renderer::{
    render_blocks, render_line, render_tree, RenderMode, RenderOptions, TodoStyle,
};
