use color_eyre::Report;
use crossterm::{
    queue,
    style::{self, Stylize},
};
use std::io::Write;
use text_rope::{NodeView, Rope};

const PREVIEW_CHARS: usize = 24;

/// Writes an indented, colored outline of a rope's nodes.
pub struct TreeView<'w, W: Write> {
    out: &'w mut W,
    preview: usize,
}

impl<'w, W: Write> TreeView<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        Self { out, preview: PREVIEW_CHARS }
    }

    pub fn render(&mut self, rope: &Rope) -> Result<(), Report> {
        let mut result = Ok(());
        rope.walk(|depth, view| {
            if result.is_ok() {
                result = self.render_node(depth, view);
            }
        });
        result?;

        queue!(
            self.out,
            style::PrintStyledContent(
                format!("{} chars, depth {}, {} leaves", rope.len(), rope.depth(), rope.leaf_count()).dim()
            ),
            style::Print("\n")
        )?;

        self.out.flush()?;
        Ok(())
    }

    fn render_node(&mut self, depth: usize, view: NodeView<'_>) -> Result<(), Report> {
        queue!(self.out, style::Print("  ".repeat(depth)))?;

        match view {
            NodeView::Internal { weight, len } => queue!(
                self.out,
                style::PrintStyledContent("node".bold()),
                style::Print(format!(" weight={weight} len={len}\n")),
            )?,
            NodeView::Leaf(text) => queue!(
                self.out,
                style::PrintStyledContent("leaf".green()),
                style::Print(format!(" {:?}\n", preview(text, self.preview))),
            )?,
        }

        Ok(())
    }
}

fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let mut shown = text.chars().take(max).collect::<String>();
    shown.push('…');
    shown
}
