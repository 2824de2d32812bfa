use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless chart usage.
///
/// It still validates frame content so invalid geometry surfaces as an error,
/// and it records whether the surface currently shows a frame.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_text_count: usize,
    pub render_count: usize,
    pub clear_count: usize,
    pub has_content: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_line_count = frame.lines.len();
        self.last_rect_count = frame.rects.len();
        self.last_text_count = frame.texts.len();
        self.render_count += 1;
        self.has_content = !frame.is_empty();
        Ok(())
    }

    fn clear(&mut self, _viewport: Viewport) -> ChartResult<()> {
        self.last_line_count = 0;
        self.last_rect_count = 0;
        self.last_text_count = 0;
        self.clear_count += 1;
        self.has_content = false;
        Ok(())
    }
}
