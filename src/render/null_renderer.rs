use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless chart usage.
///
/// It still validates frame content so callers catch invalid geometry without
/// a document.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_bubble_count: usize,
    pub last_viewport: Option<Viewport>,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_bubble_count = frame.bubbles.len();
        self.last_viewport = Some(frame.viewport);
        self.frames_rendered += 1;
        Ok(())
    }
}
