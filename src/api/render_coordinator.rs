use tracing::debug;

use crate::core::{NodeData, PackLayout, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BubblePrimitive, Document, DomRenderer, ElementId, RenderFrame, Renderer, StyleOverrides,
};

use super::chart_state::Attachment;
use super::validation::{validate_chart_data, validate_dimensions};
use super::{BubbleChart, ChartData};

impl<L: PackLayout> BubbleChart<L> {
    /// Builds the scene for the current state without touching any document.
    pub fn frame(&self) -> ChartResult<RenderFrame> {
        let viewport = validate_dimensions(
            self.state.viewport.width,
            self.state.viewport.height,
            self.config.inset,
        )?;
        self.build_frame(
            &self.state.data_source,
            viewport,
            &self.state.style_overrides,
            Vec::new(),
        )
    }

    /// Renders the current state through an arbitrary backend.
    pub fn render_with<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.frame()?;
        renderer.render(&frame)
    }

    /// Attaches the chart under `host` and draws it.
    ///
    /// An artboard left under `host` by an earlier call is reused, so repeated
    /// calls converge on the same tree. `None` keeps the current style overrides.
    pub fn render(
        &mut self,
        document: &mut Document,
        host: ElementId,
        style_overrides: Option<StyleOverrides>,
    ) -> ChartResult<()> {
        if !document.contains(host) {
            return Err(ChartError::HostUnavailable(format!(
                "host element {host} is not part of the document"
            )));
        }
        let viewport = self.state.viewport;
        self.generate(
            document,
            host,
            None,
            viewport.width,
            viewport.height,
            style_overrides,
        )
    }

    /// Replaces data and dimensions, then reconciles the attached tree by leaf id.
    ///
    /// `None` keeps the current style overrides. On error neither the chart state
    /// nor the document is modified.
    pub fn update(
        &mut self,
        document: &mut Document,
        data: impl Into<ChartData>,
        width: f64,
        height: f64,
        style_overrides: Option<StyleOverrides>,
    ) -> ChartResult<()> {
        let attachment = self.state.attachment.ok_or_else(|| {
            ChartError::HostUnavailable("chart must be rendered before update".to_owned())
        })?;
        self.generate(
            document,
            attachment.host,
            Some(data.into()),
            width,
            height,
            style_overrides,
        )
    }

    fn generate(
        &mut self,
        document: &mut Document,
        host: ElementId,
        data: Option<ChartData>,
        width: f64,
        height: f64,
        style_overrides: Option<StyleOverrides>,
    ) -> ChartResult<()> {
        let viewport = validate_dimensions(width, height, self.config.inset)?;
        let styles = style_overrides.unwrap_or_else(|| self.state.style_overrides.clone());
        let retired: Vec<String> = self
            .state
            .style_overrides
            .keys()
            .filter(|name| !styles.contains_key(*name))
            .cloned()
            .collect();
        let source = data.as_ref().unwrap_or(&self.state.data_source);
        let frame = self.build_frame(source, viewport, &styles, retired)?;

        let mut renderer = DomRenderer::new(document, host);
        renderer.render(&frame)?;
        let artboard = renderer.artboard().ok_or_else(|| {
            ChartError::InvalidData("renderer finished without an artboard".to_owned())
        })?;
        let rendered = renderer.into_rendered_bubbles();

        if let Some(data) = data {
            debug!(empty = data.is_empty(), "chart data replaced");
            self.state.data_source = data;
        }
        self.state.viewport = viewport;
        self.state.style_overrides = styles;
        self.state.attachment = Some(Attachment { host, artboard });
        self.state.rendered = rendered;
        self.state.bubbles = frame.bubbles;
        Ok(())
    }

    pub(super) fn build_frame(
        &self,
        data: &ChartData,
        viewport: Viewport,
        styles: &StyleOverrides,
        retired_styles: Vec<String>,
    ) -> ChartResult<RenderFrame> {
        let mut root = validate_chart_data(data)?;
        root.sort(self.config.sort);
        let pack_box = viewport.inset(self.config.inset)?;
        let packed = self.layout.pack(&root, pack_box, self.config.padding)?;

        let offset = self.config.inset / 2.0;
        let mut frame = RenderFrame::new(viewport, self.config.classes.clone())
            .with_style_overrides(styles.clone())
            .with_retired_styles(retired_styles);
        for node in packed.leaves() {
            if let NodeData::Leaf(record) = &node.data {
                frame = frame.with_bubble(BubblePrimitive::new(
                    record,
                    node.x + offset,
                    node.y + offset,
                    node.r,
                ));
            }
        }

        debug!(
            leaves = frame.bubbles.len(),
            total_value = root.value,
            width = viewport.width,
            height = viewport.height,
            "built bubble frame"
        );
        Ok(frame)
    }
}
