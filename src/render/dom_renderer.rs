use tracing::debug;

use crate::core::LeafId;
use crate::error::{ChartError, ChartResult};
use crate::interaction::NodePresentation;
use crate::render::document::{Document, ElementId};
use crate::render::join::{JoinOutcome, join_indexed, join_keyed};
use crate::render::{BubblePrimitive, RenderFrame, Renderer};

/// Element handles of one rendered bubble, valid until the next pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBubble {
    pub id: LeafId,
    pub group: ElementId,
    pub circle: ElementId,
    pub label: ElementId,
}

/// Renderer that reconciles frames into a [`Document`] under a host element.
///
/// Frame and host are checked before the first mutation, so a rejected frame
/// leaves the document untouched.
#[derive(Debug)]
pub struct DomRenderer<'d> {
    document: &'d mut Document,
    host: ElementId,
    artboard: Option<ElementId>,
    bubbles: Vec<RenderedBubble>,
    last_join: JoinOutcome,
}

impl<'d> DomRenderer<'d> {
    #[must_use]
    pub fn new(document: &'d mut Document, host: ElementId) -> Self {
        Self {
            document,
            host,
            artboard: None,
            bubbles: Vec::new(),
            last_join: JoinOutcome::default(),
        }
    }

    #[must_use]
    pub fn artboard(&self) -> Option<ElementId> {
        self.artboard
    }

    #[must_use]
    pub fn rendered_bubbles(&self) -> &[RenderedBubble] {
        &self.bubbles
    }

    /// Enter/update/exit counts of the last leaf-group join.
    #[must_use]
    pub fn last_join(&self) -> &JoinOutcome {
        &self.last_join
    }

    #[must_use]
    pub fn into_rendered_bubbles(self) -> Vec<RenderedBubble> {
        self.bubbles
    }

    fn reconcile_artboard(&mut self, frame: &RenderFrame) -> ChartResult<ElementId> {
        let artboard = join_indexed(self.document, self.host, "svg", 1)?
            .elements
            .first()
            .copied()
            .ok_or_else(|| {
                ChartError::InvalidData("artboard join produced no element".to_owned())
            })?;
        self.document
            .set_attribute(artboard, "viewBox", frame.viewport.view_box())?;
        self.document
            .set_attribute(artboard, "class", frame.classes.artboard.as_str())?;
        Ok(artboard)
    }

    fn reconcile_bubble(
        &mut self,
        group: ElementId,
        bubble: &BubblePrimitive,
        frame: &RenderFrame,
    ) -> ChartResult<RenderedBubble> {
        let document = &mut *self.document;
        document.set_attribute(group, "transform", bubble.transform())?;

        let circle = single_child(document, group, "circle")?;
        let presentation = NodePresentation::from_class_attr(
            document.attribute(circle, "class"),
            &frame.classes.active,
        );
        document.set_attribute(
            circle,
            "class",
            presentation.class_attr(&frame.classes.node, &frame.classes.active),
        )?;
        document.set_attribute(circle, "r", bubble.r.to_string())?;
        for name in &frame.retired_styles {
            document.remove_attribute(circle, name)?;
        }
        for (name, value) in &frame.style_overrides {
            document.set_attribute(circle, name, value.as_str())?;
        }

        let label = single_child(document, group, "text")?;
        document.set_attribute(label, "class", frame.classes.label.as_str())?;
        document.set_attribute(label, "x", "0")?;
        document.set_attribute(label, "y", "0")?;
        let spans = join_indexed(document, label, "tspan", bubble.lines.len())?;
        for (span, line) in spans.elements.iter().zip(&bubble.lines) {
            document.set_text(*span, line.text.as_str())?;
            document.set_attribute(*span, "x", "0")?;
            document.set_attribute(*span, "dy", line.dy.as_str())?;
        }

        Ok(RenderedBubble {
            id: bubble.id.clone(),
            group,
            circle,
            label,
        })
    }
}

impl Renderer for DomRenderer<'_> {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        if !self.document.contains(self.host) {
            return Err(ChartError::HostUnavailable(format!(
                "host element {} is not part of the document",
                self.host
            )));
        }

        let artboard = self.reconcile_artboard(frame)?;
        let keys: Vec<String> = frame.bubbles.iter().map(|b| b.id.join_key()).collect();
        let join = join_keyed(self.document, artboard, "g", &keys)?;

        let mut rendered = Vec::with_capacity(frame.bubbles.len());
        for (group, bubble) in join.elements.iter().zip(&frame.bubbles) {
            rendered.push(self.reconcile_bubble(*group, bubble, frame)?);
        }

        debug!(
            entered = join.entered,
            updated = join.updated,
            exited = join.exited,
            "reconciled bubble groups"
        );
        self.artboard = Some(artboard);
        self.bubbles = rendered;
        self.last_join = join;
        Ok(())
    }
}

fn single_child(document: &mut Document, parent: ElementId, tag: &str) -> ChartResult<ElementId> {
    join_indexed(document, parent, tag, 1)?
        .elements
        .first()
        .copied()
        .ok_or_else(|| ChartError::InvalidData(format!("`{tag}` join produced no element")))
}
