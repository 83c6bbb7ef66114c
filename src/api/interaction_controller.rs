use tracing::{debug, trace};

use crate::core::{LeafId, PackLayout};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    ChartEvent, NodeEventDetail, NodePresentation, PointerInput, PointerKind,
};
use crate::render::{Document, ElementId};

use super::BubbleChart;

impl<L: PackLayout> BubbleChart<L> {
    /// Base unit used to offset reported cursor positions.
    #[must_use]
    pub fn artboard_unit(&self) -> f64 {
        self.config.artboard_unit
    }

    /// Handles pointer input aimed at `target`.
    ///
    /// When `target` is one of this chart's circles, the circle's presentation is
    /// transitioned and the matching custom event is dispatched on the artboard,
    /// bubbling to its ancestors. Returns the dispatched event, or `None` when
    /// `target` is not a chart circle.
    pub fn handle_pointer(
        &mut self,
        document: &mut Document,
        target: ElementId,
        input: PointerInput,
    ) -> ChartResult<Option<ChartEvent>> {
        let attachment = self.state.attachment.ok_or_else(|| {
            ChartError::HostUnavailable("chart must be rendered before interaction".to_owned())
        })?;
        if !document.contains(attachment.artboard) {
            return Err(ChartError::HostUnavailable(
                "artboard is no longer part of the document".to_owned(),
            ));
        }

        let Some(index) = self
            .state
            .rendered
            .iter()
            .position(|bubble| bubble.circle == target)
        else {
            trace!(%target, "pointer input outside chart circles");
            return Ok(None);
        };
        let Some(bubble) = self.state.bubbles.get(index) else {
            return Ok(None);
        };

        let classes = &self.config.classes;
        let current = NodePresentation::from_class_attr(
            document.attribute(target, "class"),
            &classes.active,
        );
        let next = current.transition(input.kind);
        if next != current {
            document.set_attribute(
                target,
                "class",
                next.class_attr(&classes.node, &classes.active),
            )?;
        }

        let detail = NodeEventDetail {
            id: bubble.id.clone(),
            label: bubble.label.clone(),
            value: bubble.value,
            xy: input.cursor_position(self.config.artboard_unit),
        };
        let event = match input.kind {
            PointerKind::Click => ChartEvent::node_click(detail),
            PointerKind::Enter => ChartEvent::node_mouse_over(detail),
            PointerKind::Leave => ChartEvent::node_mouse_out(),
        };

        let listeners = document.dispatch_event(attachment.artboard, &event)?;
        debug!(
            event = event.name(),
            id = %bubble.id,
            listeners,
            "dispatched chart event"
        );
        Ok(Some(event))
    }

    /// Convenience wrapper resolving the circle of leaf `id` first.
    pub fn handle_pointer_on_leaf(
        &mut self,
        document: &mut Document,
        id: &LeafId,
        input: PointerInput,
    ) -> ChartResult<Option<ChartEvent>> {
        match self.leaf_circle(id) {
            Some(circle) => self.handle_pointer(document, circle, input),
            None => Ok(None),
        }
    }
}
