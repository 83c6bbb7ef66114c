use std::fmt;
use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::error::{ChartError, ChartResult};
use crate::interaction::ChartEvent;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Handle to one element slot inside a [`Document`].
///
/// Handles of removed elements are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    text: Option<String>,
    key: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &str, parent: Option<ElementId>) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: IndexMap::new(),
            text: None,
            key: None,
            parent,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Join key bound by the last keyed join, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attributes
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

/// Event as observed by one listener.
#[derive(Debug, Clone, Copy)]
pub struct DomEvent<'a> {
    pub event: &'a ChartEvent,
    pub target: ElementId,
    pub current_target: ElementId,
}

type ListenerCallback = Box<dyn FnMut(&DomEvent<'_>)>;

struct ListenerEntry {
    id: ListenerId,
    target: ElementId,
    event_name: String,
    callback: ListenerCallback,
}

/// In-memory SVG element tree owned by the host.
///
/// A fresh document holds a single `body` element that hosts attach charts to.
pub struct Document {
    slots: Vec<Option<Element>>,
    body: ElementId,
    listeners: Vec<ListenerEntry>,
    next_listener: u64,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.element_count())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Element::new("body", None))],
            body: ElementId(0),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    #[must_use]
    pub fn body(&self) -> ElementId {
        self.body
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn element_mut(&mut self, id: ElementId) -> ChartResult<&mut Element> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| missing_element(id))
    }

    /// Appends a new child element.
    pub fn create_element(&mut self, parent: ElementId, tag: &str) -> ChartResult<ElementId> {
        if !self.contains(parent) {
            return Err(missing_element(parent));
        }
        let id = ElementId(self.slots.len());
        self.slots.push(Some(Element::new(tag, Some(parent))));
        self.element_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Detaches and drops `id` with its whole subtree. Returns `false` when the
    /// element is unknown or is the document body.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        if id == self.body || !self.contains(id) {
            return false;
        }
        if let Some(parent) = self.element(id).and_then(Element::parent) {
            if let Some(parent) = self.slots.get_mut(parent.0).and_then(Option::as_mut) {
                parent.children.retain(|child| *child != id);
            }
        }

        let mut pending = vec![id];
        let mut removed = Vec::new();
        while let Some(current) = pending.pop() {
            if let Some(element) = self.slots.get_mut(current.0).and_then(Option::take) {
                pending.extend(element.children);
                removed.push(current);
            }
        }
        self.listeners
            .retain(|listener| !removed.contains(&listener.target));
        true
    }

    /// Removes every child of `id`, keeping `id` itself.
    pub fn clear_children(&mut self, id: ElementId) -> ChartResult<()> {
        let children = self.element_mut(id)?.children.clone();
        for child in children {
            self.remove_element(child);
        }
        Ok(())
    }

    pub fn set_attribute(
        &mut self,
        id: ElementId,
        name: &str,
        value: impl Into<String>,
    ) -> ChartResult<()> {
        self.element_mut(id)?
            .attributes
            .insert(name.to_owned(), value.into());
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> ChartResult<Option<String>> {
        Ok(self.element_mut(id)?.attributes.shift_remove(name))
    }

    #[must_use]
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id)?.attributes.get(name).map(String::as_str)
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> ChartResult<()> {
        self.element_mut(id)?.text = Some(text.into());
        Ok(())
    }

    pub(crate) fn set_key(&mut self, id: ElementId, key: impl Into<String>) -> ChartResult<()> {
        self.element_mut(id)?.key = Some(key.into());
        Ok(())
    }

    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        match self.element(id) {
            Some(element) => &element.children,
            None => &[],
        }
    }

    /// Direct children of `id` with the given tag, in document order.
    #[must_use]
    pub fn children_by_tag(&self, id: ElementId, tag: &str) -> Vec<ElementId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some_and(|e| e.tag == tag))
            .collect()
    }

    /// Descendants of `root` (excluding `root`) carrying `class`, in document order.
    #[must_use]
    pub fn find_by_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if let Some(element) = self.element(current) {
                if element.has_class(class) {
                    out.push(current);
                }
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }

    /// Moves the listed children to the front of `parent`, in the given order.
    /// Unlisted children keep their relative order behind them.
    pub fn order_children(&mut self, parent: ElementId, ordered: &[ElementId]) -> ChartResult<()> {
        let element = self.element_mut(parent)?;
        let mut rest: Vec<ElementId> = element
            .children
            .iter()
            .copied()
            .filter(|child| !ordered.contains(child))
            .collect();
        let mut children: Vec<ElementId> = ordered
            .iter()
            .copied()
            .filter(|child| element.children.contains(child))
            .collect();
        children.append(&mut rest);
        element.children = children;
        Ok(())
    }

    pub fn add_event_listener<F>(
        &mut self,
        target: ElementId,
        event_name: &str,
        callback: F,
    ) -> ChartResult<ListenerId>
    where
        F: FnMut(&DomEvent<'_>) + 'static,
    {
        if !self.contains(target) {
            return Err(missing_element(target));
        }
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(ListenerEntry {
            id,
            target,
            event_name: event_name.to_owned(),
            callback: Box::new(callback),
        });
        Ok(id)
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        before != self.listeners.len()
    }

    /// Dispatches `event` at `target`, then up the ancestor chain when it bubbles.
    ///
    /// Returns how many listeners were invoked.
    pub fn dispatch_event(&mut self, target: ElementId, event: &ChartEvent) -> ChartResult<usize> {
        if !self.contains(target) {
            return Err(missing_element(target));
        }
        let mut path = vec![target];
        if event.bubbles {
            let mut current = self.element(target).and_then(Element::parent);
            while let Some(id) = current {
                path.push(id);
                current = self.element(id).and_then(Element::parent);
            }
        }

        let name = event.name();
        let mut invoked = 0;
        for current_target in path {
            let dom_event = DomEvent {
                event,
                target,
                current_target,
            };
            for listener in self
                .listeners
                .iter_mut()
                .filter(|listener| listener.target == current_target && listener.event_name == name)
            {
                (listener.callback)(&dom_event);
                invoked += 1;
            }
        }
        Ok(invoked)
    }

    /// Serializes the subtree rooted at `id` as SVG markup.
    pub fn to_svg_string(&self, id: ElementId) -> ChartResult<String> {
        let mut out = String::new();
        self.write_element(id, &mut out)?;
        Ok(out)
    }

    fn write_element(&self, id: ElementId, out: &mut String) -> ChartResult<()> {
        let element = self.element(id).ok_or_else(|| missing_element(id))?;
        out.push('<');
        out.push_str(&element.tag);
        if element.tag == "svg" && !element.attributes.contains_key("xmlns") {
            let _ = write!(out, " xmlns=\"{SVG_NAMESPACE}\"");
        }
        for (name, value) in &element.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape_markup(value));
        }
        if element.children.is_empty() && element.text.is_none() {
            out.push_str("/>");
            return Ok(());
        }
        out.push('>');
        if let Some(text) = &element.text {
            out.push_str(&escape_markup(text));
        }
        for child in &element.children {
            self.write_element(*child, out)?;
        }
        let _ = write!(out, "</{}>", element.tag);
        Ok(())
    }
}

fn missing_element(id: ElementId) -> ChartError {
    ChartError::InvalidData(format!("element {id} is not part of the document"))
}

fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
