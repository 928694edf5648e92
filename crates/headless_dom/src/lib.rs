//! An in-memory, interactive document for measuring form controls.
//!
//! `Document` keeps an arena DOM (`html > body > ...`), resolves a small
//! computed style per element, and lays out textarea text so it can answer
//! `scroll_height` the way a browser would. It implements
//! [`autosize::RenderEnvironment`], which makes it the rendering backend for
//! tests and for the command-line measurer.

#![forbid(unsafe_code)]

pub mod computed;
pub mod inline_style;
pub mod layout;
pub mod text;

pub use computed::{ComputedStyle, DEFAULT_TEXTAREA_WIDTH, ResolveContext};
pub use indextree::NodeId;
pub use inline_style::{Declaration, InlineStyle, parse_style_attribute};

use anyhow::{Error, anyhow};
use autosize::{RenderEnvironment, StylePriority};
use indextree::Arena;
use layout::UsedBox;
use log::{trace, warn};
use std::collections::HashMap;

const DEFAULT_VIEWPORT_WIDTH: f32 = 1024.0;
const DEFAULT_ROOT_FONT_SIZE: f32 = 16.0;

#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    #[default]
    Document,
    Element { tag: String },
}

#[derive(Debug, Clone, Default)]
pub struct DomNode {
    pub kind: NodeKind,
    attributes: HashMap<String, String>,
    style: InlineStyle,
    /// Form value of `textarea`/`input` elements.
    value: String,
}

/// Handle of a subscribed resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug)]
pub struct Document {
    arena: Arena<DomNode>,
    root: NodeId,
    body: NodeId,
    interactive: bool,
    legacy_width_reporting: bool,
    root_font_size: f32,
    viewport_width: f32,
    resize_listeners: Vec<ListenerId>,
    next_listener: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An interactive document containing `<html><body></body></html>`.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DomNode::default());
        let html = arena.new_node(element_node("html"));
        let body = arena.new_node(element_node("body"));
        root.append(html, &mut arena);
        html.append(body, &mut arena);
        Self {
            arena,
            root,
            body,
            interactive: true,
            legacy_width_reporting: false,
            root_font_size: DEFAULT_ROOT_FONT_SIZE,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            resize_listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// A document that cannot render, like one produced on a server.
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            ..Self::new()
        }
    }

    /// Emulate engines that report content width for `border-box` elements.
    #[must_use]
    pub fn with_legacy_width_reporting(mut self, enabled: bool) -> Self {
        self.legacy_width_reporting = enabled;
        self
    }

    #[must_use]
    pub fn with_root_font_size(mut self, font_size: f32) -> Self {
        self.root_font_size = font_size;
        self
    }

    pub const fn body(&self) -> NodeId {
        self.body
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(element_node(tag))
    }

    /// Append `child` as the last child of `parent`, moving it if it already
    /// has a parent.
    ///
    /// # Errors
    /// Fails when either node is unknown, or when `child` is `parent` or one of
    /// its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        self.node(parent)?;
        self.node(child)?;
        if parent.ancestors(&self.arena).any(|ancestor| ancestor == child) {
            return Err(anyhow!("cannot append {child:?} inside its own subtree"));
        }
        child.detach(&mut self.arena);
        parent
            .checked_append(child, &mut self.arena)
            .map_err(|err| anyhow!("cannot append {child:?} to {parent:?}: {err:?}"))
    }

    /// Remove `node` (and its subtree) from its parent.
    pub fn detach(&mut self, node: NodeId) {
        node.detach(&mut self.arena);
    }

    /// Whether `node` is connected to the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.node(node).is_ok() && node.ancestors(&self.arena).any(|ancestor| ancestor == self.root)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).ok()?.kind {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Document => None,
        }
    }

    /// Set an attribute. `style` replaces the inline declaration block and
    /// `value` the form value.
    ///
    /// # Errors
    /// Fails when `node` is unknown.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), Error> {
        let name = name.to_ascii_lowercase();
        let data = self.node_mut(node)?;
        match name.as_str() {
            "style" => data.style = InlineStyle::parse(value),
            "value" => data.value = value.to_owned(),
            _ => {}
        }
        data.attributes.insert(name, value.to_owned());
        Ok(())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)
            .ok()?
            .attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn inline_style(&self, node: NodeId) -> Option<&InlineStyle> {
        self.node(node).ok().map(|data| &data.style)
    }

    /// CSSOM `element.style.setProperty`.
    ///
    /// # Errors
    /// Fails when `node` is unknown.
    pub fn set_inline_style_property(
        &mut self,
        node: NodeId,
        name: &str,
        value: &str,
        priority: StylePriority,
    ) -> Result<(), Error> {
        self.node_mut(node)?.style.set_property(name, value, priority);
        Ok(())
    }

    /// Current form value; empty for unknown nodes.
    pub fn form_value(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |data| data.value.as_str())
    }

    /// Replace the form value.
    ///
    /// # Errors
    /// Fails when `node` is unknown.
    pub fn set_form_value(&mut self, node: NodeId, value: &str) -> Result<(), Error> {
        self.node_mut(node)?.value = value.to_owned();
        Ok(())
    }

    /// The computed style of `node`.
    ///
    /// `None` when the document does not render; an all-empty style when the
    /// node is not connected.
    pub fn computed_style_of(&self, node: NodeId) -> Option<ComputedStyle> {
        if !self.interactive {
            return None;
        }
        if !self.is_connected(node) {
            return Some(ComputedStyle::detached());
        }
        let data = self.node(node).ok()?;
        let tag = match &data.kind {
            NodeKind::Element { tag } => tag.as_str(),
            NodeKind::Document => return Some(ComputedStyle::detached()),
        };
        Some(computed::resolve(tag, &data.style, self.resolve_context(self.legacy_width_reporting)))
    }

    /// Scroll height of a form control's content, rounded to whole CSS
    /// pixels like `Element.scrollHeight`; `0` when disconnected.
    pub fn scroll_height_of(&self, node: NodeId) -> f32 {
        if !self.interactive || !self.is_connected(node) {
            return 0.0;
        }
        let Ok(data) = self.node(node) else {
            return 0.0;
        };
        let NodeKind::Element { tag } = &data.kind else {
            return 0.0;
        };
        // Layout always works with the true width, whatever the style reports.
        let style = computed::resolve(tag, &data.style, self.resolve_context(false));
        let used = UsedBox::from_style(&style, style.px("width"));
        let height = layout::scroll_height(&style, &used, &data.value).round();
        trace!("headless: scroll height of {node:?} is {height}");
        height
    }

    /// Subscribe to viewport resizes.
    pub fn add_resize_listener(&mut self) -> ListenerId {
        let listener = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.resize_listeners.push(listener);
        listener
    }

    /// Unsubscribe; returns whether the listener was subscribed.
    pub fn remove_resize_listener(&mut self, listener: ListenerId) -> bool {
        let before = self.resize_listeners.len();
        self.resize_listeners.retain(|subscribed| *subscribed != listener);
        before != self.resize_listeners.len()
    }

    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.len()
    }

    /// Resize the viewport and return the listeners to notify.
    pub fn set_viewport_width(&mut self, width: f32) -> Vec<ListenerId> {
        self.viewport_width = width;
        self.resize_listeners.clone()
    }

    pub const fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    const fn resolve_context(&self, legacy_width_reporting: bool) -> ResolveContext {
        ResolveContext {
            root_font_size: self.root_font_size,
            viewport_width: self.viewport_width,
            legacy_width_reporting,
        }
    }

    fn node(&self, node: NodeId) -> Result<&DomNode, Error> {
        self.arena
            .get(node)
            .filter(|entry| !entry.is_removed())
            .map(indextree::Node::get)
            .ok_or_else(|| anyhow!("unknown node {node:?}"))
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut DomNode, Error> {
        self.arena
            .get_mut(node)
            .filter(|entry| !entry.is_removed())
            .map(indextree::Node::get_mut)
            .ok_or_else(|| anyhow!("unknown node {node:?}"))
    }
}

fn element_node(tag: &str) -> DomNode {
    DomNode {
        kind: NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
        },
        ..DomNode::default()
    }
}

impl RenderEnvironment for Document {
    type Element = NodeId;
    type Style = ComputedStyle;

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn computed_style(&self, element: &NodeId) -> Option<ComputedStyle> {
        self.computed_style_of(*element)
    }

    fn reports_content_width_for_border_box(&self) -> bool {
        self.legacy_width_reporting
    }

    fn create_textarea(&mut self) -> NodeId {
        self.create_element("textarea")
    }

    fn is_attached(&self, element: &NodeId) -> bool {
        self.is_connected(*element)
    }

    fn append_to_body(&mut self, element: &NodeId) -> bool {
        match self.append_child(self.body, *element) {
            Ok(()) => true,
            Err(err) => {
                warn!("headless: {err}");
                false
            }
        }
    }

    fn set_style_property(&mut self, element: &NodeId, name: &str, value: &str, priority: StylePriority) {
        if let Err(err) = self.set_inline_style_property(*element, name, value, priority) {
            warn!("headless: {err}");
        }
    }

    fn value(&self, element: &NodeId) -> String {
        self.form_value(*element).to_owned()
    }

    fn placeholder(&self, element: &NodeId) -> String {
        self.attribute(*element, "placeholder").unwrap_or_default().to_owned()
    }

    fn set_value(&mut self, element: &NodeId, value: &str) {
        if let Err(err) = self.set_form_value(*element, value) {
            warn!("headless: {err}");
        }
    }

    fn scroll_height(&self, element: &NodeId) -> f32 {
        self.scroll_height_of(*element)
    }
}
