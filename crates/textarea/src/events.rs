//! Viewport resize notifications.

use core::fmt::Debug;

/// A host that can notify subscribers when the viewport is resized.
pub trait ResizeEvents {
    /// Handle identifying one subscription.
    type Listener: Clone + Debug + PartialEq;

    /// Start receiving resize notifications; each call is a new
    /// subscription.
    fn subscribe_resize(&mut self) -> Self::Listener;

    /// Returns whether `listener` was subscribed.
    fn unsubscribe_resize(&mut self, listener: &Self::Listener) -> bool;
}

#[cfg(feature = "headless")]
impl ResizeEvents for headless_dom::Document {
    type Listener = headless_dom::ListenerId;

    fn subscribe_resize(&mut self) -> Self::Listener {
        self.add_resize_listener()
    }

    fn unsubscribe_resize(&mut self, listener: &Self::Listener) -> bool {
        self.remove_resize_listener(*listener)
    }
}
