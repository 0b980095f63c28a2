//! Per-thread stack of output captures for renders in progress
//!
//! Every render pushes a frame and pops it when its callback returns. Text a
//! callback writes, and text printed by components rendered inside it, lands
//! in the innermost frame. The stack length is the current nesting depth, so
//! nested renders are counted however they were started.

use std::cell::RefCell;

thread_local! {
    /// Output buffers of the renders running on this thread, innermost last.
    static FRAMES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Number of renders currently running on this thread
pub(crate) fn depth() -> usize {
    FRAMES.with(|frames| frames.borrow().len())
}

/// Whether a render is running on this thread
pub(crate) fn is_active() -> bool {
    depth() > 0
}

/// Append text to the innermost capture; no-op outside a render
pub(crate) fn write(text: &str) {
    FRAMES.with(|frames| {
        if let Some(frame) = frames.borrow_mut().last_mut() {
            frame.push_str(text);
        }
    })
}

/// Copy of the innermost capture
pub(crate) fn current() -> String {
    FRAMES.with(|frames| frames.borrow().last().cloned().unwrap_or_default())
}

/// An open capture frame; dropping it without [`Frame::finish`] discards
/// whatever was captured
pub(crate) struct Frame {
    open: bool,
}

impl Frame {
    pub(crate) fn enter() -> Self {
        FRAMES.with(|frames| frames.borrow_mut().push(String::new()));
        Frame { open: true }
    }

    /// Close the frame and take its output
    pub(crate) fn finish(mut self) -> String {
        self.open = false;
        FRAMES.with(|frames| frames.borrow_mut().pop().unwrap_or_default())
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        if self.open {
            FRAMES.with(|frames| {
                frames.borrow_mut().pop();
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_frames() {
        assert_eq!(depth(), 0);
        let outer = Frame::enter();
        write("a");
        let inner = Frame::enter();
        assert_eq!(depth(), 2);
        write("b");
        assert_eq!(inner.finish(), "b");
        write("c");
        assert_eq!(current(), "ac");
        assert_eq!(outer.finish(), "ac");
        assert!(!is_active());
    }

    #[test]
    fn test_dropped_frame_is_discarded() {
        let outer = Frame::enter();
        write("kept");
        {
            let _inner = Frame::enter();
            write("lost");
        }
        assert_eq!(outer.finish(), "kept");
    }

    #[test]
    fn test_write_outside_render_is_ignored() {
        write("nowhere");
        assert_eq!(depth(), 0);
        assert_eq!(current(), "");
    }
}
