use std::collections::HashSet;

use crate::layout::{NodeId, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepSource {
    FirstFrame,
    Timed(u32),
}

impl SweepSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstFrame => "first_frame",
            Self::Timed(_) => "timed",
        }
    }
}

/// True when the box starts above `ratio` of the viewport and has not
/// scrolled out past the top.
pub fn in_view(rect: Rect, viewport_height: f64, ratio: f64) -> bool {
    rect.top < viewport_height * ratio && rect.bottom > 0.0
}

#[derive(Debug, Default)]
pub struct OnceMarker {
    applied: HashSet<NodeId>,
}

impl OnceMarker {
    pub fn mark(&mut self, node: NodeId) -> bool {
        self.applied.insert(node)
    }

    pub fn is_marked(&self, node: NodeId) -> bool {
        self.applied.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }
}

/// Trailing-edge debounce without timer cancellation: every call hands out a
/// new generation and only the latest one is still current when its timer
/// fires.
#[derive(Debug, Default)]
pub struct Debounce {
    generation: u64,
}

impl Debounce {
    pub fn restart(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(top: f64, bottom: f64) -> Rect {
        Rect {
            top,
            bottom,
            left: 0.0,
        }
    }

    #[test]
    fn in_view_uses_ratio_of_viewport_and_positive_bottom() {
        assert!(in_view(rect(700.0, 900.0), 800.0, 0.95));
        assert!(!in_view(rect(760.0, 900.0), 800.0, 0.95));
        assert!(!in_view(rect(720.0, 900.0), 800.0, 0.9));
        assert!(!in_view(rect(-300.0, 0.0), 800.0, 0.95));
    }

    #[test]
    fn marker_reports_first_application_only() {
        let mut marker = OnceMarker::default();

        assert!(marker.mark(NodeId(3)));
        assert!(!marker.mark(NodeId(3)));
        assert!(marker.is_marked(NodeId(3)));
        assert!(!marker.is_marked(NodeId(4)));
        assert_eq!(marker.len(), 1);
    }

    #[test]
    fn debounce_keeps_only_latest_generation() {
        let mut debounce = Debounce::default();

        let first = debounce.restart();
        let second = debounce.restart();

        assert!(!debounce.is_current(first));
        assert!(debounce.is_current(second));
    }
}
