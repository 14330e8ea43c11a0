use std::collections::{BTreeSet, HashMap, HashSet};

use crate::contact::{ContactPayload, FormFields};
use crate::coordinator::{UiCoordinator, UiEvent};
use crate::layout::{NodeId, Rect};
use crate::page::Page;

#[derive(Default)]
pub struct FakePage {
    pub now_ms: u64,
    timers: Vec<(u64, u64, UiEvent)>,
    timer_seq: u64,
    frames: Vec<UiEvent>,

    pub classes: HashMap<NodeId, BTreeSet<String>>,
    pub class_adds: HashMap<(NodeId, String), usize>,
    pub styles: HashMap<(NodeId, String), String>,
    pub text: HashMap<NodeId, String>,
    pub html: HashMap<NodeId, String>,
    pub disabled: HashSet<NodeId>,
    pub values: HashMap<NodeId, String>,
    pub fields: FormFields,
    pub form_resets: usize,

    pub rects: HashMap<NodeId, Rect>,
    pub viewport_height: f64,
    pub scroll_y: f64,
    pub scroll_extent: f64,
    pub pathname: String,
    pub complete: bool,
    pub anchor_tops: HashMap<String, f64>,

    pub scrolled_to: Vec<f64>,
    pub navigations: Vec<String>,
    pub posts: Vec<(String, ContactPayload)>,
    pub style_sheets: HashMap<String, String>,
    pub spans: Vec<(NodeId, NodeId, String)>,
    pub removed: Vec<NodeId>,
    next_span: usize,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            viewport_height: 800.0,
            pathname: "/index.html".to_string(),
            next_span: 10_000,
            ..Self::default()
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes
            .get(&node)
            .is_some_and(|classes| classes.contains(class))
    }

    pub fn adds(&self, node: NodeId, class: &str) -> usize {
        self.class_adds
            .get(&(node, class.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.styles
            .get(&(node, property.to_string()))
            .map(String::as_str)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn flush_frames(&mut self, coordinator: &mut UiCoordinator) {
        while !self.frames.is_empty() {
            let batch = std::mem::take(&mut self.frames);
            for event in batch {
                coordinator.dispatch(event, self);
            }
        }
    }

    pub fn send(&mut self, coordinator: &mut UiCoordinator, event: UiEvent) -> bool {
        let prevent_default = coordinator.dispatch(event, self);
        self.flush_frames(coordinator);
        prevent_default
    }

    /// Advances the clock, firing due timers in order and frames after each.
    pub fn advance(&mut self, coordinator: &mut UiCoordinator, ms: u64) {
        let until = self.now_ms + ms;
        self.flush_frames(coordinator);

        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, (due, _, _))| *due <= until)
                .min_by_key(|(_, (due, seq, _))| (*due, *seq))
                .map(|(index, _)| index);

            let Some(index) = next else {
                break;
            };

            let (due, _, event) = self.timers.remove(index);
            self.now_ms = due;
            coordinator.dispatch(event, self);
            self.flush_frames(coordinator);
        }

        self.now_ms = until;
    }
}

impl Page for FakePage {
    fn add_class(&mut self, node: NodeId, class: &str) {
        self.classes.entry(node).or_default().insert(class.to_string());
        *self.class_adds.entry((node, class.to_string())).or_default() += 1;
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(classes) = self.classes.get_mut(&node) {
            classes.remove(class);
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.styles
            .insert((node, property.to_string()), value.to_string());
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.text.insert(node, text.to_string());
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.html.get(&node).cloned().unwrap_or_default()
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        self.html.insert(node, html.to_string());
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if disabled {
            self.disabled.insert(node);
        } else {
            self.disabled.remove(&node);
        }
    }

    fn field_value(&self, node: NodeId) -> String {
        self.values.get(&node).cloned().unwrap_or_default()
    }

    fn form_fields(&self, _form: NodeId) -> FormFields {
        self.fields.clone()
    }

    fn reset_form(&mut self, _form: NodeId) {
        self.form_resets += 1;
        self.fields.clear();
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.rects.get(&node).copied().unwrap_or(Rect {
            top: 5_000.0,
            bottom: 5_200.0,
            left: 0.0,
        })
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_extent(&self) -> f64 {
        self.scroll_extent
    }

    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn document_complete(&self) -> bool {
        self.complete
    }

    fn anchor_target_top(&self, href: &str) -> Option<f64> {
        self.anchor_tops.get(href).copied()
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        self.scrolled_to.push(top);
    }

    fn navigate(&mut self, href: &str) {
        self.navigations.push(href.to_string());
    }

    fn append_styled_span(&mut self, parent: NodeId, css: &str) -> Option<NodeId> {
        let span = NodeId(self.next_span);
        self.next_span += 1;
        self.spans.push((parent, span, css.to_string()));
        Some(span)
    }

    fn remove_node(&mut self, node: NodeId) {
        self.removed.push(node);
    }

    fn ensure_style_sheet(&mut self, id: &str, css: &str) {
        self.style_sheets
            .entry(id.to_string())
            .or_insert_with(|| css.to_string());
    }

    fn set_timeout(&mut self, delay_ms: u32, event: UiEvent) {
        self.timer_seq += 1;
        self.timers
            .push((self.now_ms + u64::from(delay_ms), self.timer_seq, event));
    }

    fn request_frame(&mut self, event: UiEvent) {
        self.frames.push(event);
    }

    fn post_contact(&mut self, url: &str, payload: ContactPayload) {
        self.posts.push((url.to_string(), payload));
    }
}
