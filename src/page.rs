use crate::contact::{ContactPayload, FormFields};
use crate::coordinator::UiEvent;
use crate::layout::{NodeId, Rect};

pub trait Page {
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);
    fn set_text(&mut self, node: NodeId, text: &str);
    fn inner_html(&self, node: NodeId) -> String;
    fn set_inner_html(&mut self, node: NodeId, html: &str);
    fn set_disabled(&mut self, node: NodeId, disabled: bool);

    fn field_value(&self, node: NodeId) -> String;
    fn form_fields(&self, form: NodeId) -> FormFields;
    fn reset_form(&mut self, form: NodeId);

    fn bounding_rect(&self, node: NodeId) -> Rect;
    fn viewport_height(&self) -> f64;
    fn scroll_y(&self) -> f64;
    fn scroll_extent(&self) -> f64;
    fn pathname(&self) -> String;
    fn document_complete(&self) -> bool;
    /// Viewport-relative top of the element an in-page `href` points at.
    fn anchor_target_top(&self, href: &str) -> Option<f64>;

    fn smooth_scroll_to(&mut self, top: f64);
    fn navigate(&mut self, href: &str);

    fn append_styled_span(&mut self, parent: NodeId, css: &str) -> Option<NodeId>;
    fn remove_node(&mut self, node: NodeId);
    fn ensure_style_sheet(&mut self, id: &str, css: &str);

    fn set_timeout(&mut self, delay_ms: u32, event: UiEvent);
    fn request_frame(&mut self, event: UiEvent);
    /// Sends the payload; the outcome arrives as [`UiEvent::SubmitFinished`].
    fn post_contact(&mut self, url: &str, payload: ContactPayload);
}
