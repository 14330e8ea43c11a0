use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_net::http::Request;
use js_sys::Array;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, AddEventListenerOptions, Document, Element, Event, EventTarget,
    FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlImageElement,
    HtmlInputElement, HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollToOptions, Window,
};

use crate::config::SiteConfig;
use crate::contact::{field, ContactPayload, FormFields};
use crate::coordinator::{ListenTarget, ObserverSpec, Registrations, UiCoordinator, UiEvent};
use crate::error::SubmitError;
use crate::layout::{
    attribute, selector, CounterNode, FilterButton, LazyImage, LinkNode, NodeId, PageLayout,
    ProjectCard, Rect,
};
use crate::log::{log_event, LogLevel};
use crate::page::Page;

const FALLBACK_VIEWPORT_HEIGHT: f64 = 720.0;

thread_local! {
    static RUNTIME: RefCell<Option<Rc<Runtime>>> = const { RefCell::new(None) };
}

struct Session {
    coordinator: UiCoordinator,
    page: DomPage,
}

struct Runtime {
    session: RefCell<Session>,
}

pub fn run() {
    print_branding();

    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        let callback = Closure::once_into_js(start);
        let _ = document.add_event_listener_with_callback(
            "DOMContentLoaded",
            callback.unchecked_ref(),
        );
    } else {
        start();
    }
}

fn start() {
    let Some(win) = window() else {
        return;
    };
    let Some(document) = win.document() else {
        return;
    };

    let config = read_config(&document);
    let mut scanner = Scanner::new(&document);
    let layout = scanner.scan();
    let nodes = scanner.nodes;

    let coordinator = UiCoordinator::new(config.clone(), layout);
    let registrations = coordinator.registrations();

    let runtime = Rc::new_cyclic(|weak: &Weak<Runtime>| Runtime {
        session: RefCell::new(Session {
            coordinator,
            page: DomPage {
                window: win.clone(),
                document: document.clone(),
                nodes,
                runtime: weak.clone(),
            },
        }),
    });

    attach_listeners(&runtime, &registrations, &config);
    for observer_spec in &registrations.observers {
        observe(&runtime, observer_spec, &config);
    }

    RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime.clone()));
    dispatch(&runtime, UiEvent::Ready);
}

fn read_config(document: &Document) -> SiteConfig {
    let body = document.body();
    SiteConfig::from_lookup(|key| {
        body.as_ref()
            .and_then(|body| body.get_attribute(&format!("data-{key}")))
    })
}

/// Routes one event into the coordinator. Callbacks that arrive while a
/// dispatch is already running are re-queued on a zero-delay timer.
fn dispatch(runtime: &Rc<Runtime>, event: UiEvent) -> bool {
    let Ok(mut session) = runtime.session.try_borrow_mut() else {
        schedule(Rc::downgrade(runtime), 0, event);
        return false;
    };

    let Session { coordinator, page } = &mut *session;
    coordinator.dispatch(event, page)
}

fn schedule(runtime: Weak<Runtime>, delay_ms: u32, event: UiEvent) {
    let Some(win) = window() else {
        return;
    };

    let callback = Closure::once_into_js(move || {
        if let Some(runtime) = runtime.upgrade() {
            dispatch(&runtime, event);
        }
    });
    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        i32::try_from(delay_ms).unwrap_or(i32::MAX),
    );
}

fn attach_listeners(runtime: &Rc<Runtime>, registrations: &Registrations, config: &SiteConfig) {
    let session = runtime.session.borrow();

    for listener in &registrations.listeners {
        let target: EventTarget = match listener.target {
            ListenTarget::Window => session.page.window.clone().into(),
            ListenTarget::Node(node) => match session.page.element(node) {
                Some(element) => element.clone().into(),
                None => continue,
            },
        };

        let weak = Rc::downgrade(runtime);
        let route = listener.route;
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let pointer = event
                .dyn_ref::<MouseEvent>()
                .map(|mouse| (f64::from(mouse.client_x()), f64::from(mouse.client_y())));

            if let Some(runtime) = weak.upgrade() {
                if dispatch(&runtime, route.event(pointer)) {
                    event.prevent_default();
                }
            }
        });

        let options = AddEventListenerOptions::new();
        options.set_passive(listener.passive);

        if target
            .add_event_listener_with_callback_and_add_event_listener_options(
                listener.event.as_str(),
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .is_err()
        {
            log_event(
                config,
                LogLevel::Warn,
                "listener_attach_failed",
                json!({ "event": listener.event.as_str() }),
            );
        }

        callback.forget();
    }
}

fn observe(runtime: &Rc<Runtime>, observer_spec: &ObserverSpec, config: &SiteConfig) {
    let observed: Vec<(NodeId, Element)> = {
        let session = runtime.session.borrow();
        observer_spec.nodes
            .iter()
            .filter_map(|node| session.page.element(*node).map(|element| (*node, element.clone())))
            .collect()
    };

    if observed.is_empty() {
        return;
    }

    let weak = Rc::downgrade(runtime);
    let kind = observer_spec.kind;
    let targets = observed.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            let Some(runtime) = weak.upgrade() else {
                return;
            };

            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }

                let target = entry.target();
                if let Some((node, _)) = targets
                    .iter()
                    .find(|(_, element)| element.is_same_node(Some(&*target)))
                {
                    dispatch(&runtime, kind.event(*node));
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(observer_spec.threshold));
    if let Some(root_margin) = observer_spec.root_margin {
        init.set_root_margin(root_margin);
    }

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            for (_, element) in &observed {
                observer.observe(element);
            }
            callback.forget();
        }
        Err(_) => log_event(
            config,
            LogLevel::Warn,
            "intersection_observer_unavailable",
            json!({ "observed": observed.len() }),
        ),
    }
}

async fn send_contact(url: &str, payload: &ContactPayload) -> Result<u16, SubmitError> {
    let response = Request::post(url).json(payload)?.send().await?;
    Ok(response.status())
}

fn print_branding() {
    let lines = [
        (
            "%c CS Infraestructura ",
            "background: #D32F2F; color: white; font-size: 20px; padding: 10px;",
        ),
        (
            "%c Especialistas en Infraestructura Industrial ",
            "color: #424242; font-size: 12px;",
        ),
        (
            "%c ¿Interesado en trabajar con nosotros? Contáctenos: +56 9 4227 6621 ",
            "color: #757575; font-size: 10px;",
        ),
    ];

    for (text, style) in lines {
        web_sys::console::log_2(&JsValue::from_str(text), &JsValue::from_str(style));
    }
}

struct Scanner<'a> {
    document: &'a Document,
    nodes: Vec<Option<Element>>,
}

impl<'a> Scanner<'a> {
    fn new(document: &'a Document) -> Self {
        Self {
            document,
            nodes: Vec::new(),
        }
    }

    fn register(&mut self, element: Element) -> NodeId {
        self.nodes.push(Some(element));
        NodeId(self.nodes.len() - 1)
    }

    fn by_id(&mut self, id: &str) -> Option<(NodeId, Element)> {
        let element = self.document.get_element_by_id(id)?;
        Some((self.register(element.clone()), element))
    }

    fn select(&self, root: Option<&Element>, query: &str) -> Vec<Element> {
        let list = match root {
            Some(root) => root.query_selector_all(query),
            None => self.document.query_selector_all(query),
        };
        let Ok(list) = list else {
            return Vec::new();
        };

        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn register_all(&mut self, query: &str) -> Vec<NodeId> {
        self.select(None, query)
            .into_iter()
            .map(|element| self.register(element))
            .collect()
    }

    fn links(&mut self, query: &str) -> Vec<LinkNode> {
        self.select(None, query)
            .into_iter()
            .map(|element| {
                let href = element.get_attribute(attribute::HREF).unwrap_or_default();
                LinkNode {
                    node: self.register(element),
                    href,
                }
            })
            .collect()
    }

    fn first(&mut self, query: &str) -> Option<NodeId> {
        let element = self.document.query_selector(query).ok().flatten()?;
        Some(self.register(element))
    }

    fn scan(&mut self) -> PageLayout {
        let body = self
            .document
            .body()
            .map(|body| self.register(body.into()));

        let nav = self.by_id(selector::NAV).map(|(node, _)| node);
        let nav_toggle = self.by_id(selector::NAV_TOGGLE).map(|(node, _)| node);
        let (mobile_menu, mobile_menu_links) = match self.by_id(selector::MOBILE_MENU) {
            Some((node, element)) => {
                let links: Vec<NodeId> = self
                    .select(Some(&element), selector::MENU_LINKS)
                    .into_iter()
                    .map(|link| self.register(link))
                    .collect();
                (Some(node), links)
            }
            None => (None, Vec::new()),
        };

        let stagger_groups: Vec<Vec<NodeId>> = self
            .select(None, selector::STAGGER)
            .into_iter()
            .map(|container| {
                let children = container.children();
                (0..children.length())
                    .filter_map(|index| children.item(index))
                    .map(|child| self.register(child))
                    .collect::<Vec<_>>()
            })
            .collect();

        let counters: Vec<CounterNode> = self
            .select(None, selector::COUNTERS)
            .into_iter()
            .map(|element| {
                let raw_target = element.get_attribute(attribute::COUNT).unwrap_or_default();
                CounterNode {
                    node: self.register(element),
                    raw_target,
                }
            })
            .collect();

        let filter_buttons: Vec<FilterButton> = self
            .select(None, selector::FILTER_BUTTONS)
            .into_iter()
            .map(|element| {
                let filter = element.get_attribute(attribute::FILTER).unwrap_or_default();
                FilterButton {
                    node: self.register(element),
                    filter,
                }
            })
            .collect();

        let project_cards: Vec<ProjectCard> = self
            .select(None, selector::PROJECT_CARDS)
            .into_iter()
            .map(|element| {
                let category = element.get_attribute(attribute::CATEGORY).unwrap_or_default();
                ProjectCard {
                    node: self.register(element),
                    category,
                }
            })
            .collect();

        let (contact_form, submit_button) = match self.by_id(selector::CONTACT_FORM) {
            Some((node, element)) => {
                let submit = element
                    .query_selector(selector::SUBMIT_BUTTON)
                    .ok()
                    .flatten()
                    .map(|button| self.register(button));
                (Some(node), submit)
            }
            None => (None, None),
        };

        let lazy_images: Vec<LazyImage> = self
            .select(None, selector::LAZY_IMAGES)
            .into_iter()
            .map(|element| {
                let complete = element
                    .dyn_ref::<HtmlImageElement>()
                    .map(HtmlImageElement::complete)
                    .unwrap_or(true);
                LazyImage {
                    node: self.register(element),
                    complete,
                }
            })
            .collect();

        PageLayout {
            body,
            nav,
            nav_toggle,
            mobile_menu,
            mobile_menu_links,
            nav_links: self.links(selector::NAV_LINKS),
            anchors: self.links(selector::ANCHORS),
            internal_links: self.links(selector::INTERNAL_LINKS),
            page_transition: self.first(selector::PAGE_TRANSITION),
            animated: self.register_all(selector::ANIMATED),
            sections: self.register_all(selector::SECTIONS),
            stagger_groups,
            geo_shapes: self.register_all(selector::GEO_SHAPES),
            scroll_progress: self.first(selector::SCROLL_PROGRESS),
            counters,
            filter_buttons,
            project_cards,
            contact_form,
            submit_button,
            description_field: self.by_id(selector::DESCRIPTION_FIELD).map(|(node, _)| node),
            char_count: self.by_id(selector::CHAR_COUNT).map(|(node, _)| node),
            lazy_images,
            ripple_buttons: self.register_all(selector::RIPPLE_BUTTONS),
        }
    }
}

struct DomPage {
    window: Window,
    document: Document,
    nodes: Vec<Option<Element>>,
    runtime: Weak<Runtime>,
}

impl DomPage {
    fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    fn html_element(&self, node: NodeId) -> Option<&HtmlElement> {
        self.element(node)?.dyn_ref::<HtmlElement>()
    }
}

impl Page for DomPage {
    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.html_element(node) {
            let _ = element.style().set_property(property, value);
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.element(node)
            .map(Element::inner_html)
            .unwrap_or_default()
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        if let Some(element) = self.element(node) {
            element.set_inner_html(html);
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(button) = self
            .element(node)
            .and_then(|element| element.dyn_ref::<HtmlButtonElement>())
        {
            button.set_disabled(disabled);
        }
    }

    fn field_value(&self, node: NodeId) -> String {
        let Some(element) = self.element(node) else {
            return String::new();
        };

        if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else {
            String::new()
        }
    }

    fn form_fields(&self, form: NodeId) -> FormFields {
        let Some(data) = self
            .element(form)
            .and_then(|element| element.dyn_ref::<HtmlFormElement>())
            .and_then(|form| FormData::new_with_form(form).ok())
        else {
            return FormFields::new();
        };

        field::ALL
            .iter()
            .filter_map(|name| {
                data.get(name)
                    .as_string()
                    .map(|value| (name.to_string(), value))
            })
            .collect()
    }

    fn reset_form(&mut self, form: NodeId) {
        if let Some(form) = self
            .element(form)
            .and_then(|element| element.dyn_ref::<HtmlFormElement>())
        {
            form.reset();
        }
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        let Some(element) = self.element(node) else {
            return Rect::default();
        };

        let rect = element.get_bounding_client_rect();
        Rect {
            top: rect.top(),
            bottom: rect.bottom(),
            left: rect.left(),
        }
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(FALLBACK_VIEWPORT_HEIGHT)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_extent(&self) -> f64 {
        let document_height = self
            .document
            .document_element()
            .map(|root| f64::from(root.scroll_height()))
            .unwrap_or(0.0);
        document_height - self.viewport_height()
    }

    fn pathname(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn document_complete(&self) -> bool {
        self.document.ready_state() == "complete"
    }

    fn anchor_target_top(&self, href: &str) -> Option<f64> {
        let target = self.document.query_selector(href).ok().flatten()?;
        Some(target.get_bounding_client_rect().top())
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn navigate(&mut self, href: &str) {
        let _ = self.window.location().set_href(href);
    }

    fn append_styled_span(&mut self, parent: NodeId, css: &str) -> Option<NodeId> {
        let parent = self.element(parent)?.clone();
        let span = self.document.create_element("span").ok()?;
        span.set_attribute("style", css).ok()?;
        parent.append_child(&span).ok()?;

        self.nodes.push(Some(span));
        Some(NodeId(self.nodes.len() - 1))
    }

    fn remove_node(&mut self, node: NodeId) {
        if let Some(element) = self.nodes.get_mut(node.0).and_then(Option::take) {
            element.remove();
        }
    }

    fn ensure_style_sheet(&mut self, id: &str, css: &str) {
        if self.document.get_element_by_id(id).is_some() {
            return;
        }
        let (Some(head), Ok(style)) = (self.document.head(), self.document.create_element("style"))
        else {
            return;
        };

        style.set_id(id);
        style.set_text_content(Some(css));
        let _ = head.append_child(&style);
    }

    fn set_timeout(&mut self, delay_ms: u32, event: UiEvent) {
        schedule(self.runtime.clone(), delay_ms, event);
    }

    fn request_frame(&mut self, event: UiEvent) {
        let runtime = self.runtime.clone();
        let callback = Closure::once_into_js(move || {
            if let Some(runtime) = runtime.upgrade() {
                dispatch(&runtime, event);
            }
        });
        let _ = self.window.request_animation_frame(callback.unchecked_ref());
    }

    fn post_contact(&mut self, url: &str, payload: ContactPayload) {
        let runtime = self.runtime.clone();
        let url = url.to_string();

        spawn_local(async move {
            let result = send_contact(&url, &payload).await;
            if let Some(runtime) = runtime.upgrade() {
                dispatch(&runtime, UiEvent::SubmitFinished(result));
            }
        });
    }
}
