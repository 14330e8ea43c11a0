use serde_json::json;

use crate::config::{
    SiteConfig, REVEAL_OBSERVER_ROOT_MARGIN, REVEAL_OBSERVER_THRESHOLD, REVEAL_SWEEP_DELAYS_MS,
    SCROLL_FALLBACK_VIEWPORT_RATIO, SECTION_OBSERVER_THRESHOLD, SWEEP_VIEWPORT_RATIO,
};
use crate::contact::{self, ContactPayload, SubmitFlow, SubmitPhase};
use crate::counter::{self, CounterAnimation};
use crate::effects;
use crate::error::SubmitError;
use crate::filter::{self, CardTransition, FilterState};
use crate::layout::{class, NodeId, PageLayout};
use crate::log::{log_event, LogLevel};
use crate::nav::{self, FrameTicker, MobileMenu};
use crate::page::Page;
use crate::reveal::{in_view, Debounce, OnceMarker, SweepSource};

#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    Ready,
    FirstFrame,
    Sweep(SweepSource),
    Reveal(NodeId),
    Intersected(NodeId),
    SectionIntersected(NodeId),
    Scroll,
    ScrollSettled(u64),
    NavFrame,
    WindowLoaded,
    StartCounters,
    CounterTick(usize),
    MenuToggled,
    MenuLinkClicked,
    AnchorClicked(usize),
    InternalLinkClicked(usize),
    Navigate(String),
    FilterClicked(usize),
    CardShow { card: usize, generation: u64 },
    CardHide { card: usize, generation: u64 },
    DescriptionInput,
    SubmitRequested,
    SubmitFinished(Result<u16, SubmitError>),
    SubmitSettled,
    RippleClicked { button: NodeId, client_x: f64, client_y: f64 },
    RippleExpired(NodeId),
    ImageLoaded(NodeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenTarget {
    Window,
    Node(NodeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomEvent {
    Scroll,
    Load,
    Click,
    Input,
    Submit,
}

impl DomEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Load => "load",
            Self::Click => "click",
            Self::Input => "input",
            Self::Submit => "submit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Scroll,
    WindowLoaded,
    MenuToggle,
    MenuLink,
    Anchor(usize),
    InternalLink(usize),
    FilterButton(usize),
    DescriptionInput,
    Submit,
    Ripple(NodeId),
    ImageLoaded(NodeId),
}

impl Route {
    /// `pointer` carries the client coordinates of mouse events.
    pub fn event(self, pointer: Option<(f64, f64)>) -> UiEvent {
        match self {
            Self::Scroll => UiEvent::Scroll,
            Self::WindowLoaded => UiEvent::WindowLoaded,
            Self::MenuToggle => UiEvent::MenuToggled,
            Self::MenuLink => UiEvent::MenuLinkClicked,
            Self::Anchor(index) => UiEvent::AnchorClicked(index),
            Self::InternalLink(index) => UiEvent::InternalLinkClicked(index),
            Self::FilterButton(index) => UiEvent::FilterClicked(index),
            Self::DescriptionInput => UiEvent::DescriptionInput,
            Self::Submit => UiEvent::SubmitRequested,
            Self::Ripple(button) => {
                let (client_x, client_y) = pointer.unwrap_or_default();
                UiEvent::RippleClicked {
                    button,
                    client_x,
                    client_y,
                }
            }
            Self::ImageLoaded(node) => UiEvent::ImageLoaded(node),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Listener {
    pub target: ListenTarget,
    pub event: DomEvent,
    pub route: Route,
    pub passive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObserverKind {
    Reveal,
    Section,
}

impl ObserverKind {
    pub fn event(self, node: NodeId) -> UiEvent {
        match self {
            Self::Reveal => UiEvent::Intersected(node),
            Self::Section => UiEvent::SectionIntersected(node),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObserverSpec {
    pub kind: ObserverKind,
    pub threshold: f64,
    pub root_margin: Option<&'static str>,
    pub nodes: Vec<NodeId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registrations {
    pub listeners: Vec<Listener>,
    pub observers: Vec<ObserverSpec>,
}

impl Registrations {
    fn listen(&mut self, target: ListenTarget, event: DomEvent, route: Route) {
        self.listeners.push(Listener {
            target,
            event,
            route,
            passive: event == DomEvent::Scroll,
        });
    }
}

pub struct UiCoordinator {
    config: SiteConfig,
    layout: PageLayout,
    revealed: OnceMarker,
    sections_shown: OnceMarker,
    scroll_settle: Debounce,
    nav_ticker: FrameTicker,
    menu: MobileMenu,
    counted: OnceMarker,
    counters: Vec<Option<CounterAnimation>>,
    scroll_started: bool,
    filter: FilterState,
    submit: SubmitFlow,
}

impl UiCoordinator {
    pub fn new(config: SiteConfig, layout: PageLayout) -> Self {
        let filter = FilterState::new(layout.project_cards.len());
        let counters = vec![None; layout.counters.len()];

        Self {
            config,
            layout,
            revealed: OnceMarker::default(),
            sections_shown: OnceMarker::default(),
            scroll_settle: Debounce::default(),
            nav_ticker: FrameTicker::default(),
            menu: MobileMenu::default(),
            counted: OnceMarker::default(),
            counters,
            scroll_started: false,
            filter,
            submit: SubmitFlow::default(),
        }
    }

    pub fn registrations(&self) -> Registrations {
        let layout = &self.layout;
        let mut registrations = Registrations::default();

        registrations.listen(ListenTarget::Window, DomEvent::Scroll, Route::Scroll);
        registrations.listen(ListenTarget::Window, DomEvent::Load, Route::WindowLoaded);

        if let (Some(toggle), Some(_)) = (layout.nav_toggle, layout.mobile_menu) {
            registrations.listen(ListenTarget::Node(toggle), DomEvent::Click, Route::MenuToggle);
            for link in &layout.mobile_menu_links {
                registrations.listen(ListenTarget::Node(*link), DomEvent::Click, Route::MenuLink);
            }
        }

        for (index, anchor) in layout.anchors.iter().enumerate() {
            registrations.listen(
                ListenTarget::Node(anchor.node),
                DomEvent::Click,
                Route::Anchor(index),
            );
        }

        for (index, link) in layout.internal_links.iter().enumerate() {
            registrations.listen(
                ListenTarget::Node(link.node),
                DomEvent::Click,
                Route::InternalLink(index),
            );
        }

        for (index, button) in layout.filter_buttons.iter().enumerate() {
            registrations.listen(
                ListenTarget::Node(button.node),
                DomEvent::Click,
                Route::FilterButton(index),
            );
        }

        if let (Some(field), Some(_)) = (layout.description_field, layout.char_count) {
            registrations.listen(
                ListenTarget::Node(field),
                DomEvent::Input,
                Route::DescriptionInput,
            );
        }

        if let Some(form) = layout.contact_form {
            registrations.listen(ListenTarget::Node(form), DomEvent::Submit, Route::Submit);
        }

        for button in &layout.ripple_buttons {
            registrations.listen(ListenTarget::Node(*button), DomEvent::Click, Route::Ripple(*button));
        }

        for image in layout.lazy_images.iter().filter(|image| !image.complete) {
            registrations.listen(
                ListenTarget::Node(image.node),
                DomEvent::Load,
                Route::ImageLoaded(image.node),
            );
        }

        registrations.observers.push(ObserverSpec {
            kind: ObserverKind::Reveal,
            threshold: REVEAL_OBSERVER_THRESHOLD,
            root_margin: Some(REVEAL_OBSERVER_ROOT_MARGIN),
            nodes: layout.animated.clone(),
        });
        registrations.observers.push(ObserverSpec {
            kind: ObserverKind::Section,
            threshold: SECTION_OBSERVER_THRESHOLD,
            root_margin: None,
            nodes: layout.sections.clone(),
        });

        registrations
    }

    /// Single entry point for every page callback. Returns `true` when the
    /// browser's default action for the triggering event must be suppressed.
    pub fn dispatch(&mut self, event: UiEvent, page: &mut dyn Page) -> bool {
        match event {
            UiEvent::Ready => self.on_ready(page),
            UiEvent::FirstFrame => {
                if let Some(body) = self.layout.body {
                    page.add_class(body, class::JS_READY);
                }
                page.request_frame(UiEvent::Sweep(SweepSource::FirstFrame));
            }
            UiEvent::Sweep(source) => self.sweep(source, page),
            UiEvent::Reveal(node) => self.reveal(node, page),
            UiEvent::Intersected(node) => {
                if !self.revealed.is_marked(node) {
                    page.request_frame(UiEvent::Reveal(node));
                }
            }
            UiEvent::SectionIntersected(node) => {
                if self.sections_shown.mark(node) {
                    page.add_class(node, class::SECTION_VISIBLE);
                }
            }
            UiEvent::Scroll => self.on_scroll(page),
            UiEvent::ScrollSettled(generation) => {
                if self.scroll_settle.is_current(generation) {
                    self.scroll_fallback(page);
                }
            }
            UiEvent::NavFrame => {
                let scroll_y = self.nav_ticker.take();
                self.update_nav(scroll_y, page);
            }
            UiEvent::WindowLoaded => {
                page.set_timeout(self.config.counter_grace_ms, UiEvent::StartCounters);
            }
            UiEvent::StartCounters => self.start_counters(page),
            UiEvent::CounterTick(index) => self.counter_tick(index, page),
            UiEvent::MenuToggled => {
                let open = self.menu.toggle();
                self.apply_menu(open, page);
            }
            UiEvent::MenuLinkClicked => {
                self.menu.close();
                self.apply_menu(false, page);
            }
            UiEvent::AnchorClicked(index) => return self.on_anchor(index, page),
            UiEvent::InternalLinkClicked(index) => return self.on_internal_link(index, page),
            UiEvent::Navigate(href) => page.navigate(&href),
            UiEvent::FilterClicked(index) => self.on_filter(index, page),
            UiEvent::CardShow { card, generation } => {
                if let Some(node) = self.current_card(card, generation) {
                    page.set_style(node, "opacity", filter::VISIBLE_OPACITY);
                    page.set_style(node, "transform", filter::VISIBLE_TRANSFORM);
                }
            }
            UiEvent::CardHide { card, generation } => {
                if let Some(node) = self.current_card(card, generation) {
                    page.set_style(node, "display", "none");
                }
            }
            UiEvent::DescriptionInput => {
                if let (Some(field), Some(count)) =
                    (self.layout.description_field, self.layout.char_count)
                {
                    let length = contact::char_count(&page.field_value(field));
                    page.set_text(count, &length.to_string());
                }
            }
            UiEvent::SubmitRequested => {
                self.on_submit(page);
                return true;
            }
            UiEvent::SubmitFinished(result) => self.on_submit_finished(result, page),
            UiEvent::SubmitSettled => self.on_submit_settled(page),
            UiEvent::RippleClicked {
                button,
                client_x,
                client_y,
            } => {
                let rect = page.bounding_rect(button);
                let css = effects::ripple_css(client_x - rect.left, client_y - rect.top);
                if let Some(ripple) = page.append_styled_span(button, &css) {
                    page.set_timeout(self.config.ripple_lifetime_ms, UiEvent::RippleExpired(ripple));
                }
            }
            UiEvent::RippleExpired(ripple) => page.remove_node(ripple),
            UiEvent::ImageLoaded(node) => page.set_style(node, "opacity", "1"),
        }

        false
    }

    fn on_ready(&mut self, page: &mut dyn Page) {
        log_event(
            &self.config,
            LogLevel::Info,
            "ui_ready",
            json!({
                "animated": self.layout.animated.len(),
                "counters": self.layout.counters.len(),
                "project_cards": self.layout.project_cards.len(),
                "contact_form": self.layout.contact_form.is_some(),
            }),
        );

        page.request_frame(UiEvent::FirstFrame);
        for delay in REVEAL_SWEEP_DELAYS_MS {
            page.set_timeout(delay, UiEvent::Sweep(SweepSource::Timed(delay)));
        }

        self.update_nav(page.scroll_y(), page);

        let pathname = page.pathname();
        let current = nav::current_page(&pathname);
        for link in &self.layout.nav_links {
            if nav::is_active_nav_link(current, &link.href) {
                page.add_class(link.node, class::ACTIVE);
            }
        }

        for group in &self.layout.stagger_groups {
            for (index, child) in group.iter().enumerate() {
                page.set_style(*child, "transition-delay", &effects::stagger_delay(index));
            }
        }

        for image in self.layout.lazy_images.iter().filter(|image| !image.complete) {
            page.set_style(image.node, "opacity", "0");
            page.set_style(image.node, "transition", effects::LAZY_IMAGE_TRANSITION);
        }

        page.ensure_style_sheet(effects::RIPPLE_STYLE_ID, effects::RIPPLE_KEYFRAMES);

        if page.document_complete() {
            page.set_timeout(self.config.counter_grace_ms, UiEvent::StartCounters);
        }
    }

    fn sweep(&mut self, source: SweepSource, page: &mut dyn Page) {
        let viewport_height = page.viewport_height();
        let mut requested = 0usize;

        for node in &self.layout.animated {
            if self.revealed.is_marked(*node) {
                continue;
            }
            if in_view(page.bounding_rect(*node), viewport_height, SWEEP_VIEWPORT_RATIO) {
                page.request_frame(UiEvent::Reveal(*node));
                requested += 1;
            }
        }

        log_event(
            &self.config,
            LogLevel::Debug,
            "reveal_sweep",
            json!({
                "source": source.as_str(),
                "requested": requested,
                "revealed": self.revealed.len(),
            }),
        );
    }

    fn reveal(&mut self, node: NodeId, page: &mut dyn Page) {
        if self.revealed.mark(node) {
            page.add_class(node, class::ANIMATED);
        }
    }

    fn scroll_fallback(&mut self, page: &mut dyn Page) {
        let viewport_height = page.viewport_height();
        let pending: Vec<NodeId> = self
            .layout
            .animated
            .iter()
            .copied()
            .filter(|node| !self.revealed.is_marked(*node))
            .filter(|node| {
                in_view(
                    page.bounding_rect(*node),
                    viewport_height,
                    SCROLL_FALLBACK_VIEWPORT_RATIO,
                )
            })
            .collect();

        for node in pending {
            self.reveal(node, page);
        }
    }

    fn on_scroll(&mut self, page: &mut dyn Page) {
        let scroll_y = page.scroll_y();

        if !self.layout.animated.is_empty() {
            let generation = self.scroll_settle.restart();
            page.set_timeout(
                self.config.scroll_settle_ms,
                UiEvent::ScrollSettled(generation),
            );
        }

        if self.layout.nav.is_some() && self.nav_ticker.record(scroll_y) {
            page.request_frame(UiEvent::NavFrame);
        }

        if !self.scroll_started {
            self.scroll_started = true;
            self.start_counters(page);
        }

        for (index, shape) in self.layout.geo_shapes.iter().enumerate() {
            page.set_style(*shape, "transform", &effects::parallax_transform(index, scroll_y));
        }

        if let Some(bar) = self.layout.scroll_progress {
            let width = effects::progress_width(scroll_y, page.scroll_extent());
            page.set_style(bar, "width", &width);
        }
    }

    fn update_nav(&self, scroll_y: f64, page: &mut dyn Page) {
        let Some(nav_bar) = self.layout.nav else {
            return;
        };

        if nav::is_scrolled(scroll_y, self.config.nav_scroll_threshold_px) {
            page.add_class(nav_bar, class::SCROLLED);
        } else {
            page.remove_class(nav_bar, class::SCROLLED);
        }
    }

    fn start_counters(&mut self, page: &mut dyn Page) {
        for (index, counter) in self.layout.counters.iter().enumerate() {
            if !self.counted.mark(counter.node) {
                continue;
            }
            page.add_class(counter.node, class::COUNTED);

            match counter::parse_target(&counter.raw_target) {
                None => log_event(
                    &self.config,
                    LogLevel::Warn,
                    "counter_target_invalid",
                    json!({ "raw_target": counter.raw_target }),
                ),
                Some(0) => page.set_text(counter.node, "0"),
                Some(target) => {
                    self.counters[index] =
                        Some(CounterAnimation::new(target, self.config.counter_steps));
                    page.set_timeout(self.config.counter_tick_ms, UiEvent::CounterTick(index));
                }
            }
        }
    }

    fn counter_tick(&mut self, index: usize, page: &mut dyn Page) {
        let Some(node) = self.layout.counters.get(index).map(|counter| counter.node) else {
            return;
        };
        let Some(animation) = self.counters.get_mut(index).and_then(Option::as_mut) else {
            return;
        };

        let frame = animation.step();
        page.set_text(node, &frame.text);

        if frame.finished {
            self.counters[index] = None;
        } else {
            page.set_timeout(self.config.counter_tick_ms, UiEvent::CounterTick(index));
        }
    }

    fn apply_menu(&self, open: bool, page: &mut dyn Page) {
        let (Some(toggle), Some(menu)) = (self.layout.nav_toggle, self.layout.mobile_menu) else {
            return;
        };

        for node in [menu, toggle] {
            if open {
                page.add_class(node, class::ACTIVE);
            } else {
                page.remove_class(node, class::ACTIVE);
            }
        }

        if let Some(body) = self.layout.body {
            page.set_style(body, "overflow", nav::body_overflow(open));
        }
    }

    fn on_anchor(&self, index: usize, page: &mut dyn Page) -> bool {
        let Some(anchor) = self.layout.anchors.get(index) else {
            return false;
        };
        if !nav::is_scrollable_anchor(&anchor.href) {
            return false;
        }

        if let Some(target_top) = page.anchor_target_top(&anchor.href) {
            let top =
                nav::anchor_scroll_top(target_top, page.scroll_y(), self.config.header_offset_px);
            page.smooth_scroll_to(top);
        }
        true
    }

    fn on_internal_link(&self, index: usize, page: &mut dyn Page) -> bool {
        let Some(link) = self.layout.internal_links.get(index) else {
            return false;
        };
        if !nav::leaves_page(&link.href, &page.pathname()) {
            return false;
        }

        match self.layout.page_transition {
            Some(overlay) => {
                page.add_class(overlay, class::ACTIVE);
                page.set_timeout(
                    self.config.page_transition_ms,
                    UiEvent::Navigate(link.href.clone()),
                );
            }
            None => page.navigate(&link.href),
        }
        true
    }

    fn on_filter(&mut self, index: usize, page: &mut dyn Page) {
        let Some(selected) = self.layout.filter_buttons.get(index) else {
            return;
        };

        for button in &self.layout.filter_buttons {
            page.remove_class(button.node, class::ACTIVE);
        }
        page.add_class(selected.node, class::ACTIVE);

        let plans = self.filter.activate(
            &selected.filter,
            self.layout
                .project_cards
                .iter()
                .map(|card| card.category.as_str()),
        );

        for plan in plans {
            let node = self.layout.project_cards[plan.card].node;
            match plan.transition {
                CardTransition::Show => {
                    page.set_style(node, "display", "block");
                    page.set_timeout(
                        self.config.filter_show_delay_ms,
                        UiEvent::CardShow {
                            card: plan.card,
                            generation: plan.generation,
                        },
                    );
                }
                CardTransition::Hide => {
                    page.set_style(node, "opacity", filter::HIDDEN_OPACITY);
                    page.set_style(node, "transform", filter::HIDDEN_TRANSFORM);
                    page.set_timeout(
                        self.config.filter_hide_delay_ms,
                        UiEvent::CardHide {
                            card: plan.card,
                            generation: plan.generation,
                        },
                    );
                }
            }
        }

        log_event(
            &self.config,
            LogLevel::Debug,
            "project_filter_applied",
            json!({ "filter": self.filter.active() }),
        );
    }

    fn current_card(&self, card: usize, generation: u64) -> Option<NodeId> {
        if !self.filter.is_current(card, generation) {
            return None;
        }
        self.layout.project_cards.get(card).map(|card| card.node)
    }

    fn on_submit(&mut self, page: &mut dyn Page) {
        let Some(form) = self.layout.contact_form else {
            return;
        };

        let label = self
            .layout
            .submit_button
            .map(|button| page.inner_html(button))
            .unwrap_or_default();

        if !self.submit.begin(label) {
            log_event(
                &self.config,
                LogLevel::Debug,
                "contact_submit_ignored",
                json!({ "phase": self.submit.phase().as_str() }),
            );
            return;
        }

        if let Some(button) = self.layout.submit_button {
            page.set_inner_html(button, contact::LOADING_LABEL);
            page.set_disabled(button, true);
        }

        let payload = ContactPayload::from_fields(&page.form_fields(form));
        log_event(
            &self.config,
            LogLevel::Info,
            "contact_submit_start",
            json!({
                "servicio": payload.servicio,
                "presupuesto": payload.presupuesto,
            }),
        );
        page.post_contact(&self.config.webhook_url, payload);
    }

    fn on_submit_finished(&mut self, result: Result<u16, SubmitError>, page: &mut dyn Page) {
        let outcome = match result {
            Ok(status) if contact::is_success_status(status) => Ok(status),
            Ok(status) => Err(SubmitError::Status(status)),
            Err(error) => Err(error),
        };

        if !self.submit.finish(outcome.is_ok()) {
            return;
        }

        let (label, background) = match &outcome {
            Ok(status) => {
                log_event(
                    &self.config,
                    LogLevel::Info,
                    "contact_submit_succeeded",
                    json!({ "status": status }),
                );
                (contact::SUCCESS_LABEL, contact::SUCCESS_BACKGROUND)
            }
            Err(error) => {
                log_event(
                    &self.config,
                    LogLevel::Error,
                    "contact_submit_failed",
                    json!({
                        "error_class": error.class(),
                        "status": error.status(),
                        "error": error.to_string(),
                    }),
                );
                (contact::FAILURE_LABEL, contact::FAILURE_BACKGROUND)
            }
        };

        if let Some(button) = self.layout.submit_button {
            page.set_inner_html(button, label);
            page.set_style(button, "background", background);
        }
        page.set_timeout(self.config.submit_reset_ms, UiEvent::SubmitSettled);
    }

    fn on_submit_settled(&mut self, page: &mut dyn Page) {
        let Some((phase, original_label)) = self.submit.settle() else {
            return;
        };

        if phase == SubmitPhase::Succeeded {
            if let Some(form) = self.layout.contact_form {
                page.reset_form(form);
            }
            if let Some(count) = self.layout.char_count {
                page.set_text(count, "0");
            }
        }

        if let Some(button) = self.layout.submit_button {
            page.set_inner_html(button, &original_label);
            page.set_style(button, "background", "");
            page.set_disabled(button, false);
        }
    }
}
