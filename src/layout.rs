pub mod selector {
    pub const NAV: &str = "nav";
    pub const NAV_TOGGLE: &str = "navToggle";
    pub const MOBILE_MENU: &str = "mobileMenu";
    pub const CONTACT_FORM: &str = "contactForm";
    pub const DESCRIPTION_FIELD: &str = "descripcion";
    pub const CHAR_COUNT: &str = "charCount";

    pub const ANIMATED: &str = "[data-animate]";
    pub const SECTIONS: &str = "section";
    pub const STAGGER: &str = "[data-stagger]";
    pub const GEO_SHAPES: &str = ".geo-shape";
    pub const SCROLL_PROGRESS: &str = ".scroll-progress";
    pub const COUNTERS: &str = ".proof-number[data-count]";
    pub const FILTER_BUTTONS: &str = ".filter-btn";
    pub const PROJECT_CARDS: &str = ".project-card[data-category]";
    pub const PAGE_TRANSITION: &str = ".page-transition";
    pub const ANCHORS: &str = "a[href^=\"#\"]";
    pub const INTERNAL_LINKS: &str = "a[href^=\"./\"], a[href^=\"../\"], a[href$=\".html\"]";
    pub const NAV_LINKS: &str = ".nav-links a:not(.nav-cta)";
    pub const MENU_LINKS: &str = "a";
    pub const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";
    pub const LAZY_IMAGES: &str = "img[loading=\"lazy\"]";
    pub const RIPPLE_BUTTONS: &str = ".btn-primary";
}

pub mod class {
    pub const JS_READY: &str = "js-ready";
    pub const ANIMATED: &str = "animated";
    pub const SECTION_VISIBLE: &str = "section-visible";
    pub const COUNTED: &str = "counted";
    pub const SCROLLED: &str = "scrolled";
    pub const ACTIVE: &str = "active";
}

pub mod attribute {
    pub const COUNT: &str = "data-count";
    pub const FILTER: &str = "data-filter";
    pub const CATEGORY: &str = "data-category";
    pub const HREF: &str = "href";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Viewport-relative box, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkNode {
    pub node: NodeId,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CounterNode {
    pub node: NodeId,
    pub raw_target: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilterButton {
    pub node: NodeId,
    pub filter: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectCard {
    pub node: NodeId,
    pub category: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LazyImage {
    pub node: NodeId,
    pub complete: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageLayout {
    pub body: Option<NodeId>,
    pub nav: Option<NodeId>,
    pub nav_toggle: Option<NodeId>,
    pub mobile_menu: Option<NodeId>,
    pub mobile_menu_links: Vec<NodeId>,
    pub nav_links: Vec<LinkNode>,
    pub anchors: Vec<LinkNode>,
    pub internal_links: Vec<LinkNode>,
    pub page_transition: Option<NodeId>,
    pub animated: Vec<NodeId>,
    pub sections: Vec<NodeId>,
    pub stagger_groups: Vec<Vec<NodeId>>,
    pub geo_shapes: Vec<NodeId>,
    pub scroll_progress: Option<NodeId>,
    pub counters: Vec<CounterNode>,
    pub filter_buttons: Vec<FilterButton>,
    pub project_cards: Vec<ProjectCard>,
    pub contact_form: Option<NodeId>,
    pub submit_button: Option<NodeId>,
    pub description_field: Option<NodeId>,
    pub char_count: Option<NodeId>,
    pub lazy_images: Vec<LazyImage>,
    pub ripple_buttons: Vec<NodeId>,
}
