const INDEX_PAGE: &str = "index.html";

pub fn is_scrolled(scroll_y: f64, threshold_px: u32) -> bool {
    scroll_y > f64::from(threshold_px)
}

#[derive(Debug, Default)]
pub struct FrameTicker {
    last_scroll_y: f64,
    ticking: bool,
}

impl FrameTicker {
    pub fn record(&mut self, scroll_y: f64) -> bool {
        self.last_scroll_y = scroll_y;
        if self.ticking {
            return false;
        }

        self.ticking = true;
        true
    }

    pub fn take(&mut self) -> f64 {
        self.ticking = false;
        self.last_scroll_y
    }
}

#[derive(Debug, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

pub fn body_overflow(menu_open: bool) -> &'static str {
    if menu_open {
        "hidden"
    } else {
        ""
    }
}

pub fn is_scrollable_anchor(href: &str) -> bool {
    href.starts_with('#') && href != "#"
}

pub fn anchor_scroll_top(target_top: f64, scroll_y: f64, header_offset_px: u32) -> f64 {
    target_top + scroll_y - f64::from(header_offset_px)
}

/// Whether a click on an internal link should run the exit transition.
pub fn leaves_page(href: &str, pathname: &str) -> bool {
    !href.starts_with('#') && href != pathname
}

pub fn current_page(pathname: &str) -> &str {
    match pathname.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => INDEX_PAGE,
    }
}

pub fn is_active_nav_link(current_page: &str, href: &str) -> bool {
    href == current_page
        || (current_page == INDEX_PAGE && href == "./index.html")
        || (current_page.contains("servicios") && href.contains("servicios"))
        || (current_page.contains("proyectos") && href.contains("proyectos"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_only_strictly_past_threshold() {
        assert!(!is_scrolled(0.0, 100));
        assert!(!is_scrolled(100.0, 100));
        assert!(is_scrolled(100.5, 100));
        assert!(is_scrolled(2_400.0, 100));
    }

    #[test]
    fn ticker_requests_one_frame_per_burst() {
        let mut ticker = FrameTicker::default();

        assert!(ticker.record(10.0));
        assert!(!ticker.record(50.0));
        assert!(!ticker.record(130.0));
        assert_eq!(ticker.take(), 130.0);
        assert!(ticker.record(90.0));
    }

    #[test]
    fn anchors_and_page_exits() {
        assert!(is_scrollable_anchor("#contacto"));
        assert!(!is_scrollable_anchor("#"));
        assert!(!is_scrollable_anchor("./servicios.html"));

        assert_eq!(anchor_scroll_top(400.0, 1_200.0, 80), 1_520.0);

        assert!(leaves_page("./proyectos.html", "/index.html"));
        assert!(!leaves_page("/index.html", "/index.html"));
        assert!(!leaves_page("#servicios", "/index.html"));
    }

    #[test]
    fn current_page_defaults_to_index() {
        assert_eq!(current_page("/"), "index.html");
        assert_eq!(current_page(""), "index.html");
        assert_eq!(current_page("/sitio/servicios.html"), "servicios.html");
    }

    #[test]
    fn active_link_matches_section_families() {
        assert!(is_active_nav_link("index.html", "./index.html"));
        assert!(is_active_nav_link("servicios.html", "./servicios.html"));
        assert!(is_active_nav_link("proyectos-mineria.html", "./proyectos.html"));
        assert!(!is_active_nav_link("servicios.html", "./proyectos.html"));
        assert!(!is_active_nav_link("contacto.html", "./index.html"));
    }
}
