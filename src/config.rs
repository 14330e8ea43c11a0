use url::Url;

use crate::log::LogLevel;

pub const DEFAULT_WEBHOOK_URL: &str = "https://services.leadconnectorhq.com/hooks/CKxAEP7tblWnBnWC2ONS/webhook-trigger/8717c5ab-ead1-425d-8604-4382dbe080a7";
const DEFAULT_NAV_SCROLL_THRESHOLD_PX: u32 = 100;
const DEFAULT_HEADER_OFFSET_PX: u32 = 80;
const DEFAULT_SCROLL_SETTLE_MS: u32 = 50;
const DEFAULT_COUNTER_GRACE_MS: u32 = 500;
const DEFAULT_COUNTER_TICK_MS: u32 = 40;
const DEFAULT_COUNTER_STEPS: u32 = 50;
const DEFAULT_FILTER_SHOW_DELAY_MS: u32 = 50;
const DEFAULT_FILTER_HIDE_DELAY_MS: u32 = 300;
const DEFAULT_SUBMIT_RESET_MS: u32 = 3_000;
const DEFAULT_PAGE_TRANSITION_MS: u32 = 500;
const DEFAULT_RIPPLE_LIFETIME_MS: u32 = 600;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

pub const REVEAL_SWEEP_DELAYS_MS: [u32; 3] = [100, 500, 1_000];
pub const REVEAL_OBSERVER_THRESHOLD: f64 = 0.05;
pub const REVEAL_OBSERVER_ROOT_MARGIN: &str = "0px 0px -30px 0px";
pub const SECTION_OBSERVER_THRESHOLD: f64 = 0.05;
pub const SWEEP_VIEWPORT_RATIO: f64 = 0.95;
pub const SCROLL_FALLBACK_VIEWPORT_RATIO: f64 = 0.9;

const NAV_SCROLL_THRESHOLD_PX_BOUNDS: (u32, u32) = (0, 2_000);
const HEADER_OFFSET_PX_BOUNDS: (u32, u32) = (0, 400);
const SCROLL_SETTLE_MS_BOUNDS: (u32, u32) = (0, 1_000);
const COUNTER_GRACE_MS_BOUNDS: (u32, u32) = (0, 10_000);
const COUNTER_TICK_MS_BOUNDS: (u32, u32) = (1, 1_000);
const COUNTER_STEPS_BOUNDS: (u32, u32) = (1, 1_000);
const FILTER_DELAY_MS_BOUNDS: (u32, u32) = (0, 5_000);
const SUBMIT_RESET_MS_BOUNDS: (u32, u32) = (0, 60_000);
const PAGE_TRANSITION_MS_BOUNDS: (u32, u32) = (0, 5_000);
const RIPPLE_LIFETIME_MS_BOUNDS: (u32, u32) = (0, 5_000);

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub webhook_url: String,
    pub nav_scroll_threshold_px: u32,
    pub header_offset_px: u32,
    pub scroll_settle_ms: u32,
    pub counter_grace_ms: u32,
    pub counter_tick_ms: u32,
    pub counter_steps: u32,
    pub filter_show_delay_ms: u32,
    pub filter_hide_delay_ms: u32,
    pub submit_reset_ms: u32,
    pub page_transition_ms: u32,
    pub ripple_lifetime_ms: u32,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl SiteConfig {
    /// Builds the configuration from optional string overrides.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str, default: u32, bounds: (u32, u32)| {
            parse_u32_with_bounds(lookup(key).as_deref(), default, bounds)
        };

        let webhook_url = parse_http_url(lookup("webhook-url").as_deref())
            .map(String::from)
            .unwrap_or_else(|| DEFAULT_WEBHOOK_URL.to_string());

        Self {
            webhook_url,
            nav_scroll_threshold_px: number(
                "nav-scroll-threshold-px",
                DEFAULT_NAV_SCROLL_THRESHOLD_PX,
                NAV_SCROLL_THRESHOLD_PX_BOUNDS,
            ),
            header_offset_px: number(
                "header-offset-px",
                DEFAULT_HEADER_OFFSET_PX,
                HEADER_OFFSET_PX_BOUNDS,
            ),
            scroll_settle_ms: number(
                "scroll-settle-ms",
                DEFAULT_SCROLL_SETTLE_MS,
                SCROLL_SETTLE_MS_BOUNDS,
            ),
            counter_grace_ms: number(
                "counter-grace-ms",
                DEFAULT_COUNTER_GRACE_MS,
                COUNTER_GRACE_MS_BOUNDS,
            ),
            counter_tick_ms: number(
                "counter-tick-ms",
                DEFAULT_COUNTER_TICK_MS,
                COUNTER_TICK_MS_BOUNDS,
            ),
            counter_steps: number("counter-steps", DEFAULT_COUNTER_STEPS, COUNTER_STEPS_BOUNDS),
            filter_show_delay_ms: number(
                "filter-show-delay-ms",
                DEFAULT_FILTER_SHOW_DELAY_MS,
                FILTER_DELAY_MS_BOUNDS,
            ),
            filter_hide_delay_ms: number(
                "filter-hide-delay-ms",
                DEFAULT_FILTER_HIDE_DELAY_MS,
                FILTER_DELAY_MS_BOUNDS,
            ),
            submit_reset_ms: number(
                "submit-reset-ms",
                DEFAULT_SUBMIT_RESET_MS,
                SUBMIT_RESET_MS_BOUNDS,
            ),
            page_transition_ms: number(
                "page-transition-ms",
                DEFAULT_PAGE_TRANSITION_MS,
                PAGE_TRANSITION_MS_BOUNDS,
            ),
            ripple_lifetime_ms: number(
                "ripple-lifetime-ms",
                DEFAULT_RIPPLE_LIFETIME_MS,
                RIPPLE_LIFETIME_MS_BOUNDS,
            ),
            log_level: parse_log_level(lookup("log-level").as_deref(), DEFAULT_LOG_LEVEL),
        }
    }
}

fn parse_u32_with_bounds(value: Option<&str>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_http_url(value: Option<&str>) -> Option<Url> {
    let parsed = Url::parse(parse_non_empty(value)?).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
}

fn parse_log_level(value: Option<&str>, default: LogLevel) -> LogLevel {
    parse_non_empty(value)
        .and_then(LogLevel::from_str)
        .unwrap_or(default)
}
