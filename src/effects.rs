pub const RIPPLE_STYLE_ID: &str = "ripple-styles";
pub const RIPPLE_KEYFRAMES: &str = "@keyframes ripple {
    to {
        transform: scale(4);
        opacity: 0;
    }
}";
const RIPPLE_SIZE_PX: f64 = 100.0;

pub const LAZY_IMAGE_TRANSITION: &str = "opacity 0.5s ease";

const PARALLAX_SPEED: f64 = 0.03;
const STAGGER_STEP_SECONDS: f64 = 0.1;

pub fn parallax_transform(index: usize, scroll_y: f64) -> String {
    let speed = PARALLAX_SPEED * (index as f64 + 1.0);
    let offset = scroll_y * speed;

    if index == 0 {
        format!("translateY({offset}px) rotate(45deg)")
    } else {
        format!("translateY({offset}px)")
    }
}

/// Progress bar width in percent; a page that cannot scroll reports 0.
pub fn progress_width(scroll_y: f64, scroll_extent: f64) -> String {
    let percent = if scroll_extent > 0.0 {
        scroll_y / scroll_extent * 100.0
    } else {
        0.0
    };
    format!("{percent}%")
}

pub fn stagger_delay(index: usize) -> String {
    let seconds = (index as f64 * STAGGER_STEP_SECONDS * 10.0).round() / 10.0;
    format!("{seconds}s")
}

pub fn ripple_css(x: f64, y: f64) -> String {
    let half = RIPPLE_SIZE_PX / 2.0;
    let left = x - half;
    let top = y - half;

    format!(
        "position: absolute; background: rgba(255, 255, 255, 0.3); border-radius: 50%; \
         pointer-events: none; width: {RIPPLE_SIZE_PX}px; height: {RIPPLE_SIZE_PX}px; \
         left: {left}px; top: {top}px; transform: scale(0); animation: ripple 0.6s ease-out;"
    )
}
