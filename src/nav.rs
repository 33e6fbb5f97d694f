//! Navbar scroll tint.

pub const NAVBAR_RGB: [u8; 3] = [10, 10, 15];
pub const SCROLLED_PAST: f64 = 50.0;

pub fn navbar_alpha(scroll_y: f64) -> f64 {
    if scroll_y > SCROLLED_PAST { 0.95 } else { 0.9 }
}

pub fn navbar_background(scroll_y: f64) -> String {
    let [r, g, b] = NAVBAR_RGB;
    format!("rgba({r}, {g}, {b}, {})", navbar_alpha(scroll_y))
}

/// `#section` hrefs only; anything else is not an in-page jump.
pub fn section_selector(href: Option<&str>) -> Option<&str> {
    href.filter(|h| h.len() > 1 && h.starts_with('#'))
}
