#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!(
        "cs-infraestructura-site only runs in the browser. Build it for wasm32-unknown-unknown and load it from the site's static pages."
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    cs_site::dom::run();
}
