//! Coax/Cross Panel
//!
//! Browser front end for the dual-axis positioner: status, config, OPC-UA
//! gateway settings and manual slider control over one live socket.

mod app;
mod components;
mod provider;

fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    leptos::mount::mount_to_body(|| leptos::view! { <app::App/> });
}
