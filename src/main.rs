mod api;
mod channel;
mod components;
mod config;
mod error;
mod markup;
mod model;
mod state;
mod util;

use components::app::{App, AppProps};
use config::AppConfig;
use state::Session;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_build_env();
    if console_log::init_with_level(config.log_level).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("embroidery preview starting against {}", config.api_base);

    let props = AppProps {
        config,
        user: Session::stored_user(),
    };
    yew::Renderer::<App>::with_props(props).render();
}
