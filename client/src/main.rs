mod app;
mod error;
mod observatory;

use dioxus::prelude::*;

fn main() {
    env_logger::init();

    let cfg = dioxus_desktop::Config::new()
        .with_window(dioxus_desktop::WindowBuilder::new().with_title("Evolution Observatory"));

    LaunchBuilder::desktop().with_cfg(cfg).launch(app::App);
}
