// client/src/app.rs

use dioxus::prelude::*;

use crate::observatory::{FeedConfig, Observatory, ObservatorySession};

const GLOBAL_CSS: &str = r#"
html, body {
    margin: 0;
    padding: 0;
    width: 100%;
    height: 100%;
    background: #020617;
    overflow: hidden;
}

:root, html {
    color-scheme: dark;
}

#main {
    width: 100%;
    height: 100%;
    background: #020617;
}

* { box-sizing: border-box; }
"#;

#[component]
pub fn App() -> Element {
    // The session is constructed here and handed down; the dashboard holds
    // no ambient state of its own, so a second App would get a second,
    // fully independent observatory.
    let session = use_hook(|| ObservatorySession::new(FeedConfig::from_env()));

    rsx! {
        document::Style { "{GLOBAL_CSS}" }

        div {
            style: "min-height:100vh; width:100%; background:#020617; color:#e5e7eb;",
            Observatory { session }
        }
    }
}
