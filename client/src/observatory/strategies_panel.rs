use dioxus::prelude::*;
use observatory_shared::Snapshot;

const ROW_STYLE: &str = "display:grid; grid-template-columns:2fr 1fr 1fr 1.5fr; gap:8px; \
                         padding:6px 10px; border-bottom:1px solid #1f2937; font-size:0.85rem;";

/// Strategy roster for the current snapshot. The whole list is replaced on
/// every update; rows are keyed by strategy id.
#[component]
pub fn StrategiesPanel(snapshot: Signal<Snapshot>) -> Element {
    let strategies = snapshot.read().strategies.clone();

    rsx! {
        div {
            style: "display:flex; flex-direction:column; border-radius:14px; background:#020617ee; \
                    border:1px solid #334155; overflow:hidden;",
            h2 { style: "margin:0; padding:10px 12px; color:#22d3ee; font-size:1rem;", "Strategies" }

            div { style: "{ROW_STYLE} color:#9ca3af; text-transform:uppercase; font-size:0.7rem;",
                span { "Strategy" }
                span { "Fitness" }
                span { "Complexity" }
                span { "Species" }
            }

            if strategies.is_empty() {
                p { style: "margin:0; padding:10px 12px; color:#9ca3af;", "No strategies reported yet." }
            }

            for s in strategies.iter() {
                div { key: "{s.id}", style: "{ROW_STYLE} color:#e5e7eb;",
                    span { "{s.id}" }
                    span { style: "color:#22d3ee;", {format!("{:.3}", s.fitness)} }
                    span { "{s.complexity}" }
                    span { style: "color:#9ca3af;", "{s.species}" }
                }
            }
        }
    }
}
