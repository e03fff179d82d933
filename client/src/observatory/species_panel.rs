use dioxus::prelude::*;
use observatory_shared::Snapshot;

const ROW_STYLE: &str = "display:grid; grid-template-columns:2fr 1fr 1fr 1fr; gap:8px; \
                         padding:6px 10px; border-bottom:1px solid #1f2937; font-size:0.85rem;";

/// Species roster for the current snapshot, replaced wholesale on every
/// update.
#[component]
pub fn SpeciesPanel(snapshot: Signal<Snapshot>) -> Element {
    let species = snapshot.read().species.clone();

    rsx! {
        div {
            style: "display:flex; flex-direction:column; border-radius:14px; background:#020617ee; \
                    border:1px solid #334155; overflow:hidden;",
            h2 { style: "margin:0; padding:10px 12px; color:#a3e635; font-size:1rem;", "Species" }

            div { style: "{ROW_STYLE} color:#9ca3af; text-transform:uppercase; font-size:0.7rem;",
                span { "Species" }
                span { "Population" }
                span { "Avg" }
                span { "Max" }
            }

            if species.is_empty() {
                p { style: "margin:0; padding:10px 12px; color:#9ca3af;", "No species reported yet." }
            }

            for sp in species.iter() {
                div { key: "{sp.name}", style: "{ROW_STYLE} color:#e5e7eb;",
                    span { "{sp.name}" }
                    span { "{sp.population}" }
                    span { style: "color:#a3e635;", {format!("{:.3}", sp.avg_fitness)} }
                    span { style: "color:#a3e635;", {format!("{:.3}", sp.max_fitness)} }
                }
            }
        }
    }
}
