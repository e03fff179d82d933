// client/src/observatory/mod.rs
//
// Orchestration: one session object wires the feed socket, the synthetic
// fallback, the history buffer, and the views together. Every snapshot —
// live or simulated — lands through the same update path; rendering
// follows reactively.

mod actions;
mod chart;
pub mod config;
mod connection;
mod history;
mod normalize;
mod simulation;
mod species_panel;
mod strategies_panel;

pub use config::FeedConfig;

use chart::FitnessChart;
use connection::{ConnectionManager, ConnectionState};
use dioxus::core::Task;
use dioxus::prelude::*;
use history::{FitnessHistory, HistoryPoint};
use log::{info, warn};
use observatory_shared::Snapshot;
use species_panel::SpeciesPanel;
use std::time::Duration;
use strategies_panel::StrategiesPanel;

/// Cadence of the synthetic feed while no live connection is open.
pub const FALLBACK_TICK: Duration = Duration::from_secs(5);

/// How long an action notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Where the data currently on screen came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    Live,
    Simulated,
}

/// Transient operator-facing notice (action failures).
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    id: u64,
    text: String,
}

/// One observatory instance: every piece of state the dashboard shows,
/// owned by whoever constructed it. Nothing here is global — two sessions
/// can coexist, and dropping the component tears everything down.
#[derive(Clone, Copy, PartialEq)]
pub struct ObservatorySession {
    config: Signal<FeedConfig>,
    snapshot: Signal<Snapshot>,
    history: Signal<FitnessHistory>,
    source: Signal<FeedSource>,
    notice: Signal<Option<Notice>>,
    notice_seq: Signal<u64>,
    drivers: Signal<Vec<Task>>,
    link: ConnectionManager,
}

impl ObservatorySession {
    /// Must be constructed inside a component scope (`use_hook`), which is
    /// where the caller decides how long the session lives.
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config: Signal::new(config),
            snapshot: Signal::new(Snapshot::default()),
            history: Signal::new(FitnessHistory::new()),
            source: Signal::new(FeedSource::Simulated),
            notice: Signal::new(None),
            notice_seq: Signal::new(0),
            drivers: Signal::new(Vec::new()),
            link: ConnectionManager::new(),
        }
    }

    pub fn config(&self) -> FeedConfig {
        self.config.read().clone()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.link.state()
    }

    /// The single update path: append a history point, replace the current
    /// snapshot, record where it came from.
    pub fn apply(&mut self, snapshot: Snapshot, source: FeedSource) {
        self.history.write().push(HistoryPoint {
            generation: snapshot.generation,
            avg_fitness: snapshot.avg_fitness,
            timestamp_ms: now_ms(),
        });
        self.source.set(source);
        self.snapshot.set(snapshot);
    }

    pub fn apply_live(&mut self, snapshot: Snapshot) {
        self.apply(snapshot, FeedSource::Live);
    }

    pub fn connect(&mut self) {
        let me = *self;
        self.link.connect(me);
    }

    /// Show a one-shot notice, then clear it unless a newer one replaced
    /// it in the meantime.
    pub async fn show_notice(&mut self, text: impl Into<String>) {
        let id = *self.notice_seq.read() + 1;
        self.notice_seq.set(id);
        self.notice.set(Some(Notice {
            id,
            text: text.into(),
        }));

        tokio::time::sleep(NOTICE_TTL).await;
        let still_current = self.notice.read().as_ref().map(|n| n.id) == Some(id);
        if still_current {
            self.notice.set(None);
        }
    }

    /// Explicit reset is the only path that empties the chart.
    pub fn reset_history(&mut self) {
        self.history.write().clear();
    }

    pub fn shutdown(&mut self) {
        for task in self.drivers.write().drain(..) {
            task.cancel();
        }
        self.link.shutdown();
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[component]
pub fn Observatory(session: ObservatorySession) -> Element {
    // Bootstrap once per mount: seed from the status endpoint (synthetic
    // catalogue if it is unreachable), then open the feed, then keep the
    // fallback cadence going for as long as the session lives.
    use_hook(move || {
        let mut session = session;
        let boot = spawn(async move {
            match actions::fetch_status(&session.config()).await {
                Ok(snapshot) => {
                    info!("seeded from status endpoint");
                    session.apply(snapshot, FeedSource::Live);
                }
                Err(e) => {
                    warn!("status seed failed, switching to synthetic data: {e}");
                    session.apply(simulation::seed(), FeedSource::Simulated);
                }
            }

            session.connect();

            loop {
                tokio::time::sleep(FALLBACK_TICK).await;
                if !session.connection_state().is_open() {
                    let next = {
                        let current = session.snapshot.read().clone();
                        simulation::tick(&current, &mut rand::rng())
                    };
                    session.apply(next, FeedSource::Simulated);
                }
            }
        });
        session.drivers.write().push(boot);
    });

    use_drop(move || {
        let mut session = session;
        session.shutdown();
    });

    let (generation, avg_fitness, population, species_count) = {
        let snap = session.snapshot.read();
        (
            snap.generation.to_string(),
            format!("{:.3}", snap.avg_fitness),
            snap.population.to_string(),
            snap.species_count.to_string(),
        )
    };

    let link = session.connection_state();
    let link_color = match link {
        ConnectionState::Open => "#22c55e",
        ConnectionState::Connecting => "#38bdf8",
        ConnectionState::Reconnecting => "#facc15",
        ConnectionState::Disconnected => "#9ca3af",
    };
    let link_label = link.label();

    let (source_label, source_color) = match *session.source.read() {
        FeedSource::Live => ("live data", "#22c55e"),
        FeedSource::Simulated => ("simulated data", "#a78bfa"),
    };

    let notice_text: Option<String> = session.notice.read().as_ref().map(|n| n.text.clone());

    rsx! {
        div {
            style: "
                height:100vh;
                padding:24px;
                color:#e5e7eb;
                font-family:system-ui, -apple-system, BlinkMacSystemFont;
                background:#020617;
                display:flex;
                flex-direction:column;
                gap:12px;
                box-sizing:border-box;
                overflow:hidden;
            ",

            // Header: title, link + source badges, manual actions
            div {
                style: "display:flex; align-items:center; justify-content:space-between; gap:16px; flex-wrap:wrap;",
                h1 { style: "color:#f97316; margin:0; font-size:22px; font-weight:800;", "Evolution Observatory" }

                div { style: "display:flex; gap:10px; align-items:center; flex-wrap:wrap;",
                    span {
                        style: "padding:0.25rem 0.7rem; border-radius:999px; border:1px solid {link_color}; color:{link_color}; font-size:0.8rem;",
                        "{link_label}"
                    }
                    span {
                        style: "padding:0.25rem 0.7rem; border-radius:999px; border:1px solid {source_color}; color:{source_color}; font-size:0.8rem;",
                        "{source_label}"
                    }

                    button {
                        style: "padding:0.45rem 0.85rem; border-radius:0.75rem; border:1px solid #22c55e; \
                                background:#022c22; color:#bbf7d0; font-weight:800; cursor:pointer;",
                        onclick: move |_| {
                            let mut session = session;
                            spawn(async move {
                                match actions::trigger_evolution(&session.config()).await {
                                    Ok(resp) => info!("evolution triggered (generation {:?})", resp.generation),
                                    Err(e) => session.show_notice(e.to_string()).await,
                                }
                            });
                        },
                        "Trigger evolution"
                    }

                    button {
                        style: "padding:0.45rem 0.85rem; border-radius:0.75rem; border:1px solid #ef4444; \
                                background:#450a0a; color:#fecaca; font-weight:800; cursor:pointer;",
                        onclick: move |_| {
                            let mut session = session;
                            spawn(async move {
                                match actions::reset_evolution(&session.config()).await {
                                    Ok(_) => session.reset_history(),
                                    Err(e) => session.show_notice(e.to_string()).await,
                                }
                            });
                        },
                        "Reset run"
                    }
                }
            }

            // Counters
            div { style: "display:flex; gap:0.75rem; flex-wrap:wrap;",
                SummaryCard { label: "Generation", value: generation, color: "#f97316" }
                SummaryCard { label: "Avg fitness", value: avg_fitness, color: "#22d3ee" }
                SummaryCard { label: "Population", value: population, color: "#a3e635" }
                SummaryCard { label: "Species", value: species_count, color: "#a78bfa" }
            }

            FitnessChart { history: session.history }

            div {
                style: "display:grid; grid-template-columns:repeat(auto-fit, minmax(320px, 1fr)); \
                        gap:12px; flex:1; min-height:0; overflow:auto;",
                StrategiesPanel { snapshot: session.snapshot }
                SpeciesPanel { snapshot: session.snapshot }
            }

            // Transient action notice
            match notice_text {
                Some(text) => rsx! {
                    div {
                        style: "position:fixed; right:1rem; bottom:1rem; padding:0.75rem 1rem; \
                                border-radius:0.75rem; border:1px solid #ef4444; background:#450a0a; \
                                color:#fecaca; box-shadow:0 10px 25px rgba(0,0,0,0.45); cursor:pointer;",
                        onclick: move |_| {
                            let mut session = session;
                            session.notice.set(None);
                        },
                        "{text}"
                    }
                },
                None => rsx! {},
            }
        }
    }
}

#[component]
fn SummaryCard(label: &'static str, value: String, color: &'static str) -> Element {
    rsx! {
        div {
            style: "padding:0.75rem; border-radius:0.5rem; background:#0f172a; border:1px solid #4b5563; min-width:110px;",
            div { style: "font-size:0.75rem; color:{color};", "{label}" }
            div { style: "font-size:1.25rem;", "{value}" }
        }
    }
}
