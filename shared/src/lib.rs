use serde::{Deserialize, Serialize};

/// One consistent point-in-time reading of the evolution process.
///
/// Produced by the payload reconciler or by the synthetic feed, never
/// mutated afterwards; the session replaces its current snapshot wholesale
/// on every update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub generation: u64,
    pub avg_fitness: f64,
    pub population: u64,
    pub species_count: u64,
    pub strategies: Vec<Strategy>,
    pub species: Vec<Species>,
}

/// A named candidate approach with a normalized fitness score, a
/// complexity measure, and the species it belongs to (referenced by name,
/// not by pointer).
#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
    pub id: String,
    pub fitness: f64,
    pub complexity: u64,
    pub species: String,
}

/// A named grouping of strategies with aggregate statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub name: String,
    pub population: u64,
    pub avg_fitness: f64,
    pub max_fitness: f64,
}

impl Species {
    /// `max_fitness` can never sit below `avg_fitness`; payloads that
    /// claim otherwise are lifted to the average.
    pub fn new(
        name: impl Into<String>,
        population: u64,
        avg_fitness: f64,
        max_fitness: f64,
    ) -> Self {
        Self {
            name: name.into(),
            population,
            avg_fitness,
            max_fitness: max_fitness.max(avg_fitness),
        }
    }
}

/// Frames the client sends over the feed socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    RequestUpdate,
    Ping,
}

/// Frames the server sends over the feed socket:
///   { "type": "initial_state",    "data": { ... } }
///   { "type": "evolution_update", "data": { ... } }
///
/// `data` carries whatever payload shape the server currently emits; the
/// client reconciles it downstream rather than binding the wire shape
/// here. Frames with any other `type` fail to parse and are dropped by
/// the receiver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    InitialState(serde_json::Value),
    EvolutionUpdate(serde_json::Value),
}
