// Payload reconciliation.
//
// The server's snapshot shape has drifted across versions; older and newer
// frames must both land in the same `Snapshot`. Every field is resolved
// first-match-wins — canonical name, then the legacy name(s), then a
// numeric/empty default — so a missing field can never fail a frame.
//
// The full mapping (canonical → legacy → default):
//   strategies     adaptive_improvements → strategies → []
//   species        active_experiments → species → []
//   population     optimization_cycles_completed → population → 0
//   avg_fitness    performance_metrics.avg_fitness → avgFitness → 0.0
//   generation     current_generation → generation → 0
//   species_count  len(system_adaptations) → speciesCount → 0

use observatory_shared::{Snapshot, Species, Strategy};
use serde_json::Value;

pub fn snapshot_from_value(raw: &Value) -> Snapshot {
    let strategies: Vec<Strategy> = first_array(raw, &["adaptive_improvements", "strategies"])
        .map(|items| items.iter().map(strategy_from_value).collect())
        .unwrap_or_default();

    let species: Vec<Species> = first_array(raw, &["active_experiments", "species"])
        .map(|items| items.iter().map(species_from_value).collect())
        .unwrap_or_default();

    let avg_fitness = nested_f64(raw, "performance_metrics", "avg_fitness")
        .or_else(|| first_f64(raw, &["avgFitness"]))
        .unwrap_or(0.0);

    let species_count = first_array(raw, &["system_adaptations"])
        .map(|items| items.len() as u64)
        .or_else(|| first_u64(raw, &["speciesCount"]))
        .unwrap_or(0);

    Snapshot {
        generation: first_u64(raw, &["current_generation", "generation"]).unwrap_or(0),
        avg_fitness,
        population: first_u64(raw, &["optimization_cycles_completed", "population"]).unwrap_or(0),
        species_count,
        strategies,
        species,
    }
}

fn strategy_from_value(raw: &Value) -> Strategy {
    Strategy {
        id: first_str(raw, &["id"]).unwrap_or_default(),
        fitness: first_f64(raw, &["fitness"]).unwrap_or(0.0),
        complexity: first_u64(raw, &["complexity"]).unwrap_or(0),
        species: first_str(raw, &["species"]).unwrap_or_default(),
    }
}

fn species_from_value(raw: &Value) -> Species {
    Species::new(
        first_str(raw, &["name"]).unwrap_or_default(),
        first_u64(raw, &["population"]).unwrap_or(0),
        first_f64(raw, &["avg_fitness", "avgFitness"]).unwrap_or(0.0),
        first_f64(raw, &["max_fitness", "maxFitness"]).unwrap_or(0.0),
    )
}

fn first_f64(raw: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| raw.get(*k).and_then(Value::as_f64))
}

fn first_u64(raw: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| {
        let v = raw.get(*k)?;
        // Counters occasionally arrive as floats; round toward zero.
        v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0) as u64))
    })
}

fn first_str(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| raw.get(*k).and_then(Value::as_str).map(str::to_string))
}

fn first_array<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter()
        .find_map(|k| raw.get(*k).and_then(Value::as_array))
}

fn nested_f64(raw: &Value, outer: &str, inner: &str) -> Option<f64> {
    raw.get(outer)?.get(inner)?.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_and_legacy_shapes_reconcile_identically() {
        let canonical = json!({
            "adaptive_improvements": [
                {"id": "a", "fitness": 0.7, "complexity": 4, "species": "mutators"}
            ],
            "active_experiments": [
                {"name": "mutators", "population": 20, "avg_fitness": 0.6, "max_fitness": 0.8}
            ],
            "optimization_cycles_completed": 120,
            "performance_metrics": {"avg_fitness": 0.7},
            "current_generation": 42,
            "system_adaptations": [1, 2, 3],
        });
        let legacy = json!({
            "strategies": [
                {"id": "a", "fitness": 0.7, "complexity": 4, "species": "mutators"}
            ],
            "species": [
                {"name": "mutators", "population": 20, "avgFitness": 0.6, "maxFitness": 0.8}
            ],
            "population": 120,
            "avgFitness": 0.7,
            "generation": 42,
            "speciesCount": 3,
        });

        assert_eq!(snapshot_from_value(&canonical), snapshot_from_value(&legacy));
    }

    #[test]
    fn initial_state_payload_lands_in_strategies() {
        // Feed scenario: a fresh initial_state frame with one improvement.
        let data = json!({
            "adaptive_improvements": [
                {"id": "x", "fitness": 0.5, "complexity": 1, "species": "s"}
            ],
            "active_experiments": [],
            "optimization_cycles_completed": 1,
            "generation": 0,
        });

        let snapshot = snapshot_from_value(&data);
        assert_eq!(snapshot.generation, 0);
        assert_eq!(snapshot.population, 1);
        assert_eq!(snapshot.strategies.len(), 1);
        assert_eq!(snapshot.strategies[0].id, "x");
        assert_eq!(snapshot.strategies[0].fitness, 0.5);
        assert_eq!(snapshot.strategies[0].complexity, 1);
        assert_eq!(snapshot.strategies[0].species, "s");
        assert!(snapshot.species.is_empty());
    }

    #[test]
    fn canonical_names_win_when_both_are_present() {
        let data = json!({
            "current_generation": 9,
            "generation": 4,
            "performance_metrics": {"avg_fitness": 0.9},
            "avgFitness": 0.1,
            "system_adaptations": ["a", "b"],
            "speciesCount": 7,
        });

        let snapshot = snapshot_from_value(&data);
        assert_eq!(snapshot.generation, 9);
        assert_eq!(snapshot.avg_fitness, 0.9);
        assert_eq!(snapshot.species_count, 2);
    }

    #[test]
    fn absent_fields_resolve_to_defaults() {
        let snapshot = snapshot_from_value(&json!({}));
        assert_eq!(snapshot, Snapshot::default());

        // Non-object payloads degrade the same way.
        let snapshot = snapshot_from_value(&json!(null));
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn species_invariant_survives_bad_payloads() {
        let data = json!({
            "species": [
                {"name": "selectors", "population": 5, "avg_fitness": 0.9, "max_fitness": 0.2}
            ],
        });

        let snapshot = snapshot_from_value(&data);
        assert_eq!(snapshot.species[0].max_fitness, 0.9);
    }

    #[test]
    fn float_counters_round_toward_zero() {
        let data = json!({"generation": 3.9, "population": 11.2});
        let snapshot = snapshot_from_value(&data);
        assert_eq!(snapshot.generation, 3);
        assert_eq!(snapshot.population, 11);
    }
}
