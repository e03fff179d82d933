// Synthetic feed.
//
// When no live connection is available the dashboard keeps moving on
// locally generated data: a fixed catalogue seeds the first snapshot, and
// each tick nudges every strategy's fitness by a small uniform draw.

use observatory_shared::{Snapshot, Species, Strategy};
use rand::RngExt;

/// Per-tick fitness perturbation is drawn from U(-JITTER, JITTER).
const FITNESS_JITTER: f64 = 0.005;
const FITNESS_FLOOR: f64 = 0.1;
const FITNESS_CEILING: f64 = 1.0;

/// Strategy catalogue: (id, fitness, complexity, species).
const STRATEGY_CATALOG: [(&str, f64, u64, &str); 8] = [
    ("gradient-pruning", 0.72, 6, "optimizers"),
    ("momentum-reseed", 0.64, 4, "optimizers"),
    ("niche-crossover", 0.58, 7, "recombinators"),
    ("uniform-crossover", 0.51, 3, "recombinators"),
    ("adaptive-mutation", 0.67, 5, "mutators"),
    ("hypermutation-burst", 0.43, 8, "mutators"),
    ("elite-archive", 0.77, 2, "selectors"),
    ("tournament-culling", 0.60, 3, "selectors"),
];

/// Species catalogue: (name, population).
const SPECIES_CATALOG: [(&str, u64); 4] = [
    ("optimizers", 34),
    ("recombinators", 27),
    ("mutators", 41),
    ("selectors", 19),
];

/// A believable starting snapshot built from the fixed catalogue.
pub fn seed() -> Snapshot {
    let strategies: Vec<Strategy> = STRATEGY_CATALOG
        .iter()
        .map(|(id, fitness, complexity, species)| Strategy {
            id: (*id).to_string(),
            fitness: *fitness,
            complexity: *complexity,
            species: (*species).to_string(),
        })
        .collect();

    let species: Vec<Species> = SPECIES_CATALOG
        .iter()
        .map(|(name, population)| {
            let (avg, max) = species_stats(&strategies, name);
            Species::new(*name, *population, avg, max)
        })
        .collect();

    let population = species.iter().map(|s| s.population).sum();

    Snapshot {
        generation: 1,
        avg_fitness: mean_fitness(&strategies),
        population,
        species_count: species.len() as u64,
        strategies,
        species,
    }
}

/// Advance the run by one generation: perturb every strategy's fitness
/// within the clamp window, refresh the per-species aggregates, recompute
/// the mean. Populations and counters carry over unchanged.
pub fn tick<R: RngExt>(prev: &Snapshot, rng: &mut R) -> Snapshot {
    let strategies: Vec<Strategy> = prev
        .strategies
        .iter()
        .map(|s| {
            let drift = rng.random_range(-FITNESS_JITTER..FITNESS_JITTER);
            Strategy {
                id: s.id.clone(),
                fitness: (s.fitness + drift).clamp(FITNESS_FLOOR, FITNESS_CEILING),
                complexity: s.complexity,
                species: s.species.clone(),
            }
        })
        .collect();

    let species: Vec<Species> = prev
        .species
        .iter()
        .map(|sp| {
            let (avg, max) = species_stats(&strategies, &sp.name);
            if avg == 0.0 && max == 0.0 {
                // No member strategies this tick; keep the old figures.
                sp.clone()
            } else {
                Species::new(sp.name.clone(), sp.population, avg, max)
            }
        })
        .collect();

    Snapshot {
        generation: prev.generation + 1,
        avg_fitness: mean_fitness(&strategies),
        population: prev.population,
        species_count: prev.species_count,
        strategies,
        species,
    }
}

fn mean_fitness(strategies: &[Strategy]) -> f64 {
    if strategies.is_empty() {
        return 0.0;
    }
    strategies.iter().map(|s| s.fitness).sum::<f64>() / strategies.len() as f64
}

fn species_stats(strategies: &[Strategy], name: &str) -> (f64, f64) {
    let members: Vec<f64> = strategies
        .iter()
        .filter(|s| s.species == name)
        .map(|s| s.fitness)
        .collect();
    if members.is_empty() {
        return (0.0, 0.0);
    }
    let avg = members.iter().sum::<f64>() / members.len() as f64;
    let max = members.iter().fold(f64::MIN, |m, f| m.max(*f));
    (avg, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_internally_consistent() {
        let snapshot = seed();
        assert_eq!(snapshot.generation, 1);
        assert_eq!(snapshot.species_count, snapshot.species.len() as u64);
        assert_eq!(
            snapshot.population,
            snapshot.species.iter().map(|s| s.population).sum::<u64>()
        );
        assert!((0.0..=1.0).contains(&snapshot.avg_fitness));
        for sp in &snapshot.species {
            assert!(sp.max_fitness >= sp.avg_fitness, "{}", sp.name);
        }
    }

    #[test]
    fn tick_advances_one_generation_and_recomputes_the_mean() {
        let mut rng = rand::rng();
        let seeded = seed();
        let next = tick(&seeded, &mut rng);

        assert_eq!(next.generation, seeded.generation + 1);
        assert_eq!(next.strategies.len(), seeded.strategies.len());

        let mean = next.strategies.iter().map(|s| s.fitness).sum::<f64>()
            / next.strategies.len() as f64;
        assert!((next.avg_fitness - mean).abs() < 1e-12);
    }

    #[test]
    fn fitness_stays_inside_the_clamp_window() {
        let mut rng = rand::rng();
        let mut snapshot = seed();
        // Start two strategies right at the edges to stress the clamp.
        snapshot.strategies[0].fitness = 0.1;
        snapshot.strategies[1].fitness = 1.0;

        for _ in 0..2_000 {
            snapshot = tick(&snapshot, &mut rng);
            for s in &snapshot.strategies {
                assert!((0.1..=1.0).contains(&s.fitness), "{} = {}", s.id, s.fitness);
            }
        }
    }

    #[test]
    fn tick_with_no_strategies_keeps_a_zero_mean() {
        let mut rng = rand::rng();
        let empty = Snapshot {
            generation: 7,
            ..Snapshot::default()
        };

        let next = tick(&empty, &mut rng);
        assert_eq!(next.generation, 8);
        assert_eq!(next.avg_fitness, 0.0);
    }

    #[test]
    fn species_aggregates_follow_their_members() {
        let mut rng = rand::rng();
        let next = tick(&seed(), &mut rng);

        for sp in &next.species {
            let members: Vec<f64> = next
                .strategies
                .iter()
                .filter(|s| s.species == sp.name)
                .map(|s| s.fitness)
                .collect();
            assert!(!members.is_empty());
            let avg = members.iter().sum::<f64>() / members.len() as f64;
            assert!((sp.avg_fitness - avg).abs() < 1e-12);
            assert!(sp.max_fitness >= sp.avg_fitness);
        }
    }
}
