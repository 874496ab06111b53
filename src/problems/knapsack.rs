//! 0/1 knapsack as a bit-string GA problem.
//!
//! Gene `i` set means item `i` is packed. Fitness is the packed value when
//! the packed weight fits the capacity and **zero** otherwise. This hard
//! penalty neither repairs nor partially credits an overweight packing, so
//! a population that is entirely overweight has no selection gradient and
//! can stagnate until mutation happens to produce a feasible packing.
//! Roulette selection falls back to uniform picks in that state.

use crate::error::{EvolveError, Result};
use crate::ga::{operators, GaProblem, GaResult, Individual, Objective};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An item that can be packed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique name, reported in `best_items`.
    pub name: String,
    /// Weight counted against the capacity.
    pub weight: u64,
    /// Value credited when the packing fits.
    pub value: u64,
}

impl Item {
    /// Creates an item.
    pub fn new(name: impl Into<String>, weight: u64, value: u64) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
        }
    }
}

/// A decoded chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packing {
    /// Names of the packed items, in item order.
    pub items: Vec<String>,
    /// Total weight of the packed items.
    pub weight: u64,
    /// Total value of the packed items, whether or not they fit.
    pub value: u64,
}

/// Bit-string chromosome, one gene per item.
#[derive(Debug, Clone)]
pub struct KnapsackChromosome {
    /// `genes[i]` is true when item `i` is packed.
    pub genes: Vec<bool>,
    fitness: u64,
}

impl KnapsackChromosome {
    /// Wraps genes in an unevaluated chromosome.
    pub fn new(genes: Vec<bool>) -> Self {
        Self { genes, fitness: 0 }
    }
}

impl Individual for KnapsackChromosome {
    type Fitness = u64;

    fn fitness(&self) -> u64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: u64) {
        self.fitness = fitness;
    }
}

/// A knapsack instance.
#[derive(Debug, Clone)]
pub struct KnapsackProblem {
    capacity: u64,
    items: Vec<Item>,
}

impl KnapsackProblem {
    /// Creates an instance.
    ///
    /// Returns [`EvolveError::InvalidInput`] if `items` is empty, item
    /// names are not unique, or the weights or values of all items together
    /// do not fit in a `u64`.
    pub fn new(capacity: u64, items: Vec<Item>) -> Result<Self> {
        if items.is_empty() {
            return Err(EvolveError::invalid_input("items must not be empty"));
        }
        let mut seen = HashSet::with_capacity(items.len());
        if let Some(dup) = items.iter().find(|item| !seen.insert(item.name.as_str())) {
            return Err(EvolveError::invalid_input(format!(
                "duplicate item name '{}'",
                dup.name
            )));
        }
        for (field, total) in [
            ("weight", checked_total(&items, |item| item.weight)),
            ("value", checked_total(&items, |item| item.value)),
        ] {
            if total.is_none() {
                return Err(EvolveError::invalid_input(format!(
                    "total item {field} exceeds {}",
                    u64::MAX
                )));
            }
        }
        Ok(Self { capacity, items })
    }

    /// Maximum total weight of a feasible packing.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Items in gene order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Decodes genes into the packed items and their totals.
    pub fn decode(&self, genes: &[bool]) -> Packing {
        let mut packing = Packing {
            items: Vec::new(),
            weight: 0,
            value: 0,
        };
        for (_, item) in genes.iter().zip(&self.items).filter(|&(&gene, _)| gene) {
            packing.weight += item.weight;
            packing.value += item.value;
            packing.items.push(item.name.clone());
        }
        packing
    }

    /// Packed value if the packing fits, zero otherwise.
    pub fn fitness(&self, genes: &[bool]) -> u64 {
        let (weight, value) = genes
            .iter()
            .zip(&self.items)
            .filter(|&(&gene, _)| gene)
            .fold((0u64, 0u64), |(w, v), (_, item)| {
                (w + item.weight, v + item.value)
            });
        if weight <= self.capacity {
            value
        } else {
            0
        }
    }

    /// Packages a finished run for the caller.
    ///
    /// The history lists each generation's best packing. The final packing
    /// is the best of the last evaluated generation.
    pub fn report(&self, result: &GaResult<KnapsackChromosome>) -> KnapsackReport {
        let history = result
            .history
            .iter()
            .map(|record| {
                let packing = self.decode(&record.best.genes);
                KnapsackGeneration {
                    generation: record.generation,
                    fitness: record.best_fitness,
                    value: packing.value,
                    weight: packing.weight,
                }
            })
            .collect();

        let last = self.decode(&result.last_best.genes);
        KnapsackReport {
            history,
            best_items: last.items,
            final_value: last.value,
            final_weight: last.weight,
        }
    }
}

fn checked_total(items: &[Item], field: impl Fn(&Item) -> u64) -> Option<u64> {
    items
        .iter()
        .try_fold(0u64, |total, item| total.checked_add(field(item)))
}

impl GaProblem for KnapsackProblem {
    type Individual = KnapsackChromosome;

    fn objective(&self) -> Objective {
        Objective::Maximize
    }

    fn create_individual<R: Rng>(&self, rng: &mut R) -> KnapsackChromosome {
        KnapsackChromosome::new(operators::random_bits(self.items.len(), rng))
    }

    fn evaluate(&self, individual: &KnapsackChromosome) -> u64 {
        self.fitness(&individual.genes)
    }

    fn offspring_count(&self) -> usize {
        2
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &KnapsackChromosome,
        parent2: &KnapsackChromosome,
        rng: &mut R,
    ) -> Vec<KnapsackChromosome> {
        let (a, b) = operators::single_point_crossover(&parent1.genes, &parent2.genes, rng);
        vec![KnapsackChromosome::new(a), KnapsackChromosome::new(b)]
    }

    fn mutate<R: Rng>(&self, individual: &mut KnapsackChromosome, rate: f64, rng: &mut R) {
        operators::bit_flip_mutation(&mut individual.genes, rate, rng);
    }
}

/// One generation of the knapsack history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackGeneration {
    /// 1-based generation index.
    pub generation: usize,
    /// Fitness of the generation's best packing; zero when it is overweight.
    pub fitness: u64,
    pub value: u64,
    pub weight: u64,
}

/// Knapsack solver response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackReport {
    pub history: Vec<KnapsackGeneration>,
    /// Items of the last generation's best packing, in item order.
    pub best_items: Vec<String>,
    pub final_value: u64,
    pub final_weight: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{GaConfig, GaRunner};
    use proptest::prelude::*;

    fn scenario() -> KnapsackProblem {
        KnapsackProblem::new(
            10,
            vec![
                Item::new("A", 5, 10),
                Item::new("B", 4, 40),
                Item::new("C", 6, 30),
                Item::new("D", 3, 50),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_decode_collects_selected_items() {
        let problem = scenario();
        let packing = problem.decode(&[false, true, false, true]);
        assert_eq!(packing.items, vec!["B", "D"]);
        assert_eq!(packing.weight, 7);
        assert_eq!(packing.value, 90);
    }

    #[test]
    fn test_fitness_feasible_and_infeasible() {
        let problem = scenario();
        assert_eq!(problem.fitness(&[false, true, false, true]), 90);
        assert_eq!(problem.fitness(&[false; 4]), 0);
        // A + C weigh exactly 11 > 10
        assert_eq!(problem.fitness(&[true, false, true, false]), 0);
        // B + C weigh exactly 10
        assert_eq!(problem.fitness(&[false, true, true, false]), 70);
    }

    #[test]
    fn test_rejects_empty_and_duplicate_items() {
        assert!(matches!(
            KnapsackProblem::new(5, vec![]),
            Err(EvolveError::InvalidInput(_))
        ));
        let err = KnapsackProblem::new(5, vec![Item::new("x", 1, 1), Item::new("x", 2, 2)])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate item name 'x'"));
    }

    #[test]
    fn test_rejects_totals_beyond_u64() {
        let half = u64::MAX / 2 + 1;
        let err = KnapsackProblem::new(
            u64::MAX,
            vec![Item::new("a", 0, half), Item::new("b", 0, half)],
        )
        .unwrap_err();
        assert!(matches!(err, EvolveError::InvalidInput(_)));
        assert!(err.to_string().contains("total item value"));

        let err = KnapsackProblem::new(5, vec![Item::new("a", u64::MAX, 1), Item::new("b", 1, 1)])
            .unwrap_err();
        assert!(err.to_string().contains("total item weight"));

        let problem = KnapsackProblem::new(
            u64::MAX,
            vec![Item::new("a", 0, half), Item::new("b", 0, half - 1)],
        )
        .unwrap();
        assert_eq!(problem.fitness(&[true, true]), u64::MAX);
    }

    #[test]
    fn test_chromosome_length_matches_items() {
        let problem = scenario();
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(problem.create_individual(&mut rng).genes.len(), 4);
        }
    }

    #[test]
    fn test_scenario_converges_to_best_subset() {
        let problem = scenario();
        let config = GaConfig::knapsack()
            .with_population_size(20)
            .with_generations(60)
            .with_seed(11);
        let result = GaRunner::run(&problem, &config).unwrap();
        let report = problem.report(&result);

        assert_eq!(report.final_value, 90);
        assert_eq!(report.final_weight, 7);
        assert_eq!(report.best_items, vec!["B", "D"]);
        assert_eq!(report.history.len(), 60);
        for entry in &report.history {
            assert!(entry.fitness == 0 || entry.weight <= 10, "{entry:?}");
        }
    }

    #[test]
    fn test_single_item_instance_runs() {
        let problem = KnapsackProblem::new(3, vec![Item::new("only", 2, 9)]).unwrap();
        let config = GaConfig::knapsack().with_seed(2);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(problem.report(&result).final_value, 9);
    }

    proptest! {
        #[test]
        fn prop_overweight_packing_scores_zero(
            capacity in 0u64..60,
            items in prop::collection::vec((0u64..20, 0u64..100), 1..12),
            seed_genes in prop::collection::vec(any::<bool>(), 12),
        ) {
            let items: Vec<Item> = items
                .into_iter()
                .enumerate()
                .map(|(i, (w, v))| Item::new(format!("item{i}"), w, v))
                .collect();
            let genes = &seed_genes[..items.len()];
            let problem = KnapsackProblem::new(capacity, items).unwrap();
            let packing = problem.decode(genes);
            let fitness = problem.fitness(genes);
            if packing.weight > capacity {
                prop_assert_eq!(fitness, 0);
            } else {
                prop_assert_eq!(fitness, packing.value);
            }
        }
    }
}
