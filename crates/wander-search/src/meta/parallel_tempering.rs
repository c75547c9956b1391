// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Parallel tempering metaheuristic.
//!
//! Runs a ladder of Metropolis replicas at geometrically spaced
//! temperatures. Cool replicas exploit, hot replicas explore, and
//! periodic Metropolis swaps between neighbouring rungs let good
//! solutions migrate towards the cold end while stuck replicas heat up
//! and diversify.
//!
//! # Mechanics
//!
//! One engine step performs a full tempering round:
//!
//! 1. Every replica advances `replica_steps` Metropolis iterations on its
//!    own copy of the solution, in parallel, one rayon task per replica.
//!    Each replica owns a seeded ChaCha generator, so no random state is
//!    shared between threads.
//! 2. Neighbouring replicas attempt a swap with the standard acceptance
//!    probability `exp((1/t_i - 1/t_j) * (E_i - E_j))`, where the energy
//!    is the negated oriented evaluation.
//! 3. The best valid replica is adopted as the search's current solution
//!    when it improves on it, feeding best-solution tracking.
//!
//! Replicas are seeded from the current solution at the first step of a
//! run and discarded when the run ends, while the current and best
//! solutions are retained across runs as usual.

use crate::meta::metaheuristic::Metaheuristic;
use crate::search::Step;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;
use wander_core::{
    eval::{Evaluation, Orientation},
    moves::Move,
    neigh::Neighbourhood,
    problem::Problem,
    solution::Solution,
    validation::Validation,
};

/// One rung of the temperature ladder with its own solution copy and
/// random generator.
#[derive(Debug, Clone)]
struct Replica<S> {
    temperature: f64,
    solution: S,
    evaluation: f64,
    validation: Validation,
    rng: ChaCha8Rng,
}

impl<S> Replica<S>
where
    S: Solution,
{
    /// Advances this replica by `steps` Metropolis iterations.
    fn run<P, N>(&mut self, problem: &P, neighbourhood: &N, orientation: Orientation, steps: u64)
    where
        P: Problem<Solution = S>,
        N: Neighbourhood<S>,
    {
        for _ in 0..steps {
            let Some(mv) = neighbourhood.random_move(&self.solution, &mut self.rng) else {
                return;
            };
            let validation = problem.validate_move(&mv, &mut self.solution, &self.validation);
            if !validation.passed() {
                continue;
            }
            let evaluation = problem
                .evaluate_move(&mv, &mut self.solution, &Evaluation::new(self.evaluation))
                .value();
            let delta = orientation.delta(evaluation, self.evaluation);
            if metropolis_accept(delta, self.temperature, &mut self.rng) {
                mv.apply(&mut self.solution);
                self.evaluation = evaluation;
                self.validation = validation;
            }
        }
    }
}

/// Metropolis acceptance for an oriented delta (positive is better).
#[inline]
fn metropolis_accept(delta: f64, temperature: f64, rng: &mut ChaCha8Rng) -> bool {
    delta >= 0.0 || rng.random::<f64>() < (delta / temperature).exp()
}

/// Oriented value: larger is always better.
#[inline]
fn oriented(orientation: Orientation, evaluation: f64) -> f64 {
    match orientation {
        Orientation::Maximize => evaluation,
        Orientation::Minimize => -evaluation,
    }
}

/// Metropolis search over a ladder of replicas at distinct temperatures,
/// with periodic swaps between neighbouring rungs.
#[derive(Debug, Clone)]
pub struct ParallelTempering<S> {
    temperatures: Vec<f64>,
    replica_steps: u64,
    replicas: Vec<Replica<S>>,
}

impl<S> ParallelTempering<S> {
    /// Creates a parallel tempering strategy with `num_replicas` replicas
    /// at geometrically spaced temperatures between `min_temperature` and
    /// `max_temperature`, each advancing `replica_steps` Metropolis
    /// iterations per engine step.
    ///
    /// # Panics
    ///
    /// Panics if `num_replicas` or `replica_steps` is zero, or if the
    /// temperature bounds are not positive finite values with
    /// `min_temperature <= max_temperature`.
    pub fn new(
        num_replicas: usize,
        min_temperature: f64,
        max_temperature: f64,
        replica_steps: u64,
    ) -> Self {
        assert!(
            num_replicas > 0,
            "called `ParallelTempering::new` with 0 replicas, expected at least one"
        );
        assert!(
            replica_steps > 0,
            "called `ParallelTempering::new` with 0 replica steps, expected at least one"
        );
        assert!(
            min_temperature.is_finite() && min_temperature > 0.0,
            "called `ParallelTempering::new` with invalid minimum temperature {}",
            min_temperature
        );
        assert!(
            max_temperature.is_finite() && max_temperature >= min_temperature,
            "called `ParallelTempering::new` with invalid maximum temperature {}, expected a finite value >= {}",
            max_temperature,
            min_temperature
        );

        let temperatures = if num_replicas == 1 {
            vec![min_temperature]
        } else {
            let ratio = max_temperature / min_temperature;
            (0..num_replicas)
                .map(|rung| {
                    min_temperature * ratio.powf(rung as f64 / (num_replicas - 1) as f64)
                })
                .collect()
        };

        Self {
            temperatures,
            replica_steps,
            replicas: Vec::new(),
        }
    }

    /// Returns the temperature ladder, coolest rung first.
    #[inline]
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    /// Returns the number of replicas.
    #[inline]
    pub fn num_replicas(&self) -> usize {
        self.temperatures.len()
    }
}

impl<P, N> Metaheuristic<P, N> for ParallelTempering<P::Solution>
where
    P: Problem,
    N: Neighbourhood<P::Solution> + Sync,
{
    fn name(&self) -> &str {
        "ParallelTempering"
    }

    fn search_started(&mut self) {
        self.replicas.clear();
    }

    fn search_step(&mut self, step: &mut Step<'_, P, N>) {
        let problem = step.problem();
        let neighbourhood = &step.neighbourhoods()[0];
        let orientation = step.orientation();

        if self.replicas.is_empty() {
            let base = step.current_solution().clone();
            let base_evaluation = step.current_evaluation();
            let base_validation = problem.validate(&base);
            let mut replicas = Vec::with_capacity(self.temperatures.len());
            for &temperature in &self.temperatures {
                let seed = step.rng().next_u64();
                replicas.push(Replica {
                    temperature,
                    solution: base.clone(),
                    evaluation: base_evaluation,
                    validation: base_validation,
                    rng: ChaCha8Rng::seed_from_u64(seed),
                });
            }
            self.replicas = replicas;
        }

        // Advance every replica in parallel; each owns its solution copy
        // and random generator.
        let replica_steps = self.replica_steps;
        self.replicas.par_iter_mut().for_each(|replica| {
            replica.run(problem, neighbourhood, orientation, replica_steps);
        });

        // Metropolis swaps between neighbouring rungs, coolest first.
        for rung in 0..self.replicas.len().saturating_sub(1) {
            let beta_cool = 1.0 / self.replicas[rung].temperature;
            let beta_hot = 1.0 / self.replicas[rung + 1].temperature;
            let energy_cool = -oriented(orientation, self.replicas[rung].evaluation);
            let energy_hot = -oriented(orientation, self.replicas[rung + 1].evaluation);
            let exponent = (beta_cool - beta_hot) * (energy_cool - energy_hot);
            let swap = exponent >= 0.0 || step.rng().random::<f64>() < exponent.exp();
            if swap {
                let (cool, hot) = self.replicas.split_at_mut(rung + 1);
                let cool = &mut cool[rung];
                let hot = &mut hot[0];
                std::mem::swap(&mut cool.solution, &mut hot.solution);
                std::mem::swap(&mut cool.evaluation, &mut hot.evaluation);
                std::mem::swap(&mut cool.validation, &mut hot.validation);
                debug!(rung, "swapped neighbouring replicas");
            }
        }

        // Adopt the best valid replica when it improves on the current
        // solution.
        let mut best_rung: Option<usize> = None;
        for (rung, replica) in self.replicas.iter().enumerate() {
            if !replica.validation.passed() {
                continue;
            }
            let better = match best_rung {
                None => true,
                Some(best) => {
                    orientation.improves(replica.evaluation, self.replicas[best].evaluation)
                }
            };
            if better {
                best_rung = Some(rung);
            }
        }
        if let Some(rung) = best_rung {
            let replica = &self.replicas[rung];
            if orientation.improves(replica.evaluation, step.current_evaluation()) {
                step.update_current_solution(replica.solution.clone(), replica.evaluation);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_ladder_is_geometric_and_ascending() {
        let tempering: ParallelTempering<i64> = ParallelTempering::new(4, 1.0, 8.0, 10);
        let ladder = tempering.temperatures();
        assert_eq!(ladder.len(), 4);
        assert!((ladder[0] - 1.0).abs() < 1e-12);
        assert!((ladder[1] - 2.0).abs() < 1e-12);
        assert!((ladder[2] - 4.0).abs() < 1e-12);
        assert!((ladder[3] - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_replica_sits_at_minimum_temperature() {
        let tempering: ParallelTempering<i64> = ParallelTempering::new(1, 0.5, 8.0, 10);
        assert_eq!(tempering.temperatures(), &[0.5]);
    }

    #[test]
    #[should_panic(expected = "0 replicas")]
    fn test_zero_replicas_are_rejected() {
        let _: ParallelTempering<i64> = ParallelTempering::new(0, 1.0, 8.0, 10);
    }

    #[test]
    #[should_panic(expected = "invalid maximum temperature")]
    fn test_inverted_temperature_bounds_are_rejected() {
        let _: ParallelTempering<i64> = ParallelTempering::new(2, 8.0, 1.0, 10);
    }

    #[test]
    fn test_metropolis_always_accepts_improvements() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(metropolis_accept(1.0, 0.5, &mut rng));
        assert!(metropolis_accept(0.0, 0.5, &mut rng));
    }

    #[test]
    fn test_metropolis_rejects_hopeless_moves_at_low_temperature() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // exp(-1e6) underflows to zero, no draw can pass.
        for _ in 0..100 {
            assert!(!metropolis_accept(-1000.0, 0.001, &mut rng));
        }
    }
}
