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

//! The neighbourhood search engine.
//!
//! `LocalSearch` drives a problem through repeated application of moves
//! generated by its neighbourhoods, under the control of a pluggable
//! metaheuristic. It owns the search lifecycle (the status state machine,
//! listeners and best-solution tracking), the current solution with its
//! evaluated-move cache, and the stop-criterion checker.
//!
//! ## Threading
//!
//! A search may be shared across threads. `start` blocks the calling
//! thread for the duration of the run; `stop` and the getters are safe to
//! call concurrently from anywhere, while configuration mutators require
//! the search to be idle and fail with `NotIdle` otherwise. Internally,
//! status transitions serialize on the status lock, the step loop reads
//! the status through an atomic (so it never orders the status lock after
//! the run-space lock), and listeners only ever fire without the status
//! lock held.
//!
//! ## Metaheuristics
//!
//! An algorithm implements one step of the search against the primitives
//! exposed by `Step`: evaluating, validating and comparing moves (served
//! from the evaluated-move cache where possible), accepting or rejecting
//! them, and requesting termination. Current solution and evaluation are
//! retained across runs, so restarting a search continues from where the
//! previous run arrived; only the per-run counters are reset.
//!
//! A panic raised by user problem code inside the step loop unwinds to
//! the caller of `start` after the checker has been stopped and the
//! search returned to idle, leaving the instance reusable.

use crate::{
    cache::{EvaluatedMoveCache, SingleEvaluatedMoveCache},
    checker::StopCriterionChecker,
    constants::{INVALID_COUNT, INVALID_DELTA, INVALID_MILLIS},
    control::SearchControl,
    criteria::stop_criterion::StopCriterion,
    err::SearchError,
    listener::{ListenerId, ListenerSet, SearchListener},
    meta::metaheuristic::Metaheuristic,
    status::SearchStatus,
};
use parking_lot::Mutex;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use wander_core::{
    eval::{Evaluation, Orientation},
    moves::Move,
    neigh::Neighbourhood,
    problem::Problem,
    solution::Solution,
    validation::Validation,
};

/// Best solution found so far, retained across runs.
struct BestSolution<S> {
    solution: Option<S>,
    evaluation: Option<f64>,
}

/// State owned by the thread driving a run: the neighbourhoods, the
/// metaheuristic, the current solution with its evaluation and
/// validation, the evaluated-move cache and the search's random
/// generator. Locked per step, so getters interleave between steps.
struct RunSpace<P, N, H>
where
    P: Problem,
    N: Neighbourhood<P::Solution>,
{
    neighbourhoods: Vec<N>,
    heuristic: H,
    current: Option<P::Solution>,
    current_evaluation: Option<f64>,
    current_validation: Option<Validation>,
    cache: Box<dyn EvaluatedMoveCache<N::Move>>,
    rng: ChaCha8Rng,
}

/// A neighbourhood search: repeatedly modifies a current solution by
/// applying moves, tracking the best solution seen across runs.
pub struct LocalSearch<P, N, H>
where
    P: Problem,
    N: Neighbourhood<P::Solution>,
{
    name: String,
    problem: Arc<P>,
    control: Arc<SearchControl>,
    checker: Mutex<StopCriterionChecker>,
    listeners: Mutex<ListenerSet<P::Solution>>,
    best: Mutex<BestSolution<P::Solution>>,
    run: Mutex<RunSpace<P, N, H>>,
}

impl<P, N, H> LocalSearch<P, N, H>
where
    P: Problem,
    N: Neighbourhood<P::Solution> + Send,
    H: Metaheuristic<P, N>,
{
    /// Creates a search named after its metaheuristic.
    pub fn new(problem: Arc<P>, neighbourhoods: Vec<N>, heuristic: H) -> Self {
        let name = heuristic.name().to_string();
        Self::with_name(name, problem, neighbourhoods, heuristic)
    }

    /// Creates a search with a custom name, shown in log output.
    pub fn with_name(
        name: impl Into<String>,
        problem: Arc<P>,
        neighbourhoods: Vec<N>,
        heuristic: H,
    ) -> Self {
        let seed = rand::rng().next_u64();
        Self {
            name: name.into(),
            problem,
            control: Arc::new(SearchControl::new()),
            checker: Mutex::new(StopCriterionChecker::new()),
            listeners: Mutex::new(ListenerSet::new()),
            best: Mutex::new(BestSolution {
                solution: None,
                evaluation: None,
            }),
            run: Mutex::new(RunSpace {
                neighbourhoods,
                heuristic,
                current: None,
                current_evaluation: None,
                current_validation: None,
                cache: Box::new(SingleEvaluatedMoveCache::new()),
                rng: ChaCha8Rng::seed_from_u64(seed),
            }),
        }
    }

    /// Returns the name of this search.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the problem this search solves.
    #[inline]
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Returns the current search status.
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.control.status()
    }

    /* ------------------------------------------------------------ */
    /* Idle-only configuration                                      */
    /* ------------------------------------------------------------ */

    /// Reseeds the search's random generator for reproducible runs.
    /// Requires an idle search.
    pub fn set_rng_seed(&self, seed: u64) -> Result<(), SearchError> {
        self.control.with_idle("seed random generator", || {
            self.run.lock().rng = ChaCha8Rng::seed_from_u64(seed);
        })
    }

    /// Adds a stop criterion. Requires an idle search.
    pub fn add_stop_criterion(&self, criterion: Arc<dyn StopCriterion>) -> Result<(), SearchError> {
        self.control.with_idle("add stop criterion", || {
            self.checker.lock().add(criterion);
        })
    }

    /// Removes a previously added stop criterion, matched by identity.
    /// Requires an idle search.
    pub fn remove_stop_criterion(
        &self,
        criterion: &Arc<dyn StopCriterion>,
    ) -> Result<bool, SearchError> {
        self.control
            .with_idle("remove stop criterion", || self.checker.lock().remove(criterion))
    }

    /// Sets the period of the background stop-criterion checks.
    /// Requires an idle search.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn set_stop_criterion_check_period(&self, period: Duration) -> Result<(), SearchError> {
        self.control.with_idle("set stop criterion check period", || {
            self.checker.lock().set_period(period);
        })
    }

    /// Registers a search listener, returning the handle that removes it
    /// again. Requires an idle search.
    pub fn add_search_listener(
        &self,
        listener: Box<dyn SearchListener<P::Solution>>,
    ) -> Result<ListenerId, SearchError> {
        self.control
            .with_idle("add search listener", || self.listeners.lock().add(listener))
    }

    /// Removes a search listener by its handle. Requires an idle search.
    pub fn remove_search_listener(&self, id: ListenerId) -> Result<bool, SearchError> {
        self.control
            .with_idle("remove search listener", || self.listeners.lock().remove(id))
    }

    /// Replaces the evaluated-move cache. Requires an idle search.
    pub fn set_evaluated_move_cache(
        &self,
        cache: Box<dyn EvaluatedMoveCache<N::Move>>,
    ) -> Result<(), SearchError> {
        self.control.with_idle("set evaluated move cache", || {
            let mut run = self.run.lock();
            run.cache = cache;
            run.cache.clear();
        })
    }

    /// Adopts `solution` as the current solution: evaluates and validates
    /// it, clears the evaluated-move cache and updates the best solution
    /// when the new current solution is not rejected. Requires an idle
    /// search.
    pub fn set_current_solution(&self, solution: P::Solution) -> Result<(), SearchError> {
        let announce = self.control.with_idle("set current solution", || {
            let mut run = self.run.lock();
            self.adjust_current_solution(&mut run, solution)
        })?;
        self.announce_new_best(announce);
        Ok(())
    }

    /* ------------------------------------------------------------ */
    /* Metadata getters                                             */
    /* ------------------------------------------------------------ */

    /// Deep copy of the best solution found so far, retained across runs.
    pub fn best_solution(&self) -> Option<P::Solution> {
        self.best.lock().solution.clone()
    }

    /// Evaluation of the best solution found so far.
    pub fn best_solution_evaluation(&self) -> Option<f64> {
        self.best.lock().evaluation
    }

    /// Deep copy of the current solution, retained across runs. `None`
    /// until one has been set or created during initialization.
    pub fn current_solution(&self) -> Option<P::Solution> {
        self.run.lock().current.clone()
    }

    /// Evaluation of the current solution; `None` while the current
    /// solution is undefined.
    pub fn current_solution_evaluation(&self) -> Option<f64> {
        self.run.lock().current_evaluation
    }

    /// Runtime of the current (or last) run in milliseconds;
    /// [`INVALID_MILLIS`] while initializing or before the first run.
    pub fn runtime_ms(&self) -> i64 {
        self.control
            .snapshot()
            .runtime
            .map_or(INVALID_MILLIS, |runtime| runtime.as_millis() as i64)
    }

    /// Steps completed in the current (or last) run; [`INVALID_COUNT`]
    /// while initializing or before the first run.
    pub fn steps(&self) -> i64 {
        self.control
            .snapshot()
            .steps
            .map_or(INVALID_COUNT, |steps| steps as i64)
    }

    /// Milliseconds since the last best-solution improvement;
    /// [`INVALID_MILLIS`] while initializing or before the first run.
    pub fn time_without_improvement_ms(&self) -> i64 {
        self.control
            .snapshot()
            .time_without_improvement
            .map_or(INVALID_MILLIS, |stagnation| stagnation.as_millis() as i64)
    }

    /// Steps since the last best-solution improvement; [`INVALID_COUNT`]
    /// while initializing or before the first run.
    pub fn steps_without_improvement(&self) -> i64 {
        self.control
            .snapshot()
            .steps_without_improvement
            .map_or(INVALID_COUNT, |stagnation| stagnation as i64)
    }

    /// Smallest strictly positive improvement delta observed so far;
    /// [`INVALID_DELTA`] before any improvement with a previous best.
    pub fn min_delta(&self) -> f64 {
        self.control
            .snapshot()
            .min_delta
            .unwrap_or(INVALID_DELTA)
    }

    /// Moves accepted during the current (or last) run; [`INVALID_COUNT`]
    /// while initializing or before the first run.
    pub fn num_accepted_moves(&self) -> i64 {
        if self.control.status() == SearchStatus::Initializing {
            INVALID_COUNT
        } else {
            self.control.stats().accepted()
        }
    }

    /// Moves rejected during the current (or last) run; [`INVALID_COUNT`]
    /// while initializing or before the first run.
    pub fn num_rejected_moves(&self) -> i64 {
        if self.control.status() == SearchStatus::Initializing {
            INVALID_COUNT
        } else {
            self.control.stats().rejected()
        }
    }

    /* ------------------------------------------------------------ */
    /* Lifecycle                                                    */
    /* ------------------------------------------------------------ */

    /// Requests a cooperative stop. May be called from any thread and is
    /// idempotent; the step loop exits before its next step. A no-op
    /// while the search is idle.
    pub fn stop(&self) {
        if self.control.request_stop() {
            debug!(search = %self.name, "stop requested");
        }
    }

    /// Runs the search on the calling thread, blocking until it returns
    /// to idle. Fails with `NotIdle` when the search is already active,
    /// `Disposed` after disposal, and `Init` when the configuration is
    /// invalid; the search is idle again whenever an error is returned.
    pub fn start(&self) -> Result<(), SearchError> {
        self.control.begin_run("start search")?;
        self.fire_status_changed(SearchStatus::Initializing);
        info!(search = %self.name, "search started");
        self.fire(|listener| listener.search_started());

        self.control.stats().reset_for_run(self.control.now_ms());

        let init_result = {
            let mut run = self.run.lock();
            self.init_run(&mut run)
        };
        match init_result {
            Ok(announce) => self.announce_new_best(announce),
            Err(error) => {
                warn!(search = %self.name, %error, "search initialization failed");
                self.control.stats().set_stop(self.control.now_ms());
                self.control.return_to_idle();
                self.fire_status_changed(SearchStatus::Idle);
                return Err(error);
            }
        }

        if self.control.enter_running() {
            self.fire_status_changed(SearchStatus::Running);
            self.checker
                .lock()
                .start_checking(Arc::clone(&self.control));

            // Restores a consistent idle state when user code panics
            // inside the step loop, before the panic reaches our caller.
            let mut guard = AbortGuard {
                control: &self.control,
                checker: &self.checker,
                armed: true,
            };
            self.run_loop();
            guard.armed = false;
        }

        self.checker.lock().stop_checking();
        self.control.stats().set_stop(self.control.now_ms());
        self.fire_status_changed(SearchStatus::Terminating);
        self.fire(|listener| listener.search_stopped());
        info!(
            search = %self.name,
            steps = self.control.stats().steps(),
            accepted = self.control.stats().accepted(),
            rejected = self.control.stats().rejected(),
            best = ?self.best.lock().evaluation,
            "search stopped"
        );
        self.control.return_to_idle();
        self.fire_status_changed(SearchStatus::Idle);
        Ok(())
    }

    /// Disposes the search. Only permitted while idle; repeated disposal
    /// is a no-op. Every other operation fails with `Disposed` afterwards.
    pub fn dispose(&self) -> Result<(), SearchError> {
        if self.control.dispose("dispose search")? {
            self.checker.lock().stop_checking();
            info!(search = %self.name, "search disposed");
            self.fire_status_changed(SearchStatus::Disposed);
        }
        Ok(())
    }

    /* ------------------------------------------------------------ */
    /* Internals                                                    */
    /* ------------------------------------------------------------ */

    fn fire(&self, f: impl FnMut(&mut dyn SearchListener<P::Solution>)) {
        self.listeners.lock().for_each(f);
    }

    fn fire_status_changed(&self, status: SearchStatus) {
        self.fire(|listener| listener.status_changed(status));
    }

    fn announce_new_best(&self, announce: Option<(P::Solution, f64)>) {
        if let Some((solution, evaluation)) = announce {
            debug!(search = %self.name, evaluation, "new best solution");
            self.fire(|listener| listener.new_best_solution(&solution, evaluation));
        }
    }

    /// Validates the configuration and establishes a current solution,
    /// drawing a random one from the problem when none is set.
    fn init_run(
        &self,
        run: &mut RunSpace<P, N, H>,
    ) -> Result<Option<(P::Solution, f64)>, SearchError> {
        if run.neighbourhoods.is_empty() {
            return Err(SearchError::Init("no neighbourhoods configured".to_string()));
        }
        run.heuristic.validate(&run.neighbourhoods)?;
        run.heuristic.search_started();
        if run.current.is_none() {
            let solution = self.problem.random_solution(&mut run.rng);
            return Ok(self.adjust_current_solution(run, solution));
        }
        Ok(None)
    }

    /// Installs a new current solution: clears the cache, evaluates and
    /// validates, and updates the best solution when not rejected.
    /// Returns the new best to announce, if any; announcing is left to
    /// the caller so it happens outside the status lock.
    fn adjust_current_solution(
        &self,
        run: &mut RunSpace<P, N, H>,
        solution: P::Solution,
    ) -> Option<(P::Solution, f64)> {
        run.cache.clear();
        let evaluation = self.problem.evaluate(&solution).value();
        let validation = self.problem.validate(&solution);

        let announce = if validation.passed()
            && update_best_solution(
                &self.best,
                &self.control,
                self.problem.orientation(),
                &solution,
                evaluation,
            ) {
            Some((solution.clone(), evaluation))
        } else {
            None
        };

        run.current = Some(solution);
        run.current_evaluation = Some(evaluation);
        run.current_validation = Some(validation);
        announce
    }

    fn run_loop(&self) {
        while self.control.status() == SearchStatus::Running {
            if !self.run_step() {
                break;
            }
            self.control.stats().on_step();
            let steps = self.control.stats().steps().max(0) as u64;
            debug!(search = %self.name, steps, "step completed");
            self.fire(|listener| listener.step_completed(steps));
            // The checker guard must drop before the status lock is
            // taken, preserving the lock order of the idle mutators.
            let should_stop = self.checker.lock().stop_criterion_satisfied(&self.control);
            if should_stop {
                self.control.request_stop();
            }
        }
    }

    /// Executes a single algorithm step under the run-space lock.
    fn run_step(&self) -> bool {
        let mut run = self.run.lock();
        let RunSpace {
            neighbourhoods,
            heuristic,
            current,
            current_evaluation,
            current_validation,
            cache,
            rng,
        } = &mut *run;

        let (Some(solution), Some(evaluation), Some(validation)) = (
            current.as_mut(),
            current_evaluation.as_mut(),
            current_validation.as_mut(),
        ) else {
            debug_assert!(false, "step loop entered without a current solution");
            self.control.request_stop();
            return false;
        };

        let mut step = Step {
            problem: self.problem.as_ref(),
            orientation: self.problem.orientation(),
            neighbourhoods: neighbourhoods.as_slice(),
            solution,
            evaluation,
            validation,
            cache: cache.as_mut(),
            rng,
            control: &self.control,
            best: &self.best,
            listeners: &self.listeners,
            name: &self.name,
        };
        heuristic.search_step(&mut step);
        true
    }
}

/// Restores idle and stops the checker when a panic unwinds out of the
/// step loop, so the caller of `start` observes a consistent search.
struct AbortGuard<'a> {
    control: &'a SearchControl,
    checker: &'a Mutex<StopCriterionChecker>,
    armed: bool,
}

impl Drop for AbortGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.checker.lock().stop_checking();
            self.control.stats().set_stop(self.control.now_ms());
            self.control.return_to_idle();
        }
    }
}

/// Replaces the best solution on strict improvement under the problem's
/// orientation; ties never replace the incumbent. Returns whether the
/// best solution changed.
fn update_best_solution<S: Solution>(
    best: &Mutex<BestSolution<S>>,
    control: &SearchControl,
    orientation: Orientation,
    candidate: &S,
    evaluation: f64,
) -> bool {
    let mut best = best.lock();
    let improved = match best.evaluation {
        None => true,
        Some(incumbent) => orientation.improves(evaluation, incumbent),
    };
    if improved {
        // Only strictly positive deltas count towards the minimum.
        let delta = best
            .evaluation
            .map(|incumbent| (evaluation - incumbent).abs());
        best.solution = Some(candidate.clone());
        best.evaluation = Some(evaluation);
        control
            .stats()
            .on_improvement(control.now_ms(), evaluation, delta);
    }
    improved
}

/// One iteration of the search loop, handed to the metaheuristic.
///
/// Exposes the current solution together with the move primitives:
/// cached evaluation and validation, improvement checks, best-move
/// selection, and acceptance or rejection with the full bookkeeping
/// (cache invalidation, best-solution tracking, counters, listeners).
pub struct Step<'a, P, N>
where
    P: Problem,
    N: Neighbourhood<P::Solution>,
{
    problem: &'a P,
    orientation: Orientation,
    neighbourhoods: &'a [N],
    solution: &'a mut P::Solution,
    evaluation: &'a mut f64,
    validation: &'a mut Validation,
    cache: &'a mut dyn EvaluatedMoveCache<N::Move>,
    rng: &'a mut ChaCha8Rng,
    control: &'a SearchControl,
    best: &'a Mutex<BestSolution<P::Solution>>,
    listeners: &'a Mutex<ListenerSet<P::Solution>>,
    name: &'a str,
}

impl<'a, P, N> Step<'a, P, N>
where
    P: Problem,
    N: Neighbourhood<P::Solution>,
{
    /// The problem being solved.
    #[inline]
    pub fn problem(&self) -> &'a P {
        self.problem
    }

    /// The problem's optimization orientation.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The neighbourhoods of this search, in configuration order.
    #[inline]
    pub fn neighbourhoods(&self) -> &'a [N] {
        self.neighbourhoods
    }

    /// Number of configured neighbourhoods.
    #[inline]
    pub fn num_neighbourhoods(&self) -> usize {
        self.neighbourhoods.len()
    }

    /// The current solution.
    #[inline]
    pub fn current_solution(&self) -> &P::Solution {
        self.solution
    }

    /// Evaluation of the current solution.
    #[inline]
    pub fn current_evaluation(&self) -> f64 {
        *self.evaluation
    }

    /// Evaluation of the best solution found so far, if any.
    pub fn best_evaluation(&self) -> Option<f64> {
        self.best.lock().evaluation
    }

    /// The search's random generator.
    #[inline]
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        self.rng
    }

    /// Requests a cooperative stop; the loop exits before the next step.
    #[inline]
    pub fn stop(&self) {
        self.control.request_stop();
    }

    /// Draws a random move from the neighbourhood with the given index.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `neighbourhood` is out of bounds.
    pub fn random_move(&mut self, neighbourhood: usize) -> Option<N::Move> {
        debug_assert!(
            neighbourhood < self.neighbourhoods.len(),
            "called `Step::random_move` with neighbourhood index out of bounds: the len is {} but the index is {}",
            self.neighbourhoods.len(),
            neighbourhood
        );
        self.neighbourhoods[neighbourhood].random_move(self.solution, self.rng)
    }

    /// Enumerates all moves of the neighbourhood with the given index.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `neighbourhood` is out of bounds.
    pub fn all_moves(&self, neighbourhood: usize) -> Vec<N::Move> {
        debug_assert!(
            neighbourhood < self.neighbourhoods.len(),
            "called `Step::all_moves` with neighbourhood index out of bounds: the len is {} but the index is {}",
            self.neighbourhoods.len(),
            neighbourhood
        );
        self.neighbourhoods[neighbourhood].all_moves(self.solution)
    }

    /// Evaluates the neighbour reached by applying `mv` to the current
    /// solution, served from the evaluated-move cache when possible.
    pub fn evaluate_move(&mut self, mv: &N::Move) -> f64 {
        if let Some(evaluation) = self.cache.cached_evaluation(mv) {
            return evaluation;
        }
        let evaluation = self
            .problem
            .evaluate_move(mv, self.solution, &Evaluation::new(*self.evaluation))
            .value();
        self.cache.cache_evaluation(mv.clone(), evaluation);
        evaluation
    }

    /// Validates the neighbour reached by applying `mv` to the current
    /// solution, served from the evaluated-move cache when possible.
    /// Returns `true` when the neighbour is *not* rejected.
    pub fn validate_move(&mut self, mv: &N::Move) -> bool {
        if let Some(rejected) = self.cache.cached_rejection(mv) {
            return !rejected;
        }
        let validation = self
            .problem
            .validate_move(mv, self.solution, self.validation);
        self.cache.cache_rejection(mv.clone(), !validation.passed());
        validation.passed()
    }

    /// Whether applying `mv` yields a valid neighbour with a strictly
    /// better evaluation than the current solution.
    pub fn is_improvement(&mut self, mv: &N::Move) -> bool {
        if !self.validate_move(mv) {
            return false;
        }
        let evaluation = self.evaluate_move(mv);
        self.orientation.delta(evaluation, *self.evaluation) > 0.0
    }

    /// Among the given moves, returns the one leading to a valid
    /// neighbour with the largest delta, restricted to strictly positive
    /// deltas when `positive_only` is set. Ties keep the first
    /// encountered move. The winner's evaluation and validity are cached
    /// again before returning, so they survive single-slot eviction
    /// during the scan.
    pub fn move_with_largest_delta(
        &mut self,
        moves: &[N::Move],
        positive_only: bool,
    ) -> Option<N::Move> {
        let mut best_move: Option<&N::Move> = None;
        let mut best_delta = f64::NEG_INFINITY;
        let mut best_evaluation = 0.0;

        for mv in moves {
            if !self.validate_move(mv) {
                continue;
            }
            let evaluation = self.evaluate_move(mv);
            let delta = self.orientation.delta(evaluation, *self.evaluation);
            if delta > best_delta && (!positive_only || delta > 0.0) {
                best_move = Some(mv);
                best_delta = delta;
                best_evaluation = evaluation;
            }
        }

        let winner = best_move.cloned();
        if let Some(mv) = &winner {
            self.cache.cache_rejection(mv.clone(), false);
            self.cache.cache_evaluation(mv.clone(), best_evaluation);
        }
        winner
    }

    /// Accepts `mv`: applies it to the current solution, clears the
    /// cache, updates the current evaluation and the best solution,
    /// bumps the accepted counter and informs listeners.
    ///
    /// Callers must have validated the move; accepting a move that leads
    /// to a rejected neighbour corrupts best-solution tracking.
    pub fn accept_move(&mut self, mv: N::Move) {
        let evaluation = self.evaluate_move(&mv);
        mv.apply(self.solution);
        self.cache.clear();
        *self.evaluation = evaluation;
        // Accepted moves lead to validated neighbours by contract.
        *self.validation = Validation::PASSED;

        let improved = update_best_solution(
            self.best,
            self.control,
            self.orientation,
            self.solution,
            evaluation,
        );
        self.control.stats().on_accepted();

        let solution: &P::Solution = self.solution;
        let mut listeners = self.listeners.lock();
        listeners.for_each(|listener| listener.modified_current_solution(solution, evaluation));
        if improved {
            debug!(search = %self.name, evaluation, "new best solution");
            listeners.for_each(|listener| listener.new_best_solution(solution, evaluation));
        }
    }

    /// Rejects `mv`, bumping the rejected counter.
    pub fn reject_move(&mut self, _mv: &N::Move) {
        self.control.stats().on_rejected();
    }

    /// Replaces the current solution wholesale with an already evaluated
    /// one; used by algorithms that derive candidates outside the
    /// move primitives, such as replica-based searches. Validates the
    /// solution, clears the cache and updates the best solution when not
    /// rejected.
    pub fn update_current_solution(&mut self, solution: P::Solution, evaluation: f64) {
        self.cache.clear();
        *self.solution = solution;
        *self.evaluation = evaluation;
        let validation = self.problem.validate(self.solution);
        *self.validation = validation;

        let improved = validation.passed()
            && update_best_solution(
                self.best,
                self.control,
                self.orientation,
                self.solution,
                evaluation,
            );

        let solution: &P::Solution = self.solution;
        let mut listeners = self.listeners.lock();
        listeners.for_each(|listener| listener.modified_current_solution(solution, evaluation));
        if improved {
            debug!(search = %self.name, evaluation, "new best solution");
            listeners.for_each(|listener| listener.new_best_solution(solution, evaluation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{MaxRuntime, MaxSteps};
    use crate::meta::random_descent::RandomDescent;
    use crate::meta::steepest_descent::SteepestDescent;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Instant;

    // A one-dimensional test domain: minimize |x - target| over i64,
    // moving by fixed offsets.
    struct LineProblem {
        target: i64,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct OffsetMove(i64);

    impl Move<i64> for OffsetMove {
        fn apply(&self, solution: &mut i64) {
            *solution += self.0;
        }

        fn undo(&self, solution: &mut i64) {
            *solution -= self.0;
        }
    }

    struct OffsetNeighbourhood {
        offsets: Vec<i64>,
    }

    impl Neighbourhood<i64> for OffsetNeighbourhood {
        type Move = OffsetMove;

        fn random_move(&self, _solution: &i64, rng: &mut dyn RngCore) -> Option<OffsetMove> {
            if self.offsets.is_empty() {
                return None;
            }
            let index = (rng.next_u64() % self.offsets.len() as u64) as usize;
            Some(OffsetMove(self.offsets[index]))
        }

        fn all_moves(&self, _solution: &i64) -> Vec<OffsetMove> {
            self.offsets.iter().map(|&offset| OffsetMove(offset)).collect()
        }
    }

    impl Problem for LineProblem {
        type Solution = i64;

        fn orientation(&self) -> Orientation {
            Orientation::Minimize
        }

        fn evaluate(&self, solution: &i64) -> Evaluation {
            Evaluation::new((solution - self.target).abs() as f64)
        }

        fn validate(&self, _solution: &i64) -> Validation {
            Validation::PASSED
        }

        fn random_solution(&self, rng: &mut dyn RngCore) -> i64 {
            (rng.next_u64() % 41) as i64 - 20
        }
    }

    fn steepest_line_search() -> LocalSearch<LineProblem, OffsetNeighbourhood, SteepestDescent> {
        LocalSearch::new(
            Arc::new(LineProblem { target: 7 }),
            vec![OffsetNeighbourhood {
                offsets: vec![-1, 1],
            }],
            SteepestDescent::new(),
        )
    }

    fn wait_until(mut condition: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !condition() {
            assert!(
                Instant::now() < deadline,
                "condition not reached within five seconds"
            );
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_search_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LocalSearch<LineProblem, OffsetNeighbourhood, SteepestDescent>>();
    }

    #[test]
    fn test_metadata_carries_sentinels_before_the_first_run() {
        let search = steepest_line_search();
        assert_eq!(search.status(), SearchStatus::Idle);
        assert_eq!(search.runtime_ms(), INVALID_MILLIS);
        assert_eq!(search.steps(), INVALID_COUNT);
        assert_eq!(search.num_accepted_moves(), INVALID_COUNT);
        assert_eq!(search.num_rejected_moves(), INVALID_COUNT);
        assert_eq!(search.min_delta(), INVALID_DELTA);
        assert_eq!(search.best_solution(), None);
        assert_eq!(search.current_solution(), None);
    }

    #[test]
    fn test_steepest_descent_converges_and_returns_to_idle() {
        let search = steepest_line_search();
        search.set_current_solution(0).unwrap();
        search.start().unwrap();

        assert_eq!(search.status(), SearchStatus::Idle);
        assert_eq!(search.best_solution(), Some(7));
        assert_eq!(search.best_solution_evaluation(), Some(0.0));
        assert_eq!(search.current_solution(), Some(7));
        assert!(search.steps() >= 7);
        assert!(search.runtime_ms() >= 0);
        assert_eq!(search.num_accepted_moves(), 7);
    }

    #[test]
    fn test_restart_continues_from_previous_current_solution() {
        let search = steepest_line_search();
        search.set_current_solution(0).unwrap();
        search.start().unwrap();
        let first_best = search.best_solution_evaluation().unwrap();
        let first_current = search.current_solution();

        search.start().unwrap();
        assert_eq!(search.current_solution(), first_current);
        // The second run starts at the optimum and stops immediately.
        assert_eq!(search.num_accepted_moves(), 0);
        assert_eq!(search.best_solution_evaluation(), Some(first_best));
    }

    #[test]
    fn test_initialization_creates_a_random_current_solution() {
        let search = steepest_line_search();
        search.set_rng_seed(7).unwrap();
        search.start().unwrap();
        // Whatever the random starting point, steepest descent on this
        // landscape always ends in the global optimum.
        assert_eq!(search.best_solution(), Some(7));
    }

    #[test]
    fn test_mutators_fail_while_running() {
        let search = LocalSearch::new(
            Arc::new(LineProblem { target: 7 }),
            vec![OffsetNeighbourhood {
                offsets: vec![-1, 1],
            }],
            RandomDescent::new(),
        );
        search.set_current_solution(0).unwrap();
        search
            .add_stop_criterion(Arc::new(MaxRuntime::new(Duration::from_secs(5))))
            .unwrap();

        std::thread::scope(|scope| {
            let worker = scope.spawn(|| search.start());
            wait_until(|| search.status() == SearchStatus::Running);

            assert!(matches!(
                search.set_current_solution(3),
                Err(SearchError::NotIdle { .. })
            ));
            assert!(matches!(
                search.add_stop_criterion(Arc::new(MaxSteps::new(1))),
                Err(SearchError::NotIdle { .. })
            ));
            assert!(matches!(
                search.dispose(),
                Err(SearchError::NotIdle { .. })
            ));

            search.stop();
            worker.join().unwrap().unwrap();
        });
        assert_eq!(search.status(), SearchStatus::Idle);
    }

    #[test]
    fn test_stop_criterion_bounds_the_run() {
        let search = LocalSearch::new(
            Arc::new(LineProblem { target: 7 }),
            vec![OffsetNeighbourhood {
                offsets: vec![-1, 1],
            }],
            RandomDescent::new(),
        );
        search
            .add_stop_criterion(Arc::new(MaxSteps::new(50)))
            .unwrap();
        search.start().unwrap();

        // The synchronous poll reacts within a single step.
        assert_eq!(search.steps(), 50);
        assert_eq!(
            search.num_accepted_moves() + search.num_rejected_moves(),
            50
        );
    }

    #[test]
    fn test_empty_neighbourhood_list_fails_initialization() {
        let search: LocalSearch<LineProblem, OffsetNeighbourhood, SteepestDescent> =
            LocalSearch::new(
                Arc::new(LineProblem { target: 7 }),
                Vec::new(),
                SteepestDescent::new(),
            );
        let error = search.start().unwrap_err();
        assert!(matches!(error, SearchError::Init(_)));
        assert_eq!(search.status(), SearchStatus::Idle);
    }

    #[test]
    fn test_dispose_lifecycle() {
        let search = steepest_line_search();
        search.dispose().unwrap();
        assert_eq!(search.status(), SearchStatus::Disposed);
        // Repeated disposal stays permitted.
        search.dispose().unwrap();

        assert!(matches!(
            search.start(),
            Err(SearchError::Disposed { .. })
        ));
        assert!(matches!(
            search.set_current_solution(1),
            Err(SearchError::Disposed { .. })
        ));
    }

    #[test]
    fn test_panicking_step_restores_idle() {
        struct PanickingStep;

        impl<P, N> Metaheuristic<P, N> for PanickingStep
        where
            P: Problem,
            N: Neighbourhood<P::Solution>,
        {
            fn name(&self) -> &str {
                "PanickingStep"
            }

            fn search_step(&mut self, _step: &mut Step<'_, P, N>) {
                panic!("user problem code failed");
            }
        }

        let search = LocalSearch::new(
            Arc::new(LineProblem { target: 7 }),
            vec![OffsetNeighbourhood {
                offsets: vec![-1, 1],
            }],
            PanickingStep,
        );
        search.set_current_solution(0).unwrap();

        std::thread::scope(|scope| {
            let worker = scope.spawn(|| search.start());
            assert!(worker.join().is_err(), "panic must reach the caller");
        });
        // The search is consistent and reusable after the unwind.
        assert_eq!(search.status(), SearchStatus::Idle);
        assert_eq!(search.current_solution(), Some(0));
    }

    #[test]
    fn test_listeners_observe_the_lifecycle() {
        // Listeners are moved into the search; observe through a shared
        // flag instead.
        struct InspectingListener {
            saw_stop: Arc<AtomicBool>,
        }

        impl SearchListener<i64> for InspectingListener {
            fn search_stopped(&mut self) {
                self.saw_stop.store(true, Ordering::Relaxed);
            }
        }

        let search = steepest_line_search();
        search.set_current_solution(0).unwrap();

        let saw_stop = Arc::new(AtomicBool::new(false));
        let id = search
            .add_search_listener(Box::new(InspectingListener {
                saw_stop: Arc::clone(&saw_stop),
            }))
            .unwrap();
        search.start().unwrap();
        assert!(saw_stop.load(Ordering::Relaxed));

        assert!(search.remove_search_listener(id).unwrap());
        assert!(!search.remove_search_listener(id).unwrap());
    }

    #[test]
    fn test_best_solution_never_regresses() {
        struct MonotoneListener {
            last: Option<f64>,
            violated: Arc<AtomicBool>,
        }

        impl SearchListener<i64> for MonotoneListener {
            fn new_best_solution(&mut self, _solution: &i64, evaluation: f64) {
                if let Some(last) = self.last {
                    // Minimizing: the best evaluation must go down.
                    if evaluation >= last {
                        self.violated.store(true, Ordering::Relaxed);
                    }
                }
                self.last = Some(evaluation);
            }
        }

        let search = LocalSearch::new(
            Arc::new(LineProblem { target: 7 }),
            vec![OffsetNeighbourhood {
                offsets: vec![-1, 1],
            }],
            RandomDescent::new(),
        );
        search.set_rng_seed(99).unwrap();
        let violated = Arc::new(AtomicBool::new(false));
        search
            .add_search_listener(Box::new(MonotoneListener {
                last: None,
                violated: Arc::clone(&violated),
            }))
            .unwrap();
        search
            .add_stop_criterion(Arc::new(MaxSteps::new(500)))
            .unwrap();

        search.start().unwrap();
        assert!(!violated.load(Ordering::Relaxed));
    }

    #[test]
    fn test_min_delta_reflects_unit_steps() {
        let search = steepest_line_search();
        search.set_current_solution(0).unwrap();
        search.start().unwrap();
        // Every improvement on the line shrinks the distance by exactly 1.
        assert_eq!(search.min_delta(), 1.0);
    }
}
