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

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wander_core::{neigh::Neighbourhood, problem::Problem};
use wander_subset::neigh::SingleSwapNeighbourhood;
use wander_subset::problem::SubsetProblem;
use wander_subset::solution::SubsetSolution;

fn bench_all_moves(c: &mut Criterion) {
    let neighbourhood = SingleSwapNeighbourhood::new();
    let solution = SubsetSolution::with_selection(500, 0..50);

    c.bench_function("single_swap_all_moves_500_50", |b| {
        b.iter(|| black_box(neighbourhood.all_moves(black_box(&solution))))
    });
}

fn bench_random_move(c: &mut Criterion) {
    let neighbourhood = SingleSwapNeighbourhood::new();
    let solution = SubsetSolution::with_selection(500, 0..50);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    c.bench_function("single_swap_random_move_500_50", |b| {
        b.iter(|| black_box(neighbourhood.random_move(black_box(&solution), &mut rng)))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let scores: Vec<f64> = (0..500).map(|id| id as f64).collect();
    let problem = SubsetProblem::new(scores, 50).unwrap();
    let solution = SubsetSolution::with_selection(500, 0..50);

    c.bench_function("subset_evaluate_500_50", |b| {
        b.iter(|| black_box(problem.evaluate(black_box(&solution))))
    });
}

criterion_group!(
    benches,
    bench_all_moves,
    bench_random_move,
    bench_evaluate
);
criterion_main!(benches);
