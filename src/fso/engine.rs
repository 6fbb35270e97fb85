//! Firebug swarm search engine.
//!
//! # Stages
//!
//! 1. **Initialization**: every female of every male is a decoded random
//!    key vector (init stream). Each male records its best female; the
//!    global best is the minimum over all `M x F` candidates.
//! 2. **S1 stage**, repeated `s1_iterations` times:
//!    - `l1` exploration passes: each male's whole female block moves
//!      toward its own best and a random partner's best
//!      (`x + c1 (own - x) + c2 (partner - x)`), and the best new female
//!      becomes the male's best.
//!    - `l2` exploitation passes: each male's best vector moves toward the
//!      global best (`own + c3 (global - own)`), unconditionally.
//! 3. **Convergence**, `s2_iterations` times: each male's best vector moves
//!    by the gap between the global best and a random partner's best
//!    (`own + c4 (global - partner)`), unconditionally.
//! 4. **Finalize**: the global best vector is decoded once more.
//!
//! Males are processed sequentially and the global best is updated in
//! place, so a male sees improvements made earlier in the same pass.
//!
//! # Random draws
//!
//! All coefficients come from the search stream in this order: per
//! exploration pass a partner permutation, then per male `c1` and `c2`
//! (`N x F`, item-major); per exploitation pass per male `c3` (length N);
//! per convergence iteration a partner permutation, then per male `c4`
//! (length N).
//!
//! # Reference
//! Noel, Muthiah-Nakarajan, Amali & Trivedi (2021), "A new biologically
//! inspired global optimization algorithm based on firebug reproductive
//! swarming behaviour", Expert Systems with Applications 183

use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use super::population::{GlobalBest, Population};
use super::FsoConfig;
use crate::decoder;
use crate::error::Result;
use crate::fitness::{self, UNSCORED};
use crate::models::{BinAssignment, PackingInstance};

/// Search stage that produced an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Initial population.
    Initialization,
    /// Block moves toward own and partner best.
    Exploration,
    /// Best-vector moves toward the global best.
    Exploitation,
    /// Best-vector moves by the global/partner gap.
    Convergence,
}

/// One strict improvement of the global best.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Improvement {
    /// Stage in which it happened.
    pub phase: Phase,
    /// Outer iteration (S1 or S2 index; 0 during initialization).
    pub iteration: usize,
    /// New global best score.
    pub score: f64,
}

/// Outcome of a swarm run.
#[derive(Debug, Clone, Serialize)]
pub struct FsoResult {
    /// Final decode of the global best vector.
    pub best: BinAssignment,
    /// Lowest score observed during the search.
    pub best_score: f64,
    /// Wall-clock time of initialization plus search.
    pub elapsed: Duration,
    /// Decode+score evaluations performed (excluding the final decode).
    pub evaluations: usize,
    /// Every strict improvement of the global best, in order.
    pub improvements: Vec<Improvement>,
}

/// Firebug Swarm Optimization runner.
///
/// # Example
/// ```
/// use u_binpack::fso::{FsoConfig, FsoRunner};
/// use u_binpack::models::PackingInstance;
///
/// let instance = PackingInstance::new(10, vec![6, 4, 3, 7, 5, 5]);
/// let config = FsoConfig::default()
///     .with_agents(4, 3)
///     .with_iterations(2, 2)
///     .with_inner_loops(3, 2);
/// let result = FsoRunner::run(&instance, &config).unwrap();
/// assert!(result.best.is_feasible(instance.capacity, &instance.items));
/// assert!(result.best.bin_count() >= 3);
/// ```
pub struct FsoRunner;

impl FsoRunner {
    /// Runs the full search on an instance.
    ///
    /// # Errors
    /// Fails before any search on an invalid configuration or instance
    /// (including items larger than the capacity).
    pub fn run(instance: &PackingInstance, config: &FsoConfig) -> Result<FsoResult> {
        config.validate()?;
        instance.validate()?;

        info!(
            "Starting Firebug Swarm Optimization ({} males x {} females, {} items, capacity {})",
            config.male_agents,
            config.female_agents,
            instance.len(),
            instance.capacity
        );
        let start = Instant::now();

        if instance.is_empty() {
            warn!("Instance has no items; returning a single empty bin");
            let best = decoder::decode(instance, &[])?;
            return Ok(FsoResult {
                best,
                best_score: UNSCORED,
                elapsed: start.elapsed(),
                evaluations: 0,
                improvements: Vec::new(),
            });
        }

        let mut init_rng = ChaCha8Rng::seed_from_u64(config.init_seed);
        let mut search = Search::new(instance, config);
        let (mut population, mut global) = search.initialize(&mut init_rng)?;

        for s1 in 0..config.s1_iterations {
            for pass in 0..config.l1 {
                search.explore(&mut population, &mut global, s1, pass)?;
            }
            for pass in 0..config.l2 {
                search.exploit(&mut population, &mut global, s1, pass)?;
            }
            debug!("Iteration S1: {s1}: global best {}", global.score);
        }

        for s2 in 0..config.s2_iterations {
            search.converge(&mut population, &mut global, s2)?;
        }

        let elapsed = start.elapsed();
        let mut best = decoder::decode(instance, &global.keys)?;
        fitness::evaluate(&mut best, instance.capacity);

        info!("Time taken: {:.3}s", elapsed.as_secs_f64());
        info!("Best solution => {best}");
        debug!("Best bins => {:?}", best.bins);
        debug!("Best free capacities => {:?}", best.free_capacities);

        Ok(FsoResult {
            best,
            best_score: global.score,
            elapsed,
            evaluations: search.evaluations,
            improvements: search.improvements,
        })
    }
}

/// Per-run search context: instance, parameters, search stream, and
/// bookkeeping. Population and global best are passed in explicitly.
struct Search<'a> {
    instance: &'a PackingInstance,
    config: &'a FsoConfig,
    rng: ChaCha8Rng,
    evaluations: usize,
    improvements: Vec<Improvement>,
}

impl<'a> Search<'a> {
    fn new(instance: &'a PackingInstance, config: &'a FsoConfig) -> Self {
        Self {
            instance,
            config,
            rng: ChaCha8Rng::seed_from_u64(config.search_seed),
            evaluations: 0,
            improvements: Vec::new(),
        }
    }

    /// Decodes and scores one priority vector.
    fn evaluate(&mut self, keys: &[f64]) -> Result<BinAssignment> {
        let mut assignment = decoder::decode(self.instance, keys)?;
        fitness::evaluate(&mut assignment, self.instance.capacity);
        self.evaluations += 1;
        Ok(assignment)
    }

    /// Offers a candidate to the global best; records it on improvement.
    fn record(
        &mut self,
        global: &mut GlobalBest,
        candidate: &BinAssignment,
        phase: Phase,
        iteration: usize,
    ) -> bool {
        if !global.offer(candidate.score, &candidate.keys) {
            return false;
        }
        self.improvements.push(Improvement {
            phase,
            iteration,
            score: candidate.score,
        });
        true
    }

    /// Builds the initial population from the init stream.
    fn initialize<R: Rng>(&mut self, init_rng: &mut R) -> Result<(Population, GlobalBest)> {
        let males = self.config.male_agents;
        let females = self.config.female_agents;
        info!(
            "Generating initial population ({} agents)",
            self.config.total_agents()
        );

        let mut population = Population::new(males, self.instance.len(), females);
        let mut global = GlobalBest::default();

        for m in 0..males {
            let mut best: Option<(usize, BinAssignment)> = None;
            for f in 0..females {
                let mut candidate =
                    decoder::decode_random(self.instance, self.config.init_key_range, init_rng)?;
                fitness::evaluate(&mut candidate, self.instance.capacity);
                self.evaluations += 1;
                population.set_female(m, f, &candidate.keys);

                let improves = match &best {
                    Some((_, b)) => candidate.score < b.score,
                    None => true,
                };
                if improves {
                    best = Some((f, candidate));
                }
            }

            if let Some((f, candidate)) = best {
                population.set_best_index(m, f);
                self.record(&mut global, &candidate, Phase::Initialization, 0);
            }
        }

        info!("Initial global best score {}", global.score);
        Ok((population, global))
    }

    /// One exploration pass over all males.
    fn explore(
        &mut self,
        population: &mut Population,
        global: &mut GlobalBest,
        s1: usize,
        pass: usize,
    ) -> Result<()> {
        let males = population.male_count();
        let n = population.item_count();
        let females = population.female_count();
        let partners = self.permutation(males);

        for m in 0..males {
            let c1 = self.coefficient_matrix(n, females, -0.75, 2.255);
            let c2 = self.coefficient_matrix(n, females, -0.25, 1.302);
            let own = population.best_keys(m);
            let mate = population.best_keys(partners[m]);

            let next = {
                let block = population.block(m);
                Array2::from_shape_fn((n, females), |(i, j)| {
                    let x = block[[i, j]];
                    x + c1[[i, j]] * (own[i] - x) + c2[[i, j]] * (mate[i] - x)
                })
            };
            population.set_block(m, &next);

            let mut best: Option<(usize, BinAssignment)> = None;
            for f in 0..females {
                let candidate = self.evaluate(&next.column(f).to_vec())?;
                trace!("Iteration S1: {s1} -- L1: {pass}: male [{m}, {f}] => {candidate}");
                let improves = match &best {
                    Some((_, b)) => candidate.score < b.score,
                    None => true,
                };
                if improves {
                    best = Some((f, candidate));
                }
            }

            if let Some((f, candidate)) = best {
                population.set_best_index(m, f);
                if self.record(global, &candidate, Phase::Exploration, s1) {
                    info!(
                        "Iteration S1: {s1} -- L1: {pass}: male [{m}, {f}] improved global best to {}",
                        global.score
                    );
                }
            }
        }
        Ok(())
    }

    /// One exploitation pass over all males.
    fn exploit(
        &mut self,
        population: &mut Population,
        global: &mut GlobalBest,
        s1: usize,
        pass: usize,
    ) -> Result<()> {
        let n = population.item_count();

        for m in 0..population.male_count() {
            let c3 = self.coefficient_vector(n, -0.5, 2.7);
            let own = population.best_keys(m);
            let moved: Vec<f64> = own
                .iter()
                .zip(&global.keys)
                .zip(&c3)
                .map(|((&x, &g), &c)| x + c * (g - x))
                .collect();

            population.set_best_keys(m, &moved);
            let candidate = self.evaluate(&moved)?;
            trace!("Iteration S1: {s1} -- L2: {pass}: male {m} => {candidate}");
            if self.record(global, &candidate, Phase::Exploitation, s1) {
                info!(
                    "Iteration S1: {s1} -- L2: {pass}: male [{m}, {}] improved global best to {}",
                    population.best_index(m),
                    global.score
                );
            }
        }
        Ok(())
    }

    /// One convergence iteration over all males.
    fn converge(
        &mut self,
        population: &mut Population,
        global: &mut GlobalBest,
        s2: usize,
    ) -> Result<()> {
        let males = population.male_count();
        let n = population.item_count();
        let partners = self.permutation(males);

        for m in 0..males {
            let c4 = self.coefficient_vector(n, 0.0, 1.4);
            let own = population.best_keys(m);
            let mate = population.best_keys(partners[m]);
            let moved: Vec<f64> = own
                .iter()
                .zip(&mate)
                .zip(global.keys.iter().zip(&c4))
                .map(|((&x, &p), (&g, &c))| x + c * (g - p))
                .collect();

            population.set_best_keys(m, &moved);
            let candidate = self.evaluate(&moved)?;
            trace!("Iteration S2: {s2}: male {m} => {candidate}");
            if self.record(global, &candidate, Phase::Convergence, s2) {
                info!(
                    "Iteration S2: {s2}: male [{m}, {}] improved global best to {}",
                    population.best_index(m),
                    global.score
                );
            }
        }
        Ok(())
    }

    /// Random permutation of `0..len` from the search stream.
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }

    /// `rows x cols` matrix of `low + span * U(0, 1)`, filled row by row.
    fn coefficient_matrix(
        &mut self,
        rows: usize,
        cols: usize,
        low: f64,
        span: f64,
    ) -> Array2<f64> {
        let rng = &mut self.rng;
        Array2::from_shape_fn((rows, cols), |_| low + span * rng.random::<f64>())
    }

    /// Length-`len` vector of `low + span * U(0, 1)`.
    fn coefficient_vector(&mut self, len: usize, low: f64, span: f64) -> Vec<f64> {
        (0..len)
            .map(|_| low + span * self.rng.random::<f64>())
            .collect()
    }
}
