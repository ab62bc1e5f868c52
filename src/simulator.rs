use fnv::FnvHashMap;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaChaRng;
use std::fmt;
use tracing::{debug, info, warn};

use crate::engine::Game;
use crate::error::GameError;
use crate::game::*;
use crate::observer::GameObserver;
use crate::replay::ReplayRecorder;
use crate::strategy::*;

pub struct SimulatedGame {
    pub state: GameState,
    // Ok(won), or why the game was aborted
    pub result: Result<bool, GameError>,
    pub replay: Option<serde_json::Value>,
}

pub fn simulate_once(
    num_players: usize,
    strat_config: &dyn GameStrategyConfig,
    seed: u64,
    output_json: bool,
) -> Result<SimulatedGame, GameError> {
    let opts = GameOptions::for_players(num_players)?;
    let strategies = strategies_for(&opts, strat_config, seed);
    let names = strategies.iter().map(|strategy| strategy.name()).collect();
    let mut recorder = ReplayRecorder::new(names);

    let mut rng = ChaChaRng::seed_from_u64(seed);
    let mut observers: Vec<&mut dyn GameObserver> = Vec::new();
    if output_json {
        observers.push(&mut recorder);
    }
    let mut game = Game::initialize(strategies, observers, &mut rng)?;
    let result = game.play();
    let state = game.state.clone();
    drop(game);

    debug!("SCORE: {:?}", state.score());
    Ok(SimulatedGame {
        state,
        result,
        replay: if output_json {
            Some(recorder.to_json())
        } else {
            None
        },
    })
}

#[derive(Debug)]
pub struct Histogram {
    pub hist: FnvHashMap<Score, u32>,
    pub sum: Score,
    pub total_count: u32,
}
impl Histogram {
    pub fn new() -> Histogram {
        Histogram {
            hist: FnvHashMap::default(),
            sum: 0,
            total_count: 0,
        }
    }
    fn insert_many(&mut self, val: Score, count: u32) {
        let new_count = self.get_count(&val) + count;
        self.hist.insert(val, new_count);
        self.sum += val * count;
        self.total_count += count;
    }
    pub fn insert(&mut self, val: Score) {
        self.insert_many(val, 1);
    }
    pub fn get_count(&self, val: &Score) -> u32 {
        *self.hist.get(val).unwrap_or(&0)
    }
    pub fn average(&self) -> f32 {
        if self.total_count == 0 {
            return 0.0;
        }
        (self.sum as f32) / (self.total_count as f32)
    }
    pub fn merge(&mut self, other: Histogram) {
        for (val, count) in other.hist.into_iter() {
            self.insert_many(val, count);
        }
    }
}
impl Default for Histogram {
    fn default() -> Self {
        Histogram::new()
    }
}
impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut keys = self.hist.keys().collect::<Vec<_>>();
        keys.sort();
        for val in keys {
            write!(f, "\n{}: {}", val, self.get_count(val))?;
        }
        Ok(())
    }
}

/// Writes a replay to `file_pattern` with `%s` replaced by the seed.
pub fn write_replay(file_pattern: &str, seed: u64, replay: &serde_json::Value) {
    let path = file_pattern.replace("%s", &seed.to_string());
    let written = std::fs::File::create(&path)
        .map_err(serde_json::Error::io)
        .and_then(|file| serde_json::to_writer(file, replay));
    match written {
        Ok(()) => debug!("Wrote replay to {}", path),
        Err(err) => warn!("Could not write replay to {}: {}", path, err),
    }
}

#[derive(Debug, Default)]
struct ThreadResult {
    scores: Histogram,
    lives: Histogram,
    wins: u32,
    aborted: u32,
    lost_seeds: Vec<u64>,
}

pub fn simulate(
    num_players: usize,
    strat_config: &(dyn GameStrategyConfig + Sync),
    first_seed_opt: Option<u64>,
    n_trials: u32,
    n_threads: u32,
    progress_info: Option<u32>,
    json_output_pattern: Option<String>,
) -> Result<SimResult, GameError> {
    // fail before spawning anything
    GameOptions::for_players(num_players)?;
    let first_seed = first_seed_opt.unwrap_or_else(|| rand::thread_rng().next_u64());
    let n_threads = n_threads.max(1);

    let json_output_pattern_ref = &json_output_pattern;
    let results = crossbeam::scope(|scope| {
        let mut join_handles = Vec::new();
        for i in 0..n_threads {
            let start = first_seed + u64::from((n_trials * i) / n_threads);
            let end = first_seed + u64::from((n_trials * (i + 1)) / n_threads);
            join_handles.push(scope.spawn(move || {
                if progress_info.is_some() {
                    info!("Thread {} spawned: seeds {} to {}", i, start, end);
                }
                let mut result = ThreadResult::default();

                for seed in start..end {
                    if let Some(progress_info_frequency) = progress_info {
                        if (seed > start)
                            && ((seed - start) % u64::from(progress_info_frequency) == 0)
                        {
                            info!(
                                "Thread {}, Trials: {}, Stats so far: {} score, {} lives, {} wins",
                                i,
                                seed - start,
                                result.scores.average(),
                                result.lives.average(),
                                result.wins
                            );
                        }
                    }
                    let game = match simulate_once(
                        num_players,
                        strat_config,
                        seed,
                        json_output_pattern_ref.is_some(),
                    ) {
                        Ok(game) => game,
                        Err(err) => {
                            warn!("Seed {} could not be set up: {}", seed, err);
                            result.aborted += 1;
                            continue;
                        }
                    };
                    if let (Some(file_pattern), Some(replay)) =
                        (json_output_pattern_ref, &game.replay)
                    {
                        write_replay(file_pattern, seed, replay);
                    }

                    match game.result {
                        Ok(true) => result.wins += 1,
                        Ok(false) => result.lost_seeds.push(seed),
                        Err(ref err) => {
                            debug!("Seed {} aborted: {}", seed, err);
                            result.aborted += 1;
                            continue;
                        }
                    }
                    result.scores.insert(game.state.score());
                    result.lives.insert(game.state.error_tokens);
                }
                if progress_info.is_some() {
                    info!("Thread {} done", i);
                }
                result
            }));
        }

        join_handles
            .into_iter()
            .map(|join_handle| join_handle.join())
            .collect::<Vec<_>>()
    });

    let mut sim_result = SimResult::default();
    let mut lost_seeds: Vec<u64> = Vec::new();
    for thread_result in results {
        sim_result.scores.merge(thread_result.scores);
        sim_result.lives.merge(thread_result.lives);
        sim_result.wins += thread_result.wins;
        sim_result.aborted += thread_result.aborted;
        lost_seeds.extend(thread_result.lost_seeds);
    }
    lost_seeds.sort_unstable();
    sim_result.lost_seed = lost_seeds.first().cloned();
    Ok(sim_result)
}

#[derive(Debug, Default)]
pub struct SimResult {
    pub scores: Histogram,
    pub lives: Histogram,
    pub wins: u32,
    pub aborted: u32,
    pub lost_seed: Option<u64>,
}

impl SimResult {
    pub fn finished(&self) -> u32 {
        self.scores.total_count
    }

    pub fn percent_won(&self) -> f32 {
        if self.finished() == 0 {
            return 0.0;
        }
        self.wins as f32 / self.finished() as f32 * 100.0
    }

    pub fn average_score(&self) -> f32 {
        self.scores.average()
    }

    pub fn average_lives(&self) -> f32 {
        self.lives.average()
    }

    pub fn info(&self) {
        info!("Score histogram:\n{}", self.scores);

        if let Some(seed) = self.lost_seed {
            info!("Example seed with a lost game: {}", seed);
        }
        if self.aborted > 0 {
            info!("Games aborted by a rules violation: {}", self.aborted);
        }

        info!("Percentage won: {:?}%", self.percent_won());
        info!("Average score: {:?}", self.average_score());
        info!("Average lives: {:?}", self.average_lives());
    }
}
