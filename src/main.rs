use getopts::Options;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hanabi_engine::engine::Game;
use hanabi_engine::game::GameOptions;
use hanabi_engine::observer::{GameObserver, LoggingObserver};
use hanabi_engine::replay::ReplayRecorder;
use hanabi_engine::simulator;
use hanabi_engine::strategies::examples::{AlwaysDiscard, AlwaysPlay, RandomStrategyConfig};
use hanabi_engine::strategies::remote::RemoteStrategy;
use hanabi_engine::strategy::{strategies_for, GameStrategyConfig, PlayerStrategy};

fn print_usage(program: &str, opts: Options) {
    print!("{}", opts.usage(&format!("Usage: {} [options]", program)));
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt(
        "l",
        "loglevel",
        "Log level, one of 'trace', 'debug', 'info', 'warn', and 'error'",
        "LOGLEVEL",
    );
    opts.optopt("n", "ntrials", "Number of games to simulate (default 1)", "NTRIALS");
    opts.optopt("o", "output", "Write replay JSON for each game, %s is replaced by the seed", "FILE");
    opts.optopt("t", "nthreads", "Number of threads to use for simulation (default 1)", "NTHREADS");
    opts.optopt("s", "seed", "Seed for the first game (default random)", "SEED");
    opts.optopt("p", "nplayers", "Number of players (2 to 5, default 2)", "NPLAYERS");
    opts.optopt(
        "g",
        "strategy",
        "Which strategy to use, one of 'play', 'discard', and 'random' (default 'play')",
        "STRATEGY",
    );
    opts.optopt(
        "r",
        "remote",
        "Seat a remote player served at URL in the last seat and play one game",
        "URL",
    );
    opts.optflag("h", "help", "Print this help menu");
    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => {
            print_usage(&program, opts);
            eprintln!("{}", f);
            return ExitCode::FAILURE;
        }
    };
    if matches.opt_present("h") {
        print_usage(&program, opts);
        return ExitCode::SUCCESS;
    }
    if !matches.free.is_empty() {
        print_usage(&program, opts);
        return ExitCode::FAILURE;
    }

    let filter = match matches.opt_str("l") {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn parse_opt<T: std::str::FromStr>(
    matches: &getopts::Matches,
    name: &str,
    default: T,
) -> Result<T, String> {
    match matches.opt_str(name) {
        Some(value) => value
            .parse()
            .map_err(|_| format!("Invalid value for -{}: {}", name, value)),
        None => Ok(default),
    }
}

fn get_strategy_config(name: &str) -> Result<Box<dyn GameStrategyConfig + Sync>, String> {
    match name {
        "play" => Ok(Box::new(AlwaysPlay)),
        "discard" => Ok(Box::new(AlwaysDiscard)),
        "random" => Ok(Box::new(RandomStrategyConfig {
            hint_probability: 0.4,
            play_probability: 0.2,
        })),
        _ => Err(format!("Unknown strategy: {}", name)),
    }
}

fn run(matches: &getopts::Matches) -> Result<(), String> {
    let n_trials: u32 = parse_opt(matches, "n", 1)?;
    let n_threads: u32 = parse_opt(matches, "t", 1)?;
    let num_players: usize = parse_opt(matches, "p", 2)?;
    let seed: Option<u64> = match matches.opt_str("s") {
        Some(_) => Some(parse_opt(matches, "s", 0)?),
        None => None,
    };
    let strategy_name = matches.opt_str("g").unwrap_or_else(|| "play".to_string());
    let config = get_strategy_config(&strategy_name)?;
    let json_output_pattern = matches.opt_str("o");

    if let Some(endpoint) = matches.opt_str("r") {
        return play_with_remote(num_players, config.as_ref(), &endpoint, seed, json_output_pattern);
    }

    let result = simulator::simulate(
        num_players,
        config.as_ref(),
        seed,
        n_trials,
        n_threads,
        if n_trials > 1 { Some(1000) } else { None },
        json_output_pattern,
    )
    .map_err(|err| err.to_string())?;
    result.info();
    Ok(())
}

fn play_with_remote(
    num_players: usize,
    config: &dyn GameStrategyConfig,
    endpoint: &str,
    seed: Option<u64>,
    json_output_pattern: Option<String>,
) -> Result<(), String> {
    let opts = GameOptions::for_players(num_players).map_err(|err| err.to_string())?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut strategies: Vec<Box<dyn PlayerStrategy>> = strategies_for(&opts, config, seed);
    strategies.pop();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(format!("Remote player must be an http(s) URL, got {}", endpoint));
    }
    strategies.push(Box::new(RemoteStrategy::http("remote", endpoint)));

    let names = strategies.iter().map(|strategy| strategy.name()).collect();
    let mut logger = LoggingObserver;
    let mut recorder = ReplayRecorder::new(names);
    let observers: Vec<&mut dyn GameObserver> = vec![&mut logger, &mut recorder];

    let mut rng = ChaChaRng::seed_from_u64(seed);
    let mut game = Game::initialize(strategies, observers, &mut rng).map_err(|err| err.to_string())?;
    let result = game.play();
    drop(game);

    if let Some(file_pattern) = json_output_pattern {
        simulator::write_replay(&file_pattern, seed, &recorder.to_json());
    }

    let won = result.map_err(|err| err.to_string())?;
    info!("Game over, {}", if won { "won" } else { "lost" });
    Ok(())
}
