//! yh: CLI for simulating and scoring Yahtzee games.
//!
//! Subcommands:
//! - sim    : single-player simulation with a greedy policy
//! - duel   : two-player alternation simulation
//! - score  : score table for a given hand

use std::env;
use std::path::PathBuf;
use std::process;

use yh_core::category::{Combo, ALL_COMBOS};
use yh_core::duel::{apply_duel, duel_winner, initial_duel, preview};
use yh_core::engine::{apply, initial_state, TurnContext};
use yh_core::legal::{duel_options, round_options};
use yh_core::scoring::score;
use yh_core::state::{Hand, ScoreCard};
use yh_core::{Action, Config};
use yh_logging::{now_ms, GameFinishedV1, GameStartedV1, HistoryWriter, MarkEventV1, RollEventV1};

fn print_usage() {
    println!(
        r#"yh - Yahtzee core CLI

USAGE:
    yh <COMMAND> [OPTIONS]

COMMANDS:
    sim      Simulate single-player games and report score statistics
    duel     Simulate two-player games and report win counts
    score    Print the score table for a hand of five dice

Run `yh <COMMAND> --help` for command options."#
    );
}

fn parse_flag_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let Some(raw) = args.get(i + 1) else {
        eprintln!("Missing value for {}", flag);
        process::exit(1);
    };
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {} value: {}", flag, raw);
        process::exit(1);
    })
}

fn load_config(path: &str) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        eprintln!("Failed to load config {}: {}", path, e);
        process::exit(1);
    })
}

fn make_ctx(deterministic: bool, seed: u64) -> TurnContext {
    if deterministic {
        TurnContext::new_deterministic(seed)
    } else {
        TurnContext::new_rng(seed)
    }
}

/// Best-scoring open combination for the greedy policy, card order breaking
/// ties.
fn best_open_combo(card: &ScoreCard, hand: Hand) -> Option<Combo> {
    let mut best: Option<(u32, Combo)> = None;
    for &c in &ALL_COMBOS {
        if card.get(c).is_some() {
            continue;
        }
        let points = score(c, hand);
        if best.map_or(true, |(bp, _)| points > bp) {
            best = Some((points, c));
        }
    }
    best.map(|(_, c)| c)
}

fn roll_event(game_id: u64, player: u8, turn_idx: u8, roll_idx: u8, hand: Hand, held: [bool; 5]) -> RollEventV1 {
    RollEventV1 {
        event: "roll",
        ts_ms: now_ms(),
        game_id,
        player,
        turn_idx,
        roll_idx,
        dice: hand.map(|d| d.unwrap_or(0)),
        held,
    }
}

fn mark_event(game_id: u64, player: u8, combo: Combo, points: u32, total: u32) -> MarkEventV1 {
    MarkEventV1 {
        event: "mark",
        ts_ms: now_ms(),
        game_id,
        player,
        combo: combo.name().to_string(),
        points,
        total,
    }
}

/// Play one single-player game: roll all three times, mark greedily.
fn play_single(
    game_id: u64,
    seed: u64,
    deterministic: bool,
    mut history: Option<&mut HistoryWriter>,
) -> Result<u32, String> {
    let mut ctx = make_ctx(deterministic, seed);
    let mut s = initial_state();
    while !s.round_ended() {
        while round_options(&s).can_roll {
            let turn_idx = s.turn_idx();
            let roll_idx = yh_core::ROLLS_PER_TURN - s.rolls_left;
            s = apply(s, Action::Roll, &mut ctx).map_err(|e| e.to_string())?;
            if let Some(w) = history.as_deref_mut() {
                w.append(&roll_event(game_id, 0, turn_idx, roll_idx, s.hand, s.held))
                    .map_err(|e| e.to_string())?;
            }
        }
        let Some(combo) = best_open_combo(&s.card, s.hand) else {
            return Err("no open combination in a live round".to_string());
        };
        let points = score(combo, s.hand);
        s = apply(s, Action::Select(combo), &mut ctx).map_err(|e| e.to_string())?;
        if let Some(w) = history.as_deref_mut() {
            w.append(&mark_event(game_id, 0, combo, points, s.card.total()))
                .map_err(|e| e.to_string())?;
        }
    }
    Ok(s.card.total())
}

/// Play one duel; both seats use the greedy policy through the preview query.
fn play_duel(
    game_id: u64,
    seed: u64,
    deterministic: bool,
    mut history: Option<&mut HistoryWriter>,
) -> Result<([u32; 2], u8), String> {
    let mut ctx = make_ctx(deterministic, seed);
    let mut s = initial_duel();
    while !s.round_ended() {
        while duel_options(&s).can_roll {
            let player = s.active;
            let turn_idx = s.turn_idx();
            let roll_idx = yh_core::ROLLS_PER_TURN - s.rolls_left;
            s = apply_duel(s, Action::Roll, &mut ctx).map_err(|e| e.to_string())?;
            if let Some(w) = history.as_deref_mut() {
                w.append(&roll_event(game_id, player, turn_idx, roll_idx, s.hand, s.held))
                    .map_err(|e| e.to_string())?;
            }
        }
        let pv = preview(&s);
        let mut best: Option<(u32, Combo)> = None;
        for &c in &ALL_COMBOS {
            if let Some(&points) = pv.get(&c) {
                if best.map_or(true, |(bp, _)| points > bp) {
                    best = Some((points, c));
                }
            }
        }
        let Some((points, combo)) = best else {
            return Err("no open combination in a live duel".to_string());
        };
        let player = s.active;
        s = apply_duel(s, Action::Select(combo), &mut ctx).map_err(|e| e.to_string())?;
        if let Some(w) = history.as_deref_mut() {
            let total = s.cards[player as usize].total();
            w.append(&mark_event(game_id, player, combo, points, total))
                .map_err(|e| e.to_string())?;
        }
    }
    let totals = [s.cards[0].total(), s.cards[1].total()];
    let winner = duel_winner(&s).ok_or("finished duel has no winner")?;
    Ok((totals, winner))
}

fn open_history(config: &Config, name: &str) -> Result<Option<HistoryWriter>, String> {
    let Some(dir) = &config.history.dir else {
        return Ok(None);
    };
    let path = PathBuf::from(dir).join(name);
    std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    let w = HistoryWriter::open_append_with_flush(&path, config.history.flush_every_lines)
        .map_err(|e| e.to_string())?;
    Ok(Some(w))
}

fn print_histogram(totals: &[u32]) {
    const BUCKET: u32 = 25;
    let max_total = totals.iter().copied().max().unwrap_or(0);
    let buckets = (max_total / BUCKET + 1) as usize;
    let mut counts = vec![0usize; buckets];
    for &t in totals {
        counts[(t / BUCKET) as usize] += 1;
    }
    let peak = counts.iter().copied().max().unwrap_or(1).max(1);
    println!();
    for (i, &n) in counts.iter().enumerate() {
        let lo = i as u32 * BUCKET;
        let hi = lo + BUCKET - 1;
        let bar = "#".repeat(n * 50 / peak);
        println!("{:>3}-{:<3} | {:<50} {}", lo, hi, bar, n);
    }
}

fn cmd_sim(args: &[String]) -> Result<(), String> {
    let mut config = Config::default();
    let mut games: Option<u32> = None;
    let mut seed: Option<u64> = None;
    let mut no_hist = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yh sim

USAGE:
    yh sim [--games N] [--seed S] [--config PATH] [--no-hist]

OPTIONS:
    --games N       Number of games to simulate (default: config sim.games)
    --seed S        Base seed for dice generation (default: config game.seed)
    --config PATH   YAML config file
    --no-hist       Skip printing the score histogram
"#
                );
                return Ok(());
            }
            "--games" => {
                games = Some(parse_flag_value(args, i, "--games"));
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_flag_value(args, i, "--seed"));
                i += 2;
            }
            "--config" => {
                let path: String = parse_flag_value(args, i, "--config");
                config = load_config(&path);
                i += 2;
            }
            "--no-hist" => {
                no_hist = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `yh sim`: {}", other);
                eprintln!("Run `yh sim --help` for usage.");
                process::exit(1);
            }
        }
    }

    let games = games.unwrap_or(config.sim.games);
    let seed = seed.unwrap_or(config.game.seed);
    let deterministic = config.game.deterministic_chance;
    let mut history = open_history(&config, "sim.ndjson")?;

    let start = std::time::Instant::now();
    let mut totals = Vec::with_capacity(games as usize);
    for g in 0..u64::from(games) {
        let game_seed = seed.wrapping_add(g);
        if let Some(w) = history.as_mut() {
            w.append(&GameStartedV1::new(g, "single", game_seed))
                .map_err(|e| e.to_string())?;
        }
        let total = play_single(g, game_seed, deterministic, history.as_mut())?;
        if let Some(w) = history.as_mut() {
            w.append(&GameFinishedV1::new(g, vec![total], None))
                .map_err(|e| e.to_string())?;
        }
        totals.push(total);
    }
    if let Some(w) = history.as_mut() {
        w.flush().map_err(|e| e.to_string())?;
    }

    let elapsed = start.elapsed().as_secs_f64();
    let sum: u64 = totals.iter().map(|&t| u64::from(t)).sum();
    let mean = sum as f64 / totals.len().max(1) as f64;
    let min = totals.iter().copied().min().unwrap_or(0);
    let max = totals.iter().copied().max().unwrap_or(0);

    println!("Simulated {} games in {:.2}s", games, elapsed);
    println!("Mean score: {:.2}", mean);
    println!("Min/Max: {} / {}", min, max);
    if !no_hist && config.sim.histogram && !totals.is_empty() {
        print_histogram(&totals);
    }
    Ok(())
}

fn cmd_duel(args: &[String]) -> Result<(), String> {
    let mut config = Config::default();
    let mut games: Option<u32> = None;
    let mut seed: Option<u64> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yh duel

USAGE:
    yh duel [--games N] [--seed S] [--config PATH]

OPTIONS:
    --games N       Number of games to simulate (default: config sim.games)
    --seed S        Base seed for dice generation (default: config game.seed)
    --config PATH   YAML config file
"#
                );
                return Ok(());
            }
            "--games" => {
                games = Some(parse_flag_value(args, i, "--games"));
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_flag_value(args, i, "--seed"));
                i += 2;
            }
            "--config" => {
                let path: String = parse_flag_value(args, i, "--config");
                config = load_config(&path);
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `yh duel`: {}", other);
                eprintln!("Run `yh duel --help` for usage.");
                process::exit(1);
            }
        }
    }

    let games = games.unwrap_or(config.sim.games);
    let seed = seed.unwrap_or(config.game.seed);
    let deterministic = config.game.deterministic_chance;
    let mut history = open_history(&config, "duel.ndjson")?;

    let mut wins = [0u32; 2];
    let mut draws = 0u32;
    for g in 0..u64::from(games) {
        let game_seed = seed.wrapping_add(g);
        if let Some(w) = history.as_mut() {
            w.append(&GameStartedV1::new(g, "duel", game_seed))
                .map_err(|e| e.to_string())?;
        }
        let (totals, winner) = play_duel(g, game_seed, deterministic, history.as_mut())?;
        match winner {
            0 => wins[0] += 1,
            1 => wins[1] += 1,
            _ => draws += 1,
        }
        if let Some(w) = history.as_mut() {
            w.append(&GameFinishedV1::new(g, totals.to_vec(), Some(winner)))
                .map_err(|e| e.to_string())?;
        }
    }
    if let Some(w) = history.as_mut() {
        w.flush().map_err(|e| e.to_string())?;
    }

    println!("Simulated {} duels", games);
    println!(
        "P0 wins: {}  P1 wins: {}  Draws: {}",
        wins[0], wins[1], draws
    );
    Ok(())
}

fn cmd_score(args: &[String]) -> Result<(), String> {
    if args.first().map(String::as_str) == Some("--help")
        || args.first().map(String::as_str) == Some("-h")
    {
        println!(
            r#"yh score

USAGE:
    yh score D1 D2 D3 D4 D5

Prints the score every combination would yield for the given hand.
Dice values must be in 1..=6."#
        );
        return Ok(());
    }
    if args.len() != 5 {
        return Err(format!("expected 5 dice values, got {}", args.len()));
    }

    let mut hand: Hand = [None; 5];
    for (i, raw) in args.iter().enumerate() {
        let v: u8 = raw
            .parse()
            .map_err(|_| format!("invalid die value: {}", raw))?;
        if !(1..=6).contains(&v) {
            return Err(format!("die value out of range 1..=6: {}", v));
        }
        hand[i] = Some(v);
    }

    println!("Hand: {:?}", args);
    for &c in &ALL_COMBOS {
        println!("{:<16} {:>4}", c.name(), score(c, hand));
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let Some(cmd) = args.get(1) else {
        print_usage();
        process::exit(1);
    };
    let rest = &args[2..];

    let result = match cmd.as_str() {
        "sim" => cmd_sim(rest),
        "duel" => cmd_duel(rest),
        "score" => cmd_score(rest),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(msg) = result {
        eprintln!("Error: {}", msg);
        process::exit(1);
    }
}
