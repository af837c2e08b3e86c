// src/bin/casino_dev_cli.rs

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use casino_engine::api::{
    ApiError, BlackjackCommand, Command, GameView, Query, QueryResponse, RouletteCommand,
    SlotsCommand,
};
use casino_engine::blackjack::BlackjackPhase;
use casino_engine::config::CasinoConfig;
use casino_engine::domain::chips::Chips;
use casino_engine::infra::{DeterministicRng, RngSeed};
use casino_engine::roulette::{BetColor, BetKind};
use casino_engine::session::CasinoSession;
use clap::Parser;
use tracing::Level;

/// Контекст для `RngSeed::derive`: у dev CLI одна сессия.
const DEV_SESSION_ID: u64 = 1;

/// Dev-симулятор: играет N раундов каждой игры наивной стратегией.
#[derive(Parser, Debug)]
#[command(name = "casino_dev_cli", about = "Simulate blackjack, roulette and slots rounds")]
struct Args {
    /// Seed RNG; без него берётся случайный и печатается.
    #[arg(long)]
    seed: Option<u64>,

    /// Сколько раундов каждой игры.
    #[arg(long, default_value_t = 20)]
    rounds: u32,

    #[arg(long, default_value_t = 1_000)]
    balance: u64,

    #[arg(long, default_value_t = 10)]
    stake: u64,

    /// JSON с настройками заведения (частичный допустим).
    #[arg(long)]
    config: Option<PathBuf>,

    /// trace, debug, info, warn, error
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("casino_dev_cli: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            CasinoConfig::from_json_str(&json).map_err(|e| e.to_string())?
        }
        None => CasinoConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("casino_dev_cli: seed = {seed}, balance = {}", args.balance);

    // Каждый раунд играет на своём seed'е: любой раунд воспроизводится
    // по базовому seed'у и своему номеру.
    let base = RngSeed::from_u64(seed);
    let mut session = CasinoSession::new(config, Chips(args.balance), base.to_rng())
        .map_err(|e| e.to_string())?;
    let stake = Chips(args.stake);

    let mut round_index = 0u64;
    let mut next_rng = move || {
        round_index += 1;
        base.derive(DEV_SESSION_ID, round_index).to_rng()
    };

    println!();
    println!("================ BLACKJACK =================");
    for n in 1..=args.rounds {
        if session.balance() < stake {
            println!("баланс закончился");
            break;
        }
        session.reseed(next_rng());
        play_blackjack_round(&mut session, stake, now()).map_err(|e| e.message().to_string())?;
        println!("#{n:>3}: balance = {}", session.balance());
    }

    println!();
    println!("================ ROULETTE =================");
    for n in 1..=args.rounds {
        if session.balance() < stake {
            println!("баланс закончился");
            break;
        }
        session.reseed(next_rng());
        let ts = now();
        let bet = Command::Roulette(RouletteCommand::PlaceBet {
            bet: BetKind::Color(BetColor::Red),
            amount: stake,
        });
        session.execute(bet, ts).map_err(|e| e.message().to_string())?;
        let resp = session
            .execute(Command::Roulette(RouletteCommand::Spin), ts)
            .map_err(|e| e.message().to_string())?;
        if let GameView::Roulette(view) = &resp.view {
            if let Some(outcome) = &view.outcome {
                println!(
                    "#{n:>3}: {:>2} {:?} -> balance = {}",
                    outcome.winning_number,
                    outcome.properties.color,
                    resp.balance
                );
            }
        }
        session
            .execute(Command::Roulette(RouletteCommand::Reset), ts)
            .map_err(|e| e.message().to_string())?;
    }

    println!();
    println!("================ SLOTS =================");
    let start = Command::Slots(SlotsCommand::StartAutoPlay {
        count: args.rounds,
        stake,
    });
    if session.balance() >= stake && args.rounds > 0 {
        session.execute(start, now()).map_err(|e| e.message().to_string())?;
        loop {
            session.reseed(next_rng());
            let resp = session
                .execute(Command::Slots(SlotsCommand::AutoPlayStep), now())
                .map_err(|e| e.message().to_string())?;
            let GameView::AutoPlay(view) = resp.view else {
                break;
            };
            if let Some(spin) = &view.last_spin {
                println!(
                    "{} | lines {:?} x{} -> win {}, balance = {}",
                    spin.rows.iter().map(|r| r.join("")).collect::<Vec<_>>().join(" / "),
                    spin.winning_lines,
                    spin.multiplier,
                    spin.total_win,
                    resp.balance
                );
            }
            if !view.active {
                println!("автоигра остановлена: {:?}", view.stop_reason);
                break;
            }
        }
    }

    println!();
    println!("================ STATS =================");
    if let QueryResponse::Stats(stats) = session.query(Query::Stats, now()) {
        println!("games:       {}", stats.total_games);
        println!("w/l/p:       {}/{}/{}", stats.wins, stats.losses, stats.pushes);
        println!("wagered:     {}", stats.total_wagered);
        println!("won:         {}", stats.total_won);
        println!("net profit:  {}", stats.net_profit);
        println!("win rate:    {:.1}%", stats.win_rate);
        println!("favourite:   {:?}", stats.favourite_game);
        println!("biggest win: {}", stats.biggest_win);
    }
    println!("final balance: {}", session.balance());

    Ok(())
}

/// Стратегия дилера для игрока: добираем до 17, удваиваем на 10-11.
fn play_blackjack_round(
    session: &mut CasinoSession<DeterministicRng>,
    stake: Chips,
    ts: u64,
) -> Result<(), ApiError> {
    let mut resp = session.execute(Command::Blackjack(BlackjackCommand::Deal { stake }), ts)?;

    loop {
        let GameView::Blackjack(view) = &resp.view else {
            break;
        };
        match view.phase {
            BlackjackPhase::Playing => {
                let cmd = if view.can_double_down && (10..=11).contains(&view.player_score) {
                    BlackjackCommand::DoubleDown
                } else if view.player_score < 17 {
                    BlackjackCommand::Hit
                } else {
                    BlackjackCommand::Stand
                };
                resp = session.execute(Command::Blackjack(cmd), ts)?;
            }
            BlackjackPhase::DealerTurn => {
                resp = session.execute(Command::Blackjack(BlackjackCommand::DealerStep), ts)?;
            }
            BlackjackPhase::Finished => {
                if let Some(summary) = &view.summary {
                    println!(
                        "{:?}: player {} vs dealer {}",
                        summary.result, summary.player_score, summary.dealer_score
                    );
                }
                session.execute(Command::Blackjack(BlackjackCommand::Reset), ts)?;
                break;
            }
            BlackjackPhase::Betting => break,
        }
    }
    Ok(())
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
