use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use salvo_app::cli::Args;
use salvo_app::persistence::{self, SaveFile};
use salvo_app::{console, game_loop, headless, logging};
use salvo_sim::{Clock, ManualClock, SimConfig, SimulationEngine, SystemClock};

fn open_engine(args: &Args, config: SimConfig, clock: Arc<dyn Clock>) -> anyhow::Result<SimulationEngine> {
    let engine = match &args.load {
        Some(slot) => {
            let file = persistence::load_from_file(&args.save_dir, slot)?;
            SimulationEngine::restore(file.game, config, clock)
                .with_context(|| format!("restoring slot `{slot}`"))?
        }
        None => SimulationEngine::with_clock(config, clock).context("starting match")?,
    };
    Ok(engine)
}

fn main() -> anyhow::Result<()> {
    logging::init_tracing();
    let args = Args::parse();

    if args.list_saves {
        for save in persistence::list_saves(&args.save_dir) {
            println!(
                "{:<20} round {}/{}{}",
                save.slot_name,
                save.round,
                save.total_rounds,
                if save.match_over { " (finished)" } else { "" }
            );
        }
        return Ok(());
    }

    let config = args.sim_config()?;
    let seed = config.seed;

    if args.interactive {
        let engine = open_engine(&args, config, Arc::new(SystemClock::default()))?;
        let handle = game_loop::spawn_game_loop(engine).context("spawning game loop")?;
        return console::run_stdio(handle);
    }

    let clock = ManualClock::new();
    let mut engine = open_engine(&args, config, Arc::new(clock.clone()))?;
    anyhow::ensure!(
        headless::is_unattended(&engine),
        "human players need --interactive; pass computer-only --players to fast-forward"
    );

    let outcome = headless::run_match(&mut engine, &clock, args.max_ticks)?;
    if outcome.finished {
        let board = engine.leaderboard()?;
        println!("{} wins after {} ticks", board.winner_text()?, outcome.ticks);
    } else {
        println!("no result after {} ticks", outcome.ticks);
    }

    if let Some(slot) = &args.save {
        let path = persistence::save_to_file(&args.save_dir, slot, &SaveFile::new(slot, seed, engine.save()))?;
        println!("saved to {}", path.display());
    }
    Ok(())
}
