//! Line-oriented console play on top of the game loop thread.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use salvo_core::commands::InputSignal;
use salvo_core::enums::GameStateId;
use salvo_core::state::GameSnapshot;

use crate::cli::parse_weapon;
use crate::game_loop::{GameLoopHandle, LoopShared};

/// How long to wait for computer turns and shells before prompting anyway.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Signal(InputSignal),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  aim <deg>      turn the turret (0 right, 90 up, 180 left)
  power <n>      set slider power (0-1000)
  fire | ok      fire at slider power, finish buying, or leave the leaderboard
  press/release  hold-to-fire
  left | right   cycle weapons
  buy <weapon>   buy one weapon (missile, baby nuke, nuke, earthmover)
  status         show the battlefield
  quit";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let number = |what: &str| -> Result<i64, String> {
        rest.parse().map_err(|_| format!("{what} needs a number, got `{rest}`"))
    };
    let command = match word.to_ascii_lowercase().as_str() {
        "aim" => Command::Signal(InputSignal::AimTo {
            angle_deg: number("aim")?.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        }),
        "power" => Command::Signal(InputSignal::SetPower { power: number("power")? }),
        "fire" | "ok" => Command::Signal(InputSignal::ConfirmOk),
        "press" => Command::Signal(InputSignal::PressFire),
        "release" => Command::Signal(InputSignal::ReleaseFire),
        "left" => Command::Signal(InputSignal::CycleWeaponLeft),
        "right" => Command::Signal(InputSignal::CycleWeaponRight),
        "buy" => Command::Signal(InputSignal::Buy { weapon: parse_weapon(rest)? }),
        "status" | "" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };
    Ok(command)
}

/// The game waits on a person, or is finished.
fn is_settled(shared: &LoopShared) -> bool {
    if shared.match_over || shared.failure.is_some() {
        return true;
    }
    shared.pending.is_empty()
        && shared.latest_snapshot.as_ref().is_some_and(|s| {
            matches!(
                s.state,
                GameStateId::HumanMove | GameStateId::BuyWeapons | GameStateId::Leaderboard
            )
        })
}

pub fn describe(snapshot: &GameSnapshot) -> String {
    let mut out = format!(
        "round {}/{}  wind {:+.2}  state {:?}\n",
        snapshot.round, snapshot.total_rounds, snapshot.wind, snapshot.state
    );
    for p in &snapshot.players {
        let marker = if snapshot.current_player == Some(p.id) { '>' } else { ' ' };
        out.push_str(&format!(
            "{marker} {:<14} {:>6} life {:>3}  x {:>4}  angle {:>3}  {:?} {}  ${} (earned {})\n",
            p.name,
            p.color.display_name(),
            p.life,
            p.x,
            p.angle_deg,
            p.weapon,
            p.ammo,
            p.cash,
            p.earnings,
        ));
    }
    if snapshot.match_over {
        out.push_str("match over\n");
    }
    out
}

/// Read commands from `input` until quit, end of input, or match over.
pub fn run(handle: GameLoopHandle, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
    handle.wait_for(SETTLE_TIMEOUT, is_settled);
    if let Some(snapshot) = handle.latest_snapshot() {
        write!(output, "{}", describe(&snapshot))?;
    }

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(output, "{HELP}")?,
            Ok(Command::Status) => {
                if let Some(snapshot) = handle.latest_snapshot() {
                    write!(output, "{}", describe(&snapshot))?;
                }
            }
            Ok(Command::Signal(signal)) => {
                handle.send(signal);
                if !handle.wait_for(SETTLE_TIMEOUT, is_settled) {
                    writeln!(output, "(still busy)")?;
                }
                if let Some(snapshot) = handle.latest_snapshot() {
                    write!(output, "{}", describe(&snapshot))?;
                    if snapshot.match_over {
                        break;
                    }
                }
            }
            Err(e) => writeln!(output, "{e}")?,
        }
        output.flush()?;
    }

    if let Some(e) = handle.shutdown() {
        return Err(e.into());
    }
    Ok(())
}

/// Console play on stdin/stdout.
pub fn run_stdio(handle: GameLoopHandle) -> anyhow::Result<()> {
    let stdin = io::stdin();
    run(handle, stdin.lock(), io::stdout())
}
