use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use tracing_subscriber::EnvFilter;

use dice::SeededDice;
use error::{GameError, handle_error};
use tower_crawl::{
    Cli, Command, CombatAction, EncounterState, Game, GameConfig, LootSwapDecision, Phase,
    StepOutcome, WeaponSwapDecision,
    input::HELP,
    parse_command,
    render::{render_board, render_inventory, render_status},
};

const INTRO: &str = "\
You wake in the top-left corner of a dark, hidden hall.
The exit waits in the far corner. Rats, spiders and skeletons wait in between.
Towers let you see around you; weapons and supplies lie on the floor.

Press Enter to begin.";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GameConfig::try_from(cli).context("Invalid options")?;

    let dice = match config.seed {
        Some(seed) => SeededDice::new(seed),
        None => SeededDice::from_entropy(),
    };
    let seed = dice.seed();
    tracing::info!(seed, difficulty = %config.difficulty, "new game");

    let mut game = Game::new(&config, Box::new(dice))
        .context("Failed to set up the board")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    if !config.skip_intro {
        clear(&mut stdout, &config)?;
        writeln!(stdout, "{INTRO}")?;
        stdout.flush().context("Failed to flush stdout")?;
        lines.next().transpose().context("Failed to read input")?;
    }

    let mut messages = vec![format!("Seed {seed}. Type `help` for the command list.")];
    loop {
        if game.phase() == Phase::Fighting
            && game.encounter().map(|e| e.state()) == Some(EncounterState::AwaitingPreTurn)
        {
            match game.begin_round() {
                Ok(start) => messages.extend(start.logs),
                Err(err) => messages.push(handle_error(&err)),
            }
        }

        draw(&mut stdout, &game, &messages)?;
        messages.clear();
        if game.phase().is_over() {
            break;
        }

        write!(stdout, "> ")?;
        stdout.flush().context("Failed to flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                messages.push(handle_error(&err));
                continue;
            }
        };

        match dispatch(&mut game, command, &mut messages) {
            Ok(true) => break,
            Ok(false) => {}
            Err(err) if err.is_recoverable() => messages.push(handle_error(&err)),
            Err(err) => {
                messages.push(handle_error(&err));
                break;
            }
        }
    }

    if !messages.is_empty() {
        draw(&mut stdout, &game, &messages)?;
    }

    if config.json_snapshot {
        let json = serde_json::to_string_pretty(&game.snapshot())
            .context("Failed to serialise the final state")?;
        writeln!(stdout, "{json}")?;
    }

    Ok(())
}

fn clear(stdout: &mut io::Stdout, config: &GameConfig) -> Result<()> {
    if !config.disable_clears {
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))
            .context("Failed to clear the terminal")?;
    }
    Ok(())
}

fn draw(stdout: &mut io::Stdout, game: &Game, messages: &[String]) -> Result<()> {
    clear(stdout, game.config())?;
    write!(stdout, "{}", render_board(game))?;
    writeln!(stdout)?;
    write!(stdout, "{}", render_status(&game.snapshot()))?;
    for message in messages {
        writeln!(stdout, "{message}")?;
    }
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Run one command; `Ok(true)` means the player wants to quit
fn dispatch(game: &mut Game, command: Command, messages: &mut Vec<String>) -> Result<bool, GameError> {
    match command {
        Command::Move(direction) => {
            let line = match game.step(direction)? {
                StepOutcome::Blocked => "A wall blocks the way".to_owned(),
                StepOutcome::Moved => return Ok(false),
                StepOutcome::EncounterStarted { kind, lvl } => {
                    format!("A level {lvl} {kind} attacks!")
                }
                StepOutcome::WeaponOffered(weapon) => format!("You found a {weapon}"),
                StepOutcome::BonusPicked(pickup) => match pickup {
                    hero::Pickup::Stored(kind) => format!("{kind} stored in the bag"),
                    hero::Pickup::Applied(outcome) => outcome.to_string(),
                },
                StepOutcome::BonusLeft(kind) => format!("No room for another {kind}"),
                StepOutcome::TowerUsed { revealed } => {
                    format!("From the tower you spot {revealed} new cells")
                }
                StepOutcome::ReachedGoal => "You found the exit!".to_owned(),
            };
            messages.push(line);
        }
        Command::Combat(CombatAction::Attack) => {
            let exchange = game.attack()?;
            messages.extend(exchange.logs);
        }
        Command::Combat(CombatAction::OpenInventory) => {
            messages.push(render_inventory(&game.hero().inventory()));
        }
        Command::Inventory(action) => {
            let outcome = game.inventory(action)?;
            messages.push(outcome.to_string());
        }
        Command::Decide(accept) => match game.phase() {
            Phase::WeaponOffer => {
                if let Some(old) = game.decide_weapon_swap(WeaponSwapDecision(accept))? {
                    messages.push(format!("You leave your {} behind", old.name));
                }
            }
            Phase::LootOffer => {
                if let Some(old) = game.resolve_loot(LootSwapDecision(accept))? {
                    messages.push(format!("You leave your {} behind", old.name));
                }
            }
            _ => messages.push("There is nothing to decide".to_owned()),
        },
        Command::Save => messages.push("Saving is not implemented".to_owned()),
        Command::Help => messages.push(HELP.to_owned()),
        Command::Quit => return Ok(true),
    }
    Ok(false)
}
