use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use minelog_core::{
    Action, BoardView, CellCount, CellView, Coord, GameConfig, GameSession, RevealMode,
};
use minelog_protocol::SavedSession;

/// Drive and inspect saved minelog sessions.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new session and write its save file
    New {
        #[arg(long, default_value_t = 9)]
        height: Coord,
        #[arg(long, default_value_t = 9)]
        width: Coord,
        #[arg(long, default_value_t = 10)]
        mines: CellCount,
        /// Reveal one cell per poke instead of cascading
        #[arg(long)]
        single: bool,
        /// Seed for mine placement, random when omitted
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Apply one action to a save file
    Apply {
        file: PathBuf,
        #[command(subcommand)]
        action: ActionArg,
    },
    /// Print the state of a save file
    Show { file: PathBuf },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ActionArg {
    Poke { row: Coord, column: Coord },
    Flag { row: Coord, column: Coord },
    Validate,
    Cheat,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Poke { row, column } => Action::Poke((row, column)),
            ActionArg::Flag { row, column } => Action::Flag((row, column)),
            ActionArg::Validate => Action::Validate,
            ActionArg::Cheat => Action::Cheat,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    match cli.command {
        Command::New {
            height,
            width,
            mines,
            single,
            seed,
            output,
        } => {
            let mode = RevealMode::from_classic(!single);
            let config = GameConfig::new((height, width), mines, mode)
                .context("Invalid game configuration")?;
            let session = start_session(config, seed)?;
            write_save(&output, &session)?;
            print!("{}", render(&session.view()));
        }
        Command::Apply { file, action } => {
            let mut session = read_save(&file)?;
            session
                .apply(action.into())
                .with_context(|| format!("Could not apply {:?}", action))?;
            write_save(&file, &session)?;
            print!("{}", render(&session.view()));
        }
        Command::Show { file } => {
            let session = read_save(&file)?;
            print!("{}", render(&session.view()));
        }
    }
    Ok(())
}

fn start_session(config: GameConfig, seed: Option<u64>) -> Result<GameSession> {
    let seed = seed.unwrap_or_else(rand::random);
    log::info!(
        "Generating {}x{} with {} mines, seed {}",
        config.height(),
        config.width(),
        config.mines,
        seed
    );

    let mut session = GameSession::new(config, seed)?;
    session.start()?;
    Ok(session)
}

fn read_save(path: &Path) -> Result<GameSession> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let saved = SavedSession::from_json(&json)
        .with_context(|| format!("Could not parse {}", path.display()))?;
    GameSession::restore(&saved).with_context(|| format!("Could not restore {}", path.display()))
}

fn write_save(path: &Path, session: &GameSession) -> Result<()> {
    let json = session.to_saved().to_json_pretty()?;
    fs::write(path, json).with_context(|| format!("Could not write {}", path.display()))?;
    log::debug!("Saved {} actions to {}", session.log().len(), path.display());
    Ok(())
}

fn render(view: &BoardView) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(out, "{:?}  {:03}s", view.state, view.elapsed_secs);
    for row in view.cells.rows() {
        let line: String = row.iter().map(cell_char).collect();
        let _ = writeln!(out, "{line}");
    }
    out
}

fn cell_char(cell: &CellView) -> char {
    match (cell.bomb, cell.neighbor_bomb_count) {
        (Some(true), _) if cell.revealed || cell.bomb_exposed => '*',
        (_, Some(0)) => '.',
        (_, Some(count)) => char::from(b'0' + count),
        _ if cell.flagged => 'F',
        _ => '#',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minelog_core::MineField;

    #[test]
    fn renders_running_and_finished_boards() {
        let field = MineField::from_locations((2, 3), &[(0, 2)]).unwrap();
        let mut session = GameSession::with_mine_field(field, RevealMode::Single).unwrap();
        session.start().unwrap();
        session.poke((1, 0)).unwrap();
        session.poke((0, 1)).unwrap();
        session.flag((0, 2)).unwrap();

        assert_eq!(render(&session.view()), "Running  000s\n#1F\n.##\n");

        session.validate().unwrap();
        assert_eq!(render(&session.view()), "Lost  000s\n.1*\n.11\n");
    }

    #[test]
    fn unseeded_sessions_start_with_the_configured_mines() {
        let config = GameConfig::new((16, 30), 99, RevealMode::Classic).unwrap();

        let session = start_session(config, None).unwrap();
        assert!(session.is_running());
        assert_eq!(session.mine_field().mine_count(), 99);

        let seeded = start_session(config, Some(7)).unwrap();
        let again = start_session(config, Some(7)).unwrap();
        assert_eq!(seeded.mine_field(), again.mine_field());
    }

    #[test]
    fn parses_apply_subcommand() {
        let cli = Cli::try_parse_from(["minelog", "apply", "game.json", "poke", "3", "4"]).unwrap();

        match cli.command {
            Command::Apply { file, action } => {
                assert_eq!(file, PathBuf::from("game.json"));
                assert_eq!(Action::from(action), Action::Poke((3, 4)));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
