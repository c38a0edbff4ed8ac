use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Pending -> Running
/// - Running -> Won
/// - Running -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Constructed, `start` not called yet
    #[default]
    Pending,
    Running,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from configuration to win or loss.
///
/// Every accepted player action is appended to the session's [`ActionLog`]
/// before it is carried out, so the log together with the [`MineField`] is
/// enough to rebuild the session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    config: GameConfig,
    mine_field: MineField,
    grid: Grid,
    engine: RevealEngine,
    state: SessionState,
    elapsed_secs: u32,
    log: ActionLog,
}

impl GameSession {
    /// Fresh session with a randomly generated mine field.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let mine_field = RandomMinefieldGenerator::new(seed).generate(&config)?;
        Self::with_mine_field(mine_field, config.mode)
    }

    /// Session over a known mine layout, used to rebuild saved games.
    pub fn with_mine_field(mine_field: MineField, mode: RevealMode) -> Result<Self> {
        let config = mine_field.game_config(mode);
        config.validate()?;
        let grid = mine_field.build_grid()?;

        Ok(Self {
            config,
            mine_field,
            grid,
            engine: RevealEngine::new(mode),
            state: SessionState::Pending,
            elapsed_secs: 0,
            log: ActionLog::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn mode(&self) -> RevealMode {
        self.engine.mode()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn mine_field(&self) -> &MineField {
        &self.mine_field
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn cell_view(&self, coords: Coord2) -> Option<CellView> {
        self.grid
            .cell_at(coords)
            .map(|cell| CellView::new(cell, self.is_finished()))
    }

    pub fn view(&self) -> BoardView {
        BoardView::from_session(self)
    }

    /// Starts the game and its clock. Starting a running game does nothing.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            SessionState::Pending => {
                log::debug!(
                    "Session started: {}x{}, {} mines, {:?}",
                    self.height(),
                    self.width(),
                    self.total_mines(),
                    self.mode()
                );
                self.state = SessionState::Running;
                Ok(())
            }
            SessionState::Running => Ok(()),
            SessionState::Won | SessionState::Lost => Err(GameError::AlreadyEnded),
        }
    }

    /// One second of the external clock. Returns `false` once the session is
    /// not running, which is the caller's signal to stop scheduling ticks.
    pub fn tick(&mut self) -> bool {
        if self.state.is_running() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            true
        } else {
            false
        }
    }

    pub fn poke(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_running()?;
        self.log.append(Action::Poke(coords));

        let outcome = self.engine.poke(&mut self.grid, coords);
        if outcome == RevealOutcome::HitMine {
            self.end_game(false);
        }
        Ok(outcome)
    }

    pub fn flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_running()?;
        self.log.append(Action::Flag(coords));

        Ok(self.engine.flag(&mut self.grid, coords))
    }

    /// Ends the game: won when every safe cell is revealed, lost otherwise.
    pub fn validate(&mut self) -> Result<SessionState> {
        self.check_running()?;
        self.log.append(Action::Validate);

        let won = self.grid.all_safe_revealed();
        self.end_game(won);
        Ok(self.state)
    }

    /// Exposes every bomb to the player without touching the game state.
    pub fn cheat(&mut self) -> Result<()> {
        if self.state.is_pending() {
            return Err(GameError::NotStarted);
        }
        self.log.append(Action::Cheat);

        self.grid.expose_all_bombs();
        Ok(())
    }

    /// Dispatches a logged action to the matching operation.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Poke(coords) => self.poke(coords).map(drop),
            Action::Flag(coords) => self.flag(coords).map(drop),
            Action::Validate => self.validate().map(drop),
            Action::Cheat => self.cheat(),
        }
    }

    /// Logs an action replayed outside the running state without applying it.
    pub(crate) fn record_ignored(&mut self, action: Action) {
        log::debug!("Replayed {:?} while {:?}, kept as a no-op", action, self.state);
        self.log.append(action);
    }

    pub(crate) fn set_elapsed_secs(&mut self, elapsed_secs: u32) {
        self.elapsed_secs = elapsed_secs;
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        log::debug!(
            "Session ended {:?} after {}s and {} actions",
            self.state,
            self.elapsed_secs,
            self.log.len()
        );
        self.grid.poke_all();
    }

    fn check_running(&self) -> Result<()> {
        match self.state {
            SessionState::Running => Ok(()),
            SessionState::Pending => {
                log::warn!("Action rejected, session not started");
                Err(GameError::NotStarted)
            }
            SessionState::Won | SessionState::Lost => {
                log::warn!("Action rejected, session already ended");
                Err(GameError::AlreadyEnded)
            }
        }
    }
}
