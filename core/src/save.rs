use alloc::vec::Vec;
use minelog_protocol::{BombLocation, SavedSession};

use crate::*;

impl GameSession {
    /// Serialized form with the full log and current elapsed time.
    ///
    /// The format has no field for whether the session was started, so a
    /// session saved before [`GameSession::start`] is restored as running.
    pub fn to_saved(&self) -> SavedSession {
        SavedSession {
            height: self.height(),
            width: self.width(),
            classic: self.mode().is_classic(),
            number_of_mines: self.total_mines(),
            bomb_locations: self
                .mine_field()
                .locations()
                .iter()
                .map(|&(row, column)| BombLocation { row, column })
                .collect(),
            time: self.elapsed_secs(),
            log: self.log().to_entries(),
        }
    }

    /// Rebuilds a session from its serialized form.
    ///
    /// The recorded layout is placed as-is, the clock restored, the session
    /// started and then every logged action replayed. Actions logged after the
    /// game ended stay in the log as no-ops. A layout or log entry that cannot
    /// be read fails with [`GameError::CorruptSaveData`].
    ///
    /// Restored sessions are always running or finished, never pending, even
    /// when the save came from a session that was never started.
    pub fn restore(saved: &SavedSession) -> Result<Self> {
        let size = (saved.height, saved.width);
        let mode = RevealMode::from_classic(saved.classic);

        GameConfig::new(size, saved.number_of_mines, mode).map_err(corrupt)?;
        if saved.bomb_locations.len() != saved.number_of_mines as usize {
            return Err(SaveDataError::MineCountMismatch.into());
        }
        let locations: Vec<Coord2> = saved
            .bomb_locations
            .iter()
            .map(|location| (location.row, location.column))
            .collect();
        let mine_field = MineField::from_locations(size, &locations).map_err(corrupt)?;
        let log = ActionLog::from_entries(&saved.log)?;

        let mut session = Self::with_mine_field(mine_field, mode).map_err(corrupt)?;
        session.set_elapsed_secs(saved.time);
        session.start()?;
        log.replay(&mut session)?;

        log::debug!(
            "Restored session with {} actions, state {:?}",
            session.log().len(),
            session.state()
        );
        Ok(session)
    }
}

impl TryFrom<&SavedSession> for GameSession {
    type Error = GameError;

    fn try_from(saved: &SavedSession) -> Result<Self> {
        Self::restore(saved)
    }
}

impl From<&GameSession> for SavedSession {
    fn from(session: &GameSession) -> Self {
        session.to_saved()
    }
}

fn corrupt(err: GameError) -> GameError {
    let reason = match err {
        GameError::InvalidDimensions => SaveDataError::InvalidDimensions,
        GameError::TooManyMines => SaveDataError::TooManyMines,
        GameError::OutOfBounds => SaveDataError::MineOutOfBounds,
        GameError::DuplicateMine => SaveDataError::DuplicateMine,
        GameError::CorruptSaveData(reason) => reason,
        GameError::NotStarted | GameError::AlreadyEnded => return err,
    };
    GameError::CorruptSaveData(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use minelog_protocol::LogEntry;

    fn saved(log: Vec<LogEntry>) -> SavedSession {
        SavedSession {
            height: 2,
            width: 3,
            classic: true,
            number_of_mines: 2,
            bomb_locations: vec![
                BombLocation { row: 0, column: 2 },
                BombLocation { row: 1, column: 2 },
            ],
            time: 42,
            log,
        }
    }

    #[test]
    fn restore_replays_log() {
        let saved = saved(vec![
            LogEntry::new("poke", vec![0, 0]),
            LogEntry::new("flag", vec![0, 2]),
        ]);

        let session = GameSession::restore(&saved).unwrap();

        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.elapsed_secs(), 42);
        assert!(session.grid().cell_at((1, 1)).unwrap().is_revealed());
        assert!(session.grid().cell_at((0, 2)).unwrap().is_flagged());
        assert_eq!(session.to_saved(), saved);
    }

    #[test]
    fn restore_rejects_inconsistent_layouts() {
        let mut mismatch = saved(vec![]);
        mismatch.number_of_mines = 1;
        assert_eq!(
            GameSession::restore(&mismatch),
            Err(GameError::CorruptSaveData(SaveDataError::MineCountMismatch))
        );

        let mut duplicate = saved(vec![]);
        duplicate.bomb_locations[1] = duplicate.bomb_locations[0];
        assert_eq!(
            GameSession::restore(&duplicate),
            Err(GameError::CorruptSaveData(SaveDataError::DuplicateMine))
        );

        let mut outside = saved(vec![]);
        outside.bomb_locations[1] = BombLocation { row: 2, column: 0 };
        assert_eq!(
            GameSession::restore(&outside),
            Err(GameError::CorruptSaveData(SaveDataError::MineOutOfBounds))
        );

        let mut empty = saved(vec![]);
        empty.width = 0;
        assert_eq!(
            GameSession::restore(&empty),
            Err(GameError::CorruptSaveData(SaveDataError::InvalidDimensions))
        );
    }

    #[test]
    fn restore_rejects_bad_logs() {
        let unknown = saved(vec![LogEntry::new("undo", vec![])]);
        assert_eq!(
            GameSession::restore(&unknown),
            Err(GameError::CorruptSaveData(SaveDataError::UnknownVerb))
        );

        let negative = saved(vec![LogEntry::new("flag", vec![-1, 0])]);
        assert_eq!(
            GameSession::restore(&negative),
            Err(GameError::CorruptSaveData(SaveDataError::BadArguments))
        );
    }

    #[test]
    fn restore_keeps_actions_logged_after_a_loss() {
        let json = r#"{
            "height": 1,
            "width": 2,
            "classic": true,
            "numberOfMines": 1,
            "bombLocations": [{"row": 0, "column": 1}],
            "log": [["poke", [0, 1]], ["poke", [0, 0]]]
        }"#;
        let saved = SavedSession::from_json(json).unwrap();

        let session = GameSession::restore(&saved).unwrap();

        assert_eq!(session.state(), SessionState::Lost);
        assert_eq!(
            session.log().as_slice(),
            &[Action::Poke((0, 1)), Action::Poke((0, 0))]
        );
        assert_eq!(session.to_saved(), saved);
    }

    #[test]
    fn never_started_session_restores_as_running() {
        let field = MineField::from_locations((2, 2), &[(1, 1)]).unwrap();
        let pending = GameSession::with_mine_field(field, RevealMode::Classic).unwrap();
        assert_eq!(pending.state(), SessionState::Pending);

        let mut restored = GameSession::restore(&pending.to_saved()).unwrap();

        assert_eq!(restored.state(), SessionState::Running);
        assert_eq!(restored.poke((0, 0)), Ok(RevealOutcome::Revealed));
    }
}
