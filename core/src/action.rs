use alloc::vec::Vec;
use minelog_protocol::{LogEntry, verb};

use crate::*;

/// A player action as recorded in the session log.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Poke(Coord2),
    Flag(Coord2),
    Validate,
    Cheat,
}

impl Action {
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Poke(_) => verb::POKE,
            Self::Flag(_) => verb::FLAG,
            Self::Validate => verb::VALIDATE,
            Self::Cheat => verb::CHEAT,
        }
    }

    pub fn to_entry(self) -> LogEntry {
        let args = match self {
            Self::Poke((row, column)) | Self::Flag((row, column)) => {
                alloc::vec![row.into(), column.into()]
            }
            Self::Validate | Self::Cheat => Vec::new(),
        };
        LogEntry::new(self.verb(), args)
    }
}

impl TryFrom<&LogEntry> for Action {
    type Error = SaveDataError;

    fn try_from(entry: &LogEntry) -> core::result::Result<Self, Self::Error> {
        let coords = || -> core::result::Result<Coord2, SaveDataError> {
            match *entry.args() {
                [row, column] => Ok((
                    Coord::try_from(row).map_err(|_| SaveDataError::BadArguments)?,
                    Coord::try_from(column).map_err(|_| SaveDataError::BadArguments)?,
                )),
                _ => Err(SaveDataError::BadArguments),
            }
        };
        let no_args = |action: Action| {
            if entry.args().is_empty() {
                Ok(action)
            } else {
                Err(SaveDataError::BadArguments)
            }
        };

        match entry.verb() {
            verb::POKE => coords().map(Self::Poke),
            verb::FLAG => coords().map(Self::Flag),
            verb::VALIDATE => no_args(Self::Validate),
            verb::CHEAT => no_args(Self::Cheat),
            _ => Err(SaveDataError::UnknownVerb),
        }
    }
}

/// Append-only record of the actions a session accepted, in call order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }

    pub fn to_entries(&self) -> Vec<LogEntry> {
        self.iter().map(Action::to_entry).collect()
    }

    pub fn from_entries(entries: &[LogEntry]) -> core::result::Result<Self, SaveDataError> {
        let actions = entries
            .iter()
            .map(Action::try_from)
            .collect::<core::result::Result<_, _>>()?;
        Ok(Self { actions })
    }

    /// Applies every action in order to `session`, which records them in its
    /// own log.
    ///
    /// Actions the session turns away because it is not running (a poke after
    /// a loss, say) are still recorded and otherwise do nothing, so the
    /// rebuilt log always matches this one.
    pub fn replay(&self, session: &mut GameSession) -> Result<()> {
        for action in self.iter() {
            match session.apply(action) {
                Ok(()) => {}
                Err(GameError::NotStarted | GameError::AlreadyEnded) => {
                    session.record_ignored(action)
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ActionLog {
    type Item = &'a Action;
    type IntoIter = core::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn entries_keep_order_and_arguments() {
        let mut log = ActionLog::new();
        log.append(Action::Poke((1, 2)));
        log.append(Action::Cheat);
        log.append(Action::Poke((1, 2)));
        log.append(Action::Flag((0, 3)));
        log.append(Action::Validate);

        let entries = log.to_entries();

        assert_eq!(
            entries,
            vec![
                LogEntry::new("poke", vec![1, 2]),
                LogEntry::new("cheat", vec![]),
                LogEntry::new("poke", vec![1, 2]),
                LogEntry::new("flag", vec![0, 3]),
                LogEntry::new("validate", vec![]),
            ]
        );
        assert_eq!(ActionLog::from_entries(&entries), Ok(log));
    }

    #[test]
    fn rejects_unknown_verbs_and_bad_arguments() {
        let parse = |verb: &str, args: Vec<i64>| Action::try_from(&LogEntry::new(verb, args));

        assert_eq!(parse("undo", vec![]), Err(SaveDataError::UnknownVerb));
        assert_eq!(parse("poke", vec![1]), Err(SaveDataError::BadArguments));
        assert_eq!(parse("flag", vec![-1, 0]), Err(SaveDataError::BadArguments));
        assert_eq!(parse("poke", vec![0, 70_000]), Err(SaveDataError::BadArguments));
        assert_eq!(parse("cheat", vec![0]), Err(SaveDataError::BadArguments));
        assert_eq!(parse("flag", vec![4, 5]), Ok(Action::Flag((4, 5))));
    }
}
