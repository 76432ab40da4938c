use std::fmt::{Display, Formatter, Result as FmtResult};

/// Phase of a save attempt.
///
/// Every attempt starts from `Idle` and ends in `Succeeded` or `Failed`. A failed validation
/// goes straight from `Validating` to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Validating,
    Loading,
    Uploading,
    Assembling,
    Persisting,
    Succeeded,
    Failed,
}

impl SaveState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SaveState::Succeeded | SaveState::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SaveState::Idle => "idle",
            SaveState::Validating => "validating",
            SaveState::Loading => "loading",
            SaveState::Uploading => "uploading",
            SaveState::Assembling => "assembling",
            SaveState::Persisting => "persisting",
            SaveState::Succeeded => "succeeded",
            SaveState::Failed => "failed",
        }
    }
}

impl Display for SaveState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
