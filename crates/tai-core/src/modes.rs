/// Input mode: how keystrokes become composition text.
///
/// Persists across sessions until changed by the mode hot-key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Multi-candidate composition with a navigable candidate list.
    #[default]
    Continuous,
    /// Word-at-a-time composition with the classic punctuation remap.
    Classic,
    /// Free typing through the engine, no candidate selection.
    Manual,
}

impl InputMode {
    /// Next mode in the hot-key cycle: Continuous → Classic → Manual → Continuous.
    pub fn cycle(self) -> Self {
        match self {
            Self::Continuous => Self::Classic,
            Self::Classic => Self::Manual,
            Self::Manual => Self::Continuous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Continuous => "Auto",
            Self::Classic => "Classic",
            Self::Manual => "Manual",
        }
    }
}

/// Preferred script when committing, and the Classic-mode space/punctuation
/// substitution preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    LomajiFirst,
    HanjiFirst,
}

impl OutputMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::LomajiFirst => Self::HanjiFirst,
            Self::HanjiFirst => Self::LomajiFirst,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LomajiFirst => "Lomaji",
            Self::HanjiFirst => "Hanji",
        }
    }
}
