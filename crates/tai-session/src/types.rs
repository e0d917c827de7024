use tai_core::ArrowDirection;

// macOS virtual key codes
pub mod key {
    pub const ENTER: u16 = 36;
    pub const TAB: u16 = 48;
    pub const SPACE: u16 = 49;
    pub const BACKSPACE: u16 = 51;
    pub const ESCAPE: u16 = 53;
    pub const DOWN: u16 = 125;
    pub const UP: u16 = 126;
}

// Flag bits for handle_key
pub const FLAG_SHIFT: u8 = 1;
pub const FLAG_CAPS_LOCK: u8 = 2;
pub const FLAG_OPTION: u8 = 4;
pub const FLAG_COMMAND: u8 = 8;

/// Modifier set accompanying a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub caps_lock: bool,
    pub option: bool,
    pub command: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        caps_lock: false,
        option: false,
        command: false,
    };

    pub fn from_flags(flags: u8) -> Self {
        Self {
            shift: flags & FLAG_SHIFT != 0,
            caps_lock: flags & FLAG_CAPS_LOCK != 0,
            option: flags & FLAG_OPTION != 0,
            command: flags & FLAG_COMMAND != 0,
        }
    }

    /// Shift and CapsLock both raise letters; union, not xor.
    pub fn uppercase(&self) -> bool {
        self.shift || self.caps_lock
    }

    /// Option and Command mark host-reserved combinations.
    pub fn host_reserved(&self) -> bool {
        self.option || self.command
    }

    pub fn shift() -> Self {
        Modifiers {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn option() -> Self {
        Modifiers {
            option: true,
            ..Self::NONE
        }
    }

    pub fn command() -> Self {
        Modifiers {
            command: true,
            ..Self::NONE
        }
    }
}

/// Semantic key event produced by the classifier. One per raw key, never
/// retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Lowercased letter; case is reapplied by the dispatcher from modifiers.
    Alphabet(char),
    Digit(u8),
    Punctuation(char),
    Enter,
    Space,
    Tab,
    Backspace,
    Escape,
    Arrow(ArrowDirection),
    Other,
}

/// One host text mutation, in the order it must be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOp {
    /// Show as uncommitted preview at the cursor.
    Mark(String),
    /// Commit to the document.
    Insert(String),
    /// Remove the uncommitted preview.
    ClearMarked,
}

/// Outcome of dispatching one key event: whether the key was consumed, plus
/// the ordered host mutations to apply.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub handled: bool,
    pub ops: Vec<HostOp>,
}

impl DispatchResult {
    pub(crate) fn handled() -> Self {
        Self {
            handled: true,
            ops: Vec::new(),
        }
    }

    pub(crate) fn pass_through() -> Self {
        Self {
            handled: false,
            ops: Vec::new(),
        }
    }

    pub(crate) fn with(mut self, op: HostOp) -> Self {
        self.ops.push(op);
        self
    }

    pub(crate) fn with_ops(mut self, ops: Vec<HostOp>) -> Self {
        self.ops.extend(ops);
        self
    }

    /// Texts inserted into the document by this result, in order.
    pub fn inserted(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                HostOp::Insert(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The last marked preview text, if any.
    pub fn marked(&self) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            HostOp::Mark(text) => Some(text.as_str()),
            _ => None,
        })
    }
}
