//! Core type definitions shared by the viewers

/// Fixed zoom presets standing in for a measured fit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FitMode {
    #[default]
    Page,
    Width,
}

impl FitMode {
    pub const PAGE_SCALE: f64 = 1.0;
    pub const WIDTH_SCALE: f64 = 1.5;

    pub fn toggle(self) -> Self {
        match self {
            Self::Page => Self::Width,
            Self::Width => Self::Page,
        }
    }

    pub fn scale(self) -> f64 {
        match self {
            Self::Page => Self::PAGE_SCALE,
            Self::Width => Self::WIDTH_SCALE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Page => "Fit page",
            Self::Width => "Fit width",
        }
    }
}

/// Quarter-turn rotation of a document page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn next(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Whether the page is on its side (width and height swap)
    pub fn is_sideways(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekDirection {
    Forward,
    Backward,
}

/// Transient on-screen cue raised by a relative seek.
///
/// Every seek gets a fresh `token`, so a dismissal timer armed for an older
/// cue can never clear a newer one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeekFeedback {
    pub direction: SeekDirection,
    pub step_secs: f64,
    pub token: u64,
}

/// Capability for asking whether a text field currently owns the keyboard
pub trait InputFocus {
    fn text_input_focused(&self) -> bool;
}

/// The manual page-jump field of the document toolbar
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageJumpInput {
    pub text: String,
    focused: bool,
}

impl PageJumpInput {
    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn push_digit(&mut self, c: char) {
        if c.is_ascii_digit() && self.text.len() < 6 {
            self.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Overwrite the field with the page actually shown
    pub fn sync(&mut self, page: u32) {
        self.text = page.to_string();
    }
}

impl InputFocus for PageJumpInput {
    fn text_input_focused(&self) -> bool {
        self.focused
    }
}

/// Shell-level UI state (help popup, transient status line)
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub show_help: bool,
    pub status_message: Option<String>,
}
