// Dialogue pages and the choices that branch off them

use crate::engine::renderer::TextStyle;

/// Reveal rate used when a page does not set one
pub const DEFAULT_CPS: u32 = 30;

/// A labelled branch: picking it shows `pages`
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: String,
    pub pages: Vec<TextBoxPage>,
    pub visited: bool,
}

impl Choice {
    pub fn new(label: impl Into<String>, pages: Vec<TextBoxPage>) -> Self {
        Self {
            label: label.into(),
            pages,
            visited: false,
        }
    }
}

/// One screenful of dialogue text
#[derive(Debug, Clone, PartialEq)]
pub struct TextBoxPage {
    pub text: String,
    /// Characters revealed per second
    pub cps: u32,
    pub style: TextStyle,
    choices: Vec<Choice>,
    current_choice: usize,
}

impl TextBoxPage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cps: DEFAULT_CPS,
            style: TextStyle::default(),
            choices: Vec::new(),
            current_choice: 0,
        }
    }

    pub fn with_cps(mut self, cps: u32) -> Self {
        self.cps = cps;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_choice(mut self, label: impl Into<String>, pages: Vec<TextBoxPage>) -> Self {
        self.choices.push(Choice::new(label, pages));
        self
    }

    /// Length in characters, not bytes
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Shortest time after which every character is visible
    pub fn full_reveal_ms(&self) -> u32 {
        let chars = self.char_count() as u64;
        let cps = u64::from(self.cps.max(1));
        ((chars * 1000 + cps - 1) / cps) as u32
    }

    /// Characters visible after `elapsed_ms`
    pub fn visible_chars(&self, elapsed_ms: u32) -> usize {
        let revealed = u64::from(self.cps) * u64::from(elapsed_ms) / 1000;
        (revealed as usize).min(self.char_count())
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub(crate) fn choices_mut(&mut self) -> &mut [Choice] {
        &mut self.choices
    }

    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }

    pub fn current_choice(&self) -> Option<&Choice> {
        self.choices.get(self.current_choice)
    }

    pub fn current_choice_index(&self) -> usize {
        self.current_choice
    }

    pub(crate) fn select_choice(&mut self, index: usize) {
        if index < self.choices.len() {
            self.current_choice = index;
        }
    }

    pub fn next_choice(&mut self) {
        if !self.choices.is_empty() {
            self.current_choice = (self.current_choice + 1) % self.choices.len();
        }
    }

    pub fn prev_choice(&mut self) {
        if !self.choices.is_empty() {
            let len = self.choices.len();
            self.current_choice = (self.current_choice + len - 1) % len;
        }
    }

    pub fn first_unvisited(&self) -> Option<usize> {
        self.choices.iter().position(|choice| !choice.visited)
    }
}
