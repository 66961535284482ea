// Dialogue box: timed text reveal over a tree of pages and choices

use super::page::TextBoxPage;
use crate::engine::config::TextBoxConfig;
use crate::engine::error::{EngineError, Result};
use crate::engine::renderer::{GlyphMetrics, TextStyle, TextSurface};
use crate::math::Rect;
use glam::IVec2;

/// Colour of choice labels that are not selected
const UNSELECTED_CHOICE: [u8; 4] = [160, 160, 160, 255];

/// Where the reader stood when they took a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    page_index: usize,
    choice_index: usize,
    /// `rebound_depth` in effect before the branch was taken
    rebound_depth: Option<usize>,
}

/// Shows dialogue one page at a time, revealing text at each page's rate.
///
/// Choices nest page lists inside pages. Taking a branch pushes a frame onto
/// an explicit stack; the active page list is found by walking the frames
/// from the root. When a branch runs out and there is more left to read at
/// an outer level, the box rebounds to that level.
#[derive(Debug, Clone)]
pub struct TextBox {
    pages: Vec<TextBoxPage>,
    stack: Vec<Frame>,
    current_page: usize,
    /// Stack depth to return to once the current branch is read
    rebound_depth: Option<usize>,
    elapsed_ms: u32,
    config: TextBoxConfig,
}

impl TextBox {
    pub fn new(pages: Vec<TextBoxPage>, config: TextBoxConfig) -> Result<Self> {
        if pages.is_empty() {
            return Err(EngineError::config("a textbox needs at least one page"));
        }
        validate(&pages)?;

        Ok(Self {
            pages,
            stack: Vec::new(),
            current_page: 0,
            rebound_depth: None,
            elapsed_ms: 0,
            config,
        })
    }

    fn active_pages(&self) -> &[TextBoxPage] {
        let mut pages = &self.pages;
        for frame in &self.stack {
            pages = &pages[frame.page_index].choices()[frame.choice_index].pages;
        }
        pages
    }

    fn active_pages_mut(&mut self) -> &mut [TextBoxPage] {
        let mut pages = &mut self.pages;
        for frame in &self.stack {
            pages = &mut pages[frame.page_index].choices_mut()[frame.choice_index].pages;
        }
        pages
    }

    pub fn page(&self) -> &TextBoxPage {
        &self.active_pages()[self.current_page]
    }

    fn page_mut(&mut self) -> &mut TextBoxPage {
        let index = self.current_page;
        &mut self.active_pages_mut()[index]
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.active_pages().len()
    }

    /// How many branches deep the reader is
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn update(&mut self, delta_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
    }

    /// The part of the current page revealed so far
    pub fn visible_text(&self) -> &str {
        let page = self.page();
        let count = page.visible_chars(self.elapsed_ms);
        match page.text.char_indices().nth(count) {
            Some((end, _)) => &page.text[..end],
            None => &page.text,
        }
    }

    pub fn showing_full_page(&self) -> bool {
        let page = self.page();
        page.visible_chars(self.elapsed_ms) == page.char_count()
    }

    /// Jump to the end of the reveal. Never moves time backwards.
    pub fn show_full_page(&mut self) {
        self.elapsed_ms = self.elapsed_ms.max(self.page().full_reveal_ms());
    }

    /// True for a short while after the page became fully visible. Page
    /// turns are ignored meanwhile so one key press cannot skip a page.
    pub fn is_resting(&self) -> bool {
        let full_at = self.page().full_reveal_ms();
        self.elapsed_ms > full_at && self.elapsed_ms - full_at <= self.config.resting_period_ms
    }

    /// The page is fully shown and waits for a choice
    pub fn is_choosing(&self) -> bool {
        self.page().has_choices() && self.showing_full_page()
    }

    fn on_last_page(&self) -> bool {
        self.current_page + 1 == self.page_count()
    }

    /// Nothing left to read anywhere in the tree, and the last page has
    /// rested long enough to be dismissed
    pub fn finished(&self) -> bool {
        self.on_last_page()
            && self.showing_full_page()
            && !self.is_resting()
            && !self.page().has_choices()
            && (self.rebound_depth.is_none() || self.stack.is_empty())
    }

    pub fn goto_page(&mut self, index: usize) -> Result<()> {
        let len = self.page_count();
        if index >= len {
            return Err(EngineError::UnknownPage { index, len });
        }
        if index != self.current_page {
            self.current_page = index;
            self.elapsed_ms = 0;
        }
        Ok(())
    }

    pub fn next_page(&mut self) {
        if self.is_resting() {
            return;
        }
        if !self.on_last_page() {
            self.current_page += 1;
            self.elapsed_ms = 0;
        } else if let Some(depth) = self.rebound_depth {
            if !self.stack.is_empty() {
                self.rebound(depth);
            }
        }
    }

    pub fn prev_page(&mut self) {
        if self.is_resting() {
            return;
        }
        if self.current_page > 0 {
            self.current_page -= 1;
            self.elapsed_ms = 0;
        }
    }

    pub fn next_choice(&mut self) {
        self.page_mut().next_choice();
    }

    pub fn prev_choice(&mut self) {
        self.page_mut().prev_choice();
    }

    /// Take the selected branch of the current page
    pub fn make_choice(&mut self) {
        let page_index = self.current_page;
        let on_last_page = self.on_last_page();
        let page = self.page_mut();
        let choice_index = page.current_choice_index();
        let Some(choice) = page.choices_mut().get_mut(choice_index) else {
            return;
        };
        choice.visited = true;
        let label = choice.label.clone();
        let more_here = !on_last_page || page.first_unvisited().is_some();

        let depth = self.stack.len();
        self.stack.push(Frame {
            page_index,
            choice_index,
            rebound_depth: self.rebound_depth,
        });
        if more_here {
            self.rebound_depth = Some(depth);
        }
        self.current_page = 0;
        self.elapsed_ms = 0;
        log::debug!("Took choice '{}' at depth {}", label, depth);
    }

    /// Return to the branch point recorded at `depth`: offer the next
    /// unvisited choice there, or continue with the page after it
    fn rebound(&mut self, depth: usize) {
        let Some(frame) = self.stack.get(depth).copied() else {
            return;
        };
        self.stack.truncate(depth);
        self.current_page = frame.page_index;
        self.rebound_depth = frame.rebound_depth;
        self.elapsed_ms = 0;

        let page = self.page_mut();
        if let Some(unvisited) = page.first_unvisited() {
            page.select_choice(unvisited);
        } else if !self.on_last_page() {
            self.current_page += 1;
        } else {
            log::warn!("Rebound to depth {} found nothing left to read", depth);
        }
        log::debug!("Rebounded to page {} at depth {}", self.current_page, depth);
    }

    /// Draw the box, the revealed text, and the choice labels once the
    /// page is waiting for a choice
    pub fn draw<S: TextSurface>(&self, surface: &mut S, metrics: &dyn GlyphMetrics) {
        let (width, height) = self.config.size;
        let location = IVec2::new(self.config.location.0, self.config.location.1);
        let margin = IVec2::new(self.config.text_margin.0, self.config.text_margin.1);
        surface.fill_rect(
            Rect::from_pos_size(location, IVec2::new(width as i32, height as i32)),
            self.config.background,
        );

        let page = self.page();
        let style = &page.style;
        let line_height = metrics.line_height(style.size) + style.line_separation;
        let space = metrics.text_width(" ", style.size);
        let rightmost = width as i32 - margin.x;

        let mut cursor = margin;
        for word in self.visible_text().split(' ') {
            let word_width = metrics.text_width(word, style.size);
            if cursor.x + word_width > rightmost && cursor.x > margin.x {
                cursor = IVec2::new(margin.x, cursor.y + line_height);
            }
            surface.draw_text(word, location + cursor, style);
            cursor.x += word_width + space;
        }

        if self.is_choosing() {
            let mut x = margin.x;
            let y = height as i32 - margin.y - metrics.line_height(style.size);
            for (index, choice) in page.choices().iter().enumerate() {
                let selected = index == page.current_choice_index();
                let label = if selected {
                    format!("> {}", choice.label)
                } else {
                    choice.label.clone()
                };
                let label_style = TextStyle {
                    color: if selected { style.color } else { UNSELECTED_CHOICE },
                    ..style.clone()
                };
                surface.draw_text(&label, location + IVec2::new(x, y), &label_style);
                x += metrics.text_width(&label, style.size) + space * 2;
            }
        }
    }
}

fn validate(pages: &[TextBoxPage]) -> Result<()> {
    for page in pages {
        if page.cps == 0 {
            return Err(EngineError::config(format!(
                "page '{}' reveals zero characters per second",
                page.text
            )));
        }
        for choice in page.choices() {
            if choice.pages.is_empty() {
                return Err(EngineError::config(format!(
                    "choice '{}' leads to no pages",
                    choice.label
                )));
            }
            validate(&choice.pages)?;
        }
    }
    Ok(())
}
