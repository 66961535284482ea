// Dialogue files: a tree of pages and choices, loaded from TOML

use super::page::TextBoxPage;
use crate::engine::error::{EngineError, Result};
use crate::engine::renderer::TextStyle;
use serde::{Deserialize, Serialize};

/// A whole conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueDescriptor {
    #[serde(default)]
    pub pages: Vec<PageDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub text: String,
    #[serde(default)]
    pub cps: Option<u32>,
    #[serde(default)]
    pub style: Option<TextStyle>,
    #[serde(default)]
    pub choices: Vec<ChoiceDescriptor>,
    /// Pages shared by every choice of this page that has none of its own
    #[serde(default)]
    pub pages: Vec<PageDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceDescriptor {
    pub label: String,
    #[serde(default)]
    pub pages: Vec<PageDescriptor>,
}

impl DialogueDescriptor {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|err| EngineError::config(format!("malformed dialogue: {}", err)))
    }

    /// Build the page tree. Pages without a reveal rate use `default_cps`.
    pub fn build(&self, default_cps: u32) -> Result<Vec<TextBoxPage>> {
        build_pages(&self.pages, default_cps)
    }
}

fn build_pages(descriptors: &[PageDescriptor], default_cps: u32) -> Result<Vec<TextBoxPage>> {
    descriptors
        .iter()
        .map(|descriptor| build_page(descriptor, default_cps))
        .collect()
}

fn build_page(descriptor: &PageDescriptor, default_cps: u32) -> Result<TextBoxPage> {
    let mut page = TextBoxPage::new(descriptor.text.trim())
        .with_cps(descriptor.cps.unwrap_or(default_cps));
    if let Some(style) = &descriptor.style {
        page = page.with_style(style.clone());
    }

    for choice in &descriptor.choices {
        let branch = if !choice.pages.is_empty() {
            &choice.pages
        } else if !descriptor.pages.is_empty() {
            &descriptor.pages
        } else {
            return Err(EngineError::config(format!(
                "choice '{}' has no pages and '{}' has none to share",
                choice.label, descriptor.text
            )));
        };
        page = page.with_choice(choice.label.clone(), build_pages(branch, default_cps)?);
    }
    Ok(page)
}
