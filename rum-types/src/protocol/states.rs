use std::fmt;
use std::str;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error used when parsing `EntryType`.
#[derive(Debug, Error)]
#[error("invalid performance entry type")]
pub struct ParseEntryTypeError;

/// An error used when parsing `ReadyState`.
#[derive(Debug, Error)]
#[error("invalid document ready state")]
pub struct ParseReadyStateError;

/// An error used when parsing `VisibilityState`.
#[derive(Debug, Error)]
#[error("invalid visibility state")]
pub struct ParseVisibilityStateError;

/// The performance timeline streams the agent subscribes to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryType {
    /// Navigation timing of the current document.
    Navigation,
    /// Paint timing (`first-paint`, `first-contentful-paint`).
    Paint,
    /// Largest contentful paint candidates.
    LargestContentfulPaint,
    /// Layout shifts.
    LayoutShift,
    /// The first discrete user input.
    FirstInput,
}

impl EntryType {
    /// All entry types in the order the agent subscribes to them.
    pub const ALL: [EntryType; 5] = [
        EntryType::Navigation,
        EntryType::Paint,
        EntryType::LargestContentfulPaint,
        EntryType::LayoutShift,
        EntryType::FirstInput,
    ];

    /// The name the browser uses for this entry type.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Navigation => "navigation",
            EntryType::Paint => "paint",
            EntryType::LargestContentfulPaint => "largest-contentful-paint",
            EntryType::LayoutShift => "layout-shift",
            EntryType::FirstInput => "first-input",
        }
    }
}

impl str::FromStr for EntryType {
    type Err = ParseEntryTypeError;

    fn from_str(string: &str) -> Result<EntryType, Self::Err> {
        Ok(match string {
            "navigation" => EntryType::Navigation,
            "paint" => EntryType::Paint,
            "largest-contentful-paint" => EntryType::LargestContentfulPaint,
            "layout-shift" => EntryType::LayoutShift,
            "first-input" => EntryType::FirstInput,
            _ => return Err(ParseEntryTypeError),
        })
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The loading state of the document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    /// The document is still loading.
    #[default]
    Loading,
    /// The document was parsed but subresources are still loading.
    Interactive,
    /// The document and all subresources have finished loading.
    Complete,
}

impl ReadyState {
    /// Returns `true` once the document has fully loaded.
    pub fn is_complete(self) -> bool {
        self == ReadyState::Complete
    }
}

impl str::FromStr for ReadyState {
    type Err = ParseReadyStateError;

    fn from_str(string: &str) -> Result<ReadyState, Self::Err> {
        Ok(match string {
            "loading" => ReadyState::Loading,
            "interactive" => ReadyState::Interactive,
            "complete" => ReadyState::Complete,
            _ => return Err(ParseReadyStateError),
        })
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ReadyState::Loading => write!(f, "loading"),
            ReadyState::Interactive => write!(f, "interactive"),
            ReadyState::Complete => write!(f, "complete"),
        }
    }
}

/// Whether the page is currently visible to the user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityState {
    /// The page is at least partially visible.
    #[default]
    Visible,
    /// The page is backgrounded, minimized, or being unloaded.
    Hidden,
}

impl VisibilityState {
    /// Returns `true` if the page is hidden.
    pub fn is_hidden(self) -> bool {
        self == VisibilityState::Hidden
    }
}

impl str::FromStr for VisibilityState {
    type Err = ParseVisibilityStateError;

    fn from_str(string: &str) -> Result<VisibilityState, Self::Err> {
        Ok(match string {
            "visible" => VisibilityState::Visible,
            "hidden" => VisibilityState::Hidden,
            _ => return Err(ParseVisibilityStateError),
        })
    }
}

impl fmt::Display for VisibilityState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            VisibilityState::Visible => write!(f, "visible"),
            VisibilityState::Hidden => write!(f, "hidden"),
        }
    }
}
