//! Display regions of the query page and an in-memory implementation

use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// The fixed regions of the query page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Search,
    Loader,
    Answer,
    QueryEcho,
    Params,
    Tree,
    Sparql,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Search,
        Region::Loader,
        Region::Answer,
        Region::QueryEcho,
        Region::Params,
        Region::Tree,
        Region::Sparql,
    ];

    /// Element id of the region in the page markup
    pub fn element_id(self) -> &'static str {
        match self {
            Region::Search => "search",
            Region::Loader => "loader-div",
            Region::Answer => "ans-resp",
            Region::QueryEcho => "query-resp",
            Region::Params => "params-resp",
            Region::Tree => "tree-resp",
            Region::Sparql => "sparql-resp",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.element_id())
    }
}

/// Markup that is inserted into the page without escaping.
///
/// Constructing one is an explicit statement that the source is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    pub fn trust(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What a region currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Markup(TrustedMarkup),
}

/// The page the query form lives on.
pub trait Page {
    fn show(&mut self, region: Region);
    fn hide(&mut self, region: Region);
    fn set_text(&mut self, region: Region, text: &str);
    fn set_markup(&mut self, region: Region, markup: &TrustedMarkup);
}

/// A single call made against a [`Page`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOp {
    Show(Region),
    Hide(Region),
    Set(Region, Content),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegionState {
    visible: bool,
    content: Option<Content>,
}

/// Page kept in memory. Records every operation in order.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    regions: HashMap<Region, RegionState>,
    ops: Vec<PageOp>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Initial layout: everything visible except the loader.
    pub fn new() -> Self {
        let regions = Region::ALL
            .into_iter()
            .map(|region| {
                let state = RegionState {
                    visible: region != Region::Loader,
                    content: None,
                };
                (region, state)
            })
            .collect();

        Self {
            regions,
            ops: Vec::new(),
        }
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.regions.get(&region).is_some_and(|r| r.visible)
    }

    pub fn content(&self, region: Region) -> Option<&Content> {
        self.regions.get(&region).and_then(|r| r.content.as_ref())
    }

    /// Text of a region, or `None` if it holds markup or nothing.
    pub fn text(&self, region: Region) -> Option<&str> {
        match self.content(region) {
            Some(Content::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Markup of a region, or `None` if it holds text or nothing.
    pub fn markup(&self, region: Region) -> Option<&str> {
        match self.content(region) {
            Some(Content::Markup(markup)) => Some(markup.as_str()),
            _ => None,
        }
    }

    pub fn ops(&self) -> &[PageOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    fn set(&mut self, region: Region, content: Content) {
        if let Some(state) = self.regions.get_mut(&region) {
            state.content = Some(content.clone());
        }
        self.ops.push(PageOp::Set(region, content));
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        if let Some(state) = self.regions.get_mut(&region) {
            state.visible = visible;
        }
    }
}

impl Page for MemoryPage {
    fn show(&mut self, region: Region) {
        self.set_visible(region, true);
        self.ops.push(PageOp::Show(region));
    }

    fn hide(&mut self, region: Region) {
        self.set_visible(region, false);
        self.ops.push(PageOp::Hide(region));
    }

    fn set_text(&mut self, region: Region, text: &str) {
        self.set(region, Content::Text(text.to_string()));
    }

    fn set_markup(&mut self, region: Region, markup: &TrustedMarkup) {
        self.set(region, Content::Markup(markup.clone()));
    }
}
