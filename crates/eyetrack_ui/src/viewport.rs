//! The `ViewPort` capability.
//!
//! Everything the orchestrator needs from the document, as typed accessors.
//! Lookups that can fail return [`ViewResult`] so callers can skip the
//! dependent effect and still report what was missing.

use std::fmt;

use eyetrack_shared::{PageId, ToastKind};
use thiserror::Error;

use crate::layout::Rect;
use crate::style::{StateClass, StylePatch};

/// Opaque handle to a document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Content fixtures the profiles and interactions query for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixture {
    /// Dashboard stat card.
    StatCard,
    /// Number inside a stat card.
    StatNumber,
    /// Dashboard chart bar.
    ChartBar,
    /// Dashboard activity feed item.
    ActivityItem,
    /// Dashboard recent-tests row.
    TableRow,
    /// Placeholder content wrapper.
    PlaceholderContent,
    /// Placeholder icon.
    PlaceholderIcon,
    /// Placeholder feature list item.
    FeatureItem,
    /// Placeholder call-to-action button.
    PrototypeButton,
    /// Stat and placeholder icons that float.
    FloatingIcon,
    /// Stat, chart and activity cards that follow scroll.
    ParallaxCard,
    /// Header notification dot.
    NotificationDot,
}

/// What a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Initial loading overlay.
    LoadingOverlay,
    /// Sidebar container.
    Sidebar,
    /// Nav entry for a page.
    NavEntry(PageId),
    /// Page title and subtitle pair.
    PageTitle,
    /// Content container of a page.
    PageContainer(PageId),
    /// A content fixture.
    Fixture(Fixture),
    /// An element's geometry.
    Geometry(ElementId),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadingOverlay => f.write_str("loading overlay"),
            Self::Sidebar => f.write_str("sidebar"),
            Self::NavEntry(page) => write!(f, "nav entry for {page}"),
            Self::PageTitle => f.write_str("page title"),
            Self::PageContainer(page) => write!(f, "page container {page}"),
            Self::Fixture(fixture) => write!(f, "fixture {fixture:?}"),
            Self::Geometry(id) => write!(f, "geometry of {id}"),
        }
    }
}

/// Internal outcome of a forgiving lookup. Never shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    /// The document has no such element.
    #[error("missing {0}")]
    Missing(Target),

    /// The element was removed from the document.
    #[error("element {0} is no longer attached")]
    Detached(ElementId),
}

/// Result type for view lookups and writes.
pub type ViewResult<T> = Result<T, ViewError>;

/// Document capability used by every component.
pub trait ViewPort {
    /// Initial loading overlay.
    fn loading_overlay(&self) -> ViewResult<ElementId>;

    /// Every nav entry with its raw page attribute, in document order.
    fn nav_entries(&self) -> Vec<(ElementId, String)>;

    /// Sidebar container.
    fn sidebar(&self) -> ViewResult<ElementId>;

    /// Page title and subtitle elements.
    fn page_title(&self) -> ViewResult<(ElementId, ElementId)>;

    /// Content container of a page.
    fn find_page(&self, page: PageId) -> ViewResult<ElementId>;

    /// Every page container, in document order.
    fn page_containers(&self) -> Vec<ElementId>;

    /// Fixtures of a kind, in document order, under `scope` (whole
    /// document when `None`).
    fn fixtures(&self, scope: Option<ElementId>, fixture: Fixture) -> Vec<ElementId>;

    /// Shared toast container, if it was created.
    fn toast_container(&self) -> Option<ElementId>;

    /// Creates the shared toast container.
    fn create_toast_container(&mut self) -> ElementId;

    /// Appends a toast to the container, rendered as the kind's icon
    /// followed by `message`, with the kind's modifier class.
    fn create_toast(&mut self, container: ElementId, kind: ToastKind, message: &str) -> ElementId;

    /// Creates a detached-from-flow tooltip element.
    fn create_tooltip(&mut self, text: &str) -> ElementId;

    /// Every tooltip element currently in the document.
    fn tooltips(&self) -> Vec<ElementId>;

    /// Bounding box of an element.
    fn bounding_rect(&self, element: ElementId) -> ViewResult<Rect>;

    /// Rendered size of an element.
    fn element_size(&self, element: ElementId) -> ViewResult<(f32, f32)>;

    /// Positions an absolutely placed element.
    fn place(&mut self, element: ElementId, x: f32, y: f32) -> ViewResult<()>;

    /// Current viewport width.
    fn viewport_width(&self) -> f32;

    /// Returns true if the element carries the class.
    fn has_class(&self, element: ElementId, class: StateClass) -> bool;

    /// Adds or removes a state class.
    fn set_class(&mut self, element: ElementId, class: StateClass, on: bool) -> ViewResult<()>;

    /// Writes inline style declarations at `now_ms`.
    fn apply_style(&mut self, element: ElementId, patch: &StylePatch, now_ms: u64)
        -> ViewResult<()>;

    /// Text content.
    fn text(&self, element: ElementId) -> ViewResult<String>;

    /// Replaces text content.
    fn set_text(&mut self, element: ElementId, text: &str) -> ViewResult<()>;

    /// Height declared by the markup, e.g. a chart bar's `height: 65%`.
    fn declared_height(&self, element: ElementId) -> Option<String>;

    /// Returns true while the element is attached.
    fn contains(&self, element: ElementId) -> bool;

    /// Removes an element and its subtree.
    fn remove(&mut self, element: ElementId) -> ViewResult<()>;

    /// Nav entry whose page attribute matches `page`.
    fn nav_entry(&self, page: PageId) -> ViewResult<ElementId> {
        self.nav_entries()
            .into_iter()
            .find(|(_, raw)| raw == page.as_str())
            .map(|(id, _)| id)
            .ok_or(ViewError::Missing(Target::NavEntry(page)))
    }

    /// Page containers currently marked active.
    fn active_pages(&self) -> Vec<ElementId> {
        self.page_containers()
            .into_iter()
            .filter(|&id| self.has_class(id, StateClass::Active))
            .collect()
    }
}
