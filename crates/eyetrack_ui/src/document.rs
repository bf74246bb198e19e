//! In-memory document: the concrete `ViewPort` adapter.
//!
//! Elements live in an arena keyed by [`ElementId`] with explicit
//! parent/child links, so document order is a depth-first walk from the
//! roots. Inline styles are stored as written; [`MemoryDocument::rendered_opacity`]
//! plays back the opacity transition the stylesheet would run.

use std::collections::{HashMap, HashSet};

use eyetrack_shared::{PageId, ToastKind};

use crate::layout::Rect;
use crate::style::{InlineStyle, StateClass, StyleProp, StylePatch};
use crate::viewport::{ElementId, Fixture, Target, ViewError, ViewPort, ViewResult};

/// Approximate glyph width used to size tooltips.
const TOOLTIP_CHAR_WIDTH: f32 = 7.0;
/// Horizontal padding of a tooltip (both sides).
const TOOLTIP_PADDING_X: f32 = 24.0;
/// Height of a single-line tooltip.
const TOOLTIP_HEIGHT: f32 = 32.0;

/// Role of an element in the prototype markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Generic wrapper with no role.
    Section,
    /// Initial loading overlay.
    LoadingOverlay,
    /// Sidebar container.
    Sidebar,
    /// Sidebar collapse control.
    SidebarToggle,
    /// Nav entry carrying a raw page attribute.
    NavEntry {
        /// Raw `data-page` value.
        page: String,
    },
    /// Header title.
    PageTitle,
    /// Header subtitle.
    PageSubtitle,
    /// Page content container.
    Page(PageId),
    /// Stat card.
    StatCard,
    /// Stat number.
    StatNumber,
    /// Stat icon.
    StatIcon,
    /// Chart card wrapper.
    ChartCard,
    /// Chart bar.
    ChartBar,
    /// Activity card wrapper.
    ActivityCard,
    /// Activity feed item.
    ActivityItem,
    /// Recent tests row.
    TableRow,
    /// Placeholder content wrapper.
    PlaceholderContent,
    /// Placeholder icon.
    PlaceholderIcon,
    /// Placeholder feature item.
    FeatureItem,
    /// Placeholder call-to-action.
    PrototypeButton,
    /// Header notification dot.
    NotificationDot,
    /// Shared toast container.
    ToastContainer,
    /// A toast.
    Toast(ToastKind),
    /// The tooltip.
    Tooltip,
}

impl Fixture {
    /// Returns true if an element of `kind` satisfies this fixture query.
    #[must_use]
    pub fn matches(self, kind: &ElementKind) -> bool {
        match self {
            Self::StatCard => *kind == ElementKind::StatCard,
            Self::StatNumber => *kind == ElementKind::StatNumber,
            Self::ChartBar => *kind == ElementKind::ChartBar,
            Self::ActivityItem => *kind == ElementKind::ActivityItem,
            Self::TableRow => *kind == ElementKind::TableRow,
            Self::PlaceholderContent => *kind == ElementKind::PlaceholderContent,
            Self::PlaceholderIcon => *kind == ElementKind::PlaceholderIcon,
            Self::FeatureItem => *kind == ElementKind::FeatureItem,
            Self::PrototypeButton => *kind == ElementKind::PrototypeButton,
            Self::FloatingIcon => {
                matches!(kind, ElementKind::StatIcon | ElementKind::PlaceholderIcon)
            }
            Self::ParallaxCard => matches!(
                kind,
                ElementKind::StatCard | ElementKind::ChartCard | ElementKind::ActivityCard
            ),
            Self::NotificationDot => *kind == ElementKind::NotificationDot,
        }
    }
}

#[derive(Debug, Clone)]
struct Element {
    kind: ElementKind,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: HashSet<StateClass>,
    /// Fixed classes from the markup, e.g. `toast toast-success`.
    markup_classes: Vec<&'static str>,
    style: InlineStyle,
    text: String,
    rect: Rect,
    declared_height: Option<String>,
    /// Rendered opacity when the inline opacity last changed.
    opacity_from: f32,
    /// Clock time of the last inline opacity change.
    opacity_changed_at: u64,
}

impl Element {
    fn new(kind: ElementKind, parent: Option<ElementId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            classes: HashSet::new(),
            markup_classes: Vec::new(),
            style: InlineStyle::default(),
            text: String::new(),
            rect: Rect::default(),
            declared_height: None,
            opacity_from: 1.0,
            opacity_changed_at: 0,
        }
    }

    fn rendered_opacity(&self, now_ms: u64) -> f32 {
        let target = self.style.opacity.unwrap_or(1.0);
        let Some(transition) = self.style.transition.filter(|t| t.covers_opacity()) else {
            return target;
        };
        let elapsed = now_ms.saturating_sub(self.opacity_changed_at);
        if transition.duration_ms == 0 || elapsed >= transition.duration_ms {
            return target;
        }

        #[allow(clippy::cast_precision_loss)]
        let t = elapsed as f32 / transition.duration_ms as f32;
        self.opacity_from + (target - self.opacity_from) * transition.easing.apply(t)
    }
}

/// Arena-backed document implementing [`ViewPort`].
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    /// Elements indexed by ID.
    elements: HashMap<ElementId, Element>,
    /// Root element IDs, in document order.
    roots: Vec<ElementId>,
    /// ID counter for generating unique IDs.
    next_id: u32,
    /// Viewport width in pixels.
    width: f32,
}

impl MemoryDocument {
    /// Creates an empty document with the given viewport width.
    #[must_use]
    pub fn new(width: f32) -> Self {
        Self {
            elements: HashMap::with_capacity(128),
            roots: Vec::with_capacity(8),
            next_id: 1,
            width,
        }
    }

    /// Appends an element under `parent` (a root when `None` or unknown).
    pub fn append(&mut self, parent: Option<ElementId>, kind: ElementKind) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;

        let parent = parent.filter(|p| self.elements.contains_key(p));
        match parent.and_then(|p| self.elements.get_mut(&p)) {
            Some(parent_el) => parent_el.children.push(id),
            None => self.roots.push(id),
        }
        self.elements.insert(id, Element::new(kind, parent));
        id
    }

    /// Sets the layout box of an element.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Detached`] for unknown elements.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> ViewResult<()> {
        self.get_mut(id)?.rect = rect;
        Ok(())
    }

    /// Records the height the markup declares for an element.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Detached`] for unknown elements.
    pub fn set_declared_height(&mut self, id: ElementId, height: impl Into<String>) -> ViewResult<()> {
        self.get_mut(id)?.declared_height = Some(height.into());
        Ok(())
    }

    /// Changes the viewport width (the host still has to emit the resize event).
    pub fn set_viewport_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Role of an element.
    #[must_use]
    pub fn kind(&self, id: ElementId) -> Option<&ElementKind> {
        self.elements.get(&id).map(|el| &el.kind)
    }

    /// Inline style of an element.
    #[must_use]
    pub fn style(&self, id: ElementId) -> Option<&InlineStyle> {
        self.elements.get(&id).map(|el| &el.style)
    }

    /// Opacity the stylesheet would render at `now_ms`, following any
    /// running opacity transition.
    #[must_use]
    pub fn rendered_opacity(&self, id: ElementId, now_ms: u64) -> Option<f32> {
        self.elements.get(&id).map(|el| el.rendered_opacity(now_ms))
    }

    /// Top-left corner of an element's box.
    #[must_use]
    pub fn position(&self, id: ElementId) -> Option<(f32, f32)> {
        self.elements.get(&id).map(|el| (el.rect.x, el.rect.y))
    }

    /// Class list: markup classes first, then set state classes.
    #[must_use]
    pub fn class_list(&self, id: ElementId) -> Vec<&'static str> {
        let Some(el) = self.elements.get(&id) else {
            return Vec::new();
        };
        let mut list = el.markup_classes.clone();
        list.extend(
            [StateClass::Active, StateClass::Collapsed]
                .into_iter()
                .filter(|class| el.classes.contains(class))
                .map(StateClass::as_str),
        );
        list
    }

    /// Children of an element, in order.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements.get(&id).map_or(&[], |el| el.children.as_slice())
    }

    /// Number of attached elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Every element of `kind`, in document order.
    #[must_use]
    pub fn find_all(&self, kind: &ElementKind) -> Vec<ElementId> {
        self.walk(None)
            .into_iter()
            .filter(|id| self.elements.get(id).is_some_and(|el| el.kind == *kind))
            .collect()
    }

    /// Topmost element whose box contains the point (last in document order).
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        self.walk(None).into_iter().rev().find(|id| {
            self.elements
                .get(id)
                .is_some_and(|el| el.rect.width > 0.0 && el.rect.contains(x, y))
        })
    }

    fn get(&self, id: ElementId) -> ViewResult<&Element> {
        self.elements.get(&id).ok_or(ViewError::Detached(id))
    }

    fn get_mut(&mut self, id: ElementId) -> ViewResult<&mut Element> {
        self.elements.get_mut(&id).ok_or(ViewError::Detached(id))
    }

    /// Depth-first walk below `scope` (excluded), or the whole document.
    fn walk(&self, scope: Option<ElementId>) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = match scope {
            Some(id) => self.children(id).iter().rev().copied().collect(),
            None => self.roots.iter().rev().copied().collect(),
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    fn first(&self, kind: &ElementKind) -> Option<ElementId> {
        self.find_all(kind).into_iter().next()
    }
}

impl ViewPort for MemoryDocument {
    fn loading_overlay(&self) -> ViewResult<ElementId> {
        self.first(&ElementKind::LoadingOverlay)
            .ok_or(ViewError::Missing(Target::LoadingOverlay))
    }

    fn nav_entries(&self) -> Vec<(ElementId, String)> {
        self.walk(None)
            .into_iter()
            .filter_map(|id| match &self.elements.get(&id)?.kind {
                ElementKind::NavEntry { page } => Some((id, page.clone())),
                _ => None,
            })
            .collect()
    }

    fn sidebar(&self) -> ViewResult<ElementId> {
        self.first(&ElementKind::Sidebar)
            .ok_or(ViewError::Missing(Target::Sidebar))
    }

    fn page_title(&self) -> ViewResult<(ElementId, ElementId)> {
        self.first(&ElementKind::PageTitle)
            .zip(self.first(&ElementKind::PageSubtitle))
            .ok_or(ViewError::Missing(Target::PageTitle))
    }

    fn find_page(&self, page: PageId) -> ViewResult<ElementId> {
        self.first(&ElementKind::Page(page))
            .ok_or(ViewError::Missing(Target::PageContainer(page)))
    }

    fn page_containers(&self) -> Vec<ElementId> {
        self.walk(None)
            .into_iter()
            .filter(|id| {
                self.elements
                    .get(id)
                    .is_some_and(|el| matches!(el.kind, ElementKind::Page(_)))
            })
            .collect()
    }

    fn fixtures(&self, scope: Option<ElementId>, fixture: Fixture) -> Vec<ElementId> {
        if scope.is_some_and(|id| !self.elements.contains_key(&id)) {
            return Vec::new();
        }
        self.walk(scope)
            .into_iter()
            .filter(|id| self.elements.get(id).is_some_and(|el| fixture.matches(&el.kind)))
            .collect()
    }

    fn toast_container(&self) -> Option<ElementId> {
        self.first(&ElementKind::ToastContainer)
    }

    fn create_toast_container(&mut self) -> ElementId {
        self.append(None, ElementKind::ToastContainer)
    }

    fn create_toast(&mut self, container: ElementId, kind: ToastKind, message: &str) -> ElementId {
        let id = self.append(Some(container), ElementKind::Toast(kind));
        if let Some(el) = self.elements.get_mut(&id) {
            el.text = format!("{} {}", kind.icon(), message);
            el.markup_classes = vec!["toast", kind.class_name()];
        }
        id
    }

    fn create_tooltip(&mut self, text: &str) -> ElementId {
        let id = self.append(None, ElementKind::Tooltip);
        if let Some(el) = self.elements.get_mut(&id) {
            el.text = text.to_owned();
            #[allow(clippy::cast_precision_loss)]
            let width = text.chars().count() as f32 * TOOLTIP_CHAR_WIDTH + TOOLTIP_PADDING_X;
            el.rect = Rect::new(0.0, 0.0, width, TOOLTIP_HEIGHT);
        }
        id
    }

    fn tooltips(&self) -> Vec<ElementId> {
        self.find_all(&ElementKind::Tooltip)
    }

    fn bounding_rect(&self, element: ElementId) -> ViewResult<Rect> {
        let el = self.get(element)?;
        if el.rect == Rect::default() {
            return Err(ViewError::Missing(Target::Geometry(element)));
        }
        Ok(el.rect)
    }

    fn element_size(&self, element: ElementId) -> ViewResult<(f32, f32)> {
        let el = self.get(element)?;
        Ok((el.rect.width, el.rect.height))
    }

    fn place(&mut self, element: ElementId, x: f32, y: f32) -> ViewResult<()> {
        let el = self.get_mut(element)?;
        el.rect.x = x;
        el.rect.y = y;
        Ok(())
    }

    fn viewport_width(&self) -> f32 {
        self.width
    }

    fn has_class(&self, element: ElementId, class: StateClass) -> bool {
        self.elements
            .get(&element)
            .is_some_and(|el| el.classes.contains(&class))
    }

    fn set_class(&mut self, element: ElementId, class: StateClass, on: bool) -> ViewResult<()> {
        let el = self.get_mut(element)?;
        if on {
            el.classes.insert(class);
        } else {
            el.classes.remove(&class);
        }
        Ok(())
    }

    fn apply_style(
        &mut self,
        element: ElementId,
        patch: &StylePatch,
        now_ms: u64,
    ) -> ViewResult<()> {
        let el = self.get_mut(element)?;
        let before = el.rendered_opacity(now_ms);
        let touches_opacity = patch
            .props()
            .iter()
            .any(|prop| matches!(prop, StyleProp::Opacity(_)));

        el.style.apply(patch);
        if touches_opacity {
            el.opacity_from = before;
            el.opacity_changed_at = now_ms;
        }
        Ok(())
    }

    fn text(&self, element: ElementId) -> ViewResult<String> {
        Ok(self.get(element)?.text.clone())
    }

    fn set_text(&mut self, element: ElementId, text: &str) -> ViewResult<()> {
        text.clone_into(&mut self.get_mut(element)?.text);
        Ok(())
    }

    fn declared_height(&self, element: ElementId) -> Option<String> {
        self.elements.get(&element)?.declared_height.clone()
    }

    fn contains(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }

    fn remove(&mut self, element: ElementId) -> ViewResult<()> {
        let el = self.elements.remove(&element).ok_or(ViewError::Detached(element))?;

        for child in el.children {
            // Children go with their parent; a missing child is already gone.
            let _ = self.remove(child);
        }
        match el.parent.and_then(|p| self.elements.get_mut(&p)) {
            Some(parent) => parent.children.retain(|&c| c != element),
            None => self.roots.retain(|&r| r != element),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Transition, Transform};

    fn two_pages() -> (MemoryDocument, ElementId, ElementId) {
        let mut doc = MemoryDocument::new(1280.0);
        let main = doc.append(None, ElementKind::Section);
        let dashboard = doc.append(Some(main), ElementKind::Page(PageId::Dashboard));
        let reports = doc.append(Some(main), ElementKind::Page(PageId::Reports));
        (doc, dashboard, reports)
    }

    #[test]
    fn test_fixtures_are_scoped_and_ordered() {
        let (mut doc, dashboard, reports) = two_pages();
        let a = doc.append(Some(dashboard), ElementKind::StatCard);
        let wrapper = doc.append(Some(dashboard), ElementKind::Section);
        let b = doc.append(Some(wrapper), ElementKind::StatCard);
        doc.append(Some(reports), ElementKind::StatCard);

        assert_eq!(doc.fixtures(Some(dashboard), Fixture::StatCard), vec![a, b]);
        assert_eq!(doc.fixtures(None, Fixture::StatCard).len(), 3);
        assert_eq!(doc.fixtures(Some(dashboard), Fixture::ParallaxCard), vec![a, b]);
    }

    #[test]
    fn test_remove_takes_subtree() {
        let (mut doc, dashboard, _) = two_pages();
        let card = doc.append(Some(dashboard), ElementKind::StatCard);
        let number = doc.append(Some(card), ElementKind::StatNumber);

        doc.remove(card).unwrap();
        assert!(!doc.contains(card));
        assert!(!doc.contains(number));
        assert!(doc.children(dashboard).is_empty());
        assert_eq!(doc.remove(card), Err(ViewError::Detached(card)));
    }

    #[test]
    fn test_missing_lookups_report_target() {
        let doc = MemoryDocument::new(1280.0);
        assert_eq!(doc.sidebar(), Err(ViewError::Missing(Target::Sidebar)));
        assert_eq!(
            doc.find_page(PageId::History),
            Err(ViewError::Missing(Target::PageContainer(PageId::History)))
        );
        assert_eq!(
            doc.nav_entry(PageId::Images),
            Err(ViewError::Missing(Target::NavEntry(PageId::Images)))
        );
    }

    #[test]
    fn test_rendered_opacity_follows_transition() {
        let (mut doc, dashboard, _) = two_pages();
        doc.apply_style(dashboard, &StylePatch::new().opacity(0.0), 0).unwrap();
        assert!(doc.rendered_opacity(dashboard, 0).unwrap().abs() < f32::EPSILON);

        let fade_in = StylePatch::new().transition(Transition::all(400)).opacity(1.0);
        doc.apply_style(dashboard, &fade_in, 1_000).unwrap();

        let mid = doc.rendered_opacity(dashboard, 1_200).unwrap();
        assert!(mid > 0.0 && mid < 1.0, "mid-transition opacity: {mid}");
        assert!((doc.rendered_opacity(dashboard, 1_400).unwrap() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let (mut doc, dashboard, _) = two_pages();
        doc.set_rect(dashboard, Rect::new(0.0, 0.0, 800.0, 600.0)).unwrap();
        let bar = doc.append(Some(dashboard), ElementKind::ChartBar);
        doc.set_rect(bar, Rect::new(100.0, 300.0, 20.0, 100.0)).unwrap();

        assert_eq!(doc.element_at(110.0, 350.0), Some(bar));
        assert_eq!(doc.element_at(500.0, 100.0), Some(dashboard));
        assert_eq!(doc.element_at(900.0, 100.0), None);
    }

    #[test]
    fn test_tooltip_is_sized_from_text() {
        let mut doc = MemoryDocument::new(1280.0);
        let tip = doc.create_tooltip("abcd");
        let (w, h) = doc.element_size(tip).unwrap();
        assert!((w - (4.0 * 7.0 + 24.0)).abs() < f32::EPSILON);
        assert!((h - 32.0).abs() < f32::EPSILON);

        doc.apply_style(tip, &StylePatch::new().transform(Transform::IDENTITY), 0)
            .unwrap();
        assert_eq!(doc.tooltips(), vec![tip]);
    }

    #[test]
    fn test_toast_carries_icon_and_kind_class() {
        let mut doc = MemoryDocument::new(1280.0);
        let container = doc.create_toast_container();
        let toast = doc.create_toast(container, ToastKind::Success, "Salvo");

        assert_eq!(doc.text(toast).unwrap(), "✅ Salvo");
        assert_eq!(doc.class_list(toast), vec!["toast", "toast-success"]);

        let warning = doc.create_toast(container, ToastKind::Warning, "Atenção");
        assert!(doc.text(warning).unwrap().starts_with("⚠️"));
        assert_eq!(doc.class_list(warning)[1], "toast-warning");
    }

    #[test]
    fn test_class_list_includes_state_classes() {
        let (mut doc, dashboard, _) = two_pages();
        assert_eq!(doc.class_list(dashboard), Vec::<&str>::new());
        doc.set_class(dashboard, StateClass::Active, true).unwrap();
        assert_eq!(doc.class_list(dashboard), vec!["active"]);
    }
}
