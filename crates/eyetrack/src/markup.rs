//! The prototype's static markup as a [`MemoryDocument`].
//!
//! Mirrors the single-page layout: loading overlay, sidebar with one nav
//! entry per page, header with title and notification dot, and six page
//! containers. The dashboard carries the analytics fixtures; every other
//! page carries the "prototype coming soon" placeholder.

use eyetrack_shared::PageId;
use eyetrack_ui::{ElementId, ElementKind, MemoryDocument, Rect, StateClass, ViewPort, ViewResult};

/// Stat card values, in order.
pub const STAT_VALUES: [&str; 4] = ["24", "1247", "89", "156"];

/// Chart bar heights as declared by the markup, one per weekday.
pub const CHART_HEIGHTS: [&str; 7] = ["65%", "80%", "45%", "90%", "70%", "55%", "85%"];

/// Activity feed length.
pub const ACTIVITY_ITEMS: usize = 4;

/// Recent tests table length.
pub const TABLE_ROWS: usize = 5;

/// Feature bullets on each placeholder page.
pub const PLACEHOLDER_FEATURES: usize = 4;

const SIDEBAR_WIDTH: f32 = 260.0;
const HEADER_HEIGHT: f32 = 80.0;
const GUTTER: f32 = 24.0;
const CARD_HEIGHT: f32 = 120.0;
const CHART_TOP: f32 = HEADER_HEIGHT + GUTTER * 2.0 + CARD_HEIGHT;
const CHART_HEIGHT: f32 = 320.0;
const BAR_AREA: f32 = 240.0;
const BAR_WIDTH: f32 = 32.0;
const BAR_PITCH: f32 = 56.0;
const ROW_HEIGHT: f32 = 48.0;

/// Builds the full prototype document for a viewport `width` pixels wide.
///
/// # Errors
///
/// Only fails if the arena rejects a write to an element it just created.
pub fn prototype_document(width: f32) -> ViewResult<MemoryDocument> {
    let mut doc = MemoryDocument::new(width);
    let content_x = SIDEBAR_WIDTH + GUTTER;
    let content_width = (width - content_x - GUTTER).max(320.0);

    let overlay = doc.append(None, ElementKind::LoadingOverlay);
    doc.set_rect(overlay, Rect::new(0.0, 0.0, width, 900.0))?;

    let sidebar = doc.append(None, ElementKind::Sidebar);
    doc.set_rect(sidebar, Rect::new(0.0, 0.0, SIDEBAR_WIDTH, 900.0))?;
    doc.append(Some(sidebar), ElementKind::SidebarToggle);
    for (i, page) in PageId::ALL.into_iter().enumerate() {
        let entry = doc.append(
            Some(sidebar),
            ElementKind::NavEntry {
                page: page.as_str().to_owned(),
            },
        );
        #[allow(clippy::cast_precision_loss)]
        let y = HEADER_HEIGHT + i as f32 * 44.0;
        doc.set_rect(entry, Rect::new(12.0, y, SIDEBAR_WIDTH - 24.0, 40.0))?;
        if page == PageId::Dashboard {
            doc.set_class(entry, StateClass::Active, true)?;
        }
    }

    let header = doc.append(None, ElementKind::Section);
    doc.set_rect(header, Rect::new(SIDEBAR_WIDTH, 0.0, width - SIDEBAR_WIDTH, HEADER_HEIGHT))?;
    let title = doc.append(Some(header), ElementKind::PageTitle);
    let subtitle = doc.append(Some(header), ElementKind::PageSubtitle);
    let copy = PageId::Dashboard.title();
    doc.set_text(title, copy.title)?;
    doc.set_text(subtitle, copy.subtitle)?;
    doc.append(Some(header), ElementKind::NotificationDot);

    let main = doc.append(None, ElementKind::Section);
    for page in PageId::ALL {
        let container = doc.append(Some(main), ElementKind::Page(page));
        doc.set_rect(
            container,
            Rect::new(content_x, HEADER_HEIGHT, content_width, 900.0 - HEADER_HEIGHT),
        )?;
        if page == PageId::Dashboard {
            doc.set_class(container, StateClass::Active, true)?;
            dashboard(&mut doc, container, content_x, content_width)?;
        } else {
            placeholder(&mut doc, container, content_x)?;
        }
    }

    Ok(doc)
}

fn dashboard(
    doc: &mut MemoryDocument,
    page: ElementId,
    x: f32,
    width: f32,
) -> ViewResult<()> {
    #[allow(clippy::cast_precision_loss)]
    let card_width = (width - GUTTER * 3.0) / STAT_VALUES.len() as f32;
    let card_top = HEADER_HEIGHT + GUTTER;
    for (i, value) in STAT_VALUES.into_iter().enumerate() {
        let card = doc.append(Some(page), ElementKind::StatCard);
        #[allow(clippy::cast_precision_loss)]
        let card_x = x + i as f32 * (card_width + GUTTER);
        doc.set_rect(card, Rect::new(card_x, card_top, card_width, CARD_HEIGHT))?;
        doc.append(Some(card), ElementKind::StatIcon);
        let number = doc.append(Some(card), ElementKind::StatNumber);
        doc.set_text(number, value)?;
    }

    let chart = doc.append(Some(page), ElementKind::ChartCard);
    doc.set_rect(chart, Rect::new(x, CHART_TOP, width * 0.6, CHART_HEIGHT))?;
    let baseline = CHART_TOP + CHART_HEIGHT - GUTTER;
    for (i, height) in CHART_HEIGHTS.into_iter().enumerate() {
        let bar = doc.append(Some(chart), ElementKind::ChartBar);
        let percent: f32 = height.trim_end_matches('%').parse().unwrap_or(50.0);
        let bar_height = BAR_AREA * percent / 100.0;
        #[allow(clippy::cast_precision_loss)]
        let bar_x = x + GUTTER + i as f32 * BAR_PITCH;
        doc.set_rect(bar, Rect::new(bar_x, baseline - bar_height, BAR_WIDTH, bar_height))?;
        doc.set_declared_height(bar, height)?;
    }

    let activity = doc.append(Some(page), ElementKind::ActivityCard);
    let activity_x = x + width * 0.6 + GUTTER;
    doc.set_rect(
        activity,
        Rect::new(activity_x, CHART_TOP, width * 0.4 - GUTTER, CHART_HEIGHT),
    )?;
    for i in 0..ACTIVITY_ITEMS {
        let item = doc.append(Some(activity), ElementKind::ActivityItem);
        #[allow(clippy::cast_precision_loss)]
        let y = CHART_TOP + GUTTER + i as f32 * 64.0;
        doc.set_rect(item, Rect::new(activity_x + 12.0, y, width * 0.4 - GUTTER * 2.0, 56.0))?;
    }

    let table_top = CHART_TOP + CHART_HEIGHT + GUTTER;
    for i in 0..TABLE_ROWS {
        let row = doc.append(Some(page), ElementKind::TableRow);
        #[allow(clippy::cast_precision_loss)]
        let y = table_top + i as f32 * ROW_HEIGHT;
        doc.set_rect(row, Rect::new(x, y, width, ROW_HEIGHT))?;
    }
    Ok(())
}

fn placeholder(doc: &mut MemoryDocument, page: ElementId, x: f32) -> ViewResult<()> {
    let content = doc.append(Some(page), ElementKind::PlaceholderContent);
    doc.set_rect(content, Rect::new(x + 120.0, 160.0, 480.0, 520.0))?;
    doc.append(Some(content), ElementKind::PlaceholderIcon);
    for _ in 0..PLACEHOLDER_FEATURES {
        doc.append(Some(content), ElementKind::FeatureItem);
    }
    let button = doc.append(Some(content), ElementKind::PrototypeButton);
    doc.set_rect(button, Rect::new(x + 260.0, 600.0, 200.0, 44.0))?;
    Ok(())
}

/// Every fixture of `kind` on `page`, in document order.
#[must_use]
pub fn page_elements(doc: &MemoryDocument, page: PageId, kind: &ElementKind) -> Vec<ElementId> {
    let Ok(container) = doc.find_page(page) else {
        return Vec::new();
    };
    doc.find_all(kind)
        .into_iter()
        .filter(|&id| is_descendant(doc, id, container))
        .collect()
}

fn is_descendant(doc: &MemoryDocument, id: ElementId, ancestor: ElementId) -> bool {
    let mut stack = doc.children(ancestor).to_vec();
    while let Some(next) = stack.pop() {
        if next == id {
            return true;
        }
        stack.extend_from_slice(doc.children(next));
    }
    false
}
