//! Input binding layer.
//!
//! Raw host events in, semantic [`Action`]s out. Resolution is pure; the
//! [`crate::UiController`] performs the actions.

use eyetrack_shared::PageId;

use crate::viewport::ElementId;

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Space bar.
    Space,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
}

impl Key {
    /// Digit value of a number key.
    #[must_use]
    pub const fn digit(self) -> Option<u8> {
        match self {
            Self::Num0 => Some(0),
            Self::Num1 => Some(1),
            Self::Num2 => Some(2),
            Self::Num3 => Some(3),
            Self::Num4 => Some(4),
            Self::Num5 => Some(5),
            Self::Num6 => Some(6),
            Self::Num7 => Some(7),
            Self::Num8 => Some(8),
            Self::Num9 => Some(9),
            _ => None,
        }
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command key is held.
    pub super_key: bool,
}

impl Modifiers {
    /// Only Ctrl held.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        super_key: false,
    };

    /// Returns true if any of Ctrl, Alt or Super is held.
    #[must_use]
    pub const fn has_command(self) -> bool {
        self.ctrl || self.alt || self.super_key
    }
}

/// Clickable things.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// Sidebar nav entry with its raw page attribute.
    NavEntry {
        /// Raw `data-page` value.
        page: String,
    },
    /// Sidebar collapse control.
    SidebarToggle,
    /// Activity feed item.
    ActivityItem(ElementId),
    /// Recent tests row.
    TableRow(ElementId),
    /// Placeholder call-to-action.
    PrototypeButton(ElementId),
    /// Header bell.
    NotificationButton,
    /// Header search.
    SearchButton,
    /// Header "new test".
    NewTestButton,
    /// Close control of the toast rendered by this element.
    ToastClose(ElementId),
}

/// Hoverable things.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    /// Dashboard stat card.
    StatCard(ElementId),
    /// Chart bar with its index among the bars.
    ChartBar {
        /// Bar element.
        element: ElementId,
        /// Zero-based day index.
        index: usize,
    },
}

/// Raw event from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Click.
    Click(ClickTarget),
    /// Pointer entered.
    HoverEnter(HoverTarget),
    /// Pointer left.
    HoverLeave(HoverTarget),
    /// Key pressed.
    KeyDown {
        /// Key.
        key: Key,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// Viewport resized.
    Resize {
        /// New width in pixels.
        width: f32,
    },
    /// Page scrolled.
    Scroll {
        /// Vertical scroll offset in pixels.
        offset: f32,
    },
}

/// What the controller should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Go to a page.
    Navigate(PageId),
    /// Flip the sidebar.
    ToggleSidebar,
    /// Hide tooltip and confirm.
    ClosePanels,
    /// Quick search toast.
    OpenSearch,
    /// Random notification toast.
    ShowNotification,
    /// New test flow.
    NewTest,
    /// Activity item pressed.
    OpenActivity(ElementId),
    /// Table row pressed.
    OpenTestRow(ElementId),
    /// Prototype button pressed.
    OpenPrototype(ElementId),
    /// Close a toast early.
    CloseToast(ElementId),
    /// Lift a stat card.
    HighlightStat(ElementId),
    /// Drop a stat card.
    ResetStat(ElementId),
    /// Emphasize a bar and show its tooltip.
    InspectBar {
        /// Bar element.
        element: ElementId,
        /// Zero-based day index.
        index: usize,
    },
    /// Reset a bar and hide the tooltip.
    ResetBar(ElementId),
    /// Apply the responsive rule.
    Resize(f32),
    /// Parallax.
    Scroll(f32),
}

/// Maps events to actions once listeners are bound.
#[derive(Debug, Clone, Default)]
pub struct InputBindings {
    bound: bool,
}

impl InputBindings {
    /// Creates unbound bindings; every event resolves to nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts resolving events.
    pub fn bind(&mut self) {
        self.bound = true;
    }

    /// Returns true once listeners are bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Resolves an event.
    #[must_use]
    pub fn resolve(&self, event: &UiEvent) -> Option<Action> {
        if !self.bound {
            return None;
        }

        match event {
            UiEvent::Click(target) => Self::resolve_click(target),
            UiEvent::HoverEnter(HoverTarget::StatCard(card)) => Some(Action::HighlightStat(*card)),
            UiEvent::HoverLeave(HoverTarget::StatCard(card)) => Some(Action::ResetStat(*card)),
            UiEvent::HoverEnter(HoverTarget::ChartBar { element, index }) => {
                Some(Action::InspectBar {
                    element: *element,
                    index: *index,
                })
            }
            UiEvent::HoverLeave(HoverTarget::ChartBar { element, .. }) => {
                Some(Action::ResetBar(*element))
            }
            UiEvent::KeyDown { key, modifiers } => Self::resolve_key(*key, *modifiers),
            UiEvent::Resize { width } => Some(Action::Resize(*width)),
            UiEvent::Scroll { offset } => Some(Action::Scroll(*offset)),
        }
    }

    fn resolve_click(target: &ClickTarget) -> Option<Action> {
        let action = match target {
            ClickTarget::NavEntry { page } => match page.parse::<PageId>() {
                Ok(page) => Action::Navigate(page),
                Err(err) => {
                    tracing::debug!("Nav click ignored: {}", err);
                    return None;
                }
            },
            ClickTarget::SidebarToggle => Action::ToggleSidebar,
            ClickTarget::ActivityItem(el) => Action::OpenActivity(*el),
            ClickTarget::TableRow(el) => Action::OpenTestRow(*el),
            ClickTarget::PrototypeButton(el) => Action::OpenPrototype(*el),
            ClickTarget::NotificationButton => Action::ShowNotification,
            ClickTarget::SearchButton => Action::OpenSearch,
            ClickTarget::NewTestButton => Action::NewTest,
            ClickTarget::ToastClose(el) => Action::CloseToast(*el),
        };
        Some(action)
    }

    fn resolve_key(key: Key, modifiers: Modifiers) -> Option<Action> {
        if key == Key::Escape {
            return Some(Action::ClosePanels);
        }
        if key == Key::K && modifiers.ctrl {
            return Some(Action::OpenSearch);
        }
        if modifiers.has_command() {
            return None;
        }
        key.digit()
            .and_then(PageId::from_digit)
            .map(Action::Navigate)
    }
}
