//! # End-to-end Scenarios
//!
//! Drives the full prototype document through the controller and checks
//! the observable state: navigation state, active containers, header
//! copy, toasts and the tooltip slot.
//!
//! Run with: cargo test --package eyetrack --test scenarios_test

use eyetrack::markup::{page_elements, CHART_HEIGHTS};
use eyetrack::ui::{
    ClickTarget, ElementKind, EventBus, HoverTarget, Key, Modifiers, NavigateOutcome,
    NavigationState, Phase, StateClass, ViewPort,
};
use eyetrack::{prototype, ConfigError, PageId, Prototype, ToastKind, UiConfig, UiEvent};

fn fresh() -> Prototype {
    let mut ui = prototype(1280.0, UiConfig::default()).unwrap();
    ui.boot();
    ui
}

fn booted() -> Prototype {
    let mut ui = fresh();
    ui.advance(3_000);
    assert_eq!(ui.state().phase, Phase::Idle);
    ui
}

fn active_pages(ui: &Prototype) -> Vec<PageId> {
    PageId::ALL
        .into_iter()
        .filter(|&page| {
            ui.view()
                .find_page(page)
                .is_ok_and(|id| ui.view().has_class(id, StateClass::Active))
        })
        .collect()
}

fn header(ui: &Prototype) -> (String, String) {
    let (title, subtitle) = ui.view().page_title().unwrap();
    (
        ui.view().text(title).unwrap(),
        ui.view().text(subtitle).unwrap(),
    )
}

fn digit(key: Key, modifiers: Modifiers) -> UiEvent {
    UiEvent::KeyDown { key, modifiers }
}

// ============================================================================
// NAVIGATION
// ============================================================================

#[test]
fn test_loading_then_reports() {
    let mut ui = fresh();

    assert_eq!(ui.navigate(PageId::Reports), NavigateOutcome::Ignored);
    assert_eq!(*ui.state(), NavigationState::default());

    ui.advance(3_000);
    assert_eq!(ui.state().phase, Phase::Idle);

    assert!(ui.navigate(PageId::Reports).is_accepted());
    ui.advance(1_000);

    assert_eq!(ui.state().current_page, PageId::Reports);
    assert_eq!(
        header(&ui),
        (
            "Gerar Relatórios".to_owned(),
            "Análises detalhadas dos resultados".to_owned()
        )
    );
    assert_eq!(active_pages(&ui), vec![PageId::Reports]);
}

#[test]
fn test_every_page_ends_with_exactly_one_active_container() {
    let mut ui = booted();
    for page in PageId::ALL {
        ui.navigate(page);
        ui.advance(1_000);
        assert_eq!(ui.state().current_page, page);
        assert_eq!(active_pages(&ui), vec![page], "after navigating to {page}");
        assert_eq!(header(&ui).0, page.title().title);
    }
}

#[test]
fn test_renavigating_to_the_current_page_is_harmless() {
    let mut ui = booted();
    let outcome = ui.navigate(PageId::Dashboard);
    ui.advance(2_000);

    assert_eq!(outcome, NavigateOutcome::Accepted { skipped: vec![] });
    assert_eq!(ui.state().current_page, PageId::Dashboard);
    assert_eq!(active_pages(&ui), vec![PageId::Dashboard]);
}

#[test]
fn test_rapid_double_navigation_leaves_one_active_page() {
    let mut ui = booted();
    ui.navigate(PageId::Reports);
    ui.advance(100);
    ui.navigate(PageId::History);
    ui.advance(2_000);

    assert_eq!(ui.state().current_page, PageId::History);
    assert_eq!(active_pages(&ui), vec![PageId::History]);
    let history = ui.view().find_page(PageId::History).unwrap();
    assert_eq!(ui.view().style(history).unwrap().opacity, Some(1.0));
}

#[test]
fn test_digits_navigate_only_without_command_modifiers() {
    let mut ui = booted();

    ui.handle(&digit(Key::Num5, Modifiers::CTRL));
    ui.advance(1_000);
    assert_eq!(ui.state().current_page, PageId::Dashboard);

    ui.handle(&digit(Key::Num5, Modifiers::default()));
    ui.advance(1_000);
    assert_eq!(ui.state().current_page, PageId::History);
}

#[test]
fn test_new_test_button_goes_to_configure() {
    let mut ui = booted();
    ui.handle(&UiEvent::Click(ClickTarget::NewTestButton));
    ui.advance(999);
    assert_eq!(ui.state().current_page, PageId::Dashboard);
    ui.advance(1);
    assert_eq!(ui.state().current_page, PageId::Configure);
}

// ============================================================================
// CONTENT SEQUENCES
// ============================================================================

#[test]
fn test_superseded_sequence_does_not_apply_pending_stages() {
    let mut ui = booted();
    ui.advance(2_000);

    let bars = page_elements(ui.view(), PageId::Dashboard, &ElementKind::ChartBar);
    let bar = bars[3];
    assert_eq!(
        ui.view().style(bar).unwrap().height.as_deref(),
        Some(CHART_HEIGHTS[3])
    );

    // First sequence would zero the bars 1000ms from now.
    ui.navigate(PageId::Dashboard);
    ui.advance(700);
    ui.navigate(PageId::Dashboard);
    ui.advance(400);
    assert_eq!(
        ui.view().style(bar).unwrap().height.as_deref(),
        Some(CHART_HEIGHTS[3])
    );

    // The second one does, 1000ms after its own start.
    ui.advance(600);
    assert_eq!(ui.view().style(bar).unwrap().height.as_deref(), Some("0%"));

    ui.advance(2_000);
    assert_eq!(
        ui.view().style(bar).unwrap().height.as_deref(),
        Some(CHART_HEIGHTS[3])
    );
}

#[test]
fn test_placeholder_sequence_reveals_every_fixture() {
    let mut ui = booted();
    ui.navigate(PageId::Images);
    ui.advance(3_000);

    for kind in [
        ElementKind::PlaceholderContent,
        ElementKind::FeatureItem,
        ElementKind::PrototypeButton,
    ] {
        for id in page_elements(ui.view(), PageId::Images, &kind) {
            assert_eq!(ui.view().style(id).unwrap().opacity, Some(1.0), "{kind:?}");
        }
    }
    assert!(ui.stage_reports().iter().all(|r| r.page == PageId::Images));
    assert_eq!(ui.stage_reports().len(), 4);
}

// ============================================================================
// TOASTS AND TOOLTIP
// ============================================================================

#[test]
fn test_toast_is_removed_after_display_and_exit() {
    let mut ui = booted();
    ui.show_toast("Relatório exportado", ToastKind::Success);
    let element = ui.toasts().last().unwrap().element;

    ui.advance(4_299);
    assert!(ui.view().contains(element));
    ui.advance(1);
    assert!(!ui.view().contains(element));
}

#[test]
fn test_rapid_toasts_coexist_and_expire_on_schedule() {
    let mut ui = booted();
    ui.advance(5_000);
    assert!(ui.toasts().is_empty());

    let elements: Vec<_> = (0..3)
        .map(|i| {
            let id = ui.show_toast(&format!("Salvo {i}"), ToastKind::Success);
            ui.toasts().iter().find(|t| t.id == id).unwrap().element
        })
        .collect();
    assert_eq!(ui.toasts().len(), 3);
    let container = ui.view().toast_container().unwrap();
    assert_eq!(ui.view().children(container).len(), 3);

    ui.advance(4_300);
    assert!(elements.iter().all(|&el| !ui.view().contains(el)));
    assert!(ui.toasts().is_empty());
}

#[test]
fn test_toast_shows_kind_icon_and_class() {
    let mut ui = booted();
    let id = ui.show_toast("Relatório exportado", ToastKind::Success);
    let element = ui.toasts().iter().find(|t| t.id == id).unwrap().element;

    assert_eq!(ui.view().text(element).unwrap(), "✅ Relatório exportado");
    assert_eq!(ui.view().class_list(element), vec!["toast", "toast-success"]);
}

#[test]
fn test_close_control_dismisses_early() {
    let mut ui = booted();
    let element = ui.toasts()[0].element;
    ui.handle(&UiEvent::Click(ClickTarget::ToastClose(element)));
    assert!(!ui.view().contains(element));
    ui.advance(10_000);
}

#[test]
fn test_at_most_one_tooltip() {
    let mut ui = booted();
    let bars = page_elements(ui.view(), PageId::Dashboard, &ElementKind::ChartBar);

    for (index, &bar) in bars.iter().enumerate() {
        ui.handle(&UiEvent::HoverEnter(HoverTarget::ChartBar {
            element: bar,
            index,
        }));
        assert_eq!(ui.view().tooltips().len(), 1);
        ui.advance(20);
        assert!(ui.view().tooltips().len() <= 1);
    }

    ui.handle(&UiEvent::KeyDown {
        key: Key::Escape,
        modifiers: Modifiers::default(),
    });
    assert!(ui.view().tooltips().is_empty());
    assert_eq!(ui.toasts().last().unwrap().message, "Painéis fechados");
}

#[test]
fn test_tooltip_sits_above_its_bar() {
    let mut ui = booted();
    let bar = page_elements(ui.view(), PageId::Dashboard, &ElementKind::ChartBar)[0];
    let rect = ui.view().bounding_rect(bar).unwrap();

    ui.handle(&UiEvent::HoverEnter(HoverTarget::ChartBar {
        element: bar,
        index: 0,
    }));
    let tip = ui.tooltip().unwrap();
    let (w, h) = ui.view().element_size(tip.element).unwrap();

    assert!(tip.text.starts_with("Dia 1: "));
    assert!((tip.position.0 + w / 2.0 - rect.center_x()).abs() < 1e-3);
    assert!((tip.position.1 + h + 8.0 - rect.y).abs() < 1e-3);
}

// ============================================================================
// SIDEBAR
// ============================================================================

#[test]
fn test_sidebar_toggle_twice_restores() {
    let mut ui = booted();
    let sidebar = ui.view().sidebar().unwrap();

    ui.handle(&UiEvent::Click(ClickTarget::SidebarToggle));
    assert!(ui.state().sidebar_collapsed);
    assert!(ui.view().has_class(sidebar, StateClass::Collapsed));

    ui.handle(&UiEvent::Click(ClickTarget::SidebarToggle));
    assert!(!ui.state().sidebar_collapsed);
    assert!(!ui.view().has_class(sidebar, StateClass::Collapsed));
    assert_eq!(ui.toasts().last().unwrap().message, "Menu expandido");
}

#[test]
fn test_narrow_viewport_collapses_and_toggle_twice_keeps_it() {
    let mut ui = booted();
    let sidebar = ui.view().sidebar().unwrap();

    ui.handle(&UiEvent::Resize { width: 500.0 });
    assert!(ui.state().sidebar_collapsed);

    ui.toggle_sidebar().unwrap();
    ui.toggle_sidebar().unwrap();
    assert!(ui.state().sidebar_collapsed);
    assert!(ui.view().has_class(sidebar, StateClass::Collapsed));
}

#[test]
fn test_narrow_viewport_at_boot_starts_collapsed() {
    let mut ui = prototype(700.0, UiConfig::default()).unwrap();
    ui.boot();
    ui.advance(2_500);
    assert!(ui.state().sidebar_collapsed);
    assert!(ui.state().auto_collapsed);

    ui.handle(&UiEvent::Resize { width: 1024.0 });
    assert!(!ui.state().sidebar_collapsed);
}

// ============================================================================
// EVENT QUEUE AND CONFIG
// ============================================================================

#[test]
fn test_events_flow_through_the_bus() {
    let mut ui = fresh();
    let (sender, receiver) = EventBus::create_pair(16);

    sender.send(digit(Key::Num4, Modifiers::default()));
    assert_eq!(ui.pump(&receiver), 1);
    ui.advance(3_000);
    assert_eq!(ui.state().current_page, PageId::Dashboard);

    sender.send(digit(Key::Num4, Modifiers::default()));
    sender.send(UiEvent::Click(ClickTarget::NavEntry {
        page: "nowhere".to_owned(),
    }));
    assert_eq!(ui.pump(&receiver), 2);
    assert_eq!(ui.state().current_page, PageId::Reports);
}

#[test]
fn test_config_rejects_content_delay_not_shorter_than_switch() {
    let err = UiConfig::from_toml_str("[timing]\ncontent_delay_ms = 250\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let ok = UiConfig::from_toml_str("[timing]\ncontent_delay_ms = 120\n").unwrap();
    assert_eq!(ok.timing.content_delay_ms, 120);
    assert_eq!(ok.timing.toast_display_ms, 4_000);
}

#[test]
fn test_zero_live_intervals_do_not_stall_the_clock() {
    let mut config = UiConfig::default();
    config.live.stat_update_interval_ms = 0;
    config.live.notification_pulse_interval_ms = 0;
    assert!(config.validate().is_err());

    // The controller still accepts an unvalidated config.
    let mut ui = prototype(1280.0, config).unwrap();
    ui.boot();
    ui.advance(60_000);
    assert_eq!(ui.now_ms(), 60_000);
    assert_eq!(ui.state().phase, Phase::Idle);
}

#[test]
fn test_same_seed_same_session() {
    let run = || {
        let mut ui = booted();
        ui.handle(&UiEvent::Click(ClickTarget::NotificationButton));
        ui.advance(60_000);
        let numbers = page_elements(ui.view(), PageId::Dashboard, &ElementKind::StatNumber);
        let texts: Vec<String> = numbers
            .into_iter()
            .map(|id| ui.view().text(id).unwrap())
            .collect();
        (ui.toasts().first().map(|t| t.message.clone()), texts)
    };
    assert_eq!(run(), run());
}
