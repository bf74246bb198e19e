//! # Prototype Demo
//!
//! Headless scripted session over the prototype markup: boot, a few
//! navigations through the event queue, hover, keyboard and resize.
//!
//! Run with: `RUST_LOG=debug cargo run --bin prototype_demo [config.toml]`

use std::error::Error;

use eyetrack::markup::page_elements;
use eyetrack::ui::{
    ClickTarget, ElementKind, EventBus, HoverTarget, Key, Modifiers, StateClass, ViewPort,
};
use eyetrack::{prototype, PageId, Prototype, UiConfig, UiEvent};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading config from {}", path);
            UiConfig::from_file(&path)?
        }
        None => UiConfig::default(),
    };

    let mut ui = prototype(1280.0, config)?;
    let bus = EventBus::default();
    let events = bus.sender();
    let inbox = bus.receiver();

    println!("=== EyeTrack Analytics prototype ===");
    ui.boot();

    // Too early: listeners are not bound yet.
    events.send(UiEvent::Click(ClickTarget::NavEntry {
        page: "reports".to_owned(),
    }));
    ui.pump(&inbox);
    ui.advance(3_000);
    report(&ui, "after loading");

    events.send(UiEvent::Click(ClickTarget::NavEntry {
        page: "reports".to_owned(),
    }));
    ui.pump(&inbox);
    ui.advance(1_500);
    report(&ui, "after clicking Relatórios");

    events.send(UiEvent::KeyDown {
        key: Key::Num1,
        modifiers: Modifiers::default(),
    });
    ui.pump(&inbox);
    ui.advance(2_000);
    report(&ui, "after pressing 1");

    let bars = page_elements(ui.view(), PageId::Dashboard, &ElementKind::ChartBar);
    if let Some(&bar) = bars.get(3) {
        ui.handle(&UiEvent::HoverEnter(HoverTarget::ChartBar {
            element: bar,
            index: 3,
        }));
        ui.advance(60);
        if let Some(tip) = ui.tooltip() {
            println!("  tooltip: {:?} at {:?}", tip.text, tip.position);
        }
        ui.handle(&UiEvent::KeyDown {
            key: Key::Escape,
            modifiers: Modifiers::default(),
        });
    }

    ui.handle(&UiEvent::Resize { width: 600.0 });
    report(&ui, "after shrinking to 600px");
    ui.handle(&UiEvent::Resize { width: 1280.0 });

    ui.advance(30_000);
    report(&ui, "after 30s idle");
    Ok(())
}

fn report(ui: &Prototype, label: &str) {
    let view = ui.view();
    let state = ui.state();
    let active: Vec<String> = PageId::ALL
        .into_iter()
        .filter(|&page| {
            view.find_page(page)
                .is_ok_and(|id| view.has_class(id, StateClass::Active))
        })
        .map(|page| page.to_string())
        .collect();
    let title = view
        .page_title()
        .and_then(|(title, _)| view.text(title))
        .unwrap_or_default();

    println!("[{:>6}ms] {}", ui.now_ms(), label);
    println!(
        "  phase={:?} page={} sidebar_collapsed={} active={:?} title={:?}",
        state.phase, state.current_page, state.sidebar_collapsed, active, title
    );
    for toast in ui.toasts() {
        println!("  toast {:?}: {}", toast.kind, toast.message);
    }
}
