use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use composite_chart::api::{ChartEngine, ChartEngineConfig, FetchedSeries, FilterSelection};
use composite_chart::core::{Granularity, SeriesRow, Viewport};
use composite_chart::extensions::{ChartEvent, ChartObserver, ObserverContext};
use composite_chart::interaction::ZoomState;
use composite_chart::render::NullRenderer;
use indexmap::IndexSet;
use rust_decimal::Decimal;

#[derive(Clone)]
struct RecordingObserver {
    id: String,
    events: Rc<RefCell<Vec<(ChartEvent, ObserverContext)>>>,
}

impl RecordingObserver {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<(ChartEvent, ObserverContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl ChartObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &ChartEvent, context: ObserverContext) {
        self.events.borrow_mut().push((event.clone(), context));
    }
}

fn event_kind(event: &ChartEvent) -> &'static str {
    match event {
        ChartEvent::FilterSelectionChanged { .. } => "filter",
        ChartEvent::DatasetReloaded { .. } => "reloaded",
        ChartEvent::ReloadDiscarded { .. } => "discarded",
        ChartEvent::ReloadFailed { .. } => "failed",
        ChartEvent::VisibleWindowChanged { .. } => "window",
        ChartEvent::GranularityChanged { .. } => "granularity",
        ChartEvent::CrosshairMoved { .. } => "crosshair",
        ChartEvent::CrosshairHidden => "crosshair_hidden",
        ChartEvent::Rendered => "rendered",
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn rows() -> Vec<SeriesRow> {
    vec![
        SeriesRow::new(date(2024, 1, 1), Some(Decimal::new(9500, 2)), Some(Decimal::new(9300, 2))),
        SeriesRow::new(date(2024, 1, 8), Some(Decimal::new(7800, 2)), Some(Decimal::new(8500, 2))),
    ]
}

fn categories() -> IndexSet<String> {
    ["Tax Free".to_owned()].into_iter().collect()
}

fn engine() -> ChartEngine<NullRenderer> {
    ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(1000, 500)),
    )
    .expect("engine init")
}

#[test]
fn observer_receives_deterministic_event_sequence() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_observer(Box::new(RecordingObserver::new("recorder", events.clone())))
        .expect("register observer");

    let ticket = engine
        .apply_filter_selection(
            FilterSelection::new("Tax Free", date(2022, 1, 1), date(2024, 1, 8)),
            &categories(),
        )
        .expect("apply");
    engine
        .complete_reload(
            ticket,
            FetchedSeries {
                rows: Ok(rows()),
                strategy_label: Ok("Guardrails".to_owned()),
            },
        )
        .expect("reload");
    engine.pointer_move(500.0, 250.0);
    engine.pointer_leave();
    engine.reset_zoom();

    let kinds: Vec<_> = events
        .borrow()
        .iter()
        .map(|(event, _)| event_kind(event))
        .collect();
    assert_eq!(
        kinds,
        vec![
            "filter",
            "reloaded",
            "window",
            "granularity",
            "rendered",
            "crosshair",
            "crosshair_hidden",
            "window",
            "rendered",
        ]
    );

    let recorded = events.borrow();
    assert_eq!(
        recorded[3].0,
        ChartEvent::GranularityChanged {
            from: Granularity::Monthly,
            to: Granularity::Weekly,
        }
    );
    let (_, filter_context) = &recorded[0];
    assert!(filter_context.reload_pending);
    assert_eq!(filter_context.points_len, 0);
    let (_, rendered_context) = &recorded[4];
    assert!(!rendered_context.reload_pending);
    assert_eq!(rendered_context.points_len, 2);
    assert_eq!(rendered_context.zoom_state, ZoomState::Idle);
}

#[test]
fn failed_and_superseded_reloads_are_reported() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_observer(Box::new(RecordingObserver::new("recorder", events.clone())))
        .expect("register observer");

    let selection = FilterSelection::new("Tax Free", date(2022, 1, 1), date(2024, 1, 8));
    let stale = engine.begin_reload(selection.clone());
    let current = engine.begin_reload(selection);
    engine
        .complete_reload(
            stale,
            FetchedSeries {
                rows: Ok(rows()),
                strategy_label: Ok("Guardrails".to_owned()),
            },
        )
        .expect("discarded");
    let _ = engine.complete_reload(
        current,
        FetchedSeries {
            rows: Ok(Vec::new()),
            strategy_label: Ok("Guardrails".to_owned()),
        },
    );

    let recorded: Vec<_> = events.borrow().iter().map(|(e, _)| e.clone()).collect();
    assert_eq!(recorded[0], ChartEvent::ReloadDiscarded { sequence: 1 });
    assert!(matches!(
        &recorded[1],
        ChartEvent::ReloadFailed { sequence: 2, message } if message.contains("Tax Free")
    ));
    assert_eq!(recorded.len(), 2);
}

#[test]
fn duplicate_or_empty_observer_ids_are_rejected() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));

    engine
        .register_observer(Box::new(RecordingObserver::new("status-bar", events.clone())))
        .expect("first registration");
    assert!(
        engine
            .register_observer(Box::new(RecordingObserver::new("status-bar", events.clone())))
            .is_err()
    );
    assert!(
        engine
            .register_observer(Box::new(RecordingObserver::new("", events.clone())))
            .is_err()
    );
    assert_eq!(engine.observer_count(), 1);
    assert!(engine.has_observer("status-bar"));

    assert!(engine.unregister_observer("status-bar"));
    assert!(!engine.unregister_observer("status-bar"));
    engine.pointer_leave();
    assert!(events.borrow().is_empty());
}
