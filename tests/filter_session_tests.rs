use chrono::NaiveDate;
use composite_chart::ChartError;
use composite_chart::api::{
    ChartEngine, ChartEngineConfig, FetchedSeries, FilterDialog, FilterSelection,
};
use composite_chart::core::{SeriesRow, Viewport};
use composite_chart::render::NullRenderer;
use indexmap::IndexSet;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn categories() -> IndexSet<String> {
    ["Tax Free", "Taxable", "Roth"].into_iter().map(str::to_owned).collect()
}

/// Records what it was pre-populated with and answers with a fixed result.
struct ScriptedDialog {
    answer: Option<FilterSelection>,
    seen: Vec<FilterSelection>,
}

impl ScriptedDialog {
    fn accepting(selection: FilterSelection) -> Self {
        Self {
            answer: Some(selection),
            seen: Vec::new(),
        }
    }

    fn cancelling() -> Self {
        Self {
            answer: None,
            seen: Vec::new(),
        }
    }
}

impl FilterDialog for ScriptedDialog {
    fn run(
        &mut self,
        prior: FilterSelection,
        _categories: &IndexSet<String>,
    ) -> Option<FilterSelection> {
        self.seen.push(prior);
        self.answer.clone()
    }
}

fn engine() -> ChartEngine<NullRenderer> {
    ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(900, 450)),
    )
    .expect("engine init")
}

fn rows() -> Vec<SeriesRow> {
    vec![
        SeriesRow::new(date(2022, 1, 3), Some(Decimal::new(9100, 2)), Some(Decimal::new(9000, 2))),
        SeriesRow::new(date(2023, 12, 25), Some(Decimal::new(8450, 2)), Some(Decimal::new(8700, 2))),
    ]
}

fn tax_free_selection() -> FilterSelection {
    FilterSelection::new("Tax Free", date(2022, 1, 1), date(2024, 1, 1))
}

#[test]
fn first_launch_prefills_two_year_window_ending_today() {
    let mut engine = engine();
    let mut dialog = ScriptedDialog::cancelling();

    let ticket = engine
        .open_filter_dialog(&mut dialog, &categories(), date(2025, 3, 15))
        .expect("dialog");

    assert!(ticket.is_none());
    assert_eq!(
        dialog.seen,
        vec![FilterSelection::new("Tax Free", date(2023, 3, 15), date(2025, 3, 15))]
    );
    assert!(engine.filter_selection().is_none());
}

#[test]
fn accepted_selection_is_remembered_for_next_open() {
    let mut engine = engine();
    let mut accept = ScriptedDialog::accepting(tax_free_selection());
    let ticket = engine
        .open_filter_dialog(&mut accept, &categories(), date(2025, 3, 15))
        .expect("dialog")
        .expect("accepted");
    assert_eq!(ticket.selection, tax_free_selection());
    assert!(engine.reload_pending());

    let mut reopen = ScriptedDialog::cancelling();
    engine
        .open_filter_dialog(&mut reopen, &categories(), date(2025, 6, 1))
        .expect("dialog");
    assert_eq!(reopen.seen, vec![tax_free_selection()]);
}

#[test]
fn cancelling_after_accepted_selection_changes_nothing() {
    let mut engine = engine();
    let ticket = engine
        .apply_filter_selection(tax_free_selection(), &categories())
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

    let selection_before = engine.filter_selection().cloned();
    let dataset_before = engine.dataset().clone();
    let scene_before = engine.scene().cloned();
    let renders_before = engine.renderer().render_count;

    let mut dialog = ScriptedDialog::cancelling();
    let ticket = engine
        .open_filter_dialog(&mut dialog, &categories(), date(2024, 6, 1))
        .expect("dialog");

    assert!(ticket.is_none());
    assert!(!engine.reload_pending());
    assert_eq!(engine.filter_selection().cloned(), selection_before);
    assert_eq!(engine.dataset(), &dataset_before);
    assert_eq!(engine.scene().cloned(), scene_before);
    assert_eq!(engine.renderer().render_count, renders_before);
}

#[test]
fn invalid_dialog_answer_is_rejected_and_prior_selection_kept() {
    let mut engine = engine();
    engine
        .apply_filter_selection(tax_free_selection(), &categories())
        .expect("apply");

    let mut dialog = ScriptedDialog::accepting(FilterSelection::new(
        "Crypto",
        date(2022, 1, 1),
        date(2023, 1, 1),
    ));
    let err = engine
        .open_filter_dialog(&mut dialog, &categories(), date(2024, 6, 1))
        .expect_err("unknown category");

    assert!(matches!(err, ChartError::InvalidSelection(_)));
    assert_eq!(engine.filter_selection(), Some(&tax_free_selection()));
}

#[test]
fn configured_default_category_prefills_first_dialog() {
    let config = ChartEngineConfig::new(Viewport::new(900, 450))
        .with_default_category("Roth")
        .with_default_lookback_years(1);
    let engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");

    let prefill = engine.filter_dialog_prefill(date(2024, 5, 10), &categories());
    assert_eq!(
        prefill,
        FilterSelection::new("Roth", date(2023, 5, 10), date(2024, 5, 10))
    );
}
