use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use chrono::NaiveDate;
use rune_config::RuneConfig;
use rune_date_picker::{
    ClickEvent, ConsumerHandlers, ControllableValueStore, DateParser, DatePickerError, DatePickerOptions, DateValue,
    Dispatch, EventResult, FocusEvent, FocusHandle, FocusTarget, FormControlFlags, InputEvent, InteractionController,
    InteractionState, NodeId, PointerEvent,
};

/// Nodes below this id live inside the picker's container.
const CONTAINER_EDGE: u64 = 100;
const INSIDE: NodeId = NodeId(7);
const OUTSIDE: NodeId = NodeId(500);

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn picker(options: DatePickerOptions, store: ControllableValueStore) -> (InteractionController, FocusHandle) {
    let field = FocusHandle::new();
    let mut controller = InteractionController::new(options, store).unwrap();
    controller.attach_field(Box::new(field.clone()));
    controller.attach_container(Box::new(|node: NodeId| node.0 < CONTAINER_EDGE));
    (controller, field)
}

fn type_text(controller: &mut InteractionController, text: &str) -> Result<EventResult, DatePickerError> {
    let props = controller.input_props(&ConsumerHandlers::default());
    controller.dispatch_input_change(&props, &mut InputEvent::new(text))
}

fn blur_to(controller: &mut InteractionController, related: Option<NodeId>) -> EventResult {
    let props = controller.container_props(&ConsumerHandlers::default());
    controller.dispatch_container_blur(&props, &mut FocusEvent::with_related(related))
}

fn click_container(controller: &mut InteractionController, event: &mut ClickEvent) -> EventResult {
    let props = controller.container_props(&ConsumerHandlers::default());
    controller.dispatch_container_click(&props, event)
}

#[test]
fn invalid_text_then_blur_shows_committed_value() -> Result<()> {
    let (mut picker, field) = picker(
        DatePickerOptions::default(),
        ControllableValueStore::uncontrolled(ymd(2024, 5, 3).into()),
    );

    click_container(&mut picker, &mut ClickEvent::on(INSIDE));
    assert!(picker.is_open());
    assert!(field.is_focused());

    type_text(&mut picker, "2024/13/45")?;
    assert_eq!(picker.value(), DateValue::Cleared);
    // Invalid text stays visible while the user is typing.
    assert_eq!(picker.input_text(), Some("2024/13/45"));

    assert!(blur_to(&mut picker, Some(OUTSIDE)).is_handled());
    assert_eq!(picker.state(), InteractionState::Closed);
    assert_eq!(picker.input_text(), picker.codec().format(picker.value()).as_deref());
    assert_eq!(picker.input_text(), None);
    assert!(!field.is_focused());
    Ok(())
}

#[test]
fn valid_text_then_blur_keeps_formatted_date() -> Result<()> {
    let (mut picker, _) = picker(DatePickerOptions::default(), ControllableValueStore::default());
    picker.open();

    type_text(&mut picker, "2024/05/03")?;
    assert_eq!(picker.value(), ymd(2024, 5, 3).into());

    blur_to(&mut picker, None);
    assert!(!picker.is_open());
    assert_eq!(picker.input_text(), Some("2024/05/03"));
    Ok(())
}

#[test]
fn select_date_closes_and_formats() {
    let (mut picker, field) = picker(DatePickerOptions::default(), ControllableValueStore::default());
    picker.open();

    let d = ymd(2024, 2, 29);
    picker.select_date(d.into());

    assert_eq!(picker.value(), d.into());
    assert_eq!(picker.input_text(), Some("2024/02/29"));
    assert_eq!(picker.state(), InteractionState::Closed);
    assert!(!field.is_focused());
}

#[test]
fn select_date_stays_open_without_close_on_select() {
    let (mut picker, _) = picker(
        DatePickerOptions {
            close_on_select: false,
            ..DatePickerOptions::default()
        },
        ControllableValueStore::default(),
    );
    picker.open();
    picker.select_date(ymd(2024, 2, 1).into());

    assert!(picker.is_open());
    assert_eq!(picker.input_text(), Some("2024/02/01"));
}

#[test]
fn selecting_cleared_never_closes() {
    let (mut picker, _) = picker(
        DatePickerOptions::default(),
        ControllableValueStore::uncontrolled(ymd(2024, 1, 1).into()),
    );
    picker.open();
    picker.select_date(DateValue::Cleared);

    assert!(picker.is_open());
    assert_eq!(picker.value(), DateValue::Cleared);
    assert_eq!(picker.input_text(), None);
}

#[test]
fn clear_while_open_keeps_popover_and_refocuses() {
    let (mut picker, field) = picker(
        DatePickerOptions::default(),
        ControllableValueStore::uncontrolled(ymd(2024, 5, 3).into()),
    );
    picker.open();
    field.set_focused(false);

    // The clear button sits inside the container; its click bubbles there next.
    let mut click = ClickEvent::on(INSIDE);
    assert!(picker.clear(&mut click).is_handled());
    assert_eq!(click_container(&mut picker, &mut click), EventResult::Ignored);

    assert_eq!(picker.value(), DateValue::Cleared);
    assert_eq!(picker.input_text(), None);
    assert!(picker.is_open());
    assert!(field.is_focused());
}

#[test]
fn clear_while_closed_does_not_reopen() {
    let (mut picker, field) = picker(
        DatePickerOptions {
            allow_input: false,
            ..DatePickerOptions::default()
        },
        ControllableValueStore::uncontrolled(ymd(2024, 5, 3).into()),
    );

    let mut click = ClickEvent::on(INSIDE);
    picker.clear(&mut click);
    click_container(&mut picker, &mut click);

    assert!(!picker.is_open());
    assert_eq!(picker.value(), DateValue::Cleared);
    assert!(!field.is_focused());
}

#[test]
fn blur_inside_container_never_closes() {
    for close_on_blur in [true, false] {
        let (mut picker, _) = picker(
            DatePickerOptions {
                close_on_blur,
                ..DatePickerOptions::default()
            },
            ControllableValueStore::default(),
        );
        picker.open();

        assert_eq!(blur_to(&mut picker, Some(INSIDE)), EventResult::Ignored);
        assert!(picker.is_open(), "close_on_blur = {close_on_blur}");
    }
}

#[test]
fn blur_outside_respects_close_on_blur() {
    let (mut picker, _) = picker(
        DatePickerOptions {
            close_on_blur: false,
            ..DatePickerOptions::default()
        },
        ControllableValueStore::default(),
    );
    picker.open();

    assert_eq!(blur_to(&mut picker, Some(OUTSIDE)), EventResult::Ignored);
    assert!(picker.is_open());
}

#[test]
fn outside_interaction_closes_only_when_enabled() {
    let (mut picker, _) = picker(DatePickerOptions::default(), ControllableValueStore::default());
    picker.open();

    assert_eq!(picker.handle_outside_interaction(&PointerEvent::on(INSIDE)), EventResult::Ignored);
    assert!(picker.is_open());

    assert!(picker.handle_outside_interaction(&PointerEvent::on(OUTSIDE)).is_handled());
    assert!(!picker.is_open());

    let (mut sticky, _) = self::picker(
        DatePickerOptions {
            close_on_blur: false,
            ..DatePickerOptions::default()
        },
        ControllableValueStore::default(),
    );
    sticky.open();
    assert_eq!(sticky.handle_outside_interaction(&PointerEvent::on(OUTSIDE)), EventResult::Ignored);
    assert!(sticky.is_open());
}

#[test]
fn text_stripped_to_empty_commits_cleared() -> Result<()> {
    let (mut picker, _) = picker(
        DatePickerOptions::default(),
        ControllableValueStore::uncontrolled(ymd(2024, 5, 3).into()),
    );
    picker.open();

    type_text(&mut picker, "abc")?;
    assert_eq!(picker.value(), DateValue::Cleared);
    assert_eq!(picker.input_text(), Some(""));
    Ok(())
}

#[test]
fn typed_date_is_clamped_into_range() -> Result<()> {
    let (mut picker, _) = picker(
        DatePickerOptions {
            min_date: Some(ymd(2024, 1, 1)),
            max_date: Some(ymd(2024, 12, 31)),
            ..DatePickerOptions::default()
        },
        ControllableValueStore::default(),
    );
    picker.open();

    type_text(&mut picker, "2030/06/15")?;
    assert_eq!(picker.value(), ymd(2024, 12, 31).into());
    assert_eq!(picker.input_text(), Some("2030/06/15"));

    picker.close();
    assert_eq!(picker.input_text(), Some("2024/12/31"));
    Ok(())
}

#[test]
fn controlled_mode_only_notifies() -> Result<()> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let store = ControllableValueStore::controlled(
        ymd(2024, 1, 15).into(),
        Box::new(move |value| sink.borrow_mut().push(value)),
    );
    let (mut picker, _) = picker(DatePickerOptions::default(), store);
    assert!(picker.is_controlled());

    picker.open();
    type_text(&mut picker, "2024/03/09")?;
    picker.select_date(ymd(2024, 4, 1).into());
    picker.clear(&mut ClickEvent::default());

    assert_eq!(picker.value(), ymd(2024, 1, 15).into());
    assert_eq!(
        *seen.borrow(),
        vec![
            DateValue::from(ymd(2024, 3, 9)),
            DateValue::from(ymd(2024, 4, 1)),
            DateValue::Cleared,
        ]
    );
    Ok(())
}

#[test]
fn controlled_selection_shows_pick_until_owner_syncs() {
    let store = ControllableValueStore::controlled(ymd(2024, 1, 15).into(), Box::new(|_| {}));
    let (mut picker, _) = picker(DatePickerOptions::default(), store);
    picker.open();

    picker.select_date(ymd(2024, 4, 1).into());
    assert!(!picker.is_open());
    assert_eq!(picker.input_text(), Some("2024/04/01"));

    picker.set_external_value(ymd(2024, 4, 1).into());
    assert_eq!(picker.value(), ymd(2024, 4, 1).into());
    assert_eq!(picker.input_text(), Some("2024/04/01"));
}

#[test]
fn external_update_does_not_stomp_active_typing() -> Result<()> {
    let store = ControllableValueStore::controlled(ymd(2024, 1, 15).into(), Box::new(|_| {}));
    let (mut picker, field) = picker(DatePickerOptions::default(), store);
    assert_eq!(picker.input_text(), Some("2024/01/15"));

    picker.open();
    assert!(field.is_focused());
    type_text(&mut picker, "2024/05/0")?;

    picker.set_external_value(ymd(2024, 6, 1).into());
    assert_eq!(picker.input_text(), Some("2024/05/0"));

    blur_to(&mut picker, Some(OUTSIDE));
    assert_eq!(picker.input_text(), Some("2024/06/01"));
    Ok(())
}

#[test]
fn external_update_while_unfocused_reformats() {
    let store = ControllableValueStore::controlled(ymd(2024, 1, 15).into(), Box::new(|_| {}));
    let (mut picker, _) = picker(DatePickerOptions::default(), store);

    picker.set_external_value(ymd(2025, 7, 4).into());
    assert_eq!(picker.input_text(), Some("2025/07/04"));

    picker.set_external_value(DateValue::Cleared);
    assert_eq!(picker.input_text(), None);
}

#[test]
fn disabled_picker_ignores_open_requests() {
    let (picker, field) = picker(DatePickerOptions::default(), ControllableValueStore::default());
    let mut picker = picker.with_flags(FormControlFlags {
        disabled: true,
        ..FormControlFlags::default()
    });

    assert_eq!(click_container(&mut picker, &mut ClickEvent::on(INSIDE)), EventResult::Ignored);
    let props = picker.container_props(&ConsumerHandlers::default());
    picker.dispatch_container_focus(&props, &mut FocusEvent::default());

    assert!(!picker.is_open());
    assert!(!field.is_focused());
}

#[test]
fn consumer_handlers_run_before_controller() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let configured = log.clone();
    let (picker, _) = picker(DatePickerOptions::default(), ControllableValueStore::default());
    let mut picker = picker.with_handlers(ConsumerHandlers {
        on_click: Some(Rc::new(move |_: &ClickEvent| {
            configured.borrow_mut().push("configured");
            Dispatch::Continue
        })),
        ..ConsumerHandlers::default()
    });

    let user_log = log.clone();
    let user = ConsumerHandlers {
        on_click: Some(Rc::new(move |_: &ClickEvent| {
            user_log.borrow_mut().push("user");
            Dispatch::Continue
        })),
        ..ConsumerHandlers::default()
    };
    let props = picker.container_props(&user);
    assert!(picker.dispatch_container_click(&props, &mut ClickEvent::on(INSIDE)).is_handled());

    assert_eq!(*log.borrow(), vec!["user", "configured"]);
    assert!(picker.is_open());
}

#[test]
fn consumer_stop_skips_controller() {
    let (mut picker, _) = picker(DatePickerOptions::default(), ControllableValueStore::default());
    let user = ConsumerHandlers {
        on_click: Some(Rc::new(|_: &ClickEvent| Dispatch::Stop)),
        ..ConsumerHandlers::default()
    };
    let props = picker.container_props(&user);

    assert_eq!(picker.dispatch_container_click(&props, &mut ClickEvent::on(INSIDE)), EventResult::Ignored);
    assert!(!picker.is_open());
}

#[test]
fn failing_custom_parser_propagates_without_changes() -> Result<()> {
    let parser: DateParser = Rc::new(|text: &str| -> anyhow::Result<DateValue> {
        if text.is_empty() {
            anyhow::bail!("parser rejects empty input");
        }
        Ok(ymd(2024, 8, 8).into())
    });
    let (mut picker, _) = picker(
        DatePickerOptions {
            parse_date: Some(parser),
            ..DatePickerOptions::default()
        },
        ControllableValueStore::uncontrolled(ymd(2024, 5, 3).into()),
    );
    picker.open();

    let err = type_text(&mut picker, "xyz").unwrap_err();
    assert!(matches!(err, DatePickerError::Parser(_)));
    assert_eq!(picker.value(), ymd(2024, 5, 3).into());
    assert_eq!(picker.input_text(), Some("2024/05/03"));

    type_text(&mut picker, "1")?;
    assert_eq!(picker.value(), ymd(2024, 8, 8).into());
    Ok(())
}

#[test]
fn default_config_builds_a_working_picker() -> Result<()> {
    let config = RuneConfig::default();
    let options = DatePickerOptions::from_config(&config.date_picker)?;
    let (mut picker, _) = picker(options, ControllableValueStore::default());

    picker.open();
    type_text(&mut picker, "2024-x05")?;
    assert_eq!(picker.input_text(), Some("2024-05"));
    assert_eq!(picker.value(), DateValue::Cleared);
    Ok(())
}

#[test]
fn calendar_props_forward_bounds_and_exclusions() {
    let (picker, _) = picker(
        DatePickerOptions {
            min_date: Some(ymd(2024, 1, 1)),
            max_date: Some(ymd(2024, 1, 31)),
            exclude_date: Some(Rc::new(|d: NaiveDate| d == NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())),
            ..DatePickerOptions::default()
        },
        ControllableValueStore::uncontrolled(ymd(2024, 1, 5).into()),
    );

    let props = picker.calendar_props();
    assert_eq!(props.value, ymd(2024, 1, 5).into());
    assert_eq!(props.default_value, ymd(2024, 1, 5).into());
    assert!(props.is_excluded(ymd(2024, 1, 10)));
    assert!(props.is_excluded(ymd(2024, 2, 1)));
    assert!(!props.is_excluded(ymd(2024, 1, 31)));
    assert!(!props.is_excluded(ymd(2024, 1, 1)));
    assert!(props.is_excluded(ymd(2023, 12, 31)));
    assert_eq!(props.bounds, picker.codec().bounds());
    assert_eq!(props.min_date(), Some(ymd(2024, 1, 1)));
    assert_eq!(props.max_date(), Some(ymd(2024, 1, 31)));
}

#[test]
fn localized_month_names_commit_from_typed_text() -> Result<()> {
    let (mut picker, _) = picker(
        DatePickerOptions {
            input_format: "%d %B %Y".to_string(),
            locale: chrono::Locale::fr_FR,
            pattern: Some(regex::Regex::new(r"[^\p{L}0-9 .]")?),
            ..DatePickerOptions::default()
        },
        ControllableValueStore::default(),
    );
    picker.open();

    type_text(&mut picker, "03 mai 2024")?;
    assert_eq!(picker.value(), ymd(2024, 5, 3).into());

    picker.close();
    assert_eq!(picker.input_text(), Some("03 mai 2024"));
    Ok(())
}
