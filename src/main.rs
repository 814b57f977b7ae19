use std::collections::HashSet;

use anyhow::Result;
use chrono::NaiveDate;
use rune_config::RuneConfig;
use rune_date_picker::{
    ClickEvent, ConsumerHandlers, ControllableValueStore, DatePickerOptions, DateValue, FocusEvent, FocusHandle,
    InputEvent, InteractionController, KeyCode, KeyboardEvent, NodeId, PointerEvent,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONTAINER: NodeId = NodeId(1);
const FIELD: NodeId = NodeId(2);
const CLEAR_BUTTON: NodeId = NodeId(3);
const CALENDAR: NodeId = NodeId(4);
const ELSEWHERE: NodeId = NodeId(99);

fn snapshot(step: &str, picker: &InteractionController) {
    info!(
        step,
        state = ?picker.state(),
        value = ?picker.value(),
        text = picker.input_text().unwrap_or(""),
        "date picker"
    );
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = RuneConfig::load();
    let options = DatePickerOptions::from_config(&config.date_picker)?;
    let default_value = config.date_picker.default_value.map_or(DateValue::Unset, DateValue::from);
    let store = ControllableValueStore::uncontrolled(default_value)
        .with_on_change(Box::new(|value| info!(?value, "on_change")));

    let field = FocusHandle::new();
    let mut picker = InteractionController::new(options, store)?;
    picker.attach_field(Box::new(field.clone()));
    picker.attach_container(Box::new(HashSet::from([CONTAINER, FIELD, CLEAR_BUTTON, CALENDAR])));
    snapshot("created", &picker);

    let handlers = ConsumerHandlers::default();

    let props = picker.container_props(&handlers);
    picker.dispatch_container_click(&props, &mut ClickEvent::on(FIELD));
    snapshot("click field", &picker);

    let props = picker.input_props(&handlers);
    picker.dispatch_input_change(&props, &mut InputEvent::new("2024/0x2/3"))?;
    snapshot("type partial", &picker);

    let props = picker.input_props(&handlers);
    picker.dispatch_input_change(&props, &mut InputEvent::new("2024/02/29"))?;
    snapshot("type date", &picker);

    let props = picker.container_props(&handlers);
    picker.dispatch_container_blur(&props, &mut FocusEvent::with_related(Some(CALENDAR)));
    snapshot("blur into calendar", &picker);

    let props = picker.field_props(&handlers);
    picker.dispatch_field_key_down(&props, &mut KeyboardEvent::new(KeyCode::Enter));
    snapshot("press enter", &picker);

    picker.open();
    picker.select_date(DateValue::from(NaiveDate::from_ymd_opt(2025, 1, 31)));
    snapshot("select from calendar", &picker);

    picker.open();
    let mut click = ClickEvent::on(CLEAR_BUTTON);
    picker.clear(&mut click);
    let props = picker.container_props(&handlers);
    picker.dispatch_container_click(&props, &mut click);
    snapshot("clear", &picker);

    picker.handle_outside_interaction(&PointerEvent::on(ELSEWHERE));
    snapshot("click elsewhere", &picker);

    Ok(())
}
