//! Built-in custom parameter tokens for the Robotics TXT controller.

use crate::label::factory::LabelPartRule;
use crate::label::icon::IconResource;
use crate::label::widget::{ChoiceValue, ChoiceWidget, MultiSlot, NumericInput, WidgetHandle};

/// Number of single outputs `O1..O8`.
pub const OUTPUT_COUNT: usize = 8;
/// Number of universal inputs `I1..I8`.
pub const INPUT_COUNT: usize = 8;
/// Number of motor outputs `M1..M4`.
pub const MOTOR_COUNT: usize = 4;

pub const MOTOR_DIRECTIONS: &[&str] = &["left", "right", "stop"];
pub const INPUT_MODES: &[&str] = &["digital", "resistance", "voltage", "distance"];
pub const CONTROLLER_MODES: &[&str] = &["online", "offline"];
pub const SPEED_STEPS: &[&str] = &["0", "128", "256", "384", "512"];

/// Labels `prefix1..prefixN`.
pub fn enumerated(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|index| format!("{prefix}{index}")).collect()
}

fn port_selector(prefix: &'static str, count: usize) -> impl Fn() -> WidgetHandle {
    move || {
        let first = ChoiceValue::Text(format!("{prefix}1"));
        WidgetHandle::Choice(
            ChoiceWidget::locked(ChoiceWidget::labels(enumerated(prefix, count)))
                .with_selected(first),
        )
    }
}

fn fixed_menu(labels: &'static [&'static str]) -> impl Fn() -> WidgetHandle {
    move || {
        WidgetHandle::Choice(ChoiceWidget::locked(ChoiceWidget::labels(
            labels.iter().copied(),
        )))
    }
}

/// Builds the token table.
///
/// `marker_symbol` renders as the icon published through `logo`.
pub fn builtin_label_parts(marker_symbol: &str, logo: &IconResource) -> Vec<LabelPartRule> {
    let logo = logo.clone();
    vec![
        LabelPartRule::widget("%ftroboOutput", port_selector("O", OUTPUT_COUNT)),
        LabelPartRule::widget("%ftroboInput", port_selector("I", INPUT_COUNT)),
        LabelPartRule::widget("%ftroboMotor", port_selector("M", MOTOR_COUNT)),
        LabelPartRule::widget("%ftroboMotors", || {
            WidgetHandle::MultiSlot(MultiSlot::growable("%ftroboMotor", 1))
        }),
        LabelPartRule::widget("%ftroboDirection", fixed_menu(MOTOR_DIRECTIONS)),
        LabelPartRule::widget("%ftroboInputMode", fixed_menu(INPUT_MODES)),
        LabelPartRule::widget("%ftroboMode", fixed_menu(CONTROLLER_MODES)),
        LabelPartRule::widget("%ftroboSpeed", || {
            WidgetHandle::Choice(
                ChoiceWidget::editable(ChoiceWidget::labels(SPEED_STEPS.iter().copied()))
                    .numeric()
                    .with_selected(ChoiceValue::Number(512.0)),
            )
        }),
        LabelPartRule::widget("%ftroboSteps", || {
            WidgetHandle::Numeric(NumericInput::unbounded(false))
        }),
        LabelPartRule::alias("%ftroboLevel", "%n"),
        LabelPartRule::widget(marker_symbol, move || WidgetHandle::Icon(logo.widget())),
    ]
}
