//! Parameter input widgets built by label part rules.
//!
//! Widgets are plain descriptions; the Host turns them into its own parts.

use std::sync::Arc;

/// Display value shown by numeric inputs that have no upper bound.
pub const UNBOUNDED_DISPLAY: &str = "∞";

/// Value carried by one choice option.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceValue {
    Text(String),
    Number(f64),
}

impl ChoiceValue {
    /// Numeric view of the value, if it has a finite one.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            Self::Number(value) => *value,
            Self::Text(value) => value.trim().parse().ok()?,
        };
        number.is_finite().then_some(number)
    }
}

/// Single-choice selector over a fixed label to value mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceWidget {
    options: Vec<(String, ChoiceValue)>,
    read_only: bool,
    numeric: bool,
    selected: Option<ChoiceValue>,
}

impl ChoiceWidget {
    /// Selector locked to `options`.
    pub fn locked(options: Vec<(String, ChoiceValue)>) -> Self {
        Self {
            options,
            read_only: true,
            numeric: false,
            selected: None,
        }
    }

    /// Selector that also accepts free text.
    pub fn editable(options: Vec<(String, ChoiceValue)>) -> Self {
        Self {
            read_only: false,
            ..Self::locked(options)
        }
    }

    /// Options where each label is its own text value.
    pub fn labels<I, S>(labels: I) -> Vec<(String, ChoiceValue)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels
            .into_iter()
            .map(|label| {
                let label = label.into();
                let value = ChoiceValue::Text(label.clone());
                (label, value)
            })
            .collect()
    }

    /// Forces option values to compare as numbers.
    ///
    /// Values that do not parse as numbers keep their text form.
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        for (_, value) in &mut self.options {
            if let Some(number) = value.as_number() {
                *value = ChoiceValue::Number(number);
            }
        }
        if let Some(number) = self.selected.as_ref().and_then(ChoiceValue::as_number) {
            self.selected = Some(ChoiceValue::Number(number));
        }
        self
    }

    pub fn with_selected(mut self, value: ChoiceValue) -> Self {
        self.selected = match (self.numeric, value.as_number()) {
            (true, Some(number)) => Some(ChoiceValue::Number(number)),
            _ => Some(value),
        };
        self
    }

    /// Option labels in display order.
    pub fn option_labels(&self) -> Vec<&str> {
        self.options.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn options(&self) -> &[(String, ChoiceValue)] {
        &self.options
    }

    pub fn value_of(&self, label: &str) -> Option<&ChoiceValue> {
        self.options
            .iter()
            .find(|(candidate, _)| candidate == label)
            .map(|(_, value)| value)
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    pub fn selected(&self) -> Option<&ChoiceValue> {
        self.selected.as_ref()
    }
}

/// Numeric input pre-filled with a display value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericInput {
    pub read_only: bool,
    pub display: String,
}

impl NumericInput {
    /// Input showing the unbounded sentinel until the user types a number.
    pub fn unbounded(read_only: bool) -> Self {
        Self {
            read_only,
            display: UNBOUNDED_DISPLAY.to_string(),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.display == UNBOUNDED_DISPLAY
    }
}

/// Repeated slots of one resolvable token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSlot {
    /// Token every slot resolves with.
    pub slot_token: String,
    /// Number of slots shown initially.
    pub initial_slots: usize,
    /// Whether the user may add or remove slots.
    pub growable: bool,
}

impl MultiSlot {
    pub fn fixed(slot_token: impl Into<String>, arity: usize) -> Self {
        Self {
            slot_token: slot_token.into(),
            initial_slots: arity,
            growable: false,
        }
    }

    pub fn growable(slot_token: impl Into<String>, initial_slots: usize) -> Self {
        Self {
            slot_token: slot_token.into(),
            initial_slots,
            growable: true,
        }
    }
}

/// Decoded raster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Arc<[u8]>,
}

/// Symbol widget; shows `name` as text until `image` is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconWidget {
    pub name: String,
    pub image: Option<IconImage>,
}

impl IconWidget {
    pub fn is_placeholder(&self) -> bool {
        self.image.is_none()
    }
}

/// Widget produced by a label part factory closure.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetHandle {
    Choice(ChoiceWidget),
    Numeric(NumericInput),
    MultiSlot(MultiSlot),
    Icon(IconWidget),
}

impl WidgetHandle {
    pub fn as_choice(&self) -> Option<&ChoiceWidget> {
        match self {
            Self::Choice(choice) => Some(choice),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChoiceValue, ChoiceWidget, MultiSlot, NumericInput, UNBOUNDED_DISPLAY};

    #[test]
    fn locked_choice_keeps_option_order() {
        let widget = ChoiceWidget::locked(ChoiceWidget::labels(["left", "right", "stop"]));
        assert!(widget.is_read_only());
        assert!(!widget.is_numeric());
        assert_eq!(widget.option_labels(), vec!["left", "right", "stop"]);
        assert_eq!(
            widget.value_of("right"),
            Some(&ChoiceValue::Text("right".to_string()))
        );
    }

    #[test]
    fn numeric_choice_converts_values_and_selection() {
        let widget = ChoiceWidget::editable(ChoiceWidget::labels(["0", "256", "512", "max"]))
            .numeric()
            .with_selected(ChoiceValue::Text("512".to_string()));

        assert!(!widget.is_read_only());
        assert_eq!(widget.value_of("256"), Some(&ChoiceValue::Number(256.0)));
        assert_eq!(
            widget.value_of("max"),
            Some(&ChoiceValue::Text("max".to_string()))
        );
        assert_eq!(widget.selected(), Some(&ChoiceValue::Number(512.0)));
    }

    #[test]
    fn numeric_choice_keeps_non_finite_labels_as_text() {
        let widget =
            ChoiceWidget::editable(ChoiceWidget::labels(["NaN", "inf", "-infinity", "1e400", "7"]))
                .numeric();

        for label in ["NaN", "inf", "-infinity", "1e400"] {
            assert_eq!(
                widget.value_of(label),
                Some(&ChoiceValue::Text(label.to_string()))
            );
        }
        assert_eq!(widget.value_of("7"), Some(&ChoiceValue::Number(7.0)));
        assert_eq!(ChoiceValue::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn unbounded_input_shows_sentinel() {
        let input = NumericInput::unbounded(false);
        assert_eq!(input.display, UNBOUNDED_DISPLAY);
        assert!(input.is_unbounded());
    }

    #[test]
    fn multi_slot_arity_modes() {
        let fixed = MultiSlot::fixed("%ftroboMotor", 2);
        assert!(!fixed.growable);
        assert_eq!(fixed.initial_slots, 2);

        let growable = MultiSlot::growable("%ftroboMotor", 1);
        assert!(growable.growable);
    }
}
