//! Built-in block set for the Robotics TXT controller.
//!
//! Every implementation is a stub until device control is wired up.

use crate::model::block::{
    not_implemented, BlockDescriptor, BlockKind, Category, ParamValue,
};

fn text(value: &str) -> Option<ParamValue> {
    Some(ParamValue::from(value))
}

fn number(value: f64) -> Option<ParamValue> {
    Some(ParamValue::from(value))
}

fn block(id: &str, kind: BlockKind, category: Category, template: &str) -> BlockDescriptor {
    BlockDescriptor::new(id, kind, category, template, not_implemented())
}

/// Returns the contributed blocks in palette display order.
pub fn builtin_blocks() -> Vec<BlockDescriptor> {
    vec![
        block(
            "SetOutput",
            BlockKind::Command,
            Category::Motion,
            "set output %ftroboOutput to %ftroboLevel",
        )
        .with_defaults(vec![text("O1"), number(512.0)]),
        block(
            "SetMotor",
            BlockKind::Command,
            Category::Motion,
            "set motor %ftroboMotor %ftroboDirection speed %ftroboSpeed",
        )
        .with_defaults(vec![text("M1"), text("left"), number(512.0)]),
        block(
            "RotateMotor",
            BlockKind::Command,
            Category::Motion,
            "rotate motor %ftroboMotor %ftroboDirection speed %ftroboSpeed for %ftroboSteps steps",
        )
        .with_defaults(vec![text("M1"), text("left"), number(512.0), None]),
        block(
            "StopMotors",
            BlockKind::Command,
            Category::Motion,
            "stop motors %ftroboMotors",
        ),
        block(
            "StopAll",
            BlockKind::Command,
            Category::Control,
            "stop all outputs",
        )
        .with_palette(Category::Motion),
        block(
            "ConfigureInput",
            BlockKind::Command,
            Category::Sensing,
            "configure input %ftroboInput as %ftroboInputMode",
        )
        .with_defaults(vec![text("I1"), text("digital")]),
        block(
            "SwitchOn",
            BlockKind::Predicate,
            Category::Sensing,
            "switch %ftroboInput is on?",
        )
        .with_defaults(vec![text("I1")]),
        block(
            "InputValue",
            BlockKind::Reporter,
            Category::Sensing,
            "value of input %ftroboInput",
        )
        .with_defaults(vec![text("I1")]),
        block(
            "Distance",
            BlockKind::Reporter,
            Category::Sensing,
            "distance at input %ftroboInput",
        )
        .with_defaults(vec![text("I1")]),
        block(
            "ControllerStatus",
            BlockKind::Reporter,
            Category::Sensing,
            "controller status",
        ),
        block(
            "SetMode",
            BlockKind::Command,
            Category::Control,
            "set controller %ftroboMode",
        )
        .with_defaults(vec![text("online")]),
    ]
}
