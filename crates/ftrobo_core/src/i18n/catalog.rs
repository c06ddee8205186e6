//! Built-in translation overlays.

use crate::i18n::overlay::{LocaleOverlay, OverlayError};

/// Block templates as `(english, german)`, keyed without the marker prefix.
const GERMAN_BLOCKS: &[(&str, &str)] = &[
    (
        "set output %ftroboOutput to %ftroboLevel",
        "setze Ausgang %ftroboOutput auf %ftroboLevel",
    ),
    (
        "set motor %ftroboMotor %ftroboDirection speed %ftroboSpeed",
        "setze Motor %ftroboMotor %ftroboDirection Geschwindigkeit %ftroboSpeed",
    ),
    (
        "rotate motor %ftroboMotor %ftroboDirection speed %ftroboSpeed for %ftroboSteps steps",
        "drehe Motor %ftroboMotor %ftroboDirection Geschwindigkeit %ftroboSpeed für %ftroboSteps Schritte",
    ),
    ("stop motors %ftroboMotors", "stoppe Motoren %ftroboMotors"),
    ("stop all outputs", "stoppe alle Ausgänge"),
    (
        "configure input %ftroboInput as %ftroboInputMode",
        "konfiguriere Eingang %ftroboInput als %ftroboInputMode",
    ),
    ("switch %ftroboInput is on?", "Schalter %ftroboInput ist an?"),
    ("value of input %ftroboInput", "Wert von Eingang %ftroboInput"),
    ("distance at input %ftroboInput", "Abstand an Eingang %ftroboInput"),
    ("controller status", "Controller-Status"),
    ("set controller %ftroboMode", "setze Controller %ftroboMode"),
];

/// Menu option labels, used verbatim as Host dictionary keys.
const GERMAN_MENU_OPTIONS: &[(&str, &str)] = &[
    ("left", "links"),
    ("right", "rechts"),
    ("stop", "stopp"),
    ("digital", "digital"),
    ("resistance", "Widerstand"),
    ("voltage", "Spannung"),
    ("distance", "Abstand"),
    ("online", "online"),
    ("offline", "offline"),
];

/// German overlay; block keys carry `marker_prefix` like the rendered specs.
pub fn german_overlay(marker_prefix: &str) -> Result<LocaleOverlay, OverlayError> {
    let mut overlay = LocaleOverlay::new("de")?;
    for (english, german) in GERMAN_BLOCKS {
        overlay.insert(
            format!("{marker_prefix} {english}"),
            format!("{marker_prefix} {german}"),
        );
    }
    for (english, german) in GERMAN_MENU_OPTIONS {
        overlay.insert(*english, *german);
    }
    Ok(overlay)
}

/// Every built-in overlay.
pub fn builtin_overlays(marker_prefix: &str) -> Result<Vec<LocaleOverlay>, OverlayError> {
    Ok(vec![german_overlay(marker_prefix)?])
}
