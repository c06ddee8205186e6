use ftrobo_core::{
    Extension, ExtensionConfig, HostLocaleLoader, LoadState, LocaleCallback, LocaleDictionary,
    LocaleOverlay, OverlayError,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

const SWITCH_KEY: &str = "$ftrobo switch %ftroboInput is on?";
const SWITCH_DE: &str = "$ftrobo Schalter %ftroboInput ist an?";

/// Host loader that holds callbacks until a test finishes the file load.
#[derive(Default)]
struct FakeHostLoader {
    pending: Vec<(String, LocaleCallback)>,
    dictionaries: BTreeMap<String, BTreeMap<String, String>>,
}

impl FakeHostLoader {
    /// Merges the base file for the oldest request, then runs its callback.
    fn finish_next(&mut self, base: &[(&str, &str)]) {
        let (file_name, callback) = self.pending.remove(0);
        let locale = ftrobo_core::locale_from_file_name(&file_name).unwrap_or(file_name);
        let dictionary = self.dictionaries.entry(locale).or_default();
        for (key, value) in base {
            dictionary.insert(key.to_string(), value.to_string());
        }
        callback(dictionary);
    }
}

impl HostLocaleLoader for FakeHostLoader {
    fn load(&mut self, file_name: &str, on_loaded: LocaleCallback) {
        self.pending.push((file_name.to_string(), on_loaded));
    }
}

fn counting_callback(calls: &Rc<RefCell<Vec<Option<String>>>>) -> LocaleCallback {
    let calls = calls.clone();
    Box::new(move |dictionary: &mut dyn LocaleDictionary| {
        calls
            .borrow_mut()
            .push(dictionary.entry(SWITCH_KEY).map(str::to_string));
    })
}

#[test]
fn german_overlay_lands_after_base_load_and_host_is_notified_once() {
    let extension = Extension::initialize(ExtensionConfig::default()).expect("builtin extension");
    let mut loader = extension.locale_loader(FakeHostLoader::default());
    let calls = Rc::new(RefCell::new(Vec::new()));

    let status = loader
        .load("lang-de.js", counting_callback(&calls))
        .expect("german file name is valid");
    assert_eq!(status.locale(), "de");
    assert_eq!(status.state(), LoadState::BaseLoading);
    assert!(loader.inner().dictionaries.is_empty());
    assert!(calls.borrow().is_empty());

    loader
        .inner_mut()
        .finish_next(&[(SWITCH_KEY, "Host-Text"), ("move %n steps", "gehe %n Schritte")]);

    let dictionary = &loader.inner().dictionaries["de"];
    assert_eq!(dictionary.get(SWITCH_KEY).map(String::as_str), Some(SWITCH_DE));
    assert_eq!(
        dictionary.get("move %n steps").map(String::as_str),
        Some("gehe %n Schritte")
    );
    assert_eq!(*calls.borrow(), vec![Some(SWITCH_DE.to_string())]);
    assert_eq!(status.state(), LoadState::HostNotified);
    assert!(status.overlay_writes() > 0);
}

#[test]
fn locale_without_overlay_still_notifies_host_once() {
    let extension = Extension::initialize(ExtensionConfig::default()).expect("builtin extension");
    let mut loader = extension.locale_loader(FakeHostLoader::default());
    let calls = Rc::new(RefCell::new(Vec::new()));

    let status = loader
        .load("lang-fr.js", counting_callback(&calls))
        .expect("french file name is valid");
    loader
        .inner_mut()
        .finish_next(&[("move %n steps", "avance de %n pas")]);

    let dictionary = &loader.inner().dictionaries["fr"];
    assert_eq!(dictionary.len(), 1);
    assert_eq!(
        dictionary.get("move %n steps").map(String::as_str),
        Some("avance de %n pas")
    );
    assert_eq!(*calls.borrow(), vec![None]);
    assert_eq!(status.state(), LoadState::HostNotified);
    assert_eq!(status.overlay_writes(), 0);
}

#[test]
fn overlay_is_never_written_before_base_load_completes() {
    let extension = Extension::initialize(ExtensionConfig::default()).expect("builtin extension");
    let mut loader = extension.locale_loader(FakeHostLoader::default());
    let calls = Rc::new(RefCell::new(Vec::new()));

    let first = loader
        .load("lang-de.js", counting_callback(&calls))
        .expect("valid file name");
    let second = loader
        .load("lang-de.js", counting_callback(&calls))
        .expect("valid file name");

    assert_eq!(first.state(), LoadState::BaseLoading);
    assert_eq!(second.state(), LoadState::BaseLoading);
    assert_eq!(first.overlay_writes(), 0);
    assert!(loader.inner().dictionaries.is_empty());

    loader.inner_mut().finish_next(&[(SWITCH_KEY, "Host-Text")]);
    assert_eq!(first.state(), LoadState::HostNotified);
    assert_eq!(second.state(), LoadState::BaseLoading);

    loader.inner_mut().finish_next(&[(SWITCH_KEY, "Host-Text")]);
    assert_eq!(second.state(), LoadState::HostNotified);
    assert_eq!(
        loader.inner().dictionaries["de"]
            .get(SWITCH_KEY)
            .map(String::as_str),
        Some(SWITCH_DE)
    );
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn malformed_file_name_still_reaches_host_with_its_own_callback() {
    let extension = Extension::initialize(ExtensionConfig::default()).expect("builtin extension");
    let mut loader = extension.locale_loader(FakeHostLoader::default());
    let calls = Rc::new(RefCell::new(Vec::new()));

    let err = loader
        .load("lang.js", counting_callback(&calls))
        .expect_err("file name without locale must fail");
    assert_eq!(err, OverlayError::MalformedLocaleFileName("lang.js".to_string()));
    assert_eq!(loader.inner().pending.len(), 1);

    loader
        .inner_mut()
        .finish_next(&[(SWITCH_KEY, "Host-Text")]);
    assert_eq!(*calls.borrow(), vec![Some("Host-Text".to_string())]);
    assert_eq!(
        loader.inner().dictionaries["lang.js"]
            .get(SWITCH_KEY)
            .map(String::as_str),
        Some("Host-Text")
    );
}

#[test]
fn versioned_and_minified_file_names_get_the_overlay() {
    let extension = Extension::initialize(ExtensionConfig::default()).expect("builtin extension");
    let mut loader = extension.locale_loader(FakeHostLoader::default());
    let calls = Rc::new(RefCell::new(Vec::new()));

    for file_name in ["lang-de.min.js", "lang-de.js?v=3"] {
        let status = loader
            .load(file_name, counting_callback(&calls))
            .expect("locale code present");
        assert_eq!(status.locale(), "de");
        assert_eq!(loader.inner().pending.len(), 1);

        loader.inner_mut().finish_next(&[(SWITCH_KEY, "Host-Text")]);
        assert_eq!(status.state(), LoadState::HostNotified);
    }
    assert_eq!(
        *calls.borrow(),
        vec![Some(SWITCH_DE.to_string()), Some(SWITCH_DE.to_string())]
    );
}

#[test]
fn json_overlays_compose_with_builtin_entries() {
    let french = LocaleOverlay::from_json_str("fr", r#"{"left": "gauche", "right": "droite"}"#)
        .expect("flat json overlay");
    let extension = Extension::from_parts(
        ExtensionConfig::default(),
        vec![],
        ftrobo_core::label::catalog::builtin_label_parts(
            "$ftrobo",
            &ftrobo_core::IconResource::new("ftrobo"),
        ),
        vec![french],
    )
    .expect("extension with french overlay");
    let mut loader = extension.locale_loader(FakeHostLoader::default());
    let calls = Rc::new(RefCell::new(Vec::new()));

    loader
        .load("locale/lang-fr.js", counting_callback(&calls))
        .expect("valid file name");
    loader.inner_mut().finish_next(&[("left", "à gauche")]);

    let dictionary = &loader.inner().dictionaries["fr"];
    assert_eq!(dictionary.get("left").map(String::as_str), Some("gauche"));
    assert_eq!(dictionary.get("right").map(String::as_str), Some("droite"));
    assert_eq!(calls.borrow().len(), 1);
}
