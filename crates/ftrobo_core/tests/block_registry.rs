use ftrobo_core::{
    not_implemented, BlockCall, BlockDescriptor, BlockError, BlockImplementation, BlockKind,
    BlockRegistry, Category, Extension, ExtensionConfig,
};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

fn command(id: &str, category: Category) -> BlockDescriptor {
    BlockDescriptor::new(id, BlockKind::Command, category, "noop", not_implemented())
}

fn arb_category() -> impl Strategy<Value = Category> {
    proptest::sample::select(Category::ALL.to_vec())
}

#[test]
fn set_output_renders_namespaced_selector_with_marker() {
    let extension = Extension::initialize(ExtensionConfig::default()).expect("builtin extension");
    let spec = extension
        .blocks()
        .render_spec("SetOutput")
        .expect("SetOutput is registered");

    assert_eq!(spec.selector, "ftroboSetOutput");
    assert!(spec.spec_template.starts_with("$ftrobo "));
    assert_eq!(spec.kind, BlockKind::Command);
    assert_eq!(spec.category, Category::Motion);
}

#[test]
fn custom_namespace_applies_everywhere() {
    let config = ExtensionConfig {
        short_name: "txt".to_string(),
        marker_prefix: "$txt".to_string(),
        ..ExtensionConfig::default()
    };
    let extension = Extension::initialize(config).expect("custom namespace extension");

    let spec = extension
        .blocks()
        .render_spec("SwitchOn")
        .expect("SwitchOn is registered");
    assert_eq!(spec.selector, "txtSwitchOn");
    assert_eq!(spec.spec_template, "$txt switch %ftroboInput is on?");

    let mut sink: BTreeMap<String, BlockImplementation> = BTreeMap::new();
    extension.bind_implementations(&mut sink);
    assert!(sink.keys().all(|selector| selector.starts_with("txt")));

    let german = extension.overlays().get("de").expect("german overlay");
    assert!(german.get("$txt switch %ftroboInput is on?").is_some());
}

#[test]
fn builtin_implementations_are_stubs() {
    let extension = Extension::initialize(ExtensionConfig::default()).expect("builtin extension");
    let mut sink: BTreeMap<String, BlockImplementation> = BTreeMap::new();
    extension.bind_implementations(&mut sink);

    assert_eq!(sink.len(), extension.blocks().len());
    let switch_on = sink.get("ftroboSwitchOn").expect("SwitchOn is bound");
    let err = switch_on(BlockCall {
        selector: "ftroboSwitchOn",
        args: &[],
    })
    .expect_err("device control is not implemented");
    assert_eq!(err, BlockError::NotImplemented("ftroboSwitchOn".to_string()));
}

proptest! {
    #[test]
    fn namespaced_id_is_injective(ids in proptest::collection::btree_set("[A-Za-z0-9_]{1,12}", 1..40)) {
        let registry = BlockRegistry::default();
        let namespaced: BTreeSet<String> = ids.iter().map(|id| registry.namespaced_id(id)).collect();
        prop_assert_eq!(namespaced.len(), ids.len());
    }

    #[test]
    fn contributions_keep_registration_order_and_drop_hidden(
        entries in proptest::collection::vec(("[A-Z][a-z]{0,6}[0-9]{0,2}", arb_category(), any::<bool>()), 1..30)
    ) {
        let mut registry = BlockRegistry::default();
        let mut registered = Vec::new();
        let mut hidden = BTreeSet::new();
        for (id, palette, is_hidden) in entries {
            if registry.register(command(&id, palette)).is_ok() {
                if is_hidden {
                    hidden.insert(registry.namespaced_id(&id));
                }
                registered.push((registry.namespaced_id(&id), palette));
            }
        }

        for palette in Category::ALL {
            let expected: Vec<String> = registered
                .iter()
                .filter(|(selector, candidate)| *candidate == palette && !hidden.contains(selector))
                .map(|(selector, _)| selector.clone())
                .collect();
            let actual: Vec<String> = registry
                .contributions_for(palette, |selector| hidden.contains(selector))
                .into_iter()
                .map(|spec| spec.selector)
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn binding_twice_equals_binding_once(ids in proptest::collection::btree_set("[A-Za-z]{1,10}", 0..20)) {
        let mut registry = BlockRegistry::default();
        for id in &ids {
            registry.register(command(id, Category::Motion)).expect("unique ids register");
        }

        let mut once: BTreeMap<String, BlockImplementation> = BTreeMap::new();
        registry.bind_implementations(&mut once);
        let mut twice: BTreeMap<String, BlockImplementation> = BTreeMap::new();
        registry.bind_implementations(&mut twice);
        registry.bind_implementations(&mut twice);

        prop_assert_eq!(once.len(), twice.len());
        for (selector, implementation) in &once {
            let other = twice.get(selector).expect("same selectors are bound");
            prop_assert!(Arc::ptr_eq(implementation, other));
        }
    }
}
