//! End-to-end resolution scenarios.

use std::collections::BTreeMap;

use serde_json::json;

use auto_externals::catalog::{Catalog, Environment};
use auto_externals::config::ExternalsOptions;
use auto_externals::core::ExternalsError;
use auto_externals::resolver::{ExternalsPipeline, ManifestOracle, MetadataOracle};

struct NoOracle;

impl MetadataOracle for NoOracle {
    fn version_range(&self, _key: &str) -> Option<String> {
        None
    }
}

fn feed(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|e| (*e).to_string()).collect()
}

fn options(packages: serde_json::Value) -> ExternalsOptions {
    ExternalsOptions {
        packages,
        ..Default::default()
    }
}

/// The minimal two-library catalog used throughout the spec scenarios.
fn react_catalog() -> Catalog {
    Catalog::from_toml_str(
        r#"
        [libraries.react]
        global = "React"
        scripts = { production = ["react@{{version}}.js"] }

        [libraries.react-dom]
        global = "ReactDOM"
        dependencies = ["react"]
        scripts = { production = ["react-dom@{{version}}.js"] }
        "#,
    )
    .unwrap()
}

#[test]
fn dependency_first_order_with_rendered_urls() {
    crate::init_test_logging();
    let pipeline = ExternalsPipeline::new(react_catalog(), Environment::Production);
    let entries = pipeline
        .resolve(
            &options(json!(["react-dom", "react"])),
            &feed(&["react@16.8.0", "react-dom@16.8.0"]),
            &NoOracle,
        )
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].key, "react");
    assert_eq!(entries[0].scripts, ["react@16.8.0.js"]);
    assert_eq!(entries[1].key, "react-dom");
    assert_eq!(entries[1].scripts, ["react-dom@16.8.0.js"]);
}

#[test]
fn missing_dependency_declaration_names_both_keys() {
    let pipeline = ExternalsPipeline::new(react_catalog(), Environment::Production);
    let err = pipeline
        .resolve(&options(json!(["react-dom"])), &feed(&["react-dom@16.8.0"]), &NoOracle)
        .unwrap_err();

    match err.downcast_ref::<ExternalsError>() {
        Some(ExternalsError::MissingDependencyDeclaration {
            key,
            dependency,
        }) => {
            assert_eq!(key, "react-dom");
            assert_eq!(dependency, "react");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_key_fails_before_version_resolution() {
    let pipeline = ExternalsPipeline::new(react_catalog(), Environment::Production);
    // The empty feed and oracle would make version resolution fail too; the
    // validator must win.
    let err =
        pipeline.resolve(&options(json!(["jquery"])), &[], &NoOracle).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ExternalsError>(),
        Some(ExternalsError::UnsupportedDependency { key }) if key == "jquery"
    ));
}

#[test]
fn key_in_both_packages_and_externals_is_a_conflict() {
    let pipeline = ExternalsPipeline::new(react_catalog(), Environment::Production);
    let mut externals = serde_json::Map::new();
    externals.insert("react".to_string(), json!("React"));
    let opts = ExternalsOptions {
        packages: json!(["react"]),
        externals,
        ..Default::default()
    };

    let err = pipeline.resolve(&opts, &feed(&["react@16.8.0"]), &NoOracle).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ExternalsError>(),
        Some(ExternalsError::ConflictingConfiguration { key }) if key == "react"
    ));
}

#[test]
fn feed_entries_are_parsed_up_to_the_first_whitespace() {
    let pipeline = ExternalsPipeline::new(react_catalog(), Environment::Production);
    let entries = pipeline
        .resolve(
            &options(json!(["react"])),
            &feed(&["react@16.8.0 (other info)"]),
            &NoOracle,
        )
        .unwrap();
    assert_eq!(entries[0].scripts, ["react@16.8.0.js"]);
}

#[test]
fn all_known_keys_sentinel_resolves_the_whole_catalog() {
    crate::init_test_logging();
    let pipeline = ExternalsPipeline::new(Catalog::builtin(), Environment::Production);
    let oracle = ManifestOracle::from_json_str(
        r#"{
            "dependencies": {
                "antd": "^3.26.0",
                "moment": "^2.24.0",
                "react": "^16.8.0",
                "react-dom": "^16.8.0",
                "react-redux": "^7.1.0",
                "redux": "^4.0.4",
                "vue": "^2.6.10"
            }
        }"#,
    )
    .unwrap();

    let entries = pipeline.resolve(&options(json!(true)), &[], &oracle).unwrap();
    assert_eq!(entries.len(), pipeline.catalog().len());

    // Every library appears after all of its dependencies
    let position = |key: &str| entries.iter().position(|e| e.key == key).unwrap();
    assert!(position("react") < position("react-dom"));
    assert!(position("react-dom") < position("antd"));
    assert!(position("moment") < position("antd"));
    assert!(position("redux") < position("react-redux"));
}

#[test]
fn url_template_prefixes_every_rendered_reference() {
    let pipeline = ExternalsPipeline::new(react_catalog(), Environment::Production);
    let opts = ExternalsOptions {
        packages: json!(["react"]),
        url_template: Some("https://unpkg.com/{{ path }}".to_string()),
        ..Default::default()
    };
    let entries = pipeline.resolve(&opts, &feed(&["react@16.8.0"]), &NoOracle).unwrap();
    assert_eq!(entries[0].scripts, ["https://unpkg.com/react@16.8.0.js"]);
}

#[test]
fn development_flag_selects_development_urls() {
    let pipeline = ExternalsPipeline::new(
        Catalog::builtin(),
        Environment::from_dev_flag(true),
    );
    let entries = pipeline
        .resolve(&options(json!(["react"])), &feed(&["react@16.8.0"]), &NoOracle)
        .unwrap();
    assert_eq!(entries[0].scripts, ["react@16.8.0/umd/react.development.js"]);
}

#[test]
fn polyfills_and_styles_flow_into_the_entry() {
    let pipeline = ExternalsPipeline::new(Catalog::builtin(), Environment::Production);
    let oracle = ManifestOracle::from_json_str(
        r#"{
            "dependencies": {
                "antd": "3.26.0",
                "moment": "2.24.0",
                "react": "16.8.0",
                "react-dom": "16.8.0"
            }
        }"#,
    )
    .unwrap();

    let entries = pipeline
        .resolve(&options(json!(["react", "react-dom", "moment", "antd"])), &[], &oracle)
        .unwrap();

    let antd = entries.iter().find(|e| e.key == "antd").unwrap();
    // Polyfill first, then the library script
    assert_eq!(
        antd.scripts,
        [
            "es6-promise@4.2.8/dist/es6-promise.auto.min.js",
            "antd@3.26.0/dist/antd.min.js"
        ]
    );
    assert_eq!(antd.styles, ["antd@3.26.0/dist/antd.min.css"]);
    assert!(antd.polyfill_exclude.contains("es6-promise"));
}

#[test]
fn unknown_placeholders_survive_end_to_end() {
    let catalog = Catalog::from_toml_str(
        r#"
        [libraries.widget]
        global = "Widget"
        scripts = { production = ["widget@{{ version }}/{{ build_id }}.js"] }
        "#,
    )
    .unwrap();
    let pipeline = ExternalsPipeline::new(catalog, Environment::Production);
    let entries = pipeline
        .resolve(&options(json!(["widget"])), &feed(&["widget@1.2.3"]), &NoOracle)
        .unwrap();
    assert_eq!(entries[0].scripts, ["widget@1.2.3/{{ build_id }}.js"]);
}

#[test]
fn malformed_packages_value_is_a_configuration_type_error() {
    let pipeline = ExternalsPipeline::new(react_catalog(), Environment::Production);
    let err = pipeline
        .resolve(&options(json!("react")), &feed(&["react@16.8.0"]), &NoOracle)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ExternalsError>(),
        Some(ExternalsError::ConfigurationType { .. })
    ));
}

#[test]
fn resolution_is_repeatable_across_calls() {
    let pipeline = ExternalsPipeline::new(react_catalog(), Environment::Production);
    let opts = options(json!(["react-dom", "react"]));
    let versions: BTreeMap<String, String> = [
        ("react".to_string(), "16.8.0".to_string()),
        ("react-dom".to_string(), "16.8.0".to_string()),
    ]
    .into_iter()
    .collect();

    let first = pipeline
        .resolve(&opts, &feed(&["react@16.8.0", "react-dom@16.8.0"]), &NoOracle)
        .unwrap();
    let second = pipeline
        .resolve(&opts, &feed(&["react@16.8.0", "react-dom@16.8.0"]), &NoOracle)
        .unwrap();
    assert_eq!(first, second);
    for entry in &first {
        assert_eq!(entry.scripts, [format!("{}@{}.js", entry.key, versions[&entry.key])]);
    }
}
