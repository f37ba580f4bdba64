use vex_core::manifest::{AndroidConfig, KotlinConfig, Manifest};

fn full_manifest() -> Manifest {
    Manifest {
        version: "3.1.4".to_string(),
        license: "MIT".to_string(),
        homepage: "https://example.com/ocr".to_string(),
        desugar_enabled: true,
        assets: vec!["models/eng.traineddata".to_string()],
        authors: vec!["Jane Doe <jane@example.com>".to_string()],
        runtime_dependencies: vec!["com.example:ocr-core:2.0.1".to_string()],
        android: AndroidConfig {
            compile_sdk: 34,
            min_sdk: 24,
        },
        kotlin: KotlinConfig {
            enabled: true,
            version: "2.0.21".to_string(),
        },
    }
}

#[test]
fn test_roundtrip_full_manifest() {
    let manifest = full_manifest();
    let text = manifest.to_yaml().unwrap();
    let reloaded = Manifest::parse(&text).unwrap();
    assert_eq!(reloaded, manifest);
}

#[test]
fn test_roundtrip_defaulted_manifest() {
    let manifest = Manifest {
        version: "1.0".to_string(),
        license: String::new(),
        homepage: String::new(),
        desugar_enabled: false,
        assets: Vec::new(),
        authors: Vec::new(),
        runtime_dependencies: Vec::new(),
        android: AndroidConfig::default(),
        kotlin: KotlinConfig::new(false),
    };
    let text = manifest.to_yaml().unwrap();
    let reloaded = Manifest::parse(&text).unwrap();
    assert_eq!(reloaded, manifest);
}

#[test]
fn test_serialized_text_uses_external_spellings() {
    let text = full_manifest().to_yaml().unwrap();
    assert!(text.contains("desugar:"), "got: {text}");
    assert!(text.contains("runtime_deps:"), "got: {text}");
    assert!(text.contains("enable:"), "got: {text}");
    assert!(!text.contains("desugar_enabled"), "got: {text}");
    assert!(!text.contains("runtime_dependencies"), "got: {text}");
}

#[test]
fn test_roundtrip_is_stable() {
    let manifest = full_manifest();
    let once = manifest.to_yaml().unwrap();
    let twice = Manifest::parse(&once).unwrap().to_yaml().unwrap();
    assert_eq!(once, twice);
}
