//! Tests for the plugin entry point: metric caching and rule definition

use std::sync::Arc;

use pretty_assertions::assert_eq;
use sonargraph_catalog::keys::PLUGIN_KEY;
use sonargraph_catalog::supplementary::SUPPLEMENTARY_METRICS;
use sonargraph_catalog::{
    DEFAULT_METADATA_PATH, InMemoryRulesContext, METADATA_PATH_KEY, MapSettings, Metrics,
    PluginSettings, RulesDefinition, Severity, SonargraphRulesRepository,
};
use sonargraph_meta::{
    ExportLoader, ExportMetadata, IssueCategory, LEVEL_MODULE, LEVEL_SYSTEM, MetricId,
};
use sonargraph_test_utils::{CountingLoader, MetadataDir};

fn default_metadata() -> ExportMetadata {
    ExportMetadata::builder()
        .metric(LEVEL_SYSTEM, MetricId::new("CoreSourceElementCount", "Source Elements"))
        .metric(LEVEL_MODULE, MetricId::new("Cycles", "Cyclic Elements").float())
        .category(IssueCategory::new("ArchitectureViolation", "Architecture Violation"))
        .category(IssueCategory::new("CycleGroup", "Cycle Group"))
        .build()
}

fn directory_metadata() -> ExportMetadata {
    ExportMetadata::builder()
        .metric(LEVEL_SYSTEM, MetricId::new("ScriptTodoCount", "Todo Count"))
        .category(IssueCategory::new("ScriptBased", "Script Based Issue"))
        .build()
}

fn counting_repository(
    settings: Arc<MapSettings>,
) -> SonargraphRulesRepository<Arc<MapSettings>, CountingLoader> {
    let loader =
        CountingLoader::new(default_metadata()).with_directory_metadata(directory_metadata());
    SonargraphRulesRepository::new(settings, loader)
}

#[test]
fn test_unchanged_setting_uses_cache() {
    let settings = Arc::new(MapSettings::new());
    let repository = counting_repository(Arc::clone(&settings));

    let first = repository.metrics();
    let second = repository.metrics();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(repository.resolver().loader().total_loads(), 1);
    assert_eq!(first.len(), 2 + SUPPLEMENTARY_METRICS.len());
}

#[test]
fn test_unchanged_directory_setting_uses_cache() {
    let dir = MetadataDir::new();
    dir.write("export.toml", "");
    let settings = Arc::new(MapSettings::with_metadata_path(dir.path_setting()));
    let repository = counting_repository(Arc::clone(&settings));

    repository.metrics();
    repository.metrics();

    assert_eq!(repository.resolver().loader().merges(), 1);
    assert_eq!(repository.cache().active_path(), Some(dir.path_setting()));
}

#[test]
fn test_new_path_triggers_one_reload() {
    let dir = MetadataDir::new();
    dir.write("export.toml", "");
    let settings = Arc::new(MapSettings::new());
    let repository = counting_repository(Arc::clone(&settings));

    let default_metrics = repository.metrics();
    assert_eq!(
        repository.cache().active_path().as_deref(),
        Some(DEFAULT_METADATA_PATH)
    );

    settings.set(METADATA_PATH_KEY, dir.path_setting());
    let directory_metrics = repository.metrics();
    repository.metrics();

    let loader = repository.resolver().loader();
    assert_eq!(loader.single_loads(), 1);
    assert_eq!(loader.merges(), 1);
    assert!(!Arc::ptr_eq(&default_metrics, &directory_metrics));
    assert_eq!(directory_metrics[0].key, "sg_i.ScriptTodoCount");
    assert_eq!(repository.cache().active_path(), Some(dir.path_setting()));
}

#[test]
fn test_blank_setting_after_default_load_does_not_reload() {
    let settings = Arc::new(MapSettings::new());
    let repository = counting_repository(Arc::clone(&settings));

    repository.metrics();
    settings.set(METADATA_PATH_KEY, "   ");
    repository.metrics();
    settings.set(METADATA_PATH_KEY, "");
    repository.metrics();

    assert_eq!(repository.resolver().loader().total_loads(), 1);
}

#[test]
fn test_unset_setting_after_directory_load_reloads_default() {
    let dir = MetadataDir::new();
    dir.write("export.toml", "");
    let settings = Arc::new(MapSettings::with_metadata_path(dir.path_setting()));
    let repository = counting_repository(Arc::clone(&settings));

    repository.metrics();
    settings.remove(METADATA_PATH_KEY);
    let metrics = repository.metrics();

    assert_eq!(repository.resolver().loader().single_loads(), 1);
    assert_eq!(metrics[0].key, "sg_i.CoreSourceElementCount");
    assert_eq!(
        repository.cache().active_path().as_deref(),
        Some(DEFAULT_METADATA_PATH)
    );
}

#[test]
fn test_failing_directory_keeps_reloading_against_default() {
    // The directory does not exist, so the default is loaded and recorded as
    // active; the configured path still differs on every call.
    let dir = MetadataDir::new();
    let missing = dir.root().join("missing").to_string_lossy().into_owned();
    let settings = Arc::new(MapSettings::with_metadata_path(missing));
    let repository = counting_repository(Arc::clone(&settings));

    let first = repository.metrics();
    let second = repository.metrics();

    assert_eq!(first.len(), second.len());
    assert_eq!(repository.resolver().loader().single_loads(), 2);
}

#[test]
fn test_unavailable_default_yields_empty_catalog() {
    let settings = Arc::new(MapSettings::new());
    let repository = SonargraphRulesRepository::with_default_path(
        Arc::clone(&settings),
        CountingLoader::new(default_metadata()),
        "/not/bundled.toml",
    );

    let metrics = repository.metrics();

    assert!(metrics.is_empty());
    assert!(!repository.cache().is_populated());
    assert!(repository.loaded_metrics().is_empty());
}

#[test]
fn test_failed_change_empties_populated_cache() {
    let dir = MetadataDir::new();
    dir.write("export.toml", "");
    let settings = Arc::new(MapSettings::with_metadata_path(dir.path_setting()));
    // Merge succeeds, the default export always fails
    let loader = CountingLoader::failing().with_directory_metadata(directory_metadata());
    let repository = SonargraphRulesRepository::new(Arc::clone(&settings), loader);

    assert!(!repository.metrics().is_empty());

    settings.remove(METADATA_PATH_KEY);
    assert!(repository.metrics().is_empty());
    assert!(!repository.cache().is_populated());
    assert_eq!(repository.cache().active_path(), None);
}

#[test]
fn test_clear_loaded_metrics_forces_reload() {
    let settings = Arc::new(MapSettings::new());
    let repository = counting_repository(Arc::clone(&settings));

    repository.metrics();
    repository.clear_loaded_metrics();
    assert!(repository.loaded_metrics().is_empty());
    repository.metrics();

    assert_eq!(repository.resolver().loader().total_loads(), 2);
}

#[test]
fn test_loaded_metrics_keyed_by_metric_key() {
    let settings = Arc::new(MapSettings::new());
    let repository = counting_repository(settings);

    let metrics = repository.metrics();
    let loaded = repository.loaded_metrics();

    assert_eq!(loaded.len(), metrics.len());
    assert_eq!(loaded["sg_i.Cycles"].name, "Cyclic Elements");
    assert!(loaded.contains_key("sg_p.STRUCTURAL_DEBT_COST"));
}

#[test]
fn test_define_registers_one_rule_per_category() {
    let settings = Arc::new(MapSettings::new());
    let repository = counting_repository(settings);
    let mut context = InMemoryRulesContext::new();

    repository.define(&mut context);

    assert_eq!(context.repositories().len(), 1);
    let rules = &context.repository(PLUGIN_KEY).unwrap().rules;
    let keys: Vec<_> = rules.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["sg_r.ArchitectureViolation", "sg_r.CycleGroup"]);
    assert!(rules.iter().all(|r| r.severity == Severity::Major));
    assert!(
        rules
            .iter()
            .all(|r| r.tags == vec!["sonargraph-integration".to_string()])
    );
}

#[test]
fn test_define_uses_configured_directory() {
    let dir = MetadataDir::new();
    dir.write("export.toml", "");
    let settings = Arc::new(MapSettings::with_metadata_path(dir.path_setting()));
    let repository = counting_repository(settings);
    let mut context = InMemoryRulesContext::new();

    repository.define(&mut context);

    let rules = &context.repositories()[0].rules;
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].name, "Sonargraph Integration: Script Based Issue");
}

#[test]
fn test_define_does_not_touch_metric_cache() {
    let settings = Arc::new(MapSettings::new());
    let repository = counting_repository(settings);
    let mut context = InMemoryRulesContext::new();

    repository.define(&mut context);

    assert!(!repository.cache().is_populated());
}

#[test]
fn test_define_without_metadata_registers_nothing() {
    let repository = SonargraphRulesRepository::new(MapSettings::new(), CountingLoader::failing());
    let mut context = InMemoryRulesContext::new();

    repository.define(&mut context);

    assert!(context.repositories().is_empty());
}

#[test]
fn test_extension_points_with_bundled_export() {
    let settings = PluginSettings::default();
    let repository = SonargraphRulesRepository::new(settings, ExportLoader::new());
    let mut context = InMemoryRulesContext::new();

    let metrics = Metrics::metrics(&repository);
    RulesDefinition::define(&repository, &mut context);

    // 14 system metrics, 7 module metrics of which 2 repeat system metrics
    assert_eq!(metrics.len(), 19 + SUPPLEMENTARY_METRICS.len());
    assert_eq!(context.repository(PLUGIN_KEY).unwrap().rules.len(), 10);
}

#[test]
fn test_plugin_settings_file_drives_metadata_path() {
    let dir = MetadataDir::new();
    dir.copy_fixture("java_export.toml");
    let settings_file = MetadataDir::new();
    let settings_path = settings_file.write(
        "settings.toml",
        &format!("[metadata]\npath = {:?}\n", dir.path_setting()),
    );
    let settings = PluginSettings::from_file(&settings_path).unwrap();
    let repository = SonargraphRulesRepository::new(settings, ExportLoader::new());

    let metrics = repository.metrics();

    // CoreSourceElementCount, CoreNccd and CoreMaxComplexity
    assert_eq!(metrics.len(), 3 + SUPPLEMENTARY_METRICS.len());
    assert_eq!(repository.cache().active_path(), Some(dir.path_setting()));
}

#[test]
fn test_concurrent_first_access_loads_once() {
    let settings = Arc::new(MapSettings::new());
    let repository = counting_repository(settings);

    let catalogs: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| repository.metrics())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(repository.resolver().loader().total_loads(), 1);
    assert!(catalogs.iter().all(|c| Arc::ptr_eq(c, &catalogs[0])));
}
