mod common;

use common::{hit, release, setup_mods_dir, write_jar, write_mod_jar, MockProvider};
use mod_scout_lib::core::provider::ProviderRegistry;
use mod_scout_lib::core::scanner::InventoryScanner;
use mod_scout_lib::models::config::UpdateConfig;
use mod_scout_lib::models::error::SError;
use mod_scout_lib::models::host::HostMod;
use mod_scout_lib::models::mod_dto::InstalledMod;
use mod_scout_lib::models::resolution::ResolutionOutcome;
use mod_scout_lib::models::state::ModState;
use mod_scout_lib::ModManager;
use std::sync::Arc;
use std::time::Duration;

fn catalog() -> MockProvider {
    MockProvider::new("Modrinth")
        .with_hit(hit("sodium", "sodium", "Sodium"))
        .with_hit(hit("lithium", "lithium", "Lithium"))
        .with_hit(hit("phosphor", "phosphor", "Phosphor"))
        .with_versions("sodium", vec![release("0.4.0")])
        .with_versions("lithium", vec![release("0.7.0")])
        .with_versions("phosphor", vec![release("0.8.0")])
}

fn manager_with(provider: MockProvider, config: UpdateConfig) -> ModManager {
    let mut providers = ProviderRegistry::new();
    providers.register(Arc::new(provider));
    ModManager::new(config, providers)
}

fn installed() -> Vec<InstalledMod> {
    vec![
        InstalledMod::new("sodium", "Sodium", "0.3.2+1.17"),
        InstalledMod::new("lithium", "Lithium", "0.7.0"),
        InstalledMod::new("ghost", "Ghost Mod", "1.0.0"),
    ]
}

#[tokio::test]
async fn pass_reports_every_mod_in_order() {
    let manager = manager_with(catalog(), UpdateConfig::default());

    let report = manager.check_updates(installed()).await;

    let ids: Vec<&str> = report.outcomes.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, ["sodium", "lithium", "ghost"]);
    assert_eq!(report.updates(), 1);
    assert_eq!(report.up_to_date(), 1);
    assert_eq!(report.unresolved(), 1);

    assert_eq!(manager.mod_state("sodium"), ModState::Outdated);
    assert_eq!(manager.mod_state("lithium"), ModState::Installed);
    assert_eq!(manager.mod_state("ghost"), ModState::Unknown);
    assert_eq!(manager.mod_state("never-seen"), ModState::Downloadable);
}

#[tokio::test]
async fn pending_updates_are_replaced_each_pass() {
    let manager = manager_with(catalog(), UpdateConfig::default());

    manager.check_updates(installed()).await;
    let update = manager.update_for("sodium").expect("sodium should be outdated");
    assert_eq!(update.version.version, "0.4.0");
    assert_eq!(manager.updates().len(), 1);

    manager
        .check_updates(vec![InstalledMod::new("sodium", "Sodium", "0.4.0")])
        .await;
    assert!(manager.update_for("sodium").is_none());
    assert!(manager.updates().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_mod_does_not_hold_up_the_others() {
    let provider = catalog().with_delay("phosphor", Duration::from_secs(60));
    let config = UpdateConfig {
        request_timeout_secs: 1,
        ..Default::default()
    };
    let manager = manager_with(provider, config);
    let mut mods = installed();
    mods.push(InstalledMod::new("phosphor", "Phosphor", "0.7.0"));

    let report = tokio::time::timeout(Duration::from_secs(20), manager.check_updates(mods))
        .await
        .expect("pass should finish once the slow call times out");

    assert!(matches!(
        report.outcome("phosphor"),
        Some(ResolutionOutcome::Unresolved(SError::Timeout(_)))
    ));
    assert!(report.outcome("sodium").unwrap().is_update());
    assert_eq!(manager.mod_state("phosphor"), ModState::Unknown);
}

#[tokio::test]
async fn single_permit_still_checks_everything() {
    let config = UpdateConfig {
        max_concurrent_checks: 1,
        ..Default::default()
    };
    let manager = manager_with(catalog(), config);

    let report = manager.check_updates(installed()).await;

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(manager.states().len(), 3);
}

#[tokio::test]
async fn unregistered_default_provider_leaves_mods_unknown() {
    let config = UpdateConfig {
        default_provider: "curseforge".into(),
        ..Default::default()
    };
    let manager = manager_with(catalog(), config);

    let report = manager.check_updates(installed()).await;

    assert_eq!(report.unresolved(), 3);
    assert!(manager.selected_provider().is_none());
    assert!(matches!(
        manager.search("sodium", 0, 10).await,
        Err(SError::ProviderUnknown(_))
    ));
}

#[tokio::test]
async fn search_goes_through_selected_provider() {
    let manager = manager_with(catalog(), UpdateConfig::default());

    let hits = manager.search("anything", 0, 10).await.unwrap();

    assert_eq!(hits.len(), 3);
    assert_eq!(manager.selected_provider().unwrap().name(), "Modrinth");
}

#[tokio::test]
async fn inventory_pass_skips_mods_without_archives() {
    let (_tmp, mods_dir) = setup_mods_dir();
    write_mod_jar(&mods_dir, "sodium", "0.3.2+1.17");
    write_jar(
        &mods_dir,
        "lithium.jar",
        r#"{"id":"lithium","name":"Lithium","version":"0.7.0","custom":{"modmanager":{"modrinth":"lithium"}}}"#,
    );
    let host: Vec<HostMod> = [
        r#"{"id":"sodium","name":"Sodium","version":"0.3.2+1.17"}"#,
        r#"{"id":"lithium","name":"Lithium","version":"0.7.0","custom":{"modmanager":{"modrinth":"lithium"}}}"#,
        r#"{"id":"minecraft","name":"Minecraft","version":"1.17.1"}"#,
        r#"{"id":"phosphor","name":"Phosphor","version":"0.7.0"}"#,
    ]
    .iter()
    .map(|j| serde_json::from_str(j).unwrap())
    .collect();
    let manager = manager_with(catalog(), UpdateConfig::default());

    let report = manager
        .check_inventory(&InventoryScanner::new(mods_dir), &host)
        .await
        .unwrap();

    let ids: Vec<&str> = report.outcomes.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, ["sodium", "lithium"]);
    assert_eq!(manager.mod_state("phosphor"), ModState::Downloadable);
}
