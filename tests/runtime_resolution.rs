//! End-to-end behavior of discovery, application and reconciliation.

use runtime_resolver::runtime::discovery::DEFAULT_ENV_VARS;
use runtime_resolver::runtime::{
    discover, EnvVars, LaunchOptions, PersistMode, ReconcileAction, ReconcileError,
};
use runtime_resolver::store::{StoreError, StoredDocument};
use serde_json::json;

mod common;

use common::{isolated_context, LoadBehavior, SpyStore};

const KEY: &str = "content/config/process/runtime.json";

fn driver_document(environment: &str) -> StoredDocument {
    StoredDocument::Raw(json!({
        "filepath": KEY,
        "config": { "process": { "environment": environment } },
        "_id": "TESTVALIDID",
        "meta": {
            "revision": 0,
            "created": 1494338785207u64,
            "version": 0,
            "updated": 1494340295729u64
        },
        "$loki": 1
    }))
}

#[test]
fn test_discovery_precedence() {
    let vars = EnvVars::fixed([("NODE_ENV", "nodetest"), ("ENV", "test")]);

    let flag = LaunchOptions::with_environment("development");
    assert_eq!(discover(Some(&flag), &vars, &DEFAULT_ENV_VARS).as_deref(), Some("development"));

    let positional = LaunchOptions::with_positional(["development"]);
    assert_eq!(discover(Some(&positional), &vars, &DEFAULT_ENV_VARS).as_deref(), Some("development"));

    let several = LaunchOptions::with_positional(["only", "if", "one", "argv"]);
    assert_eq!(discover(Some(&several), &vars, &DEFAULT_ENV_VARS).as_deref(), Some("nodetest"));

    let env_only = EnvVars::fixed([("ENV", "test")]);
    assert_eq!(discover(None, &env_only, &DEFAULT_ENV_VARS).as_deref(), Some("test"));
}

#[tokio::test]
async fn test_set_app_running_env_triggers_only_requested_operation() {
    let store = SpyStore::new(LoadBehavior::Returns(None));
    let mut ctx = isolated_context(store.clone());

    assert!(ctx.set_app_running_env("testenv", None).is_none());
    assert_eq!(ctx.runtime(), Some("testenv"));

    ctx.set_app_running_env("testenv1", Some(PersistMode::Update))
        .unwrap()
        .confirm()
        .await
        .unwrap();
    assert_eq!((store.creates(), store.updates()), (0, 1));

    ctx.set_app_running_env("testenv1", Some(PersistMode::Create))
        .unwrap()
        .confirm()
        .await
        .unwrap();
    assert_eq!((store.creates(), store.updates()), (1, 1));
    assert_eq!(store.loads(), 0);
}

#[tokio::test]
async fn test_driver_document_is_normalized_once_and_updated() {
    let store = SpyStore::new(LoadBehavior::Returns(Some(driver_document("dev"))));
    let mut ctx = isolated_context(store.clone()).with_options(LaunchOptions::with_environment("test"));

    let outcome = ctx.config_runtime_environment().await.unwrap();
    assert_eq!(outcome.action, ReconcileAction::Updated { previous: Some("dev".into()) });
    outcome.pending.unwrap().confirm().await.unwrap();

    assert_eq!(store.loads(), 1);
    assert_eq!(store.updates(), 1);
    let written = store.last_written().unwrap();
    assert_eq!(written.id, "TESTVALIDID");
    assert_eq!(written.environment(), Some("test"));
    assert_eq!(ctx.runtime(), Some("test"));
    assert_eq!(ctx.record().map(|r| r.meta.revision), Some(1));
}

#[tokio::test]
async fn test_missing_record_without_override_resolves() {
    let store = SpyStore::new(LoadBehavior::Returns(None));
    let mut ctx = isolated_context(store.clone());

    let outcome = ctx.config_runtime_environment().await.unwrap();
    assert_eq!(outcome.action, ReconcileAction::Created);
    outcome.pending.unwrap().confirm().await.unwrap();

    assert_eq!(store.creates(), 1);
    assert_eq!(ctx.runtime(), Some("development"));
}

#[tokio::test]
async fn test_matching_record_is_not_rewritten() {
    let store = SpyStore::new(LoadBehavior::Returns(Some(driver_document("dev"))));
    let mut ctx = isolated_context(store.clone()).with_options(LaunchOptions::with_positional(["dev"]));

    let outcome = ctx.config_runtime_environment().await.unwrap();
    assert_eq!(outcome.action, ReconcileAction::Unchanged);
    assert_eq!((store.creates(), store.updates()), (0, 0));
    assert_eq!(ctx.runtime(), Some("dev"));
}

#[tokio::test]
async fn test_load_failure_rejects_with_error() {
    let store = SpyStore::new(LoadBehavior::Fails("Error On this.configuration.load"));
    let mut ctx = isolated_context(store.clone());

    let future = ctx.config_runtime_environment();
    let err = future.await.unwrap_err();

    let ReconcileError::Load { source, .. } = &err;
    assert!(matches!(source, StoreError::Unavailable(msg) if msg.contains("configuration.load")));
    assert_eq!(store.loads(), 1);
    assert_eq!((store.creates(), store.updates()), (0, 0));
}
