//! Integration tests for the load lifecycle state machine.

mod helpers;

use helpers::{ScriptedPlugin, log_entries, new_log, png_resource, unknown_resource};
use previewhub_core::{LoadProgress, PreviewConfig, PreviewError, PreviewPhase};
use previewhub_plugin::hooks::definitions::HookPoint;
use previewhub_plugin::lifecycle::ErrorDisposition;
use previewhub_plugin::manager::PreviewManager;
use serde_json::json;

fn manual_manager() -> PreviewManager {
    PreviewManager::with_config(PreviewConfig { auto_load: false })
}

#[tokio::test]
async fn test_open_with_no_plugins_is_unsupported() {
    let manager = PreviewManager::new();
    let state = manager.open(unknown_resource()).await;

    assert_eq!(state.phase, PreviewPhase::Unsupported);
    assert_eq!(
        state.message.as_deref(),
        Some("No plugin found for file type: application/x-unknown")
    );
}

#[tokio::test]
async fn test_auto_load_enters_loading() {
    let manager = PreviewManager::new();
    manager
        .register_plugin(
            ScriptedPlugin::new("image")
                .with_types(&["image/*"])
                .into_arc(),
        )
        .await;

    let state = manager.open(png_resource()).await;
    assert_eq!(state.phase, PreviewPhase::Loading);
}

#[tokio::test]
async fn test_manual_load_flow_reaches_loaded() {
    let log = new_log();
    let manager = manual_manager();
    manager
        .register_plugin(
            ScriptedPlugin::new("image")
                .with_types(&["image/*"])
                .subscribed(&[
                    HookPoint::BeforeLoad,
                    HookPoint::OnLoadStart,
                    HookPoint::OnLoadSuccess,
                ])
                .logging(&log)
                .into_arc(),
        )
        .await;

    let state = manager.open(png_resource()).await;
    assert_eq!(state.phase, PreviewPhase::Idle);

    let state = manager.load().await;
    assert_eq!(state.phase, PreviewPhase::Loading);

    let session = manager.session_id().await.unwrap();
    let state = manager.finish(session).await;
    assert_eq!(state.phase, PreviewPhase::Loaded);

    assert_eq!(
        log_entries(&log),
        vec![
            "image:before_load",
            "image:on_load_start",
            "image:on_load_success"
        ]
    );
}

#[tokio::test]
async fn test_before_load_veto_keeps_session_idle() {
    let log = new_log();
    let manager = PreviewManager::new();
    manager
        .register_plugin(
            ScriptedPlugin::new("gate")
                .with_types(&["image/*"])
                .subscribed(&[
                    HookPoint::BeforeLoad,
                    HookPoint::OnLoadStart,
                    HookPoint::OnLoadSuccess,
                ])
                .veto_on(HookPoint::BeforeLoad)
                .logging(&log)
                .into_arc(),
        )
        .await;

    let state = manager.open(png_resource()).await;
    assert_eq!(state.phase, PreviewPhase::Idle);

    // Only the gate ran; the load notifications never fired.
    assert_eq!(log_entries(&log), vec!["gate:before_load"]);
}

#[tokio::test]
async fn test_load_failure_carries_error_and_message() {
    let manager = PreviewManager::new();
    manager
        .register_plugin(
            ScriptedPlugin::new("image")
                .with_types(&["image/*"])
                .into_arc(),
        )
        .await;
    manager.open(png_resource()).await;

    let session = manager.session_id().await.unwrap();
    let disposition = manager
        .fail(session, PreviewError::load("decode failed"))
        .await;

    assert_eq!(disposition, ErrorDisposition::ShowDefault);
    let state = manager.state().await;
    assert_eq!(state.phase, PreviewPhase::Error);
    assert_eq!(state.message.as_deref(), Some("decode failed"));
    assert!(state.error.is_some());
}

#[tokio::test]
async fn test_on_load_error_veto_suppresses_default_presentation() {
    let manager = PreviewManager::new();
    manager
        .register_plugin(
            ScriptedPlugin::new("image")
                .with_types(&["image/*"])
                .subscribed(&[HookPoint::OnLoadError])
                .veto_on(HookPoint::OnLoadError)
                .into_arc(),
        )
        .await;
    manager.open(png_resource()).await;

    let session = manager.session_id().await.unwrap();
    let disposition = manager
        .fail(session, PreviewError::load("decode failed"))
        .await;

    assert_eq!(disposition, ErrorDisposition::Suppressed);
    assert_eq!(manager.state().await.phase, PreviewPhase::Error);
}

#[tokio::test]
async fn test_stale_signals_are_dropped() {
    let manager = PreviewManager::new();
    manager
        .register_plugin(
            ScriptedPlugin::new("image")
                .with_types(&["image/*"])
                .into_arc(),
        )
        .await;

    manager.open(png_resource()).await;
    let old_session = manager.session_id().await.unwrap();

    // Opening again supersedes the first session.
    manager.open(png_resource()).await;
    let new_session = manager.session_id().await.unwrap();
    assert_ne!(old_session, new_session);

    let disposition = manager
        .fail(old_session, PreviewError::load("late failure"))
        .await;
    assert_eq!(disposition, ErrorDisposition::Stale);
    assert_eq!(manager.state().await.phase, PreviewPhase::Loading);

    let state = manager.finish(old_session).await;
    assert_eq!(state.phase, PreviewPhase::Loading);

    // The current session still completes normally.
    let state = manager.finish(new_session).await;
    assert_eq!(state.phase, PreviewPhase::Loaded);
}

#[tokio::test]
async fn test_reset_returns_to_idle_on_fresh_session() {
    let manager = PreviewManager::new();
    manager
        .register_plugin(
            ScriptedPlugin::new("image")
                .with_types(&["image/*"])
                .into_arc(),
        )
        .await;
    manager.open(png_resource()).await;
    let old_session = manager.session_id().await.unwrap();
    manager.finish(old_session).await;
    assert_eq!(manager.state().await.phase, PreviewPhase::Loaded);

    let state = manager.reset().await;
    assert_eq!(state.phase, PreviewPhase::Idle);
    assert_ne!(manager.session_id().await.unwrap(), old_session);
}

#[tokio::test]
async fn test_reload_discards_shared_store() {
    let manager = PreviewManager::new();
    manager
        .register_plugin(
            ScriptedPlugin::new("image")
                .with_types(&["image/*"])
                .into_arc(),
        )
        .await;
    manager.open(png_resource()).await;

    manager.set_data("zoom", json!(2.5)).await;
    assert_eq!(manager.get_data("zoom").await, Some(json!(2.5)));

    let state = manager.reload().await;
    assert_eq!(state.phase, PreviewPhase::Loading);
    // Keys from the superseded session are gone.
    assert_eq!(manager.get_data("zoom").await, None);
}

#[tokio::test]
async fn test_progress_is_forwarded_while_loading() {
    let log = new_log();
    let manager = PreviewManager::new();
    manager
        .register_plugin(
            ScriptedPlugin::new("image")
                .with_types(&["image/*"])
                .subscribed(&[HookPoint::OnLoadProgress])
                .logging(&log)
                .into_arc(),
        )
        .await;
    manager.open(png_resource()).await;

    let session = manager.session_id().await.unwrap();
    manager.progress(session, LoadProgress::new(512, 2048)).await;
    assert_eq!(log_entries(&log), vec!["image:on_load_progress"]);

    // After the load completes, progress signals are ignored.
    manager.finish(session).await;
    manager.progress(session, LoadProgress::new(2048, 2048)).await;
    assert_eq!(log_entries(&log), vec!["image:on_load_progress"]);
}

#[tokio::test]
async fn test_render_producers_come_from_resolved_plugin_only() {
    let manager = PreviewManager::new();
    manager
        .register_plugin(
            ScriptedPlugin::new("image")
                .with_types(&["image/*"])
                .with_priority(10)
                .rendering()
                .into_arc(),
        )
        .await;
    manager
        .register_plugin(
            ScriptedPlugin::new("watermark")
                .with_types(&["*/*"])
                .with_priority(-1)
                .rendering()
                .into_arc(),
        )
        .await;
    manager.open(png_resource()).await;

    let content = manager.render().await.unwrap();
    assert_eq!(content.plugin, "image");
    let toolbar = manager.render_toolbar().await.unwrap();
    assert_eq!(toolbar.plugin, "image");

    // Overlays fan out across every registered plugin.
    let overlays = manager.render_overlays().await;
    let producers: Vec<&str> = overlays.iter().map(|f| f.plugin.as_str()).collect();
    assert_eq!(producers, vec!["image", "watermark"]);
}

#[tokio::test]
async fn test_mount_and_unmount_fan_out() {
    let log = new_log();
    let manager = manual_manager();
    manager
        .register_plugin(
            ScriptedPlugin::new("image")
                .with_types(&["image/*"])
                .subscribed(&[HookPoint::OnMount, HookPoint::OnUnmount])
                .logging(&log)
                .into_arc(),
        )
        .await;
    manager.open(png_resource()).await;

    manager.mount().await;
    manager.unmount().await;
    assert_eq!(log_entries(&log), vec!["image:on_mount", "image:on_unmount"]);
}
