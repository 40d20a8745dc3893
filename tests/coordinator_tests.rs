//! Settings coordinator behavior against real files.

use keyboard_settings::coordinator::{AppContext, ApplyMode, Flow, SettingsCoordinator};
use keyboard_settings::launcher::RecordingLauncher;
use keyboard_settings::store::{ConfigStore, FileConfigStore};
use keyboard_settings::SettingsError;
use std::fs;

mod fixtures;
use fixtures::*;

fn context(env: &KeymapEnv) -> AppContext<FileConfigStore, RecordingLauncher> {
    AppContext::new(
        env.paths(),
        FileConfigStore::new(&env.store_dir),
        RecordingLauncher::new(),
    )
}

#[test]
fn test_sorted_listing_and_selected_index() {
    let env = KeymapEnv::standard();
    let ctx = context(&env);

    let coordinator = SettingsCoordinator::initialize(&ctx).unwrap();

    assert_eq!(coordinator.keymaps(), ["de", "fr", "us"]);
    assert_eq!(coordinator.selected(), Some(2));
    assert_eq!(coordinator.current_keymap(), "us");
}

#[test]
fn test_current_keymap_matched_ignoring_case() {
    let env = KeymapEnv::new(r#"{"keymap":"US"}"#, &["us.json", "de.json"]);
    let coordinator = SettingsCoordinator::initialize(&context(&env)).unwrap();
    assert_eq!(coordinator.selected_keymap(), Some("us"));
}

#[test]
fn test_unlisted_current_keymap_is_fatal() {
    let env = KeymapEnv::new(r#"{"keymap":"it"}"#, &["us.json", "de.json"]);
    let err = SettingsCoordinator::initialize(&context(&env)).unwrap_err();
    assert!(matches!(err, SettingsError::CurrentKeymapNotListed { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_malformed_status_is_fatal() {
    let env = KeymapEnv::new("not json", &["us.json"]);
    let err = SettingsCoordinator::initialize(&context(&env)).unwrap_err();
    assert!(err.is_fatal());

    fs::remove_file(&env.status_file).unwrap();
    let err = SettingsCoordinator::initialize(&context(&env)).unwrap_err();
    assert!(matches!(err, SettingsError::StatusUnreadable { .. }));
}

#[test]
fn test_unlistable_directory_is_not_fatal() {
    let env = KeymapEnv::standard();
    fs::remove_dir_all(&env.keymaps_dir).unwrap();
    let err = SettingsCoordinator::initialize(&context(&env)).unwrap_err();
    assert!(matches!(err, SettingsError::KeymapDirUnreadable { .. }));
    assert!(!err.is_fatal());
}

#[test]
fn test_cleared_selection_blocks_apply() {
    let env = KeymapEnv::standard();
    let ctx = context(&env);
    let mut coordinator = SettingsCoordinator::initialize(&ctx).unwrap();

    coordinator.clear_selection();
    coordinator.toggle_num_lock();
    let err = coordinator.apply(&ctx, ApplyMode::Apply).unwrap_err();

    assert!(matches!(err, SettingsError::EmptySelection));
    assert!(ctx.launcher.launched().is_empty());
    assert!(env.store_contents().is_none());
}

#[test]
fn test_toggle_and_apply_persists_preference() {
    let env = KeymapEnv::standard();
    let ctx = context(&env);
    let mut coordinator = SettingsCoordinator::initialize(&ctx).unwrap();
    assert!(coordinator.num_lock());

    coordinator.toggle_num_lock();
    assert_eq!(
        coordinator.apply(&ctx, ApplyMode::Apply).unwrap(),
        Flow::Continue
    );

    assert_eq!(ctx.launcher.launched(), vec!["us".to_string()]);
    assert!(!ctx
        .store
        .read_bool("KeyboardSettings", "StartupEnable", "NumLock", true));

    // A new session starts from the stored value.
    let reopened = SettingsCoordinator::initialize(&ctx).unwrap();
    assert!(!reopened.num_lock());
}

#[test]
fn test_cancel_never_persists() {
    let env = KeymapEnv::standard();
    let ctx = context(&env);
    let mut coordinator = SettingsCoordinator::initialize(&ctx).unwrap();

    coordinator.toggle_num_lock();
    coordinator.select_first();
    assert_eq!(coordinator.cancel(), Flow::Quit);

    assert!(env.store_contents().is_none());
    assert!(ctx.launcher.launched().is_empty());
}

#[test]
fn test_ok_applies_and_quits() {
    let env = KeymapEnv::standard();
    let ctx = context(&env);
    let mut coordinator = SettingsCoordinator::initialize(&ctx).unwrap();

    coordinator.select_first();
    assert_eq!(coordinator.apply(&ctx, ApplyMode::Ok).unwrap(), Flow::Quit);
    assert_eq!(ctx.launcher.launched(), vec!["de".to_string()]);
    assert!(env
        .store_contents()
        .is_some_and(|content| content.contains("NumLock = true")));
}

#[test]
fn test_corrupt_store_is_reported_and_kept() {
    let env = KeymapEnv::standard();
    let ctx = context(&env);
    fs::create_dir_all(&env.store_dir).unwrap();
    let corrupt = "[StartupEnable]\nCapsLock = true\n\n[Other]\nName = \"x\"\nbroken = \n";
    let store_file = env.store_dir.join("KeyboardSettings.toml");
    fs::write(&store_file, corrupt).unwrap();

    let mut coordinator = SettingsCoordinator::initialize(&ctx).unwrap();
    assert!(coordinator.num_lock());
    coordinator.toggle_num_lock();

    let err = coordinator.apply(&ctx, ApplyMode::Ok).unwrap_err();
    assert!(matches!(err, SettingsError::StoreWrite { .. }));
    assert!(!err.is_fatal());
    assert_eq!(fs::read_to_string(&store_file).unwrap(), corrupt);
}

#[cfg(unix)]
#[test]
fn test_process_launcher_does_not_wait_for_tool() {
    use keyboard_settings::launcher::ProcessLauncher;

    let env = KeymapEnv::standard();
    env.install_tool();
    let ctx = AppContext::new(
        env.paths(),
        FileConfigStore::new(&env.store_dir),
        ProcessLauncher::new(&env.keymap_tool),
    );
    let coordinator = SettingsCoordinator::initialize(&ctx).unwrap();

    // ETXTBSY while the freshly written script is still open in a forked sibling
    let busy = |r: &Result<Flow, SettingsError>| {
        matches!(r, Err(SettingsError::LaunchFailed { source, .. }) if source.raw_os_error() == Some(26))
    };
    let mut result = coordinator.apply(&ctx, ApplyMode::Apply);
    for _ in 0..50 {
        if !busy(&result) {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
        result = coordinator.apply(&ctx, ApplyMode::Apply);
    }
    // Accepted limitation: apply returns without the tool's exit status.
    assert_eq!(result.unwrap(), Flow::Continue);
    assert_eq!(env.wait_for_tool_calls(1), vec!["1:us".to_string()]);
}
