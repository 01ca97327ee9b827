//! Toast lifetimes and the manager's queue.

use pinboard::notifications::{Toast, ToastManager, ToastVariant};
use std::time::Duration;

#[test]
fn test_variant_durations() {
    assert_eq!(Toast::success("ok").duration, Duration::from_secs(3));
    assert_eq!(Toast::info("fyi").duration, Duration::from_secs(3));
    assert_eq!(Toast::warning("hmm").duration, Duration::from_secs(4));
    assert_eq!(Toast::error("bad").duration, Duration::from_secs(5));
}

#[test]
fn test_icons() {
    assert_eq!(ToastVariant::Success.icon(), "✓");
    assert_eq!(ToastVariant::Error.icon(), "✗");
}

#[test]
fn test_ids_are_unique() {
    let a = Toast::info("a");
    let b = Toast::info("b");
    assert_ne!(a.id, b.id);
}

#[test]
fn test_fresh_toast_is_not_expired() {
    let toast = Toast::info("hello");
    assert!(!toast.is_expired());
    assert!(toast.remaining_percent() > 0.9);
}

#[test]
fn test_remove_expired_keeps_live_toasts() {
    let mut manager = ToastManager::new();
    manager.push(Toast::error("gone").with_duration(Duration::ZERO));
    manager.push(Toast::success("stays"));
    assert_eq!(manager.count(), 2);

    assert!(manager.remove_expired());
    assert_eq!(manager.count(), 1);
    assert_eq!(manager.latest().unwrap().message, "stays");
    assert!(!manager.remove_expired());
}

#[test]
fn test_remove_by_id() {
    let mut manager = ToastManager::new();
    let toast = Toast::warning("dismiss me");
    let id = toast.id;
    manager.push(toast);
    manager.push(Toast::info("other"));

    manager.remove(id);
    assert_eq!(manager.toasts().len(), 1);
    assert_eq!(manager.toasts()[0].variant, ToastVariant::Info);

    manager.clear();
    assert!(manager.latest().is_none());
}
