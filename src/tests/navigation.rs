use super::*;

#[test]
fn test_edit_location_patterns() {
    assert!(is_edit_location("/wiki/spaces/DOC/pages/edit-v2/123"));
    assert!(is_edit_location("/edit/notes/plan.md"));
    assert!(!is_edit_location("/wiki/spaces/DOC/pages/123/editor"));
    assert!(!is_edit_location("/"));
}

#[test]
fn test_watcher_reports_only_changes() {
    let mut watcher = NavigationWatcher::new("/");
    assert_eq!(watcher.poll("/"), None);

    assert_eq!(
        watcher.poll("/edit/a.md"),
        Some(NavigationEvent::EnteredEdit("/edit/a.md".to_string()))
    );
    assert_eq!(watcher.poll("/edit/a.md"), None);
    assert_eq!(
        watcher.poll("/edit/b.md"),
        Some(NavigationEvent::EnteredEdit("/edit/b.md".to_string()))
    );
    assert_eq!(
        watcher.poll("/"),
        Some(NavigationEvent::LeftEdit("/".to_string()))
    );
    assert_eq!(watcher.last(), "/");
}

#[test]
fn test_wait_for_returns_when_ready() {
    let mut attempts = 0;
    let found = wait_for(Duration::from_secs(1), Duration::from_millis(1), || {
        attempts += 1;
        (attempts == 3).then_some("surface")
    })
    .unwrap();

    assert_eq!(found, "surface");
    assert_eq!(attempts, 3);
}

#[test]
fn test_wait_for_times_out() {
    let started = Instant::now();
    let result: Result<()> = wait_for(Duration::from_millis(20), Duration::from_millis(5), || None);

    assert!(matches!(result, Err(Error::SurfaceTimeout(t)) if t == Duration::from_millis(20)));
    assert!(started.elapsed() >= Duration::from_millis(20));
}

#[test]
fn test_wait_for_zero_timeout_still_probes() {
    let found = wait_for(Duration::ZERO, Duration::from_millis(5), || Some(7)).unwrap();
    assert_eq!(found, 7);
}
