use super::*;
use crate::test_support::FakeSurface;
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

fn quick_config() -> Config {
    Config {
        surface_timeout_ms: 20,
        ..Config::default()
    }
}

fn renumber_key() -> KeyEvent {
    KeyEvent::new(
        KeyCode::Char('n'),
        KeyModifiers::CONTROL | KeyModifiers::ALT,
    )
}

#[test]
fn test_starts_detached_without_control() {
    let controller = Controller::new(&quick_config(), "/");
    assert!(!controller.is_attached());
    assert!(controller.control().is_none());
    assert_eq!(controller.action_for(&renumber_key()), None);
    assert_eq!(controller.click(), None);
}

#[test]
fn test_enter_and_leave_edit() {
    let mut controller = Controller::new(&quick_config(), "/");

    let event = controller.poll("/edit/doc.md");
    assert!(matches!(event, Some(NavigationEvent::EnteredEdit(_))));

    let surface = controller.enter_edit(|| Some(FakeSurface::from_levels(&[1, 2])));
    assert!(surface.is_some());
    assert!(controller.is_attached());
    let control = controller.control().unwrap();
    assert_eq!(control.top, 88);
    assert!(control.tooltip.contains("Ctrl+Alt+N"));
    assert_eq!(controller.action_for(&renumber_key()), Some(Action::Renumber));
    assert_eq!(controller.click(), Some(Action::Renumber));

    assert!(matches!(
        controller.poll("/"),
        Some(NavigationEvent::LeftEdit(_))
    ));
    controller.leave_edit();
    assert!(!controller.is_attached());
    assert!(controller.control().is_none());
}

#[test]
fn test_surface_timeout_leaves_detached() {
    let mut controller = Controller::new(&quick_config(), "/");
    let surface: Option<FakeSurface> = controller.enter_edit(|| None);

    assert!(surface.is_none());
    assert!(!controller.is_attached());
    assert!(controller.control().is_none());
}

#[test]
fn test_hidden_control_still_attaches_hotkeys() {
    let cfg = Config {
        show_floating_control: false,
        ..quick_config()
    };
    let mut controller = Controller::new(&cfg, "/");
    controller.enter_edit(|| Some(()));

    assert!(controller.is_attached());
    assert!(controller.control().is_none());
    assert_eq!(controller.click(), None);
    assert_eq!(controller.action_for(&renumber_key()), Some(Action::Renumber));
}

#[test]
fn test_reentering_keeps_single_control() {
    let mut controller = Controller::new(&quick_config(), "/");
    controller.enter_edit(|| Some(()));
    controller.control_mut().unwrap().hovered = true;
    controller.enter_edit(|| Some(()));

    assert!(controller.control().unwrap().hovered);
}

#[test]
fn test_dispatch_runs_passes() {
    let cfg = Config {
        start_level: 2,
        ..quick_config()
    };
    let controller = Controller::new(&cfg, "/");
    let mut surface = FakeSurface::from_levels(&[1, 2, 3]);

    let report = controller.dispatch(Action::Renumber, &mut surface);
    assert_eq!(report.numbered, 2);
    assert_eq!(
        surface.labels(),
        vec![None, Some("1. ".to_string()), Some("1.1. ".to_string())]
    );

    let report = controller.dispatch(Action::RemoveAll, &mut surface);
    assert_eq!(report.cleared, 3);
    assert!(surface.labels().iter().all(Option::is_none));
}
