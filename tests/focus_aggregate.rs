use term_balloon::focus::FocusArbiter;

#[test]
fn aggregate_tracks_or_of_all_regions() {
    let mut arbiter = FocusArbiter::new();
    let a = arbiter.register_region("a");
    let b = arbiter.register_region("b");
    let c = arbiter.register_region("c");

    arbiter.set_focused(b, true);
    assert!(arbiter.is_focused());
    arbiter.set_focused(a, true);
    arbiter.set_focused(b, false);
    assert!(arbiter.is_focused());
    arbiter.set_focused(a, false);
    assert!(!arbiter.is_focused());
    arbiter.set_focused(c, true);
    assert!(arbiter.is_focused());
}

#[test]
fn same_turn_region_move_keeps_aggregate_true_throughout() {
    let mut arbiter = FocusArbiter::new();
    let a = arbiter.register_region("editable");
    let b = arbiter.register_region("toolbar");

    arbiter.set_focused(a, true);
    assert_eq!(arbiter.take_focus_change(), Some(true));

    // A blurs and B focuses within the same turn: no false edge surfaces.
    arbiter.set_focused(a, false);
    arbiter.set_focused(b, true);
    assert!(arbiter.is_focused());
    assert_eq!(arbiter.take_focus_change(), None);
}

#[test]
fn observers_fire_per_value_change_not_per_set() {
    let mut arbiter = FocusArbiter::new();
    let a = arbiter.register_region("a");
    let b = arbiter.register_region("b");

    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&seen);
    arbiter.observe(move |focused| sink.borrow_mut().push(focused));

    // Each turn applies one mutation, then drains.
    for (handle, focused) in [(a, true), (b, true), (a, false), (b, false)] {
        arbiter.set_focused(handle, focused);
        arbiter.take_focus_change();
    }

    // Four sets, two value changes, two notifications.
    assert_eq!(*seen.borrow(), vec![true, false]);
}
