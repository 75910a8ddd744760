use super::*;

use crate::area::ContextId;

fn event(key: &str, value: &str) -> StorageEvent {
    StorageEvent {
        key: key.to_owned(),
        old_value: None,
        new_value: Some(value.to_owned()),
        origin: ContextId::EXTERNAL,
    }
}

fn recorder() -> (Rc<RefCell<Vec<String>>>, Handler) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let handler: Handler = Rc::new(move |e: &StorageEvent| {
        sink.borrow_mut().push(e.new_value.clone().unwrap_or_default());
    });
    (seen, handler)
}

#[test]
fn dispatch_reaches_only_matching_key() {
    let bus = ChangeBus::new();
    let (seen, handler) = recorder();
    let _sub = bus.subscribe("p_a".into(), handler);

    assert_eq!(bus.dispatch(&event("p_b", "1")), 0);
    assert_eq!(bus.dispatch(&event("p_a", "2")), 1);
    assert_eq!(*seen.borrow(), vec!["2".to_owned()]);
}

#[test]
fn dropping_subscription_releases_handler() {
    let bus = ChangeBus::new();
    let (seen, handler) = recorder();
    let sub = bus.subscribe("p_a".into(), handler);
    assert_eq!(bus.len(), 1);

    drop(sub);
    assert!(bus.is_empty());
    bus.dispatch(&event("p_a", "1"));
    assert!(seen.borrow().is_empty());
}

#[test]
fn multiple_handlers_on_one_key_all_fire() {
    let bus = ChangeBus::new();
    let (first, h1) = recorder();
    let (second, h2) = recorder();
    let _a = bus.subscribe("p_a".into(), h1);
    let _b = bus.subscribe("p_a".into(), h2);

    assert_eq!(bus.dispatch(&event("p_a", "x")), 2);
    assert_eq!(first.borrow().len(), 1);
    assert_eq!(second.borrow().len(), 1);
}

#[test]
fn handler_may_subscribe_during_dispatch() {
    let bus = ChangeBus::new();
    let held: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
    let bus_ref = Rc::clone(&bus);
    let held_ref = Rc::clone(&held);
    let _sub = bus.subscribe(
        "p_a".into(),
        Rc::new(move |_: &StorageEvent| {
            let (_, handler) = recorder();
            held_ref.borrow_mut().push(bus_ref.subscribe("p_a".into(), handler));
        }),
    );

    bus.dispatch(&event("p_a", "1"));
    assert_eq!(bus.len(), 2);
}

#[test]
fn subscription_outliving_bus_drops_cleanly() {
    let bus = ChangeBus::new();
    let (_, handler) = recorder();
    let sub = bus.subscribe("p_a".into(), handler);
    assert_eq!(sub.key(), "p_a");
    drop(bus);
    drop(sub);
}
