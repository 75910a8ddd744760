use super::*;

use std::cell::Cell;

use crate::area::{MemoryArea, MemoryOrigin};
use crate::keys;

fn tab(origin: &MemoryOrigin) -> Context {
    Context::new(Rc::new(origin.open_context()), &StorageConfig::default())
}

// =============================================================
// Cross-context reconciliation
// =============================================================

#[test]
fn other_tab_sees_write_only_after_dispatch() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let tab2 = tab(&origin);
    let a = tab1.bind("flag", false);
    let b = tab2.bind("flag", false);

    a.set(true);
    assert!(a.get());
    assert!(!b.get(), "B has not run its handler yet");

    assert_eq!(tab2.dispatch_pending(), 1);
    assert!(b.get());
}

#[test]
fn writer_never_receives_own_change() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let a = tab1.bind("count", 0);
    a.set(5);
    assert_eq!(tab1.dispatch_pending(), 0);
    assert_eq!(a.get(), 5);
}

#[test]
fn unparsable_external_change_is_ignored() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let count = tab1.bind("count", 0);
    count.set(3);

    let raw: MemoryArea = origin.open_context();
    raw.set_item("petSquare_count", "{bad").unwrap();

    assert_eq!(tab1.dispatch_pending(), 1);
    assert_eq!(count.get(), 3, "no fallback to default on the notification path");
}

#[test]
fn external_removal_keeps_local_value() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let tab2 = tab(&origin);
    let a = tab1.bind("user", String::from("alex"));
    a.set("sam".to_owned());

    tab2.storage().remove("user");
    tab1.dispatch_pending();
    assert_eq!(a.get(), "sam");
}

#[test]
fn external_clear_keeps_local_values() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let tab2 = tab(&origin);
    let flag = tab1.bind("flag", false);
    flag.set(true);

    assert_eq!(tab2.storage().clear(), 1);
    assert_eq!(tab1.dispatch_pending(), 1);
    assert!(flag.get());
}

#[test]
fn changes_to_other_keys_are_filtered() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let tab2 = tab(&origin);
    let flag = tab1.bind("flag", false);
    let hits = Rc::new(Cell::new(0));
    let sink = Rc::clone(&hits);
    flag.observe(move |_| sink.set(sink.get() + 1));

    tab2.storage().set("count", &1);
    tab2.storage().set("isLoggedIn", &true);
    tab1.dispatch_pending();
    assert_eq!(hits.get(), 0);
    assert!(!flag.get());
}

#[test]
fn unrelated_namespace_with_same_suffix_is_filtered() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let flag = tab1.bind("flag", false);

    origin.open_context().set_item("otherApp_flag", "true").unwrap();
    tab1.dispatch_pending();
    assert!(!flag.get());
}

#[test]
fn observers_run_on_accepted_external_change() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let tab2 = tab(&origin);
    let mine = tab1.bind("count", 0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    mine.observe(move |n: &i32| sink.borrow_mut().push(*n));

    let theirs = tab2.bind("count", 0);
    theirs.set(1);
    theirs.set(2);
    tab1.dispatch_pending();
    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn concurrent_writers_settle_last_write_wins() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let tab2 = tab(&origin);
    let a = tab1.bind("count", 0);
    let b = tab2.bind("count", 0);

    a.set(1);
    b.set(2);
    tab1.dispatch_pending();
    tab2.dispatch_pending();

    assert_eq!(a.get(), 2);
    assert_eq!(b.get(), 1, "B saw A's earlier write after its own");
    assert_eq!(tab1.storage().get("count", 0), 2);
}

#[test]
fn stale_read_modify_write_loses_update() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let tab2 = tab(&origin);
    let a = tab1.bind("count", 0);
    let b = tab2.bind("count", 0);

    a.update(|n| n + 1);
    b.update(|n| n + 1);
    assert_eq!(tab1.storage().get("count", 0), 1);
}

#[test]
fn dropped_binding_no_longer_reacts() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let tab2 = tab(&origin);
    let hits = Rc::new(Cell::new(0));
    {
        let flag = tab1.bind("flag", false);
        let sink = Rc::clone(&hits);
        flag.observe(move |_| sink.set(sink.get() + 1));
    }
    assert_eq!(tab1.subscriptions(), 0);

    tab2.storage().set("flag", &true);
    assert_eq!(tab1.dispatch_pending(), 1);
    assert_eq!(hits.get(), 0);
}

#[test]
fn binding_created_in_handler_is_safe() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = Rc::new(tab(&origin));
    let tab2 = tab(&origin);
    let flag = tab1.bind("flag", false);
    let created = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&created);
    let ctx = Rc::downgrade(&tab1);
    flag.observe(move |_| {
        if let Some(ctx) = ctx.upgrade() {
            *sink.borrow_mut() = Some(ctx.bind("count", 0));
        }
    });

    tab2.storage().set("count", &4);
    tab2.storage().set("flag", &true);
    tab1.dispatch_pending();
    let count = created.borrow_mut().take().unwrap();
    assert_eq!(count.get(), 4);
}

// =============================================================
// Same-context sharing
// =============================================================

#[test]
fn bind_shares_one_cell_per_key() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let first = tab1.bind("flag", false);
    let second = tab1.bind("flag", true);

    assert!(first.same_cell(&second));
    assert!(!second.get(), "second default ignored while a live cell exists");
    first.set(true);
    assert!(second.get());
    assert_eq!(tab1.live_bindings(), 1);
    assert_eq!(tab1.subscriptions(), 1);
}

#[test]
fn independent_bindings_diverge_within_a_tab() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let first = tab1.bind_independent("count", 0);
    let second = tab1.bind_independent("count", 0);

    first.set(1);
    assert_eq!(second.get(), 0);
    assert_eq!(tab1.dispatch_pending(), 0);
    assert_eq!(second.get(), 0);
    assert_eq!(tab1.subscriptions(), 2);
}

#[test]
fn rebind_after_drop_reloads_from_store() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    tab1.bind("count", 0).set(9);
    assert_eq!(tab1.live_bindings(), 0);

    let again = tab1.bind("count", 0);
    assert_eq!(again.get(), 9);
}

#[test]
fn type_mismatch_falls_back_to_independent_cell() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let number = tab1.bind("value", 1_i64);
    let text = tab1.bind("value", String::from("fallback"));

    assert_eq!(number.get(), 1);
    assert_eq!(text.get(), "fallback");
    assert_eq!(tab1.subscriptions(), 2);
}

#[test]
fn bind_key_uses_typed_default() {
    let origin = MemoryOrigin::unbounded();
    let tab1 = tab(&origin);
    let logged_in = tab1.bind_key(&keys::IS_LOGGED_IN);
    assert!(!logged_in.get());
    assert_eq!(logged_in.physical_key(), "petSquare_isLoggedIn");
}

#[test]
fn context_ids_are_distinct() {
    let origin = MemoryOrigin::unbounded();
    assert_ne!(tab(&origin).id(), tab(&origin).id());
}
