use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use window_registry::{
    reduce_registry,
    window_manager::{attempt_close_window, can_close_window},
    CloseOutcome, RegisterWindowRequest, RegistryEffect, WindowAction, WindowId, WindowKind,
    WindowManagerConfig, WindowRegistry,
};

fn id(raw: &str) -> WindowId {
    WindowId::from(raw)
}

fn dispatch(
    registry: &mut WindowRegistry,
    config: &WindowManagerConfig,
    action: WindowAction,
) -> Vec<RegistryEffect> {
    reduce_registry(registry, config, action)
}

fn shake_reset(effects: &[RegistryEffect]) -> Option<(WindowId, u64)> {
    effects.iter().find_map(|effect| match effect {
        RegistryEffect::ScheduleShakeReset {
            window_id,
            generation,
            ..
        } => Some((window_id.clone(), *generation)),
        _ => None,
    })
}

#[test]
fn restore_cycle_and_close_walkthrough() {
    let config = WindowManagerConfig::default();
    let mut registry = WindowRegistry::default();

    dispatch(
        &mut registry,
        &config,
        WindowAction::Register(RegisterWindowRequest::new("A", "A")),
    );
    dispatch(
        &mut registry,
        &config,
        WindowAction::Register(RegisterWindowRequest::new("B", "B")),
    );
    let a = registry.entry(&id("A")).unwrap().clone();
    let b = registry.entry(&id("B")).unwrap().clone();
    assert!(!a.active && !b.active);
    assert!(a.stack_order < b.stack_order);

    dispatch(
        &mut registry,
        &config,
        WindowAction::Restore { window_id: id("A") },
    );
    assert!(registry.entry(&id("A")).unwrap().active);
    assert!(!registry.entry(&id("B")).unwrap().active);
    assert_eq!(registry.active_id, Some(id("A")));

    dispatch(&mut registry, &config, WindowAction::CycleNext);
    assert!(registry.entry(&id("B")).unwrap().active);
    assert!(!registry.entry(&id("A")).unwrap().active);
    assert_eq!(registry.active_id, Some(id("B")));

    assert!(can_close_window(&registry, &id("A")));
    assert_eq!(
        attempt_close_window(&mut registry, &id("A")),
        CloseOutcome::Closed
    );
    let remaining: Vec<&str> = registry.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(remaining, vec!["B"]);
}

#[test]
fn consent_form_refuses_to_close_and_shakes_until_reset() {
    let config = WindowManagerConfig::default();
    let mut registry = WindowRegistry::default();

    dispatch(
        &mut registry,
        &config,
        WindowAction::Register(
            RegisterWindowRequest::new("consent", "Consent")
                .kind(WindowKind::System)
                .closable(false),
        ),
    );
    assert!(registry.entry(&id("consent")).unwrap().active);
    assert!(!can_close_window(&registry, &id("consent")));

    let effects = dispatch(
        &mut registry,
        &config,
        WindowAction::AttemptClose {
            window_id: id("consent"),
        },
    );
    assert!(registry.contains(&id("consent")));
    assert!(registry.is_shaking(&id("consent")));

    let (window_id, generation) = shake_reset(&effects).expect("shake reset scheduled");
    dispatch(
        &mut registry,
        &config,
        WindowAction::ClearShake {
            window_id,
            generation,
        },
    );
    assert!(!registry.is_shaking(&id("consent")));
    assert!(registry.contains(&id("consent")));
}

#[test]
fn retriggered_shake_survives_the_first_timer() {
    let config = WindowManagerConfig::default();
    let mut registry = WindowRegistry::default();
    dispatch(
        &mut registry,
        &config,
        WindowAction::Register(RegisterWindowRequest::new("consent", "Consent").closable(false)),
    );

    let first = dispatch(
        &mut registry,
        &config,
        WindowAction::AttemptClose {
            window_id: id("consent"),
        },
    );
    let second = dispatch(
        &mut registry,
        &config,
        WindowAction::AttemptClose {
            window_id: id("consent"),
        },
    );

    let (window_id, generation) = shake_reset(&first).unwrap();
    dispatch(
        &mut registry,
        &config,
        WindowAction::ClearShake {
            window_id,
            generation,
        },
    );
    assert!(registry.is_shaking(&id("consent")));

    let (window_id, generation) = shake_reset(&second).unwrap();
    dispatch(
        &mut registry,
        &config,
        WindowAction::ClearShake {
            window_id,
            generation,
        },
    );
    assert!(!registry.is_shaking(&id("consent")));
}

#[test]
fn close_of_unknown_window_reports_not_found() {
    let mut registry = WindowRegistry::default();
    assert!(can_close_window(&registry, &id("ghost")));
    assert_eq!(
        attempt_close_window(&mut registry, &id("ghost")),
        CloseOutcome::NotFound
    );
}

#[test]
fn reregistering_after_close_creates_a_fresh_inactive_entry() {
    let config = WindowManagerConfig::default();
    let mut registry = WindowRegistry::default();
    let req = RegisterWindowRequest::new("tracks", "Track List");

    dispatch(&mut registry, &config, WindowAction::Register(req.clone()));
    dispatch(
        &mut registry,
        &config,
        WindowAction::BringToFront {
            window_id: id("tracks"),
        },
    );
    dispatch(
        &mut registry,
        &config,
        WindowAction::AttemptClose {
            window_id: id("tracks"),
        },
    );
    assert!(registry.is_empty());
    assert_eq!(registry.active_id, None);

    dispatch(&mut registry, &config, WindowAction::Register(req));
    let entry = registry.entry(&id("tracks")).unwrap();
    assert!(!entry.active);
    assert_eq!(registry.active_id, None);
}

#[derive(Debug, Clone)]
enum Op {
    Register(u8),
    Unregister(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6).prop_map(Op::Register),
        (0u8..6).prop_map(Op::Unregister),
    ]
}

proptest! {
    #[test]
    fn entry_count_tracks_distinct_live_registrations(ops in prop::collection::vec(op(), 0..40)) {
        let config = WindowManagerConfig::default();
        let mut registry = WindowRegistry::default();
        let mut live = BTreeSet::new();

        for op in ops {
            match op {
                Op::Register(n) => {
                    let window_id = format!("w{n}");
                    reduce_registry(
                        &mut registry,
                        &config,
                        WindowAction::Register(RegisterWindowRequest::new(window_id.as_str(), "W")),
                    );
                    live.insert(window_id);
                }
                Op::Unregister(n) => {
                    let window_id = format!("w{n}");
                    reduce_registry(
                        &mut registry,
                        &config,
                        WindowAction::Unregister { window_id: WindowId::from(window_id.as_str()) },
                    );
                    live.remove(&window_id);
                }
            }
            prop_assert_eq!(registry.len(), live.len());
        }
    }

    #[test]
    fn cycling_through_every_top_level_window_returns_to_start(
        count in 1usize..8,
        start in 0usize..8,
        children in 0usize..3,
    ) {
        let config = WindowManagerConfig::default();
        let mut registry = WindowRegistry::default();
        for n in 0..count {
            reduce_registry(
                &mut registry,
                &config,
                WindowAction::Register(RegisterWindowRequest::new(format!("w{n}"), "W")),
            );
        }
        for n in 0..children {
            reduce_registry(
                &mut registry,
                &config,
                WindowAction::Register(RegisterWindowRequest::new(format!("c{n}"), "C").parent("w0")),
            );
        }
        let origin = WindowId::new(format!("w{}", start % count));
        reduce_registry(&mut registry, &config, WindowAction::Restore { window_id: origin.clone() });

        for _ in 0..count {
            reduce_registry(&mut registry, &config, WindowAction::CycleNext);
        }
        prop_assert_eq!(registry.active_id.clone(), Some(origin.clone()));

        for _ in 0..count {
            reduce_registry(&mut registry, &config, WindowAction::CyclePrevious);
        }
        prop_assert_eq!(registry.active_id, Some(origin));
    }

    #[test]
    fn later_raise_outranks_earlier_raise(first in 0usize..5, second in 0usize..5) {
        prop_assume!(first != second);
        let config = WindowManagerConfig::default();
        let mut registry = WindowRegistry::default();
        for n in 0..5 {
            let kind = if n % 2 == 0 { WindowKind::Normal } else { WindowKind::Modal };
            reduce_registry(
                &mut registry,
                &config,
                WindowAction::Register(RegisterWindowRequest::new(format!("w{n}"), "W").kind(kind)),
            );
        }
        let a = WindowId::new(format!("w{first}"));
        let b = WindowId::new(format!("w{second}"));

        reduce_registry(&mut registry, &config, WindowAction::BringToFront { window_id: a.clone() });
        reduce_registry(&mut registry, &config, WindowAction::BringToFront { window_id: b.clone() });

        let a_rank = registry.entry(&a).unwrap().stack_order;
        let b_rank = registry.entry(&b).unwrap().stack_order;
        prop_assert!(b_rank > a_rank);
        let active: Vec<WindowId> = registry
            .entries
            .iter()
            .filter(|e| e.active)
            .map(|e| e.id.clone())
            .collect();
        prop_assert_eq!(active, vec![b]);
    }
}
