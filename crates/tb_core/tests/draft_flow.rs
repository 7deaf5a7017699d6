//! End-to-end draft runs through the public engine API.

mod common;

use tb_core::{
    AssemblyEvent, DraftChoice, DraftOffer, DraftPhase, DraftProgress, FillMode, RosterError,
    SlotKind,
};

#[test]
fn draft_completes_with_position_matched_field() {
    let mut engine = common::engine(common::standard_pool(), 42);
    let mut progress = engine.start_draft().unwrap();
    let mut steps = 0;

    while let DraftProgress::Offer(offer) = progress {
        assert!(!offer.is_empty() && offer.len() <= 5);
        if let DraftOffer::Players { slot_kind: SlotKind::Field, required, ids, .. } = &offer {
            for id in ids {
                let player = engine.pool().player(id).unwrap();
                assert_eq!(Some(player.position), *required);
                assert!(!engine.state().is_used(id), "offered player already in roster");
            }
        }
        progress = engine.choose_offered(0).unwrap();
        steps += 1;
    }

    // formation + coach + 11 field + 5 bench
    assert_eq!(steps, 18);
    let snapshot = match progress {
        DraftProgress::Complete(snapshot) => snapshot,
        other => panic!("draft should complete, got {:?}", other),
    };
    assert!(snapshot.is_complete());
    assert!(snapshot.fallback_slots.is_empty());
    assert_eq!(engine.draft_phase(), Some(&DraftPhase::Complete));
    assert!(!engine.is_draft_active());
    assert_eq!(engine.presenter().count(|e| *e == AssemblyEvent::DraftComplete), 1);
    assert_eq!(engine.draft_title().as_deref(), Some("Draft Complete!"));
}

#[test]
fn step_titles_follow_the_cursor() {
    let mut engine = common::engine(common::standard_pool(), 1);
    engine.start_draft().unwrap();
    assert_eq!(engine.draft_title().as_deref(), Some("Draft: Select Formation"));

    // three formations in the pool, all of them offered
    engine.choose(DraftChoice::Formation("4-4-2 (F-Basic)".into())).unwrap();
    assert_eq!(engine.draft_title().as_deref(), Some("Draft: Select Coach"));

    engine.choose_offered(0).unwrap();
    assert_eq!(engine.draft_title().as_deref(), Some("Draft: Select GK for Player #1"));
}

#[test]
fn only_one_draft_at_a_time() {
    let mut engine = common::engine(common::standard_pool(), 7);
    engine.start_draft().unwrap();
    engine.choose_offered(0).unwrap();

    assert!(matches!(engine.start_draft(), Err(RosterError::DraftAlreadyInProgress)));
    assert!(matches!(engine.random_fill(FillMode::Constrained), Err(RosterError::DraftAlreadyInProgress)));
    assert_eq!(engine.draft_phase(), Some(&DraftPhase::CoachSelect), "refused start must not move the run");
    assert!(engine.state().formation().is_some(), "refused start must not reset the roster");
}

#[test]
fn draft_halts_when_no_keeper_is_left() {
    let mut engine = common::engine(common::single_keeper_pool(), 3);
    engine.start_draft().unwrap();
    engine.choose(DraftChoice::Formation("2-keeper".into())).unwrap();
    engine.choose_offered(0).unwrap();
    let progress = engine.choose(DraftChoice::Player("gk-1".into())).unwrap();

    match progress {
        DraftProgress::CannotContinue { reason, slot_kind, slot_index } => {
            assert_eq!(slot_kind, SlotKind::Field);
            assert_eq!(slot_index, 1);
            assert!(reason.contains("GK"), "reason should name the position: {}", reason);
        }
        other => panic!("expected halt, got {:?}", other),
    }
    assert!(engine.state().slot(SlotKind::Field, 1).is_none(), "no off-position substitute");
    assert!(engine.is_draft_active(), "halted run keeps the roster");
    assert!(engine.start_draft().is_err());

    engine.cancel_draft().unwrap();
    assert!(!engine.is_draft_active());
    assert!(engine.start_draft().is_ok());
}

#[test]
fn cancel_keeps_picks_and_ends_the_run() {
    let mut engine = common::engine(common::standard_pool(), 9);
    engine.start_draft().unwrap();
    for _ in 0..4 {
        engine.choose_offered(0).unwrap();
    }
    assert_eq!(engine.state().filled_count(SlotKind::Field), 2);

    engine.cancel_draft().unwrap();
    assert_eq!(engine.draft_phase(), Some(&DraftPhase::Cancelled));
    assert_eq!(engine.state().filled_count(SlotKind::Field), 2);
    assert_eq!(engine.presenter().last(), Some(&AssemblyEvent::DraftCancelled));
    assert!(matches!(engine.choose_offered(0), Err(RosterError::NoActiveDraft)));
}

#[test]
fn reset_releases_a_halted_draft() {
    let mut engine = common::engine(common::single_keeper_pool(), 4);
    engine.start_draft().unwrap();
    while engine.draft_offer().is_some() {
        engine.choose_offered(0).unwrap();
    }
    assert!(matches!(engine.draft_phase(), Some(DraftPhase::Halted { .. })));

    engine.reset();
    assert!(engine.draft_phase().is_none());
    assert!(engine.state().used().is_empty());
    assert_eq!(engine.presenter().count(|e| *e == AssemblyEvent::DraftCancelled), 1);
    assert_eq!(engine.presenter().last(), Some(&AssemblyEvent::RosterCleared));
}

#[test]
fn draft_halts_when_the_bench_runs_dry() {
    let mut engine = common::engine(common::bench_short_pool(), 8);
    let mut progress = engine.start_draft().unwrap();
    while let DraftProgress::Offer(_) = progress {
        progress = engine.choose_offered(0).unwrap();
    }

    match progress {
        DraftProgress::CannotContinue { slot_kind, slot_index, .. } => {
            assert_eq!(slot_kind, SlotKind::Bench);
            assert_eq!(slot_index, 1);
        }
        other => panic!("expected halt, got {:?}", other),
    }
    assert_eq!(engine.state().filled_count(SlotKind::Field), 11);
    assert_eq!(engine.state().filled_count(SlotKind::Bench), 1);
    assert!(engine.is_draft_active(), "halted run keeps the roster");
    assert_eq!(
        engine.draft_phase(),
        Some(&DraftPhase::Halted { slot_kind: SlotKind::Bench, slot_index: 1 })
    );
}

#[test]
fn invalid_choice_is_rejected_without_side_effects() {
    let mut engine = common::engine(common::standard_pool(), 5);
    engine.start_draft().unwrap();
    let before = engine.presenter().events.len();

    let err = engine.choose(DraftChoice::Coach("coach-1".into())).unwrap_err();
    assert!(err.is_usage_error());
    assert!(matches!(engine.choose_offered(99), Err(RosterError::InvalidChoice(_))));
    assert_eq!(engine.presenter().events.len(), before);
    assert_eq!(engine.draft_phase(), Some(&DraftPhase::FormationSelect));
}
