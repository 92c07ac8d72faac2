//! Property-based tests for the state machine
//!
//! Effects are applied to a real `Conversation` by a minimal executor so the
//! store-level properties can be checked across arbitrary interaction runs.

use super::*;
use crate::conversation::{Conversation, Role, Turn};
use crate::transport::SendFailure;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// What the executor did while applying one transition
#[derive(Debug, Default)]
struct Applied {
    requests: Vec<Vec<Turn>>,
    input_cleared: bool,
}

fn apply(conv: &mut Conversation, effects: Vec<Effect>) -> Applied {
    let mut applied = Applied::default();
    for effect in effects {
        match effect {
            Effect::ClearInput => applied.input_cleared = true,
            Effect::AppendUser { text } => {
                assert!(conv.append_user(&text), "AppendUser with blank text");
            }
            Effect::AppendModel { text } => conv.append_model(&text),
            Effect::RollbackLast => {
                conv.rollback_last();
            }
            Effect::RequestReply => applied.requests.push(conv.snapshot()),
            Effect::RenderTurn { .. }
            | Effect::RenderError { .. }
            | Effect::ShowTyping
            | Effect::HideTyping => {}
        }
    }
    applied
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,5}"
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-zA-Z0-9?!]{1,12}",
        1 => " {0,2}[a-z]{1,8} {0,2}",
        1 => arb_blank(),
    ]
}

fn arb_failure() -> impl Strategy<Value = SendFailure> {
    prop_oneof![
        Just(SendFailure::EmptyReply),
        (400u16..600, "[a-z ]{0,20}")
            .prop_map(|(status, message)| SendFailure::server_error(status, message)),
        "[a-z ]{1,20}".prop_map(SendFailure::network),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_text().prop_map(|text| Event::Submit { text }),
        "[a-zA-Z ]{1,20}".prop_map(|text| Event::ReplyReceived { text }),
        arb_failure().prop_map(|failure| Event::SendFailed { failure }),
    ]
}

fn arb_state() -> impl Strategy<Value = ChatState> {
    prop_oneof![Just(ChatState::Idle), Just(ChatState::Sending)]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_blank_submit_never_touches_store(blank in arb_blank()) {
        let result = transition(ChatState::Idle, Event::Submit { text: blank }).unwrap();
        prop_assert_eq!(result.new_state, ChatState::Idle);
        prop_assert!(result.effects.is_empty());
    }

    #[test]
    fn prop_submit_while_sending_is_rejected(text in arb_text()) {
        prop_assert_eq!(
            transition(ChatState::Sending, Event::Submit { text }).unwrap_err(),
            TransitionError::Busy
        );
    }

    #[test]
    fn prop_transition_is_deterministic(state in arb_state(), event in arb_event()) {
        let first = transition(state, event.clone());
        let second = transition(state, event);
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.new_state, b.new_state);
                prop_assert_eq!(a.effects, b.effects);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "transition gave different outcomes"),
        }
    }

    #[test]
    fn prop_successful_cycle_appends_user_then_model(
        history in proptest::collection::vec(("[a-z]{1,8}", "[a-z]{1,8}"), 0..5),
        text in "[a-z]{1,10}",
        reply in "[a-z]{1,10}",
    ) {
        let mut conv = Conversation::new();
        for (user, model) in &history {
            conv.append_user(user);
            conv.append_model(model);
        }
        let before = conv.snapshot();

        let sent = transition(ChatState::Idle, Event::Submit { text: text.clone() }).unwrap();
        let applied = apply(&mut conv, sent.effects);

        // The payload is the full history plus the optimistic user turn
        let mut expected_payload = before.clone();
        expected_payload.push(Turn::user(text.clone()));
        prop_assert_eq!(applied.requests, vec![expected_payload]);
        prop_assert!(applied.input_cleared);

        let done = transition(sent.new_state, Event::ReplyReceived { text: reply.clone() }).unwrap();
        apply(&mut conv, done.effects);

        prop_assert_eq!(done.new_state, ChatState::Idle);
        prop_assert_eq!(conv.len(), before.len() + 2);
        prop_assert_eq!(&conv.turns()[..before.len()], before.as_slice());
        prop_assert_eq!(&conv.turns()[before.len()], &Turn::user(text));
        prop_assert_eq!(&conv.turns()[before.len() + 1], &Turn::model(reply));
    }

    #[test]
    fn prop_failed_cycle_restores_store_exactly(
        history in proptest::collection::vec(("[a-z]{1,8}", "[a-z]{1,8}"), 0..5),
        text in "[a-z]{1,10}",
        failure in arb_failure(),
    ) {
        let mut conv = Conversation::new();
        for (user, model) in &history {
            conv.append_user(user);
            conv.append_model(model);
        }
        let before = conv.snapshot();

        let sent = transition(ChatState::Idle, Event::Submit { text }).unwrap();
        apply(&mut conv, sent.effects);
        let failed = transition(sent.new_state, Event::SendFailed { failure }).unwrap();
        apply(&mut conv, failed.effects);

        prop_assert_eq!(failed.new_state, ChatState::Idle);
        prop_assert_eq!(conv.snapshot(), before);
    }

    /// Drive arbitrary event streams through a store and check that every
    /// settled point satisfies the alternation and rollback contracts.
    #[test]
    fn prop_arbitrary_runs_keep_store_consistent(
        events in proptest::collection::vec(arb_event(), 0..40)
    ) {
        let mut state = ChatState::Idle;
        let mut conv = Conversation::new();
        let mut len_before_cycle = 0;

        for event in events {
            let was_sending = state.is_sending();
            let is_success = matches!(event, Event::ReplyReceived { .. });
            let is_failure = matches!(event, Event::SendFailed { .. });

            let Ok(result) = transition(state, event) else {
                // Rejected events must not have been applicable
                prop_assert!(
                    was_sending || is_success || is_failure,
                    "idle submit was rejected"
                );
                continue;
            };

            if !was_sending {
                len_before_cycle = conv.len();
            }
            let applied = apply(&mut conv, result.effects);
            state = result.new_state;

            if state.is_sending() {
                prop_assert_eq!(conv.len(), len_before_cycle + 1);
                prop_assert_eq!(applied.requests.len(), 1);
                prop_assert_eq!(&applied.requests[0], &conv.snapshot());
            } else if was_sending && is_success {
                prop_assert_eq!(conv.len(), len_before_cycle + 2);
            } else {
                prop_assert_eq!(conv.len(), len_before_cycle);
                prop_assert!(applied.requests.is_empty());
            }

            // Settled history always alternates user, model
            if !state.is_sending() {
                for (i, turn) in conv.turns().iter().enumerate() {
                    let expected = if i % 2 == 0 { Role::User } else { Role::Model };
                    prop_assert_eq!(turn.role(), expected);
                }
            }
        }
    }
}
