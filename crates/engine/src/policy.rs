//! Tone and follow-up guidance policies.
//!
//! Both tables are exhaustive matches over closed enums, so adding an
//! intent or outcome is a compile-time-visible change rather than a silent
//! string-table fallback.

use outreach_core::types::{EngagementIntent, Outcome};

/// Writing tone applied to generated drafts, keyed by engagement intent.
/// Unrecognized intent strings never reach this table; the API boundary
/// parses them with a defined fallback first.
pub fn tone_for_intent(intent: EngagementIntent) -> &'static str {
    match intent {
        EngagementIntent::Cold => {
            "professional and concise; lead with the problem you solve, no filler"
        }
        EngagementIntent::Warm => {
            "friendly and familiar; reference the existing relationship and shared context"
        }
        EngagementIntent::Hot => {
            "direct and enthusiastic; assume active interest and propose a concrete next step"
        }
        EngagementIntent::Followup => {
            "courteous persistence; acknowledge the earlier message without applying pressure"
        }
    }
}

/// Deterministic subject line per intent; body copy comes from the
/// generator.
pub fn subject_for_intent(intent: EngagementIntent, company: &str) -> String {
    match intent {
        EngagementIntent::Cold => format!("Quick question about {}", company),
        EngagementIntent::Warm => format!("Picking up our conversation, {}", company),
        EngagementIntent::Hot => format!("Next steps for {}", company),
        EngagementIntent::Followup => format!("Following up — {}", company),
    }
}

/// Composition guidance for a follow-up draft, keyed by the recorded
/// outcome. Terminal outcomes are not follow-up candidates and yield None.
pub fn followup_guidance(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::NoResponse => Some(
            "keep it brief, lead with a new angle the first message did not use, \
             and stay low-pressure",
        ),
        Outcome::Replied => Some(
            "continue the thread: reference their reply directly and move the \
             conversation toward a concrete next step",
        ),
        Outcome::MeetingBooked | Outcome::OpportunityCreated | Outcome::Unsubscribed => None,
    }
}
