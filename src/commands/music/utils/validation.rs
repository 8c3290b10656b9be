//! Guard checks that run before a music command body.
//!
//! A validator only looks at the invocation and the guild queue. The first failure
//! produces the warning the caller sees and the command stops there.

use tracing::debug;

use super::embedded_messages::{self, MusicResponse};
use super::invocation::InvocationContext;
use super::player_queue::PlayerQueue;
use crate::utils::config::EmbedOptions;

/// Result of a single guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(MusicResponse),
}

pub type Validator = fn(&InvocationContext, Option<&dyn PlayerQueue>, &EmbedOptions) -> Outcome;

pub fn caller_in_voice_channel(
    invocation: &InvocationContext,
    _queue: Option<&dyn PlayerQueue>,
    options: &EmbedOptions,
) -> Outcome {
    match invocation.voice_channel {
        Some(_) => Outcome::Pass,
        None => Outcome::Fail(embedded_messages::not_in_voice_channel(options)),
    }
}

/// Passes when no queue is bound yet, since there is no channel to compare against
pub fn caller_shares_voice_channel(
    invocation: &InvocationContext,
    queue: Option<&dyn PlayerQueue>,
    options: &EmbedOptions,
) -> Outcome {
    match queue {
        Some(queue) if invocation.voice_channel != Some(queue.channel().id) => {
            Outcome::Fail(embedded_messages::not_in_same_voice_channel(options))
        }
        _ => Outcome::Pass,
    }
}

pub fn queue_exists(
    _invocation: &InvocationContext,
    queue: Option<&dyn PlayerQueue>,
    options: &EmbedOptions,
) -> Outcome {
    match queue {
        Some(_) => Outcome::Pass,
        None => Outcome::Fail(embedded_messages::queue_does_not_exist(options)),
    }
}

pub fn queue_has_current_track(
    _invocation: &InvocationContext,
    queue: Option<&dyn PlayerQueue>,
    options: &EmbedOptions,
) -> Outcome {
    match queue.and_then(|queue| queue.current_track()) {
        Some(_) => Outcome::Pass,
        None => Outcome::Fail(embedded_messages::nothing_playing(options)),
    }
}

/// Checks for commands that act on the track that is playing
pub const PLAYBACK_VALIDATORS: [Validator; 4] = [
    caller_in_voice_channel,
    caller_shares_voice_channel,
    queue_exists,
    queue_has_current_track,
];

/// Checks for commands that act on the queue whether or not something is playing
pub const QUEUE_VALIDATORS: [Validator; 3] = [
    caller_in_voice_channel,
    caller_shares_voice_channel,
    queue_exists,
];

/// Checks for commands that may create the queue
pub const VOICE_VALIDATORS: [Validator; 2] = [caller_in_voice_channel, caller_shares_voice_channel];

/// Run the validators in order and stop at the first failure
pub fn run_validators(
    validators: &[Validator],
    invocation: &InvocationContext,
    queue: Option<&dyn PlayerQueue>,
    options: &EmbedOptions,
) -> Outcome {
    for (position, validator) in validators.iter().enumerate() {
        if let Outcome::Fail(response) = validator(invocation, queue, options) {
            debug!(
                "[{}] Validator {} of {} failed",
                invocation.execution_id,
                position + 1,
                validators.len()
            );
            return Outcome::Fail(response);
        }
    }
    Outcome::Pass
}
