use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use std::num::NonZeroUsize;

use jukebox::commands::music::skip::skip_track;

use crate::common::fixtures::{self, SAMPLE_CHANNEL_ID};
use crate::common::mocks::{FakeProvider, RecordingResponder, playing_queue};

fn pending(count: usize) -> Vec<jukebox::commands::music::audio_sources::TrackMetadata> {
    (1..=count)
        .map(|n| fixtures::pending_track(&format!("Queued {}", n)))
        .collect()
}

#[tokio::test]
async fn target_past_the_queue_warns_without_mutation() {
    // skip and skip_to have no expectations, so any mutation panics
    let queue = playing_queue(Some(fixtures::song_a()), pending(3), 0);
    let provider = FakeProvider::new(Some(queue));
    let responder = RecordingResponder::new();
    let config = fixtures::config();
    let invocation = fixtures::invocation(Some(SAMPLE_CHANNEL_ID));

    skip_track(&invocation, NonZeroUsize::new(5), &provider, &responder, &config)
        .await
        .unwrap();

    let replies = responder.replies();
    assert_eq!(replies.len(), 1);
    assert!(
        replies[0]
            .description
            .contains("There are only **`3`** tracks in the queue. You cannot skip to track **`5`**.")
    );
    assert_eq!(replies[0].color, config.embed_options.colors.warning);
}

#[tokio::test]
async fn target_in_range_skips_to_its_index() {
    let mut queue = playing_queue(Some(fixtures::song_a()), pending(3), 1);
    queue
        .expect_skip_to()
        .with(eq(2))
        .times(1)
        .returning(|_| Ok(()));
    let provider = FakeProvider::new(Some(queue));
    let responder = RecordingResponder::new();
    let config = fixtures::config();
    let invocation = fixtures::invocation(Some(SAMPLE_CHANNEL_ID));

    skip_track(&invocation, NonZeroUsize::new(3), &provider, &responder, &config)
        .await
        .unwrap();

    let replies = responder.replies();
    assert_eq!(replies.len(), 1);
    // The response names the track that was playing
    assert!(replies[0].description.contains("Skipped track"));
    assert!(replies[0].description.contains("[Song A]"));
    assert!(replies[0].description.contains("Loop mode is set to **`track`**"));
    assert_eq!(responder.id_lookups(), 0);
}

#[tokio::test]
async fn last_pending_track_is_a_valid_target() {
    let mut queue = playing_queue(Some(fixtures::song_a()), pending(3), 0);
    queue
        .expect_skip_to()
        .with(eq(2))
        .times(1)
        .returning(|_| Ok(()));
    let provider = FakeProvider::new(Some(queue));
    let responder = RecordingResponder::new();
    let config = fixtures::config();

    skip_track(
        &fixtures::invocation(Some(SAMPLE_CHANNEL_ID)),
        NonZeroUsize::new(3),
        &provider,
        &responder,
        &config,
    )
    .await
    .unwrap();

    assert_eq!(responder.replies().len(), 1);
}

#[tokio::test]
async fn plain_skip_skips_once_without_loop_note() {
    let mut queue = playing_queue(Some(fixtures::song_a()), Vec::new(), 0);
    queue.expect_skip().times(1).returning(|| Ok(()));
    let provider = FakeProvider::new(Some(queue));
    let responder = RecordingResponder::new();
    let config = fixtures::config();
    let invocation = fixtures::invocation(Some(SAMPLE_CHANNEL_ID));

    skip_track(&invocation, None, &provider, &responder, &config)
        .await
        .unwrap();

    let replies = responder.replies();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].description.contains("**`3:00` [Song A]"));
    assert!(!replies[0].description.contains("Looping"));
    assert_eq!(replies[0].author.as_ref().map(|a| a.name.as_str()), Some("Sample User"));
    assert!(responder.follow_ups().is_empty());
}

#[tokio::test]
async fn nothing_playing_is_a_warning() {
    let queue = playing_queue(None, Vec::new(), 0);
    let provider = FakeProvider::new(Some(queue));
    let responder = RecordingResponder::new();
    let config = fixtures::config();

    skip_track(
        &fixtures::invocation(Some(SAMPLE_CHANNEL_ID)),
        None,
        &provider,
        &responder,
        &config,
    )
    .await
    .unwrap();

    let replies = responder.replies();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].description.contains("There is nothing currently playing."));
}

#[tokio::test]
async fn range_warning_wins_over_unknown_repeat_mode() {
    let queue = playing_queue(Some(fixtures::song_a()), pending(3), 9);
    let provider = FakeProvider::new(Some(queue));
    let responder = RecordingResponder::new();
    let config = fixtures::config();

    skip_track(
        &fixtures::invocation(Some(SAMPLE_CHANNEL_ID)),
        NonZeroUsize::new(5),
        &provider,
        &responder,
        &config,
    )
    .await
    .unwrap();

    let replies = responder.replies();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].description.contains("There are only **`3`** tracks in the queue."));
}

#[tokio::test]
async fn unknown_repeat_mode_fails_before_mutating() {
    // No skip_to expectation: mutating would panic
    let queue = playing_queue(Some(fixtures::song_a()), pending(3), 9);
    let provider = FakeProvider::new(Some(queue));
    let responder = RecordingResponder::new();
    let config = fixtures::config();

    let result = skip_track(
        &fixtures::invocation(Some(SAMPLE_CHANNEL_ID)),
        NonZeroUsize::new(2),
        &provider,
        &responder,
        &config,
    )
    .await;

    assert!(result.is_err());
    assert!(responder.replies().is_empty());
}
