use pretty_assertions::assert_eq;
use std::sync::Arc;
use tokio::time::Instant;

use jukebox::commands::music::nowplaying::{SKIP_BUTTON_TIMEOUT, show_now_playing};
use jukebox::commands::music::utils::button_controls::skip_button_id;
use jukebox::commands::music::utils::player_queue::PlayerQueue;

use crate::common::fixtures::{self, OTHER_USER_ID, SAMPLE_CHANNEL_ID, SAMPLE_USER_ID};
use crate::common::mocks::{FakeProvider, RecordingResponder, playing_queue};
use crate::test_utils;

#[tokio::test(start_paused = true)]
async fn caller_click_skips_the_track_once() {
    test_utils::init();
    let song_a = fixtures::song_a();
    let mut queue = playing_queue(Some(song_a.clone()), Vec::new(), 2);
    queue.expect_skip().times(1).returning(|| Ok(()));
    let provider = FakeProvider::new(Some(queue));
    let responder = RecordingResponder::new().with_click(SAMPLE_USER_ID, skip_button_id(&song_a));
    let config = fixtures::config();
    let invocation = fixtures::invocation(Some(SAMPLE_CHANNEL_ID));

    show_now_playing(&invocation, &provider, &responder, &config)
        .await
        .unwrap();

    let replies = responder.replies();
    assert_eq!(replies.len(), 1);
    let now_playing = &replies[0];
    assert!(now_playing.description.contains("Song A"));
    assert!(now_playing.description.contains("Loop mode is set to **`queue`**"));
    assert_eq!(now_playing.buttons.len(), 1);
    assert_eq!(now_playing.buttons[0].custom_id, skip_button_id(&song_a));
    assert_eq!(responder.watched().map(|id| id.get()), Some(1001));
    assert_eq!(responder.id_lookups(), 1);

    let follow_ups = responder.follow_ups();
    assert_eq!(follow_ups.len(), 1);
    assert!(follow_ups[0].description.contains("Skipped track"));
    assert!(follow_ups[0].description.contains("Song A"));
    assert_eq!(responder.acknowledged(), 1);
    assert_eq!(provider.lookups(), 2);
}

#[tokio::test(start_paused = true)]
async fn other_users_click_is_ignored_until_timeout() {
    let song_a = fixtures::song_a();
    // No skip expectation: a skip here would panic
    let queue = playing_queue(Some(song_a.clone()), Vec::new(), 2);
    let provider = FakeProvider::new(Some(queue));
    let responder = RecordingResponder::new().with_click(OTHER_USER_ID, skip_button_id(&song_a));
    let config = fixtures::config();
    let invocation = fixtures::invocation(Some(SAMPLE_CHANNEL_ID));

    let started = Instant::now();
    show_now_playing(&invocation, &provider, &responder, &config)
        .await
        .unwrap();

    assert!(started.elapsed() >= SKIP_BUTTON_TIMEOUT);
    assert_eq!(responder.replies().len(), 1);
    assert!(responder.follow_ups().is_empty());
    assert_eq!(responder.acknowledged(), 0);
}

#[tokio::test(start_paused = true)]
async fn click_after_track_changed_is_reported_stale() {
    let song_a = fixtures::song_a();
    let song_b = fixtures::song_b();
    let before: Arc<dyn PlayerQueue> =
        Arc::new(playing_queue(Some(song_a.clone()), vec![song_b.clone()], 0));
    let after: Arc<dyn PlayerQueue> = Arc::new(playing_queue(Some(song_b), Vec::new(), 0));
    let provider = FakeProvider::sequence(vec![Some(before), Some(after)]);
    let responder = RecordingResponder::new().with_click(SAMPLE_USER_ID, skip_button_id(&song_a));
    let config = fixtures::config();
    let invocation = fixtures::invocation(Some(SAMPLE_CHANNEL_ID));

    show_now_playing(&invocation, &provider, &responder, &config)
        .await
        .unwrap();

    let follow_ups = responder.follow_ups();
    assert_eq!(follow_ups.len(), 1);
    assert!(
        follow_ups[0]
            .description
            .contains("This track has already been skipped or is no longer playing.")
    );
    assert_eq!(responder.acknowledged(), 1);
}

#[tokio::test(start_paused = true)]
async fn click_after_queue_ended_reports_nothing_playing() {
    let song_a = fixtures::song_a();
    let before: Arc<dyn PlayerQueue> = Arc::new(playing_queue(Some(song_a.clone()), Vec::new(), 0));
    let provider = FakeProvider::sequence(vec![Some(before), None]);
    let responder = RecordingResponder::new().with_click(SAMPLE_USER_ID, skip_button_id(&song_a));
    let config = fixtures::config();
    let invocation = fixtures::invocation(Some(SAMPLE_CHANNEL_ID));

    show_now_playing(&invocation, &provider, &responder, &config)
        .await
        .unwrap();

    let follow_ups = responder.follow_ups();
    assert_eq!(follow_ups.len(), 1);
    assert!(follow_ups[0].description.contains("There is nothing currently playing."));
}

#[tokio::test(start_paused = true)]
async fn failed_validation_sends_one_warning_and_no_button() {
    let provider = FakeProvider::new(None);
    let responder = RecordingResponder::new();
    let config = fixtures::config();
    let invocation = fixtures::invocation(Some(SAMPLE_CHANNEL_ID));

    let started = Instant::now();
    show_now_playing(&invocation, &provider, &responder, &config)
        .await
        .unwrap();

    let replies = responder.replies();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].description.contains("There are no tracks in the queue"));
    assert!(replies[0].buttons.is_empty());
    assert_eq!(responder.watched(), None);
    assert_eq!(responder.id_lookups(), 0);
    assert!(started.elapsed() < SKIP_BUTTON_TIMEOUT);
}

#[tokio::test(start_paused = true)]
async fn unknown_repeat_mode_is_an_error() {
    let queue = playing_queue(Some(fixtures::song_a()), Vec::new(), 9);
    let provider = FakeProvider::new(Some(queue));
    let responder = RecordingResponder::new();
    let config = fixtures::config();
    let invocation = fixtures::invocation(Some(SAMPLE_CHANNEL_ID));

    let result = show_now_playing(&invocation, &provider, &responder, &config).await;

    assert!(result.is_err());
    assert!(responder.replies().is_empty());
}
