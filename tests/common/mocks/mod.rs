//! Mock implementations for external dependencies
//! The player queue is mocked with mockall; the Discord side is a recording fake.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use mockall::mock;
use serenity::model::id::{GuildId, MessageId, UserId};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use jukebox::Error;
use jukebox::commands::music::audio_sources::TrackMetadata;
use jukebox::commands::music::utils::embedded_messages::MusicResponse;
use jukebox::commands::music::utils::music_manager::MusicResult;
use jukebox::commands::music::utils::player_queue::{
    PlaybackState, PlayerQueue, QueueProvider, VoiceChannelInfo,
};
use jukebox::commands::music::utils::responder::{ButtonClick, CommandResponder};

use super::fixtures;

mock! {
    pub Queue {}

    #[async_trait]
    impl PlayerQueue for Queue {
        fn channel(&self) -> VoiceChannelInfo;
        fn current_track(&self) -> Option<TrackMetadata>;
        fn tracks(&self) -> Vec<TrackMetadata>;
        fn repeat_mode(&self) -> u8;
        async fn playback_state(&self) -> MusicResult<PlaybackState>;
        fn skip(&self) -> MusicResult<()>;
        fn skip_to(&self, index: usize) -> MusicResult<()>;
    }
}

/// A queue bound to the sample channel with `current` playing and `pending` waiting.
/// Mutations are left unexpected so a test must opt in to them.
pub fn playing_queue(
    current: Option<TrackMetadata>,
    pending: Vec<TrackMetadata>,
    repeat_mode: u8,
) -> MockQueue {
    let mut queue = MockQueue::new();
    queue.expect_channel().returning(fixtures::voice_channel);
    queue
        .expect_current_track()
        .returning(move || current.clone());
    queue.expect_tracks().returning(move || pending.clone());
    queue.expect_repeat_mode().returning(move || repeat_mode);
    queue
        .expect_playback_state()
        .returning(|| Ok(PlaybackState::default()));
    queue
}

/// Hands out queue snapshots in order, repeating the last one
pub struct FakeProvider {
    snapshots: Mutex<VecDeque<Option<Arc<dyn PlayerQueue>>>>,
    lookups: AtomicUsize,
}

impl FakeProvider {
    pub fn new(queue: Option<MockQueue>) -> Self {
        Self::sequence(vec![queue.map(|q| Arc::new(q) as Arc<dyn PlayerQueue>)])
    }

    pub fn sequence(snapshots: Vec<Option<Arc<dyn PlayerQueue>>>) -> Self {
        Self {
            snapshots: Mutex::new(snapshots.into()),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueueProvider for FakeProvider {
    async fn get_queue(&self, _guild_id: GuildId) -> Option<Arc<dyn PlayerQueue>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let mut snapshots = self.snapshots.lock().unwrap();
        if snapshots.len() > 1 {
            snapshots.pop_front().flatten()
        } else {
            snapshots.front().cloned().flatten()
        }
    }
}

pub struct FakeClick {
    user_id: UserId,
    custom_id: String,
    acknowledged: Arc<AtomicUsize>,
}

#[async_trait]
impl ButtonClick for FakeClick {
    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn custom_id(&self) -> &str {
        &self.custom_id
    }

    async fn acknowledge(&self) -> Result<(), Error> {
        self.acknowledged.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Records every response and replays queued button clicks. After the queued clicks
/// the stream stays open, like a collector nobody interacts with.
#[derive(Default)]
pub struct RecordingResponder {
    replies: Mutex<Vec<MusicResponse>>,
    follow_ups: Mutex<Vec<MusicResponse>>,
    clicks: Mutex<Vec<FakeClick>>,
    acknowledged: Arc<AtomicUsize>,
    id_lookups: AtomicUsize,
    watched: Mutex<Option<MessageId>>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_click(self, user_id: u64, custom_id: impl Into<String>) -> Self {
        self.clicks.lock().unwrap().push(FakeClick {
            user_id: UserId::new(user_id),
            custom_id: custom_id.into(),
            acknowledged: Arc::clone(&self.acknowledged),
        });
        self
    }

    pub fn replies(&self) -> Vec<MusicResponse> {
        self.replies.lock().unwrap().clone()
    }

    pub fn follow_ups(&self) -> Vec<MusicResponse> {
        self.follow_ups.lock().unwrap().clone()
    }

    pub fn acknowledged(&self) -> usize {
        self.acknowledged.load(Ordering::SeqCst)
    }

    /// How many replies asked for the id of their message
    pub fn id_lookups(&self) -> usize {
        self.id_lookups.load(Ordering::SeqCst)
    }

    /// The message whose buttons the handler listened to, if any
    pub fn watched(&self) -> Option<MessageId> {
        *self.watched.lock().unwrap()
    }
}

#[async_trait]
impl CommandResponder for RecordingResponder {
    type Click = FakeClick;

    async fn reply(&self, response: MusicResponse) -> Result<(), Error> {
        self.replies.lock().unwrap().push(response);
        Ok(())
    }

    async fn reply_with_id(&self, response: MusicResponse) -> Result<MessageId, Error> {
        self.id_lookups.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock().unwrap();
        replies.push(response);
        Ok(MessageId::new(1000 + replies.len() as u64))
    }

    async fn follow_up(&self, response: MusicResponse) -> Result<(), Error> {
        self.follow_ups.lock().unwrap().push(response);
        Ok(())
    }

    fn button_clicks(&self, message_id: MessageId) -> BoxStream<'static, Self::Click> {
        *self.watched.lock().unwrap() = Some(message_id);
        let clicks = std::mem::take(&mut *self.clicks.lock().unwrap());
        stream::iter(clicks).chain(stream::pending()).boxed()
    }
}
