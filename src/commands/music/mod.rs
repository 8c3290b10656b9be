pub mod loop_mode;
pub mod nowplaying;
pub mod play;
pub mod skip;

pub mod audio_sources;
pub mod utils;

pub use loop_mode::loop_mode;
pub use nowplaying::nowplaying;
pub use play::play;
pub use skip::skip;
