pub mod app_dirs;
pub mod media;
pub mod snapshot;
pub mod time;

pub use app_dirs::DirsAppDirsAdapter;
pub use media::FsMediaReader;
pub use snapshot::FileSnapshotRepository;
pub use time::LocalClock;
