mod fs_reader;

pub use fs_reader::FsMediaReader;
