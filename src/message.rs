use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Debug)]
pub enum Message {
    FileHovered(PathBuf),
    FileHoverLeft,
    FileDropped(PathBuf),
    Tick(Instant),
}
