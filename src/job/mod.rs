/// Background encode jobs and completion polling.
pub mod background;
