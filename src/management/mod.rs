mod backup;

pub use backup::BackupManager;
pub use backup::BackupSource;
