//! Backup files kept for audit and manual recovery

mod record;
mod store;

pub use record::MigrationRecord;
pub use store::BackupStore;
