mod key;
mod target;

pub use key::VersionKey;
pub use target::TargetVersion;
