pub mod cache;
pub mod driver;
pub mod parser;

pub use cache::{cache_path, PackSource, CACHE_SUFFIX};
pub use driver::{EntryOutcome, EntryStatus, ManifestDriver, ProjectRef, RunReport, RunSummary};
pub use parser::{classify, LineKind, LineSyntax, PackEntry, PackLine, PackList, DIR_MARKER};
