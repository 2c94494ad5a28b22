// ─── packfetch core ───
// Resolves pack list entries against Modrinth and downloads the best build.
//
// Architecture:
//   core/
//     version/    : VersionKey + the target version
//     loaders/    : Loader requirements + compatibility table
//     registry/   : Modrinth model + client
//     resolver/   : Release selection across degradation tiers
//     retry       : Bounded retry driver
//     downloader/ : Streaming downloads with SHA-1 validation
//     manifest/   : Pack list parser, cache file, per-entry driver
//     report/     : User-facing output sink
//     state/      : Config + wired-up application state

pub mod downloader;
pub mod error;
pub mod http;
pub mod loaders;
pub mod manifest;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod retry;
pub mod state;
pub mod version;
