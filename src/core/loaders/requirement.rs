use std::fmt;

/// Loader id of the datapack pseudo-loader, as published on Modrinth.
const DATAPACK_LOADER: &str = "datapack";

const DATAPACK_DIR: &str = "datapacks";
const DATAPACK_EXTENSION: &str = ".zip";
const JAR_EXTENSION: &str = ".jar";

/// What a section of the pack list asks for: a real server loader
/// (`paper`, `fabric`, ...) or the `datapack` pseudo-loader.
///
/// The variant decides which file extension is eligible and where the
/// download lands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoaderRequirement {
    Datapack,
    Loader(String),
}

impl LoaderRequirement {
    /// Interpret the identifier of a `[section]` header. Case-insensitive.
    pub fn from_header(identifier: &str) -> Self {
        let id = identifier.trim().to_lowercase();
        match id.as_str() {
            "datapack" | "datapacks" => Self::Datapack,
            _ => Self::Loader(id),
        }
    }

    /// Loader id matched against a release's declared `loaders`.
    pub fn loader_id(&self) -> &str {
        match self {
            Self::Datapack => DATAPACK_LOADER,
            Self::Loader(id) => id,
        }
    }

    pub fn required_extension(&self) -> &'static str {
        match self {
            Self::Datapack => DATAPACK_EXTENSION,
            Self::Loader(_) => JAR_EXTENSION,
        }
    }

    /// Top-level output directory, used verbatim.
    pub fn dir_name(&self) -> &str {
        match self {
            Self::Datapack => DATAPACK_DIR,
            Self::Loader(id) => id,
        }
    }
}

impl fmt::Display for LoaderRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.loader_id())
    }
}
