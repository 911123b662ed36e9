pub mod error;
pub mod metadata;
pub mod normalize;
pub mod resolver;
pub mod scm;
pub mod version;

pub use error::{Result, ScmVersionError};
pub use resolver::{resolve_decomposed_version, resolve_version, ResolveOptions, Resolver};
pub use version::BuildInfo;
