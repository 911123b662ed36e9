use anyhow::{Context, Result};
use clap::Parser;

use scm_version::{resolve_decomposed_version, resolve_version, ResolveOptions};

#[derive(clap::Parser)]
#[command(
    name = "scm-version",
    version,
    about = "Derive a PEP 440 version string from SCM checkout state"
)]
struct Args {
    #[arg(help = "Path of the SCM checkout (defaults to the current directory)")]
    path: Option<std::path::PathBuf>,

    #[arg(
        short,
        long,
        help = "Report the installed version of this package, if any, before querying SCM"
    )]
    module: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Print '<name> <major> <minor> <patch>' instead of the version string"
    )]
    build_info: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let options = ResolveOptions {
        module_name: args.module,
        override_path: args.path,
    };

    if let Some(name) = args.build_info {
        let info = resolve_decomposed_version(&name, &options)
            .context("failed to resolve build info")?;
        println!("{}", info);
        return Ok(());
    }

    let version = resolve_version(&options).context("failed to resolve version")?;
    println!("{}", version);
    Ok(())
}
