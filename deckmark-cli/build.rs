use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &[
    "tree-json",
    "runs-json",
    "runs-simple",
    "ops-json",
    "ops-scheduled-json",
    "requests-json",
];

fn file_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("deckmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile markdown into positioned text edits for slide text boxes")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("compile")
                .arg(file_arg("input"))
                .arg(Arg::new("container").long("container"))
                .arg(
                    Arg::new("replace")
                        .long("replace")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect").arg(file_arg("path")).arg(
                Arg::new("transform")
                    .value_parser(clap::builder::PossibleValuesParser::new(
                        AVAILABLE_TRANSFORMS,
                    ))
                    .index(2)
                    .value_hint(ValueHint::Other),
            ),
        )
        .subcommand(Command::new("apply").arg(file_arg("input")))
        .subcommand(Command::new("deck").arg(file_arg("input")));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "deckmark", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "deckmark", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "deckmark", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
