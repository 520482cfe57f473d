// Command-line interface for deckmark
//
// This binary turns markdown (or plain outlines) into the edit requests a slide text box needs,
// and provides views of every pipeline stage for debugging.
//
// Usage:
//  deckmark <input> [--container ID] [--replace] [-o FILE]    - Compile to Slides requests (default)
//  deckmark compile <input> ...                               - Same as above (explicit)
//  deckmark inspect <input> [<transform>]                     - Show a pipeline stage (defaults to "runs-simple")
//  deckmark apply <input>                                     - Apply to an in-memory text box and print it
//  deckmark deck <presentation.json> [-o FILE]                - Plan the cover and every slide of a generated deck
//  deckmark --list-transforms                                 - List available transforms
//
// The source format is detected from the file extension and can be forced with --from.
// Requests are written as one JSON line per batchUpdate call.

use deckmark_cli::transforms::{self, TransformContext};

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use deckmark_config::{DeckmarkConfig, Loader};
use deckmark_core::backend::{dispatch, Backend, MemoryBackend, SlidesRequestWriter};
use deckmark_core::common::compile::CompileOptions;
use deckmark_core::deck::{CoverPlaceholders, DeckPlanner, Placeholders, Presentation};
use deckmark_core::formats::slides::SlidesOptions;
use deckmark_core::transforms::compile_source;
use deckmark_core::FormatRegistry;
use std::fs;
use std::io::Write;

const SUBCOMMANDS: &[&str] = &["compile", "inspect", "apply", "deck", "help"];

fn input_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_hint(ValueHint::Other)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("deckmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile markdown into positioned text edits for slide text boxes")
        .long_about(
            "deckmark turns formatted text into the ordered insert/style/bullet requests\n\
            a remote text box needs to display it.\n\n\
            Commands:\n  \
            - compile: Produce Slides batchUpdate requests (default)\n  \
            - inspect: View a pipeline stage (tree, runs, ops, requests)\n  \
            - apply:   Run the requests against an in-memory text box\n  \
            - deck:    Plan every slide of a generated presentation\n\n\
            Examples:\n  \
            deckmark slide.md                          # Requests on stdout\n  \
            deckmark slide.md --container g1_body      # Target a specific text box\n  \
            deckmark inspect slide.md ops-json         # Compiled ops, emission order\n  \
            deckmark apply slide.md                    # What the text box would show",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a deckmark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile a document into Slides requests (default command)")
                .arg(input_arg("input", "Input file path"))
                .arg(from_arg())
                .arg(
                    Arg::new("container")
                        .long("container")
                        .value_name("ID")
                        .help("Object id of the target text box"),
                )
                .arg(
                    Arg::new("replace")
                        .long("replace")
                        .help("Clear the text box before inserting")
                        .action(ArgAction::SetTrue),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect a pipeline stage")
                .long_about(
                    "View the document at different pipeline stages.\n\n\
                    Transforms (stage-format):\n  \
                    - tree-json:           Document tree as JSON\n  \
                    - runs-json:           Styled runs and diagnostics as JSON\n  \
                    - runs-simple:         One line per run (default)\n  \
                    - ops-json:            Edit ops in emission order\n  \
                    - ops-scheduled-json:  Edit ops in apply order\n  \
                    - requests-json:       Slides batchUpdate body",
                )
                .arg(input_arg("path", "Path to the input file"))
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format). Defaults to 'runs-simple'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(from_arg()),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply the compiled edits to an in-memory text box and print it")
                .arg(input_arg("input", "Input file path"))
                .arg(from_arg()),
        )
        .subcommand(
            Command::new("deck")
                .about("Plan the edits for every slide of a presentation JSON file")
                .arg(input_arg("input", "Presentation JSON file"))
                .arg(output_arg()),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "compile"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1 && !args[1].starts_with('-') && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "compile".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let config = load_cli_config(&matches);
    init_logging(&config, matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("compile", sub_matches)) => handle_compile_command(sub_matches, &config),
        Some(("inspect", sub_matches)) => handle_inspect_command(sub_matches, &config),
        Some(("apply", sub_matches)) => handle_apply_command(sub_matches, &config),
        Some(("deck", sub_matches)) => handle_deck_command(sub_matches, &config),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(config: &DeckmarkConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Layers ./deckmark.toml, then --config, then command-line flags over the defaults.
fn load_cli_config(matches: &ArgMatches) -> DeckmarkConfig {
    let mut loader = Loader::new().with_optional_file("deckmark.toml");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    if let Some(("compile", sub_matches)) = matches.subcommand() {
        if sub_matches.get_flag("replace") {
            loader = loader
                .set_override("compile.replace", true)
                .unwrap_or_else(|err| exit_with("Invalid override", err));
        }
        if let Some(container) = sub_matches.get_one::<String>("container") {
            loader = loader
                .set_override("slides.container_id", container.as_str())
                .unwrap_or_else(|err| exit_with("Invalid override", err));
        }
    }

    loader
        .build()
        .unwrap_or_else(|err| exit_with("Failed to load configuration", err))
}

fn exit_with<E: std::fmt::Display, T>(context: &str, err: E) -> T {
    eprintln!("{context}: {err}");
    std::process::exit(1);
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Format from --from, or from the file extension.
fn resolve_format(matches: &ArgMatches, input: &str, registry: &FormatRegistry) -> String {
    if let Some(from) = matches.get_one::<String>("from") {
        if let Err(e) = registry.get(from) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return from.clone();
    }
    registry
        .detect_format_from_filename(input)
        .unwrap_or_else(|| {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        })
}

fn open_output(path: Option<&String>) -> Box<dyn Write> {
    match path {
        Some(path) => Box::new(fs::File::create(path).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        })),
        None => Box::new(std::io::stdout()),
    }
}

fn dispatch_or_exit<B: Backend + ?Sized>(
    backend: &mut B,
    container_id: &str,
    ops: &[deckmark_core::EditOp],
    batch_size: usize,
) {
    if let Err(e) = dispatch(backend, container_id, ops, batch_size) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Handle the compile command
fn handle_compile_command(matches: &ArgMatches, config: &DeckmarkConfig) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let registry = FormatRegistry::default();
    let format = resolve_format(matches, input, &registry);
    let source = read_input(input);

    let options = CompileOptions::from(&config.compile);
    let ops = compile_source(&registry, &source, &format, &options, config.compile.replace)
        .unwrap_or_else(|e| {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        });

    let sink = open_output(matches.get_one::<String>("output"));
    let mut writer = SlidesRequestWriter::new(sink, SlidesOptions::from(&config.slides));
    dispatch_or_exit(
        &mut writer,
        &config.slides.container_id,
        &ops,
        config.slides.batch_size,
    );
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches, config: &DeckmarkConfig) {
    let path = matches
        .get_one::<String>("path")
        .expect("path is required");
    let transform = matches
        .get_one::<String>("transform")
        .map(|s| s.as_str())
        .unwrap_or(transforms::DEFAULT_TRANSFORM);
    let registry = FormatRegistry::default();
    let format = resolve_format(matches, path, &registry);
    let source = read_input(path);

    let context = TransformContext {
        format,
        compile: CompileOptions::from(&config.compile),
        slides: SlidesOptions::from(&config.slides),
        container_id: config.slides.container_id.clone(),
        replace: config.compile.replace,
    };

    let output = transforms::execute_transform(&source, transform, &context).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the apply command
fn handle_apply_command(matches: &ArgMatches, config: &DeckmarkConfig) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let registry = FormatRegistry::default();
    let format = resolve_format(matches, input, &registry);
    let source = read_input(input);

    // The memory backend indexes by chars.
    let mut options = CompileOptions::from(&config.compile);
    options.offset_unit = Default::default();
    let ops = compile_source(&registry, &source, &format, &options, false).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let container_id = config.slides.container_id.as_str();
    let mut backend = MemoryBackend::with_container(container_id);
    dispatch_or_exit(&mut backend, container_id, &ops, config.slides.batch_size);

    if let Some(buffer) = backend.buffer(container_id) {
        println!("{}", buffer.render_outline());
    }
}

/// Handle the deck command
fn handle_deck_command(matches: &ArgMatches, config: &DeckmarkConfig) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let presentation = Presentation::from_json(&read_input(input)).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let mut planner = DeckPlanner::new(CompileOptions::from(&config.compile));
    let date = chrono::Local::now().format("%m/%d/%Y").to_string();
    let mut edits = planner
        .plan_cover(&presentation, &CoverPlaceholders::numbered(), &date)
        .unwrap_or_else(|e| exit_with("Error", e));
    edits.extend(
        planner
            .plan_presentation(&presentation, Placeholders::numbered)
            .unwrap_or_else(|e| exit_with("Error", e)),
    );

    let sink = open_output(matches.get_one::<String>("output"));
    let mut writer = SlidesRequestWriter::new(sink, SlidesOptions::from(&config.slides));
    for edit in &edits {
        dispatch_or_exit(
            &mut writer,
            &edit.container_id,
            &edit.ops,
            config.slides.batch_size,
        );
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("Stages:");
    println!("  tree        - Document tree (after parsing)");
    println!("  runs        - Styled runs (after flattening)");
    println!("  ops         - Edit operations (after compiling)");
    println!("  requests    - Slides batchUpdate body (after encoding)\n");

    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }

    println!("\nSource formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        println!("  {format_name}");
    }
}
