use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use kinoscript::{Engine, ErrorPolicy, FrameIndex, Registries};

#[derive(Parser, Debug)]
#[command(name = "kinoscript", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a script document and print all diagnostics.
    Validate(ValidateArgs),
    /// Print the layout catalog as JSON (for authoring tools).
    Layouts,
    /// Compute one frame and print its draw list as JSON.
    Frame(FrameArgs),
    /// Print fps, canvas, total frames, and entity counts.
    Probe(ProbeArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Fail on unknown scene layouts instead of skipping them.
    #[arg(long)]
    strict: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Layouts => cmd_layouts(),
        Command::Frame(args) => cmd_frame(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn read_doc(path: &Path) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse script '{}'", path.display()))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let doc = read_doc(&args.in_path)?;
    let policy = if args.strict {
        ErrorPolicy::Strict
    } else {
        ErrorPolicy::Lenient
    };
    let engine = Engine::new(Registries::builtin()).with_policy(policy);
    let session = engine.open(&doc);

    for diag in session.diagnostics() {
        eprintln!("{}", serde_json::to_string(diag)?);
    }
    if session.is_ready() {
        println!("ok: {} frames", session.total_frames());
        Ok(())
    } else {
        anyhow::bail!("script is invalid; every frame would render the diagnostic state");
    }
}

fn cmd_layouts() -> anyhow::Result<()> {
    let registries = Registries::builtin();
    let catalog: serde_json::Map<String, serde_json::Value> = registries
        .layouts
        .iter()
        .map(|(name, def)| Ok((name.to_string(), serde_json::to_value(def)?)))
        .collect::<anyhow::Result<_>>()?;
    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let doc = read_doc(&args.in_path)?;
    let engine = Engine::new(Registries::builtin());
    let session = engine.open(&doc);
    let state = session.frame(FrameIndex(args.frame));
    let out = if args.pretty {
        serde_json::to_string_pretty(&state)?
    } else {
        serde_json::to_string(&state)?
    };
    println!("{out}");
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let doc = read_doc(&args.in_path)?;
    let engine = Engine::new(Registries::builtin());
    let session = engine.open(&doc);
    match session.script() {
        Some(script) => {
            println!(
                "fps: {}  canvas: {}x{}",
                script.settings.fps, script.settings.width, script.settings.height
            );
            println!("total frames: {}", session.total_frames());
            println!(
                "scenes: {}  subtitles: {}  text track items: {}",
                script.scenes.len(),
                script.subtitles.len(),
                script.text_track.len()
            );
            println!("diagnostics: {}", session.diagnostics().len());
            Ok(())
        }
        None => anyhow::bail!("script failed validation"),
    }
}
