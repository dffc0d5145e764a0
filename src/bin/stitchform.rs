use std::{
    io::Read as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stitchform::{
    FileStore, MemoryStore, PlayerConfig, Projection, RoundPlayer, SnapshotStore, SvgOpts,
    Terminology,
};

#[derive(Parser, Debug)]
#[command(name = "stitchform", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a pattern and print one line per round.
    Parse(ParseArgs),
    /// Build rounds and print their geometry.
    Play(PlayArgs),
    /// Build every round and write an SVG drawing.
    Svg(SvgArgs),
    /// Rebuild the last auto-saved session from a store directory.
    Resume(ResumeArgs),
}

#[derive(Args, Debug)]
struct PatternInput {
    /// Pattern text file, `-` for stdin.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pattern uses UK stitch names.
    #[arg(long)]
    uk: bool,
}

impl PatternInput {
    fn terms(&self) -> Terminology {
        Terminology::from_us_flag(!self.uk)
    }
}

#[derive(Args, Debug)]
struct ParseArgs {
    #[command(flatten)]
    input: PatternInput,

    /// Print the parsed pattern as JSON.
    #[arg(long)]
    json: bool,

    /// Show a beginner hint next to each round.
    #[arg(long)]
    hints: bool,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    input: PatternInput,

    /// Number of rounds to build (default: all).
    #[arg(long)]
    rounds: Option<usize>,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for saved and auto-saved snapshots.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Save the pattern under the manual key when done.
    #[arg(long, requires = "store")]
    save: bool,
}

#[derive(Args, Debug)]
struct SvgArgs {
    #[command(flatten)]
    input: PatternInput,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Draw from the side instead of from above.
    #[arg(long)]
    side: bool,

    /// Longer image side in pixels.
    #[arg(long, default_value_t = 512.0)]
    size: f64,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ResumeArgs {
    /// Directory holding the auto-save.
    #[arg(long)]
    store: PathBuf,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Parse(args) => cmd_parse(args),
        Command::Play(args) => cmd_play(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Resume(args) => cmd_resume(args),
    }
}

fn read_pattern_text(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("read pattern from stdin")?;
        return Ok(s);
    }
    std::fs::read_to_string(path).with_context(|| format!("open pattern '{}'", path.display()))
}

fn read_config(path: Option<&Path>) -> anyhow::Result<PlayerConfig> {
    let Some(path) = path else {
        return Ok(PlayerConfig::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open config '{}'", path.display()))?;
    PlayerConfig::from_json_str(&s).with_context(|| format!("parse config '{}'", path.display()))
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let text = read_pattern_text(&args.input.in_path)?;
    let pattern = stitchform::parse(&stitchform::normalize(&text, args.input.terms()));

    if args.json {
        println!("{}", stitchform::pattern_to_json(&pattern)?);
        return Ok(());
    }

    for round in &pattern {
        let flags = match (round.has_increase, round.has_decrease) {
            (true, true) => " +/-",
            (true, false) => " +",
            (false, true) => " -",
            (false, false) => "",
        };
        println!(
            "R{:<3} {:>5} st{flags:<5} {}",
            round.index, round.stitch_count, round.source_text
        );
        if args.hints
            && let Some(hint) = stitchform::hint_for_line(&round.source_text)
        {
            println!("       {hint}");
        }
    }
    let summary = pattern.summary();
    println!(
        "{} rounds, {} stitches, widest {}",
        summary.rounds, summary.total_stitches, summary.max_stitches
    );
    Ok(())
}

fn open_store(dir: Option<&Path>) -> Box<dyn SnapshotStore> {
    match dir {
        Some(dir) => Box::new(FileStore::new(dir)),
        None => Box::new(MemoryStore::new()),
    }
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let text = read_pattern_text(&args.input.in_path)?;
    let config = read_config(args.config.as_deref())?;
    let mut player = RoundPlayer::new(open_store(args.store.as_deref()), config);

    player.load_pattern(&text, args.input.terms());
    let wanted = args.rounds.unwrap_or(usize::MAX);
    while player.cursor() < wanted {
        let Some(round) = player.advance(&mut ()) else {
            break;
        };
        let radius = round
            .anchors()
            .first()
            .map_or(0.0, |a| a.position.x.hypot(a.position.z));
        let line = format!(
            "{:>5} anchors  radius {radius:.3}  ring {:>5}  links {:>5}",
            round.stitch_count(),
            round.within_round().len(),
            round.cross_round().len(),
        );
        println!("R{:<3} {line}", player.cursor());
    }

    if args.save {
        player.save().context("save pattern")?;
        eprintln!("saved {} rounds", player.pattern().len());
    }
    eprintln!("built {}/{} rounds", player.cursor(), player.pattern().len());
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let text = read_pattern_text(&args.input.in_path)?;
    let config = read_config(args.config.as_deref())?;
    let mut player = RoundPlayer::new(MemoryStore::new(), config);
    player.load_pattern(&text, args.input.terms());
    player.advance_all(&mut ());

    let opts = SvgOpts {
        projection: if args.side {
            Projection::Side
        } else {
            Projection::TopDown
        },
        size: args.size,
        ..SvgOpts::default()
    };
    let svg = stitchform::render_svg(player.rounds(), &opts);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, svg).with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_resume(args: ResumeArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let mut player = RoundPlayer::new(FileStore::new(&args.store), config);

    if !player.recover(&mut ()) {
        anyhow::bail!("no auto-save found in '{}'", args.store.display());
    }
    println!(
        "resumed at round {}/{}",
        player.cursor(),
        player.pattern().len()
    );
    if let Some(next) = player.pattern().get(player.cursor()) {
        println!("next: {}", next.source_text);
    }
    Ok(())
}
