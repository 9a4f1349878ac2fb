use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use axis_timing::{
    ColorPolicy, DopeSheet, FrameIndex, GraphView, IngestOpts, PRESETS, PropertyName,
    PropertyPath, RenderItem, Scene, SceneHandle, Transport, TransportOpts, layout_at,
    preset_curve,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "axis-timing", version)]
struct Cli {
    /// More log output on stderr (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a scene from per-frame track records (document or concatenated stream).
    Ingest(IngestArgs),
    /// Print what is visible at one frame, or one property value.
    Eval(EvalArgs),
    /// Apply a curve preset to one property.
    Preset(PresetArgs),
    /// List the curve presets.
    Presets,
    /// Print the dope sheet as JSON.
    DopeSheet(DopeSheetArgs),
    /// Print the graph editor contents for one property as JSON.
    Graph(GraphArgs),
    /// Run the transport headless and print marker positions per tick.
    Play(PlayArgs),
    /// Write the built-in authored scene.
    Demo(DemoArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    Hash,
    Insertion,
}

#[derive(Parser, Debug)]
struct IngestArgs {
    /// Track records; `-` reads stdin.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output scene JSON.
    #[arg(long)]
    out: PathBuf,

    /// Records merged per snapshot.
    #[arg(long, default_value_t = 100)]
    batch_size: usize,

    /// Colour assignment policy.
    #[arg(long, value_enum, default_value_t = ColorChoice::Hash)]
    color_policy: ColorChoice,

    /// Scene id.
    #[arg(long, default_value = "S_Backend_Data")]
    scene_id: String,
}

#[derive(Parser, Debug)]
struct PathArgs {
    /// Object id.
    #[arg(long)]
    object: String,

    /// Motion name.
    #[arg(long)]
    motion: String,

    /// Property name (positionX, positionY, rotation, scale).
    #[arg(long, value_parser = parse_property)]
    property: PropertyName,
}

impl PathArgs {
    fn path(&self) -> PropertyPath {
        PropertyPath::new(self.object.clone(), self.motion.clone(), self.property)
    }
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Only print this object's value.
    #[arg(long, requires = "property")]
    object: Option<String>,

    /// Property to print with `--object`.
    #[arg(long, value_parser = parse_property)]
    property: Option<PropertyName>,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output scene JSON.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    target: PathArgs,

    /// Preset id or label.
    #[arg(long)]
    preset: String,
}

#[derive(Parser, Debug)]
struct DopeSheetArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Playhead frame.
    #[arg(long, default_value_t = 0)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct GraphArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    target: PathArgs,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scheduler ticks to run.
    #[arg(long)]
    ticks: u64,

    /// Simulated time between ticks.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    tick_ms: f64,

    /// Frame to start from.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Stop at the last frame instead of looping.
    #[arg(long)]
    no_wrap: bool,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Output scene JSON.
    #[arg(long)]
    out: PathBuf,
}

fn parse_property(s: &str) -> Result<PropertyName, String> {
    s.parse::<PropertyName>().map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Ingest(args) => cmd_ingest(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Preset(args) => cmd_preset(args),
        Command::Presets => cmd_presets(),
        Command::DopeSheet(args) => cmd_dope_sheet(args),
        Command::Graph(args) => cmd_graph(args),
        Command::Play(args) => cmd_play(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_scene(path: &Path) -> anyhow::Result<Scene> {
    let scene =
        Scene::from_path(path).with_context(|| format!("read scene '{}'", path.display()))?;
    if let Err(err) = scene.validate() {
        tracing::warn!(%err, "scene has structural problems");
    }
    Ok(scene)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

fn cmd_ingest(args: IngestArgs) -> anyhow::Result<()> {
    let opts = IngestOpts {
        scene_id: args.scene_id,
        batch_size: args.batch_size,
        color_policy: match args.color_policy {
            ColorChoice::Hash => ColorPolicy::Hash,
            ColorChoice::Insertion => ColorPolicy::InsertionOrder,
        },
        ..IngestOpts::default()
    };

    let reader: Box<dyn Read> = if args.in_path.as_os_str() == "-" {
        Box::new(std::io::stdin().lock())
    } else {
        let f = File::open(&args.in_path)
            .with_context(|| format!("open track records '{}'", args.in_path.display()))?;
        Box::new(BufReader::new(f))
    };

    let handle = SceneHandle::new(Arc::new(Scene::empty(opts.scene_id.clone())));
    let stats = axis_timing::ingest_reader(reader, opts, &handle, |s| {
        tracing::info!(records = s.records, objects = s.objects, "batch published");
    })?;

    handle
        .load()
        .write_path(&args.out)
        .with_context(|| format!("write scene '{}'", args.out.display()))?;
    print_json(&stats)
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let frame = FrameIndex(args.frame);
    match (args.object, args.property) {
        (Some(object), Some(property)) => {
            let value = scene.try_value_at(&object, property, frame)?;
            println!("{value}");
            Ok(())
        }
        _ => print_json(&layout_at(&scene, frame)),
    }
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let path = args.target.path();
    let curve = preset_curve(&scene, &path, &args.preset)
        .with_context(|| format!("cannot apply preset '{}' to {path}", args.preset))?;
    let edited = axis_timing::apply_curve_edit(&scene, &path, curve);
    edited
        .write_path(&args.out)
        .with_context(|| format!("write scene '{}'", args.out.display()))?;
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for p in PRESETS.iter() {
        let f = p.factors;
        println!(
            "{:<14}{:<16}{} {} {} {}",
            p.id, p.label, f.cx1, f.cy1, f.cx2, f.cy2
        );
    }
    Ok(())
}

fn cmd_dope_sheet(args: DopeSheetArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    print_json(&DopeSheet::build(&scene, None, FrameIndex(args.frame)))
}

fn cmd_graph(args: GraphArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let path = args.target.path();
    let graph = GraphView::build(&scene, &path)
        .with_context(|| format!("{path} does not resolve"))?;
    print_json(&graph)
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let mut transport = Transport::manual(TransportOpts {
        duration: scene.duration,
        wrap: !args.no_wrap,
    });
    transport.try_seek(FrameIndex(args.start))?;
    transport.play();

    print_markers(&scene, transport.frame());
    for _ in 0..args.ticks {
        let Some(tick) = transport.pump(args.tick_ms) else {
            break;
        };
        if tick.advanced {
            print_markers(&scene, tick.frame);
        }
    }
    Ok(())
}

fn print_markers(scene: &Scene, frame: FrameIndex) {
    for item in layout_at(scene, frame) {
        if let RenderItem::Marker { id, x, y, .. } = item {
            println!("{frame} {id} {x:.3} {y:.3}");
        }
    }
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    Scene::demo()
        .write_path(&args.out)
        .with_context(|| format!("write scene '{}'", args.out.display()))?;
    Ok(())
}
