use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wordweave::{
    FileKv, HttpStore, MemoryStore, PollOutcome, SnapshotStats, SnapshotStore,
    StoreState, SurfaceSize, WeaveBackend as _, WeaveConfig, WeaveError, WeaveSession,
};

#[derive(Parser, Debug)]
#[command(name = "wordweave", version)]
struct Cli {
    /// JSON config file. `WORDWEAVE_*` env vars override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot store base URL.
    #[arg(long, global = true)]
    store_url: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the in-memory snapshot store.
    Serve(ServeArgs),
    /// Contribute one word.
    Add(AddArgs),
    /// Poll the store and rewrite a PNG whenever the weave changes.
    Watch(WatchArgs),
    /// Fetch once and write the weave as a PNG.
    Export(ExportArgs),
    /// Print contribution statistics.
    Stats(StatsArgs),
    /// Clear the whole collection (irreversible).
    Reset(ResetArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: std::net::IpAddr,

    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Password required by DELETE /words.
    #[arg(long)]
    admin_password: String,
}

#[derive(Args, Debug)]
struct StateArgs {
    /// Persisted client state (quota counter).
    #[arg(long, default_value = "wordweave-state.json")]
    state: PathBuf,
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Draw a marker at every word.
    #[arg(long)]
    show_words: bool,

    /// Font file for word labels (implies --show-words).
    #[arg(long)]
    label_font: Option<PathBuf>,
}

impl SurfaceArgs {
    fn surface(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height).with_device_pixel_ratio(self.scale)
    }

    fn apply(&self, config: &WeaveConfig) -> WeaveConfig {
        let mut config = config.clone();
        if self.show_words || self.label_font.is_some() {
            config.show_words = true;
        }
        if let Some(font) = &self.label_font {
            config.label_font = Some(font.clone());
        }
        config
    }
}

#[derive(Args, Debug)]
struct AddArgs {
    text: String,

    #[command(flatten)]
    state: StateArgs,
}

#[derive(Args, Debug)]
struct WatchArgs {
    #[command(flatten)]
    state: StateArgs,

    #[command(flatten)]
    surface: SurfaceArgs,

    /// Stop after this many poll cycles.
    #[arg(long)]
    cycles: Option<u64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Only list words containing this text (case-insensitive).
    #[arg(long)]
    filter: Option<String>,

    /// Print as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ResetArgs {
    #[arg(long)]
    admin_password: String,

    #[command(flatten)]
    state: StateArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "wordweave=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = WeaveConfig::load(cli.config.as_deref()).context("load config")?;
    if let Some(url) = cli.store_url {
        config.store_url = url;
    }

    match cli.cmd {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Add(args) => cmd_add(&config, args).await,
        Command::Watch(args) => cmd_watch(&config, args).await,
        Command::Export(args) => cmd_export(&config, args).await,
        Command::Stats(args) => cmd_stats(&config, args).await,
        Command::Reset(args) => cmd_reset(&config, args).await,
    }
}

fn http_store(config: &WeaveConfig) -> anyhow::Result<HttpStore> {
    Ok(HttpStore::new(&config.store_url, config.fetch_timeout())?)
}

fn open_session(
    config: &WeaveConfig,
    state: &Path,
    surface: SurfaceSize,
) -> anyhow::Result<WeaveSession<HttpStore, FileKv>> {
    let kv = FileKv::open(state)
        .with_context(|| format!("open client state '{}'", state.display()))?;
    Ok(WeaveSession::new(config, http_store(config)?, kv, surface)?)
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let store = MemoryStore::new().with_admin_password(args.admin_password);
    let addr = SocketAddr::new(args.host, args.port);
    wordweave::serve(StoreState::new(store), addr)
        .await
        .with_context(|| format!("serve on {addr}"))
}

async fn cmd_add(config: &WeaveConfig, args: AddArgs) -> anyhow::Result<()> {
    let mut session = open_session(config, &args.state.state, SurfaceSize::new(1.0, 1.0))?;
    let flow = session.flow_mut();
    flow.set_input(args.text);

    match flow.submit_input().await {
        Ok(word) => {
            println!(
                "added '{}' at ({:.3}, {:.3}) in {}; {} words remaining",
                word.text,
                word.x,
                word.y,
                word.color,
                flow.remaining()
            );
            Ok(())
        }
        Err(WeaveError::QuotaExceeded { limit, .. }) => {
            anyhow::bail!("you've used all {limit} of your words")
        }
        Err(e) => Err(e).context("submit word"),
    }
}

async fn cmd_watch(config: &WeaveConfig, args: WatchArgs) -> anyhow::Result<()> {
    let config = args.surface.apply(config);
    let session = open_session(&config, &args.state.state, args.surface.surface())?;
    let poller = session.poller();

    let mut cycles = 0u64;
    loop {
        if poller.poll_once().await == PollOutcome::Replaced {
            session
                .export_png(&args.out)
                .await
                .with_context(|| format!("write '{}'", args.out.display()))?;
        }
        cycles += 1;
        if args.cycles.is_some_and(|max| cycles >= max) {
            break;
        }
        tokio::time::sleep(poller.interval()).await;
    }
    Ok(())
}

async fn cmd_export(config: &WeaveConfig, args: ExportArgs) -> anyhow::Result<()> {
    let config = args.surface.apply(config);
    let store = http_store(&config)?;
    let snapshot = store.fetch().await.context("fetch snapshot")?;

    let mut backend = config.backend().context("prepare renderer")?;
    let frame = backend.render(&snapshot, args.surface.surface(), true)?;
    wordweave::export_png(&frame, &args.out)?;
    println!(
        "wrote {} words to '{}' ({}x{})",
        snapshot.len(),
        args.out.display(),
        frame.width,
        frame.height
    );
    Ok(())
}

async fn cmd_stats(config: &WeaveConfig, args: StatsArgs) -> anyhow::Result<()> {
    let snapshot = http_store(config)?
        .fetch()
        .await
        .context("fetch snapshot")?;
    let stats = SnapshotStats::from_snapshot(&snapshot);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("total words:  {}", stats.total);
        println!("unique words: {}", stats.unique);
        println!("connections:  {}", stats.connections);
        println!("time span:    {} min", stats.span_minutes);
        for (rank, w) in stats.top.iter().enumerate() {
            println!(
                "  {}. {} ({}, {:.1}%)",
                rank + 1,
                w.word,
                w.count,
                w.percentage
            );
        }
    }

    if let Some(query) = args.filter.as_deref() {
        for word in snapshot.filter(query) {
            println!("{}", word.text);
        }
    }
    Ok(())
}

async fn cmd_reset(config: &WeaveConfig, args: ResetArgs) -> anyhow::Result<()> {
    let mut session = open_session(config, &args.state.state, SurfaceSize::new(1.0, 1.0))?;
    session
        .flow_mut()
        .reset(&args.admin_password)
        .await
        .context("reset weave")?;
    println!(
        "weave cleared; {} words available",
        session.flow().remaining()
    );
    Ok(())
}
