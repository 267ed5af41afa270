mod scenarios;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use cothread::{Clock, ManualClock, SchedulerConfigBuilder, SystemClock};
use std::rc::Rc;

/// cothread demo command-line interface
#[derive(Parser)]
#[command(name = "cothread-demo", version, about = "Cooperative thread scheduling demos")]
struct Cli {
    #[command(flatten)]
    sched: SchedArgs,

    /// Scenario to run
    #[command(subcommand)]
    command: Command,
}

/// Scheduler settings shared by every scenario
#[derive(Args, Debug)]
struct SchedArgs {
    /// Stack size for created threads, e.g. `64KiB` or `1M`
    #[arg(long, env = "COTHREAD_STACK_SIZE", value_parser = parse_stack_size)]
    stack_size: Option<usize>,

    /// Upper bound on live threads, idle and main included
    #[arg(long, env = "COTHREAD_MAX_THREADS")]
    max_threads: Option<usize>,

    /// Skip real waiting: sleeping threads wake as soon as nothing else can run
    #[arg(long)]
    virtual_time: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Threads hand the processor back and forth with yield
    Pingpong(scenarios::PingpongArgs),
    /// Main joins a batch of workers
    Join(scenarios::JoinArgs),
    /// Threads sleep and yield in a loop
    Sleep(scenarios::SleepArgs),
    /// Print the scheduler dump with running, joining and sleeping threads
    Status,
    /// Main exits first; the process ends once the workers finish
    Detach(scenarios::DetachArgs),
}

fn parse_stack_size(s: &str) -> Result<usize, String> {
    let bytes = parse_size::parse_size(s).map_err(|e| e.to_string())?;
    usize::try_from(bytes).map_err(|e| e.to_string())
}

fn init(args: &SchedArgs) -> anyhow::Result<Rc<dyn Clock>> {
    let clock: Rc<dyn Clock> = if args.virtual_time {
        Rc::new(ManualClock::new())
    } else {
        Rc::new(SystemClock)
    };

    let mut builder = SchedulerConfigBuilder::default();
    builder.clock(clock.clone());
    if let Some(size) = args.stack_size {
        builder.stack_size(size);
    }
    if let Some(max) = args.max_threads {
        builder.max_threads(max);
    }
    let config = builder.build().context("invalid scheduler settings")?;
    log::debug!("scheduler config: {:?}", config);

    cothread::init_with(config).context("failed to initialize the scheduler")?;
    Ok(clock)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let clock = init(&cli.sched)?;

    match cli.command {
        Command::Pingpong(args) => scenarios::pingpong(args),
        Command::Join(args) => scenarios::join(args),
        Command::Sleep(args) => scenarios::sleep(args, clock),
        Command::Status => scenarios::status(),
        Command::Detach(args) => scenarios::detach(args),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
