use anyhow::Context as _;
use clap::Args;
use cothread::{self_id, yield_now, Clock, Error, Tid};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Args, Debug)]
pub struct PingpongArgs {
    /// Number of threads taking turns
    #[arg(long, default_value_t = 2)]
    pub threads: usize,

    /// Turns each thread takes
    #[arg(long, default_value_t = 3)]
    pub rounds: usize,
}

#[derive(Args, Debug)]
pub struct JoinArgs {
    /// Number of workers main waits for
    #[arg(long, default_value_t = 4)]
    pub workers: usize,
}

#[derive(Args, Debug)]
pub struct SleepArgs {
    /// Seconds each sleep lasts
    #[arg(long, default_value_t = 1)]
    pub seconds: u32,

    /// Sleeps per thread
    #[arg(long, default_value_t = 2)]
    pub rounds: usize,
}

#[derive(Args, Debug)]
pub struct DetachArgs {
    /// Number of workers left running after main exits
    #[arg(long, default_value_t = 3)]
    pub workers: usize,
}

/// Joins every thread in `ids`. A thread that already finished and was
/// reclaimed counts as joined.
fn join_all(ids: &[Tid]) -> anyhow::Result<()> {
    for &tid in ids {
        match cothread::join(tid) {
            Ok(()) | Err(Error::NoSuchThread(_)) => {}
            Err(e) => return Err(e).with_context(|| format!("failed to join thread {tid}")),
        }
    }
    Ok(())
}

pub fn pingpong(args: PingpongArgs) -> anyhow::Result<()> {
    let mut ids = Vec::with_capacity(args.threads);
    for _ in 0..args.threads {
        let rounds = args.rounds;
        let tid = cothread::spawn(move || {
            for round in 0..rounds {
                println!("thread {} turn {}", self_id(), round);
                yield_now();
            }
        })?;
        ids.push(tid);
    }

    join_all(&ids)?;
    println!("all {} threads done", ids.len());
    Ok(())
}

pub fn join(args: JoinArgs) -> anyhow::Result<()> {
    let results = Rc::new(RefCell::new(Vec::new()));

    let mut ids = Vec::with_capacity(args.workers);
    for n in 1..=args.workers as u64 {
        let results = results.clone();
        let tid = cothread::create(
            move |limit: u64| {
                let mut sum = 0u64;
                for i in 1..=limit {
                    sum += i;
                    if i % 250 == 0 {
                        yield_now();
                    }
                }
                results.borrow_mut().push((self_id(), sum));
            },
            n * 1000,
        )?;
        ids.push(tid);
    }

    join_all(&ids)?;
    for (tid, sum) in results.borrow().iter() {
        println!("thread {} summed to {}", tid, sum);
    }
    Ok(())
}

pub fn sleep(args: SleepArgs, clock: Rc<dyn Clock>) -> anyhow::Result<()> {
    let start = clock.now();

    let mut ids = Vec::new();
    for name in ["A", "B"] {
        let clock = clock.clone();
        let (seconds, rounds) = (args.seconds, args.rounds);
        let tid = cothread::spawn(move || {
            for _ in 0..rounds {
                cothread::sleep(seconds);
                let at = clock.now().saturating_duration_since(start);
                println!("{} (thread {}) awake at {:.3}s", name, self_id(), at.as_secs_f64());
                yield_now();
            }
        })?;
        ids.push(tid);
    }

    join_all(&ids)?;
    let total = clock.now().saturating_duration_since(start);
    println!("finished after {:.3}s", total.as_secs_f64());
    Ok(())
}

pub fn status() -> anyhow::Result<()> {
    let target = cothread::spawn(|| {
        for _ in 0..2 {
            yield_now();
        }
    })?;
    let joiner = cothread::spawn(move || {
        if let Err(e) = cothread::join(target) {
            log::warn!("join on {} failed: {}", target, e);
        }
    })?;
    let sleeper = cothread::spawn(|| cothread::sleep(1))?;

    // Let the joiner block and the sleeper doze off.
    yield_now();

    let snapshot = cothread::status().context("scheduler is not initialized")?;
    println!("{}", snapshot);

    join_all(&[target, joiner, sleeper])?;
    println!("{} threads left", cothread::thread_count());
    Ok(())
}

pub fn detach(args: DetachArgs) -> anyhow::Result<()> {
    for _ in 0..args.workers {
        cothread::spawn(|| {
            for step in 0..3 {
                println!("thread {} step {}", self_id(), step);
                yield_now();
            }
        })?;
    }

    println!("main exits, {} workers still running", args.workers);
    cothread::exit()
}
