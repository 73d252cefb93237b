use clap::{Parser, ValueEnum};
use rand::prelude::*;
use single_machine_sequencing::algo::{self, Edd, Spt};
use single_machine_sequencing::core::{Instance, Job, Objective, Rule};
use single_machine_sequencing::data::{self, Format};
use single_machine_sequencing::{cast_u64, compute_flowtime, compute_lateness, run_reader};
use std::io::{Read, Write};
use std::num::NonZero;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Copy, Clone, Debug)]
struct RuleName(usize, &'static str);

impl From<RuleName> for Box<dyn Rule> {
    fn from(value: RuleName) -> Box<dyn Rule> {
        algo::RULES[value.0]()
    }
}

impl std::fmt::Display for RuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.1)
    }
}

impl ValueEnum for RuleName {
    fn value_variants<'a>() -> &'a [Self] {
        static RULES: std::sync::LazyLock<Vec<RuleName>> = std::sync::LazyLock::new(|| {
            let iter = algo::RULES.iter().enumerate();
            iter.map(|(i, init)| RuleName(i, init().name())).collect()
        });

        RULES.as_slice()
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.1))
    }
}

/// Application sequencing jobs on a single machine.
/// Set `RUST_LOG` to see what it is doing.
#[derive(Debug, Parser)]
#[command(version, about)]
enum Application {
    /// Order jobs by Shortest Processing Time and report the total flow time.
    Flowtime {
        /// Comma separated durations of the jobs.
        #[clap(default_value = "5, 2, 8, 3, 6")]
        durations: String,
        #[clap(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// Order jobs by Earliest Due Date and report the total lateness.
    Lateness {
        /// File with one `duration, due_date` pair per line. Stdin is read when omitted.
        input: Option<PathBuf>,
        #[clap(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// Run one of the registered rules on an instance read from stdin.
    Run {
        #[clap(ignore_case = true)]
        rule: RuleName,
        #[clap(short, long, value_enum, default_value_t)]
        format: Format,
    },
    /// Run every rule on a directory of instances.
    Bench {
        /// The input directory.
        input: String,
        /// Exclude rules.
        #[clap(short, long, value_delimiter = ',', ignore_case = true)]
        exclude: Vec<RuleName>,
    },
    /// Generate random instances.
    Gen {
        /// The number of jobs.
        jobs: NonZero<usize>,
        /// The maximum processing time of a job.
        max_duration: NonZero<u64>,
        /// The due date ratio.
        /// Due dates are drawn up to: `max_duration` * `jobs` * `due_ratio` / 2.0.
        #[clap(short, long, default_value = "1.0")]
        due_ratio: f64,
        /// Whether to leave the jobs without due dates.
        #[clap(short, long, default_value = "false")]
        undated: bool,
        /// Number of instances to generate.
        #[clap(short, long, default_value = "1")]
        amount: NonZero<u64>,
        /// Path to output the generated instances. If the directory does not exist, it will be created.
        #[clap(short, long, default_value = "output")]
        output: String,
    },
}

fn rules(exclude: &[RuleName]) -> impl Iterator<Item = Box<dyn Rule>> + '_ {
    let iter = algo::RULES.iter().map(|init| init());
    iter.filter(|rule| !exclude.iter().any(|name| name.1 == rule.name()))
}

fn compute_horizon(max_duration: u64, jobs: usize, ratio: f64) -> i64 {
    ((max_duration * cast_u64(jobs)) as f64 * ratio / 2.0).ceil() as i64
}

fn gen_jobs(jobs: usize, max_duration: u64, due_ratio: f64, undated: bool) -> Vec<Job> {
    let mut rng = thread_rng();
    let horizon = compute_horizon(max_duration, jobs, due_ratio);
    (0..jobs)
        .map(|_| {
            let duration = rng.gen_range(1..=max_duration);
            if undated {
                Job::new(duration)
            } else {
                Job::with_due_date(duration, rng.gen_range(0..=horizon))
            }
        })
        .collect()
}

fn flowtime(durations: &str, format: Format) -> anyhow::Result<()> {
    let durations = data::parse_durations(durations)?;
    let result = compute_flowtime(&durations);
    info!(jobs = durations.len(), total = result.total, "sequenced by SPT");

    let mut stdout = std::io::stdout().lock();
    match format {
        Format::Text => {
            data::render(&result.timeline, &mut stdout)?;
            writeln!(stdout, "Total flow time (SPT): {}", result.total)?;
        }
        Format::Json => writeln!(stdout, "{}", serde_json::to_string(&result)?)?,
    }
    Ok(())
}

fn lateness(input: Option<PathBuf>, format: Format) -> anyhow::Result<()> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().lock().read_to_string(&mut text)?;
            text
        }
    };
    let jobs = data::parse_due_jobs(&text)?;
    let result = compute_lateness(&jobs);
    info!(jobs = jobs.len(), total = result.total, "sequenced by EDD");

    let mut stdout = std::io::stdout().lock();
    match format {
        Format::Text => {
            data::render(&result.timeline, &mut stdout)?;
            let order: Vec<_> = result
                .order
                .iter()
                .map(|(duration, due_date)| format!("({duration}, {due_date})"))
                .collect();
            writeln!(stdout, "Order: {}", order.join(" "))?;
            writeln!(stdout, "Total lateness (EDD): {}", result.total)?;
        }
        Format::Json => writeln!(stdout, "{}", serde_json::to_string(&result)?)?,
    }
    Ok(())
}

fn gen(
    jobs: usize,
    max_duration: u64,
    due_ratio: f64,
    undated: bool,
    amount: u64,
    output: &str,
) -> anyhow::Result<()> {
    anyhow::ensure!(due_ratio >= 0.0, "Due date ratio must not be negative");

    let output = std::path::Path::new(output);
    if !output.try_exists()? {
        std::fs::create_dir_all(output)?;
    }

    for i in 0..amount {
        let instance = Instance::new(gen_jobs(jobs, max_duration, due_ratio, undated));
        let flow_time = Objective::FlowTime.evaluate(&Spt.timeline(&instance));
        let lateness = Objective::Lateness.evaluate(&Edd.timeline(&instance));

        let filename = format!("{jobs}_{flow_time}_{lateness}_{i}.in");
        debug!(filename = filename.as_str(), "writing instance");
        std::fs::File::create(output.join(filename))?
            .write_all(data::to_string(&instance).as_bytes())?;
    }
    info!(amount, output = %output.display(), "generated instances");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    match Application::parse() {
        Application::Flowtime { durations, format } => flowtime(&durations, format),
        Application::Lateness { input, format } => lateness(input, format),
        Application::Run { rule, format } => {
            let rule = Box::<dyn Rule>::from(rule);
            run_reader(rule.as_ref(), &mut std::io::stdin().lock(), format)
        }
        Application::Bench { input, exclude } => {
            for rule in rules(&exclude) {
                println!("{}", data::run(&input, false, rule.as_ref())?);
            }
            Ok(())
        }
        Application::Gen {
            jobs,
            max_duration,
            due_ratio,
            undated,
            amount,
            output,
        } => gen(
            jobs.get(),
            max_duration.get(),
            due_ratio,
            undated,
            amount.get(),
            &output,
        ),
    }
}
