use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use scott_tutorial::display::render_row;
use scott_tutorial::{employees, scenario};
use std::io::{self, BufWriter, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "scott")]
#[command(about = "Run the classic EMP/DEPT/SALGRADE tutorial queries", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log filter, e.g. "debug" or "scott_tutorial=debug"
    #[arg(long, env = "SCOTT_LOG", default_value = "warn", global = true)]
    log_level: String,

    /// Separator placed between output columns
    #[arg(long, default_value = "\t", global = true)]
    separator: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every employee's salary plus commission (the default)
    Income,
    /// List the available queries with their SQL
    List,
    /// Run one query by name and print its rows
    Run {
        /// Query name, as shown by `scott list`
        name: String,

        /// Print a header line with the column names
        #[arg(long, default_value_t = false)]
        header: bool,
    },
}

fn init_logging(filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter).with_context(|| format!("Invalid log filter '{}'", filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn print_income(out: &mut impl Write, separator: &str) -> Result<()> {
    for emp in employees() {
        writeln!(out, "{}{}{}", emp.ename, separator, emp.income())?;
    }
    Ok(())
}

fn print_list(out: &mut impl Write, separator: &str) -> Result<()> {
    for scenario in scenario::scenarios() {
        writeln!(out, "{}{}{}", scenario.name, separator, scenario.sql)?;
    }
    Ok(())
}

fn print_scenario(out: &mut impl Write, name: &str, separator: &str, header: bool) -> Result<()> {
    let scenario = scenario::find(name).with_context(|| format!("Unknown query '{}'; see `scott list`", name))?;
    info!(query = scenario.name, "running");

    let result = scenario
        .run()
        .with_context(|| format!("Query '{}' failed", scenario.name))?;

    if header {
        writeln!(out, "{}", scenario.columns().join(separator))?;
    }
    for row in result.rows() {
        writeln!(out, "{}", render_row(row, separator))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match args.command.unwrap_or(Commands::Income) {
        Commands::Income => print_income(&mut out, &args.separator)?,
        Commands::List => print_list(&mut out, &args.separator)?,
        Commands::Run { name, header } => print_scenario(&mut out, &name, &args.separator, header)?,
    }

    out.flush().context("Failed to write output")?;
    Ok(())
}
