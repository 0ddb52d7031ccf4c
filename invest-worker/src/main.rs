use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, ArgMatches, Command};
use invest_algorithms::solve_dp;
use invest_challenges::{profits_equal, Challenge, Solution, Track};
use invest_utils::{decompress_obj, dejsonify, format_cents, parse_amount};
use invest_worker::{load_investments, load_settings, print_report, write_output, SolveSettings};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{fs, io::Read, path::PathBuf, time::Instant};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn settings_args(cmd: Command) -> Command {
    cmd.arg(
        arg!(<CATALOG> "Path to a csv catalog of investments")
            .value_parser(clap::value_parser!(PathBuf)),
    )
    .arg(
        arg!(--settings [SETTINGS] "Settings json string or path to json file")
            .value_parser(clap::value_parser!(String)),
    )
    .arg(
        arg!(--budget [BUDGET] "Budget in euros, overrides the settings")
            .value_parser(clap::value_parser!(String)),
    )
}

fn parallel_args(cmd: Command) -> Command {
    cmd.arg(
        arg!(--workers [WORKERS] "Number of worker threads for brute force")
            .value_parser(clap::value_parser!(usize)),
    )
    .arg(
        arg!(--chunks [CHUNKS] "Number of combination ranges for brute force")
            .value_parser(clap::value_parser!(usize)),
    )
}

fn output_args(cmd: Command) -> Command {
    cmd.arg(
        arg!(--output [OUTPUT_FILE] "If set, the solution will be saved to this file path (default json)")
            .value_parser(clap::value_parser!(PathBuf)),
    )
    .arg(
        arg!(--compress "If output file is set, the solution will be compressed as zlib")
            .action(ArgAction::SetTrue),
    )
}

fn cli() -> Command {
    Command::new("invest-worker")
        .about("Selects the most profitable investments within a budget")
        .arg_required_else_help(true)
        .arg(
            arg!(--verbose "Log debug output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(output_args(parallel_args(settings_args(
            Command::new("bruteforce").about("Tries every combination of investments"),
        ))))
        .subcommand(output_args(settings_args(
            Command::new("optimized").about("Solves with dynamic programming over the budget"),
        )))
        .subcommand(parallel_args(settings_args(
            Command::new("compare").about("Runs both solvers and checks they agree"),
        )))
        .subcommand(
            Command::new("generate")
                .about("Prints a random csv catalog")
                .arg(arg!(<SEED> "Seed for the generator").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(<NUM_INVESTMENTS> "Number of investments")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            settings_args(Command::new("verify_solution").about("Verifies a solution")).arg(
                arg!(<SOLUTION> "Solution json string, path to json/zlib file, or '-' for stdin")
                    .value_parser(clap::value_parser!(String)),
            ),
        )
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(e) = match matches.subcommand() {
        Some(("bruteforce", sub_m)) => bruteforce(sub_m),
        Some(("optimized", sub_m)) => optimized(sub_m),
        Some(("compare", sub_m)) => compare(sub_m),
        Some(("generate", sub_m)) => generate(
            *sub_m.get_one::<u64>("SEED").unwrap(),
            *sub_m.get_one::<usize>("NUM_INVESTMENTS").unwrap(),
        ),
        Some(("verify_solution", sub_m)) => verify_solution(sub_m),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "info" })
    });
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_settings(sub_m: &ArgMatches) -> Result<SolveSettings> {
    let mut settings = load_settings(sub_m.get_one::<String>("settings").map(String::as_str))?;
    if let Some(budget) = sub_m.get_one::<String>("budget") {
        settings.budget = parse_amount(budget)?;
    }
    Ok(settings)
}

fn apply_parallel_args(settings: &mut SolveSettings, sub_m: &ArgMatches) {
    if let Some(&num_workers) = sub_m.get_one::<usize>("workers") {
        settings.num_workers = num_workers;
    }
    if let Some(&num_chunks) = sub_m.get_one::<usize>("chunks") {
        settings.num_chunks = Some(num_chunks);
    }
}

fn load_challenge(sub_m: &ArgMatches, settings: &SolveSettings) -> Result<Challenge> {
    let catalog = sub_m.get_one::<PathBuf>("CATALOG").unwrap();
    let challenge = Challenge::new(load_investments(catalog)?, settings.budget_cents()?);
    challenge.validate()?;
    info!("Budget: {} €", format_cents(challenge.budget));
    Ok(challenge)
}

fn finish(sub_m: &ArgMatches, solution: &Solution) -> Result<()> {
    if let Some(path) = sub_m.get_one::<PathBuf>("output") {
        write_output(path, solution, sub_m.get_flag("compress"))?;
    }
    Ok(())
}

fn bruteforce(sub_m: &ArgMatches) -> Result<()> {
    let mut settings = resolve_settings(sub_m)?;
    apply_parallel_args(&mut settings, sub_m);
    let challenge = load_challenge(sub_m, &settings)?;

    let bruteforce = settings.bruteforce();
    info!(
        "Running brute force over {} investments with {} workers and {} chunks",
        challenge.investments.len(),
        bruteforce.num_workers,
        bruteforce.num_chunks
    );
    let start = Instant::now();
    let solution = bruteforce.solve(&challenge.investments, challenge.budget)?;
    let elapsed = start.elapsed();

    challenge.verify_solution(&solution)?;
    print_report(&solution, elapsed);
    finish(sub_m, &solution)
}

fn optimized(sub_m: &ArgMatches) -> Result<()> {
    let settings = resolve_settings(sub_m)?;
    let challenge = load_challenge(sub_m, &settings)?;

    info!(
        "Running dynamic programming over {} investments",
        challenge.investments.len()
    );
    let start = Instant::now();
    let solution = solve_dp(&challenge.investments, challenge.budget)?;
    let elapsed = start.elapsed();

    challenge.verify_solution(&solution)?;
    print_report(&solution, elapsed);
    finish(sub_m, &solution)
}

fn compare(sub_m: &ArgMatches) -> Result<()> {
    let mut settings = resolve_settings(sub_m)?;
    apply_parallel_args(&mut settings, sub_m);
    let challenge = load_challenge(sub_m, &settings)?;

    let start = Instant::now();
    let brute = settings
        .bruteforce()
        .solve(&challenge.investments, challenge.budget)?;
    let brute_elapsed = start.elapsed();
    println!("=== Brute force ===");
    print_report(&brute, brute_elapsed);

    let start = Instant::now();
    let dp = solve_dp(&challenge.investments, challenge.budget)?;
    let dp_elapsed = start.elapsed();
    println!("\n=== Dynamic programming ===");
    print_report(&dp, dp_elapsed);

    if !profits_equal(brute.total_profit, dp.total_profit) {
        return Err(anyhow!(
            "Solvers disagree: brute force profit {:.2}, dynamic programming profit {:.2}",
            brute.total_profit,
            dp.total_profit
        ));
    }
    println!("\nSolvers agree");
    Ok(())
}

fn generate(seed: u64, num_investments: usize) -> Result<()> {
    let track = Track {
        num_investments,
        budget: SolveSettings::default().budget_cents()?,
    };
    let challenge = Challenge::generate_instance(&StdRng::seed_from_u64(seed).gen(), &track);

    println!("name,price,profit");
    for investment in &challenge.investments {
        let percent = investment.profit / (investment.cost as f64 / 100.0) * 100.0;
        println!(
            "{},{},{:.2}%",
            investment.name,
            format_cents(investment.cost),
            percent
        );
    }
    info!("Generated {} investments", challenge.investments.len());
    Ok(())
}

fn verify_solution(sub_m: &ArgMatches) -> Result<()> {
    let settings = resolve_settings(sub_m)?;
    let challenge = load_challenge(sub_m, &settings)?;
    let solution = load_solution(sub_m.get_one::<String>("SOLUTION").unwrap())?;

    match challenge.verify_solution(&solution) {
        Ok(()) => {
            println!("Solution is valid");
            Ok(())
        }
        Err(e) => Err(anyhow!("Invalid solution: {}", e)),
    }
}

fn load_solution(solution: &str) -> Result<Solution> {
    if solution.ends_with(".zlib") {
        let bytes = fs::read(solution)
            .map_err(|e| anyhow!("Failed to read solution file {}: {}", solution, e))?;
        return decompress_obj(&bytes);
    }

    let solution = if solution == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read solution from stdin: {}", e))?;
        buffer
    } else if solution.ends_with(".json") {
        fs::read_to_string(solution)
            .map_err(|e| anyhow!("Failed to read solution file {}: {}", solution, e))?
    } else {
        solution.to_string()
    };

    dejsonify::<Solution>(&solution).map_err(|e| anyhow!("Failed to parse solution: {}", e))
}
