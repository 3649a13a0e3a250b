#[macro_use]
extern crate clap;
use clap::{App, AppSettings, Arg, SubCommand};

use failure::Error;

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog;

mod cli_utils;

use chrono::offset::Local;
use optimal_district::district_data;
use optimal_district::district_finder::District;
use optimal_district::finder_runner::{self, DistrictReport};
use optimal_district::memory_tracking::CountingAllocator;

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

const DEFAULT_NUM_DISTRICTS: &str = "40000";

fn main() {
    let local_time = Local::now();
    let time_offset = local_time.offset();
    // Configure logging
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config {
            offset: time_offset.clone(),
            ..simplelog::Config::default()
        },
        simplelog::TerminalMode::Stderr,
    )
    .ok();

    match do_main() {
        Ok(_) => info!("Process finished OK"),
        Err(err) => {
            error!("Process finished with an error: {}", err);
            std::process::exit(1);
        }
    };
}

fn random_districts(num_districts: usize, seed: Option<u64>, quiet: bool) -> Vec<District> {
    let mut rng = match seed {
        Some(seed) => {
            info!("Generating {} districts with seed {}", num_districts, seed);
            StdRng::seed_from_u64(seed)
        }
        None => {
            info!("Generating {} districts", num_districts);
            StdRng::from_entropy()
        }
    };

    let progress_bar =
        cli_utils::create_progress_bar_count(quiet, "Generating...", num_districts as u64);

    district_data::generate_district_data(num_districts, &mut rng, &progress_bar)
}

fn print_report(report: &DistrictReport, json: bool) -> Result<(), Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("optimal_district_index: {}", report.optimal_district_index);
    println!("optimal_district_object:");
    for (building, present) in report.optimal_district_object.iter() {
        println!("    {}: {}", building, present as u8);
    }
    println!("min_max_distance: {}", report.min_max_distance);
    println!("num_districts: {}", report.num_districts);
    println!("execution_time: {} ms", report.execution_time);
    println!("memory_used: {} KB", report.memory_used);
    println!("peak_memory: {} KB", report.peak_memory);

    Ok(())
}

fn find_command(districts: &[District], json: bool) -> Result<(), Error> {
    let report = finder_runner::run_instrumented(districts)?;
    print_report(&report, json)
}

fn do_main() -> Result<(), Error> {
    let matches = App::new("optimal_district")
                    .version("0.1.0")
                    .author("Gustavo Ajzenman")
                    .about("Find the district with the smallest worst-case distance to every building type")
                    .setting(AppSettings::SubcommandRequiredElseHelp)
                    .arg(Arg::with_name("json")
                        .long("json")
                        .global(true)
                        .help("Print the result as JSON")
                    )
                    .subcommand(
                        SubCommand::with_name("random")
                            .about("Run on randomly generated districts")
                            .arg(Arg::with_name("count")
                                .short("n")
                                .long("count")
                                .help("Number of districts to generate")
                                .takes_value(true)
                                .default_value(DEFAULT_NUM_DISTRICTS)
                            )
                            .arg(Arg::with_name("seed")
                                .short("s")
                                .long("seed")
                                .help("Seed for the random generator. Random if omitted.")
                                .takes_value(true)
                            )
                            .arg(Arg::with_name("quiet")
                                .short("q")
                                .long("quiet")
                                .help("Hide the progress bar")
                            )
                    )
                    .subcommand(
                        SubCommand::with_name("static")
                            .about("Run on the static example dataset")
                    )
                    .get_matches();

    let json = matches.is_present("json");

    if let Some(random_matches) = matches.subcommand_matches("random") {
        let num_districts = value_t!(random_matches, "count", usize)?;
        let seed = if random_matches.is_present("seed") {
            Some(value_t!(random_matches, "seed", u64)?)
        } else {
            None
        };

        let districts = random_districts(num_districts, seed, random_matches.is_present("quiet"));
        return find_command(&districts, json || random_matches.is_present("json"));
    }

    if let Some(static_matches) = matches.subcommand_matches("static") {
        info!("Using the static example dataset");
        return find_command(
            &district_data::static_example_data(),
            json || static_matches.is_present("json"),
        );
    }

    return Ok(());
}
