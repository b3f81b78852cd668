use clap::{Arg, ArgMatches, Command};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use librating_extractor::config::Config;
use librating_extractor::error::ProcessorError;
use librating_extractor::process::{process_batch, process_dial_ratings_file, process_ratings_file};

fn single_file_args(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("input")
                .required(true)
                .help("Path to the session log (.json)"),
        )
        .arg(Arg::new("output").help("Path to the output CSV file"))
}

fn make_template_config(path: &Path) -> ExitCode {
    log::info!("Making a template config at {}...", path.display());
    match Config::default().write_config_file(path) {
        Ok(()) => {
            log::info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Build the batch Config, either from a YAML file or from the positional directories
fn load_batch_config(matches: &ArgMatches) -> Option<Config> {
    if let Some(config_path) = matches.get_one::<String>("config") {
        log::info!("Loading config from {}...", config_path);
        return match Config::read_config_file(Path::new(config_path)) {
            Ok(c) => {
                log::info!("Config successfully loaded.");
                Some(c)
            }
            Err(e) => {
                log::error!("{e}");
                None
            }
        };
    }

    let input = matches
        .get_one::<String>("input_dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| Config::default().input_path);
    let output = matches
        .get_one::<String>("output_dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| Config::default().output_path);
    Some(Config::new(&input, &output))
}

fn run_batch(config: Config, pb_manager: &MultiProgress) -> Result<(), ProcessorError> {
    log::info!("Input Path: {}", config.input_path.display());
    log::info!("Output Path: {}", config.output_path.display());

    let pb = pb_manager.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::with_template("{wide_bar} {pos}/{len} {msg}") {
        pb.set_style(style);
    }
    let result = process_batch(&config, |status| {
        pb.set_length(status.files_total as u64);
        pb.set_position(status.files_done as u64);
        pb.set_message(status.current_file.display().to_string());
    });
    pb.finish();

    let summary = result?;
    log::info!(
        "Processed {} participants from {} files ({} skipped as duplicates).",
        summary.participants.len(),
        summary.files_found,
        summary.files_skipped
    );
    Ok(())
}

fn main() -> ExitCode {
    // Create a cli
    let matches = Command::new("rating_extractor_cli")
        .about("Flatten video rating experiment logs into CSV tables")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand(single_file_args(
            "ratings",
            "Extract the discrete ratings of one session log",
        ))
        .subcommand(single_file_args(
            "dial",
            "Extract the dial ratings of one session log",
        ))
        .subcommand(
            Command::new("all")
                .about("Extract and combine the ratings of every session log in a directory")
                .arg(Arg::new("input_dir").help("Directory of session logs [default: results]"))
                .arg(Arg::new("output_dir").help("Directory for the combined tables [default: .]"))
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a YAML batch configuration; overrides the directories")
                        .conflicts_with_all(["input_dir", "output_dir"]),
                ),
        )
        .subcommand(
            Command::new("new")
                .about("Make a template configuration yaml file")
                .arg(
                    Arg::new("path")
                        .short('p')
                        .long("path")
                        .required(true)
                        .help("Path to the file"),
                ),
        )
        .get_matches();

    // Initialize feedback
    let logger = simplelog::TermLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    );

    let pb_manager = MultiProgress::new();

    if let Err(e) = LogWrapper::new(pb_manager.clone(), logger).try_init() {
        eprintln!("Could not create logging/progress: {e}");
        return ExitCode::FAILURE;
    }

    let result = match matches.subcommand() {
        Some(("new", sub)) => {
            // clap enforces that path is present
            let path = sub.get_one::<String>("path").map(PathBuf::from).unwrap_or_default();
            return make_template_config(&path);
        }
        Some(("ratings", sub)) | Some(("dial", sub)) => {
            let input = sub.get_one::<String>("input").map(PathBuf::from).unwrap_or_default();
            let output = sub.get_one::<String>("output").map(PathBuf::from);
            if matches.subcommand_name() == Some("ratings") {
                process_ratings_file(&input, output.as_deref()).map(|_| ())
            } else {
                process_dial_ratings_file(&input, output.as_deref()).map(|_| ())
            }
        }
        Some(("all", sub)) => match load_batch_config(sub) {
            Some(config) => run_batch(config, &pb_manager),
            None => return ExitCode::FAILURE,
        },
        _ => return ExitCode::FAILURE,
    };

    match result {
        Ok(()) => {
            log::info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Extraction failed with error: {e}");
            ExitCode::FAILURE
        }
    }
}
