// sortty: Sorting Algorithm Visualizer for the terminal

use std::fs::File;
use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};

use sortty::config::{parse_args, CliOptions, Settings, EVENT_LOG_CAPACITY};
use sortty::engine::{Controller, RunOutcome};
use sortty::sequence::{EventLog, Extent, NullPresenter};
use sortty::ui::{app::initial_extent, App};

/// Display width used when there is no terminal to fit
const HEADLESS_EXTENT: Extent = Extent::new(100, 100);

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [options]", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config PATH        Load settings from a JSON file");
    eprintln!("  --size N             Number of elements (2-100)");
    eprintln!("  --delay MS           Delay between steps (0-9999)");
    eprintln!("  --algorithm NAME     bubble, insertion, selection, shell, quick, merge");
    eprintln!("  --arrangement NAME   random, ascending, descending");
    eprintln!("  --seed N             Seed for shuffling and pivots");
    eprintln!("  --descending         Sort into descending order");
    eprintln!("  --log-file PATH      Where to write the log");
    eprintln!("  --headless           Run to completion without the TUI");
    eprintln!("  -h, --help           Show this help");
}

/// Log to a file so the TUI keeps the terminal to itself
fn init_logging(settings: &Settings) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_timestamp_micros();
    match File::create(&settings.log_file) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!(
                "Warning: cannot open log file '{}': {}",
                settings.log_file.display(),
                e
            );
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn run_headless(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = Controller::new(settings, HEADLESS_EXTENT, Box::new(NullPresenter))?;
    controller.select_algorithm(settings.algorithm);

    println!(
        "{} on {} {} elements, {} order, {} ms delay",
        settings.algorithm.name(),
        controller.count(),
        controller.arrangement().as_str(),
        controller.order().as_str(),
        controller.delay()
    );

    let outcome = controller.run_to_completion()?;
    let stats = controller.stats();
    println!(
        "{:?} after {} steps: {} comparisons, {} swaps, {} placements",
        outcome, stats.steps, stats.comparisons, stats.swaps, stats.placements
    );
    println!("{:?}", controller.sequence().keys());

    if outcome != RunOutcome::Completed {
        return Err("sort did not complete".into());
    }
    Ok(())
}

fn run_tui(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let (columns, rows) = crossterm::terminal::size()?;
    let changes = EventLog::new(EVENT_LOG_CAPACITY);
    let controller = Controller::new(
        settings,
        initial_extent(columns, rows),
        Box::new(changes.clone()),
    )?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(controller, changes, settings.algorithm);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("TUI error: {}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("sortty");

    let CliOptions {
        settings,
        headless,
        help,
    } = match parse_args(&args[1.min(args.len())..]) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(program_name);
            std::process::exit(2);
        }
    };

    if help {
        print_usage(program_name);
        return Ok(());
    }

    init_logging(&settings);
    info!("Starting sortty ({:?})", settings);

    if headless {
        run_headless(&settings)
    } else {
        run_tui(&settings)
    }
}
