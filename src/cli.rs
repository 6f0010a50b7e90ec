use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::action::ActionType;
use crate::config::EngineConfig;
use crate::display::{
    classification_grid, mistakes_table, print_error, print_section, strategy_grid, summary_table,
};
use crate::distribution::RawHandEntry;
use crate::error::{ErrorKind, GradeError, GradeResult};
use crate::grader::{GradeRequest, Grader};
use crate::ranges::{parse_range, range_pct, total_combos};
use crate::reference::{load_standard, standard_book, ReferenceBook};
use crate::scenario::{Position, PreviousAction, ScenarioContext, Street, ALL_STREETS};

#[derive(Parser)]
#[command(
    name = "grader",
    version = "1.0.0",
    about = "Grade preflop ranges against precomputed GTO reference ranges."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ScenarioArgs {
    /// Hero position (UTG, MP, CO, BTN, SB, BB)
    #[arg(short, long)]
    position: Option<String>,
    /// Street of the decision (preflop, flop, turn, river)
    #[arg(long, default_value = "preflop")]
    street: String,
    /// Earlier actions, e.g. "UTG:fold,CO:raise:2.5"
    #[arg(long, default_value = "")]
    history: String,
    /// Effective stack in bb
    #[arg(long, default_value = "100")]
    stack: f64,
    /// Current pot in bb
    #[arg(long, default_value = "1.5")]
    pot: f64,
}

#[derive(clap::Args)]
struct EngineArgs {
    /// Reference range file (defaults to the bundled standard ranges)
    #[arg(long)]
    references: Option<PathBuf>,
    /// Engine config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the frequency threshold (percentage points)
    #[arg(long)]
    threshold: Option<f64>,
    /// Override the maximum stack-to-pot ratio
    #[arg(long)]
    max_spr: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a submitted range
    Grade {
        /// JSON file: an array of {label, actions} entries, or a full request with --request
        file: PathBuf,
        /// Treat FILE as a full grading request (position, previousActions, effectiveStack, pot, hands)
        #[arg(long)]
        request: bool,
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[command(flatten)]
        engine: EngineArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Rows in the mistakes table
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show the reference range for a scenario
    Reference {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// List the scenarios covered by the reference ranges
    List {
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Stack-to-pot ratio and the bucket it selects
    Spr {
        /// Effective stack in bb
        #[arg(long)]
        stack: f64,
        /// Current pot in bb
        #[arg(long)]
        pot: f64,
        /// Per-street bet in bb; also prints the standard pot on each street
        #[arg(long)]
        bet_size: Option<f64>,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Expand range notation and count combos
    Hands {
        /// Range, e.g. "TT+, AJs+, KQo"
        range: String,
    },
}

pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    init_logging(cli.verbose);
    dispatch(cli);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    // A second init (run_with_args in tests) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).try_init();
}

fn dispatch(cli: Cli) {
    let outcome = match cli.command {
        Commands::Grade {
            file,
            request,
            scenario,
            engine,
            json,
            limit,
        } => cmd_grade(&file, request, scenario, engine, json, limit),
        Commands::Reference { scenario, engine } => cmd_reference(scenario, engine),
        Commands::List { engine } => cmd_list(engine),
        Commands::Spr {
            stack,
            pot,
            bet_size,
            engine,
        } => cmd_spr(stack, pot, bet_size, engine),
        Commands::Hands { range } => cmd_hands(&range),
    };

    if let Err(e) = outcome {
        report_error(&e);
    }
}

fn report_error(e: &GradeError) {
    match e.kind() {
        ErrorKind::DataGap => {
            eprintln!("{} {}", "Scenario not supported:".yellow().bold(), e);
        }
        ErrorKind::Validation => print_error(&format!("invalid input: {}", e)),
        ErrorKind::Io => print_error(&e.to_string()),
    }
}

fn load_config(engine: &EngineArgs) -> GradeResult<EngineConfig> {
    let mut config = match &engine.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(threshold) = engine.threshold {
        config.comparator.frequency_threshold = threshold;
    }
    if let Some(max_spr) = engine.max_spr {
        config.stack.max_stack_to_pot_ratio = max_spr;
    }
    config.validate()?;
    Ok(config)
}

enum Book {
    Standard(&'static ReferenceBook),
    Loaded(ReferenceBook),
}

impl Book {
    fn get(&self) -> &ReferenceBook {
        match self {
            Book::Standard(book) => book,
            Book::Loaded(book) => book,
        }
    }
}

fn load_book(engine: &EngineArgs, config: &EngineConfig) -> GradeResult<Book> {
    match &engine.references {
        Some(path) => Ok(Book::Loaded(ReferenceBook::from_file(path, config.stack.clone())?)),
        None if engine.max_spr.is_none() && engine.config.is_none() => Ok(Book::Standard(standard_book())),
        // Bundled data re-keyed under a non-default stack config.
        None => Ok(Book::Loaded(load_standard(config.stack.clone())?)),
    }
}

fn parse_history(history: &str) -> GradeResult<Vec<PreviousAction>> {
    history
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PreviousAction::parse)
        .collect()
}

fn parse_position(position: Option<&str>) -> GradeResult<Position> {
    let position = position.ok_or_else(|| GradeError::InvalidValue("--position is required".to_string()))?;
    Position::from_str(position).ok_or_else(|| {
        GradeError::InvalidValue(format!(
            "Invalid position '{}'. Valid: UTG, MP, CO, BTN, SB, BB",
            position
        ))
    })
}

fn parse_street(street: &str) -> GradeResult<Street> {
    Street::from_str(street).ok_or_else(|| {
        GradeError::InvalidValue(format!(
            "Invalid street '{}'. Valid: preflop, flop, turn, river",
            street
        ))
    })
}

fn build_context(scenario: &ScenarioArgs) -> GradeResult<ScenarioContext> {
    let context = ScenarioContext::new(
        parse_position(scenario.position.as_deref())?,
        parse_history(&scenario.history)?,
        scenario.stack,
        scenario.pot,
    )?;
    Ok(context.with_street(parse_street(&scenario.street)?))
}

fn cmd_grade(
    file: &Path,
    request: bool,
    scenario: ScenarioArgs,
    engine: EngineArgs,
    json: bool,
    limit: usize,
) -> GradeResult<()> {
    let config = load_config(&engine)?;
    let book = load_book(&engine, &config)?;
    let grader = Grader::new(config, book.get())?;
    let contents = std::fs::read_to_string(file)?;

    let report = if request {
        let request: GradeRequest = serde_json::from_str(&contents)?;
        grader.grade_request(&request)?
    } else {
        let context = build_context(&scenario)?;
        let hands: Vec<RawHandEntry> = serde_json::from_str(&contents)?;
        grader.grade(&context, &hands)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "{}",
        classification_grid(&report.result, &format!("Graded: {}", report.scenario))
    );
    println!();
    println!("{}", summary_table(&report.result));
    if report.result.count(crate::comparator::Classification::Correct) < report.result.hands.len() {
        println!();
        println!("{}", mistakes_table(&report.result, limit));
    }
    print_section("Feedback", &report.feedback);
    println!(
        "  {}",
        format!(
            "reference: {} {}",
            report.source.solver, report.source.solver_version
        )
        .dimmed()
    );
    println!();
    Ok(())
}

fn cmd_reference(scenario: ScenarioArgs, engine: EngineArgs) -> GradeResult<()> {
    let config = load_config(&engine)?;
    let book = load_book(&engine, &config)?;
    let context = build_context(&scenario)?;
    let reference = book.get().resolve(&context)?;

    println!();
    println!(
        "{}",
        strategy_grid(&reference.distribution, &format!("Reference: {}", reference.key))
    );
    println!();
    for action in [ActionType::Raise, ActionType::Bet, ActionType::Call, ActionType::Check, ActionType::Fold] {
        let pct = reference.distribution.combo_frequency(action);
        if pct > 0.0 {
            println!("  {:<6} {:>5.1}% of combos", action.as_str().bold(), pct);
        }
    }
    println!();
    Ok(())
}

fn cmd_list(engine: EngineArgs) -> GradeResult<()> {
    let config = load_config(&engine)?;
    let book = load_book(&engine, &config)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Scenario"),
        Cell::new("Hands").set_alignment(CellAlignment::Right),
        Cell::new("Source"),
    ]);
    for key in book.get().keys() {
        let range = book.get().get(key)?;
        table.add_row(vec![
            Cell::new(key.to_string()),
            Cell::new(range.distribution.len()).set_alignment(CellAlignment::Right),
            Cell::new(format!("{} {}", range.source.solver, range.source.solver_version)),
        ]);
    }

    println!();
    println!("{}", table);
    println!();
    Ok(())
}

fn cmd_spr(stack: f64, pot: f64, bet_size: Option<f64>, engine: EngineArgs) -> GradeResult<()> {
    let config = load_config(&engine)?;
    let stack_config = &config.stack;

    let raw = stack_config.raw_ratio(stack, pot)?;
    let clamped = stack_config.stack_to_pot_ratio(stack, pot)?;
    let bucket = stack_config.bucket(stack, pot)?;
    let capped = stack_config.capped_stack(stack, pot)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Right),
    ]);
    let mut rows = vec![
        ("Raw SPR".to_string(), format!("{:.2}", raw)),
        ("Clamped SPR".to_string(), format!("{:.2}", clamped)),
        ("Bucket".to_string(), bucket.to_string()),
        ("Capped stack".to_string(), format!("{:.1}bb", capped)),
        ("Pot after open".to_string(), format!("{:.1}bb", stack_config.pot_after_open())),
    ];
    if let Some(bet) = bet_size {
        for street in ALL_STREETS {
            let street_pot = stack_config.street_pot(street, bet)?;
            rows.push((format!("{} pot", street), format!("{:.0}bb", street_pot)));
        }
    }
    for (metric, value) in rows {
        table.add_row(vec![
            Cell::new(metric.as_str().bold().to_string()),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }

    println!();
    println!("{}", table);
    if raw > clamped {
        println!(
            "  {}",
            format!("ratio above {} is graded as {}", stack_config.max_stack_to_pot_ratio, clamped).dimmed()
        );
    }
    println!();
    Ok(())
}

fn cmd_hands(range: &str) -> GradeResult<()> {
    let hands = parse_range(range)?;
    let labels: Vec<String> = hands.iter().map(|h| h.to_string()).collect();

    println!();
    println!("  {}", labels.join(", "));
    println!();
    println!(
        "  {} hands | {} combos | {:.1}% of hands",
        hands.len().to_string().bold(),
        total_combos(&hands).to_string().bold(),
        range_pct(&hands),
    );
    println!();
    Ok(())
}
