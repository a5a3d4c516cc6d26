use crabfocus::config::CrabFocusConfig;
use crabfocus::{
    discriminate, load_image_stack, optimize_with, CostKind, ImageStack, Region, ScoreReport,
};
use std::env;

const USAGE: &str = "Usage: crabfocus-cli <command> [args]

Commands:
  costs
  score   <pattern> <x,y[,w,h]> [--cost NAME] [--parallel] [--json] [--config FILE]
  best    <pattern> <x,y[,w,h]> [--cost NAME] [--parallel] [--export FILE] [--json] [--config FILE]
  compare <pattern> <x,y[,w,h]> <i> <j> [--cost NAME] [--config FILE]

A pattern of '-' uses the configured default pattern.";

/// Options shared by the scoring commands
#[derive(Debug, Default)]
struct Options {
    positional: Vec<String>,
    cost: Option<CostKind>,
    parallel: bool,
    json: bool,
    export: Option<String>,
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    crabfocus::init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }

    let command = &args[1];
    match command.as_str() {
        "costs" => cmd_costs(&args),
        "score" => cmd_score(&args),
        "best" => cmd_best(&args),
        "compare" => cmd_compare(&args),
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    }
}

fn cmd_costs(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string(&CostKind::ALL)?);
    } else {
        for kind in CostKind::ALL {
            println!("{}", kind);
        }
    }
    Ok(())
}

fn cmd_score(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_options(args)?;
    if options.positional.len() < 2 {
        eprintln!("Usage: crabfocus-cli score <pattern> <x,y[,w,h]> [--cost NAME] [--parallel] [--json]");
        std::process::exit(1);
    }

    let config = load_config(&options)?;
    let stack = load_stack(&options.positional[0], &config)?;
    let region = parse_region(&options.positional[1], &config)?;
    let report = score_report(&stack, region, &options, &config)?;

    if options.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{} scores in {}:", report.cost, report.region);
        for (index, score) in report.scores.iter().enumerate() {
            let marker = if report.best_frame == Some(index) { " *" } else { "" };
            println!("  frame {:>3}: {:.6}{}", index, score, marker);
        }
    }
    Ok(())
}

fn cmd_best(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_options(args)?;
    if options.positional.len() < 2 {
        eprintln!("Usage: crabfocus-cli best <pattern> <x,y[,w,h]> [--cost NAME] [--export FILE] [--json]");
        std::process::exit(1);
    }

    let config = load_config(&options)?;
    let stack = load_stack(&options.positional[0], &config)?;
    let region = parse_region(&options.positional[1], &config)?;
    let report = score_report(&stack, region, &options, &config)?;
    let best = report.best_frame.ok_or("stack has no frames")?;

    if let Some(path) = &options.export {
        stack.frame_image(best)?.save(path)?;
        log::info!("Exported frame {} to {}", best, path);
    }

    if options.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", best);
    }
    Ok(())
}

fn cmd_compare(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_options(args)?;
    if options.positional.len() < 4 {
        eprintln!("Usage: crabfocus-cli compare <pattern> <x,y[,w,h]> <i> <j> [--cost NAME]");
        std::process::exit(1);
    }

    let config = load_config(&options)?;
    let stack = load_stack(&options.positional[0], &config)?;
    let region = parse_region(&options.positional[1], &config)?;
    let i: usize = options.positional[2].parse()?;
    let j: usize = options.positional[3].parse()?;

    let cost = config.scoring.cost_function(options.cost);
    let sharper = discriminate(cost.as_ref(), &stack, &region, i, j)?;
    println!("{}", sharper);
    Ok(())
}

fn parse_options(args: &[String]) -> Result<Options, Box<dyn std::error::Error>> {
    let mut options = Options::default();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--cost" => {
                i += 1;
                let name = args.get(i).ok_or("--cost needs a name")?;
                options.cost = Some(name.parse()?);
            }
            "--export" => {
                i += 1;
                options.export = Some(args.get(i).ok_or("--export needs a file")?.clone());
            }
            "--config" => {
                i += 1;
                options.config = Some(args.get(i).ok_or("--config needs a file")?.clone());
            }
            "--parallel" => options.parallel = true,
            "--json" => options.json = true,
            other => options.positional.push(other.to_string()),
        }
        i += 1;
    }

    Ok(options)
}

fn load_config(options: &Options) -> Result<CrabFocusConfig, Box<dyn std::error::Error>> {
    let config = match &options.config {
        Some(path) => CrabFocusConfig::load_from_file(path)?,
        None => CrabFocusConfig::load_or_default(),
    };
    config.validate()?;
    Ok(config)
}

fn load_stack(
    pattern: &str,
    config: &CrabFocusConfig,
) -> Result<ImageStack, Box<dyn std::error::Error>> {
    let pattern = if pattern == "-" {
        config.loader.default_pattern.as_str()
    } else {
        pattern
    };
    load_image_stack(pattern)?.ok_or_else(|| format!("No images match {}", pattern).into())
}

/// `x,y,w,h`, or `x,y` with the configured default size
fn parse_region(
    spec: &str,
    config: &CrabFocusConfig,
) -> Result<Region, Box<dyn std::error::Error>> {
    let values = spec
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()?;

    let region = match values.as_slice() {
        [x, y] => Region::new(
            *x,
            *y,
            config.region.default_width,
            config.region.default_height,
        ),
        [x, y, width, height] => Region::new(*x, *y, *width, *height),
        _ => return Err(format!("Region must be x,y or x,y,w,h, got '{}'", spec).into()),
    };
    Ok(region.normalized())
}

fn score_report(
    stack: &ImageStack,
    region: Region,
    options: &Options,
    config: &CrabFocusConfig,
) -> Result<ScoreReport, Box<dyn std::error::Error>> {
    let cost = config.scoring.cost_function(options.cost);
    let mut optimizer = config.scoring.optimizer_options();
    optimizer.parallel |= options.parallel;

    let scores = optimize_with(stack, &region, cost.as_ref(), &optimizer)?;
    Ok(ScoreReport::new(cost.name(), region, scores))
}
