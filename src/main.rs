//! linesift - deduplicate, classify and fuzzy-search the lines of a text file
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::io::{self, Write};
use std::process;
use std::time::Instant;

use linesift::cli::Args;
use linesift::classify::Classifier;
use linesift::encoding::read_text;
use linesift::interactive::Interactive;
use linesift::output::{export_view, pick, render_view};
use linesift::progress::{
    create_spinner, print_banner, print_error, print_header, print_info, print_success,
    print_warning, LoadReport,
};
use linesift::session::{Session, SessionConfig};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Banner only where it cannot pollute piped output
    let chatty = !args.quiet && args.copy.is_none();
    if chatty && args.interactive {
        print_banner();
    }

    // Validate configuration before touching the file
    let config = SessionConfig {
        classifier: Classifier::new(args.classifier_config()?),
        fuzzy: args.fuzzy_config()?,
        order: args.order,
    };

    if args.verbose && chatty {
        print_config(&args, &config);
    }

    let started = Instant::now();
    let spinner = if chatty {
        create_spinner(&format!("Loading {:?}...", args.input))
    } else {
        indicatif::ProgressBar::hidden()
    };

    let decoded = read_text(&args.input)?;
    let mut session = Session::new(config);
    let stats = session.load(&decoded.text);
    spinner.finish_and_clear();

    let report = LoadReport::new(
        decoded.byte_len,
        decoded.encoding.name,
        stats,
        session.lines(),
        started,
    );
    if decoded.had_errors && chatty {
        print_warning("Some bytes could not be decoded and were replaced");
    }
    if args.stats && chatty {
        report.write_summary(&mut io::stdout().lock())?;
    }

    let state = args.query_state();

    if args.interactive {
        let mut interactive = Interactive::new(session, state, args.reveal);
        interactive.set_report(report);

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        return interactive.run(stdin.lock(), &mut stdout);
    }

    let view = session.view(&state);

    if let Some(number) = args.copy {
        println!("{}", pick(&view, number)?);
        return Ok(());
    }

    if let Some(ref path) = args.output {
        let written = export_view(path, &view, args.reveal)?;
        if !args.quiet {
            print_success(&format!("{} lines written to {:?}", written, path));
        }
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.quiet {
        for line in &view {
            writeln!(out, "{}", line.display(args.reveal))?;
        }
    } else {
        render_view(&mut out, &view, args.reveal)?;
        print_info(&format!("{} of {} lines shown", view.len(), session.lines().len()));
    }

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &SessionConfig) {
    print_header("Configuration");

    let rules = config.classifier.config();
    print_info(&format!("Input:         {:?}", args.input));
    print_info(&format!("Query:         {:?}", args.query));
    print_info(&format!("Order:         {:?}", config.order));
    print_info(&format!("Threshold:     {}", config.fuzzy.threshold));
    print_info(&format!("Basic prefix:  {:?}", rules.basic_prefixes));
    print_info(&format!("Basic tokens:  <= {}", rules.max_basic_tokens));
    print_info(&format!("Special rules: {}", rules.special_patterns.len()));
}
