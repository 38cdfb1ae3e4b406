use clap::Parser;
use kaiwa::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// A scenario compilation and conversation runtime engine CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the diagram export JSON file
    diagram_path: String,

    /// Save the published graph as a binary artifact at this path
    #[arg(short, long)]
    artifact: Option<String>,

    /// Start an interactive conversation after publishing
    #[arg(short = 'i', long, help = "Drive the scenario from the terminal")]
    interactive: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // --- 1. Load and compile ---
    let diagram_json = fs::read_to_string(&cli.diagram_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read diagram file '{}': {}",
            &cli.diagram_path, e
        ))
    });

    println!("\nStarting Kaiwa Scenario Compilation...");
    let compile_start = Instant::now();
    let compiler = ScenarioCompiler::from_json(&diagram_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse diagram: {}", e)));
    let (graph, report) = compiler
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Publish failed: {}", e)));
    let compile_duration = compile_start.elapsed();

    println!(
        "Publish Successful! {} nodes resolved in {:?}",
        graph.len(),
        compile_duration
    );
    println!("  -> Root: {} ('{}')", graph.root_id(), graph.root().trigger_text);
    for warning in &report.warnings {
        match warning {
            ResolveWarning::UnresolvedJump { diagram_id, target } => println!(
                "  -> Warning: step '{}' jumps to unknown name '{}' (action dropped)",
                diagram_id, target
            ),
        }
    }

    // --- 2. Optional artifact export ---
    if let Some(path) = &cli.artifact {
        ScenarioArtifact::new(graph.clone())
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Artifact save failed: {}", e)));
        println!("  -> Wrote artifact to '{}'", path);
    }

    // --- 3. Optional interactive conversation ---
    if cli.interactive {
        run_conversation(graph);
    }
}

/// Drives the scenario from the terminal, one turn per prompt.
fn run_conversation(graph: ScenarioGraph) {
    println!("\n--- Kaiwa Interactive Mode ---");
    println!("Commands: a number to select, 'back', 'restart', 'close', or free text.\n");

    let runtime = ConversationRuntime::new(Arc::new(graph));
    let (mut session, mut turn) = runtime.open("kaiwa-cli");

    loop {
        print_turn(&turn);
        if session.is_closed() {
            break;
        }

        let line = prompt_for_input("you");
        let event = match line.as_str() {
            "" => continue,
            "back" => SessionEvent::Back,
            "restart" => SessionEvent::Restart,
            "close" => SessionEvent::Close,
            other => match other.parse::<usize>() {
                Ok(index) => match turn.options.get(index.saturating_sub(1)) {
                    Some(option) => SessionEvent::Select { option: option.id },
                    None => {
                        println!("No option {} on this turn.", index);
                        continue;
                    }
                },
                Err(_) => SessionEvent::Text {
                    content: other.to_string(),
                },
            },
        };

        match runtime.handle(&mut session, event) {
            Ok(next) => turn = next,
            Err(e) => println!("! {}", e),
        }

        if session.is_closed() {
            println!("Session closed. Goodbye.");
            break;
        }
    }
}

fn print_turn(turn: &TurnResult) {
    for message in &turn.messages {
        println!("bot> {}", message);
    }
    for (index, option) in turn.options.iter().enumerate() {
        println!("  {}: {}", index + 1, option.label);
    }
    if let Some(effect) = &turn.effect {
        println!("  (effect requested: {:?})", effect);
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str) -> String {
    let mut line = String::new();
    print!("> {}: ", prompt_text);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    line.trim().to_string()
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
