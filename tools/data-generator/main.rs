use careflow::model::{DepartmentType, Position, Priority, WorkflowNode};
use careflow::transfer::{ExportFormat, export_to_file};
use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use std::fs;

/// A CLI tool to generate random workflow files for the careflow editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated file to; .json or .csv picks the format
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: String,

    /// The minimum number of nodes to generate
    #[arg(long, default_value_t = 3)]
    min: usize,

    /// The maximum number of nodes to generate
    #[arg(long, default_value_t = 12)]
    max: usize,

    /// Chance (0.0 to 1.0) that a node is attached to an earlier one
    #[arg(long, default_value_t = 0.3)]
    child_ratio: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min == 0 || cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) must be at least 1 and not greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }
    let format = ExportFormat::from_file_name(&cli.output)?;

    let count = rng.random_range(cli.min..=cli.max);
    println!("Generating a workflow with {} node(s)...", count);
    let nodes = generate_nodes(&mut rng, count, cli.child_ratio.clamp(0.0, 1.0));

    let stem = std::path::Path::new(&cli.output)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("generated");
    let file = export_to_file(&nodes, format, stem)?;
    fs::write(&cli.output, file.contents)?;

    println!(
        "Successfully generated and saved workflow to '{}'",
        cli.output
    );

    Ok(())
}

/// Lays nodes out left to right; children go below their parent.
fn generate_nodes(rng: &mut ThreadRng, count: usize, child_ratio: f64) -> Vec<WorkflowNode> {
    let priorities = [Priority::Low, Priority::Medium, Priority::High];
    let mut nodes: Vec<WorkflowNode> = Vec::with_capacity(count);

    for step in 0..count {
        let department = *DepartmentType::ALL
            .choose(rng)
            .unwrap_or(&DepartmentType::General);
        let priority = *priorities.choose(rng).unwrap_or(&Priority::Medium);

        let parent = if !nodes.is_empty() && rng.random_bool(child_ratio) {
            nodes.choose(rng).map(|p| (p.id.clone(), p.position))
        } else {
            None
        };

        let position = match &parent {
            Some((_, at)) => at.offset(rng.random_range(-40.0..40.0), 120.0),
            None => Position::new(40.0 + step as f64 * 220.0, rng.random_range(40.0..200.0)),
        };

        let mut node = WorkflowNode::for_department(department, position);
        node.priority = priority;
        if let Some((parent_id, _)) = parent {
            node = node.parent(parent_id);
        }
        node.subtitle = Some(format!("Step {}", step + 1));
        nodes.push(node);
    }

    println!("-> Generated {} node(s).", nodes.len());
    nodes
}
