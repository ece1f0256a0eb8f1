use careflow::prelude::*;
use careflow::transfer::write_export;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Json,
    Csv,
}

impl From<FormatCli> for ExportFormat {
    fn from(value: FormatCli) -> Self {
        match value {
            FormatCli::Json => ExportFormat::Json,
            FormatCli::Csv => ExportFormat::Csv,
        }
    }
}

/// Inspect, convert and export hospital workflow files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to an editor configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in templates, or show one of them
    Templates {
        /// Template id to show in detail
        #[arg(long)]
        show: Option<String>,
    },
    /// Validate a .json or .csv workflow file and print its nodes
    Import {
        path: PathBuf,
    },
    /// Re-encode a workflow file; the output format follows its extension
    Convert {
        input: PathBuf,
        output: PathBuf,
    },
    /// Export a template as a workflow file
    Export {
        /// Template id to export
        #[arg(short, long)]
        template: String,
        #[arg(short, long, value_enum, default_value = "json")]
        format: FormatCli,
        /// Directory to write the file into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Workflow name used in the file name and metadata
        #[arg(short, long)]
        name: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CAREFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config '{}': {}", path, e))
        }),
        None => EditorConfig::default(),
    };
    let session = EditorSession::builder().with_config(config).build();

    match cli.command {
        Command::Templates { show } => run_templates(&session, show),
        Command::Import { path } => run_import(session, &path),
        Command::Convert { input, output } => run_convert(session, &input, &output),
        Command::Export {
            template,
            format,
            out_dir,
            name,
        } => run_export(session, &template, format.into(), &out_dir, name),
    }
}

fn run_templates(session: &EditorSession, show: Option<String>) {
    let catalog = session.catalog();
    let Some(id) = show else {
        println!("--- Available Templates ---");
        for template in catalog.templates() {
            println!(
                "  {:<20} {} ({} nodes)",
                template.id,
                template.name,
                template.base_nodes.len()
            );
        }
        return;
    };

    let template = catalog
        .get(&id)
        .unwrap_or_else(|| exit_with_error(&format!("No template with id '{}'", id)));
    println!("{} - {}", template.name, template.description);
    print_nodes(&template.base_nodes);
    if let Some(sla) = &template.sla_settings {
        println!(
            "\nSLA: respond within {} min, escalate after {} min",
            sla.response_minutes, sla.escalation_minutes
        );
    }
    for flow in &template.exception_flows {
        println!("Exception '{}': {} -> {}", flow.name, flow.trigger, flow.target_node);
    }
}

fn run_import(mut session: EditorSession, path: &Path) {
    let start = Instant::now();
    let count = session
        .import_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e)));
    println!(
        "Imported {} node(s) from '{}' in {:?}",
        count,
        path.display(),
        start.elapsed()
    );
    print_nodes(session.nodes());
}

fn run_convert(mut session: EditorSession, input: &Path, output: &Path) {
    let output_name = output
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let format = ExportFormat::from_file_name(output_name)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("workflow");

    session
        .import_file(input)
        .unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e)));
    let file = session
        .export_named(format, stem)
        .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));
    std::fs::write(output, &file.contents).unwrap_or_else(|e| {
        exit_with_error(&format!("Could not write '{}': {}", output.display(), e))
    });
    println!(
        "Converted {} node(s) from '{}' to '{}'",
        session.nodes().len(),
        input.display(),
        output.display()
    );
}

fn run_export(
    mut session: EditorSession,
    template: &str,
    format: ExportFormat,
    out_dir: &Path,
    name: Option<String>,
) {
    let loaded = session
        .select_template_by_id(template)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    if !loaded {
        exit_with_error(&format!("No template with id '{}'", template));
    }
    let name = name.unwrap_or_else(|| template.to_string());
    let file = session
        .export_named(format, &name)
        .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));
    let path = write_export(&file, out_dir)
        .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));
    println!("Wrote {} node(s) to '{}'", session.nodes().len(), path.display());
}

fn print_nodes(nodes: &[WorkflowNode]) {
    for node in nodes {
        let subtitle = node
            .subtitle
            .as_deref()
            .map_or(String::new(), |s| format!(" ({})", s));
        println!(
            "  -> [{}] {}{} at ({}, {}) kind={}",
            node.priority,
            node.label,
            subtitle,
            node.position.x,
            node.position.y,
            node.kind.name()
        );
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
