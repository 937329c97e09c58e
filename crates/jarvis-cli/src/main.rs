use clap::{Parser, Subcommand};
use jarvis_crew::{
    AgentRole, CrewPlanner, HttpCrewRuntime, JarvisConfig, Orchestrator, WorkflowReport,
    WorkflowStatus,
};
use jarvis_tools::ToolCapability;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jarvis", about = "Jarvis: crew assembly for the Jarvis assistant")]
struct Cli {
    /// Path to config file (optional; environment variables override it)
    #[arg(short, long, default_value = "jarvis.toml")]
    config: PathBuf,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tools selected for this environment
    Tools {
        /// Only show tools carrying this capability
        #[arg(long)]
        capability: Option<ToolCapability>,
    },
    /// List the agents and the tools each one receives
    Agents,
    /// Print a crew as JSON without running it
    Plan {
        #[command(subcommand)]
        workflow: Workflow,
    },
    /// Kick a crew off on the configured crew service
    Run {
        #[command(subcommand)]
        workflow: Workflow,
    },
}

#[derive(Subcommand)]
enum Workflow {
    /// Integrate something into Jarvis
    Integration {
        /// What to integrate, e.g. "Notion"
        integration_type: String,
    },
    /// Research a topic and document the findings
    Research {
        /// Research topic
        topic: String,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Exit code for a finished workflow: 0 success, 2 partial, 1 failure.
fn exit_code(report: &WorkflowReport) -> ExitCode {
    match report.status {
        WorkflowStatus::Completed => ExitCode::SUCCESS,
        WorkflowStatus::PartiallyCompleted { .. } => ExitCode::from(2),
        WorkflowStatus::Failed { .. } => ExitCode::FAILURE,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = JarvisConfig::load(&cli.config).map_err(|e| {
        anyhow::anyhow!("Failed to load config '{}': {}", cli.config.display(), e)
    })?;

    match cli.command {
        Commands::Tools { capability } => {
            let planner = CrewPlanner::new(&config);
            let tools = planner.agents().tools();
            let shown: Vec<_> = match capability {
                Some(cap) => tools.with_any_capability(&[cap]),
                None => tools.descriptors().to_vec(),
            };

            if shown.is_empty() {
                println!("No tools match.");
            } else {
                println!("Selected tools:");
                for tool in &shown {
                    let caps: Vec<String> = tool.capabilities.iter().map(|c| c.to_string()).collect();
                    println!("  {} ({}): {}", tool.name, tool.class_name, tool.description);
                    println!("    capabilities: {}", caps.join(", "));
                }
                println!("\nTotal: {} tool(s)", shown.len());
            }
        }
        Commands::Agents => {
            let planner = CrewPlanner::new(&config);
            for role in AgentRole::ALL {
                let agent = planner.agents().create(role);
                println!("{} [{}]", agent.title, agent.role);
                println!("  goal: {}", agent.goal);
                println!(
                    "  max_iter: {}, delegation: {}",
                    agent.max_iter, agent.allow_delegation
                );
                println!("  tools ({}): {}", agent.tools.len(), agent.tool_names().join(", "));
            }
        }
        Commands::Plan { workflow } => {
            let planner = CrewPlanner::new(&config);
            let crew = match &workflow {
                Workflow::Integration { integration_type } => {
                    planner.integration_crew(integration_type)?
                }
                Workflow::Research { topic } => planner.research_crew(topic)?,
            };
            println!("{}", serde_json::to_string_pretty(&crew)?);
        }
        Commands::Run { workflow } => {
            let runtime = Arc::new(HttpCrewRuntime::new(&config.runtime)?);
            let orchestrator = Orchestrator::new(&config, runtime);

            let report = match &workflow {
                Workflow::Integration { integration_type } => {
                    orchestrator.execute_integration(integration_type).await
                }
                Workflow::Research { topic } => orchestrator.execute_research(topic).await,
            };

            info!(
                workflow = %report.workflow,
                subject = %report.workflow.subject(),
                success = report.is_success(),
                "Workflow finished"
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(exit_code(&report));
        }
    }

    Ok(ExitCode::SUCCESS)
}
