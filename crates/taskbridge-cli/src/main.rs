//! TaskBridge CLI - Command line interface for the TaskBridge HTTP API.

use clap::{Parser, Subcommand};
use reqwest::{Client, Response};
use serde_json::{json, Value};

use taskbridge_core::{Run, WorkflowSummary};

/// TaskBridge CLI - task ingestion and run management tool
#[derive(Parser)]
#[command(name = "taskbridge")]
#[command(about = "CLI for the TaskBridge HTTP API", long_about = None)]
struct Cli {
    /// Bridge address
    #[arg(short, long, default_value = "http://localhost:4100")]
    addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check bridge health
    Health,

    /// Submit a free-text task for structuring
    #[command(name = "submit-task")]
    SubmitTask {
        /// Task ID
        #[arg(long)]
        id: String,

        /// Task text
        #[arg(long)]
        text: String,

        /// Task author
        #[arg(long)]
        author: Option<String>,
    },

    /// List available workflows
    #[command(name = "list-workflows")]
    ListWorkflows,

    /// Start a workflow run
    #[command(name = "start-workflow")]
    StartWorkflow {
        /// Workflow ID
        id: String,
    },

    /// Get run status
    #[command(name = "get-run")]
    GetRun {
        /// Run ID
        run_id: String,
    },

    /// List all runs
    #[command(name = "list-runs")]
    ListRuns,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let client = Client::new();
    let base = cli.addr.trim_end_matches('/').to_string();

    match cli.command {
        Commands::Health => {
            let body = get_json(&client, &format!("{base}/health")).await?;
            print_json(&body)?;
        }
        Commands::SubmitTask { id, text, author } => {
            submit_task(&client, &base, id, text, author).await?;
        }
        Commands::ListWorkflows => {
            list_workflows(&client, &base).await?;
        }
        Commands::StartWorkflow { id } => {
            start_workflow(&client, &base, id).await?;
        }
        Commands::GetRun { run_id } => {
            let body = get_json(&client, &format!("{base}/runs/{run_id}")).await?;
            let run: Run = serde_json::from_value(body)?;
            print_run(&run);
        }
        Commands::ListRuns => {
            list_runs(&client, &base).await?;
        }
    }

    Ok(())
}

async fn submit_task(
    client: &Client,
    base: &str,
    id: String,
    text: String,
    author: Option<String>,
) -> CliResult<()> {
    let now = chrono::Utc::now().to_rfc3339();
    let body = json!({
        "task": {
            "id": id,
            "rawText": text,
            "author": author.unwrap_or_default(),
            "state": "open",
            "createdAt": now,
            "updatedAt": now,
        }
    });

    let response = client
        .post(format!("{base}/tasks/from-mfc"))
        .json(&body)
        .send()
        .await?;
    let body = read_json(response).await?;

    if body["structuredTask"].is_null() {
        println!("Task received, no structured task produced.");
    } else {
        println!("Task structured:");
        print_json(&body["structuredTask"])?;
    }

    Ok(())
}

async fn list_workflows(client: &Client, base: &str) -> CliResult<()> {
    let body = get_json(client, &format!("{base}/workflows")).await?;
    let workflows: Vec<WorkflowSummary> = serde_json::from_value(body)?;

    println!("Workflows ({}):", workflows.len());
    println!("{:<24}  {:<24}  {}", "ID", "LABEL", "DESCRIPTION");
    println!("{}", "-".repeat(80));

    for workflow in workflows {
        println!(
            "{:<24}  {:<24}  {}",
            workflow.id, workflow.label, workflow.description
        );
    }

    Ok(())
}

async fn start_workflow(client: &Client, base: &str, id: String) -> CliResult<()> {
    let response = client
        .post(format!("{base}/workflows/{id}/start"))
        .send()
        .await?;
    let run: Run = serde_json::from_value(read_json(response).await?)?;

    println!("Run started:");
    print_run(&run);

    Ok(())
}

async fn list_runs(client: &Client, base: &str) -> CliResult<()> {
    let body = get_json(client, &format!("{base}/runs")).await?;
    let runs: Vec<Run> = serde_json::from_value(body)?;

    println!("Runs ({}):", runs.len());
    println!("{:<40}  {:<10}  {:<20}  {}", "ID", "STATUS", "WORKFLOW", "STARTED");
    println!("{}", "-".repeat(90));

    for run in runs {
        println!(
            "{:<40}  {:<10}  {:<20}  {}",
            run.run_id.as_str(),
            run.status.as_str(),
            run.workflow_id.as_str(),
            format_timestamp(&run.started_at)
        );
    }

    Ok(())
}

async fn get_json(client: &Client, url: &str) -> CliResult<Value> {
    let response = client.get(url).send().await?;
    read_json(response).await
}

/// Decode a JSON body, turning non-success statuses into errors.
async fn read_json(response: Response) -> CliResult<Value> {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = body["error"].as_str().unwrap_or("request failed");
        return Err(format!("HTTP {}: {}", status.as_u16(), message).into());
    }

    Ok(body)
}

fn print_json(value: &Value) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_run(run: &Run) {
    println!("  ID:         {}", run.run_id);
    println!("  Workflow:   {}", run.workflow_id);
    println!("  Status:     {}", run.status);
    println!("  Started:    {}", format_timestamp(&run.started_at));
    if let Some(finished) = &run.finished_at {
        println!("  Finished:   {}", format_timestamp(finished));
    }

    if !run.steps.is_empty() {
        println!("  Steps:");
        for step in &run.steps {
            println!("    - {} ({})", step.id, step.state);
        }
    }
}

fn format_timestamp(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}
