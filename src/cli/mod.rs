//! `launchpad-cli`: manage projects, domains and databases from a terminal.

pub mod client;
pub mod config;

use clap::{Args, Parser, Subcommand};

use crate::models::domain::DomainStatus;
use crate::models::project::ProjectStatus;
use crate::models::{activity, database as managed_database, domain, project, system_metric};
use crate::schemas::{
    CreateDatabaseRequest, CreateDomainRequest, CreateProjectRequest, CreateSystemMetricRequest,
    UpdateDomainRequest, UpdateProjectRequest,
};
use client::{ApiClient, ClientError};
use config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "launchpad-cli", version)]
#[command(about = "Deploy and manage projects on a Launchpad server")]
pub struct Cli {
    /// Override the API URL stored by `login`
    #[arg(long, global = true, env = "LAUNCHPAD_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level user commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Store the server URL (`--api-url`) and optional token for later commands
    Login {
        #[arg(long)]
        token: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show the configured server and whether it is reachable
    Status,
    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectCommands),
    /// Manage custom domains
    #[command(subcommand)]
    Domains(DomainCommands),
    /// Manage databases
    #[command(subcommand)]
    Databases(DatabaseCommands),
    /// Show the activity feed
    Logs {
        /// Only activity attributed to this project
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Host utilisation
    #[command(subcommand)]
    Metrics(MetricCommands),
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommands {
    List,
    Get {
        id: i64,
    },
    Create(CreateProjectArgs),
    Update(UpdateProjectArgs),
    Delete {
        id: i64,
    },
    /// Recent activity of one project
    Activities {
        id: i64,
        #[arg(long)]
        limit: Option<u64>,
    },
}

#[derive(Debug, Args)]
pub struct CreateProjectArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub framework: String,
    /// Git repository URL
    #[arg(long)]
    pub repo: String,
    #[arg(long, default_value = "main")]
    pub branch: String,
    #[arg(long)]
    pub domain: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateProjectArgs {
    pub id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub framework: Option<String>,
    #[arg(long)]
    pub repo: Option<String>,
    #[arg(long)]
    pub branch: Option<String>,
    #[arg(long, conflicts_with = "clear_domain")]
    pub domain: Option<String>,
    /// Remove the project's domain
    #[arg(long)]
    pub clear_domain: bool,
    /// idle, building, live or error
    #[arg(long)]
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Subcommand)]
pub enum DomainCommands {
    List,
    Add {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        project: Option<i64>,
    },
    /// Mark a domain as active
    Verify {
        id: i64,
    },
    Remove {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum DatabaseCommands {
    List,
    Create {
        #[arg(long)]
        name: String,
        /// Engine, e.g. PostgreSQL
        #[arg(long = "type")]
        db_type: String,
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        connection_string: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum MetricCommands {
    Show,
    Record {
        #[arg(long)]
        cpu: i32,
        #[arg(long)]
        memory: i32,
        #[arg(long)]
        disk: i32,
        #[arg(long)]
        network: i32,
    },
}

impl From<CreateProjectArgs> for CreateProjectRequest {
    fn from(args: CreateProjectArgs) -> Self {
        Self {
            name: args.name,
            framework: args.framework,
            repository_url: args.repo,
            branch: args.branch,
            domain: args.domain,
        }
    }
}

impl From<UpdateProjectArgs> for UpdateProjectRequest {
    fn from(args: UpdateProjectArgs) -> Self {
        let domain = if args.clear_domain {
            Some(None)
        } else {
            args.domain.map(Some)
        };

        Self {
            name: args.name,
            framework: args.framework,
            repository_url: args.repo,
            branch: args.branch,
            domain,
            status: args.status,
        }
    }
}

impl Cli {
    /// Run the parsed command, writing human-readable output to stdout
    pub async fn execute(self) -> Result<(), ClientError> {
        let mut config = CliConfig::load()?;

        if let Commands::Login { token } = &self.command {
            if let Some(url) = &self.api_url {
                config.api_url = url.trim_end_matches('/').to_string();
            }
            config.token = token.clone();
            let path = config.save()?;
            println!("Saved {} ({})", config.api_url, path.display());

            let client = ApiClient::new(&config.api_url, config.token.clone())?;
            match client.health().await {
                Ok(_) => println!("Server is reachable"),
                Err(e) => println!("Warning: server not reachable: {}", e),
            }
            return Ok(());
        }

        if let Commands::Logout = &self.command {
            config.token = None;
            config.save()?;
            println!("Logged out");
            return Ok(());
        }

        let api_url = self.api_url.clone().unwrap_or_else(|| config.api_url.clone());
        let client = ApiClient::new(&api_url, config.token.clone())?;
        let output = run(&client, &config, self.command).await?;
        println!("{}", output);
        Ok(())
    }
}

/// Execute a server-side command and render its result
pub async fn run(
    client: &ApiClient,
    config: &CliConfig,
    command: Commands,
) -> Result<String, ClientError> {
    let output = match command {
        Commands::Login { .. } | Commands::Logout => String::new(),

        Commands::Status => {
            let mut lines = vec![
                format!("API URL:   {}", client.base_url()),
                format!(
                    "Logged in: {}",
                    if config.is_logged_in() { "yes" } else { "no" }
                ),
            ];
            match client.health().await {
                Ok(health) => lines.push(format!("Server:    {}", health.status)),
                Err(e) => lines.push(format!("Server:    unreachable ({})", e)),
            }
            lines.join("\n")
        }

        Commands::Projects(cmd) => match cmd {
            ProjectCommands::List => format_projects(&client.list_projects().await?),
            ProjectCommands::Get { id } => format_project(&client.get_project(id).await?),
            ProjectCommands::Create(args) => {
                let project = client.create_project(&args.into()).await?;
                format!("Created project #{} {}", project.id, project.name)
            }
            ProjectCommands::Update(args) => {
                let id = args.id;
                let project = client.update_project(id, &args.into()).await?;
                format!("Updated project #{}\n{}", id, format_project(&project))
            }
            ProjectCommands::Delete { id } => {
                client.delete_project(id).await?;
                format!("Deleted project #{}", id)
            }
            ProjectCommands::Activities { id, limit } => {
                format_activities(&client.project_activities(id, limit).await?)
            }
        },

        Commands::Domains(cmd) => match cmd {
            DomainCommands::List => format_domains(&client.list_domains().await?),
            DomainCommands::Add { domain, project } => {
                let created = client
                    .create_domain(&CreateDomainRequest {
                        name: domain,
                        project_id: project,
                    })
                    .await?;
                format!("Added domain #{} {} ({})", created.id, created.name, created.status)
            }
            DomainCommands::Verify { id } => {
                let updated = client
                    .update_domain(
                        id,
                        &UpdateDomainRequest {
                            status: Some(DomainStatus::Active),
                            ..Default::default()
                        },
                    )
                    .await?;
                format!("Domain {} is {}", updated.name, updated.status)
            }
            DomainCommands::Remove { id } => {
                client.delete_domain(id).await?;
                format!("Removed domain #{}", id)
            }
        },

        Commands::Databases(cmd) => match cmd {
            DatabaseCommands::List => format_databases(&client.list_databases().await?),
            DatabaseCommands::Create {
                name,
                db_type,
                project,
                connection_string,
            } => {
                let created = client
                    .create_database(&CreateDatabaseRequest {
                        name,
                        db_type,
                        project_id: project,
                        connection_string,
                    })
                    .await?;
                format!(
                    "Created database #{} {}\nConnection string: {}",
                    created.id, created.name, created.connection_string
                )
            }
            DatabaseCommands::Delete { id } => {
                client.delete_database(id).await?;
                format!("Deleted database #{}", id)
            }
        },

        Commands::Logs { project, limit } => {
            let activities = match project {
                Some(id) => client.project_activities(id, limit).await?,
                None => client.list_activities(limit).await?,
            };
            format_activities(&activities)
        }

        Commands::Metrics(cmd) => match cmd {
            MetricCommands::Show => format_metric(&client.latest_metric().await?),
            MetricCommands::Record {
                cpu,
                memory,
                disk,
                network,
            } => {
                let metric = client
                    .record_metric(&CreateSystemMetricRequest {
                        cpu_usage: cpu,
                        memory_usage: memory,
                        disk_usage: disk,
                        network_usage: network,
                    })
                    .await?;
                format!("Recorded snapshot #{}", metric.id)
            }
        },
    };

    Ok(output)
}

// ============================================================================
// Output
// ============================================================================

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(headers.iter().map(|h| h.to_string()).collect())];
    lines.extend(rows.into_iter().map(render));
    lines.join("\n")
}

fn or_dash(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn format_projects(projects: &[project::Model]) -> String {
    if projects.is_empty() {
        return "No projects".to_string();
    }
    table(
        &["ID", "NAME", "FRAMEWORK", "STATUS", "BRANCH", "DOMAIN"],
        projects
            .iter()
            .map(|p| {
                vec![
                    p.id.to_string(),
                    p.name.clone(),
                    p.framework.clone(),
                    p.status.to_string(),
                    p.branch.clone(),
                    or_dash(p.domain.as_ref()),
                ]
            })
            .collect(),
    )
}

pub fn format_project(p: &project::Model) -> String {
    [
        format!("ID:         {}", p.id),
        format!("Name:       {}", p.name),
        format!("Framework:  {}", p.framework),
        format!("Repository: {}", p.repository_url),
        format!("Branch:     {}", p.branch),
        format!("Domain:     {}", or_dash(p.domain.as_ref())),
        format!("Status:     {}", p.status),
        format!("Updated:    {}", p.updated_at.format("%Y-%m-%d %H:%M:%S")),
    ]
    .join("\n")
}

pub fn format_domains(domains: &[domain::Model]) -> String {
    if domains.is_empty() {
        return "No domains".to_string();
    }
    table(
        &["ID", "DOMAIN", "STATUS", "PROJECT"],
        domains
            .iter()
            .map(|d| {
                vec![
                    d.id.to_string(),
                    d.name.clone(),
                    d.status.to_string(),
                    or_dash(d.project_id),
                ]
            })
            .collect(),
    )
}

pub fn format_databases(databases: &[managed_database::Model]) -> String {
    if databases.is_empty() {
        return "No databases".to_string();
    }
    table(
        &["ID", "NAME", "TYPE", "PROJECT"],
        databases
            .iter()
            .map(|d| {
                vec![
                    d.id.to_string(),
                    d.name.clone(),
                    d.db_type.clone(),
                    or_dash(d.project_id),
                ]
            })
            .collect(),
    )
}

pub fn format_activities(activities: &[activity::Model]) -> String {
    if activities.is_empty() {
        return "No activity".to_string();
    }
    table(
        &["WHEN", "TYPE", "DESCRIPTION"],
        activities
            .iter()
            .map(|a| {
                vec![
                    a.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    a.kind.clone(),
                    a.description.clone(),
                ]
            })
            .collect(),
    )
}

pub fn format_metric(m: &system_metric::Model) -> String {
    [
        format!("CPU:     {}%", m.cpu_usage),
        format!("Memory:  {}%", m.memory_usage),
        format!("Disk:    {}%", m.disk_usage),
        format!("Network: {} KB/s", m.network_usage),
        format!("At:      {}", m.timestamp.format("%Y-%m-%d %H:%M:%S")),
    ]
    .join("\n")
}
