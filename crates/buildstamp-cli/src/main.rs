//! Buildstamp - build identity resolution
//!
//! The `buildstamp` command resolves the version and CI context of a build
//! once, at startup, for later build steps to consume.
//!
//! ## Commands
//!
//! - `resolve`: Resolve and print the full build context
//! - `version`: Print only the resolved version string
//! - `ci`: Print the CI context facts
//! - `info`: Show calculator availability and the detected CI system

use anyhow::{Context, Result};
use buildstamp_core::{
    detect_provider, init_tracing, AppVeyor, BuildArguments, BuildConfig, BuildContext, CiFacts,
    EnvSource, GitVersionCli, ProcessEnv, Setup, VersionTool, DEFAULT_CONFIG_FILE,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "buildstamp")]
#[command(author = "Stevedores Org")]
#[command(about = "Resolve build version and CI context", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Build configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// GitVersion executable (default: $GITVERSION_EXE or `gitversion`)
    #[arg(long, global = true)]
    gitversion: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and print the full build context
    Resolve {
        #[command(flatten)]
        build: BuildArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print the resolved version string
    Version {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Print the CI context facts
    Ci {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show calculator availability and the detected CI system
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Named build arguments.
#[derive(Args)]
struct BuildArgs {
    /// Build target
    #[arg(long)]
    target: Option<String>,

    /// Build configuration
    #[arg(long)]
    configuration: Option<String>,

    /// Force the release version
    #[arg(long = "version")]
    version: Option<String>,

    /// Force the version suffix
    #[arg(long)]
    suffix: Option<String>,

    /// Publish regardless of branch or tag
    #[arg(
        long = "forcepublish",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    force_publish: bool,

    /// Artifact feed source
    #[arg(long = "mygetsource")]
    myget_source: Option<String>,

    /// Artifact feed API key
    #[arg(long = "mygetapikey")]
    myget_api_key: Option<String>,
}

impl From<BuildArgs> for BuildArguments {
    fn from(args: BuildArgs) -> Self {
        BuildArguments {
            target: args.target,
            configuration: args.configuration,
            version: args.version,
            suffix: args.suffix,
            force_publish: args.force_publish,
            myget_source: args.myget_source,
            myget_api_key: args.myget_api_key,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let tool = match &cli.gitversion {
        Some(exe) => GitVersionCli::new(exe, "."),
        None => GitVersionCli::from_env(".", |name| ProcessEnv.var(name)),
    };

    match cli.command {
        Commands::Resolve { build, format } => {
            let ctx = setup_context(&cli.config, &tool, build.into())?;
            print_context(&ctx, format)
        }
        Commands::Version { build } => {
            let ctx = setup_context(&cli.config, &tool, build.into())?;
            println!("{}", ctx.version());
            Ok(())
        }
        Commands::Ci { format } => cmd_ci(&cli.config, format),
        Commands::Info => cmd_info(&tool),
    }
}

fn load_config(path: &Path) -> Result<BuildConfig> {
    BuildConfig::load(path)
        .with_context(|| format!("Failed to load build configuration {}", path.display()))
}

fn setup_context(
    config_path: &Path,
    tool: &GitVersionCli,
    arguments: BuildArguments,
) -> Result<BuildContext> {
    let config = load_config(config_path)?;
    debug!("Arguments: {:?}", arguments);

    let env = ProcessEnv;
    let ci = AppVeyor::new(ProcessEnv);
    BuildContext::setup(Setup {
        arguments: &arguments,
        env: &env,
        ci: &ci,
        tool,
        config: &config,
    })
    .context("Build setup failed")
}

fn print_context(ctx: &BuildContext, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", ctx.to_json()?),
        Format::Text => {
            println!("Version:          {}", ctx.version().release());
            println!("Version suffix:   {}", ctx.version().suffix());
            println!("Configuration:    {}", ctx.configuration());
            println!("Target:           {}", ctx.target());
            print_facts(ctx.ci());
            println!("Force publish:    {}", ctx.force_publish());
            if let Some(source) = ctx.myget_source() {
                println!("MyGet source:     {}", source);
            }
            let publish: Vec<&str> = ctx.publishable_projects().map(|p| p.name.as_str()).collect();
            if !publish.is_empty() {
                println!("Publishes:        {}", publish.join(", "));
            }
        }
    }
    Ok(())
}

fn print_facts(facts: &CiFacts) {
    println!("CI:               {}", facts.is_ci);
    println!("Local build:      {}", facts.is_local_build);
    println!("Pull request:     {}", facts.is_pull_request);
    println!("Original repo:    {}", facts.is_original_repo);
    println!("Tagged:           {}", facts.is_tagged);
    println!("Master branch:    {}", facts.is_master_branch);
}

#[derive(Serialize)]
struct CiReport {
    provider: buildstamp_core::BuildProvider,
    #[serde(flatten)]
    facts: CiFacts,
}

fn cmd_ci(config_path: &Path, format: Format) -> Result<()> {
    let config = load_config(config_path)?;
    let facts = CiFacts::resolve(&AppVeyor::new(ProcessEnv), &config.origin_repository);
    let provider = detect_provider(&ProcessEnv);

    match format {
        Format::Json => {
            let report = CiReport { provider, facts };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Format::Text => {
            println!("Provider:         {}", provider);
            print_facts(&facts);
        }
    }
    Ok(())
}

fn cmd_info(tool: &GitVersionCli) -> Result<()> {
    println!("Buildstamp {}", buildstamp_core::VERSION);
    println!();

    println!("GitVersion executable: {}", tool.executable().display());
    let supported = tool.is_supported();
    println!("GitVersion installed: {}", if supported { "yes" } else { "no" });
    if supported {
        if let Ok(version) = tool.tool_version() {
            println!("GitVersion version: {}", version);
        }
    }

    println!("CI system: {}", detect_provider(&ProcessEnv));
    Ok(())
}
