//! Agri Advisor - command-line front end
//!
//! Crop requirements, recommendations, predictions and advisory narratives
//! backed by a local or cloud LLM with a deterministic fallback.

use agri_advisor::advisor::{Advisor, Narrative};
use agri_advisor::backends::{BackendRegistry, LlmBackend, ModelSelection};
use agri_advisor::conditions::RawConditions;
use agri_advisor::config::{AdvisorConfig, CONFIG_FILE};
use agri_advisor::knowledge::{title_case, KnowledgeStore};
use agri_advisor::resolver::{Content, Query, Resolver, StructuredRecommendation};
use anyhow::{Context, Result};
use base64::Engine;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "agri")]
#[command(version)]
#[command(about = "Hybrid crop recommendation and farm advisory", long_about = None)]
struct Cli {
    /// Configuration file (default: nearest agri.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend to use instead of the configured default
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Warnings and errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the assistant a farming question
    Chat {
        /// Question text
        message: String,

        #[arg(long)]
        json: bool,
    },

    /// Show or create the configuration file
    Config {
        /// Print the effective configuration
        #[arg(long)]
        show: bool,

        /// Write a default agri.toml in the current directory
        #[arg(long)]
        init: bool,
    },

    /// List crops in the knowledge base
    Crops {
        #[arg(long)]
        json: bool,
    },

    /// Analyze a plant image for disease
    Disease {
        /// Image file (JPEG or PNG)
        image: PathBuf,

        /// Skip the vision model and produce a general guide
        #[arg(long)]
        text_only: bool,

        #[arg(long)]
        json: bool,
    },

    /// Assess a loan application
    Loan {
        /// JSON file with the application fields
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Show backend status and available models
    Models {
        #[arg(long)]
        json: bool,
    },

    /// Quick single-crop prediction from nutrients and weather
    Predict {
        #[arg(short = 'n', long)]
        nitrogen: String,

        #[arg(short = 'p', long)]
        phosphorus: String,

        #[arg(short = 'k', long)]
        potassium: String,

        /// Temperature in °C
        #[arg(long)]
        temperature: String,

        /// Relative humidity in percent
        #[arg(long)]
        humidity: String,

        #[arg(long)]
        ph: String,

        /// Rainfall in mm
        #[arg(long)]
        rainfall: String,

        #[arg(long)]
        json: bool,
    },

    /// Recommend a crop and growing plan for farm conditions
    Recommend {
        #[command(flatten)]
        conditions: ConditionArgs,

        #[arg(long)]
        json: bool,
    },

    /// Growing requirements for a crop
    Requirements {
        /// Crop name
        crop: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ConditionArgs {
    #[arg(long)]
    ph: String,

    /// Temperature in °C
    #[arg(long)]
    temperature: String,

    /// Rainfall in mm
    #[arg(long)]
    rainfall: String,

    /// Soil type (clay, loamy, sandy, ...)
    #[arg(long)]
    soil: Option<String>,

    /// Season (monsoon, winter, summer)
    #[arg(long)]
    season: Option<String>,

    #[arg(long)]
    nitrogen: Option<String>,

    #[arg(long)]
    phosphorus: Option<String>,

    #[arg(long)]
    potassium: Option<String>,

    #[arg(long)]
    humidity: Option<String>,

    /// Market demand (Low, Medium, High)
    #[arg(long)]
    market_demand: Option<String>,

    /// Irrigation method
    #[arg(long)]
    irrigation: Option<String>,

    /// Fertilizer currently used
    #[arg(long)]
    fertilizer: Option<String>,

    /// Current pest problems
    #[arg(long)]
    pest_issue: Option<String>,
}

impl From<ConditionArgs> for RawConditions {
    fn from(args: ConditionArgs) -> Self {
        RawConditions {
            ph: Some(args.ph),
            temperature: Some(args.temperature),
            rainfall: Some(args.rainfall),
            nitrogen: args.nitrogen,
            phosphorus: args.phosphorus,
            potassium: args.potassium,
            humidity: args.humidity,
            soil_type: args.soil,
            season: args.season,
            market_demand: args.market_demand,
            irrigation: args.irrigation,
            fertilizer: args.fertilizer,
            pest_issue: args.pest_issue,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Config { show, init } => cmd_config(&config, show, init),
        Commands::Crops { json } => cmd_crops(json),
        Commands::Models { json } => cmd_models(&config, cli.backend.as_deref(), json),
        Commands::Requirements { crop, json } => {
            let query = Query::requirements(&crop)?;
            cmd_resolve(&config, cli.backend.as_deref(), &query, json)
        }
        Commands::Recommend { conditions, json } => {
            let conditions = RawConditions::from(conditions).validate()?;
            cmd_resolve(
                &config,
                cli.backend.as_deref(),
                &Query::Recommend { conditions },
                json,
            )
        }
        Commands::Predict {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
            json,
        } => {
            let raw = RawConditions {
                ph: Some(ph),
                temperature: Some(temperature),
                rainfall: Some(rainfall),
                nitrogen: Some(nitrogen),
                phosphorus: Some(phosphorus),
                potassium: Some(potassium),
                humidity: Some(humidity),
                ..Default::default()
            };
            let conditions = raw.validate()?;
            cmd_resolve(
                &config,
                cli.backend.as_deref(),
                &Query::Predict { conditions },
                json,
            )
        }
        Commands::Chat { message, json } => {
            let advisor = connect_advisor(&config, cli.backend.as_deref())?;
            let reply = advisor.chat(&message)?;
            print_narrative(&reply, json)
        }
        Commands::Loan { file, json } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let application: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;
            let advisor = connect_advisor(&config, cli.backend.as_deref())?;
            let reply = advisor.loan_eligibility(&application)?;
            print_narrative(&reply, json)
        }
        Commands::Disease {
            image,
            text_only,
            json,
        } => {
            let bytes =
                fs::read(&image).with_context(|| format!("Failed to read {}", image.display()))?;
            let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
            let advisor = connect_advisor(&config, cli.backend.as_deref())?;
            let reply = advisor.analyze_disease(&encoded, !text_only)?;
            print_narrative(&reply, json)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn load_config(path: Option<&PathBuf>) -> Result<AdvisorConfig> {
    let mut config = match path {
        Some(path) => AdvisorConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => AdvisorConfig::load_from_cwd().context("Failed to load configuration")?,
    };
    config.apply_env();
    Ok(config)
}

/// Backend plus the startup model choice
fn connect(
    config: &AdvisorConfig,
    backend_name: Option<&str>,
) -> Result<(Arc<dyn LlmBackend>, Arc<ModelSelection>)> {
    let registry = BackendRegistry::from_config(config);
    let backend = match backend_name {
        Some(name) => registry.get(name),
        None => registry.default_backend(),
    }
    .with_context(|| {
        format!(
            "Unknown backend '{}'. Available: {}",
            backend_name.unwrap_or(registry.default_name()),
            registry.list().join(", ")
        )
    })?;

    let selection = if backend.name() == "gemini" {
        ModelSelection::fixed(&config.gemini.model)
    } else {
        ModelSelection::probe(
            backend.as_ref(),
            &config.ollama.model_preferences,
            &config.ollama.default_model,
        )
    };
    Ok((backend, Arc::new(selection)))
}

fn connect_advisor(config: &AdvisorConfig, backend_name: Option<&str>) -> Result<Advisor> {
    let (backend, selection) = connect(config, backend_name)?;
    Ok(Advisor::new(backend, selection, config))
}

fn cmd_resolve(
    config: &AdvisorConfig,
    backend_name: Option<&str>,
    query: &Query,
    json: bool,
) -> Result<()> {
    let (backend, selection) = connect(config, backend_name)?;
    let resolver = Resolver::new(backend, selection, config.timeouts.clone());
    let result = resolver.resolve(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_recommendation(&result);
    }
    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}:", title);
    for item in items {
        println!("  - {}", item);
    }
}

fn print_recommendation(result: &StructuredRecommendation) {
    match result.confidence {
        Some(confidence) => println!("{} ({} confidence)", result.crop, confidence),
        None => println!("{}", result.crop),
    }
    print!("Source: {}", result.provenance);
    if let Some(model) = &result.model {
        print!(" [{}]", model);
    }
    println!(" in {}ms", result.elapsed_ms);
    if let Some(note) = &result.note {
        println!("Note: {}", note);
    }

    match &result.content {
        Content::Requirements(req) => {
            print_list("Soil requirements", &req.soil_requirements);
            print_list("Climate requirements", &req.climate_requirements);
            print_list("Growing tips", &req.growing_tips);
            print_list("Harvest info", &req.harvest_info);
            if req.is_empty() {
                if let Some(raw) = &result.raw_text {
                    println!();
                    println!("{}", raw);
                }
            }
        }
        Content::Plan(plan) => {
            let guide = &plan.guide;
            println!();
            println!("{}", guide.title);
            for (label, text) in [
                ("Timeline", &guide.timeline),
                ("How to plant", &guide.how_to_plant),
                ("Fertilizer", &guide.fertilizer),
                ("Water", &guide.ideal_rainfall),
                ("Post-harvest", &guide.post_harvest),
            ] {
                if !text.is_empty() {
                    println!("  {}: {}", label, text);
                }
            }
            print_list("Tips", &plan.additional_tips);
            println!();
            println!("Expected yield: {}", plan.expected_yield);
            println!("Market price:   {}", plan.market_price);
            if let Some(req) = &plan.requirements {
                print_list("Soil requirements", &req.soil_requirements);
                print_list("Climate requirements", &req.climate_requirements);
            }
        }
        Content::Prediction { reason, tips } => {
            println!("Reason: {}", reason);
            print_list("Tips", tips);
        }
    }
}

fn print_narrative(reply: &Narrative, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
        return Ok(());
    }
    println!("{}", reply.text);
    println!();
    let fallback = if reply.fallback { ", fallback model" } else { "" };
    println!("({} in {}ms{})", reply.model, reply.elapsed_ms, fallback);
    Ok(())
}

fn cmd_crops(json: bool) -> Result<()> {
    let store = KnowledgeStore::builtin();
    let names: Vec<String> = store.names().map(title_case).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        println!("Knowledge base ({} crops)", store.len());
        for name in names {
            println!("  {}", name);
        }
    }
    Ok(())
}

fn cmd_models(config: &AdvisorConfig, backend_name: Option<&str>, json: bool) -> Result<()> {
    let registry = BackendRegistry::from_config(config);
    let active = backend_name.unwrap_or(registry.default_name()).to_string();
    let mut report = Vec::new();

    for name in registry.list() {
        let Some(backend) = registry.get(name) else {
            continue;
        };
        let available = backend.is_available();
        let models = backend.list_models();
        let selected = if name == "gemini" {
            Some(config.gemini.model.clone())
        } else {
            models.as_ref().ok().map(|available| {
                agri_advisor::select_model(available, &config.ollama.model_preferences)
                    .unwrap_or_else(|| config.ollama.default_model.clone())
            })
        };
        report.push(serde_json::json!({
            "backend": name,
            "active": name == active,
            "base_url": backend.base_url(),
            "available": available,
            "connected": models.is_ok(),
            "selected_model": selected,
            "available_models": models.as_ref().cloned().unwrap_or_default(),
            "error": models.as_ref().err().map(|e| e.to_string()),
        }));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for entry in &report {
        let available = entry["available"].as_bool().unwrap_or(false);
        let marker = if entry["active"].as_bool().unwrap_or(false) {
            " (active)"
        } else {
            ""
        };
        println!(
            "{} {}{}  {}",
            if available { "✓" } else { "✗" },
            entry["backend"].as_str().unwrap_or_default(),
            marker,
            entry["base_url"].as_str().unwrap_or_default()
        );
        if let Some(model) = entry["selected_model"].as_str() {
            println!("    Selected: {}", model);
        }
        if let Some(models) = entry["available_models"].as_array() {
            for model in models.iter().filter_map(|m| m.as_str()) {
                println!("    - {}", model);
            }
        }
        if let Some(error) = entry["error"].as_str() {
            println!("    {}", error);
        }
    }
    Ok(())
}

fn cmd_config(config: &AdvisorConfig, show: bool, init: bool) -> Result<()> {
    if init {
        let path = PathBuf::from(CONFIG_FILE);
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        AdvisorConfig::default()
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
        if !show {
            return Ok(());
        }
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
