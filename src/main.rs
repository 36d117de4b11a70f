// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use fawaid::parser::grammar::{format_timestamp, join_list, split_list};
use fawaid::utils::logging::{
    format_benefit_line, format_error, format_info, format_success, format_warning,
};
use fawaid::{
    Benefit, BenefitDraft, BenefitEditor, BenefitError, Config, ContentType, Facets,
    FilterEngine, FilterQuery, FilteredBenefit, FsDocumentStore, JsonExporter, SortDirection,
    SortKey, SystemClock, Validator, VaultCollector,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "fawaid")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Manage benefit records embedded in markdown notes", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the benefits of one note
    List {
        /// Note path, relative to the vault root
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Show one benefit in full
    Show {
        file: PathBuf,

        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Append a benefit to a note
    Add {
        file: PathBuf,

        #[command(flatten)]
        fields: DraftArgs,
    },

    /// Replace the content of an existing benefit
    Update {
        file: PathBuf,

        id: String,

        #[command(flatten)]
        fields: DraftArgs,
    },

    /// Remove a benefit from a note
    Delete { file: PathBuf, id: String },

    /// Search benefits across the vault
    Search {
        /// Free-text terms, all of which must appear in the body
        query: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        #[arg(long)]
        json: bool,
    },

    /// Show tag and category trees with counts
    Facets {
        #[arg(long)]
        json: bool,
    },

    /// Export benefits to JSON
    Export {
        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long)]
        query: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args)]
struct DraftArgs {
    #[arg(short = 'T', long)]
    title: String,

    #[arg(short = 'x', long)]
    text: String,

    #[arg(long)]
    page: Option<u32>,

    #[arg(long)]
    volume: Option<u32>,

    /// H:MM:SS or MM:SS
    #[arg(long)]
    timestamp: Option<String>,

    /// Separated by `،` or `,`
    #[arg(long)]
    categories: Option<String>,

    /// Separated by `،` or `,`
    #[arg(long)]
    tags: Option<String>,

    /// book or video; taken from the note's frontmatter or folder when omitted
    #[arg(long)]
    content_type: Option<String>,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long = "tag")]
    tags: Vec<String>,

    #[arg(long = "category")]
    categories: Vec<String>,

    #[arg(long = "author")]
    authors: Vec<String>,

    #[arg(long = "source")]
    sources: Vec<String>,

    #[arg(long)]
    content_type: Option<String>,

    #[arg(long)]
    from: Option<String>,

    #[arg(long)]
    to: Option<String>,

    /// title, author, source, date-created or date-modified
    #[arg(long)]
    sort: Option<String>,

    #[arg(long)]
    desc: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    fawaid::utils::logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    info!("Vault root: {}", config.vault.root.display());

    let result = match cli.command {
        Commands::List { file, json } => cmd_list(&config, &file, json).await,
        Commands::Show { file, id, json } => cmd_show(&config, &file, &id, json).await,
        Commands::Add { file, fields } => cmd_add(&config, &file, fields).await,
        Commands::Update { file, id, fields } => cmd_update(&config, &file, &id, fields).await,
        Commands::Delete { file, id } => cmd_delete(&config, &file, &id).await,
        Commands::Search {
            query,
            filters,
            limit,
            json,
        } => cmd_search(&config, query, filters, limit, json).await,
        Commands::Facets { json } => cmd_facets(&config, json).await,
        Commands::Export {
            output,
            pretty,
            query,
            filters,
        } => cmd_export(&config, output, pretty, query, filters).await,
    };

    if let Err(e) = &result {
        match e.downcast_ref::<BenefitError>() {
            Some(err) if err.is_not_found() => eprintln!("{}", format_warning(&err.to_string())),
            _ => eprintln!("{}", format_error(&format!("{:#}", e))),
        }
    }
    result
}

fn editor(config: &Config) -> BenefitEditor<FsDocumentStore, SystemClock> {
    BenefitEditor::new(FsDocumentStore::new(&config.vault.root), SystemClock)
}

async fn cmd_list(config: &Config, file: &Path, json: bool) -> Result<()> {
    let store = FsDocumentStore::new(&config.vault.root);
    let collector = VaultCollector::new(&store, &SystemClock, &config.vault);

    let benefits = collector
        .collect_note(&file.to_string_lossy())
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&benefits)?);
        return Ok(());
    }

    if benefits.is_empty() {
        println!("{}", format_warning("No benefits in this note"));
        return Ok(());
    }

    for benefit in &benefits {
        print_benefit(benefit, None);
    }
    println!("{}", format_info(&format!("{} benefits", benefits.len())));
    Ok(())
}

async fn cmd_show(config: &Config, file: &Path, id: &str, json: bool) -> Result<()> {
    let store = FsDocumentStore::new(&config.vault.root);
    let provenance = VaultCollector::new(&store, &SystemClock, &config.vault)
        .note_provenance(&file.to_string_lossy())
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let benefit = editor(config).get(file, id, &provenance).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&benefit)?);
        return Ok(());
    }

    print_benefit(&benefit, None);
    println!("{}", benefit.text);
    if !benefit.categories.is_empty() {
        println!("  التصنيفات: {}", join_list(&benefit.categories));
    }
    if !benefit.tags.is_empty() {
        println!("  الوسوم: {}", join_list(&benefit.tags));
    }
    Ok(())
}

async fn cmd_add(config: &Config, file: &Path, fields: DraftArgs) -> Result<()> {
    let draft = build_draft(config, file, fields).await?;
    let benefit = editor(config).add(file, draft).await?;

    println!(
        "{}",
        format_success(&format!("Added {} ({})", benefit.title, benefit.id))
    );
    Ok(())
}

async fn cmd_update(config: &Config, file: &Path, id: &str, fields: DraftArgs) -> Result<()> {
    let draft = build_draft(config, file, fields).await?;
    let benefit = editor(config).update(file, id, draft).await?;

    println!(
        "{}",
        format_success(&format!("Updated {} ({})", benefit.title, benefit.id))
    );
    Ok(())
}

async fn cmd_delete(config: &Config, file: &Path, id: &str) -> Result<()> {
    editor(config).delete(file, id).await?;

    println!("{}", format_success(&format!("Deleted {}", id)));
    Ok(())
}

async fn cmd_search(
    config: &Config,
    query: Option<String>,
    filters: FilterArgs,
    limit: usize,
    json: bool,
) -> Result<()> {
    let benefits = collect_vault(config).await?;
    let query = build_query(config, query, filters)?;

    let engine = FilterEngine::new(config.display.markers());
    let results = engine.apply(&benefits, &query);

    if json {
        let shown: Vec<&FilteredBenefit> = results.iter().take(limit).collect();
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    for result in results.iter().take(limit) {
        print_benefit(&result.benefit, result.highlighted.as_deref());
    }
    println!(
        "{}",
        format_info(&format!(
            "{} of {} benefits matched",
            results.len(),
            benefits.len()
        ))
    );
    Ok(())
}

async fn cmd_facets(config: &Config, json: bool) -> Result<()> {
    let benefits = collect_vault(config).await?;
    let facets = Facets::from_benefits(&benefits);

    if json {
        println!("{}", serde_json::to_string_pretty(&facets)?);
        return Ok(());
    }

    println!("{}", format_info("Categories"));
    print_tree(&facets.categories, "", 1);
    println!("{}", format_info("Tags"));
    print_tree(&facets.tags, "", 1);

    println!("{}", format_info("Authors"));
    for author in &facets.authors {
        println!("  {}", author);
    }
    println!("{}", format_info("Sources"));
    for source in &facets.sources {
        println!("  {}", source);
    }
    Ok(())
}

async fn cmd_export(
    config: &Config,
    output: PathBuf,
    pretty: bool,
    query: Option<String>,
    filters: FilterArgs,
) -> Result<()> {
    let benefits = collect_vault(config).await?;
    let query = build_query(config, query, filters)?;
    let results = FilterEngine::new(config.display.markers()).apply(&benefits, &query);

    let exporter = JsonExporter::new(&output).context("Failed to create export directory")?;
    let manifest = exporter.export(&results, pretty)?;

    println!(
        "{}",
        format_success(&format!(
            "Exported {} benefits to {}",
            manifest.total_benefits,
            output.display()
        ))
    );
    Ok(())
}

async fn collect_vault(config: &Config) -> Result<Vec<Benefit>> {
    let store = FsDocumentStore::new(&config.vault.root);
    let collector = VaultCollector::new(&store, &SystemClock, &config.vault);

    collector
        .collect(&config.vault.root)
        .await
        .context("Failed to collect benefits from vault")
}

async fn build_draft(config: &Config, file: &Path, fields: DraftArgs) -> Result<BenefitDraft> {
    let content_type = match fields.content_type.as_deref() {
        Some(raw) => raw.parse::<ContentType>()?,
        None => {
            let store = FsDocumentStore::new(&config.vault.root);
            VaultCollector::new(&store, &SystemClock, &config.vault)
                .note_provenance(&file.to_string_lossy())
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?
                .content_type
        }
    };

    let mut draft = BenefitDraft::new(fields.title, fields.text).content_type(content_type);
    draft.page_number = fields.page;
    draft.volume_number = fields.volume;
    if let Some(raw) = fields.timestamp.as_deref() {
        draft.timestamp = Some(Validator::parse_timestamp_arg(raw)?);
    }
    for category in split_cli_list(fields.categories.as_deref()) {
        draft = draft.category(category);
    }
    for tag in split_cli_list(fields.tags.as_deref()) {
        draft = draft.tag(tag);
    }

    Ok(draft)
}

fn build_query(config: &Config, text: Option<String>, filters: FilterArgs) -> Result<FilterQuery> {
    for bound in filters.from.iter().chain(filters.to.iter()) {
        Validator::validate_date_bound(bound)?;
    }

    let mut query = FilterQuery::new()
        .with_text(text.unwrap_or_default())
        .created_between(filters.from, filters.to);

    for tag in filters.tags {
        query = query.with_tag(Validator::normalize_path(&tag));
    }
    for category in filters.categories {
        query = query.with_category(Validator::normalize_path(&category));
    }
    for author in filters.authors {
        query = query.with_author(author);
    }
    for source in filters.sources {
        query = query.with_source(source);
    }
    if let Some(raw) = filters.content_type.as_deref() {
        query = query.with_content_type(raw.parse()?);
    }

    let key = match filters.sort.as_deref() {
        Some(raw) => raw.parse::<SortKey>()?,
        None => config.display.sort_key,
    };
    let direction = if filters.desc {
        SortDirection::Descending
    } else {
        config.display.direction()
    };

    Ok(query.sorted_by(key, direction))
}

fn split_cli_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|r| split_list(&r.replace(',', "،")))
        .unwrap_or_default()
}

fn print_benefit(benefit: &Benefit, highlighted: Option<&str>) {
    let location = match benefit.content_type() {
        ContentType::Book => match (benefit.volume_number, benefit.page_number) {
            (Some(v), Some(p)) => Some(format!("ج{} ص{}", v, p)),
            (None, Some(p)) => Some(format!("ص{}", p)),
            (Some(v), None) => Some(format!("ج{}", v)),
            (None, None) => None,
        },
        ContentType::Video => benefit.timestamp.map(format_timestamp),
    };

    println!(
        "{}",
        format_benefit_line(&benefit.id, &benefit.title, location.as_deref())
    );
    if !benefit.provenance.parent_title.is_empty() {
        println!("  {}", benefit.provenance.parent_title);
    }
    println!(
        "  {}",
        Validator::truncate_text(highlighted.unwrap_or(&benefit.text), 160)
    );
}

fn print_tree(tree: &std::collections::BTreeMap<String, usize>, parent: &str, depth: usize) {
    for (path, count) in Facets::children(tree, parent) {
        let name = path.rsplit('/').next().unwrap_or(path);
        println!("{}{} ({})", "  ".repeat(depth), name, count);
        print_tree(tree, path, depth + 1);
    }
}
