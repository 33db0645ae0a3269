use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use studio_catalog::{ContentCatalog, Viewer};
use studio_navigation::{
    HeadlessPage, NavigationOutcome, Navigator, PageEvent, PageEventKind, PortfolioGallery,
};
use studio_protocol::{ErrorEnvelope, NavigationContext, SearchResponse};
use studio_search::{SearchBox, SiteSearch};

use crate::config::StudioConfig;

mod config;

#[derive(Parser)]
#[command(name = "studio")]
#[command(about = "Site search and section navigation for the studio website", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (overrides STUDIO_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search site content
    Search(SearchArgs),

    /// Search, pick a result from the dropdown and navigate to it
    Select(SelectArgs),

    /// Navigate the page to a section (optionally a category and item)
    Navigate(NavigateArgs),

    /// Press a call-to-action button
    Cta(CtaArgs),

    /// Show the header menu
    Menu(MenuArgs),

    /// Show the portfolio grid for a category filter
    Portfolio(PortfolioArgs),

    /// Dump the content catalog
    Catalog(JsonFlag),

    /// Print JSON schemas of the --json outputs
    Schema,
}

#[derive(Args)]
struct JsonFlag {
    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone, Copy)]
struct ViewerArgs {
    /// Render as a signed-in visitor
    #[arg(long)]
    authenticated: bool,

    /// Render as an admin (implies --authenticated)
    #[arg(long)]
    admin: bool,
}

impl ViewerArgs {
    const fn viewer(self) -> Viewer {
        Viewer {
            authenticated: self.authenticated || self.admin,
            admin: self.admin,
        }
    }
}

#[derive(Args)]
struct SearchArgs {
    /// Search query
    query: String,

    #[command(flatten)]
    output: JsonFlag,
}

#[derive(Args)]
struct SelectArgs {
    /// Search query
    query: String,

    /// Position of the result in the dropdown (0-based)
    #[arg(long, short = 'i', default_value_t = 0)]
    index: usize,

    #[command(flatten)]
    viewer: ViewerArgs,

    #[command(flatten)]
    output: JsonFlag,
}

#[derive(Args)]
struct NavigateArgs {
    /// Target section id
    section: String,

    /// Portfolio category to filter to
    #[arg(long)]
    category: Option<String>,

    /// Catalog item to focus
    #[arg(long)]
    item: Option<String>,

    #[command(flatten)]
    viewer: ViewerArgs,

    #[command(flatten)]
    output: JsonFlag,
}

#[derive(Args)]
struct CtaArgs {
    /// Call-to-action id, e.g. hero-book-shoot
    id: String,

    #[command(flatten)]
    viewer: ViewerArgs,

    #[command(flatten)]
    output: JsonFlag,
}

#[derive(Args)]
struct MenuArgs {
    #[command(flatten)]
    viewer: ViewerArgs,

    #[command(flatten)]
    output: JsonFlag,
}

#[derive(Args)]
struct PortfolioArgs {
    /// Category filter (default: All)
    #[arg(long)]
    category: Option<String>,

    #[command(flatten)]
    output: JsonFlag,
}

#[derive(Serialize)]
struct NavigationReport {
    target: NavigationContext,
    outcome: NavigationOutcome,
    events: Vec<PageEvent>,
    scroll_top: f64,
    selected_category: String,
    highlighted: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Search(args) => args.output.json,
        Commands::Select(args) => args.output.json,
        Commands::Navigate(args) => args.output.json,
        Commands::Cta(args) => args.output.json,
        Commands::Menu(args) => args.output.json,
        Commands::Portfolio(args) => args.output.json,
        Commands::Catalog(args) => args.json,
        Commands::Schema => true,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let result = run(cli).await;
    if json_output {
        if let Err(err) = &result {
            let envelope = ErrorEnvelope::new("error", format!("{err:#}"))
                .with_hint("run with --verbose for details");
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            std::process::exit(1);
        }
    }
    result
}

async fn run(cli: Cli) -> Result<()> {
    let config = StudioConfig::load(cli.config.as_deref())?;
    let catalog = config.load_catalog()?;

    match cli.command {
        Commands::Search(args) => run_search(&catalog, args),
        Commands::Select(args) => run_select(&catalog, &config, args).await,
        Commands::Navigate(args) => run_navigate(&catalog, &config, args).await,
        Commands::Cta(args) => run_cta(&catalog, &config, args).await,
        Commands::Menu(args) => run_menu(&catalog, args),
        Commands::Portfolio(args) => run_portfolio(&catalog, args),
        Commands::Catalog(args) => run_catalog(&catalog, args),
        Commands::Schema => {
            println!("{}", studio_protocol::serialize_json(&studio_protocol::schemas()?)?);
            Ok(())
        }
    }
}

fn run_search(catalog: &ContentCatalog, args: SearchArgs) -> Result<()> {
    let results = SiteSearch::new(catalog).search(&args.query);
    let response = SearchResponse::new(args.query.trim(), results);

    if args.output.json {
        println!("{}", studio_protocol::serialize_json(&response)?);
        return Ok(());
    }

    if response.hits.is_empty() {
        println!("No results found");
        return Ok(());
    }
    for (i, hit) in response.hits.iter().enumerate() {
        println!("{}. {}", i + 1, hit.label);
        let result = &hit.result;
        match (result.category(), result.item_id()) {
            (Some(category), Some(item)) => {
                println!("   #{} [{}] {}", result.section_id(), category, item);
            }
            (None, Some(item)) => println!("   #{} {}", result.section_id(), item),
            _ => println!("   #{}", result.section_id()),
        }
    }
    Ok(())
}

async fn run_select(catalog: &ContentCatalog, config: &StudioConfig, args: SelectArgs) -> Result<()> {
    let mut search_box = SearchBox::new(SiteSearch::new(catalog));
    search_box.set_query(args.query.as_str());
    let available = search_box.results().len();
    let target = search_box.select(args.index).with_context(|| {
        format!(
            "No search result at index {} for '{}' ({available} results)",
            args.index,
            args.query.trim()
        )
    })?;

    navigate_and_report(catalog, config, args.viewer.viewer(), target, args.output.json).await
}

async fn run_navigate(
    catalog: &ContentCatalog,
    config: &StudioConfig,
    args: NavigateArgs,
) -> Result<()> {
    let mut target = NavigationContext::section(args.section);
    target.category = args.category;
    target.item_id = args.item;
    navigate_and_report(catalog, config, args.viewer.viewer(), target, args.output.json).await
}

async fn run_cta(catalog: &ContentCatalog, config: &StudioConfig, args: CtaArgs) -> Result<()> {
    let Some(cta) = catalog.call_to_action(&args.id) else {
        let known: Vec<&str> = catalog
            .calls_to_action()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        anyhow::bail!(
            "Unknown call to action '{}' (available: {})",
            args.id,
            known.join(", ")
        );
    };
    log::info!("Pressed '{}'", cta.label);
    let target = NavigationContext::section(cta.section_id.as_str());
    navigate_and_report(catalog, config, args.viewer.viewer(), target, args.output.json).await
}

async fn navigate_and_report(
    catalog: &ContentCatalog,
    config: &StudioConfig,
    viewer: Viewer,
    target: NavigationContext,
    json: bool,
) -> Result<()> {
    let page = Arc::new(HeadlessPage::new(catalog, viewer));
    let navigator = Navigator::new(Arc::clone(&page), config.navigation.clone())?;

    let outcome = navigator.navigate(&target);
    navigator.settle().await;

    let report = NavigationReport {
        target,
        outcome,
        events: page.events(),
        scroll_top: page.scroll_top(),
        selected_category: page.selected_category(),
        highlighted: page.highlighted(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &report.outcome {
        NavigationOutcome::SectionMissing => {
            println!("Section '#{}' is not on the page", report.target.section_id);
        }
        NavigationOutcome::Scrolled { top } | NavigationOutcome::ScrolledWithFollowUp { top, .. } => {
            println!("Scrolled to '#{}' at {top}px", report.target.section_id);
        }
    }
    for event in &report.events {
        println!("  +{:>5}ms {}", event.elapsed_ms, describe(&event.kind));
    }
    Ok(())
}

fn describe(kind: &PageEventKind) -> String {
    match kind {
        PageEventKind::Scrolled { top, .. } => format!("scroll to {top}px"),
        PageEventKind::CategorySelected { category } => format!("filter portfolio: {category}"),
        PageEventKind::ItemScrolledIntoView { item_id, .. } => format!("center {item_id}"),
        PageEventKind::ItemMissing { item_id } => format!("{item_id} not rendered"),
        PageEventKind::HighlightOn { item_id } => format!("highlight {item_id}"),
        PageEventKind::HighlightOff { item_id } => format!("clear highlight {item_id}"),
    }
}

fn run_menu(catalog: &ContentCatalog, args: MenuArgs) -> Result<()> {
    let menu = catalog.menu(args.viewer.viewer());
    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&menu)?);
        return Ok(());
    }
    for item in &menu {
        println!("{:<20} #{}", item.label, item.section_id);
    }
    Ok(())
}

fn run_portfolio(catalog: &ContentCatalog, args: PortfolioArgs) -> Result<()> {
    let mut gallery = PortfolioGallery::new(catalog);
    if let Some(category) = &args.category {
        gallery.select_category(category);
    }

    if args.output.json {
        let value = serde_json::json!({
            "filters": gallery.filter_options(),
            "selected": gallery.selected_category(),
            "items": gallery.visible_items(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let filters: Vec<String> = gallery
        .filter_options()
        .into_iter()
        .map(|option| {
            if option == gallery.selected_category() {
                format!("[{option}]")
            } else {
                option.to_string()
            }
        })
        .collect();
    println!("{}", filters.join(" "));

    let items = gallery.visible_items();
    if items.is_empty() {
        println!("No items found in this category.");
    }
    for item in items {
        println!("{:<14} {:<20} {}", item.id, item.title, item.category);
    }
    Ok(())
}

fn run_catalog(catalog: &ContentCatalog, args: JsonFlag) -> Result<()> {
    if args.json {
        let value = serde_json::json!({
            "services": catalog.services(),
            "portfolio": catalog.portfolio(),
            "sections": catalog.sections(),
            "page": catalog.page(),
            "calls_to_action": catalog.calls_to_action(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Services ({}):", catalog.services().len());
    for service in catalog.services() {
        println!("  {:<20} {}", service.id, service.title);
    }
    println!("Portfolio ({}):", catalog.portfolio().len());
    for item in catalog.portfolio() {
        println!("  {:<20} {} [{}]", item.id, item.title, item.category);
    }
    println!("Sections ({}):", catalog.sections().len());
    for section in catalog.sections() {
        println!("  {:<20} {}", section.id, section.title);
    }
    Ok(())
}
