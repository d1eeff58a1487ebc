// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dexview CLI entrypoint.
//!
//! Without a subcommand this runs the interactive terminal UI. `page` and `show` print one page or
//! one entry to stdout and exit. `--demo` swaps the PokeAPI client for a built-in offline catalog.

use std::error::Error;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use dexview::config::{AppConfig, ConfigOverrides};
use dexview::controller::{EventSender, ListingMode, PageView};
use dexview::logging::{self, LogTarget};
use dexview::model::{EntryDetail, EntryName};
use dexview::remote::{CatalogSource, PokeApiClient, StaticCatalog};
use dexview::store::{PrefsFolder, WriteDurability};
use dexview::DexApp;
use tokio::runtime::Runtime;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "dexview", version, about = "Browse the Pokémon catalog from the terminal")]
struct Cli {
    /// Use the built-in offline catalog and a throwaway preferences directory.
    #[arg(long)]
    demo: bool,

    /// Extra TOML config file (must exist).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the species resource.
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Directory for preferences and logs.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// fsync preference files after every write.
    #[arg(long)]
    durable_writes: bool,

    /// Log to stderr instead of the rolling log file.
    #[arg(long)]
    log_stderr: bool,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum CliCommand {
    /// Print one page of the catalog, or of the entries matching --search.
    Page {
        #[arg(default_value_t = 1)]
        number: usize,
        #[arg(long, value_name = "TERM")]
        search: Option<String>,
    },
    /// Print the detail of one entry.
    Show { name: String },
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            api_url: self.api_url.clone(),
            data_dir: self.data_dir.clone(),
            page_size: self.page_size,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("dexview: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load(&cli.overrides())?;
    let log_target = if cli.log_stderr {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_dir())
    };
    let _log_guard = logging::init(&log_target)?;

    let prefs_dir = if cli.demo {
        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("dexview-demo-{}-{now_millis}", std::process::id()))
    } else {
        config.prefs_dir().to_path_buf()
    };
    let durability = if cli.durable_writes {
        WriteDurability::Durable
    } else {
        WriteDurability::BestEffort
    };
    let store = PrefsFolder::new(prefs_dir).with_durability(durability);
    info!(demo = cli.demo, api_url = %config.api_url, prefs = %store.dir().display(), "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    if cli.demo {
        run_with_source(Arc::new(StaticCatalog::demo()), store, &config, cli.command, &runtime)
    } else {
        let client = PokeApiClient::new(config.client_config())?;
        run_with_source(Arc::new(client), store, &config, cli.command, &runtime)
    }
}

fn run_with_source<C: CatalogSource + 'static>(
    source: Arc<C>,
    store: PrefsFolder,
    config: &AppConfig,
    command: Option<CliCommand>,
    runtime: &Runtime,
) -> Result<(), Box<dyn Error>> {
    let Some(command) = command else {
        let (events, rx) = EventSender::channel();
        let dex = Arc::new(DexApp::new(source, store, config.page_size, events));
        return dexview::tui::run(dex, rx, runtime.handle().clone(), config.status_ttl());
    };

    let dex = DexApp::new(source, store, config.page_size, EventSender::disconnected());
    match command {
        CliCommand::Page { number, search } => {
            let view = runtime.block_on(async {
                if let Err(err) = dex.controller().fetch_total_count().await {
                    info!(error = %err, "catalog size unavailable");
                }
                if let Some(term) = &search {
                    dex.set_search_term(term).await?;
                }
                dex.go_to_page(number).await
            })?;
            let Some(view) = view.into_view() else {
                return Err("page request was superseded".into());
            };
            print!("{}", format_page(&view, |name| dex.is_favorite(name)));
        }
        CliCommand::Show { name } => match runtime.block_on(dex.show_detail(&name))? {
            Some(detail) => print!("{}", format_detail(&detail, dex.is_favorite(&detail.name))),
            None => return Err("no name given".into()),
        },
    }
    Ok(())
}

fn format_page(view: &PageView, is_favorite: impl Fn(&EntryName) -> bool) -> String {
    let mut out = String::new();
    let position = format!(
        "page {}/{}",
        view.pagination.current_page(),
        view.pagination.total_pages()
    );
    let _ = match (view.mode, view.term.as_deref()) {
        (ListingMode::Filtered, Some(term)) => {
            writeln!(out, "Search \"{term}\": {} matches, {position}", view.item_count)
        }
        _ => writeln!(out, "Catalog: {} entries, {position}", view.item_count),
    };
    for entry in &view.entries {
        let heart = if is_favorite(&entry.name) { '♥' } else { ' ' };
        let _ = writeln!(
            out,
            "{heart} #{:03} {:<16} {}",
            entry.id,
            entry.name.as_str(),
            entry.types_label()
        );
    }
    if view.entries.is_empty() {
        let _ = writeln!(out, "(no entries)");
    }
    out
}

fn format_detail(detail: &EntryDetail, favorite: bool) -> String {
    let mut out = String::new();
    let heart = if favorite { " ♥" } else { "" };
    let _ = writeln!(out, "#{:03} {}{heart}", detail.id, detail.name);
    let _ = writeln!(out, "Types:     {}", detail.types_label());
    let _ = writeln!(out, "Height:    {:.1} m", detail.height_metres());
    let _ = writeln!(out, "Weight:    {:.1} kg", detail.weight_kilograms());
    let _ = writeln!(out, "Abilities: {}", detail.abilities_label());
    if let Some(url) = &detail.artwork_url {
        let _ = writeln!(out, "Artwork:   {url}");
    }
    out
}
