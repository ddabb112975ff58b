use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use dirtree::config::TreeConfig;
use dirtree::services::fs::LocalFsBackend;
use dirtree::services::tracing_setup;
use dirtree::view::file_tree::{
    DirectoryTreeModel, FileTreeEvent, FileTreeView, NodeId, SortColumn, SortOrder,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Browse a directory as a lazily expanded, filtered and sorted tree
#[derive(Parser, Debug)]
#[command(name = "dirtree")]
#[command(about = "Print a filtered, sorted directory tree", long_about = None)]
#[command(version)]
struct Args {
    /// Directory to open
    #[arg(value_name = "PATH", default_value = ".")]
    path: PathBuf,

    /// Glob applied to file names (directories always stay visible)
    #[arg(long, value_name = "GLOB")]
    filter: Option<String>,

    /// Column to sort by
    #[arg(long, value_enum)]
    sort: Option<SortColumn>,

    /// Sort in descending order
    #[arg(long)]
    descending: bool,

    /// Expand folders this many levels below the top level
    #[arg(long, value_name = "N", default_value_t = 0)]
    expand_depth: usize,

    /// Activate the entry at this path, relative to the opened directory
    #[arg(long, value_name = "NAME")]
    activate: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn load_config(args: &Args) -> AnyhowResult<TreeConfig> {
    let mut config = match &args.config {
        Some(path) => TreeConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => match TreeConfig::default_config_path() {
            Some(path) => TreeConfig::load_or_default(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => TreeConfig::default(),
        },
    };

    if let Some(filter) = &args.filter {
        config.filter = filter.clone();
    }
    if let Some(column) = args.sort {
        config.sort_column = column;
    }
    if args.descending {
        config.sort_order = SortOrder::Descending;
    }
    Ok(config)
}

fn build_view(root: &Path, config: &TreeConfig) -> FileTreeView {
    let mut tree = DirectoryTreeModel::new(root, Arc::new(LocalFsBackend::new()));
    tree.set_filter(&config.filter);
    if config.sorting_enabled {
        tree.sort_items(config.sort_column, config.sort_order);
    } else {
        tree.set_sorting_enabled(false);
        tree.sort_items(config.sort_column, config.sort_order);
        // Re-list so the top level keeps the order the filesystem returned
        tree.open_path(root);
    }
    FileTreeView::new(tree, config.name_column_width)
}

/// Walk `name` component by component, expanding folders on the way
fn find_by_name(view: &mut FileTreeView, name: &str) -> Option<NodeId> {
    let mut current: Option<NodeId> = None;
    for component in Path::new(name).iter() {
        let component = component.to_str()?;
        if let Some(parent) = current {
            view.expand(parent);
        }
        current = Some(view.tree().find_child(current, component)?);
    }
    current
}

fn describe(event: &FileTreeEvent) -> String {
    let kind = match event {
        FileTreeEvent::FileClicked(_) => "file clicked",
        FileTreeEvent::FolderClicked(_) => "folder clicked",
        FileTreeEvent::FileDoubleClicked(_) => "file double-clicked",
        FileTreeEvent::FolderDoubleClicked(_) => "folder double-clicked",
        FileTreeEvent::FileActivated(_) => "file activated",
        FileTreeEvent::FolderActivated(_) => "folder activated",
    };
    format!("{}: {}", kind, event.target().path.display())
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    if args.dump_config {
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{}", json);
        return Ok(());
    }

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("dirtree.log"));
    if let Err(e) = tracing_setup::init_global(&log_file) {
        eprintln!("Warning: logging disabled, cannot open {}: {}", log_file.display(), e);
    }
    tracing::info!("Opening {:?} with {:?}", args.path, config);

    if !args.path.exists() {
        anyhow::bail!("{} does not exist", args.path.display());
    }

    let mut view = build_view(&args.path, &config);
    view.expand_to_depth(args.expand_depth);
    for column in 1..4 {
        view.resize_column_to_contents(column);
    }

    for line in view.render_lines() {
        println!("{}", line);
    }

    if let Some(name) = &args.activate {
        let id = find_by_name(&mut view, name)
            .with_context(|| format!("No entry named {:?} under {}", name, args.path.display()))?;
        view.set_selected(Some(id));
        match view.activate_selected() {
            Some(event) => println!("{}", describe(&event)),
            None => anyhow::bail!("{:?} vanished before it could be activated", name),
        }
    }

    Ok(())
}
