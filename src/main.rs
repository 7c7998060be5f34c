// ==========================================
// 艺术品顾问系统 - 命令行主入口
// ==========================================
// 子命令: import / export / fact-sheet / stats / config
// ==========================================

use std::path::{Path, PathBuf};

use anyhow::Context;
use art_advisory::api::{ApiError, ExportFormat, ExportQuery};
use art_advisory::app::{get_default_db_path, AppState};
use art_advisory::export::format_money;
use art_advisory::i18n::{apply_locale, t, t_with_args};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "art-advisory", version, about = "Art advisory inventory: bulk import and exports")]
struct Cli {
    /// SQLite database file (defaults to the user data directory).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import artworks from a CSV/XLSX sheet, with an optional ZIP of images.
    Import {
        #[arg(long)]
        sheet: Option<PathBuf>,

        #[arg(long)]
        images: Option<PathBuf>,

        /// Directory for bulk_errors.csv when rows fail.
        #[arg(long, default_value = ".")]
        report_dir: PathBuf,
    },

    /// Export the inventory as XLSX, CSV, or a ZIP of fact sheets.
    Export {
        #[arg(value_enum)]
        format: FormatArg,

        /// Only artworks belonging to this client id.
        #[arg(long)]
        client: Option<String>,

        /// Case-insensitive match on title or artist.
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        out: PathBuf,
    },

    /// Render one artwork's fact sheet PDF.
    FactSheet {
        #[arg(long)]
        artwork: String,

        #[arg(long)]
        out: PathBuf,
    },

    /// Print dashboard statistics and per-client collection totals.
    Stats {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Configuration values stored in the database.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Set { key: String, value: String },
    List,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Xlsx,
    Csv,
    Zip,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Zip => ExportFormat::Zip,
        }
    }
}

fn print_written(path: &Path) {
    println!("{}", t_with_args("export.written", &[("path", &path.display().to_string())]));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    art_advisory::logging::init();

    let cli = Cli::parse();
    let db_path = cli
        .db
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(get_default_db_path);
    tracing::info!(version = art_advisory::VERSION, db = %db_path, "启动");

    let state = AppState::new(db_path).context("failed to open database")?;
    apply_locale(&state.config.locale()?);

    match cli.command {
        Command::Import {
            sheet,
            images,
            report_dir,
        } => {
            if let Some(path) = sheet.as_deref().filter(|p| !p.exists()) {
                anyhow::bail!(t_with_args(
                    "import.file_not_found",
                    &[("path", &path.display().to_string())]
                ));
            }
            let response = state
                .import_api
                .import_artworks(sheet.as_deref(), images.as_deref())
                .await?;
            let outcome = &response.outcome;
            println!(
                "{}",
                t_with_args(
                    "import.summary",
                    &[
                        ("created", &outcome.created.to_string()),
                        ("failed", &outcome.errors.len().to_string()),
                    ],
                )
            );
            for err in &outcome.errors {
                eprintln!("row {}: {}", err.row, err.error);
            }
            if let Some(report) = &response.error_report {
                let path = report.write_to_dir(&report_dir)?;
                println!(
                    "{}",
                    t_with_args("import.error_report_written", &[("path", &path.display().to_string())])
                );
            }
        }

        Command::Export {
            format,
            client,
            search,
            out,
        } => {
            let query = ExportQuery {
                client_id: client,
                search,
            };
            let today = chrono::Local::now().date_naive();
            match state.export_api.export(format.into(), &query, today).await? {
                Some(file) => print_written(&file.write_to_dir(&out)?),
                None => println!("{}", t("export.nothing")),
            }
        }

        Command::FactSheet { artwork, out } => {
            let file = match state.export_api.fact_sheet(&artwork).await {
                Ok(file) => file,
                Err(ApiError::NotFound(_)) => {
                    anyhow::bail!(t_with_args("export.artwork_not_found", &[("id", &artwork)]))
                }
                Err(e) => return Err(e.into()),
            };
            print_written(&file.write_to_dir(&out)?);
        }

        Command::Stats { json } => {
            let stats = state.dashboard_api.get_stats().await?;
            if json {
                let collections = state.dashboard_api.list_collections().await?;
                let payload = serde_json::json!({
                    "stats": stats,
                    "collections": collections,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(());
            }

            println!("{}: {}", t("stats.total_artworks"), stats.total_artworks);
            println!("{}: {}", t("stats.collections"), stats.collections);
            println!("{}: {}", t("stats.active_clients"), stats.active_clients);

            for summary in state.dashboard_api.list_collections().await? {
                println!(
                    "{}",
                    t_with_args(
                        "stats.collection_line",
                        &[
                            ("name", &summary.client_name),
                            ("count", &summary.artwork_count.to_string()),
                            ("appraisal", &format_money(summary.total_appraisal_value)),
                            ("insurance", &format_money(summary.total_insurance_value)),
                        ],
                    )
                );
            }
        }

        Command::Config { action } => match action {
            ConfigAction::Set { key, value } => {
                state.config.set_value(&key, &value)?;
                println!(
                    "{}: {}",
                    t("common.success"),
                    t_with_args("config.updated", &[("key", &key), ("value", &value)])
                );
            }
            ConfigAction::List => {
                for (key, value) in state.config.list_values()? {
                    println!("{} = {}", key, value);
                }
            }
        },
    }

    Ok(())
}
