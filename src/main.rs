use book_csv_editor::{cli, config, editor, error, io, logging, table, workflow};
use clap::Parser;
use cli::{Cli, Commands};
use book_csv_common::Filter;
use config::Config;
use error::Result;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::View { input, search, genre, year, sort, desc, page, page_size, json } => {
            let options = workflow::ViewOptions {
                search,
                genre: Filter::from(genre.as_str()),
                year: Filter::from(year.as_str()),
                sort,
                desc,
                page,
                page_size,
            };
            let (session, _) = workflow::open(&input, &config)?;
            let session = workflow::apply_view_options(session, &options, &config);
            let view = session.view();

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", table::render_page(&view));
                println!("{}", table::render_summary(&view, &session.stats()));
            }
        }

        Commands::Facets { input } => {
            let (session, _) = workflow::open(&input, &config)?;
            println!("{}", editor::render_facets(&session));
        }

        Commands::Set { input, edits, output } => {
            println!("✏️  book-csv - 一括編集\n");

            let (mut session, warnings) = workflow::open(&input, &config)?;
            println!("✔ {}件を読み込み（警告 {}件）", session.stats().total, warnings.len());

            let applied = workflow::apply_edits(&mut session, &edits)?;
            println!("✔ {}件の編集を適用（変更あり {}件）", applied, session.stats().modified);

            let output = output.unwrap_or_else(|| io::default_export_path(&config.output_dir(), &io::today_iso()));
            workflow::export(&session, &output)?;
            println!("✔ 書き出し: {}", output.display());
        }

        Commands::Edit { input, output } => {
            let (mut session, warnings) = workflow::open(&input, &config)?;
            for warning in &warnings {
                println!("  ⚠ {}", warning);
            }
            let output = output.unwrap_or_else(|| io::default_export_path(&config.output_dir(), &io::today_iso()));
            editor::run_interactive_editor(&mut session, &input, &output)?;
        }

        Commands::Config { set_page_size, show } => {
            let mut config = config;

            if let Some(page_size) = set_page_size {
                config.set_page_size(page_size)?;
                println!("✔ ページサイズを設定しました: {}", page_size);
            }

            if show || set_page_size.is_none() {
                println!("設定:");
                println!("  ページサイズ: {}", config.page_size);
                println!("  ソート: {} {:?}", config.sort_field, config.sort_direction);
                println!("  出力先: {}", config.output_dir().display());
            }
        }
    }

    Ok(())
}
