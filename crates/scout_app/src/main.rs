use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use scout_app::config::AppConfig;
use scout_app::{
    initialize_logging, parse_command, read_line, render_status, render_table,
    serve_terminal_editor, Command, ContactEditor, EffectRunner, Osc52Clipboard,
    ScrapeOrchestrator, SessionStore, TerminalSurface, HELP,
};
use scout_core::Msg;
use scout_engine::HttpBackend;
use scout_logging::scout_info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();
    initialize_logging(config.log, config.verbose);
    scout_info!("Starting scout against {}", config.backend_url);

    let backend = HttpBackend::new(config.backend_settings())
        .with_context(|| format!("invalid backend url {:?}", config.backend_url))?;
    let (editor, edit_requests) = ContactEditor::channel(1);
    tokio::spawn(serve_terminal_editor(edit_requests));

    let runner = EffectRunner::new(
        Arc::new(backend),
        Arc::new(config.request_delay()),
        SessionStore::new(&config.data_dir),
        editor,
        Box::new(Osc52Clipboard),
    );
    let mut orchestrator = ScrapeOrchestrator::new(runner, Box::new(TerminalSurface::new()));
    orchestrator.start().await;
    if let Some(url) = &config.source_url {
        orchestrator.dispatch(Msg::SourceUrlChanged(url.clone())).await;
    }

    println!("{}", render_status(&orchestrator.view()));
    println!("Type `help` for commands.");

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout()).context("flush stdout")?;
        let Some(line) = read_line().await.context("read command")? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let view = orchestrator.view();
        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::List => {
                println!("{}", render_status(&view));
                for line in render_table(&view) {
                    println!("{line}");
                }
            }
            Command::Link(idx) => match view.row(idx) {
                Some(row) => println!("{}", row.quick_contact_link),
                None => println!("no row {idx}"),
            },
            other => match other.to_msg(&view) {
                Ok(msg) => orchestrator.dispatch(msg).await,
                Err(err) => println!("{err}"),
            },
        }
    }

    scout_info!("Exiting");
    Ok(())
}
