use std::io;
use std::process::ExitCode;

use commandr::input::LineReader;
use commandr::{App, AppConfig, runtime};
use tokio::io::{AsyncWriteExt, Stdout};

const HELP: &str = "commands: /clear starts a new chat, /list shows chats, /quit exits";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("commandr: {error}");
            return ExitCode::FAILURE;
        }
    };

    let _logging = match config.logging().install() {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("commandr: {error}");
            return ExitCode::FAILURE;
        }
    };

    let app = match runtime::build_app(&config) {
        Ok(app) => app,
        Err(error) => {
            tracing::error!(event = "startup_failure", error = %error);
            eprintln!("commandr: {error}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        event = "startup",
        model = config.model.as_deref().unwrap_or("default"),
        history_policy = ?config.history_policy,
        temperature = config.default_temperature
    );

    let interrupt = {
        let app = app.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                app.shutdown();
            }
        })
    };

    let result = repl(&app).await;
    interrupt.abort();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(event = "io_failure", error = %error);
            ExitCode::FAILURE
        }
    }
}

async fn repl(app: &App) -> io::Result<()> {
    let mut lines = LineReader::stdin()?;
    let mut stdout = tokio::io::stdout();
    write_line(&mut stdout, HELP).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = app.cancellation().cancelled() => None,
        };
        let Some(line) = line else {
            break;
        };

        match line.trim() {
            "" => continue,
            "/quit" => break,
            "/clear" => {
                app.clear_chat();
                write_line(&mut stdout, "started a new chat").await?;
            }
            "/list" => {
                let current = app.current_conversation().map(|c| c.id());
                for summary in app.conversations() {
                    let marker = if Some(summary.id) == current { "*" } else { " " };
                    let entry = format!(
                        "{marker} {} ({} messages)",
                        summary.title, summary.message_count
                    );
                    write_line(&mut stdout, &entry).await?;
                }
            }
            text => match app.send_message_with_default_temperature(text).await {
                Ok(response) => write_line(&mut stdout, &response.content).await?,
                Err(error) => {
                    tracing::warn!(event = "send_failure", error_kind = ?error.kind, error = %error);
                    write_line(&mut stdout, &format!("error: {error}")).await?;
                    if app.is_shut_down() {
                        break;
                    }
                }
            },
        }
    }

    Ok(())
}

async fn write_line(stdout: &mut Stdout, text: &str) -> io::Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
