//! Builds the application in the fixed registration order and drives it from the CLI.
//!
//! The REPL is the host event loop: each stdin line is one navigation event, resolved synchronously.

use anyhow::{Context, Result};
use std::sync::Arc;
use tma_core::{init_console_tracing, init_tracing, Rendered, Store};
use tma_picker::PickerWidget;
use tma_router::{RouteParams, Router};
use tma_telegram::{
    start_keyboard, web_app_url, EventSink, InlineKeyboardMarkup, LogSink, TelegramWebApp,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info, instrument};

use crate::bootstrap::{Application, Bootstrap, Capability};
use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::document::{HostDocument, InMemoryDocument};
use crate::routes::{route_table, BIRTHDATE_VIEW, PROFILE_VIEW, USER_ID_PARAM};

/// Registers platform, picker, store and router, then mounts onto `document`.
#[instrument(skip(config, document, sink), fields(base_url = %config.base_url))]
pub fn build_application(
    config: &AppConfig,
    document: Arc<dyn HostDocument>,
    sink: Arc<dyn EventSink>,
) -> tma_core::Result<Application> {
    let mut bootstrap = Bootstrap::new(&config.mount_selector);
    bootstrap.register(Capability::Platform(Arc::new(TelegramWebApp::new(
        config.telegram.launch_params.clone(),
        sink,
    ))))?;
    bootstrap.register(Capability::Picker(Arc::new(PickerWidget::new())))?;
    bootstrap.register(Capability::Store(Arc::new(Store::new())))?;
    bootstrap.register_with(|| {
        Ok(Capability::Router(Router::new(route_table()?, &config.base_url)))
    })?;
    bootstrap.mount(document)
}

/// One REPL input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Navigate(String),
    Back,
    Forward,
    Submit { day: u32, month: u32, year: i32 },
    Quit,
}

/// Parses a REPL line; blank lines are `Ok(None)`.
pub fn parse_repl_line(line: &str) -> std::result::Result<Option<ReplCommand>, String> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let command = match words.next() {
        None => return Ok(None),
        Some("back") => ReplCommand::Back,
        Some("forward") => ReplCommand::Forward,
        Some("quit") | Some("exit") => ReplCommand::Quit,
        Some("submit") => {
            let numbers: Vec<&str> = words.collect();
            let [day, month, year] = numbers.as_slice() else {
                return Err("usage: submit DAY MONTH YEAR".to_string());
            };
            let bad = |what: &str| format!("submit: {} is not a number", what);
            ReplCommand::Submit {
                day: day.parse().map_err(|_| bad(day))?,
                month: month.parse().map_err(|_| bad(month))?,
                year: year.parse().map_err(|_| bad(year))?,
            }
        }
        Some(_) => ReplCommand::Navigate(line.to_string()),
    };
    Ok(Some(command))
}

fn describe(rendered: &Rendered) -> String {
    format!("[{}] {}", rendered.view, rendered.markup)
}

/// Reads commands from `reader` until EOF or `quit`; writes each outcome to `writer`.
/// Returns the number of commands that rendered a view.
pub async fn run_repl<R, W>(app: &mut Application, reader: R, mut writer: W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut rendered_count = 0;

    while let Some(line) = lines.next_line().await? {
        let command = match parse_repl_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writer.write_all(format!("error: {}\n", message).as_bytes()).await?;
                continue;
            }
        };
        info!(command = ?command, "step: repl command");

        let outcome = match command {
            ReplCommand::Quit => break,
            ReplCommand::Navigate(location) => app.navigate(&location).map(|r| Some(describe(r))),
            ReplCommand::Back => app.back().map(|r| r.map(describe)),
            ReplCommand::Forward => app.forward().map(|r| r.map(describe)),
            ReplCommand::Submit { day, month, year } => {
                app.submit_birthdate(day, month, year).map(|r| Some(describe(r)))
            }
        };

        let output = match outcome {
            Ok(Some(text)) => {
                rendered_count += 1;
                text
            }
            Ok(None) => "no history entry".to_string(),
            Err(e) => {
                error!(error = %e, "repl command failed");
                format!("error: {}", e)
            }
        };
        writer.write_all(output.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(rendered_count)
}

fn load_config(base_url: Option<String>, init_data: Option<String>) -> Result<AppConfig> {
    let mut config = AppConfig::load(base_url)?;
    if let Some(raw) = init_data {
        config.telegram = config.telegram.with_init_data(&raw)?;
    }
    Ok(config)
}

/// Mounts a headless document at `location` and returns the rendered view.
pub fn render_location(config: &AppConfig, location: &str) -> Result<Rendered> {
    let document = Arc::new(InMemoryDocument::with_anchor(location));
    let app = build_application(config, document, Arc::new(LogSink))?;
    app.rendered()
        .cloned()
        .context("application mounted without rendering a view")
}

/// One line per route: name, pattern, whether params are forwarded.
pub fn route_listing() -> Result<Vec<String>> {
    let table = route_table()?;
    Ok(table
        .iter()
        .map(|route| {
            format!(
                "{}\t{}\tprops={}",
                route.name, route.pattern, route.props_from_params
            )
        })
        .collect())
}

/// The bot's start keyboard: app root, plus `profile`'s page when given. Links carry the base URL.
pub fn launch_keyboard(config: &AppConfig, profile: Option<String>) -> Result<InlineKeyboardMarkup> {
    let webapp_url = config
        .telegram
        .webapp_url
        .as_ref()
        .context("WEBAPP_URL (or NGROK_URL) is not set")?;
    let router = Router::new(route_table()?, &config.base_url);

    let root = web_app_url(webapp_url, &router.href(BIRTHDATE_VIEW, &RouteParams::new())?);
    let profile_link = match profile {
        Some(user_id) => {
            let mut params = RouteParams::new();
            params.insert(USER_ID_PARAM.to_string(), user_id);
            Some(web_app_url(webapp_url, &router.href(PROFILE_VIEW, &params)?))
        }
        None => None,
    };
    Ok(start_keyboard(&root, profile_link))
}

/// CLI entry: dispatches subcommands.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render {
            location,
            base_url,
            init_data,
        } => {
            init_console_tracing()?;
            let config = load_config(base_url, init_data)?;
            let rendered = render_location(&config, &location)?;
            println!("{}", rendered.markup);
            Ok(())
        }
        Commands::Repl {
            base_url,
            init_data,
        } => {
            let config = load_config(base_url, init_data)?;
            init_tracing(&config.log_file)?;
            let document = Arc::new(InMemoryDocument::with_anchor(&config.base_url));
            let mut app = build_application(&config, document, Arc::new(LogSink))?;
            if let Some(rendered) = app.rendered() {
                println!("{}", describe(rendered));
            }
            let count = run_repl(&mut app, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
            info!(rendered = count, "step: repl finished");
            app.teardown();
            Ok(())
        }
        Commands::Routes => {
            for line in route_listing()? {
                println!("{}", line);
            }
            Ok(())
        }
        Commands::Keyboard { profile, base_url } => {
            init_console_tracing()?;
            let config = AppConfig::load(base_url)?;
            let keyboard = launch_keyboard(&config, profile)?;
            println!("{}", serde_json::to_string_pretty(&keyboard)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        for key in ["BASE_URL", "MOUNT_SELECTOR", "LOG_FILE", "WEBAPP_URL", "NGROK_URL", "TG_LAUNCH_PARAMS", "TG_INIT_DATA"] {
            env::remove_var(key);
        }
    }

    /// Web-app URLs of the keyboard buttons, top row first.
    fn button_urls(keyboard: &InlineKeyboardMarkup) -> Vec<String> {
        let json = serde_json::to_value(keyboard).unwrap();
        json["inline_keyboard"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row[0]["web_app"]["url"].as_str().unwrap().to_string())
            .collect()
    }

    /// **Test: Keyboard links carry the base URL; the profile row comes first.**
    ///
    /// **Setup:** BASE_URL=/tma/, WEBAPP_URL=https://host.example/.
    /// **Action:** `launch_keyboard(&config, Some("7"))`.
    /// **Expected:** `https://host.example/tma/profile/7`, then `https://host.example/tma/`.
    #[test]
    #[serial]
    fn test_launch_keyboard_under_base_url() {
        clear_env();
        env::set_var("BASE_URL", "/tma/");
        env::set_var("WEBAPP_URL", "https://host.example/");
        let config = AppConfig::load(None).unwrap();

        let keyboard = launch_keyboard(&config, Some("7".to_string())).unwrap();
        assert_eq!(
            button_urls(&keyboard),
            vec!["https://host.example/tma/profile/7", "https://host.example/tma/"]
        );

        let keyboard = launch_keyboard(&config, None).unwrap();
        assert_eq!(button_urls(&keyboard), vec!["https://host.example/tma/"]);
        clear_env();
    }

    /// **Test: Without WEBAPP_URL (or NGROK_URL) the keyboard cannot be built.**
    #[test]
    #[serial]
    fn test_launch_keyboard_requires_webapp_url() {
        clear_env();
        let config = AppConfig::load(None).unwrap();
        let err = launch_keyboard(&config, Some("7".to_string())).unwrap_err();
        assert!(err.to_string().contains("WEBAPP_URL"), "{}", err);

        env::set_var("NGROK_URL", "https://abc.ngrok.app");
        let config = AppConfig::load(None).unwrap();
        assert_eq!(
            button_urls(&launch_keyboard(&config, None).unwrap()),
            vec!["https://abc.ngrok.app/"]
        );
        clear_env();
    }

    #[test]
    fn test_route_listing() {
        assert_eq!(
            route_listing().unwrap(),
            vec![
                "BirthdateView\t/\tprops=false".to_string(),
                "ProfileView\t/profile/:user_id\tprops=true".to_string(),
            ]
        );
    }
}
