// SPDX-License-Identifier: MPL-2.0
use portal_front::app::{paths, App, Flags};
use portal_front::http::{RequestBody, SignerKind};
use portal_front::router::ScrollTarget;
use portal_front::session;
use reqwest::multipart::Form;
use reqwest::Method;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_DIRECTIVE: &str = "portal_front=info";

const HELP: &str = "\
portal_front

USAGE:
  portal_front [--lang <code>] [--config-dir <dir>] [--data-dir <dir>] <command>

COMMANDS:
  route <url>                                      resolve a URL through guard + router
  ago <timestamp-ms>                               print the relative-time phrase
  request <METHOD> <url> [--bearer|--file] [--data <json>]
  token set <access> <refresh> | token show | token clear
  info                                             directories, API wiring and recent diagnostics
";

const RECENT_DIAGNOSTICS: usize = 10;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> CliResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_DIRECTIVE));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    let Some(command) = args.subcommand()? else {
        print!("{}", HELP);
        return Ok(());
    };

    let mut app = App::new(flags)?;

    match command.as_str() {
        "route" => {
            let url: String = args.free_from_str()?;
            finish(args)?;
            route(&mut app, &url)
        }
        "ago" => {
            let timestamp_ms: i64 = args.free_from_str()?;
            finish(args)?;
            println!("{}", app.time_since(timestamp_ms));
            Ok(())
        }
        "request" => request(&app, args).await,
        "token" => token(&app, args),
        "info" => {
            finish(args)?;
            info(&app)
        }
        other => Err(format!("unknown command '{}'\n\n{}", other, HELP).into()),
    }
}

fn finish(args: pico_args::Arguments) -> CliResult<()> {
    let rest = args.finish();
    if rest.is_empty() {
        Ok(())
    } else {
        Err(format!("unexpected arguments: {:?}", rest).into())
    }
}

fn route(app: &mut App, url: &str) -> CliResult<()> {
    let route = app.navigate(url)?;
    println!("view:     {}", route.view.name());
    println!("title:    {}", app.i18n.tr(&route.view.title_key()));
    println!("locale:   {}", route.locale);
    println!("location: {}", route.location);
    match route.scroll {
        ScrollTarget::Anchor(selector) => println!("scroll:   {}", selector),
        ScrollTarget::Top => println!("scroll:   top"),
    }
    Ok(())
}

async fn request(app: &App, mut args: pico_args::Arguments) -> CliResult<()> {
    let bearer = args.contains("--bearer");
    let file = args.contains("--file");
    let data: Option<String> = args.opt_value_from_str("--data")?;
    let method: String = args.free_from_str()?;
    let url: String = args.free_from_str()?;
    finish(args)?;

    if bearer && file {
        return Err("--bearer and --file are mutually exclusive".into());
    }

    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
    let json = data
        .as_deref()
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()?;

    let (kind, body) = if file {
        (SignerKind::File, RequestBody::Multipart(form_from_json(json)))
    } else {
        let kind = if bearer {
            SignerKind::Bearer
        } else {
            SignerKind::Plain
        };
        (kind, json.map(RequestBody::Json).unwrap_or_default())
    };

    let response = app.signer().send(kind, method, &url, body).await?;
    let status = response.status();
    let text = response.text().await?;
    println!("{}", status);
    if app
        .diagnostics()
        .events()
        .iter()
        .any(|event| event.is_csrf_failure())
    {
        println!("csrf token was not sent");
    }
    if !text.is_empty() {
        println!("{}", text);
    }
    Ok(())
}

/// Top-level JSON object members become text fields.
fn form_from_json(json: Option<serde_json::Value>) -> Form {
    let Some(serde_json::Value::Object(map)) = json else {
        return Form::new();
    };
    map.into_iter().fold(Form::new(), |form, (name, value)| {
        let text = match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        form.text(name, text)
    })
}

fn token(app: &App, mut args: pico_args::Arguments) -> CliResult<()> {
    let action: String = args.free_from_str()?;
    match action.as_str() {
        "set" => {
            let access: String = args.free_from_str()?;
            let refresh: String = args.free_from_str()?;
            finish(args)?;
            session::set_token(app.storage(), &access, &refresh)?;
            println!("tokens stored");
        }
        "show" => {
            finish(args)?;
            let tokens = session::get_token(app.storage());
            println!(
                "access:  {}",
                tokens.access_token.as_deref().unwrap_or("(none)")
            );
            println!(
                "refresh: {}",
                tokens.refresh_token.as_deref().unwrap_or("(none)")
            );
        }
        "clear" => {
            finish(args)?;
            session::clear_token(app.storage())?;
            println!("tokens cleared");
        }
        other => return Err(format!("unknown token action '{}'", other).into()),
    }
    Ok(())
}

fn info(app: &App) -> CliResult<()> {
    let dir = |path: Option<std::path::PathBuf>| {
        path.map_or_else(|| "(unavailable)".to_string(), |p| p.display().to_string())
    };
    println!("data dir:    {}", dir(paths::get_app_data_dir()));
    println!("config dir:  {}", dir(paths::get_app_config_dir()));
    println!("locale:      {}", app.i18n.current_locale());
    println!("base path:   {}", app.router().base_path());
    println!("api:         {}", app.signer().base_url());
    println!("csrf policy: {:?}", app.signer().csrf_policy());

    let diagnostics = app.diagnostics();
    println!(
        "diagnostics: {} buffered, {} evicted",
        diagnostics.len(),
        diagnostics.evicted()
    );
    for event in diagnostics.recent(RECENT_DIAGNOSTICS) {
        println!("  {}", serde_json::to_string(&event)?);
    }
    Ok(())
}
