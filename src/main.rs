// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::time::Duration;
use toast_store::config::{self, Config};
use toast_store::error::{Error, Result};
use toast_store::notifications::{Manager, State, ToastPayload, Variant};

const HELP: &str = "\
toast_store - drive the toast store from the command line

USAGE:
  toast_store [OPTIONS]

OPTIONS:
  --title TEXT        Toast title [default: Message sent]
  --description TEXT  Toast description
  --destructive       Use the destructive variant
  --count N           Number of toasts to enqueue [default: 1]
  --limit N           Override the toast limit
  --delay-ms MS       Override the remove delay
  --config PATH       Read settings from PATH instead of the user config
  -h, --help          Print help
";

struct Args {
    title: String,
    description: Option<String>,
    destructive: bool,
    count: usize,
    limit: Option<usize>,
    delay_ms: Option<u64>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }

    let cli_err = |e: pico_args::Error| Error::Cli(e.to_string());
    let parsed = Args {
        title: args
            .opt_value_from_str("--title")
            .map_err(cli_err)?
            .unwrap_or_else(|| "Message sent".to_string()),
        description: args.opt_value_from_str("--description").map_err(cli_err)?,
        destructive: args.contains("--destructive"),
        count: args
            .opt_value_from_str("--count")
            .map_err(cli_err)?
            .unwrap_or(1),
        limit: args.opt_value_from_str("--limit").map_err(cli_err)?,
        delay_ms: args.opt_value_from_str("--delay-ms").map_err(cli_err)?,
        config: args.opt_value_from_os_str("--config", |s| {
            Ok::<_, std::convert::Infallible>(PathBuf::from(s))
        })
        .map_err(cli_err)?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(Error::Cli(format!("unexpected arguments: {:?}", rest)));
    }
    Ok(Some(parsed))
}

fn print_state(state: &State) {
    if state.is_empty() {
        println!("[store] empty");
        return;
    }
    for toast in &state.toasts {
        println!(
            "[store] #{} {:<6} {}{}",
            toast.id(),
            if toast.is_open() { "open" } else { "closed" },
            toast.title().unwrap_or(""),
            toast
                .description()
                .map(|d| format!(" - {}", d))
                .unwrap_or_default()
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let mut settings: Config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if args.limit.is_some() {
        settings.toast_limit = args.limit;
    }
    if args.delay_ms.is_some() {
        settings.remove_delay_ms = args.delay_ms;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async move {
        let manager = Manager::new(&settings);
        log::info!(
            "toast limit {}, remove delay {:?}",
            manager.limit().value(),
            manager.remove_delay().as_duration()
        );
        let subscription = manager.subscribe(print_state);

        let variant = if args.destructive {
            Variant::Destructive
        } else {
            Variant::Default
        };
        for n in 1..=args.count {
            let title = if args.count > 1 {
                format!("{} ({})", args.title, n)
            } else {
                args.title.clone()
            };
            let mut payload = ToastPayload::titled(title).variant(variant);
            if let Some(description) = &args.description {
                payload = payload.description(description.clone());
            }
            manager.enqueue(payload);
        }

        manager.dismiss(None);
        tokio::time::sleep(manager.remove_delay().as_duration() + Duration::from_millis(50)).await;

        subscription.unsubscribe();
        println!("final: {} toast(s)", manager.state().len());
    });

    Ok(())
}
