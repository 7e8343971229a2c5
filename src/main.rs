use emojimix::{
    logger::{self, LoggerConfig},
    presentation, AppConfig, DisplayState, GeminiImageClient, GenerationController, Locale,
    Settings, Theme,
};
use futures::StreamExt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::{LinesStream, WatchStream};

enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env();
    logger::log_config_info(&config);
    config.check();

    let client = GeminiImageClient::new(config.gemini.clone());
    let mut controller = GenerationController::new(Arc::new(client));
    if let Some(tick) = config.tick_interval {
        controller = controller.with_tick_interval(tick);
    }
    log::info!("🎨 Image generator: {}", controller.generator_name());

    let mut settings = config.settings;
    println!("{}\n", presentation::render_header(&settings));
    println!("{}", presentation::render_state(&DisplayState::Idle, &settings));

    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    let mut states = WatchStream::from_changes(controller.subscribe());
    let mut shown_loading = false;
    let mut input_closed = false;

    loop {
        tokio::select! {
            line = lines.next() => match line {
                Some(Ok(line)) => {
                    if let Flow::Quit = handle_input(&line, &controller, &mut settings) {
                        break;
                    }
                }
                Some(Err(e)) => {
                    log::error!("❌ Failed to read input: {}", e);
                    break;
                }
                None => {
                    input_closed = true;
                    break;
                }
            },
            Some(state) = states.next() => {
                shown_loading = state.is_loading();
                render(&state, &settings, &config.output_dir);
            }
        }
    }

    // Piped input: finish the last generation before exiting. `:quit` does not wait.
    if input_closed && (shown_loading || controller.is_loading()) {
        log::info!("⏳ Input closed, waiting for the current generation");
        while let Some(state) = states.next().await {
            render(&state, &settings, &config.output_dir);
            if !state.is_loading() {
                break;
            }
        }
    }

    controller.shutdown();
    log::info!("👋 Bye");
    Ok(())
}

fn handle_input(line: &str, controller: &GenerationController, settings: &mut Settings) -> Flow {
    let line = line.trim();
    let mut words = line.split_whitespace();

    match words.next() {
        Some(":quit") | Some(":q") => return Flow::Quit,
        Some(":settings") => println!("{}", presentation::render_settings(settings)),
        Some(":lang") => match words.next().map(str::parse::<Locale>) {
            Some(Ok(locale)) => {
                *settings = settings.with_locale(locale);
                println!("{}", presentation::render_settings(settings));
            }
            Some(Err(e)) => log::warn!("⚠️  {}", e),
            None => log::warn!("⚠️  usage: :lang pt|en"),
        },
        Some(":theme") => match words.next().map(str::parse::<Theme>) {
            Some(Ok(theme)) => {
                *settings = settings.with_theme(theme);
                println!("{}", presentation::render_settings(settings));
            }
            Some(Err(e)) => log::warn!("⚠️  {}", e),
            None => log::warn!("⚠️  usage: :theme light|dark"),
        },
        _ => {
            if controller.trigger(line).is_none() && controller.is_loading() {
                log::debug!("Input ignored while generating");
            }
        }
    }

    Flow::Continue
}

fn render(state: &DisplayState, settings: &Settings, output_dir: &Path) {
    let line = presentation::render_state(state, settings);
    let t = settings.translations();

    match state {
        DisplayState::Loading { .. } => {
            print!("\r{}", line);
            let _ = std::io::stdout().flush();
        }
        DisplayState::Result { image, prompt } => {
            println!("\n{}", line);
            match image.save(output_dir, prompt) {
                Ok(path) => println!("{}: {}", t.download_image, path.display()),
                Err(e) => log::error!("❌ Failed to save image: {}", e),
            }
        }
        DisplayState::Error(_) | DisplayState::Idle => println!("\n{}", line),
    }
}
