mod api;
mod app;
mod config;
mod event_loop;
mod input;
mod request;
mod terminal;
mod video_config;

use api::GeneratorClient;
use app::App;
use clap::{Parser, Subcommand};
use request::{RequestController, RequestState};
use video_config::{AnimationType, MusicStyle, VideoConfig, MAX_DURATION_SECS, MIN_DURATION_SECS};

/// Parse and validate an animation type name
fn parse_animation(s: &str) -> Result<AnimationType, String> {
    AnimationType::from_str(s).ok_or_else(|| {
        format!(
            "Unknown animation type '{}'. Available types: surprise, fractal, game, dataviz, art, simulation",
            s
        )
    })
}

/// Parse and validate a clip duration in seconds (15-60)
fn parse_duration(s: &str) -> Result<u32, String> {
    let secs: u32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&secs) {
        return Err(format!(
            "Duration must be between {} and {} seconds, got {}",
            MIN_DURATION_SECS, MAX_DURATION_SECS, secs
        ));
    }
    Ok(secs)
}

/// Parse and validate a music style name
fn parse_music(s: &str) -> Result<MusicStyle, String> {
    MusicStyle::from_str(s).ok_or_else(|| {
        format!(
            "Unknown music style '{}'. Available styles: electro, lofi, epic, chill",
            s
        )
    })
}

/// vidgen: Terminal client for AI video generation
#[derive(Parser)]
#[command(name = "vidgen")]
#[command(version, about = "Terminal client for AI video generation")]
#[command(long_about = "Submit video generation requests to a vidgen server and follow them \
    from the terminal. Pick an animation type, clip duration, and music style, \
    then generate and download the finished clip.")]
#[command(after_help = "EXAMPLES:
    # Open the interactive TUI with default settings
    vidgen start

    # TUI preloaded with a 45 second fractal clip and lofi music
    vidgen start --animation fractal --duration 45 --music lofi

    # One-shot generation without the TUI
    vidgen generate -a game -d 20 -m epic

    # Generate against a different server
    vidgen generate --server http://gpu-box:8000

    # Check that the server is reachable
    vidgen health

For more information, see: https://github.com/username/vidgen")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure and submit generation requests from a terminal UI
    #[command(after_help = "EXAMPLES:
    vidgen start                         # Defaults: surprise, 30s, electro
    vidgen start -a fractal -d 45 -m lofi
    vidgen start --server http://gpu-box:8000

KEYS (while running):
    Tab/Down/j     Focus next field
    Up/k           Focus previous field
    Left/Right     Adjust the focused field
    Enter          Submit the generation request
    q or Ctrl+C    Quit")]
    Start {
        /// Animation type (surprise, fractal, game, dataviz, art, simulation)
        #[arg(long, short = 'a', value_parser = parse_animation)]
        animation: Option<AnimationType>,

        /// Clip duration in seconds (15-60)
        #[arg(long, short = 'd', value_parser = parse_duration)]
        duration: Option<u32>,

        /// Music style (electro, lofi, epic, chill)
        #[arg(long, short = 'm', value_parser = parse_music)]
        music: Option<MusicStyle>,

        /// Server base URL (overrides VIDGEN_SERVER_URL and the config file)
        #[arg(long, short = 's')]
        server: Option<String>,

        /// Path to a config file (default: platform config directory)
        #[arg(long, short = 'c')]
        config: Option<std::path::PathBuf>,
    },

    /// Generate a single video without the TUI and download it
    #[command(after_help = "EXAMPLES:
    vidgen generate                      # Defaults: surprise, 30s, electro
    vidgen generate -a game -d 20 -m epic
    vidgen generate --output clips       # Save the video under clips/
    vidgen generate --no-download        # Print the video URL, skip the download

ENVIRONMENT:
    VIDGEN_SERVER_URL    Server base URL (default: http://localhost:8000)")]
    Generate {
        /// Animation type (surprise, fractal, game, dataviz, art, simulation)
        #[arg(long, short = 'a', value_parser = parse_animation)]
        animation: Option<AnimationType>,

        /// Clip duration in seconds (15-60)
        #[arg(long, short = 'd', value_parser = parse_duration)]
        duration: Option<u32>,

        /// Music style (electro, lofi, epic, chill)
        #[arg(long, short = 'm', value_parser = parse_music)]
        music: Option<MusicStyle>,

        /// Server base URL (overrides VIDGEN_SERVER_URL and the config file)
        #[arg(long, short = 's')]
        server: Option<String>,

        /// Path to a config file (default: platform config directory)
        #[arg(long, short = 'c')]
        config: Option<std::path::PathBuf>,

        /// Directory to save the downloaded video into (default: current directory)
        #[arg(long, short = 'o')]
        output: Option<std::path::PathBuf>,

        /// Skip downloading the finished video
        #[arg(long, conflicts_with = "output")]
        no_download: bool,
    },

    /// Check that the generation server is reachable
    Health {
        /// Server base URL (overrides VIDGEN_SERVER_URL and the config file)
        #[arg(long, short = 's')]
        server: Option<String>,

        /// Path to a config file (default: platform config directory)
        #[arg(long, short = 'c')]
        config: Option<std::path::PathBuf>,
    },
}

/// Format bytes as human-readable string (KB, MB, GB)
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Load the config file
///
/// An explicit --config path must point at a readable file; the default
/// location may be missing or broken, in which case defaults apply.
fn load_config(path: Option<&std::path::Path>) -> config::Config {
    if path.is_some() {
        match config::Config::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match config::Config::load(None) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                eprintln!("Using default settings.\n");
                config::Config::default()
            }
        }
    }
}

/// Resolve the server base URL: CLI flag > environment > config file > default
fn resolve_server_url(cli_server: Option<String>, cfg: &config::Config) -> String {
    cli_server
        .or_else(|| std::env::var(api::SERVER_URL_ENV).ok())
        .or_else(|| cfg.server.url.clone())
        .unwrap_or_else(|| api::DEFAULT_SERVER_URL.to_string())
}

/// Run the interactive terminal UI
fn run_start(video_config: VideoConfig, server_url: String) -> Result<(), String> {
    let client = GeneratorClient::with_base_url(server_url)
        .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create async runtime: {}", e))?;

    rt.block_on(async {
        let mut tui = terminal::Tui::new()
            .map_err(|e| format!("Failed to set up terminal: {}", e))?;
        let mut app = App::new(video_config);

        let result = event_loop::run(&mut tui, &mut app, client).await;

        // Put the terminal back before reporting any loop error
        let restore_result = tui.restore();

        result.map_err(|e| format!("Event loop error: {}", e))?;
        restore_result.map_err(|e| format!("Failed to restore terminal: {}", e))
    })
}

/// Run the generate command: submit one request and download the result
fn run_generate(
    video_config: VideoConfig,
    server_url: String,
    download_dir: Option<std::path::PathBuf>,
    no_download: bool,
) -> Result<(), String> {
    let client = GeneratorClient::with_base_url(server_url)
        .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

    println!("Requesting video generation:");
    println!("  Animation: {}", video_config.animation_type().name());
    println!("  Duration:  {}s", video_config.duration());
    println!("  Music:     {}", video_config.music_style().name());
    println!("  Server:    {}", client.base_url());
    println!();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create async runtime: {}", e))?;

    rt.block_on(async {
        // Step 1: Submit the request and wait for the outcome
        print!("Generating video... ");
        std::io::Write::flush(&mut std::io::stdout()).ok();

        let mut controller = RequestController::new();
        controller
            .submit(&client, &video_config)
            .await
            .map_err(|e| e.to_string())?;

        let response = match controller.state() {
            RequestState::Succeeded { result } => result.clone(),
            RequestState::Failed { message } => {
                return Err(format!("\nGeneration failed: {}", message));
            }
            other => return Err(format!("\nRequest ended in state '{}'", other.name())),
        };
        println!("done");

        println!();
        println!("{}", response.message);
        println!("  Job ID: {}", response.job_id);

        // Step 2: Download the finished video when the backend linked one
        let video_url = match response.video_url {
            Some(ref url) => {
                println!("  Video URL: {}", url);
                url.clone()
            }
            None => {
                println!("  No video URL returned; nothing to download.");
                return Ok(());
            }
        };

        if no_download {
            return Ok(());
        }

        print!("Downloading video... ");
        std::io::Write::flush(&mut std::io::stdout()).ok();

        let dir = download_dir.unwrap_or_else(|| std::path::PathBuf::from("."));
        let dest = dir.join(response.download_name());

        let bytes = client
            .download_video(&video_url, &dest)
            .await
            .map_err(|e| format!("\nFailed to download video: {}", e))?;
        println!("done");

        println!();
        println!("Video ready!");
        println!("  Path: {}", dest.display());
        println!("  Size: {}", format_size(bytes));

        Ok(())
    })
}

/// Run the health command against the generation server
fn run_health(server_url: String) -> Result<(), String> {
    let client = GeneratorClient::with_base_url(server_url)
        .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create async runtime: {}", e))?;

    rt.block_on(async {
        print!("Checking {} ... ", client.base_url());
        std::io::Write::flush(&mut std::io::stdout()).ok();

        let health = client
            .health()
            .await
            .map_err(|e| format!("\nServer is not reachable: {}", e))?;
        println!("{}", health.status);

        Ok(())
    })
}

/// Load .env file before reading any environment variables
///
/// Does not override existing environment variables.
fn load_env() {
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();
}

fn main() {
    // Load .env file before anything else
    load_env();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Start { animation, duration, music, server, config: config_path }) => {
            let cfg = load_config(config_path.as_deref());

            // Merge settings: CLI args > config file > built-in defaults
            let mut video_config = cfg.video_config();
            if let Some(animation) = animation {
                video_config.set_animation_type(animation);
            }
            if let Some(duration) = duration {
                video_config.set_duration(duration);
            }
            if let Some(music) = music {
                video_config.set_music_style(music);
            }

            let server_url = resolve_server_url(server, &cfg);

            if let Err(e) = run_start(video_config, server_url) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Generate { animation, duration, music, server, config: config_path, output, no_download }) => {
            let cfg = load_config(config_path.as_deref());

            // Merge settings: CLI args > config file > built-in defaults
            let mut video_config = cfg.video_config();
            if let Some(animation) = animation {
                video_config.set_animation_type(animation);
            }
            if let Some(duration) = duration {
                video_config.set_duration(duration);
            }
            if let Some(music) = music {
                video_config.set_music_style(music);
            }

            let server_url = resolve_server_url(server, &cfg);

            // Download directory: CLI > config file > current directory
            let download_dir = output.or(cfg.download.dir);

            if let Err(e) = run_generate(video_config, server_url, download_dir, no_download) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Health { server, config: config_path }) => {
            let cfg = load_config(config_path.as_deref());
            let server_url = resolve_server_url(server, &cfg);

            if let Err(e) = run_health(server_url) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            // Show brief help when no command is provided
            println!("vidgen {}", env!("CARGO_PKG_VERSION"));
            println!("Terminal client for AI video generation\n");
            println!("USAGE:");
            println!("    vidgen <COMMAND>\n");
            println!("COMMANDS:");
            println!("    start     Configure and submit requests from a terminal UI");
            println!("    generate  Generate a single video and download it");
            println!("    health    Check that the generation server is reachable");
            println!("    help      Print this message or the help of a subcommand\n");
            println!("Run 'vidgen --help' for more details and examples.");
        }
    }
}
