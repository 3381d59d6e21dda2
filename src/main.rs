use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phonics_garden::config::Config;
use phonics_garden::game::SyncSink;
use phonics_garden::logging::{init_tracing, LogMode};
use phonics_garden::speech::SpeechServer;

mod cli;

use cli::{play, report, App};

#[derive(Parser)]
#[command(name = "phonics")]
#[command(about = "Phonics Garden - learn the sh, ch, th, wh and ck sounds")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to <config_dir>/phonics-garden/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List lessons and their progress
    Lessons,

    /// Show rewards, streak and today's play time
    Status,

    /// Make a lesson the current one
    Select { lesson: String },

    /// Play a lesson's introduction
    Intro {
        lesson: String,
        /// Narrate through the speech proxy
        #[arg(long)]
        speak: bool,
    },

    /// Walk through a lesson's words (+1 star)
    Explore {
        lesson: String,
        #[arg(long)]
        speak: bool,
    },

    /// Record one practice answer
    Practice {
        lesson: String,
        /// Record a wrong answer instead of a correct one
        #[arg(long)]
        wrong: bool,
    },

    /// Sound hunt: find the letters that make the sound
    Hunt {
        #[arg(long, default_value_t = 10)]
        rounds: u32,
        #[arg(long)]
        speak: bool,
    },

    /// Picture match: find the picture with the sound
    Match {
        #[arg(long, default_value_t = 10)]
        rounds: u32,
    },

    /// Start or end a timed play session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Trade a finished streak for ice cream
    Redeem,

    /// Clear lesson progress and rewards (the streak is kept)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Upload local state to the cloud now
    Sync {
        /// Merge the cloud copy into local state first
        #[arg(long)]
        pull: bool,
    },

    /// Speak text through the proxy, falling back to the local voice
    Say {
        text: String,
        /// Where to write the audio clip
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Run the text-to-speech proxy server
    Serve {
        /// Override speech.bind_addr
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    Start,
    End,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mode = match cli.command {
        Commands::Serve { .. } => LogMode::Server,
        _ => LogMode::Quiet,
    };
    init_tracing(mode);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { bind } => serve(&config, bind).await,
        command => {
            let app = App::open(config).await?;
            run(&app, command).await?;
            app.finish().await;
            Ok(())
        }
    }
}

async fn run(app: &App, command: Commands) -> Result<()> {
    let store = &app.store;
    match command {
        Commands::Lessons => report::print_lessons(&store.snapshot()),
        Commands::Status => {
            let status = app.cloud.as_ref().map(|c| c.queue.status());
            report::print_status(&store.snapshot(), status.as_deref());
        }
        Commands::Select { lesson } => {
            let lesson = play::lesson(&lesson)?;
            store.select_lesson(lesson.id);
            println!("Current lesson: {}", lesson.letters);
        }
        Commands::Intro { lesson, speak } => play::intro(app, &lesson, speak).await?,
        Commands::Explore { lesson, speak } => play::explore(app, &lesson, speak).await?,
        Commands::Practice { lesson, wrong } => {
            let lesson = play::lesson(&lesson)?;
            let state = store.record_practice_attempt(lesson.id, !wrong);
            if let Some(progress) = state.lesson(lesson.id) {
                println!(
                    "{}: {}/{} correct{}",
                    lesson.letters,
                    progress.practice_correct,
                    progress.practice_attempts,
                    if progress.mastered { " (mastered)" } else { "" }
                );
            }
        }
        Commands::Hunt { rounds, speak } => play::hunt(app, rounds, speak).await?,
        Commands::Match { rounds } => play::picture_match(app, rounds).await?,
        Commands::Session { action } => {
            let state = match action {
                SessionAction::Start => store.start_session(),
                SessionAction::End => store.end_session(),
            };
            let played = state.timer.today_play_seconds;
            println!(
                "Played today: {}m {}s. Streak: {}",
                played / 60,
                played % 60,
                state.streak.phase().label()
            );
        }
        Commands::Redeem => {
            let before = store.snapshot();
            let after = store.redeem_ice_cream();
            if after != before {
                println!("🍦 Enjoy your ice cream!");
            } else {
                println!(
                    "Not yet! {} more day(s) to go.",
                    after.streak.days_until_treat()
                );
            }
        }
        Commands::Reset { yes } => {
            if !yes {
                println!("This clears all lesson progress, stars and stickers. Re-run with --yes.");
                return Ok(());
            }
            store.reset_progress();
            println!("Progress reset.");
        }
        Commands::Sync { pull } => {
            let Some(cloud) = &app.cloud else {
                anyhow::bail!("Cloud sync is not configured (set [cloud] url and anon_key)");
            };
            let player_id = cloud.sync.try_initialize_player(store).await?;
            if pull {
                cloud.sync.try_load_from_cloud(store).await?;
            }
            cloud.queue.push(&store.snapshot());
            println!("Syncing player {player_id}...");
        }
        Commands::Say { text, out } => {
            let out = out.unwrap_or_else(cli::default_clip_path);
            play::say(app, &text, &out).await?;
        }
        Commands::Serve { bind } => serve(&app.config, bind).await?,
    }
    Ok(())
}

async fn serve(config: &Config, bind: Option<String>) -> Result<()> {
    let mut server = SpeechServer::new(&config.speech)?;
    let bind_addr = bind.unwrap_or_else(|| config.speech.bind_addr.clone());
    let addr = server.try_bind(&bind_addr).await?;
    println!("Speech proxy listening on http://{addr}");
    server.run().await?;
    Ok(())
}
