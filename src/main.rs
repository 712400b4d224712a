//! LootLink - Engine extension pack
//!
//! A small set of independent hooks for a game engine's client/server event
//! system, plus the wire protocol for the loot notification message.

mod config;
mod engine;
mod hooks;
mod protocol;

use std::path::PathBuf;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::ModConfig;
use engine::{
    BlockPos, ConsoleChat, EngineEvent, EngineServices, EntityHandle, EntityKind, EventBus,
    InMemoryScoreboard, ItemUse, LocalAvatar, MainContext, PlayerAvatar, PlayerHandle, Scoreboard,
    Side, SparseWorld, TickPhase,
};
use protocol::{ItemRecord, LootNotification, LOOT_CHANNEL};

/// LootLink - engine extension pack
#[derive(Parser)]
#[command(name = "lootlink")]
#[command(author = "LootLink Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Engine event hooks and a loot notification protocol", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the loopback demo: every hook fires once against in-memory engine services
    Simulate {
        /// Name of the receiving player
        #[arg(short, long, default_value = "Steve")]
        player: String,
    },

    /// Show current configuration
    Config {
        /// Generate sample configuration
        #[arg(long)]
        generate: bool,

        /// Output path for generated config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show protocol information
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        ModConfig::load(config_path)?
    } else {
        ModConfig::load_default().unwrap_or_default()
    };

    match cli.command {
        Commands::Simulate { player } => {
            run_simulate(config, player).await?;
        }
        Commands::Config { generate, output } => {
            if generate {
                let sample = config::generate_sample_config();
                if let Some(path) = output {
                    std::fs::write(&path, &sample)?;
                    println!("Configuration written to: {}", path.display());
                } else {
                    println!("{}", sample);
                }
            } else {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
        Commands::Info => {
            print_protocol_info();
        }
    }

    Ok(())
}

/// Run the loopback demo.
///
/// The duplex pipe stands in for the engine's reliable ordered transport:
/// the sending side encodes a notification, the reading task decodes it and
/// dispatches the receipt event off the main context, and the chat line only
/// appears once the main context is drained.
async fn run_simulate(config: ModConfig, player_name: String) -> anyhow::Result<()> {
    tracing::info!("starting loopback simulation for '{}'", player_name);

    let world = Arc::new(SparseWorld::default());
    let scoreboard = Arc::new(InMemoryScoreboard::default());
    let avatar = Arc::new(LocalAvatar::new(BlockPos::new(0, 64, 0)));
    world.set_block(avatar.position().below(), config.spin.trigger_block.clone());

    let mut main_ctx = MainContext::new();
    let services = EngineServices {
        world: world.clone(),
        scoreboard: scoreboard.clone(),
        chat: Arc::new(ConsoleChat),
        player: PlayerHandle::new(player_name),
        avatar: avatar.clone(),
        main: main_ctx.handle(),
    };

    let mut bus = EventBus::new();
    hooks::register_hooks(&mut bus, &config);
    let bus = Arc::new(bus);

    // Sending endpoint: encode once, transmit once
    let notification = LootNotification::new(vec![
        ItemRecord::new("stick", 3),
        ItemRecord::new("golden_apple", 1),
        ItemRecord::new("bow", 1),
    ]);
    let mut buf = BytesMut::new();
    protocol::encode(&notification, &mut buf)?;

    let (mut sender_end, mut receiver_end) = tokio::io::duplex(1024);
    tokio::spawn(async move {
        if let Err(e) = sender_end.write_all(&buf).await {
            tracing::error!("send failed: {}", e);
        }
        // Dropping the writer closes the pipe
    });

    // Receiving endpoint: read and dispatch away from the main context
    let reader_bus = bus.clone();
    let reader_services = services.clone();
    let reader = tokio::spawn(async move {
        let mut payload = Vec::new();
        receiver_end.read_to_end(&mut payload).await?;
        tracing::debug!("received {} bytes on the loot channel", payload.len());

        let mut event = EngineEvent::PacketReceived {
            channel: LOOT_CHANNEL.to_string(),
            payload: Bytes::from(payload),
        };
        reader_bus.dispatch(Side::Client, &mut event, &reader_services);
        anyhow::Ok(())
    });
    reader.await??;

    // A few engine callbacks on the client side
    let mut tick = EngineEvent::ClientTick {
        phase: TickPhase::End,
    };
    bus.dispatch(Side::Client, &mut tick, &services);

    let mut fov = EngineEvent::FovUpdate {
        fov: 70.0,
        new_fov: 70.0,
        using: Some(ItemUse {
            kind: config.zoom.bow_kind.clone(),
            use_ticks: config.zoom.max_draw_ticks,
        }),
    };
    bus.dispatch(Side::Client, &mut fov, &services);

    let cart = Arc::new(EntityHandle::new(EntityKind::Minecart));
    let mut spawn = EngineEvent::EntityJoinWorld {
        entity: cart.clone(),
    };
    bus.dispatch(Side::Client, &mut spawn, &services);

    // UI-facing work only happens here, on the main context
    main_ctx.run_pending().await;

    if let EngineEvent::FovUpdate { new_fov, .. } = fov {
        tracing::info!("fov after full bow draw: {:.2}", new_fov);
    }
    tracing::info!("avatar yaw after one trigger tick: {:.1}", avatar.yaw());
    tracing::info!(
        "team '{}' members: {:?}",
        config.team.name,
        scoreboard.members(&config.team.name)
    );
    tracing::info!("minecart glowing: {}", cart.is_glowing());

    let registry = hooks::default_registry(&config.zoom);
    let drawn_bow = ItemRecord::new(config.zoom.bow_kind.clone(), 1).with_aux(vec![10]);
    if let Some(pull) = registry.resolve(&drawn_bow, "pull", world.as_ref(), None) {
        tracing::info!("bow pull at 10 ticks: {:.2}", pull);
    }

    Ok(())
}

/// Print protocol information
fn print_protocol_info() {
    println!("LootLink Protocol Information");
    println!("=============================\n");

    println!("Protocol Version: {}", protocol::PROTOCOL_VERSION);
    println!("Loot Channel: {}", LOOT_CHANNEL);
    println!(
        "\nWire format: [u32 count][kind-len u16][kind][count u32][aux-len u32][aux] per record"
    );
}
