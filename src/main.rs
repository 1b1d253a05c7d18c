use anyhow::Context as _;
use clap::Parser as _;
use dotenvy::dotenv;
use poise::serenity_prelude as serenity;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

mod modules;
mod services;

use services::action_log::ActionLogService;
use services::config::Config;
use services::rate_limit::ModRateLimiter;
use services::vanity::VanityService;

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Register slash commands globally instead of in the configured guild.
    #[arg(long)]
    publish_global: bool,
}

// Shared state passed to all command and event handlers
pub struct Data {
    pub config: Arc<Config>,
    pub vanity: Arc<VanityService>,
    pub rate_limiter: Arc<ModRateLimiter>,
    pub action_log: Arc<ActionLogService>,
    pub scan_started: AtomicBool,
}

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Args::parse();
    let publish_global = args.publish_global;

    tracing_subscriber::fmt::init();

    info!("Starting vanity guard bot...");

    let config = Arc::new(Config::load().context("Failed to load configuration")?);

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::GUILD_PRESENCES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let vanity = Arc::new(VanityService::new(config.clone()));
    let rate_limiter = Arc::new(ModRateLimiter::new(config.mod_action_daily_limit));
    let action_log = Arc::new(ActionLogService::new(config.log_channel_id));

    rate_limiter.clone().start_purge_runner();

    let token = config.bot_token.clone();
    let setup_config = config.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: modules::commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                case_insensitive_commands: true,
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(services::event_manager::handle_event(
                    ctx, event, framework, data,
                ))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                if publish_global {
                    info!("Registering commands globally...");
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                } else {
                    info!("Registering commands in guild {}...", setup_config.guild_id);
                    poise::builtins::register_in_guild(
                        ctx,
                        &framework.options().commands,
                        setup_config.guild_id,
                    )
                    .await?;
                }

                Ok(Data {
                    config: setup_config,
                    vanity,
                    rate_limiter,
                    action_log,
                    scan_started: AtomicBool::new(false),
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .context("Failed to create client")?;

    info!("Bot is ready!");
    client.start().await.context("Client error")?;

    Ok(())
}
