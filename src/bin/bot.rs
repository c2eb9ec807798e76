use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;

use message_manager::commands::{
    create_all_handlers, dispatch, split_command, CommandContext, CommandRegistry, Invocation,
};
use message_manager::core::Config;
use message_manager::gateway::DiscordGateway;
use message_manager::permissions::{ManageRoleGate, PermissionGate};
use message_manager::settings::JsonSettingsStore;

struct Handler {
    registry: CommandRegistry,
    gate: Arc<dyn PermissionGate>,
    config: Config,
}

impl Handler {
    fn new(registry: CommandRegistry, gate: Arc<dyn PermissionGate>, config: Config) -> Self {
        Handler {
            registry,
            gate,
            config,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        // Commands only make sense inside a server.
        let Some(guild_id) = msg.guild_id else {
            return;
        };
        let Some((command, rest)) = split_command(&self.config.command_prefix, &msg.content)
        else {
            return;
        };
        if !self.registry.contains(&command) {
            return;
        }

        let author_roles = msg
            .member
            .as_ref()
            .map(|member| member.roles.iter().map(|role| role.0).collect())
            .unwrap_or_default();

        let invocation = Invocation::new(
            msg.author.id.0,
            author_roles,
            guild_id.0,
            msg.channel_id.0,
            msg.id.0,
            command,
            rest.to_string(),
        );

        let gateway = Arc::new(DiscordGateway::new(ctx));
        let command_ctx = Arc::new(
            CommandContext::new(gateway, Arc::clone(&self.gate)).with_timeouts(
                self.config.confirm_timeout(),
                self.config.prompt_timeout(),
            ),
        );

        if let Err(err) = dispatch(&command_ctx, &self.registry, &invocation).await {
            error!("[{}] Unhandled command failure: {err:?}", invocation.request_id);
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected and ready!", ready.user.name);
        info!("Serving {} guilds", ready.guilds.len());
        info!(
            "Listening for '{}'-prefixed commands: {}",
            self.config.command_prefix,
            {
                let mut names: Vec<&str> =
                    self.registry.command_names().map(|n| &**n).collect();
                names.sort_unstable();
                names.join(", ")
            }
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Message Manager...");

    let settings = Arc::new(JsonSettingsStore::load(&config.settings_path)?);
    let gate: Arc<dyn PermissionGate> = Arc::new(ManageRoleGate::new(settings));

    let mut registry = CommandRegistry::new();
    for handler in create_all_handlers() {
        registry.register(handler);
    }

    let handler = Handler::new(registry, gate, config.clone());

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
